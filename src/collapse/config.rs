use std::time::Duration;

use crate::animation::{AutoDurationBand, Timeout, TimingFunction};

/// Configuration for a [`CollapseController`](super::CollapseController).
///
/// # Example
/// ```
/// use std::time::Duration;
/// use collapse_transition::animation::Timeout;
/// use collapse_transition::collapse::CollapseConfig;
///
/// let config = CollapseConfig::new()
///     .visible(true)
///     .appear(true)
///     .timeout(Timeout::Auto)
///     .safety_margin(Some(Duration::from_millis(500)));
/// assert!(config.timeout.is_auto());
/// ```
#[derive(Clone, Debug)]
pub struct CollapseConfig {
    /// Initial value of the visible input
    pub visible: bool,
    pub timeout: Timeout,
    /// Easing handed to every transition. `None` keeps the node's default
    /// for fixed timeouts and uses ease-in-out for auto.
    pub easing: Option<TimingFunction>,
    /// Run the enter transition on mount when initially visible
    pub appear: bool,
    pub auto_band: AutoDurationBand,
    /// With a fixed timeout, settle anyway this long after the expected end
    /// if no transition end arrived. `None` trusts the native signal alone.
    pub safety_margin: Option<Duration>,
}

impl CollapseConfig {
    pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(1000);

    pub fn new() -> Self {
        Self {
            visible: false,
            timeout: Timeout::DEFAULT,
            easing: None,
            appear: false,
            auto_band: AutoDurationBand::DEFAULT,
            safety_margin: Some(Self::DEFAULT_SAFETY_MARGIN),
        }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.timeout = timeout.into();
        self
    }

    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn appear(mut self, appear: bool) -> Self {
        self.appear = appear;
        self
    }

    pub fn auto_band(mut self, band: AutoDurationBand) -> Self {
        self.auto_band = band;
        self
    }

    pub fn safety_margin(mut self, margin: Option<Duration>) -> Self {
        self.safety_margin = margin;
        self
    }
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self::new()
    }
}
