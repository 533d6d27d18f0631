//! Turning a configured [`Timeout`] into a concrete [`TimingSpec`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::{AutoDurationBand, TimingFunction, TimingSpec};

/// Which way a transition is heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Enter,
    Exit,
}

/// How long a collapse transition should take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeout {
    /// Same duration for both directions
    Fixed(Duration),
    /// Separate durations for entering and exiting
    PerPhase { enter: Duration, exit: Duration },
    /// Derive the duration from the measured content size
    Auto,
}

impl Timeout {
    /// Used when no timeout, or a malformed one, is configured.
    pub const DEFAULT: Self = Timeout::Fixed(Duration::from_millis(300));

    pub fn is_auto(&self) -> bool {
        matches!(self, Timeout::Auto)
    }

    /// Parse `s`, logging and falling back to [`Timeout::DEFAULT`] on error.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: TimeoutParseError| {
            log::warn!("Invalid collapse timeout {:?} ({}), using default", s, err);
            Self::DEFAULT
        })
    }

    /// Build a fixed timeout from a loosely-typed millisecond count.
    /// Negative or non-finite values yield [`Timeout::DEFAULT`].
    pub fn from_millis_lossy(ms: f64) -> Self {
        match millis_to_duration(ms) {
            Some(duration) => Timeout::Fixed(duration),
            None => {
                log::warn!("Invalid collapse timeout {}ms, using default", ms);
                Self::DEFAULT
            }
        }
    }

    /// The configured duration for `direction`, or `None` for `Auto`.
    pub fn fixed_duration(&self, direction: Direction) -> Option<Duration> {
        match (self, direction) {
            (Timeout::Fixed(d), _) => Some(*d),
            (Timeout::PerPhase { enter, .. }, Direction::Enter) => Some(*enter),
            (Timeout::PerPhase { exit, .. }, Direction::Exit) => Some(*exit),
            (Timeout::Auto, _) => None,
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::Fixed(duration)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Fixed(d) => write!(f, "{}ms", Millis(*d)),
            Timeout::PerPhase { enter, exit } => write!(f, "{}/{}", Millis(*enter), Millis(*exit)),
            Timeout::Auto => write!(f, "auto"),
        }
    }
}

/// Milliseconds with up to three decimals, the precision parsing keeps.
struct Millis(Duration);

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let micros = self.0.as_micros();
        let (whole, frac) = (micros / 1000, micros % 1000);
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let frac = format!("{:03}", frac);
        write!(f, "{}.{}", whole, frac.trim_end_matches('0'))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeoutParseError {
    #[error("timeout is empty")]
    Empty,
    #[error("`{0}` is not a duration in milliseconds")]
    BadMillis(String),
}

impl FromStr for Timeout {
    type Err = TimeoutParseError;

    /// Accepts `auto`, `300`, `300ms` and `225/195` (enter/exit).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeoutParseError::Empty);
        }
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Timeout::Auto);
        }
        match s.split_once('/') {
            Some((enter, exit)) => Ok(Timeout::PerPhase {
                enter: parse_millis(enter)?,
                exit: parse_millis(exit)?,
            }),
            None => Ok(Timeout::Fixed(parse_millis(s)?)),
        }
    }
}

fn parse_millis(s: &str) -> Result<Duration, TimeoutParseError> {
    let s = s.trim();
    let digits = s.strip_suffix("ms").unwrap_or(s).trim();
    digits
        .parse::<f64>()
        .ok()
        .and_then(millis_to_duration)
        .ok_or_else(|| TimeoutParseError::BadMillis(s.to_string()))
}

fn millis_to_duration(ms: f64) -> Option<Duration> {
    (ms.is_finite() && ms >= 0.0).then(|| Duration::from_micros((ms * 1000.0).round() as u64))
}

/// Resolve the timing for one transition.
///
/// Fixed timeouts return their duration and `easing` untouched. `Auto`
/// estimates the duration from `measured_px` and defaults the easing to the
/// symmetric [`TimingFunction::EaseInOut`] regardless of direction.
pub fn resolve_timing(
    timeout: &Timeout,
    direction: Direction,
    measured_px: f32,
    easing: Option<&TimingFunction>,
    band: &AutoDurationBand,
) -> TimingSpec {
    match timeout.fixed_duration(direction) {
        Some(duration) => TimingSpec {
            duration,
            easing: easing.cloned(),
        },
        None => TimingSpec {
            duration: band.estimate(measured_px),
            easing: Some(easing.cloned().unwrap_or(TimingFunction::EaseInOut)),
        },
    }
}

#[cfg(feature = "serde")]
mod de {
    use serde::{Deserialize, Deserializer};

    use super::{millis_to_duration, Timeout};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimeout {
        Millis(f64),
        PerPhase { enter: f64, exit: f64 },
        Keyword(String),
        Other(serde::de::IgnoredAny),
    }

    impl<'de> Deserialize<'de> for Timeout {
        /// Never fails on shape: anything unusable becomes [`Timeout::DEFAULT`].
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let timeout = match RawTimeout::deserialize(deserializer)? {
                RawTimeout::Millis(ms) => Timeout::from_millis_lossy(ms),
                RawTimeout::PerPhase { enter, exit } => {
                    match (millis_to_duration(enter), millis_to_duration(exit)) {
                        (Some(enter), Some(exit)) => Timeout::PerPhase { enter, exit },
                        _ => lossy_default(&format!("{}/{}", enter, exit)),
                    }
                }
                RawTimeout::Keyword(s) => Timeout::parse_or_default(&s),
                RawTimeout::Other(_) => lossy_default("<unsupported shape>"),
            };
            Ok(timeout)
        }
    }

    fn lossy_default(raw: &str) -> Timeout {
        log::warn!("Invalid collapse timeout {}, using default", raw);
        Timeout::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fixed_passes_easing_through() {
        let spec = resolve_timing(
            &Timeout::Fixed(ms(300)),
            Direction::Enter,
            120.0,
            Some(&TimingFunction::EaseOut),
            &AutoDurationBand::DEFAULT,
        );
        assert_eq!(spec.duration, ms(300));
        assert_eq!(spec.easing, Some(TimingFunction::EaseOut));
    }

    #[test]
    fn test_fixed_ignores_measured_size() {
        let timeout = Timeout::Fixed(ms(250));
        for px in [0.0, 40.0, 10_000.0] {
            let spec = resolve_timing(&timeout, Direction::Exit, px, None, &Default::default());
            assert_eq!(spec.duration, ms(250));
            assert_eq!(spec.easing, None);
        }
    }

    #[test]
    fn test_per_phase_picks_direction() {
        let timeout = Timeout::PerPhase {
            enter: ms(225),
            exit: ms(195),
        };
        let band = AutoDurationBand::DEFAULT;
        assert_eq!(
            resolve_timing(&timeout, Direction::Enter, 0.0, None, &band).duration,
            ms(225)
        );
        assert_eq!(
            resolve_timing(&timeout, Direction::Exit, 0.0, None, &band).duration,
            ms(195)
        );
    }

    #[test]
    fn test_auto_uses_estimator_and_symmetric_easing() {
        let band = AutoDurationBand::DEFAULT;
        let enter = resolve_timing(&Timeout::Auto, Direction::Enter, 1000.0, None, &band);
        let exit = resolve_timing(&Timeout::Auto, Direction::Exit, 1000.0, None, &band);
        assert_eq!(enter.duration, band.estimate(1000.0));
        assert_eq!(enter, exit);
        assert_eq!(enter.easing, Some(TimingFunction::EaseInOut));
    }

    #[test]
    fn test_auto_respects_caller_easing() {
        let spec = resolve_timing(
            &Timeout::Auto,
            Direction::Exit,
            40.0,
            Some(&TimingFunction::Linear),
            &AutoDurationBand::DEFAULT,
        );
        assert_eq!(spec.easing, Some(TimingFunction::Linear));
        assert_eq!(spec.duration, ms(200));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("auto".parse(), Ok(Timeout::Auto));
        assert_eq!("300".parse(), Ok(Timeout::Fixed(ms(300))));
        assert_eq!(" 150ms ".parse(), Ok(Timeout::Fixed(ms(150))));
        assert_eq!(
            "225/195".parse(),
            Ok(Timeout::PerPhase {
                enter: ms(225),
                exit: ms(195)
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Timeout>(), Err(TimeoutParseError::Empty));
        assert!(matches!(
            "fast".parse::<Timeout>(),
            Err(TimeoutParseError::BadMillis(_))
        ));
        assert!(matches!(
            "-20".parse::<Timeout>(),
            Err(TimeoutParseError::BadMillis(_))
        ));
        assert!(matches!(
            "100/".parse::<Timeout>(),
            Err(TimeoutParseError::BadMillis(_))
        ));
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        assert_eq!(Timeout::parse_or_default("soon"), Timeout::DEFAULT);
        assert_eq!(Timeout::from_millis_lossy(f64::NAN), Timeout::DEFAULT);
        assert_eq!(Timeout::from_millis_lossy(-1.0), Timeout::DEFAULT);
        assert_eq!(Timeout::from_millis_lossy(0.0), Timeout::Fixed(Duration::ZERO));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for t in [
            Timeout::Auto,
            Timeout::Fixed(ms(300)),
            Timeout::PerPhase {
                enter: ms(225),
                exit: ms(195),
            },
            Timeout::Fixed(Duration::from_micros(500)),
            Timeout::PerPhase {
                enter: Duration::from_micros(12_250),
                exit: Duration::from_micros(1_001),
            },
        ] {
            assert_eq!(t.to_string().parse(), Ok(t));
        }
    }

    #[test]
    fn test_fractional_millis_are_displayed() {
        assert_eq!("0.5".parse::<Timeout>().map(|t| t.to_string()), Ok("0.5ms".to_string()));
        assert_eq!(
            Timeout::PerPhase {
                enter: Duration::from_micros(12_250),
                exit: ms(195),
            }
            .to_string(),
            "12.25/195"
        );
    }
}
