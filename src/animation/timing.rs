//! Timing functions (easing curves) for height transitions.
//!
//! A transition carries at most one timing function. Hosts that hand the
//! easing to a styling layer use the CSS spelling produced by `Display`;
//! hosts that interpolate themselves call [`TimingFunction::evaluate`].
//!
//! ## Built-in Easing Functions
//!
//! - [`TimingFunction::Linear`] - Constant speed (no easing)
//! - [`TimingFunction::Ease`] - The CSS `ease` curve
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast (acceleration)
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow (deceleration)
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle
//!
//! ## Example
//!
//! ```
//! use collapse_transition::animation::TimingFunction;
//!
//! let easing: TimingFunction = "cubic-bezier(0.4, 0, 0.2, 1)".parse().unwrap();
//! assert_eq!(easing.to_string(), "cubic-bezier(0.4, 0, 0.2, 1)");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Timing function that controls the animation curve
#[derive(Clone)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// CSS `ease`, equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1)`
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Custom timing function. Renders as `linear` for CSS hosts.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::Ease => cubic_bezier(t, 0.25, 0.1, 0.25, 1.0),
            TimingFunction::EaseIn => cubic_bezier(t, 0.42, 0.0, 1.0, 1.0),
            TimingFunction::EaseOut => cubic_bezier(t, 0.0, 0.0, 0.58, 1.0),
            TimingFunction::EaseInOut => cubic_bezier(t, 0.42, 0.0, 0.58, 1.0),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Custom(_) => write!(f, "Custom"),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Linear | TimingFunction::Custom(_) => write!(f, "linear"),
            TimingFunction::Ease => write!(f, "ease"),
            TimingFunction::EaseIn => write!(f, "ease-in"),
            TimingFunction::EaseOut => write!(f, "ease-out"),
            TimingFunction::EaseInOut => write!(f, "ease-in-out"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

/// Two functions are equal when they describe the same curve.
/// Custom closures only compare equal to themselves.
impl PartialEq for TimingFunction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TimingFunction::Custom(a), TimingFunction::Custom(b)) => Arc::ptr_eq(a, b),
            (TimingFunction::Custom(_), _) | (_, TimingFunction::Custom(_)) => false,
            (
                TimingFunction::CubicBezier(a1, b1, c1, d1),
                TimingFunction::CubicBezier(a2, b2, c2, d2),
            ) => a1 == a2 && b1 == b2 && c1 == c2 && d1 == d2,
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

/// Error returned when an easing string is not a recognised CSS timing function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EasingParseError {
    #[error("unknown timing function `{0}`")]
    Unknown(String),
    #[error("cubic-bezier expects 4 numbers, got `{0}`")]
    BadBezier(String),
    #[error("cubic-bezier x coordinates must be within [0, 1], got `{0}`")]
    BezierOutOfRange(String),
}

impl FromStr for TimingFunction {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "linear" => return Ok(TimingFunction::Linear),
            "ease" => return Ok(TimingFunction::Ease),
            "ease-in" => return Ok(TimingFunction::EaseIn),
            "ease-out" => return Ok(TimingFunction::EaseOut),
            "ease-in-out" => return Ok(TimingFunction::EaseInOut),
            _ => {}
        }

        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| EasingParseError::Unknown(s.to_string()))?;

        let values = args
            .split(',')
            .map(|v| v.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| EasingParseError::BadBezier(args.to_string()))?;

        let &[x1, y1, x2, y2] = values.as_slice() else {
            return Err(EasingParseError::BadBezier(args.to_string()));
        };
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(EasingParseError::BezierOutOfRange(args.to_string()));
        }
        Ok(TimingFunction::CubicBezier(x1, y1, x2, y2))
    }
}

/// Cubic bezier curve evaluation
/// Assumes x1, x2 are in [0, 1], which `FromStr` enforces
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Newton-Raphson: find the curve parameter whose x equals t
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = bezier_component(current_t, x1, x2);
        let current_slope = bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    bezier_component(current_t.clamp(0.0, 1.0), y1, y2)
}

fn bezier_component(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let f = TimingFunction::EaseInOut;
        assert!((f.evaluate(0.5) - 0.5).abs() < 1e-4);
        let a = f.evaluate(0.2);
        let b = 1.0 - f.evaluate(0.8);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn test_keywords_match_their_css_curves() {
        for (keyword, bezier) in [
            (TimingFunction::Ease, TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0)),
            (TimingFunction::EaseIn, TimingFunction::CubicBezier(0.42, 0.0, 1.0, 1.0)),
            (TimingFunction::EaseOut, TimingFunction::CubicBezier(0.0, 0.0, 0.58, 1.0)),
            (TimingFunction::EaseInOut, TimingFunction::CubicBezier(0.42, 0.0, 0.58, 1.0)),
        ] {
            for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
                assert_eq!(keyword.evaluate(t), bezier.evaluate(t), "{keyword} at {t}");
            }
        }
        // Not the quadratic ease-in
        assert!((TimingFunction::EaseIn.evaluate(0.5) - 0.25).abs() > 0.01);
    }

    #[test]
    fn test_endpoints_are_pinned() {
        for f in [
            TimingFunction::Ease,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::CubicBezier(0.4, 0.0, 0.2, 1.0),
        ] {
            assert!(f.evaluate(0.0).abs() < 1e-4, "{f}");
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-4, "{f}");
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(TimingFunction::Linear.evaluate(1.7), 1.0);
        assert_eq!(TimingFunction::Linear.evaluate(-0.3), 0.0);
    }

    #[test]
    fn test_css_keywords_parse() {
        assert_eq!("ease".parse::<TimingFunction>(), Ok(TimingFunction::Ease));
        assert_eq!(
            " ease-in-out ".parse::<TimingFunction>(),
            Ok(TimingFunction::EaseInOut)
        );
        assert_eq!(TimingFunction::EaseOut.to_string(), "ease-out");
    }

    #[test]
    fn test_bezier_parse() {
        let parsed: TimingFunction = "cubic-bezier(0.4, 0, 0.2, 1)".parse().unwrap();
        assert_eq!(parsed, TimingFunction::CubicBezier(0.4, 0.0, 0.2, 1.0));
    }

    #[test]
    fn test_bad_easing_is_rejected() {
        assert!(matches!(
            "bouncy".parse::<TimingFunction>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.4, 0, 0.2)".parse::<TimingFunction>(),
            Err(EasingParseError::BadBezier(_))
        ));
        assert!(matches!(
            "cubic-bezier(1.5, 0, 0.2, 1)".parse::<TimingFunction>(),
            Err(EasingParseError::BezierOutOfRange(_))
        ));
    }

    #[test]
    fn test_custom_equality_is_identity() {
        let f = TimingFunction::custom(|t| t * t * t);
        assert_eq!(f, f.clone());
        assert_ne!(f, TimingFunction::custom(|t| t * t * t));
        assert_eq!(format!("{:?}", f), "Custom");
    }
}
