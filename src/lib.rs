pub mod animation;
pub mod collapse;
pub mod error;
pub mod jobs;
pub mod node;
pub mod timer;

pub use error::CollapseError;

pub mod prelude {
    pub use crate::animation::{
        estimate_auto_duration, resolve_timing, AutoDurationBand, Direction, Timeout,
        TimingFunction, TimingSpec,
    };
    pub use crate::collapse::{
        CollapseCallbacks, CollapseConfig, CollapseController, ContainerStyle, Overflow, Phase,
        PhaseEvent, Visibility,
    };
    pub use crate::error::CollapseError;
    pub use crate::node::{
        CollapseNode, HeadlessNode, NodeRef, SizeStyle, StyleChanges, StyleProperty,
        TransitionEnd,
    };
    pub use crate::timer::{CalloopScheduler, ManualScheduler, Scheduler, TimerError, TimerToken};
}
