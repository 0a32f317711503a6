mod component;
mod controller;
mod options;
mod response;
mod util;

use thiserror::Error;

use xrinput_gamepad::{Handedness, SampleShape};

pub use component::{ComponentRuntime, ComponentSnapshot};
pub use controller::{ComponentView, MotionController};
pub use options::{ComponentOptions, ControllerOptions};
pub use response::{evaluate, ResponseOutput, ResponseValue};
pub use xrinput_profile::ComponentState;

/// Normalized button value above which a button counts as touched.
pub const BUTTON_TOUCH_THRESHOLD: f32 = 0.05;

/// Axis magnitude above which an axis-only component counts as touched.
pub const AXIS_TOUCH_THRESHOLD: f32 = 0.1;

pub type Result<T> = std::result::Result<T, MotionError>;

/// Failure to build or drive a [`MotionController`].
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("profile \"{profile_id}\" has no layout for hand \"{hand}\"")]
    NoLayout {
        profile_id: String,
        hand: Handedness,
    },
    #[error("profile \"{profile_id}\" ({hand}) needs {required}, sample has {available}")]
    SampleShape {
        profile_id: String,
        hand: Handedness,
        required: SampleShape,
        available: SampleShape,
    },
    #[error("{kind} component \"{component}\" has no button index")]
    MissingButton { component: String, kind: String },
    #[error("options reference unknown component \"{0}\"")]
    UnknownComponent(String),
    #[error("options parse error: {0}")]
    Options(#[from] serde_yaml::Error),
}
