mod sample;
mod types;

use thiserror::Error;

pub use crate::sample::{GamepadButton, GamepadSample, SampleShape};
pub use crate::types::{Handedness, InputSource};

/// Error type for parsing gamepad vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The string is not one of `left`, `right` or `none`.
    #[error("invalid handedness: {0}")]
    InvalidHandedness(String),
}
