use std::fmt;

use serde::{Deserialize, Serialize};

/// One button slot as reported by the host input API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadButton {
    pub value: f32,
    #[serde(default)]
    pub touched: bool,
    #[serde(default)]
    pub pressed: bool,
}

impl GamepadButton {
    pub fn new(value: f32, touched: bool, pressed: bool) -> Self {
        Self { value, touched, pressed }
    }

    /// A button that only reports an analog value.
    pub fn analog(value: f32) -> Self {
        Self { value, touched: false, pressed: false }
    }
}

/// A single frame of raw gamepad data. Read-only to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadSample {
    #[serde(default)]
    pub buttons: Vec<GamepadButton>,
    #[serde(default)]
    pub axes: Vec<f32>,
}

impl GamepadSample {
    /// Create a resting sample with the given number of slots.
    pub fn zeroed(shape: SampleShape) -> Self {
        Self {
            buttons: vec![GamepadButton::default(); shape.buttons],
            axes: vec![0.0; shape.axes],
        }
    }

    #[inline]
    pub fn shape(&self) -> SampleShape {
        SampleShape {
            buttons: self.buttons.len(),
            axes: self.axes.len(),
        }
    }

    #[inline]
    pub fn button(&self, index: usize) -> Option<&GamepadButton> {
        self.buttons.get(index)
    }

    #[inline]
    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }
}

/// Number of button and axis slots a sample exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SampleShape {
    pub buttons: usize,
    pub axes: usize,
}

impl SampleShape {
    pub const fn new(buttons: usize, axes: usize) -> Self {
        Self { buttons, axes }
    }

    /// Check that `other` has at least as many slots as `self`.
    #[inline]
    pub fn fits_within(&self, other: &SampleShape) -> bool {
        self.buttons <= other.buttons && self.axes <= other.axes
    }
}

impl fmt::Display for SampleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} buttons/{} axes", self.buttons, self.axes)
    }
}
