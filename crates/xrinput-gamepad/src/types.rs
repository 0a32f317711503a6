use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, GamepadSample};

/// Logical hand an input source is assigned to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    None,
    Left,
    Right,
}

impl Handedness {
    pub const ALL: [Handedness; 3] =
        [Handedness::None, Handedness::Left, Handedness::Right];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Handedness::None => "none",
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Handedness::None,
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            other => return Err(Error::InvalidHandedness(other.to_string())),
        })
    }
}

/// Explicit context describing one tracked input source.
///
/// `profiles` lists the profile ids the platform reports, most specific first.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSource {
    pub handedness: Handedness,
    pub profiles: Vec<Box<str>>,
    pub gamepad: GamepadSample,
}

impl InputSource {
    pub fn new(handedness: Handedness, gamepad: GamepadSample) -> Self {
        Self {
            handedness,
            profiles: Vec::new(),
            gamepad,
        }
    }

    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handedness_round_trips_through_str() {
        for hand in Handedness::ALL {
            assert_eq!(hand.as_str().parse::<Handedness>(), Ok(hand));
        }
    }

    #[test]
    fn handedness_rejects_combined_keys() {
        assert_eq!(
            "left-right".parse::<Handedness>(),
            Err(Error::InvalidHandedness("left-right".to_string()))
        );
    }

    #[test]
    fn input_source_collects_profiles() {
        let source = InputSource::new(Handedness::Left, GamepadSample::default())
            .with_profiles(["oculus-touch", "generic-trigger"]);
        assert_eq!(source.profiles.len(), 2);
        assert_eq!(&*source.profiles[0], "oculus-touch");
    }
}
