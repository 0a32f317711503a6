use std::collections::BTreeMap;
use std::str::FromStr;

use xrinput_gamepad::Handedness;

use crate::{Result, Scope};

/// A layout key as written in profile documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKey {
    None,
    Left,
    Right,
    LeftRight,
    LeftRightNone,
}

impl HandKey {
    /// Individual hands this key stands for.
    pub const fn hands(&self) -> &'static [Handedness] {
        match self {
            HandKey::None => &[Handedness::None],
            HandKey::Left => &[Handedness::Left],
            HandKey::Right => &[Handedness::Right],
            HandKey::LeftRight => &[Handedness::Left, Handedness::Right],
            HandKey::LeftRightNone => {
                &[Handedness::Left, Handedness::Right, Handedness::None]
            }
        }
    }
}

impl FromStr for HandKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "left-right" => Ok(HandKey::LeftRight),
            "left-right-none" => Ok(HandKey::LeftRightNone),
            single => single
                .parse::<Handedness>()
                .map(HandKey::from)
                .map_err(|_| single.to_string()),
        }
    }
}

impl From<Handedness> for HandKey {
    fn from(hand: Handedness) -> Self {
        match hand {
            Handedness::None => HandKey::None,
            Handedness::Left => HandKey::Left,
            Handedness::Right => HandKey::Right,
        }
    }
}

/// Expand combined hand keys into one independent copy per hand.
///
/// Unrecognized keys and hands declared by more than one key are rejected.
pub fn expand_layouts<T: Clone>(
    scope: &Scope,
    layouts: &BTreeMap<String, T>,
) -> Result<BTreeMap<Handedness, T>> {
    let mut expanded = BTreeMap::new();
    for (raw_key, layout) in layouts {
        let key = raw_key
            .parse::<HandKey>()
            .map_err(|key| scope.mismatch(format!("unrecognized hand key \"{key}\"")))?;
        for hand in key.hands() {
            if expanded.insert(*hand, layout.clone()).is_some() {
                return Err(scope.duplicate(format!(
                    "hand \"{hand}\" (declared again by \"{raw_key}\")"
                )));
            }
        }
    }

    log::debug!(
        "{scope}: expanded {} layout key(s) into {} hand(s)",
        layouts.len(),
        expanded.len()
    );
    Ok(expanded)
}
