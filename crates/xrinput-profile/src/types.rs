use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a logical control on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Trigger,
    Squeeze,
    Touchpad,
    Thumbstick,
    Button,
}

impl ComponentType {
    /// Touchpads and thumbsticks report a pair of axes.
    #[inline]
    pub const fn is_axis_bearing(&self) -> bool {
        matches!(self, ComponentType::Touchpad | ComponentType::Thumbstick)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Trigger => "trigger",
            ComponentType::Squeeze => "squeeze",
            ComponentType::Touchpad => "touchpad",
            ComponentType::Thumbstick => "thumbstick",
            ComponentType::Button => "button",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete state of a component for one sample.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    #[default]
    Default,
    Touched,
    Pressed,
}

impl ComponentState {
    pub const ALL: [ComponentState; 3] = [
        ComponentState::Default,
        ComponentState::Touched,
        ComponentState::Pressed,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of component states stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ComponentState>", into = "Vec<ComponentState>")]
pub struct StateSet(u8);

impl StateSet {
    pub const EMPTY: StateSet = StateSet(0);
    pub const ALL: StateSet = StateSet::of(&ComponentState::ALL);

    /// Create a set from a slice of states.
    pub const fn of(states: &[ComponentState]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < states.len() {
            bits |= states[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub const fn contains(&self, state: ComponentState) -> bool {
        (self.0 & state.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, state: ComponentState) {
        self.0 |= state.bit();
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentState> + '_ {
        ComponentState::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<ComponentState> for StateSet {
    fn from_iter<I: IntoIterator<Item = ComponentState>>(states: I) -> Self {
        let mut set = StateSet::EMPTY;
        for state in states {
            set.insert(state);
        }
        set
    }
}

impl From<Vec<ComponentState>> for StateSet {
    fn from(states: Vec<ComponentState>) -> Self {
        states.into_iter().collect()
    }
}

impl From<StateSet> for Vec<ComponentState> {
    fn from(set: StateSet) -> Self {
        set.iter().collect()
    }
}

/// Component value a visual response reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentProperty {
    Button,
    XAxis,
    YAxis,
    State,
}

impl FromStr for ComponentProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "button" => ComponentProperty::Button,
            "xAxis" => ComponentProperty::XAxis,
            "yAxis" => ComponentProperty::YAxis,
            "state" => ComponentProperty::State,
            other => return Err(other.to_string()),
        })
    }
}

/// Property of the target node a visual response drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueNodeProperty {
    #[default]
    Transform,
    Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisName {
    #[serde(rename = "x-axis")]
    X,
    #[serde(rename = "y-axis")]
    Y,
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AxisName::X => "x-axis",
            AxisName::Y => "y-axis",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadMapping {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "xr-standard")]
    XrStandard,
}

impl GamepadMapping {
    #[inline]
    pub const fn is_canonical(&self) -> bool {
        matches!(self, GamepadMapping::XrStandard)
    }
}

/// Button and axis slots a component owns in the gamepad arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GamepadIndices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<usize>,
}

impl GamepadIndices {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.button.is_none() && self.x_axis.is_none() && self.y_axis.is_none()
    }

    /// Index backing a response property. `State` never reads an index.
    #[inline]
    pub fn get(&self, property: ComponentProperty) -> Option<usize> {
        match property {
            ComponentProperty::Button => self.button,
            ComponentProperty::XAxis => self.x_axis,
            ComponentProperty::YAxis => self.y_axis,
            ComponentProperty::State => None,
        }
    }

    #[inline]
    pub fn axis(&self, axis: AxisName) -> Option<usize> {
        match axis {
            AxisName::X => self.x_axis,
            AxisName::Y => self.y_axis,
        }
    }
}

/// How a component drives one node of the 3D model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisualResponseDescriptor {
    pub component_property: ComponentProperty,
    pub states: StateSet,
    #[serde(default)]
    pub value_node_property: ValueNodeProperty,
    pub value_node_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_node_name: Option<String>,
}
