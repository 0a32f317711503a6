use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{AxisName, ComponentType, GamepadIndices, GamepadMapping, StateSet, ValueNodeProperty};
use crate::Result;

/// Hardware description published by the input provider.
///
/// Layout keys are raw hand keys (`left`, `left-right`, ...) until expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryProfile {
    pub profile_id: String,
    #[serde(default)]
    pub fallback_profile_ids: Vec<String>,
    pub layouts: BTreeMap<String, Layout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Layout {
    pub select_component_id: String,
    pub components: BTreeMap<String, ComponentDescriptor>,
    pub gamepad: GamepadLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentDescriptor {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "GamepadIndices::is_empty")]
    pub gamepad_indices: GamepadIndices,
}

impl ComponentDescriptor {
    pub fn new(kind: ComponentType) -> Self {
        Self {
            kind,
            gamepad_indices: GamepadIndices::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GamepadLayout {
    #[serde(default)]
    pub mapping: GamepadMapping,
    #[serde(default)]
    pub buttons: Vec<Option<String>>,
    #[serde(default)]
    pub axes: Vec<Option<AxisSlot>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisSlot {
    pub component_id: String,
    pub axis: AxisName,
}

impl AxisSlot {
    pub fn new(component_id: &str, axis: AxisName) -> Self {
        Self {
            component_id: component_id.to_string(),
            axis,
        }
    }
}

/// Asset-specific additions and overrides for a registry profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    pub profile_id: String,
    #[serde(default)]
    pub overrides: BTreeMap<String, LayoutOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_path: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_point_node_name: Option<String>,
    /// `None` values delete the named response.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub visual_responses: BTreeMap<String, Option<ResponseOverride>>,
}

/// Partial visual response. `component_property` stays a string so that an
/// unknown source is reported with profile context rather than as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResponseOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<StateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_node_property: Option<ValueNodeProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_node_name: Option<String>,
}

macro_rules! document_parsers {
    ($ty:ty) => {
        impl $ty {
            pub fn from_json_str(input: &str) -> Result<Self> {
                Ok(serde_json::from_str(input)?)
            }

            pub fn from_yaml_str(input: &str) -> Result<Self> {
                Ok(serde_yaml::from_str(input)?)
            }

            pub fn from_value(value: &Value) -> Result<Self> {
                from_value(value)
            }
        }
    };
}

document_parsers!(RegistryProfile);
document_parsers!(AssetProfile);

fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(T::deserialize(value)?)
}

/// Read `profileId` from an untyped document without deserializing it.
pub(crate) fn document_profile_id(document: &Value) -> Option<&str> {
    document.get("profileId").and_then(Value::as_str)
}
