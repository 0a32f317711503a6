use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xrinput_gamepad::Handedness;

use crate::document::GamepadLayout;
use crate::types::{ComponentType, GamepadIndices, GamepadMapping, VisualResponseDescriptor};

/// A fully resolved profile, the result of merging a registry profile with
/// its asset overrides.
///
/// Built once per registry/asset pair and shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MergedProfile {
    pub profile_id: String,
    #[serde(default)]
    pub fallback_profile_ids: Vec<String>,
    pub layouts: BTreeMap<Handedness, MergedLayout>,
}

impl MergedProfile {
    #[inline]
    pub fn layout(&self, hand: Handedness) -> Option<&MergedLayout> {
        self.layouts.get(&hand)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MergedLayout {
    pub asset_path: String,
    pub root_node_name: String,
    pub select_component_id: String,
    pub gamepad: GamepadLayout,
    pub components: BTreeMap<String, ResolvedComponent>,
}

impl MergedLayout {
    #[inline]
    pub fn mapping(&self) -> GamepadMapping {
        self.gamepad.mapping
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolvedComponent {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub gamepad_indices: GamepadIndices,
    pub root_node_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_point_node_name: Option<String>,
    #[serde(default)]
    pub visual_responses: BTreeMap<String, VisualResponseDescriptor>,
}
