use std::collections::BTreeMap;

use xrinput_gamepad::Handedness;

use crate::profile::ResolvedComponent;
use crate::types::{
    ComponentProperty, ComponentState, ComponentType, StateSet, ValueNodeProperty,
    VisualResponseDescriptor,
};

struct DefaultResponse {
    name: &'static str,
    property: ComponentProperty,
    states: StateSet,
    node_property: ValueNodeProperty,
}

const TOUCHED_OR_PRESSED: StateSet =
    StateSet::of(&[ComponentState::Touched, ComponentState::Pressed]);
const PRESSED_ONLY: StateSet = StateSet::of(&[ComponentState::Pressed]);

const PRESSED: DefaultResponse = DefaultResponse {
    name: "pressed",
    property: ComponentProperty::Button,
    states: StateSet::ALL,
    node_property: ValueNodeProperty::Transform,
};

const BUTTON_RESPONSES: &[DefaultResponse] = &[PRESSED];

const THUMBSTICK_RESPONSES: &[DefaultResponse] = &[
    PRESSED,
    DefaultResponse {
        name: "xaxis_pressed",
        property: ComponentProperty::XAxis,
        states: StateSet::ALL,
        node_property: ValueNodeProperty::Transform,
    },
    DefaultResponse {
        name: "yaxis_pressed",
        property: ComponentProperty::YAxis,
        states: StateSet::ALL,
        node_property: ValueNodeProperty::Transform,
    },
];

const TOUCHPAD_RESPONSES: &[DefaultResponse] = &[
    PRESSED,
    DefaultResponse {
        name: "xaxis_pressed",
        property: ComponentProperty::XAxis,
        states: PRESSED_ONLY,
        node_property: ValueNodeProperty::Transform,
    },
    DefaultResponse {
        name: "yaxis_pressed",
        property: ComponentProperty::YAxis,
        states: PRESSED_ONLY,
        node_property: ValueNodeProperty::Transform,
    },
    DefaultResponse {
        name: "xaxis_touched",
        property: ComponentProperty::XAxis,
        states: StateSet::ALL,
        node_property: ValueNodeProperty::Transform,
    },
    DefaultResponse {
        name: "yaxis_touched",
        property: ComponentProperty::YAxis,
        states: StateSet::ALL,
        node_property: ValueNodeProperty::Transform,
    },
    DefaultResponse {
        name: "axes_touched",
        property: ComponentProperty::State,
        states: TOUCHED_OR_PRESSED,
        node_property: ValueNodeProperty::Visibility,
    },
];

/// Response table keyed by component type and hand. No entry currently
/// differs between hands.
fn response_table(kind: ComponentType, _hand: Handedness) -> &'static [DefaultResponse] {
    match kind {
        ComponentType::Trigger | ComponentType::Squeeze | ComponentType::Button => {
            BUTTON_RESPONSES
        }
        ComponentType::Thumbstick => THUMBSTICK_RESPONSES,
        ComponentType::Touchpad => TOUCHPAD_RESPONSES,
    }
}

/// Key under which a response is stored on its component.
#[inline]
pub(crate) fn response_key(root_node_name: &str, response_name: &str) -> String {
    format!("{root_node_name}_{response_name}")
}

/// Build a descriptor with node names derived from its key.
pub(crate) fn describe_response(
    key: &str,
    property: ComponentProperty,
    states: StateSet,
    node_property: ValueNodeProperty,
    touch_point_node_name: Option<&str>,
) -> VisualResponseDescriptor {
    match node_property {
        ValueNodeProperty::Transform => VisualResponseDescriptor {
            component_property: property,
            states,
            value_node_property: node_property,
            value_node_name: format!("{key}_value"),
            min_node_name: Some(format!("{key}_min")),
            max_node_name: Some(format!("{key}_max")),
        },
        ValueNodeProperty::Visibility => VisualResponseDescriptor {
            component_property: property,
            states,
            value_node_property: node_property,
            value_node_name: touch_point_node_name
                .map(str::to_string)
                .unwrap_or_else(|| format!("{key}_value")),
            min_node_name: None,
            max_node_name: None,
        },
    }
}

/// Synthesize the default visual responses for a component.
///
/// Entries whose source property has no gamepad index are skipped.
pub(crate) fn default_visual_responses(
    hand: Handedness,
    component: &ResolvedComponent,
) -> BTreeMap<String, VisualResponseDescriptor> {
    response_table(component.kind, hand)
        .iter()
        .filter(|d| {
            d.property == ComponentProperty::State
                || component.gamepad_indices.get(d.property).is_some()
        })
        .map(|d| {
            let key = response_key(&component.root_node_name, d.name);
            let descriptor = describe_response(
                &key,
                d.property,
                d.states,
                d.node_property,
                component.touch_point_node_name.as_deref(),
            );
            (key, descriptor)
        })
        .collect()
}
