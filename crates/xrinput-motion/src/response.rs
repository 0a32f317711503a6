use serde::Serialize;

use xrinput_profile::{ComponentProperty, ValueNodeProperty, VisualResponseDescriptor};

use crate::component::ComponentSnapshot;
use crate::util::normalize_axes;

/// Weight applied to a model node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Interpolation weight between the min and max nodes, in `[0, 1]`.
    Weight(f32),
    /// Whether the node is shown.
    Visible(bool),
}

impl ResponseValue {
    #[inline]
    pub fn weight(&self) -> Option<f32> {
        match self {
            ResponseValue::Weight(weight) => Some(*weight),
            ResponseValue::Visible(_) => None,
        }
    }

    #[inline]
    pub fn visible(&self) -> Option<bool> {
        match self {
            ResponseValue::Visible(visible) => Some(*visible),
            ResponseValue::Weight(_) => None,
        }
    }
}

/// Node update produced for one visual response on the latest sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOutput {
    pub value_node_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_node_name: Option<String>,
    pub value_node_property: ValueNodeProperty,
    pub value: ResponseValue,
}

impl ResponseOutput {
    pub(crate) fn new(descriptor: &VisualResponseDescriptor) -> Self {
        let value = match descriptor.value_node_property {
            ValueNodeProperty::Visibility => ResponseValue::Visible(false),
            ValueNodeProperty::Transform => ResponseValue::Weight(0.0),
        };
        Self {
            value_node_name: descriptor.value_node_name.clone(),
            min_node_name: descriptor.min_node_name.clone(),
            max_node_name: descriptor.max_node_name.clone(),
            value_node_property: descriptor.value_node_property,
            value,
        }
    }
}

/// Compute the node value a response produces for a component snapshot.
pub fn evaluate(snapshot: &ComponentSnapshot, descriptor: &VisualResponseDescriptor) -> ResponseValue {
    let active = descriptor.states.contains(snapshot.state);
    match descriptor.component_property {
        ComponentProperty::XAxis | ComponentProperty::YAxis if !active => {
            ResponseValue::Weight(0.5)
        }
        ComponentProperty::XAxis | ComponentProperty::YAxis => {
            let (x, y) = normalize_axes(
                snapshot.x_axis.unwrap_or(0.0),
                snapshot.y_axis.unwrap_or(0.0),
            );
            let weight = if descriptor.component_property == ComponentProperty::XAxis {
                x
            } else {
                y
            };
            ResponseValue::Weight(weight)
        }
        ComponentProperty::Button => {
            ResponseValue::Weight(if active { snapshot.button_value.unwrap_or(0.0) } else { 0.0 })
        }
        ComponentProperty::State => match descriptor.value_node_property {
            ValueNodeProperty::Visibility => ResponseValue::Visible(active),
            ValueNodeProperty::Transform => ResponseValue::Weight(if active { 1.0 } else { 0.0 }),
        },
    }
}
