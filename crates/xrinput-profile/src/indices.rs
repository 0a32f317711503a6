use std::collections::BTreeMap;

use crate::document::Layout;
use crate::types::{AxisName, ComponentProperty, GamepadIndices};
use crate::{Result, Scope};

const INDEX_PROPERTIES: [ComponentProperty; 3] = [
    ComponentProperty::Button,
    ComponentProperty::XAxis,
    ComponentProperty::YAxis,
];

/// Derive each component's `gamepad_indices` from the layout's flat
/// button and axis arrays.
///
/// Indices already declared on a component must agree with the derived ones.
pub fn integrate_gamepad_indices(scope: &Scope, layout: &mut Layout) -> Result<()> {
    let Layout {
        components,
        gamepad,
        ..
    } = layout;

    let mut derived: BTreeMap<&str, GamepadIndices> = BTreeMap::new();

    for (index, slot) in gamepad.buttons.iter().enumerate() {
        let Some(component_id) = slot.as_deref() else {
            continue;
        };
        if !components.contains_key(component_id) {
            return Err(scope.mismatch(format!(
                "button {index} references unknown component \"{component_id}\""
            )));
        }
        let entry = derived.entry(component_id).or_default();
        if entry.button.is_some() {
            return Err(scope.duplicate(format!("button component \"{component_id}\"")));
        }
        entry.button = Some(index);
    }

    for (index, slot) in gamepad.axes.iter().enumerate() {
        let Some(slot) = slot else {
            continue;
        };
        let component_id = slot.component_id.as_str();
        if !components.contains_key(component_id) {
            return Err(scope.mismatch(format!(
                "axis {index} references unknown component \"{component_id}\""
            )));
        }
        let entry = derived.entry(component_id).or_default();
        if entry.axis(slot.axis).is_some() {
            return Err(scope.duplicate(format!(
                "{} of component \"{component_id}\"",
                slot.axis
            )));
        }
        match slot.axis {
            AxisName::X => entry.x_axis = Some(index),
            AxisName::Y => {
                if entry.x_axis.map(|x| x + 1) != Some(index) {
                    return Err(scope.ordering(format!(
                        "y-axis of \"{component_id}\" at {index} must directly follow its x-axis"
                    )));
                }
                entry.y_axis = Some(index);
            }
        }
    }

    for (component_id, component) in components.iter_mut() {
        let resolved = derived.remove(component_id.as_str()).unwrap_or_default();
        let declared = component.gamepad_indices;
        for property in INDEX_PROPERTIES {
            if let Some(declared_index) = declared.get(property) {
                if resolved.get(property) != Some(declared_index) {
                    return Err(scope.mismatch(format!(
                        "component \"{component_id}\" declares {property:?} index {declared_index} \
                         that conflicts with the gamepad arrays ({:?})",
                        resolved.get(property)
                    )));
                }
            }
        }
        component.gamepad_indices = resolved;
    }

    Ok(())
}
