use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::document::AxisSlot;
use crate::profile::{MergedLayout, MergedProfile};
use crate::types::{AxisName, ComponentType};
use crate::{Result, Scope, GENERIC_PROFILE_PREFIX};

const TRIGGER: &str = "xr-standard-trigger";
const SQUEEZE: &str = "xr-standard-squeeze";
const TOUCHPAD: &str = "xr-standard-touchpad";
const THUMBSTICK: &str = "xr-standard-thumbstick";

/// Canonical component ids in the order they occupy the first button slots.
const CANONICAL_BUTTONS: [(&str, ComponentType); 4] = [
    (TRIGGER, ComponentType::Trigger),
    (SQUEEZE, ComponentType::Squeeze),
    (TOUCHPAD, ComponentType::Touchpad),
    (THUMBSTICK, ComponentType::Thumbstick),
];

const CANONICAL_AXES: [(&str, AxisName); 4] = [
    (TOUCHPAD, AxisName::X),
    (TOUCHPAD, AxisName::Y),
    (THUMBSTICK, AxisName::X),
    (THUMBSTICK, AxisName::Y),
];

/// Set of known profile ids, consulted when checking fallbacks.
pub trait ProfileIndex {
    fn contains_profile(&self, profile_id: &str) -> bool;
}

impl ProfileIndex for BTreeSet<String> {
    fn contains_profile(&self, profile_id: &str) -> bool {
        self.contains(profile_id)
    }
}

#[inline]
pub fn is_generic_profile(profile_id: &str) -> bool {
    profile_id.starts_with(GENERIC_PROFILE_PREFIX)
}

/// Check a merged profile against the structural rules of the format.
///
/// Stops at the first violation. Fallback ids are only looked up when an
/// index is supplied.
pub fn validate_profile(profile: &MergedProfile, index: Option<&dyn ProfileIndex>) -> Result<()> {
    let scope = Scope::profile(&profile.profile_id);
    for (hand, layout) in &profile.layouts {
        validate_layout(&scope.with_hand(*hand), layout)?;
    }
    validate_fallbacks(&scope, profile, index)
}

fn validate_layout(scope: &Scope, layout: &MergedLayout) -> Result<()> {
    if !layout.components.contains_key(&layout.select_component_id) {
        return Err(scope.mismatch(format!(
            "selectComponentId \"{}\" is not a component",
            layout.select_component_id
        )));
    }
    if layout.mapping().is_canonical() {
        validate_canonical_components(scope, layout)?;
    }
    validate_buttons(scope, layout)?;
    validate_axes(scope, layout)?;

    if let Some((id, _)) = layout
        .components
        .iter()
        .find(|(_, component)| component.gamepad_indices.is_empty())
    {
        return Err(scope.mismatch(format!("component \"{id}\" has no gamepad index")));
    }
    Ok(())
}

fn validate_canonical_components(scope: &Scope, layout: &MergedLayout) -> Result<()> {
    match layout.components.get(TRIGGER) {
        Some(trigger) if trigger.kind == ComponentType::Trigger => {}
        Some(trigger) => {
            return Err(scope.mismatch(format!(
                "\"{TRIGGER}\" must be a trigger, found {}",
                trigger.kind
            )));
        }
        None => {
            return Err(scope.mismatch(format!(
                "canonical mapping requires a \"{TRIGGER}\" component"
            )));
        }
    }
    if layout.select_component_id != TRIGGER {
        return Err(scope.mismatch(format!(
            "canonical mapping requires selectComponentId \"{TRIGGER}\", found \"{}\"",
            layout.select_component_id
        )));
    }
    for (id, kind) in CANONICAL_BUTTONS {
        if let Some(component) = layout.components.get(id) {
            if component.kind != kind {
                return Err(scope.mismatch(format!(
                    "\"{id}\" must be a {kind}, found {}",
                    component.kind
                )));
            }
        }
    }
    Ok(())
}

fn validate_buttons(scope: &Scope, layout: &MergedLayout) -> Result<()> {
    let buttons = &layout.gamepad.buttons;
    let mut seen = AHashSet::with_capacity(buttons.len());
    for (index, id) in buttons.iter().enumerate() {
        let Some(id) = id.as_deref() else {
            continue;
        };
        if !seen.insert(id) {
            return Err(scope.duplicate(format!("button component \"{id}\"")));
        }
        if !layout.components.contains_key(id) {
            return Err(scope.mismatch(format!(
                "button {index} references unknown component \"{id}\""
            )));
        }
    }

    if !layout.mapping().is_canonical() {
        return Ok(());
    }
    for (index, (expected, _)) in CANONICAL_BUTTONS.iter().enumerate() {
        let actual = buttons.get(index).and_then(Option::as_deref);
        let wanted = (index == 0 || layout.components.contains_key(*expected)).then_some(*expected);
        if actual != wanted {
            return Err(scope.ordering(format!(
                "button {index} must be {}, found {}",
                describe_slot(wanted),
                describe_slot(actual)
            )));
        }
    }
    Ok(())
}

fn validate_axes(scope: &Scope, layout: &MergedLayout) -> Result<()> {
    let axes = &layout.gamepad.axes;
    let mut seen = AHashSet::with_capacity(axes.len());
    for (index, slot) in axes.iter().enumerate() {
        let Some(AxisSlot { component_id, axis }) = slot else {
            continue;
        };
        if !seen.insert((component_id.as_str(), *axis)) {
            return Err(scope.duplicate(format!("{axis} of component \"{component_id}\"")));
        }
        match layout.components.get(component_id) {
            Some(component) if component.kind.is_axis_bearing() => {}
            Some(component) => {
                return Err(scope.mismatch(format!(
                    "axis {index} references {} component \"{component_id}\"",
                    component.kind
                )));
            }
            None => {
                return Err(scope.mismatch(format!(
                    "axis {index} references unknown component \"{component_id}\""
                )));
            }
        }
        let paired = |wanted: AxisName, at: Option<usize>| {
            at.and_then(|i| axes.get(i))
                .and_then(Option::as_ref)
                .is_some_and(|other| other.component_id == *component_id && other.axis == wanted)
        };
        let in_order = match axis {
            AxisName::X => {
                paired(AxisName::Y, Some(index + 1))
                    || !has_axis(axes, component_id, AxisName::Y)
            }
            AxisName::Y => paired(AxisName::X, index.checked_sub(1)),
        };
        if !in_order {
            return Err(scope.ordering(format!(
                "x-axis of \"{component_id}\" must directly precede its y-axis"
            )));
        }
    }

    if !layout.mapping().is_canonical() {
        return Ok(());
    }
    for (index, (id, axis)) in CANONICAL_AXES.iter().enumerate() {
        let actual = axes.get(index).and_then(Option::as_ref);
        let matches = match actual {
            Some(slot) => slot.component_id == *id && slot.axis == *axis,
            None => !layout.components.contains_key(*id),
        };
        if !matches {
            return Err(scope.ordering(format!(
                "axis {index} must be {} of \"{id}\"{}",
                axis,
                if layout.components.contains_key(*id) { "" } else { " or empty" }
            )));
        }
    }
    Ok(())
}

fn has_axis(axes: &[Option<AxisSlot>], component_id: &str, axis: AxisName) -> bool {
    axes.iter()
        .flatten()
        .any(|slot| slot.component_id == component_id && slot.axis == axis)
}

fn describe_slot(slot: Option<&str>) -> String {
    slot.map_or_else(|| "empty".to_string(), |id| format!("\"{id}\""))
}

fn validate_fallbacks(
    scope: &Scope,
    profile: &MergedProfile,
    index: Option<&dyn ProfileIndex>,
) -> Result<()> {
    if let Some(index) = index {
        if let Some(missing) = profile
            .fallback_profile_ids
            .iter()
            .find(|id| !index.contains_profile(id))
        {
            return Err(scope.mismatch(format!("fallback profile \"{missing}\" is not known")));
        }
    }

    if is_generic_profile(&profile.profile_id) {
        return Ok(());
    }
    match profile.fallback_profile_ids.last() {
        Some(last) if is_generic_profile(last) => Ok(()),
        Some(last) => Err(scope.mismatch(format!(
            "last fallback \"{last}\" must be a generic profile"
        ))),
        None => Err(scope.mismatch("non-generic profile must fall back to a generic one")),
    }
}
