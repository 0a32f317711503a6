use std::collections::BTreeMap;

use xrinput_gamepad::Handedness;

use crate::defaults::{default_visual_responses, describe_response};
use crate::document::{
    AssetProfile, ComponentDescriptor, ComponentOverride, Layout, LayoutOverride,
    RegistryProfile, ResponseOverride,
};
use crate::expand::expand_layouts;
use crate::indices::integrate_gamepad_indices;
use crate::profile::{MergedLayout, MergedProfile, ResolvedComponent};
use crate::types::{ComponentProperty, ComponentType, ValueNodeProperty, VisualResponseDescriptor};
use crate::{ProfileError, Result, Scope};

/// Merge a registry profile with its asset overrides.
///
/// Inputs are only read; every hand of the result is built from owned copies.
pub fn merge_profile(registry: &RegistryProfile, asset: &AssetProfile) -> Result<MergedProfile> {
    let scope = Scope::profile(&registry.profile_id);
    if registry.profile_id != asset.profile_id {
        return Err(scope.mismatch(format!(
            "asset profile id \"{}\" does not match the registry profile",
            asset.profile_id
        )));
    }

    let layouts = expand_layouts(&scope, &registry.layouts)?;
    let mut overrides = expand_layouts(&scope, &asset.overrides)?;
    if let Some(hand) = overrides.keys().find(|hand| !layouts.contains_key(*hand)) {
        return Err(scope.mismatch(format!(
            "asset overrides hand \"{hand}\" which the registry does not declare"
        )));
    }

    let mut merged = BTreeMap::new();
    for (hand, mut layout) in layouts {
        let scope = scope.with_hand(hand);
        integrate_gamepad_indices(&scope, &mut layout)?;
        let layout_override = overrides.remove(&hand).unwrap_or_default();
        let resolved = merge_layout(&scope, hand, layout, layout_override)?;
        merged.insert(hand, resolved);
    }

    log::debug!("{scope}: merged {} layout(s)", merged.len());
    Ok(MergedProfile {
        profile_id: registry.profile_id.clone(),
        fallback_profile_ids: registry.fallback_profile_ids.clone(),
        layouts: merged,
    })
}

fn merge_layout(
    scope: &Scope,
    hand: Handedness,
    layout: Layout,
    layout_override: LayoutOverride,
) -> Result<MergedLayout> {
    let LayoutOverride {
        root_node_name,
        asset_path,
        components: mut component_overrides,
    } = layout_override;

    let asset_path =
        asset_path.ok_or_else(|| scope.mismatch("asset supplies no assetPath"))?;
    let root_node_name =
        root_node_name.unwrap_or_else(|| format!("{}-{hand}", scope.profile_id));

    if let Some(id) = component_overrides
        .keys()
        .find(|id| !layout.components.contains_key(*id))
    {
        return Err(scope.mismatch(format!(
            "asset overrides unknown component \"{id}\""
        )));
    }

    let mut components = BTreeMap::new();
    for (id, descriptor) in layout.components {
        let component_override = component_overrides.remove(&id).unwrap_or_default();
        let component = resolve_component(scope, hand, &id, descriptor, component_override)?;
        components.insert(id, component);
    }

    Ok(MergedLayout {
        asset_path,
        root_node_name,
        select_component_id: layout.select_component_id,
        gamepad: layout.gamepad,
        components,
    })
}

fn resolve_component(
    scope: &Scope,
    hand: Handedness,
    id: &str,
    descriptor: ComponentDescriptor,
    component_override: ComponentOverride,
) -> Result<ResolvedComponent> {
    let ComponentOverride {
        root_node_name,
        touch_point_node_name,
        visual_responses,
    } = component_override;

    if touch_point_node_name.is_some() && descriptor.kind != ComponentType::Touchpad {
        return Err(scope.mismatch(format!(
            "touchPointNodeName set on {} component \"{id}\"; only touchpads have a touch point",
            descriptor.kind
        )));
    }

    let mut component = ResolvedComponent {
        kind: descriptor.kind,
        gamepad_indices: descriptor.gamepad_indices,
        root_node_name: root_node_name.unwrap_or_else(|| id.replace('-', "_")),
        touch_point_node_name,
        visual_responses: BTreeMap::new(),
    };
    component.visual_responses = default_visual_responses(hand, &component);

    for (name, response) in visual_responses {
        apply_response_override(scope, id, &mut component, name, response)?;
    }
    Ok(component)
}

fn apply_response_override(
    scope: &Scope,
    id: &str,
    component: &mut ResolvedComponent,
    name: String,
    response: Option<ResponseOverride>,
) -> Result<()> {
    let Some(response) = response else {
        if component.visual_responses.remove(&name).is_none() {
            return Err(scope.mismatch(format!(
                "cannot remove visual response \"{name}\" which component \"{id}\" does not have"
            )));
        }
        return Ok(());
    };

    let property = response
        .component_property
        .as_deref()
        .map(|raw| {
            raw.parse::<ComponentProperty>()
                .map_err(|property| ProfileError::UnknownSource {
                    scope: scope.clone(),
                    property,
                })
        })
        .transpose()?;

    let descriptor = match component.visual_responses.remove(&name) {
        Some(existing) => overlay_response(existing, property, response),
        None => {
            let (Some(property), Some(states)) = (property, response.states) else {
                return Err(scope.mismatch(format!(
                    "new visual response \"{name}\" on \"{id}\" must set componentProperty and states"
                )));
            };
            let node_property = response.value_node_property.unwrap_or_default();
            let base = describe_response(
                &name,
                property,
                states,
                node_property,
                component.touch_point_node_name.as_deref(),
            );
            overlay_response(base, None, response)
        }
    };

    if descriptor.component_property != ComponentProperty::State
        && component
            .gamepad_indices
            .get(descriptor.component_property)
            .is_none()
    {
        return Err(scope.mismatch(format!(
            "visual response \"{name}\" reads {:?} but component \"{id}\" has no such gamepad index",
            descriptor.component_property
        )));
    }

    component.visual_responses.insert(name, descriptor);
    Ok(())
}

/// Copy every field the override sets onto `base`.
fn overlay_response(
    mut base: VisualResponseDescriptor,
    property: Option<ComponentProperty>,
    response: ResponseOverride,
) -> VisualResponseDescriptor {
    if let Some(property) = property {
        base.component_property = property;
    }
    if let Some(states) = response.states {
        base.states = states;
    }
    if let Some(node_property) = response.value_node_property {
        base.value_node_property = node_property;
        if node_property == ValueNodeProperty::Visibility {
            base.min_node_name = None;
            base.max_node_name = None;
        }
    }
    if let Some(value_node_name) = response.value_node_name {
        base.value_node_name = value_node_name;
    }
    if response.min_node_name.is_some() {
        base.min_node_name = response.min_node_name;
    }
    if response.max_node_name.is_some() {
        base.max_node_name = response.max_node_name;
    }
    base
}
