use std::sync::Arc;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use xrinput_gamepad::{GamepadSample, Handedness, InputSource, SampleShape};
use xrinput_profile::{GamepadMapping, MergedLayout, MergedProfile, VisualResponseDescriptor};

use crate::component::{ComponentRuntime, ComponentSnapshot};
use crate::options::ControllerOptions;
use crate::response::{evaluate, ResponseOutput};
use crate::{MotionError, Result};

#[derive(Debug, Clone)]
struct BoundResponse {
    name: Box<str>,
    descriptor: VisualResponseDescriptor,
    output: ResponseOutput,
}

impl BoundResponse {
    fn refresh(&mut self, snapshot: &ComponentSnapshot) {
        self.output.value = evaluate(snapshot, &self.descriptor);
    }
}

#[derive(Debug, Clone)]
struct ComponentSlot {
    runtime: ComponentRuntime,
    responses: SmallVec<[BoundResponse; 6]>,
}

impl ComponentSlot {
    fn refresh_responses(&mut self) {
        let snapshot = self.runtime.snapshot();
        for response in &mut self.responses {
            response.refresh(snapshot);
        }
    }
}

/// Per-component view handed to renderers.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentView<'a> {
    #[serde(flatten)]
    snapshot: &'a ComponentSnapshot,
    #[serde(serialize_with = "serialize_responses")]
    visual_responses: &'a [BoundResponse],
}

impl<'a> ComponentView<'a> {
    #[inline]
    pub fn id(&self) -> &'a str {
        &self.snapshot.id
    }

    #[inline]
    pub fn snapshot(&self) -> &'a ComponentSnapshot {
        self.snapshot
    }

    pub fn responses(&self) -> impl Iterator<Item = (&'a str, &'a ResponseOutput)> + 'a {
        self.visual_responses
            .iter()
            .map(|response| (&*response.name, &response.output))
    }

    pub fn response(&self, name: &str) -> Option<&'a ResponseOutput> {
        self.visual_responses
            .iter()
            .find(|response| &*response.name == name)
            .map(|response| &response.output)
    }
}

fn serialize_responses<S: Serializer>(
    responses: &&[BoundResponse],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(
        responses
            .iter()
            .map(|response| (&*response.name, &response.output)),
    )
}

/// Runtime model of one physical controller for a single hand.
///
/// Owns a runtime per component of the resolved layout. Call [`update`] once
/// per frame with the current gamepad sample.
///
/// [`update`]: MotionController::update
#[derive(Debug, Clone)]
pub struct MotionController {
    profile: Arc<MergedProfile>,
    handedness: Handedness,
    shape: SampleShape,
    slots: Vec<ComponentSlot>,
}

impl MotionController {
    pub fn new(
        profile: Arc<MergedProfile>,
        source: &InputSource,
        options: &ControllerOptions,
    ) -> Result<Self> {
        let handedness = source.handedness;
        let layout = profile.layout(handedness).ok_or_else(|| MotionError::NoLayout {
            profile_id: profile.profile_id.clone(),
            hand: handedness,
        })?;

        if let Some(id) = options
            .components
            .keys()
            .find(|id| !layout.components.contains_key(&***id))
        {
            return Err(MotionError::UnknownComponent(id.to_string()));
        }

        let mut shape = SampleShape::default();
        let mut slots = Vec::with_capacity(layout.components.len());
        for (id, component) in &layout.components {
            let runtime = ComponentRuntime::new(
                id,
                component.kind,
                component.gamepad_indices,
                options.component(id),
            )?;
            let required = runtime.required_shape();
            shape = SampleShape::new(
                shape.buttons.max(required.buttons),
                shape.axes.max(required.axes),
            );
            let responses = component
                .visual_responses
                .iter()
                .map(|(name, descriptor)| BoundResponse {
                    name: name.as_str().into(),
                    descriptor: descriptor.clone(),
                    output: ResponseOutput::new(descriptor),
                })
                .collect();
            let mut slot = ComponentSlot { runtime, responses };
            slot.refresh_responses();
            slots.push(slot);
        }

        let available = source.gamepad.shape();
        if !shape.fits_within(&available) {
            return Err(MotionError::SampleShape {
                profile_id: profile.profile_id.clone(),
                hand: handedness,
                required: shape,
                available,
            });
        }

        log::debug!(
            "motion controller for \"{}\" ({handedness}): {} component(s), needs {shape}",
            profile.profile_id,
            slots.len()
        );
        Ok(Self {
            profile,
            handedness,
            shape,
            slots,
        })
    }

    /// Recompute every component and visual response from `sample`.
    pub fn update(&mut self, sample: &GamepadSample) -> Result<()> {
        let available = sample.shape();
        if !self.shape.fits_within(&available) {
            return Err(MotionError::SampleShape {
                profile_id: self.profile.profile_id.clone(),
                hand: self.handedness,
                required: self.shape,
                available,
            });
        }
        for slot in &mut self.slots {
            slot.runtime.update(sample);
            slot.refresh_responses();
        }
        Ok(())
    }

    #[inline]
    pub fn profile(&self) -> &Arc<MergedProfile> {
        &self.profile
    }

    #[inline]
    pub fn profile_id(&self) -> &str {
        &self.profile.profile_id
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Layout of the active hand. Present for the lifetime of the controller.
    #[inline]
    pub fn layout(&self) -> &MergedLayout {
        &self.profile.layouts[&self.handedness]
    }

    #[inline]
    pub fn asset_path(&self) -> &str {
        &self.layout().asset_path
    }

    #[inline]
    pub fn root_node_name(&self) -> &str {
        &self.layout().root_node_name
    }

    #[inline]
    pub fn gamepad_mapping(&self) -> GamepadMapping {
        self.layout().mapping()
    }

    #[inline]
    pub fn select_component_id(&self) -> &str {
        &self.layout().select_component_id
    }

    /// Smallest sample this controller accepts.
    #[inline]
    pub fn required_shape(&self) -> SampleShape {
        self.shape
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentView<'_>> + '_ {
        self.slots.iter().map(|slot| ComponentView {
            snapshot: slot.runtime.snapshot(),
            visual_responses: &slot.responses,
        })
    }

    pub fn component(&self, id: &str) -> Option<ComponentView<'_>> {
        self.components().find(|view| view.id() == id)
    }

    /// Every visual response output, keyed by response name.
    pub fn visual_responses(&self) -> impl Iterator<Item = (&str, &ResponseOutput)> + '_ {
        self.slots.iter().flat_map(|slot| {
            slot.responses
                .iter()
                .map(|response| (&*response.name, &response.output))
        })
    }

    /// Snapshot of every component for serialization.
    pub fn data(&self) -> Vec<ComponentView<'_>> {
        self.components().collect()
    }
}
