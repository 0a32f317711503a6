use serde::Serialize;

use xrinput_gamepad::{GamepadButton, GamepadSample, SampleShape};
use xrinput_profile::{ComponentState, ComponentType, GamepadIndices};

use crate::options::ComponentOptions;
use crate::util::{clamp_axis, clamp_button, invert_xy};
use crate::{MotionError, Result, AXIS_TOUCH_THRESHOLD, BUTTON_TOUCH_THRESHOLD};

/// Which slots of the gamepad sample drive a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuntimeKind {
    /// Trigger, squeeze and plain buttons.
    Button { button: usize },
    /// Touchpads and thumbsticks. The button is optional.
    Axes {
        button: Option<usize>,
        x: Option<usize>,
        y: Option<usize>,
    },
}

impl RuntimeKind {
    fn from_indices(id: &str, kind: ComponentType, indices: GamepadIndices) -> Result<Self> {
        if kind.is_axis_bearing() {
            return Ok(RuntimeKind::Axes {
                button: indices.button,
                x: indices.x_axis,
                y: indices.y_axis,
            });
        }
        let button = indices.button.ok_or_else(|| MotionError::MissingButton {
            component: id.to_string(),
            kind: kind.to_string(),
        })?;
        Ok(RuntimeKind::Button { button })
    }
}

/// Read-only view of a component after the latest update.
///
/// A value is present iff the component owns the matching gamepad slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSnapshot {
    pub id: Box<str>,
    pub state: ComponentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<f32>,
}

/// Live state of one component, recomputed from scratch on every sample.
#[derive(Debug, Clone)]
pub struct ComponentRuntime {
    kind: RuntimeKind,
    options: ComponentOptions,
    snapshot: ComponentSnapshot,
}

impl ComponentRuntime {
    pub fn new(
        id: &str,
        kind: ComponentType,
        indices: GamepadIndices,
        options: ComponentOptions,
    ) -> Result<Self> {
        let kind = RuntimeKind::from_indices(id, kind, indices)?;
        let (button, x, y) = match kind {
            RuntimeKind::Button { .. } => (true, false, false),
            RuntimeKind::Axes { button, x, y } => (button.is_some(), x.is_some(), y.is_some()),
        };
        Ok(Self {
            kind,
            options,
            snapshot: ComponentSnapshot {
                id: id.into(),
                state: ComponentState::Default,
                button_value: button.then_some(0.0),
                x_axis: x.then_some(0.0),
                y_axis: y.then_some(0.0),
            },
        })
    }

    #[inline]
    pub fn snapshot(&self) -> &ComponentSnapshot {
        &self.snapshot
    }

    /// Smallest sample shape that covers every slot this component reads.
    ///
    /// Saturates, so an index at `usize::MAX` yields a shape no sample fits.
    pub fn required_shape(&self) -> SampleShape {
        let slots = |index: Option<usize>| index.map_or(0, |i| i.saturating_add(1));
        match self.kind {
            RuntimeKind::Button { button } => SampleShape::new(button.saturating_add(1), 0),
            RuntimeKind::Axes { button, x, y } => {
                SampleShape::new(slots(button), slots(x).max(slots(y)))
            }
        }
    }

    /// Recompute the snapshot from `sample`. Missing slots read as rest.
    pub fn update(&mut self, sample: &GamepadSample) {
        match self.kind {
            RuntimeKind::Button { button } => {
                let (value, state) = self.read_button(sample.button(button));
                self.snapshot.button_value = Some(value);
                self.snapshot.state = state;
            }
            RuntimeKind::Axes { button, x, y } => self.update_axes(sample, button, x, y),
        }
    }

    fn update_axes(
        &mut self,
        sample: &GamepadSample,
        button: Option<usize>,
        x: Option<usize>,
        y: Option<usize>,
    ) {
        let read = |index: Option<usize>| {
            index
                .and_then(|i| sample.axis(i))
                .map_or(0.0, clamp_axis)
        };
        let (x_value, y_value) =
            invert_xy(read(x), read(y), self.options.invert_x, self.options.invert_y);

        let mut state = ComponentState::Default;
        if let Some(button) = button {
            let (value, button_state) = self.read_button(sample.button(button));
            self.snapshot.button_value = Some(value);
            state = button_state;
        }
        if state == ComponentState::Default
            && (x_value.abs() > AXIS_TOUCH_THRESHOLD || y_value.abs() > AXIS_TOUCH_THRESHOLD)
        {
            state = ComponentState::Touched;
        }

        self.snapshot.x_axis = x.map(|_| x_value);
        self.snapshot.y_axis = y.map(|_| y_value);
        self.snapshot.state = state;
    }

    fn read_button(&self, button: Option<&GamepadButton>) -> (f32, ComponentState) {
        let Some(button) = button else {
            return (0.0, ComponentState::Default);
        };
        let value = clamp_button(button.value);
        let state = if button.pressed || (value == 1.0 && !self.options.press_unsupported) {
            ComponentState::Pressed
        } else if button.touched || value > BUTTON_TOUCH_THRESHOLD {
            ComponentState::Touched
        } else {
            ComponentState::Default
        };
        (value, state)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn trigger() -> ComponentRuntime {
        let indices = GamepadIndices { button: Some(0), ..Default::default() };
        ComponentRuntime::new("trigger", ComponentType::Trigger, indices, ComponentOptions::default())
            .expect("trigger runtime")
    }

    fn stick(button: Option<usize>, options: ComponentOptions) -> ComponentRuntime {
        let indices = GamepadIndices { button, x_axis: Some(0), y_axis: Some(1) };
        ComponentRuntime::new("stick", ComponentType::Thumbstick, indices, options)
            .expect("stick runtime")
    }

    fn sample(buttons: &[GamepadButton], axes: &[f32]) -> GamepadSample {
        GamepadSample {
            buttons: buttons.to_vec(),
            axes: axes.to_vec(),
        }
    }

    #[test]
    fn starts_at_rest() {
        let runtime = stick(None, ComponentOptions::default());
        let snapshot = runtime.snapshot();
        assert_eq!(snapshot.state, ComponentState::Default);
        assert_eq!(snapshot.button_value, None);
        assert_eq!(snapshot.x_axis, Some(0.0));
        assert_eq!(snapshot.y_axis, Some(0.0));
    }

    #[test]
    fn overdriven_button_is_clamped_and_pressed() {
        let mut runtime = trigger();
        runtime.update(&sample(&[GamepadButton::analog(2.0)], &[]));
        assert_eq!(runtime.snapshot().button_value, Some(1.0));
        assert_eq!(runtime.snapshot().state, ComponentState::Pressed);
    }

    #[test]
    fn button_touch_threshold() {
        let mut runtime = trigger();
        runtime.update(&sample(&[GamepadButton::analog(0.05)], &[]));
        assert_eq!(runtime.snapshot().state, ComponentState::Default);
        runtime.update(&sample(&[GamepadButton::analog(0.06)], &[]));
        assert_eq!(runtime.snapshot().state, ComponentState::Touched);
        runtime.update(&sample(&[GamepadButton::new(0.0, true, false)], &[]));
        assert_eq!(runtime.snapshot().state, ComponentState::Touched);
        runtime.update(&sample(&[GamepadButton::new(0.0, false, true)], &[]));
        assert_eq!(runtime.snapshot().state, ComponentState::Pressed);
    }

    #[test]
    fn press_unsupported_keeps_full_value_touched() {
        let indices = GamepadIndices { button: Some(0), ..Default::default() };
        let options = ComponentOptions { press_unsupported: true, ..Default::default() };
        let mut runtime =
            ComponentRuntime::new("grip", ComponentType::Squeeze, indices, options).expect("grip");
        runtime.update(&sample(&[GamepadButton::analog(1.0)], &[]));
        assert_eq!(runtime.snapshot().state, ComponentState::Touched);
    }

    #[test]
    fn button_component_requires_button_index() {
        let result = ComponentRuntime::new(
            "menu",
            ComponentType::Button,
            GamepadIndices::default(),
            ComponentOptions::default(),
        );
        assert!(matches!(result, Err(MotionError::MissingButton { .. })));
    }

    #[test]
    fn axis_movement_touches_stick() {
        let mut runtime = stick(None, ComponentOptions::default());
        runtime.update(&sample(&[], &[0.05, -0.1]));
        assert_eq!(runtime.snapshot().state, ComponentState::Default);
        runtime.update(&sample(&[], &[0.0, -0.4]));
        assert_eq!(runtime.snapshot().state, ComponentState::Touched);
    }

    #[test]
    fn button_state_dominates_axes() {
        let mut runtime = stick(Some(0), ComponentOptions::default());
        runtime.update(&sample(&[GamepadButton::new(1.0, true, true)], &[0.0, 0.0]));
        assert_eq!(runtime.snapshot().state, ComponentState::Pressed);

        runtime.update(&sample(&[GamepadButton::analog(0.0)], &[0.9, 0.0]));
        assert_eq!(runtime.snapshot().state, ComponentState::Touched);
        assert_eq!(runtime.snapshot().button_value, Some(0.0));
    }

    #[test]
    fn axes_are_clamped_then_inverted() {
        let options = ComponentOptions { invert_y: true, ..Default::default() };
        let mut runtime = stick(None, options);
        runtime.update(&sample(&[], &[-3.0, 0.5]));
        assert_eq!(runtime.snapshot().x_axis, Some(-1.0));
        assert_eq!(runtime.snapshot().y_axis, Some(-0.5));
    }

    #[test]
    fn required_shape_covers_every_slot() {
        assert_eq!(trigger().required_shape(), SampleShape::new(1, 0));
        let runtime = stick(Some(3), ComponentOptions::default());
        assert_eq!(runtime.required_shape(), SampleShape::new(4, 2));
    }

    #[test]
    fn required_shape_saturates_on_huge_index() {
        let indices = GamepadIndices { button: Some(usize::MAX), ..Default::default() };
        let runtime =
            ComponentRuntime::new("trigger", ComponentType::Trigger, indices, ComponentOptions::default())
                .expect("trigger runtime");
        assert_eq!(runtime.required_shape(), SampleShape::new(usize::MAX, 0));

        let runtime = stick(None, ComponentOptions::default());
        assert_eq!(runtime.required_shape(), SampleShape::new(0, 2));
    }

    #[test]
    fn snapshot_serializes_present_values_only() {
        let json = serde_json::to_string(trigger().snapshot()).expect("serialize");
        assert_eq!(json, r#"{"id":"trigger","state":"default","buttonValue":0.0}"#);
    }

    proptest! {
        #[test]
        fn axis_only_component_never_presses(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
        ) {
            let mut runtime = stick(None, ComponentOptions::default());
            runtime.update(&sample(&[GamepadButton::new(1.0, true, true)], &[x, y]));
            prop_assert_ne!(runtime.snapshot().state, ComponentState::Pressed);
            let sx = runtime.snapshot().x_axis.unwrap_or_default();
            let sy = runtime.snapshot().y_axis.unwrap_or_default();
            prop_assert!((-1.0..=1.0).contains(&sx));
            prop_assert!((-1.0..=1.0).contains(&sy));
        }

        #[test]
        fn button_value_stays_in_unit_range(value in -5.0f32..5.0, touched: bool, pressed: bool) {
            let mut runtime = trigger();
            runtime.update(&sample(&[GamepadButton::new(value, touched, pressed)], &[]));
            let clamped = runtime.snapshot().button_value.unwrap_or(-1.0);
            prop_assert!((0.0..=1.0).contains(&clamped));
            if pressed {
                prop_assert_eq!(runtime.snapshot().state, ComponentState::Pressed);
            }
        }
    }
}
