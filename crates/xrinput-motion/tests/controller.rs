use std::sync::Arc;

use serde_json::Value;
use xrinput_gamepad::{GamepadButton, GamepadSample, Handedness, InputSource, SampleShape};
use xrinput_motion::{
    ComponentState, ControllerOptions, MotionController, MotionError, ResponseValue,
};
use xrinput_profile::{MergedProfile, ProfileBuilder, SkipSchemaValidation};

fn fixture(json: &str) -> Value {
    serde_json::from_str(json).expect("fixture is valid json")
}

fn vive() -> Arc<MergedProfile> {
    let profile = ProfileBuilder::new(&SkipSchemaValidation)
        .build(
            &fixture(include_str!("fixtures/htc-vive.registry.json")),
            &fixture(include_str!("fixtures/htc-vive.asset.json")),
        )
        .expect("vive builds");
    Arc::new(profile)
}

fn touch() -> Arc<MergedProfile> {
    let profile = ProfileBuilder::new(&SkipSchemaValidation)
        .build(
            &fixture(include_str!("fixtures/oculus-touch.registry.json")),
            &fixture(include_str!("fixtures/oculus-touch.asset.json")),
        )
        .expect("touch builds");
    Arc::new(profile)
}

fn source(hand: Handedness, shape: SampleShape) -> InputSource {
    InputSource::new(hand, GamepadSample::zeroed(shape))
        .with_profiles(["htc-vive", "generic-trigger-squeeze-touchpad"])
}

#[test]
fn touchpad_drives_touch_point_and_axes() {
    let options = ControllerOptions::from_yaml_str(
        "components:\n  xr-standard-touchpad:\n    invert_y: true\n",
    )
    .expect("options");
    let shape = SampleShape::new(5, 2);
    let mut controller =
        MotionController::new(vive(), &source(Handedness::None, shape), &options)
            .expect("controller");
    assert_eq!(controller.asset_path(), "none.glb");

    let mut sample = GamepadSample::zeroed(shape);
    sample.axes[0] = 0.6;
    sample.axes[1] = 0.8;
    controller.update(&sample).expect("update");

    let pad = controller.component("xr-standard-touchpad").expect("touchpad");
    assert_eq!(pad.snapshot().state, ComponentState::Touched);
    assert_eq!(pad.snapshot().y_axis, Some(-0.8));

    let dot = pad.response("xr_standard_touchpad_axes_touched").expect("touch dot");
    assert_eq!(dot.value_node_name, "touchpad_touch_point");
    assert_eq!(dot.value, ResponseValue::Visible(true));

    let touched_x = pad
        .response("xr_standard_touchpad_xaxis_touched")
        .expect("x response");
    assert!((touched_x.value.weight().expect("weight") - 0.8).abs() < 1e-5);

    let pressed_x = pad
        .response("xr_standard_touchpad_xaxis_pressed")
        .expect("x pressed response");
    assert_eq!(pressed_x.value, ResponseValue::Weight(0.5));
}

#[test]
fn pressing_the_touchpad_wins_over_axes() {
    let shape = SampleShape::new(5, 2);
    let mut controller = MotionController::new(
        vive(),
        &source(Handedness::Right, shape),
        &ControllerOptions::default(),
    )
    .expect("controller");

    let mut sample = GamepadSample::zeroed(shape);
    sample.buttons[2] = GamepadButton::new(1.0, true, true);
    sample.axes[0] = 1.0;
    sample.axes[1] = 1.0;
    controller.update(&sample).expect("update");

    let pad = controller.component("xr-standard-touchpad").expect("touchpad");
    assert_eq!(pad.snapshot().state, ComponentState::Pressed);
    let pressed_x = pad
        .response("xr_standard_touchpad_xaxis_pressed")
        .and_then(|output| output.value.weight())
        .expect("weight");
    assert!((pressed_x - 0.853_553_4).abs() < 1e-4);
}

#[test]
fn each_hand_gets_its_own_buttons() {
    let shape = SampleShape::new(7, 4);
    let left = MotionController::new(
        touch(),
        &source(Handedness::Left, shape),
        &ControllerOptions::default(),
    )
    .expect("left");
    let right = MotionController::new(
        touch(),
        &source(Handedness::Right, shape),
        &ControllerOptions::default(),
    )
    .expect("right");

    assert_eq!(left.asset_path(), "left.glb");
    assert_eq!(right.asset_path(), "right.glb");
    assert!(left.component("x-button").is_some());
    assert!(left.component("a-button").is_none());
    assert!(right.component("a-button").is_some());

    let none = MotionController::new(
        touch(),
        &source(Handedness::None, shape),
        &ControllerOptions::default(),
    );
    assert!(matches!(none, Err(MotionError::NoLayout { .. })));
}

#[test]
fn sample_must_cover_every_slot() {
    let result = MotionController::new(
        touch(),
        &source(Handedness::Left, SampleShape::new(7, 2)),
        &ControllerOptions::default(),
    );
    match result {
        Err(MotionError::SampleShape { required, available, .. }) => {
            assert_eq!(required, SampleShape::new(7, 4));
            assert_eq!(available, SampleShape::new(7, 2));
        }
        other => panic!("expected SampleShape, got {other:?}"),
    }
}

#[test]
fn controllers_share_one_profile() {
    let profile = touch();
    let shape = SampleShape::new(7, 4);
    let mut left = MotionController::new(
        Arc::clone(&profile),
        &source(Handedness::Left, shape),
        &ControllerOptions::default(),
    )
    .expect("left");
    let right = MotionController::new(
        Arc::clone(&profile),
        &source(Handedness::Right, shape),
        &ControllerOptions::default(),
    )
    .expect("right");
    assert!(Arc::ptr_eq(left.profile(), right.profile()));

    let mut sample = GamepadSample::zeroed(shape);
    sample.buttons[0] = GamepadButton::analog(1.0);
    left.update(&sample).expect("update");
    let trigger = |controller: &MotionController| {
        controller
            .component("xr-standard-trigger")
            .map(|view| view.snapshot().state)
    };
    assert_eq!(trigger(&left), Some(ComponentState::Pressed));
    assert_eq!(trigger(&right), Some(ComponentState::Default));
}
