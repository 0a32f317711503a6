use std::sync::Arc;

use codspeed_criterion_compat::{black_box, criterion_group, criterion_main, Criterion};
use xrinput_gamepad::{GamepadButton, GamepadSample, Handedness, InputSource, SampleShape};
use xrinput_motion::{ControllerOptions, MotionController};
use xrinput_profile::{ProfileBuilder, SkipSchemaValidation};

fn build_controller() -> MotionController {
    let registry: serde_json::Value = serde_json::from_str(include_str!(
        "../tests/fixtures/oculus-touch.registry.json"
    ))
    .expect("registry fixture");
    let asset: serde_json::Value = serde_json::from_str(include_str!(
        "../tests/fixtures/oculus-touch.asset.json"
    ))
    .expect("asset fixture");
    let profile = ProfileBuilder::new(&SkipSchemaValidation)
        .build(&registry, &asset)
        .expect("profile should build");
    let source = InputSource::new(
        Handedness::Left,
        GamepadSample::zeroed(SampleShape::new(7, 4)),
    );
    MotionController::new(Arc::new(profile), &source, &ControllerOptions::default())
        .expect("controller should build")
}

pub fn bench_update(c: &mut Criterion) {
    let mut controller = build_controller();
    let mut sample = GamepadSample::zeroed(SampleShape::new(7, 4));

    // Sweep the stick around the unit circle while squeezing the trigger
    c.bench_function("motion_controller_update", |b| {
        b.iter(|| {
            for t in 0..16u32 {
                let theta = t as f32 * std::f32::consts::TAU / 16.0;
                sample.axes[2] = theta.cos() * 1.2;
                sample.axes[3] = theta.sin() * 1.2;
                sample.buttons[0] = GamepadButton::analog(t as f32 / 15.0);
                controller
                    .update(black_box(&sample))
                    .expect("sample matches controller");
            }
            black_box(controller.visual_responses().count());
        })
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
