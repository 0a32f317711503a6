#[inline]
pub(crate) fn clamp_button(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
pub(crate) fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[inline]
pub(crate) fn invert_xy(x: f32, y: f32, invert_x: bool, invert_y: bool) -> (f32, f32) {
    let nx = if invert_x { -x } else { x };
    let ny = if invert_y { -y } else { y };
    (nx, ny)
}

#[inline]
pub(crate) fn magnitude2d(x: f32, y: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// Project `(x, y)` into the unit disc, then map each axis from
/// `[-1, 1]` to `[0, 1]`.
#[inline]
pub(crate) fn normalize_axes(x: f32, y: f32) -> (f32, f32) {
    let (x, y) = if magnitude2d(x, y) > 1.0 {
        let theta = y.atan2(x);
        (theta.cos(), theta.sin())
    } else {
        (x, y)
    };
    (x * 0.5 + 0.5, y * 0.5 + 0.5)
}
