// THEORY:
// The last step maps the winning centroid out of pixel space. Consumers (display
// mapping, gaze control) should not care whether the sensor ran at 80x60 or
// 320x240, so the coordinate is expressed on a symmetric [-1, 1] square centred on
// the frame: x_norm = (res_x / width)·2 − 1, and the same for y.
//
// The centroid fed in here is the *truncated* integer centroid (Σx/N with integer
// division), not a rounded or sub-pixel one.

/// Maps an integer pixel coordinate onto [-1, 1]. `width` and `height` must be non-zero.
pub fn normalize(res_x: u32, res_y: u32, width: u32, height: u32) -> (f32, f32) {
    (to_unit(res_x, width), to_unit(res_y, height))
}

#[inline]
fn to_unit(value: u32, extent: u32) -> f32 {
    (value as f32 / extent as f32) * 2.0 - 1.0
}
