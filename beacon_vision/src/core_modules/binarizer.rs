// THEORY:
// The binarizer turns a colour frame into a two-valued mask. A pixel is a light
// candidate only if *every* channel clears the brightness threshold: a saturated
// red tail-light is not white, a bright light source is. There is no per-pixel
// adaptivity; the threshold is one tunable for the whole frame.
//
// The mask is written into the locator's label scratch rather than back over the
// pixels. Foreground is the all-bits-set `FOREGROUND` sentinel ("foreground, not
// yet labelled"), background is zero. The labeler then overwrites the same buffer
// in place with provisional label IDs.

use crate::core_modules::frame::Frame;
use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::union_find::{BACKGROUND, FOREGROUND, Label};

/// Thresholds `frame` into `mask`, resizing it to the frame's pixel count.
/// Returns the number of foreground pixels.
///
/// The frame must already have passed `Frame::validate`.
pub fn binarize(frame: &Frame, threshold: Channel, mask: &mut Vec<Label>) -> usize {
    mask.clear();
    mask.reserve(frame.pixel_count());

    let mut foreground = 0;
    for packed in frame.packed_pixels() {
        if Pixel::from_packed(packed).all_channels_above(threshold) {
            mask.push(FOREGROUND);
            foreground += 1;
        } else {
            mask.push(BACKGROUND);
        }
    }
    foreground
}
