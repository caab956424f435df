// THEORY:
// First pass of classic two-pass connected-component labeling, over the mask the
// binarizer left in the label scratch.
//
// The scan is row-major and looks at two neighbours only: the pixel above and the
// pixel to the left. Both have already been visited in this pass, so each holds
// either a provisional label or background. The four cases:
//   - neither labelled:       take a fresh label from the forest
//   - one labelled:           copy it
//   - both labelled, equal:   copy it
//   - both labelled, differ:  record the equivalence, keep the smaller label
// Final canonicalization is left to the aggregator's second pass.
//
// When the forest runs out of labels the pixel is written as background and stays
// out of every later stage. Labels are never returned within a frame, so every
// region first seen after exhaustion is dropped, while regions that already hold a
// label keep growing normally.

use crate::core_modules::union_find::{BACKGROUND, EquivalenceForest, FOREGROUND, Label};

/// Counters from one labeling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelingSummary {
    /// Provisional labels issued.
    pub provisional_labels: usize,
    /// Equivalences recorded between differing neighbour labels.
    pub merges: usize,
    /// Foreground pixels discarded because the label table was full.
    pub dropped_pixels: usize,
}

/// Labels `labels` in place. On entry every cell is `FOREGROUND` or `BACKGROUND`;
/// on exit every cell is a provisional label or `BACKGROUND`.
///
/// `forest` must have been reset for this frame.
pub fn label_components(
    labels: &mut [Label],
    width: usize,
    forest: &mut EquivalenceForest,
) -> LabelingSummary {
    let mut summary = LabelingSummary::default();
    if width == 0 {
        return summary;
    }

    for i in 0..labels.len() {
        if labels[i] != FOREGROUND {
            continue;
        }

        let x = i % width;
        let up = if i >= width { labels[i - width] } else { BACKGROUND };
        let left = if x > 0 { labels[i - 1] } else { BACKGROUND };

        labels[i] = match (up, left) {
            (BACKGROUND, BACKGROUND) => match forest.make_set() {
                Some(fresh) => {
                    summary.provisional_labels += 1;
                    fresh
                }
                None => {
                    summary.dropped_pixels += 1;
                    BACKGROUND
                }
            },
            (only, BACKGROUND) | (BACKGROUND, only) => only,
            (up, left) if up == left => up,
            (up, left) => {
                forest.union(up, left);
                summary.merges += 1;
                up.min(left)
            }
        };
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: Label = FOREGROUND;
    const B: Label = BACKGROUND;

    fn run(mask: &mut [Label], width: usize, capacity: Label) -> (LabelingSummary, EquivalenceForest) {
        let mut forest = EquivalenceForest::with_capacity(capacity);
        let summary = label_components(mask, width, &mut forest);
        (summary, forest)
    }

    #[test]
    fn separate_regions_get_separate_labels() {
        #[rustfmt::skip]
        let mut mask = [
            F, F, B, F,
            F, B, B, F,
            B, B, B, B,
        ];
        let (summary, _) = run(&mut mask, 4, 16);
        #[rustfmt::skip]
        assert_eq!(mask, [
            1, 1, 0, 2,
            1, 0, 0, 2,
            0, 0, 0, 0,
        ]);
        assert_eq!(summary.provisional_labels, 2);
        assert_eq!(summary.merges, 0);
    }

    #[test]
    fn u_shape_records_one_equivalence() {
        #[rustfmt::skip]
        let mut mask = [
            F, B, F,
            F, B, F,
            F, F, F,
        ];
        let (summary, mut forest) = run(&mut mask, 3, 16);
        assert_eq!(summary.provisional_labels, 2);
        assert_eq!(summary.merges, 1);
        // The joining pixel takes the smaller label; the right arm keeps label 2.
        assert_eq!(mask[7], 1);
        assert_eq!(mask[8], 1);
        assert_eq!(mask[5], 2);
        assert_eq!(forest.find(2), 1);
    }

    #[test]
    fn diagonal_neighbours_are_not_connected() {
        #[rustfmt::skip]
        let mut mask = [
            F, B,
            B, F,
        ];
        let (summary, _) = run(&mut mask, 2, 16);
        assert_eq!(summary.provisional_labels, 2);
        assert_eq!(mask, [1, 0, 0, 2]);
    }

    #[test]
    fn rows_do_not_wrap() {
        // The first pixel of row 1 must not see the last pixel of row 0 as "left".
        let mut mask = [B, F, F, B];
        let (summary, _) = run(&mut mask, 2, 16);
        assert_eq!(summary.provisional_labels, 2);
        assert_eq!(mask, [0, 1, 2, 0]);
    }

    #[test]
    fn regions_beyond_capacity_are_dropped() {
        // Capacity 3 leaves labels 1 and 2.
        let mut mask = [F, B, F, B, F, B, F];
        let (summary, forest) = run(&mut mask, 7, 3);
        assert_eq!(mask, [1, 0, 2, 0, 0, 0, 0]);
        assert_eq!(summary.provisional_labels, 2);
        assert_eq!(summary.dropped_pixels, 2);
        assert_eq!(forest.issued(), 2);
    }

    #[test]
    fn labelled_regions_keep_growing_after_exhaustion() {
        #[rustfmt::skip]
        let mut mask = [
            F, B, F,
            F, B, F,
        ];
        // Capacity 2 leaves only label 1.
        let (summary, _) = run(&mut mask, 3, 2);
        assert_eq!(mask, [1, 0, 0, 1, 0, 0]);
        assert_eq!(summary.dropped_pixels, 2);
    }
}
