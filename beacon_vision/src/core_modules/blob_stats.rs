// THEORY:
// The moment aggregator is the second raster pass. It resolves every provisional
// label to its canonical root, writes the root back into the label scratch (the
// only place the label map becomes final), and folds the pixel's coordinates into
// that root's running sums.
//
// Those sums (count, Σx, Σy, Σx², Σy², Σxy) are sufficient statistics: the
// candidate selector derives centroid, central moments and shape from them without
// touching the pixels again. A record is created lazily the first time its root is
// seen, so a frame with two blobs costs two records no matter how many provisional
// labels it went through.

use crate::core_modules::union_find::{BACKGROUND, EquivalenceForest, Label};

/// Raw coordinate sums for one canonical component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobStats {
    /// Number of pixels in the component.
    pub count: u64,
    pub sum_x: u64,
    pub sum_y: u64,
    pub sum_xx: u64,
    pub sum_yy: u64,
    pub sum_xy: u64,
}

impl BlobStats {
    #[inline]
    pub fn add(&mut self, x: u64, y: u64) {
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
    }

    /// Centroid truncated to whole pixels, as the coordinate normalizer expects.
    pub fn integer_centroid(&self) -> Option<(u32, u32)> {
        if self.count == 0 {
            return None;
        }
        Some(((self.sum_x / self.count) as u32, (self.sum_y / self.count) as u32))
    }
}

/// Canonicalizes `labels` in place and fills `table`, indexed by canonical label.
/// `table` is cleared and sized to the forest's capacity. Returns the number of
/// distinct canonical components seen.
pub fn aggregate_moments(
    labels: &mut [Label],
    width: usize,
    forest: &mut EquivalenceForest,
    table: &mut Vec<Option<BlobStats>>,
) -> usize {
    table.clear();
    table.resize(forest.capacity(), None);

    if width == 0 {
        return 0;
    }

    let mut components = 0;
    for (i, cell) in labels.iter_mut().enumerate() {
        if *cell == BACKGROUND {
            continue;
        }

        let root = forest.find(*cell);
        *cell = root;

        let slot = &mut table[root as usize];
        let stats = slot.get_or_insert_with(|| {
            components += 1;
            BlobStats::default()
        });
        stats.add((i % width) as u64, (i / width) as u64);
    }

    components
}
