// THEORY:
// The `pipeline` module is the top-level API of the locator. It strings the core
// modules together for one frame:
//
//   validate -> binarize -> label (first pass) -> aggregate (second pass)
//            -> evaluate candidates -> pick winner -> normalize
//
// Key architectural principles:
// 1.  **One Frame, One Pure Answer**: All working state (label scratch, equivalence
//     forest, statistics table) lives in a `Workspace` owned by the locator and is
//     reset at the start of every call. Buffers are reused for their allocation,
//     never for their contents, so a frame's result depends on that frame alone.
// 2.  **The Frame Is Read-Only**: Labels are written into the workspace's scratch,
//     never over the caller's pixels. A rejected frame is untouched.
// 3.  **Found Nothing Is Not Failure**: An empty result (`pixel_count == 0`) is a
//     successful run. Errors are reserved for frames the pipeline refused to run on.
// 4.  **Synchronous and Bounded**: A call runs to completion on the calling thread
//     with work proportional to the frame size. No I/O, no yielding.

use crate::config::LocatorConfig;
use crate::core_modules::binarizer::binarize;
use crate::core_modules::blob_stats::{BlobStats, aggregate_moments};
use crate::core_modules::candidate::{Candidate, SelectionCriteria, evaluate_candidates, select_winner};
use crate::core_modules::frame::Frame;
use crate::core_modules::labeler::label_components;
use crate::core_modules::normalizer::normalize;
use crate::core_modules::union_find::{EquivalenceForest, Label};
use crate::error::LocateResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::candidate::BlobShape;
pub use crate::core_modules::frame::PixelFormat;
pub use crate::core_modules::pixel::pixel::ByteOrder;

/// Where the light source is, on the symmetric [-1, 1] square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LightSourceResult {
    pub x: f32,
    pub y: f32,
    /// Size of the winning component. Zero means no light source was found.
    pub pixel_count: u32,
}

impl LightSourceResult {
    /// The "ran successfully, found nothing" result.
    pub const NOT_FOUND: Self = Self {
        x: 0.0,
        y: 0.0,
        pixel_count: 0,
    };

    pub fn is_found(&self) -> bool {
        self.pixel_count > 0
    }
}

/// The result of one frame together with what the pipeline saw on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    pub result: LightSourceResult,
    /// Pixels that passed the brightness threshold.
    pub foreground_pixels: usize,
    pub provisional_labels: usize,
    /// Foreground pixels discarded because the label table was full.
    pub dropped_pixels: usize,
    /// Distinct connected components after equivalence resolution.
    pub components: usize,
    /// Every component large enough to be evaluated, in ascending label order.
    pub candidates: Vec<Candidate>,
    /// Canonical label of the winner, if any.
    pub winner: Option<Label>,
}

/// Per-frame scratch. Reset, not reallocated, between frames.
#[derive(Debug, Default)]
struct Workspace {
    labels: Vec<Label>,
    forest: EquivalenceForest,
    stats: Vec<Option<BlobStats>>,
    width: u32,
    height: u32,
}

impl Workspace {
    fn reset(&mut self, capacity: Label, width: u32, height: u32) {
        self.labels.clear();
        self.forest.reset(capacity);
        self.stats.clear();
        self.width = width;
        self.height = height;
    }
}

/// Blob sizes are u64 sums; the reported count saturates instead of wrapping.
fn saturating_pixel_count(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Locates the brightest, most circular light source in a frame.
#[derive(Debug)]
pub struct LightLocator {
    config: LocatorConfig,
    workspace: Workspace,
}

impl LightLocator {
    pub fn new(config: LocatorConfig) -> LocateResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            workspace: Workspace::default(),
        })
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Runs the full pipeline on `frame` and returns only the result.
    pub fn locate(&mut self, frame: &Frame) -> LocateResult<LightSourceResult> {
        self.analyze(frame).map(|analysis| analysis.result)
    }

    /// Runs the full pipeline on `frame`.
    pub fn analyze(&mut self, frame: &Frame) -> LocateResult<FrameAnalysis> {
        frame.validate()?;

        let ws = &mut self.workspace;
        ws.reset(self.config.label_capacity, frame.width, frame.height);
        let width = frame.width as usize;

        let foreground_pixels = binarize(frame, self.config.brightness_threshold, &mut ws.labels);
        let labeling = label_components(&mut ws.labels, width, &mut ws.forest);
        let components = aggregate_moments(&mut ws.labels, width, &mut ws.forest, &mut ws.stats);

        if labeling.dropped_pixels > 0 {
            warn!(
                dropped_pixels = labeling.dropped_pixels,
                capacity = self.config.label_capacity,
                "label table exhausted; later regions dropped"
            );
        }

        let criteria = SelectionCriteria {
            min_pixels: self.config.min_blob_pixels as u64,
            min_circularity: self.config.min_circularity as f64,
        };
        let candidates = evaluate_candidates(&ws.stats, &criteria);

        let (result, winner) = match select_winner(&candidates) {
            Some(best) => {
                let result = best
                    .stats
                    .integer_centroid()
                    .map(|(res_x, res_y)| {
                        let (x, y) = normalize(res_x, res_y, frame.width, frame.height);
                        LightSourceResult {
                            x,
                            y,
                            pixel_count: saturating_pixel_count(best.stats.count),
                        }
                    })
                    .unwrap_or(LightSourceResult::NOT_FOUND);
                (result, Some(best.label))
            }
            None => (LightSourceResult::NOT_FOUND, None),
        };

        debug!(
            width = frame.width,
            height = frame.height,
            foreground_pixels,
            provisional = labeling.provisional_labels,
            merges = labeling.merges,
            components,
            candidates = candidates.len(),
            found = result.is_found(),
            x = result.x,
            y = result.y,
            pixel_count = result.pixel_count,
            "frame located"
        );

        Ok(FrameAnalysis {
            result,
            foreground_pixels,
            provisional_labels: labeling.provisional_labels,
            dropped_pixels: labeling.dropped_pixels,
            components,
            candidates,
            winner,
        })
    }

    /// Canonical label map of the last analysed frame, row-major.
    pub fn label_map(&self) -> &[Label] {
        &self.workspace.labels
    }

    /// Dimensions of the last analysed frame.
    pub fn label_map_size(&self) -> (u32, u32) {
        (self.workspace.width, self.workspace.height)
    }
}
