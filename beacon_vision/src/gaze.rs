// THEORY:
// The gaze mapper sits on the consumer side of the locator's output contract. The
// locator speaks in normalized [-1, 1] coordinates and says "nothing found" with a
// zero pixel count; a display wants an integer offset every frame, found or not.
//
// It is the one piece with memory across frames, and it is deliberately outside
// the localization core: the core stays a pure function of the frame, and the
// "what do we show when the light is gone" policy lives here.

use crate::config::{GazeConfig, MissingPolicy};
use crate::pipeline::LightSourceResult;

/// An offset in display units, centred on (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GazeOffset {
    pub dx: i32,
    pub dy: i32,
    /// True if derived from the current frame's detection.
    pub fresh: bool,
}

#[derive(Debug, Clone)]
pub struct GazeMapper {
    config: GazeConfig,
    last: GazeOffset,
}

impl GazeMapper {
    pub fn new(config: GazeConfig) -> Self {
        Self {
            config,
            last: GazeOffset::default(),
        }
    }

    pub fn update(&mut self, result: &LightSourceResult) -> GazeOffset {
        if result.is_found() {
            let offset = GazeOffset {
                dx: (result.x * self.config.x_gain).round() as i32,
                dy: (result.y * self.config.y_gain).round() as i32,
                fresh: true,
            };
            self.last = offset;
            return offset;
        }

        match self.config.on_missing {
            MissingPolicy::HoldLast => GazeOffset {
                fresh: false,
                ..self.last
            },
            MissingPolicy::Center => GazeOffset::default(),
        }
    }

    /// The last offset derived from an actual detection.
    pub fn last_known(&self) -> GazeOffset {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(x: f32, y: f32) -> LightSourceResult {
        LightSourceResult {
            x,
            y,
            pixel_count: 12,
        }
    }

    #[test]
    fn detections_are_scaled_by_gain() {
        let mut mapper = GazeMapper::new(GazeConfig {
            x_gain: 100.0,
            y_gain: 120.0,
            ..Default::default()
        });
        let offset = mapper.update(&found(0.5, -0.25));
        assert_eq!(offset, GazeOffset { dx: 50, dy: -30, fresh: true });
    }

    #[test]
    fn hold_last_keeps_previous_offset() {
        let mut mapper = GazeMapper::new(GazeConfig::default());
        assert_eq!(mapper.update(&LightSourceResult::NOT_FOUND), GazeOffset::default());

        mapper.update(&found(0.1, 0.2));
        let held = mapper.update(&LightSourceResult::NOT_FOUND);
        assert_eq!(held, GazeOffset { dx: 10, dy: 20, fresh: false });
        assert!(mapper.last_known().fresh);
    }

    #[test]
    fn center_policy_returns_to_origin() {
        let mut mapper = GazeMapper::new(GazeConfig {
            on_missing: MissingPolicy::Center,
            ..Default::default()
        });
        mapper.update(&found(-1.0, 1.0));
        assert_eq!(mapper.update(&LightSourceResult::NOT_FOUND), GazeOffset::default());
        assert_eq!(mapper.last_known().dx, -100);
    }
}
