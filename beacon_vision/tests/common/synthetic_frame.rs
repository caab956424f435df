use beacon_vision::core_modules::pixel::pixel::Pixel;
use beacon_vision::{ByteOrder, Frame};

/// Builds RGB565 test frames: a dark background with white shapes painted on.
pub struct FrameBuilder {
    width: u32,
    height: u32,
    lit: Vec<bool>,
}

impl FrameBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "frame dimensions must be positive");
        Self {
            width,
            height,
            lit: vec![false; (width * height) as usize],
        }
    }

    pub fn set(mut self, x: u32, y: u32) -> Self {
        if x < self.width && y < self.height {
            self.lit[(y * self.width + x) as usize] = true;
        }
        self
    }

    /// Fills the `w` x `h` rectangle with top-left corner (x0, y0).
    pub fn block(mut self, x0: u32, y0: u32, w: u32, h: u32) -> Self {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self = self.set(x, y);
            }
        }
        self
    }

    /// Fills every pixel within `radius` of (cx, cy).
    pub fn disk(mut self, cx: u32, cy: u32, radius: u32) -> Self {
        let r = radius as i64;
        for y in cy.saturating_sub(radius)..=cy + radius {
            for x in cx.saturating_sub(radius)..=cx + radius {
                let dx = x as i64 - cx as i64;
                let dy = y as i64 - cy as i64;
                if dx * dx + dy * dy <= r * r {
                    self = self.set(x, y);
                }
            }
        }
        self
    }

    pub fn build(&self, order: ByteOrder) -> Frame {
        let light = Pixel::pack(255, 250, 245);
        let dark = Pixel::pack(30, 30, 40);
        let packed: Vec<u16> = self
            .lit
            .iter()
            .map(|&on| if on { light } else { dark })
            .collect();
        Frame::rgb565(self.width, self.height, order, &packed)
    }
}
