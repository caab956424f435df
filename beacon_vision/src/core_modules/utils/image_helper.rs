pub mod image_helper {
    use crate::core_modules::frame::Frame;
    use crate::core_modules::pixel::pixel::{ByteOrder, Pixel};
    use crate::core_modules::union_find::{BACKGROUND, Label};
    use image::{GrayImage, ImageEncoder, Luma, RgbImage};
    use std::path::Path;

    /// Packs an 8-bit RGB image into an RGB565 frame, as a camera in RGB565 mode would deliver it.
    pub fn frame_from_rgb_image(image: &RgbImage, order: ByteOrder) -> Frame {
        let packed: Vec<u16> = image
            .pixels()
            .map(|p| Pixel::pack(p[0], p[1], p[2]))
            .collect();
        Frame::rgb565(image.width(), image.height(), order, &packed)
    }

    /// Renders a label map as greyscale. Background is black; each label gets a
    /// distinct non-zero grey so neighbouring components stay distinguishable.
    pub fn label_map_image(labels: &[Label], width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let index = (y * width + x) as usize;
            match labels.get(index).copied().unwrap_or(BACKGROUND) {
                BACKGROUND => Luma([0]),
                label => Luma([64 + ((label as u32 * 37) % 192) as u8]),
            }
        })
    }

    pub fn save_label_map(
        path: &Path,
        labels: &[Label],
        width: u32,
        height: u32,
    ) -> Result<(), image::error::ImageError> {
        let image = label_map_image(labels, width, height);
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(image.as_raw(), width, height, image::ExtendedColorType::L8)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::ByteOrder;
    use image::{Rgb, RgbImage};

    #[test]
    fn rgb_image_becomes_packed_frame() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(1, 1, Rgb([255, 255, 255]));

        let frame = frame_from_rgb_image(&image, ByteOrder::Little);
        frame.validate().expect("frame should satisfy the input contract");

        let packed: Vec<u16> = frame.packed_pixels().collect();
        assert_eq!(packed.len(), 6);
        assert_eq!(packed[4], 0xFFFF);
        assert_eq!(packed.iter().filter(|&&p| p == 0).count(), 5);
    }

    #[test]
    fn label_map_keeps_background_black() {
        let labels = [0, 1, 2, 0];
        let map = label_map_image(&labels, 2, 2);
        assert_eq!(map.get_pixel(0, 0)[0], 0);
        assert_ne!(map.get_pixel(1, 0)[0], 0);
        assert_ne!(map.get_pixel(1, 0)[0], map.get_pixel(0, 1)[0]);
    }

    #[test]
    fn save_label_map_file() {
        let labels = vec![0u16, 1, 1, 0, 2, 2];
        let path = std::env::temp_dir().join("beacon_vision_label_map.png");

        save_label_map(&path, &labels, 3, 2).expect("Error Saving File.");

        let reloaded = image::open(&path).expect("Error Loading File.").to_luma8();
        assert_eq!(reloaded.dimensions(), (3, 2));
        let _ = std::fs::remove_file(&path);
    }
}
