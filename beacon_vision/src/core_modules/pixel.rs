// THEORY:
// The `Pixel` module is the lowest layer of the locator. The capture side hands us
// 16-bit packed RGB565 words: 5 bits of red in the top of the word, 6 bits of green
// in the middle, 5 bits of blue at the bottom. This module turns one such word into
// three 8-bit channel intensities and nothing more.
//
// Key principles:
// 1.  **Exact Bit Layout**: Each channel is read from its own field only. Green's
//     low bits never leak into red and vice versa.
// 2.  **Widening, Not Masking**: A 5-bit field is not an 8-bit value. Each field is
//     shifted back to the top of the byte and its high bits are replicated into the
//     vacated low bits, so a full-scale field decodes to 255 and zero stays zero.
//     The brightness threshold is expressed on the 0..=255 scale, so this matters.
// 3.  **Byte Order Is Declared**: The same word arrives little- or big-endian
//     depending on the sensor bus. The frame declares which; the decoder obeys.

pub mod pixel {
    pub type Byte = u8;
    pub type Packed = u16;
    pub type Channel = Byte;

    /// Bytes per packed pixel.
    pub const BYTES_PER_PIXEL: usize = 2;

    const RED_BITS: u32 = 5;
    const GREEN_BITS: u32 = 6;
    const BLUE_BITS: u32 = 5;
    const RED_SHIFT: u32 = GREEN_BITS + BLUE_BITS;
    const GREEN_SHIFT: u32 = BLUE_BITS;

    /// Endianness of each 16-bit packed pixel in a frame buffer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ByteOrder {
        #[default]
        Little,
        Big,
    }

    impl ByteOrder {
        /// Reads one packed pixel from exactly two bytes.
        #[inline]
        pub fn read(self, bytes: [Byte; BYTES_PER_PIXEL]) -> Packed {
            match self {
                ByteOrder::Little => Packed::from_le_bytes(bytes),
                ByteOrder::Big => Packed::from_be_bytes(bytes),
            }
        }

        #[inline]
        pub fn write(self, packed: Packed) -> [Byte; BYTES_PER_PIXEL] {
            match self {
                ByteOrder::Little => packed.to_le_bytes(),
                ByteOrder::Big => packed.to_be_bytes(),
            }
        }
    }

    /// A decoded pixel with every channel on the 0..=255 scale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    /// Extracts a `bits`-wide field at `shift` and widens it to 8 bits.
    #[inline]
    fn widen(packed: Packed, shift: u32, bits: u32) -> Channel {
        let mask = (1u16 << bits) - 1;
        let field = (packed >> shift) & mask;
        let up = 8 - bits;
        ((field << up) | (field >> (bits - up))) as Channel
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        /// Decodes a packed RGB565 word.
        #[inline]
        pub fn from_packed(packed: Packed) -> Self {
            Pixel {
                red: widen(packed, RED_SHIFT, RED_BITS),
                green: widen(packed, GREEN_SHIFT, GREEN_BITS),
                blue: widen(packed, 0, BLUE_BITS),
            }
        }

        /// Packs 8-bit channels into RGB565 by truncating the low bits.
        pub fn pack(red: Channel, green: Channel, blue: Channel) -> Packed {
            let r = (red as Packed) >> (8 - RED_BITS);
            let g = (green as Packed) >> (8 - GREEN_BITS);
            let b = (blue as Packed) >> (8 - BLUE_BITS);
            (r << RED_SHIFT) | (g << GREEN_SHIFT) | b
        }

        /// True iff every channel is strictly brighter than `threshold`.
        #[inline]
        pub fn all_channels_above(&self, threshold: Channel) -> bool {
            self.red > threshold && self.green > threshold && self.blue > threshold
        }
    }
}
