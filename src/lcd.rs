//! LCD bitmap decoding.
//!
//! The machine core exposes its panel as a packed 1-bit-per-pixel buffer,
//! row-major with the most significant bit first in each byte. The decoder
//! expands that buffer into a two-color pixel image, replicating every panel
//! dot into a `scale`x`scale` block. The panel is a binary display; nothing
//! is interpolated or smoothed.

/// Pixel image handed to the presentation surface. `0RGB` pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl DisplayImage {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Expands a packed panel buffer into a [`DisplayImage`].
///
/// Geometry and colors are fixed at construction; the same decoder instance
/// serves every frame of a session.
#[derive(Debug, Clone)]
pub struct LcdDecoder {
    width: usize,
    height: usize,
    scale: usize,
    on: u32,
    off: u32,
}

impl LcdDecoder {
    /// Panel width and height are in dots, `scale` in output pixels per dot.
    /// The dot count must fill whole bytes.
    pub fn new(width: usize, height: usize, scale: usize, on: u32, off: u32) -> Self {
        assert!(scale >= 1, "pixel scale must be at least 1");
        assert_eq!(
            width * height % 8,
            0,
            "panel dot count must be a multiple of 8"
        );
        Self {
            width,
            height,
            scale,
            on,
            off,
        }
    }

    /// Length of the packed buffer this decoder accepts.
    pub fn bitmap_len(&self) -> usize {
        self.width * self.height / 8
    }

    pub fn image_width(&self) -> usize {
        self.width * self.scale
    }

    pub fn image_height(&self) -> usize {
        self.height * self.scale
    }

    /// A blank (all dots off) image of the decoder's output size.
    pub fn blank_image(&self) -> DisplayImage {
        DisplayImage::new(self.image_width(), self.image_height(), self.off)
    }

    /// Rewrite `image` from `bitmap`. Every output pixel is assigned, so the
    /// image never carries anything over from an earlier frame.
    ///
    /// Panics if `bitmap` or `image` does not match the decoder's geometry;
    /// both sizes are fixed for the life of the process, so a mismatch is a
    /// programming error rather than a runtime condition.
    pub fn decode(&self, bitmap: &[u8], image: &mut DisplayImage) {
        assert_eq!(bitmap.len(), self.bitmap_len(), "packed buffer length");
        assert_eq!(image.width, self.image_width(), "image width");
        assert_eq!(image.height, self.image_height(), "image height");

        let out_width = image.width;
        for y in 0..self.height {
            for x in 0..self.width {
                let bit_index = y * self.width + x;
                let lit = 1 & (bitmap[bit_index / 8] >> (7 - bit_index % 8)) != 0;
                let color = if lit { self.on } else { self.off };
                let base = (y * self.scale) * out_width + x * self.scale;
                for dy in 0..self.scale {
                    let row = base + dy * out_width;
                    image.pixels[row..row + self.scale].fill(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: u32 = 0x00AA_0000;
    const OFF: u32 = 0x0011_1111;

    fn decode_new(decoder: &LcdDecoder, bitmap: &[u8]) -> DisplayImage {
        let mut image = decoder.blank_image();
        decoder.decode(bitmap, &mut image);
        image
    }

    fn pixel(image: &DisplayImage, x: usize, y: usize) -> u32 {
        image.pixels()[y * image.width() + x]
    }

    #[test]
    fn every_bit_lands_on_its_own_pixel() {
        let width = 160;
        let height = 80;
        let decoder = LcdDecoder::new(width, height, 1, ON, OFF);

        let all_zero = vec![0u8; decoder.bitmap_len()];
        let all_one = vec![0xFFu8; decoder.bitmap_len()];
        let checker = vec![0xAAu8; decoder.bitmap_len()];

        for (bitmap, name) in [
            (&all_zero, "all zero"),
            (&all_one, "all one"),
            (&checker, "checkerboard"),
        ] {
            let image = decode_new(&decoder, bitmap);
            for i in 0..width * height {
                let expected = 1 & (bitmap[i / 8] >> (7 - i % 8)) != 0;
                let got = pixel(&image, i % width, i / width) == ON;
                assert_eq!(got, expected, "{name}: bit {i}");
            }
        }
    }

    #[test]
    fn scaling_replicates_each_dot_into_a_uniform_block() {
        let decoder = LcdDecoder::new(16, 8, 3, ON, OFF);
        let bitmap: Vec<u8> = (0..decoder.bitmap_len()).map(|i| i as u8).collect();
        let image = decode_new(&decoder, &bitmap);

        let mut on_pixels = 0usize;
        for y in 0..8 {
            for x in 0..16 {
                let i = y * 16 + x;
                let expected = if 1 & (bitmap[i / 8] >> (7 - i % 8)) != 0 {
                    ON
                } else {
                    OFF
                };
                for dy in 0..3 {
                    for dx in 0..3 {
                        let got = pixel(&image, x * 3 + dx, y * 3 + dy);
                        assert_eq!(got, expected, "block for dot ({x},{y}) is not uniform");
                        if got == ON {
                            on_pixels += 1;
                        }
                    }
                }
            }
        }
        let lit_dots: usize = bitmap.iter().map(|b| b.count_ones() as usize).sum();
        assert_eq!(on_pixels, lit_dots * 9, "every dot must produce 3x3 pixels");
        assert_eq!(image.pixels().len(), 16 * 8 * 9, "no output pixel unaccounted");
    }

    #[test]
    fn first_bit_fills_the_top_left_block_at_scale_two() {
        let decoder = LcdDecoder::new(160, 80, 2, ON, OFF);
        let mut bitmap = vec![0u8; decoder.bitmap_len()];
        bitmap[0] = 0x80;
        let image = decode_new(&decoder, &bitmap);

        for y in 0..image.height() {
            for x in 0..image.width() {
                let expected = if x < 2 && y < 2 { ON } else { OFF };
                assert_eq!(pixel(&image, x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn decode_overwrites_the_previous_frame_completely() {
        let decoder = LcdDecoder::new(16, 8, 2, ON, OFF);
        let mut image = decoder.blank_image();
        decoder.decode(&vec![0xFFu8; decoder.bitmap_len()], &mut image);
        decoder.decode(&vec![0x00u8; decoder.bitmap_len()], &mut image);
        assert!(
            image.pixels().iter().all(|&p| p == OFF),
            "stale lit pixels survived a blank frame"
        );
    }

    #[test]
    #[should_panic(expected = "packed buffer length")]
    fn decode_rejects_a_wrong_length_bitmap() {
        let decoder = LcdDecoder::new(160, 80, 2, ON, OFF);
        let mut image = decoder.blank_image();
        decoder.decode(&[0u8; 7], &mut image);
    }
}
