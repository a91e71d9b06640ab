// THEORY:
// Conversions between `image` buffers and the arrays the fill operates on. A decoded
// image becomes an `(H, W, C)` field in `f32` with its own channel count preserved
// (luma, luma+alpha, RGB or RGBA) and values scaled to [0, 1]. A grown 2D mask can be
// turned back into a black/white image for inspection. No files are touched here;
// decoding and saving stay with the caller.

use crate::core_modules::error::FillError;
use image::{DynamicImage, GrayImage, Luma};
use ndarray::{Array3, ArrayView2};

/// Converts an image into an `(H, W, C)` field with values in [0, 1].
pub fn field_from_image(image: &DynamicImage) -> Result<Array3<f32>, FillError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (channels, raw) = match image.color().channel_count() {
        1 => (1, image.to_luma32f().into_raw()),
        2 => (2, image.to_luma_alpha32f().into_raw()),
        3 => (3, image.to_rgb32f().into_raw()),
        _ => (4, image.to_rgba32f().into_raw()),
    };
    Ok(Array3::from_shape_vec((height, width, channels), raw)?)
}

/// Renders a 2D mask as white (member) on black.
pub fn mask_to_image(mask: ArrayView2<'_, bool>) -> GrayImage {
    let (height, width) = mask.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        if mask[[y as usize, x as usize]] {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{ImageBuffer, Rgb};
    use ndarray::Array2;

    #[test]
    fn rgb_image_keeps_three_channels() {
        let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(4, 2, |x, _y| if x == 3 { Rgb([255, 0, 51]) } else { Rgb([0, 0, 0]) });
        let field = field_from_image(&DynamicImage::ImageRgb8(buffer)).unwrap();
        assert_eq!(field.dim(), (2, 4, 3));
        assert_relative_eq!(field[[1, 3, 0]], 1.0);
        assert_relative_eq!(field[[1, 3, 2]], 0.2);
        assert_relative_eq!(field[[0, 0, 0]], 0.0);
    }

    #[test]
    fn grayscale_image_has_one_channel() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 5, Luma([128])));
        let field = field_from_image(&image).unwrap();
        assert_eq!(field.dim(), (5, 3, 1));
    }

    #[test]
    fn mask_renders_row_major() {
        let mut mask = Array2::from_elem((2, 3), false);
        mask[[1, 2]] = true;
        let image = mask_to_image(mask.view());
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Luma([255]));
        assert_eq!(image.get_pixel(0, 0), &Luma([0]));
    }
}
