//! Capturing rendered frames as images.

use std::path::Path;

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};

/// Bytes per row of a texture copy, padded to wgpu's copy alignment.
pub fn aligned_bytes_per_row(width: u32) -> u32 {
    let unaligned = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unaligned.div_ceil(align) * align
}

/// Builds an RGBA image from padded texture rows.
///
/// `data` holds `height` rows of `bytes_per_row` bytes in `format`, which
/// must be a 4-byte RGBA or BGRA format.
pub fn image_from_rows(
    data: &[u8],
    width: u32,
    height: u32,
    bytes_per_row: u32,
    format: wgpu::TextureFormat,
) -> RenderResult<RgbaImage> {
    let swap_red_blue = match format {
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
        other => return Err(RenderError::UnsupportedCaptureFormat(other)),
    };

    let row_bytes = width as usize * 4;
    let stride = bytes_per_row as usize;
    if stride < row_bytes || data.len() < stride * height as usize {
        return Err(RenderError::InvalidImageData);
    }

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }
    if swap_red_blue {
        for pixel in pixels.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }

    RgbaImage::from_raw(width, height, pixels).ok_or(RenderError::InvalidImageData)
}

/// Writes `image` as a PNG file.
pub fn save_png(path: impl AsRef<Path>, image: &RgbaImage) -> RenderResult<()> {
    let path = path.as_ref();
    image.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("saved image {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_alignment() {
        assert_eq!(aligned_bytes_per_row(64), 256);
        assert_eq!(aligned_bytes_per_row(65), 512);
        assert_eq!(aligned_bytes_per_row(1), 256);
    }

    #[test]
    fn test_padding_is_dropped_and_bgra_swapped() {
        let stride = aligned_bytes_per_row(2);
        let mut data = vec![0u8; stride as usize * 2];
        // Row 0: blue pixel, then red pixel, in BGRA order.
        data[..8].copy_from_slice(&[255, 0, 0, 255, 0, 0, 255, 255]);
        // Row 1: green pixel, then white.
        let row1 = stride as usize;
        data[row1..row1 + 8].copy_from_slice(&[0, 255, 0, 255, 255, 255, 255, 255]);

        let image =
            image_from_rows(&data, 2, 2, stride, wgpu::TextureFormat::Bgra8Unorm).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 255, 0, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rgba_kept_as_is() {
        let stride = aligned_bytes_per_row(1);
        let mut data = vec![0u8; stride as usize];
        data[..4].copy_from_slice(&[10, 20, 30, 255]);
        let image =
            image_from_rows(&data, 1, 1, stride, wgpu::TextureFormat::Rgba8Unorm).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_short_or_unsupported_data_rejected() {
        let stride = aligned_bytes_per_row(4);
        let data = vec![0u8; stride as usize];
        assert!(matches!(
            image_from_rows(&data, 4, 2, stride, wgpu::TextureFormat::Rgba8Unorm),
            Err(RenderError::InvalidImageData)
        ));
        assert!(matches!(
            image_from_rows(&data, 4, 1, stride, wgpu::TextureFormat::Rgba16Float),
            Err(RenderError::UnsupportedCaptureFormat(_))
        ));
    }

    #[test]
    fn test_save_png() {
        let path =
            std::env::temp_dir().join(format!("eitview_capture_{}.png", std::process::id()));
        let image = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        save_png(&path, &image).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, image);
        std::fs::remove_file(&path).ok();
    }
}
