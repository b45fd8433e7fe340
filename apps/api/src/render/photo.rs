//! Photo handling: circular avatar cropping and fallback resolution.
//!
//! The crop is the one deterministic image-processing algorithm in the
//! system: center-crop to a square on the shorter dimension, resize to a
//! fixed resolution, mask the corners to a circle. Output is always square,
//! independent of the source format or aspect ratio.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, warn};

/// Filename of the bundled fallback avatar inside the assets directory.
pub const DEFAULT_PHOTO: &str = "default_photo.png";

/// Center-crops `img` to a square, resizes to `size_px`, and applies an
/// anti-aliased circular alpha mask.
pub fn crop_to_circle(img: &DynamicImage, size_px: u32) -> RgbaImage {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let side = w.min(h);
    let cropped = imageops::crop_imm(&rgba, (w - side) / 2, (h - side) / 2, side, side).to_image();
    let mut out = imageops::resize(&cropped, size_px, size_px, FilterType::Lanczos3);

    let center = size_px as f32 / 2.0;
    let radius = center;
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let dist = (dx * dx + dy * dy).sqrt();
        // 1 px anti-aliased edge; fully opaque inside, transparent outside.
        let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
        pixel.0[3] = (pixel.0[3] as f32 * coverage).round() as u8;
    }
    out
}

/// Resolves the photo for a render: the referenced path if readable, else
/// the bundled default, else `None` (text-only header). Missing or broken
/// images are recovered locally and never surfaced as errors.
pub fn resolve_photo(
    photo: Option<&str>,
    base_dir: &Path,
    assets_dir: &Path,
) -> Option<DynamicImage> {
    if let Some(raw) = photo.map(str::trim).filter(|p| !p.is_empty()) {
        let path = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            base_dir.join(raw)
        };
        match image::open(&path) {
            Ok(img) => return Some(img),
            Err(e) => warn!(
                "Photo {} unreadable ({e}); falling back to default",
                path.display()
            ),
        }
    }

    let default = assets_dir.join(DEFAULT_PHOTO);
    match image::open(&default) {
        Ok(img) => Some(img),
        Err(e) => {
            debug!(
                "Default photo {} unavailable ({e}); rendering text-only header",
                default.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 40, 40, 255])))
    }

    #[test]
    fn test_output_is_square_for_wide_source() {
        let out = crop_to_circle(&solid(300, 120), 400);
        assert_eq!(out.dimensions(), (400, 400));
    }

    #[test]
    fn test_output_is_square_for_tall_source() {
        let out = crop_to_circle(&solid(90, 400), 400);
        assert_eq!(out.dimensions(), (400, 400));
    }

    #[test]
    fn test_output_is_square_for_square_source() {
        let out = crop_to_circle(&solid(64, 64), 400);
        assert_eq!(out.dimensions(), (400, 400));
    }

    #[test]
    fn test_corners_transparent_center_opaque() {
        let out = crop_to_circle(&solid(200, 200), 400);
        assert_eq!(out.get_pixel(0, 0).0[3], 0, "corner must be masked out");
        assert_eq!(out.get_pixel(399, 0).0[3], 0);
        assert_eq!(out.get_pixel(0, 399).0[3], 0);
        assert_eq!(out.get_pixel(399, 399).0[3], 0);
        assert_eq!(out.get_pixel(200, 200).0[3], 255, "center stays opaque");
    }

    #[test]
    fn test_color_preserved_inside_circle() {
        let out = crop_to_circle(&solid(200, 200), 400);
        let p = out.get_pixel(200, 200);
        assert_eq!((p.0[0], p.0[1], p.0[2]), (200, 40, 40));
    }

    #[test]
    fn test_resolve_missing_path_and_missing_default_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_photo(Some("nope.jpg"), dir.path(), dir.path());
        assert!(resolved.is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let default = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        default.save(dir.path().join(DEFAULT_PHOTO)).unwrap();

        let resolved = resolve_photo(Some("missing.jpg"), dir.path(), dir.path());
        assert!(resolved.is_some(), "unreadable photo recovers via default");
    }

    #[test]
    fn test_resolve_prefers_referenced_photo() {
        let dir = tempfile::tempdir().unwrap();
        let photo = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));
        photo.save(dir.path().join("me.png")).unwrap();
        let default = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        default.save(dir.path().join(DEFAULT_PHOTO)).unwrap();

        let resolved = resolve_photo(Some("me.png"), dir.path(), dir.path()).unwrap();
        assert_eq!(resolved.to_rgba8().dimensions(), (8, 8));
    }

    #[test]
    fn test_resolve_none_path_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let default = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        default.save(dir.path().join(DEFAULT_PHOTO)).unwrap();

        assert!(resolve_photo(None, dir.path(), dir.path()).is_some());
    }
}
