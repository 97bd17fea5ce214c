//! Telling full screenshots apart from the thumbnails the OS writes next to
//! them.

use super::ScreenshotEvent;
use image::{ImageError, ImageReader};
use std::path::Path;

pub const MIN_WIDTH: u32 = 800;
pub const MIN_HEIGHT: u32 = 600;

/// Both dimensions must be strictly above the threshold.
pub fn is_screenshot_size(width: u32, height: u32) -> bool {
    width > MIN_WIDTH && height > MIN_HEIGHT
}

/// Format comes from the file content, so extensionless or misnamed captures
/// still count.
fn dimensions(path: &Path) -> Result<(u32, u32), ImageError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.into_dimensions()?)
}

/// Reads the image header of `path`. Anything that can't be read as an image
/// is not a screenshot.
pub fn check(path: &Path) -> Option<ScreenshotEvent> {
    let (width, height) = match dimensions(path) {
        Ok(dimensions) => dimensions,
        Err(e) => {
            log::warn!("Error checking image resolution of {}: {}", path.display(), e);
            return None;
        }
    };

    if !is_screenshot_size(width, height) {
        log::debug!(
            "Ignoring {} ({}x{}), below screenshot size",
            path.display(),
            width,
            height
        );
        return None;
    }

    Some(ScreenshotEvent {
        path: path.to_path_buf(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::fs;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([30, 30, 30]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_screenshot_size(800, 600));
        assert!(!is_screenshot_size(801, 600));
        assert!(!is_screenshot_size(800, 601));
        assert!(is_screenshot_size(801, 601));
        assert!(is_screenshot_size(1920, 1080));
        assert!(!is_screenshot_size(4000, 200));
    }

    #[test]
    fn accepts_full_size_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "Screenshot 1.png", 1024, 768);

        let event = check(&path).expect("full screenshot accepted");
        assert_eq!(event.path, path);
        assert_eq!((event.width, event.height), (1024, 768));
    }

    #[test]
    fn rejects_thumbnail_and_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let thumb = write_png(dir.path(), "thumb.png", 320, 180);
        let boundary = write_png(dir.path(), "boundary.png", 800, 600);

        assert!(check(&thumb).is_none());
        assert!(check(&boundary).is_none());
    }

    #[test]
    fn format_is_sniffed_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let capture = RgbImage::from_pixel(1280, 800, Rgb([30, 30, 30]));
        let no_extension = dir.path().join("Screenshot_2024");
        let misnamed = dir.path().join("shot.jpg");
        capture.save_with_format(&no_extension, ImageFormat::Png).unwrap();
        capture.save_with_format(&misnamed, ImageFormat::Png).unwrap();

        let event = check(&no_extension).expect("extensionless capture accepted");
        assert_eq!((event.width, event.height), (1280, 800));
        assert!(check(&misnamed).is_some());
    }

    #[test]
    fn rejects_undecodable_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("corrupt.png");
        fs::write(&corrupt, b"definitely not a png").unwrap();
        let links = dir.path().join("catbox_links.txt");
        fs::write(&links, "https://files.catbox.moe/abc123.png\n").unwrap();

        assert!(check(&corrupt).is_none());
        assert!(check(&links).is_none());
        assert!(check(&dir.path().join("gone.png")).is_none());
    }
}
