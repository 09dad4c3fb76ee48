//! Saving the scene as a picture.
//!
//! The engine asks for a snapshot through [`Camera::capture`]; egui only
//! delivers the frame a few frames later as an [`egui::Event::Screenshot`],
//! so the request is remembered until [`ScreenshotCamera::collect`] sees it.

use std::path::{Path, PathBuf};

use card::scene::{Camera, CaptureError};
use egui::{ColorImage, Rect};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot of {0}x{1} pixels is too large")]
    TooLarge(usize, usize),

    #[error("pixel buffer doesn't match {0}x{1}")]
    Buffer(u32, u32),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Writes `image` as a PNG file at `path`.
///
/// # Errors
/// Fails if the image can't be encoded or written.
pub fn save_png(image: &ColorImage, path: &Path) -> Result<(), SnapshotError> {
    let [width, height] = image.size;
    let too_large = || SnapshotError::TooLarge(width, height);
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;

    let bytes = image
        .pixels
        .iter()
        .flat_map(|pixel| pixel.to_srgba_unmultiplied())
        .collect::<Vec<_>>();
    let rgba = image::RgbaImage::from_raw(width, height, bytes)
        .ok_or(SnapshotError::Buffer(width, height))?;

    rgba.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// [`Camera`] backed by egui viewport screenshots.
pub struct ScreenshotCamera {
    ctx: egui::Context,
    output_dir: PathBuf,
    pending: Option<String>,
}

impl ScreenshotCamera {
    #[must_use]
    pub const fn new(ctx: egui::Context, output_dir: PathBuf) -> Self {
        Self {
            ctx,
            output_dir,
            pending: None,
        }
    }

    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.png"))
    }

    /// Saves a requested screenshot once egui delivered it, cropped to
    /// `region` (in points).
    pub fn collect(&mut self, region: Rect) {
        if self.pending.is_none() {
            return;
        }

        let screenshot = self.ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        let Some(name) = self.pending.take() else {
            return;
        };

        let picture = screenshot.region(&region, Some(self.ctx.pixels_per_point()));
        let path = self.path_for(&name);
        match save_png(&picture, &path) {
            Ok(()) => tracing::info!("saved snapshot to {}", path.display()),
            Err(e) => tracing::warn!("failed to capture screenshot: {e}"),
        }
    }
}

impl Camera for ScreenshotCamera {
    fn capture(&mut self, name: &str) -> Result<(), CaptureError> {
        if !self.output_dir.is_dir() {
            return Err(CaptureError::Unavailable(format!(
                "{} is not a directory",
                self.output_dir.display()
            )));
        }

        if let Some(previous) = self.pending.replace(name.to_owned()) {
            tracing::debug!("snapshot `{previous}` superseded by `{name}`");
        }
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_png() {
        let image = ColorImage::from_rgba_unmultiplied([4, 2], &[200_u8, 10, 10, 255].repeat(8));
        let path = std::env::temp_dir().join("haunted-card-snapshot-test.png");

        save_png(&image, &path).unwrap();

        let read = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read.dimensions(), (4, 2));
        assert_eq!(read.get_pixel(3, 1).0, [200, 10, 10, 255]);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let image = ColorImage::from_rgba_unmultiplied([1, 1], &[0, 0, 0, 255]);
        let path = Path::new("/definitely/not/here/card.png");

        assert!(matches!(save_png(&image, path), Err(SnapshotError::Image(_))));
    }

    #[test]
    fn capture_needs_an_output_directory() {
        let mut camera = ScreenshotCamera::new(
            egui::Context::default(),
            PathBuf::from("/definitely/not/here"),
        );

        assert!(matches!(
            camera.capture("birthday_card"),
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[test]
    fn snapshot_file_name() {
        let camera = ScreenshotCamera::new(egui::Context::default(), PathBuf::from("out"));
        assert_eq!(
            camera.path_for("birthday_card"),
            PathBuf::from("out/birthday_card.png")
        );
    }
}
