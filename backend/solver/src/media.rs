//! Question image loading.

use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// MIME type for a question image, by extension. Unknown extensions fall
/// back to PNG.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "heic"         => "image/heic",
        "tiff" | "tif" => "image/tiff",
        _              => "image/png",
    }
}

/// Reads an image file and returns its MIME type and base64 payload, ready
/// for a solve request.
pub fn load_image(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok((image_mime_type(path).to_string(), STANDARD.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_jpeg() {
        assert_eq!(image_mime_type(&PathBuf::from("homework.JPG")), "image/jpeg");
    }

    #[test]
    fn detects_webp() {
        assert_eq!(image_mime_type(&PathBuf::from("scan.webp")), "image/webp");
    }

    #[test]
    fn unknown_extension_falls_back_to_png() {
        assert_eq!(image_mime_type(&PathBuf::from("capture.xyz")), "image/png");
        assert_eq!(image_mime_type(&PathBuf::from("no_extension")), "image/png");
    }

    #[test]
    fn load_image_encodes_bytes() {
        let path = std::env::temp_dir().join(format!("tutorforge-media-{}.png", std::process::id()));
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let (mime, data) = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(mime, "image/png");
        assert_eq!(data, "AQID");
    }

    #[test]
    fn load_image_missing_file_is_an_error() {
        let err = load_image(Path::new("/nonexistent/question.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read image"));
    }
}
