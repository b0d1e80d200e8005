//! Wireframe image loading. Sources are either embedded
//! `data:image/...;base64,` URIs or paths relative to the working directory.
//! Failures surface as `AssetError`; the builder logs and omits the block.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::models::WireframeRef;

use super::AssetError;

/// Load and validate a wireframe image, returning raw encoded bytes that
/// `image::load_from_memory` accepts.
pub fn load_wireframe(reference: &WireframeRef) -> Result<Vec<u8>, AssetError> {
    let bytes = if reference.is_data_uri() {
        decode_data_uri(&reference.source)?
    } else if looks_like_relative_path(&reference.source) {
        std::fs::read(&reference.source).map_err(|e| AssetError::Read {
            path: reference.source.clone(),
            reason: e.to_string(),
        })?
    } else {
        return Err(AssetError::UnsupportedSource(reference.source.clone()));
    };

    // Validate up front so the serializers never meet undecodable bytes.
    image::load_from_memory(&bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
    Ok(bytes)
}

fn decode_data_uri(source: &str) -> Result<Vec<u8>, AssetError> {
    let payload = source
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| AssetError::UnsupportedSource(source.chars().take(40).collect()))?;
    STANDARD
        .decode(payload.trim())
        .map_err(|e| AssetError::Base64(e.to_string()))
}

/// Absolute paths and parent traversals are rejected: references come from
/// client payloads and must stay inside the working directory.
fn looks_like_relative_path(source: &str) -> bool {
    let path = std::path::Path::new(source);
    !path.is_absolute() && !source.split(['/', '\\']).any(|seg| seg == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([200, 200, 200]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn data_uri_round_trips() {
        let png = tiny_png();
        let reference = WireframeRef {
            title: "Pantalla".into(),
            source: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        };
        assert_eq!(load_wireframe(&reference).unwrap(), png);
    }

    #[test]
    fn relative_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wf.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let reference = WireframeRef {
            title: String::new(),
            source: "wf.png".into(),
        };
        let result = load_wireframe(&reference);
        std::env::set_current_dir(cwd).unwrap();
        result.unwrap();
    }

    #[test]
    fn traversal_and_absolute_paths_are_rejected() {
        for source in ["../secrets.png", "/etc/passwd"] {
            let reference = WireframeRef {
                title: String::new(),
                source: source.into(),
            };
            assert!(matches!(
                load_wireframe(&reference),
                Err(AssetError::UnsupportedSource(_))
            ));
        }
    }

    #[test]
    fn garbage_base64_is_an_error() {
        let reference = WireframeRef {
            title: String::new(),
            source: "data:image/png;base64,@@no@@".into(),
        };
        assert!(matches!(
            load_wireframe(&reference),
            Err(AssetError::Base64(_))
        ));
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        let reference = WireframeRef {
            title: String::new(),
            source: format!("data:image/png;base64,{}", STANDARD.encode(b"not an image")),
        };
        assert!(matches!(
            load_wireframe(&reference),
            Err(AssetError::Decode(_))
        ));
    }
}
