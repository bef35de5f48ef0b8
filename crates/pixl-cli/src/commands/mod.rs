//! CLI command implementations

pub mod apply;
pub mod edit;
pub mod info;

use anyhow::{Context, Result};
use pixl_core::PixelBuffer;
use pixl_edit::{EditController, EditorConfig};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    pixl_io::read_png(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    pixl_io::write_png(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Editor config from an optional RON file, with command-line flags on top.
pub fn load_config(path: Option<&Path>, threads: Option<usize>) -> Result<EditorConfig> {
    let mut config = match path {
        Some(path) => EditorConfig::from_ron_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if let Some(threads) = threads {
        config.threads = threads;
    }
    Ok(config)
}

/// Export whatever the editor currently displays.
pub fn save_displayed(path: &Path, editor: &EditController) -> Result<()> {
    let image = editor.displayed().context("No image loaded")?;
    save_image(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixl_edit::ResultOrdering;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");
        std::fs::write(&path, "(threads: 3, ordering: Arrival)").unwrap();

        let config = load_config(Some(&path), Some(1)).unwrap();
        assert_eq!(config.threads, 1);
        assert_eq!(config.ordering, ResultOrdering::Arrival);

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.threads, 3);
    }

    #[test]
    fn test_missing_config_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/editor.ron")), None).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
