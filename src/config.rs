use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use tracing::{debug, warn};

const CONFIG_FILE_NAME: &str = "retouch.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_limits: ImageLimits,
    pub preview: PreviewConfig,
    pub export: ExportSettings,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        debug!(path = %path.display(), "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents)
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    pub fn effective_export(&self) -> ExportSettings {
        self.export.sanitized()
    }

    pub fn preview_max_edge(&self) -> u32 {
        self.preview.max_edge.clamp(64, 8192)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Retouch", "Retouch") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("retouch").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

/// Live preview texture sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Longest edge of the downscaled preview copy, in pixels.
    pub max_edge: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { max_edge: 1600 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub file_name: String,
    pub jpeg_quality: u8,
    /// Background for formats without an alpha channel.
    pub matte: [u8; 3],
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "image.jpg".to_string(),
            jpeg_quality: 92,
            matte: [0, 0, 0],
        }
    }
}

impl ExportSettings {
    pub fn sanitized(&self) -> Self {
        let file_name = if self.file_name.trim().is_empty() {
            Self::default().file_name
        } else {
            self.file_name.trim().to_string()
        };
        Self {
            file_name,
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
            matte: self.matte,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::parse("").expect("parse empty config");
        assert_eq!(cfg.export, ExportSettings::default());
        assert_eq!(cfg.preview_max_edge(), 1600);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = AppConfig::parse(
            r#"
            [export]
            jpeg_quality = 0
            file_name = "  "

            [preview]
            max_edge = 10
            "#,
        )
        .expect("parse partial config");
        let export = cfg.effective_export();
        assert_eq!(export.jpeg_quality, 1);
        assert_eq!(export.file_name, "image.jpg");
        assert_eq!(export.matte, [0, 0, 0]);
        assert_eq!(cfg.preview_max_edge(), 64);
        assert_eq!(cfg.effective_image_limits().image_dim, 12_000);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(AppConfig::parse("[export\nfile_name = 1").is_err());
    }
}
