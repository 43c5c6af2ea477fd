use std::{
    io,
    path::{Path, PathBuf},
};

use emath::Vec2;
use image::{Rgba, RgbaImage};

use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Io: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Canvas must not be empty, got {0}x{1}")]
    EmptyCanvas(u32, u32),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: Vec2,
    /// Size of the blank canvas used when no image is given
    pub canvas_size: [u32; 2],
    pub image_path: Option<PathBuf>,
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [800.0, 800.0].into(),
            canvas_size: [640, 480],
            image_path: None,
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::File::open(path.as_ref()) {
            Ok(f) => Ok(serde_json::from_reader(io::BufReader::new(f))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {:?}, using defaults", path.as_ref());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Opens `image_path`, or creates a blank canvas of `canvas_size`.
    pub fn load_canvas(&self) -> Result<RgbaImage, ConfigError> {
        if let Some(path) = &self.image_path {
            return Ok(image::open(path)?.to_rgba8());
        }
        let [width, height] = self.canvas_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas(width, height));
        }
        Ok(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 255, 255, 255]),
        ))
    }
}
