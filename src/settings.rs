//! Viewer settings loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable settings files.

use crate::raster::{FacingRatioShader, FitMode, FrontFace, Pixel, RasterCamera};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for settings loading
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        SettingsError::SerializeError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Everything the viewer persists between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub camera: RasterCamera,
    pub front_face: FrontFace,
    pub shader: FacingRatioShader,
    pub background: Pixel,
    pub z_near: f32,
    pub z_far: f32,
    /// Orbit speed, radians per second
    pub spin_speed: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            camera: RasterCamera::default(),
            front_face: FrontFace::Ccw,
            shader: FacingRatioShader::default(),
            background: Pixel::new(24, 24, 30),
            z_near: 1.0,
            z_far: 100.0,
            spin_speed: 0.6,
        }
    }
}

impl ViewerSettings {
    pub fn toggle_fit(&mut self) {
        self.camera.fit = match self.camera.fit {
            FitMode::Fill => FitMode::Overscan,
            FitMode::Overscan => FitMode::Fill,
        };
    }
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ViewerSettings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    let settings: ViewerSettings = ron::from_str(&contents)?;
    Ok(settings)
}

/// Save settings to a RON file
pub fn save_settings<P: AsRef<Path>>(
    settings: &ViewerSettings,
    path: P,
) -> Result<(), SettingsError> {
    let config = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(settings, config)?;
    fs::write(path, contents)?;
    Ok(())
}
