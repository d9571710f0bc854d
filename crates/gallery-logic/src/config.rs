//! Gallery configuration and data file loading.
//!
//! The constants in [`crate::constants`] are the defaults; a JSON config
//! may override any subset of them. Artwork lists and statue catalogs are
//! plain JSON arrays.
//!
//! ```json
//! { "image_base_url": "images/", "layout": { "spacing": 4.0 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::frames::MIN_SPACING;
use crate::constants::IMAGE_BASE_URL;
use crate::decor::DecorParams;
use crate::error::GalleryError;
use crate::geometry::{validate_layout_params, Severity, ValidationError};
use crate::layout::{ArtworkMeta, LayoutParams};
use crate::statue::{StatueAsset, StatueParams};
use crate::walls::WallParams;

/// Everything the layout pass and emitter can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub image_base_url: String,
    pub walls: WallParams,
    pub layout: LayoutParams,
    pub decor: DecorParams,
    pub statues: StatueParams,
    /// Statue models, cycled over the sections. Empty means no statues.
    pub catalog: Vec<StatueAsset>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_base_url: IMAGE_BASE_URL.to_string(),
            walls: WallParams::default(),
            layout: LayoutParams::default(),
            decor: DecorParams::default(),
            statues: StatueParams::default(),
            catalog: Vec::new(),
        }
    }
}

impl GalleryConfig {
    pub fn with_catalog(mut self, catalog: Vec<StatueAsset>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, GalleryError> {
        let config: GalleryConfig = serde_json::from_str(json)?;
        config.into_checked()
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GalleryError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    /// Collect every problem with this config. Warnings do not block
    /// loading; errors do.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut all = validate_layout_params(&self.layout);
        all.extend(validate_wall_params(&self.walls));
        all.extend(validate_decor_params(&self.decor));
        all.extend(validate_statue_params(&self.statues));
        all.extend(validate_catalog(&self.catalog));
        all
    }

    fn into_checked(self) -> Result<Self, GalleryError> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter_map(|e| match e.severity {
                Severity::Error => Some(format!("[{}] {}", e.category, e.message)),
                Severity::Warning => {
                    log::warn!("config [{}] {}", e.category, e.message);
                    None
                }
            })
            .collect();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(GalleryError::InvalidConfig(errors))
        }
    }
}

fn read(path: &Path) -> Result<String, GalleryError> {
    fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

pub fn validate_wall_params(params: &WallParams) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if params.height <= 0.0 {
        errors.push(invalid(
            "walls",
            format!("height must be positive, got {}", params.height),
        ));
    }
    if params.thickness <= 0.0 {
        errors.push(invalid(
            "walls",
            format!("thickness must be positive, got {}", params.thickness),
        ));
    }
    if params.min_clearance < 0.0 {
        errors.push(invalid(
            "walls",
            format!("min_clearance must not be negative, got {}", params.min_clearance),
        ));
    }
    errors
}

pub fn validate_decor_params(params: &DecorParams) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if params.sconce_spacing.is_nan() || params.sconce_spacing < MIN_SPACING {
        errors.push(invalid(
            "decor",
            format!(
                "sconce_spacing must be at least {MIN_SPACING}, got {}",
                params.sconce_spacing
            ),
        ));
    }
    if params.sconce_margin < 0.0 {
        errors.push(invalid(
            "decor",
            format!("sconce_margin must not be negative, got {}", params.sconce_margin),
        ));
    }
    if params.baseboard_height < 0.0 || params.crown_height < 0.0 {
        errors.push(invalid(
            "decor",
            format!(
                "trim heights must not be negative, got {} and {}",
                params.baseboard_height, params.crown_height
            ),
        ));
    }
    errors
}

pub fn validate_statue_params(params: &StatueParams) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if params.plinth_height <= 0.0 || params.plinth_size <= 0.0 {
        errors.push(invalid(
            "statues",
            format!(
                "plinth must have positive size, got {}×{}",
                params.plinth_size, params.plinth_height
            ),
        ));
    }
    if params.fallback_size <= 0.0 {
        errors.push(invalid(
            "statues",
            format!("fallback_size must be positive, got {}", params.fallback_size),
        ));
    }
    errors
}

pub fn validate_catalog(catalog: &[StatueAsset]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, asset) in catalog.iter().enumerate() {
        if asset.model_file.is_empty() {
            errors.push(invalid(
                "catalog",
                format!("entry #{i} has no model_file"),
            ));
        }
        if asset.scale <= 0.0 {
            errors.push(invalid(
                "catalog",
                format!("entry #{i} ({}) has non-positive scale {}", asset.model_file, asset.scale),
            ));
        }
    }
    errors
}

/// Parse a JSON array of `{file, title?, author?}`.
pub fn parse_artworks(json: &str) -> Result<Vec<ArtworkMeta>, GalleryError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_artworks(path: impl AsRef<Path>) -> Result<Vec<ArtworkMeta>, GalleryError> {
    parse_artworks(&read(path.as_ref())?)
}

/// Parse and validate a JSON array of statue catalog entries.
pub fn parse_catalog(json: &str) -> Result<Vec<StatueAsset>, GalleryError> {
    let catalog: Vec<StatueAsset> = serde_json::from_str(json)?;
    let errors = validate_catalog(&catalog);
    if errors.is_empty() {
        Ok(catalog)
    } else {
        Err(GalleryError::InvalidConfig(
            errors.into_iter().map(|e| e.message).collect(),
        ))
    }
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<StatueAsset>, GalleryError> {
    parse_catalog(&read(path.as_ref())?)
}
