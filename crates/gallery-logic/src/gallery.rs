//! The full synchronous layout pass.
//!
//! `walls → sections → artwork layout → decor → statue requests`, all from
//! one [`FloorPlan`] value so walls and sections agree on every divider.
//! The result is plain data; nothing here touches a renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::image_url;
use crate::config::{validate_decor_params, GalleryConfig};
use crate::decor::{decorate_walls, Decor};
use crate::error::GalleryError;
use crate::floor_plan::FloorPlan;
use crate::geometry::{validate_layout_params, Severity, ValidationError};
use crate::layout::{layout_artworks, ArtworkMeta, LayoutReport};
use crate::sections::{partition_floor_plan, SectionRect};
use crate::statue::{statue_requests, StatueRequest};
use crate::walls::{build_floor_plan_walls, WallSet};

/// A generated gallery: every placement decided, nothing rendered.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub plan: FloorPlan,
    pub config: GalleryConfig,
    pub artworks: Vec<ArtworkMeta>,
    pub walls: WallSet,
    pub sections: Vec<SectionRect>,
    pub layout: LayoutReport,
    pub decor: Decor,
    pub statues: Vec<StatueRequest>,
}

/// Counts describing a generated gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySummary {
    pub rooms: usize,
    pub segments: usize,
    pub sections: usize,
    pub artworks: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub blocked_slots: usize,
    pub trims: usize,
    pub sconces: usize,
    pub statues: usize,
}

impl fmt::Display for GallerySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rooms, {} wall segments, {} sections | {}/{} artworks hung ({} unplaced, {} corner slots skipped) | {} trims, {} sconces, {} statues",
            self.rooms,
            self.segments,
            self.sections,
            self.placed,
            self.artworks,
            self.unplaced,
            self.blocked_slots,
            self.trims,
            self.sconces,
            self.statues
        )
    }
}

impl Gallery {
    /// Run the layout pass. Same inputs, same gallery.
    ///
    /// A config built in code skips [`GalleryConfig::load`]'s checks, so the
    /// layout and decor parameters are re-validated here. A pass whose
    /// parameters have errors is skipped: no frames (every artwork counts as
    /// unplaced) or no decor.
    pub fn generate(plan: FloorPlan, artworks: Vec<ArtworkMeta>, config: GalleryConfig) -> Self {
        let walls = build_floor_plan_walls(&plan, &config.walls);
        let sections = partition_floor_plan(&plan);
        let face_offset = config.walls.face_offset();
        let layout = if usable("layout", validate_layout_params(&config.layout)) {
            layout_artworks(&walls.segments, &artworks, &config.layout, face_offset)
        } else {
            LayoutReport {
                unplaced: artworks.len(),
                ..LayoutReport::default()
            }
        };
        let decor = if usable("decor", validate_decor_params(&config.decor)) {
            decorate_walls(
                &walls.segments,
                face_offset,
                config.walls.height,
                &config.decor,
            )
        } else {
            Decor::default()
        };
        let statues = statue_requests(&sections, &config.catalog);

        let gallery = Self {
            plan,
            config,
            artworks,
            walls,
            sections,
            layout,
            decor,
            statues,
        };
        log::info!("Generated gallery: {}", gallery.summary());
        gallery
    }

    pub fn image_url(&self, artwork: &ArtworkMeta) -> String {
        image_url(&self.config.image_base_url, &artwork.file)
    }

    pub fn summary(&self) -> GallerySummary {
        GallerySummary {
            rooms: self.plan.rooms.len(),
            segments: self.walls.len(),
            sections: self.sections.len(),
            artworks: self.artworks.len(),
            placed: self.layout.placed(),
            unplaced: self.layout.unplaced,
            blocked_slots: self.layout.blocked_slots,
            trims: self.decor.trims.len(),
            sconces: self.decor.sconces.len(),
            statues: self.statues.len(),
        }
    }

    /// Every `(position, yaw)` pair the pass decided, in emit order:
    /// frames, trims, sconces, then statue anchors.
    pub fn poses(&self) -> Vec<([f32; 3], f32)> {
        let frames = self
            .layout
            .placements
            .iter()
            .map(|p| ([p.position.x, p.position.y, p.position.z], p.yaw));
        let trims = self
            .decor
            .trims
            .iter()
            .map(|t| ([t.center.x, t.center.y, t.center.z], t.yaw));
        let sconces = self
            .decor
            .sconces
            .iter()
            .map(|s| ([s.position.x, s.position.y, s.position.z], s.yaw));
        let statues = self
            .statues
            .iter()
            .map(|r| ([r.anchor.x, 0.0, r.anchor.z], 0.0));
        frames.chain(trims).chain(sconces).chain(statues).collect()
    }

    /// Byte encoding of [`Gallery::poses`] plus the wall segments. Two
    /// runs with the same inputs produce identical bytes.
    pub fn fingerprint(&self) -> Result<Vec<u8>, GalleryError> {
        Ok(bincode::serialize(&(&self.walls.segments, self.poses()))?)
    }
}

/// Log every problem; true when none is an error.
fn usable(pass: &str, problems: Vec<ValidationError>) -> bool {
    let mut ok = true;
    for p in problems {
        match p.severity {
            Severity::Error => {
                log::error!("Skipping {pass} pass: [{}] {}", p.category, p.message);
                ok = false;
            }
            Severity::Warning => log::warn!("[{}] {}", p.category, p.message),
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statue::StatueAsset;

    fn make_artworks(n: usize) -> Vec<ArtworkMeta> {
        (0..n)
            .map(|i| ArtworkMeta::new(format!("art_{i}.jpg")))
            .collect()
    }

    fn make_catalog() -> Vec<StatueAsset> {
        ["venus", "discobolus"]
            .iter()
            .map(|name| StatueAsset {
                base_path: format!("models/{name}"),
                model_file: format!("{name}.glb"),
                material_file: format!("{name}.png"),
                scale: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_museum_counts() {
        let config = GalleryConfig::default().with_catalog(make_catalog());
        let gallery = Gallery::generate(FloorPlan::museum(), make_artworks(10), config);
        let s = gallery.summary();
        assert_eq!(s.rooms, 3);
        assert_eq!(s.segments, 20);
        assert_eq!(s.sections, 8);
        assert_eq!(s.placed, 10);
        assert_eq!(s.unplaced, 0);
        assert_eq!(s.trims, 40);
        assert_eq!(s.statues, 8);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = Gallery::generate(FloorPlan::museum(), make_artworks(30), GalleryConfig::default());
        let b = Gallery::generate(FloorPlan::museum(), make_artworks(30), GalleryConfig::default());
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_fingerprint_changes_with_params() {
        let a = Gallery::generate(FloorPlan::museum(), make_artworks(30), GalleryConfig::default());
        let mut config = GalleryConfig::default();
        config.layout.spacing = 4.0;
        let b = Gallery::generate(FloorPlan::museum(), make_artworks(30), config);
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_no_catalog_no_statues() {
        let gallery = Gallery::generate(FloorPlan::museum(), make_artworks(3), GalleryConfig::default());
        assert!(gallery.statues.is_empty());
        assert_eq!(gallery.sections.len(), 8);
    }

    #[test]
    fn test_vanishing_spacing_skips_layout() {
        let mut config = GalleryConfig::default();
        config.layout.frame_width = 1e-6;
        config.layout.spacing = 1e-6;
        config.decor.sconce_spacing = 1e-6;
        let gallery = Gallery::generate(FloorPlan::museum(), make_artworks(5), config);
        assert!(gallery.layout.placements.is_empty());
        assert_eq!(gallery.layout.unplaced, 5);
        assert!(gallery.decor.sconces.is_empty());
        assert!(gallery.decor.trims.is_empty());
        // walls and sections do not depend on these parameters
        assert_eq!(gallery.walls.len(), 20);
        assert_eq!(gallery.sections.len(), 8);
    }

    #[test]
    fn test_image_url() {
        let gallery = Gallery::generate(FloorPlan::museum(), make_artworks(1), GalleryConfig::default());
        assert_eq!(gallery.image_url(&gallery.artworks[0]), "images/art_0.jpg");
    }
}
