//! Pure layout logic for the procedural gallery.
//!
//! This crate contains everything that decides *where* things go in the
//! museum scene, independent of any renderer or engine. Functions take plain
//! data and return results, so the whole layout pass is unit-testable and
//! runs identically in the headless harness and in the Bevy viewer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assets`] | Per-object asset load state (pending / ready / failed) |
//! | [`config`] | `GalleryConfig`, JSON loading of config and catalogs |
//! | [`constants`] | Floor plan dimensions, frame spacing, plinth height |
//! | [`decor`] | Baseboard / crown trims and wall sconces along segments |
//! | [`emit`] | Placement emitter over the external `VisualFactory` trait |
//! | [`error`] | `GalleryError` for I/O, parse and config failures |
//! | [`floor_plan`] | Room layouts (rectangle + boundaries + dividers) |
//! | [`gallery`] | The full synchronous layout pass and its fingerprint |
//! | [`geometry`] | Rectangles, colliders, bounds, floor plan validation |
//! | [`layout`] | Artwork layout engine: slots, corner filter, cursor |
//! | [`movement`] | Player movement against wall colliders (wall-sliding) |
//! | [`sections`] | Room partitioning along divider coordinates |
//! | [`statue`] | Statue catalog, upright correction, pedestal seating |
//! | [`walls`] | Wall segment builder with doorway splitting |

pub mod assets;
pub mod config;
pub mod constants;
pub mod decor;
pub mod emit;
pub mod error;
pub mod floor_plan;
pub mod gallery;
pub mod geometry;
pub mod layout;
pub mod movement;
pub mod sections;
pub mod statue;
pub mod walls;
