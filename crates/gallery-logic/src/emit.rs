//! Placement emitter: hands a generated [`Gallery`] to a renderer.
//!
//! The emitter never decides positions. It walks the plain-data outputs of
//! the layout pass and asks a [`VisualFactory`] to create one visual per
//! item, then poses it. Statues are the exception: the factory receives a
//! [`StatueRequest`] and settles it itself once the model load finishes,
//! using [`StatueRequest::on_loaded`] or [`StatueRequest::on_failed`].

use crate::decor::{SconceSlot, TrimPiece};
use crate::gallery::Gallery;
use crate::geometry::Vec3;
use crate::layout::{facing_yaw, ArtworkMeta};
use crate::statue::StatueRequest;
use crate::walls::{WallParams, WallSegment};
use serde::{Deserialize, Serialize};

/// Simple shapes the factory can build without loading anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Cuboid { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cylinder { radius: f32, height: f32 },
    Cone { radius: f32, height: f32 },
}

impl PrimitiveKind {
    /// Vertical extent of the shape in its rest pose.
    pub fn height(&self) -> f32 {
        match *self {
            PrimitiveKind::Cuboid { height, .. } => height,
            PrimitiveKind::Sphere { radius } => radius * 2.0,
            PrimitiveKind::Cylinder { height, .. } | PrimitiveKind::Cone { height, .. } => height,
        }
    }
}

/// Translation plus rotation about +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub fn new(translation: Vec3, yaw: f32) -> Self {
        Self { translation, yaw }
    }
}

/// Box dimensions of one wall segment. `length` runs along local X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDims {
    pub length: f32,
    pub height: f32,
    pub thickness: f32,
}

impl WallDims {
    pub fn for_segment(segment: &WallSegment, params: &WallParams) -> Self {
        Self {
            length: segment.length(),
            height: params.height,
            thickness: params.thickness,
        }
    }
}

/// Renderer-side creation of visual objects.
///
/// Implemented by the Bevy viewer and by recording fakes in tests.
pub trait VisualFactory {
    type Handle;

    fn create_wall_mesh(&mut self, segment: &WallSegment, dims: WallDims) -> Self::Handle;

    /// A frame with a placeholder surface; the image at `image_url` is
    /// loaded asynchronously and replaces the placeholder when ready.
    fn create_frame(&mut self, artwork: &ArtworkMeta, image_url: &str, width: f32)
        -> Self::Handle;

    /// Start an asynchronous statue load for one section.
    fn create_statue(&mut self, request: &StatueRequest) -> Self::Handle;

    fn create_primitive(&mut self, kind: PrimitiveKind) -> Self::Handle;

    fn create_trim(&mut self, trim: &TrimPiece) -> Self::Handle;

    fn create_sconce(&mut self, sconce: &SconceSlot) -> Self::Handle;

    fn set_pose(&mut self, handle: &Self::Handle, pose: Pose);
}

/// Handles created by one emit pass, grouped by kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted<H> {
    pub walls: Vec<H>,
    pub trims: Vec<H>,
    pub sconces: Vec<H>,
    pub frames: Vec<H>,
    pub plinths: Vec<H>,
    pub statues: Vec<H>,
}

impl<H> Default for Emitted<H> {
    fn default() -> Self {
        Self {
            walls: Vec::new(),
            trims: Vec::new(),
            sconces: Vec::new(),
            frames: Vec::new(),
            plinths: Vec::new(),
            statues: Vec::new(),
        }
    }
}

impl<H> Emitted<H> {
    pub fn total(&self) -> usize {
        self.walls.len()
            + self.trims.len()
            + self.sconces.len()
            + self.frames.len()
            + self.plinths.len()
            + self.statues.len()
    }
}

/// Pose of the wall box for `segment`: centered on the wall line, half
/// the wall height up, turned so local X runs along the segment.
pub fn wall_pose(segment: &WallSegment, params: &WallParams) -> Pose {
    let (x, z) = segment.midpoint();
    Pose::new(Vec3::new(x, params.height / 2.0, z), facing_yaw(segment))
}

/// Emit every visual of `gallery` through `factory`.
pub fn emit_gallery<F: VisualFactory>(gallery: &Gallery, factory: &mut F) -> Emitted<F::Handle> {
    let config = &gallery.config;
    let mut out = Emitted::default();

    for segment in &gallery.walls.segments {
        let handle =
            factory.create_wall_mesh(segment, WallDims::for_segment(segment, &config.walls));
        factory.set_pose(&handle, wall_pose(segment, &config.walls));
        out.walls.push(handle);
    }

    for trim in &gallery.decor.trims {
        let handle = factory.create_trim(trim);
        factory.set_pose(&handle, Pose::new(trim.center, trim.yaw));
        out.trims.push(handle);
    }

    for sconce in &gallery.decor.sconces {
        let handle = factory.create_sconce(sconce);
        factory.set_pose(&handle, Pose::new(sconce.position, sconce.yaw));
        out.sconces.push(handle);
    }

    for placement in &gallery.layout.placements {
        let Some(artwork) = gallery.artworks.get(placement.artwork) else {
            continue;
        };
        let url = gallery.image_url(artwork);
        let handle = factory.create_frame(artwork, &url, config.layout.frame_width);
        factory.set_pose(&handle, Pose::new(placement.position, placement.yaw));
        out.frames.push(handle);
    }

    let plinth = &config.statues;
    for section in &gallery.sections {
        let (x, z) = section.center();
        let handle = factory.create_primitive(PrimitiveKind::Cuboid {
            width: plinth.plinth_size,
            height: plinth.plinth_height,
            depth: plinth.plinth_size,
        });
        factory.set_pose(
            &handle,
            Pose::new(Vec3::new(x, plinth.plinth_height / 2.0, z), 0.0),
        );
        out.plinths.push(handle);
    }

    for request in &gallery.statues {
        out.statues.push(factory.create_statue(request));
    }

    log::info!(
        "Emitted {} visuals ({} walls, {} frames, {} plinths, {} statue loads)",
        out.total(),
        out.walls.len(),
        out.frames.len(),
        out.plinths.len(),
        out.statues.len()
    );
    out
}
