//! Bevy implementation of the layout emitter's `VisualFactory`.
//!
//! Every visual is one root entity. Frames and statues also get a loader
//! component (`FrameImage`, `StatueSlot`) that the systems in
//! [`crate::loading`] poll until the asset settles.

use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use gallery_logic::assets::AssetState;
use gallery_logic::constants::decor::SCONCE_HALF_WIDTH;
use gallery_logic::decor::{SconceSlot, TrimKind, TrimPiece};
use gallery_logic::emit::{Pose, PrimitiveKind, VisualFactory, WallDims};
use gallery_logic::layout::ArtworkMeta;
use gallery_logic::statue::{StatuePose, StatueRequest, UprightCorrection};
use gallery_logic::walls::WallSegment;

/// Height/width ratio of a frame before its image arrives.
pub const PLACEHOLDER_ASPECT: f32 = 0.75;
const FRAME_BORDER: f32 = 0.08;
const FRAME_DEPTH: f32 = 0.05;

/// Shared materials.
pub struct Palette {
    pub wall: Handle<StandardMaterial>,
    pub floor: Handle<StandardMaterial>,
    pub ceiling: Handle<StandardMaterial>,
    pub baseboard: Handle<StandardMaterial>,
    pub crown: Handle<StandardMaterial>,
    pub frame: Handle<StandardMaterial>,
    pub stone: Handle<StandardMaterial>,
    pub sconce: Handle<StandardMaterial>,
}

impl Palette {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        let matte = |color: Color, roughness: f32| StandardMaterial {
            base_color: color,
            perceptual_roughness: roughness,
            ..default()
        };
        Self {
            wall: materials.add(matte(Color::srgb(0.86, 0.84, 0.80), 0.9)),
            floor: materials.add(matte(Color::srgb(0.35, 0.25, 0.18), 0.6)),
            ceiling: materials.add(matte(Color::srgb(0.95, 0.95, 0.93), 1.0)),
            baseboard: materials.add(matte(Color::srgb(0.25, 0.2, 0.16), 0.5)),
            crown: materials.add(matte(Color::srgb(0.92, 0.9, 0.86), 0.7)),
            frame: materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.42, 0.18),
                metallic: 0.6,
                perceptual_roughness: 0.35,
                ..default()
            }),
            stone: materials.add(matte(Color::srgb(0.82, 0.81, 0.78), 0.8)),
            sconce: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.9, 0.7),
                emissive: LinearRgba::rgb(4.0, 3.2, 2.0),
                ..default()
            }),
        }
    }
}

/// A frame waiting on (or showing) its image.
#[derive(Component)]
pub struct FrameImage {
    pub image: Handle<Image>,
    pub canvas: Handle<StandardMaterial>,
    /// Settles with the image's height/width ratio.
    pub state: AssetState<f32>,
}

/// Caption shown when the visitor stands in front of a frame.
#[derive(Component)]
pub struct FrameCaption(pub String);

/// A statue load for one section.
#[derive(Component)]
pub struct StatueSlot {
    pub request: StatueRequest,
    pub mesh: Handle<Mesh>,
    pub texture: Handle<Image>,
    pub state: AssetState<StatuePose>,
}

pub fn pose_transform(pose: Pose) -> Transform {
    Transform::from_xyz(pose.translation.x, pose.translation.y, pose.translation.z)
        .with_rotation(Quat::from_rotation_y(pose.yaw))
}

/// Transform of a seated statue: correction first, then yaw.
pub fn statue_transform(pose: &StatuePose) -> Transform {
    let correction = match pose.correction {
        UprightCorrection::None => Quat::IDENTITY,
        UprightCorrection::RollZ => Quat::from_rotation_z(pose.correction.angle()),
        UprightCorrection::PitchX => Quat::from_rotation_x(pose.correction.angle()),
    };
    let t = pose.translation;
    Transform {
        translation: Vec3::new(t.x, t.y, t.z),
        rotation: Quat::from_rotation_y(pose.yaw) * correction,
        scale: Vec3::splat(pose.scale),
    }
}

pub fn primitive_mesh(kind: PrimitiveKind) -> Mesh {
    match kind {
        PrimitiveKind::Cuboid {
            width,
            height,
            depth,
        } => Cuboid::new(width, height, depth).into(),
        PrimitiveKind::Sphere { radius } => Sphere::new(radius).into(),
        PrimitiveKind::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
        PrimitiveKind::Cone { radius, height } => Cone { radius, height }.into(),
    }
}

pub struct BevyFactory<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub asset_server: &'a AssetServer,
    pub palette: Palette,
}

impl VisualFactory for BevyFactory<'_, '_, '_> {
    type Handle = Entity;

    fn create_wall_mesh(&mut self, _segment: &WallSegment, dims: WallDims) -> Entity {
        self.commands
            .spawn((
                Mesh3d(self.meshes.add(Cuboid::new(dims.length, dims.height, dims.thickness))),
                MeshMaterial3d(self.palette.wall.clone()),
                Transform::default(),
            ))
            .id()
    }

    fn create_frame(&mut self, artwork: &ArtworkMeta, image_url: &str, width: f32) -> Entity {
        let height = width * PLACEHOLDER_ASPECT;
        let image: Handle<Image> = self.asset_server.load(image_url.to_string());
        let canvas = self.materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.3, 0.32),
            perceptual_roughness: 0.9,
            ..default()
        });
        let border = Cuboid::new(width + 2.0 * FRAME_BORDER, height + 2.0 * FRAME_BORDER, FRAME_DEPTH);
        let border_mesh = self.meshes.add(border);
        let canvas_mesh = self.meshes.add(Rectangle::new(width, height));
        let frame_mat = self.palette.frame.clone();

        self.commands
            .spawn((
                Transform::default(),
                Visibility::default(),
                FrameImage {
                    image,
                    canvas: canvas.clone(),
                    state: AssetState::Pending,
                },
                FrameCaption(artwork.caption()),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(border_mesh),
                    MeshMaterial3d(frame_mat),
                    Transform::from_xyz(0.0, 0.0, FRAME_DEPTH / 2.0),
                ));
                parent.spawn((
                    Mesh3d(canvas_mesh),
                    MeshMaterial3d(canvas),
                    Transform::from_xyz(0.0, 0.0, FRAME_DEPTH + 0.002),
                ));
            })
            .id()
    }

    fn create_statue(&mut self, request: &StatueRequest) -> Entity {
        let mesh = self.asset_server.load(
            GltfAssetLabel::Primitive {
                mesh: 0,
                primitive: 0,
            }
            .from_asset(request.asset.model_path()),
        );
        let texture = self.asset_server.load(request.asset.material_path());
        let a = request.anchor;
        self.commands
            .spawn((
                Transform::from_xyz(a.x, 0.0, a.z),
                Visibility::default(),
                StatueSlot {
                    request: request.clone(),
                    mesh,
                    texture,
                    state: AssetState::Pending,
                },
            ))
            .id()
    }

    fn create_primitive(&mut self, kind: PrimitiveKind) -> Entity {
        self.commands
            .spawn((
                Mesh3d(self.meshes.add(primitive_mesh(kind))),
                MeshMaterial3d(self.palette.stone.clone()),
                Transform::default(),
            ))
            .id()
    }

    fn create_trim(&mut self, trim: &TrimPiece) -> Entity {
        let material = match trim.kind {
            TrimKind::Baseboard => self.palette.baseboard.clone(),
            TrimKind::Crown => self.palette.crown.clone(),
        };
        self.commands
            .spawn((
                Mesh3d(self.meshes.add(Cuboid::new(trim.length, trim.height, trim.depth))),
                MeshMaterial3d(material),
                Transform::default(),
            ))
            .id()
    }

    fn create_sconce(&mut self, _sconce: &SconceSlot) -> Entity {
        let shade = self.meshes.add(Cuboid::new(2.0 * SCONCE_HALF_WIDTH, 0.28, 0.1));
        let material = self.palette.sconce.clone();
        self.commands
            .spawn((
                Mesh3d(shade),
                MeshMaterial3d(material),
                Transform::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    PointLight {
                        color: Color::srgb(1.0, 0.88, 0.7),
                        intensity: 120_000.0,
                        range: 9.0,
                        shadows_enabled: false,
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 0.15),
                ));
            })
            .id()
    }

    fn set_pose(&mut self, handle: &Entity, pose: Pose) {
        self.commands.entity(*handle).insert(pose_transform(pose));
    }
}
