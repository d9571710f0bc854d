//! Settling asynchronous loads.
//!
//! Each frame and statue entity carries an `AssetState`. These systems poll
//! the asset server and settle a state once; after that the entity is left
//! alone. A load that never finishes keeps its placeholder.

use bevy::asset::LoadState;
use bevy::prelude::*;
use gallery_logic::assets::{AssetState, LoadOutcome};
use gallery_logic::geometry::{Aabb, Vec3 as LayoutVec3};

use crate::factory::{
    primitive_mesh, statue_transform, FrameImage, StatueSlot, PLACEHOLDER_ASPECT,
};
use crate::GalleryScene;

/// Frames never grow taller than this times their width.
const MAX_ASPECT: f32 = 1.5;
const MIN_ASPECT: f32 = 0.5;

pub fn poll_frame_images(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut frames: Query<(&mut FrameImage, &mut Transform)>,
) {
    for (mut frame, mut transform) in &mut frames {
        if frame.state.is_settled() {
            continue;
        }
        let outcome = match asset_server.get_load_state(frame.image.id()) {
            Some(LoadState::Loaded) => match images.get(&frame.image) {
                Some(image) => {
                    let size = image.size();
                    LoadOutcome::Loaded(size.y as f32 / size.x.max(1) as f32)
                }
                None => continue,
            },
            Some(LoadState::Failed(err)) => LoadOutcome::Failed(err.to_string()),
            _ => continue,
        };
        frame.state.settle(outcome);

        match &frame.state {
            AssetState::Ready(aspect) => {
                if let Some(material) = materials.get_mut(&frame.canvas) {
                    material.base_color = Color::WHITE;
                    material.base_color_texture = Some(frame.image.clone());
                }
                transform.scale.y = aspect.clamp(MIN_ASPECT, MAX_ASPECT) / PLACEHOLDER_ASPECT;
            }
            AssetState::Failed(reason) => warn!(
                "Artwork image {:?} failed to load ({reason}); keeping placeholder",
                frame.image.path()
            ),
            AssetState::Pending => {}
        }
    }
}

fn bevy_bounds(mesh: &Mesh) -> Option<Aabb> {
    let aabb = mesh.compute_aabb()?;
    let min = aabb.min();
    let max = aabb.max();
    Some(Aabb::new(
        LayoutVec3::new(min.x, min.y, min.z),
        LayoutVec3::new(max.x, max.y, max.z),
    ))
}

pub fn poll_statues(
    mut commands: Commands,
    scene: Res<GalleryScene>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut slots: Query<(Entity, &mut StatueSlot)>,
) {
    let params = scene.0.config.statues;
    for (entity, mut slot) in &mut slots {
        if slot.state.is_settled() {
            continue;
        }
        let outcome = match asset_server.get_load_state(slot.mesh.id()) {
            Some(LoadState::Loaded) => match meshes.get(&slot.mesh).map(bevy_bounds) {
                Some(Some(bounds)) => LoadOutcome::Loaded(slot.request.on_loaded(&bounds, &params)),
                Some(None) => LoadOutcome::Failed("mesh has no vertex positions".into()),
                None => continue,
            },
            Some(LoadState::Failed(err)) => LoadOutcome::Failed(err.to_string()),
            _ => continue,
        };
        slot.state.settle(outcome.clone());

        match outcome {
            LoadOutcome::Loaded(pose) => {
                let material = materials.add(StandardMaterial {
                    base_color_texture: Some(slot.texture.clone()),
                    perceptual_roughness: 0.7,
                    ..default()
                });
                commands.entity(entity).insert((
                    Mesh3d(slot.mesh.clone()),
                    MeshMaterial3d(material),
                    statue_transform(&pose),
                ));
                info!(
                    "Statue '{}' seated in section {} ({:?})",
                    slot.request.asset.model_file, slot.request.anchor.section, pose.correction
                );
            }
            LoadOutcome::Failed(reason) => {
                let fallback = slot.request.on_failed(&reason, &params);
                let material = materials.add(StandardMaterial {
                    base_color: Color::srgb(0.7, 0.68, 0.64),
                    perceptual_roughness: 0.8,
                    ..default()
                });
                commands.entity(entity).insert((
                    Mesh3d(meshes.add(primitive_mesh(fallback.kind))),
                    MeshMaterial3d(material),
                    statue_transform(&fallback.pose),
                ));
            }
        }
    }
}
