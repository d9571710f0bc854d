//! Gallery Viewer - first-person Bevy walkthrough of the procedural museum
//!
//! The layout pass runs once at startup in `gallery-logic`; this crate only
//! turns its output into entities (see [`factory::BevyFactory`]), finishes
//! asset loads as they settle, and lets the visitor walk around.
//!
//! Controls: click to capture the mouse, WASD to walk, mouse to look,
//! Escape to release the cursor.

mod controls;
mod factory;
mod loading;

use bevy::prelude::*;
use gallery_logic::config::{load_artworks, load_catalog, GalleryConfig};
use gallery_logic::emit::emit_gallery;
use gallery_logic::floor_plan::FloorPlan;
use gallery_logic::gallery::Gallery;

use crate::controls::{grab_cursor, mouse_look, move_player, spawn_player, update_caption};
use crate::factory::{BevyFactory, Palette};
use crate::loading::{poll_frame_images, poll_statues};

const CONFIG_PATH: &str = "data/gallery.json";
const ARTWORKS_PATH: &str = "data/artworks.json";
const CATALOG_PATH: &str = "data/statues.json";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gallery - Procedural Museum".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(AmbientLight {
            color: Color::srgb(1.0, 0.97, 0.92),
            brightness: 350.0,
        })
        .add_systems(Startup, (load_gallery, setup_scene, spawn_player).chain())
        .add_systems(
            Update,
            (
                grab_cursor,
                mouse_look,
                move_player,
                update_caption,
                poll_frame_images,
                poll_statues,
            ),
        )
        .run();
}

/// The generated layout, shared by the loaders and the controller.
#[derive(Resource)]
pub struct GalleryScene(pub Gallery);

/// Read the data files and run the layout pass. A missing or broken file
/// falls back to built-in defaults and the museum is just sparser.
fn load_gallery(mut commands: Commands) {
    let config = GalleryConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!("{e}; using default config");
        GalleryConfig::default()
    });
    let artworks = load_artworks(ARTWORKS_PATH).unwrap_or_else(|e| {
        warn!("{e}; hanging no artworks");
        Vec::new()
    });
    let config = if config.catalog.is_empty() {
        match load_catalog(CATALOG_PATH) {
            Ok(catalog) => config.with_catalog(catalog),
            Err(e) => {
                warn!("{e}; placing no statues");
                config
            }
        }
    } else {
        config
    };

    commands.insert_resource(GalleryScene(Gallery::generate(
        FloorPlan::museum(),
        artworks,
        config,
    )));
}

fn setup_scene(
    mut commands: Commands,
    scene: Res<GalleryScene>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let gallery = &scene.0;
    let palette = Palette::new(&mut materials);

    // Floor and ceiling slabs per room
    let height = gallery.config.walls.height;
    for room in &gallery.plan.rooms {
        let r = room.rect;
        let (cx, cz) = r.center();
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(r.width(), 0.1, r.depth()))),
            MeshMaterial3d(palette.floor.clone()),
            Transform::from_xyz(cx, -0.05, cz),
        ));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(r.width(), 0.1, r.depth()))),
            MeshMaterial3d(palette.ceiling.clone()),
            Transform::from_xyz(cx, height + 0.05, cz),
        ));
    }

    let mut factory = BevyFactory {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        asset_server: &asset_server,
        palette,
    };
    let emitted = emit_gallery(gallery, &mut factory);

    info!("{}", gallery.summary());
    info!(
        "Spawned {} entities; waiting on {} images and {} statues",
        emitted.total(),
        emitted.frames.len(),
        emitted.statues.len()
    );
}
