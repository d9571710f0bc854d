//! First-person visitor: mouse look, WASD walking against wall colliders,
//! and the caption of the artwork in front of the camera.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use gallery_logic::constants::player::{EYE_HEIGHT, PLAYER_RADIUS, WALK_SPEED};
use gallery_logic::movement::{clamp_to_floor_plan, compute_move, MoveInput};

use crate::factory::FrameCaption;
use crate::GalleryScene;

const MOUSE_SENSITIVITY: f32 = 0.0025;
const MAX_PITCH: f32 = 1.45;
/// Captions show within this distance of a frame.
const CAPTION_RANGE: f32 = 3.5;
const HELP: &str = "Click to look around - WASD to walk - Esc to release";

#[derive(Component, Default)]
pub struct Visitor {
    yaw: f32,
    pitch: f32,
}

#[derive(Component)]
pub struct CaptionText;

pub fn spawn_player(mut commands: Commands, scene: Res<GalleryScene>) {
    // Start in the south half of the first room, looking north (+Z)
    let (x, z) = scene
        .0
        .plan
        .rooms
        .first()
        .map(|r| (r.rect.center().0 + 2.0, r.rect.z0 + r.rect.depth() * 0.25))
        .unwrap_or((0.0, 0.0));
    let yaw = std::f32::consts::PI;

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(x, EYE_HEIGHT, z).with_rotation(Quat::from_rotation_y(yaw)),
        Visitor { yaw, pitch: 0.0 },
    ));

    commands.spawn((
        Text::new(HELP),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Px(24.0),
            ..default()
        },
        CaptionText,
    ));
}

pub fn grab_cursor(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    if mouse.just_pressed(MouseButton::Left) {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

pub fn mouse_look(
    mut motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut visitor: Query<(&mut Visitor, &mut Transform)>,
) {
    let grabbed = windows
        .get_single()
        .map(|w| w.cursor_options.grab_mode != CursorGrabMode::None)
        .unwrap_or(false);
    let delta: Vec2 = motion.read().map(|e| e.delta).sum();
    if !grabbed || delta == Vec2::ZERO {
        return;
    }
    let Ok((mut v, mut transform)) = visitor.get_single_mut() else {
        return;
    };
    v.yaw -= delta.x * MOUSE_SENSITIVITY;
    v.pitch = (v.pitch - delta.y * MOUSE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, v.yaw, v.pitch, 0.0);
}

pub fn move_player(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    scene: Res<GalleryScene>,
    mut visitor: Query<(&Visitor, &mut Transform)>,
) {
    let Ok((v, mut transform)) = visitor.get_single_mut() else {
        return;
    };

    // Walk on the floor plane regardless of pitch
    let forward = Vec2::new(-v.yaw.sin(), -v.yaw.cos());
    let right = Vec2::new(v.yaw.cos(), -v.yaw.sin());
    let mut wish = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        wish += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        wish -= forward;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        wish += right;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        wish -= right;
    }
    if wish == Vec2::ZERO {
        return;
    }
    let step = wish.normalize() * WALK_SPEED * time.delta_secs();

    let gallery = &scene.0;
    let result = compute_move(
        &MoveInput {
            px: transform.translation.x,
            pz: transform.translation.z,
            dx: step.x,
            dz: step.y,
            player_radius: PLAYER_RADIUS,
        },
        &gallery.walls.colliders,
    );
    let (x, z) = result.position();
    let (x, z) = clamp_to_floor_plan(&gallery.plan, x, z, PLAYER_RADIUS);
    transform.translation = Vec3::new(x, EYE_HEIGHT, z);
}

pub fn update_caption(
    visitor: Query<&Transform, With<Visitor>>,
    frames: Query<(&GlobalTransform, &FrameCaption)>,
    mut text: Query<&mut Text, With<CaptionText>>,
) {
    let (Ok(eye), Ok(mut text)) = (visitor.get_single(), text.get_single_mut()) else {
        return;
    };
    let look = eye.forward();

    // Nearest frame in range that the visitor is facing
    let caption = frames
        .iter()
        .filter_map(|(tf, caption)| {
            let to_frame = tf.translation() - eye.translation;
            let dist = to_frame.length();
            (dist < CAPTION_RANGE && to_frame.normalize_or_zero().dot(*look) > 0.7)
                .then_some((dist, caption))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, caption)| caption.0.clone());

    let caption = caption.unwrap_or_else(|| HELP.to_string());
    if text.0 != caption {
        text.0 = caption;
    }
}
