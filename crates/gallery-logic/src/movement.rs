//! Pure movement logic: the walking player against wall colliders.
//!
//! Algorithm: "move then slide"
//! 1. Try the X component of the step; keep the old X if the player's
//!    circle would overlap a collider there
//! 2. From the resolved X, try the Z component the same way
//! 3. A blocked axis with a free one is a wall slide
//!
//! Colliders the player already overlaps at the start are ignored, so a
//! player spawned inside a wall can always walk out.

use crate::floor_plan::FloorPlan;
use crate::geometry::{ColliderRect, RoomRect};

/// A movement request: position and step.
#[derive(Debug, Clone, Copy)]
pub struct MoveInput {
    pub px: f32,
    pub pz: f32,
    pub dx: f32,
    pub dz: f32,
    pub player_radius: f32,
}

/// Result of attempting to move the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveResult {
    /// Whole step taken.
    Free { x: f32, z: f32 },
    /// One axis blocked, slid along the wall on the other.
    WallSlide { x: f32, z: f32 },
    /// Both axes blocked; position unchanged.
    Blocked { x: f32, z: f32 },
}

impl MoveResult {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            MoveResult::Free { x, z }
            | MoveResult::WallSlide { x, z }
            | MoveResult::Blocked { x, z } => (x, z),
        }
    }
}

/// Resolve one step of movement against `colliders`.
pub fn compute_move(input: &MoveInput, colliders: &[ColliderRect]) -> MoveResult {
    let r = input.player_radius;
    let solid: Vec<&ColliderRect> = colliders
        .iter()
        .filter(|c| !c.overlaps_circle(input.px, input.pz, r))
        .collect();
    let hits = |x: f32, z: f32| solid.iter().any(|c| c.overlaps_circle(x, z, r));

    let tx = input.px + input.dx;
    let x_blocked = input.dx != 0.0 && hits(tx, input.pz);
    let x = if x_blocked { input.px } else { tx };

    let tz = input.pz + input.dz;
    let z_blocked = input.dz != 0.0 && hits(x, tz);
    let z = if z_blocked { input.pz } else { tz };

    match (x_blocked, z_blocked) {
        (false, false) => MoveResult::Free { x, z },
        (true, true) => MoveResult::Blocked { x, z },
        _ if (x_blocked && input.dz == 0.0) || (z_blocked && input.dx == 0.0) => {
            MoveResult::Blocked { x, z }
        }
        _ => MoveResult::WallSlide { x, z },
    }
}

/// Keep a player circle inside the outer bounds of the floor plan.
pub fn clamp_to_bounds(x: f32, z: f32, radius: f32, bounds: &RoomRect) -> (f32, f32) {
    (
        x.clamp(bounds.x0 + radius, (bounds.x1 - radius).max(bounds.x0 + radius)),
        z.clamp(bounds.z0 + radius, (bounds.z1 - radius).max(bounds.z0 + radius)),
    )
}

/// True if `(x, z)` lies inside any room of `plan`.
pub fn point_in_floor_plan(plan: &FloorPlan, x: f32, z: f32) -> bool {
    plan.room_at(x, z).is_some()
}

/// Clamp a player circle to the outer bounds of `plan`. An empty plan
/// leaves the point unchanged.
pub fn clamp_to_floor_plan(plan: &FloorPlan, x: f32, z: f32, radius: f32) -> (f32, f32) {
    match plan.bounds() {
        Some(bounds) => clamp_to_bounds(x, z, radius, &bounds),
        None => (x, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_plan::{Boundary, FloorPlan, RoomLayout};
    use crate::walls::{build_floor_plan_walls, build_room_walls, WallParams};

    fn mi(px: f32, pz: f32, dx: f32, dz: f32) -> MoveInput {
        MoveInput {
            px,
            pz,
            dx,
            dz,
            player_radius: 0.35,
        }
    }

    fn square_colliders() -> Vec<ColliderRect> {
        let room = RoomLayout::new("r", RoomRect::new(-5.0, 5.0, -5.0, 5.0))
            .with_east(Boundary::Doorway { width: 2.0 });
        build_room_walls(&room, &WallParams::default()).colliders
    }

    // --- Basic movement ---

    #[test]
    fn free_move_inside_room() {
        let res = compute_move(&mi(0.0, 0.0, 1.0, 0.5), &square_colliders());
        assert_eq!(res, MoveResult::Free { x: 1.0, z: 0.5 });
    }

    #[test]
    fn straight_into_wall_is_blocked() {
        let res = compute_move(&mi(0.0, 4.5, 0.0, 0.3), &square_colliders());
        assert_eq!(res, MoveResult::Blocked { x: 0.0, z: 4.5 });
    }

    // --- Wall sliding ---

    #[test]
    fn slide_along_x_when_z_blocked() {
        let res = compute_move(&mi(0.0, 4.5, 1.0, 0.3), &square_colliders());
        match res {
            MoveResult::WallSlide { x, z } => {
                assert!((x - 1.0).abs() < 1e-5, "X advances, got {x}");
                assert!((z - 4.5).abs() < 1e-5, "Z held, got {z}");
            }
            _ => panic!("Expected WallSlide, got {:?}", res),
        }
    }

    #[test]
    fn slide_along_z_when_x_blocked() {
        let res = compute_move(&mi(-4.5, 0.0, -0.3, 1.0), &square_colliders());
        match res {
            MoveResult::WallSlide { x, z } => {
                assert!((x + 4.5).abs() < 1e-5, "X held, got {x}");
                assert!((z - 1.0).abs() < 1e-5, "Z advances, got {z}");
            }
            _ => panic!("Expected WallSlide, got {:?}", res),
        }
    }

    #[test]
    fn corner_blocks_both_axes() {
        let res = compute_move(&mi(4.5, 4.5, 0.3, 0.3), &square_colliders());
        assert_eq!(res, MoveResult::Blocked { x: 4.5, z: 4.5 });
    }

    // --- Doorways ---

    #[test]
    fn walk_through_doorway() {
        let res = compute_move(&mi(4.5, 0.0, 1.0, 0.0), &square_colliders());
        assert_eq!(res, MoveResult::Free { x: 5.5, z: 0.0 });
    }

    #[test]
    fn doorway_jamb_blocks_off_center() {
        // door spans z ∈ [-1, 1]; at z=0.9 the circle clips the jamb
        let res = compute_move(&mi(4.5, 0.9, 0.5, 0.0), &square_colliders());
        assert!(matches!(res, MoveResult::Blocked { .. }), "got {:?}", res);
    }

    #[test]
    fn museum_atrium_to_east_wing() {
        let colliders =
            build_floor_plan_walls(&FloorPlan::museum(), &WallParams::default()).colliders;
        let mut x = 8.0;
        for _ in 0..10 {
            match compute_move(&mi(x, 0.0, 0.5, 0.0), &colliders) {
                MoveResult::Free { x: nx, .. } => x = nx,
                other => panic!("blocked in doorway: {:?}", other),
            }
        }
        assert!(x > 12.0, "x={x}");
    }

    // --- Edge cases ---

    #[test]
    fn spawned_inside_wall_can_walk_out() {
        let res = compute_move(&mi(0.0, 4.95, 0.0, -0.5), &square_colliders());
        match res {
            MoveResult::Free { z, .. } => assert!((z - 4.45).abs() < 1e-5),
            _ => panic!("Expected Free, got {:?}", res),
        }
    }

    #[test]
    fn clamp_keeps_player_inside_bounds() {
        let b = RoomRect::new(-10.0, 30.0, -10.0, 26.0);
        let (x, z) = clamp_to_bounds(100.0, -100.0, 0.35, &b);
        assert!((x - 29.65).abs() < 1e-5);
        assert!((z + 9.65).abs() < 1e-5);
    }

    #[test]
    fn museum_point_queries() {
        let plan = FloorPlan::museum();
        assert!(point_in_floor_plan(&plan, 0.0, 0.0));
        assert!(point_in_floor_plan(&plan, 20.0, 0.0));
        assert!(point_in_floor_plan(&plan, 0.0, 20.0));
        // the notch north of the east wing is outside every room
        assert!(!point_in_floor_plan(&plan, 20.0, 20.0));
        let (x, z) = clamp_to_floor_plan(&plan, -50.0, 50.0, 0.35);
        assert!((x + 9.65).abs() < 1e-5);
        assert!((z - 25.65).abs() < 1e-5);
        assert_eq!(clamp_to_floor_plan(&FloorPlan::new(vec![]), 1.0, 2.0, 0.35), (1.0, 2.0));
    }
}
