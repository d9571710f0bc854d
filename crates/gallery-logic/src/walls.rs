//! Wall segment builder.
//!
//! Converts a [`RoomLayout`] into straight [`WallSegment`]s plus one
//! [`ColliderRect`] per segment. A doorway never leaves a hole in a
//! segment: the wall is split into the two flanks on either side of it.
//!
//! Construction order is significant (it is the artwork assignment order):
//! south, north, west, east, then dividers in declaration order, room by
//! room.

use crate::constants::walls::{MIN_CLEARANCE, WALL_HEIGHT, WALL_THICKNESS};
use crate::floor_plan::{Boundary, FloorPlan, Orientation, RoomLayout};
use crate::geometry::ColliderRect;
use serde::{Deserialize, Serialize};

/// A maximal straight run of wall.
///
/// The normal sign (`nz` / `nx`, ±1) points out of the face that looks into
/// the room, i.e. the direction frames on this segment face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSegment {
    AlongX { z: f32, x0: f32, x1: f32, nz: f32 },
    AlongZ { x: f32, z0: f32, z1: f32, nx: f32 },
}

impl WallSegment {
    pub fn orientation(&self) -> Orientation {
        match self {
            WallSegment::AlongX { .. } => Orientation::AlongX,
            WallSegment::AlongZ { .. } => Orientation::AlongZ,
        }
    }

    /// The coordinate that does not vary along the segment.
    pub fn fixed(&self) -> f32 {
        match *self {
            WallSegment::AlongX { z, .. } => z,
            WallSegment::AlongZ { x, .. } => x,
        }
    }

    /// Start of the extent along the segment's axis.
    pub fn start(&self) -> f32 {
        match *self {
            WallSegment::AlongX { x0, .. } => x0,
            WallSegment::AlongZ { z0, .. } => z0,
        }
    }

    /// End of the extent along the segment's axis.
    pub fn end(&self) -> f32 {
        match *self {
            WallSegment::AlongX { x1, .. } => x1,
            WallSegment::AlongZ { z1, .. } => z1,
        }
    }

    pub fn length(&self) -> f32 {
        self.end() - self.start()
    }

    /// ±1 normal along the perpendicular axis.
    pub fn normal_sign(&self) -> f32 {
        match *self {
            WallSegment::AlongX { nz, .. } => nz,
            WallSegment::AlongZ { nx, .. } => nx,
        }
    }

    /// Normal as an `(x, z)` floor vector.
    pub fn normal(&self) -> (f32, f32) {
        match *self {
            WallSegment::AlongX { nz, .. } => (0.0, nz),
            WallSegment::AlongZ { nx, .. } => (nx, 0.0),
        }
    }

    /// Floor point `(x, z)` at `along` on this segment's axis, pushed
    /// `offset` meters along the normal.
    pub fn point_at(&self, along: f32, offset: f32) -> (f32, f32) {
        match *self {
            WallSegment::AlongX { z, nz, .. } => (along, z + nz * offset),
            WallSegment::AlongZ { x, nx, .. } => (x + nx * offset, along),
        }
    }

    /// Coordinate of `(x, z)` along the segment's axis.
    pub fn along(&self, x: f32, z: f32) -> f32 {
        match self {
            WallSegment::AlongX { .. } => x,
            WallSegment::AlongZ { .. } => z,
        }
    }

    pub fn midpoint(&self) -> (f32, f32) {
        self.point_at((self.start() + self.end()) / 2.0, 0.0)
    }

    /// Whether `along` lies within the extent expanded by `tolerance`.
    pub fn covers(&self, along: f32, tolerance: f32) -> bool {
        along >= self.start() - tolerance && along <= self.end() + tolerance
    }

    /// Solid footprint of the segment, `thickness` thick, centered on the line.
    pub fn collider(&self, thickness: f32) -> ColliderRect {
        let half = thickness / 2.0;
        match *self {
            WallSegment::AlongX { z, x0, x1, .. } => ColliderRect {
                min_x: x0,
                max_x: x1,
                min_z: z - half,
                max_z: z + half,
            },
            WallSegment::AlongZ { x, z0, z1, .. } => ColliderRect {
                min_x: x - half,
                max_x: x + half,
                min_z: z0,
                max_z: z1,
            },
        }
    }
}

/// Wall dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallParams {
    pub height: f32,
    pub thickness: f32,
    /// Doorway flanks shorter than this are not emitted.
    pub min_clearance: f32,
}

impl Default for WallParams {
    fn default() -> Self {
        Self {
            height: WALL_HEIGHT,
            thickness: WALL_THICKNESS,
            min_clearance: MIN_CLEARANCE,
        }
    }
}

impl WallParams {
    /// Distance from the wall line to its face.
    pub fn face_offset(&self) -> f32 {
        self.thickness / 2.0
    }
}

/// Segments and their colliders, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallSet {
    pub segments: Vec<WallSegment>,
    pub colliders: Vec<ColliderRect>,
}

impl WallSet {
    fn push(&mut self, segment: WallSegment, thickness: f32) {
        self.colliders.push(segment.collider(thickness));
        self.segments.push(segment);
    }

    pub fn extend(&mut self, other: WallSet) {
        self.segments.extend(other.segments);
        self.colliders.extend(other.colliders);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split the extent `[start, end]` around a centered doorway.
///
/// Returns the solid spans left over: one span for a solid side, two
/// flanks for a doorway narrower than the side, none when the doorway
/// takes the whole side. Flanks shorter than `clearance` are dropped.
pub fn split_side(start: f32, end: f32, boundary: Boundary, clearance: f32) -> Vec<(f32, f32)> {
    let width = match boundary {
        Boundary::Doorway { width } if width > 0.0 => width,
        _ => return vec![(start, end)],
    };
    if width >= end - start {
        return Vec::new();
    }
    let mid = (start + end) / 2.0;
    let (open_lo, open_hi) = (mid - width / 2.0, mid + width / 2.0);
    let mut spans = Vec::with_capacity(2);
    if open_lo - start >= clearance {
        spans.push((start, open_lo));
    }
    if end - open_hi >= clearance {
        spans.push((open_hi, end));
    }
    spans
}

/// Build the walls of one room.
pub fn build_room_walls(room: &RoomLayout, params: &WallParams) -> WallSet {
    let r = &room.rect;
    let mut set = WallSet::default();

    let along_x = [(r.z0, room.south, 1.0), (r.z1, room.north, -1.0)];
    for (z, boundary, nz) in along_x {
        for (x0, x1) in split_side(r.x0, r.x1, boundary, params.min_clearance) {
            set.push(WallSegment::AlongX { z, x0, x1, nz }, params.thickness);
        }
    }

    let along_z = [(r.x0, room.west, 1.0), (r.x1, room.east, -1.0)];
    for (x, boundary, nx) in along_z {
        for (z0, z1) in split_side(r.z0, r.z1, boundary, params.min_clearance) {
            set.push(WallSegment::AlongZ { x, z0, z1, nx }, params.thickness);
        }
    }

    for divider in &room.dividers {
        let segment = divider.segment();
        if segment.length() < params.min_clearance {
            log::debug!(
                "room '{}': skipping degenerate divider at {}",
                room.name,
                divider.at
            );
            continue;
        }
        set.push(segment, params.thickness);
    }

    set
}

/// Build the walls of every room, in room order.
pub fn build_floor_plan_walls(plan: &FloorPlan, params: &WallParams) -> WallSet {
    let mut set = WallSet::default();
    for room in &plan.rooms {
        set.extend(build_room_walls(room, params));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_plan::Divider;
    use crate::geometry::RoomRect;

    fn square() -> RoomLayout {
        RoomLayout::new("square", RoomRect::new(-10.0, 10.0, -10.0, 10.0))
    }

    #[test]
    fn test_closed_room_has_four_walls() {
        let set = build_room_walls(&square(), &WallParams::default());
        assert_eq!(set.len(), 4);
        assert_eq!(set.colliders.len(), 4);
        assert_eq!(
            set.segments[0],
            WallSegment::AlongX {
                z: -10.0,
                x0: -10.0,
                x1: 10.0,
                nz: 1.0
            }
        );
        assert_eq!(set.segments[1].normal_sign(), -1.0);
        assert_eq!(set.segments[2].normal(), (1.0, 0.0));
        assert_eq!(set.segments[3].normal(), (-1.0, 0.0));
    }

    #[test]
    fn test_doorway_splits_into_two_flanks() {
        let room = square().with_north(Boundary::Doorway { width: 3.0 });
        let set = build_room_walls(&room, &WallParams::default());
        assert_eq!(set.len(), 5);
        let north: Vec<_> = set
            .segments
            .iter()
            .filter(|s| s.orientation() == Orientation::AlongX && s.fixed() == 10.0)
            .collect();
        assert_eq!(north.len(), 2);
        for s in north {
            assert!((s.length() - 8.5).abs() < 1e-5, "len={}", s.length());
        }
    }

    #[test]
    fn test_doorway_as_wide_as_wall_removes_side() {
        let room = square().with_west(Boundary::Doorway { width: 20.0 });
        let set = build_room_walls(&room, &WallParams::default());
        assert_eq!(set.len(), 3);
        assert!(set
            .segments
            .iter()
            .all(|s| !(s.orientation() == Orientation::AlongZ && s.fixed() == -10.0)));
    }

    #[test]
    fn test_sliver_flanks_are_flush() {
        // 0.004m left on each side of the opening
        let spans = split_side(0.0, 3.008, Boundary::Doorway { width: 3.0 }, 0.01);
        assert!(spans.is_empty());
        let spans = split_side(0.0, 3.1, Boundary::Doorway { width: 3.0 }, 0.01);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_non_positive_doorway_is_solid() {
        let spans = split_side(0.0, 5.0, Boundary::Doorway { width: 0.0 }, 0.01);
        assert_eq!(spans, vec![(0.0, 5.0)]);
    }

    #[test]
    fn test_dividers_follow_boundaries() {
        let room = square()
            .with_divider(Divider::along_z(0.0, -10.0, -3.0, 1.0))
            .with_divider(Divider::along_x(0.0, -10.0, -4.0, 1.0));
        let set = build_room_walls(&room, &WallParams::default());
        assert_eq!(set.len(), 6);
        assert_eq!(set.segments[4], room.dividers[0].segment());
        assert_eq!(set.segments[5], room.dividers[1].segment());
    }

    #[test]
    fn test_collider_thickness() {
        let seg = WallSegment::AlongZ {
            x: 5.0,
            z0: 0.0,
            z1: 4.0,
            nx: -1.0,
        };
        let c = seg.collider(0.2);
        assert!((c.min_x - 4.9).abs() < 1e-6);
        assert!((c.max_x - 5.1).abs() < 1e-6);
        assert_eq!((c.min_z, c.max_z), (0.0, 4.0));
    }

    #[test]
    fn test_point_at_offsets_along_normal() {
        let seg = WallSegment::AlongX {
            z: 10.0,
            x0: 0.0,
            x1: 4.0,
            nz: -1.0,
        };
        assert_eq!(seg.point_at(2.0, 0.5), (2.0, 9.5));
        assert_eq!(seg.midpoint(), (2.0, 10.0));
    }

    #[test]
    fn test_museum_segment_count() {
        let set = build_floor_plan_walls(&FloorPlan::museum(), &WallParams::default());
        // atrium: 2 solid + 2 doorway sides × 2 flanks + 2 dividers = 8
        // east wing: 3 solid + 2 flanks + 1 divider = 6
        // north wing: 3 solid + 2 flanks + 1 divider = 6
        assert_eq!(set.len(), 20);
        assert_eq!(set.colliders.len(), 20);
    }
}
