//! Floor-plane geometry and floor plan validation.
//!
//! All coordinates are meters in the horizontal X/Z plane (Y is up).
//! Validation functions take plain structs and return lists of
//! [`ValidationError`]s instead of failing on the first problem.

use crate::constants::frames::MIN_SPACING;
use crate::floor_plan::{Boundary, FloorPlan, Orientation};
use crate::layout::LayoutParams;
use crate::sections::partition_room;
use serde::{Deserialize, Serialize};

/// A point or vector in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

/// One room's floor extent. Invariant: `x0 < x1` and `z0 < z1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub x0: f32,
    pub x1: f32,
    pub z0: f32,
    pub z1: f32,
}

impl RoomRect {
    pub const fn new(x0: f32, x1: f32, z0: f32, z1: f32) -> Self {
        Self { x0, x1, z0, z1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn depth(&self) -> f32 {
        self.z1 - self.z0
    }

    pub fn area(&self) -> f32 {
        self.width() * self.depth()
    }

    /// Center of the rectangle as `(x, z)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.z0 + self.z1) / 2.0)
    }

    pub fn is_valid(&self) -> bool {
        self.x0 < self.x1 && self.z0 < self.z1
    }

    /// Inclusive point containment.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.x0 && x <= self.x1 && z >= self.z0 && z <= self.z1
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &RoomRect) -> RoomRect {
        RoomRect::new(
            self.x0.min(other.x0),
            self.x1.max(other.x1),
            self.z0.min(other.z0),
            self.z1.max(other.z1),
        )
    }

    /// Overlap test that treats shared edges (within `tolerance`) as touching.
    pub fn overlaps(&self, other: &RoomRect, tolerance: f32) -> bool {
        let overlap_x = self.x1 - tolerance > other.x0 && other.x1 - tolerance > self.x0;
        let overlap_z = self.z1 - tolerance > other.z0 && other.z1 - tolerance > self.z0;
        overlap_x && overlap_z
    }
}

/// Axis-aligned solid footprint of a wall in the floor plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderRect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl ColliderRect {
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// True if a circle at `(x, z)` with radius `r` overlaps this rectangle.
    pub fn overlaps_circle(&self, x: f32, z: f32, r: f32) -> bool {
        let nx = x.clamp(self.min_x, self.max_x);
        let nz = z.clamp(self.min_z, self.max_z);
        let dx = x - nx;
        let dz = z - nz;
        dx * dx + dz * dz < r * r
    }
}

/// Axis-aligned 3D bounding box, used to measure loaded statue models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounding box of a set of points. `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Aabb> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Aabb { min, max })
    }

    /// Size along each axis.
    pub fn extents(&self) -> Vec3 {
        Vec3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// A floor plan validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

fn warning(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Warning,
        message,
    }
}

// ── A. Room geometry (per-room) ─────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(plan: &FloorPlan) -> Vec<ValidationError> {
    plan.rooms
        .iter()
        .filter(|room| !room.rect.is_valid())
        .map(|room| {
            error(
                "room_geometry",
                format!(
                    "Room '{}' has non-positive dimensions: {}×{}",
                    room.name,
                    room.rect.width(),
                    room.rect.depth()
                ),
            )
        })
        .collect()
}

/// Check that doorways have a positive width, and warn when a doorway
/// swallows its whole wall.
pub fn check_doorways(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in &plan.rooms {
        let sides = [
            ("south", room.south, room.rect.width()),
            ("north", room.north, room.rect.width()),
            ("west", room.west, room.rect.depth()),
            ("east", room.east, room.rect.depth()),
        ];
        for (side, boundary, length) in sides {
            let Boundary::Doorway { width } = boundary else {
                continue;
            };
            if width <= 0.0 {
                errors.push(error(
                    "doorway",
                    format!(
                        "Room '{}' {} doorway has non-positive width {}",
                        room.name, side, width
                    ),
                ));
            } else if width >= length {
                errors.push(warning(
                    "doorway",
                    format!(
                        "Room '{}' {} doorway ({}m) consumes the whole {}m wall",
                        room.name, side, width, length
                    ),
                ));
            }
        }
    }
    errors
}

// ── B. Room-to-room (pairwise) ──────────────────────────────────────────

/// Check that no two rooms overlap. Shared walls (touching edges) are fine.
pub fn check_room_overlaps(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let tolerance = 0.01;
    for (i, a) in plan.rooms.iter().enumerate() {
        for b in &plan.rooms[i + 1..] {
            if a.rect.overlaps(&b.rect, tolerance) {
                errors.push(error(
                    "room_overlap",
                    format!("Rooms '{}' and '{}' overlap", a.name, b.name),
                ));
            }
        }
    }
    errors
}

// ── C. Dividers and sections ────────────────────────────────────────────

/// Check that every divider lies inside its room with a positive extent.
pub fn check_dividers(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let eps = 1e-4;
    for room in &plan.rooms {
        let r = &room.rect;
        for (i, d) in room.dividers.iter().enumerate() {
            if d.to - d.from <= 0.0 {
                errors.push(error(
                    "divider",
                    format!("Room '{}' divider #{} has non-positive extent", room.name, i),
                ));
                continue;
            }
            let (fixed_ok, extent_ok) = match d.orientation {
                Orientation::AlongX => (
                    d.at > r.z0 && d.at < r.z1,
                    d.from >= r.x0 - eps && d.to <= r.x1 + eps,
                ),
                Orientation::AlongZ => (
                    d.at > r.x0 && d.at < r.x1,
                    d.from >= r.z0 - eps && d.to <= r.z1 + eps,
                ),
            };
            if !fixed_ok || !extent_ok {
                errors.push(error(
                    "divider",
                    format!(
                        "Room '{}' divider #{} at {} ({:.2}..{:.2}) lies outside the room",
                        room.name, i, d.at, d.from, d.to
                    ),
                ));
            }
        }
    }
    errors
}

/// Check that each room's sections tile the room exactly: same total area,
/// every section inside the room.
pub fn check_sections_tile_rooms(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in &plan.rooms {
        if !room.rect.is_valid() {
            continue; // caught by dimension check
        }
        let sections = partition_room(room);
        let area: f32 = sections.iter().map(RoomRect::area).sum();
        if (area - room.rect.area()).abs() > 0.01 {
            errors.push(error(
                "sections",
                format!(
                    "Room '{}' sections cover {:.2}m² of {:.2}m²",
                    room.name,
                    area,
                    room.rect.area()
                ),
            ));
        }
        let outside = sections
            .iter()
            .filter(|s| {
                !(room.rect.contains(s.x0, s.z0) && room.rect.contains(s.x1, s.z1))
            })
            .count();
        if outside > 0 {
            errors.push(error(
                "sections",
                format!("Room '{}' has {} sections outside the room", room.name, outside),
            ));
        }
    }
    errors
}

// ── D. Layout parameters ────────────────────────────────────────────────

/// Check that frame layout parameters describe a usable slot grid.
pub fn validate_layout_params(params: &LayoutParams) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if params.frame_width <= 0.0 {
        errors.push(error(
            "layout",
            format!("frame_width must be positive, got {}", params.frame_width),
        ));
    }
    if params.spacing.is_nan() || params.spacing < MIN_SPACING {
        errors.push(error(
            "layout",
            format!("spacing must be at least {MIN_SPACING}, got {}", params.spacing),
        ));
    } else if params.spacing < params.frame_width {
        errors.push(error(
            "layout",
            format!(
                "spacing {} is narrower than frame_width {}; frames would overlap",
                params.spacing, params.frame_width
            ),
        ));
    }
    if params.edge_margin < 0.0 {
        errors.push(error(
            "layout",
            format!("edge_margin must not be negative, got {}", params.edge_margin),
        ));
    }
    if params.corner_tolerance < 0.0 {
        errors.push(error(
            "layout",
            format!(
                "corner_tolerance must not be negative, got {}",
                params.corner_tolerance
            ),
        ));
    }
    if params.gap_from_wall < 0.0 {
        errors.push(warning(
            "layout",
            format!("gap_from_wall {} sinks frames into the wall", params.gap_from_wall),
        ));
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all floor plan validations and return combined results.
pub fn validate_floor_plan(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(plan));
    all.extend(check_doorways(plan));
    all.extend(check_room_overlaps(plan));
    all.extend(check_dividers(plan));
    all.extend(check_sections_tile_rooms(plan));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_plan::{Divider, RoomLayout};

    fn room(name: &str, x0: f32, x1: f32, z0: f32, z1: f32) -> RoomLayout {
        RoomLayout::new(name, RoomRect::new(x0, x1, z0, z1))
    }

    #[test]
    fn test_default_layout_params_are_clean() {
        assert!(validate_layout_params(&LayoutParams::default()).is_empty());
    }

    #[test]
    fn test_overlapping_frames_rejected() {
        let params = LayoutParams {
            spacing: 1.0,
            ..LayoutParams::default()
        };
        let errors = validate_layout_params(&params);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Error);
        assert!(errors[0].message.contains("narrower"));
    }

    #[test]
    fn test_vanishing_spacing_rejected() {
        let params = LayoutParams {
            frame_width: 1e-6,
            spacing: 1e-6,
            ..LayoutParams::default()
        };
        let errors = validate_layout_params(&params);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("at least"));
    }

    #[test]
    fn test_museum_plan_is_clean() {
        let errs = validate_floor_plan(&FloorPlan::museum());
        assert!(errs.is_empty(), "Expected no errors, got: {:?}", errs);
    }

    #[test]
    fn test_zero_width_room() {
        let plan = FloorPlan::new(vec![room("flat", 0.0, 0.0, 0.0, 10.0)]);
        let errs = check_room_dimensions(&plan);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("non-positive"));
    }

    #[test]
    fn test_overlapping_rooms() {
        let plan = FloorPlan::new(vec![
            room("a", 0.0, 10.0, 0.0, 10.0),
            room("b", 5.0, 15.0, 5.0, 15.0),
        ]);
        assert_eq!(check_room_overlaps(&plan).len(), 1);
    }

    #[test]
    fn test_adjacent_rooms_do_not_overlap() {
        let plan = FloorPlan::new(vec![
            room("a", 0.0, 10.0, 0.0, 10.0),
            room("b", 10.0, 20.0, 0.0, 10.0),
        ]);
        assert!(check_room_overlaps(&plan).is_empty());
    }

    #[test]
    fn test_divider_outside_room() {
        let plan = FloorPlan::new(vec![room("a", 0.0, 10.0, 0.0, 10.0)
            .with_divider(Divider::along_z(12.0, 0.0, 5.0, 1.0))]);
        let errs = check_dividers(&plan);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("outside"));
    }

    #[test]
    fn test_doorway_wider_than_wall_warns() {
        let plan = FloorPlan::new(vec![
            room("a", 0.0, 2.0, 0.0, 10.0).with_south(Boundary::Doorway { width: 3.0 })
        ]);
        let errs = check_doorways(&plan);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Warning);
    }

    #[test]
    fn test_collider_circle_overlap() {
        let c = ColliderRect {
            min_x: -1.0,
            max_x: 1.0,
            min_z: -0.1,
            max_z: 0.1,
        };
        assert!(c.overlaps_circle(0.0, 0.3, 0.35));
        assert!(!c.overlaps_circle(0.0, 0.5, 0.35));
        assert!(c.overlaps_circle(1.2, 0.0, 0.35));
        assert!(!c.overlaps_circle(1.5, 0.5, 0.35));
    }

    #[test]
    fn test_aabb_from_points() {
        let bb = Aabb::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 3.0, 2.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
