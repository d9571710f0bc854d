//! Room layouts: the single source of room geometry.
//!
//! A [`RoomLayout`] bundles a room rectangle with its four boundary descriptions
//! and its interior dividers. Both the wall builder ([`crate::walls`]) and
//! the section partitioner ([`crate::sections`]) consume the same value, so
//! a divider's coordinate is written exactly once.
//!
//! ```text
//!              north (z1, normal -z)
//!        ┌──────────────  ──────────────┐
//!        │                              │
//!   west │          ┃                   │ east
//!  (x0,  │          ┃ divider           │ (x1,
//!   +x)  │          ┃                   │  -x)
//!        └──────────┸───────────────────┘
//!              south (z0, normal +z)
//! ```

use crate::constants::walls::DOORWAY_WIDTH;
use crate::geometry::RoomRect;
use crate::walls::WallSegment;
use serde::{Deserialize, Serialize};

/// Which floor axis a wall runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Runs along X at a fixed Z.
    AlongX,
    /// Runs along Z at a fixed X.
    AlongZ,
}

impl Orientation {
    pub fn perpendicular(self) -> Orientation {
        match self {
            Orientation::AlongX => Orientation::AlongZ,
            Orientation::AlongZ => Orientation::AlongX,
        }
    }
}

/// One side of a room.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    #[default]
    Solid,
    /// Solid wall with a doorway of `width` centered on the side.
    Doorway { width: f32 },
}

impl Boundary {
    /// A doorway of the standard width.
    pub fn doorway() -> Self {
        Boundary::Doorway {
            width: DOORWAY_WIDTH,
        }
    }
}

/// A partial interior wall. Frames hang on the face its `normal` points out of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub orientation: Orientation,
    /// Fixed coordinate: `z` for [`Orientation::AlongX`], `x` for [`Orientation::AlongZ`].
    pub at: f32,
    pub from: f32,
    pub to: f32,
    /// ±1 along the perpendicular axis.
    pub normal: f32,
}

impl Divider {
    pub fn along_x(z: f32, x0: f32, x1: f32, nz: f32) -> Self {
        Self {
            orientation: Orientation::AlongX,
            at: z,
            from: x0,
            to: x1,
            normal: nz.signum(),
        }
    }

    pub fn along_z(x: f32, z0: f32, z1: f32, nx: f32) -> Self {
        Self {
            orientation: Orientation::AlongZ,
            at: x,
            from: z0,
            to: z1,
            normal: nx.signum(),
        }
    }

    /// The wall segment this divider renders as.
    pub fn segment(&self) -> WallSegment {
        match self.orientation {
            Orientation::AlongX => WallSegment::AlongX {
                z: self.at,
                x0: self.from,
                x1: self.to,
                nz: self.normal,
            },
            Orientation::AlongZ => WallSegment::AlongZ {
                x: self.at,
                z0: self.from,
                z1: self.to,
                nx: self.normal,
            },
        }
    }
}

/// A room rectangle with its boundaries and dividers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    pub name: String,
    pub rect: RoomRect,
    #[serde(default)]
    pub south: Boundary,
    #[serde(default)]
    pub north: Boundary,
    #[serde(default)]
    pub west: Boundary,
    #[serde(default)]
    pub east: Boundary,
    #[serde(default)]
    pub dividers: Vec<Divider>,
}

impl RoomLayout {
    /// A closed room with four solid walls and no dividers.
    pub fn new(name: impl Into<String>, rect: RoomRect) -> Self {
        Self {
            name: name.into(),
            rect,
            south: Boundary::Solid,
            north: Boundary::Solid,
            west: Boundary::Solid,
            east: Boundary::Solid,
            dividers: Vec::new(),
        }
    }

    pub fn with_south(mut self, b: Boundary) -> Self {
        self.south = b;
        self
    }

    pub fn with_north(mut self, b: Boundary) -> Self {
        self.north = b;
        self
    }

    pub fn with_west(mut self, b: Boundary) -> Self {
        self.west = b;
        self
    }

    pub fn with_east(mut self, b: Boundary) -> Self {
        self.east = b;
        self
    }

    pub fn with_divider(mut self, d: Divider) -> Self {
        self.dividers.push(d);
        self
    }

    /// X coordinate of the vertical section cut: the first `AlongZ` divider
    /// strictly inside the room.
    pub fn x_cut(&self) -> Option<f32> {
        self.first_cut(Orientation::AlongZ, self.rect.x0, self.rect.x1)
    }

    /// Z coordinate of the horizontal section cut: the first `AlongX` divider
    /// strictly inside the room.
    pub fn z_cut(&self) -> Option<f32> {
        self.first_cut(Orientation::AlongX, self.rect.z0, self.rect.z1)
    }

    fn first_cut(&self, orientation: Orientation, lo: f32, hi: f32) -> Option<f32> {
        self.dividers
            .iter()
            .find(|d| d.orientation == orientation)
            .map(|d| d.at)
            .filter(|&at| at > lo && at < hi)
    }
}

/// All rooms of the museum, in construction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub rooms: Vec<RoomLayout>,
}

impl FloorPlan {
    pub fn new(rooms: Vec<RoomLayout>) -> Self {
        Self { rooms }
    }

    /// The default three-room museum: a 20×20 atrium with a wing to the
    /// east and a wing to the north, joined by centered doorways.
    pub fn museum() -> Self {
        let atrium = RoomLayout::new("atrium", RoomRect::new(-10.0, 10.0, -10.0, 10.0))
            .with_north(Boundary::doorway())
            .with_east(Boundary::doorway())
            .with_divider(Divider::along_z(0.0, -10.0, -3.0, 1.0))
            .with_divider(Divider::along_x(0.0, -10.0, -4.0, 1.0));

        let east_wing = RoomLayout::new("east wing", RoomRect::new(10.0, 30.0, -10.0, 10.0))
            .with_west(Boundary::doorway())
            .with_divider(Divider::along_x(0.0, 15.0, 25.0, -1.0));

        let north_wing = RoomLayout::new("north wing", RoomRect::new(-10.0, 10.0, 10.0, 26.0))
            .with_south(Boundary::doorway())
            .with_divider(Divider::along_z(0.0, 18.0, 26.0, -1.0));

        Self::new(vec![atrium, east_wing, north_wing])
    }

    /// Bounding rectangle of every room. `None` for an empty plan.
    pub fn bounds(&self) -> Option<RoomRect> {
        let mut rects = self.rooms.iter().map(|r| r.rect);
        let first = rects.next()?;
        Some(rects.fold(first, |acc, r| acc.union(&r)))
    }

    /// Centers of every section, in partition order. These are the statue
    /// anchors.
    pub fn section_centers(&self) -> Vec<(f32, f32)> {
        crate::sections::partition_floor_plan(self)
            .iter()
            .map(|s| s.center())
            .collect()
    }

    /// Index of the room containing `(x, z)`, if any.
    pub fn room_at(&self, x: f32, z: f32) -> Option<usize> {
        self.rooms.iter().position(|r| r.rect.contains(x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuts_come_from_first_divider_per_axis() {
        let room = RoomLayout::new("r", RoomRect::new(0.0, 10.0, 0.0, 10.0))
            .with_divider(Divider::along_z(4.0, 0.0, 6.0, 1.0))
            .with_divider(Divider::along_z(7.0, 0.0, 6.0, 1.0))
            .with_divider(Divider::along_x(3.0, 0.0, 5.0, -1.0));
        assert_eq!(room.x_cut(), Some(4.0));
        assert_eq!(room.z_cut(), Some(3.0));
    }

    #[test]
    fn test_cut_on_room_edge_is_ignored() {
        let room = RoomLayout::new("r", RoomRect::new(0.0, 10.0, 0.0, 10.0))
            .with_divider(Divider::along_z(10.0, 0.0, 6.0, -1.0));
        assert_eq!(room.x_cut(), None);
    }

    #[test]
    fn test_divider_segment_keeps_coordinates() {
        let d = Divider::along_x(2.5, -1.0, 3.0, -4.0);
        assert_eq!(
            d.segment(),
            WallSegment::AlongX {
                z: 2.5,
                x0: -1.0,
                x1: 3.0,
                nz: -1.0
            }
        );
    }

    #[test]
    fn test_museum_bounds() {
        let b = FloorPlan::museum().bounds().unwrap();
        assert_eq!(b, RoomRect::new(-10.0, 30.0, -10.0, 26.0));
        assert!(FloorPlan::new(vec![]).bounds().is_none());
    }

    #[test]
    fn test_room_at() {
        let plan = FloorPlan::museum();
        assert_eq!(plan.room_at(0.0, 0.0), Some(0));
        assert_eq!(plan.room_at(20.0, 0.0), Some(1));
        assert_eq!(plan.room_at(0.0, 20.0), Some(2));
        assert_eq!(plan.room_at(20.0, 20.0), None);
    }

    #[test]
    fn test_boundary_json_shape() {
        let json = r#"{"kind":"doorway","width":2.5}"#;
        let b: Boundary = serde_json::from_str(json).unwrap();
        assert_eq!(b, Boundary::Doorway { width: 2.5 });
    }
}
