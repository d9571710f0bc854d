//! Section partitioner. Splits rooms along their divider coordinates.
//!
//! Sections are placement anchors only (one statue at each center). The cut
//! coordinates come from [`RoomLayout::x_cut`] / [`RoomLayout::z_cut`], which
//! read the same dividers the wall builder turns into segments.

use crate::floor_plan::{FloorPlan, RoomLayout};
use crate::geometry::RoomRect;
use serde::{Deserialize, Serialize};

/// A sub-rectangle of a room, tagged with the room's index in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionRect {
    pub room: usize,
    pub rect: RoomRect,
}

impl SectionRect {
    pub fn center(&self) -> (f32, f32) {
        self.rect.center()
    }
}

/// Cut one room into at most four sections, row-major (`z` then `x`
/// ascending). A room without dividers is a single section.
pub fn partition_room(room: &RoomLayout) -> Vec<RoomRect> {
    let r = room.rect;
    let xs: Vec<f32> = match room.x_cut() {
        Some(cx) => vec![r.x0, cx, r.x1],
        None => vec![r.x0, r.x1],
    };
    let zs: Vec<f32> = match room.z_cut() {
        Some(cz) => vec![r.z0, cz, r.z1],
        None => vec![r.z0, r.z1],
    };

    let mut sections = Vec::with_capacity((xs.len() - 1) * (zs.len() - 1));
    for zw in zs.windows(2) {
        for xw in xs.windows(2) {
            sections.push(RoomRect::new(xw[0], xw[1], zw[0], zw[1]));
        }
    }
    sections
}

/// Partition every room, in room order.
pub fn partition_floor_plan(plan: &FloorPlan) -> Vec<SectionRect> {
    plan.rooms
        .iter()
        .enumerate()
        .flat_map(|(room, layout)| {
            partition_room(layout)
                .into_iter()
                .map(move |rect| SectionRect { room, rect })
        })
        .collect()
}
