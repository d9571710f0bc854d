//! Wall decor: baseboard and crown trims, and wall sconces.
//!
//! Like the artwork layout, decor is computed per [`WallSegment`] and faces
//! along the segment normal. Trims run the full length of a segment;
//! sconces are spread evenly above the frames, skipping any spot where a
//! perpendicular wall meets the segment.

use crate::constants::decor::{
    BASEBOARD_DEPTH, BASEBOARD_HEIGHT, CROWN_DEPTH, CROWN_HEIGHT, SCONCE_HALF_WIDTH, SCONCE_HEIGHT,
    SCONCE_MARGIN, SCONCE_SPACING, SCONCE_STANDOFF,
};
use crate::geometry::Vec3;
use crate::layout::{facing_yaw, meets_perpendicular};
use crate::walls::WallSegment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorParams {
    pub baseboard_height: f32,
    pub baseboard_depth: f32,
    pub crown_height: f32,
    pub crown_depth: f32,
    pub sconce_spacing: f32,
    pub sconce_margin: f32,
    pub sconce_height: f32,
    pub sconce_standoff: f32,
}

impl Default for DecorParams {
    fn default() -> Self {
        Self {
            baseboard_height: BASEBOARD_HEIGHT,
            baseboard_depth: BASEBOARD_DEPTH,
            crown_height: CROWN_HEIGHT,
            crown_depth: CROWN_DEPTH,
            sconce_spacing: SCONCE_SPACING,
            sconce_margin: SCONCE_MARGIN,
            sconce_height: SCONCE_HEIGHT,
            sconce_standoff: SCONCE_STANDOFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimKind {
    Baseboard,
    Crown,
}

/// A trim strip: a box `length × height × depth`, rotated by `yaw` so its
/// length runs along the segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimPiece {
    pub kind: TrimKind,
    pub segment: usize,
    pub center: Vec3,
    pub length: f32,
    pub height: f32,
    pub depth: f32,
    pub yaw: f32,
}

/// A wall light anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SconceSlot {
    pub segment: usize,
    pub position: Vec3,
    pub yaw: f32,
}

/// Trims and sconces for a whole wall set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decor {
    pub trims: Vec<TrimPiece>,
    pub sconces: Vec<SconceSlot>,
}

/// Baseboard and crown moulding for `segment` (at index `index`).
pub fn trims_for_segment(
    segment: &WallSegment,
    index: usize,
    face_offset: f32,
    wall_height: f32,
    params: &DecorParams,
) -> [TrimPiece; 2] {
    let mid = (segment.start() + segment.end()) / 2.0;
    let yaw = facing_yaw(segment);
    let piece = |kind, height: f32, depth: f32, y: f32| {
        let (x, z) = segment.point_at(mid, face_offset + depth / 2.0);
        TrimPiece {
            kind,
            segment: index,
            center: Vec3::new(x, y, z),
            length: segment.length(),
            height,
            depth,
            yaw,
        }
    };
    [
        piece(
            TrimKind::Baseboard,
            params.baseboard_height,
            params.baseboard_depth,
            params.baseboard_height / 2.0,
        ),
        piece(
            TrimKind::Crown,
            params.crown_height,
            params.crown_depth,
            wall_height - params.crown_height / 2.0,
        ),
    ]
}

/// Sconces along `segment`, spaced like frames but with their own margin.
pub fn sconces_for_segment(
    segment: &WallSegment,
    index: usize,
    face_offset: f32,
    params: &DecorParams,
) -> Vec<SconceSlot> {
    let usable = segment.length() - 2.0 * params.sconce_margin;
    if usable < 0.0 || params.sconce_spacing <= 0.0 {
        return Vec::new();
    }
    let count = (usable / params.sconce_spacing).floor() as usize + 1;
    let start = segment.start() + params.sconce_margin;
    let yaw = facing_yaw(segment);
    let offset = face_offset + params.sconce_standoff;

    (0..count)
        .map(|i| {
            let along = if count == 1 {
                (segment.start() + segment.end()) / 2.0
            } else {
                start + usable * (i as f32 / (count - 1) as f32)
            };
            let (x, z) = segment.point_at(along, offset);
            SconceSlot {
                segment: index,
                position: Vec3::new(x, params.sconce_height, z),
                yaw,
            }
        })
        .collect()
}

/// Decorate every segment. `face_offset` is half the wall thickness.
pub fn decorate_walls(
    segments: &[WallSegment],
    face_offset: f32,
    wall_height: f32,
    params: &DecorParams,
) -> Decor {
    let mut decor = Decor::default();
    for (index, segment) in segments.iter().enumerate() {
        decor
            .trims
            .extend(trims_for_segment(segment, index, face_offset, wall_height, params));
        // Keep the shade clear of a meeting wall's faces, including walls
        // that stop short of this line but reach out to the shade
        let reach = SCONCE_HALF_WIDTH + face_offset;
        let span = 2.0 * face_offset + params.sconce_standoff;
        decor.sconces.extend(
            sconces_for_segment(segment, index, face_offset, params)
                .into_iter()
                .filter(|s| {
                    let along = segment.along(s.position.x, s.position.z);
                    !meets_perpendicular(segment, along, reach, span, segments)
                }),
        );
    }
    decor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn west_wall() -> WallSegment {
        WallSegment::AlongZ {
            x: -10.0,
            z0: -10.0,
            z1: 10.0,
            nx: 1.0,
        }
    }

    #[test]
    fn test_trims_run_full_length() {
        let params = DecorParams::default();
        let [base, crown] = trims_for_segment(&west_wall(), 3, 0.1, 4.0, &params);
        assert_eq!(base.kind, TrimKind::Baseboard);
        assert_eq!(base.segment, 3);
        assert_eq!(base.length, 20.0);
        assert!((base.center.y - params.baseboard_height / 2.0).abs() < 1e-6);
        assert!((crown.center.y - (4.0 - params.crown_height / 2.0)).abs() < 1e-6);
        // pushed into the room along +x
        assert!(base.center.x > -10.0);
        assert_eq!(base.center.z, 0.0);
    }

    #[test]
    fn test_sconces_evenly_spaced() {
        let params = DecorParams::default();
        let sconces = sconces_for_segment(&west_wall(), 0, 0.1, &params);
        // usable = 20 − 2 = 18 → floor(18 / 7.2) + 1 = 3
        assert_eq!(sconces.len(), 3);
        assert!((sconces[0].position.z + 9.0).abs() < 1e-5);
        assert!(sconces[1].position.z.abs() < 1e-5);
        assert!((sconces[2].position.z - 9.0).abs() < 1e-5);
        assert!(sconces.iter().all(|s| s.position.y == params.sconce_height));
    }

    #[test]
    fn test_short_segment_gets_no_sconce() {
        let seg = WallSegment::AlongX {
            z: 0.0,
            x0: 0.0,
            x1: 1.5,
            nz: 1.0,
        };
        assert!(sconces_for_segment(&seg, 0, 0.1, &DecorParams::default()).is_empty());
    }

    #[test]
    fn test_sconce_skipped_where_divider_meets_wall() {
        let south = WallSegment::AlongX {
            z: -10.0,
            x0: -10.0,
            x1: 10.0,
            nz: 1.0,
        };
        let divider = WallSegment::AlongZ {
            x: 0.0,
            z0: -10.0,
            z1: -3.0,
            nx: 1.0,
        };
        let decor = decorate_walls(&[south, divider], 0.1, 4.0, &DecorParams::default());
        let on_south: Vec<_> = decor.sconces.iter().filter(|s| s.segment == 0).collect();
        // x = −9, 0, 9 before filtering; the middle one sits on the divider
        assert_eq!(on_south.len(), 2);
        assert!(on_south.iter().all(|s| s.position.x.abs() > 1.0));
    }

    #[test]
    fn test_decorate_counts() {
        let decor = decorate_walls(&[west_wall(), west_wall()], 0.1, 4.0, &DecorParams::default());
        assert_eq!(decor.trims.len(), 4);
        assert_eq!(decor.sconces.len(), 6);
    }
}
