//! Artwork layout engine.
//!
//! Walks wall segments in construction order and hangs artworks in list
//! order, first fit:
//!
//! 1. `usable = L − 2·(M + W/2)`; nothing fits when `usable ≤ 0`.
//! 2. `count = floor(usable / S) + 1` slots spread evenly between the two
//!    insets (a single slot sits at the midpoint).
//! 3. Slots too close to a perpendicular wall that reaches this segment's
//!    line are dropped without consuming an artwork.
//! 4. Each surviving slot takes the next artwork from the session cursor;
//!    when the list runs out, layout stops.
//! 5. Frames face along the segment normal.
//!
//! The cursor lives in a [`LayoutSession`] value, so the pass has no hidden
//! state and the same inputs always give the same placements.

use crate::constants::frames::{
    CORNER_TOLERANCE, EDGE_MARGIN, FRAME_CENTER_HEIGHT, FRAME_SPACING, FRAME_WIDTH, GAP_FROM_WALL,
};
use crate::geometry::Vec3;
use crate::walls::WallSegment;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// One artwork image and its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkMeta {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ArtworkMeta {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: None,
            author: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Caption text: "Title — Author", falling back to whatever is known,
    /// then to the file name.
    pub fn caption(&self) -> String {
        match (&self.title, &self.author) {
            (Some(t), Some(a)) => format!("{t} — {a}"),
            (Some(t), None) => t.clone(),
            (None, Some(a)) => a.clone(),
            (None, None) => self.file.clone(),
        }
    }
}

/// Frame sizing and spacing rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// `W`: frame width.
    pub frame_width: f32,
    /// `S`: desired center-to-center spacing.
    pub spacing: f32,
    /// `M`: distance from a segment end to the nearest frame edge.
    pub edge_margin: f32,
    /// `G`: distance from the wall face to the frame.
    pub gap_from_wall: f32,
    /// `τ`: extra clearance in the corner filter.
    pub corner_tolerance: f32,
    /// Height of the frame center above the floor.
    pub frame_height: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            frame_width: FRAME_WIDTH,
            spacing: FRAME_SPACING,
            edge_margin: EDGE_MARGIN,
            gap_from_wall: GAP_FROM_WALL,
            corner_tolerance: CORNER_TOLERANCE,
            frame_height: FRAME_CENTER_HEIGHT,
        }
    }
}

impl LayoutParams {
    /// Distance from a segment end to the first / last slot center.
    pub fn inset(&self) -> f32 {
        self.edge_margin + self.frame_width / 2.0
    }
}

/// A frame placement: which artwork, on which segment, where and facing how.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramePlacement {
    /// Index into the artwork list.
    pub artwork: usize,
    /// Index into the segment list.
    pub segment: usize,
    /// Slot coordinate along the segment's axis.
    pub along: f32,
    pub position: Vec3,
    /// Rotation about +Y; a frame's front face is +Z at yaw 0.
    pub yaw: f32,
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub placements: Vec<FramePlacement>,
    /// Slots examined before the artwork list ran out.
    pub candidate_slots: usize,
    /// Examined slots dropped by the corner filter.
    pub blocked_slots: usize,
    /// Artworks that found no slot.
    pub unplaced: usize,
}

impl LayoutReport {
    pub fn placed(&self) -> usize {
        self.placements.len()
    }
}

/// Candidate slot coordinates along `segment` (steps 1–2).
pub fn segment_slots(segment: &WallSegment, params: &LayoutParams) -> Vec<f32> {
    let inset = params.inset();
    let usable = segment.length() - 2.0 * inset;
    if usable <= 0.0 || params.spacing <= 0.0 {
        return Vec::new();
    }
    let count = (usable / params.spacing).floor() as usize + 1;
    let start = segment.start() + inset;
    let end = segment.end() - inset;
    if count == 1 {
        return vec![(start + end) / 2.0];
    }
    let span = end - start;
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| start + span * (i as f32 / last))
        .collect()
}

/// Whether a slot at `along` on `segment` would hit a perpendicular wall
/// (step 3). Only segments of the opposite orientation are checked.
pub fn is_corner_blocked(
    segment: &WallSegment,
    along: f32,
    segments: &[WallSegment],
    params: &LayoutParams,
) -> bool {
    let reach = params.frame_width / 2.0 + params.corner_tolerance;
    meets_perpendicular(segment, along, reach, params.corner_tolerance, segments)
}

/// Whether a perpendicular segment that spans this one's line (within
/// `tolerance`) lies closer than `reach` to `along`.
pub fn meets_perpendicular(
    segment: &WallSegment,
    along: f32,
    reach: f32,
    tolerance: f32,
    segments: &[WallSegment],
) -> bool {
    let cross = segment.fixed();
    let perpendicular = segment.orientation().perpendicular();
    segments
        .iter()
        .filter(|other| other.orientation() == perpendicular)
        .any(|other| (along - other.fixed()).abs() < reach && other.covers(cross, tolerance))
}

/// Frame yaw from the segment's normal sign alone (step 5).
pub fn facing_yaw(segment: &WallSegment) -> f32 {
    match *segment {
        WallSegment::AlongX { nz, .. } => {
            if nz >= 0.0 {
                0.0
            } else {
                PI
            }
        }
        WallSegment::AlongZ { nx, .. } => {
            if nx >= 0.0 {
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            }
        }
    }
}

/// Number of slots that survive the corner filter across all segments,
/// regardless of how many artworks there are.
pub fn wall_capacity(segments: &[WallSegment], params: &LayoutParams) -> usize {
    segments
        .iter()
        .map(|seg| {
            segment_slots(seg, params)
                .into_iter()
                .filter(|&along| !is_corner_blocked(seg, along, segments, params))
                .count()
        })
        .sum()
}

/// One layout pass: owns the artwork cursor and the placements so far.
pub struct LayoutSession<'a> {
    artworks: &'a [ArtworkMeta],
    params: &'a LayoutParams,
    face_offset: f32,
    cursor: usize,
    report: LayoutReport,
}

impl<'a> LayoutSession<'a> {
    /// `face_offset` is the distance from a wall line to its face
    /// (half the wall thickness).
    pub fn new(artworks: &'a [ArtworkMeta], params: &'a LayoutParams, face_offset: f32) -> Self {
        Self {
            artworks,
            params,
            face_offset,
            cursor: 0,
            report: LayoutReport::default(),
        }
    }

    /// Index of the next artwork to place.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.artworks.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.artworks.len()
    }

    pub fn placements(&self) -> &[FramePlacement] {
        &self.report.placements
    }

    fn next_artwork(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }

    /// Fill `segments[index]`, checking corners against all of `segments`.
    /// Returns the number of frames placed on it.
    pub fn place_on_segment(&mut self, index: usize, segments: &[WallSegment]) -> usize {
        let Some(segment) = segments.get(index) else {
            return 0;
        };
        let yaw = facing_yaw(segment);
        let offset = self.face_offset + self.params.gap_from_wall;
        let mut placed = 0;

        for along in segment_slots(segment, self.params) {
            if self.is_exhausted() {
                break;
            }
            self.report.candidate_slots += 1;
            if is_corner_blocked(segment, along, segments, self.params) {
                self.report.blocked_slots += 1;
                continue;
            }
            let Some(artwork) = self.next_artwork() else {
                break;
            };
            let (x, z) = segment.point_at(along, offset);
            self.report.placements.push(FramePlacement {
                artwork,
                segment: index,
                along,
                position: Vec3::new(x, self.params.frame_height, z),
                yaw,
            });
            placed += 1;
        }

        log::debug!("segment #{index}: placed {placed} frame(s)");
        placed
    }

    /// Walk every segment in order until the artworks run out.
    pub fn run(mut self, segments: &[WallSegment]) -> LayoutReport {
        for index in 0..segments.len() {
            if self.is_exhausted() {
                break;
            }
            self.place_on_segment(index, segments);
        }
        self.finish()
    }

    /// Close the session and report what is left unplaced.
    pub fn finish(mut self) -> LayoutReport {
        self.report.unplaced = self.remaining();
        self.report
    }
}

/// Lay out `artworks` over `segments` in one pass.
pub fn layout_artworks(
    segments: &[WallSegment],
    artworks: &[ArtworkMeta],
    params: &LayoutParams,
    face_offset: f32,
) -> LayoutReport {
    let report = LayoutSession::new(artworks, params, face_offset).run(segments);
    log::info!(
        "Hung {} of {} artworks on {} segments ({} slots blocked by corners)",
        report.placed(),
        artworks.len(),
        segments.len(),
        report.blocked_slots
    );
    if report.unplaced > 0 {
        log::warn!(
            "{} artworks did not fit on the available walls",
            report.unplaced
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn south_wall() -> WallSegment {
        WallSegment::AlongX {
            z: -10.0,
            x0: -10.0,
            x1: 10.0,
            nz: 1.0,
        }
    }

    fn artworks(n: usize) -> Vec<ArtworkMeta> {
        (0..n).map(|i| ArtworkMeta::new(format!("art_{i}.jpg"))).collect()
    }

    #[test]
    fn test_twenty_meter_wall_has_five_slots() {
        let slots = segment_slots(&south_wall(), &LayoutParams::default());
        assert_eq!(slots.len(), 5);
        assert!((slots[0] + 8.3).abs() < 1e-4, "first={}", slots[0]);
        assert!((slots[4] - 8.3).abs() < 1e-4, "last={}", slots[4]);
        assert!(slots[2].abs() < 1e-4);
        let step = slots[1] - slots[0];
        for w in slots.windows(2) {
            assert!(((w[1] - w[0]) - step).abs() < 1e-4);
        }
    }

    #[test]
    fn test_short_segment_holds_nothing() {
        let seg = WallSegment::AlongZ {
            x: 0.0,
            z0: 0.0,
            z1: 3.3,
            nx: 1.0,
        };
        // shorter than 2·(M + W/2) = 3.4
        assert!(segment_slots(&seg, &LayoutParams::default()).is_empty());
    }

    #[test]
    fn test_single_slot_at_midpoint() {
        let seg = WallSegment::AlongZ {
            x: 0.0,
            z0: 2.0,
            z1: 8.0,
            nx: 1.0,
        };
        let slots = segment_slots(&seg, &LayoutParams::default());
        assert_eq!(slots.len(), 1);
        assert!((slots[0] - 5.0).abs() < 1e-5, "slot={}", slots[0]);
    }

    #[test]
    fn test_corner_filter_blocks_slot_at_divider() {
        let wall = south_wall();
        let divider = WallSegment::AlongZ {
            x: 0.0,
            z0: -10.0,
            z1: -3.0,
            nx: 1.0,
        };
        let segments = [wall, divider];
        let params = LayoutParams::default();
        assert!(is_corner_blocked(&wall, 0.0, &segments, &params));
        assert!(!is_corner_blocked(&wall, 4.15, &segments, &params));
    }

    #[test]
    fn test_corner_filter_needs_extent_to_reach_line() {
        let wall = south_wall();
        // Perpendicular wall at x=0 that stops 1m short of the south wall
        let divider = WallSegment::AlongZ {
            x: 0.0,
            z0: -9.0,
            z1: -3.0,
            nx: 1.0,
        };
        let params = LayoutParams::default();
        assert!(!is_corner_blocked(&wall, 0.0, &[wall, divider], &params));
    }

    #[test]
    fn test_corner_filter_ignores_same_orientation() {
        let wall = south_wall();
        let parallel = WallSegment::AlongX {
            z: -10.0,
            x0: -1.0,
            x1: 1.0,
            nz: -1.0,
        };
        let params = LayoutParams::default();
        assert!(!is_corner_blocked(&wall, 0.0, &[wall, parallel], &params));
    }

    #[test]
    fn test_facing_yaw_from_normal_sign() {
        assert_eq!(facing_yaw(&south_wall()), 0.0);
        let north = WallSegment::AlongX {
            z: 10.0,
            x0: -10.0,
            x1: 10.0,
            nz: -1.0,
        };
        assert_eq!(facing_yaw(&north), PI);
        let west = WallSegment::AlongZ {
            x: -10.0,
            z0: -10.0,
            z1: 10.0,
            nx: 1.0,
        };
        assert_eq!(facing_yaw(&west), FRAC_PI_2);
        let east = WallSegment::AlongZ {
            x: 10.0,
            z0: -10.0,
            z1: 10.0,
            nx: -1.0,
        };
        assert_eq!(facing_yaw(&east), -FRAC_PI_2);
    }

    #[test]
    fn test_frames_sit_proud_of_wall_face() {
        let params = LayoutParams::default();
        let arts = artworks(1);
        let report = layout_artworks(&[south_wall()], &arts, &params, 0.1);
        let p = report.placements[0];
        assert!((p.position.z - (-10.0 + 0.1 + params.gap_from_wall)).abs() < 1e-5);
        assert_eq!(p.position.y, params.frame_height);
    }

    #[test]
    fn test_blocked_slot_does_not_consume_artwork() {
        let wall = south_wall();
        let divider = WallSegment::AlongZ {
            x: 0.0,
            z0: -10.0,
            z1: -3.0,
            nx: 1.0,
        };
        let arts = artworks(10);
        let params = LayoutParams::default();
        let report = layout_artworks(&[wall, divider], &arts, &params, 0.1);
        let on_wall: Vec<_> = report.placements.iter().filter(|p| p.segment == 0).collect();
        assert_eq!(on_wall.len(), 4);
        let indices: Vec<usize> = on_wall.iter().map(|p| p.artwork).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(report.blocked_slots, 1);
    }

    #[test]
    fn test_exhaustion_stops_layout() {
        let arts = artworks(3);
        let segments = [south_wall(), south_wall()];
        let report = layout_artworks(&segments, &arts, &LayoutParams::default(), 0.1);
        assert_eq!(report.placed(), 3);
        assert_eq!(report.unplaced, 0);
        assert_eq!(report.candidate_slots, 3);
        assert!(report.placements.iter().all(|p| p.segment == 0));
    }

    #[test]
    fn test_session_cursor_threads_through_segments() {
        let arts = artworks(7);
        let params = LayoutParams::default();
        let segments = [south_wall(), south_wall()];
        let mut session = LayoutSession::new(&arts, &params, 0.1);
        assert_eq!(session.place_on_segment(0, &segments), 5);
        assert_eq!(session.cursor(), 5);
        assert_eq!(session.place_on_segment(1, &segments), 2);
        assert!(session.is_exhausted());
        assert_eq!(session.place_on_segment(1, &segments), 0);
        let report = session.finish();
        assert_eq!(report.placed(), 7);
        assert_eq!(report.placements[6].segment, 1);
    }

    #[test]
    fn test_wall_capacity_counts_unblocked_slots() {
        let wall = south_wall();
        let divider = WallSegment::AlongZ {
            x: 0.0,
            z0: -10.0,
            z1: -3.0,
            nx: 1.0,
        };
        // wall: 5 slots − 1 blocked; divider (7m): 2 slots
        assert_eq!(wall_capacity(&[wall, divider], &LayoutParams::default()), 6);
    }

    #[test]
    fn test_caption_fallbacks() {
        let a = ArtworkMeta::new("x.jpg");
        assert_eq!(a.caption(), "x.jpg");
        let a = a.with_title("Water Lilies");
        assert_eq!(a.caption(), "Water Lilies");
        let a = a.with_author("Claude Monet");
        assert_eq!(a.caption(), "Water Lilies — Claude Monet");
    }
}
