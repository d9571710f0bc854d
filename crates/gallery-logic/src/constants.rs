//! Scene constants: the implicit floor plan of the museum.
//!
//! Plain `f32` literals in meters (angles in radians) with no runtime
//! dependency. The `Default` impls of the parameter structs in [`crate::walls`],
//! [`crate::layout`], [`crate::decor`] and [`crate::statue`] read from here,
//! so a default `GalleryConfig` reproduces these values exactly.

pub mod walls {
    /// Height of every wall, floor to ceiling.
    pub const WALL_HEIGHT: f32 = 4.0;
    /// Wall thickness; colliders are this thick, centered on the wall line.
    pub const WALL_THICKNESS: f32 = 0.2;
    /// Width of a centered doorway cut into a boundary wall.
    pub const DOORWAY_WIDTH: f32 = 3.0;
    /// Flanks shorter than this next to a doorway are treated as flush.
    pub const MIN_CLEARANCE: f32 = 0.01;
}

pub mod frames {
    /// Width of a picture frame.
    pub const FRAME_WIDTH: f32 = 1.8;
    /// Desired center-to-center spacing between frames on one segment.
    pub const FRAME_SPACING: f32 = 3.6;
    /// Distance from a segment end to the nearest frame edge.
    pub const EDGE_MARGIN: f32 = 0.8;
    /// Distance between the wall face and the back of a frame.
    pub const GAP_FROM_WALL: f32 = 0.05;
    /// Extra clearance around a perpendicular wall in the corner filter.
    pub const CORNER_TOLERANCE: f32 = 0.05;
    /// Height of a frame's center above the floor.
    pub const FRAME_CENTER_HEIGHT: f32 = 1.7;
    /// Smallest accepted center-to-center spacing for anything hung in a row.
    pub const MIN_SPACING: f32 = 0.1;
}

pub mod statues {
    /// Height of the plinth top; statues are seated exactly on it.
    pub const PLINTH_HEIGHT: f32 = 0.8;
    /// Footprint (square) of a plinth.
    pub const PLINTH_SIZE: f32 = 1.0;
    /// Yaw applied to statues, positive on even placement index, negative on odd.
    pub const STATUE_YAW: f32 = 0.2;
    /// Characteristic size of the fallback primitive shown when a model fails.
    pub const FALLBACK_SIZE: f32 = 0.6;
}

pub mod decor {
    pub const BASEBOARD_HEIGHT: f32 = 0.15;
    pub const BASEBOARD_DEPTH: f32 = 0.03;
    pub const CROWN_HEIGHT: f32 = 0.12;
    pub const CROWN_DEPTH: f32 = 0.06;
    /// Center-to-center spacing of wall sconces.
    pub const SCONCE_SPACING: f32 = 7.2;
    /// Distance from a segment end to the nearest sconce.
    pub const SCONCE_MARGIN: f32 = 1.0;
    /// Height of a sconce above the floor (above the frames).
    pub const SCONCE_HEIGHT: f32 = 3.1;
    /// How far a sconce stands off the wall face.
    pub const SCONCE_STANDOFF: f32 = 0.12;
    /// Half the width of a sconce shade along its wall.
    pub const SCONCE_HALF_WIDTH: f32 = 0.09;
}

pub mod player {
    /// Radius of the player's collision circle.
    pub const PLAYER_RADIUS: f32 = 0.35;
    /// Eye height of the first-person camera.
    pub const EYE_HEIGHT: f32 = 1.65;
    /// Walking speed in meters per second.
    pub const WALK_SPEED: f32 = 4.0;
}

/// Image base URL prepended to every artwork `file`.
pub const IMAGE_BASE_URL: &str = "images/";
