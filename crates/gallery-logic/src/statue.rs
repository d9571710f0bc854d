//! Statue placement: catalog cycling, upright correction, pedestal seating.
//!
//! Statue models load asynchronously. The emitter issues one
//! [`StatueRequest`] per section; when the load settles the factory calls
//! [`StatueRequest::on_loaded`] with the model's measured bounds, or
//! [`StatueRequest::on_failed`] to get a fallback primitive. Both are pure
//! and never fail, so one bad model cannot disturb another section.
//!
//! Seating a loaded model:
//! 1. find the long axis of its bounds,
//! 2. turn that axis upright (X: +90° about Z, Z: −90° about X),
//! 3. apply the catalog's uniform scale,
//! 4. re-measure and lift it so its lowest point rests on the plinth top,
//! 5. yaw it slightly, alternating by placement index.

use crate::assets::asset_path;
use crate::constants::statues::{FALLBACK_SIZE, PLINTH_HEIGHT, PLINTH_SIZE, STATUE_YAW};
use crate::emit::PrimitiveKind;
use crate::geometry::{Aabb, Vec3};
use crate::sections::SectionRect;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// One statue model in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatueAsset {
    pub base_path: String,
    pub model_file: String,
    pub material_file: String,
    /// Uniform scale applied after the upright correction.
    pub scale: f32,
}

impl StatueAsset {
    pub fn model_path(&self) -> String {
        asset_path(&self.base_path, &self.model_file)
    }

    pub fn material_path(&self) -> String {
        asset_path(&self.base_path, &self.material_file)
    }
}

/// Plinth and statue dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatueParams {
    /// Plinth top height; every statue rests exactly on it.
    pub plinth_height: f32,
    pub plinth_size: f32,
    /// Magnitude of the alternating yaw.
    pub yaw: f32,
    pub fallback_size: f32,
}

impl Default for StatueParams {
    fn default() -> Self {
        Self {
            plinth_height: PLINTH_HEIGHT,
            plinth_size: PLINTH_SIZE,
            yaw: STATUE_YAW,
            fallback_size: FALLBACK_SIZE,
        }
    }
}

/// Catalog entry for placement `index`, cycling through the catalog.
pub fn catalog_entry(catalog: &[StatueAsset], index: usize) -> Option<&StatueAsset> {
    if catalog.is_empty() {
        return None;
    }
    catalog.get(index % catalog.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongAxis {
    X,
    Y,
    Z,
}

/// Axis with the largest extent. Ties go to Y (already upright), then X.
pub fn long_axis(bounds: &Aabb) -> LongAxis {
    let e = bounds.extents();
    if e.y >= e.x && e.y >= e.z {
        LongAxis::Y
    } else if e.x >= e.z {
        LongAxis::X
    } else {
        LongAxis::Z
    }
}

/// Rotation that stands a model's long axis up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UprightCorrection {
    None,
    /// +90° about Z: X becomes Y.
    RollZ,
    /// −90° about X: Z becomes Y.
    PitchX,
}

impl UprightCorrection {
    pub fn for_axis(axis: LongAxis) -> Self {
        match axis {
            LongAxis::X => UprightCorrection::RollZ,
            LongAxis::Y => UprightCorrection::None,
            LongAxis::Z => UprightCorrection::PitchX,
        }
    }

    /// Rotation angle in radians about the correction's own axis.
    pub fn angle(&self) -> f32 {
        match self {
            UprightCorrection::None => 0.0,
            UprightCorrection::RollZ => FRAC_PI_2,
            UprightCorrection::PitchX => -FRAC_PI_2,
        }
    }

    /// Rotate a point.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        match self {
            UprightCorrection::None => p,
            UprightCorrection::RollZ => Vec3::new(-p.y, p.x, p.z),
            UprightCorrection::PitchX => Vec3::new(p.x, p.z, -p.y),
        }
    }
}

/// Bounds after correction and uniform scale.
pub fn corrected_bounds(bounds: &Aabb, correction: UprightCorrection, scale: f32) -> Aabb {
    let corners = bounds.corners().map(|c| correction.apply(c).scale(scale));
    Aabb::from_points(corners).unwrap_or(*bounds)
}

/// Alternating yaw: `+yaw` on even placement index, `−yaw` on odd.
pub fn placement_yaw(index: usize, params: &StatueParams) -> f32 {
    if index % 2 == 0 {
        params.yaw
    } else {
        -params.yaw
    }
}

/// Where a statue goes: the section center and its placement index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatueAnchor {
    /// Placement index (0-based, across all sections).
    pub index: usize,
    /// Index of the section in the floor plan's section list.
    pub section: usize,
    pub x: f32,
    pub z: f32,
}

/// Final transform of a statue or its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatuePose {
    pub translation: Vec3,
    pub correction: UprightCorrection,
    pub scale: f32,
    /// Rotation about +Y applied after the correction.
    pub yaw: f32,
}

/// Seat a loaded model measured by `bounds` on the plinth at `anchor`.
pub fn fit_statue(
    bounds: &Aabb,
    scale: f32,
    anchor: &StatueAnchor,
    params: &StatueParams,
) -> StatuePose {
    let correction = UprightCorrection::for_axis(long_axis(bounds));
    let fitted = corrected_bounds(bounds, correction, scale);
    StatuePose {
        translation: Vec3::new(anchor.x, params.plinth_height - fitted.min.y, anchor.z),
        correction,
        scale,
        yaw: placement_yaw(anchor.index, params),
    }
}

/// Primitive shown instead of a model that failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackStatue {
    pub kind: PrimitiveKind,
    pub pose: StatuePose,
}

/// Deterministic fallback for `anchor`: the shape cycles with the
/// placement index and sits on the same plinth top.
pub fn fallback_statue(anchor: &StatueAnchor, params: &StatueParams) -> FallbackStatue {
    let s = params.fallback_size;
    let kind = match anchor.index % 3 {
        0 => PrimitiveKind::Sphere { radius: s / 2.0 },
        1 => PrimitiveKind::Cone {
            radius: s / 2.0,
            height: s * 1.5,
        },
        _ => PrimitiveKind::Cuboid {
            width: s * 0.7,
            height: s * 1.4,
            depth: s * 0.7,
        },
    };
    FallbackStatue {
        kind,
        pose: StatuePose {
            translation: Vec3::new(
                anchor.x,
                params.plinth_height + kind.height() / 2.0,
                anchor.z,
            ),
            correction: UprightCorrection::None,
            scale: 1.0,
            yaw: placement_yaw(anchor.index, params),
        },
    }
}

/// An outstanding statue load for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatueRequest {
    pub anchor: StatueAnchor,
    pub asset: StatueAsset,
}

impl StatueRequest {
    /// Pose for a model that loaded with the given bounds.
    pub fn on_loaded(&self, bounds: &Aabb, params: &StatueParams) -> StatuePose {
        fit_statue(bounds, self.asset.scale, &self.anchor, params)
    }

    /// Fallback for a model that failed to load.
    pub fn on_failed(&self, reason: &str, params: &StatueParams) -> FallbackStatue {
        log::warn!(
            "statue '{}' for section #{} failed to load ({reason}); using fallback",
            self.asset.model_path(),
            self.anchor.section
        );
        fallback_statue(&self.anchor, params)
    }
}

/// One request per section center, cycling through the catalog.
/// An empty catalog yields no requests.
pub fn statue_requests(sections: &[SectionRect], catalog: &[StatueAsset]) -> Vec<StatueRequest> {
    sections
        .iter()
        .enumerate()
        .filter_map(|(index, section)| {
            let asset = catalog_entry(catalog, index)?;
            let (x, z) = section.center();
            Some(StatueRequest {
                anchor: StatueAnchor {
                    index,
                    section: index,
                    x,
                    z,
                },
                asset: asset.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RoomRect;

    fn asset(name: &str, scale: f32) -> StatueAsset {
        StatueAsset {
            base_path: format!("models/{name}"),
            model_file: format!("{name}.glb"),
            material_file: format!("{name}.png"),
            scale,
        }
    }

    fn anchor(index: usize) -> StatueAnchor {
        StatueAnchor {
            index,
            section: index,
            x: 3.0,
            z: -2.0,
        }
    }

    fn bounds(min: (f32, f32, f32), max: (f32, f32, f32)) -> Aabb {
        Aabb::new(Vec3::new(min.0, min.1, min.2), Vec3::new(max.0, max.1, max.2))
    }

    #[test]
    fn test_long_axis() {
        assert_eq!(long_axis(&bounds((0., 0., 0.), (3., 1., 1.))), LongAxis::X);
        assert_eq!(long_axis(&bounds((0., 0., 0.), (1., 3., 1.))), LongAxis::Y);
        assert_eq!(long_axis(&bounds((0., 0., 0.), (1., 1., 3.))), LongAxis::Z);
        assert_eq!(long_axis(&bounds((0., 0., 0.), (2., 2., 2.))), LongAxis::Y);
    }

    #[test]
    fn test_lying_model_is_stood_up_on_x() {
        // 2m long on X, lying on its side
        let b = bounds((-1.0, -0.25, -0.3), (1.0, 0.25, 0.3));
        let fitted = corrected_bounds(&b, UprightCorrection::RollZ, 1.0);
        let e = fitted.extents();
        assert!((e.y - 2.0).abs() < 1e-5);
        assert!((e.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_lying_model_is_stood_up_on_z() {
        let b = bounds((-0.2, 0.0, -1.5), (0.2, 0.4, 1.5));
        let fitted = corrected_bounds(&b, UprightCorrection::PitchX, 1.0);
        assert!((fitted.extents().y - 3.0).abs() < 1e-5);
        assert!((fitted.extents().z - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_fit_seats_on_plinth() {
        let params = StatueParams::default();
        let b = bounds((-1.0, -0.25, -0.3), (1.0, 0.25, 0.3));
        let pose = fit_statue(&b, 0.5, &anchor(0), &params);
        assert_eq!(pose.correction, UprightCorrection::RollZ);
        // After RollZ the model spans y ∈ [-1, 1], scaled to [-0.5, 0.5]
        let fitted = corrected_bounds(&b, pose.correction, pose.scale);
        let bottom = fitted.min.y + pose.translation.y;
        assert!((bottom - params.plinth_height).abs() < 1e-5, "bottom={bottom}");
        assert_eq!((pose.translation.x, pose.translation.z), (3.0, -2.0));
    }

    #[test]
    fn test_upright_model_keeps_orientation() {
        let params = StatueParams::default();
        let b = bounds((-0.3, 0.2, -0.3), (0.3, 2.2, 0.3));
        let pose = fit_statue(&b, 1.0, &anchor(1), &params);
        assert_eq!(pose.correction, UprightCorrection::None);
        assert!((pose.translation.y - (params.plinth_height - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_alternates_by_parity() {
        let params = StatueParams::default();
        assert_eq!(placement_yaw(0, &params), params.yaw);
        assert_eq!(placement_yaw(1, &params), -params.yaw);
        assert_eq!(placement_yaw(4, &params), params.yaw);
    }

    #[test]
    fn test_fallback_is_deterministic_and_seated() {
        let params = StatueParams::default();
        for i in 0..6 {
            let a = fallback_statue(&anchor(i), &params);
            let b = fallback_statue(&anchor(i), &params);
            assert_eq!(a, b);
            let bottom = a.pose.translation.y - a.kind.height() / 2.0;
            assert!((bottom - params.plinth_height).abs() < 1e-5);
        }
        assert_ne!(
            fallback_statue(&anchor(0), &params).kind,
            fallback_statue(&anchor(1), &params).kind
        );
    }

    #[test]
    fn test_catalog_cycles() {
        let catalog = vec![asset("venus", 1.0), asset("david", 0.8)];
        let sections: Vec<SectionRect> = (0..5)
            .map(|i| SectionRect {
                room: 0,
                rect: RoomRect::new(i as f32, i as f32 + 1.0, 0.0, 1.0),
            })
            .collect();
        let requests = statue_requests(&sections, &catalog);
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[2].asset.model_file, "venus.glb");
        assert_eq!(requests[3].asset.model_file, "david.glb");
        assert_eq!(requests[4].anchor.x, 4.5);
        assert!(statue_requests(&sections, &[]).is_empty());
    }

    #[test]
    fn test_asset_paths() {
        let a = asset("venus", 1.0);
        assert_eq!(a.model_path(), "models/venus/venus.glb");
        assert_eq!(a.material_path(), "models/venus/venus.png");
    }
}
