//! Axis-aligned bounding region for the whole flock.

use glam::Vec3;

/// Axis-aligned box covering the simulation domain, used to cull the single
/// instanced draw against the camera frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    /// World-space center of the region.
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
}

impl BoundingRegion {
    /// Derive the region from the simulation's reported area.
    ///
    /// Simulations with a radius-only (spherical) domain report their size
    /// as `(r, 0, 0)`; that degenerate extent becomes a cube of side `2r`
    /// so the box encloses the sphere. Any area with non-zero y and z
    /// extents passes through unchanged.
    pub fn from_simulation_area(center: Vec3, size: Vec3) -> Self {
        if size.y == 0.0 || size.z == 0.0 {
            Self {
                center,
                size: Vec3::splat(size.x * 2.0),
            }
        } else {
            Self { center, size }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_only_area_becomes_cube() {
        let region = BoundingRegion::from_simulation_area(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert_eq!(region.center, Vec3::ZERO);
        assert_eq!(region.size, Vec3::new(20.0, 20.0, 20.0));
    }

    #[test]
    fn test_zero_z_extent_also_triggers_cube_policy() {
        let region = BoundingRegion::from_simulation_area(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(5.0, 4.0, 0.0),
        );
        assert_eq!(region.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(region.size, Vec3::splat(10.0));
    }

    #[test]
    fn test_full_area_passes_through() {
        let region = BoundingRegion::from_simulation_area(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(32.0, 16.0, 8.0),
        );
        assert_eq!(region.center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(region.size, Vec3::new(32.0, 16.0, 8.0));
    }
}
