//! Mathematical types shared between the world core and the wire protocol.
//!
//! These are the canonical representations used in the network protocol;
//! their in-memory layout is fixed (`repr(C)`, `Pod`) so the protocol crate
//! can rely on their field widths.

use crate::constants::CHUNK_SHIFT;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - position, motion, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Distance squared (avoids sqrt)
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// True if every component is a finite number.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Chunk X coordinate of this position (16-unit granularity).
    #[must_use]
    pub fn chunk_x(self) -> i32 {
        chunk_coord(self.x)
    }

    /// Chunk Z coordinate of this position (16-unit granularity).
    #[must_use]
    pub fn chunk_z(self) -> i32 {
        chunk_coord(self.z)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Maps a world-space coordinate to its chunk coordinate.
///
/// Floor first, then arithmetic shift: x=15.9 is chunk 0, x=16.0 is
/// chunk 1, x=-0.5 is chunk -1.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn chunk_coord(world: f32) -> i32 {
    (world.floor() as i32) >> CHUNK_SHIFT
}

/// Entity body rotation.
///
/// Pitch and yaw describe the look direction; head yaw is carried
/// separately for entities whose head turns independently of the body.
/// Which components go on the wire is decided per packet type.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rotation {
    /// Pitch in degrees (positive looks down)
    pub pitch: f32,
    /// Yaw in degrees
    pub yaw: f32,
    /// Head yaw in degrees
    pub head_yaw: f32,
}

impl Rotation {
    /// Creates a rotation with an independent head yaw.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, head_yaw: f32) -> Self {
        Self { pitch, yaw, head_yaw }
    }

    /// Creates a rotation whose head yaw follows the body yaw.
    #[must_use]
    pub const fn body(pitch: f32, yaw: f32) -> Self {
        Self::new(pitch, yaw, yaw)
    }

    /// No rotation
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two arbitrary corners, normalizing min/max.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// True if the point lies inside the box (inclusive bounds).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 7.0);
        assert_eq!(sum.z, 9.0);

        let dot = a.dot(b);
        assert_eq!(dot, 32.0); // 1*4 + 2*5 + 3*6
    }

    #[test]
    fn test_vec3_wire_size() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12); // 3 * 4 bytes
    }

    #[test]
    fn test_chunk_coord_boundaries() {
        assert_eq!(chunk_coord(0.0), 0);
        assert_eq!(chunk_coord(15.0), 0);
        assert_eq!(chunk_coord(15.999), 0);
        assert_eq!(chunk_coord(16.0), 1);
        assert_eq!(chunk_coord(-0.5), -1);
        assert_eq!(chunk_coord(-16.0), -1);
        assert_eq!(chunk_coord(-16.5), -2);
    }

    #[test]
    fn test_aabb_contains_inclusive() {
        let bounds = Aabb::from_corners(Vec3::new(4.0, 0.0, -2.0), Vec3::new(-2.0, 8.0, 6.0));
        assert_eq!(bounds.min, Vec3::new(-2.0, 0.0, -2.0));

        assert!(bounds.contains(Vec3::new(0.0, 4.0, 0.0)));
        assert!(bounds.contains(Vec3::new(4.0, 8.0, 6.0))); // on the corner
        assert!(!bounds.contains(Vec3::new(4.1, 4.0, 0.0)));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }
}
