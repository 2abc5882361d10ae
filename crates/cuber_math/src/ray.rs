//! Rays and planes in 3D space.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::approx_cmp::*;
use crate::Float;

/// Half-line starting at `origin` and extending along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point3<Float>,
    /// Direction of the ray (normalized).
    pub direction: Vector3<Float>,
}
impl Ray {
    /// Constructs a ray from `origin` through `target`.
    ///
    /// Returns `None` if the points coincide.
    pub fn through(origin: Point3<Float>, target: Point3<Float>) -> Option<Self> {
        let delta = target - origin;
        is_approx_nonzero(&delta.magnitude2()).then(|| Self {
            origin,
            direction: delta.normalize(),
        })
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: Float) -> Point3<Float> {
        self.origin + self.direction * t
    }

    /// Returns the point at which the ray intersects the plane, or `None` if
    /// it doesn't.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3<Float>> {
        let denominator = plane.normal.dot(self.direction);
        if !is_approx_nonzero(&denominator) {
            // Parallel to the plane; only the origin could be on it.
            return approx_eq(&plane.distance_to_point(self.origin), &0.0).then_some(self.origin);
        }
        let t = -(self.origin.to_vec().dot(plane.normal) + plane.constant) / denominator;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Plane consisting of the points `p` where `normal · p + constant == 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector.
    pub normal: Vector3<Float>,
    /// Negated signed distance from the origin along `normal`.
    pub constant: Float,
}
impl Plane {
    /// Constructs a plane from a unit normal and a constant.
    pub const fn new(normal: Vector3<Float>, constant: Float) -> Self {
        Self { normal, constant }
    }

    /// Returns the signed distance from the plane to a point.
    pub fn distance_to_point(&self, point: Point3<Float>) -> Float {
        self.normal.dot(point.to_vec()) + self.constant
    }
}

#[cfg(test)]
mod tests {
    use cgmath::point3;

    use super::*;

    #[test]
    fn test_ray_plane_intersection() {
        let plane = Plane::new(Vector3::unit_x(), -2.0);
        let ray = Ray::through(point3(10.0, 1.0, 1.0), point3(0.0, 1.0, 1.0)).expect("ray");
        let hit = ray.intersect_plane(&plane).expect("intersection");
        crate::assert_approx_eq!(hit.x, 2.0);
        crate::assert_approx_eq!(hit.y, 1.0);

        // Pointing away from the plane.
        let ray = Ray::through(point3(10.0, 1.0, 1.0), point3(20.0, 1.0, 1.0)).expect("ray");
        assert_eq!(ray.intersect_plane(&plane), None);

        // Parallel to the plane.
        let ray = Ray::through(point3(10.0, 1.0, 1.0), point3(10.0, 5.0, 1.0)).expect("ray");
        assert_eq!(ray.intersect_plane(&plane), None);
    }

    #[test]
    fn test_degenerate_ray() {
        assert_eq!(Ray::through(point3(1.0, 1.0, 1.0), point3(1.0, 1.0, 1.0)), None);
    }
}
