//! Camera that projects the cube onto the screen.

use cgmath::{Deg, EuclideanSpace, Matrix4, Rad, SquareMatrix, Vector4};
use cuber_math::prelude::*;

/// Vertical field of view.
const DEFAULT_FOV: Deg<Float> = Deg(30.0);
/// Distance from the camera to the center of the cube, in world units.
const DEFAULT_DISTANCE: Float = 800.0;

const NEAR_PLANE: Float = 1.0;
const FAR_PLANE: Float = 5_000.0;

/// Screen-space view of the cube, used to resolve pointer positions.
///
/// Screen positions are in pixels from the top-left corner of the viewport.
/// All 3D positions are in the cube's own coordinate frame, centered on the
/// cube, so any rotation applied to the cube for display is accounted for by
/// the viewport.
pub trait Viewport {
    /// Returns the width and height of the viewport in pixels.
    fn size(&self) -> [f32; 2];
    /// Returns the ray from the camera through a screen position.
    fn ray(&self, screen_pos: Point2<f32>) -> Option<Ray>;
    /// Projects a point onto the screen. Returns `None` if it is behind the
    /// camera.
    fn project(&self, point: Point3<Float>) -> Option<Point2<f32>>;
}

/// Perspective camera looking at the center of the cube down the `-z` axis,
/// with the cube turned so that the `R`, `U`, and `F` faces are visible.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Width and height of the draw target in pixels.
    pub target_size: [u32; 2],
    /// Vertical field of view.
    pub fov: Deg<Float>,
    /// Distance from the camera to the center of the cube.
    pub distance: Float,
    /// Rotation to apply to the cube before drawing it.
    pub rot: Quaternion<Float>,
}
impl PerspectiveCamera {
    /// Constructs a camera with the default view.
    pub fn new(target_size: [u32; 2]) -> Self {
        Self {
            target_size,
            fov: DEFAULT_FOV,
            distance: DEFAULT_DISTANCE,
            rot: default_rot(),
        }
    }

    /// Resets the cube rotation.
    pub fn reset_rot(&mut self) {
        self.rot = default_rot();
    }

    /// Returns the aspect ratio of the draw target, or `None` if it has zero
    /// size.
    fn aspect_ratio(&self) -> Option<f32> {
        let [w, h] = self.target_size.map(|x| x as f32);
        (w > 0.0 && h > 0.0).then(|| w / h)
    }

    /// Returns the matrix transforming cube space to clip space.
    pub fn view_projection(&self) -> Option<Matrix4<Float>> {
        let projection = cgmath::perspective(self.fov, self.aspect_ratio()?, NEAR_PLANE, FAR_PLANE);
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, self.distance),
            Point3::origin(),
            Vector3::unit_y(),
        );
        Some(projection * view * Matrix4::from(self.rot))
    }

    fn screen_to_ndc(&self, screen_pos: Point2<f32>) -> Point2<f32> {
        let [w, h] = self.target_size.map(|x| x as f32);
        Point2::new(screen_pos.x / w * 2.0 - 1.0, 1.0 - screen_pos.y / h * 2.0)
    }
    fn ndc_to_screen(&self, ndc: Point2<f32>) -> Point2<f32> {
        let [w, h] = self.target_size.map(|x| x as f32);
        Point2::new((ndc.x + 1.0) / 2.0 * w, (1.0 - ndc.y) / 2.0 * h)
    }
}
impl Viewport for PerspectiveCamera {
    fn size(&self) -> [f32; 2] {
        self.target_size.map(|x| x as f32)
    }

    fn ray(&self, screen_pos: Point2<f32>) -> Option<Ray> {
        let inverse = self.view_projection()?.invert()?;
        let ndc = self.screen_to_ndc(screen_pos);
        let unproject = |z: Float| {
            Point3::from_homogeneous(inverse * Vector4::new(ndc.x, ndc.y, z, 1.0))
        };
        Ray::through(unproject(-1.0), unproject(1.0))
    }

    fn project(&self, point: Point3<Float>) -> Option<Point2<f32>> {
        let clip = self.view_projection()? * point.to_homogeneous();
        if clip.w <= EPSILON {
            return None;
        }
        Some(self.ndc_to_screen(Point2::new(clip.x / clip.w, clip.y / clip.w)))
    }
}

/// Tilts the top of the cube toward the camera and turns the front face to
/// the left.
fn default_rot() -> Quaternion<Float> {
    Quaternion::from_angle_x(Rad::from(Deg(30.0))) * Quaternion::from_angle_y(Rad::from(Deg(-45.0)))
}

#[cfg(test)]
mod tests {
    use cuber_math::assert_approx_eq;

    use super::*;

    #[test]
    fn test_project_center() {
        let camera = PerspectiveCamera::new([800, 600]);
        let p = camera.project(Point3::origin()).expect("behind camera");
        assert_approx_eq!(p.x, 400.0);
        assert_approx_eq!(p.y, 300.0);
    }

    #[test]
    fn test_ray_through_projected_point() {
        let camera = PerspectiveCamera::new([800, 600]);
        for point in [
            Point3::new(96.0, 10.0, -30.0),
            Point3::new(0.0, 96.0, 0.0),
            Point3::new(-50.0, 20.0, 96.0),
        ] {
            let screen = camera.project(point).expect("behind camera");
            let ray = camera.ray(screen).expect("no ray");
            let to_point = point - ray.origin;
            let along = to_point.dot(ray.direction);
            let distance = (to_point - ray.direction * along).magnitude();
            assert!(distance < 0.1, "ray misses {point:?} by {distance}");
        }
    }

    #[test]
    fn test_visible_faces() {
        let camera = PerspectiveCamera::new([800, 600]);
        let ray = camera.ray(Point2::new(400.0, 300.0)).expect("no ray");
        // The camera looks down at the cube from the front-right.
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y < 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn test_reset_rot() {
        let mut camera = PerspectiveCamera::new([800, 600]);
        let front = camera.project(Point3::new(0.0, 0.0, 96.0)).expect("behind camera");

        camera.rot = Quaternion::from_angle_y(Rad(1.0));
        let turned = camera.project(Point3::new(0.0, 0.0, 96.0)).expect("behind camera");
        assert!((turned.x - front.x).abs() > 1.0);

        camera.reset_rot();
        assert_eq!(camera, PerspectiveCamera::new([800, 600]));
        let p = camera.project(Point3::new(0.0, 0.0, 96.0)).expect("behind camera");
        assert_approx_eq!(p.x, front.x);
        assert_approx_eq!(p.y, front.y);
    }

    #[test]
    fn test_zero_size() {
        let camera = PerspectiveCamera::new([0, 600]);
        assert_eq!(camera.ray(Point2::new(0.0, 0.0)), None);
        assert_eq!(camera.project(Point3::origin()), None);
    }
}
