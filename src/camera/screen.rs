use crate::core::{error::CameraError, ray::Ray};

use super::Camera;

/// Pixel dimensions of the output surface. Pixel `(0, 0)` is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        (
            2.0 * x / self.width as f32 - 1.0,
            1.0 - 2.0 * y / self.height as f32,
        )
    }
}

impl Camera {
    /// World point to pixel coordinates; `z` keeps the NDC depth.
    #[allow(dead_code)]
    pub fn project_to_screen(
        &mut self,
        point: glam::Vec3A,
        viewport: Viewport,
    ) -> Result<glam::Vec3A, CameraError> {
        let clip = self.view_projection_matrix()? * glam::Vec4::new(point.x, point.y, point.z, 1.0);
        let ndc = glam::Vec3A::new(clip.x, clip.y, clip.z) / clip.w;
        Ok(glam::Vec3A::new(
            (ndc.x + 1.0) * 0.5 * viewport.width as f32,
            (1.0 - ndc.y) * 0.5 * viewport.height as f32,
            ndc.z,
        ))
    }

    /// Ray from the near plane through pixel `(x, y)` towards the far plane, normalized.
    #[allow(dead_code)]
    pub fn cast_ray_from_screen(
        &mut self,
        x: f32,
        y: f32,
        viewport: Viewport,
    ) -> Result<Ray, CameraError> {
        let (ndc_x, ndc_y) = viewport.to_ndc(x, y);
        let near = self.unproject(glam::Vec3A::new(ndc_x, ndc_y, -1.0))?;
        let far = self.unproject(glam::Vec3A::new(ndc_x, ndc_y, 1.0))?;
        Ok(Ray::new(near, (far - near).normalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_at_origin() -> Camera {
        let mut camera = Camera::new();
        camera.set_frustum_perspective(60.0, 4.0 / 3.0, 0.1, 100.0);
        camera
            .set_look_at(
                glam::Vec3A::new(2.0, 3.0, 6.0),
                glam::Vec3A::ZERO,
                glam::Vec3A::Y,
            )
            .unwrap();
        camera
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = looking_at_origin();
        let viewport = Viewport::new(640, 480).unwrap();
        let p = camera.project_to_screen(glam::Vec3A::ZERO, viewport).unwrap();
        assert!((p.x - 320.0).abs() < 1e-2);
        assert!((p.y - 240.0).abs() < 1e-2);
        assert!(p.z > -1.0 && p.z < 1.0);
    }

    #[test]
    fn test_screen_y_points_down() {
        let mut camera = looking_at_origin();
        let viewport = Viewport::new(640, 480).unwrap();
        let above = camera
            .project_to_screen(glam::Vec3A::new(0.0, 0.5, 0.0), viewport)
            .unwrap();
        assert!(above.y < 240.0);
    }

    #[test]
    fn test_cast_ray_through_center() {
        let mut camera = looking_at_origin();
        let viewport = Viewport::new(640, 480).unwrap();
        let ray = camera.cast_ray_from_screen(320.0, 240.0, viewport).unwrap();
        let expected = (-camera.position()).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-3));
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        // origin sits on the near plane
        let depth = (ray.origin - camera.position()).dot(camera.direction());
        assert!((depth - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_cast_ray_round_trip() {
        let mut camera = looking_at_origin();
        let viewport = Viewport::new(640, 480).unwrap();
        let ray = camera.cast_ray_from_screen(100.0, 50.0, viewport).unwrap();
        let p = camera.project_to_screen(ray.origin, viewport).unwrap();
        assert!((p.x - 100.0).abs() < 0.05);
        assert!((p.y - 50.0).abs() < 0.05);
        assert!((p.z + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_viewport() {
        assert_eq!(
            Viewport::new(0, 10),
            Err(CameraError::InvalidViewport {
                width: 0,
                height: 10
            })
        );
        assert!((Viewport::new(200, 100).unwrap().aspect() - 2.0).abs() < 1e-6);
    }
}
