use crate::core::frustum::Frustum;

#[enum_dispatch::enum_dispatch(Projection)]
pub trait ProjectionT {
    /// Camera space to clip space over `frustum`, OpenGL depth range `[-1, 1]`.
    fn matrix(&self, frustum: &Frustum) -> glam::Mat4;

    fn is_orthographic(&self) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Perspective;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Orthographic;

#[enum_dispatch::enum_dispatch]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn new(orthographic: bool) -> Self {
        if orthographic {
            Orthographic.into()
        } else {
            Perspective.into()
        }
    }
}

impl ProjectionT for Perspective {
    // Off-axis frustum; `left != -right` is what the tiled frusta produce.
    fn matrix(&self, frustum: &Frustum) -> glam::Mat4 {
        let Frustum {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *frustum;
        glam::Mat4::from_cols(
            glam::Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            glam::Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            glam::Vec4::new(
                (r + l) / (r - l),
                (t + b) / (t - b),
                -(f + n) / (f - n),
                -1.0,
            ),
            glam::Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
        )
    }

    fn is_orthographic(&self) -> bool {
        false
    }
}

impl ProjectionT for Orthographic {
    fn matrix(&self, frustum: &Frustum) -> glam::Mat4 {
        glam::Mat4::orthographic_rh_gl(
            frustum.left,
            frustum.right,
            frustum.bottom,
            frustum.top,
            frustum.near,
            frustum.far,
        )
    }

    fn is_orthographic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(m: glam::Mat4, p: glam::Vec3) -> glam::Vec3 {
        let clip = m * p.extend(1.0);
        glam::Vec3::new(clip.x, clip.y, clip.z) / clip.w
    }

    #[test]
    fn test_symmetric_perspective_matches_glam() {
        let frustum = Frustum::perspective(60.0, 1.5, 0.1, 100.0);
        let m = Perspective.matrix(&frustum);
        let expected = glam::Mat4::perspective_rh_gl(60.0_f32.to_radians(), 1.5, 0.1, 100.0);
        assert!(m.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_perspective_near_far_planes() {
        let frustum = Frustum {
            left: -0.2,
            right: 0.6,
            bottom: -0.1,
            top: 0.3,
            near: 0.5,
            far: 20.0,
        };
        let m = Perspective.matrix(&frustum);

        let near_corner = project(m, glam::Vec3::new(-0.2, -0.1, -0.5));
        assert!(near_corner.abs_diff_eq(glam::Vec3::new(-1.0, -1.0, -1.0), 1e-5));

        let near_corner = project(m, glam::Vec3::new(0.6, 0.3, -0.5));
        assert!(near_corner.abs_diff_eq(glam::Vec3::new(1.0, 1.0, -1.0), 1e-5));

        // the far corner lies on the ray from the eye through the near corner
        let far_corner = project(m, glam::Vec3::new(0.6, 0.3, -0.5) * 40.0);
        assert!(far_corner.abs_diff_eq(glam::Vec3::new(1.0, 1.0, 1.0), 1e-4));
    }

    #[test]
    fn test_orthographic_box() {
        let frustum = Frustum {
            left: -2.0,
            right: 2.0,
            bottom: -1.0,
            top: 1.0,
            near: 1.0,
            far: 11.0,
        };
        let m = Orthographic.matrix(&frustum);
        let p = project(m, glam::Vec3::new(2.0, -1.0, -11.0));
        assert!(p.abs_diff_eq(glam::Vec3::new(1.0, -1.0, 1.0), 1e-5));
        let p = project(m, glam::Vec3::new(0.0, 0.0, -1.0));
        assert!(p.abs_diff_eq(glam::Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_projection_kind() {
        assert!(Projection::new(true).is_orthographic());
        assert!(!Projection::new(false).is_orthographic());
        assert_eq!(Projection::new(false), Projection::Perspective(Perspective));
    }
}
