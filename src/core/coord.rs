use crate::core::error::CameraError;

pub const DEGENERATE_EPS: f32 = 1e-6;

/// Orthonormal camera frame: `right`, `up` and `forward` are unit length and pairwise orthogonal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBasis {
    pub right: glam::Vec3A,
    pub up: glam::Vec3A,
    pub forward: glam::Vec3A,
}

impl ViewBasis {
    /// Gram-Schmidt: the forward component is projected out of `up` before crossing.
    pub fn from_direction_up(direction: glam::Vec3A, up: glam::Vec3A) -> Result<Self, CameraError> {
        let forward = normalize_checked(direction)?;
        let up = normalize_checked(up - forward * up.dot(forward))?;
        let right = forward.cross(up);
        let up = right.cross(forward);
        Ok(Self { right, up, forward })
    }

    /// World to camera space. The camera looks down -Z, as the OpenGL projections expect.
    pub fn world_to_view(&self, position: glam::Vec3A) -> glam::Mat4 {
        let Self { right, up, forward } = *self;
        glam::Mat4::from_cols(
            glam::Vec4::new(right.x, up.x, -forward.x, 0.0),
            glam::Vec4::new(right.y, up.y, -forward.y, 0.0),
            glam::Vec4::new(right.z, up.z, -forward.z, 0.0),
            glam::Vec4::new(
                -right.dot(position),
                -up.dot(position),
                forward.dot(position),
                1.0,
            ),
        )
    }
}

pub fn normalize_checked(v: glam::Vec3A) -> Result<glam::Vec3A, CameraError> {
    let len = v.length();
    if !len.is_finite() || len <= DEGENERATE_EPS {
        return Err(CameraError::DegenerateBasis);
    }
    Ok(v / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(basis: &ViewBasis) {
        let eps = 1e-5;
        assert!((basis.right.length() - 1.0).abs() < eps);
        assert!((basis.up.length() - 1.0).abs() < eps);
        assert!((basis.forward.length() - 1.0).abs() < eps);
        assert!(basis.right.dot(basis.up).abs() < eps);
        assert!(basis.right.dot(basis.forward).abs() < eps);
        assert!(basis.up.dot(basis.forward).abs() < eps);
    }

    #[test]
    fn test_skewed_up_is_orthogonalized() {
        let basis = ViewBasis::from_direction_up(
            glam::Vec3A::new(0.0, 0.0, -2.0),
            glam::Vec3A::new(0.3, 1.0, 0.7),
        )
        .unwrap();
        assert_orthonormal(&basis);
        assert!(basis.forward.abs_diff_eq(-glam::Vec3A::Z, 1e-6));
        assert!(basis.right.x > 0.0);
        assert!(basis.up.y > 0.0);
    }

    #[test]
    fn test_arbitrary_pairs_are_orthonormal() {
        let pairs = [
            (glam::Vec3A::new(1.0, 2.0, 3.0), glam::Vec3A::new(0.0, 1.0, 0.0)),
            (glam::Vec3A::new(-4.0, 0.1, 0.5), glam::Vec3A::new(1.0, 1.0, 1.0)),
            (glam::Vec3A::new(0.0, -1.0, 0.01), glam::Vec3A::new(0.0, 0.0, 1.0)),
        ];
        for (direction, up) in pairs {
            let basis = ViewBasis::from_direction_up(direction, up).unwrap();
            assert_orthonormal(&basis);
        }
    }

    #[test]
    fn test_parallel_up_is_rejected() {
        let res = ViewBasis::from_direction_up(
            glam::Vec3A::new(0.0, 2.0, 0.0),
            glam::Vec3A::new(0.0, -1.0, 0.0),
        );
        assert_eq!(res, Err(CameraError::DegenerateBasis));

        let res = ViewBasis::from_direction_up(glam::Vec3A::ZERO, glam::Vec3A::Y);
        assert_eq!(res, Err(CameraError::DegenerateBasis));
    }

    #[test]
    fn test_world_to_view_matches_look_at() {
        let eye = glam::Vec3A::new(1.0, 2.0, 3.0);
        let direction = glam::Vec3A::new(-1.0, -0.5, -2.0);
        let basis = ViewBasis::from_direction_up(direction, glam::Vec3A::Y).unwrap();
        let expected = glam::Mat4::look_at_rh(
            glam::Vec3::from(eye),
            glam::Vec3::from(eye + direction),
            glam::Vec3::Y,
        );
        assert!(basis.world_to_view(eye).abs_diff_eq(expected, 1e-5));

        let origin = basis.world_to_view(eye) * glam::Vec4::new(eye.x, eye.y, eye.z, 1.0);
        assert!(origin.abs_diff_eq(glam::Vec4::new(0.0, 0.0, 0.0, 1.0), 1e-5));
    }
}
