#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
}

/// Eye rays through the four NDC corners. `ray01` is x = -1, y = 1, and so on.
///
/// Directions are not normalized; the per-pixel ray is their bilinear blend.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CornerRays {
    pub ray00: glam::Vec3A,
    pub ray01: glam::Vec3A,
    pub ray10: glam::Vec3A,
    pub ray11: glam::Vec3A,
}

impl Ray {
    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self { origin, direction }
    }

    #[allow(dead_code)]
    pub fn point_at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }
}

impl CornerRays {
    /// `u` runs left to right, `v` bottom to top, both in `[0, 1]`.
    pub fn at(&self, u: f32, v: f32) -> glam::Vec3A {
        let bottom = self.ray00.lerp(self.ray10, u);
        let top = self.ray01.lerp(self.ray11, u);
        bottom.lerp(top, v)
    }

    pub fn to_arrays(&self) -> [[f32; 3]; 4] {
        [
            self.ray00.to_array(),
            self.ray01.to_array(),
            self.ray10.to_array(),
            self.ray11.to_array(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilinear_corners() {
        let rays = CornerRays {
            ray00: glam::Vec3A::new(-1.0, -1.0, -1.0),
            ray01: glam::Vec3A::new(-1.0, 1.0, -1.0),
            ray10: glam::Vec3A::new(1.0, -1.0, -1.0),
            ray11: glam::Vec3A::new(1.0, 1.0, -1.0),
        };
        assert_eq!(rays.at(0.0, 0.0), rays.ray00);
        assert_eq!(rays.at(0.0, 1.0), rays.ray01);
        assert_eq!(rays.at(1.0, 0.0), rays.ray10);
        assert_eq!(rays.at(1.0, 1.0), rays.ray11);
        assert!(rays
            .at(0.5, 0.5)
            .abs_diff_eq(glam::Vec3A::new(0.0, 0.0, -1.0), 1e-6));
        assert!(rays
            .at(0.75, 0.25)
            .abs_diff_eq(glam::Vec3A::new(0.5, -0.5, -1.0), 1e-6));
    }

    #[test]
    fn test_point_at() {
        let ray = Ray::new(glam::Vec3A::new(1.0, 0.0, 0.0), glam::Vec3A::new(0.0, 2.0, 0.0));
        assert_eq!(ray.point_at(1.5), glam::Vec3A::new(1.0, 3.0, 0.0));
    }
}
