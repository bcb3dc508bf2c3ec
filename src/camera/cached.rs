use crate::core::{
    cache::Cached,
    coord::{normalize_checked, ViewBasis, DEGENERATE_EPS},
    error::CameraError,
    frustum::{Frustum, Tile},
    ray::CornerRays,
};

use super::{Projection, ProjectionT};

/// Camera with lazily derived view, projection and inverse view-projection matrices.
///
/// Every setter is a no-op when the value is unchanged; otherwise it marks the
/// matrices that depend on it as stale. The inverse view-projection matrix has
/// its own flag, set by both pose and frustum setters.
#[derive(Debug, Clone)]
pub struct Camera {
    position: glam::Vec3A,
    direction: glam::Vec3A,
    up: glam::Vec3A,
    right: glam::Vec3A,
    frustum: Frustum,
    projection: Projection,
    view_matrix: Cached<glam::Mat4>,
    projection_matrix: Cached<glam::Mat4>,
    inverse_view_projection_matrix: Cached<glam::Mat4>,
}

/// Which derived matrices currently match the camera state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub view: bool,
    pub projection: bool,
    pub inverse_view_projection: bool,
}

macro_rules! frustum_setters {
    ( $( $field:ident ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<set_frustum_ $field>](&mut self, value: f32) {
                    if self.frustum.$field != value {
                        self.frustum.$field = value;
                        self.invalidate_projection();
                    }
                }

                #[allow(dead_code)]
                pub fn [<frustum_ $field>](&self) -> f32 {
                    self.frustum.$field
                }
            }
        )+
    };
}

macro_rules! pose_setters {
    ( $( $field:ident ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<set_ $field>](&mut self, value: glam::Vec3A) {
                    if self.$field != value {
                        self.$field = value;
                        self.invalidate_view();
                    }
                }

                pub fn $field(&self) -> glam::Vec3A {
                    self.$field
                }
            }
        )+
    };
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: glam::Vec3A::ZERO,
            direction: -glam::Vec3A::Z,
            up: glam::Vec3A::Y,
            right: glam::Vec3A::X,
            frustum: Frustum::default(),
            projection: Projection::new(false),
            view_matrix: Cached::stale(glam::Mat4::IDENTITY),
            projection_matrix: Cached::stale(glam::Mat4::IDENTITY),
            inverse_view_projection_matrix: Cached::stale(glam::Mat4::IDENTITY),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pose_setters! { position, direction, up }

    frustum_setters! { left, right, bottom, top, near, far }

    /// Right axis cached by the last [`Camera::set_look_at`].
    pub fn right(&self) -> glam::Vec3A {
        self.right
    }

    pub fn frustum(&self) -> Frustum {
        self.frustum
    }

    pub fn is_orthographic(&self) -> bool {
        self.projection.is_orthographic()
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        if self.projection.is_orthographic() != orthographic {
            self.projection = Projection::new(orthographic);
            self.invalidate_projection();
        }
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.set_frustum_left(frustum.left);
        self.set_frustum_right(frustum.right);
        self.set_frustum_bottom(frustum.bottom);
        self.set_frustum_top(frustum.top);
        self.set_frustum_near(frustum.near);
        self.set_frustum_far(frustum.far);
    }

    /// Symmetric perspective frustum; `fov_y` is in degrees.
    pub fn set_frustum_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.set_orthographic(false);
        self.set_frustum(Frustum::perspective(fov_y, aspect, near, far));
    }

    /// Perspective frustum restricted to one tile of a grid over the full view.
    pub fn set_frustum_perspective_tiled(
        &mut self,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
        tile: Tile,
    ) {
        self.set_orthographic(false);
        self.set_frustum(Frustum::perspective(fov_y, aspect, near, far).tile(tile));
    }

    /// Places the camera at `eye` facing `target`. On a degenerate configuration
    /// the camera is left untouched.
    pub fn set_look_at(
        &mut self,
        eye: glam::Vec3A,
        target: glam::Vec3A,
        up: glam::Vec3A,
    ) -> Result<(), CameraError> {
        let forward = normalize_checked(target - eye)?;
        let right = forward.cross(normalize_checked(up)?);
        if right.length() <= DEGENERATE_EPS {
            return Err(CameraError::DegenerateBasis);
        }
        let right = right.normalize();
        let up = right.cross(forward);

        self.set_position(eye);
        self.set_direction(forward);
        self.set_up(up);
        self.right = right;
        Ok(())
    }

    pub fn freshness(&self) -> Freshness {
        Freshness {
            view: self.view_matrix.is_fresh(),
            projection: self.projection_matrix.is_fresh(),
            inverse_view_projection: self.inverse_view_projection_matrix.is_fresh(),
        }
    }

    /// Orthonormal frame derived from the current direction and up.
    pub fn basis(&self) -> Result<ViewBasis, CameraError> {
        ViewBasis::from_direction_up(self.direction, self.up)
    }

    pub fn view_matrix(&mut self) -> Result<glam::Mat4, CameraError> {
        let (position, direction, up) = (self.position, self.direction, self.up);
        self.view_matrix.get_or_refresh(|| {
            let basis = ViewBasis::from_direction_up(direction, up)?;
            Ok(basis.world_to_view(position))
        })
    }

    pub fn projection_matrix(&mut self) -> Result<glam::Mat4, CameraError> {
        let (frustum, projection) = (self.frustum, self.projection);
        self.projection_matrix.get_or_refresh(|| {
            frustum.check_extent()?;
            Ok(projection.matrix(&frustum))
        })
    }

    pub fn view_projection_matrix(&mut self) -> Result<glam::Mat4, CameraError> {
        Ok(self.projection_matrix()? * self.view_matrix()?)
    }

    pub fn inverse_view_projection_matrix(&mut self) -> Result<glam::Mat4, CameraError> {
        if self.inverse_view_projection_matrix.is_fresh() {
            return Ok(self.inverse_view_projection_matrix.peek());
        }
        let view_projection = self.view_projection_matrix()?;
        self.inverse_view_projection_matrix.get_or_refresh(|| {
            let det = view_projection.determinant();
            if det == 0.0 || !det.is_finite() {
                return Err(CameraError::NotInvertible);
            }
            Ok(view_projection.inverse())
        })
    }

    /// NDC to world space, including the perspective divide.
    pub fn unproject(&mut self, ndc: glam::Vec3A) -> Result<glam::Vec3A, CameraError> {
        let inv = self.inverse_view_projection_matrix()?;
        let p = inv * glam::Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
        Ok(glam::Vec3A::new(p.x, p.y, p.z) / p.w)
    }

    /// Direction from the camera position through NDC point `(x, y)`. Not normalized.
    pub fn eye_ray(&mut self, x: f32, y: f32) -> Result<glam::Vec3A, CameraError> {
        let world = self.unproject(glam::Vec3A::new(x, y, 0.0))?;
        Ok(world - self.position)
    }

    pub fn corner_rays(&mut self) -> Result<CornerRays, CameraError> {
        Ok(CornerRays {
            ray00: self.eye_ray(-1.0, -1.0)?,
            ray01: self.eye_ray(-1.0, 1.0)?,
            ray10: self.eye_ray(1.0, -1.0)?,
            ray11: self.eye_ray(1.0, 1.0)?,
        })
    }

    fn invalidate_view(&mut self) {
        self.view_matrix.invalidate();
        self.inverse_view_projection_matrix.invalidate();
    }

    fn invalidate_projection(&mut self) {
        self.projection_matrix.invalidate();
        self.inverse_view_projection_matrix.invalidate();
    }
}
