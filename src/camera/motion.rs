use crate::core::{error::CameraError, loader::InputParams};

use super::Camera;

/// A single scripted camera movement. Distances are in world units, angles in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Motion {
    MoveForward(f32),
    MoveBackward(f32),
    MoveRight(f32),
    MoveLeft(f32),
    MoveUp(f32),
    MoveDown(f32),
    RotateRight(f32),
    RotateLeft(f32),
    RotateUp(f32),
    RotateDown(f32),
    RollRight(f32),
    RollLeft(f32),
}

impl Motion {
    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        params.set_name("motion".into());
        let ty = params.get_str("type")?;
        params.set_name(format!("motion-{}", ty).into());
        let amount = params.get_float("amount")?;

        let res = match ty.as_str() {
            "move_forward" => Motion::MoveForward(amount),
            "move_backward" => Motion::MoveBackward(amount),
            "move_right" => Motion::MoveRight(amount),
            "move_left" => Motion::MoveLeft(amount),
            "move_up" => Motion::MoveUp(amount),
            "move_down" => Motion::MoveDown(amount),
            "rotate_right" => Motion::RotateRight(amount),
            "rotate_left" => Motion::RotateLeft(amount),
            "rotate_up" => Motion::RotateUp(amount),
            "rotate_down" => Motion::RotateDown(amount),
            "roll_right" => Motion::RollRight(amount),
            "roll_left" => Motion::RollLeft(amount),
            _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
        };

        params.check_unused_keys();

        Ok(res)
    }

    pub fn apply(self, camera: &mut Camera) -> Result<(), CameraError> {
        match self {
            Motion::MoveForward(d) => camera.move_forward(d),
            Motion::MoveBackward(d) => camera.move_forward(-d),
            Motion::MoveRight(d) => camera.move_right(d),
            Motion::MoveLeft(d) => camera.move_right(-d),
            Motion::MoveUp(d) => camera.move_up(d),
            Motion::MoveDown(d) => camera.move_up(-d),
            Motion::RotateRight(rad) => camera.rotate_right(rad),
            Motion::RotateLeft(rad) => camera.rotate_right(-rad),
            Motion::RotateUp(rad) => camera.rotate_up(rad),
            Motion::RotateDown(rad) => camera.rotate_up(-rad),
            Motion::RollRight(rad) => camera.roll_right(rad),
            Motion::RollLeft(rad) => camera.roll_right(-rad),
        }
    }
}

impl Camera {
    pub fn move_forward(&mut self, distance: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_position(self.position() + basis.forward * distance);
        Ok(())
    }

    pub fn move_right(&mut self, distance: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_position(self.position() + basis.right * distance);
        Ok(())
    }

    pub fn move_up(&mut self, distance: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_position(self.position() + basis.up * distance);
        Ok(())
    }

    /// Yaw about the up axis; positive turns towards the right.
    pub fn rotate_right(&mut self, angle: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_direction(rotate(basis.forward, angle, -basis.up));
        self.set_up(basis.up);
        Ok(())
    }

    /// Pitch about the right axis; positive looks up. Direction and up turn together.
    pub fn rotate_up(&mut self, angle: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_direction(rotate(basis.forward, angle, basis.right));
        self.set_up(rotate(basis.up, angle, basis.right));
        Ok(())
    }

    /// Roll about the reversed view direction; positive tilts the up axis towards the left.
    pub fn roll_right(&mut self, angle: f32) -> Result<(), CameraError> {
        let basis = self.basis()?;
        self.set_direction(basis.forward);
        self.set_up(rotate(basis.up, angle, -basis.forward));
        Ok(())
    }

    /// Orients the camera as `rotation` applied to direction +X and up +Y.
    /// Position is kept.
    #[allow(dead_code)]
    pub fn set_rotation(&mut self, rotation: glam::Mat4) {
        let direction = rotation * glam::Vec4::new(1.0, 0.0, 0.0, 0.0);
        let up = rotation * glam::Vec4::new(0.0, 1.0, 0.0, 0.0);
        self.set_direction(glam::Vec3A::new(direction.x, direction.y, direction.z));
        self.set_up(glam::Vec3A::new(up.x, up.y, up.z));
    }
}

fn rotate(v: glam::Vec3A, angle: f32, axis: glam::Vec3A) -> glam::Vec3A {
    let rotation = glam::Quat::from_axis_angle(glam::Vec3::from(axis), angle);
    glam::Vec3A::from(rotation * glam::Vec3::from(v))
}
