use nalgebra_glm::{self as glm, vec3, Mat4, Vec2};

/// Arrow glyph in its local frame, unit length along +x.
///
/// Vertices `0..2` are the shaft (drawn as a line), `2..5` the head
/// (drawn as a triangle).
pub static ARROW_VERTICES: [[f32; 2]; 5] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.9, 0.05],
    [1.0, 0.0],
    [0.9, -0.05],
];

pub const SHAFT_RANGE: std::ops::Range<i32> = 0..2;
pub const HEAD_RANGE: std::ops::Range<i32> = 2..5;

pub fn arrow_vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&ARROW_VERTICES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowMode {
    DirectionOnly,
    Magnitude,
}

impl ArrowMode {
    pub fn from_direction_only(direction_only: bool) -> Self {
        if direction_only {
            Self::DirectionOnly
        } else {
            Self::Magnitude
        }
    }

    pub fn is_direction_only(&self) -> bool {
        matches!(self, Self::DirectionOnly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub base_scale: f32,
}

impl ArrowStyle {
    pub const DEFAULT_BASE_SCALE: f32 = 0.1;

    /// Glyph scale along its own (x, y) axes. Only the length tracks the
    /// field magnitude; the head width stays fixed.
    pub fn scale(&self, mode: ArrowMode, magnitude: f32) -> Vec2 {
        match mode {
            ArrowMode::DirectionOnly => {
                Vec2::new(self.base_scale, self.base_scale)
            }
            ArrowMode::Magnitude => {
                Vec2::new(self.base_scale * magnitude, self.base_scale)
            }
        }
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            base_scale: Self::DEFAULT_BASE_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowTransform {
    pub position: Vec2,
    pub angle: f32,
    pub scale: Vec2,
}

impl ArrowTransform {
    pub fn from_field(
        position: Vec2,
        field: Vec2,
        mode: ArrowMode,
        style: &ArrowStyle,
    ) -> Self {
        Self {
            position,
            angle: field.y.atan2(field.x),
            scale: style.scale(mode, field.norm()),
        }
    }

    /// `translate * rotate_z * scale`
    pub fn model_matrix(&self) -> Mat4 {
        let mat = Mat4::identity();
        let offset = vec3(self.position.x, self.position.y, 0.0);
        let mat = glm::translate(&mat, &offset);
        let mat = glm::rotate_z(&mat, self.angle);
        glm::scale(&mat, &vec3(self.scale.x, self.scale.y, 1.0))
    }
}

/// Orthographic projection of the visible field area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            left: -2.0,
            right: 2.0,
            bottom: -1.5,
            top: 1.5,
        }
    }
}

impl ViewBounds {
    pub fn projection(&self) -> Mat4 {
        glm::ortho(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }
}
