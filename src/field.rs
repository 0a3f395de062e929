use nalgebra_glm::{self as glm, Vec2};

/// Tuning constants for evaluating and displaying the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Below this distance from the dipole the field is clamped to zero.
    pub singular_radius: f32,
    /// Samples weaker than this are not drawn.
    pub visibility_threshold: f32,
}

impl FieldParams {
    pub const DEFAULT_SINGULAR_RADIUS: f32 = 0.01;
    pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.001;

    pub fn field_at(&self, r: Vec2, p: Vec2) -> Vec2 {
        dipole_field(r, p, self.singular_radius)
    }

    pub fn is_visible(&self, field: &Vec2) -> bool {
        field.norm() >= self.visibility_threshold
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            singular_radius: Self::DEFAULT_SINGULAR_RADIUS,
            visibility_threshold: Self::DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

/// Field of a point dipole `p` at the origin, evaluated at displacement `r`:
///
/// `E = (3 (p . r_hat) r_hat - p) / |r|^3`
///
/// Returns zero when `|r| < singular_radius`.
pub fn dipole_field(r: Vec2, p: Vec2, singular_radius: f32) -> Vec2 {
    let r_norm = r.norm();

    if r_norm < singular_radius {
        return Vec2::zeros();
    }

    let r_hat = r / r_norm;
    let factor = 3.0 * glm::dot(&p, &r_hat);
    let term = r_hat * factor - p;

    term / (r_norm * r_norm * r_norm)
}
