use nalgebra_glm::{Mat4, Vec2};

use crate::arrow::{ArrowMode, ArrowStyle, ArrowTransform};
use crate::field::FieldParams;

pub const MOMENT_RANGE: std::ops::RangeInclusive<f32> = -5.0..=5.0;

/// The only state carried across frames, bound to the control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub moment: Vec2,
    pub mode: ArrowMode,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            moment: Vec2::new(1.0, 0.0),
            mode: ArrowMode::DirectionOnly,
        }
    }
}

impl FrameState {
    pub fn clamp_moment(&mut self) {
        let (lo, hi) = (*MOMENT_RANGE.start(), *MOMENT_RANGE.end());
        self.moment.x = self.moment.x.clamp(lo, hi);
        self.moment.y = self.moment.y.clamp(lo, hi);
    }
}

/// Draw backend for the arrow pass.
pub trait GlyphSurface {
    fn set_projection(&mut self, projection: &Mat4);

    /// Draws the shared arrow mesh (shaft line + head triangle) under
    /// `model`.
    fn draw_glyph(&mut self, model: &Mat4);
}

/// Evaluates the field at every point and derives a transform for each
/// visible sample. Points whose field is below the visibility threshold
/// are skipped.
pub fn arrow_transforms<'a>(
    points: &'a [Vec2],
    state: &'a FrameState,
    params: &'a FieldParams,
    style: &'a ArrowStyle,
) -> impl Iterator<Item = ArrowTransform> + 'a {
    points.iter().filter_map(move |&point| {
        let field = params.field_at(point, state.moment);

        if !params.is_visible(&field) {
            return None;
        }

        Some(ArrowTransform::from_field(point, field, state.mode, style))
    })
}

/// Returns the number of glyphs drawn.
pub fn render_frame<S>(
    surface: &mut S,
    projection: &Mat4,
    models: &[Mat4],
) -> usize
where
    S: GlyphSurface + ?Sized,
{
    surface.set_projection(projection);

    for model in models {
        surface.draw_glyph(model);
    }

    models.len()
}
