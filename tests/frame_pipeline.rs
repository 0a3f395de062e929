use approx::assert_relative_eq;
use nalgebra_glm::{vec2, vec4, Mat4, Vec2};

use dipole_viz::arrow::{ArrowMode, ArrowTransform};
use dipole_viz::config::Config;
use dipole_viz::field::dipole_field;
use dipole_viz::frame::{
    arrow_transforms, render_frame, FrameState, GlyphSurface,
};

#[derive(Default)]
struct Recorder {
    projections: Vec<Mat4>,
    models: Vec<Mat4>,
}

impl GlyphSurface for Recorder {
    fn set_projection(&mut self, projection: &Mat4) {
        self.projections.push(*projection);
    }

    fn draw_glyph(&mut self, model: &Mat4) {
        self.models.push(*model);
    }
}

fn frame(
    config: &Config,
    state: &FrameState,
) -> (Vec<ArrowTransform>, Recorder) {
    let points = config.grid.points();
    let transforms =
        arrow_transforms(&points, state, &config.field, &config.style)
            .collect::<Vec<_>>();
    let models = transforms
        .iter()
        .map(ArrowTransform::model_matrix)
        .collect::<Vec<_>>();

    let mut recorder = Recorder::default();
    render_frame(&mut recorder, &config.view.projection(), &models);

    (transforms, recorder)
}

fn tip(model: &Mat4) -> Vec2 {
    let v = model * vec4(1.0, 0.0, 0.0, 1.0);
    vec2(v.x, v.y)
}

#[test]
fn default_frame_draws_every_visible_point() {
    let config = Config::default();
    let state = config.initial_state;
    let (transforms, recorder) = frame(&config, &state);

    let expected = config
        .grid
        .points()
        .into_iter()
        .filter(|&p| {
            dipole_field(p, state.moment, config.field.singular_radius).norm()
                >= config.field.visibility_threshold
        })
        .count();

    assert_eq!(transforms.len(), expected);
    assert_eq!(recorder.models.len(), expected);
    assert_eq!(recorder.projections, vec![config.view.projection()]);
}

#[test]
fn arrows_point_along_the_field() {
    let config = Config::default();
    let state = FrameState {
        moment: vec2(-1.5, 2.0),
        mode: ArrowMode::DirectionOnly,
    };
    let (transforms, recorder) = frame(&config, &state);

    for (t, model) in transforms.iter().zip(&recorder.models) {
        let e = dipole_field(t.position, state.moment, 0.01);
        let dir = (tip(model) - t.position) / config.style.base_scale;

        assert_relative_eq!(dir, e.normalize(), epsilon = 1e-4);
    }
}

#[test]
fn toggling_mode_changes_only_lengths() {
    let config = Config::default();
    let direction = FrameState {
        moment: vec2(3.0, 1.0),
        mode: ArrowMode::DirectionOnly,
    };
    let magnitude = FrameState {
        mode: ArrowMode::Magnitude,
        ..direction
    };

    let (a, _) = frame(&config, &direction);
    let (b, _) = frame(&config, &magnitude);

    assert_eq!(a.len(), b.len());

    for (a, b) in a.iter().zip(&b) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.angle, b.angle);
        assert_eq!(a.scale.y, b.scale.y);

        let e = dipole_field(a.position, direction.moment, 0.01);
        assert_relative_eq!(
            b.scale.x,
            config.style.base_scale * e.norm(),
            max_relative = 1e-5
        );
    }
}

#[test]
fn zero_moment_draws_nothing_but_still_binds_projection() {
    let config = Config::default();
    let state = FrameState {
        moment: Vec2::zeros(),
        mode: ArrowMode::Magnitude,
    };
    let (transforms, recorder) = frame(&config, &state);

    assert!(transforms.is_empty());
    assert!(recorder.models.is_empty());
    assert_eq!(recorder.projections.len(), 1);
}
