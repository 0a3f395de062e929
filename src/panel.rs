use eframe::egui;
use nalgebra_glm::{Mat4, Vec2};

use crate::arrow::ArrowMode;
use crate::config::Config;
use crate::frame::{arrow_transforms, FrameState, MOMENT_RANGE};

/// The "Dipole Parameters" window and the state it edits.
pub struct ControlPanel {
    pub state: FrameState,
    shown_count: usize,
}

impl ControlPanel {
    pub fn new(state: FrameState) -> Self {
        Self {
            state,
            shown_count: 0,
        }
    }

    /// Arrow count in the label last drawn.
    pub fn shown_count(&self) -> usize {
        self.shown_count
    }

    /// Runs the controls and returns the model matrices for the state they
    /// leave behind, so the label and the drawn arrows agree.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        points: &[Vec2],
        config: &Config,
    ) -> Vec<Mat4> {
        let response = egui::Window::new("Dipole Parameters").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Moment p");
                ui.add(
                    egui::Slider::new(&mut self.state.moment.x, MOMENT_RANGE)
                        .text("x"),
                );
                ui.add(
                    egui::Slider::new(&mut self.state.moment.y, MOMENT_RANGE)
                        .text("y"),
                );
            });

            let mut direction_only = self.state.mode.is_direction_only();
            if ui.checkbox(&mut direction_only, "Direction only").changed() {
                self.state.mode =
                    ArrowMode::from_direction_only(direction_only);
                log::info!("Arrow mode: {:?}", self.state.mode);
            }

            self.state.clamp_moment();

            let models = frame_models(points, &self.state, config);
            self.shown_count = models.len();
            ui.label(format!("Arrows drawn: {}", self.shown_count));

            models
        });

        // collapsed windows don't run their contents
        match response.and_then(|r| r.inner) {
            Some(models) => models,
            None => {
                self.state.clamp_moment();
                frame_models(points, &self.state, config)
            }
        }
    }
}

pub fn frame_models(
    points: &[Vec2],
    state: &FrameState,
    config: &Config,
) -> Vec<Mat4> {
    arrow_transforms(points, state, &config.field, &config.style)
        .map(|t| t.model_matrix())
        .collect()
}
