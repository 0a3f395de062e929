use std::path::PathBuf;

use crate::arrow::{ArrowMode, ArrowStyle, ViewBounds};
use crate::field::FieldParams;
use crate::frame::FrameState;
use crate::grid::GridSpec;

#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub window_size: [f32; 2],

    pub view: ViewBounds,
    pub grid: GridSpec,
    pub field: FieldParams,
    pub style: ArrowStyle,

    pub shader_dir: PathBuf,
    pub initial_state: FrameState,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Dipole Field".to_string(),
            window_size: [800.0, 600.0],
            view: ViewBounds::default(),
            grid: GridSpec::default(),
            field: FieldParams::default(),
            style: ArrowStyle::default(),
            shader_dir: PathBuf::from("shaders"),
            initial_state: FrameState::default(),
        }
    }
}

impl Config {
    pub fn with_shader_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.shader_dir = dir;
        }
        self
    }

    pub fn with_magnitude_mode(mut self, magnitude: bool) -> Self {
        if magnitude {
            self.initial_state.mode = ArrowMode::Magnitude;
        }
        self
    }
}
