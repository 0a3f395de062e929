use std::sync::Arc;
use std::time::Duration;

use crossbeam::atomic::AtomicCell;
use eframe::egui;
use nalgebra_glm::{Mat4, Vec2};
use parking_lot::Mutex;

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::frame::render_frame;
use crate::gl::ArrowRenderer;
use crate::panel::ControlPanel;
use crate::shader::ShaderSources;

pub struct DipoleApp {
    config: Config,
    panel: ControlPanel,

    points: Vec<Vec2>,
    projection: Mat4,

    renderer: Arc<Mutex<ArrowRenderer>>,
    should_exit: Arc<AtomicCell<bool>>,
}

impl DipoleApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        should_exit: Arc<AtomicCell<bool>>,
    ) -> Result<Self> {
        let gl = cc
            .gl
            .as_ref()
            .ok_or_else(|| anyhow!("No OpenGL context available"))?;

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let sources = ShaderSources::load(&config.shader_dir)?;
        let version = egui_glow::ShaderVersion::get(gl);
        log::debug!("Using shader version {:?}", version);

        let renderer =
            ArrowRenderer::new(gl, &sources, version.version_declaration())?;

        let points = config.grid.points();
        log::info!("Evaluating field at {} grid points", points.len());

        Ok(Self {
            panel: ControlPanel::new(config.initial_state),
            projection: config.view.projection(),
            points,
            renderer: Arc::new(Mutex::new(renderer)),
            should_exit,
            config,
        })
    }

    fn field_view(&self, ctx: &egui::Context, models: Vec<Mat4>) {
        let frame = egui::Frame::none().fill(egui::Color32::BLACK);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let rect = ui.max_rect();

            let renderer = self.renderer.clone();
            let projection = self.projection;

            let callback = egui::PaintCallback {
                rect,
                callback: Arc::new(egui_glow::CallbackFn::new(
                    move |_info, painter| {
                        let renderer = renderer.lock();
                        let mut surface = renderer.begin(painter.gl());
                        let drawn =
                            render_frame(&mut surface, &projection, &models);
                        log::trace!("Drew {} arrows", drawn);
                    },
                )),
            };

            ui.painter().add(callback);
        });
    }
}

impl eframe::App for DipoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.should_exit.load() {
            log::debug!("Ctrl-C received, exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let models = self.panel.show(ctx, &self.points, &self.config);
        self.field_view(ctx, models);

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        log::debug!("Freeing resources");

        if let Some(gl) = gl {
            self.renderer.lock().destroy(gl);
        }
    }
}
