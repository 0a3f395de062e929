use glow::HasContext as _;
use nalgebra_glm::Mat4;

use anyhow::{anyhow, bail, Result};

use crate::arrow::{arrow_vertex_bytes, HEAD_RANGE, SHAFT_RANGE};
use crate::frame::GlyphSurface;
use crate::shader::ShaderSources;

const POSITION_ATTRIB: u32 = 0;

/// GL objects for the arrow pass: one program and the shared arrow mesh.
pub struct ArrowRenderer {
    program: glow::Program,
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,

    projection_loc: Option<glow::UniformLocation>,
    model_loc: Option<glow::UniformLocation>,
}

impl ArrowRenderer {
    /// Anything created before a failure is deleted again.
    pub fn new(
        gl: &glow::Context,
        sources: &ShaderSources,
        version_declaration: &str,
    ) -> Result<Self> {
        let mut pending = Pending::default();

        match Self::create(gl, sources, version_declaration, &mut pending) {
            Ok(renderer) => Ok(renderer),
            Err(e) => {
                log::debug!("Releasing partially created arrow renderer");
                pending.release(gl);
                Err(e)
            }
        }
    }

    fn create(
        gl: &glow::Context,
        sources: &ShaderSources,
        version_declaration: &str,
        pending: &mut Pending,
    ) -> Result<Self> {
        let program =
            compile_program(gl, sources, version_declaration, pending)?;

        let (vertex_array, vertex_buffer) = unsafe {
            let vertex_array = gl.create_vertex_array().map_err(|e| {
                anyhow!("Could not create vertex array: {}", e)
            })?;
            pending.vertex_array = Some(vertex_array);

            let vertex_buffer = gl
                .create_buffer()
                .map_err(|e| anyhow!("Could not create buffer: {}", e))?;
            pending.vertex_buffer = Some(vertex_buffer);

            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                arrow_vertex_bytes(),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<[f32; 2]>() as i32;
            gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIB,
                2,
                glow::FLOAT,
                false,
                stride,
                0,
            );
            gl.enable_vertex_attrib_array(POSITION_ATTRIB);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            (vertex_array, vertex_buffer)
        };

        let (projection_loc, model_loc) = unsafe {
            (
                gl.get_uniform_location(program, "projection"),
                gl.get_uniform_location(program, "model"),
            )
        };

        if projection_loc.is_none() || model_loc.is_none() {
            log::warn!("Arrow program is missing `projection` or `model`");
        }

        // owned by the renderer from here on
        *pending = Pending::default();

        log::debug!("Created arrow renderer");

        Ok(Self {
            program,
            vertex_array,
            vertex_buffer,
            projection_loc,
            model_loc,
        })
    }

    /// Binds the program and mesh; the returned surface draws with them.
    pub fn begin<'a>(&'a self, gl: &'a glow::Context) -> GlowSurface<'a> {
        unsafe {
            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vertex_array));
        }

        GlowSurface { gl, renderer: self }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        log::debug!("Freeing arrow renderer");

        gl.release_program(self.program);
        gl.release_vertex_array(self.vertex_array);
        gl.release_buffer(self.vertex_buffer);
    }
}

pub struct GlowSurface<'a> {
    gl: &'a glow::Context,
    renderer: &'a ArrowRenderer,
}

impl GlyphSurface for GlowSurface<'_> {
    fn set_projection(&mut self, projection: &Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                self.renderer.projection_loc.as_ref(),
                false,
                projection.as_slice(),
            );
        }
    }

    fn draw_glyph(&mut self, model: &Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                self.renderer.model_loc.as_ref(),
                false,
                model.as_slice(),
            );
            self.gl.draw_arrays(
                glow::LINES,
                SHAFT_RANGE.start,
                SHAFT_RANGE.len() as i32,
            );
            self.gl.draw_arrays(
                glow::TRIANGLES,
                HEAD_RANGE.start,
                HEAD_RANGE.len() as i32,
            );
        }
    }
}

impl Drop for GlowSurface<'_> {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);
        }
    }
}

/// Deletes GL objects.
pub trait ReleaseObjects {
    fn release_program(&self, program: glow::Program);
    fn release_shader(&self, shader: glow::Shader);
    fn release_vertex_array(&self, vertex_array: glow::VertexArray);
    fn release_buffer(&self, buffer: glow::Buffer);
}

impl ReleaseObjects for glow::Context {
    fn release_program(&self, program: glow::Program) {
        unsafe { self.delete_program(program) }
    }

    fn release_shader(&self, shader: glow::Shader) {
        unsafe { self.delete_shader(shader) }
    }

    fn release_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { self.delete_vertex_array(vertex_array) }
    }

    fn release_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.delete_buffer(buffer) }
    }
}

/// Objects created so far while building an `ArrowRenderer`.
#[derive(Debug, Default)]
struct Pending {
    program: Option<glow::Program>,
    shaders: Vec<glow::Shader>,
    vertex_array: Option<glow::VertexArray>,
    vertex_buffer: Option<glow::Buffer>,
}

impl Pending {
    fn release<R>(&mut self, gl: &R)
    where
        R: ReleaseObjects + ?Sized,
    {
        for shader in self.shaders.drain(..) {
            gl.release_shader(shader);
        }
        if let Some(program) = self.program.take() {
            gl.release_program(program);
        }
        if let Some(vertex_array) = self.vertex_array.take() {
            gl.release_vertex_array(vertex_array);
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            gl.release_buffer(buffer);
        }
    }
}

/// The program and shaders are tracked in `pending` until linking
/// succeeds; the shaders are deleted once linked.
fn compile_program(
    gl: &glow::Context,
    sources: &ShaderSources,
    version_declaration: &str,
    pending: &mut Pending,
) -> Result<glow::Program> {
    let (vert_src, frag_src) = sources.versioned(version_declaration);

    unsafe {
        let program = gl
            .create_program()
            .map_err(|e| anyhow!("Could not create program: {}", e))?;
        pending.program = Some(program);

        let stages = [
            (glow::VERTEX_SHADER, "vertex", vert_src),
            (glow::FRAGMENT_SHADER, "fragment", frag_src),
        ];

        for (stage, name, src) in stages {
            let shader = gl.create_shader(stage).map_err(|e| {
                anyhow!("Could not create {} shader: {}", name, e)
            })?;
            pending.shaders.push(shader);

            gl.shader_source(shader, &src);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let info = gl.get_shader_info_log(shader);
                bail!("Error compiling {} shader: {}", name, info);
            }

            gl.attach_shader(program, shader);
        }

        gl.bind_attrib_location(program, POSITION_ATTRIB, "position");
        gl.link_program(program);

        for shader in pending.shaders.drain(..) {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        if !gl.get_program_link_status(program) {
            let info = gl.get_program_info_log(program);
            bail!("Error linking arrow program: {}", info);
        }

        log::debug!("Linked arrow program");

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::num::NonZeroU32;

    #[derive(Default)]
    struct Released {
        objects: RefCell<Vec<(&'static str, u32)>>,
    }

    impl Released {
        fn push(&self, kind: &'static str, id: NonZeroU32) {
            self.objects.borrow_mut().push((kind, id.get()));
        }
    }

    impl ReleaseObjects for Released {
        fn release_program(&self, program: glow::Program) {
            self.push("program", program.0);
        }

        fn release_shader(&self, shader: glow::Shader) {
            self.push("shader", shader.0);
        }

        fn release_vertex_array(&self, vertex_array: glow::VertexArray) {
            self.push("vertex_array", vertex_array.0);
        }

        fn release_buffer(&self, buffer: glow::Buffer) {
            self.push("buffer", buffer.0);
        }
    }

    fn id(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn failed_second_shader_releases_first_and_program() {
        let mut pending = Pending {
            program: Some(glow::NativeProgram(id(1))),
            shaders: vec![glow::NativeShader(id(2))],
            ..Default::default()
        };

        let released = Released::default();
        pending.release(&released);

        assert_eq!(
            *released.objects.borrow(),
            vec![("shader", 2), ("program", 1)]
        );
    }

    #[test]
    fn failed_buffer_releases_program_and_vertex_array() {
        let mut pending = Pending {
            program: Some(glow::NativeProgram(id(1))),
            vertex_array: Some(glow::NativeVertexArray(id(3))),
            ..Default::default()
        };

        let released = Released::default();
        pending.release(&released);

        assert_eq!(
            *released.objects.borrow(),
            vec![("program", 1), ("vertex_array", 3)]
        );
    }

    #[test]
    fn release_is_idempotent() {
        let mut pending = Pending {
            program: Some(glow::NativeProgram(id(1))),
            shaders: vec![glow::NativeShader(id(2)), glow::NativeShader(id(4))],
            vertex_array: Some(glow::NativeVertexArray(id(3))),
            vertex_buffer: Some(glow::NativeBuffer(id(5))),
        };

        let released = Released::default();
        pending.release(&released);
        assert_eq!(released.objects.borrow().len(), 5);

        pending.release(&released);
        assert_eq!(released.objects.borrow().len(), 5);
        assert!(pending.program.is_none() && pending.shaders.is_empty());
    }

    #[test]
    fn nothing_pending_releases_nothing() {
        let released = Released::default();
        Pending::default().release(&released);
        assert!(released.objects.borrow().is_empty());
    }
}
