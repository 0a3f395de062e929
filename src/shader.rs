use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const VERTEX_FILE: &str = "vertex.glsl";
pub const FRAGMENT_FILE: &str = "fragment.glsl";

/// GLSL sources for the arrow pass, without a `#version` line; the
/// backend prepends the one matching its context, followed by
/// `NEW_SHADER_INTERFACE` (1 for `in`/`out`, 0 for `attribute` and
/// `gl_FragColor`).
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let vertex = read_source(dir.join(VERTEX_FILE))?;
        let fragment = read_source(dir.join(FRAGMENT_FILE))?;

        log::info!("Loaded shaders from {}", dir.display());

        Ok(Self { vertex, fragment })
    }

    pub fn versioned(&self, version_declaration: &str) -> (String, String) {
        let header = format!(
            "{}\n#define NEW_SHADER_INTERFACE {}\n",
            version_declaration,
            is_new_shader_interface(version_declaration) as i32
        );

        (
            format!("{}{}", header, self.vertex),
            format!("{}{}", header, self.fragment),
        )
    }
}

/// GLSL 1.30+ and ESSL 3.00+ use `in`/`out`; older versions
/// (`#version 120`, `#version 100`) don't.
pub fn is_new_shader_interface(version_declaration: &str) -> bool {
    let mut tokens = version_declaration
        .split_whitespace()
        .skip_while(|t| *t != "#version")
        .skip(1);

    let version = match tokens.next().and_then(|v| v.parse::<u32>().ok()) {
        Some(version) => version,
        None => return false,
    };

    if tokens.next() == Some("es") {
        version >= 300
    } else {
        version >= 130
    }
}

fn read_source(path: PathBuf) -> Result<String> {
    log::debug!("Reading shader {}", path.display());

    std::fs::read_to_string(&path).with_context(|| {
        format!("Could not open shader file {}", path.display())
    })
}
