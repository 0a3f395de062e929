pub mod app;
pub mod arrow;
pub mod config;
pub mod field;
pub mod frame;
pub mod gl;
pub mod grid;
pub mod panel;
pub mod shader;
