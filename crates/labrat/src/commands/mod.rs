//! CLI command implementations.

pub(crate) mod escape;
pub(crate) mod render;
pub(crate) mod spans;

pub(crate) use escape::EscapeArgs;
pub(crate) use render::RenderArgs;
pub(crate) use spans::SpansArgs;
