//! Template compilation and rendering.
//!
//! Templates are MiniJinja (Jinja2) source. Two of them ship with the crate
//! and are compiled once by [`TemplateRegistry::new`]. A caller may replace the
//! primary one per call with its own source.
//!
//! ## Key Types
//!
//! - [`TemplateRegistry`]: compiled built-in templates and the `build` entry points
//! - [`RenderedConfig`]: bytes of both artifacts
//! - [`yaml_block`]: block scalar re-indentation, callable from the runtime template
//!
//! ## Settings
//!
//! Every environment is configured by [`configure_environment`]. Undefined
//! variables are errors, so an options value that lacks a referenced path fails
//! with [`ConfigError::TemplateExecution`](crate::ConfigError::TemplateExecution)
//! instead of rendering an empty string.

pub mod functions;
mod registry;
mod renderer;

pub use functions::{register_runtime_functions, yaml_block, yaml_formatter, YAML_BLOCK_FUNCTION};
pub use registry::{configure_environment, TemplateRegistry};
pub use renderer::RenderedConfig;
