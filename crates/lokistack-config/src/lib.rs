//! # LokiStack Config - Loki configuration rendering
//!
//! `lokistack-config` turns an options model into the two files a Loki
//! deployment mounts from its configuration map:
//!
//! | Artifact | File | Purpose |
//! |----------|------|---------|
//! | Primary config | [`LOKI_CONFIG_FILE_NAME`] | Main service configuration, mounted read-only |
//! | Runtime config | [`LOKI_RUNTIME_CONFIG_FILE_NAME`] | Per-tenant overrides Loki reloads at runtime |
//!
//! Both are mounted under [`LOKI_CONFIG_MOUNT_DIR`].
//!
//! ## Core Concepts
//!
//! - [`TemplateRegistry`]: the built-in templates, compiled once at startup
//! - [`Options`]: the typed model the built-in templates read
//! - [`RenderedConfig`]: bytes of both artifacts from one render call
//! - [`ConfigError`]: parse, execution and output failures, tagged by template
//! - [`yaml_block`]: re-indents multi-line values for YAML block scalars
//!
//! ## Quick Start
//!
//! ```rust
//! use lokistack_config::{Options, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new().expect("built-in templates compile");
//! let opts = Options::new("lokistack-dev", "openshift-logging");
//!
//! let rendered = registry.build(None, &opts).unwrap();
//! for (name, bytes) in rendered.files() {
//!     assert!(!bytes.is_empty(), "{name} is empty");
//! }
//! ```
//!
//! ## Custom Primary Template
//!
//! Operators may ship their own primary template. The runtime configuration is
//! always rendered from the built-in template.
//!
//! ```rust
//! use lokistack_config::{Options, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new().unwrap();
//! let custom = "target: all\nreplication_factor: {{ stack.replication_factor }}\n";
//!
//! let rendered = registry.build(Some(custom), &Options::default()).unwrap();
//! assert_eq!(rendered.config(), b"target: all\nreplication_factor: 1\n");
//! ```

mod assets;
mod error;
pub mod options;
pub mod template;

/// File name of the primary configuration inside the configuration map.
pub const LOKI_CONFIG_FILE_NAME: &str = "config.yaml";

/// File name of the runtime configuration inside the configuration map.
pub const LOKI_RUNTIME_CONFIG_FILE_NAME: &str = "runtime-config.yaml";

/// Directory the configuration map is mounted at.
pub const LOKI_CONFIG_MOUNT_DIR: &str = "/etc/loki/config";

pub use assets::{
    LOKI_CONFIG_TEMPLATE, LOKI_CONFIG_TEMPLATE_NAME, LOKI_RUNTIME_CONFIG_TEMPLATE,
    LOKI_RUNTIME_CONFIG_TEMPLATE_NAME,
};
pub use error::ConfigError;
pub use options::Options;
pub use template::{yaml_block, RenderedConfig, TemplateRegistry};
