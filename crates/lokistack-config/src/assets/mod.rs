//! Built-in template sources.
//!
//! Both templates are embedded at compile time so a deployed operator never
//! depends on template files being present on disk. They are compiled once by
//! [`TemplateRegistry::new`](crate::TemplateRegistry::new).

/// Name under which the primary configuration template is compiled.
///
/// Custom primary templates are compiled under the same name so diagnostics
/// read the same regardless of where the source came from.
pub const LOKI_CONFIG_TEMPLATE_NAME: &str = "loki-config.yaml";

/// Name under which the runtime configuration template is compiled.
pub const LOKI_RUNTIME_CONFIG_TEMPLATE_NAME: &str = "loki-runtime-config.yaml";

/// Source of the built-in primary configuration template.
///
/// Passing this text as a custom override renders exactly what the built-in
/// template renders.
pub const LOKI_CONFIG_TEMPLATE: &str = include_str!("loki-config.yaml");

/// Source of the built-in runtime configuration template.
///
/// Calls `yaml_block` to embed multi-line blocked query patterns.
pub const LOKI_RUNTIME_CONFIG_TEMPLATE: &str = include_str!("loki-runtime-config.yaml");
