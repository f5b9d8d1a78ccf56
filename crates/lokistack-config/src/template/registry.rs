//! Compiled built-in templates.
//!
//! [`TemplateRegistry`] owns the two built-in templates. Both are compiled once
//! in [`TemplateRegistry::new`], and the registry exposes no way to change them
//! afterwards. Build one registry at startup and share it by reference; it is
//! `Send + Sync`.
//!
//! # Environments
//!
//! Each built-in template lives in its own MiniJinja environment so helper
//! functions are bound per template:
//!
//! | Template | Helpers |
//! |----------|---------|
//! | `loki-config.yaml` | none beyond MiniJinja builtins |
//! | `loki-runtime-config.yaml` | `yaml_block` |
//!
//! Both environments share the settings applied by [`configure_environment`].
//! Custom primary templates get a fresh environment built the same way as the
//! primary one, so an override with the built-in source renders identical bytes.

use minijinja::{AutoEscape, Environment, Template, UndefinedBehavior};
use tracing::debug;

use super::functions::{register_runtime_functions, yaml_formatter};
use crate::assets::{
    LOKI_CONFIG_TEMPLATE, LOKI_CONFIG_TEMPLATE_NAME, LOKI_RUNTIME_CONFIG_TEMPLATE,
    LOKI_RUNTIME_CONFIG_TEMPLATE_NAME,
};
use crate::error::ConfigError;
use crate::{LOKI_CONFIG_MOUNT_DIR, LOKI_RUNTIME_CONFIG_FILE_NAME};

/// Applies the settings shared by every configuration template environment.
///
/// - Block tags on their own line leave no blank line behind
///   (`trim_blocks` and `lstrip_blocks`).
/// - The final newline of the template source is kept.
/// - Output is never escaped. MiniJinja would otherwise pick an escape mode
///   from the `.yaml` template names.
/// - Referencing a path the options value does not expose is an error.
/// - Booleans print as YAML `true`/`false` (see [`yaml_formatter`]).
/// - `config_mount_dir` and `runtime_config_file_name` are available as globals.
pub fn configure_environment(env: &mut Environment<'_>) {
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_formatter(yaml_formatter);
    env.add_global("config_mount_dir", LOKI_CONFIG_MOUNT_DIR);
    env.add_global("runtime_config_file_name", LOKI_RUNTIME_CONFIG_FILE_NAME);
}

/// Environment for the primary configuration template, built-in or custom.
pub(crate) fn primary_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    configure_environment(&mut env);
    env
}

/// Environment for the runtime configuration template.
pub(crate) fn runtime_environment<'source>() -> Environment<'source> {
    let mut env = primary_environment();
    register_runtime_functions(&mut env);
    env
}

/// The built-in primary and runtime configuration templates, compiled.
#[derive(Debug)]
pub struct TemplateRegistry {
    primary: Environment<'static>,
    runtime: Environment<'static>,
}

impl TemplateRegistry {
    /// Compiles both built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Builtin`] if an embedded template does not
    /// compile. That means the crate was packaged with a broken template;
    /// callers should abort startup rather than retry.
    pub fn new() -> Result<Self, ConfigError> {
        let mut primary = primary_environment();
        primary
            .add_template(LOKI_CONFIG_TEMPLATE_NAME, LOKI_CONFIG_TEMPLATE)
            .map_err(|source| ConfigError::Builtin {
                name: LOKI_CONFIG_TEMPLATE_NAME,
                source,
            })?;

        let mut runtime = runtime_environment();
        runtime
            .add_template(LOKI_RUNTIME_CONFIG_TEMPLATE_NAME, LOKI_RUNTIME_CONFIG_TEMPLATE)
            .map_err(|source| ConfigError::Builtin {
                name: LOKI_RUNTIME_CONFIG_TEMPLATE_NAME,
                source,
            })?;

        debug!(
            primary = LOKI_CONFIG_TEMPLATE_NAME,
            runtime = LOKI_RUNTIME_CONFIG_TEMPLATE_NAME,
            "compiled built-in templates"
        );

        Ok(Self { primary, runtime })
    }

    /// The compiled built-in primary configuration template.
    pub fn primary_template(&self) -> Result<Template<'_, '_>, ConfigError> {
        builtin(&self.primary, LOKI_CONFIG_TEMPLATE_NAME)
    }

    /// The compiled built-in runtime configuration template.
    pub fn runtime_template(&self) -> Result<Template<'_, '_>, ConfigError> {
        builtin(&self.runtime, LOKI_RUNTIME_CONFIG_TEMPLATE_NAME)
    }

    /// Source text of the built-in primary configuration template.
    pub fn primary_source(&self) -> &'static str {
        LOKI_CONFIG_TEMPLATE
    }

    /// Source text of the built-in runtime configuration template.
    pub fn runtime_source(&self) -> &'static str {
        LOKI_RUNTIME_CONFIG_TEMPLATE
    }
}

// Both names were added in `new`, so a lookup failure only happens if the
// registry was built some other way.
fn builtin<'env>(
    env: &'env Environment<'static>,
    name: &'static str,
) -> Result<Template<'env, 'env>, ConfigError> {
    env.get_template(name)
        .map_err(|source| ConfigError::Builtin { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_registry_compiles_builtins() {
        let registry = TemplateRegistry::new().unwrap();
        assert_eq!(
            registry.primary_template().unwrap().name(),
            LOKI_CONFIG_TEMPLATE_NAME
        );
        assert_eq!(
            registry.runtime_template().unwrap().name(),
            LOKI_RUNTIME_CONFIG_TEMPLATE_NAME
        );
    }

    #[test]
    fn test_builtin_templates_render_from_borrowed_registry() {
        fn render_primary(registry: &TemplateRegistry) -> String {
            registry
                .primary_template()
                .unwrap()
                .render(crate::Options::default())
                .unwrap()
        }

        let registry = TemplateRegistry::new().unwrap();
        assert!(render_primary(&registry).starts_with("---\n"));
    }

    #[test]
    fn test_registry_exposes_sources() {
        let registry = TemplateRegistry::new().unwrap();
        assert_eq!(registry.primary_source(), LOKI_CONFIG_TEMPLATE);
        assert!(registry.runtime_source().contains("yaml_block("));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateRegistry>();
    }

    #[test]
    fn test_primary_environment_has_no_yaml_block() {
        let env = primary_environment();
        let result = env.render_str("{{ yaml_block(\"  \", \"a\") }}", context! {});
        assert!(result.is_err());
    }

    #[test]
    fn test_runtime_environment_has_yaml_block() {
        let env = runtime_environment();
        let output = env
            .render_str("{{ yaml_block(\"  \", \"a\\nb\") }}", context! {})
            .unwrap();
        assert_eq!(output, "a\n  b");
    }

    #[test]
    fn test_environment_is_strict_about_undefined() {
        let env = primary_environment();
        let result = env.render_str("{{ missing.field }}", context! {});
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_exposes_mount_globals() {
        let env = primary_environment();
        let output = env
            .render_str("{{ config_mount_dir }}/{{ runtime_config_file_name }}", context! {})
            .unwrap();
        assert_eq!(output, "/etc/loki/config/runtime-config.yaml");
    }

    #[test]
    fn test_environment_does_not_escape_yaml_templates() {
        let env = primary_environment();
        let template = env
            .template_from_named_str("quoted.yaml", "pattern: {{ pattern }}")
            .unwrap();
        let output = template.render(context! { pattern => "{env=\"prod\"} & <b>" }).unwrap();
        assert_eq!(output, "pattern: {env=\"prod\"} & <b>");
    }

    #[test]
    fn test_environment_trims_block_lines() {
        let env = primary_environment();
        let output = env
            .render_str("a:\n  {% if true %}\n  b: 1\n  {% endif %}\nc: 2\n", context! {})
            .unwrap();
        assert_eq!(output, "a:\n  b: 1\nc: 2\n");
    }
}
