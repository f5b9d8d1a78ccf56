//! Rendering both configuration artifacts.
//!
//! A render call executes two templates against the same options value:
//!
//! 1. the primary template, either built-in or a caller-supplied override;
//! 2. the built-in runtime configuration template.
//!
//! The primary template runs first. It is the one callers can customise, so it
//! is the one most likely to fail, and a failure there skips the runtime
//! template entirely. Either failure fails the whole call; no partial output is
//! returned.

use minijinja::Template;
use serde::Serialize;
use tracing::{debug, warn};

use super::registry::{primary_environment, TemplateRegistry};
use crate::assets::{LOKI_CONFIG_TEMPLATE_NAME, LOKI_RUNTIME_CONFIG_TEMPLATE_NAME};
use crate::error::ConfigError;
use crate::{LOKI_CONFIG_FILE_NAME, LOKI_RUNTIME_CONFIG_FILE_NAME};

/// Bytes of both rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    config: Vec<u8>,
    runtime_config: Vec<u8>,
}

impl RenderedConfig {
    /// Contents of `config.yaml`.
    pub fn config(&self) -> &[u8] {
        &self.config
    }

    /// Contents of `runtime-config.yaml`.
    pub fn runtime_config(&self) -> &[u8] {
        &self.runtime_config
    }

    /// Each artifact paired with the file name it is mounted under.
    pub fn files(&self) -> [(&'static str, &[u8]); 2] {
        [
            (LOKI_CONFIG_FILE_NAME, self.config.as_slice()),
            (LOKI_RUNTIME_CONFIG_FILE_NAME, self.runtime_config.as_slice()),
        ]
    }

    /// Returns `(config, runtime_config)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.config, self.runtime_config)
    }
}

/// Where the primary template comes from for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimarySource<'a> {
    Builtin,
    Custom(&'a str),
}

impl<'a> PrimarySource<'a> {
    /// Absent or empty override text selects the built-in template.
    pub(crate) fn resolve(custom: Option<&'a str>) -> Self {
        match custom {
            Some(source) if !source.is_empty() => PrimarySource::Custom(source),
            _ => PrimarySource::Builtin,
        }
    }
}

impl TemplateRegistry {
    /// Renders both artifacts, optionally overriding the primary template.
    ///
    /// `custom` replaces the built-in primary template when it is present and
    /// non-empty. The runtime configuration template is always the built-in
    /// one.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::TemplateParse`] if `custom` does not compile. Nothing
    ///   is executed.
    /// - [`ConfigError::TemplateExecution`] if either template fails against
    ///   `options`, tagged with the failing template's name.
    /// - [`ConfigError::OutputCapture`] if an output buffer cannot be written.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lokistack_config::{Options, TemplateRegistry};
    ///
    /// let registry = TemplateRegistry::new().unwrap();
    /// let rendered = registry.build(None, &Options::default()).unwrap();
    ///
    /// assert!(rendered.config().starts_with(b"---\n"));
    /// assert!(rendered.runtime_config().starts_with(b"---\noverrides:"));
    /// ```
    pub fn build<T>(
        &self,
        custom: Option<&str>,
        options: &T,
    ) -> Result<RenderedConfig, ConfigError>
    where
        T: Serialize + ?Sized,
    {
        match PrimarySource::resolve(custom) {
            PrimarySource::Custom(source) => self.build_with_template(source, options),
            PrimarySource::Builtin => {
                let primary = self.primary_template()?;
                let config = execute(&primary, LOKI_CONFIG_TEMPLATE_NAME, options)?;
                self.finish(config, options)
            }
        }
    }

    /// Renders both artifacts with a mandatory custom primary template.
    ///
    /// Unlike [`build`](Self::build) there is no fallback: `source` is
    /// compiled as given, even when empty.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_template<T>(
        &self,
        source: &str,
        options: &T,
    ) -> Result<RenderedConfig, ConfigError>
    where
        T: Serialize + ?Sized,
    {
        let env = primary_environment();
        let primary = env
            .template_from_named_str(LOKI_CONFIG_TEMPLATE_NAME, source)
            .map_err(|err| {
                warn!(error = %err, "custom loki configuration template does not compile");
                ConfigError::TemplateParse {
                    name: LOKI_CONFIG_TEMPLATE_NAME,
                    source: err,
                }
            })?;
        debug!(bytes = source.len(), "compiled custom loki configuration template");

        let config = execute(&primary, LOKI_CONFIG_TEMPLATE_NAME, options)?;
        self.finish(config, options)
    }

    /// Runs the runtime configuration template once the primary one succeeded.
    fn finish<T>(&self, config: Vec<u8>, options: &T) -> Result<RenderedConfig, ConfigError>
    where
        T: Serialize + ?Sized,
    {
        let runtime = self.runtime_template()?;
        let runtime_config = execute(&runtime, LOKI_RUNTIME_CONFIG_TEMPLATE_NAME, options)?;
        Ok(RenderedConfig {
            config,
            runtime_config,
        })
    }
}

/// Executes `template` into a fresh buffer.
fn execute<T>(
    template: &Template<'_, '_>,
    name: &'static str,
    options: &T,
) -> Result<Vec<u8>, ConfigError>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    template
        .render_captured_to(options, &mut buffer)
        .map_err(|err| {
            warn!(template = name, error = %err, "template execution failed");
            ConfigError::execution(name, err)
        })?;
    debug!(template = name, bytes = buffer.len(), "rendered template");
    Ok(buffer)
}
