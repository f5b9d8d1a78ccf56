//! Error types for configuration rendering.
//!
//! [`ConfigError`] wraps the template engine's errors and tags each one with
//! the template it came from, so callers can tell a bad override apart from a
//! runtime configuration failure without inspecting engine internals.

use minijinja::ErrorKind;
use thiserror::Error;

/// Error type for configuration rendering operations.
///
/// Every variant keeps the underlying [`minijinja::Error`] as its source, which
/// carries the template name and line number of the failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Custom primary template source does not compile.
    #[error("failed to create loki configuration YAML template: {source}")]
    TemplateParse {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    /// A compiled template failed while executing against the options value.
    #[error("failed to render {template}: {source}")]
    TemplateExecution {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },

    /// The in-memory output buffer could not be written.
    #[error("failed to read {template} from buffer: {source}")]
    OutputCapture {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },

    /// An embedded built-in template is malformed.
    ///
    /// This is a packaging defect. Treat it as fatal at startup.
    #[error("built-in template {name} is invalid: {source}")]
    Builtin {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

impl ConfigError {
    /// Classifies an error raised while executing `template`.
    pub(crate) fn execution(template: &'static str, source: minijinja::Error) -> Self {
        match source.kind() {
            ErrorKind::WriteFailure => ConfigError::OutputCapture { template, source },
            _ => ConfigError::TemplateExecution { template, source },
        }
    }

    /// Name of the template the error refers to.
    pub fn template_name(&self) -> &'static str {
        match self {
            ConfigError::TemplateParse { name, .. } | ConfigError::Builtin { name, .. } => *name,
            ConfigError::TemplateExecution { template, .. }
            | ConfigError::OutputCapture { template, .. } => *template,
        }
    }
}
