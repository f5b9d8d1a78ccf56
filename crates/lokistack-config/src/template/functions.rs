//! MiniJinja helper functions available to the runtime configuration template.
//!
//! The set of helpers is closed: [`register_runtime_functions`] is the only
//! place names are bound, and it runs when the environment is built.
//! [`yaml_formatter`] is installed on every configuration environment.

use minijinja::value::ValueKind;
use minijinja::{escape_formatter, Environment, Error, ErrorKind, Output, State, Value};

/// Name under which [`yaml_block`] is callable from template source.
pub const YAML_BLOCK_FUNCTION: &str = "yaml_block";

/// Re-indents a multi-line value so it can follow a YAML block scalar
/// indicator (`|` or `>`).
///
/// Trailing line breaks are dropped, interior blank lines are kept, and every
/// line after the first is prefixed with `indent`. The first line is left
/// alone because the template already positions it.
///
/// ```rust
/// use lokistack_config::yaml_block;
///
/// assert_eq!(yaml_block(" ", "foo\nbar\n"), "foo\n bar");
/// assert_eq!(yaml_block("\t", "a\nb\nc"), "a\n\tb\n\tc");
/// assert_eq!(yaml_block("  ", ""), "");
/// ```
pub fn yaml_block(indent: &str, input: &str) -> String {
    let separator = format!("\n{indent}");
    input
        .trim_end_matches('\n')
        .split('\n')
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Registers the runtime template helpers on a MiniJinja environment.
///
/// # Functions Added
///
/// - `yaml_block(indent, value)` - see [`yaml_block`]
pub fn register_runtime_functions(env: &mut Environment<'_>) {
    // {{ yaml_block("          ", blocked.pattern) }}
    env.add_function(YAML_BLOCK_FUNCTION, |indent: &str, value: Value| -> String {
        match value.as_str() {
            Some(text) => yaml_block(indent, text),
            None => yaml_block(indent, &value.to_string()),
        }
    });
}

/// Output formatter that prints booleans the way YAML spells them.
///
/// MiniJinja's default prints `True`/`False`. Everything else goes through
/// [`escape_formatter`] unchanged.
pub fn yaml_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), Error> {
    if value.kind() == ValueKind::Bool {
        let text = if value.is_true() { "true" } else { "false" };
        return out
            .write_str(text)
            .map_err(|_| Error::new(ErrorKind::WriteFailure, "could not write boolean"));
    }
    escape_formatter(out, state, value)
}
