//! Environment snapshot and `${VAR}` placeholder interpolation.
//!
//! Configuration files never read the process environment directly. The
//! environment is captured once into an [`EnvSnapshot`] and injected into
//! resolution, so loading is deterministic and testable without mutating
//! process-wide state.

use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// An immutable capture of environment variables, taken once at startup.
///
/// Lookups through [`require`](Self::require) reject set-but-empty values:
/// an empty `PRIVATE_KEY` cannot be a usable credential, and distinguishing
/// "unset" from "set but empty" makes the resulting error actionable.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        std::env::vars().collect()
    }

    /// Raw lookup. Returns the value even if it is empty.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// Whether the variable is present at all, empty or not.
    pub fn is_set(&self, var: &str) -> bool {
        self.vars.contains_key(var)
    }

    /// Look up a variable that a config field requires. Missing and
    /// set-but-empty values produce distinct errors, both naming the
    /// variable and the field (`at`) that references it.
    pub fn require(&self, var: &str, at: &str) -> Result<&str> {
        match self.vars.get(var) {
            Some(value) if value.is_empty() => {
                Err(ConfigError::EmptyEnv { var: var.to_string(), at: at.to_string() })
            }
            Some(value) => Ok(value),
            None => Err(ConfigError::MissingEnv { var: var.to_string(), at: at.to_string() }),
        }
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Load a `.env` file from the current directory or its ancestors, if one
/// exists. Must run before [`EnvSnapshot::capture`] for its variables to be
/// visible. Returns the path that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            tracing::warn!(%err, "failed to load .env file");
            None
        }
    }
}

/// One lexed piece of a template string.
enum Segment<'a> {
    /// Literal text, passed through unchanged.
    Literal(&'a str),
    /// An escaped `$$`, producing a literal `$`.
    Dollar,
    /// A `${NAME}` placeholder.
    Var(&'a str),
}

/// Lex a template into segments. `$$` escapes a literal dollar; `${NAME}`
/// references an environment variable; any other use of `$` is an error.
fn segments<'a>(template: &'a str, at: &str) -> Result<Vec<Segment<'a>>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        if idx > 0 {
            out.push(Segment::Literal(&rest[..idx]));
        }
        let tail = &rest[idx + 1..];

        if let Some(after) = tail.strip_prefix('$') {
            out.push(Segment::Dollar);
            rest = after;
            continue;
        }

        let Some(inner) = tail.strip_prefix('{') else {
            return Err(placeholder_err(at, "expected `${` or `$$` after `$`"));
        };
        let Some(end) = inner.find('}') else {
            return Err(placeholder_err(at, "unclosed `${`"));
        };
        let name = &inner[..end];
        if !is_valid_var_name(name) {
            return Err(placeholder_err(
                at,
                &format!("`{name}` is not a valid environment variable name"),
            ));
        }
        out.push(Segment::Var(name));
        rest = &inner[end + 1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    Ok(out)
}

fn placeholder_err(at: &str, detail: &str) -> ConfigError {
    ConfigError::Placeholder { at: at.to_string(), detail: detail.to_string() }
}

fn is_valid_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else { return false };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expand every `${VAR}` in `template` against the snapshot. Strict: a
/// malformed template or a missing/empty variable is an error naming the
/// config field (`at`) that owns the template.
pub fn interpolate(template: &str, snapshot: &EnvSnapshot, at: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    for segment in segments(template, at)? {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Dollar => out.push('$'),
            Segment::Var(name) => out.push_str(snapshot.require(name, at)?),
        }
    }
    Ok(out)
}

/// List the environment variables a template references, in order of first
/// appearance. Best effort: malformed templates yield whatever was lexable
/// before the defect, leaving the error to [`interpolate`].
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    if let Ok(segments) = segments(template, "") {
        for segment in segments {
            if let Segment::Var(name) = segment {
                if !found.contains(&name) {
                    found.push(name);
                }
            }
        }
    }
    found
}
