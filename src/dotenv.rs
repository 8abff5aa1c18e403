//! Dotenv writer for fetched secrets.
//!
//! # Format
//!
//! One `KEY=value` line per secret entry, in the order the secret lists them.
//! A string value containing a space is wrapped in double quotes:
//!
//! ```text
//! DB_HOST=localhost
//! DB_NAME="my app"
//! ```
//!
//! Non-string JSON values (numbers, booleans, null, arrays, objects) are
//! written as their JSON text and never quoted: `true`, `null`, `["a","b"]`.
//! Writers that stringify with Python's `str()` produce `True`, `None` and
//! `['a', 'b']` for the same secret, so files differ for those values.
//!
//! # Example
//!
//! ```no_run
//! use secret_dotenv::dotenv::write_env_file;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let secrets = json!({"DB_HOST": "localhost", "DB_NAME": "my app"});
//!
//! write_env_file(secrets.as_object().unwrap(), std::path::Path::new(".env"))?;
//! # Ok(())
//! # }
//! ```

use crate::cloud::aws::SecretValue;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render a single value the way it appears after `=`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.contains(' ') => format!("\"{}\"", s),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render one `KEY=value` line (without the trailing newline).
pub fn format_line(key: &str, value: &Value) -> String {
    format!("{}={}", key, format_value(value))
}

/// Write secrets to `path` in environment-variable format.
///
/// The file is created if missing and truncated if it exists; previous
/// contents are never merged.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written (missing parent
/// directory, permission denied, ...).
pub fn write_env_file(secrets: &Map<String, Value>, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);

    for (key, value) in secrets {
        writeln!(writer, "{}", format_line(key, value))
            .with_context(|| format!("Failed to write to: {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", path.display()))?;

    Ok(())
}

/// Save a fetched secret to `path`, or only report what would be saved.
///
/// Returns the number of keys. With `dry_run` set, the key names are listed
/// on `out` and `path` is left alone; values are never written to `out`.
///
/// # Errors
///
/// A binary-backed secret has no key/value pairs and is rejected before the
/// file is opened. Write failures are returned as from [`write_env_file`].
pub fn save_secret<W: Write>(
    secret: &SecretValue,
    path: &Path,
    dry_run: bool,
    out: &mut W,
) -> Result<usize> {
    let secrets = secret.as_map().ok_or_else(|| {
        anyhow::anyhow!("Secret is stored as binary text, not as key/value pairs")
    })?;

    if dry_run {
        writeln!(
            out,
            "Dry run - {} key(s) would be written to {}:",
            secrets.len(),
            path.display()
        )?;
        for key in secrets.keys() {
            writeln!(out, "  - {}", key)?;
        }
        return Ok(secrets.len());
    }

    write_env_file(secrets, path)?;
    Ok(secrets.len())
}

/// Parse a line written by [`format_line`] back into its key and value.
///
/// Surrounding double quotes are removed only when the quoted text contains
/// a space, which is exactly when [`format_value`] adds them. Blank lines and
/// `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;

    let value = match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if inner.contains(' ') => inner,
        _ => value,
    };

    Some((key.to_string(), value.to_string()))
}
