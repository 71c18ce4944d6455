//! Key file format
//!
//! One record per line, two whitespace-separated fields:
//!
//! ```text
//! <key> <key>:
//! ```
//!
//! The second field is a placeholder value (the key echoed with a trailing
//! colon) so the file can drive put/get benchmarks directly. Readers only
//! interpret the first field.

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Format one key as a record line (without the trailing newline)
pub fn format_record(key: u64) -> String {
    format!("{key} {key}:")
}

/// Parse the key out of one record line
///
/// A malformed record is `Error::Format` reported at line 1; `read_keys`
/// reports the line number within the file instead.
pub fn parse_record(line: &str) -> Result<u64> {
    parse_key_field(line).map_err(|message| Error::Format { line: 1, message })
}

fn parse_key_field(line: &str) -> std::result::Result<u64, String> {
    let field = line.split_whitespace().next().ok_or_else(|| "empty record".to_string())?;
    field.parse::<u64>().map_err(|e| format!("invalid key '{field}': {e}"))
}

/// Write `keys` to `path`, truncating any existing file
pub fn write_keys<P: AsRef<Path>>(path: P, keys: &[u64]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    for &key in keys {
        writeln!(writer, "{}", format_record(key))?;
    }
    writer.flush()?;
    tracing::info!("Wrote {} keys to {}", keys.len(), path.display());
    Ok(())
}

/// Read the keys of a key file in order, skipping blank lines
pub fn read_keys<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut keys = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let key =
            parse_key_field(&line).map_err(|message| Error::Format { line: idx + 1, message })?;
        keys.push(key);
    }

    tracing::debug!("Loaded {} keys from {}", keys.len(), path.display());
    Ok(keys)
}
