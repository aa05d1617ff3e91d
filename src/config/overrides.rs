//! Command-line overrides.
//!
//! `--set key=value` expressions are merged into the parsed TOML tree before
//! decoding, so a run can tweak single fields without editing the file. In
//! strict mode a key the schema does not recognize still fails afterwards,
//! during decoding, like any other unknown key.

use crate::error::{Error, Result};
use toml::Value;
use toml::value::Table;

/// Apply `key=value` override expressions to a parsed document, in order.
pub fn apply_overrides(doc: &mut Table, exprs: &[String]) -> Result<()> {
    for expr in exprs {
        apply_override(doc, expr)?;
    }
    Ok(())
}

fn apply_override(doc: &mut Table, expr: &str) -> Result<()> {
    let Some((key, raw)) = expr.split_once('=') else {
        return Err(Error::InvalidOverride {
            expr: expr.to_string(),
            reason: "expected 'key=value'".to_string(),
        });
    };
    let key = key.trim();
    if key.is_empty() || key.split('.').any(|seg| seg.trim().is_empty()) {
        return Err(Error::InvalidOverride {
            expr: expr.to_string(),
            reason: "empty key segment".to_string(),
        });
    }

    let mut segments = key.split('.').map(str::trim).collect::<Vec<_>>();
    let leaf = segments.pop().unwrap_or(key);

    let mut table = doc;
    let mut walked = Vec::new();
    for seg in segments {
        walked.push(seg);
        table = table
            .entry(seg.to_string())
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| Error::InvalidOverride {
                expr: expr.to_string(),
                reason: format!("'{}' is not a table", walked.join(".")),
            })?;
    }

    table.insert(leaf.to_string(), parse_value(raw.trim()));
    Ok(())
}

// A bare scalar is not a TOML document, so parse it as the value of a
// one-key table; anything that still fails is taken as a plain string.
fn parse_value(raw: &str) -> Value {
    format!("v = {raw}")
        .parse::<Table>()
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
