//! Client view generation from a depot spec
//!
//! A single depot line is mapped relative to the client root (only its last
//! segment survives). Several lines keep the full depot hierarchy under the
//! client root so that separate depot trees cannot collide.

use crate::error::ConfigError;
use crate::path::DepotPath;
use crate::view::{Polarity, ViewMap, ViewMapEntry};

/// Build the client view for `depot_spec` mapped into `client_root`
///
/// Returns `Ok(None)` when either input is empty, meaning no mapping is
/// configured. Any line that is not a `//` depot path fails the whole call.
pub fn generate_client_view(
    depot_spec: &str,
    client_root: &str,
) -> Result<Option<ViewMap>, ConfigError> {
    let client_root = client_root.trim();
    if depot_spec.trim().is_empty() || client_root.is_empty() {
        return Ok(None);
    }
    if client_root.contains('/') {
        return Err(ConfigError::InvalidClientRoot(client_root.to_string()));
    }

    let lines = parse_depot_lines(depot_spec)?;
    let multi = lines.len() > 1;

    let mut entries = Vec::with_capacity(lines.len());
    for (line_no, polarity, depot) in lines {
        let client_text = if multi {
            format!("//{}/{}", client_root, depot.without_root())
        } else {
            format!("//{}/{}", client_root, depot.last_segment())
        };
        let client = DepotPath::parse(&client_text)
            .map_err(|source| ConfigError::InvalidPath { line: line_no, source })?;

        entries.push(ViewMapEntry {
            depot,
            client,
            polarity,
        });
    }

    Ok(Some(ViewMap::from_entries(entries)))
}

/// Parse every non-blank line of a depot spec, failing on the first bad one
fn parse_depot_lines(depot_spec: &str) -> Result<Vec<(usize, Polarity, DepotPath)>, ConfigError> {
    let mut lines = Vec::new();

    for (idx, raw) in depot_spec.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();
        let text = match trimmed.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            Some(inner) => inner,
            None => trimmed,
        };
        if text.is_empty() {
            continue;
        }

        let (polarity, path_text) = match text.strip_prefix('-') {
            Some(rest) => (Polarity::Exclude, rest),
            None => (Polarity::Include, text),
        };
        if !path_text.starts_with("//") {
            return Err(ConfigError::MalformedDepotLine {
                line: line_no,
                text: raw.trim().to_string(),
            });
        }

        let depot = DepotPath::parse(path_text)
            .map_err(|source| ConfigError::InvalidPath { line: line_no, source })?;
        lines.push((line_no, polarity, depot));
    }

    Ok(lines)
}
