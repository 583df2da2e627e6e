//! Loaders for the plain-text input formats.
//!
//! All three formats are line oriented with `#` comments. Fields may be
//! separated by tabs, commas or runs of spaces; the separator is picked from
//! the first data line.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::engine::EdgeList;
use crate::pattern::PatternStore;
use crate::programs::FixedLabels;
use crate::types::{Label, Result, SimError, VertexId};

/// Reads a directed edge list of `src dst` records.
///
/// Extra fields after the two endpoints are ignored so weighted lists load as
/// unweighted graphs.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<EdgeList> {
    let path = path.as_ref();
    let mut edges = EdgeList::new();
    for_each_record(path, |line, fields| {
        if fields.len() < 2 {
            return Err(SimError::parse(path, line, "expected `src dst`"));
        }
        let src = parse_u32(path, line, fields[0], "source vertex")?;
        let dst = parse_u32(path, line, fields[1], "target vertex")?;
        edges.push(src, dst);
        Ok(())
    })?;
    info!(
        path = %path.display(),
        vertices = edges.vertex_count(),
        edges = edges.len(),
        "loader.edges"
    );
    Ok(edges)
}

/// Reads a pattern file of `v <id> <label>` and `e <src> <dst>` records.
///
/// Vertex ids must form the dense range `[0, n)`; each may be declared once.
pub fn load_pattern(path: impl AsRef<Path>) -> Result<PatternStore> {
    let path = path.as_ref();
    let mut labels: BTreeMap<u32, Label> = BTreeMap::new();
    let mut edges = Vec::new();
    for_each_record(path, |line, fields| match fields {
        ["v", id, label, ..] => {
            let id = parse_u32(path, line, id, "pattern vertex")?;
            let label = Label(parse_u32(path, line, label, "label")?);
            if labels.insert(id, label).is_some() {
                return Err(SimError::parse(path, line, format!("vertex {id} declared twice")));
            }
            Ok(())
        }
        ["e", src, dst, ..] => {
            let src = parse_u32(path, line, src, "source vertex")?;
            let dst = parse_u32(path, line, dst, "target vertex")?;
            edges.push((src, dst));
            Ok(())
        }
        _ => Err(SimError::parse(
            path,
            line,
            "expected `v <id> <label>` or `e <src> <dst>`",
        )),
    })?;

    let n = labels.len();
    if let Some(id) = labels.keys().copied().find(|&id| id as usize >= n) {
        return Err(SimError::InvalidPattern(format!(
            "vertex ids must be dense: {id} declared but only {n} vertices present"
        )));
    }
    let labels: Vec<Label> = labels.into_values().collect();
    let pattern = PatternStore::build(n, &edges, &labels)?;
    info!(
        path = %path.display(),
        vertices = pattern.vertex_count(),
        edges = pattern.edge_count(),
        "loader.pattern"
    );
    Ok(pattern)
}

/// Reads `<vertex> <label>` records; unlisted vertices get `fallback`.
pub fn load_labels(path: impl AsRef<Path>, fallback: Label) -> Result<FixedLabels> {
    let path = path.as_ref();
    let mut labels = FixedLabels::new([], fallback);
    for_each_record(path, |line, fields| {
        if fields.len() < 2 {
            return Err(SimError::parse(path, line, "expected `vertex label`"));
        }
        let vertex = parse_u32(path, line, fields[0], "vertex")?;
        let label = parse_u32(path, line, fields[1], "label")?;
        labels.set(VertexId(vertex), Label(label));
        Ok(())
    })?;
    info!(path = %path.display(), labelled = labels.len(), "loader.labels");
    Ok(labels)
}

fn for_each_record<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(u64, &[&str]) -> Result<()>,
{
    let text = fs::read_to_string(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .delimiter(sniff_delimiter(&text))
        .from_reader(text.as_bytes());

    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        visit(line, &fields)?;
    }
    Ok(())
}

fn sniff_delimiter(text: &str) -> u8 {
    let first = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");
    if first.contains('\t') {
        b'\t'
    } else if first.contains(',') {
        b','
    } else {
        b' '
    }
}

fn parse_u32(path: &Path, line: u64, raw: &str, what: &str) -> Result<u32> {
    raw.parse::<u32>()
        .map_err(|_| SimError::parse(path, line, format!("invalid {what} `{raw}`")))
}
