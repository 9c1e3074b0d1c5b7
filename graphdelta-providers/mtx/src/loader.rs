//! Line-oriented Matrix-Market coordinate parsing.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use graphdelta_core::DiGraph;
use tracing::{debug, instrument, warn};

use crate::errors::MtxError;

/// Graph produced by the loader: vertex payloads are 0-based ids and edge
/// payloads are the entry values.
pub type MtxGraph = DiGraph<usize, f64>;

/// Loads a coordinate file from disk.
///
/// # Errors
/// Returns [`MtxError::Io`] when the file cannot be opened or read, plus
/// every parse error of [`try_from_reader`].
pub fn try_from_path(path: impl AsRef<Path>) -> Result<MtxGraph, MtxError> {
    let file = File::open(path)?;
    try_from_reader(BufReader::new(file))
}

/// Parses a coordinate stream.
///
/// Lines starting with `%` (the banner and comments) and blank lines are
/// skipped. The first remaining line is `rows cols entries`; `cols` vertices
/// are created. Every later line is `row col [value]` with 1-based indices
/// and becomes the edge `row - 1 -> col - 1`. Pattern entries without a
/// value carry `0.0`.
///
/// # Errors
/// Returns [`MtxError::MissingSizeLine`] for an input without a size line,
/// [`MtxError::MalformedSizeLine`] or [`MtxError::MalformedEntry`] for lines
/// that do not parse, and [`MtxError::VertexOutOfRange`] for indices outside
/// `1..=cols`.
///
/// # Examples
/// ```
/// use graphdelta_providers_mtx::try_from_reader;
///
/// let input = "%%MatrixMarket matrix coordinate real general\n3 3 2\n1 2 0.5\n3 1 2\n";
/// let graph = try_from_reader(input.as_bytes()).expect("input must parse");
/// assert_eq!(graph.order(), 3);
/// assert_eq!(graph.all_edges(), vec![(0, 1), (2, 0)]);
/// assert_eq!(graph.edge_data(0, 1), Some(&0.5));
/// ```
#[instrument(name = "mtx.load", skip_all, fields(vertices, entries))]
pub fn try_from_reader<R: BufRead>(reader: R) -> Result<MtxGraph, MtxError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| line.map(|content| (index + 1, content)));

    let (vertices, declared) = loop {
        let Some(next) = lines.next() else {
            return Err(MtxError::MissingSizeLine);
        };
        let (line, content) = next?;
        if is_skipped(&content) {
            continue;
        }
        break parse_size_line(line, &content)?;
    };
    tracing::Span::current().record("vertices", vertices);

    let mut graph = MtxGraph::with_capacity(vertices);
    for id in 0..vertices {
        graph.add_vertex(id);
    }

    let mut entries = 0_usize;
    for next in lines {
        let (line, content) = next?;
        if is_skipped(&content) {
            continue;
        }
        let (source, target, value) = parse_entry(line, &content, vertices)?;
        graph.add_edge(source, target, value);
        entries += 1;
    }
    tracing::Span::current().record("entries", entries);

    if entries != declared {
        warn!(declared, entries, "entry count differs from size line");
    }
    debug!(order = graph.order(), size = graph.size(), "matrix loaded");
    Ok(graph)
}

fn is_skipped(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty() || trimmed.starts_with('%')
}

fn parse_size_line(line: usize, content: &str) -> Result<(usize, usize), MtxError> {
    let malformed = || MtxError::MalformedSizeLine {
        line,
        content: content.to_owned(),
    };
    let fields: Vec<usize> = content
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;
    match fields.as_slice() {
        &[_rows, cols, entries] => Ok((cols, entries)),
        _ => Err(malformed()),
    }
}

fn parse_entry(line: usize, content: &str, vertices: usize) -> Result<(usize, usize, f64), MtxError> {
    let malformed = || MtxError::MalformedEntry {
        line,
        content: content.to_owned(),
    };
    let mut fields = content.split_whitespace();
    let mut index = || -> Result<usize, MtxError> {
        let raw: usize = fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or_else(malformed)?;
        if raw == 0 || raw > vertices {
            return Err(MtxError::VertexOutOfRange {
                line,
                index: raw,
                vertices,
            });
        }
        Ok(raw - 1)
    };
    let source = index()?;
    let target = index()?;
    let value = match fields.next() {
        Some(field) => field.parse().map_err(|_| malformed())?,
        None => f64::default(),
    };
    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((source, target, value))
}
