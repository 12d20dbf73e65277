//! The plain text format graphs are stored in
//!
//! ```text
//! #N 4            ; number of vertices
//! #D 10           ; deadline
//! #V0             ; vertex without people
//! #V1 P5          ; vertex with 5 people
//! #V2
//! #V3 P1
//!
//! #E1 0 1 W2      ; edge 1 between vertices 0 and 1 with weight 2
//! #E2 1 2 W1
//! #E3 2 3 W4
//! ```
//!
//! Everything after a `;` is a comment. The blank line switches from vertices to edges, any other
//! line that doesn't start with `#` is ignored.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use rescue_game_types::{Deadline, Graph, GraphBuilder, GraphError};

use crate::{parse_deadline, ConfigError};

#[derive(Debug, thiserror::Error)]
/// Why a graph file couldn't be read
pub enum GraphFileError {
    #[allow(missing_docs)]
    #[error("could not read graph file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The `#N` or `#D` header is not where it should be
    #[error("line {line}: expected the `{expected}` header")]
    MissingHeader {
        #[allow(missing_docs)]
        line: usize,
        #[allow(missing_docs)]
        expected: &'static str,
    },
    /// The `#D` header doesn't hold a number
    #[error("line {line}: {source}")]
    Deadline {
        #[allow(missing_docs)]
        line: usize,
        #[allow(missing_docs)]
        source: ConfigError,
    },
    /// A line that doesn't follow the format
    #[error("line {line}: {reason}")]
    Malformed {
        #[allow(missing_docs)]
        line: usize,
        #[allow(missing_docs)]
        reason: String,
    },
    /// `#N` disagrees with the vertices that follow it
    #[error("the header declares {declared} vertices but {found} are listed")]
    NodeCount {
        #[allow(missing_docs)]
        declared: usize,
        #[allow(missing_docs)]
        found: usize,
    },
    /// The vertices and edges don't make a valid graph
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A graph together with the deadline it is played with
pub struct GraphFile {
    #[allow(missing_docs)]
    pub graph: Graph,
    /// [None] when the game has no deadline
    pub deadline: Option<Deadline>,
}

/// The meaningful words of a line, or [None] for a line that isn't part of the format
fn words(line: &str) -> Option<Vec<&str>> {
    let line = line.trim_start().strip_prefix('#')?;
    let line = line.split(';').next().unwrap_or_default();

    Some(line.split_whitespace().collect())
}

/// Parse `raw` as the number following a one letter prefix like the `P` in `P5`
fn prefixed<T: std::str::FromStr>(
    raw: Option<&&str>,
    prefix: char,
    line: usize,
    what: &str,
) -> Result<T, GraphFileError> {
    let malformed = || GraphFileError::Malformed {
        line,
        reason: format!("expected {what} written as `{prefix}<number>`"),
    };

    raw.and_then(|word| word.strip_prefix(prefix))
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())
}

fn header<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &'static str,
) -> Result<(usize, Vec<&'a str>), GraphFileError> {
    let (line, raw) = lines.next().unwrap_or((0, ""));

    match words(raw) {
        Some(parts) if parts.first() == Some(&expected) => Ok((line, parts)),
        _ => Err(GraphFileError::MissingHeader { line, expected }),
    }
}

fn number<T: std::str::FromStr>(
    raw: Option<&&str>,
    line: usize,
    what: &str,
) -> Result<T, GraphFileError> {
    raw.and_then(|word| word.parse().ok())
        .ok_or_else(|| GraphFileError::Malformed {
            line,
            reason: format!("expected {what}"),
        })
}

impl GraphFile {
    /// Read and parse the graph file at `path`
    pub fn read(path: impl AsRef<Path>) -> Result<Self, GraphFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphFileError::Io {
            path: path.to_owned(),
            source,
        })?;

        text.parse()
    }
}

impl Display for GraphFile {
    /// Renders the graph in the file format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self.graph.initial_values();

        writeln!(f, "#N {}", values.len())?;
        match self.deadline {
            Some(deadline) => writeln!(f, "#D {deadline}")?,
            None => writeln!(f, "#D 0")?,
        }
        for (node, value) in values.iter().enumerate() {
            match value {
                0 => writeln!(f, "#V{node}")?,
                people => writeln!(f, "#V{node} P{people}")?,
            }
        }
        writeln!(f)?;
        for (a, b, edge) in self.graph.edges() {
            writeln!(f, "#E{} {a} {b} W{}", edge.id, edge.weight)?;
        }

        Ok(())
    }
}

impl std::str::FromStr for GraphFile {
    type Err = GraphFileError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

        let (line, count) = header(&mut lines, "N")?;
        let declared: usize = number(count.get(1), line, "the number of vertices")?;

        let (line, deadline) = header(&mut lines, "D")?;
        let raw_deadline = deadline.get(1).copied().unwrap_or_default();
        let deadline =
            parse_deadline(raw_deadline).map_err(|source| GraphFileError::Deadline { line, source })?;

        let mut builder = GraphBuilder::new();
        let mut found = 0;
        let mut reading_vertices = true;

        for (line, raw) in lines {
            if raw.trim().is_empty() {
                reading_vertices = false;
                continue;
            }
            let Some(parts) = words(raw) else {
                continue;
            };
            if parts.is_empty() {
                continue;
            }

            if reading_vertices {
                let node = prefixed(parts.first(), 'V', line, "a vertex id")?;
                let people = match parts.get(1) {
                    None => 0,
                    some => prefixed(some, 'P', line, "a number of people")?,
                };

                builder = builder.node(node, people);
                found += 1;
            } else {
                let id = prefixed(parts.first(), 'E', line, "an edge id")?;
                let a = number(parts.get(1), line, "the first vertex of the edge")?;
                let b = number(parts.get(2), line, "the second vertex of the edge")?;
                let weight = prefixed(parts.get(3), 'W', line, "an edge weight")?;

                builder = builder.edge(id, a, b, weight);
            }
        }

        if found != declared {
            return Err(GraphFileError::NodeCount { declared, found });
        }

        Ok(GraphFile {
            graph: builder.build()?,
            deadline,
        })
    }
}
