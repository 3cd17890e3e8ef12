//! Input contract for the pipeline.
//!
//! [`GraphInput`] is the tokenized form every stage works from and doubles
//! as the JSON request body. [`RawForm`] holds the five free-text fields a
//! form front end collects and turns them into a [`GraphInput`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Result, error::MstreeError};

/// Tokenized graph description.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInput {
    /// Node names; the first one is the default tree root.
    pub node_names: Vec<String>,
    /// Edge names, one per incidence column.
    pub edge_names: Vec<String>,
    /// Rows are nodes, columns are edges, cells are `0` or `1`.
    pub incidence_matrix: Vec<Vec<i64>>,
    /// Weight per edge name.
    pub edge_weights: HashMap<String, f64>,
    /// Optional node-by-node adjacency matrix, cross-checked but not used
    /// for the computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency_matrix: Option<Vec<Vec<i64>>>,
}

impl GraphInput {
    /// Convenience constructor used by tests and examples.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::GraphInput;
    ///
    /// let input = GraphInput::new(["1", "2"], ["A"], vec![vec![1], vec![1]], [("A", 1.5)]);
    /// assert_eq!(input.edge_weights["A"], 1.5);
    /// assert!(input.adjacency_matrix.is_none());
    /// ```
    #[must_use]
    pub fn new<N, E, W>(
        node_names: impl IntoIterator<Item = N>,
        edge_names: impl IntoIterator<Item = E>,
        incidence_matrix: Vec<Vec<i64>>,
        edge_weights: impl IntoIterator<Item = (W, f64)>,
    ) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        W: Into<String>,
    {
        Self {
            node_names: node_names.into_iter().map(Into::into).collect(),
            edge_names: edge_names.into_iter().map(Into::into).collect(),
            incidence_matrix,
            edge_weights: edge_weights
                .into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
            adjacency_matrix: None,
        }
    }

    /// Attaches an adjacency matrix.
    #[must_use]
    pub fn with_adjacency_matrix(mut self, matrix: Vec<Vec<i64>>) -> Self {
        self.adjacency_matrix = Some(matrix);
        self
    }
}

/// The raw text fields of the graph form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawForm {
    /// Whitespace-separated node names.
    pub node_names: String,
    /// Optional adjacency matrix, one row per line.
    pub adjacency_matrix: Option<String>,
    /// Whitespace-separated edge names.
    pub edge_names: String,
    /// Incidence matrix, one row per line.
    pub incidence_matrix: String,
    /// One `<edge> <weight>` pair per line.
    pub weights: String,
}

const SECTION_NODES: &str = "nodes";
const SECTION_EDGES: &str = "edges";
const SECTION_INCIDENCE: &str = "incidence";
const SECTION_WEIGHTS: &str = "weights";
const SECTION_ADJACENCY: &str = "adjacency";

impl RawForm {
    /// Splits a sectioned document into form fields.
    ///
    /// Each field starts with a `[name]` header line; recognised names are
    /// `nodes`, `edges`, `incidence`, `weights` and the optional
    /// `adjacency`. Lines starting with `#` are comments.
    ///
    /// # Errors
    /// Returns [`MstreeError::MalformedDocument`] for text before the first
    /// header, unknown or repeated headers, and missing required sections.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::RawForm;
    ///
    /// let form = RawForm::from_sections(
    ///     "[nodes]\n1 2\n[edges]\nA\n[incidence]\n1\n1\n[weights]\nA 3\n",
    /// )?;
    /// assert_eq!(form.node_names.trim(), "1 2");
    /// assert_eq!(form.parse()?.edge_weights["A"], 3.0);
    /// # Ok::<(), mstree_core::MstreeError>(())
    /// ```
    pub fn from_sections(document: &str) -> Result<Self> {
        let mut sections: HashMap<&str, String> = HashMap::new();
        let mut current: Option<&str> = None;

        for line in document.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if let Some(header) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                let name = match header.trim() {
                    SECTION_NODES => SECTION_NODES,
                    SECTION_EDGES => SECTION_EDGES,
                    SECTION_INCIDENCE => SECTION_INCIDENCE,
                    SECTION_WEIGHTS => SECTION_WEIGHTS,
                    SECTION_ADJACENCY => SECTION_ADJACENCY,
                    other => {
                        return Err(MstreeError::MalformedDocument {
                            reason: format!("unknown section `[{other}]`"),
                        });
                    }
                };
                if sections.insert(name, String::new()).is_some() {
                    return Err(MstreeError::MalformedDocument {
                        reason: format!("section `[{name}]` appears more than once"),
                    });
                }
                current = Some(name);
                continue;
            }
            match current.and_then(|name| sections.get_mut(name)) {
                Some(body) => {
                    body.push_str(line);
                    body.push('\n');
                }
                None if trimmed.is_empty() => {}
                None => {
                    return Err(MstreeError::MalformedDocument {
                        reason: format!("text before the first section header: `{trimmed}`"),
                    });
                }
            }
        }

        let mut take = |name: &'static str| {
            sections
                .remove(name)
                .ok_or_else(|| MstreeError::MalformedDocument {
                    reason: format!("missing section `[{name}]`"),
                })
        };
        let node_names = take(SECTION_NODES)?;
        let edge_names = take(SECTION_EDGES)?;
        let incidence_matrix = take(SECTION_INCIDENCE)?;
        let weights = take(SECTION_WEIGHTS)?;
        let adjacency_matrix = sections.remove(SECTION_ADJACENCY);

        Ok(Self {
            node_names,
            adjacency_matrix,
            edge_names,
            incidence_matrix,
            weights,
        })
    }

    /// Tokenizes the form into a [`GraphInput`].
    ///
    /// Names split on whitespace, matrix rows on newlines and cells on
    /// whitespace. Blank lines are ignored. Weight lines are `<edge>
    /// <weight>`; when an edge is listed twice the last line wins.
    ///
    /// # Errors
    /// Returns [`MstreeError::UnparsableCell`] for non-integer matrix cells,
    /// [`MstreeError::MalformedWeightLine`] for weight lines that are not
    /// exactly two tokens, and [`MstreeError::UnparsableWeight`] for weights
    /// that are not numbers.
    #[instrument(name = "input.parse_form", err, skip_all)]
    pub fn parse(&self) -> Result<GraphInput> {
        let adjacency_matrix = self
            .adjacency_matrix
            .as_deref()
            .map(|text| parse_matrix("adjacency", text))
            .transpose()?
            .filter(|rows| !rows.is_empty());

        Ok(GraphInput {
            node_names: split_names(&self.node_names),
            edge_names: split_names(&self.edge_names),
            incidence_matrix: parse_matrix("incidence", &self.incidence_matrix)?,
            edge_weights: parse_weights(&self.weights)?,
            adjacency_matrix,
        })
    }
}

fn split_names(text: &str) -> Vec<String> {
    text.split_whitespace().map(ToOwned::to_owned).collect()
}

fn parse_matrix(matrix: &'static str, text: &str) -> Result<Vec<Vec<i64>>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.split_whitespace()
                .map(|token| {
                    token
                        .parse::<i64>()
                        .map_err(|_| MstreeError::UnparsableCell {
                            matrix,
                            row,
                            token: token.to_owned(),
                        })
                })
                .collect()
        })
        .collect()
}

fn parse_weights(text: &str) -> Result<HashMap<String, f64>> {
    let mut weights = HashMap::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let [edge, raw] = tokens.as_slice() else {
            return Err(MstreeError::MalformedWeightLine {
                line: index + 1,
                text: trimmed.to_owned(),
            });
        };
        let weight = raw
            .parse::<f64>()
            .map_err(|_| MstreeError::UnparsableWeight {
                edge: (*edge).to_owned(),
                raw: (*raw).to_owned(),
            })?;
        weights.insert((*edge).to_owned(), weight);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests;
