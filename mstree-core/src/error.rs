//! Error types for the mstree core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, the
//! coarse [`ErrorKind`] taxonomy surfaced to presentation layers, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the [`ErrorKind`] this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Coarse classification of [`MstreeError`] for display layers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The input graph description is structurally invalid.
    MalformedInput,
    /// An edge weight is not a usable number.
    InvalidWeight,
    /// The spanning forest does not connect every node.
    DisconnectedGraph,
}

impl ErrorKind {
    /// Return the stable machine-readable representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedInput => "MALFORMED_INPUT",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::DisconnectedGraph => "DISCONNECTED_GRAPH",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced while building graphs and running the pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MstreeError {
    /// The node name list was empty.
    #[error("graph must contain at least one node")]
    EmptyGraph,
    /// A node name appeared more than once.
    #[error("node name `{name}` is declared more than once")]
    DuplicateNode {
        /// The repeated name.
        name: String,
    },
    /// The incidence matrix row count differed from the node count.
    #[error("incidence matrix has {actual} rows but {expected} nodes were declared")]
    RowCountMismatch {
        /// Number of declared nodes.
        expected: usize,
        /// Number of rows supplied.
        actual: usize,
    },
    /// A matrix row had the wrong number of columns.
    #[error("{matrix} matrix row {row} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        /// Which matrix the row belongs to.
        matrix: &'static str,
        /// Zero-based row index.
        row: usize,
        /// Number of columns required.
        expected: usize,
        /// Number of columns supplied.
        actual: usize,
    },
    /// The adjacency matrix row count differed from the node count.
    #[error("adjacency matrix has {actual} rows but {expected} nodes were declared")]
    AdjacencyShapeMismatch {
        /// Number of declared nodes.
        expected: usize,
        /// Number of rows supplied.
        actual: usize,
    },
    /// An incidence cell held something other than `0` or `1`.
    #[error("incidence cell ({row}, {column}) is {value}, expected 0 or 1")]
    InvalidCell {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The rejected value.
        value: i64,
    },
    /// A matrix cell could not be parsed as an integer.
    #[error("{matrix} matrix row {row} contains non-integer token `{token}`")]
    UnparsableCell {
        /// Which matrix the token belongs to.
        matrix: &'static str,
        /// Zero-based row index.
        row: usize,
        /// The rejected token.
        token: String,
    },
    /// An edge had no weight entry.
    #[error("edge `{edge}` has no weight entry")]
    MissingWeight {
        /// The edge lacking a weight.
        edge: String,
    },
    /// A weight line did not have the `<edge> <weight>` shape.
    #[error("weight line {line} is not of the form `<edge> <weight>`: `{text}`")]
    MalformedWeightLine {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// A section-formatted document could not be split into form fields.
    #[error("malformed request document: {reason}")]
    MalformedDocument {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The requested root is not a node of the graph.
    #[error("root `{name}` is not a node of the graph")]
    UnknownRoot {
        /// The requested root name.
        name: String,
    },
    /// A weight token did not parse as a number.
    #[error("weight `{raw}` for edge `{edge}` is not a number")]
    UnparsableWeight {
        /// Edge the weight belongs to.
        edge: String,
        /// The rejected text.
        raw: String,
    },
    /// A weight was NaN or infinite.
    #[error("edge `{edge}` has non-finite weight {weight}")]
    NonFiniteWeight {
        /// Edge the weight belongs to.
        edge: String,
        /// The rejected value.
        weight: f64,
    },
    /// The spanning forest has more than one component and partial trees
    /// were not allowed.
    #[error(
        "graph is disconnected: {components} components, {accepted} of {required} spanning edges found"
    )]
    Disconnected {
        /// Number of connected components.
        components: usize,
        /// Number of MST edges found.
        accepted: usize,
        /// Number of edges a spanning tree would need.
        required: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MstreeError`] variants.
    enum MstreeErrorCode for MstreeError {
        /// The node name list was empty.
        EmptyGraph => EmptyGraph => "MSTREE_EMPTY_GRAPH", MalformedInput,
        /// A node name appeared more than once.
        DuplicateNode => DuplicateNode { .. } => "MSTREE_DUPLICATE_NODE", MalformedInput,
        /// The incidence matrix row count differed from the node count.
        RowCountMismatch => RowCountMismatch { .. } => "MSTREE_ROW_COUNT_MISMATCH", MalformedInput,
        /// A matrix row had the wrong number of columns.
        ColumnCountMismatch => ColumnCountMismatch { .. } => "MSTREE_COLUMN_COUNT_MISMATCH", MalformedInput,
        /// The adjacency matrix was not square over the nodes.
        AdjacencyShapeMismatch => AdjacencyShapeMismatch { .. } => "MSTREE_ADJACENCY_SHAPE_MISMATCH", MalformedInput,
        /// An incidence cell held something other than `0` or `1`.
        InvalidCell => InvalidCell { .. } => "MSTREE_INVALID_CELL", MalformedInput,
        /// A matrix cell could not be parsed as an integer.
        UnparsableCell => UnparsableCell { .. } => "MSTREE_UNPARSABLE_CELL", MalformedInput,
        /// An edge had no weight entry.
        MissingWeight => MissingWeight { .. } => "MSTREE_MISSING_WEIGHT", MalformedInput,
        /// A weight line did not have the `<edge> <weight>` shape.
        MalformedWeightLine => MalformedWeightLine { .. } => "MSTREE_MALFORMED_WEIGHT_LINE", MalformedInput,
        /// A section-formatted document was malformed.
        MalformedDocument => MalformedDocument { .. } => "MSTREE_MALFORMED_DOCUMENT", MalformedInput,
        /// The requested root is not a node of the graph.
        UnknownRoot => UnknownRoot { .. } => "MSTREE_UNKNOWN_ROOT", MalformedInput,
        /// A weight token did not parse as a number.
        UnparsableWeight => UnparsableWeight { .. } => "MSTREE_UNPARSABLE_WEIGHT", InvalidWeight,
        /// A weight was NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "MSTREE_NON_FINITE_WEIGHT", InvalidWeight,
        /// The graph did not form a single spanning tree.
        Disconnected => Disconnected { .. } => "MSTREE_DISCONNECTED", DisconnectedGraph,
    }
}

impl MstreeError {
    /// Retrieve the coarse [`ErrorKind`] for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MstreeError>;
