//! Unit tests for form tokenizing and sectioned documents.

use rstest::{fixture, rstest};

use crate::{MstreeError, MstreeErrorCode};

use super::{GraphInput, RawForm};

#[fixture]
fn form() -> RawForm {
    RawForm {
        node_names: "  1 2   3 4 ".into(),
        adjacency_matrix: None,
        edge_names: "A B C D".into(),
        incidence_matrix: "1 0 0 1\n1 1 0 0\n\n0 1 1 0\n  0 0 1 1  \n".into(),
        weights: "A 1\nB 2.5\n\nC 3\nD 10\n".into(),
    }
}

#[rstest]
fn tokenizes_every_field(form: RawForm) {
    let input = form.parse().expect("valid form");
    assert_eq!(input.node_names, ["1", "2", "3", "4"]);
    assert_eq!(input.edge_names, ["A", "B", "C", "D"]);
    assert_eq!(
        input.incidence_matrix,
        vec![
            vec![1, 0, 0, 1],
            vec![1, 1, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
        ]
    );
    assert_eq!(input.edge_weights.len(), 4);
    assert_eq!(input.edge_weights["B"], 2.5);
    assert_eq!(input.adjacency_matrix, None);
}

#[rstest]
fn later_weight_line_wins(mut form: RawForm) {
    form.weights.push_str("A 7\n");
    let input = form.parse().expect("valid form");
    assert_eq!(input.edge_weights["A"], 7.0);
}

#[rstest]
fn blank_adjacency_field_is_treated_as_absent(mut form: RawForm) {
    form.adjacency_matrix = Some("  \n\n".into());
    let input = form.parse().expect("valid form");
    assert_eq!(input.adjacency_matrix, None);
}

#[rstest]
fn rejects_non_integer_cells(mut form: RawForm) {
    form.incidence_matrix = "1 0\n0 x\n".into();
    let err = form.parse().expect_err("bad cell");
    assert_eq!(
        err,
        MstreeError::UnparsableCell {
            matrix: "incidence",
            row: 1,
            token: "x".into(),
        }
    );
}

#[rstest]
#[case::missing_weight("A\n")]
#[case::extra_token("A 1 2\n")]
fn rejects_malformed_weight_lines(mut form: RawForm, #[case] weights: &str) {
    form.weights = weights.into();
    let err = form.parse().expect_err("bad line");
    assert_eq!(err.code(), MstreeErrorCode::MalformedWeightLine);
}

#[rstest]
fn rejects_non_numeric_weight(mut form: RawForm) {
    form.weights = "A heavy\n".into();
    let err = form.parse().expect_err("bad weight");
    assert_eq!(
        err,
        MstreeError::UnparsableWeight {
            edge: "A".into(),
            raw: "heavy".into(),
        }
    );
    assert_eq!(err.kind(), crate::ErrorKind::InvalidWeight);
}

const DOCUMENT: &str = "\
# square with a heavy diagonal
[nodes]
1 2 3 4
[edges]
A B C D
[incidence]
1 0 0 1
1 1 0 0
0 1 1 0
0 0 1 1
[weights]
A 1
B 2
C 3
D 10
[adjacency]
0 1 0 1
1 0 1 0
0 1 0 1
1 0 1 0
";

#[test]
fn splits_sectioned_document() {
    let form = RawForm::from_sections(DOCUMENT).expect("valid document");
    assert_eq!(form.node_names.trim(), "1 2 3 4");
    assert_eq!(form.edge_names.trim(), "A B C D");
    assert_eq!(form.incidence_matrix.lines().count(), 4);
    assert_eq!(form.weights.lines().count(), 4);
    assert!(form.adjacency_matrix.is_some());

    let input = form.parse().expect("valid form");
    assert_eq!(input.adjacency_matrix.map(|rows| rows.len()), Some(4));
}

#[rstest]
#[case::text_before_header("1 2\n[nodes]\n1 2\n")]
#[case::unknown_header("[nodes]\n1\n[colours]\nred\n")]
#[case::repeated_header("[nodes]\n1\n[nodes]\n2\n")]
#[case::missing_section("[nodes]\n1\n[edges]\nA\n[weights]\nA 1\n")]
fn rejects_malformed_documents(#[case] document: &str) {
    let err = RawForm::from_sections(document).expect_err("malformed document");
    assert_eq!(err.code(), MstreeErrorCode::MalformedDocument);
}

#[test]
fn graph_input_reads_camel_case_json() {
    let json = r#"{
        "nodeNames": ["1", "2"],
        "edgeNames": ["A"],
        "incidenceMatrix": [[1], [1]],
        "edgeWeights": {"A": 4.5}
    }"#;
    let input: GraphInput = serde_json::from_str(json).expect("valid json");
    assert_eq!(
        input,
        GraphInput::new(["1", "2"], ["A"], vec![vec![1], vec![1]], [("A", 4.5)])
    );
}
