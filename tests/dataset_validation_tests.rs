use chart_composer::api::{ChartEditor, EditorConfig, GroupingMode, Uniformity};
use chart_composer::core::{
    CategoricalPoint, ChartFamily, ChartKind, Color, CoordinatePoint, Dataset, DatasetGrouping,
    DatasetPoints,
};
use chart_composer::ChartError;

fn categorical(label: &str, kind: ChartKind, values: &[(&str, f64)]) -> Dataset {
    let points: Vec<CategoricalPoint> = values
        .iter()
        .map(|(name, value)| CategoricalPoint::new(*name, *value))
        .collect();
    let colors = vec![Color::rgb(0.3, 0.3, 0.3); points.len()];
    Dataset::new(label, kind, DatasetPoints::Categorical(points), colors)
        .expect("valid categorical dataset")
}

fn quarter(label: &str, kind: ChartKind) -> Dataset {
    categorical(label, kind, &[("Q1", 1.0), ("Q2", 2.0), ("Q3", 3.0)])
}

fn grouped_bar_editor() -> ChartEditor {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor
        .add_dataset(quarter("first", ChartKind::Bar))
        .expect("seed dataset");
    editor.set_mode(GroupingMode::Grouped).expect("enter grouped mode");
    editor
}

#[test]
fn uniform_group_locks_chart_type() {
    let mut editor = grouped_bar_editor();

    let err = editor
        .add_dataset(quarter("second", ChartKind::Line))
        .expect_err("line in uniform bar group");

    assert_eq!(
        err,
        ChartError::ChartTypeLockedInUniformGroup {
            locked: ChartKind::Bar,
            requested: ChartKind::Line,
        }
    );
    assert_eq!(editor.datasets().len(), 1);
}

#[test]
fn mixed_group_accepts_mixable_chart_types() {
    let mut editor = grouped_bar_editor();
    editor
        .set_uniformity(Uniformity::Mixed)
        .expect("relax to mixed");

    editor
        .add_dataset(quarter("second", ChartKind::Line))
        .expect("line joins mixed group");

    let group = editor.active_group().expect("active group").to_owned();
    let members = editor.model().group_members(&group);
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].chart_type(), ChartKind::Line);
}

#[test]
fn mixed_group_rejects_kinds_outside_allow_list() {
    let mut editor = grouped_bar_editor();
    editor
        .set_uniformity(Uniformity::Mixed)
        .expect("relax to mixed");

    let err = editor
        .add_dataset(quarter("slice", ChartKind::Pie))
        .expect_err("pie is not mixable by default");
    assert_eq!(err, ChartError::ChartTypeNotMixable { kind: ChartKind::Pie });
}

#[test]
fn configured_allow_list_widens_mixing() {
    let config = EditorConfig::default().with_mixable_kinds(vec![
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Radar,
    ]);
    let mut editor = ChartEditor::with_config(ChartKind::Bar, config).expect("editor");
    editor
        .add_dataset(quarter("first", ChartKind::Bar))
        .expect("seed");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    editor.set_uniformity(Uniformity::Mixed).expect("mixed");

    editor
        .add_dataset(quarter("radar", ChartKind::Radar))
        .expect("radar allowed by config");
}

#[test]
fn grouped_candidate_must_match_group_size() {
    let mut editor = grouped_bar_editor();

    let err = editor
        .add_dataset(categorical(
            "short",
            ChartKind::Bar,
            &[("Q1", 1.0), ("Q2", 2.0)],
        ))
        .expect_err("size mismatch");
    assert_eq!(
        err,
        ChartError::GroupSizeMismatch {
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn grouped_categorical_candidate_must_match_slice_labels() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor
        .add_dataset(
            quarter("first", ChartKind::Bar)
                .with_slice_labels(vec!["Q1".into(), "Q2".into(), "Q3".into()])
                .expect("labels"),
        )
        .expect("seed");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");

    let candidate = quarter("second", ChartKind::Bar)
        .with_slice_labels(vec!["Q1".into(), "H2".into(), "Q3".into()])
        .expect("labels");
    let err = editor.add_dataset(candidate).expect_err("label mismatch");
    assert_eq!(
        err,
        ChartError::SliceLabelMismatch {
            position: 1,
            expected: "Q2".to_owned(),
            found: "H2".to_owned(),
        }
    );
}

#[test]
fn single_mode_only_checks_family() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor
        .add_dataset(quarter("a", ChartKind::Bar))
        .expect("bar");
    editor
        .add_dataset(categorical("b", ChartKind::Pie, &[("x", 1.0)]))
        .expect("different size and type in single mode");

    let scatter = Dataset::new(
        "c",
        ChartKind::Scatter,
        DatasetPoints::Coordinate(vec![CoordinatePoint::new(1.0, 2.0)]),
        vec![Color::rgb(0.0, 0.0, 0.0)],
    )
    .expect("scatter dataset");
    let err = editor.add_dataset(scatter).expect_err("wrong family");
    assert_eq!(
        err,
        ChartError::IncompatibleFamily {
            expected: ChartFamily::Categorical,
            found: ChartFamily::Coordinate,
        }
    );
}

#[test]
fn bubble_points_need_positive_radius() {
    let mut editor = ChartEditor::new(ChartKind::Bubble);
    let bubble = Dataset::new(
        "bubbles",
        ChartKind::Bubble,
        DatasetPoints::Coordinate(vec![
            CoordinatePoint::bubble(0.0, 1.0, 3.0),
            CoordinatePoint::new(1.0, 2.0),
        ]),
        vec![Color::rgb(0.0, 0.0, 0.0); 2],
    )
    .expect("shape is valid");

    let err = editor.add_dataset(bubble).expect_err("missing radius");
    assert_eq!(err, ChartError::InvalidRadius { index: 1 });
}

#[test]
fn explicit_group_on_candidate_is_respected() {
    let mut editor = grouped_bar_editor();
    let other = editor.new_group();
    editor
        .add_dataset(categorical("solo", ChartKind::Line, &[("x", 1.0)]))
        .expect("first member of an empty group defines it");
    assert_eq!(
        editor.dataset("solo").and_then(Dataset::group_id),
        Some(other.as_str())
    );

    let first_group = editor
        .dataset("first")
        .and_then(Dataset::group_id)
        .expect("first is grouped")
        .to_owned();
    let err = editor
        .add_dataset(
            categorical("pair", ChartKind::Bar, &[("x", 1.0)])
                .with_grouping(DatasetGrouping::grouped(first_group)),
        )
        .expect_err("joins the three-slice group");
    assert!(matches!(err, ChartError::GroupSizeMismatch { .. }));
}

#[test]
fn group_head_stores_its_slice_labels() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    editor
        .add_dataset(quarter("head", ChartKind::Bar))
        .expect("first member of the group");

    let head = editor.dataset("head").expect("head");
    assert_eq!(
        head.slice_labels(),
        Some(&["Q1".to_owned(), "Q2".to_owned(), "Q3".to_owned()][..])
    );
}

#[test]
fn renaming_a_grouped_slice_is_rejected_and_document_reloads() {
    let mut editor = grouped_bar_editor();
    editor
        .add_dataset(quarter("second", ChartKind::Bar))
        .expect("second joins the group");

    let err = editor
        .update_point("first", 0, CategoricalPoint::new("January", 5.0).into())
        .expect_err("slice names are shared by the group");
    assert_eq!(
        err,
        ChartError::SliceLabelMismatch {
            position: 0,
            expected: "Q1".to_owned(),
            found: "January".to_owned(),
        }
    );

    editor
        .update_point("first", 0, CategoricalPoint::new("Q1", 5.0).into())
        .expect("value edits keep the slice name");

    let document = editor.document();
    let mut reloaded = ChartEditor::new(ChartKind::Bar);
    reloaded
        .load_document(document.clone())
        .expect("the editor's own document reloads");
    assert_eq!(reloaded.document(), document);
}
