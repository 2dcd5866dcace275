use chart_composer::ChartError;
use chart_composer::api::{ChartEditor, GroupingMode, Uniformity};
use chart_composer::core::{CategoricalPoint, ChartKind, Color, Dataset, DatasetPoints};
use indexmap::IndexMap;

fn quarter(label: &str, kind: ChartKind) -> Dataset {
    let points = vec![
        CategoricalPoint::new("Q1", 1.0),
        CategoricalPoint::new("Q2", 2.0),
    ];
    Dataset::new(
        label,
        kind,
        DatasetPoints::Categorical(points),
        vec![Color::rgb(0.5, 0.5, 0.5); 2],
    )
    .expect("valid dataset")
}

#[test]
fn entering_grouped_mode_puts_existing_datasets_in_one_group() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.add_dataset(quarter("b", ChartKind::Bar)).expect("b");

    editor.set_mode(GroupingMode::Grouped).expect("grouped");

    assert_eq!(editor.mode(), GroupingMode::Grouped);
    let group = editor.active_group().expect("active group").to_owned();
    assert!(!group.is_empty());
    assert!(
        editor
            .datasets()
            .iter()
            .all(|dataset| dataset.group_id() == Some(group.as_str()))
    );
}

#[test]
fn entering_grouped_mode_is_atomic() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.add_dataset(quarter("b", ChartKind::Line)).expect("b");
    let before = editor.model().clone();

    let err = editor
        .set_mode(GroupingMode::Grouped)
        .expect_err("bar and line cannot share a uniform group");
    assert!(matches!(err, ChartError::ChartTypeLockedInUniformGroup { .. }));
    assert_eq!(editor.mode(), GroupingMode::Single);
    assert_eq!(editor.model(), &before);

    editor.set_uniformity(Uniformity::Mixed).expect("mixed");
    editor
        .set_mode(GroupingMode::Grouped)
        .expect("mixed group accepts bar and line");
}

#[test]
fn leaving_grouped_mode_clears_group_ids() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");

    editor.set_mode(GroupingMode::Single).expect("single");

    assert_eq!(editor.active_group(), None);
    assert!(editor.datasets().iter().all(|dataset| dataset.group_id().is_none()));
}

#[test]
fn tightening_to_uniform_fails_when_a_group_mixes_types() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    editor.set_uniformity(Uniformity::Mixed).expect("mixed");
    editor.add_dataset(quarter("b", ChartKind::Line)).expect("b");
    let group = editor.active_group().expect("active group").to_owned();

    let err = editor
        .set_uniformity(Uniformity::Uniform)
        .expect_err("group mixes bar and line");
    assert_eq!(err, ChartError::MixedTypesPresent { group_id: group });
    assert_eq!(editor.uniformity(), Uniformity::Mixed);
}

#[test]
fn tightening_to_uniform_succeeds_for_homogeneous_groups() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    editor.set_uniformity(Uniformity::Mixed).expect("mixed");
    editor.add_dataset(quarter("b", ChartKind::Bar)).expect("b");

    editor
        .set_uniformity(Uniformity::Uniform)
        .expect("every group shares one type");
    assert_eq!(editor.uniformity(), Uniformity::Uniform);
}

#[test]
fn explicit_group_assignments_are_applied() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.add_dataset(quarter("b", ChartKind::Line)).expect("b");
    editor.add_dataset(quarter("c", ChartKind::Area)).expect("c");

    let mut assignments = IndexMap::new();
    assignments.insert("a".to_owned(), "bars".to_owned());
    assignments.insert("b".to_owned(), "lines".to_owned());
    editor
        .set_mode_with_groups(&assignments)
        .expect("one type per group");

    assert_eq!(editor.active_group(), Some("bars"));
    assert_eq!(editor.dataset("a").and_then(Dataset::group_id), Some("bars"));
    assert_eq!(editor.dataset("b").and_then(Dataset::group_id), Some("lines"));
    let fallback = editor
        .dataset("c")
        .and_then(Dataset::group_id)
        .expect("unlisted dataset gets a fresh group");
    assert_ne!(fallback, "bars");
    assert_ne!(fallback, "lines");
    assert_eq!(editor.model().groups().len(), 3);
}

#[test]
fn new_group_becomes_active_and_is_unique() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    editor.add_dataset(quarter("a", ChartKind::Bar)).expect("a");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    let first = editor.active_group().expect("first group").to_owned();

    let second = editor.new_group();
    assert_ne!(first, second);
    assert_eq!(editor.active_group(), Some(second.as_str()));

    editor.set_active_group(&first).expect("select first group");
    assert_eq!(editor.active_group(), Some(first.as_str()));
    assert!(matches!(
        editor.set_active_group(""),
        Err(ChartError::InvalidData(_))
    ));
}
