use chart_composer::core::{ChartFamily, ChartKind};

#[test]
fn classifier_splits_kinds_into_nine_categorical_and_two_coordinate() {
    let categorical: Vec<ChartKind> = ChartKind::ALL
        .into_iter()
        .filter(|kind| kind.family() == ChartFamily::Categorical)
        .collect();
    let coordinate: Vec<ChartKind> = ChartKind::ALL
        .into_iter()
        .filter(|kind| kind.family() == ChartFamily::Coordinate)
        .collect();

    assert_eq!(categorical.len(), 9);
    assert_eq!(coordinate, vec![ChartKind::Scatter, ChartKind::Bubble]);
    for kind in ChartKind::ALL {
        assert_ne!(kind.is_categorical(), kind.is_coordinate());
    }
}

#[test]
fn only_bubble_requires_radius() {
    let with_radius: Vec<ChartKind> = ChartKind::ALL
        .into_iter()
        .filter(|kind| kind.requires_radius())
        .collect();
    assert_eq!(with_radius, vec![ChartKind::Bubble]);
}

#[test]
fn slice_colored_kinds_are_categorical() {
    for kind in [ChartKind::Pie, ChartKind::Doughnut, ChartKind::PolarArea] {
        assert!(kind.colors_per_slice());
        assert_eq!(kind.family(), ChartFamily::Categorical);
    }
    assert!(!ChartKind::Bar.colors_per_slice());
}

#[test]
fn kind_names_round_trip_through_json() {
    for kind in ChartKind::ALL {
        let json = serde_json::to_string(&kind).expect("serialize kind");
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
        let parsed: ChartKind = serde_json::from_str(&json).expect("parse kind");
        assert_eq!(parsed, kind);
    }
    assert_eq!(ChartKind::HorizontalBar.to_string(), "horizontal-bar");
}
