use chart_composer::api::EditorConfig;
use chart_composer::core::{ChartFamily, ChartKind};
use chart_composer::extensions::{DeterministicSampleGenerator, SampleGenerator};

#[test]
fn samples_are_deterministic_per_kind() {
    let generator = DeterministicSampleGenerator::default();
    for kind in ChartKind::ALL {
        let first = generator.generate(kind).expect("generate");
        let second = generator.generate(kind).expect("generate again");
        assert_eq!(first, second, "{kind} samples differ between calls");
    }
}

#[test]
fn samples_match_the_requested_family() {
    let generator = DeterministicSampleGenerator::default();
    for kind in ChartKind::ALL {
        let datasets = generator.generate(kind).expect("generate");
        assert_eq!(datasets.len(), 1);
        let dataset = &datasets[0];
        assert_eq!(dataset.chart_type(), kind);
        assert_eq!(dataset.family(), kind.family());
        assert_eq!(dataset.point_count(), 8);
        dataset.check_shape().expect("sample dataset is well formed");
    }
}

#[test]
fn categorical_samples_carry_slice_labels() {
    let datasets = DeterministicSampleGenerator::default()
        .generate(ChartKind::Doughnut)
        .expect("generate");
    let labels = datasets[0].slice_labels().expect("slice labels");
    assert_eq!(labels[0], "Jan");
    assert_eq!(labels.len(), 8);
    let colors = datasets[0].colors();
    assert_ne!(colors[0], colors[1], "slice kinds color each slice");
}

#[test]
fn bubble_samples_have_positive_radius() {
    let datasets = DeterministicSampleGenerator::default()
        .generate(ChartKind::Bubble)
        .expect("generate");
    let points = datasets[0].points().as_coordinate().expect("coordinate");
    assert!(points.iter().all(|point| point.r.is_some_and(|r| r > 0.0)));

    let scatter = DeterministicSampleGenerator::default()
        .generate(ChartKind::Scatter)
        .expect("generate");
    assert_eq!(scatter[0].family(), ChartFamily::Coordinate);
    assert!(
        scatter[0]
            .points()
            .as_coordinate()
            .expect("coordinate")
            .iter()
            .all(|point| point.r.is_none())
    );
}

#[test]
fn point_count_follows_config() {
    let config = EditorConfig::default().with_sample_point_count(15);
    let datasets = DeterministicSampleGenerator::from_config(&config)
        .generate(ChartKind::Bar)
        .expect("generate");
    let labels = datasets[0].slice_labels().expect("labels");
    assert_eq!(labels.len(), 15);
    assert_eq!(labels[12], "Jan 2");
}
