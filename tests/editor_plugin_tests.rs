use std::cell::RefCell;
use std::rc::Rc;

use chart_composer::api::{ChartEditor, GroupingMode, ResolutionAction};
use chart_composer::core::{CategoricalPoint, ChartKind, Color, Dataset, DatasetPoints};
use chart_composer::extensions::{EditorContext, EditorEvent, EditorPlugin};

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(EditorEvent, EditorContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(EditorEvent, EditorContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl EditorPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &EditorEvent, context: EditorContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &EditorEvent) -> &'static str {
    match event {
        EditorEvent::DatasetAdded { .. } => "added",
        EditorEvent::DatasetRemoved { .. } => "removed",
        EditorEvent::PointUpdated { .. } => "point",
        EditorEvent::PointColorUpdated { .. } => "color",
        EditorEvent::KindRelabeled { .. } => "relabeled",
        EditorEvent::TransitionProposed { .. } => "proposed",
        EditorEvent::TransitionResolved { .. } => "resolved",
        EditorEvent::TransitionCancelled { .. } => "cancelled",
        EditorEvent::ModeChanged { .. } => "mode",
        EditorEvent::UniformityChanged { .. } => "uniformity",
        EditorEvent::ActiveGroupChanged { .. } => "active_group",
        EditorEvent::DocumentLoaded { .. } => "loaded",
    }
}

fn sales() -> Dataset {
    Dataset::new(
        "sales",
        ChartKind::Bar,
        DatasetPoints::Categorical(vec![
            CategoricalPoint::new("Jan", 12.0),
            CategoricalPoint::new("Feb", 7.0),
        ]),
        vec![Color::rgb(0.1, 0.5, 0.9); 2],
    )
    .expect("valid dataset")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    let events = Rc::new(RefCell::new(Vec::new()));
    editor
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    editor.add_dataset(sales()).expect("add");
    editor
        .update_point("sales", 0, CategoricalPoint::new("Jan", 3.0).into())
        .expect("update");
    editor
        .set_point_color("sales", 1, Color::rgb(1.0, 0.0, 0.0))
        .expect("color");
    editor.request_kind(ChartKind::Line).expect("relabel");
    editor.set_mode(GroupingMode::Grouped).expect("grouped");
    editor.request_kind(ChartKind::Scatter).expect("propose");
    editor.request_kind(ChartKind::Bubble).expect("supersede");
    editor.quick_transform().expect("transform");
    editor.remove_dataset("sales").expect("remove");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "added",
            "point",
            "color",
            "relabeled",
            "mode",
            "proposed",
            "cancelled",
            "proposed",
            "resolved",
            "removed",
        ]
    );

    let (resolved, context) = &events[8];
    assert_eq!(
        resolved,
        &EditorEvent::TransitionResolved {
            request_id: 2,
            action: ResolutionAction::QuickTransform,
            kind: ChartKind::Bubble,
        }
    );
    assert_eq!(context.kind, ChartKind::Bubble);
    assert!(!context.transition_pending);
    assert!(events[5].1.transition_pending);
}

#[test]
fn failed_operations_emit_nothing() {
    let mut editor = ChartEditor::new(ChartKind::Bar);
    let events = Rc::new(RefCell::new(Vec::new()));
    editor
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let _ = editor.restore();
    let _ = editor.cancel_transition();
    assert!(editor.remove_dataset("missing").is_none());
    let _ = editor.update_point("missing", 0, CategoricalPoint::new("x", 1.0).into());

    assert!(events.borrow().is_empty());
}

#[test]
fn plugin_ids_must_be_unique_and_non_empty() {
    let mut editor = ChartEditor::new(ChartKind::Pie);
    let events = Rc::new(RefCell::new(Vec::new()));

    editor
        .register_plugin(Box::new(RecordingPlugin::new("autosave", events.clone())))
        .expect("first registration");
    assert!(
        editor
            .register_plugin(Box::new(RecordingPlugin::new("autosave", events.clone())))
            .is_err()
    );
    assert!(
        editor
            .register_plugin(Box::new(RecordingPlugin::new("", events.clone())))
            .is_err()
    );
    assert_eq!(editor.plugin_count(), 1);

    assert!(editor.unregister_plugin("autosave"));
    assert!(!editor.unregister_plugin("autosave"));
    assert!(!editor.has_plugin("autosave"));
}
