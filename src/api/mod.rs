mod chart_model;
mod data_controller;
mod dataset_builder;
mod editor;
mod editor_config;
mod editor_init;
mod grouping_controller;
mod json_contract;
mod mode_controller;
mod plugin_dispatch;
mod plugin_registry;
mod transition;
mod transition_controller;
mod validation;

pub use chart_model::ChartDataModel;
pub use dataset_builder::{DatasetBuilder, DatasetRow};
pub use editor::ChartEditor;
pub use editor_config::EditorConfig;
pub use json_contract::{
    CHART_DOCUMENT_JSON_SCHEMA_V1, ChartDocument, ChartDocumentJsonContractV1,
};
pub use mode_controller::{GroupingMode, ModeController, Uniformity};
pub use transition::{
    AvailableActions, KindChange, NegotiationState, ResolutionAction, TransitionDirection,
    TransitionNegotiator, TransitionProposal, transform_to_coordinate,
};
pub use validation::{DatasetValidator, ValidationContext};
