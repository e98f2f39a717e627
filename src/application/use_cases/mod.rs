pub mod export_reorganizer;
pub mod run_project_command;

pub use export_reorganizer::{
    ExportOutcome, ExportReorganizerConfig, ExportReorganizerError, ExportReorganizerUseCase,
    ExportReport,
};
pub use run_project_command::{ProjectCommand, RunProjectCommandUseCase};
