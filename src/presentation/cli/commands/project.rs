use colored::Colorize;

use super::resolve_project_root;
use crate::application::services::{ConfigService, CredentialService};
use crate::application::use_cases::{
    ExportOutcome, ExportReorganizerConfig, ExportReorganizerUseCase, ProjectCommand,
    RunProjectCommandUseCase,
};
use crate::common::result::WrapperResult;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::scm::GitScm;
use crate::infrastructure::sql::SqlclClient;
use crate::infrastructure::terminal::TerminalPrompter;
use crate::presentation::cli::WrapperSettings;

/// `project <args...>`
pub struct ProjectCommandRunner<'a> {
    settings: &'a WrapperSettings,
    vcs: GitScm,
}

impl<'a> ProjectCommandRunner<'a> {
    pub fn new(settings: &'a WrapperSettings) -> Self {
        Self {
            settings,
            vcs: GitScm::new(),
        }
    }

    /// Run the SQLcl project command, then reorganize the export if it was one
    pub async fn execute(&self, args: &[String]) -> WrapperResult<()> {
        let command = ProjectCommand::new(args.to_vec());
        let root = resolve_project_root(&self.vcs).await?;

        let config_service =
            ConfigService::new(ConfigStore::with_config_name(&self.settings.config_name));
        let sql_client = SqlclClient::with_executable(&self.settings.client);
        let prompter = TerminalPrompter::new();
        let mut credentials = CredentialService::with_cache_file(self.settings.cache_path()?);

        let config = RunProjectCommandUseCase::new(&config_service, &sql_client, &prompter)
            .execute(&root, &command, &mut credentials)
            .await?;

        if !command.is_export() {
            return Ok(());
        }

        let reorganizer = ExportReorganizerUseCase::new(
            &self.vcs,
            ExportReorganizerConfig::default().with_verbose(config.verbose),
        );
        if let ExportOutcome::Reorganized(report) = reorganizer.execute(&root).await? {
            println!(
                "\n{} {} file(s) moved to src/database/fend",
                "✓".green().bold(),
                report.moved.len()
            );
        }
        Ok(())
    }
}
