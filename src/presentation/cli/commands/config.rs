use tracing::debug;

use super::resolve_project_root;
use crate::application::services::ConfigService;
use crate::common::error::WrapperError;
use crate::common::result::WrapperResult;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::scm::GitScm;
use crate::infrastructure::terminal::TerminalPrompter;
use crate::presentation::cli::{ConfigAction, WrapperSettings};

/// `config generate | show | edit`
pub struct ConfigCommand {
    service: ConfigService,
    vcs: GitScm,
}

impl ConfigCommand {
    pub fn new(settings: &WrapperSettings) -> Self {
        Self {
            service: ConfigService::new(ConfigStore::with_config_name(&settings.config_name)),
            vcs: GitScm::new(),
        }
    }

    /// Execute the config command
    pub async fn execute(&self, action: Option<&ConfigAction>) -> WrapperResult<()> {
        match action {
            Some(ConfigAction::Generate { .. }) => {
                let root = resolve_project_root(&self.vcs).await?;
                self.service.generate(&root, &TerminalPrompter::new())?;
            }
            Some(ConfigAction::Show { .. }) => {
                let root = resolve_project_root(&self.vcs).await?;
                self.service.show(&root)?;
            }
            Some(ConfigAction::Edit { args }) => {
                // bad arguments are reported before git is consulted
                let request = ConfigService::prepare_edit(args)?;
                let root = resolve_project_root(&self.vcs).await?;
                self.service.apply_edit(&root, &request)?;
            }
            Some(ConfigAction::Unknown(words)) => {
                debug!("Unknown config command: {}", words.join(" "));
                return Err(config_usage_error());
            }
            None => return Err(config_usage_error()),
        }
        Ok(())
    }
}

/// Reported for a missing or unrecognized `config` subcommand
pub(crate) fn config_usage_error() -> WrapperError {
    WrapperError::usage_error(
        "  Please provide a valid command for config\n  Valid commands: generate, show, edit",
    )
}
