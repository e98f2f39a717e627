use std::path::Path;
use tracing::info;

use crate::application::services::{ConfigService, CredentialService};
use crate::common::error::WrapperError;
use crate::common::result::WrapperResult;
use crate::domain::entities::connection_config::ConnectionConfig;
use crate::infrastructure::sql::{SqlClient, SqlClientError};
use crate::infrastructure::terminal::Prompter;

const EXPORT_WORD: &str = "export";

/// `project`に続く単語列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCommand {
    words: Vec<String>,
}

impl ProjectCommand {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// SQLクライアントに渡すスクリプト（`project`を含む全体）
    pub fn script(&self) -> String {
        std::iter::once("project")
            .chain(self.words.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `project export ...`の場合は後処理としてエクスポート整理を行う
    pub fn is_export(&self) -> bool {
        self.words.first().map(String::as_str) == Some(EXPORT_WORD)
    }
}

/// 設定を読み込み、パスワードを取得してSQLクライアントを実行するユースケース
pub struct RunProjectCommandUseCase<'a> {
    config_service: &'a ConfigService,
    sql_client: &'a dyn SqlClient,
    prompter: &'a dyn Prompter,
}

impl<'a> RunProjectCommandUseCase<'a> {
    pub fn new(
        config_service: &'a ConfigService,
        sql_client: &'a dyn SqlClient,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            config_service,
            sql_client,
            prompter,
        }
    }

    /// スクリプトを実行し、使用した接続設定を返す
    ///
    /// クライアントが0以外で終了した場合はその終了コードを持つCommandErrorになる。
    pub async fn execute(
        &self,
        project_root: &Path,
        command: &ProjectCommand,
        credentials: &mut CredentialService,
    ) -> WrapperResult<ConnectionConfig> {
        println!("==== project commands ====");

        let config = self.config_service.load(project_root)?;
        println!("Using schema: {} from config file", config.schema);

        let password = credentials.get_or_prompt(self.prompter)?;
        let connect_string = config.connect_string(&password);
        let script = command.script();

        println!(
            "\n==== Running command: {}",
            self.sql_client.display_command(&script, &connect_string)
        );

        self.sql_client
            .run_script(&script, &connect_string)
            .await
            .map_err(|e| client_error(&script, e))?;

        info!("SQL client finished '{}'", script);
        Ok(config)
    }
}

fn client_error(script: &str, error: SqlClientError) -> WrapperError {
    let exit_code = error.exit_code();
    WrapperError::command_error_with_source(error.to_string(), script, exit_code, error)
}
