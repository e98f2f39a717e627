use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::error::WrapperError;
use crate::common::result::{ResultExt, WrapperResult};
use crate::domain::entities::connection_config::{ConfigDocument, ConnectionConfig};
use crate::domain::value_objects::config_key::ConfigKey;
use crate::infrastructure::filesystem::{ConfigStore, ConfigStoreError};
use crate::infrastructure::terminal::Prompter;

const EDIT_EXAMPLE: &str = "  Example: sqlcl-wrapper config edit schema FEND";

/// `config edit`の引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub key: ConfigKey,
    pub value: String,
}

impl EditRequest {
    /// `<key> <value> [ignored...]`を解釈する
    ///
    /// 引数が足りない場合やキーが不正な場合は使い方を含むUsageErrorを返す。
    pub fn parse(args: &[String]) -> WrapperResult<Self> {
        if args.len() < 2 {
            return Err(edit_usage(
                "  Please provide the key and value to change in the config file",
            ));
        }

        let key: ConfigKey = args[0]
            .parse()
            .map_err(|_| edit_usage("  Please provide a valid key to change in the config file"))?;

        if args.len() > 2 {
            debug!("Ignoring {} extra argument(s) to config edit", args.len() - 2);
        }

        Ok(Self {
            key,
            value: args[1].clone(),
        })
    }
}

fn edit_usage(first_line: &str) -> WrapperError {
    WrapperError::usage_error(format!(
        "{}\n  Valid keys: {}\n{}",
        first_line,
        ConfigKey::valid_keys(),
        EDIT_EXAMPLE
    ))
}

/// プロジェクトルートの設定ファイルを扱うサービス
pub struct ConfigService {
    store: ConfigStore,
}

impl ConfigService {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn config_name(&self) -> &str {
        self.store.config_name()
    }

    /// 5つの値を対話的に入力し、設定ファイルを書き出す（既存ファイルは上書き）
    pub fn generate(&self, project_root: &Path, prompter: &dyn Prompter) -> WrapperResult<PathBuf> {
        println!("==== config generate ====");
        println!(
            "  Generating script file {} in git root folder",
            self.config_name()
        );

        let mut entries = Vec::with_capacity(ConfigKey::ALL.len());
        for key in ConfigKey::ALL {
            let answer = prompter
                .read_line(&key.prompt_label())
                .with_filesystem_error(format!("Failed to read the {} value", key), None)?;
            entries.push((key, answer));
        }

        let document = ConfigDocument::from_entries(entries);
        let path = self
            .store
            .write_plain(project_root, &document)
            .map_wrapper_err(|e| self.map_store_error(e))?;

        info!("Configuration written to {}", path.display());
        println!("  File {} generated in git project root", self.config_name());
        Ok(path)
    }

    /// 設定ファイルを読み込み、5つのフィールドを表示する
    pub fn show(&self, project_root: &Path) -> WrapperResult<ConfigDocument> {
        println!("==== config show ====");
        println!(
            "  Reading script file {} in git root folder",
            self.config_name()
        );

        let document = self.load_document(project_root)?;
        for key in ConfigKey::ALL {
            println!(
                "  {}: {}",
                key,
                document.display_value(key).unwrap_or_default()
            );
        }
        Ok(document)
    }

    /// 1つのキーの値を置き換えて書き戻す
    ///
    /// 引数は設定ファイルに触れる前に検証する。キーがドキュメントに
    /// 存在しない場合は何も書き込まず`Ok(false)`を返す。
    pub fn edit(&self, project_root: &Path, args: &[String]) -> WrapperResult<bool> {
        let request = Self::prepare_edit(args)?;
        self.apply_edit(project_root, &request)
    }

    /// ヘッダーを表示して引数を検証する（プロジェクトルートは不要）
    pub fn prepare_edit(args: &[String]) -> WrapperResult<EditRequest> {
        println!("==== config edit ====");
        EditRequest::parse(args)
    }

    /// 検証済みの編集要求を適用する
    pub fn apply_edit(&self, project_root: &Path, request: &EditRequest) -> WrapperResult<bool> {
        println!(
            "  Editing script file {} in git root folder",
            self.config_name()
        );

        let mut document = self.load_document(project_root)?;
        if !document.replace(request.key, request.value.as_str()) {
            debug!(
                "Key '{}' is not present in {}, nothing written",
                request.key,
                self.config_name()
            );
            return Ok(false);
        }

        self.store
            .write_document(project_root, &document)
            .map_wrapper_err(|e| self.map_store_error(e))?;

        println!(
            "  Config \"{}\" changed to \"{}\"",
            request.key, request.value
        );
        Ok(true)
    }

    /// 型付きの接続設定を読み込む
    pub fn load(&self, project_root: &Path) -> WrapperResult<ConnectionConfig> {
        self.store
            .read_config(project_root)
            .map_wrapper_err(|e| self.map_store_error(e))
    }

    fn load_document(&self, project_root: &Path) -> WrapperResult<ConfigDocument> {
        self.store
            .read_document(project_root)
            .map_wrapper_err(|e| self.map_store_error(e))
    }

    fn map_store_error(&self, error: ConfigStoreError) -> WrapperError {
        match error {
            ConfigStoreError::ConfigFileNotFound(path) => WrapperError::config_missing(path),
            other => WrapperError::config_error_with_source(
                format!("Cannot use {}", self.config_name()),
                other,
            ),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(ConfigStore::new())
    }
}
