use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::common::error::WrapperError;
use crate::domain::value_objects::changed_file::ChangedFile;
use crate::domain::value_objects::staging_path::{
    canonical_path, is_staged_path, is_staging_dir_name, rewrite_schema_references,
    EXPORT_SUBTREE,
};
use crate::infrastructure::scm::{ScmError, VersionControl};

/// ExportReorganizer関連のエラー
#[derive(Debug, Error)]
pub enum ExportReorganizerError {
    #[error("Listing exported files failed: {0}")]
    ListingFailed(#[from] ScmError),

    #[error("Rewriting {} failed: {source}", path.display())]
    RewriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Moving {} to {} failed: {source}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Deleting {} failed: {source}", path.display())]
    PruneFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walking {} failed: {message}", path.display())]
    WalkFailed { path: PathBuf, message: String },
}

impl From<ExportReorganizerError> for WrapperError {
    fn from(error: ExportReorganizerError) -> Self {
        match error {
            ExportReorganizerError::ListingFailed(scm) => {
                let exit_code = scm.exit_code();
                WrapperError::git_error_with_source(scm.to_string(), exit_code, scm)
            }
            ExportReorganizerError::RewriteFailed { path, source }
            | ExportReorganizerError::PruneFailed { path, source } => {
                WrapperError::filesystem_error_with_source(
                    format!("Reorganizing {} failed", path.display()),
                    Some(path),
                    source,
                )
            }
            ExportReorganizerError::MoveFailed { from, to, source } => {
                WrapperError::filesystem_error_with_source(
                    format!("Moving {} to {} failed", from.display(), to.display()),
                    Some(from),
                    source,
                )
            }
            ExportReorganizerError::WalkFailed { path, message } => {
                WrapperError::filesystem_error(message, Some(path))
            }
        }
    }
}

/// エクスポート整理の設定
#[derive(Debug, Clone)]
pub struct ExportReorganizerConfig {
    /// 監視するサブツリー（プロジェクトルートからの相対パス）
    pub subtree: String,

    /// ファイルごとの詳細ログを出力するか
    pub verbose: bool,
}

impl Default for ExportReorganizerConfig {
    fn default() -> Self {
        Self {
            subtree: EXPORT_SUBTREE.to_string(),
            verbose: false,
        }
    }
}

impl ExportReorganizerConfig {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// 整理処理で行った操作の記録
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// 対象となったファイル（gitの報告順）
    pub exported_files: Vec<String>,

    /// 削除済みとして除外したファイル
    pub skipped_deleted: Vec<String>,

    /// 内容を書き換えたファイル
    pub rewritten: Vec<String>,

    /// 移動したファイル（移動元, 移動先）
    pub moved: Vec<(String, String)>,

    /// 削除したステージングディレクトリ
    pub pruned: Vec<PathBuf>,
}

/// 整理処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// 対象ファイルがなく、何も変更しなかった
    NothingExported,

    /// 整理を実行した
    Reorganized(ExportReport),
}

/// エクスポートされたDDLを標準のツリーに整理するユースケース
pub struct ExportReorganizerUseCase<'a> {
    vcs: &'a dyn VersionControl,
    config: ExportReorganizerConfig,
}

impl<'a> ExportReorganizerUseCase<'a> {
    pub fn new(vcs: &'a dyn VersionControl, config: ExportReorganizerConfig) -> Self {
        Self { vcs, config }
    }

    /// 収集、書き換え、移動、削除を順番に実行する
    ///
    /// 途中で失敗した場合、それまでの変更は元に戻さない。
    pub async fn execute(&self, project_root: &Path) -> Result<ExportOutcome, ExportReorganizerError> {
        let lines = self
            .vcs
            .list_changed_files(project_root, &self.config.subtree)
            .await?;
        let (exported_files, skipped_deleted) = collect_exported_files(&lines);

        if exported_files.is_empty() {
            println!("No files exported. Exiting");
            return Ok(ExportOutcome::NothingExported);
        }

        println!(
            "\n{} project export - move file to \"/src/database/fend\" {}",
            "====".blue().bold(),
            "====".blue().bold()
        );
        println!(
            "\n{} Exported files:\n - {}",
            "**".cyan().bold(),
            exported_files.join("\n - ")
        );

        let rewritten = self.rewrite_files(project_root, &exported_files)?;
        let moved = self.relocate_files(project_root, &exported_files)?;
        let pruned = self.prune_staging_dirs(project_root)?;

        info!(
            "Export reorganized: {} rewritten, {} moved, {} directories pruned",
            rewritten.len(),
            moved.len(),
            pruned.len()
        );

        Ok(ExportOutcome::Reorganized(ExportReport {
            exported_files,
            skipped_deleted,
            rewritten,
            moved,
            pruned,
        }))
    }

    fn rewrite_files(
        &self,
        project_root: &Path,
        files: &[String],
    ) -> Result<Vec<String>, ExportReorganizerError> {
        println!(
            "\n{} Replacing \"FENDDEV.\" with \"FEND\" in exported DDL",
            "**".cyan().bold()
        );

        let mut rewritten = Vec::new();
        for file in files.iter().filter(|f| !f.is_empty()) {
            let path = project_root.join(file);
            let content =
                fs::read_to_string(&path).map_err(|source| ExportReorganizerError::RewriteFailed {
                    path: path.clone(),
                    source,
                })?;

            let replaced = rewrite_schema_references(&content);
            fs::write(&path, replaced.as_bytes()).map_err(|source| {
                ExportReorganizerError::RewriteFailed {
                    path: path.clone(),
                    source,
                }
            })?;

            if self.config.verbose {
                println!("   Replaced content in {}", file);
            }
            rewritten.push(file.clone());
        }
        Ok(rewritten)
    }

    fn relocate_files(
        &self,
        project_root: &Path,
        files: &[String],
    ) -> Result<Vec<(String, String)>, ExportReorganizerError> {
        println!(
            "\n{} Moving from src/database/fenddev* to src/database/fend",
            "**".cyan().bold()
        );

        let mut moved = Vec::new();
        for file in files.iter().filter(|f| !f.is_empty()) {
            let new_file = canonical_path(file).into_owned();
            let from = project_root.join(file);
            let to = project_root.join(&new_file);

            if from != to {
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent).map_err(|source| {
                        ExportReorganizerError::MoveFailed {
                            from: from.clone(),
                            to: to.clone(),
                            source,
                        }
                    })?;
                }
                fs::rename(&from, &to).map_err(|source| ExportReorganizerError::MoveFailed {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                })?;
            } else {
                debug!("{} is already in the canonical tree", file);
            }

            if self.config.verbose {
                println!("   Moved {} to {}", file, new_file);
            }
            moved.push((file.clone(), new_file));
        }
        Ok(moved)
    }

    fn prune_staging_dirs(&self, project_root: &Path) -> Result<Vec<PathBuf>, ExportReorganizerError> {
        println!(
            "\n{} Deleting folders in src/database/ matching the pattern \"/fenddev.*/\"",
            "**".cyan().bold()
        );

        let subtree = project_root.join(&self.config.subtree);
        let mut pruned = Vec::new();
        if !subtree.is_dir() {
            debug!("{} does not exist, nothing to prune", subtree.display());
            return Ok(pruned);
        }

        let mut walker = WalkDir::new(&subtree).min_depth(1).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| ExportReorganizerError::WalkFailed {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| subtree.clone()),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }
            let is_staging = entry
                .file_name()
                .to_str()
                .map(is_staging_dir_name)
                .unwrap_or(false);
            if !is_staging {
                continue;
            }

            walker.skip_current_dir();
            let path = entry.into_path();
            fs::remove_dir_all(&path).map_err(|source| ExportReorganizerError::PruneFailed {
                path: path.clone(),
                source,
            })?;

            if self.config.verbose {
                println!("   Deleted {}", path.display());
            }
            pruned.push(path);
        }
        Ok(pruned)
    }
}

/// porcelainの行から対象ファイルを取り出す
///
/// `fend`を含むパスだけを残す。削除済みのエントリは書き換えられないため
/// 別のリストに分ける。
pub fn collect_exported_files(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let mut exported = Vec::new();
    let mut deleted = Vec::new();

    for entry in lines.iter().filter_map(|line| ChangedFile::parse(line)) {
        if !is_staged_path(&entry.path) {
            continue;
        }
        if entry.is_deleted() {
            warn!("Skipping deleted file {}", entry.path);
            deleted.push(entry.path);
            continue;
        }
        debug!(
            "{} {}",
            if entry.is_untracked() { "new" } else { "changed" },
            entry.path
        );
        exported.push(entry.path);
    }

    (exported, deleted)
}
