//! Test helper functions and utilities

use sqlcl_wrapper::domain::entities::connection_config::ConfigDocument;
use sqlcl_wrapper::domain::value_objects::config_key::ConfigKey;
use sqlcl_wrapper::infrastructure::filesystem::ConfigStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch project tree rooted in a temporary directory
pub struct ProjectTree {
    temp_dir: TempDir,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating its parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Write the standard test configuration with the default file name
    pub fn write_config(&self, verbose: bool) -> PathBuf {
        let document = ConfigDocument::from_entries([
            (ConfigKey::Schema, "FEND"),
            (ConfigKey::Host, "localhost"),
            (ConfigKey::Port, "1521"),
            (ConfigKey::Service, "XEPDB1"),
            (ConfigKey::Verbose, if verbose { "true" } else { "false" }),
        ]);
        ConfigStore::new()
            .write_plain(self.root(), &document)
            .expect("Failed to write config")
    }

    /// Every file below `relative`, as sorted paths relative to the root
    pub fn files_under(&self, relative: &str) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(self.path(relative))
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(self.root())
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        files.sort();
        files
    }
}

/// Porcelain lines reporting `paths` as untracked
pub fn untracked(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| format!("?? {}", p)).collect()
}

/// Initialize a git repository at `dir` with the `git` binary
pub fn git_init(dir: &Path) {
    let status = std::process::Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir)
        .status()
        .expect("git must be installed to run this test");
    assert!(status.success(), "git init failed");
}
