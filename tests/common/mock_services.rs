//! Mock services for testing
//!
//! In-process implementations of the version-control, SQL client, clock,
//! credential store and prompt seams, recording how they were called.

use async_trait::async_trait;
use sqlcl_wrapper::application::services::Clock;
use sqlcl_wrapper::infrastructure::filesystem::{CredentialStore, CredentialStoreError};
use sqlcl_wrapper::infrastructure::scm::{ScmError, VersionControl};
use sqlcl_wrapper::infrastructure::sql::{SqlClient, SqlClientError};
use sqlcl_wrapper::infrastructure::terminal::Prompter;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Version control returning canned porcelain lines
pub struct FakeVersionControl {
    root: PathBuf,
    lines: Mutex<Vec<String>>,
    fail_with: Option<i32>,
    calls: Mutex<Vec<String>>,
}

impl FakeVersionControl {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lines: Mutex::new(Vec::new()),
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.lines.lock().unwrap() = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Every query fails as git would with `exit_code`
    pub fn failing(mut self, exit_code: i32) -> Self {
        self.fail_with = Some(exit_code);
        self
    }

    /// Subtrees passed to `list_changed_files`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionControl for FakeVersionControl {
    async fn resolve_project_root(&self) -> Result<PathBuf, ScmError> {
        match self.fail_with {
            Some(exit_code) => Err(ScmError::NotARepository {
                message: "fatal: not a git repository".to_string(),
                exit_code,
            }),
            None => Ok(self.root.clone()),
        }
    }

    async fn list_changed_files(
        &self,
        _root: &Path,
        subtree: &str,
    ) -> Result<Vec<String>, ScmError> {
        self.calls.lock().unwrap().push(subtree.to_string());
        match self.fail_with {
            Some(exit_code) => Err(ScmError::command_failed("git status", exit_code, "fatal")),
            None => Ok(self.lines.lock().unwrap().clone()),
        }
    }
}

/// One recorded client invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub script: String,
    pub connect_string: String,
}

/// SQL client that records scripts and optionally writes files as an export would
#[derive(Default)]
pub struct FakeSqlClient {
    exit_code: Option<i32>,
    writes: Vec<(PathBuf, String)>,
    runs: Mutex<Vec<ScriptRun>>,
}

impl FakeSqlClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `exit_code` instead of succeeding
    pub fn exiting_with(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    /// Write `content` to `path` when the script runs
    pub fn writing(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.writes.push((path.into(), content.into()));
        self
    }

    pub fn runs(&self) -> Vec<ScriptRun> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlClient for FakeSqlClient {
    fn display_command(&self, script: &str, connect_string: &str) -> String {
        format!("echo {} | fake-sql {}", script, connect_string)
    }

    async fn run_script(&self, script: &str, connect_string: &str) -> Result<(), SqlClientError> {
        self.runs.lock().unwrap().push(ScriptRun {
            script: script.to_string(),
            connect_string: connect_string.to_string(),
        });

        if let Some(exit_code) = self.exit_code {
            return Err(SqlClientError::ClientFailed { exit_code });
        }

        for (path, content) in &self.writes {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SqlClientError::ExecutionFailed(e.to_string()))?;
            }
            std::fs::write(path, content)
                .map_err(|e| SqlClientError::ExecutionFailed(e.to_string()))?;
        }
        Ok(())
    }
}

/// Clock whose time the test controls
#[derive(Clone)]
pub struct FixedClock(Arc<AtomicI64>);

impl FixedClock {
    pub fn at(now: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now)))
    }

    pub fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Credential store kept in memory, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<(Option<String>, Option<i64>)>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cached(password: impl Into<String>, saved_at: i64) -> Self {
        let store = Self::new();
        *store.slot.lock().unwrap() = (Some(password.into()), Some(saved_at));
        store
    }

    pub fn stored_password(&self) -> Option<String> {
        self.slot.lock().unwrap().0.clone()
    }

    pub fn stored_save_time(&self) -> Option<i64> {
        self.slot.lock().unwrap().1
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn password(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.stored_password())
    }

    fn password_save_time(&self) -> Result<Option<i64>, CredentialStoreError> {
        Ok(self.stored_save_time())
    }

    fn set_password(&mut self, password: &str) -> Result<(), CredentialStoreError> {
        self.slot.lock().unwrap().0 = Some(password.to_string());
        Ok(())
    }

    fn set_password_save_time(&mut self, saved_at: i64) -> Result<(), CredentialStoreError> {
        self.slot.lock().unwrap().1 = Some(saved_at);
        Ok(())
    }
}

/// Answers prompts from a fixed queue, recording what was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next_answer(&self, prompt: &str) -> io::Result<String> {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        self.next_answer(prompt)
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        self.next_answer(prompt)
    }
}
