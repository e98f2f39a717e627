use std::path::PathBuf;
use tracing::debug;

use crate::common::error::WrapperError;
use crate::common::result::{OptionExt, WrapperResult};
use crate::infrastructure::filesystem::{
    CredentialStore, CredentialStoreError, JsonFileCredentialStore,
};
use crate::infrastructure::terminal::Prompter;

const PASSWORD_PROMPT: &str = "Please enter the SCHEMA password: ";

/// 現在時刻の取得元
pub trait Clock: Send + Sync {
    /// UNIXエポック秒
    fn now(&self) -> i64;
}

/// システム時計
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// ストアは最初の利用時に開く
enum StoreSlot {
    Pending(PathBuf),
    Open(Box<dyn CredentialStore>),
}

/// パスワードのキャッシュと対話入力を管理するサービス
pub struct CredentialService {
    slot: StoreSlot,
    clock: Box<dyn Clock>,
}

impl CredentialService {
    /// `path`のキャッシュファイルを使う（ファイルは最初の利用時に作成）
    pub fn with_cache_file(path: impl Into<PathBuf>) -> Self {
        Self {
            slot: StoreSlot::Pending(path.into()),
            clock: Box::new(SystemClock),
        }
    }

    /// 任意のストアと時計を使う
    pub fn with_store(store: Box<dyn CredentialStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            slot: StoreSlot::Open(store),
            clock,
        }
    }

    /// キャッシュが有効ならそれを使い、無効なら入力を求める
    ///
    /// どちらの場合も保存時刻は現在時刻に更新される。
    pub fn get_or_prompt(&mut self, prompter: &dyn Prompter) -> WrapperResult<String> {
        let now = self.clock.now();
        let store = self.store()?;

        let cached = store.cached().map_err(store_error)?;
        let password = match cached {
            Some(entry) if !entry.is_expired(now) => {
                debug!("Cached password is {}s old", entry.age_secs(now));
                println!("Using cached password");
                entry.password
            }
            stale => {
                if let Some(entry) = stale {
                    debug!("Cached password expired after {}s", entry.age_secs(now));
                }
                let password = prompter.read_secret(PASSWORD_PROMPT).map_err(|e| {
                    WrapperError::credential_error_with_source("Failed to read the password", e)
                })?;
                store.set_password(&password).map_err(store_error)?;
                password
            }
        };

        store.set_password_save_time(now).map_err(store_error)?;
        Ok(password)
    }

    fn store(&mut self) -> WrapperResult<&mut Box<dyn CredentialStore>> {
        if let StoreSlot::Pending(path) = &self.slot {
            let store = JsonFileCredentialStore::open(path).map_err(store_error)?;
            self.slot = StoreSlot::Open(Box::new(store));
        }
        let opened = match &mut self.slot {
            StoreSlot::Open(store) => Some(store),
            StoreSlot::Pending(_) => None,
        };
        opened.ok_or_internal_error("credential store was not opened")
    }
}

fn store_error(error: CredentialStoreError) -> WrapperError {
    WrapperError::credential_error_with_source(error.to_string(), error)
}
