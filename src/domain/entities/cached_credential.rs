use serde::{Deserialize, Serialize};

/// Seconds a cached password stays usable
pub const PASSWORD_TTL_SECS: i64 = 900;

/// キャッシュされたパスワードと保存時刻
///
/// キャッシュは一つだけで、どの接続設定で入力されたかは区別しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedCredential {
    /// パスワード
    pub password: String,

    /// 最終保存時刻（UNIXエポック秒）
    pub password_save_time: i64,
}

impl CachedCredential {
    pub fn new(password: impl Into<String>, saved_at: i64) -> Self {
        Self {
            password: password.into(),
            password_save_time: saved_at,
        }
    }

    /// 保存からの経過秒数
    pub fn age_secs(&self, now: i64) -> i64 {
        now.saturating_sub(self.password_save_time)
    }

    /// `now`時点で有効期限切れか
    pub fn is_expired(&self, now: i64) -> bool {
        self.age_secs(now) >= PASSWORD_TTL_SECS
    }
}
