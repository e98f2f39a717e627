use crate::domain::value_objects::config_key::ConfigKey;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// 接続設定（`.sqlcl-wrapper.config`の内容）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// 接続するスキーマ名
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub schema: String,

    /// データベースホスト
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub host: String,

    /// リスナーポート
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub port: String,

    /// サービス名
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub service: String,

    /// エクスポート処理の詳細ログを出力するか
    #[serde(default, deserialize_with = "lenient_bool")]
    pub verbose: bool,
}

impl ConnectionConfig {
    /// 新しい接続設定を作成
    pub fn new(
        schema: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            host: host.into(),
            port: port.into(),
            service: service.into(),
            verbose: false,
        }
    }

    /// verboseフラグを設定
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// SQLclに渡す接続文字列 `<schema>/<password>@<host>:<port>/<service>`
    pub fn connect_string(&self, password: &str) -> String {
        format!(
            "{}/{}@{}:{}/{}",
            self.schema, password, self.host, self.port, self.service
        )
    }
}

/// 設定ファイルのドキュメント表現
///
/// キーの順序と未知のキーをそのまま保持するため、型付きの
/// `ConnectionConfig`とは別にYAMLマッピングとして扱う。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigDocument {
    mapping: Mapping,
}

impl ConfigDocument {
    pub fn from_mapping(mapping: Mapping) -> Self {
        Self { mapping }
    }

    /// 入力値のリストからドキュメントを作成（`config generate`用）
    pub fn from_entries<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ConfigKey, V)>,
        V: Into<String>,
    {
        let mut mapping = Mapping::new();
        for (key, value) in entries {
            mapping.insert(Value::String(key.as_str().to_string()), Value::String(value.into()));
        }
        Self { mapping }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn contains(&self, key: ConfigKey) -> bool {
        self.mapping.contains_key(key.as_str())
    }

    /// 表示用の値（存在しない場合は`None`）
    pub fn display_value(&self, key: ConfigKey) -> Option<String> {
        self.mapping.get(key.as_str()).map(scalar_to_string)
    }

    /// キーが存在する場合のみ値を置き換える。置き換えた場合は`true`
    pub fn replace(&mut self, key: ConfigKey, value: impl Into<String>) -> bool {
        match self.mapping.get_mut(key.as_str()) {
            Some(slot) => {
                *slot = Value::String(value.into());
                true
            }
            None => false,
        }
    }

    /// 型付きの接続設定に変換
    pub fn to_connection_config(&self) -> Result<ConnectionConfig, serde_yaml::Error> {
        serde_yaml::from_value(Value::Mapping(self.mapping.clone()))
    }

    /// `key: value`形式のプレーンテキストにレンダリング
    ///
    /// `config generate`が書き出す形式。値はユーザー入力のまま書き出す。
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.mapping {
            out.push_str(&format!(
                "{}: {}\n",
                scalar_to_string(key),
                scalar_to_string(value)
            ));
        }
        out
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_to_string).unwrap_or_default())
}

// `config edit verbose false` stores the string "false"; treat it as false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}
