use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Project subtree watched for exported DDL
pub const EXPORT_SUBTREE: &str = "src/database";

/// Substring a changed path must contain to take part in the export
pub const STAGING_MARKER: &str = "fend";

/// Schema name used in the canonical tree
pub const CANONICAL_SCHEMA: &str = "FEND";

static DEV_SCHEMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FENDDEV.").expect("static regex must compile"));

static DEV_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"src/database/fenddev./").expect("static regex must compile")
});

static DEV_DIR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fenddev.$").expect("static regex must compile"));

/// Whether a changed path belongs to the export
pub fn is_staged_path(path: &str) -> bool {
    path.contains(STAGING_MARKER)
}

/// Replace every `FENDDEV<c>` schema reference with `FEND`
pub fn rewrite_schema_references(content: &str) -> Cow<'_, str> {
    DEV_SCHEMA_RE.replace_all(content, CANONICAL_SCHEMA)
}

/// Map `src/database/fenddev<c>/...` onto `src/database/fend/...`.
///
/// Paths outside a developer staging directory come back unchanged.
pub fn canonical_path(path: &str) -> Cow<'_, str> {
    DEV_PATH_RE.replace_all(path, "src/database/fend/")
}

/// Whether a directory name is a developer staging directory (`fenddev<c>`)
pub fn is_staging_dir_name(name: &str) -> bool {
    DEV_DIR_NAME_RE.is_match(name)
}
