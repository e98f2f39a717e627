/// Width of the `XY ` status prefix of a `git status --porcelain` line
const STATUS_PREFIX_WIDTH: usize = 3;

const RENAME_SEPARATOR: &str = " -> ";

/// One entry of `git status --porcelain` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Two-letter status code, e.g. `??`, ` M`, `A `
    pub status: String,

    /// Path relative to the repository root
    pub path: String,
}

impl ChangedFile {
    /// Parse a single porcelain line.
    ///
    /// The path is whatever follows the first three characters, so lines
    /// shorter than the prefix yield an empty path. Returns `None` for
    /// blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        if line.is_empty() {
            return None;
        }

        let split_at = line
            .char_indices()
            .nth(STATUS_PREFIX_WIDTH)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());
        let (prefix, rest) = line.split_at(split_at);
        let status: String = prefix.chars().take(2).collect();

        // `R  old -> new` keeps the destination of the rename
        let path = match rest.split_once(RENAME_SEPARATOR) {
            Some((_, renamed_to)) if status.contains('R') => renamed_to.to_string(),
            _ => rest.to_string(),
        };

        Some(Self { status, path })
    }

    /// Whether the entry reports a deletion in the index or the worktree
    pub fn is_deleted(&self) -> bool {
        self.status.contains('D')
    }

    pub fn is_untracked(&self) -> bool {
        self.status == "??"
    }
}
