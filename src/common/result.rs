use crate::common::error::WrapperError;

/// sqlcl-wrapper全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use sqlcl_wrapper::common::result::WrapperResult;
/// use sqlcl_wrapper::common::error::WrapperError;
///
/// fn example_function() -> WrapperResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> WrapperResult<()> {
///     Err(WrapperError::internal_error("Something went wrong"))
/// }
/// ```
pub type WrapperResult<T> = Result<T, WrapperError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Optionをエラーメッセージ付きでWrapperResultに変換する
    fn ok_or_internal_error(self, message: impl Into<String>) -> WrapperResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_internal_error(self, message: impl Into<String>) -> WrapperResult<T> {
        self.ok_or_else(|| WrapperError::internal_error(message))
    }
}

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// ResultをWrapperResultに変換する
    fn map_wrapper_err<F>(self, f: F) -> WrapperResult<T>
    where
        F: FnOnce(E) -> WrapperError;

    /// ファイルシステムエラーとしてWrapperResultに変換
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlcl_wrapper::common::result::{WrapperResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let wrapped: WrapperResult<String> =
    ///     result.with_filesystem_error("Failed to read", Some(PathBuf::from("a.sql")));
    /// assert!(wrapped.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> WrapperResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_wrapper_err<F>(self, f: F) -> WrapperResult<T>
    where
        F: FnOnce(E) -> WrapperError,
    {
        self.map_err(f)
    }

    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> WrapperResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            WrapperError::filesystem_error_with_source(message, path, io_error)
        })
    }
}
