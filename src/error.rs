/// Result type for script generation operations
pub type Result<T> = std::result::Result<T, ScriptGenError>;

/// Error types for script generation operations
#[derive(thiserror::Error, Debug)]
pub enum ScriptGenError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Transcript not found: {0}")]
    NotFound(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl ScriptGenError {
    /// Human-readable payload for surfacing to a caller
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(msg) => format!("入力が不正です: {msg}"),
            Self::NotFound(msg) => format!("字幕を取得できませんでした: {msg}"),
            Self::Upstream(msg) => format!("外部サービスでエラーが発生しました: {msg}"),
            Self::InternalInvariant(msg) => format!("内部エラーが発生しました: {msg}"),
        }
    }
}
