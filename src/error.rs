//! エラーハンドリングシステム
//!
//! テキストエリア本体の編集操作はエラーを返さない（範囲外はクランプ、超過分は切り詰め）。
//! ここで定義するのは設定読み込み・キー記述の解析・クリップボード・端末制御といった
//! 失敗し得る境界のためのエラー型。

use thiserror::Error;

pub use crate::input::clipboard::ClipboardError;
pub use crate::input::keybinding::KeyParseError;

/// クレート全体のエラー型
#[derive(Error, Debug)]
pub enum TextAreaError {
    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// キー記述の解析エラー
    #[error("Key binding error")]
    KeyParse(#[from] KeyParseError),

    /// クリップボードエラー
    #[error("Clipboard error")]
    Clipboard(#[from] ClipboardError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// 入出力エラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 設定固有のエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error while reading {path}: {message}")]
    Io { path: String, message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TextAreaError>;
