//! クリップボード連携
//!
//! 貼り付け（Paste アクション）の読み出し元。テキストエリアはこのトレイト越しにのみ
//! クリップボードへアクセスし、読み出しの失敗はバッファ状態へ持ち込まない。

use std::borrow::Cow;
use std::process::{Command, Stdio};
use thiserror::Error;

/// クリップボードエラー
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not convert provider output to UTF-8: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    #[error("clipboard provider command failed: {0}")]
    CommandFailed(String),

    #[error("clipboard provider does not support reading")]
    ReadingNotSupported,
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

/// クリップボードの読み出し元
pub trait ClipboardProvider: std::fmt::Debug {
    fn name(&self) -> Cow<'_, str>;
    fn get_contents(&self) -> Result<String>;
}

/// クリップボードなし（常に読み出し失敗）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardProvider for NoClipboard {
    fn name(&self) -> Cow<'_, str> {
        "none".into()
    }

    fn get_contents(&self) -> Result<String> {
        Err(ClipboardError::ReadingNotSupported)
    }
}

/// 固定文字列を返すクリップボード（テストや組み込み用）
#[derive(Debug, Default, Clone)]
pub struct StaticClipboard {
    contents: String,
}

impl StaticClipboard {
    pub fn new(contents: impl Into<String>) -> Self {
        Self { contents: contents.into() }
    }
}

impl ClipboardProvider for StaticClipboard {
    fn name(&self) -> Cow<'_, str> {
        "static".into()
    }

    fn get_contents(&self) -> Result<String> {
        Ok(self.contents.clone())
    }
}

/// 外部コマンド（pbpaste, wl-paste, xclip, xsel）から読み出すクリップボード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: Cow<'static, str>,
    args: Vec<Cow<'static, str>>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<Cow<'static, str>>, args: Vec<Cow<'static, str>>) -> Self {
        Self { program: program.into(), args }
    }

    /// 実行環境から利用可能なコマンドを選ぶ
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") && binary_exists("pbpaste") {
            return Some(Self::new("pbpaste", Vec::new()));
        }
        if std::env::var_os("WAYLAND_DISPLAY").is_some() && binary_exists("wl-paste") {
            return Some(Self::new("wl-paste", vec!["--no-newline".into()]));
        }
        if std::env::var_os("DISPLAY").is_some() {
            if binary_exists("xclip") {
                return Some(Self::new("xclip", vec!["-o".into(), "-selection".into(), "clipboard".into()]));
            }
            if binary_exists("xsel") {
                return Some(Self::new("xsel", vec!["-o".into(), "-b".into()]));
            }
        }
        None
    }
}

impl ClipboardProvider for CommandClipboard {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.program.as_ref())
    }

    fn get_contents(&self) -> Result<String> {
        let output = Command::new(self.program.as_ref())
            .args(self.args.iter().map(|arg| arg.as_ref()))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(ClipboardError::CommandFailed(format!("{} exited with {}", self.program, output.status)));
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// 利用可能なクリップボードを選ぶ（見つからなければ [`NoClipboard`]）
pub fn detect_provider() -> Box<dyn ClipboardProvider> {
    match CommandClipboard::detect() {
        Some(provider) => {
            log::debug!("clipboard provider: {}", provider.name());
            Box::new(provider)
        }
        None => Box::new(NoClipboard),
    }
}

fn binary_exists(name: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(name).is_file())
}

/// 貼り付けテキストの正規化
///
/// 改行コードを `\n` に揃え、`\n` と `\t` 以外の制御文字を取り除く。
pub fn sanitize_paste(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|ch| *ch == '\n' || *ch == '\t' || !ch.is_control())
        .collect()
}
