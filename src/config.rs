//! テキストエリア設定
//!
//! 文字数・行数の上限、行番号やプロンプトの表示、プレースホルダー、キーバインドの上書きを保持する。
//! JSONファイルから読み込める。

use crate::error::{ConfigError, Result};
use crate::input::keybinding::{Action, Key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// 既定のプロンプト
pub const DEFAULT_PROMPT: &str = "┃ ";

/// テキストエリアの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAreaConfig {
    /// 最大文字数（0は無制限）
    pub char_limit: usize,
    /// 最大行数（0は無制限）
    pub max_height: usize,
    /// 最大表示幅（0は無制限）。折り返しを行う利用側の幅にも使う
    pub max_width: usize,
    /// 行番号を表示するか
    pub show_line_numbers: bool,
    /// 各行の先頭に表示するプロンプト
    pub prompt: String,
    /// プロンプト欄の幅（0はプロンプトの表示幅）
    pub prompt_width: usize,
    /// 空のときに表示するテキスト
    pub placeholder: String,
    /// バッファ末尾以降の行に表示する文字
    pub end_of_buffer_char: char,
    /// キーバインドの上書き（キー記述 → アクション）
    pub keybindings: BTreeMap<String, Action>,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            char_limit: 0,
            max_height: 0,
            max_width: 0,
            show_line_numbers: true,
            prompt: DEFAULT_PROMPT.to_string(),
            prompt_width: 0,
            placeholder: String::new(),
            end_of_buffer_char: ' ',
            keybindings: BTreeMap::new(),
        }
    }
}

impl TextAreaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }

    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_prompt_width(mut self, prompt_width: usize) -> Self {
        self.prompt_width = prompt_width;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_keybinding(mut self, description: impl Into<String>, action: Action) -> Self {
        self.keybindings.insert(description.into(), action);
        self
    }

    /// プロンプト欄の実効幅
    pub fn effective_prompt_width(&self) -> usize {
        self.prompt_width.max(self.prompt.width())
    }

    /// 設定値の整合性を検証
    pub fn validate(&self) -> Result<()> {
        if self.prompt_width > 0 && self.prompt.width() > self.prompt_width {
            return Err(ConfigError::InvalidValue {
                key: "prompt_width".to_string(),
                value: format!("{} (prompt is {} cells wide)", self.prompt_width, self.prompt.width()),
            }
            .into());
        }

        if self.end_of_buffer_char.is_control() {
            return Err(ConfigError::InvalidValue {
                key: "end_of_buffer_char".to_string(),
                value: format!("{:?}", self.end_of_buffer_char),
            }
            .into());
        }

        for (description, action) in &self.keybindings {
            Key::parse(description)?;
            if matches!(action, Action::InsertChar(_)) {
                return Err(ConfigError::InvalidValue {
                    key: format!("keybindings.{}", description),
                    value: format!("{:?}", action),
                }
                .into());
            }
        }

        Ok(())
    }

    /// JSONファイルから読み込む（`~` は展開する）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref().to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        let display = expanded.display().to_string();

        let contents = std::fs::read_to_string(&expanded).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound { path: display.clone() },
            _ => ConfigError::Io { path: display.clone(), message: e.to_string() },
        })?;

        let config = Self::from_json(&contents).map_err(|e| match e {
            crate::error::TextAreaError::Config(ConfigError::InvalidFile { message, .. }) => {
                ConfigError::InvalidFile { path: display.clone(), message }.into()
            }
            other => other,
        })?;

        log::info!("loaded text area config from {}", display);
        Ok(config)
    }

    /// JSON文字列から読み込む
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents).map_err(|e| ConfigError::InvalidFile {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 設定ファイルの既定の場所
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("altre-textarea").join("config.json"))
    }

    /// 既定の場所にファイルがあれば読み込み、なければ既定値を返す
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
