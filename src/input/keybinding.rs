//! キーバインドシステム
//!
//! キー入力の内部表現、記号的なキー記述（`"C-f"`, `"M-Backspace"` など）の解析、
//! キーからアクションへの対応表を管理

use crate::buffer::NavigationAction;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self { ctrl: false, alt: false, shift: false };
    pub const CTRL: Self = Self { ctrl: true, alt: false, shift: false };
    pub const ALT: Self = Self { ctrl: false, alt: true, shift: false };
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { modifiers, code }
    }

    /// 修飾キーなし
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// 修飾キーなしの文字
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// Ctrl+文字
    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CTRL)
    }

    /// Alt+文字
    pub fn alt(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::ALT)
    }

    /// 記号的なキー記述を解析
    ///
    /// `C-`（Ctrl）、`M-`（Alt）、`S-`（Shift）の接頭辞に続けてキー名か1文字を書く。
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut remaining = s;

        // 修飾キーの解析（"C--" のように修飾キー後の "-" 自体も許す）
        loop {
            if remaining.len() > 2 && remaining.starts_with("C-") {
                modifiers.ctrl = true;
                remaining = &remaining[2..];
            } else if remaining.len() > 2 && remaining.starts_with("M-") {
                modifiers.alt = true;
                remaining = &remaining[2..];
            } else if remaining.len() > 2 && remaining.starts_with("S-") {
                modifiers.shift = true;
                remaining = &remaining[2..];
            } else {
                break;
            }
        }

        let code = match remaining {
            "Enter" | "RET" => KeyCode::Enter,
            "Backspace" | "DEL" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Tab" | "TAB" => KeyCode::Tab,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Esc" => KeyCode::Esc,
            "Space" | "SPC" => KeyCode::Char(' '),
            name if name.starts_with('F') && name.len() > 1 => match name[1..].parse::<u8>() {
                Ok(n) if (1..=24).contains(&n) => KeyCode::F(n),
                _ => return Err(KeyParseError::UnknownKey(name.to_string())),
            },
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return Err(KeyParseError::UnknownKey(other.to_string())),
                }
            }
        };

        // 文字キーは大文字・小文字で Shift を表すので修飾から外す
        if matches!(code, KeyCode::Char(_)) && modifiers.shift {
            return Err(KeyParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self { modifiers, code })
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        match self.code {
            KeyCode::Char(ch) => !self.modifiers.ctrl && !self.modifiers.alt && !ch.is_control(),
            _ => false,
        }
    }

    /// 挿入可能な文字を取り出す
    pub fn insertable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if self.is_insertable_char() => Some(ch),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("C-")?;
        }
        if self.modifiers.alt {
            f.write_str("M-")?;
        }
        if self.modifiers.shift {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(ch) => write!(f, "{}", ch),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// crossterm統合
impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            // 文字キーのShiftは文字自体に反映済み
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT)
                && !matches!(code, KeyCode::Char(_)),
        };

        Key { modifiers, code }
    }
}

/// キーに割り当てられるアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    CharacterForward,
    CharacterBackward,
    WordForward,
    WordBackward,
    LineNext,
    LinePrevious,
    DeleteCharacterBackward,
    DeleteCharacterForward,
    DeleteWordBackward,
    DeleteWordForward,
    /// カーソルから行末まで削除
    DeleteAfterCursor,
    /// 行頭からカーソルまで削除
    DeleteBeforeCursor,
    InsertNewline,
    LineStart,
    LineEnd,
    InputBegin,
    InputEnd,
    /// クリップボードから貼り付け
    Paste,
    /// 自己挿入（キーマップには登録しない）
    #[serde(skip)]
    InsertChar(char),
}

impl Action {
    /// カーソル移動アクションならナビゲーション操作に変換
    pub fn navigation(self) -> Option<NavigationAction> {
        let action = match self {
            Action::CharacterForward => NavigationAction::CharForward,
            Action::CharacterBackward => NavigationAction::CharBackward,
            Action::WordForward => NavigationAction::WordForward,
            Action::WordBackward => NavigationAction::WordBackward,
            Action::LineNext => NavigationAction::LineNext,
            Action::LinePrevious => NavigationAction::LinePrevious,
            Action::LineStart => NavigationAction::LineStart,
            Action::LineEnd => NavigationAction::LineEnd,
            Action::InputBegin => NavigationAction::InputBegin,
            Action::InputEnd => NavigationAction::InputEnd,
            _ => return None,
        };
        Some(action)
    }
}

/// キー処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum KeyProcessResult {
    /// アクション実行
    Action(Action),
    /// マッチなし（無視）
    NoMatch,
}

/// 既定のキーバインド
const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    // 移動系
    ("Right", Action::CharacterForward),
    ("C-f", Action::CharacterForward),
    ("Left", Action::CharacterBackward),
    ("C-b", Action::CharacterBackward),
    ("M-Right", Action::WordForward),
    ("C-Right", Action::WordForward),
    ("M-f", Action::WordForward),
    ("M-Left", Action::WordBackward),
    ("C-Left", Action::WordBackward),
    ("M-b", Action::WordBackward),
    ("Down", Action::LineNext),
    ("C-n", Action::LineNext),
    ("Up", Action::LinePrevious),
    ("C-p", Action::LinePrevious),
    ("Home", Action::LineStart),
    ("C-a", Action::LineStart),
    ("End", Action::LineEnd),
    ("C-e", Action::LineEnd),
    ("M-<", Action::InputBegin),
    ("C-Home", Action::InputBegin),
    ("M->", Action::InputEnd),
    ("C-End", Action::InputEnd),
    // 編集系
    ("Backspace", Action::DeleteCharacterBackward),
    ("C-h", Action::DeleteCharacterBackward),
    ("Delete", Action::DeleteCharacterForward),
    ("C-d", Action::DeleteCharacterForward),
    ("M-Backspace", Action::DeleteWordBackward),
    ("C-w", Action::DeleteWordBackward),
    ("M-Delete", Action::DeleteWordForward),
    ("M-d", Action::DeleteWordForward),
    ("C-k", Action::DeleteAfterCursor),
    ("C-u", Action::DeleteBeforeCursor),
    ("Enter", Action::InsertNewline),
    ("C-m", Action::InsertNewline),
    ("C-v", Action::Paste),
];

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl KeyMap {
    /// 既定のキーバインドでキーマップを作成
    pub fn new() -> Self {
        let mut bindings = HashMap::with_capacity(DEFAULT_BINDINGS.len());
        for (description, action) in DEFAULT_BINDINGS {
            if let Ok(key) = Key::parse(description) {
                bindings.insert(key, *action);
            }
        }
        Self { bindings }
    }

    /// 空のキーマップ（自己挿入のみ）
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// キー記述にアクションを割り当てる（既存の割り当ては上書き）
    pub fn bind(&mut self, description: &str, action: Action) -> Result<(), KeyParseError> {
        if matches!(action, Action::InsertChar(_)) {
            return Err(KeyParseError::InvalidFormat(description.to_string()));
        }
        let key = Key::parse(description)?;
        self.bindings.insert(key, action);
        Ok(())
    }

    /// キー記述の割り当てを解除
    pub fn unbind(&mut self, description: &str) -> Result<Option<Action>, KeyParseError> {
        let key = Key::parse(description)?;
        Ok(self.bindings.remove(&key))
    }

    /// 複数の割り当てをまとめて適用
    ///
    /// 全ての記述を先に検証し、1つでも不正なら何も割り当てない。
    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Result<(), KeyParseError>
    where
        I: IntoIterator<Item = (&'a String, &'a Action)>,
    {
        let mut parsed = Vec::new();
        for (description, action) in overrides {
            if matches!(action, Action::InsertChar(_)) {
                return Err(KeyParseError::InvalidFormat(description.to_string()));
            }
            parsed.push((Key::parse(description)?, *action));
        }
        self.bindings.extend(parsed);
        Ok(())
    }

    /// キーに割り当てられたアクション
    pub fn lookup(&self, key: &Key) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// キー入力を処理してアクションを返す
    ///
    /// 割り当てのない表示可能文字は自己挿入になる。
    pub fn process_key(&self, key: &Key) -> KeyProcessResult {
        if let Some(action) = self.lookup(key) {
            return KeyProcessResult::Action(action);
        }

        if let Some(ch) = key.insertable_char() {
            return KeyProcessResult::Action(Action::InsertChar(ch));
        }

        // マッチしない場合はサイレント無視
        KeyProcessResult::NoMatch
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// キーパースエラー
#[derive(Debug, thiserror::Error)]
pub enum KeyParseError {
    #[error("Invalid key description: {0}")]
    InvalidFormat(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Empty key description")]
    Empty,
}
