//! イベントハンドリング
//!
//! 端末イベントをテキストエリアが受け付ける入力イベントへ変換する

use super::keybinding::{Action, Key};
use crate::error::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

/// テキストエリアへの入力イベント
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// キー入力
    Key(Key),
    /// 貼り付け（デコード済みテキスト）
    Paste(String),
    /// 表示領域のサイズ変更
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    /// crosstermのイベントから変換（扱わないイベントは `None`）
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key_event) => match key_event.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Some(Self::Key(key_event.into())),
                KeyEventKind::Release => None,
            },
            Event::Paste(text) => Some(Self::Paste(text)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            Event::Mouse(_) => None, // マウスは未サポート
            Event::FocusGained | Event::FocusLost => None,
        }
    }
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// 入力処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// 内容が変更された
    Edited(Action),
    /// カーソルだけが移動した
    Moved(Action),
    /// 貼り付けを適用した（空の貼り付けを含む）
    Pasted,
    /// サイズ変更を適用した
    Resized,
    /// 無視（非フォーカス、未割り当てキー、読み出し失敗など）
    Ignored,
}

impl InputResult {
    pub fn is_ignored(&self) -> bool {
        matches!(self, InputResult::Ignored)
    }

    /// 再描画が必要か
    pub fn needs_redraw(&self) -> bool {
        !self.is_ignored()
    }
}

/// 端末からの入力読み取り
pub struct EventSource {
    /// 入力タイムアウト
    timeout: Duration,
}

impl EventSource {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(100))
    }

    /// タイムアウト付きで作成
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 次の生イベントを読み取る（タイムアウト時は `None`）
    pub fn next_raw(&self) -> Result<Option<Event>> {
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        Ok(Some(event::read()?))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self::new()
    }
}
