//! 入力処理モジュール
//!
//! キーバインド、イベント変換、クリップボード連携

pub mod clipboard;
pub mod event_handler;
pub mod keybinding;

pub use clipboard::{ClipboardProvider, CommandClipboard, NoClipboard, StaticClipboard};
pub use event_handler::{EventSource, InputEvent, InputResult};
pub use keybinding::{Action, Key, KeyCode, KeyMap, KeyModifiers, KeyProcessResult};
