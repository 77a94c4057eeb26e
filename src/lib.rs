//! altre-textarea - Emacs風キーバインドの複数行テキスト入力ウィジェット
//!
//! 文字単位のテキストバッファ、カーソル移動、カーソル追従のスクロール、
//! キーマップによる入力ディスパッチをまとめた端末UI向けの入力部品。

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;

// ロジック層
pub mod input;
pub mod textarea;

// 表示層
pub mod ui;

// デモホスト
pub mod app;

// 公開API
pub use buffer::{CursorPosition, NavigationAction, TextBuffer};
pub use config::TextAreaConfig;
pub use error::{Result, TextAreaError};
pub use input::{Action, ClipboardProvider, InputEvent, InputResult, Key, KeyMap};
pub use textarea::{FocusState, TextArea};
pub use ui::{Theme, ViewportManager};
