//! バッファ管理モジュール
//!
//! テキストデータの管理、編集操作、カーソル位置管理を提供

pub mod cursor;
pub mod navigation;
pub mod text_buffer;

// 公開API
pub use cursor::CursorPosition;
pub use navigation::NavigationAction;
pub use text_buffer::TextBuffer;
