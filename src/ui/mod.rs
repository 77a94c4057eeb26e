//! UIモジュール
//!
//! 表示範囲の管理と、テーマ付きの固定サイズ描画

pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use renderer::{RenderedRow, Segment, TextAreaRenderer, TextAreaWidget};
pub use theme::{ColorScheme, ComponentType, Theme, ThemeType};
pub use viewport::ViewportManager;
