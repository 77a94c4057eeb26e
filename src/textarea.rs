//! テキストエリア
//!
//! バッファ・表示範囲・キーマップ・クリップボード・フォーカス状態をまとめた
//! ウィジェット本体。ホスト側の画面はこの型だけを保持し、イベントを渡して
//! 任意のタイミングで描画結果を取り出す。

use crate::buffer::{navigation, CursorPosition, TextBuffer};
use crate::config::TextAreaConfig;
use crate::input::clipboard::{sanitize_paste, ClipboardProvider, NoClipboard};
use crate::input::{Action, InputEvent, InputResult, Key, KeyMap, KeyProcessResult};
use crate::ui::{TextAreaRenderer, TextAreaWidget, Theme, ViewportManager};
use ratatui::text::Line;

/// フォーカス状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    Focused,
    #[default]
    Blurred,
}

/// 複数行テキスト入力ウィジェット
#[derive(Debug)]
pub struct TextArea {
    buffer: TextBuffer,
    viewport: ViewportManager,
    keymap: KeyMap,
    config: TextAreaConfig,
    focus: FocusState,
    clipboard: Box<dyn ClipboardProvider>,
}

impl TextArea {
    /// 指定サイズと設定でテキストエリアを作成（初期状態は非フォーカス）
    pub fn new(width: usize, height: usize, config: TextAreaConfig) -> Self {
        let mut keymap = KeyMap::new();
        if let Err(err) = keymap.apply_overrides(&config.keybindings) {
            log::warn!("ignoring all keybinding overrides: {}", err);
        }

        let mut textarea = Self {
            buffer: TextBuffer::with_limits(config.char_limit, config.max_height),
            viewport: ViewportManager::new(0, 0),
            keymap,
            config,
            focus: FocusState::default(),
            clipboard: Box::new(NoClipboard),
        };
        textarea.set_size(width, height);
        textarea
    }

    /// クリップボードを差し替える
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardProvider>) {
        self.clipboard = clipboard;
    }

    // --- 内容 ---

    /// 内容を置き換え、カーソルを先頭へ
    pub fn set_value(&mut self, value: &str) {
        self.buffer.set_value(value);
        self.sync_viewport();
    }

    pub fn value(&self) -> String {
        self.buffer.value()
    }

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(text);
        self.sync_viewport();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert_char(ch);
        self.sync_viewport();
    }

    /// 空にする
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.sync_viewport();
    }

    pub fn length(&self) -> usize {
        self.buffer.length()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    // --- カーソル ---

    /// カーソルを設定（範囲外はクランプ）
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.buffer.set_cursor(CursorPosition::at(line, column));
        self.sync_viewport();
    }

    /// カーソル位置（行, 列）
    pub fn cursor(&self) -> (usize, usize) {
        self.buffer.cursor().as_tuple()
    }

    // --- フォーカス ---

    pub fn focus(&mut self) {
        self.focus = FocusState::Focused;
    }

    pub fn blur(&mut self) {
        self.focus = FocusState::Blurred;
    }

    pub fn is_focused(&self) -> bool {
        self.focus == FocusState::Focused
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    // --- 表示範囲 ---

    /// 表示サイズを設定（`max_width` / `max_height` を上限とする）
    pub fn set_size(&mut self, width: usize, height: usize) {
        let width = match self.config.max_width {
            0 => width,
            max => width.min(max),
        };
        let height = match self.config.max_height {
            0 => height,
            max => height.min(max),
        };
        self.viewport.set_size(width, height);
        self.sync_viewport();
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.viewport.scroll_up(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.viewport.scroll_down(n);
    }

    pub fn viewport(&self) -> &ViewportManager {
        &self.viewport
    }

    // --- 設定・キーマップ ---

    pub fn config(&self) -> &TextAreaConfig {
        &self.config
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    // --- 描画 ---

    fn renderer(&self) -> TextAreaRenderer<'_> {
        TextAreaRenderer::new(&self.buffer, &self.viewport, &self.config, self.is_focused())
    }

    /// ANSIエスケープ付きで描画
    pub fn render(&self, theme: &Theme) -> String {
        self.renderer().render(theme)
    }

    /// ratatui向けのスタイル付き行として描画
    pub fn render_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.renderer().render_lines(theme)
    }

    pub fn render_plain(&self) -> String {
        self.renderer().render_plain()
    }

    /// ratatuiのフレームへ描画するウィジェット
    pub fn widget<'a>(&'a self, theme: &'a Theme) -> TextAreaWidget<'a> {
        TextAreaWidget::new(self.renderer(), theme)
    }

    /// 端末カーソルを置く位置（表示領域内の列, 行）
    pub fn cursor_screen_position(&self) -> Option<(u16, u16)> {
        self.renderer().cursor_screen_position()
    }

    // --- 入力 ---

    /// 入力イベントを処理
    ///
    /// サイズ変更はフォーカスに関係なく反映する。それ以外は非フォーカス時に無視する。
    pub fn handle_event(&mut self, event: InputEvent) -> InputResult {
        match event {
            InputEvent::Resize { width, height } => {
                self.set_size(usize::from(width), usize::from(height));
                InputResult::Resized
            }
            _ if !self.is_focused() => InputResult::Ignored,
            InputEvent::Paste(text) => {
                self.paste(&text);
                InputResult::Pasted
            }
            InputEvent::Key(key) => self.handle_key(&key),
        }
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: &Key) -> InputResult {
        if !self.is_focused() {
            return InputResult::Ignored;
        }

        match self.keymap.process_key(key) {
            KeyProcessResult::Action(action) => self.execute(action),
            KeyProcessResult::NoMatch => {
                log::trace!("unbound key: {}", key);
                InputResult::Ignored
            }
        }
    }

    /// アクションを実行
    pub fn execute(&mut self, action: Action) -> InputResult {
        if !self.is_focused() {
            return InputResult::Ignored;
        }

        let result = if let Some(nav) = action.navigation() {
            let cursor = navigation::navigate(self.buffer.lines(), self.buffer.cursor(), nav);
            self.buffer.set_cursor(cursor);
            InputResult::Moved(action)
        } else {
            match action {
                Action::InsertChar(ch) => self.buffer.insert_char(ch),
                Action::InsertNewline => self.buffer.insert_newline(),
                Action::DeleteCharacterBackward => {
                    self.buffer.delete_char_backward();
                }
                Action::DeleteCharacterForward => {
                    self.buffer.delete_char_forward();
                }
                Action::DeleteWordBackward => {
                    self.buffer.delete_word_backward();
                }
                Action::DeleteWordForward => {
                    self.buffer.delete_word_forward();
                }
                Action::DeleteAfterCursor => {
                    self.buffer.delete_to_line_end();
                }
                Action::DeleteBeforeCursor => {
                    self.buffer.delete_to_line_start();
                }
                Action::Paste => return self.paste_from_clipboard(),
                // 移動系は上で処理済み
                _ => {}
            }
            InputResult::Edited(action)
        };

        self.sync_viewport();
        result
    }

    fn paste_from_clipboard(&mut self) -> InputResult {
        match self.clipboard.get_contents() {
            Ok(text) => {
                self.paste(&text);
                InputResult::Pasted
            }
            Err(err) => {
                log::warn!("paste from {} failed: {}", self.clipboard.name(), err);
                InputResult::Ignored
            }
        }
    }

    fn paste(&mut self, text: &str) {
        let text = sanitize_paste(text);
        log::debug!("pasting {} chars", text.chars().count());
        self.buffer.insert_str(&text);
        self.sync_viewport();
    }

    /// 表示範囲をバッファとカーソルに合わせる
    fn sync_viewport(&mut self) {
        self.viewport.set_total_rows(self.buffer.line_count());
        self.viewport.scroll_to_cursor(self.buffer.cursor().line);
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new(40, 6, TextAreaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, StaticClipboard};

    fn focused(width: usize, height: usize, config: TextAreaConfig) -> TextArea {
        let mut textarea = TextArea::new(width, height, config);
        textarea.focus();
        textarea
    }

    fn press(textarea: &mut TextArea, description: &str) -> InputResult {
        let key = Key::parse(description).unwrap();
        textarea.handle_key(&key)
    }

    #[test]
    fn test_starts_blurred_and_ignores_input() {
        let mut textarea = TextArea::default();
        assert!(!textarea.is_focused());
        assert_eq!(textarea.handle_key(&Key::char('a')), InputResult::Ignored);
        assert_eq!(textarea.handle_event(InputEvent::Paste("x".into())), InputResult::Ignored);
        assert_eq!(textarea.value(), "");
    }

    #[test]
    fn test_self_insert_and_navigation() {
        let mut textarea = focused(20, 3, TextAreaConfig::default());
        for ch in "hello".chars() {
            textarea.handle_key(&Key::char(ch));
        }
        assert_eq!(textarea.value(), "hello");
        assert_eq!(press(&mut textarea, "C-a"), InputResult::Moved(Action::LineStart));
        assert_eq!(textarea.cursor(), (0, 0));
        press(&mut textarea, "C-e");
        assert_eq!(textarea.cursor(), (0, 5));
    }

    #[test]
    fn test_ctrl_chars_are_not_inserted() {
        let mut textarea = focused(20, 3, TextAreaConfig::default());
        assert_eq!(press(&mut textarea, "C-z"), InputResult::Ignored);
        assert_eq!(textarea.value(), "");
    }

    #[test]
    fn test_resize_applies_while_blurred() {
        let mut textarea = TextArea::new(10, 2, TextAreaConfig::default());
        assert_eq!(
            textarea.handle_event(InputEvent::Resize { width: 30, height: 5 }),
            InputResult::Resized
        );
        assert_eq!(textarea.viewport().width(), 30);
        assert_eq!(textarea.viewport().height(), 5);
    }

    #[test]
    fn test_size_is_bounded_by_config() {
        let config = TextAreaConfig::new().with_max_width(12).with_max_height(3);
        let textarea = TextArea::new(80, 24, config);
        assert_eq!(textarea.viewport().width(), 12);
        assert_eq!(textarea.viewport().height(), 3);
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let mut textarea = focused(10, 2, TextAreaConfig::default());
        for _ in 0..4 {
            press(&mut textarea, "Enter");
        }
        assert_eq!(textarea.cursor(), (4, 0));
        assert_eq!(textarea.viewport().y_offset(), 3);

        press(&mut textarea, "M-<");
        assert_eq!(textarea.viewport().y_offset(), 0);
    }

    #[test]
    fn test_paste_event_is_sanitized() {
        let mut textarea = focused(20, 3, TextAreaConfig::default());
        textarea.handle_event(InputEvent::Paste("a\r\nb\u{7}".into()));
        assert_eq!(textarea.value(), "a\nb");
        assert_eq!(textarea.cursor(), (1, 1));
    }

    #[test]
    fn test_clipboard_paste_and_failure() {
        let mut textarea = focused(20, 3, TextAreaConfig::default())
            .with_clipboard(Box::new(StaticClipboard::new("clip")));
        assert_eq!(press(&mut textarea, "C-v"), InputResult::Pasted);
        assert_eq!(textarea.value(), "clip");

        textarea.set_clipboard(Box::new(NoClipboard));
        assert_eq!(press(&mut textarea, "C-v"), InputResult::Ignored);
        assert_eq!(textarea.value(), "clip");
    }

    #[test]
    fn test_keybinding_overrides_from_config() {
        let config = TextAreaConfig::new().with_keybinding("C-j", Action::InsertNewline);
        let mut textarea = focused(20, 3, config);
        textarea.insert_str("ab");
        press(&mut textarea, "C-j");
        assert_eq!(textarea.value(), "ab\n");
    }

    #[test]
    fn test_invalid_override_leaves_default_keymap() {
        let config = TextAreaConfig::new()
            .with_keybinding("C-j", Action::InsertNewline)
            .with_keybinding("C-Hyper", Action::LineEnd);
        let mut textarea = focused(20, 3, config);
        textarea.insert_str("ab");
        assert_eq!(press(&mut textarea, "C-j"), InputResult::Ignored);
        assert_eq!(textarea.value(), "ab");
        assert_eq!(press(&mut textarea, "C-a"), InputResult::Moved(Action::LineStart));
    }

    #[test]
    fn test_kill_line_actions() {
        let mut textarea = focused(20, 3, TextAreaConfig::default());
        textarea.set_value("hello world");
        textarea.set_cursor(0, 5);
        press(&mut textarea, "C-k");
        assert_eq!(textarea.value(), "hello");
        press(&mut textarea, "C-u");
        assert_eq!(textarea.value(), "");
    }

    #[test]
    fn test_blurred_render_has_no_cursor_position() {
        let mut textarea = TextArea::new(10, 2, TextAreaConfig::new().with_prompt("").with_line_numbers(false));
        textarea.set_value("abc");
        assert_eq!(textarea.cursor_screen_position(), None);
        textarea.focus();
        assert_eq!(textarea.cursor_screen_position(), Some((0, 0)));
        assert_eq!(
            textarea.handle_key(&Key::plain(KeyCode::End)),
            InputResult::Moved(Action::LineEnd)
        );
        assert_eq!(textarea.cursor_screen_position(), Some((3, 0)));
    }
}
