//! デモ用ホストアプリケーション
//!
//! テキストエリアを1つ全画面に表示する ratatui/crossterm のイベントループ。
//! Esc または C-c で終了し、入力された内容を返す。

use crate::config::TextAreaConfig;
use crate::error::{Result, TextAreaError, UiError};
use crate::input::clipboard::detect_provider;
use crate::input::{EventSource, InputEvent, InputResult, Key, KeyCode};
use crate::textarea::TextArea;
use crate::ui::Theme;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::stdout;

const HELP_LINE: &str = "Esc: finish  C-v: paste  C-k: kill line";

/// デモアプリケーション
pub struct App {
    textarea: TextArea,
    theme: Theme,
    events: EventSource,
    running: bool,
}

impl App {
    pub fn new(config: TextAreaConfig, theme: Theme) -> Self {
        let mut textarea = TextArea::new(0, 0, config).with_clipboard(detect_provider());
        textarea.focus();
        Self {
            textarea,
            theme,
            events: EventSource::new(),
            running: true,
        }
    }

    pub fn textarea(&self) -> &TextArea {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea {
        &mut self.textarea
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shutdown(&mut self) {
        self.running = false;
    }

    /// イベントループを実行し、終了時の内容を返す
    pub fn run(&mut self) -> Result<String> {
        Self::enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(Self::terminal_init_error)?;
        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = Self::leave_terminal();

        loop_result.and(cleanup_result)?;
        Ok(self.textarea.value())
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size().map_err(|err| Self::terminal_error("terminal size", err))?;
        self.resize(size.width, size.height);

        while self.running {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|err| Self::terminal_error("draw", err))?;

            if let Some(event) = self.events.next_raw()? {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    /// 端末イベントを処理
    pub fn handle_event(&mut self, event: Event) -> InputResult {
        let Some(input) = InputEvent::from_crossterm(event) else {
            return InputResult::Ignored;
        };

        match input {
            InputEvent::Key(key) if Self::is_exit_key(&key) => {
                self.shutdown();
                InputResult::Ignored
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                InputResult::Resized
            }
            other => self.textarea.handle_event(other),
        }
    }

    fn is_exit_key(key: &Key) -> bool {
        *key == Key::plain(KeyCode::Esc) || *key == Key::ctrl('c')
    }

    /// ヘルプ行を除いた領域をテキストエリアに割り当てる
    fn resize(&mut self, width: u16, height: u16) {
        let height = height.saturating_sub(1);
        self.textarea.handle_event(InputEvent::Resize { width, height });
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let text_height = area.height.saturating_sub(1);
        let text_area = Rect::new(area.x, area.y, area.width, text_height);
        let help_area = Rect::new(area.x, area.y + text_height, area.width, area.height - text_height);

        frame.render_widget(self.textarea.widget(&self.theme), text_area);
        frame.render_widget(
            Paragraph::new(Line::from(HELP_LINE)).style(Style::default().add_modifier(Modifier::DIM)),
            help_area,
        );

        if let Some((x, y)) = self.textarea.cursor_screen_position() {
            frame.set_cursor_position((text_area.x + x, text_area.y + y));
        }
    }

    fn enter_terminal() -> Result<()> {
        enable_raw_mode().map_err(Self::terminal_init_error)?;
        execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|err| Self::terminal_error("enter alternate screen", err))?;
        Ok(())
    }

    fn leave_terminal() -> Result<()> {
        execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)
            .map_err(|err| Self::terminal_error("leave alternate screen", err))?;
        disable_raw_mode().map_err(|err| Self::terminal_error("disable raw mode", err))?;
        Ok(())
    }

    fn terminal_init_error(err: impl std::fmt::Display) -> TextAreaError {
        TextAreaError::Ui(UiError::TerminalInit { message: err.to_string() })
    }

    fn terminal_error(context: &str, err: impl std::fmt::Display) -> TextAreaError {
        TextAreaError::Ui(UiError::RenderingFailed {
            component: format!("{}: {}", context, err),
        })
    }
}
