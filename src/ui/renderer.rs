//! テキストエリア描画
//!
//! 表示範囲の行を固定サイズ（高さ `height` 行 × 幅 `width` セル）のブロックとして組み立てる。
//! 各行はプロンプト・行番号・本文・カーソルのセグメントに分かれ、スタイルは描画時に渡された
//! テーマから決まる。

use crate::buffer::{CursorPosition, TextBuffer};
use crate::config::TextAreaConfig;
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::ViewportManager;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 同じスタイルで描画する連続テキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub component: ComponentType,
}

/// 描画済みの1行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRow {
    pub segments: Vec<Segment>,
}

impl RenderedRow {
    /// スタイルを除いたテキスト
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// 指定コンポーネントのセグメントを含むか
    pub fn contains(&self, component: ComponentType) -> bool {
        self.segments.iter().any(|s| s.component == component)
    }

    fn push(&mut self, ch: char, component: ComponentType) {
        match self.segments.last_mut() {
            Some(last) if last.component == component => last.text.push(ch),
            _ => self.segments.push(Segment { text: ch.to_string(), component }),
        }
    }
}

/// タブ1つ分の表示幅
pub const TAB_WIDTH: usize = 4;

/// 表示に使うグリフと繰り返し数
///
/// タブは空白に展開し、その他の制御文字は端末へそのまま流さず記号に置き換える。
fn glyph(ch: char) -> (char, usize) {
    match ch {
        '\t' => (' ', TAB_WIDTH),
        '\u{7f}' => ('\u{2421}', 1),
        c if (c as u32) < 0x20 => (char::from_u32(0x2400 + c as u32).unwrap_or('\u{fffd}'), 1),
        c if c.is_control() => ('\u{fffd}', 1),
        c => (c, 1),
    }
}

/// 1文字が占めるセル数
pub fn cell_width(ch: char) -> usize {
    let (glyph, count) = glyph(ch);
    glyph.width().unwrap_or(0) * count
}

/// 1行分のセル列を組み立てる補助
struct RowBuilder {
    row: RenderedRow,
    used: usize,
    width: usize,
    full: bool,
}

impl RowBuilder {
    fn new(width: usize) -> Self {
        Self { row: RenderedRow::default(), used: 0, width, full: false }
    }

    /// 1文字追加。幅に収まらなければ以降を打ち切る
    fn put(&mut self, ch: char, component: ComponentType) -> bool {
        if self.full {
            return false;
        }
        let (glyph, count) = glyph(ch);
        let w = glyph.width().unwrap_or(0) * count;
        if self.used + w > self.width {
            self.full = true;
            return false;
        }
        for _ in 0..count {
            self.row.push(glyph, component);
        }
        self.used += w;
        true
    }

    fn put_str(&mut self, text: &str, component: ComponentType) {
        for ch in text.chars() {
            if !self.put(ch, component) {
                break;
            }
        }
    }

    /// 残りを空白で埋める
    fn finish(mut self, fill: ComponentType) -> RenderedRow {
        while self.used < self.width {
            self.row.push(' ', fill);
            self.used += 1;
        }
        self.row
    }
}

/// テキストエリアレンダラー
#[derive(Debug, Clone, Copy)]
pub struct TextAreaRenderer<'a> {
    buffer: &'a TextBuffer,
    viewport: &'a ViewportManager,
    config: &'a TextAreaConfig,
    focused: bool,
}

impl<'a> TextAreaRenderer<'a> {
    pub fn new(
        buffer: &'a TextBuffer,
        viewport: &'a ViewportManager,
        config: &'a TextAreaConfig,
        focused: bool,
    ) -> Self {
        Self { buffer, viewport, config, focused }
    }

    /// 行番号欄の桁数（最低2桁）
    pub fn line_number_digits(&self) -> usize {
        self.buffer.line_count().to_string().len().max(2)
    }

    /// 本文の前に置かれる接頭辞の幅
    pub fn prefix_width(&self) -> usize {
        let numbers = if self.config.show_line_numbers {
            self.line_number_digits() + 1
        } else {
            0
        };
        self.config.effective_prompt_width() + numbers
    }

    fn show_placeholder(&self) -> bool {
        self.buffer.is_empty() && !self.config.placeholder.is_empty()
    }

    /// 表示範囲の全行を組み立てる
    pub fn rows(&self) -> Vec<RenderedRow> {
        let height = self.viewport.height();
        let y_offset = self.viewport.y_offset();
        let placeholder: Vec<&str> = if self.show_placeholder() {
            self.config.placeholder.split('\n').collect()
        } else {
            Vec::new()
        };

        (0..height)
            .map(|screen_row| {
                let line = y_offset + screen_row;
                if !placeholder.is_empty() {
                    self.placeholder_row(line, placeholder.get(line).copied())
                } else if line < self.buffer.line_count() {
                    self.buffer_row(line)
                } else {
                    self.end_of_buffer_row()
                }
            })
            .collect()
    }

    fn prefix(&self, builder: &mut RowBuilder, line_number: Option<usize>) {
        let prompt_width = self.config.effective_prompt_width();
        builder.put_str(&self.config.prompt, ComponentType::Prompt);
        for _ in self.config.prompt.width()..prompt_width {
            builder.put(' ', ComponentType::Prompt);
        }

        if self.config.show_line_numbers {
            let digits = self.line_number_digits();
            let label = match line_number {
                Some(n) => format!("{:0>width$} ", n, width = digits),
                None => " ".repeat(digits + 1),
            };
            builder.put_str(&label, ComponentType::LineNumber);
        }
    }

    fn buffer_row(&self, line: usize) -> RenderedRow {
        let mut builder = RowBuilder::new(self.viewport.width());
        self.prefix(&mut builder, Some(line + 1));

        let chars = self.buffer.line(line).unwrap_or(&[]);
        let cursor = self.visible_cursor().filter(|c| c.line == line);
        for (col, ch) in chars.iter().enumerate() {
            let component = match cursor {
                Some(c) if c.column == col => ComponentType::Cursor,
                _ => ComponentType::Text,
            };
            if !builder.put(*ch, component) {
                break;
            }
        }
        if let Some(c) = cursor {
            if c.column >= chars.len() {
                builder.put(' ', ComponentType::Cursor);
            }
        }

        builder.finish(ComponentType::Text)
    }

    fn placeholder_row(&self, line: usize, text: Option<&str>) -> RenderedRow {
        let Some(text) = text else {
            return self.end_of_buffer_row();
        };

        let mut builder = RowBuilder::new(self.viewport.width());
        // 行番号はバッファに実在する1行目だけに付ける
        self.prefix(&mut builder, (line == 0).then_some(1));
        builder.put_str(text, ComponentType::Placeholder);
        if line == 0 && self.focused {
            builder.put(' ', ComponentType::Cursor);
        }
        builder.finish(ComponentType::Text)
    }

    fn end_of_buffer_row(&self) -> RenderedRow {
        let mut builder = RowBuilder::new(self.viewport.width());
        self.prefix(&mut builder, None);
        builder.put(self.config.end_of_buffer_char, ComponentType::EndOfBuffer);
        builder.finish(ComponentType::EndOfBuffer)
    }

    /// 描画対象のカーソル（非フォーカス時・プレースホルダー表示時は `None`）
    fn visible_cursor(&self) -> Option<CursorPosition> {
        if !self.focused || self.show_placeholder() {
            return None;
        }
        Some(self.buffer.cursor())
    }

    /// 表示領域内のカーソル位置（列, 行）。領域外や非フォーカス時は `None`
    ///
    /// プレースホルダー表示中はその末尾に描く疑似カーソルの位置を返す。
    pub fn cursor_screen_position(&self) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }

        let y_offset = self.viewport.y_offset();
        let (line, before) = if self.show_placeholder() {
            let first = self.config.placeholder.split('\n').next().unwrap_or("");
            (0, first.chars().map(cell_width).sum::<usize>())
        } else {
            let cursor = self.buffer.cursor();
            let before = self
                .buffer
                .line(cursor.line)
                .unwrap_or(&[])
                .iter()
                .take(cursor.column)
                .map(|ch| cell_width(*ch))
                .sum::<usize>();
            (cursor.line, before)
        };

        if line < y_offset {
            return None;
        }
        let row = line - y_offset;
        if row >= self.viewport.height() {
            return None;
        }

        let column = self.prefix_width() + before;
        if column >= self.viewport.width() {
            return None;
        }

        Some((u16::try_from(column).ok()?, u16::try_from(row).ok()?))
    }

    /// ratatui向けのスタイル付き行
    pub fn render_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.rows()
            .into_iter()
            .map(|row| {
                Line::from(
                    row.segments
                        .into_iter()
                        .map(|s| Span::styled(s.text, theme.style(s.component)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    /// ANSIエスケープ付きの文字列
    pub fn render(&self, theme: &Theme) -> String {
        self.rows()
            .iter()
            .map(|row| {
                row.segments
                    .iter()
                    .map(|s| theme.paint(&s.text, theme.style(s.component)))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// スタイルなしの文字列
    pub fn render_plain(&self) -> String {
        self.rows()
            .iter()
            .map(RenderedRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// ratatuiのフレームへ描画するためのウィジェット
pub struct TextAreaWidget<'a> {
    renderer: TextAreaRenderer<'a>,
    theme: &'a Theme,
}

impl<'a> TextAreaWidget<'a> {
    pub fn new(renderer: TextAreaRenderer<'a>, theme: &'a Theme) -> Self {
        Self { renderer, theme }
    }
}

impl Widget for TextAreaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (idx, line) in self.renderer.render_lines(self.theme).iter().enumerate() {
            let Ok(offset) = u16::try_from(idx) else {
                break;
            };
            if offset >= area.height {
                break;
            }
            buf.set_line(area.x, area.y + offset, line, area.width);
        }
    }
}
