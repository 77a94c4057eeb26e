//! 行指向テキストバッファ
//!
//! 文字（Unicodeスカラー値）単位でインデックスされる複数行テキストとカーソルを保持し、
//! 挿入・削除の編集操作を提供する。
//!
//! どの操作もエラーを返さない。範囲外の要求はクランプし、文字数・行数制限を超える挿入は
//! 残り容量まで黙って切り詰める。

use crate::buffer::cursor::CursorPosition;
use crate::buffer::navigation::{self, is_word_separator};

/// 複数行テキストバッファ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    /// 行データ（常に1行以上）
    lines: Vec<Vec<char>>,
    /// カーソル位置
    cursor: CursorPosition,
    /// 最大文字数（0は無制限、改行も1文字と数える）
    char_limit: usize,
    /// 最大行数（0は無制限）
    max_height: usize,
}

impl TextBuffer {
    /// 空のバッファを作成（制限なし）
    pub fn new() -> Self {
        Self::with_limits(0, 0)
    }

    /// 文字数・行数制限付きでバッファを作成
    pub fn with_limits(char_limit: usize, max_height: usize) -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor: CursorPosition::new(),
            char_limit,
            max_height,
        }
    }

    /// 制限を更新する。既存の内容は切り詰めない
    pub fn set_limits(&mut self, char_limit: usize, max_height: usize) {
        self.char_limit = char_limit;
        self.max_height = max_height;
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// 内容を全て置き換え、カーソルを原点に戻す
    pub fn set_value(&mut self, value: &str) {
        self.reset();
        self.insert_str(value);
        self.cursor = CursorPosition::new();
    }

    /// 行を `\n` で連結した内容を取得
    pub fn value(&self) -> String {
        let mut out = String::with_capacity(self.length());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    /// 空の1行に戻す
    pub fn reset(&mut self) {
        self.lines = vec![Vec::new()];
        self.cursor = CursorPosition::new();
    }

    /// 文字数（行間の暗黙の改行を含む）
    pub fn length(&self) -> usize {
        let chars: usize = self.lines.iter().map(Vec::len).sum();
        chars + self.lines.len() - 1
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// バッファが空（1行・0文字）かどうか
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// 指定行の文字列を取得
    pub fn line(&self, index: usize) -> Option<&[char]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    /// 全行への参照
    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// カーソルを設定（範囲外はクランプ）
    pub fn set_cursor(&mut self, position: CursorPosition) {
        self.cursor = navigation::clamp(&self.lines, position);
    }

    /// 文字列をカーソル位置に挿入
    ///
    /// 最初の区間は現在行のカーソル位置へ挿入し、元の行の残り（テール）は最後に挿入した
    /// 区間の後ろへ付け直す。カーソルは挿入したテキストの末尾に移動する。
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let mut chars: Vec<char> = text.chars().collect();
        if self.char_limit > 0 {
            let available = self.char_limit.saturating_sub(self.length());
            if available == 0 {
                log::debug!("insert dropped: char limit {} reached", self.char_limit);
                return;
            }
            if chars.len() > available {
                log::debug!("insert truncated from {} to {} chars", chars.len(), available);
                chars.truncate(available);
            }
        }

        let mut segments: Vec<Vec<char>> = chars.split(|ch| *ch == '\n').map(<[char]>::to_vec).collect();
        if self.max_height > 0 {
            let allowed = self.max_height.saturating_sub(self.lines.len()) + 1;
            if segments.len() > allowed {
                log::debug!("insert truncated from {} to {} rows", segments.len(), allowed);
                segments.truncate(allowed);
            }
        }

        let row = self.cursor.line;
        let tail = self.lines[row].split_off(self.cursor.column);
        let mut segments = segments.into_iter();
        if let Some(first) = segments.next() {
            self.lines[row].extend(first);
        }

        let rest: Vec<Vec<char>> = segments.collect();
        let last_row = row + rest.len();
        self.lines.splice(row + 1..row + 1, rest);

        let column = self.lines[last_row].len();
        self.lines[last_row].extend(tail);
        self.cursor = CursorPosition::at(last_row, column);
    }

    /// 1文字挿入
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// 改行を挿入（行数制限に達している場合は何もしない）
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// カーソル前の1文字を削除
    ///
    /// 行頭では現在行を前の行へ連結し、`'\n'` を返す。
    pub fn delete_char_backward(&mut self) -> Option<char> {
        let CursorPosition { line, column } = self.cursor;
        if column > 0 {
            let removed = self.lines[line].remove(column - 1);
            self.cursor.column -= 1;
            Some(removed)
        } else if line > 0 {
            let current = self.lines.remove(line);
            let join = self.lines[line - 1].len();
            self.lines[line - 1].extend(current);
            self.cursor = CursorPosition::at(line - 1, join);
            Some('\n')
        } else {
            None
        }
    }

    /// カーソル後の1文字を削除
    ///
    /// 行末では次の行を現在行へ連結し、`'\n'` を返す。カーソルは動かない。
    pub fn delete_char_forward(&mut self) -> Option<char> {
        let CursorPosition { line, column } = self.cursor;
        if column < self.lines[line].len() {
            Some(self.lines[line].remove(column))
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].extend(next);
            Some('\n')
        } else {
            None
        }
    }

    /// カーソル前の単語を削除し、削除した文字列を返す
    ///
    /// 直前に空白の連続があればそれだけを、なければ非空白の連続を削除する。行境界は越えない。
    pub fn delete_word_backward(&mut self) -> String {
        let CursorPosition { line, column } = self.cursor;
        let chars = &self.lines[line];

        let mut start = column;
        while start > 0 && is_word_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == column {
            while start > 0 && !is_word_separator(chars[start - 1]) {
                start -= 1;
            }
        }

        self.cursor.column = start;
        self.lines[line].drain(start..column).collect()
    }

    /// カーソル後の単語を削除し、削除した文字列を返す
    pub fn delete_word_forward(&mut self) -> String {
        let CursorPosition { line, column } = self.cursor;
        let chars = &self.lines[line];

        let mut end = column;
        while end < chars.len() && is_word_separator(chars[end]) {
            end += 1;
        }
        if end == column {
            while end < chars.len() && !is_word_separator(chars[end]) {
                end += 1;
            }
        }

        self.lines[line].drain(column..end).collect()
    }

    /// カーソルから行末までを削除（行は連結しない）
    pub fn delete_to_line_end(&mut self) -> String {
        let CursorPosition { line, column } = self.cursor;
        self.lines[line].split_off(column).into_iter().collect()
    }

    /// 行頭からカーソルまでを削除
    pub fn delete_to_line_start(&mut self) -> String {
        let CursorPosition { line, column } = self.cursor;
        self.cursor.column = 0;
        self.lines[line].drain(..column).collect()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
