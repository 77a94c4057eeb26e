//! ナビゲーションシステム
//!
//! 行バッファ上のカーソル移動を計算する純粋関数群。
//! どの関数も `(行データ, カーソル) → 新しいカーソル` の形をとり、バッファを変更しない。

use crate::buffer::cursor::CursorPosition;
use serde::{Deserialize, Serialize};
use std::cmp::min;

/// ナビゲーション操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationAction {
    CharForward,
    CharBackward,
    WordForward,
    WordBackward,
    LineNext,
    LinePrevious,
    LineStart,
    LineEnd,
    InputBegin,
    InputEnd,
}

/// 単語境界の判定に使う空白判定
///
/// ロケールを考慮しない汎用の空白判定で、句読点は単語の一部として扱う。
pub fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace()
}

/// アクションに応じて新しいカーソル位置を計算
pub fn navigate(lines: &[Vec<char>], cursor: CursorPosition, action: NavigationAction) -> CursorPosition {
    let cursor = clamp(lines, cursor);
    match action {
        NavigationAction::CharForward => char_right(lines, cursor),
        NavigationAction::CharBackward => char_left(lines, cursor),
        NavigationAction::WordForward => word_right(lines, cursor),
        NavigationAction::WordBackward => word_left(lines, cursor),
        NavigationAction::LineNext => line_down(lines, cursor),
        NavigationAction::LinePrevious => line_up(lines, cursor),
        NavigationAction::LineStart => line_start(lines, cursor),
        NavigationAction::LineEnd => line_end(lines, cursor),
        NavigationAction::InputBegin => input_begin(lines, cursor),
        NavigationAction::InputEnd => input_end(lines, cursor),
    }
}

/// カーソルを有効範囲内に収める
pub fn clamp(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    if lines.is_empty() {
        return CursorPosition::new();
    }
    let line = min(cursor.line, lines.len() - 1);
    let column = min(cursor.column, lines[line].len());
    CursorPosition::at(line, column)
}

fn line_len(lines: &[Vec<char>], line: usize) -> usize {
    lines.get(line).map(Vec::len).unwrap_or(0)
}

/// 1文字右へ。行末では次の行の先頭へ折り返す
pub fn char_right(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    if cursor.column < line_len(lines, cursor.line) {
        CursorPosition::at(cursor.line, cursor.column + 1)
    } else if cursor.line + 1 < lines.len() {
        CursorPosition::at(cursor.line + 1, 0)
    } else {
        cursor
    }
}

/// 1文字左へ。行頭では前の行の末尾へ折り返す
pub fn char_left(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    if cursor.column > 0 {
        CursorPosition::at(cursor.line, cursor.column - 1)
    } else if cursor.line > 0 {
        let prev = cursor.line - 1;
        CursorPosition::at(prev, line_len(lines, prev))
    } else {
        cursor
    }
}

/// 次の行へ。列は移動先の行長で毎回クランプし直す（仮想列は保持しない）
pub fn line_down(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    if cursor.line + 1 >= lines.len() {
        return cursor;
    }
    let target = cursor.line + 1;
    CursorPosition::at(target, min(cursor.column, line_len(lines, target)))
}

/// 前の行へ
pub fn line_up(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    if cursor.line == 0 {
        return cursor;
    }
    let target = cursor.line - 1;
    CursorPosition::at(target, min(cursor.column, line_len(lines, target)))
}

/// 空白の連続、続いて非空白の連続を右へ飛ばす。行境界は越えない
pub fn word_right(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    let Some(line) = lines.get(cursor.line) else {
        return cursor;
    };
    let mut col = cursor.column;
    while col < line.len() && is_word_separator(line[col]) {
        col += 1;
    }
    while col < line.len() && !is_word_separator(line[col]) {
        col += 1;
    }
    CursorPosition::at(cursor.line, col)
}

/// 空白の連続、続いて非空白の連続を左へ飛ばす。行境界は越えない
pub fn word_left(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    let Some(line) = lines.get(cursor.line) else {
        return cursor;
    };
    let mut col = min(cursor.column, line.len());
    while col > 0 && is_word_separator(line[col - 1]) {
        col -= 1;
    }
    while col > 0 && !is_word_separator(line[col - 1]) {
        col -= 1;
    }
    CursorPosition::at(cursor.line, col)
}

pub fn line_start(_lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    CursorPosition::at(cursor.line, 0)
}

pub fn line_end(lines: &[Vec<char>], cursor: CursorPosition) -> CursorPosition {
    CursorPosition::at(cursor.line, line_len(lines, cursor.line))
}

pub fn input_begin(_lines: &[Vec<char>], _cursor: CursorPosition) -> CursorPosition {
    CursorPosition::new()
}

pub fn input_end(lines: &[Vec<char>], _cursor: CursorPosition) -> CursorPosition {
    let last = lines.len().saturating_sub(1);
    CursorPosition::at(last, line_len(lines, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<Vec<char>> {
        text.split('\n').map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn char_movement_wraps_across_lines() {
        let text = lines("Hello\nWorld");
        let end_of_first = CursorPosition::at(0, 5);
        assert_eq!(char_right(&text, end_of_first), CursorPosition::at(1, 0));
        assert_eq!(char_left(&text, CursorPosition::at(1, 0)), end_of_first);
    }

    #[test]
    fn char_movement_stops_at_buffer_bounds() {
        let text = lines("ab");
        assert_eq!(char_left(&text, CursorPosition::new()), CursorPosition::new());
        assert_eq!(char_right(&text, CursorPosition::at(0, 2)), CursorPosition::at(0, 2));
    }

    #[test]
    fn line_navigation_reclamps_every_move() {
        let text = lines("Longer line\nab\nAnother long line");
        let start = CursorPosition::at(0, 8);
        let down = line_down(&text, start);
        assert_eq!(down, CursorPosition::at(1, 2));
        // 仮想列は保持しないので、短い行を経由すると列は2のまま
        assert_eq!(line_down(&text, down), CursorPosition::at(2, 2));
        assert_eq!(line_up(&text, CursorPosition::new()), CursorPosition::new());
        assert_eq!(line_down(&text, CursorPosition::at(2, 3)), CursorPosition::at(2, 3));
    }

    #[test]
    fn word_movement_skips_space_then_word() {
        let text = lines("foo  bar.baz qux");
        let after_foo = word_right(&text, CursorPosition::new());
        assert_eq!(after_foo, CursorPosition::at(0, 3));
        // 句読点は単語の一部
        assert_eq!(word_right(&text, after_foo), CursorPosition::at(0, 12));
        assert_eq!(word_left(&text, CursorPosition::at(0, 12)), CursorPosition::at(0, 5));
    }

    #[test]
    fn word_movement_never_crosses_lines() {
        let text = lines("foo\nbar");
        assert_eq!(word_right(&text, CursorPosition::at(0, 3)), CursorPosition::at(0, 3));
        assert_eq!(word_left(&text, CursorPosition::at(1, 0)), CursorPosition::at(1, 0));
    }

    #[test]
    fn word_movement_is_idempotent_at_bounds() {
        let text = lines("one two\nthree");
        assert_eq!(word_left(&text, CursorPosition::new()), CursorPosition::new());
        let end = input_end(&text, CursorPosition::new());
        assert_eq!(word_right(&text, end), end);
    }

    #[test]
    fn jumps_and_clamp() {
        let text = lines("abc\nde");
        assert_eq!(navigate(&text, CursorPosition::at(0, 2), NavigationAction::LineStart), CursorPosition::at(0, 0));
        assert_eq!(navigate(&text, CursorPosition::at(0, 1), NavigationAction::LineEnd), CursorPosition::at(0, 3));
        assert_eq!(navigate(&text, CursorPosition::at(1, 1), NavigationAction::InputBegin), CursorPosition::new());
        assert_eq!(navigate(&text, CursorPosition::new(), NavigationAction::InputEnd), CursorPosition::at(1, 2));
        assert_eq!(clamp(&text, CursorPosition::at(50, 10)), CursorPosition::at(1, 2));
    }
}
