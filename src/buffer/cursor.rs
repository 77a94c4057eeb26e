//! カーソル位置管理
//!
//! テキストバッファ内でのカーソル位置（行・列）を表現する

/// カーソル位置を表現する構造体
///
/// 列は文字（Unicodeスカラー値）単位で数え、行末の一つ後ろ（行長と等しい値）も有効な位置とする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CursorPosition {
    /// 行番号（0ベース）
    pub line: usize,
    /// 列番号（0ベース、文字単位）
    pub column: usize,
}

impl CursorPosition {
    /// 新しいカーソル位置を作成（原点に配置）
    pub fn new() -> Self {
        Self { line: 0, column: 0 }
    }

    /// 指定された位置にカーソルを作成
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 原点かどうか
    pub fn is_origin(&self) -> bool {
        self.line == 0 && self.column == 0
    }

    /// `(行, 列)` のタプルに変換
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl From<(usize, usize)> for CursorPosition {
    fn from((line, column): (usize, usize)) -> Self {
        Self::at(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_creation() {
        let cursor = CursorPosition::new();
        assert_eq!(cursor.line, 0);
        assert_eq!(cursor.column, 0);
        assert!(cursor.is_origin());
    }

    #[test]
    fn test_cursor_ordering() {
        assert!(CursorPosition::at(0, 9) < CursorPosition::at(1, 0));
        assert!(CursorPosition::at(2, 1) > CursorPosition::at(2, 0));
        assert_eq!(CursorPosition::from((3, 4)).as_tuple(), (3, 4));
    }
}
