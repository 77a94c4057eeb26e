//! ビューポート管理
//!
//! 描画済みバッファに対する縦方向のスクロール窓（表示開始行と表示行数）を管理する。
//! 不変条件: `0 <= y_offset <= max(0, total_rows - height)`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportManager {
    /// 表示の開始行
    y_offset: usize,
    /// 表示可能な列数
    width: usize,
    /// 表示可能な行数
    height: usize,
    /// 内容の総行数
    total_rows: usize,
}

impl ViewportManager {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            y_offset: 0,
            width,
            height,
            total_rows: 1,
        }
    }

    /// ビューポートの寸法を更新（表示開始行は動かさない）
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// 内容の総行数を更新
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
    }

    /// スクロール可能な最大の開始行
    pub fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height)
    }

    /// 上方向へ `n` 行スクロール
    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n).min(self.max_offset());
    }

    /// 下方向へ `n` 行スクロール
    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_add(n).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_offset()
    }

    /// カーソル行が画面内に収まるようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn scroll_to_cursor(&mut self, cursor_row: usize) -> bool {
        let before = self.y_offset;
        if self.height > 0 {
            if cursor_row < self.y_offset {
                self.y_offset = cursor_row;
            } else if cursor_row > self.y_offset + self.height - 1 {
                self.y_offset = cursor_row + 1 - self.height;
            }
        }
        self.y_offset = self.y_offset.min(self.max_offset());
        self.y_offset != before
    }

    /// 表示中の行範囲（終端は含まない）
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.y_offset + self.height).min(self.total_rows);
        self.y_offset..end.max(self.y_offset)
    }

    /// スクロール位置の割合（0.0〜1.0）
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            1.0
        } else {
            self.y_offset as f64 / max as f64
        }
    }

    /// 現在の表示開始行を取得
    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    /// 表示領域の幅を取得
    pub fn width(&self) -> usize {
        self.width
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(height: usize, rows: usize) -> ViewportManager {
        let mut viewport = ViewportManager::new(80, height);
        viewport.set_total_rows(rows);
        viewport
    }

    #[test]
    fn test_scroll_to_cursor_scrolls_down_minimally() {
        let mut viewport = make(3, 10);
        assert!(viewport.scroll_to_cursor(9));
        assert_eq!(viewport.y_offset(), 7);
        assert!(viewport.at_bottom());
    }

    #[test]
    fn test_scroll_to_cursor_scrolls_up() {
        let mut viewport = make(4, 20);
        viewport.scroll_down(10);
        assert!(viewport.scroll_to_cursor(2));
        assert_eq!(viewport.y_offset(), 2);
        assert!(!viewport.scroll_to_cursor(4));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewport = make(5, 8);
        viewport.scroll_down(100);
        assert_eq!(viewport.y_offset(), 3);
        viewport.scroll_up(100);
        assert!(viewport.at_top());

        let mut short = make(5, 2);
        short.scroll_down(1);
        assert_eq!(short.y_offset(), 0);
        assert!(short.at_top() && short.at_bottom());
    }

    #[test]
    fn test_set_size_keeps_offset() {
        let mut viewport = make(2, 10);
        viewport.goto_bottom();
        viewport.set_size(40, 6);
        assert_eq!(viewport.y_offset(), 8);
        // 次の同期でクランプされる
        viewport.scroll_to_cursor(9);
        assert_eq!(viewport.y_offset(), 4);
    }

    #[test]
    fn test_zero_height_never_panics() {
        let mut viewport = make(0, 3);
        viewport.scroll_to_cursor(2);
        assert_eq!(viewport.visible_range(), 0..0);
    }

    #[test]
    fn test_visible_range_and_percent() {
        let mut viewport = make(4, 10);
        assert_eq!(viewport.visible_range(), 0..4);
        viewport.goto_bottom();
        assert_eq!(viewport.visible_range(), 6..10);
        assert!((viewport.scroll_percent() - 1.0).abs() < f64::EPSILON);
    }
}
