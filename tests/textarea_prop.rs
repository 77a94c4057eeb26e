//! TextArea property tests
//!
//! Random edit/navigation sequences against the public API. Each case checks the
//! invariants hosts rely on: the value survives a set/get cycle, the cursor stays
//! inside the buffer, and the viewport keeps the cursor row visible.

use altre_textarea::buffer::{navigation, CursorPosition, TextBuffer};
use altre_textarea::ui::renderer::cell_width;
use altre_textarea::{Action, TextArea, TextAreaConfig};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn multiline_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => any::<char>().prop_filter("no newline", |c| *c != '\n'),
            1 => Just('\n'),
            1 => Just(' '),
            1 => prop_oneof![Just('\t'), Just('\u{1b}'), Just('\u{7f}'), Just('\u{0}'), Just('\u{9b}')],
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::CharacterForward),
        Just(Action::CharacterBackward),
        Just(Action::WordForward),
        Just(Action::WordBackward),
        Just(Action::LineNext),
        Just(Action::LinePrevious),
        Just(Action::LineStart),
        Just(Action::LineEnd),
        Just(Action::InputBegin),
        Just(Action::InputEnd),
        Just(Action::DeleteCharacterBackward),
        Just(Action::DeleteCharacterForward),
        Just(Action::DeleteWordBackward),
        Just(Action::DeleteWordForward),
        Just(Action::DeleteAfterCursor),
        Just(Action::DeleteBeforeCursor),
        Just(Action::InsertNewline),
        proptest::char::range('a', 'z').prop_map(Action::InsertChar),
        Just(Action::InsertChar(' ')),
    ]
}

fn assert_cursor_in_bounds(textarea: &TextArea) {
    let (line, column) = textarea.cursor();
    let buffer = textarea.buffer();
    assert!(line < buffer.line_count(), "line {} out of {}", line, buffer.line_count());
    let len = buffer.line(line).map(|l| l.len()).unwrap_or(0);
    assert!(column <= len, "column {} past line length {}", column, len);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn set_value_round_trips(text in multiline_text()) {
        let mut buffer = TextBuffer::new();
        buffer.set_value(&text);
        prop_assert_eq!(buffer.value(), text.clone());
        prop_assert_eq!(buffer.line_count(), text.matches('\n').count() + 1);
        prop_assert_eq!(buffer.length(), text.chars().count());
    }

    #[test]
    fn insert_then_backspace_restores_state(
        text in multiline_text(),
        line in 0usize..16,
        column in 0usize..32,
        ch in any::<char>(),
    ) {
        let mut buffer = TextBuffer::new();
        buffer.set_value(&text);
        buffer.set_cursor(CursorPosition::at(line, column));
        let before_cursor = buffer.cursor();

        buffer.insert_char(ch);
        buffer.delete_char_backward();

        prop_assert_eq!(buffer.value(), text);
        prop_assert_eq!(buffer.cursor(), before_cursor);
    }

    #[test]
    fn actions_keep_cursor_and_viewport_consistent(
        text in multiline_text(),
        height in 1usize..6,
        actions in proptest::collection::vec(action_strategy(), 0..40),
    ) {
        let mut textarea = TextArea::new(30, height, TextAreaConfig::default());
        textarea.focus();
        textarea.set_value(&text);

        for action in actions {
            textarea.execute(action);
            assert_cursor_in_bounds(&textarea);

            let viewport = textarea.viewport();
            let (line, _) = textarea.cursor();
            prop_assert!(viewport.y_offset() <= viewport.max_offset());
            prop_assert!(viewport.visible_range().contains(&line));
        }
    }

    #[test]
    fn limits_are_never_exceeded(
        text in multiline_text(),
        char_limit in 1usize..20,
        max_height in 1usize..4,
    ) {
        let config = TextAreaConfig::new().with_char_limit(char_limit).with_max_height(max_height);
        let mut textarea = TextArea::new(30, 4, config);
        textarea.insert_str(&text);
        textarea.insert_str(&text);

        prop_assert!(textarea.length() <= char_limit);
        prop_assert!(textarea.line_count() <= max_height);
        assert_cursor_in_bounds(&textarea);
    }

    #[test]
    fn word_moves_at_extremes_are_noops(text in multiline_text()) {
        let mut buffer = TextBuffer::new();
        buffer.set_value(&text);
        let lines = buffer.lines();

        let origin = CursorPosition::new();
        prop_assert_eq!(navigation::word_left(lines, origin), origin);

        let end = navigation::input_end(lines, origin);
        prop_assert_eq!(navigation::word_right(lines, end), end);
    }

    #[test]
    fn render_is_always_fixed_size(
        text in multiline_text(),
        width in 0usize..24,
        height in 0usize..6,
    ) {
        let mut textarea = TextArea::new(width, height, TextAreaConfig::default());
        textarea.focus();
        textarea.set_value(&text);
        textarea.execute(Action::InputEnd);

        let plain = textarea.render_plain();
        if height == 0 {
            prop_assert_eq!(plain, "");
        } else {
            let rows: Vec<&str> = plain.split('\n').collect();
            prop_assert_eq!(rows.len(), height);
            for row in rows {
                prop_assert!(!row.chars().any(char::is_control), "raw control char in {:?}", row);
                prop_assert_eq!(row.chars().map(cell_width).sum::<usize>(), width);
            }
        }
    }
}
