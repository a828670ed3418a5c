//! End-to-end frame composition from an editor model.

use core_model::EditorModel;
use core_render::{compose_frame, text_height};
use core_state::{EditorState, Mode};
use core_text::{Buffer, Position};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn model(text: &str) -> EditorModel {
    EditorModel::new(EditorState::new(Buffer::from_str(text), "notes.txt"))
}

fn rows(frame: &core_render::Frame) -> Vec<&str> {
    frame.rows.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn full_layout_with_gutter_separator_and_status() {
    let mut m = model("alpha\nbeta");
    m.view_mut().cursor = Position::new(1, 2);
    let view = m.render_view(text_height(6));
    let frame = compose_frame(&view, 12, 6);
    assert_eq!(
        rows(&frame),
        vec![
            "1| alpha",
            "2| beta",
            "",
            "────────────",
            " [ notes.txt",
            "",
        ]
    );
    assert!(frame.rows[3].bold);
    assert_eq!(frame.cursor, (5, 1));
}

#[test]
fn status_row_reports_position() {
    let mut m = model("a\nb\nc");
    m.view_mut().cursor = Position::new(2, 0);
    let view = m.render_view(text_height(8));
    let frame = compose_frame(&view, 40, 8);
    assert_eq!(frame.row_text(6), Some(" [ notes.txt ] 3/3 "));
}

#[test]
fn gutter_is_right_aligned_to_total_line_count() {
    let text = (1..=12).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
    let mut m = model(&text);
    m.view_mut().cursor = Position::new(11, 0);
    let view = m.render_view(text_height(6));
    let frame = compose_frame(&view, 20, 6);
    assert_eq!(frame.row_text(0), Some("10| 10"));
    assert_eq!(frame.row_text(2), Some("12| 12"));
    assert_eq!(frame.cursor, (4, 2));

    let mut m = model(&text);
    let view = m.render_view(text_height(6));
    let frame = compose_frame(&view, 20, 6);
    assert_eq!(frame.row_text(0), Some(" 1| 1"));
}

#[test]
fn cursor_column_counts_characters_not_bytes() {
    let mut m = model("héllo");
    m.view_mut().cursor = Position::new(0, "hél".len());
    let view = m.render_view(text_height(5));
    let frame = compose_frame(&view, 20, 5);
    assert_eq!(frame.cursor, (3 + 3, 0));
}

#[test]
fn command_prompt_takes_last_row_and_cursor() {
    let mut m = model("abc");
    m.state_mut().mode = Mode::Command;
    m.state_mut().command_line.push_char('w');
    m.state_mut().command_line.push_char('q');
    let view = m.render_view(text_height(5));
    let frame = compose_frame(&view, 20, 5);
    assert_eq!(frame.row_text(4), Some(":wq"));
    assert_eq!(frame.cursor, (3, 4));
}

proptest! {
    #[test]
    fn cursor_always_on_screen(
        count in 1usize..60,
        row in 0usize..60,
        width in 1u16..80,
        height in 1u16..40,
    ) {
        let text = vec!["line"; count].join("\n");
        let mut m = model(&text);
        m.view_mut().cursor = Position::new(row.min(count - 1), 0);
        let view = m.render_view(text_height(height));
        let frame = compose_frame(&view, width, height);
        prop_assert!(frame.rows.len() <= usize::from(height));
        prop_assert!(frame.cursor.0 < width.max(1));
        prop_assert!(frame.cursor.1 < height.max(1));
    }
}
