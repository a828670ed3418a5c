#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, dispatch, translate_key};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Buffer;
use std::path::PathBuf;

pub fn model(text: &str) -> EditorModel {
    model_at(text, "t.txt")
}

pub fn model_at(text: &str, path: impl Into<PathBuf>) -> EditorModel {
    EditorModel::new(EditorState::new(Buffer::from_str(text), path))
}

pub fn kc(c: char) -> KeyEvent {
    KeyEvent::plain(KeyCode::Char(c))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::plain(code)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL)
}

/// Translate and dispatch one key. Keys with no action yield a clean result.
pub fn press(model: &mut EditorModel, key: KeyEvent) -> DispatchResult {
    match translate_key(model.state().mode, &key) {
        Some(action) => dispatch(action, model),
        None => DispatchResult::clean(),
    }
}

/// Feed keys in order, stopping at the first quit. Returns true if a quit was
/// requested.
pub fn feed(model: &mut EditorModel, keys: &[KeyEvent]) -> bool {
    keys.iter().any(|k| press(model, *k).quit)
}

pub fn type_str(model: &mut EditorModel, s: &str) {
    for c in s.chars() {
        press(model, kc(c));
    }
}

pub fn lines(model: &EditorModel) -> Vec<String> {
    model
        .state()
        .buffer()
        .lines()
        .iter()
        .map(|l| l.to_string_lossy().into_owned())
        .collect()
}
