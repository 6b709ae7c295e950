//! Terminal input decoding for select lists
//!
//! Translates crossterm key and mouse events into controller calls. This
//! is the only fallible seam in the crate: polling the terminal is IO,
//! everything downstream is infallible state manipulation.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event as TermEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::document::Document;
use crate::select_list::SelectList;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Poll for one terminal event and dispatch it. Returns whether the widget
/// handled anything, a hint to the embedder that the screen changed.
pub fn handle_events<V: Clone + PartialEq>(
    list: &mut SelectList<V>,
    doc: &mut Document,
) -> Result<bool> {
    if !event::poll(POLL_TIMEOUT)? {
        return Ok(false);
    }
    Ok(match event::read()? {
        TermEvent::Key(key) => handle_key(list, doc, key),
        TermEvent::Mouse(mouse) => handle_mouse(list, doc, mouse),
        _ => false,
    })
}

/// Keyboard dispatch: Enter activates the focused slot, Up/Down or k/j
/// walk focus while open, Esc collapses
pub fn handle_key<V: Clone + PartialEq>(
    list: &mut SelectList<V>,
    doc: &mut Document,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Enter => {
            if let Some((id, slot)) = doc.focused()
                && id == list.id()
            {
                list.on_slot_submit(doc, slot);
                return true;
            }
            false
        }
        KeyCode::Esc if list.show() => {
            list.toggle(doc, Some(false), false);
            true
        }
        KeyCode::Down | KeyCode::Char('j') if list.show() => {
            list.focus_next(doc);
            true
        }
        KeyCode::Up | KeyCode::Char('k') if list.show() => {
            list.focus_prev(doc);
            true
        }
        _ => false,
    }
}

/// Mouse dispatch: a left press activates the slot under the cursor or,
/// when it lands outside a watching widget, the click-outside path; the
/// wheel walks pages while open
pub fn handle_mouse<V: Clone + PartialEq>(
    list: &mut SelectList<V>,
    doc: &mut Document,
    mouse: MouseEvent,
) -> bool {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(slot) = list.slot_at(pos) {
                list.on_slot_submit(doc, slot);
                true
            } else if doc.clicked_out(pos).contains(&list.id()) {
                list.on_click_out(doc);
                true
            } else {
                false
            }
        }
        MouseEventKind::ScrollUp if list.show() => {
            list.previous_page(doc);
            true
        }
        MouseEventKind::ScrollDown if list.show() => {
            list.next_page(doc);
            true
        }
        _ => false,
    }
}
