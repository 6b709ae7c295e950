//! Shared focus, stacking, and screen registry
//!
//! The `Document` is the one piece of state widgets share: who holds input
//! focus, how widgets stack front to back, which widgets want to hear about
//! activations outside their bounds, and the screen buffer they draw into.
//! It is always passed explicitly; widget operations are functions of the
//! widget state plus the document, never of ambient globals.

use std::collections::HashMap;

use log::{debug, warn};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

/// Identifies one registered widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

/// Focus, z-order, click-out watches, and the shared screen
#[derive(Debug)]
pub struct Document {
    screen: Buffer,
    next_id: u64,
    areas: HashMap<WidgetId, Rect>,
    /// Bottom-to-top stacking order
    stack: Vec<WidgetId>,
    focus: Option<(WidgetId, usize)>,
    click_out: Vec<WidgetId>,
}

impl Document {
    /// Create a document with a screen of the given size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Buffer::empty(Rect::new(0, 0, width, height)),
            next_id: 0,
            areas: HashMap::new(),
            stack: Vec::new(),
            focus: None,
            click_out: Vec::new(),
        }
    }

    // ==================== Screen ====================

    pub fn screen(&self) -> &Buffer {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Buffer {
        &mut self.screen
    }

    // ==================== Registration ====================

    /// Register a widget with its initial bounds; new widgets start on top
    pub fn register(&mut self, area: Rect) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.areas.insert(id, area);
        self.stack.push(id);
        debug!("document: registered widget {id:?} at {area:?}");
        id
    }

    /// Remove a widget entirely: bounds, stacking, focus, and watches
    pub fn remove(&mut self, id: WidgetId) {
        self.areas.remove(&id);
        self.stack.retain(|w| *w != id);
        self.click_out.retain(|w| *w != id);
        if self.focus.is_some_and(|(w, _)| w == id) {
            self.focus = None;
        }
        debug!("document: removed widget {id:?}");
    }

    /// Update a widget's bounds, e.g. after a disclosure transition
    pub fn update_area(&mut self, id: WidgetId, area: Rect) {
        match self.areas.get_mut(&id) {
            Some(slot) => *slot = area,
            None => warn!("document: update_area for unregistered widget {id:?}"),
        }
    }

    pub fn area_of(&self, id: WidgetId) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    // ==================== Focus ====================

    /// Hand input focus to one slot of one widget
    pub fn give_focus_to(&mut self, id: WidgetId, slot: usize) {
        if !self.areas.contains_key(&id) {
            warn!("document: focus requested for unregistered widget {id:?}");
            return;
        }
        debug!("document: focus -> widget {id:?} slot {slot}");
        self.focus = Some((id, slot));
    }

    pub fn focused(&self) -> Option<(WidgetId, usize)> {
        self.focus
    }

    // ==================== Stacking order ====================

    /// Raise a widget to the top of the stacking order
    pub fn raise_to_top(&mut self, id: WidgetId) {
        if let Some(pos) = self.stack.iter().position(|w| *w == id) {
            let widget = self.stack.remove(pos);
            self.stack.push(widget);
        } else {
            warn!("document: raise_to_top for unregistered widget {id:?}");
        }
    }

    /// Put a widget back at a previously remembered stacking position
    pub fn restore_position(&mut self, id: WidgetId, index: usize) {
        if let Some(pos) = self.stack.iter().position(|w| *w == id) {
            let widget = self.stack.remove(pos);
            self.stack.insert(index.min(self.stack.len()), widget);
        } else {
            warn!("document: restore_position for unregistered widget {id:?}");
        }
    }

    /// Current position in the stacking order, 0 being the bottom
    pub fn position_of(&self, id: WidgetId) -> Option<usize> {
        self.stack.iter().position(|w| *w == id)
    }

    /// Bottom-to-top stacking order
    pub fn stack(&self) -> &[WidgetId] {
        &self.stack
    }

    // ==================== Click-outside watches ====================

    /// Ask to be notified when an activation lands outside the widget
    pub fn watch_click_out(&mut self, id: WidgetId) {
        if !self.click_out.contains(&id) {
            self.click_out.push(id);
        }
    }

    pub fn unwatch_click_out(&mut self, id: WidgetId) {
        self.click_out.retain(|w| *w != id);
    }

    pub fn watches_click_out(&self, id: WidgetId) -> bool {
        self.click_out.contains(&id)
    }

    /// Watchers whose current bounds do not contain `pos`
    pub fn clicked_out(&self, pos: Position) -> Vec<WidgetId> {
        self.click_out
            .iter()
            .copied()
            .filter(|id| self.areas.get(id).is_none_or(|area| !area.contains(pos)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_fresh_ids_on_top() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        let b = doc.register(Rect::new(0, 2, 5, 1));
        assert_ne!(a, b);
        assert_eq!(doc.stack(), &[a, b]);
        assert_eq!(doc.position_of(b), Some(1));
    }

    #[test]
    fn test_raise_and_restore_roundtrip() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        let b = doc.register(Rect::new(0, 2, 5, 1));
        let c = doc.register(Rect::new(0, 4, 5, 1));

        doc.raise_to_top(a);
        assert_eq!(doc.stack(), &[b, c, a]);

        doc.restore_position(a, 0);
        assert_eq!(doc.stack(), &[a, b, c]);
    }

    #[test]
    fn test_restore_position_clamps_index() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        let b = doc.register(Rect::new(0, 2, 5, 1));

        doc.restore_position(a, 99);
        assert_eq!(doc.stack(), &[b, a]);
    }

    #[test]
    fn test_remove_clears_focus_and_watch() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        doc.give_focus_to(a, 0);
        doc.watch_click_out(a);

        doc.remove(a);
        assert_eq!(doc.focused(), None);
        assert!(!doc.watches_click_out(a));
        assert_eq!(doc.position_of(a), None);
        assert_eq!(doc.area_of(a), None);
    }

    #[test]
    fn test_focus_ignores_unknown_widget() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        doc.give_focus_to(a, 2);
        doc.remove(a);

        // Stale handles must not resurrect focus
        doc.give_focus_to(a, 0);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_clicked_out_respects_current_bounds() {
        let mut doc = Document::new(40, 12);
        let a = doc.register(Rect::new(0, 0, 10, 1));
        doc.watch_click_out(a);

        assert!(doc.clicked_out(Position::new(3, 0)).is_empty());
        assert_eq!(doc.clicked_out(Position::new(3, 5)), vec![a]);

        // Growing the area swallows the same click
        doc.update_area(a, Rect::new(0, 0, 10, 8));
        assert!(doc.clicked_out(Position::new(3, 5)).is_empty());
    }

    #[test]
    fn test_watch_is_idempotent() {
        let mut doc = Document::new(20, 10);
        let a = doc.register(Rect::new(0, 0, 5, 1));
        doc.watch_click_out(a);
        doc.watch_click_out(a);

        doc.unwatch_click_out(a);
        assert!(!doc.watches_click_out(a));
    }
}
