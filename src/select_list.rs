//! Collapsible single-selection dropdown
//!
//! The select list composes an [`ItemGrid`]: grid slot 0 is the always
//! visible master control showing the current selection with a disclosure
//! glyph, the remaining slots are the selectable items, hidden while the
//! widget is collapsed. Expanding raises the widget to the top of the
//! document's stacking order; collapsing restores its construction-time
//! position. Activating an ordinary item commits its value, refits the
//! master label, collapses, and publishes a [`Event::Submit`].

use log::{debug, warn};
use ratatui::layout::{Position, Rect};

use crate::document::{Document, WidgetId};
use crate::events::{Emitter, Event, EventKind, HandlerId};
use crate::grid::{
    DEFAULT_PAGE_MAX_HEIGHT, GridOptions, ItemDef, ItemGrid, MasterDef, Role, Selection,
    SeparatorDef,
};
use crate::markup;
use crate::style::MenuStyle;


const DEFAULT_MASTER_CONTENT: &str = "select-list";
const DEFAULT_MASTER_SYMBOL: &str = "▼";
const DEFAULT_SEPARATOR_CONTENT: &str = "-";

/// Partial override for the master template; unset fields keep defaults
#[derive(Debug, Clone, Default)]
pub struct MasterOverride {
    pub content: Option<String>,
    pub symbol: Option<String>,
}

/// Partial override for the separator template
#[derive(Debug, Clone, Default)]
pub struct SeparatorOverride {
    pub content: Option<String>,
    pub repeat: Option<bool>,
}

/// Construction options; unset parts are normalized to defaults
#[derive(Debug, Clone)]
pub struct SelectListOptions<V> {
    /// Item list in display order, separators included
    pub items: Vec<ItemDef<V>>,
    /// Partial master template override
    pub master: Option<MasterOverride>,
    /// Partial separator template override
    pub separator: Option<SeparatorOverride>,
    /// Shorthand for overriding the master content only
    pub content: Option<String>,
    /// Initial selection, committed when a matching item exists
    pub value: Option<V>,
    /// Initial disclosure state
    pub show: bool,
    /// Suppress the construction-time draw and focus handoff
    pub no_draw: bool,
    /// Top-left corner on the document screen
    pub position: Position,
    /// Override for the computed button width
    pub width: Option<u16>,
    /// Max rows per page, master row included; floored at 4
    pub page_max_height: u16,
    pub style: MenuStyle,
}

impl<V> Default for SelectListOptions<V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            master: None,
            separator: None,
            content: None,
            value: None,
            show: false,
            no_draw: false,
            position: Position::new(0, 0),
            width: None,
            page_max_height: DEFAULT_PAGE_MAX_HEIGHT,
            style: MenuStyle::default(),
        }
    }
}

fn default_master<V>() -> MasterDef<V> {
    MasterDef {
        content: DEFAULT_MASTER_CONTENT.to_string(),
        symbol: DEFAULT_MASTER_SYMBOL.to_string(),
        width: 0,
        value: None,
        content_has_markup: false,
        role: Role::Toggle,
    }
}

fn default_separator() -> SeparatorDef {
    SeparatorDef {
        content: DEFAULT_SEPARATOR_CONTENT.to_string(),
        repeat: true,
        role: Role::Separator,
    }
}

/// Collapsible single-selection dropdown widget
#[derive(Debug)]
pub struct SelectList<V> {
    id: WidgetId,
    grid: ItemGrid<V>,
    /// Currently selected value, `None` until a selection commits
    value: Option<V>,
    /// Disclosure state
    show: bool,
    /// Rows the widget currently occupies and accepts clicks over
    output_height: u16,
    /// Construction-time stacking position, restored on collapse
    z_ref: usize,
    position: Position,
    emitter: Emitter<V>,
}

impl<V: Clone + PartialEq> SelectList<V> {
    /// Build the widget, register it with the document, apply the initial
    /// selection and disclosure state, and draw unless suppressed.
    pub fn new(doc: &mut Document, options: SelectListOptions<V>) -> Self {
        let SelectListOptions {
            items,
            master,
            separator,
            content,
            value,
            show,
            no_draw,
            position,
            width,
            page_max_height,
            style,
        } = options;

        let mut master_def = default_master();
        if let Some(over) = master {
            if let Some(c) = over.content {
                master_def.content = c;
            }
            if let Some(s) = over.symbol {
                master_def.symbol = s;
            }
        }
        if let Some(c) = content {
            master_def.content = c;
        }

        let mut separator_def = default_separator();
        if let Some(over) = separator {
            if let Some(c) = over.content {
                separator_def.content = c;
            }
            if let Some(r) = over.repeat {
                separator_def.repeat = r;
            }
        }

        let grid = ItemGrid::new(
            items,
            master_def,
            separator_def,
            GridOptions {
                width,
                page_max_height,
                style,
            },
        );

        let id = doc.register(Rect::new(
            position.x,
            position.y,
            grid.buttons_max_width(),
            1,
        ));
        let z_ref = doc.position_of(id).unwrap_or(0);

        let mut list = Self {
            id,
            grid,
            value: None,
            show: false,
            output_height: 1,
            z_ref,
            position,
            emitter: Emitter::new(),
        };

        let committed = match value {
            Some(v) => list.set_value(doc, &v, true),
            None => false,
        };
        if !committed {
            list.grid.init_page();
        }
        list.toggle(doc, Some(show), no_draw);
        doc.watch_click_out(id);
        list
    }

    // ==================== Disclosure ====================

    /// Disclosure transition. A `show` of `None` flips the current state;
    /// forcing the state it already holds re-applies the same effects.
    pub fn toggle(&mut self, doc: &mut Document, show: Option<bool>, suppress_draw: bool) {
        self.show = show.unwrap_or(!self.show);
        debug!("select-list {:?}: toggle -> show={}", self.id, self.show);
        self.apply_visibility();
        // A collapsed widget must not occupy, or stay clickable over, the
        // rows of the hidden list
        self.output_height = if self.show {
            self.grid.page_height()
        } else {
            1
        };
        if self.show {
            doc.raise_to_top(self.id);
        } else {
            doc.restore_position(self.id, self.z_ref);
        }
        doc.update_area(self.id, self.bounds());

        if suppress_draw {
            return;
        }

        if self.show {
            // Focus the slot showing the current value, the master when
            // none does
            let slot = self
                .grid
                .buttons()
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, b)| b.value.is_some() && b.value == self.value)
                .map_or(0, |(slot, _)| slot);
            doc.give_focus_to(self.id, slot);
        } else {
            doc.give_focus_to(self.id, 0);
        }
        self.draw(doc);
        self.emitter.emit(&Event::Toggle {
            widget: self.id,
            show: self.show,
        });
    }

    /// Hide or reveal every non-master slot to match the disclosure state
    fn apply_visibility(&mut self) {
        let hidden = !self.show;
        for button in self.grid.buttons_mut().iter_mut().skip(1) {
            button.hidden = hidden;
        }
    }

    // ==================== Selection ====================

    /// Commit a selection: fit the master label, adopt the selection's page
    /// when it carries one, rebuild the slot list, and unless `select_only`
    /// collapse with focus restoration and a redraw.
    pub fn select(&mut self, doc: &mut Document, selection: Selection<V>, select_only: bool) {
        let width = markup::content_width(&selection.content, selection.content_has_markup);
        let available = self
            .grid
            .buttons_max_width()
            .saturating_sub(self.grid.button_padding_width() + self.grid.button_symbol_width());

        let symbol = self.grid.master().symbol.clone();
        let fitted = if width < available {
            // Padding pushes the glyph to the right edge of the nominal
            // button width
            let pad = usize::from(available - width);
            format!("{}{}{}", selection.content, " ".repeat(pad), symbol)
        } else {
            // Wide content overflows the nominal width, never truncated
            format!("{} {}", selection.content, symbol)
        };
        debug!(
            "select-list {:?}: committed selection {:?}",
            self.id, selection.content
        );

        let max_width = self.grid.buttons_max_width();
        let master = self.grid.master_mut();
        master.content = fitted;
        master.content_has_markup = selection.content_has_markup;
        master.width = max_width;
        master.value = selection.value.clone();
        self.value = selection.value;

        if let Some(page) = selection.page {
            self.grid.set_page(page);
        }
        self.grid.init_page();
        self.apply_visibility();
        if self.show {
            self.output_height = self.grid.page_height();
        }

        if select_only {
            return;
        }
        self.toggle(doc, Some(false), false);
    }

    /// Select the first item whose value equals `value`. Returns false and
    /// changes nothing when no item matches.
    pub fn set_value(&mut self, doc: &mut Document, value: &V, select_only: bool) -> bool {
        let Some(def) = self
            .grid
            .items()
            .iter()
            .find(|def| def.value.as_ref() == Some(value))
        else {
            debug!("select-list {:?}: set_value found no matching item", self.id);
            return false;
        };
        let selection = Selection::from(def);
        self.select(doc, selection, select_only);
        true
    }

    // ==================== Dispatch ====================

    /// Route an activated slot by its role
    pub fn on_slot_submit(&mut self, doc: &mut Document, slot: usize) {
        let Some(button) = self.grid.buttons().get(slot) else {
            warn!("select-list {:?}: submit for missing slot {slot}", self.id);
            return;
        };
        let role = button.role;
        match role {
            Role::PreviousPage => self.previous_page(doc),
            Role::NextPage => self.next_page(doc),
            Role::Toggle => self.toggle(doc, None, false),
            Role::Separator => {
                warn!("select-list {:?}: separator slot {slot} activated", self.id);
            }
            Role::None => {
                let selection = Selection::from(button);
                let Some(value) = selection.value.clone() else {
                    warn!("select-list {:?}: slot {slot} has no value", self.id);
                    return;
                };
                self.select(doc, selection, false);
                self.emitter.emit(&Event::Submit {
                    value,
                    widget: self.id,
                });
            }
        }
    }

    /// Collapse after an activation landed outside this widget's bounds
    pub fn on_click_out(&mut self, doc: &mut Document) {
        self.toggle(doc, Some(false), false);
    }

    // ==================== Page navigation ====================

    /// Step the grid to the previous page, keeping visibility, height,
    /// bounds, and focus consistent
    pub fn previous_page(&mut self, doc: &mut Document) {
        self.grid.previous_page();
        self.after_page_change(doc);
    }

    /// Step the grid to the next page
    pub fn next_page(&mut self, doc: &mut Document) {
        self.grid.next_page();
        self.after_page_change(doc);
    }

    fn after_page_change(&mut self, doc: &mut Document) {
        self.apply_visibility();
        if self.show {
            self.output_height = self.grid.page_height();
        }
        doc.update_area(self.id, self.bounds());
        // Keep focus on the same row when the new page still has it
        if let Some((id, slot)) = doc.focused()
            && id == self.id
            && slot >= self.grid.buttons().len()
        {
            doc.give_focus_to(self.id, 0);
        }
        self.draw(doc);
    }

    // ==================== Focus ====================

    /// Move focus to the next visible submittable slot, wrapping
    pub fn focus_next(&mut self, doc: &mut Document) {
        self.focus_step(doc, 1);
    }

    /// Move focus to the previous visible submittable slot, wrapping
    pub fn focus_prev(&mut self, doc: &mut Document) {
        self.focus_step(doc, -1);
    }

    fn focus_step(&mut self, doc: &mut Document, step: isize) {
        let count = self.grid.buttons().len();
        if count == 0 {
            return;
        }
        let current = doc
            .focused()
            .filter(|(id, _)| *id == self.id)
            .map_or(0, |(_, slot)| slot);
        let mut slot = current;
        for _ in 0..count {
            slot = (slot as isize + step).rem_euclid(count as isize) as usize;
            let button = &self.grid.buttons()[slot];
            if !button.hidden && button.role != Role::Separator {
                doc.give_focus_to(self.id, slot);
                self.draw(doc);
                return;
            }
        }
    }

    // ==================== Teardown ====================

    /// Tear the widget down, dropping its click-outside watch and slots.
    /// With `is_sub_destroy` the document entry is left for the parent
    /// teardown to remove.
    pub fn destroy(&mut self, doc: &mut Document, is_sub_destroy: bool) {
        doc.unwatch_click_out(self.id);
        self.grid.destroy();
        if !is_sub_destroy {
            doc.remove(self.id);
        }
    }

    // ==================== Rendering ====================

    /// Render into the document screen; completes before returning
    pub fn draw(&self, doc: &mut Document) {
        let focused_slot = doc
            .focused()
            .filter(|(id, _)| *id == self.id)
            .map(|(_, slot)| slot);
        self.grid
            .render_rows(doc.screen_mut(), self.position, self.output_height, focused_slot);
    }

    // ==================== Hit testing ====================

    /// The visible submittable slot under `pos`, if any
    pub fn slot_at(&self, pos: Position) -> Option<usize> {
        if !self.bounds().contains(pos) {
            return None;
        }
        let slot = usize::from(pos.y - self.position.y);
        let button = self.grid.buttons().get(slot)?;
        if button.hidden || button.role == Role::Separator {
            return None;
        }
        Some(slot)
    }

    /// Rows the widget currently occupies on the screen
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.grid.buttons_max_width(),
            self.output_height,
        )
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The committed value, `None` before any selection
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn show(&self) -> bool {
        self.show
    }

    pub fn output_height(&self) -> u16 {
        self.output_height
    }

    pub fn page(&self) -> u16 {
        self.grid.page()
    }

    pub fn grid(&self) -> &ItemGrid<V> {
        &self.grid
    }

    // ==================== Subscriptions ====================

    /// Subscribe to selection submits
    pub fn on_submit(&mut self, mut callback: impl FnMut(&V) + 'static) -> HandlerId {
        self.emitter.on(EventKind::Submit, move |event| {
            if let Event::Submit { value, .. } = event {
                callback(value);
            }
        })
    }

    /// Subscribe to disclosure transitions
    pub fn on_toggle(&mut self, mut callback: impl FnMut(bool) + 'static) -> HandlerId {
        self.emitter.on(EventKind::Toggle, move |event| {
            if let Event::Toggle { show, .. } = event {
                callback(*show);
            }
        })
    }

    /// Drop a subscription
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.emitter.off(id)
    }
}
