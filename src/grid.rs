//! Paginated item grid backing the select list
//!
//! Owns the flat ordered slot list: slot 0 is always the master control,
//! the remaining slots are the current page's items, separators, and page
//! navigation rows. Pagination assigns every item definition to a page up
//! front; `init_page` then materializes the slots for the current page.

use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;

use crate::markup;
use crate::style::MenuStyle;


/// Default page budget, master row included
pub const DEFAULT_PAGE_MAX_HEIGHT: u16 = 8;
/// Columns of the focus marker drawn before every row's content
pub const BUTTON_PADDING_WIDTH: u16 = 2;

const PREVIOUS_PAGE_CONTENT: &str = "▲ previous";
const NEXT_PAGE_CONTENT: &str = "▼ next";
const FOCUS_MARKER: &str = "▸ ";
const BLUR_MARKER: &str = "  ";

/// Slot role, driving dispatch and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Ordinary selectable item
    #[default]
    None,
    PreviousPage,
    NextPage,
    /// The master control in slot 0
    Toggle,
    /// Cosmetic, non-selectable row
    Separator,
}

/// One entry of the item list
#[derive(Debug, Clone)]
pub struct ItemDef<V> {
    pub content: String,
    pub value: Option<V>,
    pub role: Role,
    pub content_has_markup: bool,
    /// Assigned by pagination
    pub page: u16,
}

impl<V> ItemDef<V> {
    /// An ordinary selectable item
    pub fn new(content: impl Into<String>, value: V) -> Self {
        Self {
            content: content.into(),
            value: Some(value),
            role: Role::None,
            content_has_markup: false,
            page: 0,
        }
    }

    /// Mark the content as carrying caret markup
    pub fn markup(mut self) -> Self {
        self.content_has_markup = true;
        self
    }

    /// A cosmetic separator row; its content comes from the grid's
    /// separator template
    pub fn separator() -> Self {
        Self {
            content: String::new(),
            value: None,
            role: Role::Separator,
            content_has_markup: false,
            page: 0,
        }
    }
}

/// Mutable template rendered in slot 0, rewritten on every selection
#[derive(Debug, Clone)]
pub struct MasterDef<V> {
    pub content: String,
    /// Disclosure glyph appended after the fitted content
    pub symbol: String,
    /// Width of the last fitted label, 0 before the first selection
    pub width: u16,
    pub value: Option<V>,
    pub content_has_markup: bool,
    pub role: Role,
}

/// Template for separator rows
#[derive(Debug, Clone)]
pub struct SeparatorDef {
    pub content: String,
    /// Repeat the content across the full button width
    pub repeat: bool,
    pub role: Role,
}

/// One live slot of the current page
#[derive(Debug, Clone)]
pub struct Button<V> {
    pub content: String,
    pub value: Option<V>,
    /// Hidden slots are skipped by rendering and hit testing
    pub hidden: bool,
    pub role: Role,
    pub content_has_markup: bool,
}

/// The facts a selection commit needs about the entity being selected.
///
/// Built either from an item definition, which knows its page, or from a
/// live button, which sits on the current page by construction.
#[derive(Debug, Clone)]
pub struct Selection<V> {
    pub content: String,
    pub value: Option<V>,
    pub content_has_markup: bool,
    pub page: Option<u16>,
}

impl<V: Clone> From<&ItemDef<V>> for Selection<V> {
    fn from(def: &ItemDef<V>) -> Self {
        Self {
            content: def.content.clone(),
            value: def.value.clone(),
            content_has_markup: def.content_has_markup,
            page: Some(def.page),
        }
    }
}

impl<V: Clone> From<&Button<V>> for Selection<V> {
    fn from(button: &Button<V>) -> Self {
        Self {
            content: button.content.clone(),
            value: button.value.clone(),
            content_has_markup: button.content_has_markup,
            page: None,
        }
    }
}

/// Construction options for the grid
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Override for the computed button width
    pub width: Option<u16>,
    /// Max rows per page, master row included; floored at 4
    pub page_max_height: u16,
    pub style: MenuStyle,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            width: None,
            page_max_height: DEFAULT_PAGE_MAX_HEIGHT,
            style: MenuStyle::default(),
        }
    }
}

/// Flat ordered slot list with pagination
#[derive(Debug)]
pub struct ItemGrid<V> {
    master: MasterDef<V>,
    separator: SeparatorDef,
    items: Vec<ItemDef<V>>,
    buttons: Vec<Button<V>>,
    page: u16,
    page_count: u16,
    page_max_height: u16,
    buttons_max_width: u16,
    button_padding_width: u16,
    button_symbol_width: u16,
    style: MenuStyle,
}

impl<V: Clone + PartialEq> ItemGrid<V> {
    /// Build the grid and assign items to pages. Slots are not materialized
    /// until the first `init_page` call.
    pub fn new(
        items: Vec<ItemDef<V>>,
        master: MasterDef<V>,
        separator: SeparatorDef,
        options: GridOptions,
    ) -> Self {
        let button_symbol_width = markup::content_width(&master.symbol, false);
        let widest = items
            .iter()
            .filter(|def| def.role == Role::None)
            .map(|def| markup::content_width(&def.content, def.content_has_markup))
            .max()
            .unwrap_or(0);
        let buttons_max_width = options
            .width
            .unwrap_or(widest + BUTTON_PADDING_WIDTH + button_symbol_width);

        let mut grid = Self {
            master,
            separator,
            items,
            buttons: Vec::new(),
            page: 0,
            page_count: 1,
            // A page must fit the master, both nav rows, and one item
            page_max_height: options.page_max_height.max(4),
            buttons_max_width,
            button_padding_width: BUTTON_PADDING_WIDTH,
            button_symbol_width,
            style: options.style,
        };
        grid.paginate();
        grid
    }

    /// Assign every item definition to a page
    fn paginate(&mut self) {
        // One row always belongs to the master; multi-page lists give up
        // two more rows per page to the navigation slots.
        let rows = usize::from(self.page_max_height - 1);
        if self.items.len() <= rows {
            for def in &mut self.items {
                def.page = 0;
            }
            self.page_count = 1;
            return;
        }
        let per_page = rows.saturating_sub(2).max(1);
        for (idx, def) in self.items.iter_mut().enumerate() {
            def.page = (idx / per_page) as u16;
        }
        self.page_count = self.items.len().div_ceil(per_page) as u16;
    }

    /// Materialize the slot list for the current page: master in slot 0,
    /// then this page's items framed by the navigation rows.
    pub fn init_page(&mut self) {
        self.buttons.clear();
        self.buttons.push(Button {
            content: self.master.content.clone(),
            value: self.master.value.clone(),
            hidden: false,
            role: self.master.role,
            content_has_markup: self.master.content_has_markup,
        });
        if self.page > 0 {
            self.buttons.push(Button {
                content: PREVIOUS_PAGE_CONTENT.to_string(),
                value: None,
                hidden: false,
                role: Role::PreviousPage,
                content_has_markup: false,
            });
        }
        let page = self.page;
        for def in self.items.iter().filter(|def| def.page == page) {
            let content = if def.role == Role::Separator {
                self.separator.content.clone()
            } else {
                def.content.clone()
            };
            self.buttons.push(Button {
                content,
                value: def.value.clone(),
                hidden: false,
                role: def.role,
                content_has_markup: def.content_has_markup,
            });
        }
        if self.page + 1 < self.page_count {
            self.buttons.push(Button {
                content: NEXT_PAGE_CONTENT.to_string(),
                value: None,
                hidden: false,
                role: Role::NextPage,
                content_has_markup: false,
            });
        }
        debug!(
            "grid: page {} initialized with {} slots",
            self.page,
            self.buttons.len()
        );
    }

    // ==================== Page navigation ====================

    /// Step to the previous page, clamped at the first
    pub fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.init_page();
        }
    }

    /// Step to the next page, clamped at the last
    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count {
            self.page += 1;
            self.init_page();
        }
    }

    /// Jump to a page, clamped; takes effect at the next `init_page`
    pub fn set_page(&mut self, page: u16) {
        self.page = page.min(self.page_count.saturating_sub(1));
    }

    // ==================== Accessors ====================

    pub fn page(&self) -> u16 {
        self.page
    }

    pub fn page_count(&self) -> u16 {
        self.page_count
    }

    /// Rows in the current page layout
    pub fn page_height(&self) -> u16 {
        self.buttons.len() as u16
    }

    pub fn buttons(&self) -> &[Button<V>] {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut [Button<V>] {
        &mut self.buttons
    }

    pub fn items(&self) -> &[ItemDef<V>] {
        &self.items
    }

    pub fn master(&self) -> &MasterDef<V> {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut MasterDef<V> {
        &mut self.master
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn buttons_max_width(&self) -> u16 {
        self.buttons_max_width
    }

    pub fn button_padding_width(&self) -> u16 {
        self.button_padding_width
    }

    pub fn button_symbol_width(&self) -> u16 {
        self.button_symbol_width
    }

    // ==================== Rendering ====================

    /// Draw the current page into `buf` at `origin`, one slot per row.
    /// Rows at or past `visible_rows`, and hidden slots, are blanked so a
    /// collapsed widget leaves no stale cells behind.
    pub fn render_rows(
        &self,
        buf: &mut Buffer,
        origin: Position,
        visible_rows: u16,
        focused_slot: Option<usize>,
    ) {
        for (slot, button) in self.buttons.iter().enumerate() {
            let y = origin.y + slot as u16;
            if y >= buf.area.bottom() || origin.x >= buf.area.right() {
                continue;
            }
            buf.set_stringn(
                origin.x,
                y,
                " ".repeat(usize::from(self.buttons_max_width)),
                usize::from(self.buttons_max_width),
                self.style.base,
            );
            if (slot as u16) >= visible_rows || button.hidden {
                continue;
            }
            self.render_slot(buf, origin.x, y, button, focused_slot == Some(slot));
        }
    }

    fn render_slot(&self, buf: &mut Buffer, x: u16, y: u16, button: &Button<V>, focused: bool) {
        let width = usize::from(self.buttons_max_width);
        if button.role == Role::Separator {
            let content = if self.separator.repeat && !button.content.is_empty() {
                let unit = usize::from(markup::content_width(&button.content, false)).max(1);
                button.content.repeat(width.div_ceil(unit))
            } else {
                button.content.clone()
            };
            buf.set_stringn(x, y, content, width, self.style.separator);
            return;
        }

        let marker = if focused { FOCUS_MARKER } else { BLUR_MARKER };
        let style = if focused {
            self.style.focus
        } else {
            match button.role {
                Role::Toggle => self.style.master,
                Role::PreviousPage | Role::NextPage => self.style.nav,
                _ => self.style.button,
            }
        };
        buf.set_string(x, y, marker, style);

        let content_x = x + self.button_padding_width;
        if content_x < buf.area.right() {
            let line = markup::content_line(&button.content, button.content_has_markup, style);
            // Wide labels run past the nominal column; only the screen
            // edge clips them
            buf.set_line(content_x, y, &line, buf.area.right() - content_x);
        }
    }

    /// Teardown: drop slots and definitions
    pub fn destroy(&mut self) {
        self.buttons.clear();
        self.items.clear();
        self.page = 0;
        self.page_count = 1;
    }
}
