//! Collapsible single-selection dropdown for terminal UIs
//!
//! A compact master row shows the current selection with a disclosure
//! glyph; activating it expands a paginated list of choices rendered above
//! neighboring widgets. Picking an item commits its value, refits the
//! master label, collapses the list, and notifies subscribers. Focus,
//! stacking order, click-outside dismissal, and the screen buffer are
//! carried by a [`Document`] that is passed into every operation.
//!
//! Rendering targets [ratatui] buffers and input arrives as [crossterm]
//! events, so the widget drops into any ratatui event loop.
//!
//! ```
//! use droplist::{Document, ItemDef, SelectList, SelectListOptions};
//!
//! let mut doc = Document::new(40, 12);
//! let mut list = SelectList::new(
//!     &mut doc,
//!     SelectListOptions {
//!         items: vec![ItemDef::new("Red", 1), ItemDef::new("Green", 2)],
//!         value: Some(2),
//!         ..Default::default()
//!     },
//! );
//! assert_eq!(list.value(), Some(&2));
//!
//! list.set_value(&mut doc, &1, false);
//! assert_eq!(list.value(), Some(&1));
//! ```
//!
//! [ratatui]: https://docs.rs/ratatui
//! [crossterm]: https://docs.rs/crossterm

pub mod document;
pub mod events;
pub mod grid;
pub mod input;
pub mod markup;
pub mod select_list;
pub mod style;

pub use document::{Document, WidgetId};
pub use events::{Emitter, Event, EventKind, HandlerId};
pub use grid::{Button, GridOptions, ItemDef, ItemGrid, MasterDef, Role, Selection, SeparatorDef};
pub use select_list::{MasterOverride, SelectList, SelectListOptions, SeparatorOverride};
pub use style::MenuStyle;
