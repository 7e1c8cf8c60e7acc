//! Paged menus: slice an ordered collection across fixed-size grids with
//! navigation controls.

use std::rc::Rc;

use slotui_core::{Host, Item, OwnerId};

use crate::builder::MenuBuilder;
use crate::error::MenuError;
use crate::menu::Menu;
use crate::slot::{ClickFn, MenuSlot};

/// Entries shown per page. The row above the entries is reserved for
/// navigation controls.
pub const PAGE_SIZE: usize = 45;

/// Display payloads for the navigation controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControls {
    pub next: Item,
    pub previous: Item,
    pub back: Item,
}

impl Default for PageControls {
    fn default() -> Self {
        Self {
            next: Item::new('>', "Next Page"),
            previous: Item::new('<', "Previous Page"),
            back: Item::new('x', "Return Back"),
        }
    }
}

/// Configuration for [`paged_menu`].
pub struct PagedConfig<E> {
    /// Session title, shared by every page.
    pub title: String,
    /// The full ordered collection.
    pub entries: Vec<E>,
    /// Maps an entry and its absolute collection index to a display item.
    pub display: Box<dyn Fn(&E, usize) -> Item>,
    /// Requested page, starting at 1. Requests past the last page fall
    /// back to page 1.
    pub page: usize,
    /// Whether the back control takes the previous-page position on the
    /// first page.
    pub has_back: bool,
    /// Navigation control payloads.
    pub controls: PageControls,
    /// Fired by clicks on any entry slot.
    pub on_item: ClickFn,
    /// Fired by the next-page control.
    pub on_next: ClickFn,
    /// Fired by the previous-page control.
    pub on_previous: ClickFn,
    /// Fired by the back control; `None` disables it even with `has_back`.
    pub on_back: Option<ClickFn>,
}

/// Lay out one page of `config.entries` and register the session.
///
/// The window for page `p` is `[(p - 1) * 45, min(p * 45, len))`. Entries
/// fill slots from zero in collection order. Controls are placed against a
/// placement size one row above the window's item rows: next page at
/// `size - 2`, previous page (or the back control on page 1) at `size - 8`
/// and a display-only page indicator at `size - 5`. The session itself is
/// sized from the accumulated slot count, so on a short page a control
/// position can land past the grid and stays undrawn.
pub fn paged_menu<E>(
    host: &Rc<dyn Host>,
    owner: OwnerId,
    config: PagedConfig<E>,
) -> Result<Menu, MenuError> {
    let PagedConfig {
        title,
        entries,
        display,
        page,
        has_back,
        controls,
        on_item,
        on_next,
        on_previous,
        on_back,
    } = config;

    let pages = entries.len().div_ceil(PAGE_SIZE);
    let mut page = page.max(1);
    if page > pages {
        page = 1;
    }
    let start = (page - 1) * PAGE_SIZE;
    let end = (page * PAGE_SIZE).min(entries.len());
    let placement = (end - start).div_ceil(9) * 9 + 9;

    let mut builder = MenuBuilder::new();
    for (offset, entry) in entries[start..end].iter().enumerate() {
        let item = display(entry, start + offset);
        builder = builder.add(MenuSlot::new(offset, Some(item), Rc::clone(&on_item)));
    }
    if page < pages {
        builder = builder.add(MenuSlot::new(placement - 2, Some(controls.next), on_next));
    }
    if page > 1 {
        builder = builder.add(MenuSlot::new(
            placement - 8,
            Some(controls.previous),
            on_previous,
        ));
    } else if has_back {
        if let Some(on_back) = on_back {
            builder = builder.add(MenuSlot::new(placement - 8, Some(controls.back), on_back));
        }
    }
    builder = builder.add(MenuSlot::display(placement - 5, indicator(page)));

    builder.register(host, owner, &title)
}

// -- private helpers --

/// Display-only page indicator payload.
fn indicator(page: usize) -> Item {
    Item::new('#', format!("Page {page}"))
}
