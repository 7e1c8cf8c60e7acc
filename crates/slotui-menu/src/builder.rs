//! The [`MenuBuilder`]: accumulate slots and configuration, then register a
//! [`Menu`] session.

use std::rc::Rc;

use slotui_core::{ClickEvent, Host, Item, OwnerId};

use crate::error::MenuError;
use crate::layout::{calculate_slot_count, compute_slot_index};
use crate::menu::Menu;
use crate::slot::MenuSlot;

/// Two-phase construction of a [`Menu`]: accumulate slots, an optional
/// shape and an optional fallback session, then
/// [`register`](MenuBuilder::register) the session holding them.
///
/// Accumulation keeps insertion order and drops slots equal to one already
/// present. When several accumulated slots target the same index, the last
/// one wins at registration.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    slots: Vec<MenuSlot>,
    shape: Option<Vec<String>>,
    fallback: Option<Menu>,
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prepared slot, unless an equal one was already accumulated.
    pub fn add(mut self, slot: MenuSlot) -> Self {
        if !self.slots.contains(&slot) {
            self.slots.push(slot);
        }
        self
    }

    /// Add an item at `index`, firing `on_click` when clicked.
    pub fn slot(
        self,
        index: usize,
        item: Item,
        on_click: impl Fn(&mut ClickEvent) + 'static,
    ) -> Self {
        self.add(MenuSlot::new(index, Some(item), Rc::new(on_click)))
    }

    /// Add a display-only item at `index`.
    pub fn slot_static(self, index: usize, item: Item) -> Self {
        self.add(MenuSlot::display(index, item))
    }

    /// Add an item at the slot addressed by the shape character `c`. The
    /// shape must be set first.
    pub fn slot_at(
        self,
        c: char,
        item: Item,
        on_click: impl Fn(&mut ClickEvent) + 'static,
    ) -> Result<Self, MenuError> {
        let index = compute_slot_index(self.shape.as_deref(), c)?;
        Ok(self.slot(index, item, on_click))
    }

    /// Display-only variant of [`slot_at`](MenuBuilder::slot_at).
    pub fn slot_static_at(self, c: char, item: Item) -> Result<Self, MenuError> {
        let index = compute_slot_index(self.shape.as_deref(), c)?;
        Ok(self.slot_static(index, item))
    }

    /// Set the shape template. Character-addressed slots resolve against it
    /// and the registered session gets one row per shape row.
    pub fn shape(mut self, rows: &[&str]) -> Self {
        self.shape = Some(rows.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Set the session to restore when the owner closes the registered
    /// menu. The handle is held strongly; avoid fallback cycles.
    pub fn fallback(mut self, menu: &Menu) -> Self {
        self.fallback = Some(menu.clone());
        self
    }

    /// Materialize the session: sized by the shape when one is set, else by
    /// the smallest slot count covering the accumulated slots. Every
    /// accumulated slot is copied in under its own index. The session comes
    /// back unopened; call [`Menu::fire`] to schedule it.
    pub fn register(
        self,
        host: &Rc<dyn Host>,
        owner: OwnerId,
        title: &str,
    ) -> Result<Menu, MenuError> {
        let menu = match self.shape {
            Some(shape) => Menu::with_shape(host, owner, shape, title, self.fallback)?,
            None => {
                let rows = calculate_slot_count(self.slots.len()) / 9;
                Menu::new(host, owner, rows, title, self.fallback)?
            }
        };
        for slot in self.slots {
            menu.set_slot(slot.index(), slot);
        }
        Ok(menu)
    }
}
