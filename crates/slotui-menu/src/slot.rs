//! The [`MenuSlot`] cell: an index, a display item and a click callback.

use std::fmt;
use std::rc::Rc;

use slotui_core::{ClickEvent, Item};

/// Callback invoked when a menu slot is clicked.
pub type ClickFn = Rc<dyn Fn(&mut ClickEvent)>;

/// One cell of a menu: a grid index, an optional display item and the
/// callback attached to it. Immutable once constructed.
///
/// Equality is value-based: indices and items must match and the callback
/// must be the same shared handle. Two slots built from separate closures
/// are never equal even if the closures look alike.
#[derive(Clone)]
pub struct MenuSlot {
    index: usize,
    item: Option<Item>,
    on_click: ClickFn,
}

impl MenuSlot {
    /// Create a slot firing `on_click` when clicked.
    pub fn new(index: usize, item: Option<Item>, on_click: ClickFn) -> Self {
        Self {
            index,
            item,
            on_click,
        }
    }

    /// Create a display-only slot whose callback does nothing.
    pub fn display(index: usize, item: Item) -> Self {
        Self::new(index, Some(item), Rc::new(|_| {}))
    }

    /// The grid index this slot targets.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The display item, if any.
    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// A shared handle to the click callback.
    pub fn handler(&self) -> ClickFn {
        Rc::clone(&self.on_click)
    }

    /// Invoke the callback. No gating happens here; deciding whether a
    /// click deserves a callback is the session's job.
    pub fn fire(&self, event: &mut ClickEvent) {
        (self.on_click)(event);
    }
}

impl PartialEq for MenuSlot {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.item == other.item
            && Rc::ptr_eq(&self.on_click, &other.on_click)
    }
}

impl fmt::Debug for MenuSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuSlot")
            .field("index", &self.index)
            .field("item", &self.item)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotui_core::{OwnerId, Surface};
    use std::cell::Cell;

    #[test]
    fn fire_invokes_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let slot = MenuSlot::new(3, None, Rc::new(move |_| counter.set(counter.get() + 1)));

        let surface = Surface::new(OwnerId::new(1), 9, "t");
        let mut event = ClickEvent::new(OwnerId::new(1), surface, 3, 3);
        slot.fire(&mut event);
        slot.fire(&mut event);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn equality_requires_shared_callback() {
        let shared: ClickFn = Rc::new(|_| {});
        let item = Item::new('x', "X");
        let a = MenuSlot::new(0, Some(item.clone()), Rc::clone(&shared));
        let b = MenuSlot::new(0, Some(item.clone()), Rc::clone(&shared));
        let c = MenuSlot::new(0, Some(item.clone()), Rc::new(|_| {}));
        let d = MenuSlot::new(1, Some(item), Rc::clone(&shared));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, a.clone());
    }
}
