//! The [`Surface`] resource: a host-owned grid of item slots.
//!
//! A `Surface` is a cheap handle to shared storage. Cloning yields another
//! handle to the **same** grid, and [`same`](Surface::same) compares handle
//! identity, not contents. Hosts create surfaces and present them to their
//! owner; menu sessions write slots through the handle they were given.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::item::Item;
use crate::owner::OwnerId;

// ---------------------------------------------------------------------------
// SurfaceError
// ---------------------------------------------------------------------------

/// Errors raised by surface slot operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// Slot index past the end of the grid.
    #[error("slot {index} out of bounds for surface of {len} slots")]
    OutOfBounds { index: usize, len: usize },
    /// The host tore the surface down; it no longer accepts writes.
    #[error("surface was revoked by the host")]
    Revoked,
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct SurfaceState {
    owner: OwnerId,
    title: String,
    slots: Vec<Option<Item>>,
    revoked: bool,
}

/// A fixed-size grid of item slots owned by the host.
#[derive(Clone, Debug)]
pub struct Surface {
    state: Rc<RefCell<SurfaceState>>,
}

impl Surface {
    /// Create a surface of `slot_count` empty slots for `owner`.
    pub fn new(owner: OwnerId, slot_count: usize, title: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState {
                owner,
                title: title.into(),
                slots: vec![None; slot_count],
                revoked: false,
            })),
        }
    }

    /// The owner this surface was created for.
    pub fn owner(&self) -> OwnerId {
        self.state.borrow().owner
    }

    /// The title shown while the surface is presented.
    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// Number of slots in the grid.
    pub fn slot_count(&self) -> usize {
        self.state.borrow().slots.len()
    }

    /// Whether `other` is a handle to this same grid.
    pub fn same(&self, other: &Surface) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Put `item` into the slot at `index`.
    pub fn set_slot(&self, index: usize, item: Item) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.check_writable()?;
        let len = state.slots.len();
        match state.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(item);
                Ok(())
            }
            None => Err(SurfaceError::OutOfBounds { index, len }),
        }
    }

    /// Empty the slot at `index`.
    pub fn clear_slot(&self, index: usize) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.check_writable()?;
        let len = state.slots.len();
        match state.slots.get_mut(index) {
            Some(slot) => {
                *slot = None;
                Ok(())
            }
            None => Err(SurfaceError::OutOfBounds { index, len }),
        }
    }

    /// Empty every slot.
    pub fn clear_all(&self) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.check_writable()?;
        state.slots.fill(None);
        Ok(())
    }

    /// The item at `index`, if the slot is occupied and in range.
    pub fn item(&self, index: usize) -> Option<Item> {
        self.state.borrow().slots.get(index).cloned().flatten()
    }

    /// Snapshot of every slot, in index order.
    pub fn items(&self) -> Vec<Option<Item>> {
        self.state.borrow().slots.clone()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.state.borrow().slots.iter().filter(|s| s.is_some()).count()
    }

    /// Tear the surface down: contents are dropped and every later write
    /// fails with [`SurfaceError::Revoked`]. Host-side teardown API.
    pub fn revoke(&self) {
        let mut state = self.state.borrow_mut();
        state.slots.fill(None);
        state.revoked = true;
    }

    /// Whether the host has torn the surface down.
    pub fn is_revoked(&self) -> bool {
        self.state.borrow().revoked
    }
}

impl SurfaceState {
    fn check_writable(&self) -> Result<(), SurfaceError> {
        if self.revoked {
            Err(SurfaceError::Revoked)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(slots: usize) -> Surface {
        Surface::new(OwnerId::new(1), slots, "chest")
    }

    #[test]
    fn set_and_read_slots() {
        let s = surface(9);
        s.set_slot(4, Item::new('x', "X")).unwrap();
        assert_eq!(s.item(4).unwrap().glyph, 'x');
        assert_eq!(s.item(3), None);
        assert_eq!(s.occupied(), 1);
        s.clear_slot(4).unwrap();
        assert_eq!(s.occupied(), 0);
    }

    #[test]
    fn out_of_bounds_write() {
        let s = surface(9);
        let err = s.set_slot(9, Item::new('x', "X")).unwrap_err();
        assert_eq!(err, SurfaceError::OutOfBounds { index: 9, len: 9 });
        assert_eq!(s.item(9), None);
    }

    #[test]
    fn clear_all_empties_grid() {
        let s = surface(18);
        for i in 0..18 {
            s.set_slot(i, Item::new('o', "O")).unwrap();
        }
        s.clear_all().unwrap();
        assert_eq!(s.occupied(), 0);
    }

    #[test]
    fn clones_share_identity_and_contents() {
        let a = surface(9);
        let b = a.clone();
        let other = surface(9);
        assert!(a.same(&b));
        assert!(!a.same(&other));
        b.set_slot(0, Item::new('x', "X")).unwrap();
        assert!(a.item(0).is_some());
    }

    #[test]
    fn revoked_surface_rejects_writes() {
        let s = surface(9);
        s.set_slot(0, Item::new('x', "X")).unwrap();
        s.revoke();
        assert!(s.is_revoked());
        assert_eq!(s.item(0), None);
        assert_eq!(s.set_slot(0, Item::new('x', "X")), Err(SurfaceError::Revoked));
        assert_eq!(s.clear_all(), Err(SurfaceError::Revoked));
    }
}
