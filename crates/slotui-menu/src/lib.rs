//! Modal slot-grid menu sessions.
//!
//! Builds on [`slotui_core`]: a [`Menu`] binds a slot grid to one owner,
//! opens deferred on the host scheduler, reacts to host lifecycle events,
//! and chains to a fallback session when closed. [`MenuBuilder`] accumulates
//! slots before registration and [`paged_menu`] lays a collection out across
//! navigable pages.

mod builder;
mod error;
mod layout;
mod menu;
mod paged;
mod slot;

pub use builder::MenuBuilder;
pub use error::MenuError;
pub use layout::{calculate_slot_count, compute_slot_index};
pub use menu::Menu;
pub use paged::{PAGE_SIZE, PageControls, PagedConfig, paged_menu};
pub use slot::{ClickFn, MenuSlot};
