//! In-memory host for slot-grid menus.
//!
//! Implements [`slotui_core::Host`] with a deterministic tick scheduler and
//! a queued event pump. Meant for tests and demos: the driver API lets a
//! test script connections, clicks, drags and owner lifecycle, then advance
//! the clock tick by tick.

pub mod host;
pub mod tasks;

pub use host::SimHost;
pub use tasks::TaskQueue;
