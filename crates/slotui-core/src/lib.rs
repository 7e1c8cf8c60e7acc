//! **slotui-core** — Slot-grid menu sessions for tick-driven hosts (core types).
//!
//! This crate provides the types shared between menu implementations and the
//! environments hosting them: owner handles, item payloads, the slot-grid
//! surface resource, lifecycle events, the subscription bus, and the
//! [`Host`] trait a hosting environment implements.

pub mod bus;
pub mod events;
pub mod host;
pub mod item;
pub mod owner;
pub mod surface;

pub use bus::{EventBus, Listener, Subscription};
pub use events::{ClickEvent, DragEvent, Event};
pub use host::{Host, Task};
pub use item::Item;
pub use owner::OwnerId;
pub use surface::{Surface, SurfaceError};
