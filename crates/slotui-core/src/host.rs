//! The [`Host`] trait: the seam between menu sessions and the environment
//! that owns surfaces, ticks and event delivery.

use crate::bus::EventBus;
use crate::owner::OwnerId;
use crate::surface::Surface;

/// A deferred action run by the host scheduler.
pub type Task = Box<dyn FnOnce()>;

/// The hosting environment. It owns surface presentation, delivers lifecycle
/// events through its [`EventBus`], and runs deferred tasks on a tick
/// scheduler.
///
/// Implementations are single-threaded. Calls that cause lifecycle events
/// (opening or closing a surface) must queue those events for a later
/// dispatch rather than dispatching re-entrantly, so that sessions can call
/// back into the host from their own event handlers.
pub trait Host {
    /// Create a surface of `slot_count` slots for `owner`.
    fn create_surface(&self, owner: OwnerId, slot_count: usize, title: &str) -> Surface;

    /// Present `surface` to `owner`, replacing whatever they were viewing.
    fn open_surface(&self, owner: OwnerId, surface: &Surface);

    /// Close whatever surface `owner` is currently viewing, if any.
    fn close_surface(&self, owner: OwnerId);

    /// Whether `owner` is still connected.
    fn is_connected(&self, owner: OwnerId) -> bool;

    /// Run `task` once `delay` ticks have passed. The scheduler has no
    /// same-tick execution: a delay of zero behaves as one. Tasks due on the
    /// same tick run in scheduling order, and there is no cancellation;
    /// tasks check their own preconditions when they run.
    fn run_after_ticks(&self, delay: u32, task: Task);

    /// The lifecycle event bus of this host.
    fn events(&self) -> &EventBus;
}
