//! Lifecycle events delivered by a host: [`Event`], [`ClickEvent`] and
//! [`DragEvent`].

use crate::owner::OwnerId;
use crate::surface::Surface;

// ---------------------------------------------------------------------------
// ClickEvent
// ---------------------------------------------------------------------------

/// A click on a surface slot.
///
/// `raw_slot` is the index in the combined view space (presented surface
/// followed by the owner's personal slots); `slot` is the index within the
/// grid the click actually landed on. The two are equal exactly when the
/// click hit the presented surface itself.
#[derive(Clone, Debug)]
pub struct ClickEvent {
    pub owner: OwnerId,
    pub surface: Surface,
    pub raw_slot: usize,
    pub slot: usize,
    cancelled: bool,
}

impl ClickEvent {
    /// Create a click event, not yet cancelled.
    pub fn new(owner: OwnerId, surface: Surface, raw_slot: usize, slot: usize) -> Self {
        Self {
            owner,
            surface,
            raw_slot,
            slot,
            cancelled: false,
        }
    }

    /// Suppress the host's default slot manipulation for this click.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether some handler cancelled the click.
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

// ---------------------------------------------------------------------------
// DragEvent
// ---------------------------------------------------------------------------

/// A drag gesture across surface slots.
#[derive(Clone, Debug)]
pub struct DragEvent {
    pub owner: OwnerId,
    pub surface: Surface,
    cancelled: bool,
}

impl DragEvent {
    /// Create a drag event, not yet cancelled.
    pub fn new(owner: OwnerId, surface: Surface) -> Self {
        Self {
            owner,
            surface,
            cancelled: false,
        }
    }

    /// Suppress the host's default slot manipulation for this drag.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether some handler cancelled the drag.
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A lifecycle event delivered to bus listeners.
///
/// Events are dispatched by mutable reference so that handlers can cancel
/// the cancellable kinds in place.
#[derive(Clone, Debug)]
pub enum Event {
    /// The owner disconnected from the host.
    Quit { owner: OwnerId },
    /// The owner's character died.
    Death { owner: OwnerId },
    /// The owner moved to another world.
    WorldChange { owner: OwnerId },
    /// The owner teleported.
    Teleport { owner: OwnerId },
    /// The owner is now viewing `surface`.
    SurfaceOpened { owner: OwnerId, surface: Surface },
    /// The owner stopped viewing `surface`.
    SurfaceClosed { owner: OwnerId, surface: Surface },
    /// A click on a surface slot.
    Click(ClickEvent),
    /// A drag gesture across surface slots.
    Drag(DragEvent),
}

impl Event {
    /// Convenience constructor for a click landing on `slot` of the
    /// presented surface itself.
    pub fn click(owner: OwnerId, surface: Surface, slot: usize) -> Self {
        Self::Click(ClickEvent::new(owner, surface, slot, slot))
    }

    /// The owner the event concerns.
    pub fn owner(&self) -> OwnerId {
        match self {
            Event::Quit { owner }
            | Event::Death { owner }
            | Event::WorldChange { owner }
            | Event::Teleport { owner }
            | Event::SurfaceOpened { owner, .. }
            | Event::SurfaceClosed { owner, .. } => *owner,
            Event::Click(click) => click.owner,
            Event::Drag(drag) => drag.owner,
        }
    }
}
