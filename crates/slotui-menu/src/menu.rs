//! The [`Menu`] session: a modal slot grid bound to one owner and driven by
//! host lifecycle events.
//!
//! A `Menu` is a cheap handle to shared session state; clones refer to the
//! same session. Sessions move through unopened, scheduled, open and
//! invalidated states. [`fire`](Menu::fire) schedules the open one tick out,
//! host events drive everything after that, and an optional fallback session
//! is re-opened when the owner closes this one. While a session is open it
//! is kept alive by its bus registration (and it keeps its host alive), so
//! dropping user handles does not tear down a presented menu; invalidation
//! does.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use slotui_core::{ClickEvent, DragEvent, Event, Host, Item, OwnerId, Subscription, Surface};

use crate::error::MenuError;
use crate::layout::compute_slot_index;
use crate::slot::MenuSlot;

struct MenuState {
    host: Rc<dyn Host>,
    owner: OwnerId,
    slot_count: usize,
    slots: HashMap<usize, MenuSlot>,
    surface: Surface,
    shape: Option<Vec<String>>,
    fallback: Option<Menu>,
    subscription: Option<Subscription>,
    first_draw: bool,
    valid: bool,
    invalidated: bool,
}

/// A modal slot-grid menu session. Cloning yields another handle to the
/// same session.
#[derive(Clone)]
pub struct Menu {
    state: Rc<RefCell<MenuState>>,
}

impl Menu {
    /// Create an unopened session of `rows` rows of nine slots. The surface
    /// is created once here and reused across every open cycle of the
    /// session.
    pub fn new(
        host: &Rc<dyn Host>,
        owner: OwnerId,
        rows: usize,
        title: impl Into<String>,
        fallback: Option<Menu>,
    ) -> Result<Self, MenuError> {
        Self::build(host, owner, rows, None, title.into(), fallback)
    }

    /// Create an unopened session sized and addressed by `shape`: one row
    /// of nine slots per shape row, with character-addressed placement
    /// enabled.
    pub fn with_shape(
        host: &Rc<dyn Host>,
        owner: OwnerId,
        shape: Vec<String>,
        title: impl Into<String>,
        fallback: Option<Menu>,
    ) -> Result<Self, MenuError> {
        let rows = shape.len();
        Self::build(host, owner, rows, Some(shape), title.into(), fallback)
    }

    fn build(
        host: &Rc<dyn Host>,
        owner: OwnerId,
        rows: usize,
        shape: Option<Vec<String>>,
        title: String,
        fallback: Option<Menu>,
    ) -> Result<Self, MenuError> {
        if rows == 0 || rows > 6 {
            return Err(MenuError::InvalidRows(rows));
        }
        let slot_count = rows * 9;
        let surface = host.create_surface(owner, slot_count, &title);
        Ok(Self {
            state: Rc::new(RefCell::new(MenuState {
                host: Rc::clone(host),
                owner,
                slot_count,
                slots: HashMap::new(),
                surface,
                shape,
                fallback,
                subscription: None,
                first_draw: false,
                valid: false,
                invalidated: false,
            })),
        })
    }

    // -- accessors --

    /// The owner this session is bound to.
    pub fn owner(&self) -> OwnerId {
        self.state.borrow().owner
    }

    /// The session title.
    pub fn title(&self) -> String {
        self.state.borrow().surface.title()
    }

    /// Number of slots in the session's grid.
    pub fn slot_count(&self) -> usize {
        self.state.borrow().slot_count
    }

    /// A handle to the session's surface.
    pub fn surface(&self) -> Surface {
        self.state.borrow().surface.clone()
    }

    /// Whether the session is currently open and interactive.
    pub fn is_valid(&self) -> bool {
        self.state.borrow().valid
    }

    /// Whether the session has been invalidated at least once since it was
    /// last opened.
    pub fn is_invalidated(&self) -> bool {
        self.state.borrow().invalidated
    }

    /// Whether the session is in the middle of its opening draw.
    pub fn is_first_draw(&self) -> bool {
        self.state.borrow().first_draw
    }

    // -- slot mapping --

    /// Map `index` to `slot`, replacing any previous mapping. Takes effect
    /// on the surface at the next [`redraw`](Menu::redraw) or open.
    pub fn set_slot(&self, index: usize, slot: MenuSlot) {
        self.state.borrow_mut().slots.insert(index, slot);
    }

    /// Attach `item` at `index`, firing `on_click` when clicked.
    pub fn set_item(
        &self,
        index: usize,
        item: Item,
        on_click: impl Fn(&mut ClickEvent) + 'static,
    ) {
        self.set_slot(index, MenuSlot::new(index, Some(item), Rc::new(on_click)));
    }

    /// Attach a display-only `item` at `index`.
    pub fn set_static(&self, index: usize, item: Item) {
        self.set_slot(index, MenuSlot::display(index, item));
    }

    /// Attach `item` at the slot addressed by the shape character `c`.
    pub fn set_item_at(
        &self,
        c: char,
        item: Item,
        on_click: impl Fn(&mut ClickEvent) + 'static,
    ) -> Result<(), MenuError> {
        let index = self.resolve_char(c)?;
        self.set_item(index, item, on_click);
        Ok(())
    }

    /// Display-only variant of [`set_item_at`](Menu::set_item_at).
    pub fn set_static_at(&self, c: char, item: Item) -> Result<(), MenuError> {
        let index = self.resolve_char(c)?;
        self.set_static(index, item);
        Ok(())
    }

    /// Clear the surface and repopulate it from the slot mapping. Mappings
    /// outside the grid are skipped.
    pub fn redraw(&self) -> Result<(), MenuError> {
        self.state.borrow().redraw()
    }

    // -- lifecycle --

    /// Schedule this session to open on the next host tick.
    ///
    /// Fails fast when the session is already open. The open itself always
    /// runs deferred: the surface is never presented synchronously, and the
    /// scheduled open re-checks that the owner is still connected and that
    /// no concurrent open won the race.
    pub fn fire(&self) -> Result<(), MenuError> {
        let state = self.state.borrow();
        if state.valid {
            return Err(MenuError::AlreadyOpen);
        }
        trace!("menu {} for {} scheduled to open", state.surface.title(), state.owner);
        let menu = self.clone();
        state
            .host
            .run_after_ticks(1, Box::new(move || menu.open()));
        Ok(())
    }

    /// Ask the host to close whatever the owner currently views.
    /// Invalidation follows through the resulting close event.
    pub fn close(&self) {
        let (host, owner) = {
            let state = self.state.borrow();
            (Rc::clone(&state.host), state.owner)
        };
        host.close_surface(owner);
    }

    // -- private helpers --

    fn resolve_char(&self, c: char) -> Result<usize, MenuError> {
        let state = self.state.borrow();
        compute_slot_index(state.shape.as_deref(), c)
    }

    /// Deferred open body, run by the host scheduler.
    fn open(&self) {
        let mut state = self.state.borrow_mut();
        if state.valid {
            warn!("menu for {} is already open, skipping deferred open", state.owner);
            return;
        }
        if !state.host.is_connected(state.owner) {
            debug!("owner {} left before the deferred open ran", state.owner);
            state.invalidate();
            return;
        }
        state.first_draw = true;
        state.invalidated = false;
        if let Err(err) = state.redraw() {
            warn!("redraw failed while opening menu for {}: {err}", state.owner);
            state.first_draw = false;
            state.invalidate();
            return;
        }
        state.first_draw = false;

        let menu = self.clone();
        let subscription = state
            .host
            .events()
            .subscribe(Rc::new(move |event| menu.on_event(event)));
        state.subscription = Some(subscription);
        state.host.open_surface(state.owner, &state.surface);
        state.valid = true;
        debug!("menu for {} opened with {} slots", state.owner, state.slot_count);
    }

    /// Bus listener body. Borrows are always released before user callbacks
    /// or host calls that could re-enter the session.
    fn on_event(&self, event: &mut Event) {
        match event {
            Event::Quit { owner }
            | Event::Death { owner }
            | Event::WorldChange { owner }
            | Event::Teleport { owner } => {
                let mut state = self.state.borrow_mut();
                if *owner == state.owner && state.valid {
                    debug!("menu for {} invalidated by an owner lifecycle event", state.owner);
                    state.invalidate();
                }
            }
            Event::SurfaceOpened { owner, surface } => {
                let mut state = self.state.borrow_mut();
                if *owner == state.owner && state.valid && !surface.same(&state.surface) {
                    debug!("menu for {} invalidated by another surface opening", state.owner);
                    state.invalidate();
                }
            }
            Event::SurfaceClosed { owner, surface } => self.on_surface_closed(*owner, surface),
            Event::Click(click) => self.on_click(click),
            Event::Drag(drag) => self.on_drag(drag),
        }
    }

    fn on_surface_closed(&self, owner: OwnerId, surface: &Surface) {
        let fallback = {
            let mut state = self.state.borrow_mut();
            if owner != state.owner || !state.valid {
                return;
            }
            debug!("menu for {} invalidated by a surface close", state.owner);
            state.invalidate();
            if !surface.same(&state.surface) {
                // Some other surface of the owner closed; no chaining.
                return;
            }
            state.fallback.clone()
        };
        let Some(fallback) = fallback else {
            return;
        };
        if fallback.is_valid() {
            // Already open through another path; nothing to restore.
            return;
        }

        let (host, owner) = {
            let state = self.state.borrow();
            (Rc::clone(&state.host), state.owner)
        };
        debug!("scheduling fallback menu for {owner}");
        let task_host = Rc::clone(&host);
        host.run_after_ticks(
            1,
            Box::new(move || {
                if !task_host.is_connected(owner) || fallback.is_valid() {
                    return;
                }
                if let Err(err) = fallback.fire() {
                    warn!("fallback menu for {owner} failed to fire: {err}");
                }
            }),
        );
    }

    fn on_click(&self, click: &mut ClickEvent) {
        let handler = {
            let state = self.state.borrow();
            if !click.surface.same(&state.surface) {
                return;
            }
            click.cancel();
            if !state.valid {
                debug!("click on a stale menu surface for {}, forcing close", state.owner);
                drop(state);
                self.close();
                return;
            }
            if click.raw_slot != click.slot {
                // Landed in the owner's personal region of the view.
                return;
            }
            state.slots.get(&click.slot).map(MenuSlot::handler)
        };
        if let Some(handler) = handler {
            trace!("menu slot {} fired", click.slot);
            handler(click);
        }
    }

    fn on_drag(&self, drag: &mut DragEvent) {
        let stale = {
            let state = self.state.borrow();
            if !drag.surface.same(&state.surface) {
                return;
            }
            drag.cancel();
            !state.valid
        };
        if stale {
            debug!("drag on a stale menu surface, forcing close");
            self.close();
        }
    }
}

impl MenuState {
    fn redraw(&self) -> Result<(), MenuError> {
        self.surface.clear_all()?;
        for (&index, slot) in &self.slots {
            if index >= self.slot_count {
                continue;
            }
            if let Some(item) = slot.item() {
                self.surface.set_slot(index, item.clone())?;
            }
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.valid = false;
        self.invalidated = true;
        // The host may already have revoked the surface.
        if let Err(err) = self.surface.clear_all() {
            trace!("skipping grid wipe for {}: {err}", self.owner);
        }
        self.subscription = None;
    }
}

impl PartialEq for Menu {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for Menu {}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Menu")
            .field("owner", &state.owner)
            .field("slot_count", &state.slot_count)
            .field("valid", &state.valid)
            .field("invalidated", &state.invalidated)
            .finish_non_exhaustive()
    }
}
