//! The [`SimHost`]: a deterministic, in-memory host implementation.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
#[cfg(test)]
use std::rc::Rc;

use log::trace;

use slotui_core::{ClickEvent, DragEvent, Event, EventBus, Host, OwnerId, Surface, Task};

use crate::tasks::TaskQueue;

/// A single-threaded, tick-driven host for tests and demos.
///
/// All state lives behind interior mutability, so a `SimHost` is driven
/// through `&self` like any other [`Host`]. Lifecycle events raised by host
/// calls are queued and dispatched in arrival order at the next pump point
/// (the end of the current driver call, or after each task during a tick),
/// never re-entrantly, so sessions may call back into the host from their
/// own handlers.
#[derive(Default)]
pub struct SimHost {
    bus: EventBus,
    clock: Cell<u64>,
    next_owner: Cell<u64>,
    connected: RefCell<HashSet<OwnerId>>,
    viewing: RefCell<HashMap<OwnerId, Surface>>,
    surfaces: RefCell<Vec<Surface>>,
    tasks: RefCell<TaskQueue>,
    pending: RefCell<VecDeque<Event>>,
    pumping: Cell<bool>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    // -- driver API --

    /// Connect a new owner and return its handle.
    pub fn connect(&self) -> OwnerId {
        let owner = OwnerId::new(self.next_owner.get() + 1);
        self.next_owner.set(owner.raw());
        self.connected.borrow_mut().insert(owner);
        trace!("{owner} connected");
        owner
    }

    /// Disconnect `owner`: their view closes, their surfaces are revoked,
    /// and the quit event is delivered last.
    pub fn disconnect(&self, owner: OwnerId) {
        if !self.connected.borrow_mut().remove(&owner) {
            return;
        }
        trace!("{owner} disconnected");
        if let Some(surface) = self.viewing.borrow_mut().remove(&owner) {
            self.push(Event::SurfaceClosed { owner, surface });
        }
        for surface in self.surfaces.borrow().iter() {
            if surface.owner() == owner {
                surface.revoke();
            }
        }
        self.push(Event::Quit { owner });
        self.pump();
    }

    /// The owner's character died.
    pub fn kill(&self, owner: OwnerId) {
        self.push(Event::Death { owner });
        self.pump();
    }

    /// The owner teleported.
    pub fn teleport(&self, owner: OwnerId) {
        self.push(Event::Teleport { owner });
        self.pump();
    }

    /// The owner moved to another world.
    pub fn change_world(&self, owner: OwnerId) {
        self.push(Event::WorldChange { owner });
        self.pump();
    }

    /// Click `slot` on whatever surface the owner currently views. Returns
    /// whether some handler cancelled the click, or `None` when the owner
    /// has nothing open.
    pub fn click(&self, owner: OwnerId, slot: usize) -> Option<bool> {
        self.click_raw(owner, slot, slot)
    }

    /// Click with distinct view-space and grid indices, as when the click
    /// lands in the owner's personal slot region below the presented grid.
    pub fn click_raw(&self, owner: OwnerId, raw_slot: usize, slot: usize) -> Option<bool> {
        let surface = self.viewing(owner)?;
        let mut event = Event::Click(ClickEvent::new(owner, surface, raw_slot, slot));
        self.bus.dispatch(&mut event);
        let cancelled = match &event {
            Event::Click(click) => click.is_cancelled(),
            _ => false,
        };
        self.pump();
        Some(cancelled)
    }

    /// Drag across whatever surface the owner currently views. Returns
    /// whether some handler cancelled the drag.
    pub fn drag(&self, owner: OwnerId) -> Option<bool> {
        let surface = self.viewing(owner)?;
        let mut event = Event::Drag(DragEvent::new(owner, surface));
        self.bus.dispatch(&mut event);
        let cancelled = match &event {
            Event::Drag(drag) => drag.is_cancelled(),
            _ => false,
        };
        self.pump();
        Some(cancelled)
    }

    /// Queue an arbitrary event and deliver it.
    pub fn inject(&self, event: Event) {
        self.push(event);
        self.pump();
    }

    /// The surface `owner` currently views, if any.
    pub fn viewing(&self, owner: OwnerId) -> Option<Surface> {
        self.viewing.borrow().get(&owner).cloned()
    }

    /// Number of deferred tasks waiting in the scheduler.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Current scheduler tick.
    pub fn now(&self) -> u64 {
        self.clock.get()
    }

    /// Advance the clock one tick: deliver events queued since the last
    /// pump point, then run every task that came due, pumping after each.
    pub fn tick(&self) {
        let now = self.clock.get() + 1;
        self.clock.set(now);
        trace!("tick {now}");
        self.pump();
        loop {
            let task = self.tasks.borrow_mut().pop_due(now);
            match task {
                Some(task) => {
                    task();
                    self.pump();
                }
                None => break,
            }
        }
    }

    /// Advance `n` ticks.
    pub fn advance(&self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    // -- private helpers --

    fn push(&self, event: Event) {
        self.pending.borrow_mut().push_back(event);
    }

    fn pump(&self) {
        if self.pumping.get() {
            // Already draining further up the stack.
            return;
        }
        self.pumping.set(true);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(mut event) => self.bus.dispatch(&mut event),
                None => break,
            }
        }
        self.pumping.set(false);
    }
}

impl Host for SimHost {
    fn create_surface(&self, owner: OwnerId, slot_count: usize, title: &str) -> Surface {
        let surface = Surface::new(owner, slot_count, title);
        self.surfaces.borrow_mut().push(surface.clone());
        surface
    }

    fn open_surface(&self, owner: OwnerId, surface: &Surface) {
        // Replacing a view does not emit a close for the old surface;
        // sessions watch for foreign opens instead.
        self.viewing.borrow_mut().insert(owner, surface.clone());
        self.push(Event::SurfaceOpened {
            owner,
            surface: surface.clone(),
        });
    }

    fn close_surface(&self, owner: OwnerId) {
        if let Some(surface) = self.viewing.borrow_mut().remove(&owner) {
            self.push(Event::SurfaceClosed { owner, surface });
        }
    }

    fn is_connected(&self, owner: OwnerId) -> bool {
        self.connected.borrow().contains(&owner)
    }

    fn run_after_ticks(&self, delay: u32, task: Task) {
        let due = self.clock.get() + u64::from(delay.max(1));
        self.tasks.borrow_mut().push(due, task);
    }

    fn events(&self) -> &EventBus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotui_core::Item;

    fn record_events(host: &SimHost) -> (Rc<RefCell<Vec<String>>>, slotui_core::Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = host.events().subscribe(Rc::new(move |event: &mut Event| {
            let tag = match event {
                Event::Quit { .. } => "quit",
                Event::Death { .. } => "death",
                Event::WorldChange { .. } => "world",
                Event::Teleport { .. } => "teleport",
                Event::SurfaceOpened { .. } => "opened",
                Event::SurfaceClosed { .. } => "closed",
                Event::Click(_) => "click",
                Event::Drag(_) => "drag",
            };
            sink.borrow_mut().push(tag.to_string());
        }));
        (log, sub)
    }

    #[test]
    fn connect_and_disconnect() {
        let host = SimHost::new();
        let owner = host.connect();
        assert!(host.is_connected(owner));
        host.disconnect(owner);
        assert!(!host.is_connected(owner));
        // A second disconnect is a no-op.
        host.disconnect(owner);
    }

    #[test]
    fn disconnect_closes_view_then_quits() {
        let host = SimHost::new();
        let owner = host.connect();
        let surface = host.create_surface(owner, 9, "chest");
        host.open_surface(owner, &surface);
        host.tick();

        let (log, _sub) = record_events(&host);
        host.disconnect(owner);
        assert_eq!(*log.borrow(), vec!["closed", "quit"]);
        assert!(surface.is_revoked());
    }

    #[test]
    fn open_is_delivered_at_next_pump_point() {
        let host = SimHost::new();
        let owner = host.connect();
        let (log, _sub) = record_events(&host);

        let surface = host.create_surface(owner, 9, "chest");
        host.open_surface(owner, &surface);
        assert!(log.borrow().is_empty());
        host.tick();
        assert_eq!(*log.borrow(), vec!["opened"]);
        assert!(host.viewing(owner).is_some_and(|s| s.same(&surface)));
    }

    #[test]
    fn replacing_a_view_emits_no_close() {
        let host = SimHost::new();
        let owner = host.connect();
        let first = host.create_surface(owner, 9, "a");
        let second = host.create_surface(owner, 9, "b");
        host.open_surface(owner, &first);
        host.tick();

        let (log, _sub) = record_events(&host);
        host.open_surface(owner, &second);
        host.tick();
        assert_eq!(*log.borrow(), vec!["opened"]);
        assert!(host.viewing(owner).is_some_and(|s| s.same(&second)));
    }

    #[test]
    fn zero_delay_runs_on_the_next_tick() {
        let host = SimHost::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        host.run_after_ticks(0, Box::new(move || flag.set(true)));
        assert_eq!(host.pending_tasks(), 1);
        assert!(!ran.get());
        host.tick();
        assert!(ran.get());
        assert_eq!(host.pending_tasks(), 0);
    }

    #[test]
    fn tasks_scheduled_by_tasks_wait_a_tick() {
        let host = Rc::new(SimHost::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_host = Rc::clone(&host);
        let inner_order = Rc::clone(&order);
        let outer_order = Rc::clone(&order);
        host.run_after_ticks(
            1,
            Box::new(move || {
                outer_order.borrow_mut().push("outer");
                let inner_order = Rc::clone(&inner_order);
                inner_host.run_after_ticks(1, Box::new(move || inner_order.borrow_mut().push("inner")));
            }),
        );

        host.tick();
        assert_eq!(*order.borrow(), vec!["outer"]);
        host.tick();
        assert_eq!(*order.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn click_reports_cancellation() {
        let host = SimHost::new();
        let owner = host.connect();
        let surface = host.create_surface(owner, 9, "chest");
        surface.set_slot(3, Item::new('x', "X")).unwrap();
        host.open_surface(owner, &surface);
        host.tick();

        let _sub = host.events().subscribe(Rc::new(|event: &mut Event| {
            if let Event::Click(click) = event {
                click.cancel();
            }
        }));
        assert_eq!(host.click(owner, 3), Some(true));
        assert_eq!(host.drag(owner), Some(false));

        host.close_surface(owner);
        host.tick();
        assert_eq!(host.click(owner, 3), None);
    }

    #[test]
    fn events_queued_by_handlers_arrive_after_the_current_one() {
        let host = Rc::new(SimHost::new());
        let owner = host.connect();
        let surface = host.create_surface(owner, 9, "chest");

        let order = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&order);
        let inner_host = Rc::clone(&host);
        let _sub = host.events().subscribe(Rc::new(move |event: &mut Event| {
            match event {
                Event::SurfaceOpened { owner, .. } => {
                    sink.borrow_mut().push("opened");
                    // Close back immediately; the close must not interrupt
                    // the open dispatch.
                    inner_host.close_surface(*owner);
                }
                Event::SurfaceClosed { .. } => sink.borrow_mut().push("closed"),
                _ => {}
            }
        }));

        host.open_surface(owner, &surface);
        host.tick();
        assert_eq!(*order.borrow(), vec!["opened", "closed"]);
    }
}
