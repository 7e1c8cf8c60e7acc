//! Deferred-task queue backing the simulated tick scheduler.
//!
//! Tasks are stored in a min-heap keyed by `(due_tick, insertion_order)`.
//! Earlier ticks are popped first; ties are broken by insertion order
//! (FIFO).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use slotui_core::Task;

/// An entry in the task queue.
struct Entry {
    task: Task,
    due: u64,
    /// Monotonically increasing counter used to break ties.
    /// Lower = scheduled earlier = runs first within a tick.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap, so this is the "natural"
        // ordering: smaller due tick first, then smaller seq.
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of deferred tasks keyed by due tick, FIFO within a tick.
#[derive(Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run once the clock reaches `due`.
    pub fn push(&mut self, due: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { task, due, seq }));
    }

    /// Pop the next task due at or before `now`, if any.
    pub fn pop_due(&mut self, now: u64) -> Option<Task> {
        if self.heap.peek().is_some_and(|Reverse(e)| e.due <= now) {
            self.heap.pop().map(|Reverse(e)| e.task)
        } else {
            None
        }
    }

    /// Tick at which the next task is due.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(e)| e.due)
    }

    /// Number of tasks waiting.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Task {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(tag))
    }

    fn drain(queue: &mut TaskQueue, now: u64) {
        while let Some(task) = queue.pop_due(now) {
            task();
        }
    }

    #[test]
    fn earlier_due_pops_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = TaskQueue::new();
        queue.push(5, recorder(&log, 5));
        queue.push(2, recorder(&log, 2));
        queue.push(9, recorder(&log, 9));

        assert_eq!(queue.next_due(), Some(2));
        drain(&mut queue, 9);
        assert_eq!(*log.borrow(), vec![2, 5, 9]);
    }

    #[test]
    fn same_tick_is_fifo() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = TaskQueue::new();
        for tag in 0..4 {
            queue.push(1, recorder(&log, tag));
        }
        drain(&mut queue, 1);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn nothing_due_yet() {
        let mut queue = TaskQueue::new();
        queue.push(3, Box::new(|| {}));
        assert!(queue.pop_due(2).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(3).is_some());
        assert!(queue.is_empty());
    }
}
