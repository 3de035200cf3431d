use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        TaskId(raw)
    }
}

/// Something that can run a task later and forget about it on request.
pub trait Deferred {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskId;
    fn cancel(&self, id: TaskId);
}

/// Starts one-shot timers. Dropping the returned handle must stop the timer
/// if it has not fired yet.
pub trait Timer {
    type Handle;

    fn start(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = Timeout;

    fn start(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

struct Pending<H> {
    id: TaskId,
    fired: Rc<Cell<bool>>,
    _handle: H,
}

/// Owns every timer the page controller starts. Cancelling drops the timer
/// handle, which clears it in the browser.
pub struct Scheduler<T: Timer = BrowserTimer> {
    timer: T,
    pending: Rc<RefCell<Vec<Pending<T::Handle>>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T: Timer + Clone> Clone for Scheduler<T> {
    fn clone(&self) -> Self {
        Self {
            timer: self.timer.clone(),
            pending: self.pending.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl Scheduler<BrowserTimer> {
    pub fn new() -> Self {
        Self::with_timer(BrowserTimer)
    }
}

impl Default for Scheduler<BrowserTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timer> Scheduler<T> {
    pub fn with_timer(timer: T) -> Self {
        Self {
            timer,
            pending: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending
            .borrow()
            .iter()
            .filter(|p| !p.fired.get())
            .count()
    }

    pub fn cancel_all(&self) {
        let cancelled: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        drop(cancelled);
    }

    // A fired entry can't drop its own timer from inside the callback, so
    // entries are swept on the next schedule instead.
    fn prune(&self) {
        self.pending.borrow_mut().retain(|p| !p.fired.get());
    }
}

impl<T: Timer> Deferred for Scheduler<T> {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskId {
        self.prune();

        let id = TaskId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let fired = Rc::new(Cell::new(false));
        let fired_flag = fired.clone();
        let handle = self.timer.start(
            delay_ms,
            Box::new(move || {
                fired_flag.set(true);
                task();
            }),
        );

        self.pending.borrow_mut().push(Pending { id, fired, _handle: handle });
        id
    }

    fn cancel(&self, id: TaskId) {
        let removed = {
            let mut pending = self.pending.borrow_mut();
            pending
                .iter()
                .position(|p| p.id == id && !p.fired.get())
                .map(|idx| pending.remove(idx))
        };
        drop(removed);
    }
}
