// File: crates/pyramid-core/src/resize.rs
// Summary: Container with a measurable size and a resize signal; subscriptions detach on drop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut((f64, f64))>;

/// A drawing-surface-capable host: the single owner of the current outer
/// size, and the trigger source for resize-driven re-renders. Single-threaded
/// by construction; listeners run to completion before `set_size` returns.
pub struct Container {
    size: Cell<(f64, f64)>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new((width, height)),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Current outer size. Measured fresh by every pipeline pass.
    pub fn measure(&self) -> (f64, f64) {
        self.size.get()
    }

    /// Change the size and notify listeners synchronously.
    pub fn set_size(&self, width: f64, height: f64) {
        self.size.set((width, height));
        self.emit();
    }

    /// Re-deliver the current size to every listener. Listeners must not
    /// subscribe or unsubscribe from inside the callback.
    pub fn emit(&self) {
        let size = self.size.get();
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(size);
        }
    }

    pub fn subscribe(self: &Rc<Self>, listener: impl FnMut((f64, f64)) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        Subscription { id, container: Rc::downgrade(self) }
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Registration handle for a resize listener. Dropping it releases the
/// listener, so an embedding application never accumulates stale
/// subscriptions.
pub struct Subscription {
    id: u64,
    container: Weak<Container>,
}

impl Subscription {
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(container) = self.container.upgrade() {
            container.unsubscribe(self.id);
        }
    }
}
