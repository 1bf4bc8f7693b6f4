//! Change notification feed
//!
//! A fire-and-forget "something changed, refresh" signal. Handlers registered
//! with [`ChangeFeed::on_change`] run synchronously from [`ChangeFeed::notify`],
//! in registration order. The returned [`Subscription`] cancels the handler when
//! cancelled or dropped.
//!
//! The feed is single-threaded. Handlers may subscribe or cancel from inside a
//! dispatch; new handlers first run on the next notification.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Handler {
    active: Rc<Cell<bool>>,
    callback: Box<dyn FnMut()>,
}

#[derive(Default)]
pub struct ChangeFeed {
    handlers: RefCell<Vec<Handler>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` to run on every notification.
    #[must_use = "dropping the subscription cancels it"]
    pub fn on_change<F>(&self, handler: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        let active = Rc::new(Cell::new(true));
        self.handlers.borrow_mut().push(Handler {
            active: Rc::clone(&active),
            callback: Box::new(handler),
        });
        Subscription { active }
    }

    /// Run every live handler once. Returns how many ran.
    pub fn notify(&self) -> usize {
        let mut dispatching = std::mem::take(&mut *self.handlers.borrow_mut());
        let mut delivered = 0;
        for handler in dispatching.iter_mut() {
            if handler.active.get() {
                (handler.callback)();
                delivered += 1;
            }
        }

        let mut handlers = self.handlers.borrow_mut();
        let added = std::mem::take(&mut *handlers);
        dispatching.retain(|handler| handler.active.get());
        dispatching.extend(added);
        *handlers = dispatching;

        log::debug!("Change notification delivered to {} handler(s)", delivered);
        delivered
    }

    /// Live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .borrow()
            .iter()
            .filter(|handler| handler.active.get())
            .count()
    }
}

/// Handle to a registered change handler.
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Keep the handler registered for the lifetime of the feed.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
