use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Identifies one scheduled transition of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter owned by a controller. Every new transition bumps it, so
/// a deferred callback from an older transition can tell it was superseded.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) -> Ticket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.get() == ticket.0
    }
}

/// Runs `f` after `millis` unless `generation` moved past `ticket` meanwhile.
/// The timeout itself is never cancelled; stale callbacks just do nothing.
pub fn defer<F>(millis: u32, generation: &Generation, ticket: Ticket, f: F)
where
    F: FnOnce() + 'static,
{
    let generation = generation.clone();
    Timeout::new(millis, move || {
        if generation.is_current(ticket) {
            f();
        } else {
            log::debug!("Skipping superseded deferred callback");
        }
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_is_current() {
        let generation = Generation::new();
        let first = generation.bump();
        assert!(generation.is_current(first));

        let second = generation.bump();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let generation = Generation::new();
        let handle = generation.clone();
        let ticket = generation.bump();
        handle.bump();
        assert!(!generation.is_current(ticket));
    }
}
