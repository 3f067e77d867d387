//! Single-threaded observable value.
//!
//! `State<T>` is a cheap handle (`Rc`) to a value with a change counter.
//! Writers call [`State::set`]; readers poll [`State::get`] and compare
//! [`State::changes`] to decide whether to redraw. Writing an equal value is
//! not a change.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct Slot<T> {
    value: RefCell<T>,
    changes: Cell<u64>,
}

pub struct State<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + PartialEq> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: RefCell::new(value),
                changes: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.slot.value.borrow().clone()
    }

    /// Stores `value`. Returns `false` and leaves the counter alone when the
    /// value is unchanged.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.slot.value.borrow_mut();
        if *current == value {
            return false;
        }
        *current = value;
        self.slot.changes.set(self.slot.changes.get() + 1);
        true
    }

    /// Number of real changes since creation.
    pub fn changes(&self) -> u64 {
        self.slot.changes.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.slot.value.borrow())
            .field("changes", &self.slot.changes.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_counts_only_real_changes() {
        let state = State::new(1);
        assert!(!state.set(1));
        assert_eq!(state.changes(), 0);

        assert!(state.set(2));
        assert!(!state.set(2));
        assert_eq!(state.get(), 2);
        assert_eq!(state.changes(), 1);
    }

    #[test]
    fn test_clones_share_the_value() {
        let writer = State::new("a");
        let reader = writer.clone();
        writer.set("b");
        assert_eq!(reader.get(), "b");
        assert_eq!(reader.changes(), 1);
    }
}
