//! # View Model Store
//!
//! Keyed registry of state containers scoped to back stack entries.
//!
//! ```text
//! ViewModelStore
//! └── EntryId ──► TypeId ──► Rc<RefCell<T>>
//! ```
//!
//! Containers are created lazily on first request. Every request with the
//! same owner and type returns the same `Rc`, so any screen holding the
//! owner's id sees the same instance. Nothing is collected implicitly: the
//! controller calls [`ViewModelStore::clear`] when an owner entry is
//! destroyed.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::controller::EntryId;

#[derive(Default)]
pub struct ViewModelStore {
    scopes: HashMap<EntryId, HashMap<TypeId, Rc<dyn Any>>>,
}

impl ViewModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `T` owned by `owner`, creating it with `init` if absent.
    pub fn get_or_create<T: 'static>(
        &mut self,
        owner: EntryId,
        init: impl FnOnce() -> T,
    ) -> Rc<RefCell<T>> {
        let scope = self.scopes.entry(owner).or_default();
        let key = TypeId::of::<T>();

        if let Some(existing) = scope.get(&key)
            && let Ok(view_model) = Rc::clone(existing).downcast::<RefCell<T>>()
        {
            return view_model;
        }

        let view_model = Rc::new(RefCell::new(init()));
        scope.insert(key, view_model.clone());
        view_model
    }

    /// Drops every container owned by `owner`. Returns whether any existed.
    pub fn clear(&mut self, owner: EntryId) -> bool {
        self.scopes.remove(&owner).is_some()
    }

    pub fn contains(&self, owner: EntryId) -> bool {
        self.scopes.contains_key(&owner)
    }
}
