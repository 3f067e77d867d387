//! # Navigation Controller
//!
//! Owns the back stack for one [`NavGraph`] and tells listeners when the
//! current destination changes.
//!
//! ```text
//! back stack (bottom → top)
//! nav_host ─ first ─ second_graph ─ first/second ─ second
//!    group     leaf      group          leaf         leaf
//! ```
//!
//! Group entries are pushed beneath their first child and popped once no
//! child remains above them, so a group entry always outlives the entries
//! of its children. Entering a group again from outside it pushes a fresh
//! group entry; only an entry whose stack tail is still inside the group
//! is reused. View models live in a [`ViewModelStore`] keyed by entry
//! id and are evicted exactly when their entry is destroyed.
//!
//! ## Saved stacks
//!
//! `pop_up_to` with `save_state` moves the popped entries into a saved
//! stack instead of destroying them. Every popped destination maps to that
//! stack; a later `navigate` with `restore_state` to any of them pushes the
//! same entries back. A destination saved twice drops the older stack once
//! nothing else points to it.
//!
//! All of this runs on one thread. Listeners are plain closures behind
//! `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use uuid::Uuid;

use super::error::NavError;
use super::graph::{Destination, DestinationId, NavGraph};
use super::store::ViewModelStore;

/// Identity of one visit to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStackEntry {
    pub id: EntryId,
    pub destination: DestinationId,
}

impl BackStackEntry {
    fn new(destination: DestinationId) -> Self {
        Self {
            id: EntryId::new(),
            destination,
        }
    }
}

/// Options for [`NavController::navigate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Don't push a second entry when the target leaf is already on top.
    pub launch_single_top: bool,
    /// Bring back a stack saved by an earlier `pop_up_to(.., save_state)`.
    pub restore_state: bool,
    pub pop_up_to: Option<PopUpTo>,
}

impl NavOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch_single_top(mut self, enabled: bool) -> Self {
        self.launch_single_top = enabled;
        self
    }

    pub fn restore_state(mut self, enabled: bool) -> Self {
        self.restore_state = enabled;
        self
    }

    pub fn pop_up_to(mut self, pop_up_to: PopUpTo) -> Self {
        self.pop_up_to = Some(pop_up_to);
        self
    }
}

/// Pop the back stack down to `route` before navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopUpTo {
    pub route: String,
    /// Also pop the entry for `route` itself.
    pub inclusive: bool,
    /// Keep the popped entries for a later `restore_state`.
    pub save_state: bool,
}

impl PopUpTo {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            inclusive: false,
            save_state: false,
        }
    }

    pub fn inclusive(mut self, enabled: bool) -> Self {
        self.inclusive = enabled;
        self
    }

    pub fn save_state(mut self, enabled: bool) -> Self {
        self.save_state = enabled;
        self
    }
}

/// Payload of a destination-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationChanged {
    pub entry: EntryId,
    pub destination: DestinationId,
    pub route: String,
    /// Route keys of the destination and its enclosing groups, leaf to root.
    pub hierarchy: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<RefCell<dyn FnMut(&DestinationChanged)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    slots: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.slots.iter().any(|(slot_id, _)| *slot_id == id)
    }
}

/// Deregisters its listener when dropped.
///
/// Holds only a weak reference to the controller's listener list, so
/// dropping it after the controller is gone does nothing.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: ListenerId,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.id);
            debug!("Listener {:?} released", self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SavedStackId(u64);

pub struct NavController {
    graph: NavGraph,
    back_stack: Vec<BackStackEntry>,
    saved_stacks: HashMap<SavedStackId, Vec<BackStackEntry>>,
    saved_by_destination: HashMap<DestinationId, SavedStackId>,
    next_saved_id: u64,
    store: ViewModelStore,
    listeners: Rc<RefCell<Listeners>>,
}

impl NavController {
    /// Creates a controller sitting on the graph's start destination.
    pub fn new(graph: NavGraph) -> Self {
        let mut controller = Self {
            graph,
            back_stack: Vec::new(),
            saved_stacks: HashMap::new(),
            saved_by_destination: HashMap::new(),
            next_saved_id: 0,
            store: ViewModelStore::new(),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        };
        let start = controller.graph.find_start_destination();
        controller.push(start);
        controller
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn back_stack(&self) -> &[BackStackEntry] {
        &self.back_stack
    }

    /// Topmost leaf entry.
    pub fn current_entry(&self) -> Option<&BackStackEntry> {
        self.back_stack
            .iter()
            .rev()
            .find(|entry| !self.graph.destination(entry.destination).is_group())
    }

    pub fn current_destination(&self) -> Option<&Destination> {
        self.current_entry()
            .map(|entry| self.graph.destination(entry.destination))
    }

    pub fn current_route(&self) -> Option<&str> {
        self.current_destination().map(|d| d.route.as_str())
    }

    pub fn saved_stack_count(&self) -> usize {
        self.saved_stacks.len()
    }

    pub fn store(&self) -> &ViewModelStore {
        &self.store
    }

    /// Navigates to `route`, applying `options` in order: pop, restore, push.
    pub fn navigate(&mut self, route: &str, options: NavOptions) -> Result<(), NavError> {
        let target = self
            .graph
            .find(route)
            .ok_or_else(|| NavError::UnknownRoute(route.to_string()))?;
        let pop_target = match &options.pop_up_to {
            Some(pop) => {
                let id = self
                    .graph
                    .find(&pop.route)
                    .ok_or_else(|| NavError::UnknownRoute(pop.route.clone()))?;
                Some((id, pop))
            }
            None => None,
        };

        let previous = self.current_entry().map(|entry| entry.id);
        debug!("Navigate to {} with {:?}", route, options);

        if let Some((id, pop)) = pop_target {
            self.pop_up_to(id, pop.inclusive, pop.save_state);
        }

        let restored = options.restore_state && self.restore(target);
        if !restored {
            let leaf = self.graph.start_leaf(target);
            let already_on_top = self
                .current_entry()
                .is_some_and(|entry| entry.destination == leaf);
            if options.launch_single_top && already_on_top {
                debug!("{} already on top, not pushing", self.graph.route(leaf));
            } else {
                self.push(leaf);
            }
        }

        self.dispatch_if_changed(previous);
        Ok(())
    }

    /// Pops the current leaf plus any group entries it leaves on top.
    /// Returns `false` without popping when only one leaf is left.
    pub fn pop_back_stack(&mut self) -> bool {
        let leaves = self
            .back_stack
            .iter()
            .filter(|entry| !self.graph.destination(entry.destination).is_group())
            .count();
        if leaves <= 1 {
            return false;
        }

        let previous = self.current_entry().map(|entry| entry.id);
        let mut popped = Vec::new();
        if let Some(top) = self.back_stack.pop() {
            popped.push(top);
        }
        while self
            .back_stack
            .last()
            .is_some_and(|entry| self.graph.destination(entry.destination).is_group())
        {
            if let Some(group) = self.back_stack.pop() {
                popped.push(group);
            }
        }
        self.destroy(popped);

        self.dispatch_if_changed(previous);
        true
    }

    /// Last entry on the back stack for `route`.
    pub fn get_back_stack_entry(&self, route: &str) -> Result<&BackStackEntry, NavError> {
        let id = self
            .graph
            .find(route)
            .ok_or_else(|| NavError::UnknownRoute(route.to_string()))?;
        self.back_stack
            .iter()
            .rev()
            .find(|entry| entry.destination == id)
            .ok_or_else(|| NavError::NotOnBackStack(route.to_string()))
    }

    /// The `T` scoped to `owner`, created with `init` on first request.
    pub fn view_model<T: 'static>(
        &mut self,
        owner: EntryId,
        init: impl FnOnce() -> T,
    ) -> Result<Rc<RefCell<T>>, NavError> {
        if !self.is_alive(owner) {
            return Err(NavError::EntryNotAlive(owner));
        }
        Ok(self.store.get_or_create(owner, init))
    }

    /// The `T` scoped to the live entry of the group `route`.
    pub fn graph_view_model<T: 'static>(
        &mut self,
        route: &str,
        init: impl FnOnce() -> T,
    ) -> Result<Rc<RefCell<T>>, NavError> {
        let owner = self.get_back_stack_entry(route)?.id;
        self.view_model(owner, init)
    }

    /// Registers `listener`. It is called right away with the current
    /// destination, then on every change.
    pub fn add_on_destination_changed_listener(
        &mut self,
        listener: impl FnMut(&DestinationChanged) + 'static,
    ) -> ListenerId {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = self.listeners.borrow_mut().add(Rc::clone(&listener));
        if let Some(event) = self.current_event() {
            let mut callback = listener.borrow_mut();
            (&mut *callback)(&event);
        }
        id
    }

    pub fn remove_on_destination_changed_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id)
    }

    /// Like [`Self::add_on_destination_changed_listener`], but the listener
    /// lives only as long as the returned [`Subscription`].
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&DestinationChanged) + 'static,
    ) -> Subscription {
        let id = self.add_on_destination_changed_listener(listener);
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().slots.len()
    }

    fn push(&mut self, leaf: DestinationId) {
        let mut groups: Vec<DestinationId> =
            self.graph.hierarchy(leaf).skip(1).map(|d| d.id).collect();
        groups.reverse();

        for group in groups {
            if !self.is_open_group(group) {
                self.back_stack.push(BackStackEntry::new(group));
            }
        }
        self.back_stack.push(BackStackEntry::new(leaf));
    }

    /// Whether the last entry for `group` has only its own descendants
    /// above it.
    fn is_open_group(&self, group: DestinationId) -> bool {
        let Some(index) = self
            .back_stack
            .iter()
            .rposition(|entry| entry.destination == group)
        else {
            return false;
        };
        self.back_stack[index + 1..].iter().all(|entry| {
            self.graph
                .hierarchy(entry.destination)
                .any(|ancestor| ancestor.id == group)
        })
    }

    fn pop_up_to(&mut self, destination: DestinationId, inclusive: bool, save_state: bool) {
        let Some(index) = self
            .back_stack
            .iter()
            .rposition(|entry| entry.destination == destination)
        else {
            warn!(
                "popUpTo target {} is not on the back stack, ignoring",
                self.graph.route(destination)
            );
            return;
        };

        let cut = if inclusive { index } else { index + 1 };
        let popped = self.back_stack.split_off(cut);
        if popped.is_empty() {
            return;
        }
        if save_state {
            self.save(popped);
        } else {
            self.destroy(popped);
        }
    }

    fn save(&mut self, entries: Vec<BackStackEntry>) {
        let stack_id = SavedStackId(self.next_saved_id);
        self.next_saved_id += 1;

        let mut replaced = Vec::new();
        for entry in &entries {
            if let Some(old) = self.saved_by_destination.insert(entry.destination, stack_id) {
                replaced.push(old);
            }
        }
        debug!("Saved {} entries as stack {:?}", entries.len(), stack_id);
        self.saved_stacks.insert(stack_id, entries);

        for old in replaced {
            let still_referenced = self.saved_by_destination.values().any(|id| *id == old);
            if !still_referenced && let Some(orphan) = self.saved_stacks.remove(&old) {
                debug!("Discarding saved stack {:?}", old);
                self.destroy(orphan);
            }
        }
    }

    fn restore(&mut self, destination: DestinationId) -> bool {
        let Some(stack_id) = self.saved_by_destination.get(&destination).copied() else {
            return false;
        };
        self.saved_by_destination.retain(|_, id| *id != stack_id);
        let Some(entries) = self.saved_stacks.remove(&stack_id) else {
            return false;
        };
        debug!("Restoring {} entries from stack {:?}", entries.len(), stack_id);
        self.back_stack.extend(entries);
        true
    }

    fn destroy(&mut self, entries: Vec<BackStackEntry>) {
        for entry in entries {
            if self.store.clear(entry.id) {
                debug!(
                    "Cleared view models of {} ({})",
                    self.graph.route(entry.destination),
                    entry.id
                );
            }
        }
    }

    fn is_alive(&self, id: EntryId) -> bool {
        self.back_stack.iter().any(|entry| entry.id == id)
            || self
                .saved_stacks
                .values()
                .flatten()
                .any(|entry| entry.id == id)
    }

    fn current_event(&self) -> Option<DestinationChanged> {
        let entry = self.current_entry()?;
        let destination = self.graph.destination(entry.destination);
        Some(DestinationChanged {
            entry: entry.id,
            destination: destination.id,
            route: destination.route.clone(),
            hierarchy: self
                .graph
                .hierarchy(destination.id)
                .map(|d| d.route.clone())
                .collect(),
        })
    }

    fn dispatch_if_changed(&self, previous: Option<EntryId>) {
        let Some(event) = self.current_event() else {
            return;
        };
        if previous == Some(event.entry) {
            return;
        }
        debug!("Destination changed to {} ({})", event.route, event.entry);

        // Listeners removed by an earlier callback in this pass are skipped.
        let snapshot: Vec<(ListenerId, Listener)> = self.listeners.borrow().slots.clone();
        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            let mut callback = listener.borrow_mut();
            (&mut *callback)(&event);
        }
    }
}
