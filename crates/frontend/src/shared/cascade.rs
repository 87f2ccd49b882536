//! One link of a chain of dependent dropdowns.
//!
//! A link knows its selected id, the options for the current parent and
//! whether those options are still loading. Changing the parent goes through
//! [`CascadeLink::request`], which either serves the options from the
//! per-parent cache or hands out a [`LoadTicket`] for the caller to fetch
//! with. Every request and reset bumps the link generation, so the answer
//! to an older ticket is dropped instead of overwriting newer state.
//!
//! The link does no I/O itself; view models own the fetch and feed the
//! outcome back through [`CascadeLink::resolve`] or [`CascadeLink::fail`].

use super::option_cache::OptionCache;
use contracts::domain::common::{find_option, RecordId, SelectOption};
use std::fmt::Debug;
use std::hash::Hash;

/// Proof that a fetch was started for `key` at a given generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<K> {
    key: K,
    generation: u64,
}

impl<K> LoadTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// What the caller has to do after [`CascadeLink::request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkLoad<K> {
    /// No parent; the link is cleared and disabled
    Disabled,
    /// Options were served from the cache, nothing to fetch
    Cached,
    Fetch(LoadTicket<K>),
}

impl<K> LinkLoad<K> {
    pub fn into_ticket(self) -> Option<LoadTicket<K>> {
        match self {
            LinkLoad::Fetch(ticket) => Some(ticket),
            LinkLoad::Disabled | LinkLoad::Cached => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CascadeLink<K, T> {
    selected: Option<RecordId>,
    options: Vec<T>,
    loading: bool,
    enabled: bool,
    generation: u64,
    cache: OptionCache<K, T>,
}

impl<K, T> Default for CascadeLink<K, T> {
    fn default() -> Self {
        Self {
            selected: None,
            options: Vec::new(),
            loading: false,
            enabled: false,
            generation: 0,
            cache: OptionCache::default(),
        }
    }
}

impl<K, T> CascadeLink<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: SelectOption,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Disabled while loading and while there is no parent
    pub fn is_disabled(&self) -> bool {
        !self.enabled || self.loading
    }

    /// The selected option, if it is among the loaded options
    pub fn selected_option(&self) -> Option<&T> {
        find_option(&self.options, self.selected?)
    }

    pub fn selected_label(&self) -> String {
        self.selected_option()
            .map(SelectOption::option_label)
            .unwrap_or_default()
    }

    pub fn select(&mut self, id: Option<RecordId>) {
        self.selected = id.and_then(RecordId::non_zero);
    }

    /// Clears the selection and options and disables the link.
    /// Any fetch still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.options.clear();
        self.loading = false;
        self.enabled = false;
    }

    /// Points the link at a new parent. The selection is cleared.
    pub fn request(&mut self, key: Option<K>) -> LinkLoad<K> {
        self.reset();
        let Some(key) = key else {
            return LinkLoad::Disabled;
        };

        if let Some(cached) = self.cache.get(&key) {
            log::debug!("option cache hit for {:?}", key);
            self.options = cached.to_vec();
            self.enabled = true;
            return LinkLoad::Cached;
        }

        self.loading = true;
        LinkLoad::Fetch(LoadTicket {
            key,
            generation: self.generation,
        })
    }

    /// Like [`Self::request`] but keeps `selected` in place, used when a
    /// stored row is opened for editing and its ancestors are already known.
    pub fn prime(&mut self, key: Option<K>, selected: Option<RecordId>) -> LinkLoad<K> {
        let load = self.request(key);
        if !matches!(load, LinkLoad::Disabled) {
            self.select(selected);
        }
        load
    }

    pub fn is_current(&self, ticket: &LoadTicket<K>) -> bool {
        ticket.generation == self.generation
    }

    /// Applies fetched options. Returns `false` when the ticket is stale.
    pub fn resolve(&mut self, ticket: LoadTicket<K>, options: Vec<T>) -> bool {
        if !self.is_current(&ticket) {
            log::debug!("dropping stale options for {:?}", ticket.key);
            return false;
        }
        self.cache.insert(ticket.key, options.clone());
        self.options = options;
        self.loading = false;
        self.enabled = true;
        true
    }

    /// A failed fetch leaves an empty, usable link and caches nothing
    pub fn fail(&mut self, ticket: LoadTicket<K>) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.options.clear();
        self.loading = false;
        self.enabled = true;
        true
    }

    pub fn cached_parents(&self) -> usize {
        self.cache.len()
    }
}
