//! Per-resource state containers: the in-memory cache of the last-fetched
//! list plus loading/error/reload flags, driven through `use_reducer`.
//! Mutations apply their result to the cache and, for deletes, raise the
//! reload flag so consumers re-fetch instead of trusting the cache.

use std::rc::Rc;

use yew::Reducible;

use crate::api::TransactionFilter;
use crate::models::{
    Announcement, Client, ProofOfTransaction, Service, TaxForm, Transaction,
};

pub trait Identified {
    fn record_id(&self) -> Option<i32>;
}

impl Identified for Client {
    fn record_id(&self) -> Option<i32> {
        self.id
    }
}

impl Identified for Service {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }
}

impl Identified for Transaction {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }
}

impl Identified for TaxForm {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }
}

impl Identified for Announcement {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }
}

impl Identified for ProofOfTransaction {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }
}

#[derive(Clone, PartialEq)]
pub struct ResourceState<T: Clone + PartialEq> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub reload: bool,
}

impl<T: Clone + PartialEq> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            reload: false,
        }
    }
}

pub enum ResourceAction<T> {
    FetchStarted,
    Loaded(Vec<T>),
    LoadedOne(T),
    Added(T),
    Updated(T),
    Removed(i32),
    Failed(String),
}

impl<T: Identified + Clone + PartialEq> ResourceState<T> {
    fn apply(&self, action: ResourceAction<T>) -> Self {
        let mut next = self.clone();
        match action {
            ResourceAction::FetchStarted => {
                next.loading = true;
                next.error = None;
            }
            ResourceAction::Loaded(items) => {
                next.items = items;
                next.loading = false;
                next.error = None;
                next.reload = false;
            }
            ResourceAction::LoadedOne(item) => {
                next.current = Some(item);
                next.loading = false;
            }
            ResourceAction::Added(item) => {
                // Replace instead of append when the server echoes back a
                // record we already hold; the list never gains a duplicate id.
                match next
                    .items
                    .iter()
                    .position(|t| t.record_id().is_some() && t.record_id() == item.record_id())
                {
                    Some(index) => next.items[index] = item,
                    None => next.items.push(item),
                }
                next.loading = false;
            }
            ResourceAction::Updated(item) => {
                if let Some(index) = next
                    .items
                    .iter()
                    .position(|t| t.record_id() == item.record_id())
                {
                    next.items[index] = item;
                }
                next.loading = false;
            }
            ResourceAction::Removed(id) => {
                next.items.retain(|t| t.record_id() != Some(id));
                next.loading = false;
                next.reload = true;
            }
            ResourceAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
        }
        next
    }
}

impl<T: Identified + Clone + PartialEq> Reducible for ResourceState<T> {
    type Action = ResourceAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Transaction container; carries the filter-endpoint result alongside the
/// main list.
#[derive(Clone, PartialEq, Default)]
pub struct TransactionState {
    pub inner: ResourceState<Transaction>,
    pub filtered: Vec<Transaction>,
}

pub enum TransactionAction {
    Resource(ResourceAction<Transaction>),
    Filtered(Vec<Transaction>),
}

impl Reducible for TransactionState {
    type Action = TransactionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            TransactionAction::Resource(inner) => Rc::new(TransactionState {
                inner: self.inner.apply(inner),
                filtered: self.filtered.clone(),
            }),
            TransactionAction::Filtered(filtered) => Rc::new(TransactionState {
                inner: self.inner.clone(),
                filtered,
            }),
        }
    }
}

/// Client-side fallback for the filter endpoint: same semantics (exact name
/// match, inclusive ISO date range) over the already-loaded list.
pub fn filter_locally(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| {
            if let Some(name) = &filter.name {
                if !name.is_empty() && !tx.name.eq_ignore_ascii_case(name) {
                    return false;
                }
            }
            // ISO dates compare correctly as strings.
            if let Some(from) = &filter.date_from {
                if !from.is_empty() && tx.date.as_str() < from.as_str() {
                    return false;
                }
            }
            if let Some(to) = &filter.date_to {
                if !to.is_empty() && tx.date.as_str() > to.as_str() {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Free-text search over the admin transaction table.
pub fn search_transactions(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|tx| {
            tx.name.to_lowercase().contains(&query)
                || tx.business_name.to_lowercase().contains(&query)
                || tx.tin_id.to_lowercase().contains(&query)
                || tx.status.label().to_lowercase().contains(&query)
                || tx.transact.label().to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;

    fn tx(id: i32, name: &str, date: &str) -> Transaction {
        Transaction {
            id,
            name: name.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn state_with(items: Vec<Transaction>) -> ResourceState<Transaction> {
        ResourceState {
            items,
            ..Default::default()
        }
    }

    #[test]
    fn test_added_record_appears_exactly_once() {
        let state = state_with(vec![tx(1, "A", "2025-01-01")]);
        let next = state.apply(ResourceAction::Added(tx(2, "B", "2025-01-02")));
        assert_eq!(next.items.len(), 2);

        // A second Added with the same id replaces rather than duplicates.
        let next = next.apply(ResourceAction::Added(tx(2, "B2", "2025-01-02")));
        assert_eq!(next.items.len(), 2);
        assert_eq!(next.items[1].name, "B2");
    }

    #[test]
    fn test_loaded_one_caches_the_detail_record() {
        let state = state_with(vec![tx(1, "A", "2025-01-01")]);
        let next = state.apply(ResourceAction::LoadedOne(tx(1, "A (refreshed)", "2025-01-01")));
        assert_eq!(next.current.as_ref().map(|t| t.name.as_str()), Some("A (refreshed)"));
        assert_eq!(next.items.len(), 1);
        assert!(!next.loading);
    }

    #[test]
    fn test_updated_record_replaces_in_place() {
        let state = state_with(vec![tx(1, "A", "2025-01-01"), tx(2, "B", "2025-01-02")]);
        let mut changed = tx(2, "B", "2025-01-02");
        changed.status = TransactionStatus::Completed;
        let next = state.apply(ResourceAction::Updated(changed));
        assert_eq!(next.items.len(), 2);
        assert_eq!(next.items[1].status, TransactionStatus::Completed);

        // Updating an id the cache never held leaves the list unchanged.
        let next = next.apply(ResourceAction::Updated(tx(9, "X", "2025-01-09")));
        assert_eq!(next.items.len(), 2);
    }

    #[test]
    fn test_removed_record_leaves_no_stale_entry_and_requests_reload() {
        let state = state_with(vec![tx(1, "A", "2025-01-01"), tx(2, "B", "2025-01-02")]);
        let next = state.apply(ResourceAction::Removed(1));
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.items[0].id, 2);
        assert!(next.reload);

        let next = next.apply(ResourceAction::Loaded(vec![tx(2, "B", "2025-01-02")]));
        assert!(!next.reload);
    }

    #[test]
    fn test_failed_mutation_leaves_list_unchanged() {
        let state = state_with(vec![tx(1, "A", "2025-01-01")]);
        let next = state.apply(ResourceAction::Failed("boom".to_string()));
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.error.as_deref(), Some("boom"));
        assert!(!next.loading);
    }

    #[test]
    fn test_local_filter_matches_name_and_date_range() {
        let list = vec![
            tx(1, "Juan Dela Cruz", "2025-03-01"),
            tx(2, "Maria Santos", "2025-03-05"),
            tx(3, "Juan Dela Cruz", "2025-04-01"),
        ];
        let filter = TransactionFilter {
            name: Some("juan dela cruz".to_string()),
            date_from: Some("2025-03-01".to_string()),
            date_to: Some("2025-03-31".to_string()),
        };
        let out = filter_locally(&list, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let list = vec![
            tx(1, "Juan Dela Cruz", "2025-03-01"),
            tx(2, "Maria Santos", "2025-03-05"),
        ];
        let filter = TransactionFilter {
            name: None,
            date_from: Some("2025-03-01".to_string()),
            date_to: Some("2025-03-05".to_string()),
        };
        let once = filter_locally(&list, &filter);
        let twice = filter_locally(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_matches_across_fields() {
        let mut a = tx(1, "Juan Dela Cruz", "2025-03-01");
        a.business_name = "Sari-Sari Store".to_string();
        let b = tx(2, "Maria Santos", "2025-03-05");
        let list = vec![a, b];

        assert_eq!(search_transactions(&list, "sari").len(), 1);
        assert_eq!(search_transactions(&list, "maria").len(), 1);
        assert_eq!(search_transactions(&list, "").len(), 2);
        assert_eq!(search_transactions(&list, "pending").len(), 2);
    }
}
