//! In-memory collection store with filtering, sorting, and selection.
//!
//! Holds the fetched array for one module and derives the visible view on
//! demand: a conjunctive filter chain followed by a stable single-key sort.
//! Collections are small (hundreds of rows), so nothing is indexed or
//! incrementally maintained. Mutation helpers apply optimistic local
//! patches and merge live change-feed events.

use std::collections::HashSet;

use serde::de::DeserializeOwned;

use ghx_core::filter::{FilterSet, Record, SortKey};
use ghx_core::types::RecordId;

use crate::listener::{ChangeKind, ChangeMessage};

/// Local state for one module's collection.
#[derive(Debug, Default)]
pub struct CollectionStore<T> {
    items: Vec<T>,
    selected: HashSet<RecordId>,
    filters: FilterSet,
    sort: Option<SortKey>,
}

impl<T: Record> CollectionStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: HashSet::new(),
            filters: FilterSet::new(),
            sort: None,
        }
    }

    // -- Snapshot management ------------------------------------------------

    /// Swap in a fresh server snapshot (initial fetch, manual refresh, or
    /// the refetch-on-reconnect path). Selection entries whose rows are no
    /// longer present are dropped.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        let ids: HashSet<RecordId> = self.items.iter().map(|i| i.id()).collect();
        self.selected.retain(|id| ids.contains(id));
    }

    /// All rows, unfiltered and in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -- Filtering and sorting ----------------------------------------------

    /// Replace the active filter chain.
    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSet::new();
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Sort by `field`. Sorting by the already-active field toggles the
    /// direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: &str) {
        self.sort = Some(match &self.sort {
            Some(key) if key.field == field => SortKey {
                field: key.field.clone(),
                direction: key.direction.toggled(),
            },
            _ => SortKey::ascending(field),
        });
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// The visible view: rows passing every active filter, in the active
    /// sort order. The sort is stable, so equal keys keep arrival order.
    pub fn visible(&self) -> Vec<&T> {
        let mut view: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.filters.matches(*item))
            .collect();
        if let Some(key) = &self.sort {
            view.sort_by(|a, b| key.compare(*a, *b));
        }
        view
    }

    // -- Selection ----------------------------------------------------------

    /// Toggle one row in or out of the selection.
    pub fn toggle_selected(&mut self, id: RecordId) {
        if !self.selected.insert(id) {
            self.selected.remove(&id);
        }
    }

    /// Add a row to the selection; selecting an already-selected id is a
    /// no-op.
    pub fn select(&mut self, id: RecordId) {
        self.selected.insert(id);
    }

    pub fn deselect(&mut self, id: RecordId) {
        self.selected.remove(&id);
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// Ids currently selected, in no particular order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selected.iter().copied().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // -- Optimistic local patches -------------------------------------------

    /// Prepend a newly created row.
    pub fn insert(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the row with the same id. Returns `false` (and stores
    /// nothing) when no row matches.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove a row by id and drop it from the selection set.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.selected.remove(&id);
        self.items.len() != before
    }
}

impl<T: Record + DeserializeOwned> CollectionStore<T> {
    /// Merge one change-feed event into local state.
    ///
    /// Inserts prepend, updates replace the row with the matching id, and
    /// deletes remove the row and deselect it. Events whose payload does
    /// not deserialize into `T` are ignored with a warning; there is no
    /// sequence tracking, so a missed event is only repaired by the next
    /// full refetch.
    pub fn apply_change(&mut self, event: &ChangeMessage) {
        match event.kind {
            ChangeKind::Insert | ChangeKind::Update => {
                let Some(payload) = &event.new else {
                    tracing::warn!(
                        entity = %event.entity,
                        entity_id = %event.entity_id,
                        "Change event carried no row payload, ignoring"
                    );
                    return;
                };
                let item: T = match serde_json::from_value(payload.clone()) {
                    Ok(item) => item,
                    Err(e) => {
                        tracing::warn!(
                            entity = %event.entity,
                            entity_id = %event.entity_id,
                            error = %e,
                            "Change event payload did not deserialize, ignoring"
                        );
                        return;
                    }
                };
                match event.kind {
                    ChangeKind::Insert => self.insert(item),
                    // Updates for rows we never fetched are dropped; the
                    // next full refetch converges the view.
                    ChangeKind::Update => {
                        self.replace(item);
                    }
                    ChangeKind::Delete => unreachable!(),
                }
            }
            ChangeKind::Delete => {
                self.remove(event.entity_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use ghx_core::filter::{FieldValue, FilterOp, SortDirection};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sheet {
        id: RecordId,
        name: String,
        status: String,
        call_date: NaiveDate,
    }

    impl Sheet {
        fn new(name: &str, status: &str, date: &str) -> Self {
            Self {
                id: Uuid::new_v4(),
                name: name.to_string(),
                status: status.to_string(),
                call_date: date.parse().unwrap(),
            }
        }
    }

    impl Record for Sheet {
        fn id(&self) -> RecordId {
            self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(FieldValue::Text(self.name.clone())),
                "status" => Some(FieldValue::Text(self.status.clone())),
                "call_date" => Some(FieldValue::Date(self.call_date)),
                _ => None,
            }
        }
    }

    fn seeded() -> CollectionStore<Sheet> {
        let mut store = CollectionStore::new();
        store.replace_all(vec![
            Sheet::new("Day 1", "draft", "2025-06-01"),
            Sheet::new("Day 2", "published", "2025-06-02"),
        ]);
        store
    }

    #[test]
    fn filtering_by_status_keeps_matching_rows_only() {
        let mut store = seeded();
        store.set_filters(
            FilterSet::new().with("status", FilterOp::Eq(FieldValue::Text("draft".into()))),
        );

        let visible = store.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Day 1");
    }

    #[test]
    fn filtered_output_is_a_subset_satisfying_every_predicate() {
        let mut store = seeded();
        store.insert(Sheet::new("Day 3", "draft", "2025-06-03"));
        store.set_filters(
            FilterSet::new()
                .with("status", FilterOp::Eq(FieldValue::Text("draft".into())))
                .with(
                    "call_date",
                    FilterOp::Gte(FieldValue::Date("2025-06-02".parse().unwrap())),
                ),
        );

        let visible = store.visible();
        assert_eq!(visible.len(), 1);
        for row in visible {
            assert_eq!(row.status, "draft");
            assert!(row.call_date >= "2025-06-02".parse().unwrap());
        }
    }

    #[test]
    fn sorting_by_status_ascending_orders_draft_before_published() {
        let mut store = seeded();
        store.sort_by("status");

        let statuses: Vec<&str> = store.visible().iter().map(|s| s.status.as_str()).collect();
        assert_eq!(statuses, vec!["draft", "published"]);
    }

    #[test]
    fn sorting_the_same_field_twice_reverses_the_order() {
        let mut store = seeded();
        store.insert(Sheet::new("Day 0", "archived", "2025-05-31"));

        store.sort_by("call_date");
        let ascending: Vec<RecordId> = store.visible().iter().map(|s| s.id).collect();

        store.sort_by("call_date");
        let descending: Vec<RecordId> = store.visible().iter().map(|s| s.id).collect();

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
        assert_eq!(
            store.sort().unwrap().direction,
            SortDirection::Descending
        );
    }

    #[test]
    fn sorting_a_new_field_starts_ascending_again() {
        let mut store = seeded();
        store.sort_by("call_date");
        store.sort_by("call_date");
        store.sort_by("name");
        assert_eq!(store.sort().unwrap().direction, SortDirection::Ascending);
    }

    #[test]
    fn selection_toggle_is_idempotent_under_double_application() {
        let mut store = seeded();
        let id = store.items()[0].id();

        store.select(id);
        store.select(id);
        assert!(store.is_selected(id));
        assert_eq!(store.selected_ids().len(), 1);

        store.toggle_selected(id);
        assert!(!store.is_selected(id));
        store.toggle_selected(id);
        assert!(store.is_selected(id));
    }

    #[test]
    fn replace_all_drops_selection_of_vanished_rows() {
        let mut store = seeded();
        let kept = store.items()[0].clone();
        let gone = store.items()[1].id();
        store.select(kept.id);
        store.select(gone);

        store.replace_all(vec![kept.clone()]);

        assert!(store.is_selected(kept.id));
        assert!(!store.is_selected(gone));
    }

    #[test]
    fn insert_change_event_prepends_the_new_row() {
        let mut store = seeded();
        let incoming = Sheet::new("Day 3", "draft", "2025-06-03");
        let event = ChangeMessage {
            organization_id: Uuid::new_v4(),
            entity: "call_sheets".to_string(),
            entity_id: incoming.id,
            kind: ChangeKind::Insert,
            actor_user_id: None,
            new: Some(serde_json::to_value(&incoming).unwrap()),
            old: None,
        };

        store.apply_change(&event);

        assert_eq!(store.len(), 3);
        assert_eq!(store.items()[0].id, incoming.id);
    }

    #[test]
    fn update_change_event_replaces_the_matching_row() {
        let mut store = seeded();
        let mut changed = store.items()[1].clone();
        changed.status = "archived".to_string();
        let event = ChangeMessage {
            organization_id: Uuid::new_v4(),
            entity: "call_sheets".to_string(),
            entity_id: changed.id,
            kind: ChangeKind::Update,
            actor_user_id: None,
            new: Some(serde_json::to_value(&changed).unwrap()),
            old: None,
        };

        store.apply_change(&event);

        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[1].status, "archived");
    }

    #[test]
    fn delete_change_event_removes_row_and_selection() {
        let mut store = seeded();
        let id = store.items()[0].id();
        store.select(id);

        let event = ChangeMessage {
            organization_id: Uuid::new_v4(),
            entity: "call_sheets".to_string(),
            entity_id: id,
            kind: ChangeKind::Delete,
            actor_user_id: None,
            new: None,
            old: None,
        };
        store.apply_change(&event);

        assert!(store.items().iter().all(|s| s.id != id));
        assert!(!store.is_selected(id));
    }

    #[test]
    fn malformed_change_payload_is_ignored() {
        let mut store = seeded();
        let event = ChangeMessage {
            organization_id: Uuid::new_v4(),
            entity: "call_sheets".to_string(),
            entity_id: Uuid::new_v4(),
            kind: ChangeKind::Insert,
            actor_user_id: None,
            new: Some(serde_json::json!({"unexpected": true})),
            old: None,
        };

        store.apply_change(&event);
        assert_eq!(store.len(), 2);
    }
}
