//! Stateless view projections over a collection.
//!
//! Each projection is a pure function of the items; none of them mutate
//! anything. The list and grid views render
//! [`CollectionStore::visible`](crate::store::CollectionStore::visible)
//! directly; the projections here differ only in grouping strategy: by
//! status column for the board view, by date for calendar and timeline,
//! and by free-text location for the map view. Mutation intents stay with
//! the owning controller.

use chrono::NaiveDate;

use ghx_core::filter::{FieldValue, Record};

/// One status column of a board (kanban) view.
#[derive(Debug)]
pub struct BoardColumn<'a, T> {
    pub status: String,
    pub items: Vec<&'a T>,
}

/// Group items into board columns by their `status` field.
///
/// `statuses` fixes the column order; empty columns are included so the
/// board keeps its shape. Items carrying a status outside the known set get
/// extra columns appended in encounter order.
pub fn board_columns<'a, T: Record>(items: &'a [T], statuses: &[&str]) -> Vec<BoardColumn<'a, T>> {
    let mut columns: Vec<BoardColumn<'a, T>> = statuses
        .iter()
        .map(|s| BoardColumn {
            status: s.to_string(),
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let Some(FieldValue::Text(status)) = item.field("status") else {
            continue;
        };
        match columns.iter_mut().find(|c| c.status == status) {
            Some(column) => column.items.push(item),
            None => columns.push(BoardColumn {
                status,
                items: vec![item],
            }),
        }
    }

    columns
}

/// One day of a calendar view.
#[derive(Debug)]
pub struct CalendarBucket<'a, T> {
    pub date: NaiveDate,
    pub items: Vec<&'a T>,
}

/// Group items into date buckets by `date_field`, earliest bucket first.
/// Undated items are omitted.
pub fn calendar_buckets<'a, T: Record>(
    items: &'a [T],
    date_field: &str,
) -> Vec<CalendarBucket<'a, T>> {
    let mut buckets: Vec<CalendarBucket<'a, T>> = Vec::new();

    for item in items {
        let Some(FieldValue::Date(date)) = item.field(date_field) else {
            continue;
        };
        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.items.push(item),
            None => buckets.push(CalendarBucket {
                date,
                items: vec![item],
            }),
        }
    }

    buckets.sort_by_key(|b| b.date);
    buckets
}

/// Flatten items into a chronological timeline on `date_field`. The sort is
/// stable, so same-day items keep their arrival order. Undated items are
/// omitted.
pub fn timeline_entries<'a, T: Record>(items: &'a [T], date_field: &str) -> Vec<&'a T> {
    let mut dated: Vec<(NaiveDate, &'a T)> = items
        .iter()
        .filter_map(|item| match item.field(date_field) {
            Some(FieldValue::Date(date)) => Some((date, item)),
            _ => None,
        })
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().map(|(_, item)| item).collect()
}

/// Label used for items without a location in the map view.
pub const UNASSIGNED_LOCATION: &str = "Unassigned";

/// One location group of a map view.
#[derive(Debug)]
pub struct LocationGroup<'a, T> {
    pub location: String,
    pub items: Vec<&'a T>,
}

/// Group items by their free-text `location` field, alphabetically, with
/// the catch-all [`UNASSIGNED_LOCATION`] group last.
pub fn location_groups<T: Record>(items: &[T]) -> Vec<LocationGroup<'_, T>> {
    let mut groups: Vec<LocationGroup<'_, T>> = Vec::new();

    for item in items {
        let location = match item.field("location") {
            Some(FieldValue::Text(location)) => location,
            _ => UNASSIGNED_LOCATION.to_string(),
        };
        match groups.iter_mut().find(|g| g.location == location) {
            Some(group) => group.items.push(item),
            None => groups.push(LocationGroup {
                location,
                items: vec![item],
            }),
        }
    }

    groups.sort_by(|a, b| {
        let a_unassigned = a.location == UNASSIGNED_LOCATION;
        let b_unassigned = b.location == UNASSIGNED_LOCATION;
        a_unassigned
            .cmp(&b_unassigned)
            .then_with(|| a.location.cmp(&b.location))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    use uuid::Uuid;

    use ghx_core::types::RecordId;

    struct Row {
        id: RecordId,
        status: &'static str,
        date: NaiveDate,
        location: Option<&'static str>,
    }

    impl Row {
        fn new(status: &'static str, date: &str, location: Option<&'static str>) -> Self {
            Self {
                id: Uuid::new_v4(),
                status,
                date: date.parse().unwrap(),
                location,
            }
        }
    }

    impl Record for Row {
        fn id(&self) -> RecordId {
            self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "status" => Some(FieldValue::Text(self.status.to_string())),
                "date" => Some(FieldValue::Date(self.date)),
                "location" => self.location.map(|l| FieldValue::Text(l.to_string())),
                _ => None,
            }
        }
    }

    #[test]
    fn board_keeps_fixed_column_order_and_empty_columns() {
        let items = vec![
            Row::new("published", "2025-06-01", None),
            Row::new("draft", "2025-06-02", None),
            Row::new("draft", "2025-06-03", None),
        ];

        let columns = board_columns(&items, &["draft", "published", "archived"]);

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].status, "draft");
        assert_eq!(columns[0].items.len(), 2);
        assert_eq!(columns[1].items.len(), 1);
        assert!(columns[2].items.is_empty());
    }

    #[test]
    fn unknown_status_gets_an_extra_trailing_column() {
        let items = vec![Row::new("limbo", "2025-06-01", None)];
        let columns = board_columns(&items, &["draft"]);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].status, "limbo");
        assert_eq!(columns[1].items.len(), 1);
    }

    #[test]
    fn calendar_buckets_are_sorted_and_grouped_by_day() {
        let items = vec![
            Row::new("draft", "2025-06-02", None),
            Row::new("draft", "2025-06-01", None),
            Row::new("draft", "2025-06-02", None),
        ];

        let buckets = calendar_buckets(&items, "date");

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, "2025-06-01".parse::<NaiveDate>().unwrap());
        assert_eq!(buckets[1].items.len(), 2);
    }

    #[test]
    fn timeline_is_chronological() {
        let items = vec![
            Row::new("draft", "2025-06-03", None),
            Row::new("draft", "2025-06-01", None),
            Row::new("draft", "2025-06-02", None),
        ];

        let timeline = timeline_entries(&items, "date");
        let dates: Vec<NaiveDate> = timeline.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                "2025-06-01".parse().unwrap(),
                "2025-06-02".parse().unwrap(),
                "2025-06-03".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn location_groups_put_unassigned_last() {
        let items = vec![
            Row::new("draft", "2025-06-01", None),
            Row::new("draft", "2025-06-01", Some("Pier 70")),
            Row::new("draft", "2025-06-01", Some("Main Stage")),
        ];

        let groups = location_groups(&items);

        let names: Vec<&str> = groups.iter().map(|g| g.location.as_str()).collect();
        assert_eq!(names, vec!["Main Stage", "Pier 70", UNASSIGNED_LOCATION]);
    }
}
