//! Filter and sort primitives shared by the API and the collection client.
//!
//! A [`FilterSet`] is a conjunctive chain of simple predicates (`eq`,
//! `ilike`, `gte`, `lte`, `overlaps`) over named record fields. The same
//! set is used on both sides of the wire: the client evaluates it against
//! in-memory records via the [`Record`] projection and serializes it to the
//! canonical query parameters the list endpoints consume.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Field projection
// ---------------------------------------------------------------------------

/// A single field value projected out of a record for filtering/sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// An inclusive date range (e.g. an itinerary's start/end).
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl FieldValue {
    /// Compare two values of the same variant. Mismatched variants are
    /// incomparable and return `None`.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (
                FieldValue::DateRange { start: a, .. },
                FieldValue::DateRange { start: b, .. },
            ) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Render the value as it appears in a query string.
    pub fn to_query_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.to_string(),
            FieldValue::DateRange { start, end } => format!("{start}/{end}"),
        }
    }
}

/// Read-only field projection implemented by every filterable record type.
pub trait Record {
    fn id(&self) -> RecordId;

    /// Project a named field for predicate evaluation. Unknown fields
    /// return `None` (and never match).
    fn field(&self, name: &str) -> Option<FieldValue>;
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A single predicate operator.
#[derive(Debug, Clone)]
pub enum FilterOp {
    /// Exact equality.
    Eq(FieldValue),
    /// Case-insensitive substring match on text fields.
    ILike(String),
    /// Field >= bound.
    Gte(FieldValue),
    /// Field <= bound.
    Lte(FieldValue),
    /// Date-range intersection against a `DateRange` field.
    Overlaps { start: NaiveDate, end: NaiveDate },
}

/// A predicate bound to a record field.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }

    /// Evaluate this predicate against a record. A missing field never
    /// matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let Some(value) = record.field(&self.field) else {
            return false;
        };
        match &self.op {
            FilterOp::Eq(expected) => value == *expected,
            FilterOp::ILike(needle) => match value {
                FieldValue::Text(haystack) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            },
            FilterOp::Gte(bound) => {
                matches!(value.compare(bound), Some(Ordering::Greater | Ordering::Equal))
            }
            FilterOp::Lte(bound) => {
                matches!(value.compare(bound), Some(Ordering::Less | Ordering::Equal))
            }
            FilterOp::Overlaps { start, end } => match value {
                FieldValue::DateRange {
                    start: f_start,
                    end: f_end,
                } => f_start <= *end && f_end >= *start,
                _ => false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSet
// ---------------------------------------------------------------------------

/// A conjunctive (AND) chain of predicates.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style predicate append.
    pub fn with(mut self, field: impl Into<String>, op: FilterOp) -> Self {
        self.filters.push(Filter::new(field, op));
        self
    }

    pub fn push(&mut self, field: impl Into<String>, op: FilterOp) {
        self.filters.push(Filter::new(field, op));
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// True iff the record satisfies every active predicate.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Translate to the canonical list-endpoint query parameters.
    ///
    /// | Predicate            | Parameter(s)                       |
    /// |----------------------|------------------------------------|
    /// | `Eq` on `field`      | `field=value`                      |
    /// | `ILike`              | `q=needle`                         |
    /// | `Gte`                | `from=value`                       |
    /// | `Lte`                | `to=value`                         |
    /// | `Overlaps`           | `overlaps_start=..&overlaps_end=..`|
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for filter in &self.filters {
            match &filter.op {
                FilterOp::Eq(value) => {
                    pairs.push((filter.field.clone(), value.to_query_string()));
                }
                FilterOp::ILike(needle) => {
                    pairs.push(("q".to_string(), needle.clone()));
                }
                FilterOp::Gte(value) => {
                    pairs.push(("from".to_string(), value.to_query_string()));
                }
                FilterOp::Lte(value) => {
                    pairs.push(("to".to_string(), value.to_query_string()));
                }
                FilterOp::Overlaps { start, end } => {
                    pairs.push(("overlaps_start".to_string(), start.to_string()));
                    pairs.push(("overlaps_end".to_string(), end.to_string()));
                }
            }
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort direction for a single-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flip the direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// A single-key sort specification.
#[derive(Debug, Clone)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Compare two records on this key. Records missing the field sort
    /// after records that have it, regardless of direction.
    pub fn compare<A: Record, B: Record>(&self, a: &A, b: &B) -> Ordering {
        let ordering = match (a.field(&self.field), b.field(&self.field)) {
            (Some(va), Some(vb)) => va.compare(&vb).unwrap_or(Ordering::Equal),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
