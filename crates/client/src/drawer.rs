//! Drawer form controllers.
//!
//! A [`DrawerForm`] owns the draft payload for a create/edit/view drawer,
//! validates it with the `validator` schema before submission, and reports
//! success or failure to the caller. An invalid draft never reaches the
//! remote client. Sub-lists (crew calls, talent calls, contacts) are edited
//! through [`SubListEditor`], a whole-array replacement editor.

use uuid::Uuid;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use ghx_core::types::RecordId;

use crate::remote::{ClientError, CollectionApi};

// ---------------------------------------------------------------------------
// DrawerForm
// ---------------------------------------------------------------------------

/// What the drawer was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerMode {
    Create,
    Edit,
    View,
}

/// A field-keyed validation message, as surfaced inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Form state for one drawer.
#[derive(Debug)]
pub struct DrawerForm<P> {
    mode: DrawerMode,
    draft: P,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
    open: bool,
}

impl<P: Validate> DrawerForm<P> {
    /// Open a create drawer with an initial draft.
    pub fn create(draft: P) -> Self {
        Self::with_mode(DrawerMode::Create, draft)
    }

    /// Open an edit drawer pre-filled from an existing record.
    pub fn edit(draft: P) -> Self {
        Self::with_mode(DrawerMode::Edit, draft)
    }

    /// Open a read-only view drawer.
    pub fn view(draft: P) -> Self {
        Self::with_mode(DrawerMode::View, draft)
    }

    fn with_mode(mode: DrawerMode, draft: P) -> Self {
        Self {
            mode,
            draft,
            errors: Vec::new(),
            submit_error: None,
            open: true,
        }
    }

    pub fn mode(&self) -> DrawerMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// The current draft, for rendering field bindings.
    pub fn draft(&self) -> &P {
        &self.draft
    }

    /// Mutable access for field bindings; view drawers stay read-only at
    /// the call sites.
    pub fn draft_mut(&mut self) -> &mut P {
        &mut self.draft
    }

    /// All field errors from the last validation pass.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The first error message attached to `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// The transport/API error from the last failed submit, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validate the draft, recording field-keyed errors. Returns `true`
    /// when the draft is submittable.
    ///
    /// Nested sub-list errors are keyed by path, e.g. `crew_calls[0].name`.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        match self.draft.validate() {
            Ok(()) => true,
            Err(validation) => {
                collect_field_errors("", &validation, &mut self.errors);
                false
            }
        }
    }

    /// Submit a create drawer.
    ///
    /// Validation failure or a rejected request leaves the drawer open with
    /// the errors recorded and returns `None`; the remote client is only
    /// invoked for a valid draft. On success the drawer closes and the
    /// created record is returned for the caller's `on_success` path
    /// (typically a refetch).
    pub async fn submit_create<A>(&mut self, api: &A) -> Option<A::Item>
    where
        A: CollectionApi<Create = P>,
    {
        if self.mode != DrawerMode::Create {
            return None;
        }
        if !self.validate() {
            return None;
        }

        match api.create(&self.draft).await {
            Ok(created) => {
                self.submit_error = None;
                self.close();
                Some(created)
            }
            Err(e) => {
                self.record_submit_failure(e);
                None
            }
        }
    }

    /// Submit an edit drawer as a partial update of `id`.
    ///
    /// Same contract as [`submit_create`](Self::submit_create); a stale
    /// version surfaces as the recorded submit error.
    pub async fn submit_update<A>(&mut self, api: &A, id: RecordId) -> Option<A::Item>
    where
        A: CollectionApi<Update = P>,
    {
        if self.mode != DrawerMode::Edit {
            return None;
        }
        if !self.validate() {
            return None;
        }

        match api.update(id, &self.draft).await {
            Ok(updated) => {
                self.submit_error = None;
                self.close();
                Some(updated)
            }
            Err(e) => {
                self.record_submit_failure(e);
                None
            }
        }
    }

    fn record_submit_failure(&mut self, error: ClientError) {
        tracing::error!(error = %error, "Drawer submit failed");
        self.submit_error = Some(error.to_string());
    }
}

/// Flatten a (possibly nested) validation tree into path-keyed messages.
fn collect_field_errors(prefix: &str, validation: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in validation.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                for error in errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{path} is invalid"));
                    out.push(FieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(&path, nested, out);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_field_errors(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SubListEditor
// ---------------------------------------------------------------------------

/// A nested sub-record with a client-assigned id.
pub trait SubRecord {
    fn id(&self) -> RecordId;
    /// Return the record with its id replaced.
    fn with_id(self, id: RecordId) -> Self;
}

/// Whole-array editor for a drawer's nested sub-list.
///
/// Add assigns a client-side random id, edit replaces one entry, remove
/// filters one entry out. The consumer submits the full array; entries are
/// never structurally diffed.
#[derive(Debug, Clone, Default)]
pub struct SubListEditor<R> {
    rows: Vec<R>,
}

impl<R: SubRecord> SubListEditor<R> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Start from the rows of an existing record (edit drawer).
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a new row under a freshly generated id, returning that id.
    pub fn add(&mut self, row: R) -> RecordId {
        let id = Uuid::new_v4();
        self.rows.push(row.with_id(id));
        id
    }

    /// Replace the row with the same id. Returns `false` when no row
    /// matches.
    pub fn replace(&mut self, row: R) -> bool {
        let id = row.id();
        match self.rows.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Remove the row with the given id. Returns `false` when no row
    /// matches.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id() != id);
        self.rows.len() != before
    }

    /// Consume the editor, yielding the full replacement array.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct ContactRow {
        id: RecordId,
        name: String,
    }

    impl ContactRow {
        fn named(name: &str) -> Self {
            Self {
                id: Uuid::nil(),
                name: name.to_string(),
            }
        }
    }

    impl SubRecord for ContactRow {
        fn id(&self) -> RecordId {
            self.id
        }

        fn with_id(mut self, id: RecordId) -> Self {
            self.id = id;
            self
        }
    }

    #[test]
    fn add_assigns_a_fresh_id() {
        let mut editor = SubListEditor::new();
        let id_a = editor.add(ContactRow::named("Medic"));
        let id_b = editor.add(ContactRow::named("Fire watch"));

        assert_ne!(id_a, id_b);
        assert_ne!(id_a, Uuid::nil());
        assert_eq!(editor.len(), 2);
        assert_eq!(editor.rows()[0].id, id_a);
    }

    #[test]
    fn replace_swaps_one_entry_by_id() {
        let mut editor = SubListEditor::new();
        let id = editor.add(ContactRow::named("Medic"));

        let replaced = editor.replace(ContactRow {
            id,
            name: "Site medic".to_string(),
        });

        assert!(replaced);
        assert_eq!(editor.rows()[0].name, "Site medic");
    }

    #[test]
    fn replace_with_unknown_id_is_rejected() {
        let mut editor = SubListEditor::new();
        editor.add(ContactRow::named("Medic"));

        let stranger = ContactRow::named("Nobody").with_id(Uuid::new_v4());
        assert!(!editor.replace(stranger));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn remove_filters_one_entry_out() {
        let mut editor = SubListEditor::new();
        let id = editor.add(ContactRow::named("Medic"));
        editor.add(ContactRow::named("Fire watch"));

        assert!(editor.remove(id));
        assert!(!editor.remove(id));
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.rows()[0].name, "Fire watch");
    }
}
