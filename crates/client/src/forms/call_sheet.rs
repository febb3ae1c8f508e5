//! Call sheet drawer payload.

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationError};

use ghx_core::error::CoreError;
use ghx_core::types::RecordId;

use crate::drawer::SubRecord;

/// Draft payload for the create/edit call sheet drawer.
///
/// Serializes to the JSON accepted by `POST /api/v1/call-sheets`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CallSheetForm {
    pub project_id: Option<RecordId>,
    pub event_id: Option<RecordId>,
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 4000, message = "Description must not exceed 4000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "status_value"))]
    pub status: String,
    pub call_date: NaiveDate,
    #[validate(custom(function = "time_value"))]
    pub call_time: Option<String>,
    pub location: Option<String>,
    #[validate(nested)]
    pub crew_calls: Vec<CrewCallEntry>,
    #[validate(nested)]
    pub talent_calls: Vec<TalentCallEntry>,
    #[validate(nested)]
    pub emergency_contacts: Vec<EmergencyContactEntry>,
}

impl CallSheetForm {
    /// An empty draft for a create drawer on the given date.
    pub fn new(call_date: NaiveDate) -> Self {
        Self {
            project_id: None,
            event_id: None,
            name: String::new(),
            description: None,
            status: "draft".to_string(),
            call_date,
            call_time: None,
            location: None,
            crew_calls: Vec::new(),
            talent_calls: Vec::new(),
            emergency_contacts: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-list entries
// ---------------------------------------------------------------------------

/// One crew call row in the drawer's sub-list editor.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CrewCallEntry {
    pub id: RecordId,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "time_value"))]
    pub call_time: String,
}

impl SubRecord for CrewCallEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }
}

/// One talent call row in the drawer's sub-list editor.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct TalentCallEntry {
    pub id: RecordId,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[validate(custom(function = "time_value"))]
    pub call_time: String,
}

impl SubRecord for TalentCallEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }
}

/// One emergency contact row in the drawer's sub-list editor.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EmergencyContactEntry {
    pub id: RecordId,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub relation: Option<String>,
}

impl SubRecord for EmergencyContactEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }
}

// ---------------------------------------------------------------------------
// Custom rules
// ---------------------------------------------------------------------------

fn rule_error(code: &'static str, err: CoreError) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(err.to_string().into());
    error
}

fn status_value(value: &str) -> Result<(), ValidationError> {
    ghx_core::call_sheets::validate_status(value).map_err(|e| rule_error("status", e))
}

fn time_value(value: &str) -> Result<(), ValidationError> {
    ghx_core::time::validate_hhmm("call_time", value).map_err(|e| rule_error("call_time", e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use ghx_core::filter::FilterSet;

    use crate::drawer::DrawerForm;
    use crate::remote::{ClientError, CollectionApi, ListPage, PageRequest};

    /// Counting fake for the call sheet collection.
    struct FakeApi {
        creates: AtomicUsize,
        fail_create: bool,
    }

    impl FakeApi {
        fn accepting() -> Self {
            Self {
                creates: AtomicUsize::new(0),
                fail_create: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                creates: AtomicUsize::new(0),
                fail_create: true,
            }
        }
    }

    #[async_trait]
    impl CollectionApi for FakeApi {
        type Item = serde_json::Value;
        type Create = CallSheetForm;
        type Update = CallSheetForm;

        async fn list(
            &self,
            _filters: &FilterSet,
            _page: PageRequest,
        ) -> Result<ListPage<Self::Item>, ClientError> {
            unimplemented!("not used by drawer tests")
        }

        async fn get(&self, _id: RecordId) -> Result<Option<Self::Item>, ClientError> {
            unimplemented!("not used by drawer tests")
        }

        async fn create(&self, payload: &Self::Create) -> Result<Self::Item, ClientError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(ClientError::Api {
                    status: 500,
                    code: "INTERNAL_ERROR".to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(serde_json::to_value(payload).unwrap())
        }

        async fn update(
            &self,
            _id: RecordId,
            payload: &Self::Update,
        ) -> Result<Self::Item, ClientError> {
            Ok(serde_json::to_value(payload).unwrap())
        }

        async fn delete(&self, _id: RecordId) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn valid_form() -> CallSheetForm {
        let mut form = CallSheetForm::new("2025-06-01".parse().unwrap());
        form.name = "Main Stage Day 1".to_string();
        form.call_time = Some("07:00".to_string());
        form
    }

    #[tokio::test]
    async fn missing_name_blocks_submission_and_references_the_field() {
        let api = FakeApi::accepting();
        let mut drawer = DrawerForm::create(CallSheetForm::new("2025-06-01".parse().unwrap()));

        let created = drawer.submit_create(&api).await;

        assert!(created.is_none());
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
        assert!(drawer.error_for("name").is_some());
        assert!(drawer.is_open());
    }

    #[tokio::test]
    async fn valid_draft_submits_once_and_closes_the_drawer() {
        let api = FakeApi::accepting();
        let mut drawer = DrawerForm::create(valid_form());

        let created = drawer.submit_create(&api).await;

        assert!(created.is_some());
        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
        assert!(!drawer.is_open());
        assert!(drawer.errors().is_empty());
    }

    #[tokio::test]
    async fn rejected_submit_keeps_the_drawer_open_with_the_error_recorded() {
        let api = FakeApi::rejecting();
        let mut drawer = DrawerForm::create(valid_form());

        let created = drawer.submit_create(&api).await;

        assert!(created.is_none());
        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
        assert!(drawer.is_open());
        assert!(drawer.submit_error().is_some());
    }

    #[tokio::test]
    async fn view_drawer_never_submits() {
        let api = FakeApi::accepting();
        let mut drawer = DrawerForm::view(valid_form());

        assert!(drawer.submit_create(&api).await.is_none());
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn invalid_status_is_caught_by_the_shared_rule() {
        let mut form = valid_form();
        form.status = "live".to_string();
        let mut drawer = DrawerForm::create(form);

        assert!(!drawer.validate());
        let message = drawer.error_for("status").unwrap();
        assert!(message.contains("draft, published, archived"));
    }

    #[test]
    fn nested_crew_errors_are_keyed_by_path() {
        let mut form = valid_form();
        form.crew_calls.push(CrewCallEntry {
            id: Uuid::new_v4(),
            department: "Rigging".to_string(),
            position: "Head rigger".to_string(),
            name: String::new(),
            call_time: "07:00".to_string(),
        });
        let mut drawer = DrawerForm::create(form);

        assert!(!drawer.validate());
        assert!(drawer.error_for("crew_calls[0].name").is_some());
    }

    #[test]
    fn malformed_call_time_is_rejected() {
        let mut form = valid_form();
        form.call_time = Some("7am".to_string());
        let mut drawer = DrawerForm::create(form);

        assert!(!drawer.validate());
        assert!(drawer.error_for("call_time").is_some());
    }
}
