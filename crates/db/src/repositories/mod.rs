pub mod activity_repo;
pub mod call_sheet_repo;
pub mod itinerary_repo;
pub mod lineup_repo;
pub mod organization_repo;
pub mod overview_repo;
pub mod purchase_order_repo;
pub mod session_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use call_sheet_repo::CallSheetRepo;
pub use itinerary_repo::ItineraryRepo;
pub use lineup_repo::LineupRepo;
pub use organization_repo::OrganizationRepo;
pub use overview_repo::OverviewRepo;
pub use purchase_order_repo::PurchaseOrderRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
