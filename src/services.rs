pub mod draft_mapper;
pub mod wizard;
pub mod keyboard;
pub mod notifier;
pub mod modal_service;
pub use modal_service::EntityModalController;
pub mod reconcile;
pub mod roster_service;
pub use roster_service::RosterController;
pub mod company_service;
pub use company_service::CompanySettingsController;
pub mod admin_page;
pub use admin_page::EntityAdminPage;
