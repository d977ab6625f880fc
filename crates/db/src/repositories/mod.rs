//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod timeline_repo;

pub use account_repo::AccountRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use timeline_repo::TimelineRepo;
