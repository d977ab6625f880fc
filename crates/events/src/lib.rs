//! In-process event fan-out and outbound webhook delivery for the
//! dashboard: sibling views subscribe to the bus to refresh on project
//! and timeline changes, and webhook endpoints receive the same events
//! over HTTP.

pub mod bus;
pub mod webhook;

pub use bus::{DashboardEvent, EventBus};
pub use webhook::{WebhookDelivery, WebhookError};
