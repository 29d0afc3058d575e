//! `opencrm-insights` — pure aggregation behind the dashboard, reminder and
//! analytics views.
//!
//! Everything here is a total function over already-fetched entity slices;
//! fetching and rendering stay with the callers.

pub mod analytics;
pub mod notifications;
pub mod summary;

pub use analytics::{analyze, AnalyticsReport, MonthlySales};
pub use notifications::{due_task_reminders, TaskReminder};
pub use summary::{summarize, DashboardSummary};
