//! Dashboard summary counters.

use serde::{Deserialize, Serialize};

use opencrm_contacts::Contact;
use opencrm_sales::Sale;
use opencrm_support::Ticket;

/// The landing view's counter tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Contacts with at least one open task.
    pub contacts_with_open_tasks: usize,
    /// Open tasks across the whole contact book.
    pub open_tasks: usize,
    /// Sales still awaiting payment.
    pub open_sales: usize,
    /// Tickets not yet closed.
    pub open_tickets: usize,
}

pub fn summarize(contacts: &[Contact], sales: &[Sale], tickets: &[Ticket]) -> DashboardSummary {
    let mut summary = DashboardSummary::default();

    for contact in contacts {
        let open = contact.tasks.iter().filter(|t| t.is_open()).count();
        if open > 0 {
            summary.contacts_with_open_tasks += 1;
        }
        summary.open_tasks += open;
    }

    summary.open_sales = sales.iter().filter(|s| s.status.is_open()).count();
    summary.open_tickets = tickets.iter().filter(|t| t.status.is_open()).count();

    summary
}
