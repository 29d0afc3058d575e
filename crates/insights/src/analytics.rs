//! Analytics aggregation for the admin reporting view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use opencrm_contacts::Contact;
use opencrm_marketing::Campaign;
use opencrm_sales::Sale;
use opencrm_support::Ticket;

use crate::notifications::TaskReminder;

/// Sales revenue bucketed by calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    pub total_cents: u64,
}

/// Everything the reporting view renders (charts stay with the caller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub sales_count: usize,
    /// Chronological, one bucket per month with at least one sale.
    pub monthly_sales: Vec<MonthlySales>,
    pub open_tickets: usize,
    pub campaign_count: usize,
    /// Open tasks whose due date is already past.
    pub overdue_tasks: Vec<TaskReminder>,
}

pub fn analyze(
    sales: &[Sale],
    tickets: &[Ticket],
    campaigns: &[Campaign],
    contacts: &[Contact],
    today: NaiveDate,
) -> AnalyticsReport {
    AnalyticsReport {
        sales_count: sales.len(),
        monthly_sales: sales_by_month(sales),
        open_tickets: tickets.iter().filter(|t| t.status.is_open()).count(),
        campaign_count: campaigns.len(),
        overdue_tasks: overdue_tasks(contacts, today),
    }
}

/// Bucket sales revenue by the store-assigned creation month.
pub fn sales_by_month(sales: &[Sale]) -> Vec<MonthlySales> {
    let mut buckets: Vec<MonthlySales> = Vec::new();

    for sale in sales {
        let date = sale.created_at.date_naive();
        let (year, month) = (date.year(), date.month());

        match buckets.iter_mut().find(|b| b.year == year && b.month == month) {
            Some(bucket) => bucket.total_cents += sale.amount_cents,
            None => buckets.push(MonthlySales {
                year,
                month,
                total_cents: sale.amount_cents,
            }),
        }
    }

    buckets.sort_by_key(|b| (b.year, b.month));
    buckets
}

/// Open tasks already past their due date, oldest first.
pub fn overdue_tasks(contacts: &[Contact], today: NaiveDate) -> Vec<TaskReminder> {
    let mut overdue: Vec<TaskReminder> = contacts
        .iter()
        .flat_map(|contact| {
            contact
                .tasks
                .iter()
                .filter(|task| task.is_open() && task.due < today)
                .map(|task| TaskReminder {
                    contact: contact.name.clone(),
                    task: task.description.clone(),
                    due: task.due,
                })
        })
        .collect();

    overdue.sort_by_key(|r| r.due);
    overdue
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use opencrm_contacts::TaskItem;
    use opencrm_core::DocumentId;
    use opencrm_marketing::Channel;
    use opencrm_sales::SaleStatus;
    use opencrm_support::TicketStatus;

    use super::*;

    fn sale_on(year: i32, month: u32, day: u32, amount_cents: u64) -> Sale {
        Sale {
            id: DocumentId::new(),
            customer: "Ana".to_string(),
            amount_cents,
            status: SaleStatus::Pagada,
            created_at: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn monthly_buckets_accumulate_and_sort_chronologically() {
        let sales = vec![
            sale_on(2024, 5, 20, 30_00),
            sale_on(2024, 3, 2, 10_00),
            sale_on(2024, 5, 1, 20_00),
            sale_on(2023, 12, 31, 5_00),
        ];

        let buckets = sales_by_month(&sales);
        assert_eq!(
            buckets,
            vec![
                MonthlySales { year: 2023, month: 12, total_cents: 5_00 },
                MonthlySales { year: 2024, month: 3, total_cents: 10_00 },
                MonthlySales { year: 2024, month: 5, total_cents: 50_00 },
            ]
        );
    }

    #[test]
    fn overdue_excludes_today_and_done_tasks() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let yesterday = today.pred_opt().unwrap();

        let contact = Contact {
            id: DocumentId::new(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+34".to_string(),
            comments: Vec::new(),
            tasks: vec![
                TaskItem { description: "vencida".to_string(), due: yesterday, done: false },
                TaskItem { description: "hecha".to_string(), due: yesterday, done: true },
                TaskItem { description: "hoy".to_string(), due: today, done: false },
            ],
        };

        let overdue = overdue_tasks(&[contact], today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].task, "vencida");
    }

    #[test]
    fn report_pulls_every_counter_together() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let sales = vec![sale_on(2024, 6, 1, 10_00)];
        let tickets = vec![Ticket {
            id: DocumentId::new(),
            customer: "Ana".to_string(),
            message: "ayuda".to_string(),
            status: TicketStatus::EnProceso,
        }];
        let campaigns = vec![Campaign {
            id: DocumentId::new(),
            name: "Rebajas".to_string(),
            message: "Hola".to_string(),
            channel: Channel::Correo,
            contact_ids: Vec::new(),
        }];

        let report = analyze(&sales, &tickets, &campaigns, &[], today);
        assert_eq!(report.sales_count, 1);
        assert_eq!(report.open_tickets, 1);
        assert_eq!(report.campaign_count, 1);
        assert_eq!(report.monthly_sales.len(), 1);
        assert!(report.overdue_tasks.is_empty());
    }
}
