//! Follow-up task reminders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use opencrm_contacts::Contact;

/// One reminder row: an open task due today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReminder {
    pub contact: String,
    pub task: String,
    pub due: NaiveDate,
}

/// Open tasks due exactly on `today`, in contact-book order.
pub fn due_task_reminders(contacts: &[Contact], today: NaiveDate) -> Vec<TaskReminder> {
    contacts
        .iter()
        .flat_map(|contact| {
            contact
                .tasks
                .iter()
                .filter(|task| task.is_open() && task.due == today)
                .map(|task| TaskReminder {
                    contact: contact.name.clone(),
                    task: task.description.clone(),
                    due: task.due,
                })
        })
        .collect()
}
