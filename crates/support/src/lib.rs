//! `opencrm-support` — customer support tickets.

pub mod service;
pub mod ticket;

pub use service::SupportService;
pub use ticket::{Ticket, TicketDraft, TicketStatus, COLLECTION};
