//! `opencrm-marketing` — campaigns and their outbound dispatch.

pub mod campaign;
pub mod mailer;
pub mod service;

pub use campaign::{Campaign, CampaignDraft, Channel, COLLECTION};
pub use mailer::{Mailer, MailerError, OutboundMail};
pub use service::{CampaignService, DispatchReport};
