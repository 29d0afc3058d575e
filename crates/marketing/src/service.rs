//! Campaign CRUD and dispatch service.

use std::sync::Arc;

use opencrm_audit::{AuditAction, AuditCategory, AuditRecorder};
use opencrm_contacts::Contact;
use opencrm_core::{DocumentStore, ServiceError};

use crate::campaign::{Campaign, CampaignDraft, Channel, COLLECTION};
use crate::mailer::{Mailer, OutboundMail};

/// What happened to one dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Emails handed to the mailer successfully.
    pub sent: usize,
    /// Recipients that failed; delivery failures are logged and skipped so
    /// the rest of the run continues.
    pub skipped: usize,
}

pub struct CampaignService {
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    audit: AuditRecorder,
}

impl CampaignService {
    pub fn new(store: Arc<dyn DocumentStore>, mailer: Arc<dyn Mailer>, audit: AuditRecorder) -> Self {
        Self { store, mailer, audit }
    }

    pub fn list(&self) -> Result<Vec<Campaign>, ServiceError> {
        let docs = self.store.list(COLLECTION)?;
        let campaigns = docs
            .iter()
            .map(Campaign::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(campaigns)
    }

    pub fn create(&self, draft: CampaignDraft) -> Result<Campaign, ServiceError> {
        draft.validate()?;

        let id = self.store.create(COLLECTION, draft.to_payload()?)?;
        let campaign = draft.into_campaign(id);

        self.audit.record(
            AuditCategory::Campaign,
            AuditAction::Create,
            format!("Creó campaña: {}", campaign.name),
        );
        Ok(campaign)
    }

    pub fn update(&self, campaign: &Campaign, draft: CampaignDraft) -> Result<Campaign, ServiceError> {
        draft.validate()?;

        self.store.update(COLLECTION, campaign.id, draft.to_payload()?)?;
        let updated = draft.into_campaign(campaign.id);

        self.audit.record(
            AuditCategory::Campaign,
            AuditAction::Update,
            format!("Actualizó campaña: {}", updated.name),
        );
        Ok(updated)
    }

    pub fn delete(&self, campaign: &Campaign) -> Result<(), ServiceError> {
        self.store.delete(COLLECTION, campaign.id)?;

        self.audit.record(
            AuditCategory::Campaign,
            AuditAction::Delete,
            format!("Eliminó campaña: {}", campaign.name),
        );
        Ok(())
    }

    /// Send a `Correo` campaign to its assigned contacts.
    ///
    /// One mail per assigned contact; a failed recipient is logged and
    /// skipped, never aborting the rest of the run. Non-mail channels send
    /// nothing. One audit entry records the run as a whole.
    pub fn dispatch(&self, campaign: &Campaign, contacts: &[Contact]) -> DispatchReport {
        if campaign.channel != Channel::Correo {
            return DispatchReport::default();
        }

        let mut report = DispatchReport::default();
        let assigned = contacts
            .iter()
            .filter(|c| campaign.contact_ids.contains(&c.id));

        for contact in assigned {
            let mail = OutboundMail {
                to_name: contact.name.clone(),
                to_email: contact.email.clone(),
                message: campaign.message.clone(),
            };
            match self.mailer.send(mail) {
                Ok(()) => report.sent += 1,
                Err(err) => {
                    tracing::warn!(
                        recipient = %contact.email,
                        error = %err,
                        "campaign mail failed; skipping recipient"
                    );
                    report.skipped += 1;
                }
            }
        }

        self.audit.record(
            AuditCategory::Campaign,
            AuditAction::Dispatch,
            format!(
                "Envió campaña \"{}\" a {} contactos ({} omitidos)",
                campaign.name, report.sent, report.skipped
            ),
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    use chrono::{DateTime, Utc};
    use serde_json::Value as JsonValue;
    use uuid::Uuid;

    use opencrm_audit::{AuditEntry, AuditStore, AuditStoreError, NewAuditEntry};
    use opencrm_core::{Document, DocumentId, StoreError};

    use crate::mailer::MailerError;

    use super::*;

    #[derive(Default)]
    struct MemStore {
        collections: RwLock<HashMap<String, Vec<Document>>>,
    }

    impl DocumentStore for MemStore {
        fn create(&self, collection: &str, payload: JsonValue) -> Result<DocumentId, StoreError> {
            let mut collections = self.collections.write().unwrap();
            let id = DocumentId::new();
            collections.entry(collection.to_string()).or_default().push(Document {
                id,
                created_at: Utc::now(),
                payload,
            });
            Ok(id)
        }

        fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
            Ok(self
                .collections
                .read()
                .unwrap()
                .get(collection)
                .cloned()
                .unwrap_or_default())
        }

        fn update(
            &self,
            collection: &str,
            id: DocumentId,
            payload: JsonValue,
        ) -> Result<(), StoreError> {
            let mut collections = self.collections.write().unwrap();
            let doc = collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
                .ok_or_else(|| StoreError::not_found(collection))?;
            doc.payload = payload;
            Ok(())
        }

        fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError> {
            let mut collections = self.collections.write().unwrap();
            let docs = collections
                .get_mut(collection)
                .ok_or_else(|| StoreError::not_found(collection))?;
            let before = docs.len();
            docs.retain(|d| d.id != id);
            if docs.len() == before {
                return Err(StoreError::not_found(collection));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct VecAudit {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl AuditStore for VecAudit {
        fn append(&self, entry: NewAuditEntry) -> Result<DateTime<Utc>, AuditStoreError> {
            let mut entries = self.entries.lock().unwrap();
            let recorded_at = Utc::now();
            let sequence = entries.len() as u64 + 1;
            entries.push(AuditEntry {
                entry_id: Uuid::now_v7(),
                sequence,
                category: entry.category,
                action: entry.action,
                description: entry.description,
                recorded_at,
            });
            Ok(recorded_at)
        }

        fn list_all(&self) -> Result<Vec<AuditEntry>, AuditStoreError> {
            let mut entries = self.entries.lock().unwrap().clone();
            entries.reverse();
            Ok(entries)
        }
    }

    /// Mailer double that fails for one blocked address.
    #[derive(Default)]
    struct PickyMailer {
        blocked: Option<String>,
        sent: Mutex<Vec<OutboundMail>>,
    }

    impl Mailer for PickyMailer {
        fn send(&self, mail: OutboundMail) -> Result<(), MailerError> {
            if self.blocked.as_deref() == Some(mail.to_email.as_str()) {
                return Err(MailerError::delivery(mail.to_email, "bounced"));
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    fn contact(name: &str, email: &str) -> Contact {
        Contact {
            id: DocumentId::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "+34000".to_string(),
            comments: Vec::new(),
            tasks: Vec::new(),
        }
    }

    fn service_with(mailer: Arc<PickyMailer>) -> (CampaignService, AuditRecorder) {
        let audit = AuditRecorder::new(Arc::new(VecAudit::default()));
        (
            CampaignService::new(Arc::new(MemStore::default()), mailer, audit.clone()),
            audit,
        )
    }

    fn draft(name: &str, channel: Channel, contact_ids: Vec<DocumentId>) -> CampaignDraft {
        CampaignDraft {
            name: name.to_string(),
            message: "Hola!".to_string(),
            channel,
            contact_ids,
        }
    }

    #[test]
    fn dispatch_sends_only_to_assigned_contacts() {
        let mailer = Arc::new(PickyMailer::default());
        let (service, _audit) = service_with(mailer.clone());

        let ana = contact("Ana", "ana@example.com");
        let bruno = contact("Bruno", "bruno@example.com");
        let campaign = service
            .create(draft("Rebajas", Channel::Correo, vec![ana.id]))
            .unwrap();

        let report = service.dispatch(&campaign, &[ana, bruno]);

        assert_eq!(report, DispatchReport { sent: 1, skipped: 0 });
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "ana@example.com");
        assert_eq!(sent[0].message, "Hola!");
    }

    #[test]
    fn failed_recipient_is_skipped_and_the_rest_still_send() {
        let ana = contact("Ana", "ana@example.com");
        let bruno = contact("Bruno", "bruno@example.com");

        let mailer = Arc::new(PickyMailer {
            blocked: Some("ana@example.com".to_string()),
            ..Default::default()
        });
        let (service, audit) = service_with(mailer.clone());

        let campaign = service
            .create(draft("Rebajas", Channel::Correo, vec![ana.id, bruno.id]))
            .unwrap();
        let report = service.dispatch(&campaign, &[ana, bruno]);

        assert_eq!(report, DispatchReport { sent: 1, skipped: 1 });

        // One dispatch entry for the run, after the create entry.
        let history = audit.history().unwrap();
        assert_eq!(history[0].action, AuditAction::Dispatch);
        assert!(history[0].description.contains("1 contactos (1 omitidos)"));
    }

    #[test]
    fn non_mail_channels_send_nothing() {
        let mailer = Arc::new(PickyMailer::default());
        let (service, _audit) = service_with(mailer.clone());

        let ana = contact("Ana", "ana@example.com");
        let campaign = service
            .create(draft("SMS push", Channel::Sms, vec![ana.id]))
            .unwrap();

        let report = service.dispatch(&campaign, &[ana]);
        assert_eq!(report, DispatchReport::default());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn campaign_crud_is_audited() {
        let mailer = Arc::new(PickyMailer::default());
        let (service, audit) = service_with(mailer);

        let campaign = service.create(draft("Rebajas", Channel::Correo, vec![])).unwrap();
        let campaign = service
            .update(&campaign, draft("Rebajas de verano", Channel::Correo, vec![]))
            .unwrap();
        service.delete(&campaign).unwrap();

        let actions: Vec<_> = audit
            .history()
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(
            actions,
            vec![AuditAction::Delete, AuditAction::Update, AuditAction::Create]
        );
    }
}
