//! Campaign entity.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use opencrm_core::{Document, DocumentId, DomainError, DomainResult, StoreError};

/// Collection campaigns are stored in.
pub const COLLECTION: &str = "campañas";

/// Outbound channel a campaign targets. Only `Correo` is dispatched by the
/// core; other channels are stored for hand-off to external tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Correo,
    Sms,
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Channel::Correo => "Correo",
            Channel::Sms => "Sms",
        };
        f.write_str(s)
    }
}

/// A marketing campaign, as decoded from its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: DocumentId,
    pub name: String,
    pub message: String,
    pub channel: Channel,
    /// Ids of the assigned contacts in the contact book.
    pub contact_ids: Vec<DocumentId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampaignPayload {
    name: String,
    message: String,
    channel: Channel,
    #[serde(default)]
    contact_ids: Vec<DocumentId>,
}

impl Campaign {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let payload: CampaignPayload = serde_json::from_value(doc.payload.clone())?;
        Ok(Self {
            id: doc.id,
            name: payload.name,
            message: payload.message,
            channel: payload.channel,
            contact_ids: payload.contact_ids,
        })
    }
}

/// Input for creating or updating a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub message: String,
    pub channel: Channel,
    pub contact_ids: Vec<DocumentId>,
}

impl CampaignDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("campaign name must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("campaign message must not be empty"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = CampaignPayload {
            name: self.name.clone(),
            message: self.message.clone(),
            channel: self.channel,
            contact_ids: self.contact_ids.clone(),
        };
        Ok(serde_json::to_value(payload)?)
    }

    pub fn into_campaign(self, id: DocumentId) -> Campaign {
        Campaign {
            id,
            name: self.name,
            message: self.message,
            channel: self.channel,
            contact_ids: self.contact_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn documents_without_assigned_contacts_decode_to_empty() {
        let doc = Document {
            id: DocumentId::new(),
            created_at: Utc::now(),
            payload: serde_json::json!({
                "name": "Rebajas",
                "message": "Todo al 50%",
                "channel": "Correo"
            }),
        };

        let campaign = Campaign::from_document(&doc).unwrap();
        assert!(campaign.contact_ids.is_empty());
        assert_eq!(campaign.channel, Channel::Correo);
    }

    #[test]
    fn blank_name_is_rejected() {
        let draft = CampaignDraft {
            name: String::new(),
            message: "Hola".to_string(),
            channel: Channel::Correo,
            contact_ids: Vec::new(),
        };
        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }
}
