//! Address-book contacts with embedded phones and emails.

use serde::{Deserialize, Serialize};

use super::{DocumentId, Timestamp};

/// Kind of phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhoneKind {
    #[default]
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "trabajo")]
    Work,
    #[serde(rename = "movil")]
    Mobile,
    #[serde(rename = "fijo")]
    Landline,
}

/// Kind of email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmailKind {
    #[default]
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "trabajo")]
    Work,
    #[serde(rename = "principal")]
    Primary,
    #[serde(rename = "secundario")]
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(rename = "_id")]
    pub phone_id: DocumentId,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "tipo", default)]
    pub kind: PhoneKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    #[serde(rename = "_id")]
    pub email_id: DocumentId,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipo", default)]
    pub kind: EmailKind,
}

/// An address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub contact_id: DocumentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "empresa", default)]
    pub company: String,
    #[serde(rename = "telefonos", default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub emails: Vec<Email>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
}

impl Contact {
    /// Creates a contact with no company, phones or emails.
    #[must_use]
    pub fn new(contact_id: DocumentId, name: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            contact_id,
            name: name.into(),
            company: String::new(),
            phones: Vec::new(),
            emails: Vec::new(),
            created_at,
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    #[must_use]
    pub fn with_phones(mut self, phones: Vec<Phone>) -> Self {
        self.phones = phones;
        self
    }

    #[must_use]
    pub fn with_emails(mut self, emails: Vec<Email>) -> Self {
        self.emails = emails;
        self
    }
}

/// Replacement values for a contact's editable fields.
///
/// Serializes with the same field names as [`Contact`] so it can be merged
/// over the stored document; the identity and creation timestamp are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactChanges {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "telefonos")]
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
}
