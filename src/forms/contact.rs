//! Contact form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_present, is_valid_email, FormInput, FormKind, FormRecord, StatusLabel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormInput for ContactForm {
    const KIND: FormKind = FormKind::Contact;

    fn validate(&self) -> Result<(), StatusLabel> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if !fields.iter().all(|f| is_present(f)) {
            return Err(StatusLabel::FillAllFields);
        }
        if !is_valid_email(&self.email) {
            return Err(StatusLabel::InvalidEmail);
        }
        Ok(())
    }

    fn to_record(&self, created_at: DateTime<Utc>) -> FormRecord {
        FormRecord::Contact {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            created_at: super::timestamp(created_at),
        }
    }

    fn fingerprint(&self) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}",
            self.name.trim(),
            self.email.trim().to_lowercase(),
            self.subject.trim(),
            self.message.trim()
        )
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
