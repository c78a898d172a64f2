//! Newsletter subscription form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_valid_email, FormInput, FormKind, FormRecord, StatusLabel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionForm {
    pub email: String,
}

impl FormInput for SubscriptionForm {
    const KIND: FormKind = FormKind::Subscription;

    fn validate(&self) -> Result<(), StatusLabel> {
        // An empty address gets the same label as a malformed one
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(StatusLabel::InvalidEmail)
        }
    }

    fn to_record(&self, created_at: DateTime<Utc>) -> FormRecord {
        FormRecord::Subscription {
            email: self.email.trim().to_string(),
            created_at: super::timestamp(created_at),
        }
    }

    fn fingerprint(&self) -> String {
        self.email.trim().to_lowercase()
    }

    fn clear(&mut self) {
        self.email.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let empty = SubscriptionForm::default();
        assert_eq!(empty.validate(), Err(StatusLabel::InvalidEmail));

        let bad = SubscriptionForm {
            email: "someone@nowhere".to_string(),
        };
        assert_eq!(bad.validate(), Err(StatusLabel::InvalidEmail));

        let good = SubscriptionForm {
            email: "someone@example.com".to_string(),
        };
        assert_eq!(good.validate(), Ok(()));
    }

    #[test]
    fn test_fingerprint_ignores_case() {
        let a = SubscriptionForm {
            email: "A@Example.com".to_string(),
        };
        let b = SubscriptionForm {
            email: " a@example.com".to_string(),
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
