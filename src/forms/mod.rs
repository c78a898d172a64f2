//! Contact and subscription forms
//!
//! A submission is validated locally (presence and a coarse email shape),
//! then written to the CMS with a single `create` call. The resulting
//! [`FormStatus`] drives the submit button label.

mod contact;
mod guard;
mod status;
mod subscription;

pub use contact::ContactForm;
pub use guard::{InFlight, SubmitGuard};
pub use status::{FormKind, FormStatus, StatusLabel};
pub use subscription::SubscriptionForm;

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::cms::{ContentClient, Document};
use crate::config::FormsConfig;

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
}

/// Write-once document created by a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "_type")]
pub enum FormRecord {
    #[serde(rename = "contactForm")]
    Contact {
        name: String,
        email: String,
        subject: String,
        message: String,
        #[serde(rename = "createdAt")]
        created_at: String,
    },
    #[serde(rename = "emailEntry")]
    Subscription {
        email: String,
        #[serde(rename = "createdAt")]
        created_at: String,
    },
}

impl FormRecord {
    pub fn to_document(&self) -> serde_json::Result<Document> {
        serde_json::to_value(self)
    }
}

/// Field state of one form
pub trait FormInput {
    const KIND: FormKind;

    /// Validation label to show, if the input is not submittable
    fn validate(&self) -> Result<(), StatusLabel>;

    fn to_record(&self, created_at: DateTime<Utc>) -> FormRecord;

    /// Identity of this submission for duplicate detection
    fn fingerprint(&self) -> String;

    fn clear(&mut self);
}

/// Fields after a submission attempt, with the label to show
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub form: F,
    pub status: FormStatus,
    pub created: Option<Document>,
}

impl<F: Default> Default for Submission<F> {
    fn default() -> Self {
        Self {
            form: F::default(),
            status: FormStatus::idle(),
            created: None,
        }
    }
}

/// Coarse email shape check (`something@something.something`)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// ISO 8601 with millisecond precision, UTC
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate and submit a form
///
/// Invalid input never reaches the client. A submission whose twin is
/// still in flight is answered with the loading label and no write.
pub async fn submit<F: FormInput>(
    client: &dyn ContentClient,
    guard: &SubmitGuard,
    mut form: F,
    config: &FormsConfig,
) -> Submission<F> {
    let kind = F::KIND.as_str();

    if let Err(label) = form.validate() {
        tracing::debug!("Rejected {} submission: {:?}", kind, label);
        return Submission {
            form,
            status: FormStatus::validation(label, config),
            created: None,
        };
    }

    let fingerprint = form.fingerprint();
    let Some(_in_flight) = guard.try_begin(&fingerprint) else {
        tracing::warn!("Ignoring duplicate {} submission while one is pending", kind);
        return Submission {
            form,
            status: FormStatus::outcome(StatusLabel::Loading, config),
            created: None,
        };
    };

    let document = match form.to_record(Utc::now()).to_document() {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Error encoding {} form: {}", kind, e);
            return Submission {
                form,
                status: FormStatus::outcome(StatusLabel::Failed, config),
                created: None,
            };
        }
    };

    match client.create(document).await {
        Ok(created) => {
            tracing::info!("Stored {} submission", kind);
            form.clear();
            Submission {
                form,
                status: FormStatus::outcome(StatusLabel::Success, config),
                created: Some(created),
            }
        }
        Err(e) => {
            tracing::error!("Error submitting {} form: {}", kind, e);
            Submission {
                form,
                status: FormStatus::outcome(StatusLabel::Failed, config),
                created: None,
            }
        }
    }
}
