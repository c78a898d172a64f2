//! Submit button status labels
//!
//! A form's button text cycles through a fixed set of labels. Every
//! non-idle label except `Loading` reverts to idle after a fixed delay.

use serde::Serialize;
use std::time::Duration;

use crate::config::FormsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    Subscription,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Subscription => "subscription",
        }
    }

    pub fn idle_label(&self) -> &'static str {
        match self {
            FormKind::Contact => "Send",
            FormKind::Subscription => "Subscribe",
        }
    }

    fn idle_class(&self) -> &'static str {
        match self {
            FormKind::Contact => "bg-accent",
            FormKind::Subscription => {
                "bg-gradient-to-tr flex justify-center items-center gap-4 from-purple-600 to-blue-600 hover:from-blue-600 hover:to-purple-600"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Idle,
    FillAllFields,
    InvalidEmail,
    Loading,
    Success,
    Failed,
}

impl StatusLabel {
    pub fn text(&self, kind: FormKind) -> &'static str {
        match self {
            StatusLabel::Idle => kind.idle_label(),
            StatusLabel::FillAllFields => "Please fill all fields",
            StatusLabel::InvalidEmail => "Invalid Email",
            StatusLabel::Loading => "Loading...",
            StatusLabel::Success => "Success!",
            StatusLabel::Failed => "Failed",
        }
    }

    /// Button color class
    pub fn class(&self, kind: FormKind) -> &'static str {
        match self {
            StatusLabel::Success => "bg-green-500",
            StatusLabel::Failed => "bg-red-500",
            _ => kind.idle_class(),
        }
    }
}

/// Current label plus when it reverts to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormStatus {
    pub label: StatusLabel,
    pub revert_after: Option<Duration>,
}

impl Default for FormStatus {
    fn default() -> Self {
        Self::idle()
    }
}

impl FormStatus {
    pub fn idle() -> Self {
        Self {
            label: StatusLabel::Idle,
            revert_after: None,
        }
    }

    /// Label shown after a failed validation
    pub fn validation(label: StatusLabel, config: &FormsConfig) -> Self {
        Self {
            label,
            revert_after: Some(Duration::from_millis(config.validation_revert_ms)),
        }
    }

    /// Label shown after a write completed or was refused
    pub fn outcome(label: StatusLabel, config: &FormsConfig) -> Self {
        Self {
            label,
            revert_after: Some(Duration::from_millis(config.outcome_revert_ms)),
        }
    }

    /// Label visible `elapsed` after this status was set
    pub fn label_at(&self, elapsed: Duration) -> StatusLabel {
        match self.revert_after {
            Some(after) if elapsed >= after => StatusLabel::Idle,
            _ => self.label,
        }
    }

    pub fn revert_after_ms(&self) -> Option<u64> {
        self.revert_after.map(|d| d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(StatusLabel::Idle.text(FormKind::Contact), "Send");
        assert_eq!(StatusLabel::Idle.text(FormKind::Subscription), "Subscribe");
        assert_eq!(StatusLabel::InvalidEmail.text(FormKind::Contact), "Invalid Email");
        assert_eq!(StatusLabel::Success.class(FormKind::Contact), "bg-green-500");
        assert_eq!(StatusLabel::Failed.class(FormKind::Subscription), "bg-red-500");
    }

    #[test]
    fn test_validation_label_reverts() {
        let config = FormsConfig::default();
        let status = FormStatus::validation(StatusLabel::InvalidEmail, &config);

        assert_eq!(status.label_at(Duration::from_millis(0)), StatusLabel::InvalidEmail);
        assert_eq!(status.label_at(Duration::from_millis(1999)), StatusLabel::InvalidEmail);
        assert_eq!(status.label_at(Duration::from_millis(2000)), StatusLabel::Idle);
    }

    #[test]
    fn test_outcome_label_reverts_later() {
        let config = FormsConfig::default();
        let status = FormStatus::outcome(StatusLabel::Success, &config);

        assert_eq!(status.label_at(Duration::from_millis(2500)), StatusLabel::Success);
        assert_eq!(status.label_at(Duration::from_secs(3)), StatusLabel::Idle);
        assert_eq!(status.revert_after_ms(), Some(3000));
    }

    #[test]
    fn test_idle_has_no_revert() {
        let status = FormStatus::idle();
        assert_eq!(status.revert_after_ms(), None);
        assert_eq!(status.label_at(Duration::from_secs(3600)), StatusLabel::Idle);
    }

    #[test]
    fn test_duplicate_label_reverts() {
        let config = FormsConfig::default();
        let status = FormStatus::outcome(StatusLabel::Loading, &config);
        assert_eq!(status.label_at(Duration::from_millis(10)), StatusLabel::Loading);
        assert_eq!(status.label_at(Duration::from_secs(3)), StatusLabel::Idle);
    }
}
