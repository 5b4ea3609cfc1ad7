//! Wire records exchanged with the exam API and the identity provider.
//!
//! DESIGN
//! ======
//! Exam-side records are read-only view models: they are decoded, displayed,
//! and never mutated locally. Field names follow the API's camelCase JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Provider id reported when the identity provider gives none (email/password).
pub const DEFAULT_PROVIDER_ID: &str = "password";

/// Identity-provider principal for the active session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Provider-assigned user id.
    pub uid: String,
    /// Verified email, if the provider shares one.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Sign-in method (e.g. `"google.com"`).
    #[serde(default = "default_provider_id")]
    pub provider_id: String,
}

fn default_provider_id() -> String {
    DEFAULT_PROVIDER_ID.to_owned()
}

impl Principal {
    /// Body for `POST /users`, or `None` when the principal has no email.
    #[must_use]
    pub fn new_user(&self) -> Option<NewUser> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let provider = if self.provider_id.is_empty() { DEFAULT_PROVIDER_ID } else { &self.provider_id };
        Some(NewUser { email: email.to_owned(), provider: provider.to_owned() })
    }

    /// Best label for headers and menus: display name, then email, then uid.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Backend user record, keyed by the provider uid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub provider: String,
    pub role: UserRole,
    pub subscription_status: SubscriptionStatus,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Access tier of a backend user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Free,
    Pro,
    Admin,
}

/// Billing state of a backend user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Canceled,
}

/// Request body for `POST /users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub provider: String,
}

/// A certification exam (e.g. Professional Cloud Developer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    /// Short code such as `"PCD"`.
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub created_at: String,
}

/// A practice set belonging to an exam.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSet {
    pub id: String,
    pub exam_id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub question_ids: Vec<String>,
    pub created_at: String,
}

impl ExamSet {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_ids.len()
    }
}

/// Per-set attempt summary for the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSetStats {
    pub exam_set_id: String,
    pub total_attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_attempt: Option<LatestAttempt>,
}

/// The most recent attempt on a set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAttempt {
    pub status: AttemptStatus,
    /// Completion percentage, 0-100.
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub last_accessed_at: String,
}

/// Lifecycle of a single attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Paused,
}
