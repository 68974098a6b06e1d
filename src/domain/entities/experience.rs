use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_COMPANY_LENGTH, MAX_DATE_LENGTH, MAX_ROLE_LENGTH},
    entities::option_fields::PatchString,
};

// ───── Database Models ───────────────────────────────────────────────

/// One work-history entry. Dates are free-form text ("2018",
/// "Mar 2021", "Actualidad"); a missing `end_date` means the role
/// is ongoing.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Admin-facing label, Spanish rendering: "Software Engineer en Acme".
impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} en {}", self.role, self.company)
    }
}

#[derive(Debug, Validate)]
pub struct ExperienceInsert {
    #[validate(length(min = 1, max = MAX_ROLE_LENGTH))]
    pub role: String,

    #[validate(length(min = 1, max = MAX_COMPANY_LENGTH))]
    pub company: String,

    #[validate(length(min = 1, max = MAX_DATE_LENGTH))]
    pub start_date: String,

    #[validate(length(max = MAX_DATE_LENGTH))]
    pub end_date: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Experience> for ExperienceResponse {
    fn from(experience: Experience) -> Self {
        let label = experience.to_string();
        Self {
            id: experience.id,
            role: experience.role,
            company: experience.company,
            start_date: experience.start_date,
            end_date: experience.end_date,
            description: experience.description,
            label,
            created_at: experience.created_at,
            updated_at: experience.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExperienceCreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ExperienceListResponse {
    pub experiences: Vec<ExperienceResponse>,
    pub total: i64,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewExperienceRequest {
    #[validate(length(min = 1, max = MAX_ROLE_LENGTH))]
    pub role: String,

    #[validate(length(min = 1, max = MAX_COMPANY_LENGTH))]
    pub company: String,

    #[validate(length(min = 1, max = MAX_DATE_LENGTH))]
    pub start_date: String,

    // Blank or absent both mean "ongoing"
    #[validate(length(max = MAX_DATE_LENGTH))]
    pub end_date: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateExperienceRequest {
    #[validate(length(min = 1, max = MAX_ROLE_LENGTH))]
    pub role: PatchString,

    #[validate(length(min = 1, max = MAX_COMPANY_LENGTH))]
    pub company: PatchString,

    #[validate(length(min = 1, max = MAX_DATE_LENGTH))]
    pub start_date: PatchString,

    // SetToNull marks the experience as ongoing again
    #[validate(length(max = MAX_DATE_LENGTH))]
    pub end_date: PatchString,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: PatchString,
}

impl UpdateExperienceRequest {
    /// True when the request would not touch any column.
    pub fn is_noop(&self) -> bool {
        self.role.is_unchanged()
            && self.company.is_unchanged()
            && self.start_date.is_unchanged()
            && self.end_date.is_unchanged()
            && self.description.is_unchanged()
    }
}

// ───── Insert Preparation Logic ─────────────────────────────────────

impl NewExperienceRequest {
    pub fn prepare_for_insert(&self) -> ExperienceInsert {
        // An explicitly blank end date is stored as NULL, matching "ongoing"
        let end_date = self
            .end_date
            .as_ref()
            .filter(|date| !date.trim().is_empty())
            .cloned();

        ExperienceInsert {
            role: self.role.clone(),
            company: self.company.clone(),
            start_date: self.start_date.clone(),
            end_date,
            description: self.description.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
