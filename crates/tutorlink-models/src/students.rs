//! Student profile models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tutorlink_core::serde::deserialize_string_or_number;
use validator::Validate;

/// School year the student is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "12")]
    Twelfth,
    #[serde(rename = "graduate")]
    Graduate,
}

/// University entrance exam session the student prepares for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetExam {
    Tyt,
    Ayt,
    Both,
}

/// Body of `POST /students/me` (create or update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentProfilePayload {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub grade: Grade,
    pub target_exam: TargetExam,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub target_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub target_rank: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub preferred_modes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Student profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentProfile {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub user_id: String,
    pub full_name: Option<String>,
    pub grade: Option<Grade>,
    pub target_exam: Option<TargetExam>,
    #[serde(default)]
    pub target_score: Option<f64>,
    #[serde(default)]
    pub target_rank: Option<i64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub preferred_modes: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// `{ "profile": ... }` wrapper used by the student endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentProfileEnvelope {
    pub profile: StudentProfile,
}
