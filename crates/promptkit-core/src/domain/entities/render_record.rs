use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Variables;

/// One successful render, as kept in the engine's history.
///
/// `variables_used` is an owned deep copy taken at render time, so later
/// changes to the caller's mapping never show up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRecord {
    /// Unique per render; two renders of the same input get different ids.
    pub id: Uuid,
    pub template_name: String,
    pub rendered_text: String,
    pub variables_used: Variables,
    pub rendered_at: DateTime<Utc>,
}

impl RenderRecord {
    pub fn new(
        template_name: impl Into<String>,
        rendered_text: impl Into<String>,
        variables_used: Variables,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_name: template_name.into(),
            rendered_text: rendered_text.into(),
            variables_used,
            rendered_at: Utc::now(),
        }
    }
}
