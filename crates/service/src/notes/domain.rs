use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain note. Field names keep the catalog's original French spelling on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub titre: String,
    pub contenue: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNote {
    pub titre: Option<String>,
    pub contenue: Option<String>,
}

/// Field subset applied by PUT and PATCH. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteChanges {
    pub titre: Option<String>,
    pub contenue: Option<String>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.titre.is_none() && self.contenue.is_none()
    }
}
