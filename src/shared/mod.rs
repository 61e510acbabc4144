//! Shared value objects and helpers used across all resource modules.

pub mod normalize;

pub use normalize::{normalize_record, FieldDefault, FieldTable};

use serde::{Deserialize, Serialize};

/// Defaults for a nested client reference.
pub const CLIENT_REF_DEFAULTS: FieldTable = &[
    ("id", FieldDefault::NullableId),
    ("nom", FieldDefault::Text),
    ("prenom", FieldDefault::Text),
    ("raison_sociale", FieldDefault::Text),
    ("email", FieldDefault::Text),
    ("ville", FieldDefault::Text),
];

// ─── ClientRef ───────────────────────────────────────────────────────────────

/// The client attached to a site, visit, contract or any other record.
///
/// Always normalized: string fields are never absent, only empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRef {
    pub id: Option<i64>,
    pub nom: String,
    pub prenom: String,
    pub raison_sociale: String,
    pub email: String,
    pub ville: String,
}

impl ClientRef {
    /// Company name when known, otherwise "prenom nom".
    pub fn display_name(&self) -> String {
        if !self.raison_sociale.is_empty() {
            return self.raison_sociale.clone();
        }
        match (self.prenom.is_empty(), self.nom.is_empty()) {
            (false, false) => format!("{} {}", self.prenom, self.nom),
            (true, _) => self.nom.clone(),
            (false, true) => self.prenom.clone(),
        }
    }

    pub(crate) fn search_fields(&self) -> [&str; 4] {
        [&self.nom, &self.prenom, &self.raison_sociale, &self.email]
    }
}
