//! Technician visits at a client's premises.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

/// Status value of a visit that is scheduled but not yet done.
pub const PROGRAMMED_STATUS: &str = "programmée";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Visite {
    pub id: i64,
    pub date_visite: String,
    pub heure: String,
    pub statut: String,
    pub type_visite: String,
    pub technicien: String,
    pub adresse: String,
    pub commentaire: Option<String>,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Visite {
    /// Whether the visit is still scheduled. Compared case-insensitively.
    pub fn is_programmed(&self) -> bool {
        self.statut.trim().to_lowercase() == PROGRAMMED_STATUS
    }
}

impl Resource for Visite {
    const NAME: &'static str = "visite";
    const PATH: &'static str = "visites";
    const DEFAULTS: FieldTable = &[
        ("date_visite", FieldDefault::Text),
        ("heure", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("type_visite", FieldDefault::Text),
        ("technicien", FieldDefault::Text),
        ("adresse", FieldDefault::Text),
        ("commentaire", FieldDefault::NullableText),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Visite {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.date_visite.as_str()),
            Some(self.statut.as_str()),
            Some(self.type_visite.as_str()),
            Some(self.technicien.as_str()),
            Some(self.adresse.as_str()),
            self.commentaire.as_deref(),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}

/// Tabs of the visits screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitTab {
    /// Only visits still scheduled.
    #[default]
    Programmed,
    /// Every visit, past and scheduled.
    History,
}

impl VisitTab {
    pub fn includes(&self, visite: &Visite) -> bool {
        match self {
            VisitTab::Programmed => visite.is_programmed(),
            VisitTab::History => true,
        }
    }
}
