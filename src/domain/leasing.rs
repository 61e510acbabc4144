//! NexLease: equipment leasing agreements.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NexLease {
    pub id: i64,
    pub reference: String,
    pub organisme: String,
    /// Free-text description of the leased equipment.
    pub materiel: String,
    pub statut: String,
    pub date_debut: String,
    pub date_fin: String,
    pub loyer_mensuel: f64,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for NexLease {
    const NAME: &'static str = "nexlease";
    const PATH: &'static str = "nexleases";
    const DEFAULTS: FieldTable = &[
        ("reference", FieldDefault::Text),
        ("organisme", FieldDefault::Text),
        ("materiel", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("date_debut", FieldDefault::Text),
        ("date_fin", FieldDefault::Text),
        ("loyer_mensuel", FieldDefault::Number),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for NexLease {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.reference.as_str()),
            Some(self.organisme.as_str()),
            Some(self.materiel.as_str()),
            Some(self.statut.as_str()),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
