//! Contracts (maintenance, support, hosting bundles) signed with a client.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contrat {
    pub id: i64,
    pub numero: String,
    pub titre: String,
    pub type_contrat: String,
    pub statut: String,
    pub date_debut: String,
    pub date_fin: String,
    pub periodicite: String,
    pub montant: f64,
    pub description: Option<String>,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for Contrat {
    const NAME: &'static str = "contrat";
    const PATH: &'static str = "contrats";
    const DEFAULTS: FieldTable = &[
        ("numero", FieldDefault::Text),
        ("titre", FieldDefault::Text),
        ("type_contrat", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("date_debut", FieldDefault::Text),
        ("date_fin", FieldDefault::Text),
        ("periodicite", FieldDefault::Text),
        ("montant", FieldDefault::Number),
        ("description", FieldDefault::NullableText),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Contrat {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.numero.as_str()),
            Some(self.titre.as_str()),
            Some(self.type_contrat.as_str()),
            Some(self.statut.as_str()),
            self.description.as_deref(),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
