//! Equipment installed at, or sold to, a client.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Materiel {
    pub id: i64,
    pub nom: String,
    pub marque: String,
    pub modele: String,
    pub numero_serie: String,
    pub type_materiel: String,
    pub statut: String,
    pub date_achat: String,
    pub date_fin_garantie: String,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for Materiel {
    const NAME: &'static str = "materiel";
    const PATH: &'static str = "materiels";
    const DEFAULTS: FieldTable = &[
        ("nom", FieldDefault::Text),
        ("marque", FieldDefault::Text),
        ("modele", FieldDefault::Text),
        ("numero_serie", FieldDefault::Text),
        ("type_materiel", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("date_achat", FieldDefault::Text),
        ("date_fin_garantie", FieldDefault::Text),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Materiel {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.nom.as_str()),
            Some(self.marque.as_str()),
            Some(self.modele.as_str()),
            Some(self.numero_serie.as_str()),
            Some(self.type_materiel.as_str()),
            Some(self.statut.as_str()),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
