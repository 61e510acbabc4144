//! Hosting plans and domains held on behalf of a client.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Hebergement {
    pub id: i64,
    pub nom: String,
    pub domaine: String,
    pub fournisseur: String,
    pub offre: String,
    pub statut: String,
    pub date_expiration: String,
    pub prix: f64,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for Hebergement {
    const NAME: &'static str = "hebergement";
    const PATH: &'static str = "hebergements";
    const DEFAULTS: FieldTable = &[
        ("nom", FieldDefault::Text),
        ("domaine", FieldDefault::Text),
        ("fournisseur", FieldDefault::Text),
        ("offre", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("date_expiration", FieldDefault::Text),
        ("prix", FieldDefault::Number),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Hebergement {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.nom.as_str()),
            Some(self.domaine.as_str()),
            Some(self.fournisseur.as_str()),
            Some(self.offre.as_str()),
            Some(self.statut.as_str()),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
