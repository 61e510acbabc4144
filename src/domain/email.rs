//! Mailboxes provisioned for a client.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Email {
    pub id: i64,
    pub adresse: String,
    pub domaine: String,
    pub fournisseur: String,
    pub quota: String,
    pub statut: String,
    pub date_creation: String,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for Email {
    const NAME: &'static str = "email";
    const PATH: &'static str = "emails";
    const DEFAULTS: FieldTable = &[
        ("adresse", FieldDefault::Text),
        ("domaine", FieldDefault::Text),
        ("fournisseur", FieldDefault::Text),
        ("quota", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("date_creation", FieldDefault::Text),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Email {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.adresse.as_str()),
            Some(self.domaine.as_str()),
            Some(self.fournisseur.as_str()),
            Some(self.statut.as_str()),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
