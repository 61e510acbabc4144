//! Websites built or maintained for a client.

use super::Resource;
use crate::search::{nested_client_fields, Searchable};
use crate::shared::{ClientRef, FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub id: i64,
    pub nom: String,
    pub url: String,
    pub statut: String,
    pub cms: String,
    pub hebergeur: String,
    pub date_mise_en_ligne: String,
    pub client_id: Option<i64>,
    pub client: Option<ClientRef>,
}

impl Resource for Site {
    const NAME: &'static str = "site";
    const PATH: &'static str = "sites";
    const DEFAULTS: FieldTable = &[
        ("nom", FieldDefault::Text),
        ("url", FieldDefault::Text),
        ("statut", FieldDefault::Text),
        ("cms", FieldDefault::Text),
        ("hebergeur", FieldDefault::Text),
        ("date_mise_en_ligne", FieldDefault::Text),
        ("client_id", FieldDefault::NullableId),
        ("client", FieldDefault::ClientRef),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Site {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            Some(self.nom.as_str()),
            Some(self.url.as_str()),
            Some(self.statut.as_str()),
            Some(self.cms.as_str()),
            Some(self.hebergeur.as_str()),
        ];
        fields.extend(nested_client_fields(self.client.as_ref()));
        fields
    }
}
