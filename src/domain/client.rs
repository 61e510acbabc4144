//! Clients: the customers every other record hangs off.

use super::Resource;
use crate::search::Searchable;
use crate::shared::{FieldDefault, FieldTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub telephone: String,
    pub mobile: String,
    pub adresse: String,
    pub ville: String,
    pub code_postal: String,
    pub raison_sociale: String,
    pub siret: String,
    /// Particulier / professionnel / association…
    #[serde(rename = "type")]
    pub type_client: String,
    pub reference: String,
    pub notes: Option<String>,
}

impl Resource for Client {
    const NAME: &'static str = "client";
    const PATH: &'static str = "clients";
    const DEFAULTS: FieldTable = &[
        ("nom", FieldDefault::Text),
        ("prenom", FieldDefault::Text),
        ("email", FieldDefault::Text),
        ("telephone", FieldDefault::Text),
        ("mobile", FieldDefault::Text),
        ("adresse", FieldDefault::Text),
        ("ville", FieldDefault::Text),
        ("code_postal", FieldDefault::Text),
        ("raison_sociale", FieldDefault::Text),
        ("siret", FieldDefault::Text),
        ("type", FieldDefault::Text),
        ("reference", FieldDefault::Text),
        ("notes", FieldDefault::NullableText),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.nom.as_str()),
            Some(self.prenom.as_str()),
            Some(self.email.as_str()),
            Some(self.telephone.as_str()),
            Some(self.mobile.as_str()),
            Some(self.adresse.as_str()),
            Some(self.ville.as_str()),
            Some(self.code_postal.as_str()),
            Some(self.raison_sociale.as_str()),
            Some(self.siret.as_str()),
            Some(self.type_client.as_str()),
            Some(self.reference.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize;
    use serde_json::json;

    #[test]
    fn test_partial_payload_normalizes() {
        let client: Client = normalize(json!({
            "id": 12,
            "nom": "Durand",
            "code_postal": 69003,
            "type": "professionnel"
        }))
        .unwrap();
        assert_eq!(client.id, 12);
        assert_eq!(client.nom, "Durand");
        assert_eq!(client.code_postal, "69003");
        assert_eq!(client.type_client, "professionnel");
        assert_eq!(client.email, "");
        assert!(client.notes.is_none());
    }
}
