use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FieldError, FieldKind, FieldSpec, FormDraft};
use crate::search::Searchable;
use crate::store::Entity;

/// A client of the consultancy: a company or an individual, identified by
/// a CPF/CNPJ tax document (format unvalidated, as in the original system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable form fields of a client. All fields default to empty strings so
/// a partially filled payload deserializes and fails validation instead of
/// failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDraft {
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub notes: String,
}

impl ClientDraft {
    /// Populate a draft from an existing record (edit flow).
    pub fn from_record(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            document: client.document.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            city: client.city.clone(),
            state: client.state.clone(),
            zip_code: client.zip_code.clone(),
            contact_person: client.contact_person.clone(),
            contact_phone: client.contact_phone.clone(),
            contact_email: client.contact_email.clone(),
            notes: client.notes.clone(),
        }
    }
}

pub static CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Nome da Pessoa / Empresa",
        kind: FieldKind::Text,
        required: Some("Nome é obrigatório"),
    },
    FieldSpec {
        name: "document",
        label: "CPF/CNPJ",
        kind: FieldKind::Text,
        required: Some("CPF/CNPJ é obrigatório"),
    },
    FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: None,
    },
    FieldSpec {
        name: "phone",
        label: "Telefone",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "address",
        label: "Endereço",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "city",
        label: "Cidade",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "state",
        label: "Estado",
        kind: FieldKind::Select,
        required: None,
    },
    FieldSpec {
        name: "zipCode",
        label: "CEP",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "contactPerson",
        label: "Pessoa de Contato",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "contactPhone",
        label: "Telefone de Contato",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "contactEmail",
        label: "Email de Contato",
        kind: FieldKind::Email,
        required: None,
    },
    FieldSpec {
        name: "notes",
        label: "Observações",
        kind: FieldKind::TextArea,
        required: None,
    },
];

impl FormDraft for ClientDraft {
    fn schema() -> &'static [FieldSpec] {
        CLIENT_FIELDS
    }

    fn get(&self, field: &str) -> Option<String> {
        let value = match field {
            "name" => &self.name,
            "document" => &self.document,
            "email" => &self.email,
            "phone" => &self.phone,
            "address" => &self.address,
            "city" => &self.city,
            "state" => &self.state,
            "zipCode" => &self.zip_code,
            "contactPerson" => &self.contact_person,
            "contactPhone" => &self.contact_phone,
            "contactEmail" => &self.contact_email,
            "notes" => &self.notes,
            _ => return None,
        };
        Some(value.clone())
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "name" => &mut self.name,
            "document" => &mut self.document,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "zipCode" => &mut self.zip_code,
            "contactPerson" => &mut self.contact_person,
            "contactPhone" => &mut self.contact_phone,
            "contactEmail" => &mut self.contact_email,
            "notes" => &mut self.notes,
            _ => return Err(FieldError::UnknownField(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }
}

impl Entity for Client {
    type Draft = ClientDraft;
    const KIND: &'static str = "Cliente";

    fn id(&self) -> u64 {
        self.id
    }

    fn to_draft(&self) -> ClientDraft {
        ClientDraft::from_record(self)
    }

    fn from_draft(id: u64, draft: ClientDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            document: draft.document,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            contact_person: draft.contact_person,
            contact_phone: draft.contact_phone,
            contact_email: draft.contact_email,
            notes: draft.notes,
            created_at,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: ClientDraft, updated_at: DateTime<Utc>) {
        self.name = draft.name;
        self.document = draft.document;
        self.email = draft.email;
        self.phone = draft.phone;
        self.address = draft.address;
        self.city = draft.city;
        self.state = draft.state;
        self.zip_code = draft.zip_code;
        self.contact_person = draft.contact_person;
        self.contact_phone = draft.contact_phone;
        self.contact_email = draft.contact_email;
        self.notes = draft.notes;
        self.updated_at = Some(updated_at);
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.document, &self.email]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_roundtrips_through_record() {
        let draft = ClientDraft {
            name: "Empresa ABC Ltda".into(),
            document: "12.345.678/0001-90".into(),
            email: "contato@empresaabc.com".into(),
            ..Default::default()
        };
        let client = Client::from_draft(1, draft.clone(), Utc::now());
        assert_eq!(ClientDraft::from_record(&client), draft);
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let client = Client::from_draft(7, ClientDraft::default(), Utc::now());
        let json = serde_json::to_value(&client).unwrap();
        assert!(json.get("zipCode").is_some());
        assert!(json.get("contactPerson").is_some());
        assert!(json.get("createdAt").is_some());
        // Absent until the first update.
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn draft_deserializes_with_missing_fields() {
        let draft: ClientDraft = serde_json::from_str(r#"{"name": "Foo"}"#).unwrap();
        assert_eq!(draft.name, "Foo");
        assert_eq!(draft.document, "");
    }
}
