use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FieldError, FieldKind, FieldSpec, FormDraft};
use crate::search::Searchable;
use crate::store::Entity;

/// Known specialization options; "Outro" is the escape hatch into free text.
pub static SPECIALIZATION_OPTIONS: &[&str] = &[
    "Engenharia Ambiental",
    "Biologia",
    "Geologia",
    "Engenharia Florestal",
    "Engenharia Civil",
    "Química Ambiental",
    "Gestão Ambiental",
    "Oceanografia",
    "Agronomia",
    "Meteorologia",
    "Hidrologia",
    "Ecologia",
    "Geografia",
    "Outro",
];

/// A field technician with a professional registration id (CREA, CRBio, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub specialization: String,
    pub professional_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable form fields of a technician.
///
/// `custom_specialization` backs the "Outro" escape hatch: when the selector
/// holds "Outro" and the custom text is non-empty, the custom text is what
/// gets stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicianDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub specialization: String,
    pub professional_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_specialization: String,
}

impl TechnicianDraft {
    /// Populate a draft from an existing record. A stored specialization
    /// that is not one of the known options selects "Outro" and pre-fills
    /// the custom text field with the stored value.
    pub fn from_record(technician: &Technician) -> Self {
        let known = SPECIALIZATION_OPTIONS.contains(&technician.specialization.as_str());
        Self {
            name: technician.name.clone(),
            address: technician.address.clone(),
            city: technician.city.clone(),
            state: technician.state.clone(),
            zip_code: technician.zip_code.clone(),
            specialization: if known {
                technician.specialization.clone()
            } else {
                "Outro".to_string()
            },
            professional_id: technician.professional_id.clone(),
            custom_specialization: if known {
                String::new()
            } else {
                technician.specialization.clone()
            },
        }
    }

    /// The specialization that actually gets stored: the custom text when
    /// "Outro" is selected and filled in, the selector value otherwise.
    pub fn resolved_specialization(&self) -> String {
        if self.specialization == "Outro" && !self.custom_specialization.trim().is_empty() {
            self.custom_specialization.trim().to_string()
        } else {
            self.specialization.clone()
        }
    }
}

pub static TECHNICIAN_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Nome",
        kind: FieldKind::Text,
        required: Some("Nome é obrigatório"),
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
        name: "specialization",
        label: "Área de Atuação",
        kind: FieldKind::Select,
        required: Some("Área de atuação é obrigatória"),
    },
    FieldSpec {
        name: "professionalId",
        label: "Registro Profissional",
        kind: FieldKind::Text,
        required: Some("Registro profissional é obrigatório"),
    },
];

impl FormDraft for TechnicianDraft {
    fn schema() -> &'static [FieldSpec] {
        TECHNICIAN_FIELDS
    }

    fn get(&self, field: &str) -> Option<String> {
        let value = match field {
            "name" => &self.name,
            "address" => &self.address,
            "city" => &self.city,
            "state" => &self.state,
            "zipCode" => &self.zip_code,
            "specialization" => &self.specialization,
            "professionalId" => &self.professional_id,
            "customSpecialization" => &self.custom_specialization,
            _ => return None,
        };
        Some(value.clone())
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "zipCode" => &mut self.zip_code,
            "specialization" => &mut self.specialization,
            "professionalId" => &mut self.professional_id,
            "customSpecialization" => &mut self.custom_specialization,
            _ => return Err(FieldError::UnknownField(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }
}

impl Entity for Technician {
    type Draft = TechnicianDraft;
    const KIND: &'static str = "Técnico";

    fn id(&self) -> u64 {
        self.id
    }

    fn to_draft(&self) -> TechnicianDraft {
        TechnicianDraft::from_record(self)
    }

    fn from_draft(id: u64, draft: TechnicianDraft, created_at: DateTime<Utc>) -> Self {
        let specialization = draft.resolved_specialization();
        Self {
            id,
            name: draft.name,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            specialization,
            professional_id: draft.professional_id,
            created_at,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: TechnicianDraft, updated_at: DateTime<Utc>) {
        self.specialization = draft.resolved_specialization();
        self.name = draft.name;
        self.address = draft.address;
        self.city = draft.city;
        self.state = draft.state;
        self.zip_code = draft.zip_code;
        self.professional_id = draft.professional_id;
        self.updated_at = Some(updated_at);
    }
}

impl Searchable for Technician {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.specialization, &self.professional_id]
    }
}
