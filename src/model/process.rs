use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{parse_currency, FieldError, FieldKind, FieldSpec, FormDraft};
use crate::search::Searchable;
use crate::store::Entity;

/// Priority of a regulatory process. Wire values are the Portuguese labels
/// the original system stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Baixa,
    #[default]
    #[serde(rename = "Média")]
    Media,
    Alta,
    #[serde(rename = "Crítica")]
    Critica,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baixa => "Baixa",
            Self::Media => "Média",
            Self::Alta => "Alta",
            Self::Critica => "Crítica",
        }
    }

    pub const OPTIONS: [Priority; 4] = [Self::Baixa, Self::Media, Self::Alta, Self::Critica];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Baixa" => Ok(Self::Baixa),
            "Média" => Ok(Self::Media),
            "Alta" => Ok(Self::Alta),
            "Crítica" => Ok(Self::Critica),
            _ => Err(format!("Prioridade inválida: {}", s)),
        }
    }
}

/// Lifecycle status of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessStatus {
    #[default]
    #[serde(rename = "Em Andamento")]
    EmAndamento,
    Pendente,
    #[serde(rename = "Concluído")]
    Concluido,
    Cancelado,
    Suspenso,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmAndamento => "Em Andamento",
            Self::Pendente => "Pendente",
            Self::Concluido => "Concluído",
            Self::Cancelado => "Cancelado",
            Self::Suspenso => "Suspenso",
        }
    }

    pub const OPTIONS: [ProcessStatus; 5] = [
        Self::EmAndamento,
        Self::Pendente,
        Self::Concluido,
        Self::Cancelado,
        Self::Suspenso,
    ];
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Em Andamento" => Ok(Self::EmAndamento),
            "Pendente" => Ok(Self::Pendente),
            "Concluído" => Ok(Self::Concluido),
            "Cancelado" => Ok(Self::Cancelado),
            "Suspenso" => Ok(Self::Suspenso),
            _ => Err(format!("Status inválido: {}", s)),
        }
    }
}

/// Dropdown options the original process form offers; free text is reached
/// through the trailing "Outro" entries.
pub static PROCESS_TYPE_OPTIONS: &[&str] = &[
    "Licenciamento Ambiental",
    "EIA/RIMA",
    "RAS",
    "CAR",
    "Outorga de Água",
    "Plano de Controle Ambiental",
    "Relatório de Controle Ambiental",
    "Auditoria Ambiental",
    "Outro",
];

pub static CLIENT_OPTIONS: &[&str] = &[
    "Empresa ABC Ltda",
    "Indústria XYZ S.A.",
    "Construtora Verde Ltda",
    "Agropecuária Sustentável",
    "Mineração Responsável S.A.",
    "Outro",
];

pub static RESPONSIBLE_USER_OPTIONS: &[&str] = &[
    "Ana Silva",
    "Carlos Santos",
    "Maria Oliveira",
    "João Costa",
    "Pedro Almeida",
    "Outro",
];

/// A regulatory process. Dates other than the audit timestamps are plain
/// `YYYY-MM-DD` strings, as the original stores them.
///
/// `client` is a denormalized client *name*, not a reference to a `Client`
/// id; whether that is intentional is an open product question, so it is
/// preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: u64,
    pub process_number: String,
    pub protocol_date: String,
    pub process_type: String,
    pub priority: Priority,
    pub object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub municipality: String,
    pub status: ProcessStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable form fields of a process. Optional record fields appear here as
/// empty strings (the form's representation); they collapse back to `None`
/// when the draft is written to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessDraft {
    pub process_number: String,
    pub protocol_date: String,
    pub process_type: String,
    pub priority: Priority,
    pub object: String,
    pub client: String,
    pub municipality: String,
    pub status: ProcessStatus,
    pub responsible_user: String,
    pub due_date: String,
    pub start_date: String,
    pub completion_date: String,
    pub location: String,
    pub budget: Option<u64>,
    pub environmental_impact: String,
    pub observations: String,
}

impl ProcessDraft {
    pub fn from_record(process: &Process) -> Self {
        let text = |opt: &Option<String>| opt.clone().unwrap_or_default();
        Self {
            process_number: process.process_number.clone(),
            protocol_date: process.protocol_date.clone(),
            process_type: process.process_type.clone(),
            priority: process.priority,
            object: process.object.clone(),
            client: text(&process.client),
            municipality: process.municipality.clone(),
            status: process.status,
            responsible_user: text(&process.responsible_user),
            due_date: text(&process.due_date),
            start_date: text(&process.start_date),
            completion_date: text(&process.completion_date),
            location: text(&process.location),
            budget: process.budget,
            environmental_impact: text(&process.environmental_impact),
            observations: text(&process.observations),
        }
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub static PROCESS_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "processNumber",
        label: "Número do Processo",
        kind: FieldKind::Text,
        required: Some("Número do processo é obrigatório"),
    },
    FieldSpec {
        name: "protocolDate",
        label: "Data de Protocolo",
        kind: FieldKind::Date,
        required: Some("Data de protocolo é obrigatória"),
    },
    FieldSpec {
        name: "processType",
        label: "Tipo de Processo",
        kind: FieldKind::Select,
        required: Some("Tipo de processo é obrigatório"),
    },
    FieldSpec {
        name: "priority",
        label: "Prioridade",
        kind: FieldKind::Select,
        required: None,
    },
    FieldSpec {
        name: "object",
        label: "Objeto do Processo",
        kind: FieldKind::TextArea,
        required: Some("Objeto do processo é obrigatório"),
    },
    FieldSpec {
        name: "client",
        label: "Cliente",
        kind: FieldKind::Select,
        required: None,
    },
    FieldSpec {
        name: "municipality",
        label: "Município",
        kind: FieldKind::Text,
        required: Some("Município é obrigatório"),
    },
    FieldSpec {
        name: "status",
        label: "Status",
        kind: FieldKind::Select,
        required: None,
    },
    FieldSpec {
        name: "responsibleUser",
        label: "Responsável",
        kind: FieldKind::Select,
        required: None,
    },
    FieldSpec {
        name: "dueDate",
        label: "Data de Vencimento",
        kind: FieldKind::Date,
        required: None,
    },
    FieldSpec {
        name: "startDate",
        label: "Data de Início",
        kind: FieldKind::Date,
        required: None,
    },
    FieldSpec {
        name: "completionDate",
        label: "Data de Conclusão",
        kind: FieldKind::Date,
        required: None,
    },
    FieldSpec {
        name: "location",
        label: "Localização",
        kind: FieldKind::Text,
        required: None,
    },
    FieldSpec {
        name: "budget",
        label: "Orçamento",
        kind: FieldKind::Currency,
        required: None,
    },
    FieldSpec {
        name: "environmentalImpact",
        label: "Impacto Ambiental",
        kind: FieldKind::TextArea,
        required: None,
    },
    FieldSpec {
        name: "observations",
        label: "Observações",
        kind: FieldKind::TextArea,
        required: None,
    },
];

impl FormDraft for ProcessDraft {
    fn schema() -> &'static [FieldSpec] {
        PROCESS_FIELDS
    }

    fn get(&self, field: &str) -> Option<String> {
        let value = match field {
            "processNumber" => self.process_number.clone(),
            "protocolDate" => self.protocol_date.clone(),
            "processType" => self.process_type.clone(),
            "priority" => self.priority.as_str().to_string(),
            "object" => self.object.clone(),
            "client" => self.client.clone(),
            "municipality" => self.municipality.clone(),
            "status" => self.status.as_str().to_string(),
            "responsibleUser" => self.responsible_user.clone(),
            "dueDate" => self.due_date.clone(),
            "startDate" => self.start_date.clone(),
            "completionDate" => self.completion_date.clone(),
            "location" => self.location.clone(),
            "budget" => self.budget.map(|b| b.to_string()).unwrap_or_default(),
            "environmentalImpact" => self.environmental_impact.clone(),
            "observations" => self.observations.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "processNumber" => self.process_number = value.to_string(),
            "protocolDate" => self.protocol_date = value.to_string(),
            "processType" => self.process_type = value.to_string(),
            "priority" => {
                self.priority = value.parse().map_err(|_| FieldError::InvalidValue {
                    field: "priority",
                    value: value.to_string(),
                })?;
            }
            "object" => self.object = value.to_string(),
            "client" => self.client = value.to_string(),
            "municipality" => self.municipality = value.to_string(),
            "status" => {
                self.status = value.parse().map_err(|_| FieldError::InvalidValue {
                    field: "status",
                    value: value.to_string(),
                })?;
            }
            "responsibleUser" => self.responsible_user = value.to_string(),
            "dueDate" => self.due_date = value.to_string(),
            "startDate" => self.start_date = value.to_string(),
            "completionDate" => self.completion_date = value.to_string(),
            "location" => self.location = value.to_string(),
            "budget" => self.budget = parse_currency(value),
            "environmentalImpact" => self.environmental_impact = value.to_string(),
            "observations" => self.observations = value.to_string(),
            _ => return Err(FieldError::UnknownField(field.to_string())),
        }
        Ok(())
    }
}

impl Entity for Process {
    type Draft = ProcessDraft;
    const KIND: &'static str = "Processo";

    fn id(&self) -> u64 {
        self.id
    }

    fn to_draft(&self) -> ProcessDraft {
        ProcessDraft::from_record(self)
    }

    fn from_draft(id: u64, draft: ProcessDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            process_number: draft.process_number,
            protocol_date: draft.protocol_date,
            process_type: draft.process_type,
            priority: draft.priority,
            object: draft.object,
            client: optional(draft.client),
            municipality: draft.municipality,
            status: draft.status,
            responsible_user: optional(draft.responsible_user),
            due_date: optional(draft.due_date),
            start_date: optional(draft.start_date),
            completion_date: optional(draft.completion_date),
            location: optional(draft.location),
            budget: draft.budget,
            environmental_impact: optional(draft.environmental_impact),
            observations: optional(draft.observations),
            created_at,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: ProcessDraft, updated_at: DateTime<Utc>) {
        self.process_number = draft.process_number;
        self.protocol_date = draft.protocol_date;
        self.process_type = draft.process_type;
        self.priority = draft.priority;
        self.object = draft.object;
        self.client = optional(draft.client);
        self.municipality = draft.municipality;
        self.status = draft.status;
        self.responsible_user = optional(draft.responsible_user);
        self.due_date = optional(draft.due_date);
        self.start_date = optional(draft.start_date);
        self.completion_date = optional(draft.completion_date);
        self.location = optional(draft.location);
        self.budget = draft.budget;
        self.environmental_impact = optional(draft.environmental_impact);
        self.observations = optional(draft.observations);
        self.updated_at = Some(updated_at);
    }
}

impl Searchable for Process {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.process_number,
            &self.process_type,
            &self.object,
            &self.municipality,
            self.client.as_deref().unwrap_or(""),
        ]
    }
}
