//! Demonstration dataset: the records the original mocked services shipped
//! with, loaded into the stores at startup unless seeding is disabled.

use chrono::{DateTime, Utc};

use crate::model::{Client, Priority, Process, ProcessStatus, Technician};

/// Parse a fixed timestamp literal from this module.
fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("seed timestamp literal")
}

pub fn clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Empresa ABC Ltda".into(),
            document: "12.345.678/0001-90".into(),
            email: "contato@empresaabc.com".into(),
            phone: "(11) 3456-7890".into(),
            address: "Av. Paulista, 1000".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            zip_code: "01310-100".into(),
            contact_person: "João Silva".into(),
            contact_phone: "(11) 98765-4321".into(),
            contact_email: "joao.silva@empresaabc.com".into(),
            notes: "Cliente desde 2020".into(),
            created_at: ts("2020-01-15T10:30:00Z"),
            updated_at: None,
        },
        Client {
            id: 2,
            name: "Maria Souza".into(),
            document: "123.456.789-00".into(),
            email: "maria.souza@email.com".into(),
            phone: "(21) 98765-4321".into(),
            address: "Rua das Flores, 123".into(),
            city: "Rio de Janeiro".into(),
            state: "RJ".into(),
            zip_code: "22000-000".into(),
            contact_person: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
            notes: "Cliente pessoa física".into(),
            created_at: ts("2021-03-20T14:45:00Z"),
            updated_at: None,
        },
        Client {
            id: 3,
            name: "Tech Solutions S.A.".into(),
            document: "98.765.432/0001-10".into(),
            email: "contato@techsolutions.com".into(),
            phone: "(31) 3333-4444".into(),
            address: "Rua da Tecnologia, 500".into(),
            city: "Belo Horizonte".into(),
            state: "MG".into(),
            zip_code: "30000-000".into(),
            contact_person: "Ana Oliveira".into(),
            contact_phone: "(31) 99999-8888".into(),
            contact_email: "ana@techsolutions.com".into(),
            notes: "Empresa de tecnologia".into(),
            created_at: ts("2019-11-05T09:15:00Z"),
            updated_at: None,
        },
    ]
}

pub fn processes() -> Vec<Process> {
    vec![
        Process {
            id: 1,
            process_number: "PROC-2024-001".into(),
            protocol_date: "2024-01-15".into(),
            process_type: "Licenciamento Ambiental".into(),
            priority: Priority::Alta,
            object: "Licenciamento ambiental para implantação de unidade industrial".into(),
            client: Some("Empresa ABC Ltda".into()),
            municipality: "São Paulo".into(),
            status: ProcessStatus::EmAndamento,
            responsible_user: Some("Ana Silva".into()),
            due_date: Some("2024-06-15".into()),
            start_date: Some("2024-01-20".into()),
            completion_date: None,
            location: Some("Zona Industrial Norte".into()),
            budget: Some(150_000),
            environmental_impact: Some(
                "Impacto moderado na qualidade do ar e recursos hídricos".into(),
            ),
            observations: Some("Processo prioritário conforme cronograma estabelecido".into()),
            created_at: ts("2024-01-15T10:30:00Z"),
            updated_at: None,
        },
        Process {
            id: 2,
            process_number: "PROC-2024-002".into(),
            protocol_date: "2024-02-01".into(),
            process_type: "EIA/RIMA".into(),
            priority: Priority::Critica,
            object: "Estudo de Impacto Ambiental para projeto de mineração".into(),
            client: Some("Mineração Responsável S.A.".into()),
            municipality: "Minas Gerais".into(),
            status: ProcessStatus::Pendente,
            responsible_user: Some("Carlos Santos".into()),
            due_date: Some("2024-08-01".into()),
            start_date: Some("2024-02-10".into()),
            completion_date: None,
            location: Some("Região de Carajás".into()),
            budget: Some(500_000),
            environmental_impact: Some("Alto impacto na biodiversidade e recursos hídricos".into()),
            observations: Some("Processo complexo que requer análise detalhada".into()),
            created_at: ts("2024-02-01T14:45:00Z"),
            updated_at: None,
        },
        Process {
            id: 3,
            process_number: "PROC-2024-003".into(),
            protocol_date: "2024-02-15".into(),
            process_type: "CAR".into(),
            priority: Priority::Media,
            object: "Cadastro Ambiental Rural para propriedade agrícola".into(),
            client: Some("Agropecuária Sustentável".into()),
            municipality: "Mato Grosso".into(),
            status: ProcessStatus::Concluido,
            responsible_user: Some("Maria Oliveira".into()),
            due_date: Some("2024-04-15".into()),
            start_date: Some("2024-02-20".into()),
            completion_date: Some("2024-04-10".into()),
            location: Some("Fazenda São José".into()),
            budget: Some(25_000),
            environmental_impact: Some("Baixo impacto, área já degradada".into()),
            observations: Some("Processo concluído dentro do prazo estabelecido".into()),
            created_at: ts("2024-02-15T09:15:00Z"),
            updated_at: None,
        },
    ]
}

pub fn technicians() -> Vec<Technician> {
    vec![
        Technician {
            id: 1,
            name: "Carlos Silva".into(),
            address: "Av. Paulista, 1500, Apto 45".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            zip_code: "01310-200".into(),
            specialization: "Engenharia Ambiental".into(),
            professional_id: "CREA-SP 123456".into(),
            created_at: ts("2021-03-15T10:30:00Z"),
            updated_at: None,
        },
        Technician {
            id: 2,
            name: "Ana Oliveira".into(),
            address: "Rua das Flores, 250".into(),
            city: "Rio de Janeiro".into(),
            state: "RJ".into(),
            zip_code: "22000-100".into(),
            specialization: "Biologia".into(),
            professional_id: "CRBio 12345-01".into(),
            created_at: ts("2022-01-20T14:45:00Z"),
            updated_at: None,
        },
        Technician {
            id: 3,
            name: "Marcos Santos".into(),
            address: "Av. Amazonas, 750".into(),
            city: "Belo Horizonte".into(),
            state: "MG".into(),
            zip_code: "30000-000".into(),
            specialization: "Geologia".into(),
            professional_id: "CREA-MG 78910".into(),
            created_at: ts("2020-11-05T09:15:00Z"),
            updated_at: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Entity;

    #[test]
    fn seed_ids_are_sequential_from_one() {
        for (ids, len) in [
            (clients().iter().map(Entity::id).collect::<Vec<_>>(), 3),
            (processes().iter().map(Entity::id).collect::<Vec<_>>(), 3),
            (technicians().iter().map(Entity::id).collect::<Vec<_>>(), 3),
        ] {
            assert_eq!(ids, (1..=len).collect::<Vec<u64>>());
        }
    }

    #[test]
    fn seed_records_have_no_update_stamp() {
        assert!(clients().iter().all(|c| c.updated_at.is_none()));
        assert!(processes().iter().all(|p| p.updated_at.is_none()));
        assert!(technicians().iter().all(|t| t.updated_at.is_none()));
    }
}
