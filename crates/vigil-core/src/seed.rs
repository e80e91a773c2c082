//! Built-in sample operations for demos and first runs.

use jiff::Timestamp;

use crate::models::{OperationPlan, OperationStatus, Vehicle};

/// 2024-07-01T00:00:00Z
const SAMPLE_CREATED_AT: Timestamp = Timestamp::constant(1_719_792_000, 0);

struct Sample {
    id: &'static str,
    name: &'static str,
    inspectorate: &'static str,
    macro_region: &'static str,
    location: &'static str,
    date: &'static str,
    start_time: &'static str,
    objective: &'static str,
    scenario: &'static str,
    radio: &'static str,
    equipment: &'static str,
    meeting_point: &'static str,
    agents: u32,
    vehicles: u32,
    arrived: u32,
    status: OperationStatus,
    responsible: &'static str,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "1",
        name: "Final do Campeonato Mineiro",
        inspectorate: "Inspetoria de Operações Especiais (IOPE)",
        macro_region: "Macro 3",
        location: "Estádio Mineirão, Belo Horizonte",
        date: "2024-07-28",
        start_time: "16:00",
        objective: "Assegurar a ordem pública no entorno do estádio.",
        scenario: "Grande fluxo de torcedores e trânsito intenso.",
        radio: "Rede Operacional (153)",
        equipment: "HT, Colete Balístico, Espargidor",
        meeting_point: "Entrada Sul do Mineirão",
        agents: 150,
        vehicles: 15,
        arrived: 0,
        status: OperationStatus::Planned,
        responsible: "Inspetor Chefe Silva",
    },
    Sample {
        id: "2",
        name: "Show da Banda Skank - Turnê Final",
        inspectorate: "Inspetoria Regional Centro-Sul",
        macro_region: "Macro 1",
        location: "Esplanada do Mineirão, Belo Horizonte",
        date: "2024-08-15",
        start_time: "20:00",
        objective: "Garantir a segurança dos participantes do evento.",
        scenario: "Local aberto com capacidade para 50 mil pessoas.",
        radio: "Rede Operacional (153)",
        equipment: "HT, Colete Balístico",
        meeting_point: "Esplanada Principal",
        agents: 120,
        vehicles: 10,
        arrived: 0,
        status: OperationStatus::Planned,
        responsible: "Subinspetor Lima",
    },
    Sample {
        id: "3",
        name: "Feira de Artesanato da Afonso Pena",
        inspectorate: "Inspetoria Regional Leste",
        macro_region: "Macro 2",
        location: "Avenida Afonso Pena, Belo Horizonte",
        date: "Todo Domingo",
        start_time: "08:00",
        objective: "Assegurar a incolumidade das pessoas e do patrimônio público.",
        scenario: "Evento tradicional com grande circulação de turistas.",
        radio: "Rede Principal",
        equipment: "Padrão GCMBH",
        meeting_point: "Avenida Afonso Pena",
        agents: 80,
        vehicles: 8,
        arrived: 3,
        status: OperationStatus::InProgress,
        responsible: "Subinspetor Lima",
    },
];

/// Three representative operations: two planned events and a recurring fair
/// already under way with part of its fleet checked in.
///
/// The fair keeps its free-form date ("Todo Domingo"), which new input would
/// reject but stored plans may carry.
pub fn sample_operations() -> Vec<OperationPlan> {
    SAMPLES.iter().map(Sample::to_plan).collect()
}

impl Sample {
    fn to_plan(&self) -> OperationPlan {
        let mut vehicles = Vehicle::fleet(self.vehicles);
        for vehicle in vehicles.iter_mut().take(self.arrived as usize) {
            vehicle.arrived = true;
        }

        OperationPlan {
            id: self.id.to_string(),
            name: self.name.to_string(),
            inspectorate: self.inspectorate.to_string(),
            macro_region: self.macro_region.to_string(),
            location: self.location.to_string(),
            date: self.date.to_string(),
            start_time: self.start_time.to_string(),
            objective: self.objective.to_string(),
            scenario: self.scenario.to_string(),
            uniform: "Uniforme Operacional".to_string(),
            radio: self.radio.to_string(),
            equipment: self.equipment.to_string(),
            meeting_point: self.meeting_point.to_string(),
            agents_count: self.agents,
            vehicles_count: self.vehicles,
            deployed_team: String::new(),
            photo: None,
            status: self.status,
            responsible: self.responsible.to_string(),
            vehicles,
            created_at: SAMPLE_CREATED_AT,
            updated_at: SAMPLE_CREATED_AT,
        }
    }
}
