//! Printable summary report over every registered operation.

use std::fmt;

use jiff::Timestamp;

use super::{datetime::PrintedDateTime, models::or_not_set};
use crate::models::{OperationPlan, OperationSummary};

/// Activity report with aggregate counts and one table row per operation.
pub struct SummaryReport<'a> {
    pub plans: &'a [OperationPlan],
    pub generated_at: Timestamp,
}

impl<'a> SummaryReport<'a> {
    pub fn new(plans: &'a [OperationPlan]) -> Self {
        Self {
            plans,
            generated_at: Timestamp::now(),
        }
    }

    pub fn summary(&self) -> OperationSummary {
        OperationSummary::from(self.plans)
    }
}

/// Escapes characters that would break a markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary();

        writeln!(f, "# Relatório de Atividades Operacionais")?;
        writeln!(f)?;
        writeln!(f, "**Guarda Civil Municipal de Belo Horizonte**")?;
        writeln!(f)?;
        writeln!(f, "Gerado em: {}", PrintedDateTime(&self.generated_at))?;

        writeln!(f, "\n## Resumo Estatístico")?;
        writeln!(f)?;
        writeln!(f, "| Total de Eventos | Em Andamento | Planejados | Concluídos |")?;
        writeln!(f, "|---|---|---|---|")?;
        writeln!(
            f,
            "| {} | {} | {} | {} |",
            summary.total, summary.in_progress, summary.planned, summary.completed
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Recursos Humanos (Total)**: {} Agentes",
            summary.total_agents
        )?;
        writeln!(
            f,
            "- **Mobilidade (Total)**: {} Viaturas ({} presentes)",
            summary.total_vehicles, summary.vehicles_arrived
        )?;

        writeln!(f, "\n## Listagem de Empenhos")?;
        writeln!(f)?;
        if self.plans.is_empty() {
            writeln!(f, "Nenhum evento registrado.")?;
        } else {
            writeln!(f, "| Evento / Equipe | Local | Data/Hora | Status | Recursos |")?;
            writeln!(f, "|---|---|---|---|---|")?;
            for plan in self.plans {
                writeln!(
                    f,
                    "| {} (Equipe: {}) | {} | {} {} | {} | {}A / {}V |",
                    cell(&plan.name),
                    cell(or_not_set(&plan.deployed_team)),
                    cell(&plan.location),
                    cell(&plan.date),
                    cell(&plan.start_time),
                    plan.status,
                    plan.agents_count,
                    plan.vehicles_count
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "Controle Interno GCMBH - Belo Horizonte, MG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_operations;

    #[test]
    fn test_report_totals_and_rows() {
        let plans = sample_operations();
        let output = SummaryReport::new(&plans).to_string();

        assert!(output.contains("| 3 | 1 | 2 | 0 |"));
        assert!(output.contains("350 Agentes"));
        assert!(output.contains("33 Viaturas (3 presentes)"));
        assert!(output.contains("| Final do Campeonato Mineiro (Equipe: N/A) |"));
        assert!(output.contains("| Todo Domingo 08:00 | Em Andamento | 80A / 8V |"));
    }

    #[test]
    fn test_empty_report() {
        let output = SummaryReport::new(&[]).to_string();
        assert!(output.contains("| 0 | 0 | 0 | 0 |"));
        assert!(output.contains("Nenhum evento registrado."));
    }

    #[test]
    fn test_cells_escape_pipes() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }
}
