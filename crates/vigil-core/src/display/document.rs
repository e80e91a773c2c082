//! Official operation plan document.

use std::fmt;

use jiff::Timestamp;

use super::datetime::PrintedDateTime;
use crate::models::OperationPlan;

const DEFAULT_OBJECTIVE: &str = "Assegurar a incolumidade das pessoas e do patrimônio público \
durante a realização do evento supracitado, garantindo o livre exercício das liberdades \
individuais através do policiamento preventivo e comunitário.";
const NO_TEAM_LISTING: &str = "Não há listagem nominal cadastrada para este empenho.";
const DEFAULT_COMMANDER: &str = "Comandante da Operação";

/// Printable "Plano de Emprego Operacional" for a single plan.
pub struct OfficialDocument<'a> {
    pub plan: &'a OperationPlan,
    pub generated_at: Timestamp,
}

impl<'a> OfficialDocument<'a> {
    pub fn new(plan: &'a OperationPlan) -> Self {
        Self {
            plan,
            generated_at: Timestamp::now(),
        }
    }

    /// Document number: the date's leading segment and the ID's last two
    /// characters, e.g. `2024/42`.
    pub fn number(&self) -> String {
        let year = self.plan.date.split('-').next().unwrap_or_default();
        let id: Vec<char> = self.plan.id.chars().collect();
        let suffix: String = id[id.len().saturating_sub(2)..].iter().collect();
        format!("{year}/{suffix}")
    }
}

fn or_default<'v>(value: &'v str, fallback: &'v str) -> &'v str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl fmt::Display for OfficialDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;

        writeln!(f, "# Prefeitura Municipal de Belo Horizonte")?;
        writeln!(f)?;
        writeln!(f, "**Secretaria Municipal de Segurança e Prevenção**")?;
        writeln!(f)?;
        writeln!(f, "**Guarda Civil Municipal de Belo Horizonte**")?;
        writeln!(f)?;
        writeln!(f, "PLANO DE EMPREGO OPERACIONAL Nº {}", self.number())?;

        writeln!(f, "\n## I - IDENTIFICAÇÃO DA OPERAÇÃO")?;
        writeln!(f)?;
        writeln!(f, "- **Evento/Operação**: {}", plan.name)?;
        writeln!(f, "- **Macro Região**: {}", plan.macro_region)?;
        writeln!(f, "- **Local**: {}", plan.location)?;
        writeln!(f, "- **Data**: {}", plan.date)?;
        writeln!(f, "- **Hora de Início**: {}h", plan.start_time)?;
        writeln!(f, "- **Inspetoria Responsável**: {}", plan.inspectorate)?;

        writeln!(f, "\n## II - MISSÃO E OBJETIVO")?;
        writeln!(f)?;
        writeln!(f, "{}", or_default(&plan.objective, DEFAULT_OBJECTIVE))?;

        writeln!(f, "\n## III - RECURSOS EMPREGADOS")?;
        writeln!(f)?;
        writeln!(f, "- **Efetivo Total**: {} Agentes", plan.agents_count)?;
        writeln!(f, "- **Viaturas**: {} Unidades", plan.vehicles_count)?;
        writeln!(f, "- **Uniforme**: {}", plan.uniform)?;
        writeln!(
            f,
            "- **Ponto de Reunião**: {}",
            or_default(&plan.meeting_point, &plan.location)
        )?;

        writeln!(f, "\n## IV - LOGÍSTICA E COMUNICAÇÕES")?;
        writeln!(f)?;
        writeln!(f, "- **Canal Rádio**: {}", plan.radio)?;
        writeln!(f, "- **Equipamentos**: {}", plan.equipment)?;

        writeln!(f, "\n## V - EQUIPE EMPENHADA (EFETIVO NOMINAL)")?;
        writeln!(f)?;
        writeln!(f, "{}", or_default(&plan.deployed_team, NO_TEAM_LISTING))?;

        writeln!(f, "\n---")?;
        writeln!(f)?;
        writeln!(f, "**{}**", or_default(&plan.responsible, DEFAULT_COMMANDER))?;
        writeln!(f)?;
        writeln!(f, "Responsável pela Ordem")?;
        writeln!(f)?;
        writeln!(
            f,
            "Gerado eletronicamente em {}. Este documento é de uso interno da GCMBH. \
             As informações contidas podem ser sigilosas.",
            PrintedDateTime(&self.generated_at)
        )?;
        writeln!(f)?;
        writeln!(f, "Página 1 de 1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_operations;

    #[test]
    fn test_document_number() {
        let mut plan = sample_operations().remove(0);
        assert_eq!(OfficialDocument::new(&plan).number(), "2024/1");

        plan.id = "1722110400123".to_string();
        assert_eq!(OfficialDocument::new(&plan).number(), "2024/23");
    }

    #[test]
    fn test_document_falls_back_on_blank_fields() {
        let mut plan = sample_operations().remove(0);
        plan.objective.clear();
        plan.meeting_point.clear();
        plan.responsible.clear();

        let output = OfficialDocument::new(&plan).to_string();
        assert!(output.contains("Assegurar a incolumidade das pessoas"));
        assert!(output.contains("- **Ponto de Reunião**: Estádio Mineirão, Belo Horizonte"));
        assert!(output.contains("**Comandante da Operação**"));
        assert!(output.contains(NO_TEAM_LISTING));
    }

    #[test]
    fn test_document_sections_in_order() {
        let plan = sample_operations().remove(1);
        let output = OfficialDocument::new(&plan).to_string();

        let positions: Vec<usize> = ["## I -", "## II -", "## III -", "## IV -", "## V -"]
            .iter()
            .map(|heading| output.find(heading).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(output.contains("- **Hora de Início**: 20:00h"));
    }
}
