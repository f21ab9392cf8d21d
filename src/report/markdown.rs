//! Markdown summary report

use std::fmt::Write as _;

use super::{best_metric_title, join_values, with_unit, ReportContext, BEST_METRICS};
use crate::aggregate::{group_by, GroupDimension};
use crate::experiment::Metric;
use crate::ranking::best_score;
use crate::Result;

/// Render the markdown summary: best technology per metric, per-technology
/// means and the tested configurations.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDataset`] if the dataset has no records
pub fn markdown_report(ctx: &ReportContext<'_>) -> Result<String> {
    let dataset = ctx.non_empty()?;
    let mut out = String::new();

    let technologies: Vec<&str> = dataset
        .technologies_by_occurrence()
        .into_iter()
        .map(|t| t.label())
        .collect();

    writeln!(out, "# {}\n", ctx.title)?;
    writeln!(out, "## Resumo\n")?;
    writeln!(
        out,
        "**Data da Análise:** {}  ",
        ctx.generated_at.format("%d/%m/%Y %H:%M")
    )?;
    writeln!(out, "**Total de Experimentos:** {}  ", dataset.len())?;
    writeln!(out, "**Entradas Ignoradas:** {}  ", ctx.skipped)?;
    writeln!(out, "**Tecnologias Analisadas:** {}  ", technologies.join(", "))?;
    writeln!(
        out,
        "**Configurações:** {} configurações únicas\n",
        dataset.configuration_count()
    )?;

    writeln!(out, "## Melhores Tecnologias por Métrica\n")?;
    writeln!(out, "| Métrica | Melhor Tecnologia | Valor |")?;
    writeln!(out, "|---------|-------------------|-------|")?;
    for (metric, direction) in BEST_METRICS {
        match best_score(dataset, metric, direction) {
            Some(score) => writeln!(
                out,
                "| **{}** | **{}** | **{}** |",
                best_metric_title(metric),
                score.technology,
                with_unit(metric, score.mean)
            )?,
            None => writeln!(out, "| **{}** | n/a | n/a |", best_metric_title(metric))?,
        }
    }

    writeln!(out, "\n## Análise Detalhada")?;
    let mut groups = group_by(dataset, &[GroupDimension::Technology]);
    groups.sort_by_key(|g| g.key.technology);
    for group in &groups {
        let Some(technology) = group.key.technology else {
            continue;
        };
        writeln!(out, "\n### {technology}\n")?;
        writeln!(out, "- **Execuções:** {}", group.len())?;
        for (metric, title) in [
            (Metric::Pdr, "PDR médio"),
            (Metric::Vazao, "Vazão média"),
            (Metric::Energia, "Consumo energético"),
            (Metric::Atraso, "Atraso médio"),
        ] {
            let value = group
                .summarize(metric)
                .mean
                .map_or_else(|| "n/a".to_string(), |m| with_unit(metric, m));
            writeln!(out, "- **{title}:** {value}")?;
        }
    }

    writeln!(out, "\n## Configurações Testadas\n")?;
    writeln!(out, "- **Distâncias (m):** [{}]", join_values(&dataset.distances()))?;
    writeln!(
        out,
        "- **Dispositivos:** [{}]",
        join_values(&dataset.device_counts())
    )?;

    writeln!(out, "\n---\n")?;
    writeln!(
        out,
        "*Relatório gerado automaticamente em {}*",
        ctx.generated_at.format("%d/%m/%Y às %H:%M")
    )?;

    Ok(out)
}
