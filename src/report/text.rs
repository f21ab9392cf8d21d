//! Plain-text statistics report

use std::fmt::Write as _;

use super::{join_values, ReportContext, REPORT_METRICS};
use crate::aggregate::{fmt_stat, group_by, summarize, GroupDimension};
use crate::Result;

const RULE_WIDTH: usize = 50;

/// Render the per-technology statistics report.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDataset`] if the dataset has no records
pub fn text_report(ctx: &ReportContext<'_>) -> Result<String> {
    let dataset = ctx.non_empty()?;
    let mut out = String::new();

    writeln!(out, "RELATÓRIO DE EXPERIMENTOS LPWAN")?;
    writeln!(out, "{}", ctx.title)?;
    writeln!(out, "{}\n", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Data de geração: {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        out,
        "Entradas processadas: {} (ignoradas: {})",
        ctx.succeeded, ctx.skipped
    )?;

    for technology in dataset.technologies() {
        let records = dataset.for_technology(technology);
        let mut distances: Vec<f64> = records.iter().map(|r| r.distancia).collect();
        distances.sort_by(f64::total_cmp);
        distances.dedup();
        let mut devices: Vec<u64> = records.iter().map(|r| r.dispositivos).collect();
        devices.sort_unstable();
        devices.dedup();

        writeln!(out, "\n{technology}:")?;
        writeln!(out, "{}", "-".repeat(20))?;
        writeln!(out, "Total de execuções: {}", records.len())?;
        writeln!(out, "Distâncias testadas: [{}]", join_values(&distances))?;
        writeln!(out, "Dispositivos testados: [{}]\n", join_values(&devices))?;

        for metric in REPORT_METRICS {
            let stat = summarize(records.iter().copied(), metric);
            writeln!(out, "{metric}:")?;
            writeln!(out, "  Média: {}", fmt_stat(stat.mean, 2))?;
            writeln!(out, "  Mediana: {}", fmt_stat(stat.median, 2))?;
            writeln!(out, "  Desvio Padrão: {}", fmt_stat(stat.std, 2))?;
            writeln!(out, "  Mínimo: {}", fmt_stat(stat.min, 2))?;
            writeln!(out, "  Máximo: {}\n", fmt_stat(stat.max, 2))?;
        }
    }

    writeln!(out, "\nCOMPARAÇÃO ENTRE TECNOLOGIAS:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    let mut groups = group_by(dataset, &[GroupDimension::Technology]);
    groups.sort_by_key(|g| g.key.technology);
    for metric in REPORT_METRICS {
        writeln!(out, "\n{metric}:")?;
        for group in &groups {
            if let Some(technology) = group.key.technology {
                let mean = group.summarize(metric).mean;
                writeln!(out, "  {technology}: {}", fmt_stat(mean, 2))?;
            }
        }
    }

    Ok(out)
}
