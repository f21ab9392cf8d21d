//! HTML report with Chart.js scatter and radar charts

use serde::Serialize;

use super::ReportContext;
use crate::aggregate::radar_scores;
use crate::experiment::{Dataset, Metric, Technology};
use crate::Result;

#[derive(Serialize)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartSeries {
    label: &'static str,
    data: serde_json::Value,
    border_color: &'static str,
    background_color: &'static str,
}

const fn colors(technology: Technology) -> (&'static str, &'static str) {
    match technology {
        Technology::Nbiot => ("#ef4444", "rgba(239, 68, 68, 0.35)"),
        Technology::Lorawan => ("#22d3ee", "rgba(34, 211, 238, 0.35)"),
        Technology::Sigfox => ("#10b981", "rgba(16, 185, 129, 0.35)"),
    }
}

fn scatter_series(dataset: &Dataset, x: Metric, y: Metric) -> Result<String> {
    let series = dataset
        .technologies()
        .into_iter()
        .map(|technology| -> Result<ChartSeries> {
            let points: Vec<Point> = dataset
                .for_technology(technology)
                .iter()
                .map(|r| Point {
                    x: r.value(x),
                    y: r.value(y),
                })
                .collect();
            let (border, background) = colors(technology);
            Ok(ChartSeries {
                label: technology.label(),
                data: serde_json::to_value(points)?,
                border_color: border,
                background_color: background,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string(&series)?)
}

/// Render the chart page: PDR × distance, throughput × distance and
/// energy × devices scatter plots plus a normalized radar over
/// `radar_metrics`.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDataset`] if the dataset has no records
pub fn html_report(ctx: &ReportContext<'_>, radar_metrics: &[Metric]) -> Result<String> {
    let dataset = ctx.non_empty()?;

    let pdr_distance = scatter_series(dataset, Metric::Distancia, Metric::Pdr)?;
    let vazao_distance = scatter_series(dataset, Metric::Distancia, Metric::Vazao)?;
    let energia_devices = scatter_series(dataset, Metric::Dispositivos, Metric::Energia)?;

    let radar = radar_scores(dataset, radar_metrics)?
        .into_iter()
        .map(|series| -> Result<ChartSeries> {
            let values: Vec<f64> = series.scores.iter().map(|(_, v)| *v).collect();
            let (border, background) = colors(series.technology);
            Ok(ChartSeries {
                label: series.technology.label(),
                data: serde_json::to_value(values)?,
                border_color: border,
                background_color: background,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let radar_labels: Vec<&str> = radar_metrics.iter().map(|m| m.label()).collect();

    let radar_json = serde_json::to_string(&radar)?;
    let radar_labels_json = serde_json::to_string(&radar_labels)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0a0a0a;
            color: #ffffff;
            margin: 0;
        }}
        .container {{
            max-width: 1200px;
            margin: 0 auto;
            padding: 2rem;
        }}
        header {{
            text-align: center;
            padding: 2rem 0;
            border-bottom: 1px solid rgba(255, 255, 255, 0.08);
        }}
        header .timestamp {{
            font-size: 0.875rem;
            color: rgba(255, 255, 255, 0.4);
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat(2, 1fr);
            gap: 1.5rem;
            margin-top: 2rem;
        }}
        .card {{
            background: #1c1c1c;
            border-radius: 1rem;
            padding: 1.5rem;
            height: 380px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
            <p>{count} experimentos ({skipped} entradas ignoradas)</p>
            <p class="timestamp">Gerado em {timestamp}</p>
        </header>
        <div class="grid">
            <div class="card"><canvas id="pdrDistance"></canvas></div>
            <div class="card"><canvas id="vazaoDistance"></canvas></div>
            <div class="card"><canvas id="energiaDevices"></canvas></div>
            <div class="card"><canvas id="radar"></canvas></div>
        </div>
    </div>
    <script>
        Chart.defaults.color = '#888888';

        function scatter(id, datasets, xLabel, yLabel) {{
            new Chart(document.getElementById(id), {{
                type: 'scatter',
                data: {{ datasets: datasets }},
                options: {{
                    responsive: true,
                    maintainAspectRatio: false,
                    scales: {{
                        x: {{ title: {{ display: true, text: xLabel }} }},
                        y: {{ title: {{ display: true, text: yLabel }} }}
                    }}
                }}
            }});
        }}

        scatter('pdrDistance', {pdr_distance}, '{distancia}', '{pdr}');
        scatter('vazaoDistance', {vazao_distance}, '{distancia}', '{vazao}');
        scatter('energiaDevices', {energia_devices}, '{dispositivos}', '{energia}');

        new Chart(document.getElementById('radar'), {{
            type: 'radar',
            data: {{
                labels: {radar_labels},
                datasets: {radar}
            }},
            options: {{
                responsive: true,
                maintainAspectRatio: false,
                scales: {{ r: {{ min: 0, max: 1 }} }}
            }}
        }});
    </script>
</body>
</html>
"#,
        title = ctx.title,
        count = dataset.len(),
        skipped = ctx.skipped,
        timestamp = ctx.generated_at.format("%d/%m/%Y %H:%M"),
        distancia = Metric::Distancia.label(),
        dispositivos = Metric::Dispositivos.label(),
        pdr = Metric::Pdr.label(),
        vazao = Metric::Vazao.label(),
        energia = Metric::Energia.label(),
        radar_labels = radar_labels_json,
        radar = radar_json,
    ))
}
