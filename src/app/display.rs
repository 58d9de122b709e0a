use crate::domain::model::{ChartData, EmissionsReport};

pub const APP_TITLE: &str = "🌍 AI Query CO2 Emissions Calculator";

const BAR_WIDTH: usize = 40;

pub fn header() -> String {
    format!(
        "{}\n\nUnderstanding the Environmental Impact of AI Queries\n\
         Estimate the carbon footprint of AI interactions: select an AI model and \
         the number of queries to see the environmental impact.\n",
        APP_TITLE
    )
}

pub fn about() -> String {
    "About This Calculator\n\
     - Emission factors are estimates based on current research\n\
     - Values may vary depending on specific AI model and computational resources\n\
     - Aims to raise awareness about the environmental impact of AI technologies\n\
     ---\n\
     Created for AI Sustainability Awareness\n"
        .to_string()
}

pub fn render_chart(chart: &ChartData) -> String {
    let label_width = chart
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", chart.title);
    for (slice, share) in chart.slices.iter().zip(chart.shares()) {
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        out.push_str(&format!(
            "  {:<width$}  {}{}  {:>6.2}%  ({:.4})\n",
            slice.label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            share * 100.0,
            slice.value,
            width = label_width
        ));
    }
    out
}

/// The results section: metric, comparative context, breakdown chart.
pub fn render_report(report: &EmissionsReport) -> String {
    let mut out = String::from("Results\n\n");

    out.push_str(&format!("{}\n  {}\n\n", report.metric_label, report.metric_value));

    out.push_str("Comparative Context\n");
    for line in &report.context {
        out.push_str(&format!("  • {}\n", line));
    }

    out.push_str("\nEmissions Breakdown\n");
    out.push_str(&render_chart(&report.chart));
    out
}
