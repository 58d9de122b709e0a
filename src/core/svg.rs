// SVG pie chart for an emissions report

use std::f64::consts::PI;

use crate::domain::model::ChartData;

const WIDTH: u32 = 420;
const HEIGHT: u32 = 360;
const RADIUS: f64 = 120.0;
const CENTER_X: f64 = 150.0;
const CENTER_Y: f64 = 190.0;

/// Shares this close to 1 are drawn as a full circle.
const FULL_SHARE: f64 = 1.0 - 1e-9;

fn point_at(angle: f64) -> (f64, f64) {
    (CENTER_X + RADIUS * angle.cos(), CENTER_Y + RADIUS * angle.sin())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_pie_svg(chart: &ChartData) -> String {
    let shares = chart.shares();

    // Wedges start at 12 o'clock and run clockwise
    let mut wedges = String::new();
    let mut angle = -PI / 2.0;

    for (slice, share) in chart.slices.iter().zip(shares) {
        if share <= 0.0 {
            continue;
        }

        if share >= FULL_SHARE {
            wedges.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="#fff" stroke-width="1"/>"##,
                CENTER_X, CENTER_Y, RADIUS, slice.color
            ));
            continue;
        }

        let sweep = share * 2.0 * PI;
        let (x1, y1) = point_at(angle);
        let (x2, y2) = point_at(angle + sweep);
        let large_arc = if sweep > PI { 1 } else { 0 };

        wedges.push_str(&format!(
            r##"<path d="M{:.2},{:.2} L{:.2},{:.2} A{:.2},{:.2} 0 {},1 {:.2},{:.2} Z" fill="{}" stroke="#fff" stroke-width="1"/>"##,
            CENTER_X, CENTER_Y, x1, y1, RADIUS, RADIUS, large_arc, x2, y2, slice.color
        ));
        angle += sweep;
    }

    let mut legend = String::new();
    for (i, (slice, share)) in chart.slices.iter().zip(shares).enumerate() {
        let y = 80 + i as u32 * 24;
        legend.push_str(&format!(
            r##"<rect x="290" y="{}" width="12" height="12" fill="{}"/>
  <text x="308" y="{}" font-size="11" fill="#374151">{} ({:.1}%)</text>
  "##,
            y,
            slice.color,
            y + 10,
            escape(&slice.label),
            share * 100.0
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" style="background:white">
  <text x="{}" y="30" text-anchor="middle" font-size="16" font-weight="600" fill="#374151">{}</text>
  {}
  {}
</svg>
"##,
        WIDTH,
        HEIGHT,
        WIDTH / 2,
        escape(&chart.title),
        wedges,
        legend.trim_end()
    )
}
