//! Text rendering for extracted chart directives

use serde::Deserialize;
use serde_json::Value;
use swipehire_assistant::ChartDirective;

const BAR_WIDTH: usize = 28;

#[derive(Debug, Deserialize)]
struct SkillsGapRow {
    name: String,
    current: f64,
    needed: f64,
}

#[derive(Debug, Deserialize)]
struct PriorityRoleRow {
    name: String,
    priority: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    name: String,
    value: f64,
}

/// Print every renderable chart to stdout, in directive order.
pub fn render_charts(charts: &[ChartDirective]) {
    for chart in charts {
        if let Some(text) = format_chart(chart) {
            println!("\n{}", text);
        }
    }
}

/// Format one chart, or `None` for unrecognized types and malformed rows.
fn format_chart(chart: &ChartDirective) -> Option<String> {
    match chart.kind.as_str() {
        "skills-gap" => Some(format_skills_gap(rows(chart)?)),
        "priority-roles" => Some(format_priority_roles(rows(chart)?)),
        "department-distribution" => Some(format_departments(rows(chart)?)),
        other => {
            tracing::debug!(kind = other, "unrecognized chart type, not rendered");
            None
        }
    }
}

fn rows<T: serde::de::DeserializeOwned>(chart: &ChartDirective) -> Option<Vec<T>> {
    match serde_json::from_value(Value::Array(chart.data.clone())) {
        Ok(rows) => Some(rows),
        Err(e) => {
            tracing::debug!(kind = %chart.kind, error = %e, "chart rows do not match schema");
            None
        }
    }
}

fn format_skills_gap(rows: Vec<SkillsGapRow>) -> String {
    let max = rows
        .iter()
        .map(|r| r.current.max(r.needed))
        .fold(0.0_f64, f64::max);
    let mut out = String::from("Skills Gap Analysis\n");
    for row in &rows {
        out.push_str(&format!(
            "  {:<16} current {:>4}  {}\n",
            row.name,
            row.current,
            bar(row.current, max)
        ));
        out.push_str(&format!(
            "  {:<16} needed  {:>4}  {}\n",
            "",
            row.needed,
            bar(row.needed, max)
        ));
    }
    out.trim_end().to_string()
}

fn format_priority_roles(rows: Vec<PriorityRoleRow>) -> String {
    let max = rows.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let mut out = String::from("Recommended Roles\n");
    for row in &rows {
        out.push_str(&format!(
            "  {:<20} [{:<6}] {:>4}  {}\n",
            row.name,
            row.priority,
            row.value,
            bar(row.value, max)
        ));
    }
    out.trim_end().to_string()
}

fn format_departments(rows: Vec<DepartmentRow>) -> String {
    let total: f64 = rows.iter().map(|r| r.value).sum();
    let mut out = String::from("Department Distribution\n");
    for row in &rows {
        let share = if total > 0.0 { row.value / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "  {:<16} {:>5.1}%  {}\n",
            row.name,
            share,
            bar(row.value, total)
        ));
    }
    out.trim_end().to_string()
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}
