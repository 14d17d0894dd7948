//! Text formatter (§4.10): severity-grouped, detailed for critical/high,
//! one-line for the rest.

use std::fmt::Write as _;

use codepathfinder_common::{EnrichedDetection, Severity};

fn right_align_width(snippet: &codepathfinder_common::Snippet) -> usize {
    snippet
        .lines
        .iter()
        .map(|l| l.number.to_string().len())
        .max()
        .unwrap_or(1)
}

fn render_detailed(out: &mut String, d: &EnrichedDetection) {
    let _ = writeln!(out, "[{}] {} ({})", d.rule.severity, d.rule.name, d.rule.id);
    let _ = writeln!(out, "  {}", d.rule.description);
    let location = d
        .location
        .rel_path
        .as_deref()
        .unwrap_or(d.location.abs_path.as_str());
    let _ = writeln!(out, "  at {location}:{} in {}", d.location.line, d.location.function);
    let width = right_align_width(&d.snippet);
    for line in &d.snippet.lines {
        let marker = if line.highlighted { ">" } else { " " };
        let _ = writeln!(out, "  {marker} {:>width$} | {}", line.number, line.text, width = width);
    }
    if !d.taint_path.is_empty() {
        let labels: Vec<String> = d
            .taint_path
            .iter()
            .map(|n| format!("{}@{}:{}", n.label, n.function_fqn, n.line))
            .collect();
        let _ = writeln!(out, "  taint flow: {}", labels.join(" -> "));
    }
    let _ = writeln!(out, "  confidence: {:.2}, method: {:?}", d.confidence, d.detection_type);
    out.push('\n');
}

fn render_brief(out: &mut String, d: &EnrichedDetection) {
    let location = d
        .location
        .rel_path
        .as_deref()
        .unwrap_or(d.location.abs_path.as_str());
    let _ = writeln!(
        out,
        "[{}] {} ({}) at {location}:{}",
        d.rule.severity, d.rule.name, d.rule.id, d.location.line
    );
}

pub fn format(detections: &[EnrichedDetection]) -> String {
    if detections.is_empty() {
        return "No security issues found.".to_string();
    }

    let mut out = String::new();
    for severity in Severity::ORDER {
        let group: Vec<&EnrichedDetection> = detections
            .iter()
            .filter(|d| d.rule.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        for d in group {
            match severity {
                Severity::Critical | Severity::High => render_detailed(&mut out, d),
                Severity::Medium | Severity::Low | Severity::Info => render_brief(&mut out, d),
            }
        }
    }
    out.trim_end().to_string()
}
