//! CSV formatter (§4.10): 17 fixed columns, zero-numeric-as-empty-string,
//! first CWE/OWASP only.

use codepathfinder_common::EnrichedDetection;

const HEADER: &str = "severity,confidence,rule_id,rule_name,cwe,owasp,file,line,column,function,message,detection_type,detection_scope,source_line,sink_line,tainted_var,sink_call";

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn numeric_or_empty(n: usize) -> String {
    if n == 0 {
        String::new()
    } else {
        n.to_string()
    }
}

fn detection_type_str(t: codepathfinder_common::DetectionType) -> &'static str {
    match t {
        codepathfinder_common::DetectionType::Pattern => "pattern",
        codepathfinder_common::DetectionType::TaintLocal => "taint-local",
        codepathfinder_common::DetectionType::TaintGlobal => "taint-global",
    }
}

fn detection_scope_str(d: &EnrichedDetection) -> &'static str {
    match d.detection_type {
        codepathfinder_common::DetectionType::Pattern => "",
        codepathfinder_common::DetectionType::TaintLocal => "local",
        codepathfinder_common::DetectionType::TaintGlobal => "global",
    }
}

fn row(d: &EnrichedDetection) -> String {
    let file = d
        .location
        .rel_path
        .as_deref()
        .unwrap_or(d.location.abs_path.as_str());
    let fields = [
        d.rule.severity.as_str().to_string(),
        format!("{:.2}", d.confidence),
        d.rule.id.clone(),
        d.rule.name.clone(),
        d.rule.cwe.first().cloned().unwrap_or_default(),
        d.rule.owasp.first().cloned().unwrap_or_default(),
        file.to_string(),
        numeric_or_empty(d.location.line),
        numeric_or_empty(d.location.column),
        d.location.function.clone(),
        d.rule.description.clone(),
        detection_type_str(d.detection_type).to_string(),
        detection_scope_str(d).to_string(),
        numeric_or_empty(d.source_line),
        numeric_or_empty(d.sink_line),
        d.tainted_variable.clone(),
        d.sink_call.clone(),
    ];
    fields.iter().map(|f| escape(f)).collect::<Vec<_>>().join(",")
}

pub fn format(detections: &[EnrichedDetection]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for d in detections {
        out.push_str(&row(d));
        out.push('\n');
    }
    out.trim_end().to_string()
}
