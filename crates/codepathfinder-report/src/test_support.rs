//! Shared `EnrichedDetection` builders for this crate's unit tests.

use codepathfinder_common::{
    DetectionType, EnrichedDetection, ResolvedLocation, RuleMetadata, Severity, Snippet, SnippetLine,
};

pub fn detection(severity: Severity, detection_type: DetectionType) -> EnrichedDetection {
    detection_full(severity, detection_type, Some("app/views.py"), 10)
}

pub fn detection_with_path(rel_path: Option<&str>) -> EnrichedDetection {
    detection_full(Severity::Medium, DetectionType::Pattern, rel_path, 10)
}

pub fn detection_full(
    severity: Severity,
    detection_type: DetectionType,
    rel_path: Option<&str>,
    sink_line: usize,
) -> EnrichedDetection {
    EnrichedDetection {
        function_fqn: "app.views.handle".to_string(),
        source_line: 3,
        sink_line,
        tainted_variable: String::new(),
        sink_call: "execute".to_string(),
        confidence: 0.8,
        sanitized: false,
        location: ResolvedLocation {
            abs_path: "/repo/app/views.py".to_string(),
            rel_path: rel_path.map(str::to_string),
            line: sink_line,
            column: 1,
            function: "handle".to_string(),
            class_name: String::new(),
        },
        snippet: Snippet {
            lines: vec![SnippetLine {
                number: sink_line,
                text: "execute(query)".to_string(),
                highlighted: true,
            }],
        },
        rule: RuleMetadata {
            id: "PY-SQLI-001".to_string(),
            name: "SQL injection".to_string(),
            severity,
            description: "tainted SQL query".to_string(),
            cwe: vec!["CWE-89".to_string()],
            owasp: vec!["A03:2021".to_string()],
            references: Vec::new(),
        },
        taint_path: Vec::new(),
        detection_type,
    }
}
