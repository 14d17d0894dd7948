//! SARIF 2.1.0 formatter (§4.10, §6): one run, rules deduplicated by id,
//! `codeFlows`/`relatedLocations` for taint detections only.

use serde::Serialize;

use codepathfinder_common::{DetectionType, EnrichedDetection, Result};

const SCHEMA_URI: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_DRIVER_NAME: &str = "Code Pathfinder";

#[derive(Debug, Serialize)]
struct Sarif {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct Tool {
    driver: Driver,
}

#[derive(Debug, Serialize)]
struct Driver {
    name: String,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Debug, Serialize)]
struct ReportingDescriptor {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: MultiformatMessage,
    properties: RuleProperties,
}

#[derive(Debug, Serialize)]
struct RuleProperties {
    #[serde(rename = "security-severity")]
    security_severity: String,
}

#[derive(Debug, Serialize)]
struct MultiformatMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: MultiformatMessage,
    locations: Vec<Location>,
    #[serde(rename = "codeFlows", skip_serializing_if = "Vec::is_empty")]
    code_flows: Vec<CodeFlow>,
    #[serde(rename = "relatedLocations", skip_serializing_if = "Vec::is_empty")]
    related_locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
struct CodeFlow {
    #[serde(rename = "threadFlows")]
    thread_flows: Vec<ThreadFlow>,
}

#[derive(Debug, Serialize)]
struct ThreadFlow {
    locations: Vec<ThreadFlowLocation>,
}

#[derive(Debug, Serialize)]
struct ThreadFlowLocation {
    location: Location,
}

#[derive(Debug, Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Debug, Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Debug, Serialize)]
struct ArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct Region {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

fn artifact_uri(d: &EnrichedDetection) -> String {
    d.location
        .rel_path
        .clone()
        .unwrap_or_else(|| d.location.abs_path.clone())
}

fn physical_location(uri: String, line: usize, column: usize) -> Location {
    Location {
        physical_location: PhysicalLocation {
            artifact_location: ArtifactLocation { uri },
            region: Region {
                start_line: line,
                start_column: column,
            },
        },
    }
}

fn code_flow(d: &EnrichedDetection) -> Option<CodeFlow> {
    if d.taint_path.is_empty() {
        return None;
    }
    let uri = artifact_uri(d);
    let locations = d
        .taint_path
        .iter()
        .map(|n| ThreadFlowLocation {
            location: physical_location(uri.clone(), n.line, 1),
        })
        .collect();
    Some(CodeFlow {
        thread_flows: vec![ThreadFlow { locations }],
    })
}

fn related_locations(d: &EnrichedDetection) -> Vec<Location> {
    let uri = artifact_uri(d);
    d.taint_path
        .iter()
        .map(|n| physical_location(uri.clone(), n.line, 1))
        .collect()
}

fn result_for(d: &EnrichedDetection) -> SarifResult {
    let uri = artifact_uri(d);
    let code_flows = match d.detection_type {
        DetectionType::Pattern => Vec::new(),
        DetectionType::TaintLocal | DetectionType::TaintGlobal => code_flow(d).into_iter().collect(),
    };
    let related_locations = match d.detection_type {
        DetectionType::Pattern => Vec::new(),
        _ => related_locations(d),
    };
    SarifResult {
        rule_id: d.rule.id.clone(),
        level: d.rule.severity.sarif_level().to_string(),
        message: MultiformatMessage {
            text: d.rule.description.clone(),
        },
        locations: vec![physical_location(uri, d.location.line, d.location.column)],
        code_flows,
        related_locations,
    }
}

fn rules_for(detections: &[EnrichedDetection]) -> Vec<ReportingDescriptor> {
    let mut seen = std::collections::HashSet::new();
    let mut rules = Vec::new();
    for d in detections {
        if seen.insert(d.rule.id.clone()) {
            rules.push(ReportingDescriptor {
                id: d.rule.id.clone(),
                name: d.rule.name.clone(),
                short_description: MultiformatMessage {
                    text: d.rule.description.clone(),
                },
                properties: RuleProperties {
                    security_severity: format!("{:.1}", d.rule.severity.sarif_security_severity()),
                },
            });
        }
    }
    rules
}

pub fn format(detections: &[EnrichedDetection]) -> Result<String> {
    let sarif = Sarif {
        schema: SCHEMA_URI.to_string(),
        version: "2.1.0".to_string(),
        runs: vec![Run {
            tool: Tool {
                driver: Driver {
                    name: TOOL_DRIVER_NAME.to_string(),
                    rules: rules_for(detections),
                },
            },
            results: detections.iter().map(result_for).collect(),
        }],
    };
    serde_json::to_string_pretty(&sarif).map_err(Into::into)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_support::{detection, detection_full};
    use codepathfinder_common::Severity;

    #[test]
    fn dedups_rules_by_id() {
        let detections = vec![
            detection(Severity::High, DetectionType::Pattern),
            detection(Severity::High, DetectionType::Pattern),
        ];
        let json = format(&detections).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn pattern_detections_omit_code_flows() {
        let detections = vec![detection(Severity::High, DetectionType::Pattern)];
        let json = format(&detections).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["runs"][0]["results"][0].get("codeFlows").is_none());
    }

    #[test]
    fn taint_detection_gets_two_step_code_flow() {
        let mut d = detection_full(Severity::Critical, DetectionType::TaintGlobal, Some("a.py"), 10);
        d.taint_path = vec![
            codepathfinder_common::TaintNode {
                label: "source".to_string(),
                function_fqn: "f".to_string(),
                line: 3,
            },
            codepathfinder_common::TaintNode {
                label: "sink".to_string(),
                function_fqn: "f".to_string(),
                line: 10,
            },
        ];
        let json = format(&[d]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let flow_locs = &value["runs"][0]["results"][0]["codeFlows"][0]["threadFlows"][0]["locations"];
        assert_eq!(flow_locs.as_array().unwrap().len(), 2);
        assert_eq!(value["runs"][0]["results"][0]["level"], "error");
    }
}
