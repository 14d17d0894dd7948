//! FQN→file resolution and relative-path computation (§4.9).

use std::path::Path;

use codepathfinder_common::{CallGraph, ResolvedLocation};

/// Resolve a raw detection's location from the call graph. `project_root`,
/// when set, is used to compute a relative path; absent or non-prefixing
/// roots leave `rel_path` unset.
pub fn resolve(
    graph: &CallGraph,
    function_fqn: &str,
    line: usize,
    project_root: Option<&Path>,
) -> ResolvedLocation {
    let func = graph.function(function_fqn);
    let abs_path = func.map_or_else(String::new, |f| f.file.clone());
    let rel_path = project_root.and_then(|root| {
        Path::new(&abs_path)
            .strip_prefix(root)
            .ok()
            .map(|p| p.to_string_lossy().into_owned())
    });
    // `0` means unknown, per `Location::has_known_column`'s convention: no
    // call site at this line means we have no real column to report.
    let column = graph
        .call_sites(function_fqn)
        .iter()
        .find(|site| site.location.line == line)
        .map_or(0, |site| site.location.column);

    ResolvedLocation {
        abs_path,
        rel_path,
        line,
        column,
        function: func.map_or_else(String::new, |f| f.short_name.clone()),
        class_name: func.map_or_else(String::new, |f| f.class_name.clone()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use codepathfinder_common::{CallSite, FunctionNode, Location, ResolutionStatus};

    fn graph() -> CallGraph {
        CallGraph::builder()
            .add_function(FunctionNode {
                fqn: "app.views.handle".to_string(),
                short_name: "handle".to_string(),
                file: "/repo/app/views.py".to_string(),
                start_line: 1,
                end_line: 20,
                class_name: String::new(),
            })
            .build()
    }

    #[test]
    fn resolves_absolute_path_and_function() {
        let g = graph();
        let loc = resolve(&g, "app.views.handle", 10, None);
        assert_eq!(loc.abs_path, "/repo/app/views.py");
        assert_eq!(loc.function, "handle");
        assert!(loc.rel_path.is_none());
    }

    #[test]
    fn computes_relative_path_under_project_root() {
        let g = graph();
        let loc = resolve(&g, "app.views.handle", 10, Some(Path::new("/repo")));
        assert_eq!(loc.rel_path.as_deref(), Some("app/views.py"));
    }

    #[test]
    fn unknown_function_yields_empty_location_fields() {
        let g = graph();
        let loc = resolve(&g, "missing.fn", 5, None);
        assert_eq!(loc.abs_path, "");
        assert_eq!(loc.function, "");
    }

    #[test]
    fn column_is_looked_up_from_the_matching_call_site() {
        let mut site_location = Location::new("/repo/app/views.py", 10);
        site_location.column = 5;
        let g = CallGraph::builder()
            .add_function(FunctionNode {
                fqn: "app.views.handle".to_string(),
                short_name: "handle".to_string(),
                file: "/repo/app/views.py".to_string(),
                start_line: 1,
                end_line: 20,
                class_name: String::new(),
            })
            .add_call_site(
                "app.views.handle",
                CallSite {
                    target: "eval".to_string(),
                    resolved_target: String::new(),
                    arguments: Vec::new(),
                    location: site_location,
                    resolution: ResolutionStatus::Unresolved {
                        reason: "external".to_string(),
                    },
                    type_hint: None,
                },
            )
            .build();

        let loc = resolve(&g, "app.views.handle", 10, None);
        assert_eq!(loc.column, 5);
    }

    #[test]
    fn column_falls_back_to_zero_when_no_call_site_matches_the_line() {
        let g = graph();
        let loc = resolve(&g, "app.views.handle", 10, None);
        assert_eq!(loc.column, 0);
    }
}
