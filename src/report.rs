//! Rendering of lint results for the terminal and for machines.

use crate::error::Error;
use crate::findings::{Finding, Severity};
use crate::linter::FileReport;
use std::fmt::Write as _;

const CATEGORIES: [(Severity, &str); 4] = [
    (Severity::Error, "errors"),
    (Severity::Warning, "warnings"),
    (Severity::Info, "infos"),
    (Severity::Hint, "hints"),
];

/// Human-readable report: findings grouped per file, then per severity.
/// Files without findings are left out.
#[must_use]
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        if report.findings.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", report.file);
        for (severity, heading) in CATEGORIES {
            let findings: Vec<&Finding> = report
                .findings
                .iter()
                .filter(|finding| finding.severity == severity)
                .collect();
            if findings.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {heading}");
            let width = findings
                .iter()
                .map(|finding| line_label(finding).len())
                .max()
                .unwrap_or(1);
            for finding in findings {
                let _ = writeln!(
                    out,
                    "    {:>width$} | {} | {} | {}",
                    line_label(finding),
                    finding.rule,
                    finding.path,
                    finding.message
                );
                if let Some(component) = &finding.component_path {
                    let _ = writeln!(out, "    {:>width$}   component: {component}", "");
                }
            }
        }
        out.push('\n');
    }
    out
}

fn line_label(finding: &Finding) -> String {
    finding
        .line
        .map_or_else(|| "-".to_string(), |line| line.to_string())
}

/// One-line tally across all reports.
#[must_use]
pub fn summary(reports: &[FileReport]) -> String {
    let count = |severity| reports.iter().map(|r| r.count(severity)).sum::<usize>();
    let errors = count(Severity::Error);
    let warnings = count(Severity::Warning);
    format!(
        "{errors} {}, {warnings} {} in {} {}",
        plural(errors, "error"),
        plural(warnings, "warning"),
        reports.len(),
        plural(reports.len(), "file")
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Machine-readable report: the serialised list of [`FileReport`]s.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn render_json(reports: &[FileReport]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::FindingsByValidator;
    use crate::path::LogicalPath;

    fn report() -> FileReport {
        let mut findings = FindingsByValidator::new();
        let mut cycle = Finding::new(
            LogicalPath::from(["definitions", "Pet", "properties", "parent"]),
            "API definition should not contain circular references.",
            "no-circular-refs",
            Severity::Warning,
        );
        cycle.line = Some(18);
        findings.add("circular-refs", cycle);

        let mut duplicate = Finding::new(
            LogicalPath::from(["paths", "/pets", "post", "operationId"]),
            "operationIds must be unique.",
            "operation-ids",
            Severity::Error,
        );
        duplicate.line = Some(9);
        duplicate.component_path = Some(LogicalPath::from(["components", "pathItems", "Pets"]));
        findings.add("operations", duplicate);

        FileReport {
            file: "api.yaml".to_string(),
            findings,
        }
    }

    #[test]
    fn test_render_text_groups_by_severity() {
        let text = render_text(&[report()]);
        let errors_at = text.find("  errors").unwrap();
        let warnings_at = text.find("  warnings").unwrap();
        assert!(text.starts_with("api.yaml\n"));
        assert!(errors_at < warnings_at);
        assert!(text.contains("9 | operation-ids | paths./pets.post.operationId | operationIds must be unique."));
        assert!(text.contains("component: components.pathItems.Pets"));
        assert!(text.contains("18 | no-circular-refs | definitions.Pet.properties.parent"));
    }

    #[test]
    fn test_clean_files_are_omitted() {
        let clean = FileReport {
            file: "clean.yaml".to_string(),
            findings: FindingsByValidator::new(),
        };
        assert!(render_text(&[clean]).is_empty());
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&[report()]), "1 error, 1 warning in 1 file");
        assert_eq!(summary(&[]), "0 errors, 0 warnings in 0 files");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["file"], "api.yaml");
        let warning = &value[0]["findings"]["circular-refs"]["warnings"][0];
        assert_eq!(warning["line"], 18);
        assert_eq!(warning["path"][3], "parent");
        assert_eq!(
            value[0]["findings"]["operations"]["errors"][0]["componentPath"][1],
            "pathItems"
        );
    }
}
