//! Rendering of findings for the console, CI annotations and markdown summaries

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::core::types::BrokenLinkRecord;
use crate::reporting::logging::log_warning;

/// Counts shown next to the findings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub documents: usize,
    pub occurrences: usize,
    pub broken: usize,
    /// Wall time of the external link checks
    pub elapsed_ms: u64,
}

impl RunSummary {
    fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}

/// `0` when nothing is broken, `1` otherwise.
pub fn exit_code(records: &[BrokenLinkRecord]) -> i32 {
    if records.is_empty() { 0 } else { 1 }
}

pub fn render_console(records: &[BrokenLinkRecord], summary: &RunSummary) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }

    if records.is_empty() {
        out.push_str(&format!(
            "No issues! Checked {} link(s) in {} document(s)\n",
            summary.occurrences, summary.documents
        ));
    } else {
        out.push_str(&format!(
            "Found {} broken link(s) ({} link(s) checked in {} document(s))\n",
            records.len(),
            summary.occurrences,
            summary.documents
        ));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'a str,
    summary: &'a RunSummary,
    issues: &'a [BrokenLinkRecord],
}

pub fn render_json(records: &[BrokenLinkRecord], summary: &RunSummary) -> String {
    let report = JsonReport {
        status: if records.is_empty() { "success" } else { "failure" },
        summary,
        issues: records,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// One GitHub Actions `::error` workflow command per finding, or a single
/// `::notice` when nothing is broken.
pub fn render_github_annotations(records: &[BrokenLinkRecord], summary: &RunSummary) -> String {
    if records.is_empty() {
        return format!(
            "::notice title=Link check::{}\n",
            escape_data(&format!(
                "No broken links in {} link(s) across {} document(s). Checked external links in {:.1}s",
                summary.occurrences,
                summary.documents,
                summary.elapsed_seconds()
            ))
        );
    }

    records
        .iter()
        .map(|record| {
            format!(
                "::error file={},line={},title={}::{}\n",
                escape_property(&record.document.display().to_string()),
                record.line,
                escape_property(&format!("Broken {} link", record.kind)),
                escape_data(&format!("{} - {}", record.reference, record.reason))
            )
        })
        .collect()
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

pub fn render_markdown_summary(records: &[BrokenLinkRecord], summary: &RunSummary) -> String {
    let mut out = String::from("## Link check results\n\n");
    out.push_str(&format!(
        "Checked external links in {:.1}s.\n\n",
        summary.elapsed_seconds()
    ));

    if records.is_empty() {
        out.push_str(&format!(
            "✅ All {} link(s) in {} document(s) are valid.\n",
            summary.occurrences, summary.documents
        ));
        return out;
    }

    out.push_str(&format!(
        "❌ Found {} broken link(s) across {} checked link(s) in {} document(s).\n\n",
        records.len(),
        summary.occurrences,
        summary.documents
    ));
    out.push_str("| File | Line | Kind | Link | Reason |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for record in records {
        out.push_str(&format!(
            "| `{}` | {} | {} | `{}` | {} |\n",
            escape_cell(&record.document.display().to_string()),
            record.line,
            record.kind,
            escape_cell(&record.reference),
            escape_cell(&record.reason)
        ));
    }
    out
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Append the markdown summary to `path`.
///
/// A write failure is logged and otherwise ignored; it never affects the
/// exit status. Returns whether the summary was written.
pub fn write_markdown_summary(
    path: &Path,
    records: &[BrokenLinkRecord],
    summary: &RunSummary,
) -> bool {
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(render_markdown_summary(records, summary).as_bytes()));

    match written {
        Ok(()) => true,
        Err(err) => {
            log_warning(&format!(
                "Could not write summary to {}: {err}",
                path.display()
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::{LinkKind, LinkOccurrence};

    fn records() -> Vec<BrokenLinkRecord> {
        let internal = LinkOccurrence::new(Path::new("docs/a.mdx"), "/missing", 4);
        let external = LinkOccurrence::new(Path::new("docs/b.mdx"), "https://x.test/a|b", 9);
        vec![
            BrokenLinkRecord::from_occurrence(&internal, LinkKind::Internal, "File not found"),
            BrokenLinkRecord::from_occurrence(&external, LinkKind::External, "HTTP 404"),
        ]
    }

    fn summary(broken: usize) -> RunSummary {
        RunSummary {
            documents: 2,
            occurrences: 5,
            broken,
            elapsed_ms: 1_240,
        }
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&[]), 0);
        assert_eq!(exit_code(&records()), 1);
    }

    #[test]
    fn test_render_console__with_issues() {
        let out = render_console(&records(), &summary(2));

        assert!(out.starts_with("docs/a.mdx:4: [internal] /missing - File not found\n"));
        assert!(out.contains("docs/b.mdx:9: [external] https://x.test/a|b - HTTP 404\n"));
        assert!(out.ends_with("Found 2 broken link(s) (5 link(s) checked in 2 document(s))\n"));
    }

    #[test]
    fn test_render_console__no_issues() {
        let out = render_console(&[], &summary(0));
        assert_eq!(out, "No issues! Checked 5 link(s) in 2 document(s)\n");
    }

    #[test]
    fn test_render_json() {
        let out = render_json(&records(), &summary(2));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["status"], "failure");
        assert_eq!(value["summary"]["broken"], 2);
        assert_eq!(value["issues"][0]["reference"], "/missing");
        assert_eq!(value["issues"][1]["kind"], "external");
    }

    #[test]
    fn test_render_github_annotations() {
        let out = render_github_annotations(&records(), &summary(2));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines[0],
            "::error file=docs/a.mdx,line=4,title=Broken internal link::/missing - File not found"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_render_github_annotations__escapes_special_characters() {
        let occurrence = LinkOccurrence::new(Path::new("a,b.mdx"), "/x", 1);
        let record =
            BrokenLinkRecord::from_occurrence(&occurrence, LinkKind::Internal, "50%\nsecond");

        let out = render_github_annotations(&[record], &summary(1));

        assert_eq!(
            out,
            "::error file=a%2Cb.mdx,line=1,title=Broken internal link::/x - 50%25%0Asecond\n"
        );
    }

    #[test]
    fn test_render_github_annotations__notice_when_clean() {
        let out = render_github_annotations(&[], &summary(0));

        assert_eq!(
            out,
            "::notice title=Link check::No broken links in 5 link(s) across 2 document(s). Checked external links in 1.2s\n"
        );
    }

    #[test]
    fn test_render_markdown_summary__table() {
        let out = render_markdown_summary(&records(), &summary(2));

        assert!(out.starts_with("## Link check results\n\nChecked external links in 1.2s.\n"));
        assert!(out.contains("| `docs/a.mdx` | 4 | internal | `/missing` | File not found |"));
        assert!(out.contains("`https://x.test/a\\|b`"));
    }

    #[test]
    fn test_render_markdown_summary__no_issues() {
        let out = render_markdown_summary(&[], &summary(0));
        assert!(out.contains("✅ All 5 link(s) in 2 document(s) are valid."));
        assert!(!out.contains("| File |"));
    }

    #[test]
    fn test_write_markdown_summary__appends() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "previous step\n")?;

        assert!(write_markdown_summary(&path, &records(), &summary(2)));

        let content = std::fs::read_to_string(&path)?;
        assert!(content.starts_with("previous step\n## Link check results"));
        Ok(())
    }

    #[test]
    fn test_write_markdown_summary__failure_is_swallowed() {
        let path = Path::new("/definitely/not/a/dir/summary.md");
        assert!(!write_markdown_summary(path, &records(), &summary(2)));
    }
}
