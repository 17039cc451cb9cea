//! Text rendering of validation reports.
//!
//! The same report renders with or without ANSI colors; the plain form is
//! what gets written to report files.

use anyhow::Context;
use colored::*;
use std::path::Path;

use crate::analyze::{Defect, DefectCategory, KindDefects};
use crate::extract::SymbolKind;
use crate::runner::ValidationReport;

const SECTION_WIDTH: usize = 80;

/// Presentation settings. None of these affect which defects exist.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Mod root shown in the header.
    pub root: String,
    pub staged: bool,
    pub output_file: Option<String>,
    pub color: bool,
}

impl RenderOptions {
    /// A copy with colors turned off, for file output.
    pub fn plain(&self) -> Self {
        Self {
            color: false,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Title,
    Heading,
    Error,
    Location,
    Ok,
}

struct Renderer {
    out: String,
    color: bool,
}

impl Renderer {
    fn paint(&self, text: &str, style: Style) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            Style::Title => text.bold().to_string(),
            Style::Heading => text.cyan().to_string(),
            Style::Error => text.red().to_string(),
            Style::Location => text.yellow().to_string(),
            Style::Ok => text.green().to_string(),
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn styled(&mut self, text: &str, style: Style) {
        let painted = self.paint(text, style);
        self.line(&painted);
    }

    fn rule(&mut self, ch: char) {
        let rule: String = std::iter::repeat(ch).take(SECTION_WIDTH).collect();
        self.line(&rule);
    }
}

/// Render a report as text.
pub fn render(report: &ValidationReport, options: &RenderOptions) -> String {
    let mut r = Renderer {
        out: String::new(),
        color: options.color,
    };

    write_header(&mut r, report, options);

    for kind in &report.kinds {
        for category in kind.categories() {
            write_section(&mut r, kind, category);
        }
    }

    write_footer(&mut r, report.issue_count());
    r.out
}

fn write_header(r: &mut Renderer, report: &ValidationReport, options: &RenderOptions) {
    r.rule('#');
    r.styled(&format!("MOD {}", report.checker.title()), Style::Title);
    r.rule('#');
    r.line(&format!("Mod path: {}", options.root));
    if options.staged {
        r.styled("Mode: Git staged files only", Style::Heading);
    }
    if let Some(file) = &options.output_file {
        r.line(&format!("Output file: {}", file));
    }
    if report.skipped > 0 {
        r.line(&format!(
            "Files scanned: {} ({} skipped)",
            report.scanned, report.skipped
        ));
    } else {
        r.line(&format!("Files scanned: {}", report.scanned));
    }
}

fn write_section(r: &mut Renderer, kind: &KindDefects, category: DefectCategory) {
    let text = SectionText::new(kind.kind, category);

    r.line("");
    r.rule('=');
    r.styled(&text.checking, Style::Heading);
    r.rule('=');

    let defects = kind.category(category);
    if defects.is_empty() {
        r.styled(&text.clean, Style::Ok);
        return;
    }

    r.styled(&text.found, Style::Error);
    for defect in defects {
        write_defect(r, defect);
    }
    r.styled(&issues_found(defects.len()), Style::Error);
}

fn write_defect(r: &mut Renderer, defect: &Defect) {
    for location in &defect.locations {
        let painted = r.paint(&location.to_string(), Style::Location);
        r.line(&format!("  {} - {}", painted, defect.name));
    }
}

fn write_footer(r: &mut Renderer, issues: usize) {
    r.line("");
    r.rule('#');
    if issues == 0 {
        r.styled("✓ VALIDATION COMPLETE - NO ISSUES FOUND", Style::Ok);
    } else {
        r.styled(
            &format!("✗ VALIDATION COMPLETE - {} TOTAL ISSUES FOUND", issues),
            Style::Error,
        );
    }
    r.rule('#');
}

fn issues_found(count: usize) -> String {
    if count == 1 {
        "1 issue found".to_string()
    } else {
        format!("{} issues found", count)
    }
}

/// Wording of one report section.
struct SectionText {
    checking: String,
    found: String,
    clean: String,
}

impl SectionText {
    fn new(kind: SymbolKind, category: DefectCategory) -> Self {
        let label = kind.label();
        let verb = kind.set_verb();
        match category {
            DefectCategory::ClearedNotSet => Self {
                checking: format!("Checking cleared {label} that are never {verb}..."),
                found: format!("Cleared {label} that are never {verb} were encountered."),
                clean: format!("✓ No issues found with cleared {label}"),
            },
            DefectCategory::MissingDefinition => Self {
                checking: format!("Checking missing {label} (used but not {verb})..."),
                found: format!("Missing {label} were encountered - they are used but never {verb}."),
                clean: format!("✓ No issues found with missing {label}"),
            },
            DefectCategory::UnusedDefinition => Self {
                checking: format!("Checking unused {label} ({verb} but not used)..."),
                found: format!("Unused {label} were encountered - they are {verb} but never used."),
                clean: format!("✓ No issues found with unused {label}"),
            },
        }
    }
}

/// Write the plain form of a report to `path`.
pub fn write_report_file(
    path: &Path,
    report: &ValidationReport,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    let text = render(report, &options.plain());
    std::fs::write(path, text)
        .with_context(|| format!("failed to write report to {}", path.display()))
}
