use std::path::Path;

use console::{measure_text_width, pad_str, style, Alignment};

use crate::config::TemplateKind;

/// User-facing terminal output. Quiet mode silences everything but errors.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool, no_color: bool) -> Self {
        if no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn line(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", msg.as_ref());
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", style("✓").green().bold(), msg.as_ref());
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", style("ℹ").cyan().bold(), msg.as_ref());
        }
    }

    pub fn warning(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", style("Warning:").yellow().bold(), msg.as_ref());
        }
    }

    /// Left-aligned columns, bold header, dashed separator.
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if self.quiet || rows.is_empty() {
            return;
        }
        for line in format_table(headers, rows) {
            println!("{line}");
        }
    }

    pub fn project_created(
        &self,
        kind: TemplateKind,
        language: &str,
        project_dir: &Path,
        artifact_id: &str,
        version: &str,
    ) {
        self.line("");
        self.success("Project created successfully!");
        self.line(format!("  {}", style(project_dir.display()).cyan()));
        self.line("");
        self.line("Next steps:");
        self.line(format!("  cd {artifact_id}"));
        match kind {
            TemplateKind::Archetype => {
                self.line("  mvn clean package");
                self.line(format!(
                    "  java -jar {artifact_id}-bootstrap/target/{artifact_id}-bootstrap-{version}.jar"
                ));
            }
            TemplateKind::FileTemplate => match language.to_ascii_lowercase().as_str() {
                "go" => self.line("  go build ./..."),
                "rust" => self.line("  cargo build"),
                "node" | "javascript" | "typescript" => self.line("  npm install"),
                "python" => self.line("  pip install -e ."),
                _ => {}
            },
        }
    }
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let join = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header = join(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad_str(h, *w, Alignment::Left, None).into_owned())
            .collect(),
    );
    lines.push(style(header).bold().to_string());
    lines.push(join(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        lines.push(join(
            row.iter()
                .zip(&widths)
                .map(|(c, w)| pad_str(c, *w, Alignment::Left, None).into_owned())
                .collect(),
        ));
    }
    lines
}
