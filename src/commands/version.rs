use forge::Printer;

pub fn run(printer: &Printer) {
    for line in version_lines() {
        printer.line(line);
    }
}

fn version_lines() -> Vec<String> {
    let mut lines = vec![format!("forge version {}", env!("CARGO_PKG_VERSION"))];
    if let Some(commit) = option_env!("FORGE_COMMIT") {
        lines.push(format!("  commit: {commit}"));
    }
    if let Some(date) = option_env!("FORGE_BUILD_DATE") {
        lines.push(format!("  built:  {date}"));
    }
    lines
}
