use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::{TemplateDescriptor, TemplateKind};

/// An external program a template kind needs, and how to probe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Human-readable name used in error messages.
    pub name: &'static str,
    pub program: &'static str,
    pub probe_args: &'static [&'static str],
}

pub const MAVEN: Tool = Tool {
    name: "Maven",
    program: "mvn",
    probe_args: &["-version"],
};

/// Whether a tool can be run. A seam so tests need no real toolchain.
pub trait ToolchainProbe {
    fn is_available(&self, tool: &Tool) -> bool;
}

/// Probes by running the tool's version command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ToolchainProbe for SystemProbe {
    fn is_available(&self, tool: &Tool) -> bool {
        let status = Command::new(tool.program)
            .args(tool.probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        debug!(program = tool.program, ?status, "probed toolchain");
        matches!(status, Ok(s) if s.success())
    }
}

/// The toolchain a template needs before generation, if any.
pub fn required_tool(descriptor: &TemplateDescriptor) -> Option<Tool> {
    match descriptor.resolved_kind()? {
        TemplateKind::Archetype => Some(MAVEN),
        TemplateKind::FileTemplate => runtime_for_language(&descriptor.stack.language),
    }
}

fn runtime_for_language(language: &str) -> Option<Tool> {
    let tool = match language.to_ascii_lowercase().as_str() {
        "go" => Tool {
            name: "Go toolchain",
            program: "go",
            probe_args: &["version"],
        },
        "rust" => Tool {
            name: "Cargo",
            program: "cargo",
            probe_args: &["--version"],
        },
        "node" | "javascript" | "typescript" => Tool {
            name: "Node.js",
            program: "node",
            probe_args: &["--version"],
        },
        "python" => Tool {
            name: "Python",
            program: "python3",
            probe_args: &["--version"],
        },
        _ => return None,
    };
    Some(tool)
}
