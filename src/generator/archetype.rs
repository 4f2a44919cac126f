use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::cancel::CancelToken;
use crate::config::schema::ArchetypeCoordinates;
use crate::error::{ForgeError, Result};
use crate::generator::process;

/// Template version passed to the archetype when the descriptor has none.
const FALLBACK_TEMPLATE_VERSION: &str = "1.0.0";

/// Everything `archetype:generate` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchetypeRequest {
    pub archetype: ArchetypeCoordinates,
    pub template_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub package: String,
    pub output_dir: PathBuf,
}

/// The external build tool behind archetype templates.
pub trait ArchetypeRunner {
    /// Install the archetype found in `template_dir` into the local repository.
    fn install(&self, template_dir: &Path, cancel: &CancelToken) -> Result<()>;

    /// Generate the project described by `request`.
    fn generate(
        &self,
        template_dir: &Path,
        request: &ArchetypeRequest,
        cancel: &CancelToken,
    ) -> Result<()>;
}

/// Runs `mvn` as a subprocess.
#[derive(Debug, Clone)]
pub struct MavenRunner {
    program: String,
    quiet: bool,
}

impl MavenRunner {
    pub fn new(quiet: bool) -> Self {
        Self {
            program: "mvn".to_string(),
            quiet,
        }
    }

    /// Use a different executable (e.g. `./mvnw`).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

pub fn install_args() -> Vec<String> {
    ["install", "-DskipTests", "-DskipITs", "-q"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn generate_args(request: &ArchetypeRequest) -> Vec<String> {
    let template_version = if request.template_version.is_empty() {
        FALLBACK_TEMPLATE_VERSION
    } else {
        &request.template_version
    };
    let mut args = vec![
        "archetype:generate".to_string(),
        "-q".to_string(),
        format!("-DarchetypeGroupId={}", request.archetype.group_id),
        format!("-DarchetypeArtifactId={}", request.archetype.artifact_id),
        format!("-DarchetypeVersion={}", request.archetype.version),
        format!("-DgroupId={}", request.group_id),
        format!("-DartifactId={}", request.artifact_id),
        format!("-Dversion={}", request.version),
        format!("-Dpackage={}", request.package),
        format!("-DforgeArchetypeVersion={}", request.archetype.version),
        format!("-DforgeTemplateVersion={template_version}"),
        "-DinteractiveMode=false".to_string(),
    ];
    if !request.output_dir.as_os_str().is_empty() {
        args.push(format!("-DoutputDirectory={}", request.output_dir.display()));
    }
    args
}

impl ArchetypeRunner for MavenRunner {
    fn install(&self, template_dir: &Path, cancel: &CancelToken) -> Result<()> {
        info!(dir = %template_dir.display(), "installing archetype");
        let mut cmd = Command::new(&self.program);
        cmd.args(install_args()).current_dir(template_dir);

        let output = process::run(&mut cmd, "maven install", !self.quiet, cancel)?;
        if !output.status.success() {
            return Err(ForgeError::ExternalProcess {
                step: "maven install".to_string(),
                message: output.failure_message(),
            });
        }
        Ok(())
    }

    fn generate(
        &self,
        template_dir: &Path,
        request: &ArchetypeRequest,
        cancel: &CancelToken,
    ) -> Result<()> {
        info!(artifact = %request.artifact_id, "generating from archetype");
        let mut cmd = Command::new(&self.program);
        cmd.args(generate_args(request)).current_dir(template_dir);

        let output = process::run(&mut cmd, "archetype generation", false, cancel)?;
        if !output.status.success() {
            return Err(ForgeError::ExternalProcess {
                step: "archetype generation".to_string(),
                message: output.failure_message(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ArchetypeRequest {
        ArchetypeRequest {
            archetype: ArchetypeCoordinates {
                group_id: "com.forge".into(),
                artifact_id: "java-ddd-archetype".into(),
                version: "1.2.0".into(),
            },
            template_version: String::new(),
            group_id: "com.example".into(),
            artifact_id: "my-service".into(),
            version: "1.0.0-SNAPSHOT".into(),
            package: "com.example".into(),
            output_dir: PathBuf::from("/tmp/out"),
        }
    }

    #[test]
    fn generate_args_carry_every_coordinate() {
        let args = generate_args(&request());
        assert_eq!(args[0], "archetype:generate");
        for expected in [
            "-DarchetypeGroupId=com.forge",
            "-DarchetypeArtifactId=java-ddd-archetype",
            "-DarchetypeVersion=1.2.0",
            "-DgroupId=com.example",
            "-DartifactId=my-service",
            "-Dversion=1.0.0-SNAPSHOT",
            "-Dpackage=com.example",
            "-DforgeArchetypeVersion=1.2.0",
            "-DforgeTemplateVersion=1.0.0",
            "-DinteractiveMode=false",
            "-DoutputDirectory=/tmp/out",
        ] {
            assert!(args.iter().any(|a| a == expected), "missing {expected}");
        }
    }

    #[test]
    fn output_directory_is_optional() {
        let mut req = request();
        req.output_dir = PathBuf::new();
        let args = generate_args(&req);
        assert!(!args.iter().any(|a| a.starts_with("-DoutputDirectory")));
    }

    #[test]
    fn template_version_follows_the_descriptor() {
        let mut req = request();
        req.template_version = "2.0.0".into();
        let args = generate_args(&req);
        assert!(args.iter().any(|a| a == "-DforgeTemplateVersion=2.0.0"));
        assert!(!args.iter().any(|a| a == "-DforgeTemplateVersion=1.0.0"));
    }

    #[test]
    fn install_skips_tests() {
        assert_eq!(install_args(), vec!["install", "-DskipTests", "-DskipITs", "-q"]);
    }

    #[cfg(unix)]
    #[test]
    fn failing_build_tool_reports_stderr() {
        // `sh install ...` fails to open a script named "install" and says so on stderr.
        let dir = tempfile::tempdir().unwrap();
        let runner = MavenRunner::new(true).with_program("sh");
        match runner.install(dir.path(), &CancelToken::new()) {
            Err(ForgeError::ExternalProcess { step, message }) => {
                assert_eq!(step, "maven install");
                assert!(message.contains("install"), "unexpected message: {message}");
            }
            other => panic!("expected ExternalProcess, got {other:?}"),
        }
    }
}
