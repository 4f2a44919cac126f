use std::fs;
use std::path::{Path, PathBuf};

use forge::config::ForgeConfig;
use forge::generator::archetype::{ArchetypeRequest, ArchetypeRunner};
use forge::generator::toolchain::{Tool, ToolchainProbe};
use forge::generator::{Generator, ProjectParams};
use forge::render::{plan_render, render_tree, RenderContext};
use forge::{CancelToken, ForgeError, Printer, TemplateKind, TemplateRegistry};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn registry() -> TemplateRegistry {
    TemplateRegistry::new(fixture_path("templates"))
}

struct AlwaysAvailable;

impl ToolchainProbe for AlwaysAvailable {
    fn is_available(&self, _tool: &Tool) -> bool {
        true
    }
}

struct NoArchetypes;

impl ArchetypeRunner for NoArchetypes {
    fn install(&self, _template_dir: &Path, _cancel: &CancelToken) -> forge::Result<()> {
        panic!("file templates never reach the archetype runner");
    }

    fn generate(
        &self,
        _template_dir: &Path,
        _request: &ArchetypeRequest,
        _cancel: &CancelToken,
    ) -> forge::Result<()> {
        panic!("file templates never reach the archetype runner");
    }
}

fn context(project_name: &str) -> RenderContext {
    RenderContext {
        project_name: project_name.to_string(),
        module_name: format!("github.com/acme/{project_name}"),
        version: "0.1.0".to_string(),
        runtime_version: "1.22".to_string(),
    }
}

#[test]
fn test_list_skips_broken_and_descriptorless_templates() {
    let mut names = registry().names().unwrap();
    names.sort();
    assert_eq!(names, vec!["files-missing", "go-service", "java-ddd"]);
}

#[test]
fn test_get_loads_descriptor_and_sets_path() {
    let template = registry().get("java-ddd").unwrap();
    assert_eq!(template.resolved_kind(), Some(TemplateKind::Archetype));
    assert_eq!(template.archetype.artifact_id, "java-ddd-archetype");
    assert_eq!(template.path, fixture_path("templates").join("java-ddd"));
}

#[test]
fn test_missing_descriptor_is_not_found_and_not_available() {
    let err = registry().get("no-descriptor").unwrap_err();
    match err {
        ForgeError::TemplateNotFound {
            name,
            mut available,
        } => {
            assert_eq!(name, "no-descriptor");
            available.sort();
            assert_eq!(available, vec!["files-missing", "go-service", "java-ddd"]);
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
    assert!(!registry().exists("no-descriptor"));
    assert!(!registry().exists("does-not-exist"));
    assert!(registry().exists("go-service"));
}

#[test]
fn test_broken_descriptor_is_invalid() {
    assert!(matches!(
        registry().get("broken"),
        Err(ForgeError::InvalidTemplate { .. })
    ));
    assert!(!registry().exists("broken"));
}

#[test]
fn test_render_round_trip() {
    let template = registry().get("go-service").unwrap();
    let out = tempfile::tempdir().unwrap();
    let project_dir = out.path().join("my-api");

    let project = render_tree(
        &template.files_path(),
        &project_dir,
        &context("my-api"),
        &template.file_template.template_suffix,
        &CancelToken::new(),
    )
    .unwrap();

    let main = fs::read_to_string(project_dir.join("cmd/my-api/main.go")).unwrap();
    assert!(main.contains("// MyApi entry point."));
    assert!(main.contains("fmt.Println(\"my-api 0.1.0\")"));
    assert!(!main.contains("{{"));
    assert!(!project_dir.join("cmd/{{project_name}}").exists());

    let go_mod = fs::read_to_string(project_dir.join("go.mod")).unwrap();
    assert_eq!(go_mod, "module github.com/acme/my-api\n\ngo 1.22\n");

    let config = fs::read_to_string(project_dir.join("internal/config/config.go")).unwrap();
    assert!(config.contains("EnvPrefix = \"MY_API_\""));
    assert!(config.contains("ServiceName = \"my_api\""));

    let readme = fs::read_to_string(project_dir.join("static/README.md")).unwrap();
    assert!(readme.contains("{{ project_name }}"));

    assert_eq!(project.files_created.len(), 3);
    assert_eq!(project.files_copied.len(), 1);
    assert_eq!(project.version, "0.1.0");
}

#[test]
fn test_plan_render_writes_nothing() {
    let template = registry().get("go-service").unwrap();
    let plan = plan_render(
        &template.files_path(),
        &context("my-api"),
        ".tmpl",
        &CancelToken::new(),
    )
    .unwrap();

    let mut paths: Vec<String> = plan
        .files
        .iter()
        .map(|f| f.relative_path.to_string_lossy().replace('\\', "/"))
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "cmd/my-api/main.go",
            "go.mod",
            "internal/config/config.go",
            "static/README.md",
        ]
    );
}

#[test]
fn test_missing_files_dir() {
    let template = registry().get("files-missing").unwrap();
    let out = tempfile::tempdir().unwrap();
    let err = render_tree(
        &template.files_path(),
        &out.path().join("x"),
        &context("x"),
        ".tmpl",
        &CancelToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ForgeError::TemplateFilesMissing { .. }));
}

#[test]
fn test_generate_file_template_end_to_end() {
    let template = registry().get("go-service").unwrap();
    let out = tempfile::tempdir().unwrap();
    let printer = Printer::new(true, true);
    let generator = Generator::new(&AlwaysAvailable, &NoArchetypes, &printer, CancelToken::new());

    let project = generator
        .generate(
            template,
            ProjectParams {
                artifact_id: "billing".into(),
                module: "github.com/acme/billing".into(),
                output_dir: out.path().to_path_buf(),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(project.project_dir, out.path().join("billing"));
    let go_mod = fs::read_to_string(out.path().join("billing/go.mod")).unwrap();
    assert!(go_mod.starts_with("module github.com/acme/billing\n"));
    assert!(out.path().join("billing/cmd/billing/main.go").is_file());
}

#[test]
fn test_generate_refuses_non_empty_destination() {
    let template = registry().get("go-service").unwrap();
    let out = tempfile::tempdir().unwrap();
    let existing = out.path().join("billing");
    fs::create_dir_all(&existing).unwrap();
    fs::write(existing.join("go.mod"), "module keep-me\n").unwrap();

    let printer = Printer::new(true, true);
    let generator = Generator::new(&AlwaysAvailable, &NoArchetypes, &printer, CancelToken::new());
    let err = generator
        .generate(
            template,
            ProjectParams {
                artifact_id: "billing".into(),
                output_dir: out.path().to_path_buf(),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, ForgeError::TargetNotEmpty { .. }));
    assert_eq!(
        fs::read_to_string(existing.join("go.mod")).unwrap(),
        "module keep-me\n"
    );
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[test]
fn test_config_with_templates_dir() {
    let config = ForgeConfig::with_templates_dir(fixture_path("templates"));
    assert_eq!(config.home, fixture_path(""));
    assert_eq!(config.default_template, "go-service");
    assert!(TemplateRegistry::new(&config.templates_dir).exists(&config.default_template));
}

#[test]
fn test_shipped_go_service_renders() {
    let registry = TemplateRegistry::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"));
    let template = registry.get("go-service").unwrap();
    let plan = plan_render(
        &template.files_path(),
        &context("order-api"),
        &template.file_template.template_suffix,
        &CancelToken::new(),
    )
    .unwrap();

    let main = plan
        .files
        .iter()
        .find(|f| f.relative_path == Path::new("cmd/order-api/main.go"))
        .expect("main.go planned");
    let main = String::from_utf8_lossy(&main.content);
    assert!(main.contains("server.NewOrderApiHandler()"));
    assert!(main.contains("\"github.com/acme/order-api/internal/config\""));

    let config = plan
        .files
        .iter()
        .find(|f| f.relative_path == Path::new("internal/config/config.go"))
        .expect("config.go planned");
    assert!(String::from_utf8_lossy(&config.content).contains("os.Getenv(\"ORDER_API_ADDR\")"));
}
