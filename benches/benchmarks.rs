use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

use forge::render::filters::{camel_case, env_prefix, pascal_case, snake_case};
use forge::render::{plan_render, RenderContext};
use forge::{CancelToken, TemplateRegistry};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn sample_context() -> RenderContext {
    RenderContext {
        project_name: "bench-project".to_string(),
        module_name: "github.com/acme/bench-project".to_string(),
        version: "0.1.0".to_string(),
        runtime_version: "1.22".to_string(),
    }
}

fn bench_template_lookup(c: &mut Criterion) {
    let registry = TemplateRegistry::new(fixture_path("templates"));

    c.bench_function("registry_get", |b| {
        b.iter(|| {
            let template = registry.get(black_box("go-service")).unwrap();
            black_box(template)
        });
    });
}

fn bench_casing_filters(c: &mut Criterion) {
    c.bench_function("casing_filters", |b| {
        b.iter(|| {
            let name = black_box("my-Service_APIKey");
            black_box((
                snake_case(name),
                camel_case(name),
                pascal_case(name),
                env_prefix(name),
            ))
        });
    });
}

fn bench_render_planning(c: &mut Criterion) {
    let registry = TemplateRegistry::new(fixture_path("templates"));
    let template = registry.get("go-service").unwrap();
    let files_dir = template.files_path();
    let context = sample_context();
    let cancel = CancelToken::new();

    c.bench_function("plan_render", |b| {
        b.iter(|| {
            let plan = plan_render(
                black_box(&files_dir),
                black_box(&context),
                black_box(".tmpl"),
                &cancel,
            )
            .unwrap();
            black_box(plan)
        });
    });
}

fn bench_full_template_pipeline(c: &mut Criterion) {
    let registry = TemplateRegistry::new(fixture_path("templates"));
    let cancel = CancelToken::new();

    c.bench_function("full_pipeline (lookup + plan)", |b| {
        b.iter(|| {
            let template = registry.get(black_box("go-service")).unwrap();
            let plan = plan_render(
                &template.files_path(),
                &sample_context(),
                &template.file_template.template_suffix,
                &cancel,
            )
            .unwrap();
            black_box(plan)
        });
    });
}

criterion_group!(
    benches,
    bench_template_lookup,
    bench_casing_filters,
    bench_render_planning,
    bench_full_template_pipeline
);
criterion_main!(benches);
