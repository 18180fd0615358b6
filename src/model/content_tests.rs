//! Tests for project content parsing and validation.

use super::*;
use std::path::PathBuf;

const VALID_TOML: &str = r#"
title = "Synapse Notes"
description = "A note-taking app with a graph view"
category = "web-app"
startDate = "2024-01-15"
technologies = ["TypeScript", "Svelte"]

[[sections]]
id = "intro"
title = "Introduction"
content = "Why we built it."

[[sections]]
id = "architecture"
title = "Architecture"
content = "How it fits together."

[sections.codeBlock]
code = "const graph = new Graph();"
language = "ts"
filename = "graph.ts"

[[sections]]
id = "deploy"
title = "Deploy"
content = "Shipping it."

[sections.visual]
type = "terminal"
content = "npm run build"
"#;

fn path() -> PathBuf {
    PathBuf::from("project.toml")
}

fn valid_project() -> Project {
    parse_project_toml(VALID_TOML, &path()).expect("fixture should be valid")
}

#[test]
fn parses_complete_project() {
    let project = valid_project();
    assert_eq!(project.title, "Synapse Notes");
    assert_eq!(project.category, Category::WebApp);
    assert_eq!(project.sections.len(), 3);
    assert_eq!(
        project.start_date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[test]
fn applies_defaults() {
    let project = valid_project();
    assert_eq!(project.status, Status::Completed);
    assert!(!project.featured);
    assert_eq!(project.order, 0);

    let visual = project.sections[2].visual.as_ref().unwrap();
    assert_eq!(visual.kind, VisualKind::Terminal);
    assert_eq!(visual.animation_delay, 0);
    assert_eq!(visual.animation_duration, 300);
}

#[test]
fn typed_source_prefers_code_block() {
    let project = valid_project();
    assert_eq!(project.sections[0].typed_source(), None);
    assert_eq!(
        project.sections[1].typed_source(),
        Some(("const graph = new Graph();", "ts"))
    );
    assert_eq!(
        project.sections[2].typed_source(),
        Some(("npm run build", "bash"))
    );
}

#[test]
fn diagram_visual_is_not_typed() {
    let mut section = valid_project().sections.remove(0);
    section.visual = Some(VisualState {
        kind: VisualKind::Diagram,
        content: "A -> B".into(),
        language: None,
        animation_delay: 0,
        animation_duration: 300,
    });
    assert_eq!(section.typed_source(), None);
}

#[test]
fn missing_title_fails_to_parse() {
    let toml = VALID_TOML.replace("title = \"Synapse Notes\"\n", "");
    let result = parse_project_toml(&toml, &path());
    assert!(matches!(result, Err(ContentError::Parse { .. })));
}

#[test]
fn unknown_category_fails_to_parse() {
    let toml = VALID_TOML.replace("\"web-app\"", "\"game\"");
    assert!(matches!(
        parse_project_toml(&toml, &path()),
        Err(ContentError::Parse { .. })
    ));
}

#[test]
fn empty_section_id_fails_to_parse() {
    let toml = VALID_TOML.replace("id = \"intro\"", "id = \"\"");
    assert!(matches!(
        parse_project_toml(&toml, &path()),
        Err(ContentError::Parse { .. })
    ));
}

#[test]
fn validation_collects_all_issues() {
    let mut project = valid_project();
    project.title = "  ".into();
    project.technologies.clear();
    project.sections.clear();

    let Err(ContentError::Invalid(issues)) = project.validate() else {
        panic!("expected validation failure");
    };
    assert_eq!(
        issues,
        vec![
            ValidationIssue::EmptyTitle,
            ValidationIssue::NoTechnologies,
            ValidationIssue::NoSections,
        ]
    );
}

#[test]
fn duplicate_section_ids_rejected() {
    let mut project = valid_project();
    let dup = project.sections[0].clone();
    project.sections.push(dup);

    let Err(ContentError::Invalid(issues)) = project.validate() else {
        panic!("expected validation failure");
    };
    assert_eq!(
        issues,
        vec![ValidationIssue::DuplicateSectionId(
            SectionId::new("intro").unwrap()
        )]
    );
}

#[test]
fn seo_description_limit_is_inclusive() {
    let mut project = valid_project();
    project.seo_description = Some("x".repeat(SEO_DESCRIPTION_MAX));
    assert!(project.validate().is_ok());

    project.seo_description = Some("x".repeat(SEO_DESCRIPTION_MAX + 1));
    assert!(project.validate().is_err());
}

#[test]
fn end_date_is_not_ordered_against_start() {
    let mut project = valid_project();
    project.end_date = NaiveDate::from_ymd_opt(2023, 12, 31);
    assert!(project.validate().is_ok());

    project.end_date = NaiveDate::from_ymd_opt(2024, 6, 1);
    assert!(project.validate().is_ok());
}

#[test]
fn link_urls_must_be_http() {
    let mut project = valid_project();
    project.links = Some(Links {
        live: Some("https://example.com".into()),
        github: Some("not a url".into()),
        demo: None,
    });

    let Err(ContentError::Invalid(issues)) = project.validate() else {
        panic!("expected validation failure");
    };
    assert_eq!(issues.len(), 1);
    assert!(matches!(
        &issues[0],
        ValidationIssue::InvalidUrl { field: "github", .. }
    ));
}

#[test]
fn json_projects_use_same_schema() {
    let json = r#"{
        "title": "CLI",
        "description": "A tool",
        "category": "cli-tool",
        "status": "in-progress",
        "startDate": "2023-05-01",
        "technologies": ["Rust"],
        "sections": [
            {"id": "one", "title": "One", "content": "Body",
             "revealElements": [{"id": "hero", "animation": "slide-up"}]}
        ]
    }"#;
    let project = parse_project_json(json, Path::new("p.json")).unwrap();
    assert_eq!(project.status, Status::InProgress);
    let reveal = &project.sections[0].reveal_elements.as_ref().unwrap()[0];
    assert_eq!(reveal.animation, RevealAnimation::SlideUp);
    assert_eq!(reveal.delay, 0);
}

#[test]
fn load_project_rejects_unknown_extension() {
    let result = load_project(Path::new("project.yaml"));
    assert!(matches!(result, Err(ContentError::UnsupportedFormat { .. })));
}

#[test]
fn load_project_reports_missing_file() {
    let result = load_project(Path::new("/nonexistent/scrollsync/project.toml"));
    assert!(matches!(result, Err(ContentError::Read { .. })));
}

#[test]
fn load_project_reads_toml_from_disk() {
    let dir = std::env::temp_dir().join("scrollsync_content_load");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("project.toml");
    std::fs::write(&file, VALID_TOML).unwrap();

    let project = load_project(&file).unwrap();
    assert_eq!(project.sections.len(), 3);
    assert!(project
        .section(&SectionId::new("deploy").unwrap())
        .is_some());

    let _ = std::fs::remove_dir_all(&dir);
}
