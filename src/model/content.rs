//! Case-study content records.
//!
//! A [`Project`] is a titled case study made of narrative [`Section`]s. Each
//! section may carry a code block and a visual directive for the side panel.
//! Project files are TOML or JSON with camelCase keys; dates are
//! `"YYYY-MM-DD"` strings.

use crate::model::error::ContentError;
use crate::model::identifiers::SectionId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Maximum length of `seoDescription`, in characters.
pub const SEO_DESCRIPTION_MAX: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    WebApp,
    MobileApp,
    CliTool,
    Library,
    DesignSystem,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Completed,
    InProgress,
    Concept,
}

/// Kind of visual shown in the side panel while a section is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualKind {
    Code,
    Ui,
    Terminal,
    Diagram,
}

impl VisualKind {
    /// Whether the visual's content is text that should be typed out.
    pub fn is_typed(self) -> bool {
        matches!(self, VisualKind::Code | VisualKind::Terminal)
    }

    pub fn label(self) -> &'static str {
        match self {
            VisualKind::Code => "code",
            VisualKind::Ui => "ui",
            VisualKind::Terminal => "terminal",
            VisualKind::Diagram => "diagram",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealAnimation {
    #[default]
    Fade,
    SlideUp,
    Scale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

/// Source code shown alongside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub highlight_lines: Option<Vec<u32>>,
}

/// Visual directive for the side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    #[serde(rename = "type")]
    pub kind: VisualKind,
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Delay before the visual starts animating, in milliseconds.
    #[serde(default)]
    pub animation_delay: u32,
    /// Animation duration in milliseconds.
    #[serde(default = "default_animation_duration")]
    pub animation_duration: u32,
}

fn default_animation_duration() -> u32 {
    300
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealElement {
    pub id: String,
    #[serde(default)]
    pub animation: RevealAnimation,
    #[serde(default)]
    pub delay: u32,
}

/// One narrative section of a case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub code_block: Option<CodeBlock>,
    #[serde(default)]
    pub visual: Option<VisualState>,
    #[serde(default)]
    pub reveal_elements: Option<Vec<RevealElement>>,
}

impl Section {
    /// Text and language tag for the typing panel, if this section has any.
    ///
    /// A code block wins over a visual. Visuals only count when they are
    /// typed kinds (code or terminal); terminal output is highlighted as bash
    /// unless it names its own language.
    pub fn typed_source(&self) -> Option<(&str, &str)> {
        if let Some(block) = &self.code_block {
            return Some((block.code.as_str(), block.language.as_str()));
        }
        let visual = self.visual.as_ref().filter(|v| v.kind.is_typed())?;
        let language = match (&visual.language, visual.kind) {
            (Some(lang), _) => lang.as_str(),
            (None, VisualKind::Terminal) => "bash",
            (None, _) => "",
        };
        Some((visual.content.as_str(), language))
    }
}

/// A case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub links: Option<Links>,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// A single reason a project failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTitle,
    EmptyDescription,
    NoTechnologies,
    NoSections,
    DuplicateSectionId(SectionId),
    SeoDescriptionTooLong { length: usize },
    InvalidUrl { field: &'static str, value: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("title is required"),
            Self::EmptyDescription => f.write_str("description is required"),
            Self::NoTechnologies => f.write_str("at least one technology is required"),
            Self::NoSections => f.write_str("at least one section is required"),
            Self::DuplicateSectionId(id) => write!(f, "section id {id:?} is used more than once"),
            Self::SeoDescriptionTooLong { length } => write!(
                f,
                "seoDescription is {length} characters, maximum is {SEO_DESCRIPTION_MAX}"
            ),
            Self::InvalidUrl { field, value } => {
                write!(f, "links.{field} is not an http(s) URL: {value:?}")
            }
        }
    }
}

impl Project {
    /// Check every rule and report all violations at once.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(ValidationIssue::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            issues.push(ValidationIssue::EmptyDescription);
        }
        if self.technologies.is_empty() {
            issues.push(ValidationIssue::NoTechnologies);
        }
        if self.sections.is_empty() {
            issues.push(ValidationIssue::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(&section.id) {
                issues.push(ValidationIssue::DuplicateSectionId(section.id.clone()));
            }
        }

        if let Some(seo) = &self.seo_description {
            let length = seo.chars().count();
            if length > SEO_DESCRIPTION_MAX {
                issues.push(ValidationIssue::SeoDescriptionTooLong { length });
            }
        }

        if let Some(links) = &self.links {
            for (field, value) in [
                ("live", &links.live),
                ("github", &links.github),
                ("demo", &links.demo),
            ] {
                if let Some(url) = value {
                    if !is_http_url(url) {
                        issues.push(ValidationIssue::InvalidUrl {
                            field,
                            value: url.clone(),
                        });
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ContentError::Invalid(issues))
        }
    }

    /// Look up a section by id.
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

/// Parse a project from TOML text and validate it.
pub fn parse_project_toml(contents: &str, path: &Path) -> Result<Project, ContentError> {
    let project: Project = toml::from_str(contents).map_err(|e| ContentError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    project.validate()?;
    Ok(project)
}

/// Parse a project from JSON text and validate it.
pub fn parse_project_json(contents: &str, path: &Path) -> Result<Project, ContentError> {
    let project: Project = serde_json::from_str(contents).map_err(|e| ContentError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    project.validate()?;
    Ok(project)
}

/// Load and validate a project file, choosing the format by extension.
pub fn load_project(path: &Path) -> Result<Project, ContentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str, &Path) -> Result<Project, ContentError> = match extension.as_deref() {
        Some("toml") => parse_project_toml,
        Some("json") => parse_project_json,
        _ => {
            return Err(ContentError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let contents = std::fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let project = parse(&contents, path)?;
    tracing::debug!(
        path = %path.display(),
        sections = project.sections.len(),
        "Project loaded"
    );
    Ok(project)
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
