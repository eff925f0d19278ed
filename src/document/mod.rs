//! Portfolio document model.
//!
//! Mirrors the JSON blob a portfolio is exported from. Every scalar is
//! optional and tolerant: a value of the wrong JSON type deserializes as
//! absent instead of failing the whole document. Placeholder and omission
//! rules live in [`normalize`], not here.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub mod normalize;

pub use normalize::{
    CustomBlock, Link, NormalizedPortfolio, Personal, ProjectCard, ProjectTechnology, Resume,
    SectionItem, Skill, normalize, render_description,
};

/// Default relative path to the portfolio document.
pub const DEFAULT_DOCUMENT_PATH: &str = "content/portfolio.json";

/// Built-in section order used when the document does not set one.
pub const DEFAULT_SECTION_ORDER: [SectionKey; 5] = [
    SectionKey::Personal,
    SectionKey::Experience,
    SectionKey::Education,
    SectionKey::Projects,
    SectionKey::Skills,
];

/// Identifies which block renders in a slot of the page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SectionKey {
    Personal,
    Experience,
    Education,
    Projects,
    Skills,
    Custom(String),
}

impl SectionKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "personal" => SectionKey::Personal,
            "experience" => SectionKey::Experience,
            "education" => SectionKey::Education,
            "projects" => SectionKey::Projects,
            "skills" => SectionKey::Skills,
            other => SectionKey::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Personal => "personal",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::Custom(id) => id,
        }
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.as_str().to_string()
    }
}

/// Display layout for item lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Card,
    Timeline,
    List,
}

impl LayoutKind {
    /// Unknown or missing layouts render as cards.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("timeline") => LayoutKind::Timeline,
            Some("list") => LayoutKind::List,
            _ => LayoutKind::Card,
        }
    }
}

/// Where a technology's logo comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoType {
    #[default]
    Default,
    SvgVersion,
    CustomUpload,
}

impl LogoType {
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("svg_version") => LogoType::SvgVersion,
            Some("custom_upload") => LogoType::CustomUpload,
            _ => LogoType::Default,
        }
    }

    /// Only these two store an override URL in `logo_data`.
    pub fn carries_override(self) -> bool {
        matches!(self, LogoType::SvgVersion | LogoType::CustomUpload)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_layout<'de, D>(deserializer: D) -> Result<LayoutKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(LayoutKind::parse_lenient(raw.as_deref()))
}

fn lenient_logo_type<'de, D>(deserializer: D) -> Result<LogoType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(LogoType::parse_lenient(raw.as_deref()))
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomLink {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub about_me: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(rename = "avatarUrl", deserialize_with = "lenient_string")]
    pub avatar_url: Option<String>,
    #[serde(rename = "cvUrl", deserialize_with = "lenient_string")]
    pub cv_url: Option<String>,
    #[serde(rename = "cvFileName", deserialize_with = "lenient_string")]
    pub cv_file_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub custom_links: Vec<CustomLink>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "logoUrl", deserialize_with = "lenient_string")]
    pub logo_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub custom_links: Vec<CustomLink>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub university: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_year: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end_year: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "logoUrl", deserialize_with = "lenient_string")]
    pub logo_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub custom_links: Vec<CustomLink>,
}

/// Per-technology details a project may attach to its technology names.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TechnologyDetail {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "displayName", deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(rename = "technologyName", deserialize_with = "lenient_string")]
    pub technology_name: Option<String>,
    #[serde(rename = "logoType", deserialize_with = "lenient_logo_type")]
    pub logo_type: LogoType,
    #[serde(rename = "logoData", deserialize_with = "lenient_string")]
    pub logo_data: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "picUrl", deserialize_with = "lenient_string")]
    pub pic_url: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub technology_names: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub technology_details: Vec<TechnologyDetail>,
    #[serde(deserialize_with = "nullable")]
    pub custom_links: Vec<CustomLink>,
}

/// A technology the user lists under skills.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserTechnology {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub technology_name: Option<String>,
    #[serde(deserialize_with = "lenient_logo_type")]
    pub logo_type: LogoType,
    #[serde(deserialize_with = "lenient_string")]
    pub logo_data: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomSectionItem {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(rename = "primaryTitle", deserialize_with = "lenient_string")]
    pub primary_title: Option<String>,
    #[serde(rename = "secondaryTitle", deserialize_with = "lenient_string")]
    pub secondary_title: Option<String>,
    #[serde(rename = "dateInfo", deserialize_with = "lenient_string")]
    pub date_info: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "logoUrl", deserialize_with = "lenient_string")]
    pub logo_url: Option<String>,
    #[serde(rename = "customLinks", deserialize_with = "nullable")]
    pub custom_links: Vec<CustomLink>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub section_name: Option<String>,
    #[serde(deserialize_with = "lenient_layout")]
    pub layout_type: LayoutKind,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<CustomSectionItem>,
}

/// The whole portfolio as exported from the editor.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioDocument {
    #[serde(rename = "personalInfo", alias = "userInfo")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(deserialize_with = "nullable")]
    pub experiences: Vec<WorkExperience>,
    #[serde(deserialize_with = "nullable")]
    pub educations: Vec<Education>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(rename = "userTechnologies", deserialize_with = "nullable")]
    pub user_technologies: Vec<UserTechnology>,
    #[serde(rename = "customSections", deserialize_with = "nullable")]
    pub custom_sections: Vec<CustomSection>,
    #[serde(rename = "sectionOrder", deserialize_with = "lenient_strings")]
    pub section_order: Vec<String>,
}

impl PortfolioDocument {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("parsing portfolio document")
    }
}

pub fn load_document(path: &Path) -> Result<PortfolioDocument> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading portfolio document {}", path.display()))?;
    PortfolioDocument::from_json(&data).with_context(|| format!("loading {}", path.display()))
}
