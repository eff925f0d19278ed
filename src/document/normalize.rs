//! One pass that turns a loose [`PortfolioDocument`] into render-ready data.
//!
//! Blank strings become absent, missing titles get their placeholder text,
//! links that cannot be made absolute are dropped, skills are de-duplicated
//! and the section order is settled. Renderers never default anything.

use super::{
    CustomLink, CustomSection, DEFAULT_SECTION_ORDER, LayoutKind, PersonalInfo,
    PortfolioDocument, Project, SectionKey, UserTechnology,
};
use crate::links::{LinkIcon, ensure_absolute_url, link_icon};

pub const COMPANY_PLACEHOLDER: &str = "Company";
pub const UNIVERSITY_PLACEHOLDER: &str = "University";
pub const UNTITLED_ITEM_PLACEHOLDER: &str = "Untitled Item";
const PRESENT: &str = "Present";

/// Technologies shown on a project card before the "+N more" badge.
pub const PROJECT_TECHNOLOGY_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub title: String,
    pub icon: LinkIcon,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resume {
    pub url: String,
    pub file_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Personal {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub resume: Option<Resume>,
    pub links: Vec<Link>,
}

impl Personal {
    /// Initials shown when no avatar image loads: first letter of each word.
    pub fn initials(&self) -> String {
        self.name
            .as_deref()
            .unwrap_or_default()
            .split(' ')
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// One entry of an experience, education or custom section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionItem {
    pub title: String,
    pub subtitle: Option<String>,
    pub date_line: Option<String>,
    pub location: Option<String>,
    pub description: Vec<String>,
    pub logo_url: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectTechnology {
    /// Name as listed on the project.
    pub name: String,
    pub display_name: String,
    pub lookup_name: Option<String>,
    pub logo_override: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: Option<String>,
    pub description: Vec<String>,
    pub picture_url: Option<String>,
    pub technologies: Vec<ProjectTechnology>,
    pub hidden_technologies: usize,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    pub id: Option<String>,
    pub display_name: String,
    pub lookup_name: Option<String>,
    pub logo_override: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomBlock {
    pub id: String,
    pub name: String,
    pub layout: LayoutKind,
    pub items: Vec<SectionItem>,
}

/// Render-ready portfolio. Empty collections mean "omit the section".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedPortfolio {
    /// `None` when no personal field carries content.
    pub personal: Option<Personal>,
    pub experiences: Vec<SectionItem>,
    pub educations: Vec<SectionItem>,
    pub projects: Vec<ProjectCard>,
    pub skills: Vec<Skill>,
    pub custom_sections: Vec<CustomBlock>,
    pub section_order: Vec<SectionKey>,
}

impl NormalizedPortfolio {
    /// True when no section has anything to show.
    pub fn is_empty(&self) -> bool {
        self.personal.is_none()
            && self.experiences.is_empty()
            && self.educations.is_empty()
            && self.projects.is_empty()
            && self.skills.is_empty()
            && self.custom_sections.is_empty()
    }

    pub fn custom_section(&self, id: &str) -> Option<&CustomBlock> {
        self.custom_sections.iter().find(|block| block.id == id)
    }
}

pub fn normalize(doc: &PortfolioDocument) -> NormalizedPortfolio {
    NormalizedPortfolio {
        personal: doc.personal_info.as_ref().and_then(normalize_personal),
        experiences: doc
            .experiences
            .iter()
            .map(|exp| {
                section_item(
                    exp.company.as_deref(),
                    COMPANY_PLACEHOLDER,
                    exp.position.as_deref(),
                    Some(date_range(exp.start_date.as_deref(), exp.end_date.as_deref())),
                    exp.location.as_deref(),
                    exp.description.as_deref(),
                    exp.logo_url.as_deref(),
                    &exp.custom_links,
                )
            })
            .collect(),
        educations: doc
            .educations
            .iter()
            .map(|edu| {
                section_item(
                    edu.university.as_deref(),
                    UNIVERSITY_PLACEHOLDER,
                    edu.degree.as_deref(),
                    Some(date_range(edu.start_year.as_deref(), edu.end_year.as_deref())),
                    edu.location.as_deref(),
                    edu.description.as_deref(),
                    edu.logo_url.as_deref(),
                    &edu.custom_links,
                )
            })
            .collect(),
        projects: doc.projects.iter().map(normalize_project).collect(),
        skills: normalize_skills(&doc.user_technologies),
        custom_sections: doc
            .custom_sections
            .iter()
            .filter_map(normalize_custom_section)
            .collect(),
        section_order: section_order(doc),
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Split a description into display lines: `- ` and `* ` bullets become `• `,
/// blank lines are dropped.
pub fn render_description(description: Option<&str>) -> Vec<String> {
    let Some(description) = description else {
        return Vec::new();
    };
    description
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with("• ") {
                line.to_string()
            } else if let Some(rest) = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
            {
                format!("• {rest}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    let end = clean(end).unwrap_or_else(|| PRESENT.to_string());
    format!("{} - {}", clean(start).unwrap_or_default(), end)
        .trim()
        .to_string()
}

fn normalize_links(links: &[CustomLink]) -> Vec<Link> {
    links
        .iter()
        .filter_map(|link| {
            let url = ensure_absolute_url(link.url.as_deref())?;
            let icon = link_icon(link.icon.as_deref().unwrap_or_default());
            Some(Link {
                url,
                title: clean(link.title.as_deref()).unwrap_or_else(|| icon.label.to_string()),
                icon,
            })
        })
        .collect()
}

fn normalize_personal(info: &PersonalInfo) -> Option<Personal> {
    let personal = Personal {
        name: clean(info.full_name.as_deref()),
        title: clean(info.title.as_deref()),
        bio: clean(info.about_me.as_deref()),
        location: clean(info.location.as_deref()),
        email: clean(info.email.as_deref()),
        avatar_url: clean(info.avatar_url.as_deref()),
        resume: None,
        links: normalize_links(&info.custom_links),
    };

    let cv_url = clean(info.cv_url.as_deref());
    // Unusable links still count: the header shows even if every link drops.
    let has_content = personal.name.is_some()
        || personal.title.is_some()
        || personal.bio.is_some()
        || personal.avatar_url.is_some()
        || personal.email.is_some()
        || cv_url.is_some()
        || !info.custom_links.is_empty();
    if !has_content {
        return None;
    }

    Some(Personal {
        resume: ensure_absolute_url(cv_url.as_deref()).map(|url| Resume {
            url,
            file_name: clean(info.cv_file_name.as_deref()),
        }),
        ..personal
    })
}

#[allow(clippy::too_many_arguments)]
fn section_item(
    title: Option<&str>,
    placeholder: &str,
    subtitle: Option<&str>,
    date_line: Option<String>,
    location: Option<&str>,
    description: Option<&str>,
    logo_url: Option<&str>,
    links: &[CustomLink],
) -> SectionItem {
    SectionItem {
        title: clean(title).unwrap_or_else(|| placeholder.to_string()),
        subtitle: clean(subtitle),
        date_line: date_line.filter(|line| !line.is_empty()),
        location: clean(location),
        description: render_description(description),
        logo_url: clean(logo_url),
        links: normalize_links(links),
    }
}

fn normalize_custom_section(section: &CustomSection) -> Option<CustomBlock> {
    let id = clean(section.id.as_deref())?;
    if section.items.is_empty() {
        return None;
    }
    let items = section
        .items
        .iter()
        .map(|item| {
            section_item(
                item.primary_title.as_deref(),
                UNTITLED_ITEM_PLACEHOLDER,
                item.secondary_title.as_deref(),
                clean(item.date_info.as_deref()),
                item.location.as_deref(),
                item.description.as_deref(),
                item.logo_url.as_deref(),
                &item.custom_links,
            )
        })
        .collect();
    Some(CustomBlock {
        name: clean(section.section_name.as_deref()).unwrap_or_else(|| id.clone()),
        id,
        layout: section.layout_type,
        items,
    })
}

fn normalize_project(project: &Project) -> ProjectCard {
    let names: Vec<&String> = project
        .technology_names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .collect();
    let technologies = names
        .iter()
        .take(PROJECT_TECHNOLOGY_LIMIT)
        .map(|name| {
            let detail = project
                .technology_details
                .iter()
                .find(|detail| detail.name.as_deref() == Some(name.as_str()));
            ProjectTechnology {
                name: name.to_string(),
                display_name: detail
                    .and_then(|d| clean(d.display_name.as_deref()))
                    .unwrap_or_else(|| name.to_string()),
                lookup_name: detail.and_then(|d| clean(d.technology_name.as_deref())),
                logo_override: detail
                    .filter(|d| d.logo_type.carries_override())
                    .and_then(|d| clean(d.logo_data.as_deref())),
            }
        })
        .collect();

    ProjectCard {
        name: clean(project.name.as_deref()),
        description: render_description(project.description.as_deref()),
        picture_url: clean(project.pic_url.as_deref()),
        technologies,
        hidden_technologies: names.len().saturating_sub(PROJECT_TECHNOLOGY_LIMIT),
        links: normalize_links(&project.custom_links),
    }
}

// Skills without a display name are skipped. Repeated ids keep the first
// position and take the last occurrence's data.
fn normalize_skills(technologies: &[UserTechnology]) -> Vec<Skill> {
    let mut skills: Vec<Skill> = Vec::new();
    for tech in technologies {
        let Some(display_name) = clean(tech.display_name.as_deref()) else {
            continue;
        };
        let skill = Skill {
            id: clean(tech.id.as_deref()),
            display_name,
            lookup_name: clean(tech.technology_name.as_deref()),
            logo_override: if tech.logo_type.carries_override() {
                clean(tech.logo_data.as_deref())
            } else {
                None
            },
        };
        let existing = skill
            .id
            .as_ref()
            .and_then(|id| skills.iter().position(|s| s.id.as_ref() == Some(id)));
        match existing {
            Some(pos) => skills[pos] = skill,
            None => skills.push(skill),
        }
    }
    skills
}

fn section_order(doc: &PortfolioDocument) -> Vec<SectionKey> {
    let configured: Vec<SectionKey> = doc
        .section_order
        .iter()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .map(SectionKey::parse)
        .collect();
    if !configured.is_empty() {
        return configured;
    }

    // Empty custom sections stay in the order; the renderer skips them.
    DEFAULT_SECTION_ORDER
        .iter()
        .cloned()
        .chain(
            doc.custom_sections
                .iter()
                .filter_map(|section| clean(section.id.as_deref()))
                .map(SectionKey::Custom),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> PortfolioDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn description_bullets_are_normalized() {
        let lines = render_description(Some("- one\r\n\r\n* two\n• three\nplain  "));
        assert_eq!(lines, vec!["• one", "• two", "• three", "plain"]);
        assert!(render_description(None).is_empty());
    }

    #[test]
    fn placeholders_fill_missing_titles() {
        let normalized = normalize(&doc(json!({
            "experiences": [{"position": "Engineer", "start_date": "2020"}],
            "educations": [{"degree": "BSc", "end_year": "2019"}],
            "customSections": [{"id": "talks", "section_name": "Talks", "items": [{}]}]
        })));
        assert_eq!(normalized.experiences[0].title, "Company");
        assert_eq!(
            normalized.experiences[0].date_line.as_deref(),
            Some("2020 - Present")
        );
        assert_eq!(normalized.educations[0].title, "University");
        assert_eq!(normalized.educations[0].date_line.as_deref(), Some("- 2019"));
        assert_eq!(normalized.custom_sections[0].items[0].title, "Untitled Item");
    }

    #[test]
    fn personal_info_emptiness_rule() {
        let empty = normalize(&doc(json!({"personalInfo": {"location": "Berlin"}})));
        assert!(empty.personal.is_none());
        assert!(empty.is_empty());

        let link_only = normalize(&doc(json!({
            "personalInfo": {"custom_links": [{"url": "not a url", "icon": "github"}]}
        })));
        let personal = link_only.personal.unwrap();
        assert!(personal.links.is_empty());

        let resume_only = normalize(&doc(json!({"personalInfo": {"cvUrl": "/p77/cv.pdf"}})));
        assert_eq!(
            resume_only.personal.unwrap().resume.unwrap().url,
            "/p77/cv.pdf"
        );
    }

    #[test]
    fn links_are_absolutized_or_dropped() {
        let normalized = normalize(&doc(json!({
            "personalInfo": {"full_name": "Jane Doe", "custom_links": [
                {"url": "janedoe", "icon": "github", "title": "GitHub"},
                {"url": "", "icon": "x", "title": "X"},
                {"url": "example.com", "icon": "unknown"}
            ]}
        })));
        let personal = normalized.personal.unwrap();
        assert_eq!(personal.initials(), "JD");
        assert_eq!(personal.links.len(), 2);
        assert_eq!(personal.links[0].url, "https://github.com/janedoe");
        assert_eq!(personal.links[1].url, "https://example.com");
        assert_eq!(personal.links[1].title, "Website");
    }

    #[test]
    fn skills_skip_blank_names_and_dedupe_by_id() {
        let normalized = normalize(&doc(json!({
            "userTechnologies": [
                {"id": "1", "display_name": "Java"},
                {"id": "2", "display_name": "  "},
                {"id": "3", "display_name": "Rust"},
                {"id": "1", "display_name": "Kotlin", "logo_type": "custom_upload", "logo_data": "https://cdn/k.svg"},
                {"display_name": "Go", "logo_type": "default", "logo_data": "ignored"}
            ]
        })));
        let names: Vec<_> = normalized
            .skills
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Kotlin", "Rust", "Go"]);
        assert_eq!(
            normalized.skills[0].logo_override.as_deref(),
            Some("https://cdn/k.svg")
        );
        assert_eq!(normalized.skills[2].logo_override, None);
    }

    #[test]
    fn project_technologies_are_capped() {
        let normalized = normalize(&doc(json!({
            "projects": [{
                "name": "App",
                "technology_names": ["A", "B", "C", "D", "E", "F", "G"],
                "technology_details": [{"name": "B", "displayName": "Bee", "logoType": "svg_version", "logoData": "/icons/b/b-line.svg"}]
            }]
        })));
        let card = &normalized.projects[0];
        assert_eq!(card.technologies.len(), 5);
        assert_eq!(card.hidden_technologies, 2);
        assert_eq!(card.technologies[1].display_name, "Bee");
        assert_eq!(
            card.technologies[1].logo_override.as_deref(),
            Some("/icons/b/b-line.svg")
        );
    }

    #[test]
    fn blank_technology_names_do_not_count_toward_the_cap() {
        let normalized = normalize(&doc(json!({
            "projects": [{
                "name": "App",
                "technology_names": ["A", " ", "B", "C", "", "D", "E", "F"]
            }]
        })));
        let card = &normalized.projects[0];
        let shown: Vec<&str> = card.technologies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(shown, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(card.hidden_technologies, 1);
    }

    #[test]
    fn default_order_appends_custom_sections() {
        let normalized = normalize(&doc(json!({
            "customSections": [
                {"id": "talks", "items": [{"primaryTitle": "Keynote"}]},
                {"id": "awards", "items": []}
            ]
        })));
        let keys: Vec<_> = normalized
            .section_order
            .iter()
            .map(|k| k.as_str().to_string())
            .collect();
        assert_eq!(
            keys,
            vec!["personal", "experience", "education", "projects", "skills", "talks", "awards"]
        );
        assert!(normalized.custom_section("awards").is_none());
        assert_eq!(normalized.custom_section("talks").unwrap().name, "talks");
    }

    #[test]
    fn explicit_order_is_kept() {
        let normalized = normalize(&doc(json!({"sectionOrder": ["skills", " ", "personal"]})));
        assert_eq!(
            normalized.section_order,
            vec![SectionKey::Skills, SectionKey::Personal]
        );
    }
}
