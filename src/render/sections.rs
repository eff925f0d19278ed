use super::RenderContext;
use super::layouts::{description, links};
use crate::document::{Personal, ProjectCard, Skill};
use crate::logo::TechLogo;
use maud::{Markup, html};

/// Swaps a broken icon for its initial-letter glyph.
const GLYPH_ON_ERROR: &str = "this.replaceWith(Object.assign(document.createElement('span'),{className:'tech-glyph',textContent:this.dataset.initial}))";

pub(super) fn tech_logo(logo: &TechLogo, name: &str, class: &str) -> Markup {
    let initial = crate::logo::glyph_for(name).to_string();
    match logo {
        TechLogo::Icon { url } => html! {
            img class=(class) src=(url) alt=(name) loading="lazy"
                data-initial=(initial) onerror=(GLYPH_ON_ERROR);
        },
        TechLogo::Glyph { initial } => html! {
            span.tech-glyph aria-hidden="true" { (initial.to_string()) }
        },
    }
}

pub(super) fn personal(personal: &Personal, ctx: &RenderContext<'_>) -> Markup {
    let name = personal.name.as_deref().unwrap_or_default();
    html! {
        section.personal #personal {
            div.avatar {
                @if let Some(avatar) = &personal.avatar_url {
                    img src=(avatar) alt=(name);
                } @else {
                    span.initials { (personal.initials()) }
                }
            }
            @if let Some(name) = &personal.name {
                h1 { (name) }
            }
            @if let Some(title) = &personal.title {
                p.title { (title) }
            }
            @if let Some(location) = &personal.location {
                p.location { (location) }
            }
            div.contact {
                @if let Some(email) = &personal.email {
                    a.button href={ "mailto:" (email) } { "Email" }
                }
                @if let Some(resume) = &personal.resume {
                    button.button.resume type="button"
                        data-url=(resume.url)
                        data-file-name=(resume.file_name.as_deref().unwrap_or(&ctx.resume_file_name))
                        onclick="devfolioDownloadResume(this)" { "Resume" }
                }
                (links(&personal.links))
            }
            @if let Some(bio) = &personal.bio {
                p.bio { (bio) }
            }
        }
    }
}

pub(super) fn projects(projects: &[ProjectCard], ctx: &RenderContext<'_>) -> Markup {
    html! {
        section.projects #projects {
            h2 { "Projects" }
            div.project-grid {
                @for project in projects {
                    article.project {
                        @if let Some(name) = &project.name {
                            h3 { (name) }
                        }
                        (description(&project.description))
                        @if let Some(picture) = &project.picture_url {
                            img.project-picture src=(picture)
                                alt=(project.name.as_deref().unwrap_or("Project image"));
                        }
                        @if !project.technologies.is_empty() {
                            div.project-technologies {
                                @for tech in &project.technologies {
                                    @let logo = ctx.logos.tech_logo(
                                        ctx.index,
                                        &tech.name,
                                        tech.lookup_name.as_deref(),
                                        tech.logo_override.as_deref(),
                                    );
                                    span.technology {
                                        (tech_logo(&logo, &tech.name, "tech-logo small"))
                                        span { (tech.display_name) }
                                    }
                                }
                                @if project.hidden_technologies > 0 {
                                    span.badge { "+" (project.hidden_technologies) " more" }
                                }
                            }
                        }
                        (links(&project.links))
                    }
                }
            }
        }
    }
}

/// Skills whose display name has a catalog icon, or that carry an override,
/// go in the logo grid; the rest are listed as text under "Other Technologies".
/// The lookup name only picks the icon once a skill is in the grid.
pub(super) fn skills(skills: &[Skill], ctx: &RenderContext<'_>) -> Markup {
    let (with_logo, without_logo): (Vec<&Skill>, Vec<&Skill>) =
        skills.iter().partition(|skill| {
            skill.logo_override.is_some() || ctx.index.has_logo(&skill.display_name)
        });

    html! {
        section.skills #skills {
            h2 { "Skills" }
            @if !with_logo.is_empty() {
                div.skill-grid {
                    @for skill in &with_logo {
                        @let logo = ctx.logos.tech_logo(
                            ctx.index,
                            &skill.display_name,
                            skill.lookup_name.as_deref(),
                            skill.logo_override.as_deref(),
                        );
                        div.skill {
                            (tech_logo(&logo, &skill.display_name, "tech-logo"))
                            span { (skill.display_name) }
                        }
                    }
                }
            }
            @if !without_logo.is_empty() {
                div.other-technologies {
                    h3 { "Other Technologies" }
                    ul {
                        @for skill in &without_logo {
                            li { (skill.display_name) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TechnologyIndex;
    use crate::config::{BuildMode, SiteConfig};

    fn skill(name: &str, lookup: Option<&str>, logo: Option<&str>) -> Skill {
        Skill {
            id: None,
            display_name: name.to_string(),
            lookup_name: lookup.map(str::to_string),
            logo_override: logo.map(str::to_string),
        }
    }

    #[test]
    fn skills_split_by_logo_availability() {
        let index = TechnologyIndex::bundled().unwrap();
        let ctx = RenderContext::new(&index, &SiteConfig::default(), BuildMode::Development);
        let html = skills(
            &[
                skill("Rust", None, None),
                skill("REST APIs", None, None),
                skill("Internal DSL", None, Some("https://cdn.example.com/dsl.png")),
            ],
            &ctx,
        )
        .into_string();
        assert!(html.contains("/icons/rust/rust-original.svg"));
        assert!(html.contains("https://cdn.example.com/dsl.png"));
        let other = &html[html.find("Other Technologies").unwrap()..];
        assert!(other.contains("REST APIs"));
        assert!(!other.contains("Rust<"));
    }

    #[test]
    fn grid_placement_follows_display_name() {
        let index = TechnologyIndex::bundled().unwrap();
        let ctx = RenderContext::new(&index, &SiteConfig::default(), BuildMode::Development);
        let html = skills(
            &[
                skill("My Database", Some("postgresql"), None),
                skill("Python", Some("unknown-tool"), None),
            ],
            &ctx,
        )
        .into_string();
        let split = html.find("Other Technologies").unwrap();
        let (grid, other) = html.split_at(split);
        assert!(other.contains("My Database"));
        assert!(!grid.contains("My Database"));
        assert!(grid.contains("Python"));
    }

    #[test]
    fn glyph_markup_for_unknown_logo() {
        let html = tech_logo(&TechLogo::Glyph { initial: 'Q' }, "qux", "tech-logo").into_string();
        assert!(html.contains("tech-glyph"));
        assert!(html.contains('Q'));
    }
}
