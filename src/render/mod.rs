//! HTML rendering for a normalized portfolio.
//!
//! [`render_sections`] walks the section order and renders each non-empty
//! section into a [`RenderedBlock`]; [`render_page`] wraps the result in the
//! page shell. Nothing in here can fail: every default was settled by
//! [`crate::document::normalize`].

use crate::catalog::TechnologyIndex;
use crate::config::{BuildMode, LayoutConfig, SiteConfig};
use crate::document::{
    CustomBlock, NormalizedPortfolio, Personal, ProjectCard, SectionItem, SectionKey, Skill,
};
use crate::logo::LogoUrls;
use maud::Markup;
use tracing::debug;

mod layouts;
mod page;
mod sections;

pub use page::render_page;

/// Everything the renderers need besides the portfolio itself.
#[derive(Clone, Debug)]
pub struct RenderContext<'a> {
    pub index: &'a TechnologyIndex,
    pub logos: LogoUrls,
    pub layout: LayoutConfig,
    /// Save-as name for the resume download when the document sets none.
    pub resume_file_name: String,
    /// Prefix for site assets such as the stylesheet.
    pub base_path: String,
    pub site_title: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(index: &'a TechnologyIndex, config: &SiteConfig, mode: BuildMode) -> Self {
        Self {
            index,
            logos: config.logo_urls(mode),
            layout: config.layout,
            resume_file_name: config.site.resume_file_name.clone(),
            base_path: config.base_path(mode),
            site_title: config.site.title.clone(),
        }
    }
}

/// One rendered section, tagged with the key that produced it.
#[derive(Clone, Debug)]
pub struct RenderedBlock {
    pub key: SectionKey,
    pub markup: Markup,
}

/// Content of `<main>`: the rendered sections, or the empty-page placeholder.
#[derive(Clone, Debug)]
pub enum PageBody {
    Placeholder(Markup),
    Sections(Vec<RenderedBlock>),
}

impl PageBody {
    /// Number of rendered sections; zero for the placeholder.
    pub fn block_count(&self) -> usize {
        match self {
            PageBody::Placeholder(_) => 0,
            PageBody::Sections(blocks) => blocks.len(),
        }
    }
}

/// A section resolved against the portfolio, holding only non-empty data.
enum Section<'p> {
    Personal(&'p Personal),
    Experience(&'p [SectionItem]),
    Education(&'p [SectionItem]),
    Projects(&'p [ProjectCard]),
    Skills(&'p [Skill]),
    Custom(&'p CustomBlock),
}

impl<'p> Section<'p> {
    fn resolve(portfolio: &'p NormalizedPortfolio, key: &SectionKey) -> Option<Self> {
        let section = match key {
            SectionKey::Personal => Section::Personal(portfolio.personal.as_ref()?),
            SectionKey::Experience => Section::Experience(non_empty(&portfolio.experiences)?),
            SectionKey::Education => Section::Education(non_empty(&portfolio.educations)?),
            SectionKey::Projects => Section::Projects(non_empty(&portfolio.projects)?),
            SectionKey::Skills => Section::Skills(non_empty(&portfolio.skills)?),
            SectionKey::Custom(id) => Section::Custom(portfolio.custom_section(id)?),
        };
        Some(section)
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Markup {
        match self {
            Section::Personal(personal) => sections::personal(personal, ctx),
            Section::Experience(items) => {
                layouts::item_section("experience", "Work Experience", ctx.layout.experience, items)
            }
            Section::Education(items) => {
                layouts::item_section("education", "Education", ctx.layout.education, items)
            }
            Section::Projects(projects) => sections::projects(projects, ctx),
            Section::Skills(skills) => sections::skills(skills, ctx),
            Section::Custom(block) => {
                layouts::item_section(&block.id, &block.name, block.layout, &block.items)
            }
        }
    }
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    (!items.is_empty()).then_some(items)
}

/// Render the portfolio's sections in order.
///
/// Sections with nothing to show and keys naming no custom section are left
/// out. A portfolio with no content at all yields the placeholder instead.
pub fn render_sections(portfolio: &NormalizedPortfolio, ctx: &RenderContext<'_>) -> PageBody {
    if portfolio.is_empty() {
        return PageBody::Placeholder(page::placeholder());
    }

    let blocks = portfolio
        .section_order
        .iter()
        .filter_map(|key| match Section::resolve(portfolio, key) {
            Some(section) => Some(RenderedBlock {
                key: key.clone(),
                markup: section.render(ctx),
            }),
            None => {
                debug!(section = key.as_str(), "skipping empty or unknown section");
                None
            }
        })
        .collect();
    PageBody::Sections(blocks)
}
