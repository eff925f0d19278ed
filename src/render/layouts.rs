//! Item-list layouts shared by experience, education and custom sections.

use crate::document::{LayoutKind, Link, SectionItem};
use maud::{Markup, html};

/// Description lines joined with `<br>`.
pub(super) fn description(lines: &[String]) -> Markup {
    html! {
        @if !lines.is_empty() {
            p.description {
                @for (i, line) in lines.iter().enumerate() {
                    @if i > 0 { br; }
                    (line)
                }
            }
        }
    }
}

pub(super) fn links(links: &[Link]) -> Markup {
    html! {
        @if !links.is_empty() {
            div.links {
                @for link in links {
                    a.link href=(link.url) target="_blank" rel="noopener noreferrer"
                        title=(link.title) data-icon=(link.icon.key) {
                        @if let Some(path) = link.icon.svg_path {
                            svg.link-icon viewBox="0 0 24 24" aria-hidden="true" {
                                path d=(path);
                            }
                        } @else {
                            span.link-icon aria-hidden="true" {}
                        }
                        span { (link.title) }
                    }
                }
            }
        }
    }
}

pub(super) fn item_section(id: &str, heading: &str, layout: LayoutKind, items: &[SectionItem]) -> Markup {
    let body = match layout {
        LayoutKind::Card => card(items),
        LayoutKind::Timeline => timeline(items),
        LayoutKind::List => list(items),
    };
    html! {
        section.items id=(id) {
            h2 { (heading) }
            (body)
        }
    }
}

fn header(item: &SectionItem) -> Markup {
    html! {
        div.item-header {
            @if let Some(logo) = &item.logo_url {
                img.item-logo src=(logo) alt=(item.title) loading="lazy";
            }
            div {
                h3 { (item.title) }
                @if let Some(subtitle) = &item.subtitle {
                    p.subtitle { (subtitle) }
                }
            }
        }
    }
}

fn meta(item: &SectionItem) -> Markup {
    html! {
        @if item.date_line.is_some() || item.location.is_some() {
            p.meta {
                @if let Some(date) = &item.date_line {
                    span.date { (date) }
                }
                @if let Some(location) = &item.location {
                    span.location { (location) }
                }
            }
        }
    }
}

fn card(items: &[SectionItem]) -> Markup {
    html! {
        div.card-layout {
            @for item in items {
                article.card {
                    (header(item))
                    (meta(item))
                    (description(&item.description))
                    (links(&item.links))
                }
            }
        }
    }
}

fn timeline(items: &[SectionItem]) -> Markup {
    html! {
        ol.timeline {
            @for item in items {
                li.timeline-item {
                    span.timeline-dot aria-hidden="true" {}
                    div.timeline-content {
                        @if let Some(date) = &item.date_line {
                            span.date { (date) }
                        }
                        (header(item))
                        @if let Some(location) = &item.location {
                            p.location { (location) }
                        }
                        (description(&item.description))
                        (links(&item.links))
                    }
                }
            }
        }
    }
}

fn list(items: &[SectionItem]) -> Markup {
    html! {
        ul.list-layout {
            @for item in items {
                li {
                    div.list-row {
                        strong { (item.title) }
                        @if let Some(subtitle) = &item.subtitle {
                            span.subtitle { (subtitle) }
                        }
                        @if let Some(date) = &item.date_line {
                            span.date { (date) }
                        }
                    }
                    (description(&item.description))
                    (links(&item.links))
                }
            }
        }
    }
}
