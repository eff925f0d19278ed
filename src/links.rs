//! User-supplied links: absolutization and the link-icon table.

/// Turn a user link value into something usable as an `href`.
///
/// Accepts absolute URLs, `blob:` URLs and root-relative paths as-is, prefixes
/// dotted hosts with `https://`, and treats a bare handle as a GitHub user.
/// Returns `None` when nothing sensible can be built.
///
/// The LinkedIn (`linkedin.com/in/`) and X (`x.com/`) handle branches below can
/// never fire: every token they accept is already taken by the GitHub branch.
/// The precedence is kept as-is for compatibility with existing documents.
pub fn ensure_absolute_url(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    if url.starts_with("blob:") {
        return Some(url.to_string());
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.to_string());
    }
    if url.starts_with('/') {
        return Some(url.to_string());
    }
    if url.contains('.') {
        return Some(format!("https://{url}"));
    }
    if is_handle(url, true) {
        return Some(format!("https://github.com/{url}"));
    }
    if is_handle(url, true) && url.len() > 3 {
        return Some(format!("https://linkedin.com/in/{url}"));
    }
    if is_handle(url, false) && url.len() > 1 {
        return Some(format!("https://x.com/{url}"));
    }
    None
}

fn is_handle(value: &str, allow_dash: bool) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || (allow_dash && c == '-'))
}

/// A known link icon: its key, button label and optional inline SVG path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkIcon {
    pub key: &'static str,
    pub label: &'static str,
    /// Brand glyphs drawn inline; the rest are drawn from the stylesheet by key.
    pub svg_path: Option<&'static str>,
}

const X_PATH: &str = "M18.244 2.25h3.308l-7.227 8.26 8.502 11.24H16.17l-5.214-6.817L4.99 21.75H1.68l7.73-8.835L1.254 2.25H8.08l4.713 6.231zm-1.161 17.52h1.833L7.084 4.126H5.117z";
const TIKTOK_PATH: &str = "M12.53.02C13.84 0 15.14.01 16.44 0c.08 1.53.63 3.09 1.75 4.17 1.12 1.11 2.7 1.62 4.24 1.79v4.03c-1.44-.05-2.89-.35-4.2-.97-.57-.26-1.1-.59-1.62-.93-.01 2.92.01 5.84-.02 8.75-.08 1.4-.54 2.79-1.35 3.94-1.31 1.92-3.58 3.17-5.91 3.21-1.43.08-2.86-.31-4.08-1.03-2.02-1.19-3.44-3.37-3.65-5.71-.02-.5-.03-1-.01-1.49.18-1.9 1.12-3.72 2.58-4.96 1.66-1.44 3.98-2.13 6.15-1.72.02 1.48-.04 2.96-.04 4.44-.99-.32-2.15-.23-3.02.37-.63.41-1.11 1.04-1.36 1.75-.21.51-.15 1.07-.14 1.61.24 1.64 1.82 3.02 3.5 2.87 1.12-.01 2.19-.66 2.77-1.61.19-.33.4-.67.41-1.06.1-1.79.06-3.57.07-5.36.01-4.03-.01-8.05.02-12.07z";
const TWITCH_PATH: &str = "M11.571 4.714h1.715v5.143H11.57zm4.715 0H18v5.143h-1.714zM6 0L1.714 4.286v15.428h5.142V24l4.286-4.286h3.428L22.286 12V0zm14.571 11.143l-3.428 3.428h-3.429l-3 3v-3H6.857V1.714h13.714Z";
const GLOBE_PATH: &str = "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm0 0c2.5 2.7 4 6.2 4 10s-1.5 7.3-4 10m0-20C9.5 4.7 8 8.2 8 12s1.5 7.3 4 10M2 12h20";

const fn icon(key: &'static str, label: &'static str, svg_path: Option<&'static str>) -> LinkIcon {
    LinkIcon {
        key,
        label,
        svg_path,
    }
}

/// Every predefined link icon, social first, then project links.
pub const LINK_ICONS: &[LinkIcon] = &[
    icon("website", "Website", Some(GLOBE_PATH)),
    icon("github", "GitHub", None),
    icon("linkedin", "LinkedIn", None),
    icon("x", "X", Some(X_PATH)),
    icon("instagram", "Instagram", None),
    icon("youtube", "YouTube", None),
    icon("tiktok", "TikTok", Some(TIKTOK_PATH)),
    icon("discord", "Discord", None),
    icon("twitch", "Twitch", Some(TWITCH_PATH)),
    icon("reddit", "Reddit", None),
    icon("demo", "Demo", None),
    icon("video", "Video", None),
    icon("slides", "Slides", None),
    icon("documentation", "Docs", None),
    icon("design", "Design", None),
    icon("blog", "Blog", None),
    icon("portfolio", "Portfolio", None),
    icon("certificate", "Certificate", None),
];

/// Icon for a link key; unknown keys get the website globe.
pub fn link_icon(key: &str) -> LinkIcon {
    LINK_ICONS
        .iter()
        .find(|icon| icon.key == key)
        .copied()
        .unwrap_or(LINK_ICONS[0])
}
