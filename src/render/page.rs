use super::{PageBody, RenderContext};
use crate::document::NormalizedPortfolio;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const DEFAULT_TITLE: &str = "Portfolio";

/// Fetches the resume as a blob and saves it under the button's file name;
/// any failure opens the URL in a new tab instead.
const RESUME_SCRIPT: &str = r#"
function devfolioDownloadResume(button) {
  var url = button.dataset.url;
  var fileName = button.dataset.fileName || "resume.pdf";
  fetch(url)
    .then(function (response) {
      if (!response.ok) { throw new Error(response.statusText); }
      return response.blob();
    })
    .then(function (blob) {
      var href = URL.createObjectURL(blob);
      var link = document.createElement("a");
      link.href = href;
      link.download = fileName;
      document.body.appendChild(link);
      link.click();
      link.remove();
      URL.revokeObjectURL(href);
    })
    .catch(function () {
      window.open(url, "_blank");
    });
}
"#;

pub(super) fn placeholder() -> Markup {
    html! {
        div.placeholder {
            p.placeholder-title { "Your portfolio will appear here" }
            p { "Add information to the portfolio document to start building your portfolio" }
        }
    }
}

/// Wrap a rendered body in the full HTML document.
pub fn render_page(portfolio: &NormalizedPortfolio, body: &PageBody, ctx: &RenderContext<'_>) -> Markup {
    let title = ctx
        .site_title
        .as_deref()
        .or_else(|| portfolio.personal.as_ref().and_then(|p| p.name.as_deref()))
        .unwrap_or(DEFAULT_TITLE);
    let stylesheet = format!("{}/style.css", ctx.base_path);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(stylesheet);
                script { (PreEscaped(RESUME_SCRIPT)) }
            }
            body {
                main.container {
                    @match body {
                        PageBody::Placeholder(markup) => (markup),
                        PageBody::Sections(blocks) => {
                            @for block in blocks {
                                div data-section=(block.key.as_str()) { (block.markup) }
                            }
                        },
                    }
                }
            }
        }
    }
}
