//! Markdown to HTML rendering for public pages.
//!
//! GitHub-flavoured extensions are enabled. Raw HTML in the source is
//! demoted to text so authors cannot inject markup or scripts.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::domain::Page;

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

fn escape_raw_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, std::iter::once(Event::Text(CowStr::Borrowed(text))));
    out
}

/// Render the article body: the title as `<h1>` followed by the content.
pub fn render_article(page: &Page) -> String {
    let heading = [
        Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        }),
        Event::Text(CowStr::Borrowed(page.title.as_ref())),
        Event::End(TagEnd::Heading(HeadingLevel::H1)),
    ];
    let body = Parser::new_ext(&page.content, markdown_options()).map(escape_raw_html);

    let mut out = String::with_capacity(page.content.len() * 2);
    html::push_html(&mut out, heading.into_iter().chain(body));
    out
}

/// Full HTML document for a published page.
pub fn render_document(page: &Page) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<main>\n<article>\n{article}</article>\n</main>\n",
            "</body>\n",
            "</html>\n",
        ),
        title = escaped(page.title.as_ref()),
        article = render_article(page),
    )
}

/// Minimal document served when no published page matches.
pub fn render_not_found() -> &'static str {
    concat!(
        "<!DOCTYPE html>\n",
        "<html lang=\"en\">\n",
        "<head><meta charset=\"utf-8\"><title>Not found</title></head>\n",
        "<body><main><h1>404</h1><p>This page could not be found.</p></main></body>\n",
        "</html>\n",
    )
}
