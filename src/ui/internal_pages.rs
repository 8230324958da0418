//! HTML for the pages served over the `kyo` custom protocol.
//!
//! The page hooks are inlined because initialization scripts do not run on
//! custom-protocol pages under WebView2.

use std::borrow::Cow;

use wry::http::{Response, StatusCode};

use crate::types::command::InternalPage;

const PAGE_HOOKS_JS: &str = include_str!("../../resources/ui/page_hooks.js");
const INTERNAL_CSS: &str = include_str!("../../resources/ui/internal.css");
const INTERNAL_JS: &str = include_str!("../../resources/ui/internal.js");
const BOOKMARKS_JS: &str = include_str!("../../resources/ui/bookmarks.js");
const DOWNLOADS_JS: &str = include_str!("../../resources/ui/downloads.js");
const SHORTCUTS_JS: &str = include_str!("../../resources/ui/shortcuts.js");

fn page_shell(title: &str, body: &str, page_js: &str) -> String {
    let assets = INTERNAL_CSS.len() + INTERNAL_JS.len() + PAGE_HOOKS_JS.len();
    let mut html = String::with_capacity(body.len() + page_js.len() + assets + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>");
    html.push_str(title);
    html.push_str("</title><style>");
    html.push_str(INTERNAL_CSS);
    html.push_str("</style></head><body><main>");
    html.push_str(body);
    html.push_str("</main><script>");
    html.push_str(PAGE_HOOKS_JS);
    html.push_str("</script><script>");
    html.push_str(INTERNAL_JS);
    html.push_str("</script>");
    if !page_js.is_empty() {
        html.push_str("<script>");
        html.push_str(page_js);
        html.push_str("</script>");
    }
    html.push_str("</body></html>");
    html
}

fn about_body() -> String {
    format!(
        "<div class=\"about\"><h1>KyoBrowser</h1>\
         <p>Version {}</p>\
         <p>A tabbed browser shell over the platform web engine.</p>\
         <p>Bookmarks are kept in <kbd>bookmarks.json</kbd> in the data directory.</p></div>",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn render(page: InternalPage) -> String {
    let title = page.title();
    match page {
        InternalPage::Bookmarks => page_shell(
            title,
            &format!("<h1>{}</h1><div id=\"list\"></div>", title),
            BOOKMARKS_JS,
        ),
        InternalPage::Downloads => page_shell(
            title,
            &format!(
                "<h1>{}<span class=\"spacer\"></span>\
                 <button id=\"clear\">Clear finished</button></h1>\
                 <div id=\"list\"></div>",
                title
            ),
            DOWNLOADS_JS,
        ),
        InternalPage::Shortcuts => page_shell(
            title,
            &format!("<h1>{}</h1><div id=\"list\"></div>", title),
            SHORTCUTS_JS,
        ),
        InternalPage::About => page_shell(title, &about_body(), ""),
    }
}

/// Custom protocol handler body: the page for `path`, or a 404.
pub fn respond(path: &str) -> Response<Cow<'static, [u8]>> {
    let (status, body) = match InternalPage::from_path(path) {
        Some(page) => (StatusCode::OK, render(page)),
        None => (
            StatusCode::NOT_FOUND,
            page_shell("Not found", "<h1>Page not found</h1>", ""),
        ),
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Cow::Owned(body.into_bytes()))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&[][..])))
}
