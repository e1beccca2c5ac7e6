//! Page shell around a rendered post body

use markdown_weaver_escape::escape_html_body_text;

const CONTAINER_CLASS: &str =
    "z-10 w-full max-w-5xl items-center justify-between font-mono text-sm lg:flex";

/// Wrap rendered post HTML in a full document.
///
/// `title` is `None` when no post was found; the header is then empty.
pub fn render_post_page(title: Option<&str>, body_html: &str) -> String {
    let mut html = String::with_capacity(body_html.len() + 256);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    html.push_str("<title>");
    if let Some(title) = title {
        let _ = escape_html_body_text(&mut html, title);
    }
    html.push_str("</title>\n</head>\n<body>\n");
    html.push_str("<div class=\"");
    html.push_str(CONTAINER_CLASS);
    html.push_str("\">\n<header class=\"App-header\">\n");
    html.push_str(body_html);
    html.push_str("</header>\n</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wraps_body() {
        let page = render_post_page(Some("Hello & welcome"), "<p>Body</p>\n");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Hello &amp; welcome</title>"));
        assert!(page.contains("<header class=\"App-header\">\n<p>Body</p>\n</header>"));
    }

    #[test]
    fn test_page_without_post_has_empty_header() {
        let page = render_post_page(None, "");
        assert!(page.contains("<title></title>"));
        assert!(page.contains("<header class=\"App-header\">\n</header>"));
    }
}
