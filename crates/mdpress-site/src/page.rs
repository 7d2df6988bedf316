//! Page shell assembly.
//!
//! Every generated page shares the same shell: a fixed document title, a
//! navigation link back to the site root, and the rendered body inside
//! `<main>`.

use std::fmt::Write;

use mdpress_renderer::escape_html;

/// Wrap a rendered body in the page shell.
#[must_use]
pub(crate) fn shell(title: &str, home_link: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    out.push_str("</head>\n<body>\n<main>\n");
    writeln!(
        out,
        r#"<nav><a href="{}">Home</a></nav>"#,
        escape_html(home_link)
    )
    .unwrap();
    out.push_str(body);
    out.push_str("\n</main>\n</body>\n</html>\n");
    out
}
