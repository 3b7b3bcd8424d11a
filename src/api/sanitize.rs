// api/sanitize.rs - allowlist HTML filter for user-supplied text
//
// Tags on the allowlist are rebuilt with their allowlisted attributes only.
// Every other tag is HTML-escaped in place, so the user's text survives as
// inert characters. Text between tags is left alone apart from stray `<`/`>`;
// `&` is never re-encoded, which keeps the filter idempotent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9]*)((?:[^<>"']|"[^"]*"|'[^']*')*)>"#).unwrap()
});
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Attributes kept on an allowlisted tag; `None` for tags that get escaped
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        "b" | "i" | "u" | "s" | "em" | "strong" | "small" | "mark" | "del" | "ins" | "sub"
        | "sup" | "code" | "pre" | "blockquote" | "p" | "br" | "hr" | "ul" | "ol" | "li"
        | "span" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &[],
        _ => return None,
    };
    Some(attrs)
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Relative URLs pass; absolute ones need an allowlisted scheme
fn is_safe_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match compact.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => URL_SCHEMES.contains(&scheme),
        _ => true,
    }
}

fn rebuild_tag(closing: bool, name: &str, attrs: &str, allowed: &[&str]) -> String {
    if closing {
        return format!("</{}>", name);
    }

    let mut tag = format!("<{}", name);
    for attr in ATTR_RE.captures_iter(attrs) {
        let attr_name = attr[1].to_ascii_lowercase();
        if !allowed.contains(&attr_name.as_str()) {
            continue;
        }
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map_or("", |m| m.as_str());
        if matches!(attr_name.as_str(), "href" | "src") && !is_safe_url(value) {
            continue;
        }
        tag.push_str(&format!(" {}=\"{}\"", attr_name, escape_attribute(value)));
    }
    if attrs.trim_end().ends_with('/') {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

fn filter_tag(caps: &Captures<'_>) -> String {
    let name = caps[2].to_ascii_lowercase();
    match allowed_attributes(&name) {
        Some(allowed) => rebuild_tag(!caps[1].is_empty(), &name, &caps[3], allowed),
        None => escape_text(&caps[0]),
    }
}

/// Neutralize executable markup in user-supplied text.
///
/// `<script>` and any other non-allowlisted tag is escaped to `&lt;script&gt;`
/// with its content kept; event handlers and `javascript:` URLs are removed
/// from allowlisted tags such as `<img>` and `<strong>`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(input) {
        let Some(tag) = caps.get(0) else { continue };
        out.push_str(&escape_text(&input[last..tag.start()]));
        out.push_str(&filter_tag(&caps));
        last = tag.end();
    }
    out.push_str(&escape_text(&input[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(sanitize("Christmas"), "Christmas");
        assert_eq!(sanitize("I exercised..."), "I exercised...");
        assert_eq!(sanitize("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(sanitize("fish &amp; chips"), "fish &amp; chips");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn script_tags_are_escaped_with_their_text() {
        let cleaned = sanitize(r#"Naughty naughty very naughty <script>alert("xss");</script>"#);
        assert_eq!(
            cleaned,
            r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#
        );

        assert_eq!(
            sanitize("<SCRIPT src=x.js></SCRIPT>"),
            "&lt;SCRIPT src=x.js&gt;&lt;/SCRIPT&gt;"
        );
        assert_eq!(sanitize("<style>p{}</style>"), "&lt;style&gt;p{}&lt;/style&gt;");
    }

    #[test]
    fn event_handlers_are_removed_but_markup_survives() {
        let cleaned = sanitize(
            r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#,
        );
        assert_eq!(
            cleaned,
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
        );
    }

    #[test]
    fn script_urls_are_dropped() {
        assert_eq!(
            sanitize(r#"<a href="javascript:alert(1)" title='hi'>x</a>"#),
            r#"<a title="hi">x</a>"#
        );
        assert_eq!(
            sanitize(r#"<a href=" JaVa script:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize(r#"<a href="/api/gratitudes/1">x</a>"#),
            r#"<a href="/api/gratitudes/1">x</a>"#
        );
    }

    #[test]
    fn stray_angle_brackets_are_escaped() {
        assert_eq!(sanitize("1 < 2 and 3 > 2"), "1 &lt; 2 and 3 &gt; 2");
        assert_eq!(sanitize("<3 you"), "&lt;3 you");
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        let inputs = [
            r#"Naughty naughty very naughty <script>alert("xss");</script>"#,
            r#"<img src="a.png" alt='"quoted"' onload=x><br/>"#,
            "Tom & Jerry <3",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {}", input);
        }
    }
}
