use ego_tree::NodeRef;
use scraper::{Html, node::{Element, Node}};

const DEFAULT_ALT: &str = "文章图片";
const RESPONSIVE_STYLE: &str = "max-width:100%;height:auto;display:block;";

/// Lazy-load attribute names checked in preference order before the generic
/// data-*src* scan.
const LAZY_SRC_ATTRS: &[&str] = &["data-src", "data-original", "data-croporisrc", "data-backsrc"];

/// class/id values containing one of these survive attribute pruning.
const IMAGE_HINTS: &[&str] = &["img", "image", "photo", "pic"];

/// class/id markers for subtrees dropped before measuring container content.
const NOISE_MARKERS: &[&str] = &["comment", "share", "footer", "advert"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    /// Drop script/style and comment/share/footer/advert subtrees, keep the
    /// rest verbatim. Used to measure candidate containers.
    StripNoise,
    /// Full normalization: image fixes, attribute pruning, script/style
    /// removal.
    Rewrite,
}

/// Cleans a content fragment: resolves lazy-load image sources, applies
/// default alt text and responsive styling, removes script/style, prunes
/// noise attributes and collapses whitespace.
///
/// Never fails; markup no step matches passes through unchanged. Running it
/// on its own output is a no-op.
pub fn normalize(fragment: &str) -> String {
    render(fragment, Mode::Rewrite)
}

/// Removes script/style elements and noise-marked subtrees without touching
/// anything else.
pub(crate) fn strip_noise(fragment: &str) -> String {
    render(fragment, Mode::StripNoise)
}

fn render(fragment: &str, mode: Mode) -> String {
    let doc = Html::parse_fragment(fragment);
    let mut out = String::with_capacity(fragment.len());
    for child in doc.tree.root().children() {
        // parse_fragment wraps content in a synthetic <html> element
        if let Node::Element(el) = child.value() {
            if el.name() == "html" {
                for inner in child.children() {
                    serialize_node(inner, &mut out, mode);
                }
                continue;
            }
        }
        serialize_node(child, &mut out, mode);
    }
    out.trim().to_string()
}

fn serialize_node(node: NodeRef<'_, Node>, out: &mut String, mode: Mode) {
    match node.value() {
        Node::Text(text) => {
            let raw: &str = &text.text;
            if let Some(collapsed) = collapse_text(raw) {
                out.push_str(&escape_html(&collapsed));
            }
        }
        Node::Element(el) => write_element(node, el, out, mode),
        Node::Document | Node::Fragment => {
            for child in node.children() {
                serialize_node(child, out, mode);
            }
        }
        Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
    }
}

fn write_element(node: NodeRef<'_, Node>, el: &Element, out: &mut String, mode: Mode) {
    let name = el.name();
    if matches!(name, "script" | "style") {
        return;
    }
    if mode == Mode::StripNoise && is_noise(el) {
        return;
    }

    let attrs: Vec<(String, String)> = match mode {
        Mode::Rewrite if name == "img" => image_attrs(el),
        Mode::Rewrite => el
            .attrs()
            .filter_map(|(n, v)| keep_attr(n, v))
            .collect(),
        Mode::StripNoise => el
            .attrs()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
    };

    out.push('<');
    out.push_str(name);
    for (attr_name, value) in &attrs {
        out.push(' ');
        out.push_str(attr_name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    for child in node.children() {
        serialize_node(child, out, mode);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Rebuilds an image's attribute list: src resolved from lazy-load
/// attributes when absent, default alt, responsive style, then whatever
/// survives pruning.
fn image_attrs(el: &Element) -> Vec<(String, String)> {
    let src = el
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| lazy_source(el));

    let alt = el.attr("alt").unwrap_or(DEFAULT_ALT).to_string();

    let style = match el.attr("style") {
        Some(existing) if existing.contains(RESPONSIVE_STYLE) => existing.to_string(),
        Some(existing) => {
            let existing = existing.trim();
            if existing.is_empty() {
                RESPONSIVE_STYLE.to_string()
            } else if existing.ends_with(';') {
                format!("{}{}", existing, RESPONSIVE_STYLE)
            } else {
                format!("{};{}", existing, RESPONSIVE_STYLE)
            }
        }
        None => RESPONSIVE_STYLE.to_string(),
    };

    let mut attrs: Vec<(String, String)> = Vec::new();
    if let Some(src) = src {
        attrs.push(("src".to_string(), src));
    }
    attrs.push(("alt".to_string(), alt));
    attrs.push(("style".to_string(), style));
    for (name, value) in el.attrs() {
        if matches!(name, "src" | "alt" | "style") {
            continue;
        }
        if let Some(kept) = keep_attr(name, value) {
            attrs.push(kept);
        }
    }
    attrs
}

fn lazy_source(el: &Element) -> Option<String> {
    for name in LAZY_SRC_ATTRS {
        if let Some(value) = el.attr(name) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    el.attrs()
        .find(|(name, value)| {
            name.starts_with("data-") && name.contains("src") && !value.trim().is_empty()
        })
        .map(|(_, value)| value.trim().to_string())
}

/// Pruning rules: all data-* attributes go (their image sources were already
/// consumed), class/id survive only with an image-related value, everything
/// else passes through.
fn keep_attr(name: &str, value: &str) -> Option<(String, String)> {
    if name.starts_with("data-") {
        return None;
    }
    if name == "class" || name == "id" {
        let lower = value.to_ascii_lowercase();
        if IMAGE_HINTS.iter().any(|hint| lower.contains(hint)) {
            return Some((name.to_string(), value.to_string()));
        }
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

fn is_noise(el: &Element) -> bool {
    if el.name() == "footer" {
        return true;
    }
    let class = el.attr("class").unwrap_or("").to_ascii_lowercase();
    let id = el.attr("id").unwrap_or("").to_ascii_lowercase();
    NOISE_MARKERS
        .iter()
        .any(|marker| class.contains(marker) || id.contains(marker))
}

/// Collapses whitespace runs to a single space; returns None for
/// whitespace-only text so nothing is emitted between adjacent tags.
fn collapse_text(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        return None;
    }
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    Some(out)
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
