//! Asset Inlining
//!
//! Rewrites a built widget document so it no longer depends on sibling files:
//! `<script type="module" src="...">` becomes an inline module script and
//! `<link rel="stylesheet" href="...">` becomes a `<style>` block. Only
//! same-origin relative references are considered; absolute URLs and files
//! that do not exist leave the tag as it was.

use regex::Regex;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

fn script_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b([^>]*)>\s*</script\s*>").expect("script tag pattern")
    })
}

fn link_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<link\b([^>]*)>").expect("link tag pattern"))
}

fn attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("attribute pattern")
    })
}

/// Kind of external reference found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    ModuleScript,
    Stylesheet,
}

impl AssetKind {
    /// Wraps file contents in the matching inline element.
    fn wrap(self, contents: &str) -> String {
        match self {
            AssetKind::ModuleScript => format!("<script type=\"module\">\n{contents}\n</script>"),
            AssetKind::Stylesheet => format!("<style>\n{contents}\n</style>"),
        }
    }
}

/// An inlinable tag located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTag {
    /// Byte range of the whole tag
    pub range: Range<usize>,
    pub kind: AssetKind,
    /// Raw `src`/`href` value
    pub reference: String,
}

/// Lists module-script and stylesheet tags in document order.
pub fn find_asset_tags(html: &str) -> Vec<AssetTag> {
    let mut tags = Vec::new();

    for caps in script_tag().captures_iter(html) {
        let (Some(whole), Some(attrs)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let is_module = attr_value(attrs.as_str(), "type")
            .is_some_and(|value| value.eq_ignore_ascii_case("module"));
        if let (true, Some(src)) = (is_module, attr_value(attrs.as_str(), "src")) {
            tags.push(AssetTag {
                range: whole.range(),
                kind: AssetKind::ModuleScript,
                reference: src,
            });
        }
    }

    for caps in link_tag().captures_iter(html) {
        let (Some(whole), Some(attrs)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // `alternate stylesheet` is off by default in browsers, so only the
        // plain relation is inlined.
        let is_stylesheet = attr_value(attrs.as_str(), "rel")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("stylesheet"));
        if let (true, Some(href)) = (is_stylesheet, attr_value(attrs.as_str(), "href")) {
            tags.push(AssetTag {
                range: whole.range(),
                kind: AssetKind::Stylesheet,
                reference: href,
            });
        }
    }

    tags.sort_by_key(|tag| tag.range.start);
    // Malformed markup can make a link match run over a script match; keep
    // the earlier tag so ranges stay disjoint.
    let mut end = 0;
    tags.retain(|tag| {
        let disjoint = tag.range.start >= end;
        if disjoint {
            end = tag.range.end;
        }
        disjoint
    });
    tags
}

/// Returns a self-contained copy of `html`, reading referenced files from
/// `base_dir`.
pub async fn inline_assets(html: &str, base_dir: &Path) -> String {
    let mut output = String::with_capacity(html.len());
    let mut cursor = 0;

    for tag in find_asset_tags(html) {
        output.push_str(&html[cursor..tag.range.start]);

        let contents = match local_path(&tag.reference) {
            Some(relative) => tokio::fs::read_to_string(base_dir.join(&relative)).await.ok(),
            None => None,
        };
        match contents {
            Some(contents) => {
                tracing::debug!(reference = %tag.reference, kind = ?tag.kind, "inlined widget asset");
                output.push_str(&tag.kind.wrap(&contents));
            }
            None => output.push_str(&html[tag.range.clone()]),
        }

        cursor = tag.range.end;
    }

    output.push_str(&html[cursor..]);
    output
}

/// Maps a same-origin reference to a path relative to the assets directory.
fn local_path(reference: &str) -> Option<PathBuf> {
    let reference = reference.trim();
    if reference.is_empty()
        || reference.starts_with("//")
        || reference.contains("://")
        || reference.starts_with("data:")
    {
        return None;
    }

    let relative = Path::new(reference.trim_start_matches('/'));
    // Stay inside the assets directory.
    if relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        Some(relative.to_path_buf())
    } else {
        None
    }
}

/// Case-insensitive lookup of an attribute value inside a tag's attribute text.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    attribute().captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?;
        if !key.as_str().eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|value| value.as_str().to_string())
    })
}
