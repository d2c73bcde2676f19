use regex::Regex;
use std::sync::OnceLock;

use super::refs::Definitions;

fn inline_link_regex() -> &'static Regex {
    static INLINE: OnceLock<Regex> = OnceLock::new();
    // Excludes in-page anchors (`#…`), query-only targets (`?…`) and empty
    // targets; the URL token runs to the first whitespace or `)`.
    INLINE.get_or_init(|| {
        Regex::new(r"\[[^\]]*\]\(([^\s)#?][^\s)]*)\)").expect("invalid inline link regex")
    })
}

fn reference_regex() -> &'static Regex {
    static REFERENCE: OnceLock<Regex> = OnceLock::new();
    REFERENCE.get_or_init(|| Regex::new(r"\[[^\]]*\]\[(\d+)\]").expect("invalid reference regex"))
}

/// Distinct inline-link URLs in `content`, in order of first appearance.
pub(crate) fn collect_inline_links(content: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for caps in inline_link_regex().captures_iter(content) {
        let url = &caps[1];
        if !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

/// Distinct indices used by reference-style links in `content`, in order of
/// first appearance.
pub(crate) fn referenced_indices(content: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = Vec::new();
    for caps in reference_regex().captures_iter(content) {
        let Ok(index) = caps[1].parse::<usize>() else {
            continue;
        };
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Assign a final index to every collected URL.
///
/// URLs that already had a definition reuse its index; the reused index set,
/// sorted ascending, is renumbered onto the contiguous run `1..=k` (a set
/// that is already `1..=k` comes out unchanged, keeping diffs minimal).
/// URLs without a prior definition take `k+1, k+2, …` in appearance order.
/// The returned pairs are in ascending final-index order.
pub(crate) fn assign_indices(urls: &[String], defs: &Definitions) -> Vec<(String, usize)> {
    let mut reused: Vec<(String, usize)> = Vec::new();
    let mut fresh: Vec<String> = Vec::new();
    for url in urls {
        match defs.index_of(url) {
            Some(index) => reused.push((url.clone(), index)),
            None => fresh.push(url.clone()),
        }
    }
    reused.sort_by_key(|(_, index)| *index);

    let mut assigned: Vec<(String, usize)> = reused
        .into_iter()
        .enumerate()
        .map(|(position, (url, _))| (url, position + 1))
        .collect();
    let next = assigned.len() + 1;
    for (offset, url) in fresh.into_iter().enumerate() {
        assigned.push((url, next + offset));
    }
    assigned
}
