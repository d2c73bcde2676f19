use regex::Regex;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::OnceLock;

use super::RewriteError;

fn definition_regex() -> &'static Regex {
    static DEFINITION: OnceLock<Regex> = OnceLock::new();
    DEFINITION.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*\[(\d+)\]: (\S+)").expect("invalid definition regex")
    })
}

/// Footnote-style definitions of one scope: `[N]: URL` lines, indexed.
#[derive(Debug, Default)]
pub(crate) struct Definitions {
    entries: BTreeMap<usize, String>,
}

impl Definitions {
    /// Collect every definition in `content`. A second definition reusing an
    /// already-seen index is fatal; both URLs are reported.
    pub(crate) fn collect(content: &str, scope: &str) -> Result<Self, RewriteError> {
        let mut entries: BTreeMap<usize, String> = BTreeMap::new();
        for caps in definition_regex().captures_iter(content) {
            let Ok(index) = caps[1].parse::<usize>() else {
                continue;
            };
            let url = caps[2].to_string();
            match entries.entry(index) {
                Entry::Occupied(existing) => {
                    return Err(RewriteError::DuplicateReference {
                        scope: scope.to_string(),
                        index,
                        first: existing.get().clone(),
                        second: url,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(url);
                }
            }
        }
        Ok(Self { entries })
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Definitions in ascending index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|(i, url)| (*i, url.as_str()))
    }

    /// Smallest index already assigned to `url`, if any.
    pub(crate) fn index_of(&self, url: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, existing)| existing.as_str() == url)
            .map(|(i, _)| *i)
    }
}

/// First..=last line indices holding definitions in a scope's original
/// capture, if any existed.
pub(crate) fn definition_line_range(lines: &[String]) -> Option<(usize, usize)> {
    let mut range = None;
    for (i, line) in lines.iter().enumerate() {
        if definition_regex().is_match(line) {
            range = match range {
                None => Some((i, i)),
                Some((first, _)) => Some((first, i)),
            };
        }
    }
    range
}

/// Render the trailing definition block for the given assignment, one line
/// per index in index order.
pub(crate) fn render_definitions(assigned: &[(String, usize)]) -> Vec<String> {
    assigned
        .iter()
        .map(|(url, index)| format!("[{index}]: {url}\n"))
        .collect()
}
