mod links;
mod refs;

use crate::models::report::Warning;
use crate::models::scope::{NodeId, ScopeTree};

use refs::Definitions;

/// Scope whose content is literal and must never be rewritten.
pub const IGNORED_SHORTCODE: &str = "code-block";

/// Separator control characters that show up via copy-paste: line separator,
/// paragraph separator, record separator.
const SEPARATOR_CHARS: [char; 3] = ['\u{2028}', '\u{2029}', '\u{001E}'];

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(
        "duplicated reference index in scope <{scope}>:\n\t[{index}]: {second}\n\t[{index}]: {first}"
    )]
    DuplicateReference {
        scope: String,
        index: usize,
        first: String,
        second: String,
    },
}

/// Rewrite every scope of the tree in place, populating `modified_lines`.
///
/// Scopes are independent: each sees only its own captured lines, which is
/// what makes link numbering per-region rather than global. Any scope's
/// fatal error aborts the whole document before output exists.
pub fn rewrite_tree(tree: &mut ScopeTree) -> Result<Vec<Warning>, RewriteError> {
    let mut warnings = Vec::new();
    for id in tree.ids() {
        rewrite_node(tree, id, &mut warnings)?;
    }
    Ok(warnings)
}

fn rewrite_node(
    tree: &mut ScopeTree,
    id: NodeId,
    warnings: &mut Vec<Warning>,
) -> Result<(), RewriteError> {
    let node = tree.node(id);

    // Literal scopes pass through untouched. So do single-line scopes: they
    // share their line with the enclosing scope, whose own rewrite covers
    // it, and rewriting the slice again would change its length and
    // invalidate the recorded splice columns.
    if node.name == IGNORED_SHORTCODE || node.is_inline() {
        let copy = node.lines.clone();
        tree.node_mut(id).modified_lines = copy;
        return Ok(());
    }

    let lines = node.lines.clone();
    let scope = node.name.clone();
    let insert_before_close = node.is_closed_multiline();

    let mut content = lines.concat();
    let defs = Definitions::collect(&content, &scope)?;

    for index in links::referenced_indices(&content) {
        if !defs.contains(index) {
            warnings.push(Warning::OrphanReference {
                scope: scope.clone(),
                index,
            });
        }
    }

    // Inline every resolvable reference, so the whole scope can be
    // renumbered from a single uniform representation.
    for (index, url) in defs.iter() {
        content = content.replace(&format!("][{index}]"), &format!("]({url})"));
    }

    let urls = links::collect_inline_links(&content);
    let assigned = links::assign_indices(&urls, &defs);
    for (url, index) in &assigned {
        content = content.replace(&format!("]({url})"), &format!("][{index}]"));
    }

    content.retain(|c| !SEPARATOR_CHARS.contains(&c));
    let mut modified: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

    // Rebuild the trailing definition block: replace the original block's
    // exact line range, or insert at the end of the scope's own content,
    // before the close-delimiter line when the scope has one.
    let generated = refs::render_definitions(&assigned);
    match refs::definition_line_range(&lines) {
        Some((first, last)) => {
            let first = first.min(modified.len());
            let last = (last + 1).min(modified.len());
            modified.splice(first..last, generated);
        }
        None if !generated.is_empty() => {
            let at = if insert_before_close {
                modified.len().saturating_sub(1)
            } else {
                modified.len()
            };
            modified.splice(at..at, generated);
        }
        None => {}
    }

    tree.node_mut(id).modified_lines = modified;
    Ok(())
}
