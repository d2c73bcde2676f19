use crate::models::scope::{NodeId, ScopeTree};

/// Flatten a fully rewritten tree back into document text.
pub fn assemble_tree(tree: &ScopeTree) -> String {
    assemble_node(tree, tree.root()).concat()
}

/// Assemble one scope's contribution to its parent.
///
/// Children are spliced in REVERSE insertion order: a splice only shifts
/// line positions after itself, so the recorded offsets of siblings earlier
/// in the buffer stay valid until their turn. This ordering is load-bearing.
pub fn assemble_node(tree: &ScopeTree, id: NodeId) -> Vec<String> {
    let node = tree.node(id);
    let mut output = node.modified_lines.clone();

    for &child_id in node.children.iter().rev() {
        let child = tree.node(child_id);
        let child_output = assemble_node(tree, child_id);

        // An empty replacement must not disturb the parent's copy.
        if child_output.is_empty() {
            continue;
        }

        match child.end_line {
            Some(end) if end == child.start_line => {
                // Single-line scope: replace the slice between the recorded
                // columns of the shared line. The parent holds the full line
                // (and has already rewritten it), so an output identical to
                // the original capture is a no-op splice and is skipped.
                if child_output == child.lines {
                    continue;
                }
                let Some(line) = output.get(child.start_line) else {
                    continue;
                };
                let start = clamp_to_boundary(line, child.start);
                let end = clamp_to_boundary(line, child.end.max(start));
                let replaced =
                    format!("{}{}{}", &line[..start], child_output.concat(), &line[end..]);
                output[child.start_line] = replaced;
            }
            Some(end) => {
                // Multi-line scope: variable-length splice over the two
                // placeholder lines.
                let first = child.start_line.min(output.len());
                let last = (end + 1).min(output.len());
                output.splice(first..last, child_output);
            }
            None => {
                // Unclosed scope: only its opening line ever reached the
                // parent.
                let first = child.start_line.min(output.len());
                let last = (child.start_line + 1).min(output.len());
                output.splice(first..last, child_output);
            }
        }
    }

    output
}

fn clamp_to_boundary(line: &str, mut at: usize) -> usize {
    at = at.min(line.len());
    while !line.is_char_boundary(at) {
        at -= 1;
    }
    at
}
