use crate::models::scope::{NodeId, ScopeTree};

use super::markers::{ONE_LINER_SHORTCODES, close_markers, open_markers};

/// Single-pass scope-tree builder.
///
/// Feeds on raw lines (terminators included) and maintains a cursor into the
/// tree plus a line counter relative to the cursor's scope. The counter is
/// reset on descent and carried back from the child's `end_line` on ascent,
/// so it is zero during close-marker scanning exactly when the current scope
/// was opened on the line being processed.
pub(crate) struct TreeBuilder {
    tree: ScopeTree,
    current: NodeId,
    rel_line: usize,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        let tree = ScopeTree::new();
        let current = tree.root();
        Self {
            tree,
            current,
            rel_line: 0,
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.tree
            .node_mut(self.current)
            .lines
            .push(line.to_string());

        // Open markers: every one attaches a child to the current scope;
        // the scan descends into the last one after the line is recorded.
        let mut opened = None;
        for marker in open_markers(line) {
            if ONE_LINER_SHORTCODES.contains(&marker.name) {
                continue;
            }
            let child = self.tree.add_child(self.current, marker.name);
            self.tree.node_mut(child).start = marker.start;
            opened = Some(child);
        }

        if let Some(child) = opened {
            let node = self.tree.node_mut(child);
            node.lines.push(line.to_string());
            node.start_line = self.rel_line;
            self.rel_line = 0;
            self.current = child;
        }

        // Close markers: only one matching the current scope's name is
        // consumed, which tolerates close-like text inside quoted arguments.
        for marker in close_markers(line) {
            let node = self.tree.node(self.current);
            if marker.name != node.name {
                continue;
            }
            let Some(parent) = node.parent else {
                continue;
            };

            let inline = self.rel_line == 0;
            if inline && marker.end <= node.start {
                // Close marker sitting before the scope's own open marker;
                // not a real close for this scope.
                continue;
            }

            let node = self.tree.node_mut(self.current);
            node.end = marker.end;
            if inline {
                // Opened and closed on this very line. The parent keeps its
                // full copy of the shared line; this scope keeps only the
                // marker-bounded slice, which is what gets spliced back in
                // between the recorded columns.
                node.end_line = Some(node.start_line);
                node.lines = vec![line[node.start..marker.end].to_string()];
            } else {
                node.end_line = Some(node.start_line + 1);
            }

            self.rel_line = node.end_line.expect("close just recorded");
            self.current = parent;
            if !inline {
                // The parent keeps the closing line as its second
                // placeholder for this scope.
                self.tree
                    .node_mut(self.current)
                    .lines
                    .push(line.to_string());
            }
        }

        self.rel_line += 1;
    }

    pub(crate) fn finish(self) -> ScopeTree {
        // Scopes still open at end of input stay attached with no end line;
        // reassembly treats them as occupying their single placeholder line.
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scope::ScopeTree;

    fn parse(text: &str) -> ScopeTree {
        let mut builder = TreeBuilder::new();
        for line in text.split_inclusive('\n') {
            builder.push_line(line);
        }
        builder.finish()
    }

    #[test]
    fn plain_text_yields_bare_root() {
        let tree = parse("This is some text");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).lines, vec!["This is some text"]);
    }

    #[test]
    fn one_liner_shortcode_opens_no_scope() {
        let tree = parse("## Further Reading\n{{< partial name=\"whats-next/whats-next.html\" >}}\n");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).lines.len(), 2);
    }

    #[test]
    fn sibling_tabs_are_two_children() {
        let text = "\nHere is some root text\n{{< tab \"MySQL < 4.0\" >}}\nText here\n{{< /tab >}}\nand after\n{{< tab \"foo\" >}}\nStuff here\n{{</ tab >}}";
        let tree = parse(text);
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);

        let first = tree.node(root.children[0]);
        assert_eq!(first.name, "tab");
        assert_eq!(first.start_line, 2);
        assert_eq!(first.end_line, Some(3));
        assert_eq!(first.lines.len(), 3);

        let second = tree.node(root.children[1]);
        assert_eq!(second.start_line, 5);
        assert_eq!(second.end_line, Some(6));
    }

    #[test]
    fn percent_form_tabs_parse() {
        let text = "\nHere is text\n{{% tab \"ドライバーのみ\" %}}\nHello world\n{{% /tab %}}\n{{% tab \"標準\" %}}\nHello world 2\n{{% /tab %}}";
        let tree = parse(text);
        assert_eq!(tree.node(tree.root()).children.len(), 2);
    }

    #[test]
    fn unknown_shortcode_stays_open_and_absorbs_later_scopes() {
        // `foobar` has no close marker anywhere, so it stays the current
        // scope from its open onward; the second tab lands inside it.
        let text = "\nThis\n{{< tab \"blah\" >}}\nStuff here\n{{</ tab >}}\nis text {{< foobar test=\"stuff\" >}} and more\n{{< tab \"durp\" >}}\nStuff here\n{{</ tab >}}";
        let tree = parse(text);
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);

        let foobar = tree.node(root.children[1]);
        assert_eq!(foobar.name, "foobar");
        assert_eq!(foobar.end_line, None);
        assert_eq!(foobar.children.len(), 1);
        assert_eq!(tree.node(foobar.children[0]).name, "tab");
    }

    #[test]
    fn nested_site_regions_record_inline_positions() {
        let text = "\nRoot text\n{{< site-region region=\"us3\" >}}\n    Root site region\n    {{< site-region region=\"us,us5,eu,gov\" >}}Nested Region 1{{< /site-region >}}\n    {{< site-region region=\"us3\" >}}Nested Region 2{{< /site-region >}}\n{{< /site-region >}}\nText after\n";
        let tree = parse(text);
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 1);

        let outer = tree.node(root.children[0]);
        assert_eq!(outer.name, "site-region");
        assert_eq!(outer.start_line, 2);
        assert_eq!(outer.end_line, Some(3));
        assert_eq!(outer.children.len(), 2);
        // Open line, indented text, the two nested lines, close line.
        assert_eq!(outer.lines.len(), 5);

        let nested1 = tree.node(outer.children[0]);
        assert!(nested1.is_inline());
        assert_eq!(nested1.start_line, 2);
        assert_eq!(nested1.start, 4);
        assert_eq!(
            nested1.lines,
            vec!["{{< site-region region=\"us,us5,eu,gov\" >}}Nested Region 1{{< /site-region >}}"]
        );

        let nested2 = tree.node(outer.children[1]);
        assert!(nested2.is_inline());
        assert_eq!(nested2.start_line, 3);
    }

    #[test]
    fn close_of_other_name_is_ignored() {
        let text = "{{< tab \"a\" >}}\n{{< /other >}}\nstill inside\n{{< /tab >}}\n";
        let tree = parse(text);
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 1);
        let tab = tree.node(root.children[0]);
        assert_eq!(tab.end_line, Some(1));
        assert_eq!(tab.lines.len(), 4);
    }

    #[test]
    fn parent_counter_resumes_after_child_closes() {
        let text = "line a\n{{< tab >}}\nbody\n{{< /tab >}}\nline b\n{{< tab >}}\nmore\n{{< /tab >}}\n";
        let tree = parse(text);
        let root = tree.node(tree.root());
        // Root placeholder lines: a, open, close, b, open, close.
        assert_eq!(root.lines.len(), 6);
        let second = tree.node(root.children[1]);
        assert_eq!(second.start_line, 4);
        assert_eq!(second.end_line, Some(5));
    }
}
