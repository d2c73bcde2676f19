pub(crate) mod builder;
pub mod markers;

use crate::models::scope::ScopeTree;

use builder::TreeBuilder;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document is empty")]
    EmptyDocument,
}

/// Parse a document into its scope tree.
///
/// One pass over the lines; the builder keeps a cursor into the tree plus a
/// line counter relative to the cursor's scope. Scopes left unclosed at end
/// of input are tolerated; the only failure is an empty document.
pub fn parse_document(text: &str) -> Result<ScopeTree, ParseError> {
    let mut builder = TreeBuilder::new();
    for line in text.split_inclusive('\n') {
        builder.push_line(line);
    }
    let tree = builder.finish();
    if tree.node(tree.root()).lines.is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_a_parse_error() {
        assert!(matches!(parse_document(""), Err(ParseError::EmptyDocument)));
    }

    #[test]
    fn single_line_document_parses() {
        let tree = parse_document("hello\n").unwrap();
        assert_eq!(tree.node(tree.root()).lines, vec!["hello\n"]);
    }

    #[test]
    fn crlf_terminators_are_preserved() {
        let tree = parse_document("a\r\n{{< tab >}}\r\nb\r\n{{< /tab >}}\r\n").unwrap();
        let root = tree.node(tree.root());
        assert_eq!(root.lines[0], "a\r\n");
        let tab = tree.node(root.children[0]);
        assert_eq!(tab.lines.len(), 3);
        assert_eq!(tab.lines[1], "b\r\n");
    }
}
