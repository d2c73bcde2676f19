pub mod assemble;
pub mod io;
pub mod models;
pub mod parsing;
pub mod rewrite;

// Re-export key types for easier usage
pub use assemble::assemble_tree;
pub use models::report::Warning;
pub use models::scope::{NodeId, ROOT_NAME, ScopeNode, ScopeTree};
pub use parsing::{ParseError, parse_document};
pub use rewrite::{IGNORED_SHORTCODE, RewriteError, rewrite_tree};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error(transparent)]
    Io(#[from] io::IoError),
}

/// A successfully transformed document plus everything worth telling the
/// user about it.
#[derive(Debug)]
pub struct FormattedDocument {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Run the whole pipeline on in-memory text: parse the scope tree, rewrite
/// every scope independently, reassemble. No filesystem side effects.
pub fn format_text(input: &str) -> Result<FormattedDocument, FormatError> {
    let mut tree = parse_document(input)?;
    let warnings = rewrite_tree(&mut tree)?;
    let text = assemble_tree(&tree);
    Ok(FormattedDocument { text, warnings })
}

/// Read a document and return its transformation without writing anything
/// back; callers decide whether and where the result lands.
pub fn format_file(path: &std::path::Path) -> Result<FormattedDocument, FormatError> {
    let content = io::read_file(path)?;
    format_text(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_text_runs_the_full_pipeline() {
        let input = "See [here][1] and [there](http://y.com)\n[1]: http://x.com\n";
        let doc = format_text(input).unwrap();
        assert!(doc.warnings.is_empty());
        assert_eq!(
            doc.text,
            "See [here][1] and [there][2]\n[1]: http://x.com\n[2]: http://y.com\n"
        );
    }

    #[test]
    fn format_text_rejects_empty_input() {
        assert!(matches!(
            format_text(""),
            Err(FormatError::Parse(ParseError::EmptyDocument))
        ));
    }

    #[test]
    fn format_file_reads_and_transforms() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "plain text, no links\n").unwrap();

        let doc = format_file(&path).unwrap();
        assert_eq!(doc.text, "plain text, no links\n");
        // No write happened: the file is untouched by format_file itself.
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "plain text, no links\n"
        );
    }
}
