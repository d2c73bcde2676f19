use std::fmt;

/// Non-fatal finding surfaced while rewriting a document. Warnings never
/// block output; the caller decides how to display them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A reference-style link `[text][N]` whose index has no definition
    /// visible in its own scope. The definition may legitimately live in an
    /// ancestor scope, so the document is still produced.
    OrphanReference { scope: String, index: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OrphanReference { scope, index } => write!(
                f,
                "reference [{index}] in scope <{scope}> has no definition in that scope"
            ),
        }
    }
}
