use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while building a [`Grid`](crate::grid::Grid) from the diagram.
#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("row {row} has {found} cells, expected {expected}")]
    #[diagnostic(
        code(paper_rolls::shape),
        help("every row of the diagram must have the same width")
    )]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected {found} in diagram")]
    #[diagnostic(
        code(paper_rolls::parse),
        help("only '@' (paper roll) and '.' (empty floor) are allowed")
    )]
    Parse {
        found: String,
        #[source_code]
        src: String,
        #[label("not a roll or empty floor")]
        span: SourceSpan,
    },
}
