/// Reasons the block builder rejects a whole document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Block on line {line} exceeds the maximum nesting depth of {limit}")]
    NestingTooDeep { limit: usize, line: usize },
    #[error("Document is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}

/// Non-fatal findings collected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    #[error("Block '{block_type}' opened on line {line} has no ::end; closed at end of document")]
    Unterminated { block_type: String, line: usize },
}

/// Rendering failures. These indicate caller bugs, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer for '{expected}' blocks was given a {found} node")]
    InvalidNodeType { expected: &'static str, found: String },
    #[error("No extension registered for block marker '{0}'")]
    UnregisteredMarker(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
