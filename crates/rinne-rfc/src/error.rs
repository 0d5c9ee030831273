use thiserror::Error;

/// RFC parsing and expansion errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] crate::rfc::recur::parse::ParseError),

    #[error("Expansion error: {0}")]
    ExpandError(#[from] crate::rfc::recur::expand::ExpandError),

    #[error(transparent)]
    CoreError(#[from] rinne_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
