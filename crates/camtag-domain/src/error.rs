/// Errors raised while interpreting user input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown mode '{0}' (expected 'add' or 'del')")]
    UnknownMode(String),
    #[error("tag list is empty")]
    EmptyTagList,
}
