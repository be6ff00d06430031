/// Errors returned by the parsers in this crate.
///
/// Offsets are byte offsets into the parsed attribute string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Syntax error at offset {0}")]
    Syntax(usize),
    #[error("Unknown path command '{0}' at offset {1}")]
    UnknownCommand(char, usize),
    #[error("Unexpected number at offset {0}, expected a path command")]
    UnexpectedNumber(usize),
    #[error("Invalid number of arguments for '{command}' command at offset {offset}")]
    InvalidArgumentCount { command: char, offset: usize },
    #[error("Unknown transform function '{0}' at offset {1}")]
    UnknownTransformFunction(String, usize),
    #[error("Transform '{name}' at offset {offset} takes {expected} arguments, got {actual}")]
    InvalidTransformArgumentCount {
        name: String,
        expected: &'static str,
        actual: usize,
        offset: usize,
    },
    #[error("Missing '{0}' at offset {1}")]
    MissingDelimiter(char, usize),
    #[error("Number of coordinates is odd ({0})")]
    OddCoordinateCount(usize),
    #[error("Invalid viewBox attribute")]
    InvalidViewBox,
    #[error("Error when parsing XML: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, Error>;
