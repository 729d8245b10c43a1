use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse {input:?} as {layout:?}: {source}")]
    Parse {
        layout: String,
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{input:?} is outside the representable range")]
    OutOfRange { input: String },

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Driver scan got text that does not match the default layout.
    #[error("Invalid string for LocalTime")]
    InvalidString,

    /// Driver scan got a value kind that cannot hold a timestamp.
    #[error("Incompatible type for LocalTime")]
    IncompatibleType,

    #[error("unknown time zone {0:?}")]
    UnknownZone(String),
}
