/// Structural errors: failures that reject a value at construction or parse
/// time, rather than failing an evaluation. See [the module-level
/// discussion](crate) of the two error tiers.
#[derive(Debug, thiserror::Error)]
pub enum RuneError {
    #[error("invalid condition operator byte {0:#04x}")]
    InvalidOperator(u8),

    #[error("field {0:?} contains a punctuation byte")]
    PunctuationInField(String),

    #[error("input ended before {0}")]
    Truncated(&'static str),

    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("authcode prefix too short: found {found} of 32 bytes")]
    AuthcodeTooShort { found: usize },

    #[error("restriction body is not valid UTF-8")]
    InvalidUtf8,

    #[error("empty-field alternative not allowed here, pass allow_idfield to override")]
    DisallowedIdField,

    #[error("unique id must not contain '-'")]
    HyphenInUniqueId,
}
