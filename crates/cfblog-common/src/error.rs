use miette::Diagnostic;
use thiserror::Error;

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid URL {url}: {message}")]
    #[diagnostic(code(config::url_parse))]
    UrlParse { url: String, message: String },

    #[error("URL {url} cannot be used as a base for API paths")]
    #[diagnostic(
        code(config::url_base),
        help("use an absolute http(s) URL such as https://cdn.contentful.com")
    )]
    UrlBase { url: String },

    #[error("{var} must be a whole number, got {value:?}")]
    #[diagnostic(code(config::invalid_number))]
    InvalidNumber { var: &'static str, value: String },

    #[error("unknown content source {0:?}, expected `graphql` or `rest`")]
    #[diagnostic(code(config::unknown_variant))]
    UnknownVariant(String),
}
