use miette::Diagnostic;
use thiserror::Error;

/// HTTP server errors
#[derive(Debug, Error, Diagnostic)]
pub enum ServerError {
    #[error("failed to bind to {addr}")]
    #[diagnostic(
        code(server::bind),
        help("check SERVER_HOST and SERVER_PORT, and that the port is free")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server terminated unexpectedly")]
    #[diagnostic(code(server::serve))]
    Serve {
        #[source]
        source: std::io::Error,
    },
}
