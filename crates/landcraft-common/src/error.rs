use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("job error: {0}")]
    Job(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display_includes_context() {
        let e = Error::Config("bad toml".into());
        assert_eq!(e.to_string(), "configuration error: bad toml");

        let e = Error::Migration("unknown command".into());
        assert_eq!(e.to_string(), "migration error: unknown command");

        let e = Error::NotFound("job abc".into());
        assert_eq!(e.to_string(), "not found: job abc");

        let e = Error::Other("misc".into());
        assert_eq!(e.to_string(), "misc");
    }
}
