use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("data_dir is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: data_dir is empty");

        let err = Error::Dataset("results.csv not found in data".to_string());
        assert_eq!(err.to_string(), "Dataset error: results.csv not found in data");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "results.csv");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("results.csv"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse = toml::from_str::<toml::Table>("data_dir = ").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Toml(_)));
    }
}
