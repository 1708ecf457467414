use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarbonError {
    #[error("No emission factor table was provided to the calculation cache")]
    FactorTableNotDefined,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Unsupported emission factor file '{0}': expected .yaml, .yml or .csv")]
    UnsupportedFactorFormat(String),
}
