//! Error types for Phonebook

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Person not found")]
    PersonNotFound(String),

    #[error("Name or number is missing")]
    MissingField,

    #[error("Name must be unique")]
    DuplicateName(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
