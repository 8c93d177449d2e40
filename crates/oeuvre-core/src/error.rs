use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("not found: {entity} matching {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
