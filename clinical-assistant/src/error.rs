use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Suggestion engine unavailable: {0}")]
    Unavailable(String),
}

pub type AssistantResult<T> = Result<T, AssistantError>;
