use std::any::Any;

use thiserror::Error;

/// Failures raised at the top-level guard itself rather than returned by the work.
#[derive(Error, Debug)]
pub enum AbortError {
    #[error("work panicked: {0}")]
    Panicked(String),
}

impl AbortError {
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        AbortError::Panicked(message)
    }
}
