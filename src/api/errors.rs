use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::reveal::{ErrorCode, RevealError, UserMessage};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Битый payload от бэкенда (неизвестная карта, не тот раунд и т.п.).
    BadPayload(String),

    /// Ошибка движка блэкджека (недопустимое действие и т.д.).
    EngineError(String),

    /// Ошибка открытия кейса.
    RevealError { code: ErrorCode, message: String },
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::BadPayload(_) | ApiError::EngineError(_) => ErrorCode::Server,
            ApiError::RevealError { code, .. } => *code,
        }
    }

    pub fn user_message(&self) -> UserMessage {
        self.code().user_message()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError(err.to_string())
    }
}

impl From<RevealError> for ApiError {
    fn from(err: RevealError) -> Self {
        ApiError::RevealError {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
