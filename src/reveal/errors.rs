use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Chips;
use crate::reveal::state::RevealPhase;

/// Классификация ошибок, которые могут случиться во время открытия кейса.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Нет связи / таймаут.
    Network,
    /// Сессия протухла, нужен логин.
    Authentication,
    /// Не хватает баланса.
    InsufficientBalance,
    /// Неверный выбор (кейса нет, кейс выключен и т.п.).
    InvalidSelection,
    /// Сервер ответил 5xx или мусором.
    Server,
    /// Покупка прошла, а зачисление выигрыша – нет. Нужно повторить.
    CreditFailed,
}

impl ErrorCode {
    /// Классификация HTTP-статуса ответа бэкенда. 0 – запрос не дошёл.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            0 | 408 | 504 => ErrorCode::Network,
            401 | 403 => ErrorCode::Authentication,
            402 => ErrorCode::InsufficientBalance,
            400..=499 => ErrorCode::InvalidSelection,
            _ => ErrorCode::Server,
        }
    }

    /// Имеет ли смысл повторять.
    pub fn is_retryable(self) -> bool {
        match self {
            ErrorCode::Network | ErrorCode::CreditFailed => true,
            ErrorCode::Authentication
            | ErrorCode::InsufficientBalance
            | ErrorCode::InvalidSelection
            | ErrorCode::Server => false,
        }
    }

    /// Что показать пользователю. Для каждого кода своя категория.
    pub fn user_message(self) -> UserMessage {
        match self {
            ErrorCode::Network => UserMessage::ConnectionProblem,
            ErrorCode::Authentication => UserMessage::AuthenticationRequired,
            ErrorCode::InsufficientBalance => UserMessage::InsufficientBalance,
            ErrorCode::InvalidSelection => UserMessage::InvalidSelection,
            ErrorCode::Server => UserMessage::UnexpectedError,
            ErrorCode::CreditFailed => UserMessage::CreditPending,
        }
    }
}

/// Категории сообщений для пользователя.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserMessage {
    ConnectionProblem,
    AuthenticationRequired,
    InsufficientBalance,
    InvalidSelection,
    CreditPending,
    UnexpectedError,
}

impl UserMessage {
    /// Ключ локализации для фронта.
    pub fn i18n_key(self) -> &'static str {
        match self {
            UserMessage::ConnectionProblem => "errors.connection_problem",
            UserMessage::AuthenticationRequired => "errors.authentication_required",
            UserMessage::InsufficientBalance => "errors.insufficient_balance",
            UserMessage::InvalidSelection => "errors.invalid_selection",
            UserMessage::CreditPending => "errors.credit_pending",
            UserMessage::UnexpectedError => "errors.unexpected",
        }
    }
}

/// Ошибка, сохранённая в состоянии (не бросается наружу).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub message: String,
    pub retryable: bool,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    pub fn user_message(&self) -> UserMessage {
        self.code.user_message()
    }
}

/// Неудачная покупка – то, что вернул бэкенд вместо результата.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl PurchaseFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Ошибки вызывающего кода при работе с открытием кейса.
#[derive(Debug, Error)]
pub enum RevealError {
    #[error("Недостаточно средств: цена {price}, баланс {balance}")]
    InsufficientBalance { price: Chips, balance: Chips },

    #[error("Кейс {0} нельзя купить")]
    InvalidCase(String),

    #[error("Операция {operation} недопустима в фазе {phase:?}")]
    WrongPhase {
        operation: &'static str,
        phase: RevealPhase,
    },

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl RevealError {
    /// Локальные ошибки тоже нужно уметь показать пользователю.
    pub fn code(&self) -> ErrorCode {
        match self {
            RevealError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            RevealError::InvalidCase(_) => ErrorCode::InvalidSelection,
            RevealError::WrongPhase { .. } | RevealError::Internal(_) => ErrorCode::Server,
        }
    }
}

/// Ошибка внешней функции зачисления.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Зачисление не удалось: {0}")]
pub struct CreditError(pub String);
