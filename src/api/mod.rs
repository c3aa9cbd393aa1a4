//! Внешний API ядра.
//!
//! Здесь описываются:
//! - команды (commands.rs) – применение ответов бэкенда к состоянию раунда;
//! - DTO (dto.rs) – что присылает бэкенд и что отдаём фронту;
//! - запросы (queries.rs) – сборка представлений для UI, только чтение;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
