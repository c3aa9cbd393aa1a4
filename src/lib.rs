//! Ядро казино-фронтенда: два автомата состояний без собственного I/O.
//!
//! - `engine` – раунд блэкджека: значения рук, действия, сплиты, добор
//!   дилера, итоги и сверка клиентского зеркала с сервером;
//! - `reveal` – открытие кейса: покупка → анимация → показ → зачисление,
//!   с гарантией "не больше одного зачисления на транзакцию".
//!
//! Все операции – чистые функции `(состояние, вход) → (новое состояние,
//! эффекты)`. Сеть, звук и тосты выполняет вызывающий код по списку
//! `effects::Effect`.

pub mod api;
pub mod domain;
pub mod effects;
pub mod engine;
pub mod infra;
pub mod reveal;

pub use effects::{Effect, Sound, Step};
pub use engine::HandEngine;
pub use reveal::RevealCoordinator;
