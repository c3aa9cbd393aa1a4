//! Движок блэкджека: значения рук, легальные действия, сплиты, добор
//! дилера, расчёт итогов и сверка с сервером.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `HandEngine::start_round` – начать раунд по стартовым картам
//!   - `request_action` – проверить намерение игрока до похода на сервер
//!   - `apply_action` – применить действие с картами из ответа сервера
//!   - `settle_dealer` – проиграть добор дилера
//!   - `compute_outcome` – итоги и выплаты по рукам
//!   - `reconcile` – выровнять зеркало по снимку сервера
//!
//! Движок не делает I/O и не генерирует карты.

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod outcome;
pub mod reconcile;
pub mod round;
pub mod round_history;
pub mod rules;
pub mod validation;

pub use actions::{ActionKind, BlackjackAction};
pub use errors::{EngineError, IllegalReason};
pub use game_loop::{apply_action, dealer_must_draw, request_action, settle_dealer, HandEngine};
pub use outcome::{compute_outcome, summarize, Outcome, RoundSummary, SlotOutcome};
pub use reconcile::{diff_snapshot, reconcile, Divergence, ServerHand, ServerRoundSnapshot};
pub use round::{PlayerHandSlot, RoundPhase, RoundState, SlotStatus};
pub use round_history::{RoundEvent, RoundEventKind, RoundHistory};
pub use rules::{ConfigError, PayoutRatio, RulesProfile, TableRules};
pub use validation::{legal_actions, validate_action, LegalActions};
