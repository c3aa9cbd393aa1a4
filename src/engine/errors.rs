use crate::domain::{Chips, RoundId, SlotIndex};
use crate::engine::actions::ActionKind;
use crate::engine::round::{RoundPhase, SlotStatus};

use thiserror::Error;

/// Почему действие нельзя применить к активной руке.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IllegalReason {
    #[error("раунд в фазе {0:?}, а не AwaitingAction")]
    NotAwaitingAction(RoundPhase),

    #[error("нет активной руки")]
    NoActiveSlot,

    #[error("рука {slot} уже закрыта ({status:?})")]
    SlotNotPlaying { slot: SlotIndex, status: SlotStatus },

    #[error("double возможен только на двух картах")]
    CannotDouble,

    #[error("split возможен только на паре одинаковой стоимости в пределах лимита сплитов")]
    CannotSplit,
}

/// Ошибки движка блэкджека. Всё это ошибки вызывающего кода (UI не должен
/// был дать нажать кнопку) – повторять их бессмысленно.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Ставка должна быть больше нуля (получено {0})")]
    InvalidWager(Chips),

    #[error("Некорректная рука: {0}")]
    InvalidHand(&'static str),

    #[error("Недопустимое действие {action:?}: {reason}")]
    IllegalAction {
        action: ActionKind,
        reason: IllegalReason,
    },

    #[error("Операция {operation} требует фазы {expected:?}, текущая фаза {actual:?}")]
    WrongPhase {
        operation: &'static str,
        expected: RoundPhase,
        actual: RoundPhase,
    },

    #[error("Сервер прислал недостаточно карт дилера")]
    DealerDrawsExhausted,

    #[error("Сервер прислал лишние карты дилера: {0}")]
    UnexpectedDealerDraws(usize),

    #[error("Снэпшот раунда {got} не относится к текущему раунду {expected}")]
    RoundMismatch { expected: RoundId, got: RoundId },

    #[error("Некорректный снэпшот раунда: {0}")]
    InvalidSnapshot(&'static str),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    pub(crate) fn illegal(action: ActionKind, reason: IllegalReason) -> Self {
        EngineError::IllegalAction { action, reason }
    }
}
