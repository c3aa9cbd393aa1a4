//! Декларативные эффекты.
//!
//! Движки ничего не делают сами: ни сети, ни звука, ни тостов. Каждая
//! операция возвращает новый снимок состояния и список того, что UI должен
//! выполнить.

use serde::{Deserialize, Serialize};

use crate::domain::{CaseId, Chips, ChipsDelta, Rarity, RoundId, SlotIndex, TransactionId};
use crate::engine::actions::ActionKind;
use crate::engine::reconcile::Divergence;
use crate::reveal::errors::UserMessage;

/// Звуки, которые может запросить движок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sound {
    Deal,
    CardDrawn,
    Bust,
    Blackjack,
    Win,
    Lose,
    Push,
    CaseSpin,
    Reveal(Rarity),
    Coins,
}

/// То, что вызывающий код должен сделать после перехода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Effect {
    /// Отправить действие игрока на сервер.
    SendAction {
        round_id: RoundId,
        slot: SlotIndex,
        action: ActionKind,
    },
    /// Все руки закрыты – запросить у сервера добор дилера.
    RequestDealerPlay { round_id: RoundId },
    RevealHoleCard,
    RoundSettled { round_id: RoundId, net: ChipsDelta },
    /// Зеркало раунда разошлось с сервером и было перезаписано.
    Resynced {
        round_id: RoundId,
        divergences: Vec<Divergence>,
    },

    /// Отправить покупку кейса на сервер.
    PurchaseCase { case_id: CaseId, price: Chips },
    StartCaseAnimation,
    ShowPrize {
        item_id: String,
        rarity: Rarity,
        currency_awarded: Chips,
    },
    Credited {
        transaction_id: TransactionId,
        amount: Chips,
    },

    PlaySound(Sound),
    ShowToast(UserMessage),
}

/// Результат одного перехода: новое состояние + эффекты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<S> {
    pub state: S,
    pub effects: Vec<Effect>,
}

impl<S> Step<S> {
    pub fn new(state: S, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// Переход без эффектов.
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn into_state(self) -> S {
        self.state
    }

    pub fn has_effect(&self, pred: impl Fn(&Effect) -> bool) -> bool {
        self.effects.iter().any(pred)
    }
}
