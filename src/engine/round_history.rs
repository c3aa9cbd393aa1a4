use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, RoundId, SlotIndex};
use crate::engine::actions::BlackjackAction;
use crate::engine::reconcile::Divergence;
use crate::engine::round::SlotStatus;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEventKind {
    /// Раунд начался: карты игрока и открытая карта дилера.
    RoundStarted {
        round_id: RoundId,
        wager: Chips,
        player_cards: Vec<Card>,
        dealer_up_card: Option<Card>,
    },

    /// Действие игрока применено к руке `slot`.
    PlayerActed {
        slot: SlotIndex,
        action: BlackjackAction,
    },

    /// Сплит породил новую руку.
    SlotSplit {
        from: SlotIndex,
        new_slot: SlotIndex,
    },

    /// Рука закрылась.
    SlotFinished {
        slot: SlotIndex,
        status: SlotStatus,
        total: u8,
    },

    /// Дилер открыл/добрал карту.
    DealerDrew { card: Card, total: u8 },

    /// Дилер закончил, раунд рассчитан.
    DealerSettled { total: u8, bust: bool },

    /// Зеркало выровнено по серверу.
    Reconciled { divergences: Vec<Divergence> },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&RoundEventKind> {
        self.events.last().map(|e| &e.kind)
    }
}
