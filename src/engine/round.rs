use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, Hand, RoundId, SlotIndex};
use crate::engine::round_history::RoundHistory;
use crate::engine::rules::TableRules;

/// Статус руки игрока.
///
/// Из `Playing` рука уходит ровно один раз и больше не возвращается.
/// `Blackjack` ставится только при старте раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Playing,
    Stood,
    Bust,
    Blackjack,
    Doubled,
}

impl SlotStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SlotStatus::Playing)
    }
}

/// Фаза раунда: AwaitingAction → Resolving → Settled, только вперёд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    AwaitingAction,
    /// Все руки игрока закрыты, ждём карты дилера.
    Resolving,
    Settled,
}

/// Одна рука игрока внутри раунда (после сплитов их несколько).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandSlot {
    pub hand: Hand,
    pub status: SlotStatus,
    pub can_double: bool,
    pub can_split: bool,
    pub wager: Chips,
    /// Сколько сплитов было в линии, из которой получилась эта рука.
    pub split_depth: u8,
}

impl PlayerHandSlot {
    pub fn new(hand: Hand, wager: Chips) -> Self {
        Self {
            hand,
            status: SlotStatus::Playing,
            can_double: false,
            can_split: false,
            wager,
            split_depth: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == SlotStatus::Playing
    }

    /// Пересчитать флаги double/split из текущих карт и статуса.
    pub(crate) fn refresh_flags(&mut self, rules: &TableRules) {
        let open_two = self.is_playing() && self.hand.len() == 2;
        self.can_double = open_two;
        self.can_split = open_two && self.hand.is_pair() && rules.split_allowed_at(self.split_depth);
    }

    /// Закрыть руку. Флаги гаснут навсегда.
    pub(crate) fn finish(&mut self, status: SlotStatus) {
        debug_assert!(self.is_playing(), "closing an already closed slot");
        self.status = status;
        self.can_double = false;
        self.can_split = false;
    }
}

/// Клиентское зеркало раунда блэкджека.
///
/// Живёт ровно один раунд; для нового раунда создаётся новое состояние.
/// Все операции движка принимают `&RoundState` и возвращают новый снимок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub round_id: RoundId,
    pub rules: TableRules,
    pub dealer_hand: Hand,
    pub dealer_hole_card_revealed: bool,
    pub slots: Vec<PlayerHandSlot>,
    /// Индекс играющей руки; когда играющих нет – `slots.len()`.
    pub active_slot_index: SlotIndex,
    pub phase: RoundPhase,
    pub history: RoundHistory,
}

impl RoundState {
    pub fn active_slot(&self) -> Option<&PlayerHandSlot> {
        if self.phase != RoundPhase::AwaitingAction {
            return None;
        }
        self.slots
            .get(self.active_slot_index)
            .filter(|slot| slot.is_playing())
    }

    /// Открытая карта дилера (первая).
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer_hand.cards.first().copied()
    }

    pub fn total_wager(&self) -> Chips {
        self.slots.iter().map(|s| s.wager).sum()
    }

    pub fn playing_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_playing()).count()
    }

    /// Перейти к следующей играющей руке после активной; если таких нет –
    /// раунд уходит в Resolving. Возвращает true, если фаза сменилась.
    pub(crate) fn advance(&mut self) -> bool {
        let next = self
            .slots
            .iter()
            .enumerate()
            .skip(self.active_slot_index + 1)
            .find(|(_, slot)| slot.is_playing())
            .map(|(idx, _)| idx);

        match next {
            Some(idx) => {
                self.active_slot_index = idx;
                false
            }
            None => {
                self.active_slot_index = self.slots.len();
                self.phase = RoundPhase::Resolving;
                true
            }
        }
    }
}
