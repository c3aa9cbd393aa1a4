use serde::{Deserialize, Serialize};

use crate::domain::{Chips, ChipsDelta, SlotIndex};
use crate::engine::errors::EngineError;
use crate::engine::round::{RoundPhase, RoundState, SlotStatus};

/// Итог одной руки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Push,
    BlackjackWin,
}

/// Итог руки с выплатой. `payout` – сколько всего вернётся игроку
/// (ставка + выигрыш), для проигрыша 0.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotOutcome {
    pub slot_index: SlotIndex,
    pub outcome: Outcome,
    pub payout: Chips,
}

/// Сводка по раунду.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub total_wagered: Chips,
    pub total_payout: Chips,
    pub net: ChipsDelta,
}

/// Расчёт итогов по каждой руке. Чистая проекция рассчитанного раунда:
/// сколько раз ни вызывай на одном состоянии – результат один и тот же.
pub fn compute_outcome(state: &RoundState) -> Result<Vec<SlotOutcome>, EngineError> {
    if state.phase != RoundPhase::Settled {
        return Err(EngineError::WrongPhase {
            operation: "compute_outcome",
            expected: RoundPhase::Settled,
            actual: state.phase,
        });
    }

    let dealer = &state.dealer_hand;
    let dealer_total = dealer.total();
    let dealer_bust = dealer.is_bust();
    let dealer_blackjack = dealer.is_blackjack();
    let ratio = state.rules.blackjack_payout;

    let outcomes = state
        .slots
        .iter()
        .enumerate()
        .map(|(slot_index, slot)| {
            let wager = slot.wager;
            let (outcome, payout) = if slot.status == SlotStatus::Bust || slot.hand.is_bust() {
                (Outcome::Loss, Chips::ZERO)
            } else if slot.status == SlotStatus::Blackjack && !dealer_blackjack {
                (
                    Outcome::BlackjackWin,
                    wager + wager.mul_ratio(ratio.num, ratio.den),
                )
            } else if dealer_bust {
                (Outcome::Win, wager.doubled())
            } else {
                // Блэкджек дилера здесь просто 21: против обычных 21 это push.
                let total = slot.hand.total();
                match total.cmp(&dealer_total) {
                    core::cmp::Ordering::Greater => (Outcome::Win, wager.doubled()),
                    core::cmp::Ordering::Less => (Outcome::Loss, Chips::ZERO),
                    core::cmp::Ordering::Equal => (Outcome::Push, wager),
                }
            };
            SlotOutcome {
                slot_index,
                outcome,
                payout,
            }
        })
        .collect();

    Ok(outcomes)
}

/// Сводка выплат по раунду.
pub fn summarize(state: &RoundState, outcomes: &[SlotOutcome]) -> RoundSummary {
    let total_wagered = state.total_wager();
    let total_payout: Chips = outcomes.iter().map(|o| o.payout).sum();
    RoundSummary {
        total_wagered,
        total_payout,
        net: total_payout.delta_from(total_wagered),
    }
}
