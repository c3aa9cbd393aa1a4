use crate::engine::{compute_outcome, legal_actions, RoundPhase, RoundState, SlotOutcome};
use crate::reveal::{RevealPhase, RevealState};

use super::dto::{RevealViewDto, RoundViewDto, SlotViewDto};

/// Сформировать DTO раунда для фронта.
///
/// Закрытую карту дилера не показываем, пока она не открыта.
pub fn build_round_view(state: &RoundState) -> RoundViewDto {
    let outcomes: Vec<SlotOutcome> = if state.phase == RoundPhase::Settled {
        compute_outcome(state).unwrap_or_default()
    } else {
        Vec::new()
    };

    let slots = state
        .slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let value = slot.hand.value();
            let outcome = outcomes.iter().find(|o| o.slot_index == index);
            SlotViewDto {
                index,
                cards: slot.hand.cards.iter().map(|c| c.to_string()).collect(),
                total: value.total,
                soft: value.soft,
                status: slot.status,
                wager: slot.wager,
                is_active: state.phase == RoundPhase::AwaitingAction
                    && index == state.active_slot_index,
                outcome: outcome.map(|o| o.outcome),
                payout: outcome.map(|o| o.payout),
            }
        })
        .collect();

    let visible_dealer = if state.dealer_hole_card_revealed {
        state.dealer_hand.clone()
    } else {
        state.dealer_hand.cards.iter().take(1).copied().collect::<Vec<_>>().into()
    };

    RoundViewDto {
        round_id: state.round_id.to_string(),
        phase: state.phase,
        dealer_cards: visible_dealer.cards.iter().map(|c| c.to_string()).collect(),
        dealer_total: visible_dealer.total(),
        dealer_hole_card_revealed: state.dealer_hole_card_revealed,
        slots,
        legal_actions: legal_actions(state),
        total_wager: state.total_wager(),
    }
}

/// Сформировать DTO открытия кейса.
pub fn build_reveal_view(state: &RevealState) -> RevealViewDto {
    let shown = matches!(state.phase, RevealPhase::Revealing | RevealPhase::Complete);
    let prize = state.pending_result.as_ref().filter(|_| shown);

    RevealViewDto {
        phase: state.phase,
        case_id: state.case_id.as_ref().map(|id| id.to_string()),
        prize_item_id: prize.map(|r| r.item.id.clone()),
        prize_rarity: prize.map(|r| r.item.rarity),
        currency_awarded: prize.map(|r| r.currency_awarded),
        credited: state.is_credited(),
        error: state.error_info.as_ref().map(|e| e.user_message()),
        can_retry_credit: state
            .error_info
            .as_ref()
            .is_some_and(|e| e.retryable && state.can_credit() && !state.is_credited()),
    }
}
