//! Сверка клиентского зеркала раунда с авторитетным состоянием сервера.
//!
//! Сервер – источник истины. Зеркало нужно только чтобы UI мог сразу
//! показать результат действия; на каждый ответ сервера зеркало
//! перезаписывается, а расхождения логируются и отдаются UI эффектом.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Card, Chips, Hand, RoundId, SlotIndex};
use crate::effects::{Effect, Step};
use crate::engine::errors::EngineError;
use crate::engine::round::{PlayerHandSlot, RoundPhase, RoundState, SlotStatus};
use crate::engine::round_history::RoundEventKind;

/// Рука игрока так, как её видит сервер.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerHand {
    pub cards: Vec<Card>,
    pub wager: Chips,
    pub status: SlotStatus,
}

/// Авторитетный снимок раунда из ответа сервера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerRoundSnapshot {
    pub round_id: RoundId,
    pub hands: Vec<ServerHand>,
    pub dealer_cards: Vec<Card>,
    pub dealer_hole_card_revealed: bool,
    /// None, если играющих рук не осталось.
    pub active_hand_index: Option<SlotIndex>,
    pub phase: RoundPhase,
}

/// Одно расхождение между зеркалом и сервером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Divergence {
    SlotCount { client: usize, server: usize },
    SlotCards { slot: SlotIndex },
    SlotStatus {
        slot: SlotIndex,
        client: SlotStatus,
        server: SlotStatus,
    },
    SlotWager {
        slot: SlotIndex,
        client: Chips,
        server: Chips,
    },
    DealerCards,
    Phase { client: RoundPhase, server: RoundPhase },
    ActiveSlot { client: SlotIndex, server: SlotIndex },
}

/// Найти все расхождения зеркала со снимком сервера.
pub fn diff_snapshot(state: &RoundState, snapshot: &ServerRoundSnapshot) -> Vec<Divergence> {
    let mut out = Vec::new();

    if state.slots.len() != snapshot.hands.len() {
        out.push(Divergence::SlotCount {
            client: state.slots.len(),
            server: snapshot.hands.len(),
        });
    }

    for (slot, (ours, theirs)) in state.slots.iter().zip(&snapshot.hands).enumerate() {
        if ours.hand.cards != theirs.cards {
            out.push(Divergence::SlotCards { slot });
        }
        if ours.status != theirs.status {
            out.push(Divergence::SlotStatus {
                slot,
                client: ours.status,
                server: theirs.status,
            });
        }
        if ours.wager != theirs.wager {
            out.push(Divergence::SlotWager {
                slot,
                client: ours.wager,
                server: theirs.wager,
            });
        }
    }

    if state.dealer_hand.cards != snapshot.dealer_cards {
        out.push(Divergence::DealerCards);
    }
    if state.phase != snapshot.phase {
        out.push(Divergence::Phase {
            client: state.phase,
            server: snapshot.phase,
        });
    }

    let server_active = snapshot.active_hand_index.unwrap_or(snapshot.hands.len());
    if state.active_slot_index != server_active {
        out.push(Divergence::ActiveSlot {
            client: state.active_slot_index,
            server: server_active,
        });
    }

    out
}

fn validate_snapshot(snapshot: &ServerRoundSnapshot) -> Result<(), EngineError> {
    if snapshot.hands.is_empty() {
        return Err(EngineError::InvalidSnapshot("нет ни одной руки игрока"));
    }
    if snapshot.dealer_cards.is_empty() {
        return Err(EngineError::InvalidSnapshot("нет карт дилера"));
    }

    match (snapshot.phase, snapshot.active_hand_index) {
        (RoundPhase::AwaitingAction, Some(idx)) => match snapshot.hands.get(idx) {
            Some(hand) if hand.status == SlotStatus::Playing => Ok(()),
            _ => Err(EngineError::InvalidSnapshot(
                "активная рука не существует или уже закрыта",
            )),
        },
        (RoundPhase::AwaitingAction, None) => {
            Err(EngineError::InvalidSnapshot("ждём действия, но активной руки нет"))
        }
        (_, Some(_)) => Err(EngineError::InvalidSnapshot(
            "раунд уже не ждёт действия, но активная рука указана",
        )),
        (_, None) => {
            if snapshot.hands.iter().any(|h| h.status == SlotStatus::Playing) {
                Err(EngineError::InvalidSnapshot("в закрытом раунде осталась играющая рука"))
            } else {
                Ok(())
            }
        }
    }
}

/// Перезаписать зеркало снимком сервера.
///
/// Правила и история остаются нашими; глубина сплитов для рук, которых в
/// зеркале не было, берётся по максимуму (число сплитов в раунде), чтобы
/// лимит сплитов не ослаб.
pub fn reconcile(
    state: &RoundState,
    snapshot: &ServerRoundSnapshot,
) -> Result<Step<RoundState>, EngineError> {
    if state.round_id != snapshot.round_id {
        return Err(EngineError::RoundMismatch {
            expected: state.round_id.clone(),
            got: snapshot.round_id.clone(),
        });
    }
    validate_snapshot(snapshot)?;

    let divergences = diff_snapshot(state, snapshot);
    let mut next = state.clone();
    let rules = next.rules;
    let max_depth = u8::try_from(snapshot.hands.len().saturating_sub(1)).unwrap_or(u8::MAX);

    next.slots = snapshot
        .hands
        .iter()
        .enumerate()
        .map(|(idx, server_hand)| {
            let mut slot = PlayerHandSlot::new(Hand::new(server_hand.cards.clone()), server_hand.wager);
            slot.status = server_hand.status;
            slot.split_depth = state
                .slots
                .get(idx)
                .map(|s| s.split_depth)
                .unwrap_or(max_depth);
            slot.refresh_flags(&rules);
            slot
        })
        .collect();
    next.dealer_hand = Hand::new(snapshot.dealer_cards.clone());
    next.dealer_hole_card_revealed = snapshot.dealer_hole_card_revealed;
    next.phase = snapshot.phase;
    next.active_slot_index = snapshot.active_hand_index.unwrap_or(next.slots.len());

    if divergences.is_empty() {
        debug!(round_id = %state.round_id, "mirror matches server");
        return Ok(Step::quiet(next));
    }

    warn!(
        round_id = %state.round_id,
        count = divergences.len(),
        ?divergences,
        "mirror diverged from server, resynced"
    );
    next.history.push(RoundEventKind::Reconciled {
        divergences: divergences.clone(),
    });

    let effects = vec![Effect::Resynced {
        round_id: next.round_id.clone(),
        divergences,
    }];
    Ok(Step::new(next, effects))
}
