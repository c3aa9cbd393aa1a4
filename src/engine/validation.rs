use serde::{Deserialize, Serialize};

use crate::domain::SlotIndex;
use crate::engine::actions::ActionKind;
use crate::engine::errors::{EngineError, IllegalReason};
use crate::engine::round::{RoundPhase, RoundState};

/// Какие кнопки UI может включить для активной руки.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub hit: bool,
    pub stand: bool,
    pub double: bool,
    pub split: bool,
}

impl LegalActions {
    pub fn allows(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Hit => self.hit,
            ActionKind::Stand => self.stand,
            ActionKind::Double => self.double,
            ActionKind::Split => self.split,
        }
    }

    pub fn none(&self) -> bool {
        !(self.hit || self.stand || self.double || self.split)
    }
}

/// Легальные действия в текущем состоянии раунда.
pub fn legal_actions(state: &RoundState) -> LegalActions {
    match state.active_slot() {
        Some(slot) => LegalActions {
            hit: true,
            stand: true,
            double: slot.can_double,
            split: slot.can_split,
        },
        None => LegalActions::default(),
    }
}

/// Проверка, можно ли применить действие к активной руке.
/// Возвращает индекс активной руки.
pub fn validate_action(state: &RoundState, kind: ActionKind) -> Result<SlotIndex, EngineError> {
    if state.phase != RoundPhase::AwaitingAction {
        return Err(EngineError::illegal(
            kind,
            IllegalReason::NotAwaitingAction(state.phase),
        ));
    }

    let idx = state.active_slot_index;
    let slot = state
        .slots
        .get(idx)
        .ok_or_else(|| EngineError::illegal(kind, IllegalReason::NoActiveSlot))?;

    if !slot.is_playing() {
        return Err(EngineError::illegal(
            kind,
            IllegalReason::SlotNotPlaying {
                slot: idx,
                status: slot.status,
            },
        ));
    }

    match kind {
        ActionKind::Hit | ActionKind::Stand => Ok(idx),
        ActionKind::Double if slot.can_double => Ok(idx),
        ActionKind::Double => Err(EngineError::illegal(kind, IllegalReason::CannotDouble)),
        ActionKind::Split if slot.can_split => Ok(idx),
        ActionKind::Split => Err(EngineError::illegal(kind, IllegalReason::CannotSplit)),
    }
}
