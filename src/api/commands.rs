//! Сворачивание ответов бэкенда в состояние раунда.
//!
//! UI шлёт действие (эффект `SendAction`), бэкенд отвечает картами и,
//! возможно, авторитетным снимком. Здесь ответ применяется к зеркалу:
//! действие → добор дилера (если раунд ушёл в Resolving) → сверка со снимком.

use crate::effects::Step;
use crate::engine::{apply_action, reconcile, settle_dealer, HandEngine, RoundState};
use crate::infra::mapping::{
    action_from_api, cards_from_api, snapshot_from_api, start_round_from_api,
};

use super::dto::{ActionResponseDto, StartRoundResponseDto};
use super::errors::ApiError;

/// Начать раунд по ответу бэкенда на ставку.
pub fn fold_start_round(
    engine: &HandEngine,
    dto: &StartRoundResponseDto,
) -> Result<Step<RoundState>, ApiError> {
    let input = start_round_from_api(dto)?;
    Ok(engine.start_round(
        input.round_id,
        input.player_hand,
        input.dealer_hand,
        input.wager,
    )?)
}

/// Применить ответ бэкенда на действие игрока.
pub fn fold_action_response(
    state: &RoundState,
    dto: &ActionResponseDto,
) -> Result<Step<RoundState>, ApiError> {
    if dto.round_id != state.round_id.as_str() {
        return Err(ApiError::BadPayload(format!(
            "response for round {} while playing {}",
            dto.round_id, state.round_id
        )));
    }

    let action = action_from_api(dto)?;
    let mut step = apply_action(state, action)?;

    let snapshot = dto.snapshot.as_ref().map(snapshot_from_api).transpose()?;
    let dealer_draws = cards_from_api(&dto.dealer_draws)?;

    // Без карт дилера доигрывать нечего: если сервер уже рассчитал раунд,
    // это покроет сверка со снимком. Карты дилера посреди игры рук –
    // WrongPhase из settle_dealer.
    if !dealer_draws.is_empty() {
        let settled = settle_dealer(&step.state, &dealer_draws)?;
        step.state = settled.state;
        step.effects.extend(settled.effects);
    }

    if let Some(snapshot) = snapshot {
        let synced = reconcile(&step.state, &snapshot)?;
        step.state = synced.state;
        step.effects.extend(synced.effects);
    }

    Ok(step)
}
