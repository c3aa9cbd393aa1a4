use tracing::{debug, warn};

use crate::domain::{CaseDefinition, Chips};
use crate::effects::{Effect, Sound, Step};
use crate::reveal::errors::{ErrorInfo, PurchaseFailure, RevealError};
use crate::reveal::state::{PurchaseResult, RevealPhase, RevealState};

/// Начать новую попытку открытия кейса.
///
/// Проверка баланса тут только локальная – настоящую делает сервер при
/// покупке. Всегда возвращает свежее состояние, прошлое не переиспользуется.
pub fn begin(case: &CaseDefinition, balance: Chips) -> Result<Step<RevealState>, RevealError> {
    if !case.is_purchasable() {
        return Err(RevealError::InvalidCase(case.id.to_string()));
    }
    if balance < case.price {
        return Err(RevealError::InsufficientBalance {
            price: case.price,
            balance,
        });
    }

    let state = RevealState {
        phase: RevealPhase::Purchased,
        case_id: Some(case.id.clone()),
        price: case.price,
        ..RevealState::idle()
    };

    debug!(case_id = %case.id, price = case.price.0, "case purchase started");

    let effects = vec![Effect::PurchaseCase {
        case_id: case.id.clone(),
        price: case.price,
    }];
    Ok(Step::new(state, effects))
}

/// Ответ сервера на покупку.
///
/// Успех – запускаем анимацию с готовым результатом. Ошибка – фаза error,
/// ничего не зачисляется.
pub fn on_purchase_result(
    state: &RevealState,
    result: Result<PurchaseResult, PurchaseFailure>,
) -> Result<Step<RevealState>, RevealError> {
    if state.phase != RevealPhase::Purchased {
        return Err(RevealError::WrongPhase {
            operation: "on_purchase_result",
            phase: state.phase,
        });
    }

    let mut next = state.clone();
    match result {
        Ok(result) => {
            debug!(transaction_id = %result.transaction_id, item = %result.item.id, "purchase confirmed");
            next.phase = RevealPhase::Animating;
            next.pending_result = Some(result);
            Ok(Step::new(
                next,
                vec![
                    Effect::StartCaseAnimation,
                    Effect::PlaySound(Sound::CaseSpin),
                ],
            ))
        }
        Err(failure) => {
            warn!(code = ?failure.code, message = %failure.message, "purchase failed");
            let info = ErrorInfo::new(failure.code, failure.message);
            let toast = Effect::ShowToast(info.user_message());
            next.phase = RevealPhase::Error;
            next.error_info = Some(info);
            Ok(Step::new(next, vec![toast]))
        }
    }
}

/// Анимация закончилась.
///
/// animating → revealing (карусель доехала, показываем приз),
/// revealing → complete (анимация показа доиграла),
/// complete → то же самое состояние без эффектов: колбэки анимации могут
/// прилететь повторно при перерисовке.
pub fn on_animation_complete(state: &RevealState) -> Result<Step<RevealState>, RevealError> {
    match state.phase {
        RevealPhase::Animating => {
            let result = state
                .pending_result
                .as_ref()
                .ok_or(RevealError::Internal("animating без результата покупки"))?;
            let mut next = state.clone();
            next.phase = RevealPhase::Revealing;
            let effects = vec![
                Effect::ShowPrize {
                    item_id: result.item.id.clone(),
                    rarity: result.item.rarity,
                    currency_awarded: result.currency_awarded,
                },
                Effect::PlaySound(Sound::Reveal(result.item.rarity)),
            ];
            debug!(transaction_id = %result.transaction_id, "reveal started");
            Ok(Step::new(next, effects))
        }
        RevealPhase::Revealing => {
            let mut next = state.clone();
            next.phase = RevealPhase::Complete;
            Ok(Step::quiet(next))
        }
        RevealPhase::Complete => Ok(Step::quiet(state.clone())),
        phase => Err(RevealError::WrongPhase {
            operation: "on_animation_complete",
            phase,
        }),
    }
}

/// Внешний сбой посреди попытки (обрыв, упавшая анимация).
///
/// Из complete и error не переводим: завершённую попытку не портим, а
/// повторная ошибка ничего не добавляет. Зачисленный приз тоже не портим:
/// токен зачисления живёт только в revealing/complete.
pub fn fail(state: &RevealState, info: ErrorInfo) -> Result<Step<RevealState>, RevealError> {
    if state.is_credited() {
        return Err(RevealError::WrongPhase {
            operation: "fail",
            phase: state.phase,
        });
    }
    match state.phase {
        RevealPhase::Idle
        | RevealPhase::Purchased
        | RevealPhase::Animating
        | RevealPhase::Revealing => {
            warn!(phase = ?state.phase, code = ?info.code, "reveal attempt failed");
            let toast = Effect::ShowToast(info.user_message());
            let mut next = state.clone();
            next.phase = RevealPhase::Error;
            next.error_info = Some(info);
            Ok(Step::new(next, vec![toast]))
        }
        phase => Err(RevealError::WrongPhase {
            operation: "fail",
            phase,
        }),
    }
}

/// Сбросить всё и вернуться в idle. Можно из любой фазы.
pub fn reset() -> RevealState {
    RevealState::idle()
}
