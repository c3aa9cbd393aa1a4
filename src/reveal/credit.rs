//! Зачисление выигрыша – единственный необратимый эффект открытия кейса.
//!
//! Защита от двойного зачисления двухуровневая:
//! - `credited_transaction_id` в самом состоянии;
//! - `CreditLedger`, общий для всех попыток, с заявками по transaction id.
//!   Заявка ставится синхронно ДО первого `.await`, поэтому два
//!   параллельных вызова не могут оба дойти до функции зачисления.

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::TransactionId;
use crate::effects::{Effect, Sound, Step};
use crate::reveal::errors::{CreditError, ErrorCode, ErrorInfo, RevealError};
use crate::reveal::state::{PurchaseResult, RevealState};

/// Внешняя функция зачисления (ходит в бэкенд).
#[async_trait]
pub trait CreditSink: Send + Sync {
    async fn credit(
        &self,
        result: &PurchaseResult,
        transaction_id: &TransactionId,
    ) -> Result<(), CreditError>;
}

/// Обёртка, чтобы передать обычное замыкание `(result, tx) -> Future`.
pub struct FnCreditSink<F>(pub F);

#[async_trait]
impl<F, Fut> CreditSink for FnCreditSink<F>
where
    F: Fn(PurchaseResult, TransactionId) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CreditError>> + Send + 'static,
{
    async fn credit(
        &self,
        result: &PurchaseResult,
        transaction_id: &TransactionId,
    ) -> Result<(), CreditError> {
        (self.0)(result.clone(), transaction_id.clone()).await
    }
}

/// Состояние заявки на зачисление.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimState {
    InFlight,
    Credited,
}

/// Что получилось при попытке взять заявку.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// Заявка наша – можно звать функцию зачисления.
    Acquired,
    /// Кто-то уже зачисляет прямо сейчас.
    InFlight,
    AlreadyCredited,
}

/// Реестр зачислений по transaction id.
///
/// Один на всё приложение (или на пользователя); переживает `reset()`
/// попыток, так что устаревший экземпляр состояния не приведёт ни к
/// двойному, ни к потерянному зачислению.
#[derive(Debug, Default)]
pub struct CreditLedger {
    entries: Mutex<HashMap<TransactionId, ClaimState>>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_claim(&self, transaction_id: &TransactionId) -> Claim {
        let mut entries = self.entries.lock();
        match entries.get(transaction_id) {
            Some(ClaimState::Credited) => Claim::AlreadyCredited,
            Some(ClaimState::InFlight) => Claim::InFlight,
            None => {
                entries.insert(transaction_id.clone(), ClaimState::InFlight);
                Claim::Acquired
            }
        }
    }

    pub fn mark_credited(&self, transaction_id: &TransactionId) {
        self.entries
            .lock()
            .insert(transaction_id.clone(), ClaimState::Credited);
    }

    /// Зачисление упало – отпускаем заявку, чтобы повтор мог её взять.
    pub fn release(&self, transaction_id: &TransactionId) {
        let mut entries = self.entries.lock();
        if entries.get(transaction_id) == Some(&ClaimState::InFlight) {
            entries.remove(transaction_id);
        }
    }

    pub fn state_of(&self, transaction_id: &TransactionId) -> Option<ClaimState> {
        self.entries.lock().get(transaction_id).copied()
    }

    pub fn is_credited(&self, transaction_id: &TransactionId) -> bool {
        self.state_of(transaction_id) == Some(ClaimState::Credited)
    }
}

/// Зачислить выигрыш, если это ещё не сделано.
///
/// - токен уже стоит → состояние без изменений;
/// - заявку держит другой вызов → состояние без изменений;
/// - транзакция уже зачислена (другим экземпляром) → только проставить токен;
/// - иначе ровно один вызов `sink`; токен ставится только после успеха.
///
/// Ошибка зачисления не бросается: фаза остаётся прежней, в `error_info`
/// пишется восстановимый `CreditFailed`, и вызов можно повторить.
pub async fn credit_if_needed<C>(
    state: &RevealState,
    ledger: &CreditLedger,
    sink: &C,
) -> Result<Step<RevealState>, RevealError>
where
    C: CreditSink + ?Sized,
{
    if state.is_credited() {
        return Ok(Step::quiet(state.clone()));
    }
    if !state.can_credit() {
        return Err(RevealError::WrongPhase {
            operation: "credit_if_needed",
            phase: state.phase,
        });
    }
    let result = state
        .pending_result
        .as_ref()
        .ok_or(RevealError::Internal("фаза показа без результата покупки"))?;
    let tx = &result.transaction_id;

    match ledger.try_claim(tx) {
        Claim::InFlight => {
            debug!(transaction_id = %tx, "credit already in flight, skipping");
            return Ok(Step::quiet(state.clone()));
        }
        Claim::AlreadyCredited => {
            debug!(transaction_id = %tx, "transaction already credited, syncing token");
            let mut next = state.clone();
            next.credited_transaction_id = Some(tx.clone());
            clear_credit_error(&mut next);
            return Ok(Step::quiet(next));
        }
        Claim::Acquired => {}
    }

    let claim = ClaimGuard::new(ledger, tx);
    let mut next = state.clone();
    match sink.credit(result, tx).await {
        Ok(()) => {
            claim.commit();
            info!(
                transaction_id = %tx,
                amount = result.currency_awarded.0,
                "case winnings credited"
            );
            next.credited_transaction_id = Some(tx.clone());
            clear_credit_error(&mut next);
            let effects = vec![
                Effect::Credited {
                    transaction_id: tx.clone(),
                    amount: result.currency_awarded,
                },
                Effect::PlaySound(Sound::Coins),
            ];
            Ok(Step::new(next, effects))
        }
        Err(err) => {
            drop(claim);
            warn!(transaction_id = %tx, %err, "credit failed, will need a retry");
            let info = ErrorInfo::new(ErrorCode::CreditFailed, err.to_string());
            let toast = Effect::ShowToast(info.user_message());
            next.error_info = Some(info);
            Ok(Step::new(next, vec![toast]))
        }
    }
}

/// Заявка, которая отпускается сама, если future зачисления бросили
/// посреди `.await` (например, пользователь ушёл со страницы).
struct ClaimGuard<'a> {
    ledger: &'a CreditLedger,
    transaction_id: &'a TransactionId,
    committed: bool,
}

impl<'a> ClaimGuard<'a> {
    fn new(ledger: &'a CreditLedger, transaction_id: &'a TransactionId) -> Self {
        Self {
            ledger,
            transaction_id,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.ledger.mark_credited(self.transaction_id);
        self.committed = true;
    }
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.ledger.release(self.transaction_id);
        }
    }
}

fn clear_credit_error(state: &mut RevealState) {
    if state
        .error_info
        .as_ref()
        .is_some_and(|e| e.code == ErrorCode::CreditFailed)
    {
        state.error_info = None;
    }
}
