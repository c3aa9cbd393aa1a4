use std::sync::Arc;

use crate::domain::{CaseDefinition, Chips};
use crate::effects::Effect;
use crate::reveal::credit::{credit_if_needed, CreditLedger, CreditSink};
use crate::reveal::errors::{ErrorInfo, PurchaseFailure, RevealError};
use crate::reveal::machine;
use crate::reveal::state::{PurchaseResult, RevealPhase, RevealState};

/// Фасад над чистыми функциями открытия кейса: держит текущее состояние
/// попытки и общий реестр зачислений. Удобен UI-слою с одним экземпляром
/// на экран кейсов.
#[derive(Debug)]
pub struct RevealCoordinator {
    state: RevealState,
    ledger: Arc<CreditLedger>,
}

impl RevealCoordinator {
    pub fn new(ledger: Arc<CreditLedger>) -> Self {
        Self {
            state: RevealState::idle(),
            ledger,
        }
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.phase
    }

    pub fn ledger(&self) -> &Arc<CreditLedger> {
        &self.ledger
    }

    /// Новая попытка возможна только из idle: завершённую или упавшую
    /// попытку сначала нужно сбросить.
    pub fn begin(&mut self, case: &CaseDefinition, balance: Chips) -> Result<Vec<Effect>, RevealError> {
        if self.state.phase != RevealPhase::Idle {
            return Err(RevealError::WrongPhase {
                operation: "begin",
                phase: self.state.phase,
            });
        }
        let step = machine::begin(case, balance)?;
        self.state = step.state;
        Ok(step.effects)
    }

    pub fn on_purchase_result(
        &mut self,
        result: Result<PurchaseResult, PurchaseFailure>,
    ) -> Result<Vec<Effect>, RevealError> {
        let step = machine::on_purchase_result(&self.state, result)?;
        self.state = step.state;
        Ok(step.effects)
    }

    pub fn on_animation_complete(&mut self) -> Result<Vec<Effect>, RevealError> {
        let step = machine::on_animation_complete(&self.state)?;
        self.state = step.state;
        Ok(step.effects)
    }

    pub fn fail(&mut self, info: ErrorInfo) -> Result<Vec<Effect>, RevealError> {
        let step = machine::fail(&self.state, info)?;
        self.state = step.state;
        Ok(step.effects)
    }

    pub async fn credit_if_needed<C>(&mut self, sink: &C) -> Result<Vec<Effect>, RevealError>
    where
        C: CreditSink + ?Sized,
    {
        let step = credit_if_needed(&self.state, &self.ledger, sink).await?;
        self.state = step.state;
        Ok(step.effects)
    }

    /// Реестр зачислений НЕ сбрасывается: он живёт дольше попыток.
    pub fn reset(&mut self) {
        self.state = machine::reset();
    }
}
