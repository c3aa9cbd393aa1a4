use serde::{Deserialize, Serialize};

use crate::domain::{CaseId, CaseItem, Chips, TransactionId};
use crate::reveal::errors::ErrorInfo;

/// Фаза открытия кейса.
///
/// idle → purchased → animating → revealing → complete;
/// idle/purchased/animating/revealing → error; error → idle только через reset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    Idle,
    Purchased,
    Animating,
    Revealing,
    Complete,
    Error,
}

/// Успешный ответ сервера на покупку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseResult {
    pub item: CaseItem,
    pub currency_awarded: Chips,
    pub transaction_id: TransactionId,
}

/// Состояние одной попытки открытия кейса.
///
/// `credited_transaction_id` – токен идемпотентности: ставится один раз,
/// только в revealing/complete, и только после успешного зачисления.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealState {
    pub phase: RevealPhase,
    pub case_id: Option<CaseId>,
    pub price: Chips,
    pub pending_result: Option<PurchaseResult>,
    pub credited_transaction_id: Option<TransactionId>,
    pub error_info: Option<ErrorInfo>,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::idle()
    }
}

impl RevealState {
    pub fn idle() -> Self {
        Self {
            phase: RevealPhase::Idle,
            case_id: None,
            price: Chips::ZERO,
            pending_result: None,
            credited_transaction_id: None,
            error_info: None,
        }
    }

    pub fn is_credited(&self) -> bool {
        self.credited_transaction_id.is_some()
    }

    /// Зачисление разрешено только после того, как приз показан.
    pub fn can_credit(&self) -> bool {
        matches!(self.phase, RevealPhase::Revealing | RevealPhase::Complete)
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.pending_result.as_ref().map(|r| &r.transaction_id)
    }
}
