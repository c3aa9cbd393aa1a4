use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{RoundId, TransactionId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// В проде ID раундов и транзакций выдаёт бэкенд; этот генератор нужен
/// dev-симулятору и тестам, которые играют роль сервера.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    round_counter: AtomicU64,
    transaction_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("dev")
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            round_counter: AtomicU64::new(1),
            transaction_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        let n = self.round_counter.fetch_add(1, Ordering::Relaxed);
        RoundId(format!("{}-round-{n}", self.prefix))
    }

    #[inline]
    pub fn next_transaction_id(&self) -> TransactionId {
        let n = self.transaction_counter.fetch_add(1, Ordering::Relaxed);
        TransactionId(format!("{}-tx-{n}", self.prefix))
    }
}
