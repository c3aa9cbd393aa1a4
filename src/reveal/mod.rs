//! Открытие кейса: покупка → анимация → показ → зачисление.
//!
//! Главная гарантия – выигрыш зачисляется не больше одного раза на
//! транзакцию, сколько бы раз ни прилетали колбэки анимации и что бы ни
//! делал пользователь во время анимации.

pub mod coordinator;
pub mod credit;
pub mod errors;
pub mod machine;
pub mod state;

pub use coordinator::RevealCoordinator;
pub use credit::{credit_if_needed, Claim, ClaimState, CreditLedger, CreditSink, FnCreditSink};
pub use errors::{CreditError, ErrorCode, ErrorInfo, PurchaseFailure, RevealError, UserMessage};
pub use machine::{begin, fail, on_animation_complete, on_purchase_result, reset};
pub use state::{PurchaseResult, RevealPhase, RevealState};
