// tests/reveal_tests.rs

//! Автомат открытия кейса (без зачисления):
//! idle → purchased → animating → revealing → complete, ветка error, reset.

use std::sync::Arc;

use casino_core::domain::{CaseDefinition, CaseId, CaseItem, Chips, Rarity, TransactionId};
use casino_core::effects::{Effect, Sound};
use casino_core::reveal::{
    self, CreditLedger, ErrorCode, ErrorInfo, PurchaseFailure, PurchaseResult, RevealCoordinator,
    RevealError, RevealPhase, RevealState, UserMessage,
};

fn item(id: &str, rarity: Rarity, value: u64) -> CaseItem {
    CaseItem {
        id: id.to_string(),
        name: id.to_uppercase(),
        rarity,
        value: Chips(value),
        weight: 1,
    }
}

fn case() -> CaseDefinition {
    CaseDefinition {
        id: CaseId::new("starter"),
        name: "Starter".into(),
        price: Chips(500),
        items: vec![
            item("coin", Rarity::Common, 100),
            item("crown", Rarity::Legendary, 10_000),
        ],
    }
}

fn purchase(tx: &str) -> PurchaseResult {
    PurchaseResult {
        item: item("crown", Rarity::Legendary, 10_000),
        currency_awarded: Chips(10_000),
        transaction_id: TransactionId::new(tx),
    }
}

fn coordinator() -> RevealCoordinator {
    RevealCoordinator::new(Arc::new(CreditLedger::new()))
}

#[test]
fn begin_emits_purchase_and_moves_to_purchased() {
    let mut coord = coordinator();
    let effects = coord.begin(&case(), Chips(1_000)).expect("begin");

    assert_eq!(
        effects,
        vec![Effect::PurchaseCase {
            case_id: CaseId::new("starter"),
            price: Chips(500),
        }]
    );
    assert_eq!(coord.phase(), RevealPhase::Purchased);
    assert_eq!(coord.state().case_id, Some(CaseId::new("starter")));
    assert!(coord.state().pending_result.is_none());
}

#[test]
fn begin_checks_balance_and_case() {
    let err = reveal::begin(&case(), Chips(499)).unwrap_err();
    assert!(matches!(
        err,
        RevealError::InsufficientBalance {
            price: Chips(500),
            balance: Chips(499)
        }
    ));
    assert_eq!(err.code(), ErrorCode::InsufficientBalance);

    let mut empty = case();
    empty.items.clear();
    let err = reveal::begin(&empty, Chips(1_000)).unwrap_err();
    assert!(matches!(err, RevealError::InvalidCase(_)));
    assert_eq!(err.code().user_message(), UserMessage::InvalidSelection);
}

/// Сценарий: колбэк анимации прилетает три раза подряд – complete ровно один
/// раз, без ошибок.
#[test]
fn triple_animation_complete_reaches_complete_once() {
    let mut coord = coordinator();
    coord.begin(&case(), Chips(1_000)).expect("begin");

    let effects = coord
        .on_purchase_result(Ok(purchase("tx-1")))
        .expect("purchase result");
    assert_eq!(
        effects,
        vec![
            Effect::StartCaseAnimation,
            Effect::PlaySound(Sound::CaseSpin)
        ]
    );
    assert_eq!(coord.phase(), RevealPhase::Animating);

    let first = coord.on_animation_complete().expect("first");
    assert_eq!(coord.phase(), RevealPhase::Revealing);
    assert!(first.contains(&Effect::ShowPrize {
        item_id: "crown".into(),
        rarity: Rarity::Legendary,
        currency_awarded: Chips(10_000),
    }));
    assert!(first.contains(&Effect::PlaySound(Sound::Reveal(Rarity::Legendary))));

    let second = coord.on_animation_complete().expect("second");
    assert!(second.is_empty());
    assert_eq!(coord.phase(), RevealPhase::Complete);

    let snapshot = coord.state().clone();
    let third = coord.on_animation_complete().expect("third");
    assert!(third.is_empty());
    assert_eq!(coord.state(), &snapshot);
    assert!(coord.state().error_info.is_none());
}

#[test]
fn failed_purchase_goes_to_error_with_toast() {
    let mut coord = coordinator();
    coord.begin(&case(), Chips(1_000)).expect("begin");

    let effects = coord
        .on_purchase_result(Err(PurchaseFailure::new(
            ErrorCode::Network,
            "timeout",
        )))
        .expect("purchase result");
    assert_eq!(effects, vec![Effect::ShowToast(UserMessage::ConnectionProblem)]);

    let state = coord.state();
    assert_eq!(state.phase, RevealPhase::Error);
    assert!(state.pending_result.is_none());
    let info = state.error_info.as_ref().expect("error info");
    assert_eq!(info.code, ErrorCode::Network);
    assert!(info.retryable);

    // Из error можно выйти только через reset.
    assert!(coord.on_animation_complete().is_err());
    assert!(coord.begin(&case(), Chips(1_000)).is_err());

    coord.reset();
    assert_eq!(coord.state(), &RevealState::idle());
    coord.begin(&case(), Chips(1_000)).expect("begin after reset");
}

#[test]
fn transitions_out_of_order_are_rejected() {
    let state = RevealState::idle();
    assert!(matches!(
        reveal::on_animation_complete(&state),
        Err(RevealError::WrongPhase {
            phase: RevealPhase::Idle,
            ..
        })
    ));
    assert!(reveal::on_purchase_result(&state, Ok(purchase("tx"))).is_err());

    let mut coord = coordinator();
    coord.begin(&case(), Chips(1_000)).expect("begin");
    assert!(coord.on_animation_complete().is_err());
    coord.on_purchase_result(Ok(purchase("tx"))).expect("result");
    assert!(coord.on_purchase_result(Ok(purchase("tx"))).is_err());
}

#[test]
fn complete_attempt_is_never_reused() {
    let mut coord = coordinator();
    coord.begin(&case(), Chips(1_000)).expect("begin");
    coord.on_purchase_result(Ok(purchase("tx-a"))).expect("result");
    coord.on_animation_complete().expect("reveal");
    coord.on_animation_complete().expect("complete");

    let err = coord.begin(&case(), Chips(1_000)).unwrap_err();
    assert!(matches!(
        err,
        RevealError::WrongPhase {
            phase: RevealPhase::Complete,
            ..
        }
    ));
    assert_eq!(coord.phase(), RevealPhase::Complete);
}

#[test]
fn external_failure_mid_animation() {
    let mut coord = coordinator();
    coord.begin(&case(), Chips(1_000)).expect("begin");
    coord.on_purchase_result(Ok(purchase("tx-f"))).expect("result");

    let effects = coord
        .fail(ErrorInfo::new(ErrorCode::Authentication, "session expired"))
        .expect("fail");
    assert_eq!(
        effects,
        vec![Effect::ShowToast(UserMessage::AuthenticationRequired)]
    );
    assert_eq!(coord.phase(), RevealPhase::Error);

    // Повторная ошибка из error не принимается.
    assert!(coord
        .fail(ErrorInfo::new(ErrorCode::Server, "again"))
        .is_err());
}

#[test]
fn every_error_code_has_its_own_message() {
    let codes = [
        ErrorCode::Network,
        ErrorCode::Authentication,
        ErrorCode::InsufficientBalance,
        ErrorCode::InvalidSelection,
        ErrorCode::Server,
        ErrorCode::CreditFailed,
    ];
    let mut messages: Vec<UserMessage> = codes.iter().map(|c| c.user_message()).collect();
    messages.sort_by_key(|m| m.i18n_key());
    messages.dedup();
    assert_eq!(messages.len(), codes.len());
}

#[test]
fn http_status_classification() {
    assert_eq!(ErrorCode::from_http_status(0), ErrorCode::Network);
    assert_eq!(ErrorCode::from_http_status(504), ErrorCode::Network);
    assert_eq!(ErrorCode::from_http_status(401), ErrorCode::Authentication);
    assert_eq!(ErrorCode::from_http_status(403), ErrorCode::Authentication);
    assert_eq!(ErrorCode::from_http_status(402), ErrorCode::InsufficientBalance);
    assert_eq!(ErrorCode::from_http_status(404), ErrorCode::InvalidSelection);
    assert_eq!(ErrorCode::from_http_status(500), ErrorCode::Server);

    assert!(ErrorCode::Network.is_retryable());
    assert!(ErrorCode::CreditFailed.is_retryable());
    assert!(!ErrorCode::InsufficientBalance.is_retryable());
}

/// Приз уже зачислен – внешний сбой не переводит попытку в error.
#[test]
fn failure_after_credit_is_rejected() {
    let state = reveal::begin(&case(), Chips(1_000)).expect("begin").into_state();
    let state = reveal::on_purchase_result(&state, Ok(purchase("tx-paid")))
        .expect("purchase")
        .into_state();
    let mut state = reveal::on_animation_complete(&state)
        .expect("reveal")
        .into_state();
    state.credited_transaction_id = Some(TransactionId::new("tx-paid"));

    let err = reveal::fail(&state, ErrorInfo::new(ErrorCode::Network, "offline")).unwrap_err();
    assert!(matches!(
        err,
        RevealError::WrongPhase {
            operation: "fail",
            phase: RevealPhase::Revealing,
        }
    ));

    // Без зачисления тот же сбой из revealing допустим.
    state.credited_transaction_id = None;
    let failed = reveal::fail(&state, ErrorInfo::new(ErrorCode::Network, "offline"))
        .expect("fail")
        .into_state();
    assert_eq!(failed.phase, RevealPhase::Error);
    assert!(!failed.is_credited());
}
