// tests/infra_test.rs

//! Инфраструктура: генерация ID, RNG симулятора сервера, маппинги.

use casino_core::api::{ActionResponseDto, RoundSnapshotDto};
use casino_core::domain::{Card, CaseDefinition, CaseId, CaseItem, Chips, Rarity, Shoe};
use casino_core::engine::{ActionKind, BlackjackAction, RoundPhase, SlotStatus};
use casino_core::infra::{
    action_from_api, card_from_api, snapshot_from_api, DeterministicRng, IdGenerator,
    RandomSource, SystemRng,
};

//
// ---------- helpers ----------
//

fn c(s: &str) -> Card {
    s.parse().expect("valid card literal")
}

fn weighted_case() -> CaseDefinition {
    let item = |id: &str, weight: u32| CaseItem {
        id: id.to_string(),
        name: id.to_string(),
        rarity: Rarity::Common,
        value: Chips(10),
        weight,
    };
    CaseDefinition {
        id: CaseId::new("weighted"),
        name: "Weighted".into(),
        price: Chips(1),
        items: vec![item("common", 9), item("never", 0), item("rare", 1)],
    }
}

//
// ---------- ids ----------
//

#[test]
fn id_generator_is_monotonic_and_prefixed() {
    let ids = IdGenerator::new("test");
    assert_eq!(ids.next_round_id().as_str(), "test-round-1");
    assert_eq!(ids.next_round_id().as_str(), "test-round-2");
    assert_eq!(ids.next_transaction_id().as_str(), "test-tx-1");

    let default_ids = IdGenerator::default();
    assert!(default_ids.next_round_id().as_str().starts_with("dev-"));
}

//
// ---------- rng ----------
//

#[test]
fn deterministic_rng_repeats_shuffles() {
    let mut a = DeterministicRng::from_seed(123);
    let mut b = DeterministicRng::from_seed(123);

    let mut shoe_a = Shoe::with_decks(2);
    let mut shoe_b = Shoe::with_decks(2);
    a.shuffle_shoe(&mut shoe_a);
    b.shuffle_shoe(&mut shoe_b);
    assert_eq!(shoe_a, shoe_b);
    assert_ne!(shoe_a, Shoe::with_decks(2));
    assert_eq!(shoe_a.len(), 104);
}

#[test]
fn pick_item_follows_weights() {
    let case = weighted_case();
    let mut rng = DeterministicRng::from_seed(9);

    let mut common = 0;
    let mut rare = 0;
    for _ in 0..2_000 {
        match rng.pick_item(&case).map(|i| i.id.as_str()) {
            Some("common") => common += 1,
            Some("rare") => rare += 1,
            other => panic!("unexpected pick: {other:?}"),
        }
    }
    assert!(common > rare * 4, "common={common} rare={rare}");
    assert!(rare > 0);

    let mut empty = weighted_case();
    empty.items.clear();
    assert!(rng.pick_item(&empty).is_none());
}

#[test]
fn system_rng_stays_in_range() {
    let mut rng = SystemRng;
    for _ in 0..100 {
        assert!(rng.below(6) < 6);
    }
    assert!(rng.pick_item(&weighted_case()).is_some());
}

//
// ---------- mapping ----------
//

#[test]
fn card_mapping_accepts_backend_formats() {
    assert_eq!(card_from_api("Ah").expect("Ah"), c("Ah"));
    assert_eq!(card_from_api("10d").expect("10d"), c("Td"));
    assert!(card_from_api("").is_err());
}

#[test]
fn action_mapping_checks_card_count() {
    let dto = |action: ActionKind, cards: &[&str]| ActionResponseDto {
        round_id: "r".into(),
        action,
        cards: cards.iter().map(|s| s.to_string()).collect(),
        dealer_draws: Vec::new(),
        snapshot: None,
    };

    assert_eq!(
        action_from_api(&dto(ActionKind::Hit, &["5c"])).expect("hit"),
        BlackjackAction::Hit(c("5c"))
    );
    assert_eq!(
        action_from_api(&dto(ActionKind::Stand, &[])).expect("stand"),
        BlackjackAction::Stand
    );
    assert_eq!(
        action_from_api(&dto(ActionKind::Split, &["5c", "Kd"])).expect("split"),
        BlackjackAction::Split(c("5c"), c("Kd"))
    );

    assert!(action_from_api(&dto(ActionKind::Stand, &["5c"])).is_err());
    assert!(action_from_api(&dto(ActionKind::Double, &[])).is_err());
    assert!(action_from_api(&dto(ActionKind::Split, &["5c"])).is_err());
}

#[test]
fn snapshot_mapping_parses_cards() {
    let dto: RoundSnapshotDto = serde_json::from_str(
        r#"{
            "round_id": "r-1",
            "hands": [
                {"cards": ["8c", "3h"], "wager": 100, "status": "Playing"},
                {"cards": ["8d", "Jc"], "wager": 100, "status": "Stood"}
            ],
            "dealer_cards": ["9h"],
            "active_hand_index": 0,
            "phase": "AwaitingAction"
        }"#,
    )
    .expect("snapshot json");

    let snapshot = snapshot_from_api(&dto).expect("mapped");
    assert_eq!(snapshot.hands.len(), 2);
    assert_eq!(snapshot.hands[1].cards, vec![c("8d"), c("Jc")]);
    assert_eq!(snapshot.hands[1].status, SlotStatus::Stood);
    assert_eq!(snapshot.active_hand_index, Some(0));
    assert_eq!(snapshot.phase, RoundPhase::AwaitingAction);
    assert!(!snapshot.dealer_hole_card_revealed);

    let mut bad = dto;
    bad.dealer_cards = vec!["??".into()];
    assert!(snapshot_from_api(&bad).is_err());
}
