// tests/engine_actions_tests.rs

//! Тесты action-логики движка блэкджека:
//! - Hit добавляет карту, перебор закрывает руку
//! - Stand закрывает руку и переключает активную
//! - Double удваивает ставку и всегда закрывает руку
//! - Split создаёт новую руку с той же ставкой
//! - Авто-переход к следующей руке и в Resolving

use casino_core::domain::{Card, Chips, Hand, RoundId};
use casino_core::effects::{Effect, Sound};
use casino_core::engine::{
    apply_action, legal_actions, request_action, ActionKind, BlackjackAction, HandEngine,
    RoundEventKind, RoundPhase, RoundState, SlotStatus, TableRules,
};

fn c(s: &str) -> Card {
    s.parse().expect("valid card literal")
}

fn hand(cards: &[&str]) -> Hand {
    Hand::new(cards.iter().map(|s| c(s)).collect())
}

/// Хелпер: стартует раунд со ставкой 100 и одной открытой картой дилера.
fn start(player: &[&str], dealer_up: &str) -> RoundState {
    start_with_rules(TableRules::standard(), player, dealer_up)
}

fn start_with_rules(rules: TableRules, player: &[&str], dealer_up: &str) -> RoundState {
    HandEngine::new(rules)
        .start_round(
            RoundId::new("r-1"),
            hand(player),
            hand(&[dealer_up]),
            Chips(100),
        )
        .expect("start_round должен пройти")
        .into_state()
}

fn act(state: &RoundState, action: BlackjackAction) -> RoundState {
    apply_action(state, action)
        .expect("действие должно быть легальным")
        .into_state()
}

//
// START
//

#[test]
fn start_round_awaits_first_action() {
    let state = start(&["Tc", "6d"], "9h");

    assert_eq!(state.phase, RoundPhase::AwaitingAction);
    assert_eq!(state.slots.len(), 1);
    assert_eq!(state.active_slot_index, 0);
    assert!(!state.dealer_hole_card_revealed);

    let slot = &state.slots[0];
    assert_eq!(slot.status, SlotStatus::Playing);
    assert_eq!(slot.wager, Chips(100));
    assert!(slot.can_double);
    assert!(!slot.can_split);

    let legal = legal_actions(&state);
    assert!(legal.hit && legal.stand && legal.double);
    assert!(!legal.split);

    assert!(matches!(
        state.history.events[0].kind,
        RoundEventKind::RoundStarted { .. }
    ));
}

#[test]
fn start_round_with_blackjack_goes_straight_to_resolving() {
    let step = HandEngine::default()
        .start_round(
            RoundId::new("r-bj"),
            hand(&["As", "Kh"]),
            hand(&["9c"]),
            Chips(100),
        )
        .expect("start_round");

    assert!(step.has_effect(|e| *e == Effect::PlaySound(Sound::Blackjack)));
    assert!(step.has_effect(|e| matches!(e, Effect::RequestDealerPlay { .. })));

    let state = step.into_state();
    assert_eq!(state.slots[0].status, SlotStatus::Blackjack);
    assert_eq!(state.phase, RoundPhase::Resolving);
    assert!(legal_actions(&state).none());
}

//
// HIT
//

/// Сценарий: [T♣,6♦] берёт 8♠ → 24, перебор, раунд уходит к дилеру.
#[test]
fn hit_to_bust_closes_slot_and_advances() {
    let state = start(&["Tc", "6d"], "9h");

    let step = apply_action(&state, BlackjackAction::Hit(c("8s"))).expect("hit");
    assert!(step.has_effect(|e| *e == Effect::PlaySound(Sound::Bust)));
    assert!(step.has_effect(|e| matches!(e, Effect::RequestDealerPlay { .. })));

    let state = step.into_state();
    let slot = &state.slots[0];
    assert_eq!(slot.hand.total(), 24);
    assert_eq!(slot.status, SlotStatus::Bust);
    assert!(!slot.can_double);
    assert_eq!(state.phase, RoundPhase::Resolving);
    assert_eq!(state.active_slot_index, state.slots.len());
}

#[test]
fn hit_without_bust_keeps_slot_playing_but_forbids_double() {
    let state = start(&["5c", "6d"], "9h");
    let state = act(&state, BlackjackAction::Hit(c("2s")));

    let slot = &state.slots[0];
    assert_eq!(slot.status, SlotStatus::Playing);
    assert_eq!(slot.hand.total(), 13);
    assert!(!slot.can_double, "после hit дабл запрещён навсегда");
    assert_eq!(state.phase, RoundPhase::AwaitingAction);

    let legal = legal_actions(&state);
    assert!(legal.hit && legal.stand);
    assert!(!legal.double && !legal.split);
}

#[test]
fn soft_hand_demotes_ace_on_hit() {
    let state = start(&["Ah", "6c"], "9h");
    assert!(state.slots[0].hand.is_soft());

    let state = act(&state, BlackjackAction::Hit(c("9d")));
    let slot = &state.slots[0];
    assert_eq!(slot.hand.total(), 16);
    assert!(!slot.hand.is_soft());
    assert_eq!(slot.status, SlotStatus::Playing);
}

//
// STAND / DOUBLE
//

#[test]
fn stand_moves_round_to_resolving() {
    let state = start(&["Tc", "7d"], "9h");
    let step = apply_action(&state, BlackjackAction::Stand).expect("stand");

    assert!(step.has_effect(|e| matches!(e, Effect::RequestDealerPlay { .. })));
    let state = step.into_state();
    assert_eq!(state.slots[0].status, SlotStatus::Stood);
    assert_eq!(state.phase, RoundPhase::Resolving);
}

#[test]
fn double_doubles_wager_and_ends_turn() {
    let state = start(&["5c", "6d"], "9h");
    let state = act(&state, BlackjackAction::Double(c("Th")));

    let slot = &state.slots[0];
    assert_eq!(slot.wager, Chips(200));
    assert_eq!(slot.hand.len(), 3);
    assert_eq!(slot.hand.total(), 21);
    assert_eq!(slot.status, SlotStatus::Doubled);
    assert_eq!(state.phase, RoundPhase::Resolving);
}

#[test]
fn double_into_bust_marks_slot_bust() {
    let state = start(&["Tc", "6d"], "9h");
    let state = act(&state, BlackjackAction::Double(c("Kh")));

    let slot = &state.slots[0];
    assert_eq!(slot.wager, Chips(200));
    assert_eq!(slot.status, SlotStatus::Bust);
    assert_eq!(state.phase, RoundPhase::Resolving);
}

//
// SPLIT
//

/// Сценарий: [8♣,8♦] сплит → [8♣,X] и [8♦,Y] с одинаковыми ставками.
#[test]
fn split_eights_creates_second_slot() {
    let state = start(&["8c", "8d"], "9h");
    assert!(legal_actions(&state).split);

    let before = state.slots.len();
    let state = act(&state, BlackjackAction::Split(c("3h"), c("Jc")));

    assert_eq!(state.slots.len(), before + 1);
    assert_eq!(state.slots[0].hand, hand(&["8c", "3h"]));
    assert_eq!(state.slots[1].hand, hand(&["8d", "Jc"]));
    for slot in &state.slots {
        assert_eq!(slot.hand.len(), 2);
        assert_eq!(slot.wager, Chips(100));
        assert_eq!(slot.status, SlotStatus::Playing);
        assert!(slot.can_double);
        assert!(!slot.can_split);
    }
    assert_eq!(state.total_wager(), Chips(100 * state.slots.len() as u64));

    // Первая рука остаётся активной.
    assert_eq!(state.active_slot_index, 0);
    assert_eq!(state.phase, RoundPhase::AwaitingAction);
    assert!(state
        .history
        .events
        .iter()
        .any(|e| e.kind == RoundEventKind::SlotSplit { from: 0, new_slot: 1 }));
}

#[test]
fn split_recomputes_can_split_per_new_pair() {
    let state = start(&["8c", "8d"], "9h");
    let state = act(&state, BlackjackAction::Split(c("8h"), c("2c")));

    assert!(state.slots[0].can_split, "[8c 8h] – снова пара");
    assert!(!state.slots[1].can_split, "[8d 2c] – не пара");
}

#[test]
fn resplit_respects_max_split_depth() {
    let rules = TableRules::standard().with_max_split_depth(1);
    let state = start_with_rules(rules, &["8c", "8d"], "9h");
    let state = act(&state, BlackjackAction::Split(c("8h"), c("8s")));

    assert!(!state.slots[0].can_split);
    assert!(!state.slots[1].can_split);
    assert!(!legal_actions(&state).split);

    let err = request_action(&state, ActionKind::Split).unwrap_err();
    assert!(err.to_string().contains("split"));
}

#[test]
fn unlimited_resplits_keep_wager_invariant() {
    let mut state = start(&["8c", "8d"], "9h");

    // Три сплита подряд на восьмёрках.
    for (a, b) in [("8h", "2c"), ("8s", "3c"), ("8c", "4c")] {
        state = act(&state, BlackjackAction::Split(c(a), c(b)));
        assert_eq!(state.total_wager(), Chips(100 * state.slots.len() as u64));
        assert!(state.slots.iter().all(|s| s.hand.len() == 2));
    }
    assert_eq!(state.slots.len(), 4);
    assert_eq!(state.slots[0].split_depth, 3);
}

/// Все руки играются по очереди, после последней – Resolving.
#[test]
fn auto_advance_walks_split_slots_in_order() {
    let state = start(&["8c", "8d"], "9h");
    let state = act(&state, BlackjackAction::Split(c("3h"), c("Jc")));

    let state = act(&state, BlackjackAction::Hit(c("Td")));
    assert_eq!(state.active_slot_index, 0);
    assert_eq!(state.slots[0].hand.total(), 21);

    let state = act(&state, BlackjackAction::Stand);
    assert_eq!(state.active_slot_index, 1);
    assert_eq!(state.phase, RoundPhase::AwaitingAction);

    let step = apply_action(&state, BlackjackAction::Double(c("2h"))).expect("double");
    assert!(step.has_effect(|e| matches!(e, Effect::RequestDealerPlay { .. })));
    let state = step.into_state();

    assert_eq!(state.slots[1].wager, Chips(200));
    assert_eq!(state.total_wager(), Chips(300));
    assert_eq!(state.phase, RoundPhase::Resolving);
    assert_eq!(state.playing_slots(), 0);
}

//
// REQUEST
//

#[test]
fn request_action_emits_send_action_without_mutating() {
    let state = start(&["Tc", "6d"], "9h");
    let effects = request_action(&state, ActionKind::Hit).expect("hit легален");

    assert_eq!(
        effects,
        vec![Effect::SendAction {
            round_id: RoundId::new("r-1"),
            slot: 0,
            action: ActionKind::Hit,
        }]
    );
}

#[test]
fn apply_action_records_history() {
    let state = start(&["Tc", "6d"], "9h");
    let before = state.history.len();
    let state = act(&state, BlackjackAction::Stand);

    assert_eq!(state.history.len(), before + 2);
    assert!(matches!(
        state.history.last(),
        Some(RoundEventKind::SlotFinished {
            slot: 0,
            status: SlotStatus::Stood,
            total: 16
        })
    ));
}
