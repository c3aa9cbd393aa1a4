// src/bin/casino_dev_cli.rs
//
// Dev-CLI: прогоняем несколько раундов блэкджека и одно открытие кейса.
// Роль сервера играет сам CLI: тасует шуз, раздаёт карты, разыгрывает кейс.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use casino_core::api::build_round_view;
use casino_core::domain::{
    CaseDefinition, CaseId, CaseItem, Chips, Hand, Rarity, Shoe, TransactionId,
};
use casino_core::engine::{
    apply_action, compute_outcome, dealer_must_draw, legal_actions, request_action,
    settle_dealer, summarize, ActionKind, BlackjackAction, EngineError, HandEngine, RoundPhase,
    RoundState, SlotStatus, TableRules,
};
use casino_core::infra::{DeterministicRng, IdGenerator, RandomSource};
use casino_core::reveal::{
    CreditError, CreditLedger, FnCreditSink, PurchaseResult, RevealCoordinator,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const ROUNDS: u32 = 5;
const SEED: u64 = 42;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("casino_dev_cli: стартуем dev-CLI…");

    let ids = IdGenerator::new("cli");
    let mut rng = DeterministicRng::from_seed(SEED);
    let engine = HandEngine::new(TableRules::standard());

    let mut balance = Chips(10_000);

    println!();
    println!("================ BLACKJACK =================");

    for n in 0..ROUNDS {
        let mut shoe = Shoe::with_decks(6);
        rng.shuffle_shoe(&mut shoe);

        match play_round(&engine, &ids, &mut shoe, Chips(100)) {
            Ok(state) => {
                let view = build_round_view(&state);
                match compute_outcome(&state) {
                    Ok(outcomes) => {
                        let summary = summarize(&state, &outcomes);
                        balance = Chips(
                            (balance.0 as i64 + summary.net.0).max(0) as u64,
                        );
                        println!(
                            "[CLI] раунд {} ({}): дилер {:?} = {}, руки: {:?}, net = {}",
                            n + 1,
                            state.round_id,
                            view.dealer_cards,
                            view.dealer_total,
                            view.slots
                                .iter()
                                .map(|s| (s.cards.clone(), s.total, s.outcome))
                                .collect::<Vec<_>>(),
                            summary.net.0,
                        );
                    }
                    Err(e) => error!(%e, "cannot compute outcome"),
                }
            }
            Err(e) => {
                println!("[CLI] ОШИБКА в раунде {}: {e}", n + 1);
            }
        }
    }

    println!("[CLI] баланс после блэкджека: {balance}");

    println!();
    println!("================ CASE OPENING =================");
    open_case(&ids, &mut rng, balance);

    println!("[CLI] Завершение работы dev-CLI.");
}

/// Один раунд с простой стратегией. Шуз – "сервер".
fn play_round(
    engine: &HandEngine,
    ids: &IdGenerator,
    shoe: &mut Shoe,
    wager: Chips,
) -> Result<RoundState, EngineError> {
    const EMPTY_SHOE: EngineError = EngineError::Internal("шуз кончился");

    let p1 = shoe.draw_one().ok_or(EMPTY_SHOE)?;
    let up = shoe.draw_one().ok_or(EMPTY_SHOE)?;
    let p2 = shoe.draw_one().ok_or(EMPTY_SHOE)?;
    let hole = shoe.draw_one().ok_or(EMPTY_SHOE)?;

    // Клиент видит только открытую карту дилера.
    let mut state = engine
        .start_round(
            ids.next_round_id(),
            Hand::new(vec![p1, p2]),
            Hand::new(vec![up]),
            wager,
        )?
        .into_state();

    const MAX_STEPS: u32 = 50;
    let mut steps = 0;
    while state.phase == RoundPhase::AwaitingAction {
        steps += 1;
        if steps > MAX_STEPS {
            println!("[CLI] Превышен лимит шагов ({MAX_STEPS}), выходим.");
            break;
        }

        let kind = choose_action(&state);
        // Эффекты SendAction здесь "отправляются" сразу же.
        let _effects = request_action(&state, kind)?;

        let action = match kind {
            ActionKind::Hit => BlackjackAction::Hit(shoe.draw_one().ok_or(EMPTY_SHOE)?),
            ActionKind::Stand => BlackjackAction::Stand,
            ActionKind::Double => BlackjackAction::Double(shoe.draw_one().ok_or(EMPTY_SHOE)?),
            ActionKind::Split => {
                let (a, b) = shoe.draw_pair().ok_or(EMPTY_SHOE)?;
                BlackjackAction::Split(a, b)
            }
        };
        state = apply_action(&state, action)?.into_state();
    }

    // Сервер доигрывает за дилера.
    let mut dealer = Hand::new(vec![up, hole]);
    let mut draws = vec![hole];
    let any_live = state
        .slots
        .iter()
        .any(|s| matches!(s.status, SlotStatus::Stood | SlotStatus::Doubled));
    if any_live {
        while dealer_must_draw(&dealer, &state.rules) {
            let card = shoe.draw_one().ok_or(EMPTY_SHOE)?;
            dealer.push(card);
            draws.push(card);
        }
    }

    Ok(settle_dealer(&state, &draws)?.into_state())
}

/// Упрощённая базовая стратегия.
fn choose_action(state: &RoundState) -> ActionKind {
    let legal = legal_actions(state);
    let Some(slot) = state.active_slot() else {
        return ActionKind::Stand;
    };
    let value = slot.hand.value();

    if legal.split && slot.hand.cards.first().is_some_and(|c| matches!(c.value(), 8 | 11)) {
        return ActionKind::Split;
    }
    if legal.double && matches!(value.total, 10 | 11) && !value.soft {
        return ActionKind::Double;
    }
    if value.total < 17 || (value.total == 17 && value.soft) {
        ActionKind::Hit
    } else {
        ActionKind::Stand
    }
}

fn demo_case() -> CaseDefinition {
    let item = |id: &str, rarity: Rarity, value: u64, weight: u32| CaseItem {
        id: id.to_string(),
        name: id.replace('_', " "),
        rarity,
        value: Chips(value),
        weight,
    };
    CaseDefinition {
        id: CaseId::new("starter"),
        name: "Starter case".into(),
        price: Chips(500),
        items: vec![
            item("copper_coin", Rarity::Common, 100, 600),
            item("silver_coin", Rarity::Uncommon, 400, 280),
            item("gold_bar", Rarity::Rare, 1_500, 100),
            item("diamond", Rarity::Legendary, 25_000, 20),
        ],
    }
}

/// Открытие кейса: колбэк анимации специально зовём несколько раз,
/// зачисление тоже – функция зачисления должна сработать один раз.
fn open_case<R: RandomSource>(ids: &IdGenerator, rng: &mut R, balance: Chips) {
    let case = demo_case();
    let ledger = Arc::new(CreditLedger::new());
    let mut coordinator = RevealCoordinator::new(ledger);

    if let Err(e) = coordinator.begin(&case, balance) {
        println!("[CLI] кейс не открыт: {e}");
        return;
    }

    let Some(item) = rng.pick_item(&case).cloned() else {
        println!("[CLI] BUG: кейс без предметов.");
        return;
    };
    let result = PurchaseResult {
        currency_awarded: item.value,
        item,
        transaction_id: ids.next_transaction_id(),
    };

    if let Err(e) = coordinator.on_purchase_result(Ok(result)) {
        println!("[CLI] ОШИБКА в on_purchase_result: {e}");
        return;
    }
    for _ in 0..3 {
        if let Err(e) = coordinator.on_animation_complete() {
            println!("[CLI] ОШИБКА в on_animation_complete: {e}");
            return;
        }
    }

    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let sink = FnCreditSink(move |result: PurchaseResult, tx: TransactionId| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            info!(transaction_id = %tx, amount = result.currency_awarded.0, "backend credit call");
            Ok::<(), CreditError>(())
        }
    });

    for _ in 0..2 {
        if let Err(e) = futures::executor::block_on(coordinator.credit_if_needed(&sink)) {
            println!("[CLI] ОШИБКА в credit_if_needed: {e}");
            return;
        }
    }

    println!(
        "[CLI] кейс {}: фаза {:?}, зачислено {:?}, вызовов зачисления: {}",
        case.id,
        coordinator.phase(),
        coordinator.state().credited_transaction_id,
        calls.load(Ordering::SeqCst),
    );
}
