use tracing::{debug, info, warn};

use crate::domain::{Card, Chips, Hand, RoundId};
use crate::effects::{Effect, Sound, Step};
use crate::engine::actions::{ActionKind, BlackjackAction};
use crate::engine::errors::EngineError;
use crate::engine::outcome::{compute_outcome, summarize, Outcome};
use crate::engine::round::{PlayerHandSlot, RoundPhase, RoundState, SlotStatus};
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::rules::TableRules;
use crate::engine::validation::validate_action;

/// Движок раунда блэкджека.
///
/// Сам по себе хранит только правила стола; состояние раунда живёт в
/// `RoundState`, который вызывающий код держит у себя и передаёт в операции.
#[derive(Clone, Debug, Default)]
pub struct HandEngine {
    pub rules: TableRules,
}

impl HandEngine {
    pub fn new(rules: TableRules) -> Self {
        Self { rules }
    }

    /// Старт нового раунда:
    /// - одна рука игрока со ставкой `wager`;
    /// - если на раздаче блэкджек – рука сразу закрыта, раунд в Resolving;
    /// - иначе ждём первое действие.
    ///
    /// `dealer_hand` – одна открытая карта или открытая + закрытая.
    pub fn start_round(
        &self,
        round_id: RoundId,
        player_hand: Hand,
        dealer_hand: Hand,
        wager: Chips,
    ) -> Result<Step<RoundState>, EngineError> {
        if wager.is_zero() {
            return Err(EngineError::InvalidWager(wager));
        }
        if player_hand.len() != 2 {
            return Err(EngineError::InvalidHand("у игрока должно быть ровно 2 карты"));
        }
        if dealer_hand.is_empty() || dealer_hand.len() > 2 {
            return Err(EngineError::InvalidHand("у дилера должна быть 1 или 2 карты"));
        }

        let is_blackjack = player_hand.is_blackjack();
        let mut slot = PlayerHandSlot::new(player_hand, wager);
        slot.refresh_flags(&self.rules);

        let mut history = RoundHistory::new();
        history.push(RoundEventKind::RoundStarted {
            round_id: round_id.clone(),
            wager,
            player_cards: slot.hand.cards.clone(),
            dealer_up_card: dealer_hand.cards.first().copied(),
        });

        let mut effects = vec![Effect::PlaySound(Sound::Deal)];

        let mut state = RoundState {
            round_id,
            rules: self.rules,
            dealer_hand,
            dealer_hole_card_revealed: false,
            slots: Vec::new(),
            active_slot_index: 0,
            phase: RoundPhase::AwaitingAction,
            history,
        };

        if is_blackjack {
            slot.finish(SlotStatus::Blackjack);
            state.history.push(RoundEventKind::SlotFinished {
                slot: 0,
                status: SlotStatus::Blackjack,
                total: slot.hand.total(),
            });
            state.slots.push(slot);
            state.active_slot_index = state.slots.len();
            state.phase = RoundPhase::Resolving;
            effects.push(Effect::PlaySound(Sound::Blackjack));
            effects.push(Effect::RequestDealerPlay {
                round_id: state.round_id.clone(),
            });
        } else {
            state.slots.push(slot);
        }

        debug!(
            round_id = %state.round_id,
            wager = wager.0,
            blackjack = is_blackjack,
            "round started"
        );

        Ok(Step::new(state, effects))
    }
}

/// Проверить намерение игрока до похода на сервер.
///
/// Состояние не меняется: карты придут только в ответе сервера, и тогда их
/// нужно применить через `apply_action`.
pub fn request_action(state: &RoundState, kind: ActionKind) -> Result<Vec<Effect>, EngineError> {
    let slot = validate_action(state, kind).map_err(|err| {
        warn!(round_id = %state.round_id, ?kind, %err, "action rejected");
        err
    })?;

    Ok(vec![Effect::SendAction {
        round_id: state.round_id.clone(),
        slot,
        action: kind,
    }])
}

/// Применить действие игрока вместе с картами из ответа сервера.
///
/// Исходное состояние не трогаем: при ошибке у вызывающего остаётся ровно
/// то, что было.
pub fn apply_action(
    state: &RoundState,
    action: BlackjackAction,
) -> Result<Step<RoundState>, EngineError> {
    let idx = validate_action(state, action.kind()).map_err(|err| {
        warn!(round_id = %state.round_id, ?action, %err, "action rejected");
        err
    })?;

    let mut next = state.clone();
    let mut effects = Vec::new();
    let rules = next.rules;

    next.history.push(RoundEventKind::PlayerActed { slot: idx, action });

    let finished = match action {
        BlackjackAction::Hit(card) => {
            let slot = &mut next.slots[idx];
            slot.hand.push(card);
            effects.push(Effect::PlaySound(Sound::CardDrawn));
            if slot.hand.is_bust() {
                slot.finish(SlotStatus::Bust);
                Some(SlotStatus::Bust)
            } else {
                slot.refresh_flags(&rules);
                None
            }
        }

        BlackjackAction::Stand => {
            next.slots[idx].finish(SlotStatus::Stood);
            Some(SlotStatus::Stood)
        }

        BlackjackAction::Double(card) => {
            let slot = &mut next.slots[idx];
            slot.wager = slot.wager.doubled();
            slot.hand.push(card);
            effects.push(Effect::PlaySound(Sound::CardDrawn));
            let status = if slot.hand.is_bust() {
                SlotStatus::Bust
            } else {
                SlotStatus::Doubled
            };
            slot.finish(status);
            Some(status)
        }

        BlackjackAction::Split(for_current, for_new) => {
            split_slot(&mut next, idx, for_current, for_new)?;
            effects.push(Effect::PlaySound(Sound::CardDrawn));
            None
        }
    };

    if let Some(status) = finished {
        let total = next.slots[idx].hand.total();
        next.history.push(RoundEventKind::SlotFinished {
            slot: idx,
            status,
            total,
        });
        if status == SlotStatus::Bust {
            effects.push(Effect::PlaySound(Sound::Bust));
        }

        if next.advance() {
            effects.push(Effect::RequestDealerPlay {
                round_id: next.round_id.clone(),
            });
        }
    }

    debug!(
        round_id = %next.round_id,
        slot = idx,
        ?action,
        phase = ?next.phase,
        active = next.active_slot_index,
        "action applied"
    );

    Ok(Step::new(next, effects))
}

/// Сплит: вторая карта уходит в новую руку в конце списка, каждая рука
/// добирает по одной карте, ставка новой руки равна ставке исходной.
fn split_slot(
    state: &mut RoundState,
    idx: usize,
    for_current: Card,
    for_new: Card,
) -> Result<(), EngineError> {
    let rules = state.rules;
    let new_index = state.slots.len();

    let slot = &mut state.slots[idx];
    let moved = slot
        .hand
        .cards
        .pop()
        .ok_or(EngineError::Internal("split без второй карты"))?;
    slot.hand.push(for_current);
    slot.split_depth = slot.split_depth.saturating_add(1);
    slot.refresh_flags(&rules);

    let mut new_slot = PlayerHandSlot::new(Hand::new(vec![moved, for_new]), slot.wager);
    new_slot.split_depth = slot.split_depth;
    new_slot.refresh_flags(&rules);

    state.slots.push(new_slot);
    state.history.push(RoundEventKind::SlotSplit {
        from: idx,
        new_slot: new_index,
    });
    Ok(())
}

/// Должен ли дилер брать ещё карту: до 16 включительно, и на soft 17,
/// если так требуют правила.
pub fn dealer_must_draw(dealer: &Hand, rules: &TableRules) -> bool {
    let v = dealer.value();
    v.total < 17 || (v.total == 17 && v.soft && rules.dealer_hits_soft_17)
}

fn push_dealer_card(state: &mut RoundState, card: Card) {
    state.dealer_hand.push(card);
    let total = state.dealer_hand.total();
    state.history.push(RoundEventKind::DealerDrew { card, total });
}

/// Проиграть добор дилера по картам, которые прислал сервер.
///
/// Если у дилера только открытая карта, первая карта последовательности –
/// закрытая. Пока есть рука stood/doubled, карт должно хватить ровно на
/// обязательный добор. Если все руки перебрали или закрыты блэкджеком,
/// сервер может добор пропустить или прислать целиком; частичный тоже
/// принимается. Карта сверх обязательного добора означает, что зеркало
/// разошлось с сервером.
pub fn settle_dealer(
    state: &RoundState,
    dealer_draws: &[Card],
) -> Result<Step<RoundState>, EngineError> {
    if state.phase != RoundPhase::Resolving {
        return Err(EngineError::WrongPhase {
            operation: "settle_dealer",
            expected: RoundPhase::Resolving,
            actual: state.phase,
        });
    }

    let mut next = state.clone();
    let mut draws = dealer_draws.iter().copied().peekable();
    let mut effects = vec![Effect::RevealHoleCard];

    if next.dealer_hand.len() < 2 {
        let hole = draws.next().ok_or(EngineError::DealerDrawsExhausted)?;
        push_dealer_card(&mut next, hole);
    }

    let any_live = next
        .slots
        .iter()
        .any(|s| matches!(s.status, SlotStatus::Stood | SlotStatus::Doubled));

    // Без живых рук добор не обязателен, но если сервер его прислал,
    // каждая карта должна быть вынужденной.
    while dealer_must_draw(&next.dealer_hand, &next.rules)
        && (any_live || draws.peek().is_some())
    {
        let card = draws.next().ok_or(EngineError::DealerDrawsExhausted)?;
        push_dealer_card(&mut next, card);
        effects.push(Effect::PlaySound(Sound::CardDrawn));
    }

    let leftover = draws.count();
    if leftover > 0 {
        warn!(round_id = %state.round_id, leftover, "dealer sequence longer than forced draws");
        return Err(EngineError::UnexpectedDealerDraws(leftover));
    }

    next.dealer_hole_card_revealed = true;
    next.phase = RoundPhase::Settled;
    next.history.push(RoundEventKind::DealerSettled {
        total: next.dealer_hand.total(),
        bust: next.dealer_hand.is_bust(),
    });

    let outcomes = compute_outcome(&next)?;
    let summary = summarize(&next, &outcomes);

    let sound = if outcomes.iter().any(|o| o.outcome == Outcome::BlackjackWin) {
        Sound::Blackjack
    } else if outcomes.iter().any(|o| o.outcome == Outcome::Win) {
        Sound::Win
    } else if outcomes.iter().all(|o| o.outcome == Outcome::Push) {
        Sound::Push
    } else {
        Sound::Lose
    };
    effects.push(Effect::PlaySound(sound));
    effects.push(Effect::RoundSettled {
        round_id: next.round_id.clone(),
        net: summary.net,
    });

    info!(
        round_id = %next.round_id,
        dealer_total = next.dealer_hand.total(),
        wagered = summary.total_wagered.0,
        payout = summary.total_payout.0,
        "round settled"
    );

    Ok(Step::new(next, effects))
}
