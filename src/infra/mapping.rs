use crate::api::dto::{
    ActionResponseDto, HandSnapshotDto, PurchaseResponseDto, RoundSnapshotDto,
    StartRoundResponseDto,
};
use crate::api::ApiError;
use crate::domain::{Card, CaseDefinition, Chips, Hand, RoundId, TransactionId};
use crate::engine::{ActionKind, BlackjackAction, ServerHand, ServerRoundSnapshot};
use crate::reveal::{ErrorCode, PurchaseFailure, PurchaseResult};

/// Разобрать строку карты от бэкенда.
pub fn card_from_api(raw: &str) -> Result<Card, ApiError> {
    raw.parse::<Card>().map_err(ApiError::BadPayload)
}

pub fn cards_from_api(raw: &[String]) -> Result<Vec<Card>, ApiError> {
    raw.iter().map(|c| card_from_api(c)).collect()
}

/// Стартовые руки раунда.
pub struct StartRoundInput {
    pub round_id: RoundId,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub wager: Chips,
}

pub fn start_round_from_api(dto: &StartRoundResponseDto) -> Result<StartRoundInput, ApiError> {
    Ok(StartRoundInput {
        round_id: RoundId::new(dto.round_id.clone()),
        player_hand: Hand::new(cards_from_api(&dto.player_cards)?),
        dealer_hand: Hand::new(cards_from_api(&dto.dealer_cards)?),
        wager: Chips(dto.wager),
    })
}

/// Собрать действие с картами из ответа сервера.
/// Количество карт должно совпадать с типом действия.
pub fn action_from_api(dto: &ActionResponseDto) -> Result<BlackjackAction, ApiError> {
    let cards = cards_from_api(&dto.cards)?;
    match (dto.action, cards.as_slice()) {
        (ActionKind::Hit, [card]) => Ok(BlackjackAction::Hit(*card)),
        (ActionKind::Stand, []) => Ok(BlackjackAction::Stand),
        (ActionKind::Double, [card]) => Ok(BlackjackAction::Double(*card)),
        (ActionKind::Split, [a, b]) => Ok(BlackjackAction::Split(*a, *b)),
        (kind, cards) => Err(ApiError::BadPayload(format!(
            "action {kind:?} came with {} cards",
            cards.len()
        ))),
    }
}

fn hand_from_api(dto: &HandSnapshotDto) -> Result<ServerHand, ApiError> {
    Ok(ServerHand {
        cards: cards_from_api(&dto.cards)?,
        wager: Chips(dto.wager),
        status: dto.status,
    })
}

pub fn snapshot_from_api(dto: &RoundSnapshotDto) -> Result<ServerRoundSnapshot, ApiError> {
    Ok(ServerRoundSnapshot {
        round_id: RoundId::new(dto.round_id.clone()),
        hands: dto.hands.iter().map(hand_from_api).collect::<Result<_, _>>()?,
        dealer_cards: cards_from_api(&dto.dealer_cards)?,
        dealer_hole_card_revealed: dto.dealer_hole_card_revealed,
        active_hand_index: dto.active_hand_index,
        phase: dto.phase,
    })
}

/// Ответ на покупку → вход для `on_purchase_result`.
///
/// Предмет, которого нет в описании кейса, считаем ошибкой сервера:
/// показывать то, чего нет в каталоге, нельзя.
pub fn purchase_result_from_api(
    dto: &PurchaseResponseDto,
    case: &CaseDefinition,
) -> Result<PurchaseResult, PurchaseFailure> {
    match dto {
        PurchaseResponseDto::Ok {
            item_id,
            currency_awarded,
            transaction_id,
        } => {
            let item = case.item(item_id).cloned().ok_or_else(|| {
                PurchaseFailure::new(
                    ErrorCode::Server,
                    format!("item {item_id} is not part of case {}", case.id),
                )
            })?;
            Ok(PurchaseResult {
                item,
                currency_awarded: Chips(*currency_awarded),
                transaction_id: TransactionId::new(transaction_id.clone()),
            })
        }
        PurchaseResponseDto::Error {
            http_status,
            message,
        } => Err(PurchaseFailure::new(
            ErrorCode::from_http_status(*http_status),
            message.clone(),
        )),
    }
}
