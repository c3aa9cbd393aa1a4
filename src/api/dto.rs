use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Rarity};
use crate::engine::{ActionKind, LegalActions, Outcome, RoundPhase, SlotStatus};
use crate::reveal::{RevealPhase, UserMessage};

// ---------------------------------------------------------------------------
// Что присылает бэкенд. Карты – строки вида "Ah", "Td", "10c".
// ---------------------------------------------------------------------------

/// Ответ бэкенда на старт раунда.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartRoundResponseDto {
    pub round_id: String,
    pub player_cards: Vec<String>,
    /// Открытая карта дилера (+ закрытая, если сервер её уже отдаёт).
    pub dealer_cards: Vec<String>,
    pub wager: u64,
}

/// Ответ бэкенда на действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResponseDto {
    pub round_id: String,
    pub action: ActionKind,
    /// Новые карты игрока: 1 для hit/double, 2 для split, 0 для stand.
    #[serde(default)]
    pub cards: Vec<String>,
    /// Добор дилера, если этим действием закрылась последняя рука.
    #[serde(default)]
    pub dealer_draws: Vec<String>,
    /// Авторитетный снимок раунда после действия.
    #[serde(default)]
    pub snapshot: Option<RoundSnapshotDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandSnapshotDto {
    pub cards: Vec<String>,
    pub wager: u64,
    pub status: SlotStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundSnapshotDto {
    pub round_id: String,
    pub hands: Vec<HandSnapshotDto>,
    pub dealer_cards: Vec<String>,
    #[serde(default)]
    pub dealer_hole_card_revealed: bool,
    #[serde(default)]
    pub active_hand_index: Option<usize>,
    pub phase: RoundPhase,
}

/// Ответ бэкенда на покупку кейса.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseResponseDto {
    Ok {
        item_id: String,
        currency_awarded: u64,
        transaction_id: String,
    },
    Error {
        /// HTTP-статус; 0 – запрос не дошёл.
        http_status: u16,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Что отдаём UI.
// ---------------------------------------------------------------------------

/// DTO одной руки игрока.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotViewDto {
    pub index: usize,
    pub cards: Vec<String>,
    pub total: u8,
    pub soft: bool,
    pub status: SlotStatus,
    pub wager: Chips,
    pub is_active: bool,
    /// Заполнено только после расчёта раунда.
    pub outcome: Option<Outcome>,
    pub payout: Option<Chips>,
}

/// Полное представление раунда для фронта.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundViewDto {
    pub round_id: String,
    pub phase: RoundPhase,
    /// Пока закрытая карта не открыта – только открытая карта дилера.
    pub dealer_cards: Vec<String>,
    /// Сумма дилера по видимым картам.
    pub dealer_total: u8,
    pub dealer_hole_card_revealed: bool,
    pub slots: Vec<SlotViewDto>,
    pub legal_actions: LegalActions,
    pub total_wager: Chips,
}

/// Представление открытия кейса для фронта.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevealViewDto {
    pub phase: RevealPhase,
    pub case_id: Option<String>,
    pub prize_item_id: Option<String>,
    pub prize_rarity: Option<Rarity>,
    /// Приз показываем только начиная с revealing, чтобы не спойлерить карусель.
    pub currency_awarded: Option<Chips>,
    pub credited: bool,
    pub error: Option<UserMessage>,
    pub can_retry_credit: bool,
}
