use serde::{Deserialize, Serialize};

use crate::domain::Card;

/// Тип действия игрока – то, что UI отправляет на сервер.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Hit,
    Stand,
    Double,
    Split,
}

/// Действие вместе с картами, которые сервер выдал в ответ.
///
/// Каждый вариант несёт ровно тот payload, который ему нужен:
/// для сплита – по одной новой карте на каждую из двух рук.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackAction {
    Hit(Card),
    Stand,
    /// Double down – ровно одна карта.
    Double(Card),
    /// Первая карта идёт в исходную руку, вторая – в новую.
    Split(Card, Card),
}

impl BlackjackAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            BlackjackAction::Hit(_) => ActionKind::Hit,
            BlackjackAction::Stand => ActionKind::Stand,
            BlackjackAction::Double(_) => ActionKind::Double,
            BlackjackAction::Split(..) => ActionKind::Split,
        }
    }
}
