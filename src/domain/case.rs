use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::CaseId;

/// Редкость предмета в кейсе. Влияет только на звук/подсветку при открытии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Предмет, который может выпасть из кейса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseItem {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Сколько валюты зачисляется за предмет.
    pub value: Chips,
    /// Относительный вес выпадения (только для отображения шансов –
    /// реальный розыгрыш делает сервер).
    pub weight: u32,
}

/// Описание кейса: цена и содержимое.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseDefinition {
    pub id: CaseId,
    pub name: String,
    pub price: Chips,
    pub items: Vec<CaseItem>,
}

impl CaseDefinition {
    /// Загрузить описание кейса из JSON (каталог кейсов приходит с бэкенда).
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Кейс можно купить: цена > 0, есть предметы, веса не нулевые.
    pub fn is_purchasable(&self) -> bool {
        !self.price.is_zero() && !self.items.is_empty() && self.total_weight() > 0
    }

    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.weight)).sum()
    }

    /// Шансы выпадения каждого предмета (0.0..=1.0) в порядке `items`.
    pub fn odds(&self) -> Vec<(String, f64)> {
        let total = self.total_weight();
        self.items
            .iter()
            .map(|i| {
                let p = if total == 0 {
                    0.0
                } else {
                    i.weight as f64 / total as f64
                };
                (i.id.clone(), p)
            })
            .collect()
    }

    pub fn item(&self, item_id: &str) -> Option<&CaseItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}
