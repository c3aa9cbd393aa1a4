// src/engine/rules.rs
//! Правила стола блэкджека.
//!
//! Здесь описываем только "правила", без состояния раунда. Снимок правил
//! кладётся в `RoundState` при старте, так что все операции над раундом
//! остаются чистыми функциями от состояния.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/проверки правил.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось разобрать правила стола: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Некорректная выплата за блэкджек {num}:{den}")]
    InvalidPayout { num: u32, den: u32 },

    #[error("Максимальная глубина сплита должна быть > 0 (или не задана)")]
    InvalidSplitDepth,
}

/// Выплата сверх ставки в виде дроби (3:2 → num=3, den=2).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutRatio {
    pub num: u32,
    pub den: u32,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: PayoutRatio = PayoutRatio { num: 3, den: 2 };
    pub const SIX_TO_FIVE: PayoutRatio = PayoutRatio { num: 6, den: 5 };
}

/// Профиль правил (на будущее можно добавить европейский no-hole-card и т.д.).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RulesProfile {
    /// Дилер стоит на soft 17, сплит без ограничений, 3:2.
    Standard,
    /// Дилер добирает на soft 17 (H17).
    HitSoft17,
}

/// Правила стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRules {
    /// Дилер добирает на soft 17.
    #[serde(default)]
    pub dealer_hits_soft_17: bool,
    /// Сколько раз подряд можно сплитовать одну линию рук. None = без ограничений.
    #[serde(default)]
    pub max_split_depth: Option<u8>,
    #[serde(default = "default_payout")]
    pub blackjack_payout: PayoutRatio,
}

fn default_payout() -> PayoutRatio {
    PayoutRatio::THREE_TO_TWO
}

impl Default for TableRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl TableRules {
    pub const fn standard() -> Self {
        Self {
            dealer_hits_soft_17: false,
            max_split_depth: None,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
        }
    }

    pub const fn from_profile(profile: RulesProfile) -> Self {
        match profile {
            RulesProfile::Standard => Self::standard(),
            RulesProfile::HitSoft17 => Self {
                dealer_hits_soft_17: true,
                ..Self::standard()
            },
        }
    }

    pub const fn with_max_split_depth(mut self, depth: u8) -> Self {
        self.max_split_depth = Some(depth);
        self
    }

    /// Правила приходят с бэкенда JSON-ом вместе с конфигом стола.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let rules: TableRules = serde_json::from_str(raw)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let PayoutRatio { num, den } = self.blackjack_payout;
        if den == 0 || num == 0 {
            return Err(ConfigError::InvalidPayout { num, den });
        }
        if self.max_split_depth == Some(0) {
            return Err(ConfigError::InvalidSplitDepth);
        }
        Ok(())
    }

    /// Можно ли ещё раз сплитовать линию, уже разделённую `depth` раз.
    pub fn split_allowed_at(&self, depth: u8) -> bool {
        match self.max_split_depth {
            Some(max) => depth < max,
            None => true,
        }
    }
}
