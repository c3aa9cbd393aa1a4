use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

pub const BLACKJACK: u8 = 21;

/// Итоговая стоимость руки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandValue {
    pub total: u8,
    /// Хотя бы один туз сейчас считается за 11.
    pub soft: bool,
}

/// Рука в блэкджеке – просто упорядоченный список карт.
///
/// Сумму НЕ кэшируем: при добавлении карты туз может "подешеветь" с 11 до 1,
/// поэтому всё считается заново на каждом вызове.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Сумма очков с понижением тузов.
    ///
    /// Сначала все тузы идут за 11, потом, пока перебор и есть "тяжёлый" туз,
    /// понижаем один туз на 10. Тузов конечное число, цикл всегда завершается.
    pub fn value(&self) -> HandValue {
        let mut total: u32 = 0;
        let mut aces_as_eleven: u32 = 0;

        for card in &self.cards {
            if card.rank.is_ace() {
                aces_as_eleven += 1;
            }
            total += u32::from(card.value());
        }

        while total > u32::from(BLACKJACK) && aces_as_eleven > 0 {
            total -= 10;
            aces_as_eleven -= 1;
        }

        HandValue {
            total: total.min(u32::from(u8::MAX)) as u8,
            soft: aces_as_eleven > 0,
        }
    }

    pub fn total(&self) -> u8 {
        self.value().total
    }

    pub fn is_soft(&self) -> bool {
        self.value().soft
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == BLACKJACK
    }

    pub fn is_bust(&self) -> bool {
        self.total() > BLACKJACK
    }

    /// Две карты одинаковой стоимости (K-Q тоже пара для сплита).
    pub fn is_pair(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.value() == b.value(),
            _ => false,
        }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand::new(cards)
    }
}

impl fmt::Display for Hand {
    /// Формат вида `[Ah Kd] 21`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        let v = self.value();
        if v.soft {
            write!(f, "] soft {}", v.total)
        } else {
            write!(f, "] {}", v.total)
        }
    }
}
