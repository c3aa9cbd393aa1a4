use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Шуз из нескольких колод.
///
/// Движок карты НЕ генерирует – их присылает сервер. Шуз нужен только тем,
/// кто играет роль сервера: dev-симулятору и тестам.
/// Перемешивание делает вызывающий код (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    pub cards: Vec<Card>,
}

impl Shoe {
    /// `decks` колод подряд в порядке: Clubs A..K, Diamonds A..K, Hearts A..K, Spades A..K.
    pub fn with_decks(decks: u8) -> Self {
        let mut cards = Vec::with_capacity(52 * usize::from(decks));
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards }
    }

    pub fn single_deck() -> Self {
        Self::with_decks(1)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять две карты (для сплита). None, если шуз кончился.
    pub fn draw_pair(&mut self) -> Option<(Card, Card)> {
        if self.cards.len() < 2 {
            return None;
        }
        let a = self.cards.pop()?;
        let b = self.cards.pop()?;
        Some((a, b))
    }
}
