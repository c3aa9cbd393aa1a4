//! Доменная модель: карты, руки, деньги, шуз, кейсы.

pub mod card;
pub mod case;
pub mod chips;
pub mod hand;
pub mod shoe;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Индекс руки (слота) игрока внутри раунда.
pub type SlotIndex = usize;

/// Непрозрачный ID раунда блэкджека (выдаёт сервер).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundId(pub String);

/// Непрозрачный ID транзакции покупки кейса (выдаёт сервер).
/// По нему же работает защита от двойного зачисления.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub String);

/// ID кейса в каталоге.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CaseId(pub String);

macro_rules! impl_str_id {
    ($($ty:ident),*) => {$(
        impl $ty {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

impl_str_id!(RoundId, TransactionId, CaseId);

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use case::*;
pub use chips::*;
pub use hand::*;
pub use shoe::*;
