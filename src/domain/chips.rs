use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Денежная сумма в минимальных единицах (центы / фишки).
/// Обёртка над u64, чтобы ставка не путалась с очками руки или индексами.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Удвоение ставки (double down).
    pub fn doubled(self) -> Chips {
        Chips(self.0.saturating_mul(2))
    }

    /// Умножение на дробь `num/den` с округлением вниз.
    /// Для 3:2 и ставки 5 получаем 7 – дробная часть остаётся казино.
    pub fn mul_ratio(self, num: u32, den: u32) -> Chips {
        if den == 0 {
            return Chips::ZERO;
        }
        let scaled = u128::from(self.0) * u128::from(num) / u128::from(den);
        Chips(u64::try_from(scaled).unwrap_or(u64::MAX))
    }

    /// Разница "получено − поставлено" со знаком.
    pub fn delta_from(self, spent: Chips) -> ChipsDelta {
        let diff = i128::from(self.0) - i128::from(spent.0);
        ChipsDelta(diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Результат со знаком: + выигрыш, − проигрыш.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChipsDelta(pub i64);
