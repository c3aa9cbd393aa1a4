//! RNG для тех, кто играет роль сервера (dev-симулятор, тесты).
//! Ядро само ничего не тасует и не разыгрывает.
//! На wasm32 симулятор не нужен: ядро в браузере получает карты от сервера.

use crate::domain::{CaseDefinition, CaseItem, Shoe};

/// RNG интерфейс для симуляции сервера.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайное число в диапазоне `0..upper` (upper > 0).
    fn below(&mut self, upper: u64) -> u64;

    fn shuffle_shoe(&mut self, shoe: &mut Shoe) {
        self.shuffle(&mut shoe.cards);
    }

    /// Разыграть предмет кейса по весам.
    fn pick_item<'a>(&mut self, case: &'a CaseDefinition) -> Option<&'a CaseItem> {
        let total = case.total_weight();
        if total == 0 {
            return None;
        }
        let mut roll = self.below(total);
        for item in &case.items {
            let w = u64::from(item.weight);
            if roll < w {
                return Some(item);
            }
            roll -= w;
        }
        None
    }
}

//
// ✅ NATIVE ВАРИАНТ (НЕ wasm32): тут есть rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        use rand::thread_rng;

        slice.shuffle(&mut thread_rng());
    }

    fn below(&mut self, upper: u64) -> u64 {
        use rand::Rng;
        rand::thread_rng().gen_range(0..upper.max(1))
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed – одинаковые раунды.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    fn below(&mut self, upper: u64) -> u64 {
        use rand::Rng;
        self.inner.gen_range(0..upper.max(1))
    }
}
