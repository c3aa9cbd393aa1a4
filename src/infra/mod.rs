//! Инфраструктурный слой вокруг ядра:
//! - генерация ID (для симуляции сервера);
//! - RNG-реализации для симуляции сервера;
//! - маппинги между payload-ами бэкенда и domain.

pub mod ids;
pub mod mapping;
pub mod rng;

pub use ids::*;
pub use mapping::*;
pub use rng::*;
