//! Domain types for StockLens

pub mod bar;
pub mod entity;
pub mod opinion;

pub use bar::{closes, validate_series, volumes, PriceBar};
pub use entity::Entity;
pub use opinion::{Direction, ExternalOpinion, OpinionFactor, OpinionParse};
