//! sky130 layer and rule tables.

pub mod layers;
pub mod rules;
pub mod via;
