//! Parametric capacitor cells for the SKY130 process.
//!
//! This crate generates DRC-clean capacitor layouts as flat GDSII cells:
//! a MOS varactor ([`cells::cap_var`]) and a metal-insulator-metal
//! capacitor ([`cells::mim_cap`]). Cells are described by a declared
//! parameter table ([`pcell`]), coerced to process minima, drawn into an
//! in-memory [`layout::Cell`], and exported with [`layout::gds`].
//!
//! All database coordinates are integer nanometers on a 5 nm grid.
//! User-facing dimensions are `f64` micrometers.

pub mod cells;
pub mod config;
pub mod error;
pub mod layout;
pub mod pcell;
pub mod pdk;

pub(crate) mod log;
