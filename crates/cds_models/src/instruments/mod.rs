//! Instrument definitions.

pub mod credit;
