// src/lib.rs

pub mod analysis;
pub mod chart;
pub mod export;
pub mod fetch;
pub mod model;
