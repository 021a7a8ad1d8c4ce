//! Numeric types used by the engine

pub mod nimber;
