pub mod analyze;
pub mod outcomes;
pub mod play;
pub mod simulate;
