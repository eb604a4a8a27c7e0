pub mod probe;
pub mod roster;
