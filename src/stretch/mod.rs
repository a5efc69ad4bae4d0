//! Pitch-synchronous overlap-add: the skip and insert period mutators.

pub mod psola;

pub use psola::{insert_period, skip_period, Mutation};
