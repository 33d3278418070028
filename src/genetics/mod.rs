//! Genetics module - genomes, crossover, and mutation.

pub mod crossover;
pub mod genome;
pub mod mutation;

pub use crossover::CrossoverSystem;
pub use genome::Genome;
pub use mutation::Mutator;
