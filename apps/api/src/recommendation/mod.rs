// Job recommendations: tokenization, scoring policy, ranking engine, storage seam.
// The engine is read-only and keeps no state between calls.

pub mod engine;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod policy;
pub mod scoring;
pub mod store;
pub mod tokenize;
