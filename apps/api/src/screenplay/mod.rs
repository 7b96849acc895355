// Screenplay format enforcement.
// Classifies arbitrary generated text line by line and re-emits it in canonical
// screenplay layout. Pure and synchronous: no I/O, no logging, no shared state.

pub mod elements;
pub mod enforcer;
pub mod fallback;
pub mod wrap;

#[cfg(test)]
mod proptest;

pub use enforcer::enforce;
