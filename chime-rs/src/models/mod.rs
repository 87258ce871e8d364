//! Compartmental dynamics used by the projection engine.
pub mod sir;
pub mod trajectory;
pub use sir::*;
pub use trajectory::*;
