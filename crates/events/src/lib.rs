//! Domain events.
//!
//! Events are emitted by pure domain operations and consumed by adapters
//! (rendering, logging). They carry no infrastructure concerns.

pub mod event;

pub use event::Event;
