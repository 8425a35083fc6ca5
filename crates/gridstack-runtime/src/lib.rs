#![forbid(unsafe_code)]

//! Reactive runtime pieces for gridstack.
//!
//! The grid surface does not track dependencies implicitly. Inputs that can
//! change over time (the item list) are wrapped in an [`Observable`], and the
//! surface holds an explicit [`Subscription`] whose callback runs
//! synchronously on every change.

pub mod reactive;

pub use reactive::{Observable, Subscription};
