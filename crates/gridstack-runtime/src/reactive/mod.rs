#![forbid(unsafe_code)]

//! Observable values with explicit subscriptions.

pub mod observable;

pub use observable::{Observable, Subscription};
