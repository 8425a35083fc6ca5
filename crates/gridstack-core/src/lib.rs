#![forbid(unsafe_code)]

//! Core: geometry, pointer input, and drag gesture recognition.
//!
//! # Role in gridstack
//! `gridstack-core` is the input and coordinate layer. It owns the two
//! coordinate spaces a grid surface works in (cells and pixels) and turns raw
//! pointer signals into well-formed drag gestures.
//!
//! # How it fits in the system
//! `gridstack-layout` builds cell placement math on [`geometry`], and
//! `gridstack-widgets` feeds [`gesture::DragGesture`] values into its drag
//! session state machine.

pub mod event;
pub mod geometry;
pub mod gesture;
