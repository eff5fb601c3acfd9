#![forbid(unsafe_code)]

//! Core: geometry primitives, input events, and drag gesture recognition.
//!
//! # Role in VSplit
//! `vsplit-core` is the input layer. It owns the normalized event types that
//! hosts feed into the split component and the recognizer that turns raw
//! pointer sequences into drag gestures with a vertical translation.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, mouse, resize, focus).
//! - **GestureRecognizer**: mouse-down → move → mouse-up becomes
//!   `DragStart` / `DragMove` / `DragEnd` / `DragCancel`, or a `Click`.
//! - **Geometry**: cell rectangles and insets used by terminal hosts.
//!
//! # How it fits in the system
//! `vsplit-layout` consumes the translations produced here and never sees
//! raw terminal input, so the state machine stays host-agnostic.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod semantic_event;

#[cfg(feature = "crossterm")]
mod crossterm_compat;
