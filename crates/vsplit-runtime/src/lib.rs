#![forbid(unsafe_code)]

//! Runtime: the detent binding and the `VerticalSplit` component.
//!
//! # Role in VSplit
//! `vsplit-runtime` is where host input meets the state machine. A
//! [`VerticalSplit`] owns one partition controller, the accessory menu
//! state and a gesture recognizer, and keeps an [`Observable<Detent>`]
//! binding in agreement with the detent the split actually rests at.
//!
//! # How it fits in the system
//! Pointer hosts call `drag_changed` / `drag_ended` with translations in
//! their own units. Terminal hosts pass raw events to `handle_event` and
//! draw from `rects()`. Both read discrete feedback from `drain_signals()`.

pub mod component;
pub mod observable;

pub use component::{
    ACCESSORY_CELLS, HandleSlot, SplitBuildError, VerticalSplit, accessory_slots, menu_slots,
};
pub use observable::{Observable, Subscription};
