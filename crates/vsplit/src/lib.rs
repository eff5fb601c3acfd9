#![forbid(unsafe_code)]

//! VSplit public facade crate.
//!
//! Re-exports the pieces a host needs to embed a vertical split: the
//! [`VerticalSplit`] component, the [`Detent`] binding type, configuration,
//! accessory options and the render frame. Internal crates stay available
//! for hosts that drive a [`PartitionController`] directly.
//!
//! ```
//! use vsplit::prelude::*;
//!
//! let binding = Observable::new(Detent::default());
//! let options = SplitOptions::new("Map", "Places");
//! let mut split = VerticalSplit::new(binding.clone(), options, SplitConfig::default())?;
//! split.set_viewport(Viewport::new(656.0).with_insets(0.0, 20.0));
//!
//! split.drag_changed(-300.0);
//! assert_eq!(split.drag_ended(-300.0), Some(Detent::BottomFull));
//! assert_eq!(binding.get(), Detent::BottomFull);
//! # Ok::<(), vsplit::Error>(())
//! ```

pub mod error;

pub use error::{Error, Recovery, Result};

// --- Core re-exports -------------------------------------------------------

pub use vsplit_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use vsplit_core::geometry::Rect;
pub use vsplit_core::gesture::{GestureConfig, GestureRecognizer};
pub use vsplit_core::semantic_event::{Position, SemanticEvent};

// --- Layout re-exports -----------------------------------------------------

#[cfg(feature = "config-file")]
pub use vsplit_layout::ConfigLoadError;
pub use vsplit_layout::{
    Applied, Detent, DetentCheck, Direction, DragPhase, Feedback, FeedbackStyle, HandleFrame,
    MenuAccessory, Pane, PaneFrame, PartitionController, RenderContext, SplitAccessory,
    SplitConfig, SplitConfigError, SplitFrame, SplitGeometry, SplitOptions, SplitOptionsError,
    SplitRects, SplitSignal, SplitState, Tint, Viewport, layout_rects, render,
};

// --- Runtime re-exports ----------------------------------------------------

pub use vsplit_runtime::{
    ACCESSORY_CELLS, HandleSlot, Observable, SplitBuildError, Subscription, VerticalSplit,
    accessory_slots, menu_slots,
};

/// Everything a typical host touches.
pub mod prelude {
    pub use crate::{
        Detent, Error, Event, MenuAccessory, Observable, Rect, Result, SplitAccessory,
        SplitConfig, SplitOptions, SplitSignal, VerticalSplit, Viewport,
    };
}

pub use vsplit_core as core;
pub use vsplit_layout as layout;
pub use vsplit_runtime as runtime;
