#![forbid(unsafe_code)]

//! Layout: detents, split geometry, and the partition state machine.
//!
//! # Role in VSplit
//! `vsplit-layout` decides where the split line is. It converts a raw
//! vertical drag into a bounded, overscroll-aware, notch-quantized partition
//! and reconciles that partition with the named [`Detent`]s.
//!
//! # Primary responsibilities
//! - **Detent**: `TopFull`, `BottomFull`, `TopMini`, `BottomMini`, `Fraction`.
//! - **SplitGeometry**: card height, partition range, notch quantization.
//! - **PartitionController**: drag, overscroll, snapping and commit.
//! - **render**: a pure `SplitState -> SplitFrame` mapping for hosts.
//!
//! # How it fits in the system
//! `vsplit-runtime` owns a controller per split and feeds it the drag
//! translations recognized by `vsplit-core`. Nothing here touches a terminal
//! or an event loop, so every behavior is testable with plain numbers.
//!
//! ```
//! use vsplit_layout::{Detent, PartitionController, SplitConfig, SplitGeometry};
//!
//! let config = SplitConfig::default();
//! let geometry = SplitGeometry::from_card_height(300.0, &config);
//! let mut split = PartitionController::new(config, geometry, Detent::default());
//!
//! split.on_drag_changed(-200.0);
//! assert_eq!(split.on_drag_ended(-200.0), Some(Detent::Fraction(0.0)));
//! assert_eq!(split.partition(), -184.0);
//! ```

pub mod accessory;
pub mod config;
pub mod detent;
pub mod geometry;
pub mod partition;
pub mod render;
pub mod signal;

pub use accessory::{MenuAccessory, Pane, SplitAccessory, SplitOptions, SplitOptionsError, Tint};
#[cfg(feature = "config-file")]
pub use config::ConfigLoadError;
pub use config::{SplitConfig, SplitConfigError};
pub use detent::{Detent, DetentCheck};
pub use geometry::{SplitGeometry, Viewport};
pub use partition::{Applied, DragPhase, PartitionController};
pub use render::{
    HandleFrame, PaneFrame, RenderContext, SplitFrame, SplitRects, SplitState, layout_rects,
    render,
};
pub use signal::{Direction, Feedback, FeedbackStyle, SplitSignal};
