//! Globe annotation ("plot") management.
//!
//! `PlotSession` owns the rendered entities of every annotation and drives
//! refresh, highlight, selection and flood analysis against a
//! `PlotDataSource` and a `TerrainProvider`.

pub mod click;
pub mod config;
pub mod flood;
pub mod highlight;
pub mod key;
pub mod labels;
pub mod mouse_tip;
pub mod reconcile;
pub mod record;
pub mod session;
pub mod source;
pub mod state;
pub mod terrain;

#[cfg(test)]
mod testing;

pub use click::{ClickContext, ClickOutcome};
pub use config::{ConfigError, Endpoints, PlotConfig};
pub use flood::FloodLevels;
pub use key::{GraphicKind, GraphicTag};
pub use mouse_tip::{MouseTip, MouseTipOptions, TipPosition};
pub use record::{DrawingMode, PlotId, PlotRecord};
pub use session::{FlyTo, PlotSession, TrackedGraphic};
pub use source::{HttpPlotSource, PlainCodec, PlotDataSource, RecordCodec, SourceError};
pub use terrain::{GridTerrain, TerrainError, TerrainProvider};
