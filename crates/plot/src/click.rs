//! Selection of a clicked plot and the flight-path handoff.

use foundation::math::{GeoPosition, Vec2};
use scene::coords::screen_to_geo;
use scene::picking::{PickPolicy, ScenePicker};
use tracing::{debug, warn};

use crate::key::{GraphicKind, GraphicTag};
use crate::record::PlotId;
use crate::session::PlotSession;
use crate::source::{PlotDataSource, no_fly_lat_lngs};
use crate::state::FlightVertices;

/// What the front end knew when the click happened.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClickContext {
    /// The flight-planning panel is open.
    pub flight_mode_open: bool,
    /// Globe position under the cursor, if the pick hit anything.
    pub earth_position: Option<GeoPosition>,
}

impl ClickContext {
    /// Context for a click at `screen`, resolving the globe position with
    /// the usual depth/terrain pick rules.
    pub fn picked<P>(picker: &P, screen: Vec2, policy: PickPolicy, flight_mode_open: bool) -> Self
    where
        P: ScenePicker + ?Sized,
    {
        Self {
            flight_mode_open,
            earth_position: screen_to_geo(picker, screen, policy),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// Selection toggled; `current` is the selection afterwards.
    Selected {
        plot: PlotId,
        current: Option<PlotId>,
    },
    /// The plot crosses a no-fly zone. The highlight was cleared and the
    /// caller must block with a confirmation.
    NoFlyConflict { plot: PlotId },
    /// Flight vertices and height floor were published to the state.
    FlightPathReady(FlightVertices),
}

impl PlotSession {
    /// Handles a click on a rendered plot graphic.
    pub async fn click<S>(&mut self, tag: GraphicTag, ctx: ClickContext, source: &S) -> ClickOutcome
    where
        S: PlotDataSource + ?Sized,
    {
        if self.state.start_point_setting {
            return ClickOutcome::Ignored;
        }
        if let Some(p) = ctx.earth_position {
            self.state.params_height = p.altitude.max(0.0);
        }
        if self.state.edit_status {
            debug!(plot = %tag.plot, "click ignored while editing");
            return ClickOutcome::Ignored;
        }

        let Some(record) = self.fetch_record(source, tag.plot).await else {
            return ClickOutcome::Ignored;
        };

        self.state.click_from_map = true;
        let current = self.state.toggle_current(&record);
        let selected = ClickOutcome::Selected {
            plot: record.id,
            current,
        };

        if tag.kind == GraphicKind::Text {
            return selected;
        }
        if !ctx.flight_mode_open || self.state.drawing || self.state.joystick_visible {
            return selected;
        }
        if self.graphics_of(record.id).next().is_none() {
            debug!(plot = %record.id, "plot is not rendered; no flight path");
            return selected;
        }
        if record.has_class_value(self.config().no_fly_class_value) {
            debug!(plot = %record.id, "no-fly zone plots are not flyable");
            return selected;
        }

        let ring = record
            .object_info
            .vertices_position
            .as_deref()
            .map(no_fly_lat_lngs)
            .unwrap_or_default();
        match source.no_fly_zone_check(ring).await {
            Ok(true) => {
                self.clear_highlight();
                return ClickOutcome::NoFlyConflict { plot: record.id };
            }
            Ok(false) => {}
            Err(e) => {
                warn!(plot = %record.id, error = %e, "no-fly check failed");
                return selected;
            }
        }

        let vertices = record.vertices().to_vec();
        self.state.vertices_data = None;
        if vertices.is_empty() || current.is_none() {
            return selected;
        }
        if let Some(max) = record.max_altitude() {
            self.state.params_height = max;
        }
        let flight = FlightVertices {
            mode: record.mode(),
            vertices,
        };
        self.state.vertices_data = Some(flight.clone());
        ClickOutcome::FlightPathReady(flight)
    }
}
