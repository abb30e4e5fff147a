use foundation::math::GeoPosition;

use crate::record::{DrawingMode, PlotId, PlotRecord};

/// Path handed to flight planning after a successful click.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightVertices {
    pub mode: DrawingMode,
    pub vertices: Vec<GeoPosition>,
}

/// UI flags and selection shared between the annotation session and the
/// surrounding application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotState {
    pub current_plot_id: Option<PlotId>,
    pub current_plot: Option<PlotRecord>,
    /// Plots ticked in the list; only these are shown after a refresh.
    pub checked_ids: Vec<PlotId>,
    /// An annotation is being edited.
    pub edit_status: bool,
    /// A new annotation is being drawn.
    pub drawing: bool,
    /// The flight start point is being picked on the map.
    pub start_point_setting: bool,
    pub joystick_visible: bool,
    pub no_fly_display: bool,
    /// Range loads only return the user's own plots.
    pub owner_only: bool,
    pub click_from_map: bool,
    /// Lower bound for flight-planning altitude (m).
    pub params_height: f64,
    pub vertices_data: Option<FlightVertices>,
}

impl PlotState {
    pub fn is_current(&self, id: PlotId) -> bool {
        self.current_plot_id == Some(id)
    }

    /// Selects `record`, or clears the selection when it is already current.
    /// Returns the new current id.
    pub fn toggle_current(&mut self, record: &PlotRecord) -> Option<PlotId> {
        if self.is_current(record.id) {
            self.current_plot_id = None;
            self.current_plot = None;
        } else {
            self.current_plot_id = Some(record.id);
            self.current_plot = Some(record.clone());
        }
        self.current_plot_id
    }

    /// Id being edited, if any; it stays hidden during bulk visibility changes.
    pub fn editing_id(&self) -> Option<PlotId> {
        if self.edit_status {
            self.current_plot_id
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlotState;
    use crate::record::{ObjectInfo, PlotId, PlotRecord};

    #[test]
    fn toggle_selects_then_clears() {
        let mut state = PlotState::default();
        let record = PlotRecord::new(3, "A", ObjectInfo::default());
        assert_eq!(state.toggle_current(&record), Some(PlotId(3)));
        assert_eq!(state.current_plot.as_ref().map(|r| r.id), Some(PlotId(3)));
        assert_eq!(state.toggle_current(&record), None);
        assert!(state.current_plot.is_none());
    }

    #[test]
    fn editing_id_requires_edit_status() {
        let mut state = PlotState {
            current_plot_id: Some(PlotId(1)),
            ..PlotState::default()
        };
        assert_eq!(state.editing_id(), None);
        state.edit_status = true;
        assert_eq!(state.editing_id(), Some(PlotId(1)));
    }
}
