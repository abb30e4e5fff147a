//! Flood analysis: water rising inside a polygon plot from the lowest to the
//! highest terrain point under its bounding box.

use foundation::math::GeoPosition;
use geometry::{bbox, cell_side_for, close_ring, point_grid, polygon_area};
use scene::components::{Color, FloodExtrusion};
use tracing::{debug, warn};

use crate::key::GraphicKind;
use crate::record::PlotId;
use crate::session::{PlotSession, default_area_color};
use crate::source::PlotDataSource;
use crate::terrain::TerrainProvider;

/// Starting bounds of the terrain scan; a box entirely below sea level
/// still floods from zero.
const MIN_HEIGHT_START_M: f64 = 10_000.0;
const MAX_HEIGHT_START_M: f64 = 0.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloodLevels {
    pub min_m: f64,
    pub max_m: f64,
}

fn water_color() -> Color {
    Color::from_bytes(64, 157, 253, 150)
}

/// Lowest and highest sampled heights of a regular grid over the box of
/// `vertices`, about `target_points` samples in total.
pub async fn terrain_levels<T>(
    vertices: &[GeoPosition],
    target_points: usize,
    terrain: &T,
) -> Option<FloodLevels>
where
    T: TerrainProvider + ?Sized,
{
    let [west, south, east, north] = bbox(vertices)?;
    let corners = [
        GeoPosition::new(west, south, 0.0),
        GeoPosition::new(east, south, 0.0),
        GeoPosition::new(east, north, 0.0),
        GeoPosition::new(west, north, 0.0),
    ];
    let area = polygon_area(&close_ring(&corners));
    let grid = point_grid([west, south, east, north], cell_side_for(area, target_points));
    if grid.is_empty() {
        debug!("flood grid is empty");
        return None;
    }
    debug!(points = grid.len(), area, "sampling flood grid");

    let sampled = match terrain.sample_most_detailed(grid).await {
        Ok(sampled) => sampled,
        Err(e) => {
            warn!(error = %e, "flood terrain sampling failed");
            return None;
        }
    };
    let levels = sampled.iter().fold(
        FloodLevels {
            min_m: MIN_HEIGHT_START_M,
            max_m: MAX_HEIGHT_START_M,
        },
        |acc, p| FloodLevels {
            min_m: acc.min_m.min(p.altitude),
            max_m: acc.max_m.max(p.altitude),
        },
    );
    Some(levels)
}

impl PlotSession {
    /// Starts (`enabled`) or stops the flood animation on plot `id`'s
    /// polygon. Stopping restores the plot colour. Returns the terrain levels
    /// used, or `None` when the plot has no polygon or sampling failed.
    pub async fn flood_analysis<S, T>(
        &mut self,
        id: PlotId,
        enabled: bool,
        source: &S,
        terrain: &T,
    ) -> Option<FloodLevels>
    where
        S: PlotDataSource + ?Sized,
        T: TerrainProvider + ?Sized,
    {
        let record = self.fetch_record(source, id).await?;
        let entity = self
            .graphics_of(id)
            .find(|g| g.tag.kind == GraphicKind::Polygon)
            .map(|g| g.entity)?;
        let vertices: Vec<GeoPosition> = self
            .world
            .get(entity)?
            .polygon
            .as_ref()?
            .hierarchy
            .iter()
            .filter_map(|p| GeoPosition::from_cartesian(*p))
            .collect();

        let levels = terrain_levels(&vertices, self.config().flood_grid_points, terrain).await?;
        let step = self.config().flood_rise_m_per_frame;
        let polygon = self.world.get_mut(entity)?.polygon.as_mut()?;
        if enabled {
            polygon.per_position_height = true;
            polygon.color = water_color();
            polygon.extrusion = Some(FloodExtrusion::new(levels.min_m, levels.max_m, step));
        } else {
            polygon.per_position_height = false;
            polygon.color = Color::from_css_or(record.color_hex8(), default_area_color());
            polygon.extrusion = None;
        }
        Some(levels)
    }

    /// Advances every running flood by one frame. Returns how many are still
    /// rising.
    pub fn advance_floods(&mut self) -> usize {
        let entities: Vec<_> = self
            .graphics()
            .iter()
            .filter(|g| g.tag.kind == GraphicKind::Polygon)
            .map(|g| g.entity)
            .collect();
        let mut rising = 0;
        for entity in entities {
            let Some(flood) = self
                .world
                .get_mut(entity)
                .and_then(|e| e.polygon.as_mut())
                .and_then(|p| p.extrusion.as_mut())
            else {
                continue;
            };
            if flood.is_done() {
                continue;
            }
            flood.advance();
            if !flood.is_done() {
                rising += 1;
            }
        }
        rising
    }
}

#[cfg(test)]
mod tests {
    use super::{FloodLevels, terrain_levels};
    use crate::record::PlotId;
    use crate::session::PlotSession;
    use crate::session::tests::{point, polygon, square};
    use crate::terrain::GridTerrain;
    use crate::testing::MemorySource;
    use pretty_assertions::assert_eq;
    use scene::components::Color;

    fn slope() -> GridTerrain {
        GridTerrain::from_fn([116.9, 38.9, 117.1, 39.1], 3, 3, |lon, _| (lon - 116.9) * 1000.0 + 10.0)
            .expect("grid")
    }

    fn polygon_color(session: &PlotSession, key: &str) -> Option<(Color, bool)> {
        let id = session.world.by_key(key)?;
        let polygon = session.world.get(id)?.polygon.as_ref()?;
        Some((polygon.color, polygon.extrusion.is_some()))
    }

    #[tokio::test]
    async fn levels_span_the_terrain_under_the_box() {
        let levels = terrain_levels(&square(117.0, 39.0, 0.0), 100, &slope())
            .await
            .expect("levels");
        assert!(levels.min_m >= 110.0 && levels.min_m < 110.2, "{levels:?}");
        assert!(levels.max_m > 110.8 && levels.max_m <= 111.0, "{levels:?}");

        let below_sea = GridTerrain::flat([116.0, 38.0, 118.0, 40.0], -5.0).expect("grid");
        let levels = terrain_levels(&square(117.0, 39.0, 0.0), 100, &below_sea)
            .await
            .expect("levels");
        assert_eq!(levels, FloodLevels { min_m: -5.0, max_m: 0.0 });
        assert!(terrain_levels(&[], 100, &below_sea).await.is_none());
    }

    #[tokio::test]
    async fn flood_rises_and_restores_color() {
        let record = polygon(1, square(117.0, 39.0, 0.0));
        let source = MemorySource::with_plots(vec![record.clone()]);
        let mut session = PlotSession::default();
        session.add_record(&record, 0);

        let levels = session
            .flood_analysis(PlotId(1), true, &source, &slope())
            .await
            .expect("flooded");
        assert!(levels.max_m > levels.min_m);
        let (color, flooding) = polygon_color(&session, "1_plotPolygon").expect("polygon");
        assert_eq!(color, Color::from_bytes(64, 157, 253, 150));
        assert!(flooding);

        let mut frames = 0;
        while session.advance_floods() > 0 {
            frames += 1;
            assert!(frames < 10, "flood never settled");
        }
        assert_eq!(session.advance_floods(), 0);

        session
            .flood_analysis(PlotId(1), false, &source, &slope())
            .await
            .expect("restored");
        let (color, flooding) = polygon_color(&session, "1_plotPolygon").expect("polygon");
        assert_eq!(color, Color::WHITE.with_alpha(0.6));
        assert!(!flooding);
    }

    #[tokio::test]
    async fn plots_without_polygons_are_skipped() {
        let source = MemorySource::with_plots(vec![point(2)]);
        let mut session = PlotSession::default();
        session.add_record(&point(2), 0);
        assert!(session.flood_analysis(PlotId(2), true, &source, &slope()).await.is_none());
        assert!(session.flood_analysis(PlotId(3), true, &source, &slope()).await.is_none());
    }
}
