//! Highlight walls around the selected plot.

use foundation::math::GeoPosition;
use futures_util::future::try_join_all;
use geometry::{interpolate_edge, ring_edges};
use scene::components::{Color, WallGraphic};
use scene::entity::{Entity, EntityId};
use tracing::{debug, warn};

use crate::key::{GraphicKind, GraphicTag};
use crate::record::{DrawingMode, PlotRecord};
use crate::session::{PlotSession, WALL_TRAIL_DURATION_MS, WALL_TRAIL_IMAGE, default_area_color};
use crate::terrain::{TerrainError, TerrainProvider};

/// Samples terrain heights along every edge of the closed ring `vertices`,
/// `steps` intervals per edge. Edges are sampled concurrently and the
/// results concatenated in ring order.
pub async fn calculate_height_by_terrain<T>(
    vertices: &[GeoPosition],
    steps: usize,
    terrain: &T,
) -> Result<Vec<GeoPosition>, TerrainError>
where
    T: TerrainProvider + ?Sized,
{
    let edges = ring_edges(vertices);
    let sampled = try_join_all(
        edges
            .into_iter()
            .map(|(a, b)| terrain.sample_most_detailed(interpolate_edge(a, b, steps))),
    )
    .await?;
    Ok(sampled.into_iter().flatten().collect())
}

impl PlotSession {
    /// Draws a trailing wall `highlight_wall_height_m` tall around `record`,
    /// replacing any previous highlight.
    ///
    /// Polygons whose first vertex sits on sampled terrain above zero, and
    /// that have at most `terrain_highlight_max_vertices` vertices, follow the
    /// terrain along every edge. Other polygons get a closed wall at their
    /// vertex altitudes; lines and points get an open one.
    pub async fn add_highlight<T>(
        &mut self,
        record: &PlotRecord,
        terrain: Option<&T>,
    ) -> Option<EntityId>
    where
        T: TerrainProvider + ?Sized,
    {
        self.clear_highlight();
        let vertices = record.vertices().to_vec();
        if vertices.is_empty() || vertices.len() > self.config().highlight_max_vertices {
            debug!(plot = %record.id, len = vertices.len(), "highlight skipped");
            return None;
        }

        let path = if record.mode() == DrawingMode::Polygon {
            match self.terrain_ring(&vertices, terrain).await {
                Some(sampled) => sampled,
                None => {
                    let mut closed = vertices.clone();
                    closed.push(vertices[0]);
                    closed
                }
            }
        } else {
            vertices
        };
        if path.is_empty() {
            return None;
        }

        let color = Color::from_css_or(record.color_hex8(), default_area_color());
        let minimum_heights: Vec<f64> = path.iter().map(|p| p.altitude).collect();
        let wall = WallGraphic {
            trail_image: Some(WALL_TRAIL_IMAGE.to_string()),
            trail_duration_ms: WALL_TRAIL_DURATION_MS,
            ..WallGraphic::with_height(
                path,
                minimum_heights,
                self.config().highlight_wall_height_m,
                color,
            )
        };

        let base = self.ensure_highlight_base()?;
        let key = GraphicTag::new(record.id, GraphicKind::Highlight).key();
        self.world.remove_by_key(&key);
        self.world
            .add(Entity::new(key).with_parent(base).with_wall(wall))
    }

    /// Terrain-following ring, or `None` when the flat wall should be used.
    async fn terrain_ring<T>(
        &self,
        vertices: &[GeoPosition],
        terrain: Option<&T>,
    ) -> Option<Vec<GeoPosition>>
    where
        T: TerrainProvider + ?Sized,
    {
        let terrain = terrain?;
        let first = match terrain.sample_most_detailed(vec![vertices[0]]).await {
            Ok(sampled) => sampled.first().copied()?,
            Err(e) => {
                warn!(error = %e, "terrain sample failed; using flat highlight");
                return None;
            }
        };
        if first.altitude <= 0.0 || vertices.len() > self.config().terrain_highlight_max_vertices {
            return None;
        }
        match calculate_height_by_terrain(vertices, self.config().interpolation_steps, terrain).await {
            Ok(ring) => Some(ring),
            Err(e) => {
                warn!(error = %e, "edge sampling failed; using flat highlight");
                None
            }
        }
    }

    /// Removes every highlight wall. The highlight group entity stays.
    pub fn clear_highlight(&mut self) -> usize {
        let Some(base) = self.highlight_base else {
            return 0;
        };
        let children = self.world.children(base);
        for child in &children {
            self.world.remove(*child);
        }
        children.len()
    }

    pub fn set_highlight_visible(&mut self, visible: bool) {
        let Some(base) = self.highlight_base else {
            return;
        };
        for child in self.world.children(base) {
            self.world.set_show(child, visible);
        }
    }

    pub fn highlight_entity(&self) -> Option<EntityId> {
        let base = self.highlight_base?;
        self.world.children(base).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::calculate_height_by_terrain;
    use crate::session::PlotSession;
    use crate::session::tests::{point, polygon, pos, square};
    use crate::terrain::{GridTerrain, TerrainProvider};
    use pretty_assertions::assert_eq;

    fn hills() -> GridTerrain {
        GridTerrain::from_fn([116.0, 38.0, 118.0, 40.0], 21, 21, |lon, lat| {
            100.0 + (lon - 116.0) * 50.0 + (lat - 38.0) * 10.0
        })
        .expect("grid")
    }

    fn wall_of(session: &PlotSession) -> scene::components::WallGraphic {
        let id = session.highlight_entity().expect("highlight");
        session
            .world
            .get(id)
            .and_then(|e| e.wall.clone())
            .expect("wall")
    }

    #[tokio::test]
    async fn polygon_on_terrain_follows_every_edge() {
        let mut session = PlotSession::default();
        let terrain = hills();
        let record = polygon(1, square(117.0, 39.0, 0.0));
        session
            .add_highlight(&record, Some(&terrain))
            .await
            .expect("highlight");

        let wall = wall_of(&session);
        // Four edges of 100 intervals each, both ends included.
        assert_eq!(wall.path.len(), 4 * 101);
        assert!(wall.is_consistent());
        assert!(wall.minimum_heights.iter().all(|h| *h > 100.0));
        assert!((wall.maximum_heights[0] - wall.minimum_heights[0] - 10.0).abs() < 1e-9);
        assert!(session.world.contains_key("1_plotHighlightGraphic"));
    }

    #[tokio::test]
    async fn polygon_without_terrain_gets_a_flat_closed_wall() {
        let mut session = PlotSession::default();
        let record = polygon(2, square(117.0, 39.0, 5.0));
        session
            .add_highlight::<GridTerrain>(&record, None)
            .await
            .expect("highlight");
        let wall = wall_of(&session);
        assert_eq!(wall.path.len(), 5);
        assert_eq!(wall.path[4], wall.path[0]);
        assert_eq!(wall.maximum_heights, vec![15.0, 17.0, 19.0, 16.0, 15.0]);
        assert_eq!(wall.trail_image.as_deref(), Some("fence.png"));
        assert_eq!(wall.trail_duration_ms, 1000);
    }

    #[tokio::test]
    async fn sea_level_or_large_polygons_stay_flat() {
        let mut session = PlotSession::default();
        let flat = GridTerrain::flat([116.0, 38.0, 118.0, 40.0], 0.0).expect("grid");
        session
            .add_highlight(&polygon(3, square(117.0, 39.0, 0.0)), Some(&flat))
            .await
            .expect("highlight");
        assert_eq!(wall_of(&session).path.len(), 5);

        let ring: Vec<_> = (0..12).map(|i| pos(117.0 + i as f64 * 0.001, 39.0, 0.0)).collect();
        session
            .add_highlight(&polygon(4, ring), Some(&hills()))
            .await
            .expect("highlight");
        assert_eq!(wall_of(&session).path.len(), 13);
        assert!(!session.world.contains_key("3_plotHighlightGraphic"));
    }

    #[tokio::test]
    async fn points_get_an_open_wall_and_oversized_rings_are_skipped() {
        let mut session = PlotSession::default();
        session
            .add_highlight(&point(5), Some(&hills()))
            .await
            .expect("highlight");
        assert_eq!(wall_of(&session).path.len(), 1);

        let ring: Vec<_> = (0..101).map(|i| pos(117.0 + i as f64 * 0.001, 39.0, 0.0)).collect();
        assert!(session.add_highlight(&polygon(6, ring), Some(&hills())).await.is_none());
        assert!(session.highlight_entity().is_none());
    }

    #[tokio::test]
    async fn visibility_and_clear() {
        let mut session = PlotSession::default();
        let id = session
            .add_highlight::<GridTerrain>(&point(7), None)
            .await
            .expect("highlight");
        session.set_highlight_visible(false);
        assert!(!session.world.is_showing(id));
        assert_eq!(session.clear_highlight(), 1);
        assert!(session.world.get(id).is_none());
        assert_eq!(session.clear_highlight(), 0);
    }

    #[tokio::test]
    async fn edge_sampling_fails_outside_the_grid() {
        let terrain = hills();
        let ring = square(117.0, 39.0, 0.0);
        let sampled = calculate_height_by_terrain(&ring, 10, &terrain)
            .await
            .expect("sampled");
        assert_eq!(sampled.len(), 4 * 11);
        assert_eq!(sampled[0].longitude, 117.0);

        let outside = square(120.0, 39.0, 0.0);
        assert!(calculate_height_by_terrain(&outside, 10, &terrain).await.is_err());
        assert!(terrain.sample_most_detailed(vec![]).await.expect("empty").is_empty());
    }
}
