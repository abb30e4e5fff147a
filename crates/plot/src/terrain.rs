use std::fmt;

use foundation::math::GeoPosition;
use scene::picking::TerrainHeights;

use crate::source::BoxFuture;

#[derive(Debug, Clone, PartialEq)]
pub enum TerrainError {
    OutOfBounds { longitude: f64, latitude: f64 },
    InvalidGrid(String),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::OutOfBounds {
                longitude,
                latitude,
            } => write!(f, "no terrain at ({longitude}, {latitude})"),
            TerrainError::InvalidGrid(msg) => write!(f, "invalid terrain grid: {msg}"),
        }
    }
}

impl std::error::Error for TerrainError {}

/// Asynchronous terrain height lookup at full resolution.
pub trait TerrainProvider: Send + Sync {
    /// Returns the input positions with their altitude replaced by the
    /// terrain height, in input order.
    fn sample_most_detailed(
        &self,
        positions: Vec<GeoPosition>,
    ) -> BoxFuture<'_, Result<Vec<GeoPosition>, TerrainError>>;
}

/// Regular height grid over a lon/lat box, bilinearly interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTerrain {
    /// `[west, south, east, north]` in degrees.
    bbox: [f64; 4],
    cols: usize,
    rows: usize,
    /// Row-major from the south-west corner.
    heights: Vec<f64>,
}

impl GridTerrain {
    pub fn new(bbox: [f64; 4], cols: usize, rows: usize, heights: Vec<f64>) -> Result<Self, TerrainError> {
        if cols < 2 || rows < 2 {
            return Err(TerrainError::InvalidGrid(format!("{cols}x{rows} grid")));
        }
        if heights.len() != cols * rows {
            return Err(TerrainError::InvalidGrid(format!(
                "expected {} heights, got {}",
                cols * rows,
                heights.len()
            )));
        }
        if !(bbox[2] > bbox[0] && bbox[3] > bbox[1]) {
            return Err(TerrainError::InvalidGrid("empty bounding box".to_string()));
        }
        Ok(Self {
            bbox,
            cols,
            rows,
            heights,
        })
    }

    /// Constant height over the box.
    pub fn flat(bbox: [f64; 4], height: f64) -> Result<Self, TerrainError> {
        Self::new(bbox, 2, 2, vec![height; 4])
    }

    /// Heights from `f(longitude, latitude)` sampled at every grid node.
    pub fn from_fn(
        bbox: [f64; 4],
        cols: usize,
        rows: usize,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, TerrainError> {
        let [west, south, east, north] = bbox;
        let mut heights = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            let lat = south + (north - south) * r as f64 / rows.saturating_sub(1).max(1) as f64;
            for c in 0..cols {
                let lon = west + (east - west) * c as f64 / cols.saturating_sub(1).max(1) as f64;
                heights.push(f(lon, lat));
            }
        }
        Self::new(bbox, cols, rows, heights)
    }

    fn node(&self, col: usize, row: usize) -> f64 {
        self.heights[row * self.cols + col]
    }

    pub fn height(&self, longitude: f64, latitude: f64) -> Option<f64> {
        let [west, south, east, north] = self.bbox;
        if !(west..=east).contains(&longitude) || !(south..=north).contains(&latitude) {
            return None;
        }
        let fx = (longitude - west) / (east - west) * (self.cols - 1) as f64;
        let fy = (latitude - south) / (north - south) * (self.rows - 1) as f64;
        let c0 = (fx.floor() as usize).min(self.cols - 2);
        let r0 = (fy.floor() as usize).min(self.rows - 2);
        let tx = fx - c0 as f64;
        let ty = fy - r0 as f64;

        let south_h = self.node(c0, r0) * (1.0 - tx) + self.node(c0 + 1, r0) * tx;
        let north_h = self.node(c0, r0 + 1) * (1.0 - tx) + self.node(c0 + 1, r0 + 1) * tx;
        Some(south_h * (1.0 - ty) + north_h * ty)
    }
}

impl TerrainHeights for GridTerrain {
    fn height_at(&self, longitude: f64, latitude: f64) -> Option<f64> {
        self.height(longitude, latitude)
    }
}

impl TerrainProvider for GridTerrain {
    fn sample_most_detailed(
        &self,
        positions: Vec<GeoPosition>,
    ) -> BoxFuture<'_, Result<Vec<GeoPosition>, TerrainError>> {
        Box::pin(async move {
            positions
                .into_iter()
                .map(|p| {
                    self.height(p.longitude, p.latitude)
                        .map(|h| p.with_altitude(h))
                        .ok_or(TerrainError::OutOfBounds {
                            longitude: p.longitude,
                            latitude: p.latitude,
                        })
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GridTerrain, TerrainError, TerrainProvider};
    use foundation::math::GeoPosition;

    #[test]
    fn bilinear_interpolation() {
        let grid = GridTerrain::new([0.0, 0.0, 1.0, 1.0], 2, 2, vec![0.0, 10.0, 20.0, 30.0])
            .expect("grid");
        assert_eq!(grid.height(0.0, 0.0), Some(0.0));
        assert_eq!(grid.height(1.0, 1.0), Some(30.0));
        assert_eq!(grid.height(0.5, 0.5), Some(15.0));
        assert_eq!(grid.height(1.5, 0.5), None);
    }

    #[test]
    fn rejects_malformed_grids() {
        assert!(matches!(
            GridTerrain::new([0.0, 0.0, 1.0, 1.0], 2, 2, vec![0.0; 3]),
            Err(TerrainError::InvalidGrid(_))
        ));
        assert!(GridTerrain::flat([1.0, 1.0, 1.0, 2.0], 0.0).is_err());
    }

    #[test]
    fn from_fn_samples_nodes() {
        let grid = GridTerrain::from_fn([0.0, 0.0, 2.0, 2.0], 3, 3, |lon, lat| lon * 10.0 + lat)
            .expect("grid");
        assert_eq!(grid.height(2.0, 1.0), Some(21.0));
        assert_eq!(grid.height(1.0, 2.0), Some(12.0));
    }

    #[tokio::test]
    async fn sampling_replaces_altitude() {
        let grid = GridTerrain::flat([0.0, 0.0, 1.0, 1.0], 42.0).expect("grid");
        let out = grid
            .sample_most_detailed(vec![GeoPosition::new(0.5, 0.5, -7.0)])
            .await
            .expect("sampled");
        assert_eq!(out, vec![GeoPosition::new(0.5, 0.5, 42.0)]);

        let err = grid
            .sample_most_detailed(vec![GeoPosition::new(5.0, 0.5, 0.0)])
            .await
            .expect_err("outside");
        assert!(matches!(err, TerrainError::OutOfBounds { .. }));
        assert_eq!(err.to_string(), "no terrain at (5, 0.5)");
    }
}
