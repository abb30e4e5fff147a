//! In-memory backend for tests.

use std::sync::Mutex;

use serde_json::Value;

use crate::record::{PlotId, PlotRecord};
use crate::source::{BoxFuture, NoFlyQuery, PlotDataSource, PlotQuery, SourceError};

#[derive(Default)]
pub struct MemorySource {
    pub plots: Vec<PlotRecord>,
    pub no_fly: Vec<PlotRecord>,
    /// Answer of every no-fly check.
    pub conflict: bool,
    pub fail: bool,
    pub queries: Mutex<Vec<PlotQuery>>,
    pub no_fly_queries: Mutex<Vec<NoFlyQuery>>,
    pub checks: Mutex<Vec<Vec<[f64; 2]>>>,
}

impl MemorySource {
    pub fn with_plots(plots: Vec<PlotRecord>) -> Self {
        Self {
            plots,
            ..Self::default()
        }
    }

    fn encode(records: &[PlotRecord]) -> Result<Vec<Value>, SourceError> {
        records
            .iter()
            .map(|r| serde_json::to_value(r).map_err(|e| SourceError::with_source("encode", e)))
            .collect()
    }

    fn check_failure(&self) -> Result<(), SourceError> {
        if self.fail {
            Err(SourceError::new("backend down"))
        } else {
            Ok(())
        }
    }
}

impl PlotDataSource for MemorySource {
    fn area_draw(&self, query: PlotQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>> {
        Box::pin(async move {
            self.check_failure()?;
            if let Ok(mut queries) = self.queries.lock() {
                queries.push(query);
            }
            Self::encode(&self.plots)
        })
    }

    fn plot_details(&self, id: PlotId) -> BoxFuture<'_, Result<Option<Value>, SourceError>> {
        Box::pin(async move {
            self.check_failure()?;
            let Some(record) = self.plots.iter().find(|r| r.id == id) else {
                return Ok(None);
            };
            Ok(Self::encode(std::slice::from_ref(record))?.pop())
        })
    }

    fn no_fly_zones(&self, query: NoFlyQuery) -> BoxFuture<'_, Result<Vec<Value>, SourceError>> {
        Box::pin(async move {
            self.check_failure()?;
            if let Ok(mut queries) = self.no_fly_queries.lock() {
                queries.push(query);
            }
            Self::encode(&self.no_fly)
        })
    }

    fn no_fly_zone_check(
        &self,
        lat_lngs: Vec<[f64; 2]>,
    ) -> BoxFuture<'_, Result<bool, SourceError>> {
        Box::pin(async move {
            self.check_failure()?;
            if let Ok(mut checks) = self.checks.lock() {
                checks.push(lat_lngs);
            }
            Ok(self.conflict)
        })
    }
}
