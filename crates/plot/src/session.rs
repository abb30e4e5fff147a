//! The annotation entity manager.
//!
//! A `PlotSession` mirrors annotation records into a `scene::World`: every
//! record becomes one or more keyed entities (`${id}_${kind}`) parented to a
//! shared base entity. Tracked graphics carry their `GraphicTag`, so lookups
//! never depend on parsing keys.

use std::collections::{HashMap, HashSet};

use foundation::math::{Ecef, GeoPosition};
use foundation::time::Time;
use geometry::is_valid_position;
use runtime::Debouncer;
use scene::components::{
    Color, DistanceDisplay, LabelGraphic, ParticleSystem, PointGraphic, PolygonGraphic,
    PolylineGraphic, WallGraphic,
};
use scene::entity::{Entity, EntityId};
use scene::{PrimitiveId, World};
use tracing::{debug, info, warn};

use crate::config::PlotConfig;
use crate::key::{GraphicKind, GraphicTag};
use crate::labels::{LabelContent, format_graphic_label_text};
use crate::reconcile::{Reconciliation, reconcile};
use crate::record::{DrawingMode, PlotId, PlotRecord};
use crate::source::{
    NoFlyQuery, PlainCodec, PlotDataSource, PlotQuery, RecordCodec, SourceError, decode_records,
};
use crate::state::PlotState;

pub const PLOT_BASE_KEY: &str = "plotGraphicBaseEntity";
pub const HIGHLIGHT_BASE_KEY: &str = "highlightBaseEntity";

pub const WALL_TRAIL_IMAGE: &str = "fence.png";
pub(crate) const WALL_TRAIL_DURATION_MS: u32 = 1000;
const POLYLINE_WIDTH: f32 = 5.0;

pub(crate) fn default_area_color() -> Color {
    Color::WHITE.with_alpha(0.6)
}

fn default_text_color() -> Color {
    Color::from_bytes(0x17, 0xE9, 0x80, 0xFF)
}

/// A rendered graphic owned by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedGraphic {
    pub tag: GraphicTag,
    pub key: String,
    pub entity: EntityId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphicLayer {
    Plots,
    NoFlyZones,
}

/// Camera flight request produced by `choose`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyTo {
    /// Invisible helper entity spanning the plot.
    pub entity: EntityId,
    pub duration_s: f64,
}

pub struct PlotSession {
    pub world: World,
    pub state: PlotState,
    config: PlotConfig,
    codec: Box<dyn RecordCodec>,
    graphics: Vec<TrackedGraphic>,
    no_fly_graphics: Vec<TrackedGraphic>,
    /// Fire-point particle systems, keyed by the owning point's key.
    fire_points: HashMap<String, PrimitiveId>,
    base: Option<EntityId>,
    pub(crate) highlight_base: Option<EntityId>,
    fly_entity: Option<EntityId>,
    refresh: Debouncer<Vec<PlotRecord>>,
    no_fly_refresh: Debouncer<Vec<PlotRecord>>,
}

impl Default for PlotSession {
    fn default() -> Self {
        Self::new(PlotConfig::default())
    }
}

impl PlotSession {
    pub fn new(config: PlotConfig) -> Self {
        let delay = config.refresh_delay_s();
        Self {
            world: World::new(),
            state: PlotState::default(),
            config,
            codec: Box::new(PlainCodec),
            graphics: Vec::new(),
            no_fly_graphics: Vec::new(),
            fire_points: HashMap::new(),
            base: None,
            highlight_base: None,
            fly_entity: None,
            refresh: Debouncer::new(delay),
            no_fly_refresh: Debouncer::new(delay),
        }
    }

    pub fn with_codec(mut self, codec: impl RecordCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn graphics(&self) -> &[TrackedGraphic] {
        &self.graphics
    }

    pub fn no_fly_graphics(&self) -> &[TrackedGraphic] {
        &self.no_fly_graphics
    }

    pub fn graphics_of(&self, id: PlotId) -> impl Iterator<Item = &TrackedGraphic> {
        self.graphics.iter().filter(move |g| g.tag.plot == id)
    }

    pub fn graphic(&self, tag: GraphicTag) -> Option<&TrackedGraphic> {
        self.graphics
            .iter()
            .chain(&self.no_fly_graphics)
            .find(|g| g.tag == tag)
    }

    /// Distinct plot ids with at least one tracked graphic, in insertion order.
    pub fn tracked_plot_ids(&self) -> Vec<PlotId> {
        unique_ids(&self.graphics)
    }

    pub fn tracked_no_fly_ids(&self) -> Vec<PlotId> {
        unique_ids(&self.no_fly_graphics)
    }

    pub fn fire_point(&self, key: &str) -> Option<PrimitiveId> {
        self.fire_points.get(key).copied()
    }

    pub fn base_entity(&self) -> Option<EntityId> {
        self.base
    }

    pub fn fly_entity(&self) -> Option<EntityId> {
        self.fly_entity
    }

    /// Resolves a picked entity to the graphic it renders.
    pub fn tag_for_entity(&self, entity: EntityId) -> Option<GraphicTag> {
        self.graphics
            .iter()
            .chain(&self.no_fly_graphics)
            .find(|g| g.entity == entity)
            .map(|g| g.tag)
            .or_else(|| {
                let key = self.world.get(entity)?.key.as_deref()?;
                GraphicTag::parse(key)
            })
    }

    // ---- refresh ------------------------------------------------------------

    /// Queues a batch for reconciliation. Only the last batch requested within
    /// the debounce window is applied.
    pub fn request_refresh(&mut self, now: Time, records: Vec<PlotRecord>) {
        self.refresh.call(now, records);
    }

    pub fn request_no_fly_refresh(&mut self, now: Time, records: Vec<PlotRecord>) {
        self.no_fly_refresh.call(now, records);
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.refresh.is_pending() || self.no_fly_refresh.is_pending()
    }

    /// Applies refreshes whose debounce window has elapsed. Returns true when
    /// anything was applied.
    pub fn poll(&mut self, now: Time) -> bool {
        let mut applied = false;
        if let Some(records) = self.refresh.poll(now) {
            self.apply_refresh(&records);
            applied = true;
        }
        if let Some(records) = self.no_fly_refresh.poll(now) {
            applied |= self.apply_no_fly_refresh(&records).is_some();
        }
        applied
    }

    /// Removes plots missing from `records`, adds the new ones, then shows
    /// only the checked plots.
    pub fn apply_refresh(&mut self, records: &[PlotRecord]) -> Reconciliation {
        let diff = reconcile(&self.tracked_plot_ids(), records);
        info!(
            add = diff.to_add.len(),
            remove = diff.to_remove.len(),
            keep = diff.unchanged.len(),
            "refreshing plots"
        );
        self.clear(Some(diff.to_remove.as_slice()));
        self.ensure_base();

        let added: HashSet<PlotId> = diff.to_add.iter().copied().collect();
        let len = records.len();
        for (index, record) in records.iter().enumerate() {
            if !added.contains(&record.id) {
                continue;
            }
            if record.object_info.active_shape_points.is_empty() {
                debug!(plot = %record.id, "plot has no shape points");
                continue;
            }
            let z_index = match record.mode() {
                DrawingMode::Polygon => (len - index) as i32,
                _ => index as i32,
            };
            self.add_record(record, z_index);
        }

        let checked = self.state.checked_ids.clone();
        self.set_plots_visible(&checked);
        diff
    }

    /// No-fly zones are polygons tracked apart from regular plots. Skipped
    /// entirely while no-fly display is off.
    pub fn apply_no_fly_refresh(&mut self, records: &[PlotRecord]) -> Option<Reconciliation> {
        if !self.state.no_fly_display {
            debug!("no-fly display disabled; refresh skipped");
            return None;
        }
        let diff = reconcile(&self.tracked_no_fly_ids(), records);
        self.clear(Some(diff.to_remove.as_slice()));
        self.ensure_base();

        let added: HashSet<PlotId> = diff.to_add.iter().copied().collect();
        let len = records.len();
        for (index, record) in records.iter().enumerate() {
            if !added.contains(&record.id)
                || record.object_info.active_shape_points.is_empty()
                || record.mode() != DrawingMode::Polygon
            {
                continue;
            }
            self.add_polygon(record, (len - index) as i32, GraphicLayer::NoFlyZones);
        }
        Some(diff)
    }

    fn ensure_base(&mut self) -> Option<EntityId> {
        let base = ensure_group(&mut self.world, self.base, PLOT_BASE_KEY)?;
        self.base = Some(base);
        Some(base)
    }

    pub(crate) fn ensure_highlight_base(&mut self) -> Option<EntityId> {
        let base = ensure_group(&mut self.world, self.highlight_base, HIGHLIGHT_BASE_KEY)?;
        self.highlight_base = Some(base);
        Some(base)
    }

    // ---- add ----------------------------------------------------------------

    /// Renders `record` according to its drawing mode. Graphics whose key is
    /// already present are left untouched. Returns the number of entities
    /// created.
    pub fn add_record(&mut self, record: &PlotRecord, z_index: i32) -> usize {
        if let Some(center) = record.center()
            && !is_valid_position(&center, self.config.validity_rules())
        {
            debug!(plot = %record.id, ?center, "plot position out of range");
            return 0;
        }
        self.ensure_base();
        match record.mode() {
            DrawingMode::Point => self.add_point(record),
            DrawingMode::Polyline => self.add_polyline(record),
            DrawingMode::Polygon => self.add_polygon(record, z_index, GraphicLayer::Plots),
            DrawingMode::Text => self.add_text(record),
            DrawingMode::Unknown => {
                debug!(plot = %record.id, "unknown drawing mode");
                0
            }
        }
    }

    fn display(&self) -> DistanceDisplay {
        DistanceDisplay::up_to(self.config.label_display_distance_m)
    }

    fn outlined_label(&self, text: String, show: bool) -> LabelGraphic {
        LabelGraphic {
            show,
            ..LabelGraphic::outlined(text, self.display())
        }
    }

    fn plot_entity(&self, tag: &GraphicTag) -> Entity {
        let entity = Entity::new(tag.key());
        match self.base {
            Some(base) => entity.with_parent(base),
            None => entity,
        }
    }

    fn add_entity(&mut self, layer: GraphicLayer, tag: GraphicTag, entity: Entity) -> Option<EntityId> {
        let key = tag.key();
        let Some(id) = self.world.add(entity) else {
            debug!(key = %key, "graphic already exists");
            return None;
        };
        let tracked = TrackedGraphic {
            tag,
            key,
            entity: id,
        };
        match layer {
            GraphicLayer::Plots => self.graphics.push(tracked),
            GraphicLayer::NoFlyZones => self.no_fly_graphics.push(tracked),
        }
        Some(id)
    }

    fn add_point(&mut self, record: &PlotRecord) -> usize {
        let tag = GraphicTag::new(record.id, GraphicKind::Point);
        if self.world.contains_key(&tag.key()) {
            return 0;
        }
        let Some(center) = record.center() else {
            debug!(plot = %record.id, "point without position");
            return 0;
        };
        let visible = record.is_visible();
        let fire = record.object_info.fire_point;
        let text = label_text(record, tag.kind, self.state.is_current(record.id)).unwrap_or_default();

        let color = Color::from_css_or(record.color_hex8(), Color::RED);
        let point = PointGraphic {
            // Fire points render as particles only.
            show: visible && !fire,
            ..PointGraphic::marker(color, self.display())
        };
        let position = center.to_cartesian();
        let entity = self
            .plot_entity(&tag)
            .with_position(position)
            .with_point(point)
            .with_label(self.outlined_label(text, visible));
        if self.add_entity(GraphicLayer::Plots, tag, entity).is_none() {
            return 0;
        }

        if fire {
            let primitive = self.world.add_primitive(ParticleSystem {
                show: visible,
                ..ParticleSystem::fire(position)
            });
            self.fire_points.insert(tag.key(), primitive);
        }
        1
    }

    fn add_polyline(&mut self, record: &PlotRecord) -> usize {
        let visible = record.is_visible();
        let detailed = self.state.is_current(record.id);
        let color = Color::from_css_or(record.color_hex8(), Color::RED);
        let mut added = 0;

        let tag = GraphicTag::new(record.id, GraphicKind::PolylineLabel);
        if let Some(center) = record.center() {
            let text = label_text(record, tag.kind, detailed).unwrap_or_default();
            let entity = self
                .plot_entity(&tag)
                .with_position(center.to_cartesian())
                .with_label(self.outlined_label(text, visible));
            added += usize::from(self.add_entity(GraphicLayer::Plots, tag, entity).is_some());
        }

        for (index, line) in record.object_info.active_sub_line.iter().enumerate() {
            let tag = GraphicTag::new(record.id, GraphicKind::PolylineSegment(index));
            if self.world.contains_key(&tag.key()) {
                continue;
            }
            let text = label_text(record, tag.kind, detailed).unwrap_or_default();
            let polyline = PolylineGraphic {
                show: visible,
                ..PolylineGraphic::solid(
                    vec![line.start.to_cartesian(), line.end.to_cartesian()],
                    color,
                    POLYLINE_WIDTH,
                )
            };
            let entity = self
                .plot_entity(&tag)
                .with_position(line.center_point.to_cartesian())
                .with_polyline(polyline)
                .with_label(self.outlined_label(text, visible));
            added += usize::from(self.add_entity(GraphicLayer::Plots, tag, entity).is_some());
        }
        added
    }

    fn add_polygon(&mut self, record: &PlotRecord, z_index: i32, layer: GraphicLayer) -> usize {
        let vertices = record.vertices();
        let Some(first) = vertices.first().copied() else {
            debug!(plot = %record.id, "polygon without vertices");
            return 0;
        };
        let Some(center) = record.center() else {
            return 0;
        };
        let visible = record.is_visible();
        let color = Color::from_css_or(record.color_hex8(), default_area_color());
        let text = label_text(record, GraphicKind::Polygon, self.state.is_current(record.id))
            .unwrap_or_default();

        if record.is_scenic_spot() {
            let tag = GraphicTag::new(record.id, GraphicKind::ScenicSpotWall);
            let mut path = vertices.to_vec();
            path.push(first);
            let minimum_heights: Vec<f64> = path.iter().map(|p| p.altitude).collect();
            let wall = WallGraphic {
                trail_image: Some(WALL_TRAIL_IMAGE.to_string()),
                trail_duration_ms: WALL_TRAIL_DURATION_MS,
                show: visible,
                ..WallGraphic::with_height(path, minimum_heights, self.config.scenic_wall_height_m, color)
            };
            let entity = self
                .plot_entity(&tag)
                .with_position(center.to_cartesian())
                .with_wall(wall)
                .with_label(self.outlined_label(text, false));
            return usize::from(self.add_entity(layer, tag, entity).is_some());
        }

        let tag = GraphicTag::new(record.id, GraphicKind::Polygon);
        let hierarchy: Vec<Ecef> = vertices.iter().map(|p| p.to_cartesian()).collect();
        let label_altitude = record.max_altitude().unwrap_or(center.altitude);
        let polygon = PolygonGraphic {
            show: visible,
            ..PolygonGraphic::filled(hierarchy, color, z_index)
        };
        let entity = self
            .plot_entity(&tag)
            .with_position(center.with_altitude(label_altitude).to_cartesian())
            .with_polygon(polygon)
            .with_label(self.outlined_label(text, visible));
        usize::from(self.add_entity(layer, tag, entity).is_some())
    }

    fn add_text(&mut self, record: &PlotRecord) -> usize {
        let tag = GraphicTag::new(record.id, GraphicKind::Text);
        if self.world.contains_key(&tag.key()) {
            return 0;
        }
        let Some(center) = record.center() else {
            return 0;
        };
        let text = label_text(record, tag.kind, false).unwrap_or_default();
        let color = Color::from_css_or(record.color_hex8(), default_text_color());
        let mut label = LabelGraphic::filled(text, color, self.display());
        if let Some(font) = &record.object_info.label_font {
            label.font = font.clone();
        }
        label.show = record.is_visible();
        let entity = self
            .plot_entity(&tag)
            .with_position(center.to_cartesian())
            .with_label(label);
        usize::from(self.add_entity(GraphicLayer::Plots, tag, entity).is_some())
    }

    // ---- visibility ---------------------------------------------------------

    fn show_graphic(&mut self, index: usize, show: bool) {
        let graphic = &self.graphics[index];
        self.world.set_show(graphic.entity, show);
        if let Some(primitive) = self.fire_points.get(&graphic.key)
            && let Some(fire) = self.world.primitive_mut(*primitive)
        {
            fire.show = show;
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for index in 0..self.graphics.len() {
            self.show_graphic(index, visible);
        }
    }

    pub fn set_visible(&mut self, id: PlotId, visible: bool) {
        for index in 0..self.graphics.len() {
            if self.graphics[index].tag.plot == id {
                self.show_graphic(index, visible);
            }
        }
    }

    /// Hides everything, then shows the listed plots. The plot being edited
    /// stays hidden.
    pub fn set_plots_visible(&mut self, ids: &[PlotId]) {
        if self.graphics.is_empty() {
            return;
        }
        let editing = self.state.editing_id();
        for index in 0..self.graphics.len() {
            let plot = self.graphics[index].tag.plot;
            let show = ids.contains(&plot) && editing != Some(plot);
            self.show_graphic(index, show);
        }
    }

    // ---- removal ------------------------------------------------------------

    fn remove_tracked(&mut self, graphic: &TrackedGraphic) {
        self.world.remove(graphic.entity);
        if let Some(primitive) = self.fire_points.remove(&graphic.key) {
            self.world.remove_primitive(primitive);
        }
    }

    /// Removes the graphics of `ids` (or of every plot) from both layers.
    /// Returns the number of graphics removed.
    pub fn clear(&mut self, ids: Option<&[PlotId]>) -> usize {
        let matches = |g: &TrackedGraphic| ids.is_none_or(|ids| ids.contains(&g.tag.plot));

        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.graphics).into_iter().partition(|g| matches(g));
        self.graphics = kept;
        let (removed_no_fly, kept_no_fly): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.no_fly_graphics).into_iter().partition(|g| matches(g));
        self.no_fly_graphics = kept_no_fly;

        for graphic in removed.iter().chain(&removed_no_fly) {
            self.remove_tracked(graphic);
        }
        removed.len() + removed_no_fly.len()
    }

    pub fn clear_no_fly_zones(&mut self) -> usize {
        let removed = std::mem::take(&mut self.no_fly_graphics);
        for graphic in &removed {
            self.remove_tracked(graphic);
        }
        removed.len()
    }

    /// Removes one plot's regular graphics.
    pub fn delete(&mut self, id: PlotId) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.graphics)
            .into_iter()
            .partition(|g| g.tag.plot == id);
        self.graphics = kept;
        for graphic in &removed {
            self.remove_tracked(graphic);
        }
        removed.len()
    }

    // ---- labels -------------------------------------------------------------

    /// Switches labels on a selection change: `previous` goes back to its
    /// short label, `current` gets measurements.
    pub fn refresh_labels(&mut self, current: Option<&PlotRecord>, previous: Option<&PlotRecord>) {
        for (record, detailed) in [(previous, false), (current, true)] {
            let Some(record) = record else { continue };
            let targets: Vec<(EntityId, GraphicKind)> = self
                .graphics_of(record.id)
                .map(|g| (g.entity, g.tag.kind))
                .collect();
            for (entity, kind) in targets {
                if !matches!(
                    kind,
                    GraphicKind::Point
                        | GraphicKind::PolylineLabel
                        | GraphicKind::PolylineSegment(_)
                        | GraphicKind::Polygon
                ) {
                    continue;
                }
                let Some(text) = label_text(record, kind, detailed) else {
                    continue;
                };
                if let Some(label) = self.world.get_mut(entity).and_then(|e| e.label.as_mut()) {
                    label.text = text;
                }
            }
        }
    }

    // ---- fly-to -------------------------------------------------------------

    pub fn remove_fly_entity(&mut self) -> bool {
        match self.fly_entity.take() {
            Some(id) => self.world.remove(id).is_some(),
            None => false,
        }
    }

    /// Replaces the fly-to helper with an invisible entity covering the
    /// plot's vertices and asks the camera to fly there.
    pub fn choose(&mut self, record: &PlotRecord) -> Option<FlyTo> {
        self.remove_fly_entity();
        let center = record.center()?;
        let hidden = Color::WHITE.with_alpha(0.0);
        let positions: Vec<Ecef> = record.vertices().iter().map(|p| p.to_cartesian()).collect();
        let entity = Entity::anonymous()
            .with_position(center.to_cartesian())
            .with_point(PointGraphic::marker(hidden, DistanceDisplay::up_to(f64::MAX)))
            .with_polyline(PolylineGraphic::solid(positions, hidden, 1.0));
        let id = self.world.add(entity)?;
        self.fly_entity = Some(id);
        Some(FlyTo {
            entity: id,
            duration_s: self.config.fly_to_duration_s,
        })
    }

    // ---- data loading -------------------------------------------------------

    /// Fetches and decodes one record. Failures are logged and yield `None`.
    pub async fn fetch_record<S>(&self, source: &S, id: PlotId) -> Option<PlotRecord>
    where
        S: PlotDataSource + ?Sized,
    {
        match source.plot_details(id).await {
            Ok(Some(raw)) => match self.codec.decode(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(plot = %id, error = %e, "failed to decode plot");
                    None
                }
            },
            Ok(None) => {
                debug!(plot = %id, "plot not found");
                None
            }
            Err(e) => {
                warn!(plot = %id, error = %e, "failed to fetch plot");
                None
            }
        }
    }

    /// Loads plots, newest first. With a `center` the query is limited to
    /// the configured radius around it and the result is queued for a
    /// refresh; without one every plot is returned and nothing is drawn.
    pub async fn load_plots<S>(
        &mut self,
        source: &S,
        center: Option<GeoPosition>,
        now: Time,
    ) -> Result<Vec<PlotRecord>, SourceError>
    where
        S: PlotDataSource + ?Sized,
    {
        let query = match center {
            Some(c) => PlotQuery {
                longitude: Some(self.codec.encode_longitude(c.longitude)),
                latitude: Some(self.codec.encode_latitude(c.latitude)),
                radius: Some(self.config.range_radius_m),
                is_query_owner: self.state.owner_only,
            },
            None => PlotQuery::all(self.state.owner_only),
        };
        let range = query.is_range();
        let raw = source.area_draw(query).await?;
        let records = decode_records(raw, self.config.decode_chunk_size, self.codec.as_ref());
        debug!(count = records.len(), range, "plots loaded");
        if range {
            self.request_refresh(now, records.clone());
        }
        Ok(records)
    }

    /// No-fly zones within the configured radius of `center`, newest first.
    pub async fn load_no_fly_zones<S>(
        &self,
        source: &S,
        center: GeoPosition,
    ) -> Result<Vec<PlotRecord>, SourceError>
    where
        S: PlotDataSource + ?Sized,
    {
        let query = NoFlyQuery {
            lng: self.codec.encode_longitude(center.longitude),
            lat: self.codec.encode_latitude(center.latitude),
            radius: self.config.no_fly_radius_m,
        };
        let raw = source.no_fly_zones(query).await?;
        Ok(decode_records(raw, self.config.decode_chunk_size, self.codec.as_ref()))
    }
}

/// Live group entity for `key`: the cached one, else whatever entity owns
/// the key, else a fresh one.
fn ensure_group(world: &mut World, cached: Option<EntityId>, key: &str) -> Option<EntityId> {
    if let Some(id) = cached
        && world.get(id).is_some()
    {
        return Some(id);
    }
    match world.by_key(key) {
        Some(id) => Some(id),
        None => world.add(Entity::new(key)),
    }
}

fn unique_ids(graphics: &[TrackedGraphic]) -> Vec<PlotId> {
    let mut seen = HashSet::new();
    graphics
        .iter()
        .map(|g| g.tag.plot)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Label text of one graphic; `detailed` adds measurements. `None` for
/// graphics without a label.
pub fn label_text(record: &PlotRecord, kind: GraphicKind, detailed: bool) -> Option<String> {
    let name = record.tower_name.as_str();
    let info = &record.object_info;
    let content = match kind {
        GraphicKind::Point => LabelContent::Point {
            name,
            position: if detailed { record.center() } else { None },
        },
        GraphicKind::PolylineLabel => LabelContent::Polyline {
            name,
            total: if detailed { info.active_shape_computed } else { None },
            segment: None,
        },
        GraphicKind::PolylineSegment(index) => {
            if !detailed {
                return Some(String::new());
            }
            LabelContent::Polyline {
                name: "",
                total: None,
                segment: info.active_sub_line.get(index).and_then(|l| l.distance),
            }
        }
        GraphicKind::Polygon | GraphicKind::ScenicSpotWall => LabelContent::Polygon {
            name,
            area: if detailed { info.active_shape_computed } else { None },
        },
        GraphicKind::Text => LabelContent::Text { name },
        GraphicKind::Highlight => return None,
    };
    Some(format_graphic_label_text(&content))
}
