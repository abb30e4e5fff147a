use foundation::handles::Handle;
use foundation::math::Ecef;

use crate::components::{
    LabelGraphic, ModelGraphic, PointGraphic, PolygonGraphic, PolylineGraphic, WallGraphic,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub Handle);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}

/// A rendered object: an optional anchor position plus any combination of
/// graphics. Entities form a tree through `parent`; a hidden parent hides
/// every descendant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Unique lookup key within a `World`, e.g. `42_plotPoint`.
    pub key: Option<String>,
    pub parent: Option<EntityId>,
    pub position: Option<Ecef>,
    pub show: bool,
    pub point: Option<PointGraphic>,
    pub label: Option<LabelGraphic>,
    pub polyline: Option<PolylineGraphic>,
    pub polygon: Option<PolygonGraphic>,
    pub wall: Option<WallGraphic>,
    pub model: Option<ModelGraphic>,
}

impl Entity {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            show: true,
            ..Self::default()
        }
    }

    /// Entity without a lookup key (helpers, fly-to targets).
    pub fn anonymous() -> Self {
        Self {
            show: true,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Ecef) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_point(mut self, point: PointGraphic) -> Self {
        self.point = Some(point);
        self
    }

    pub fn with_label(mut self, label: LabelGraphic) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_polyline(mut self, polyline: PolylineGraphic) -> Self {
        self.polyline = Some(polyline);
        self
    }

    pub fn with_polygon(mut self, polygon: PolygonGraphic) -> Self {
        self.polygon = Some(polygon);
        self
    }

    pub fn with_wall(mut self, wall: WallGraphic) -> Self {
        self.wall = Some(wall);
        self
    }

    pub fn with_model(mut self, model: ModelGraphic) -> Self {
        self.model = Some(model);
        self
    }

    pub fn is_model(&self) -> bool {
        self.model.is_some()
    }

    /// Every world-space point the entity's graphics cover.
    pub fn extent_points(&self) -> Vec<Ecef> {
        let mut out: Vec<Ecef> = self.position.into_iter().collect();
        if let Some(polyline) = &self.polyline {
            out.extend_from_slice(&polyline.positions);
        }
        if let Some(polygon) = &self.polygon {
            out.extend_from_slice(&polygon.hierarchy);
        }
        if let Some(wall) = &self.wall {
            out.extend(wall.corners());
        }
        out
    }
}
