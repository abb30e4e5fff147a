/// Placeholder for a loaded 3D model (glTF, tileset feature) attached to an
/// entity. Picking treats models differently from flat annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelGraphic {
    pub uri: String,
    /// Bounding-sphere radius used for picking (meters).
    pub radius_m: f64,
    pub show: bool,
}

impl ModelGraphic {
    pub fn new(uri: impl Into<String>, radius_m: f64) -> Self {
        Self {
            uri: uri.into(),
            radius_m,
            show: true,
        }
    }
}
