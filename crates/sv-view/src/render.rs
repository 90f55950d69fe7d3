//! Render description built from one frame snapshot.

use sv_core::{CityId, FrameIndex, GeoPoint};
use sv_store::EnrichedRow;

/// Default map centre (the middle of the Czech Republic).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 49.88537, lon: 15.3684 };
/// Default zoom level.
pub const DEFAULT_ZOOM: f64 = 6.0;
/// Default intensity root: `intensity = infected^(1/z_coef)`.
pub const DEFAULT_Z_COEF: f64 = 5.0;
/// Default radius coefficient: `radius = (infected+1)^(2.5/(11-radius_coef))`.
pub const DEFAULT_RADIUS_COEF: f64 = 4.875;

/// Camera position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom:   f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { center: DEFAULT_CENTER, zoom: DEFAULT_ZOOM }
    }
}

/// Styling of the density layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub z_coef:      f64,
    pub radius_coef: f64,
    pub color_scale: String,
    pub map_style:   String,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            z_coef:      DEFAULT_Z_COEF,
            radius_coef: DEFAULT_RADIUS_COEF,
            color_scale: "plasma".into(),
            map_style:   "open-street-map".into(),
        }
    }
}

impl LayerStyle {
    /// Colour intensity of a city with `infected` cases.
    ///
    /// A root flattens the range better than a logarithm does.
    pub fn intensity(&self, infected: u64) -> f64 {
        (infected as f64).powf(1.0 / self.z_coef.max(0.1))
    }

    /// Marker radius of a city with `infected` cases.
    pub fn radius(&self, infected: u64) -> f64 {
        // The exponent's denominator must stay positive.
        let denom = (11.0 - self.radius_coef).max(0.1);
        (infected as f64 + 1.0).powf(2.5 / denom)
    }
}

/// One city on the map.  Pure data: sizes and colours come from the
/// description's [`LayerStyle`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id:         CityId,
    pub name:       String,
    pub position:   GeoPoint,
    pub population: u64,
    pub infected:   u64,
}

impl From<&EnrichedRow> for MapMarker {
    fn from(row: &EnrichedRow) -> Self {
        Self {
            id:         row.id.clone(),
            name:       row.name.clone(),
            position:   GeoPoint::new(row.lat, row.lon),
            population: row.population,
            infected:   row.infected_count,
        }
    }
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescription {
    // ── data ──────────────────────────────────────────────────────────────
    pub frame:   FrameIndex,
    pub markers: Vec<MapMarker>,

    // ── view ──────────────────────────────────────────────────────────────
    pub viewport: Viewport,
    /// Frame selected on the animation slider, if the user moved it.
    pub slider:   Option<FrameIndex>,
    pub style:    LayerStyle,
}

impl RenderDescription {
    /// A description of `rows` (one frame snapshot) in the default view.
    pub fn from_rows(frame: FrameIndex, rows: &[EnrichedRow]) -> Self {
        Self {
            frame,
            markers:  rows.iter().map(MapMarker::from).collect(),
            viewport: Viewport::default(),
            slider:   None,
            style:    LayerStyle::default(),
        }
    }

    /// Same data, default view.
    pub fn reset(mut self) -> Self {
        self.viewport = Viewport::default();
        self.slider = None;
        self.style = LayerStyle::default();
        self
    }

    pub fn total_infected(&self) -> u64 {
        self.markers.iter().map(|m| m.infected).sum()
    }

    /// `(intensity, radius)` of `marker` under the current style.
    pub fn marker_scale(&self, marker: &MapMarker) -> (f64, f64) {
        (self.style.intensity(marker.infected), self.style.radius(marker.infected))
    }
}
