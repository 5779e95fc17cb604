//! Map model: markers, paths and the prediction overlay, plus the geometry
//! the map widget needs to draw them.
//!
//! Rendering works from a list of [`Layer`]s. [`MapScene`] remembers the last
//! list it was given and reports only what changed, so the widget (and the
//! route resolver behind it) is not rebuilt on every frame.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            Self::High
        } else if probability < 0.3 {
            Self::Low
        } else {
            Self::Medium
        }
    }

    pub const fn style(self) -> PathStyle {
        match self {
            Self::High => PathStyle {
                color: PathColor::Red,
                dash: 1.0,
                gap: 1.0,
                speed: 3.0,
                weight: 3,
            },
            Self::Medium => PathStyle {
                color: PathColor::Orange,
                dash: 1.0,
                gap: 1.0,
                speed: 2.0,
                weight: 2,
            },
            Self::Low => PathStyle {
                color: PathColor::Yellow,
                dash: 1.0,
                gap: 1.0,
                speed: 1.0,
                weight: 1,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathColor {
    Gold,
    Red,
    Orange,
    Yellow,
}

/// Dash pattern for a polyline. `dash` and `gap` are fractions of the
/// visible map width divided by 40; `speed` is pattern periods per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: PathColor,
    pub dash: f64,
    pub gap: f64,
    pub speed: f64,
    pub weight: u8,
}

impl PathStyle {
    pub const ANT: Self = Self {
        color: PathColor::Gold,
        dash: 1.0,
        gap: 2.0,
        speed: 1.5,
        weight: 2,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Incident,
    Camera,
    Intercept,
    PoliceStation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub kind: MarkerKind,
    pub position: LatLng,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLayer {
    pub id: String,
    pub points: Vec<LatLng>,
    pub style: PathStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Marker),
    Path(PathLayer),
}

impl Layer {
    pub fn id(&self) -> &str {
        match self {
            Self::Marker(marker) => &marker.id,
            Self::Path(path) => &path.id,
        }
    }
}

/// One predicted route, localized, before road geometry is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayRoute {
    pub id: String,
    pub kind: String,
    pub destination: String,
    pub reasoning: String,
    pub probability: u32,
    pub band: ProbabilityBand,
    pub waypoints: Vec<LatLng>,
    pub intercepts: Vec<Marker>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionOverlay {
    pub routes: Vec<OverlayRoute>,
    pub stations: Vec<Marker>,
}

impl PredictionOverlay {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every declared waypoint; the viewport fits these.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::fit(self.routes.iter().flat_map(|route| route.waypoints.iter().copied()))
    }
}

/// What the viewport should show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Center { center: LatLng, zoom: u8 },
    Fit(Bounds),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapModel {
    pub focus: Focus,
    pub markers: Vec<Marker>,
    pub ant_path: Vec<LatLng>,
    pub overlay: PredictionOverlay,
}

impl MapModel {
    /// Layers to draw, given the road geometry resolved so far. Routes appear
    /// once their geometry is known, each with a marker at its endpoint.
    pub fn layers(&self, resolved: &HashMap<String, Vec<LatLng>>) -> Vec<Layer> {
        let mut layers: Vec<Layer> = self.markers.iter().cloned().map(Layer::Marker).collect();

        if self.ant_path.len() > 1 {
            layers.push(Layer::Path(PathLayer {
                id: "ant-path".to_string(),
                points: self.ant_path.clone(),
                style: PathStyle::ANT,
            }));
        }

        layers.extend(self.overlay.stations.iter().cloned().map(Layer::Marker));

        for route in &self.overlay.routes {
            let Some(points) = resolved.get(&route.id) else {
                continue;
            };
            layers.push(Layer::Path(PathLayer {
                id: format!("route:{}", route.id),
                points: points.clone(),
                style: route.band.style(),
            }));
            if let Some(end) = points.last() {
                layers.push(Layer::Marker(Marker {
                    id: format!("route-end:{}", route.id),
                    kind: MarkerKind::Intercept,
                    position: *end,
                    title: route.destination.clone(),
                    description: format!("{}% · {}", route.probability, route.kind),
                }));
            }
            layers.extend(route.intercepts.iter().cloned().map(Layer::Marker));
        }

        layers
    }
}

/// Ant path: the GPS origin followed by every camera, in list order.
pub fn ant_path(origin: LatLng, cameras: impl IntoIterator<Item = LatLng>) -> Vec<LatLng> {
    std::iter::once(origin).chain(cameras).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The layers currently on the map.
#[derive(Debug, Clone, Default)]
pub struct MapScene {
    layers: Vec<Layer>,
}

impl MapScene {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Replaces the scene with `next`. A layer whose content changed counts
    /// as removed and added again.
    pub fn apply(&mut self, next: Vec<Layer>) -> SceneDiff {
        let kept: HashSet<&str> = self
            .layers
            .iter()
            .filter(|layer| next.iter().any(|candidate| candidate == *layer))
            .map(Layer::id)
            .collect();

        let removed = self
            .layers
            .iter()
            .map(Layer::id)
            .filter(|id| !kept.contains(id))
            .map(str::to_string)
            .collect();
        let added = next
            .iter()
            .map(Layer::id)
            .filter(|id| !kept.contains(id))
            .map(str::to_string)
            .collect();

        self.layers = next;
        SceneDiff { added, removed }
    }

    pub fn clear(&mut self) -> SceneDiff {
        self.apply(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn fit(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    south: point.lat,
                    west: point.lng,
                    north: point.lat,
                    east: point.lng,
                },
                Some(b) => Self {
                    south: b.south.min(point.lat),
                    west: b.west.min(point.lng),
                    north: b.north.max(point.lat),
                    east: b.east.max(point.lng),
                },
            })
        })
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

const MIN_SPAN: f64 = 0.001;
const FIT_PADDING: f64 = 0.1;
/// Map pixels covered by one terminal column.
const PIXELS_PER_COLUMN: f64 = 8.0;

/// Geographic window shown in a map panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub lng: [f64; 2],
    pub lat: [f64; 2],
}

impl Viewport {
    /// Slippy-map zoom around `center` for a panel `cols × rows` cells.
    pub fn centered(center: LatLng, zoom: u8, cols: u16, rows: u16) -> Self {
        let degrees_per_pixel = 360.0 / (256.0 * 2f64.powi(i32::from(zoom)));
        let half_lng = f64::from(cols.max(1)) * PIXELS_PER_COLUMN * degrees_per_pixel / 2.0;
        // Cells are about twice as tall as wide; latitude shrinks toward the poles.
        let half_lat = f64::from(rows.max(1))
            * PIXELS_PER_COLUMN
            * 2.0
            * degrees_per_pixel
            * center.lat.to_radians().cos()
            / 2.0;
        Self {
            lng: [center.lng - half_lng, center.lng + half_lng],
            lat: [center.lat - half_lat, center.lat + half_lat],
        }
    }

    /// Smallest window containing `bounds` with a margin on every side.
    pub fn fit(bounds: Bounds) -> Self {
        let lng_pad = (bounds.east - bounds.west).max(MIN_SPAN) * FIT_PADDING;
        let lat_pad = (bounds.north - bounds.south).max(MIN_SPAN) * FIT_PADDING;
        Self {
            lng: [bounds.west - lng_pad, bounds.east + lng_pad],
            lat: [bounds.south - lat_pad, bounds.north + lat_pad],
        }
    }

    pub fn for_focus(focus: Focus, cols: u16, rows: u16) -> Self {
        match focus {
            Focus::Center { center, zoom } => Self::centered(center, zoom, cols, rows),
            Focus::Fit(bounds) => Self::fit(bounds),
        }
    }

    pub fn width(&self) -> f64 {
        self.lng[1] - self.lng[0]
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.lng[0]..=self.lng[1]).contains(&point.lng)
            && (self.lat[0]..=self.lat[1]).contains(&point.lat)
    }
}

/// Splits a polyline into the "on" pieces of a dash pattern. Increasing
/// `phase` moves the dashes toward the end of the line.
pub fn dash_segments(points: &[(f64, f64)], dash: f64, gap: f64, phase: f64) -> Vec<[(f64, f64); 2]> {
    let period = dash + gap;
    if dash <= 0.0 || gap <= 0.0 {
        return points.windows(2).map(|pair| [pair[0], pair[1]]).collect();
    }

    let mut segments = Vec::new();
    let mut offset = (period - phase.rem_euclid(period)) % period;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = (b.0 - a.0).hypot(b.1 - a.1);
        if length <= f64::EPSILON {
            continue;
        }
        let at = |distance: f64| {
            let t = distance / length;
            (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
        };

        let mut travelled = 0.0;
        while travelled < length {
            let in_dash = offset < dash;
            let state_left = if in_dash { dash - offset } else { period - offset };
            let step = state_left.min(length - travelled);
            if in_dash {
                segments.push([at(travelled), at(travelled + step)]);
            }
            travelled += step;
            offset = (offset + step) % period;
        }
    }

    segments
}

/// Maps image pixels into a panel, scaled to fit whole and centered
/// ("contain"). Panel units are whatever the caller draws in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ContainTransform {
    pub fn new(image: (f64, f64), panel: (f64, f64)) -> Option<Self> {
        let (image_w, image_h) = image;
        let (panel_w, panel_h) = panel;
        if image_w <= 0.0 || image_h <= 0.0 || panel_w <= 0.0 || panel_h <= 0.0 {
            return None;
        }
        let scale = (panel_w / image_w).min(panel_h / image_h);
        Some(Self {
            scale,
            offset_x: (panel_w - image_w * scale) / 2.0,
            offset_y: (panel_h - image_h * scale) / 2.0,
        })
    }

    pub fn point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// The image frame itself, as `(x, y, w, h)` in panel units.
    pub fn frame(&self, image: (f64, f64)) -> (f64, f64, f64, f64) {
        (
            self.offset_x,
            self.offset_y,
            image.0 * self.scale,
            image.1 * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str) -> Marker {
        Marker {
            id: id.to_string(),
            kind: MarkerKind::Camera,
            position: LatLng::new(1.0, 2.0),
            title: id.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn bands_split_at_thresholds() {
        assert_eq!(ProbabilityBand::from_probability(0.89), ProbabilityBand::High);
        assert_eq!(ProbabilityBand::from_probability(0.7), ProbabilityBand::Medium);
        assert_eq!(ProbabilityBand::from_probability(0.45), ProbabilityBand::Medium);
        assert_eq!(ProbabilityBand::from_probability(0.3), ProbabilityBand::Medium);
        assert_eq!(ProbabilityBand::from_probability(0.15), ProbabilityBand::Low);
    }

    #[test]
    fn ant_path_starts_at_origin_and_keeps_camera_order() {
        let origin = LatLng::new(24.7136, 46.6753);
        let cameras = [LatLng::new(24.711, 46.674), LatLng::new(24.715, 46.676)];
        let path = ant_path(origin, cameras);
        assert_eq!(path.len(), cameras.len() + 1);
        assert_eq!(path[0], origin);
        assert_eq!(&path[1..], &cameras);
    }

    #[test]
    fn repeated_apply_is_empty() {
        let mut scene = MapScene::default();
        let layers = vec![Layer::Marker(marker("a")), Layer::Marker(marker("b"))];

        let first = scene.apply(layers.clone());
        assert_eq!(first.added, ["a", "b"]);
        assert!(first.removed.is_empty());

        assert!(scene.apply(layers).is_empty());
    }

    #[test]
    fn diff_reports_only_changed_layers() {
        let mut scene = MapScene::default();
        scene.apply(vec![Layer::Marker(marker("a")), Layer::Marker(marker("b"))]);

        let mut moved = marker("b");
        moved.position = LatLng::new(5.0, 5.0);
        let diff = scene.apply(vec![
            Layer::Marker(marker("a")),
            Layer::Marker(moved),
            Layer::Marker(marker("c")),
        ]);
        assert_eq!(diff.added, ["b", "c"]);
        assert_eq!(diff.removed, ["b"]);

        let diff = scene.clear();
        assert_eq!(diff.removed.len(), 3);
    }

    #[test]
    fn routes_appear_once_resolved_with_an_endpoint_marker() {
        let route = OverlayRoute {
            id: "ROUTE-B".to_string(),
            kind: "HIDEOUT".to_string(),
            destination: "Al-Ammariyah".to_string(),
            reasoning: String::new(),
            probability: 89,
            band: ProbabilityBand::High,
            waypoints: vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)],
            intercepts: vec![marker("intercept:ROUTE-B:0")],
        };
        let model = MapModel {
            focus: Focus::Center {
                center: LatLng::default(),
                zoom: 15,
            },
            markers: Vec::new(),
            ant_path: Vec::new(),
            overlay: PredictionOverlay {
                routes: vec![route],
                stations: Vec::new(),
            },
        };

        assert!(model.layers(&HashMap::new()).is_empty());

        let road = vec![LatLng::new(0.0, 0.0), LatLng::new(0.5, 0.2), LatLng::new(1.0, 1.0)];
        let resolved = HashMap::from([("ROUTE-B".to_string(), road)]);
        let layers = model.layers(&resolved);
        let ids: Vec<&str> = layers.iter().map(Layer::id).collect();
        assert_eq!(ids, ["route:ROUTE-B", "route-end:ROUTE-B", "intercept:ROUTE-B:0"]);
        match &layers[1] {
            Layer::Marker(end) => assert_eq!(end.position, LatLng::new(1.0, 1.0)),
            Layer::Path(_) => panic!("expected the endpoint marker"),
        }
    }

    #[test]
    fn dashes_cover_the_expected_share_of_a_line() {
        let line = [(0.0, 0.0), (10.0, 0.0)];
        let segments = dash_segments(&line, 2.0, 2.0, 0.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], [(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(segments[2], [(8.0, 0.0), (10.0, 0.0)]);

        let shifted = dash_segments(&line, 2.0, 2.0, 1.0);
        assert_eq!(shifted[0], [(1.0, 0.0), (3.0, 0.0)]);
        assert_eq!(shifted[1], [(5.0, 0.0), (7.0, 0.0)]);
    }

    #[test]
    fn contain_preserves_aspect_and_centers() {
        let wide = ContainTransform::new((200.0, 100.0), (100.0, 100.0));
        assert_eq!(
            wide,
            Some(ContainTransform {
                scale: 0.5,
                offset_x: 0.0,
                offset_y: 25.0,
            })
        );

        let Some(tall) = ContainTransform::new((100.0, 200.0), (300.0, 100.0)) else {
            panic!("valid sizes");
        };
        let (x, y, w, h) = tall.frame((100.0, 200.0));
        assert!((w / h - 0.5).abs() < 1e-12);
        assert!((x - (300.0 - w) / 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert_eq!(tall.point(100.0, 200.0), (x + w, h));

        assert_eq!(ContainTransform::new((0.0, 10.0), (10.0, 10.0)), None);
    }

    #[test]
    fn fit_pads_bounds_and_centered_viewport_surrounds_center() {
        let bounds = Bounds::fit([LatLng::new(24.6, 46.5), LatLng::new(24.8, 46.8)]);
        let Some(bounds) = bounds else {
            panic!("two points have bounds");
        };
        let viewport = Viewport::fit(bounds);
        assert!(viewport.contains(LatLng::new(24.6, 46.5)));
        assert!(viewport.contains(LatLng::new(24.8, 46.8)));

        let center = LatLng::new(24.7136, 46.6753);
        let zoomed = Viewport::centered(center, 16, 60, 20);
        let wider = Viewport::centered(center, 15, 60, 20);
        assert!(zoomed.contains(center));
        assert!((wider.width() / zoomed.width() - 2.0).abs() < 1e-9);
    }
}
