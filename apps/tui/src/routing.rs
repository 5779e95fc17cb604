//! Road geometry for predicted routes.
//!
//! Routes are resolved through an OSRM-compatible service. Results are cached
//! by waypoint key and identical requests already in flight are not reissued.
//! Any failure falls back to the straight-line waypoints.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::LatLng;
use crate::error::RoutingError;

#[async_trait]
pub trait RouteService: Send + Sync {
    async fn route(&self, waypoints: &[LatLng]) -> Result<Vec<LatLng>, RoutingError>;
}

/// `lng,lat;lng,lat…` as OSRM expects it.
pub fn osrm_coordinates(waypoints: &[LatLng]) -> String {
    waypoints
        .iter()
        .map(|point| format!("{},{}", point.lng, point.lat))
        .collect::<Vec<_>>()
        .join(";")
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Extracts the first route's GeoJSON line, converting `[lng, lat]` pairs.
pub fn parse_osrm_geometry(body: &str) -> Result<Vec<LatLng>, RoutingError> {
    let response: OsrmResponse = serde_json::from_str(body)?;
    if response.code != "Ok" {
        return Err(RoutingError::NoRoute(response.code));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::NoRoute("no routes".to_string()))?;
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| LatLng::new(lat, lng))
        .collect())
}

pub struct OsrmClient {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn route_url(&self, waypoints: &[LatLng]) -> String {
        format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson",
            self.base_url,
            osrm_coordinates(waypoints)
        )
    }
}

#[async_trait]
impl RouteService for OsrmClient {
    async fn route(&self, waypoints: &[LatLng]) -> Result<Vec<LatLng>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewWaypoints(waypoints.len()));
        }
        let response = self.client.get(self.route_url(waypoints)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_osrm_geometry(&body)
    }
}

/// Used when routing is switched off: every request fails, so every route
/// is drawn straight.
pub struct StraightLines;

#[async_trait]
impl RouteService for StraightLines {
    async fn route(&self, _waypoints: &[LatLng]) -> Result<Vec<LatLng>, RoutingError> {
        Err(RoutingError::Disabled)
    }
}

/// Waypoints quantized to ~1 cm so float noise does not defeat the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointKey(Vec<(i64, i64)>);

impl WaypointKey {
    pub fn new(waypoints: &[LatLng]) -> Self {
        const SCALE: f64 = 1e7;
        Self(
            waypoints
                .iter()
                .map(|point| ((point.lat * SCALE).round() as i64, (point.lng * SCALE).round() as i64))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteEvent {
    pub generation: u64,
    pub route_id: String,
    pub points: Vec<LatLng>,
    /// False when the points are the straight-line fallback.
    pub routed: bool,
}

/// Resolved routes kept across overlays; the oldest are evicted first.
const ROUTE_CACHE_LIMIT: usize = 64;

#[derive(Default)]
struct RouteCache {
    resolved: HashMap<WaypointKey, Vec<LatLng>>,
    order: VecDeque<WaypointKey>,
    /// Key → generation of the task requesting it. Entries left behind by an
    /// aborted generation are taken over.
    in_flight: HashMap<WaypointKey, u64>,
}

impl RouteCache {
    fn store(&mut self, key: WaypointKey, points: Vec<LatLng>) {
        if self.resolved.insert(key.clone(), points).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > ROUTE_CACHE_LIMIT {
            if let Some(oldest) = self.order.pop_front() {
                self.resolved.remove(&oldest);
            }
        }
    }
}

/// Resolves prediction overlays one at a time. Starting a new overlay aborts
/// the previous task; events carry the generation they belong to.
pub struct RouteResolver {
    service: Arc<dyn RouteService>,
    cache: Arc<Mutex<RouteCache>>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl RouteResolver {
    pub fn new(service: Arc<dyn RouteService>) -> Self {
        Self {
            service,
            cache: Arc::new(Mutex::new(RouteCache::default())),
            generation: 0,
            task: None,
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolves `routes` (id, waypoints) in order, sending one event per
    /// route. Returns the generation the events will carry.
    pub fn resolve(
        &mut self,
        routes: Vec<(String, Vec<LatLng>)>,
        events: UnboundedSender<RouteEvent>,
    ) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let cache = Arc::clone(&self.cache);

        self.task = Some(tokio::spawn(async move {
            for (route_id, waypoints) in routes {
                let (points, routed) =
                    resolve_one(service.as_ref(), &cache, &waypoints, generation).await;
                let event = RouteEvent {
                    generation,
                    route_id,
                    points,
                    routed,
                };
                if events.send(event).is_err() {
                    return;
                }
            }
        }));

        generation
    }

    /// Aborts the running task, if any. Later events from it are stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RouteResolver {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn resolve_one(
    service: &dyn RouteService,
    cache: &Mutex<RouteCache>,
    waypoints: &[LatLng],
    generation: u64,
) -> (Vec<LatLng>, bool) {
    let key = WaypointKey::new(waypoints);
    {
        let mut guard = cache.lock().await;
        if let Some(points) = guard.resolved.get(&key) {
            debug!("route cache hit ({} waypoints)", waypoints.len());
            return (points.clone(), true);
        }
        if guard.in_flight.get(&key) == Some(&generation) {
            debug!("route already in flight, drawing straight for now");
            return (waypoints.to_vec(), false);
        }
        guard.in_flight.insert(key.clone(), generation);
    }

    let outcome = service.route(waypoints).await;

    let mut guard = cache.lock().await;
    if guard.in_flight.get(&key) == Some(&generation) {
        guard.in_flight.remove(&key);
    }
    match outcome {
        Ok(points) if !points.is_empty() => {
            guard.store(key, points.clone());
            (points, true)
        }
        Ok(_) => {
            warn!("routing returned an empty geometry, using straight line");
            (waypoints.to_vec(), false)
        }
        Err(RoutingError::Disabled) => (waypoints.to_vec(), false),
        Err(e) => {
            warn!("routing failed, using straight line: {e}");
            (waypoints.to_vec(), false)
        }
    }
}
