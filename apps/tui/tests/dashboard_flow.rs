use async_trait::async_trait;
use forensic_dash::adapter::DashboardView;
use forensic_dash::domain::{AnalysisPayload, LatLng};
use forensic_dash::error::{AnalysisError, RoutingError};
use forensic_dash::fixture::ANALYSIS_STEPS;
use forensic_dash::flow::{FlowEvent, Phase, View, ViewState};
use forensic_dash::i18n::Language;
use forensic_dash::map::{Layer, MapScene};
use forensic_dash::pipeline::{self, AnalysisPlan, FetchMode, JobEvent};
use forensic_dash::routing::{RouteResolver, RouteService};
use forensic_dash::source::{AnalysisSource, FixtureSource, Upload};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

struct FailingSource;

#[async_trait]
impl AnalysisSource for FailingSource {
    async fn analyze(&self, _upload: &Upload) -> Result<AnalysisPayload, AnalysisError> {
        Err(AnalysisError::status(500, ""))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Routes every request through a fixed midpoint so routed paths differ
/// from their waypoints.
struct Detour;

#[async_trait]
impl RouteService for Detour {
    async fn route(&self, waypoints: &[LatLng]) -> Result<Vec<LatLng>, RoutingError> {
        let mut points = waypoints.to_vec();
        points.insert(1, LatLng::new(0.5, 0.5));
        Ok(points)
    }
}

async fn upload() -> Upload {
    let mut file = tempfile::Builder::new()
        .suffix(".jpg")
        .tempfile()
        .expect("temp file");
    file.write_all(b"not really a jpeg").expect("write");
    Upload::read(file.path()).await.expect("read upload")
}

fn plan(mode: FetchMode) -> AnalysisPlan {
    AnalysisPlan {
        steps: ANALYSIS_STEPS.len(),
        step_delay: Duration::from_millis(5),
        mode,
    }
}

/// Feeds every job event into a view state, returning the views visited.
async fn drive(source: Arc<dyn AnalysisSource>, mode: FetchMode) -> (Vec<View>, Option<AnalysisPayload>) {
    let mut state = ViewState::new(View::Dashboard(Phase::Upload));
    let mut visited = Vec::new();
    let mut payload = None;

    let upload = upload().await;
    visited.push(
        state
            .apply(&FlowEvent::FileSelected(upload.path.clone()))
            .expect("file selected"),
    );

    let (tx, mut rx) = pipeline::channel();
    let _job = pipeline::spawn_analysis(1, source, upload, plan(mode), tx);

    while let Some(event) = rx.recv().await {
        let next = match event {
            JobEvent::Step { index, .. } => state.apply(&FlowEvent::StepAdvanced(index)),
            JobEvent::Finished { result: Ok(result), .. } => {
                payload = Some(result);
                state.apply(&FlowEvent::AnalysisSucceeded)
            }
            JobEvent::Finished { result: Err(e), .. } => {
                state.apply(&FlowEvent::AnalysisFailed(e.to_string()))
            }
        };
        visited.push(next.expect("valid transition"));
        if !state.is_analyzing() {
            break;
        }
    }

    (visited, payload)
}

#[tokio::test]
async fn fixture_upload_passes_through_analyzing_to_result() {
    for mode in [FetchMode::Sequential, FetchMode::Concurrent] {
        let (visited, payload) = drive(Arc::new(FixtureSource), mode).await;

        assert_eq!(visited.first(), Some(&View::Dashboard(Phase::Analyzing { step: 0 })));
        assert_eq!(visited.last(), Some(&View::Dashboard(Phase::Result)));
        let results = visited
            .iter()
            .filter(|view| **view == View::Dashboard(Phase::Result))
            .count();
        assert_eq!(results, 1);
        assert!(payload.is_some());
    }
}

#[tokio::test]
async fn failed_analysis_returns_to_upload() {
    let (visited, payload) = drive(Arc::new(FailingSource), FetchMode::Sequential).await;

    assert!(payload.is_none());
    assert!(visited.contains(&View::Dashboard(Phase::Analyzing { step: 0 })));
    assert_eq!(visited.last(), Some(&View::Dashboard(Phase::Upload)));
}

#[tokio::test]
async fn fixture_view_is_consistent_in_both_languages() {
    let (_, payload) = drive(Arc::new(FixtureSource), FetchMode::Concurrent).await;
    let payload = payload.expect("payload");

    for language in [Language::Ar, Language::En] {
        let view = DashboardView::build(&payload, language, Some((1920, 1080)));
        assert_eq!(view.language, language);
        assert_eq!(view.threat.threat_count() + view.threat.normal_count(), view.threat.total());
        assert!(view.suspect.is_some());
        assert!(view.gps.is_some());
        assert!(!view.timeline.is_empty());

        let map = view.camera_map.as_ref().expect("camera map");
        assert_eq!(map.ant_path.len(), view.cameras.len() + 1);
        let probabilities: Vec<u32> = map.overlay.routes.iter().map(|r| r.probability).collect();
        let mut sorted = probabilities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(probabilities, sorted);
    }
}

#[tokio::test]
async fn routed_geometry_lands_in_the_map_scene() {
    let (_, payload) = drive(Arc::new(FixtureSource), FetchMode::Sequential).await;
    let view = DashboardView::build(&payload.expect("payload"), Language::En, None);
    let model = view.camera_map.expect("camera map");

    let mut scene = MapScene::default();
    let mut resolved: HashMap<String, Vec<LatLng>> = HashMap::new();
    let before = scene.apply(model.layers(&resolved));
    assert!(!before.is_empty());
    assert!(scene
        .layers()
        .iter()
        .all(|layer| !layer.id().starts_with("route:")));

    let routes: Vec<(String, Vec<LatLng>)> = model
        .overlay
        .routes
        .iter()
        .map(|route| (route.id.clone(), route.waypoints.clone()))
        .collect();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut resolver = RouteResolver::new(Arc::new(Detour));
    let generation = resolver.resolve(routes.clone(), tx);

    for _ in 0..routes.len() {
        let event = rx.recv().await.expect("route event");
        assert_eq!(event.generation, generation);
        assert!(event.routed);
        resolved.insert(event.route_id, event.points);
    }

    let diff = scene.apply(model.layers(&resolved));
    assert!(diff.removed.is_empty());
    assert!(diff.added.iter().any(|id| id.starts_with("route:")));

    let routed_paths = scene
        .layers()
        .iter()
        .filter(|layer| matches!(layer, Layer::Path(path) if path.id.starts_with("route:")))
        .count();
    assert_eq!(routed_paths, routes.len());

    assert!(scene.apply(model.layers(&resolved)).is_empty());
}

#[test]
fn malformed_reasoning_still_renders_the_other_panels() {
    let json = r#"{
        "timestamp": "2025-12-01T13:15:00.123456",
        "modules": {
            "biometrics": {"matches": [{"identity": "s-1", "confidence": 0.9, "info": {"name": "X"}}]},
            "GPS": {"lat": 24.7, "lng": 46.6, "confidence": 0.9},
            "reasoning": {"action_plan": {"recommended_unit": "X", "nearest_cctv": 3}}
        }
    }"#;
    let result: forensic_dash::domain::AnalysisResult =
        serde_json::from_str(json).expect("decode");
    let view = DashboardView::build(&AnalysisPayload::Full(Box::new(result)), Language::En, None);

    assert!(view.report.is_none());
    assert!(view.suspect.is_some());
    assert!(view.gps.is_some());
    assert_eq!(view.timeline[0].time, "13:15:00");
}
