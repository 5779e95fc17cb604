//! Turns an analysis payload into the localized view model the widgets draw.
//!
//! Everything here is a pure function of `(payload, language, image size)`.
//! The payload is never modified; switching language rebuilds the view.

use chrono::{DateTime, Duration as TimeDelta, NaiveDateTime};
use serde::Serialize;

use crate::domain::*;
use crate::fixture::POLICE_STATIONS;
use crate::i18n::{localize, resolve, Language};
use crate::map::{
    ant_path, Focus, MapModel, Marker, MarkerKind, OverlayRoute, PredictionOverlay,
    ProbabilityBand,
};

const INCIDENT_ZOOM: u8 = 16;
const CAMERA_ZOOM: u8 = 15;

/// `round(c × 100)`, clamped to `0..=100`.
pub fn percent(confidence: f64) -> u32 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub language: Language,
    pub kpis: Kpis,
    pub suspect: Option<SuspectView>,
    pub gps: Option<GpsView>,
    pub cameras: Vec<CameraView>,
    pub search_radius: String,
    pub threat: ThreatView,
    pub timeline: Vec<TimelineEvent>,
    pub report: Option<ReportView>,
    pub ocr_markers: Vec<String>,
    pub image: ImageFrame,
    pub incident_map: Option<MapModel>,
    pub camera_map: Option<MapModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub priority: String,
    pub matches: usize,
    pub gps_accuracy: u32,
    pub face_confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectView {
    pub identity: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub id_number: String,
    pub phone_number: String,
    pub is_wanted: bool,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsView {
    pub position: LatLng,
    pub accuracy: u32,
    pub confidence: f64,
}

impl GpsView {
    pub fn coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.position.lat, self.position.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub rank: u32,
    pub name: String,
    pub distance: String,
    pub position: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionView {
    pub label: String,
    pub confidence: u32,
    pub bbox: CornerBox,
    pub threat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreatView {
    pub level: String,
    pub level_code: String,
    pub threats: Vec<DetectionView>,
    pub normal: Vec<DetectionView>,
}

impl ThreatView {
    pub fn total(&self) -> usize {
        self.threats.len() + self.normal.len()
    }

    pub fn threat_count(&self) -> usize {
        self.threats.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normal.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Detection,
    Location,
    Cctv,
    Threat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub kind: TimelineKind,
    pub label: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub incident_id: String,
    pub priority: String,
    pub domain: String,
    pub kind: String,
    pub summary: String,
    pub narrative: String,
    pub evidence: Vec<String>,
    pub unit: String,
    pub nearest_cctv: Option<String>,
    pub notes: Option<String>,
}

/// Source image and the boxes drawn over it, in image pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageFrame {
    pub size: Option<(f64, f64)>,
    pub faces: Vec<CornerBox>,
    pub objects: Vec<DetectionView>,
}

impl DashboardView {
    /// `image_size` is the decoded upload size, when known.
    pub fn build(
        payload: &AnalysisPayload,
        language: Language,
        image_size: Option<(u32, u32)>,
    ) -> Self {
        match payload {
            AnalysisPayload::Full(result) => from_result(result, language, image_size),
            AnalysisPayload::Location(location) => from_location(location, language, image_size),
        }
    }
}

fn from_result(
    result: &AnalysisResult,
    language: Language,
    image_size: Option<(u32, u32)>,
) -> DashboardView {
    let modules = &result.modules;
    let primary = modules.biometrics.matches.first();
    let gps = modules
        .gps
        .as_ref()
        .filter(|fix| fix.lat.abs() > f64::EPSILON || fix.lng.abs() > f64::EPSILON)
        .map(|fix| GpsView {
            position: fix.position(),
            accuracy: percent(fix.confidence),
            confidence: fix.confidence,
        });

    let cameras: Vec<CameraView> = modules
        .cctv_retrieval
        .cctv_nodes
        .iter()
        .map(|node| CameraView {
            rank: node.rank,
            name: localize(language, &node.business_name, node.business_name_en.as_ref()),
            distance: localize(language, &node.distance, node.distance_en.as_ref()),
            position: node.gps,
        })
        .collect();

    let report = modules.reasoning.as_ref().map(|r| report_view(r, language));
    let kpis = Kpis {
        priority: report
            .as_ref()
            .map(|report| report.priority.clone())
            .unwrap_or_default(),
        matches: modules.biometrics.matches.len(),
        gps_accuracy: gps.as_ref().map_or(0, |gps| gps.accuracy),
        face_confidence: primary.map_or(0, |m| percent(m.confidence)),
    };

    let threat = threat_view(&modules.object_detection, language);
    let timeline = timeline(result, gps.as_ref(), language);

    // Boxes are in source pixels; `imgsz` is only the detector's input size.
    let image = ImageFrame {
        size: image_size.map(|(w, h)| (f64::from(w), f64::from(h))),
        faces: modules
            .biometrics
            .matches
            .iter()
            .map(|m| CornerBox::from(m.bbox))
            .collect(),
        objects: threat.threats.iter().chain(&threat.normal).cloned().collect(),
    };

    let ocr_markers = modules
        .ocr_environment
        .as_ref()
        .map(|ocr| ocr.environment_data.location_markers.clone())
        .unwrap_or_default();

    let incident_map = gps.as_ref().map(|gps| incident_map(gps, language));
    let camera_map = gps
        .as_ref()
        .map(|gps| camera_map(gps, &cameras, modules.prediction.as_ref(), language));

    DashboardView {
        language,
        kpis,
        suspect: primary.map(|m| suspect_view(m, language)),
        gps,
        cameras,
        search_radius: modules.cctv_retrieval.meta.search_radius.clone(),
        threat,
        timeline,
        report,
        ocr_markers,
        image,
        incident_map,
        camera_map,
    }
}

fn from_location(
    location: &RecognizeResult,
    language: Language,
    image_size: Option<(u32, u32)>,
) -> DashboardView {
    let gps = GpsView {
        position: location.location,
        accuracy: percent(location.confidence),
        confidence: location.confidence,
    };
    DashboardView {
        language,
        kpis: Kpis {
            gps_accuracy: gps.accuracy,
            ..Kpis::default()
        },
        suspect: None,
        cameras: Vec::new(),
        search_radius: String::new(),
        threat: ThreatView::default(),
        timeline: Vec::new(),
        report: None,
        ocr_markers: Vec::new(),
        image: ImageFrame {
            size: image_size.map(|(w, h)| (f64::from(w), f64::from(h))),
            ..ImageFrame::default()
        },
        incident_map: Some(incident_map(&gps, language)),
        camera_map: Some(camera_map(&gps, &[], None, language)),
        gps: Some(gps),
    }
}

fn suspect_view(m: &FaceMatch, language: Language) -> SuspectView {
    let info = &m.info;
    SuspectView {
        identity: m.identity.clone(),
        name: localize(language, &info.name, info.name_en.as_ref()),
        description: localize(language, &info.description, info.description_en.as_ref()),
        location: localize(language, &info.location, info.location_en.as_ref()),
        id_number: localize(language, &info.id_number, info.id_number_en.as_ref()),
        phone_number: localize(language, &info.phone_number, info.phone_number_en.as_ref()),
        is_wanted: info.is_wanted,
        confidence: percent(m.confidence),
    }
}

fn threat_level_label(summary: &ObjectSummary, language: Language) -> String {
    let code = summary.threat_level.trim();
    let table = ThreatLevel::parse(code).map(|level| level.label(language));
    match language {
        Language::Ar => resolve(
            language,
            summary.threat_level_label.as_deref().or(table),
            Some(code),
        ),
        Language::En => resolve(language, None, table.or(Some(code))),
    }
}

fn threat_view(detection: &ObjectDetection, language: Language) -> ThreatView {
    let (threats, normal) = detection
        .detections
        .iter()
        .map(|d| DetectionView {
            label: localize(language, &d.label, d.label_en.as_ref()),
            confidence: percent(d.confidence),
            bbox: d.bbox,
            threat: d.threat_tag,
        })
        .partition(|d| d.threat);

    ThreatView {
        level: threat_level_label(&detection.summary, language),
        level_code: detection.summary.threat_level.to_uppercase(),
        threats,
        normal,
    }
}

fn report_view(reasoning: &Reasoning, language: Language) -> ReportView {
    let classification = &reasoning.classification;
    let labels = classification.labels.as_ref();
    let report_en = reasoning.report_en.as_ref();
    let plan = &reasoning.action_plan;
    let plan_en = reasoning.action_plan_en.as_ref();

    let evidence = match (language, report_en) {
        (Language::En, Some(en)) if !en.visual_evidence.is_empty() => en.visual_evidence.clone(),
        _ => reasoning.report.visual_evidence.clone(),
    };
    let optional = |ar: Option<&String>, en: Option<&String>| {
        let text = resolve(language, ar.map(String::as_str), en.map(String::as_str));
        (!text.is_empty()).then_some(text)
    };

    ReportView {
        incident_id: reasoning.incident_id.clone(),
        priority: resolve(
            language,
            labels.and_then(|l| l.priority_ar.as_deref()),
            Some(classification.priority.as_str()),
        ),
        domain: resolve(
            language,
            labels.and_then(|l| l.domain_ar.as_deref()),
            Some(classification.domain.as_str()),
        ),
        kind: resolve(
            language,
            labels.and_then(|l| l.type_ar.as_deref()),
            Some(classification.kind.as_str()),
        ),
        summary: resolve(
            language,
            Some(reasoning.report.summary.as_str()),
            report_en.map(|r| r.summary.as_str()),
        ),
        narrative: resolve(
            language,
            Some(reasoning.report.detailed_narrative.as_str()),
            report_en.map(|r| r.detailed_narrative.as_str()),
        ),
        evidence,
        unit: resolve(
            language,
            Some(plan.recommended_unit.as_str()),
            plan_en.map(|p| p.recommended_unit.as_str()),
        ),
        nearest_cctv: optional(
            plan.nearest_cctv.as_ref(),
            plan_en.and_then(|p| p.nearest_cctv.as_ref()),
        ),
        notes: optional(plan.notes.as_ref(), plan_en.and_then(|p| p.notes.as_ref())),
    }
}

/// Result timestamp as wall-clock time. RFC 3339 stamps are read in UTC;
/// naive ISO stamps (no offset) are shown as stamped.
fn timeline_base(timestamp: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|stamp| stamp.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Clock times shown on the timeline; events are one second apart.
fn event_time(base: Option<NaiveDateTime>, offset_secs: i64) -> String {
    base.map_or_else(
        || "--:--:--".to_string(),
        |base| (base + TimeDelta::seconds(offset_secs)).format("%H:%M:%S").to_string(),
    )
}

fn timeline(
    result: &AnalysisResult,
    gps: Option<&GpsView>,
    language: Language,
) -> Vec<TimelineEvent> {
    let t = |ar: &str, en: &str| language.pick(ar, en).to_string();
    let base = timeline_base(&result.timestamp);
    let modules = &result.modules;
    let mut events = Vec::new();

    if let Some(m) = modules.biometrics.matches.first() {
        let name = localize(language, &m.info.name, m.info.name_en.as_ref());
        let confidence = percent(m.confidence);
        events.push(TimelineEvent {
            kind: TimelineKind::Detection,
            label: t("رصد", "DETECTION"),
            time: event_time(base, 0),
            title: t("تحديد الهوية البيومترية", "Biometric Identification"),
            description: match language {
                Language::Ar => format!("تم التعرف على المشتبه به {name} بنسبة ثقة {confidence}%"),
                Language::En => {
                    format!("Suspect identified as {name} with {confidence}% confidence")
                }
            },
            location: None,
        });
    }

    if let Some(gps) = gps {
        let accuracy = gps.accuracy;
        events.push(TimelineEvent {
            kind: TimelineKind::Location,
            label: t("موقع", "LOCATION"),
            time: event_time(base, 1),
            title: t("تثليث موقع GPS", "GPS Triangulation"),
            description: match language {
                Language::Ar => format!("تم تحديد الموقع بدقة {accuracy}%"),
                Language::En => format!("Location pinpointed with {accuracy}% accuracy"),
            },
            location: Some(format!("{:.4}, {:.4}", gps.position.lat, gps.position.lng)),
        });
    }

    let nodes = &modules.cctv_retrieval.cctv_nodes;
    if !nodes.is_empty() {
        let count = nodes.len();
        let radius = &modules.cctv_retrieval.meta.search_radius;
        events.push(TimelineEvent {
            kind: TimelineKind::Cctv,
            label: t("كاميرا", "CCTV"),
            time: event_time(base, 2),
            title: t("شبكة المراقبة مفعّلة", "Surveillance Network Active"),
            description: match language {
                Language::Ar => format!("{count} كاميرا ضمن نطاق {radius}"),
                Language::En => format!("{count} cameras within {radius} radius identified"),
            },
            location: None,
        });
    }

    let threats: Vec<String> = modules
        .object_detection
        .detections
        .iter()
        .filter(|d| d.threat_tag)
        .map(|d| localize(language, &d.label, d.label_en.as_ref()))
        .collect();
    if !threats.is_empty() {
        let list = threats.join(", ");
        events.push(TimelineEvent {
            kind: TimelineKind::Threat,
            label: t("تهديد", "THREAT"),
            time: event_time(base, 3),
            title: t("كشف التهديد", "Threat Detected"),
            description: match language {
                Language::Ar => format!("عناصر مشبوهة: {list}"),
                Language::En => format!("Suspicious objects identified: {list}"),
            },
            location: None,
        });
    }

    events
}

fn incident_map(gps: &GpsView, language: Language) -> MapModel {
    MapModel {
        focus: Focus::Center {
            center: gps.position,
            zoom: INCIDENT_ZOOM,
        },
        markers: vec![Marker {
            id: "incident".to_string(),
            kind: MarkerKind::Incident,
            position: gps.position,
            title: language.pick("الهدف المرصود", "Target Detected").to_string(),
            description: format!(
                "{}: {:.1}%",
                language.pick("دقة الموقع", "Location Confidence"),
                gps.confidence * 100.0
            ),
        }],
        ant_path: Vec::new(),
        overlay: PredictionOverlay::default(),
    }
}

fn camera_map(
    gps: &GpsView,
    cameras: &[CameraView],
    prediction: Option<&PredictionData>,
    language: Language,
) -> MapModel {
    let mut markers = vec![Marker {
        id: "incident".to_string(),
        kind: MarkerKind::Incident,
        position: gps.position,
        title: language.pick("موقع الحادث", "Incident Location").to_string(),
        description: format!(
            "{}: {:.2}",
            language.pick("نسبة الثقة", "Confidence"),
            gps.confidence
        ),
    }];
    markers.extend(cameras.iter().map(|camera| Marker {
        id: format!("camera:{}", camera.rank),
        kind: MarkerKind::Camera,
        position: camera.position,
        title: camera.name.clone(),
        description: format!("{}: {}", language.pick("المسافة", "Distance"), camera.distance),
    }));

    let overlay = prediction.map_or_else(PredictionOverlay::default, |p| prediction_overlay(p, language));
    let focus = overlay.bounds().map_or(
        Focus::Center {
            center: gps.position,
            zoom: CAMERA_ZOOM,
        },
        Focus::Fit,
    );

    MapModel {
        focus,
        markers,
        ant_path: ant_path(gps.position, cameras.iter().map(|camera| camera.position)),
        overlay,
    }
}

fn prediction_overlay(prediction: &PredictionData, language: Language) -> PredictionOverlay {
    let routes: Vec<OverlayRoute> = prediction
        .routes
        .iter()
        .map(|route| {
            let kind = localize(language, &route.kind, route.kind_en.as_ref());
            let destination = localize(language, &route.destination, route.destination_en.as_ref());
            let intercepts = route
                .intercept_points
                .iter()
                .enumerate()
                .map(|(i, point)| Marker {
                    id: format!("intercept:{}:{i}", route.route_id),
                    kind: MarkerKind::Intercept,
                    position: LatLng::new(point.lat, point.lng),
                    title: localize(language, &point.kind, point.kind_en.as_ref()),
                    description: destination.clone(),
                })
                .collect();
            OverlayRoute {
                id: route.route_id.clone(),
                reasoning: localize(language, &route.reasoning, route.reasoning_en.as_ref()),
                probability: percent(route.probability),
                band: ProbabilityBand::from_probability(route.probability),
                waypoints: route.waypoints(),
                kind,
                destination,
                intercepts,
            }
        })
        .collect();

    if routes.is_empty() {
        return PredictionOverlay::default();
    }

    let stations = POLICE_STATIONS
        .iter()
        .enumerate()
        .map(|(i, station)| Marker {
            id: format!("station:{i}"),
            kind: MarkerKind::PoliceStation,
            position: station.position,
            title: language.pick(station.name, station.name_en).to_string(),
            description: format!(
                "{}: {}",
                language.pick("الوحدات المتاحة", "Available Units"),
                station.units
            ),
        })
        .collect();

    PredictionOverlay { routes, stations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use chrono::{TimeZone, Utc};

    fn sample() -> AnalysisPayload {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 13, 15, 0).single();
        let now = now.unwrap_or_else(Utc::now);
        AnalysisPayload::Full(Box::new(fixture::analysis_result("scene.jpg", now)))
    }

    fn detection(label: &str, threat: bool) -> Detection {
        Detection {
            label: label.to_string(),
            label_en: None,
            confidence: 0.5,
            bbox: CornerBox::default(),
            threat_tag: threat,
        }
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent(0.94), 94);
        assert_eq!(percent(0.005), 1);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(-0.2), 0);
    }

    #[test]
    fn kpis_come_from_the_primary_match() {
        let view = DashboardView::build(&sample(), Language::En, None);
        assert_eq!(
            view.kpis,
            Kpis {
                priority: "CRITICAL".to_string(),
                matches: 1,
                gps_accuracy: 98,
                face_confidence: 94,
            }
        );
        let arabic = DashboardView::build(&sample(), Language::Ar, None);
        assert_eq!(arabic.kpis.priority, "حرج جداً");
    }

    #[test]
    fn suspect_fields_follow_the_language() {
        let en = DashboardView::build(&sample(), Language::En, None);
        let ar = DashboardView::build(&sample(), Language::Ar, None);
        let (Some(en), Some(ar)) = (en.suspect, ar.suspect) else {
            panic!("sample has a match");
        };
        assert_eq!(en.name, "Khalid Abdulaziz");
        assert_eq!(ar.name, "خالد عبد العزيز");
        // No English id number: falls back to the Arabic field.
        assert_eq!(en.id_number, "1010101010");
        assert!(en.is_wanted);
    }

    #[test]
    fn counts_match_the_arrays() {
        let payload = sample();
        let view = DashboardView::build(&payload, Language::En, None);
        let AnalysisPayload::Full(result) = &payload else {
            panic!("sample is a full result");
        };
        assert_eq!(view.cameras.len(), result.modules.cctv_retrieval.cctv_nodes.len());
        assert_eq!(view.threat.total(), result.modules.object_detection.detections.len());
        assert_eq!(view.kpis.matches, result.modules.biometrics.matches.len());
        assert_eq!(view.cameras[0].name, "Kingdom Tower Cam");
        assert_eq!(view.cameras[0].distance, "200m");
    }

    #[test]
    fn threats_partition_the_detections() {
        let mut result = AnalysisResult::default();
        result.modules.object_detection.summary.threat_level = "medium".to_string();
        result.modules.object_detection.detections = vec![
            detection("bag", true),
            detection("car", false),
            detection("knife", true),
            detection("tree", false),
            detection("bench", false),
        ];
        let payload = AnalysisPayload::Full(Box::new(result));
        let view = DashboardView::build(&payload, Language::Ar, None);

        assert_eq!(view.threat.threat_count(), 2);
        assert_eq!(view.threat.normal_count(), 3);
        assert_eq!(view.threat.total(), 5);
        assert!(view.threat.threats.iter().all(|d| d.threat));
        assert!(view.threat.normal.iter().all(|d| !d.threat));
        assert_eq!(view.threat.level, "متوسط");
        assert_eq!(view.threat.level_code, "MEDIUM");
    }

    #[test]
    fn unknown_threat_level_is_shown_verbatim() {
        let mut result = AnalysisResult::default();
        result.modules.object_detection.summary.threat_level = "ELEVATED".to_string();
        let view = DashboardView::build(&AnalysisPayload::Full(Box::new(result)), Language::Ar, None);
        assert_eq!(view.threat.level, "ELEVATED");
    }

    #[test]
    fn timeline_events_are_a_second_apart() {
        let view = DashboardView::build(&sample(), Language::En, None);
        let times: Vec<&str> = view.timeline.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, ["13:15:00", "13:15:01", "13:15:02", "13:15:03"]);
        assert_eq!(view.timeline[2].description, "4 cameras within 5km radius identified");
        assert_eq!(
            view.timeline[3].description,
            "Suspicious objects identified: Suspicious Bag"
        );
    }

    #[test]
    fn timeline_tolerates_a_bad_timestamp() {
        let mut result = AnalysisResult::default();
        result.timestamp = "yesterday".to_string();
        result.modules.gps = Some(GpsFix {
            lat: 1.0,
            lng: 2.0,
            confidence: 0.5,
            ..GpsFix::default()
        });
        let view = DashboardView::build(&AnalysisPayload::Full(Box::new(result)), Language::En, None);
        assert_eq!(view.timeline.len(), 1);
        assert_eq!(view.timeline[0].time, "--:--:--");
    }

    #[test]
    fn naive_backend_timestamps_drive_the_timeline() {
        let json = r#"{
            "timestamp": "2025-12-01T13:15:00.123456",
            "modules": {"GPS": {"lat": 24.7, "lng": 46.6, "confidence": 0.9}}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("decode");
        let view = DashboardView::build(&AnalysisPayload::Full(Box::new(result)), Language::En, None);
        // The location event sits one second after the result stamp.
        assert_eq!(view.timeline[0].time, "13:15:01");

        assert_eq!(
            timeline_base("2025-12-01T13:15:00+03:00").map(|t| t.format("%H:%M:%S").to_string()),
            Some("10:15:00".to_string())
        );
    }

    #[test]
    fn failed_gps_module_adds_no_location_event() {
        let json = r#"{
            "timestamp": "2025-12-01T13:15:00",
            "modules": {"GPS": {"error": "No location found"}}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("decode");
        let view = DashboardView::build(&AnalysisPayload::Full(Box::new(result)), Language::En, None);
        assert!(view.gps.is_none());
        assert!(view
            .timeline
            .iter()
            .all(|event| event.kind != TimelineKind::Location));
    }

    #[test]
    fn unknown_upload_size_leaves_the_frame_unsized() {
        let view = DashboardView::build(&sample(), Language::En, None);
        assert_eq!(view.image.size, None);
        assert!(!view.image.objects.is_empty());

        let sized = DashboardView::build(&sample(), Language::En, Some((1920, 1080)));
        assert_eq!(sized.image.size, Some((1920.0, 1080.0)));
    }

    #[test]
    fn camera_map_has_ant_path_and_overlay() {
        let view = DashboardView::build(&sample(), Language::En, None);
        let Some(map) = view.camera_map else {
            panic!("sample has a GPS fix");
        };
        assert_eq!(map.ant_path.len(), view.cameras.len() + 1);
        assert_eq!(map.markers.len(), view.cameras.len() + 1);
        assert_eq!(map.overlay.routes.len(), 3);
        assert_eq!(map.overlay.routes[0].band, ProbabilityBand::High);
        assert_eq!(map.overlay.stations.len(), 2);
        assert!(matches!(map.focus, Focus::Fit(_)));
    }

    #[test]
    fn report_localizes_plan_and_keeps_ocr_markers() {
        let view = DashboardView::build(&sample(), Language::En, None);
        let Some(report) = view.report else {
            panic!("sample has reasoning");
        };
        assert_eq!(report.unit, "Security Patrols - Unit 4");
        assert_eq!(report.notes.as_deref(), Some("Approach with caution"));
        assert_eq!(report.kind, "WANTED_PERSON");
        assert_eq!(view.ocr_markers, ["شارع الملك فهد"]);
    }

    #[test]
    fn missing_modules_render_empty() {
        let view =
            DashboardView::build(&AnalysisPayload::Full(Box::default()), Language::Ar, None);
        assert!(view.suspect.is_none());
        assert!(view.gps.is_none());
        assert!(view.camera_map.is_none());
        assert!(view.timeline.is_empty());
        assert_eq!(view.kpis, Kpis::default());
    }

    #[test]
    fn location_payload_only_fills_gps() {
        let payload = AnalysisPayload::Location(RecognizeResult {
            location: LatLng::new(24.7, 46.6),
            confidence: 0.81,
            matched_image: "ref.jpg".to_string(),
        });
        let view = DashboardView::build(&payload, Language::En, Some((640, 480)));
        assert_eq!(view.kpis.gps_accuracy, 81);
        assert!(view.suspect.is_none());
        assert_eq!(view.image.size, Some((640.0, 480.0)));
        assert_eq!(
            view.gps.map(|gps| gps.coordinates()),
            Some("24.700000, 46.600000".to_string())
        );
    }
}
