//! Wire types for the analysis backend contract.
//!
//! Every module is optional on the wire: a backend run where one analyzer
//! failed still decodes, with the failed module left at its default.

use crate::i18n::Language;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a point from the `[lat, lng]` pairs used by prediction paths.
    pub const fn from_pair(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lng: pair[1],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub pipeline_id: String,
    pub timestamp: String,
    pub target_image: String,
    pub language: Option<Language>,
    pub image_url: String,
    pub report_id: String,
    pub processed_at: String,
    pub modules: Modules,
}

/// Each module decodes on its own: a malformed one is logged and left at
/// its default instead of rejecting the whole result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modules {
    #[serde(deserialize_with = "lenient")]
    pub biometrics: Biometrics,
    #[serde(rename = "GPS", deserialize_with = "lenient")]
    pub gps: Option<GpsFix>,
    #[serde(deserialize_with = "lenient")]
    pub object_detection: ObjectDetection,
    #[serde(deserialize_with = "lenient")]
    pub ocr_environment: Option<OcrEnvironment>,
    #[serde(deserialize_with = "lenient")]
    pub cctv_retrieval: CctvRetrieval,
    #[serde(deserialize_with = "lenient")]
    pub reasoning: Option<Reasoning>,
    #[serde(deserialize_with = "lenient")]
    pub prediction: Option<PredictionData>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(
            "dropping malformed module {}: {e}",
            std::any::type_name::<T>()
        );
        T::default()
    }))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Biometrics {
    pub meta: BiometricsMeta,
    pub matches: Vec<FaceMatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BiometricsMeta {
    pub timestamp: String,
    pub faces_detected: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceMatch {
    pub face_id: u32,
    pub identity: String,
    pub info: SuspectInfo,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: FaceBox,
    pub face_crop_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspectInfo {
    pub name: String,
    pub name_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub location: String,
    pub location_en: Option<String>,
    pub is_wanted: bool,
    pub id_number: String,
    pub id_number_en: Option<String>,
    pub phone_number: String,
    pub phone_number_en: Option<String>,
}

/// Face box in source-image pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsFix {
    pub filename: String,
    pub lat: f64,
    pub lng: f64,
    pub confidence: f64,
}

impl GpsFix {
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDetection {
    pub meta: ObjectMeta,
    pub summary: ObjectSummary,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    pub timestamp: String,
    pub model: String,
    pub output_image: String,
    pub imgsz: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSummary {
    pub total_objects: u32,
    pub threat_level: String,
    pub threat_level_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Detection {
    pub label: String,
    pub label_en: Option<String>,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: CornerBox,
    pub threat_tag: bool,
}

/// Detection box in source-image pixels as two corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl From<FaceBox> for CornerBox {
    fn from(face: FaceBox) -> Self {
        Self {
            x1: face.x,
            y1: face.y,
            x2: face.x + face.w,
            y2: face.y + face.h,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrEnvironment {
    pub meta: OcrMeta,
    pub environment_data: EnvironmentData,
    pub raw_detections: Vec<OcrDetection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrMeta {
    pub timestamp: String,
    pub language_mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentData {
    pub location_markers: Vec<String>,
    pub sensitive_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrDetection {
    pub text: String,
    pub confidence: f64,
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CctvRetrieval {
    pub meta: CctvMeta,
    pub cctv_nodes: Vec<CctvNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CctvMeta {
    pub search_radius: String,
    pub target_coords: LatLng,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CctvNode {
    pub rank: u32,
    pub business_name: String,
    pub business_name_en: Option<String>,
    pub gps: LatLng,
    pub distance: String,
    pub distance_en: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reasoning {
    pub language: Option<Language>,
    pub incident_id: String,
    pub timestamp: String,
    pub classification: Classification,
    pub report: Report,
    pub report_en: Option<Report>,
    pub action_plan: ActionPlan,
    pub action_plan_en: Option<ActionPlan>,
}

/// Incident classification. The bare fields carry the English codes and the
/// optional `labels` carry their Arabic display forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    pub priority: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub labels: Option<ClassificationLabels>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationLabels {
    pub priority_ar: Option<String>,
    pub domain_ar: Option<String>,
    pub type_ar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub summary: String,
    pub detailed_narrative: String,
    pub visual_evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPlan {
    pub recommended_unit: String,
    pub nearest_cctv: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionData {
    pub prediction_id: String,
    pub suspect_id: String,
    pub timestamp: String,
    pub routes: Vec<PredictedRoute>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictedRoute {
    pub route_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "type_en")]
    pub kind_en: Option<String>,
    pub destination: String,
    pub destination_en: Option<String>,
    pub probability: f64,
    pub color: String,
    pub speed: String,
    pub speed_en: Option<String>,
    pub path: Vec<[f64; 2]>,
    pub intercept_points: Vec<InterceptPoint>,
    pub reasoning: String,
    pub reasoning_en: Option<String>,
}

impl PredictedRoute {
    pub fn waypoints(&self) -> Vec<LatLng> {
        self.path.iter().copied().map(LatLng::from_pair).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "type_en")]
    pub kind_en: Option<String>,
}

/// Response of the single-purpose `/recognize` location endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizeResult {
    pub location: LatLng,
    pub confidence: f64,
    #[serde(default)]
    pub matched_image: String,
}

/// Whatever a data source produced for one upload.
#[derive(Debug, Clone)]
pub enum AnalysisPayload {
    Full(Box<AnalysisResult>),
    Location(RecognizeResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl ThreatLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "CRITICAL" => Some(Self::Critical),
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match self {
            Self::Critical => language.pick("حرج", "CRITICAL"),
            Self::High => language.pick("مرتفع", "HIGH"),
            Self::Medium => language.pick("متوسط", "MEDIUM"),
            Self::Low => language.pick("منخفض", "LOW"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_payload_with_defaults() -> Result<(), serde_json::Error> {
        let json = r#"{
            "pipeline_id": "p-1",
            "modules": {
                "GPS": {"lat": 24.7, "lng": 46.6, "confidence": 0.9},
                "biometrics": {"status": "error", "message": "Module failed"}
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json)?;
        assert_eq!(result.pipeline_id, "p-1");
        assert!(result.modules.biometrics.matches.is_empty());
        assert!(result.modules.reasoning.is_none());
        let gps = result.modules.gps.as_ref().map(GpsFix::position);
        assert_eq!(gps, Some(LatLng::new(24.7, 46.6)));
        Ok(())
    }

    #[test]
    fn malformed_module_does_not_sink_the_result() -> Result<(), serde_json::Error> {
        let json = r#"{
            "modules": {
                "GPS": {"lat": 24.7, "lng": 46.6, "confidence": 0.9},
                "reasoning": {"action_plan": {"recommended_unit": "X", "nearest_cctv": 3}},
                "cctv_retrieval": {"cctv_nodes": [{"rank": 1, "business_name": "Cam"}]}
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json)?;
        assert!(result.modules.reasoning.is_none());
        assert!(result.modules.gps.is_some());
        assert_eq!(result.modules.cctv_retrieval.cctv_nodes.len(), 1);
        Ok(())
    }

    #[test]
    fn decodes_box_and_type_renames() -> Result<(), serde_json::Error> {
        let json = r#"{
            "label": "حقيبة", "label_en": "Bag", "confidence": 0.5,
            "box": {"x1": 1, "y1": 2, "x2": 3, "y2": 4}, "threat_tag": true
        }"#;
        let detection: Detection = serde_json::from_str(json)?;
        assert_eq!(detection.bbox.x2, 3.0);
        assert!(detection.threat_tag);

        let json = r#"{"lat": 1.0, "lng": 2.0, "type": "نقطة تفتيش", "type_en": "CHECKPOINT"}"#;
        let point: InterceptPoint = serde_json::from_str(json)?;
        assert_eq!(point.kind_en.as_deref(), Some("CHECKPOINT"));
        Ok(())
    }

    #[test]
    fn threat_level_parses_case_insensitively() {
        assert_eq!(ThreatLevel::parse("high"), Some(ThreatLevel::High));
        assert_eq!(ThreatLevel::parse("unknown"), None);
        assert_eq!(ThreatLevel::Critical.label(Language::Ar), "حرج");
    }

    #[test]
    fn face_box_converts_to_corners() {
        let corners = CornerBox::from(FaceBox {
            x: 10.0,
            y: 20.0,
            w: 30.0,
            h: 40.0,
        });
        assert_eq!(corners, CornerBox { x1: 10.0, y1: 20.0, x2: 40.0, y2: 60.0 });
    }
}
