//! Built-in sample data: a complete analysis result, its predicted routes and
//! the police stations shown with the prediction overlay.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::*;
use crate::i18n::Language;

/// Status labels played while an analysis runs, as `(ar, en)` pairs.
pub const ANALYSIS_STEPS: [(&str, &str); 3] = [
    ("استخراج البصمات البيومترية...", "Extracting Biometrics..."),
    ("تثليث إحداثيات GPS...", "Triangulating GPS..."),
    ("استعلام شبكة المراقبة الوطنية...", "Querying National CCTV Grid..."),
];

pub fn analysis_steps(language: Language) -> Vec<String> {
    ANALYSIS_STEPS
        .iter()
        .map(|(ar, en)| language.pick(ar, en).to_string())
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct PoliceStation {
    pub name: &'static str,
    pub name_en: &'static str,
    pub position: LatLng,
    pub units: u32,
}

pub const POLICE_STATIONS: [PoliceStation; 2] = [
    PoliceStation {
        name: "مركز شرطة العليا",
        name_en: "Olaya Police Station",
        position: LatLng::new(24.7150, 46.6770),
        units: 3,
    },
    PoliceStation {
        name: "مركز شرطة المروج",
        name_en: "Al-Muruj Police Station",
        position: LatLng::new(24.7100, 46.6720),
        units: 2,
    },
];

const INCIDENT: LatLng = LatLng::new(24.7136, 46.6753);
const HIDEOUT: LatLng = LatLng::new(24.8105, 46.5208);
const HOME: LatLng = LatLng::new(24.7333, 46.8000);
const PATH_NOISE: f64 = 0.002;

/// The sample result for an upload named `file_name`, stamped at `now`.
pub fn analysis_result(file_name: &str, now: DateTime<Utc>) -> AnalysisResult {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    AnalysisResult {
        pipeline_id: "pipe_12345".to_string(),
        timestamp: stamp.clone(),
        target_image: "mock_image.jpg".to_string(),
        language: Some(Language::Ar),
        image_url: file_name.to_string(),
        report_id: "rep_9876".to_string(),
        processed_at: stamp.clone(),
        modules: Modules {
            biometrics: biometrics(&stamp, file_name),
            gps: Some(GpsFix {
                filename: file_name.to_string(),
                lat: INCIDENT.lat,
                lng: INCIDENT.lng,
                confidence: 0.98,
            }),
            object_detection: object_detection(&stamp),
            ocr_environment: Some(OcrEnvironment {
                meta: OcrMeta {
                    timestamp: stamp.clone(),
                    language_mode: "ar".to_string(),
                },
                environment_data: EnvironmentData {
                    location_markers: vec!["شارع الملك فهد".to_string()],
                    sensitive_areas: Vec::new(),
                },
                raw_detections: Vec::new(),
            }),
            cctv_retrieval: cctv_retrieval(),
            reasoning: Some(reasoning(&stamp)),
            prediction: Some(predict_movement(INCIDENT, "suspect_123", 0x5EED)),
        },
    }
}

fn biometrics(stamp: &str, file_name: &str) -> Biometrics {
    Biometrics {
        meta: BiometricsMeta {
            timestamp: stamp.to_string(),
            faces_detected: 1,
        },
        matches: vec![FaceMatch {
            face_id: 1,
            identity: "known_suspect".to_string(),
            info: SuspectInfo {
                name: "خالد عبد العزيز".to_string(),
                name_en: Some("Khalid Abdulaziz".to_string()),
                description: "مشتبه به في قضايا أمنية متعددة، مطلوب للتحقيق.".to_string(),
                description_en: Some(
                    "Suspect in multiple security cases, wanted for investigation.".to_string(),
                ),
                location: "الرياض، حي الملز".to_string(),
                location_en: Some("Riyadh, Al-Malaz".to_string()),
                is_wanted: true,
                id_number: "1010101010".to_string(),
                id_number_en: None,
                phone_number: "0555555555".to_string(),
                phone_number_en: None,
            },
            confidence: 0.94,
            bbox: FaceBox {
                x: 100.0,
                y: 100.0,
                w: 200.0,
                h: 200.0,
            },
            face_crop_path: file_name.to_string(),
        }],
    }
}

fn object_detection(stamp: &str) -> ObjectDetection {
    ObjectDetection {
        meta: ObjectMeta {
            timestamp: stamp.to_string(),
            model: "yolo".to_string(),
            output_image: "out.jpg".to_string(),
            imgsz: 640,
        },
        summary: ObjectSummary {
            total_objects: 3,
            threat_level: "HIGH".to_string(),
            threat_level_label: None,
        },
        detections: vec![Detection {
            label: "حقيبة مشبوهة".to_string(),
            label_en: Some("Suspicious Bag".to_string()),
            confidence: 0.88,
            bbox: CornerBox {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
            },
            threat_tag: true,
        }],
    }
}

fn camera(rank: u32, name: &str, name_en: &str, lat: f64, lng: f64, distance: &str) -> CctvNode {
    CctvNode {
        rank,
        business_name: name.to_string(),
        business_name_en: Some(name_en.to_string()),
        gps: LatLng::new(lat, lng),
        distance: distance.to_string(),
        distance_en: None,
    }
}

fn cctv_retrieval() -> CctvRetrieval {
    CctvRetrieval {
        meta: CctvMeta {
            search_radius: "5km".to_string(),
            target_coords: INCIDENT,
        },
        cctv_nodes: vec![
            camera(1, "كاميرا برج المملكة", "Kingdom Tower Cam", 24.711, 46.674, "200m"),
            camera(2, "مراقبة شارع العليا", "Olaya St Surveillance", 24.715, 46.676, "450m"),
            camera(3, "مدخل الفيصلية", "Faisaliah Entrance", 24.690, 46.685, "1.2km"),
            camera(4, "كاميرا المرور - التخصصي", "Traffic Cam - Takhassusi", 24.700, 46.660, "1.5km"),
        ],
    }
}

fn reasoning(stamp: &str) -> Reasoning {
    Reasoning {
        language: Some(Language::Ar),
        incident_id: "INC-2024-001".to_string(),
        timestamp: stamp.to_string(),
        classification: Classification {
            priority: "CRITICAL".to_string(),
            domain: "SECURITY".to_string(),
            kind: "WANTED_PERSON".to_string(),
            labels: Some(ClassificationLabels {
                priority_ar: Some("حرج جداً".to_string()),
                domain_ar: Some("أمني".to_string()),
                type_ar: Some("شخص مطلوب".to_string()),
            }),
        },
        report: Report {
            summary: "تم رصد شخص مطلوب في محيط برج المملكة.".to_string(),
            detailed_narrative: "بناءً على تحليل الفيديو والمطابقة البيومترية، تم تحديد المدعو خالد عبد العزيز (مطلوب أمني) في تقاطع طريق الملك فهد مع شارع العليا. الموقع الجغرافي دقيق بنسبة 98%. يظهر المشتبه به وهو يحمل حقيبة، مما يستدعي رفع مستوى الحذر. توصي الأنظمة بتوجيه أقرب دورية للتحقق.".to_string(),
            visual_evidence: Vec::new(),
        },
        report_en: Some(Report {
            summary: "Wanted person detected near Kingdom Tower.".to_string(),
            detailed_narrative: "Based on video analysis and biometric matching, suspect Khalid Abdulaziz (Wanted) was identified at the King Fahd Rd / Olaya St intersection. GPS location is 98% accurate. Suspect appears to be carrying a bag, warranting increased caution. Systems recommend directing the nearest patrol for verification.".to_string(),
            visual_evidence: Vec::new(),
        }),
        action_plan: ActionPlan {
            recommended_unit: "الدوريات الأمنية - الفرقة 4".to_string(),
            nearest_cctv: Some("كاميرا برج المملكة (C-01)".to_string()),
            notes: Some("الاقتراب بحذر".to_string()),
        },
        action_plan_en: Some(ActionPlan {
            recommended_unit: "Security Patrols - Unit 4".to_string(),
            nearest_cctv: Some("Kingdom Tower Cam (C-01)".to_string()),
            notes: Some("Approach with caution".to_string()),
        }),
    }
}

/// `segments + 1` points from `start` to `end`; interior points are jittered
/// so the straight-line fallback does not look ruled.
pub fn interpolate_path(start: LatLng, end: LatLng, segments: usize, rng: &mut StdRng) -> Vec<[f64; 2]> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let mut lat = start.lat + t * (end.lat - start.lat);
            let mut lng = start.lng + t * (end.lng - start.lng);
            if i > 0 && i < segments {
                lat += rng.gen_range(-PATH_NOISE..=PATH_NOISE);
                lng += rng.gen_range(-PATH_NOISE..=PATH_NOISE);
            }
            [lat, lng]
        })
        .collect()
}

fn intercept_at(path: &[[f64; 2]], index: usize, kind: &str, kind_en: &str) -> Vec<InterceptPoint> {
    path.get(index)
        .map(|point| InterceptPoint {
            lat: point[0],
            lng: point[1],
            kind: kind.to_string(),
            kind_en: Some(kind_en.to_string()),
        })
        .into_iter()
        .collect()
}

/// Predicted escape routes from `start`, most probable first. The same seed
/// always yields the same paths.
pub fn predict_movement(start: LatLng, suspect_id: &str, seed: u64) -> PredictionData {
    let mut rng = StdRng::seed_from_u64(seed);

    let ramp = LatLng::new(start.lat + 0.02, start.lng + 0.01);
    let escape_path = interpolate_path(start, ramp, 10, &mut rng);
    let escape = PredictedRoute {
        route_id: "ROUTE-A".to_string(),
        kind: "هروب".to_string(),
        kind_en: Some("ESCAPE".to_string()),
        destination: "مدخل الطريق الدائري الشمالي".to_string(),
        destination_en: Some("Northern Ring Rd On-Ramp".to_string()),
        probability: 0.45,
        color: "orange".to_string(),
        speed: "سريع".to_string(),
        speed_en: Some("FAST".to_string()),
        intercept_points: intercept_at(&escape_path, 5, "نقطة تفتيش", "CHECKPOINT"),
        path: escape_path,
        reasoning: "استجابة هروب فورية نحو طريق سريع يسمح بالانسحاب بسرعة.".to_string(),
        reasoning_en: Some("Immediate flight response towards high-speed infrastructure.".to_string()),
    };

    let hideout_path = interpolate_path(start, HIDEOUT, 30, &mut rng);
    let hideout = PredictedRoute {
        route_id: "ROUTE-B".to_string(),
        kind: "مخبأ".to_string(),
        kind_en: Some("HIDEOUT".to_string()),
        destination: "استراحة العمارية".to_string(),
        destination_en: Some("Al-Ammariyah (Istira'ah)".to_string()),
        probability: 0.89,
        color: "red".to_string(),
        speed: "سريع".to_string(),
        speed_en: Some("FAST".to_string()),
        intercept_points: intercept_at(&hideout_path, 15, "نقطة إيقاف", "INTERCEPT"),
        path: hideout_path,
        reasoning: "البيانات التاريخية تشير إلى تردد المشتبه به على هذا الموقع. منطقة معزولة مناسبة للاختباء.".to_string(),
        reasoning_en: Some(
            "Historical data indicates suspect frequents this location. Remote area suitable for hiding."
                .to_string(),
        ),
    };

    let home = PredictedRoute {
        route_id: "ROUTE-C".to_string(),
        kind: "العودة للمنزل".to_string(),
        kind_en: Some("HOME".to_string()),
        destination: "حي النسيم (المنزل)".to_string(),
        destination_en: Some("Al-Naseem District (Home)".to_string()),
        probability: 0.15,
        color: "yellow".to_string(),
        speed: "بطيء".to_string(),
        speed_en: Some("SLOW".to_string()),
        path: interpolate_path(start, HOME, 25, &mut rng),
        intercept_points: Vec::new(),
        reasoning: "خيار واضح للغاية، ومن غير المرجح أن يعود المشتبه به إلى العنوان الأساسي المعروف.".to_string(),
        reasoning_en: Some("Too obvious. Suspect likely to avoid known primary residence.".to_string()),
    };

    let mut routes = vec![escape, hideout, home];
    routes.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    PredictionData {
        prediction_id: format!("PRED-{}", rng.gen_range(1000..=9999)),
        suspect_id: suspect_id.to_string(),
        timestamp: "2025-12-01T13:15:00Z".to_string(),
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_sorted_by_probability() {
        let prediction = predict_movement(INCIDENT, "suspect_123", 7);
        let ids: Vec<&str> = prediction.routes.iter().map(|r| r.route_id.as_str()).collect();
        assert_eq!(ids, ["ROUTE-B", "ROUTE-A", "ROUTE-C"]);
    }

    #[test]
    fn paths_start_at_the_scene_and_end_at_the_destination() {
        let prediction = predict_movement(INCIDENT, "suspect_123", 7);
        for route in &prediction.routes {
            assert_eq!(route.path.first(), Some(&[INCIDENT.lat, INCIDENT.lng]));
        }
        let hideout = &prediction.routes[0];
        assert_eq!(hideout.path.len(), 31);
        assert_eq!(hideout.path.last(), Some(&[HIDEOUT.lat, HIDEOUT.lng]));
        assert_eq!(hideout.intercept_points.len(), 1);
        assert_eq!(hideout.intercept_points[0].lat, hideout.path[15][0]);
    }

    #[test]
    fn same_seed_same_paths() {
        let a = predict_movement(INCIDENT, "s", 42);
        let b = predict_movement(INCIDENT, "s", 42);
        assert_eq!(a.routes[1].path, b.routes[1].path);
        assert_eq!(a.prediction_id, b.prediction_id);
    }

    #[test]
    fn jitter_stays_within_noise_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = LatLng::new(0.0, 0.0);
        let end = LatLng::new(1.0, 1.0);
        let path = interpolate_path(start, end, 4, &mut rng);
        for (i, point) in path.iter().enumerate() {
            let t = i as f64 / 4.0;
            assert!((point[0] - t).abs() <= PATH_NOISE + 1e-12);
            assert!((point[1] - t).abs() <= PATH_NOISE + 1e-12);
        }
    }

    #[test]
    fn sample_result_is_complete() {
        let result = analysis_result("scene.jpg", Utc::now());
        assert_eq!(result.modules.biometrics.matches.len(), 1);
        assert_eq!(result.modules.cctv_retrieval.cctv_nodes.len(), 4);
        assert!(result.modules.reasoning.is_some());
        assert_eq!(analysis_steps(Language::En)[1], "Triangulating GPS...");
    }
}
