//! Dashboard layout descriptors.
//!
//! A single dashboard renders every variant; a preset only decides which
//! panels appear and how they are grouped into pages.

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Kpis,
    SuspectProfile,
    IncidentMap,
    CctvNetwork,
    CameraMap,
    GpsRadar,
    ThreatDetection,
    Timeline,
    Report,
}

impl Panel {
    pub const fn title(self, language: Language) -> &'static str {
        match self {
            Self::Kpis => language.pick("المؤشرات", "Indicators"),
            Self::SuspectProfile => language.pick("هوية المشتبه به", "Suspect Identified"),
            Self::IncidentMap => language.pick("موقع الهدف", "Target Location"),
            Self::CctvNetwork => language.pick("شبكة المراقبة النشطة", "Active Surveillance Network"),
            Self::CameraMap => language.pick("خريطة الكاميرات", "Camera Map"),
            Self::GpsRadar => language.pick("رادار GPS", "GPS Radar"),
            Self::ThreatDetection => language.pick("تقييم التهديد", "Threat Assessment"),
            Self::Timeline => language.pick("التسلسل الزمني", "Timeline"),
            Self::Report => language.pick("تقرير الاستخبارات", "Intelligence Report"),
        }
    }
}

/// One tab of the dashboard. Panels are laid out in a grid: `rows` holds
/// the panels of each row, left to right in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title_ar: &'static str,
    pub title_en: &'static str,
    pub rows: Vec<Vec<Panel>>,
}

impl Page {
    pub const fn title(&self, language: Language) -> &'static str {
        language.pick(self.title_ar, self.title_en)
    }

    pub fn panels(&self) -> impl Iterator<Item = Panel> + '_ {
        self.rows.iter().flatten().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPreset {
    Classic,
    Investigation,
    Full,
}

impl LayoutPreset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Investigation => "investigation",
            Self::Full => "full",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "investigation" => Some(Self::Investigation),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn pages(self) -> Vec<Page> {
        match self {
            Self::Classic => vec![
                Page {
                    title_ar: "الهدف",
                    title_en: "Target",
                    rows: vec![
                        vec![Panel::Kpis],
                        vec![Panel::SuspectProfile, Panel::IncidentMap],
                    ],
                },
                Page {
                    title_ar: "المراقبة",
                    title_en: "Surveillance",
                    rows: vec![vec![Panel::CctvNetwork, Panel::CameraMap]],
                },
                Page {
                    title_ar: "التقرير",
                    title_en: "Report",
                    rows: vec![vec![Panel::Report]],
                },
            ],
            Self::Investigation => vec![
                Page {
                    title_ar: "التحقيق",
                    title_en: "Investigation",
                    rows: vec![
                        vec![Panel::Kpis],
                        vec![Panel::GpsRadar, Panel::ThreatDetection],
                    ],
                },
                Page {
                    title_ar: "المسار",
                    title_en: "Journey",
                    rows: vec![vec![Panel::Timeline, Panel::CameraMap]],
                },
                Page {
                    title_ar: "التقرير",
                    title_en: "Report",
                    rows: vec![vec![Panel::Report]],
                },
            ],
            Self::Full => vec![
                Page {
                    title_ar: "الهدف",
                    title_en: "Target",
                    rows: vec![
                        vec![Panel::Kpis],
                        vec![Panel::SuspectProfile, Panel::IncidentMap, Panel::GpsRadar],
                    ],
                },
                Page {
                    title_ar: "المراقبة",
                    title_en: "Surveillance",
                    rows: vec![
                        vec![Panel::CctvNetwork, Panel::CameraMap],
                        vec![Panel::ThreatDetection, Panel::Timeline],
                    ],
                },
                Page {
                    title_ar: "التقرير",
                    title_en: "Report",
                    rows: vec![vec![Panel::Report]],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_ends_with_the_report() {
        for preset in [
            LayoutPreset::Classic,
            LayoutPreset::Investigation,
            LayoutPreset::Full,
        ] {
            let pages = preset.pages();
            let last = pages.last().map(|page| page.panels().collect::<Vec<_>>());
            assert_eq!(last, Some(vec![Panel::Report]), "{}", preset.as_str());
        }
    }

    #[test]
    fn full_preset_shows_every_panel() {
        let pages = LayoutPreset::Full.pages();
        let shown: Vec<Panel> = pages.iter().flat_map(Page::panels).collect();
        for panel in [
            Panel::Kpis,
            Panel::SuspectProfile,
            Panel::IncidentMap,
            Panel::CctvNetwork,
            Panel::CameraMap,
            Panel::GpsRadar,
            Panel::ThreatDetection,
            Panel::Timeline,
            Panel::Report,
        ] {
            assert!(shown.contains(&panel), "{panel:?} missing");
        }
    }

    #[test]
    fn parse_round_trips_names() {
        for preset in [
            LayoutPreset::Classic,
            LayoutPreset::Investigation,
            LayoutPreset::Full,
        ] {
            assert_eq!(LayoutPreset::parse(preset.as_str()), Some(preset));
        }
        assert_eq!(LayoutPreset::parse("grid"), None);
    }
}
