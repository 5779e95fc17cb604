//! View state machine: login screens, then upload → analyzing → result.

use std::convert::TryFrom;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Select,
    Nafath,
    Gov,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Upload,
    Analyzing { step: usize },
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth(AuthView),
    Dashboard(Phase),
}

impl Default for View {
    fn default() -> Self {
        Self::Auth(AuthView::Select)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(AuthView::Select) => write!(f, "auth-select"),
            Self::Auth(AuthView::Nafath) => write!(f, "nafath"),
            Self::Auth(AuthView::Gov) => write!(f, "gov"),
            Self::Dashboard(Phase::Upload) => write!(f, "dashboard/upload"),
            Self::Dashboard(Phase::Analyzing { step }) => write!(f, "dashboard/analyzing({step})"),
            Self::Dashboard(Phase::Result) => write!(f, "dashboard/result"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    ChooseNafath,
    ChooseGov,
    Back,
    LoginSucceeded,
    FileSelected(PathBuf),
    StepAdvanced(usize),
    AnalysisSucceeded,
    AnalysisFailed(String),
    Reset,
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChooseNafath => write!(f, "ChooseNafath"),
            Self::ChooseGov => write!(f, "ChooseGov"),
            Self::Back => write!(f, "Back"),
            Self::LoginSucceeded => write!(f, "LoginSucceeded"),
            Self::FileSelected(path) => write!(f, "FileSelected({})", path.display()),
            Self::StepAdvanced(step) => write!(f, "StepAdvanced({step})"),
            Self::AnalysisSucceeded => write!(f, "AnalysisSucceeded"),
            Self::AnalysisFailed(msg) => write!(f, "AnalysisFailed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: View,
    pub event: FlowEvent,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for TransitionError {}

/// The view a valid (view, event) pair leads to.
pub struct NextView(pub View);

impl TryFrom<(View, &FlowEvent)> for NextView {
    type Error = TransitionError;

    fn try_from(value: (View, &FlowEvent)) -> Result<Self, Self::Error> {
        use AuthView::{Gov, Nafath, Select};
        use Phase::{Analyzing, Result as Done, Upload};
        use View::{Auth, Dashboard};

        let (current, event) = value;
        let next = match (current, event) {
            (Auth(Select), FlowEvent::ChooseNafath) => Auth(Nafath),
            (Auth(Select), FlowEvent::ChooseGov) => Auth(Gov),
            (Auth(Nafath | Gov), FlowEvent::Back) => Auth(Select),
            (Auth(Nafath | Gov), FlowEvent::LoginSucceeded) => Dashboard(Upload),
            (Dashboard(Upload | Done), FlowEvent::FileSelected(_)) => {
                Dashboard(Analyzing { step: 0 })
            }
            (Dashboard(Analyzing { .. }), FlowEvent::StepAdvanced(step)) => {
                Dashboard(Analyzing { step: *step })
            }
            (Dashboard(Analyzing { .. }), FlowEvent::AnalysisSucceeded) => Dashboard(Done),
            (Dashboard(Analyzing { .. }), FlowEvent::AnalysisFailed(_))
            | (Dashboard(Done), FlowEvent::Reset) => Dashboard(Upload),
            _ => {
                return Err(TransitionError {
                    from: current,
                    event: event.clone(),
                })
            }
        };
        Ok(Self(next))
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    view: View,
}

impl ViewState {
    pub const fn new(view: View) -> Self {
        Self { view }
    }

    pub const fn view(&self) -> View {
        self.view
    }

    pub const fn phase(&self) -> Option<Phase> {
        match self.view {
            View::Dashboard(phase) => Some(phase),
            View::Auth(_) => None,
        }
    }

    pub const fn is_analyzing(&self) -> bool {
        matches!(self.view, View::Dashboard(Phase::Analyzing { .. }))
    }

    /// Applies `event`. An invalid event leaves the view unchanged.
    pub fn apply(&mut self, event: &FlowEvent) -> Result<View, TransitionError> {
        let NextView(next) = NextView::try_from((self.view, event))?;
        self.view = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> ViewState {
        ViewState::new(View::Dashboard(Phase::Upload))
    }

    #[test]
    fn login_paths_reach_the_upload_screen() {
        for choice in [FlowEvent::ChooseNafath, FlowEvent::ChooseGov] {
            let mut state = ViewState::default();
            assert!(state.apply(&choice).is_ok());
            assert_eq!(
                state.apply(&FlowEvent::LoginSucceeded),
                Ok(View::Dashboard(Phase::Upload))
            );
        }
    }

    #[test]
    fn back_returns_to_selection() {
        let mut state = ViewState::new(View::Auth(AuthView::Gov));
        assert_eq!(state.apply(&FlowEvent::Back), Ok(View::Auth(AuthView::Select)));
    }

    #[test]
    fn upload_runs_through_analyzing_to_result() {
        let mut state = dashboard();
        state.apply(&FlowEvent::FileSelected("a.png".into())).ok();
        assert!(state.is_analyzing());
        state.apply(&FlowEvent::StepAdvanced(2)).ok();
        assert_eq!(state.phase(), Some(Phase::Analyzing { step: 2 }));
        assert_eq!(
            state.apply(&FlowEvent::AnalysisSucceeded),
            Ok(View::Dashboard(Phase::Result))
        );
    }

    #[test]
    fn failure_returns_to_upload() {
        let mut state = dashboard();
        state.apply(&FlowEvent::FileSelected("a.png".into())).ok();
        assert_eq!(
            state.apply(&FlowEvent::AnalysisFailed("HTTP 500".into())),
            Ok(View::Dashboard(Phase::Upload))
        );
    }

    #[test]
    fn result_cannot_skip_analyzing() {
        let mut state = dashboard();
        let error = state.apply(&FlowEvent::AnalysisSucceeded);
        assert!(error.is_err());
        assert_eq!(state.view(), View::Dashboard(Phase::Upload));
    }

    #[test]
    fn uploads_are_rejected_while_analyzing() {
        let mut state = dashboard();
        state.apply(&FlowEvent::FileSelected("a.png".into())).ok();
        let error = state.apply(&FlowEvent::FileSelected("b.png".into()));
        assert_eq!(
            error.map_err(|e| e.to_string()),
            Err("Invalid transition from dashboard/analyzing(0) with event FileSelected(b.png)"
                .to_string())
        );
    }

    #[test]
    fn result_allows_reset_and_reupload() {
        let mut state = ViewState::new(View::Dashboard(Phase::Result));
        assert_eq!(state.apply(&FlowEvent::Reset), Ok(View::Dashboard(Phase::Upload)));

        let mut state = ViewState::new(View::Dashboard(Phase::Result));
        assert_eq!(
            state.apply(&FlowEvent::FileSelected("c.png".into())),
            Ok(View::Dashboard(Phase::Analyzing { step: 0 }))
        );
    }

    #[test]
    fn dashboard_events_are_rejected_before_login() {
        let mut state = ViewState::default();
        assert!(state.apply(&FlowEvent::FileSelected("a.png".into())).is_err());
        assert!(state.apply(&FlowEvent::LoginSucceeded).is_err());
        assert_eq!(state.view(), View::Auth(AuthView::Select));
    }
}
