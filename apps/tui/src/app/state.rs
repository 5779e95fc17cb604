use forensic_dash::adapter::DashboardView;
use forensic_dash::config::AppConfig;
use forensic_dash::domain::{AnalysisPayload, LatLng};
use forensic_dash::fixture::ANALYSIS_STEPS;
use forensic_dash::flow::{AuthView, FlowEvent, Phase, View, ViewState};
use forensic_dash::i18n::Language;
use forensic_dash::layout::Page;
use forensic_dash::map::{MapModel, MapScene};
use forensic_dash::pipeline::{self, AnalysisPlan, JobEvent, JobHandle};
use forensic_dash::routing::{RouteEvent, RouteResolver, RouteService};
use forensic_dash::sequence::{advance_sweep, AnimationMode};
use forensic_dash::source::{AnalysisSource, Upload};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

/// Mock verification delay before a login is accepted.
pub const LOGIN_DELAY: Duration = Duration::from_millis(800);
const REVEAL_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    NationalId,
    EmployeeId,
    Password,
}

/// Text typed into the login screens. Never validated beyond "not empty".
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub national_id: String,
    pub employee_id: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn can_submit(&self, method: AuthView) -> bool {
        match method {
            AuthView::Nafath => !self.national_id.trim().is_empty(),
            AuthView::Gov => {
                !self.employee_id.trim().is_empty() && !self.password.is_empty()
            }
            AuthView::Select => false,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::NationalId => &mut self.national_id,
            LoginField::EmployeeId => &mut self.employee_id,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_gov_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::EmployeeId => LoginField::Password,
            _ => LoginField::EmployeeId,
        };
    }
}

pub struct App {
    pub running: bool,
    pub config: AppConfig,
    pub language: Language,
    pub flow: ViewState,
    pub pages: Vec<Page>,
    pub page_index: usize,
    pub auth_selection: usize,
    pub login: LoginForm,
    pub login_deadline: Option<Instant>,
    pub path_input: String,
    pub upload_name: Option<String>,
    pub upload_dimensions: Option<(u32, u32)>,
    pub payload: Option<AnalysisPayload>,
    pub view: Option<DashboardView>,
    /// `anim_seconds` when the current result arrived.
    pub result_started: Option<f64>,
    source: Arc<dyn AnalysisSource>,
    next_job: u64,
    pub job: Option<JobHandle>,
    job_tx: UnboundedSender<JobEvent>,
    pub job_rx: UnboundedReceiver<JobEvent>,
    routes: RouteResolver,
    route_tx: UnboundedSender<RouteEvent>,
    route_rx: UnboundedReceiver<RouteEvent>,
    pub resolved: HashMap<String, Vec<LatLng>>,
    pub incident_scene: MapScene,
    pub camera_scene: MapScene,
    pub sweep_angle: f64,
    sweep_tick: Option<f64>,
    pub animation_mode: AnimationMode,
    /// Animation time in seconds; stands still while paused.
    pub anim_seconds: f64,
    pub started: Instant,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub throbber: ThrobberState,
    pub reveal_fx: Mutex<Option<Effect>>,
    pub alert: Option<String>,
    pub status_message: String,
    pub show_help: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        source: Arc<dyn AnalysisSource>,
        route_service: Arc<dyn RouteService>,
    ) -> Self {
        let (job_tx, job_rx) = pipeline::channel();
        let (route_tx, route_rx) = mpsc::unbounded_channel();
        let now = Instant::now();

        Self {
            running: true,
            language: config.language,
            pages: config.layout.pages(),
            config,
            flow: ViewState::default(),
            page_index: 0,
            auth_selection: 0,
            login: LoginForm::default(),
            login_deadline: None,
            path_input: String::new(),
            upload_name: None,
            upload_dimensions: None,
            payload: None,
            view: None,
            result_started: None,
            source,
            next_job: 0,
            job: None,
            job_tx,
            job_rx,
            routes: RouteResolver::new(route_service),
            route_tx,
            route_rx,
            resolved: HashMap::new(),
            incident_scene: MapScene::default(),
            camera_scene: MapScene::default(),
            sweep_angle: 0.0,
            sweep_tick: None,
            animation_mode: AnimationMode::Running,
            anim_seconds: 0.0,
            started: now,
            last_frame: now,
            last_tick: Duration::ZERO,
            throbber: ThrobberState::default(),
            reveal_fx: Mutex::new(None),
            alert: None,
            status_message: String::new(),
            show_help: false,
        }
    }

    pub const fn view(&self) -> View {
        self.flow.view()
    }

    /// Applies a flow event. Invalid transitions are logged and ignored.
    pub fn transition(&mut self, event: &FlowEvent) -> bool {
        match self.flow.apply(event) {
            Ok(view) => {
                debug!("view -> {view}");
                true
            }
            Err(e) => {
                debug!("{e}");
                false
            }
        }
    }

    pub fn step_labels(&self) -> Vec<&'static str> {
        ANALYSIS_STEPS
            .iter()
            .map(|&(ar, en)| self.language.pick(ar, en))
            .collect()
    }

    /// Animation time since the current result arrived; drives the
    /// staggered reveals and stands still while paused.
    pub fn result_elapsed(&self) -> Duration {
        self.result_started.map_or(Duration::ZERO, |started| {
            Duration::from_secs_f64((self.anim_seconds - started).max(0.0))
        })
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        let (angle, tick) = advance_sweep(
            self.sweep_angle,
            self.sweep_tick,
            self.started.elapsed().as_secs_f64(),
            self.animation_mode,
        );
        self.sweep_angle = angle;
        self.sweep_tick = tick;

        if self.animation_mode == AnimationMode::Running {
            self.anim_seconds += self.last_tick.as_secs_f64();
            self.throbber.calc_next();
        }

        if self.login_deadline.is_some_and(|deadline| now >= deadline) {
            self.login_deadline = None;
            if self.transition(&FlowEvent::LoginSucceeded) {
                info!("login accepted");
                self.login = LoginForm::default();
                self.status_message.clear();
            }
        }
    }

    pub fn toggle_animation_pause(&mut self) {
        self.animation_mode = match self.animation_mode {
            AnimationMode::Running => AnimationMode::Paused,
            AnimationMode::Paused => AnimationMode::Running,
        };
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        info!("language -> {}", self.language.as_str());
        self.rebuild_view();
    }

    pub fn choose_login(&mut self, method: AuthView) {
        let event = match method {
            AuthView::Nafath => FlowEvent::ChooseNafath,
            AuthView::Gov => FlowEvent::ChooseGov,
            AuthView::Select => return,
        };
        if self.transition(&event) {
            self.login = LoginForm {
                focus: if method == AuthView::Gov {
                    LoginField::EmployeeId
                } else {
                    LoginField::NationalId
                },
                ..LoginForm::default()
            };
        }
    }

    pub fn submit_login(&mut self) {
        let View::Auth(method) = self.view() else {
            return;
        };
        if self.login_deadline.is_some() || !self.login.can_submit(method) {
            return;
        }
        self.login_deadline = Some(Instant::now() + LOGIN_DELAY);
        self.status_message = self
            .language
            .pick("جاري التحقق...", "Verifying...")
            .to_string();
    }

    pub fn back_to_selection(&mut self) {
        self.login_deadline = None;
        if self.transition(&FlowEvent::Back) {
            self.login = LoginForm::default();
            self.status_message.clear();
        }
    }

    /// Starts analyzing `path`. Rejected (and logged) while another analysis runs.
    pub async fn start_analysis(&mut self, path: PathBuf) {
        if !self.transition(&FlowEvent::FileSelected(path.clone())) {
            return;
        }
        self.clear_result();

        let upload = match Upload::read(&path).await {
            Ok(upload) => upload,
            Err(e) => {
                self.fail_analysis(&e.to_string());
                return;
            }
        };

        self.next_job += 1;
        let id = self.next_job;
        self.upload_name = Some(upload.file_name.clone());
        self.upload_dimensions = upload.dimensions;
        self.path_input.clear();
        self.status_message.clear();

        let plan = AnalysisPlan {
            steps: ANALYSIS_STEPS.len(),
            step_delay: self.config.step_delay,
            mode: self.config.fetch_mode,
        };
        self.job = Some(pipeline::spawn_analysis(
            id,
            Arc::clone(&self.source),
            upload,
            plan,
            self.job_tx.clone(),
        ));
    }

    /// Applies queued job events. Returns true when something changed.
    pub fn drain_jobs(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.job_rx.try_recv() {
            changed |= self.handle_job_event(event);
        }
        changed
    }

    pub fn handle_job_event(&mut self, event: JobEvent) -> bool {
        if self.job.as_ref().map(|job| job.id) != Some(event.job()) {
            debug!("dropping event from stale job {}", event.job());
            return false;
        }

        match event {
            JobEvent::Step { index, .. } => self.transition(&FlowEvent::StepAdvanced(index)),
            JobEvent::Finished { result, .. } => {
                self.job = None;
                match result {
                    Ok(payload) => {
                        self.payload = Some(payload);
                        self.rebuild_view();
                        if self.transition(&FlowEvent::AnalysisSucceeded) {
                            self.result_started = Some(self.anim_seconds);
                            self.page_index = 0;
                            self.start_reveal();
                            self.start_routes();
                        }
                    }
                    Err(e) => self.fail_analysis(&e.to_string()),
                }
                true
            }
        }
    }

    fn fail_analysis(&mut self, message: &str) {
        error!("analysis failed: {message}");
        self.transition(&FlowEvent::AnalysisFailed(message.to_string()));
        self.alert = Some(message.to_string());
        self.clear_result();
    }

    /// Applies resolved route geometry from the current generation.
    pub fn drain_routes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.route_rx.try_recv() {
            if event.generation != self.routes.generation() {
                debug!("dropping stale route {} (gen {})", event.route_id, event.generation);
                continue;
            }
            debug!(
                "route {} ready: {} points, routed={}",
                event.route_id,
                event.points.len(),
                event.routed
            );
            self.resolved.insert(event.route_id, event.points);
            changed = true;
        }
        if changed {
            self.refresh_scenes();
        }
        changed
    }

    fn start_routes(&mut self) {
        let Some(model) = self.view.as_ref().and_then(|view| view.camera_map.as_ref()) else {
            return;
        };
        let routes: Vec<(String, Vec<LatLng>)> = model
            .overlay
            .routes
            .iter()
            .map(|route| (route.id.clone(), route.waypoints.clone()))
            .collect();
        if routes.is_empty() {
            return;
        }
        let generation = self.routes.resolve(routes, self.route_tx.clone());
        debug!("resolving prediction routes (gen {generation})");
    }

    fn rebuild_view(&mut self) {
        self.view = self
            .payload
            .as_ref()
            .map(|payload| DashboardView::build(payload, self.language, self.upload_dimensions));
        self.refresh_scenes();
    }

    fn refresh_scenes(&mut self) {
        let (incident, camera) = self.view.as_ref().map_or((None, None), |view| {
            (view.incident_map.as_ref(), view.camera_map.as_ref())
        });
        apply_scene("incident", &mut self.incident_scene, incident, &self.resolved);
        apply_scene("camera", &mut self.camera_scene, camera, &self.resolved);
    }

    fn start_reveal(&self) {
        if let Ok(mut effect) = self.reveal_fx.lock() {
            *effect = Some(fx::coalesce((REVEAL_MS, Interpolation::QuadOut)));
        }
    }

    pub fn next_page(&mut self) {
        self.select_page(crate::app::input::wrap_increment(self.page_index, self.pages.len()));
    }

    pub fn previous_page(&mut self) {
        self.select_page(crate::app::input::wrap_decrement(self.page_index, self.pages.len()));
    }

    pub fn select_page(&mut self, index: usize) {
        if index < self.pages.len() && index != self.page_index {
            self.page_index = index;
            self.start_reveal();
        }
    }

    pub fn export_pdf(&mut self) {
        self.status_message = self
            .language
            .pick("جاري تحميل التقرير...", "Downloading Report...")
            .to_string();
    }

    /// Back to the upload screen with the result discarded.
    pub fn reset(&mut self) {
        if self.transition(&FlowEvent::Reset) {
            self.clear_result();
            self.status_message.clear();
        }
    }

    fn clear_result(&mut self) {
        self.job = None;
        self.routes.cancel();
        self.payload = None;
        self.view = None;
        self.result_started = None;
        self.resolved.clear();
        self.refresh_scenes();
        if let Ok(mut effect) = self.reveal_fx.lock() {
            *effect = None;
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        self.flow.phase()
    }
}

fn apply_scene(
    name: &str,
    scene: &mut MapScene,
    model: Option<&MapModel>,
    resolved: &HashMap<String, Vec<LatLng>>,
) {
    let diff = match model {
        Some(model) => scene.apply(model.layers(resolved)),
        None => scene.clear(),
    };
    if !diff.is_empty() {
        debug!("{name} map: +{:?} -{:?}", diff.added, diff.removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forensic_dash::routing::StraightLines;
    use forensic_dash::source::FixtureSource;

    fn app() -> App {
        let config = AppConfig {
            step_delay: Duration::from_millis(1),
            ..AppConfig::default()
        };
        App::new(config, Arc::new(FixtureSource), Arc::new(StraightLines))
    }

    #[test]
    fn login_needs_every_field() {
        let mut form = LoginForm::default();
        assert!(!form.can_submit(AuthView::Nafath));
        form.national_id = "1012345678".into();
        assert!(form.can_submit(AuthView::Nafath));

        form.employee_id = "E-1".into();
        assert!(!form.can_submit(AuthView::Gov));
        form.password = "secret".into();
        assert!(form.can_submit(AuthView::Gov));
    }

    #[tokio::test]
    async fn login_is_accepted_after_the_delay() {
        let mut app = app();
        app.choose_login(AuthView::Nafath);
        app.login.national_id = "1012345678".into();
        app.submit_login();
        assert!(app.login_deadline.is_some());

        app.login_deadline = Some(Instant::now());
        app.update();
        assert_eq!(app.view(), View::Dashboard(Phase::Upload));
        assert!(app.login.national_id.is_empty());
    }

    #[tokio::test]
    async fn unreadable_upload_alerts_and_returns_to_upload() {
        let mut app = app();
        app.flow = ViewState::new(View::Dashboard(Phase::Upload));
        app.start_analysis(PathBuf::from("/definitely/missing.png")).await;

        assert_eq!(app.view(), View::Dashboard(Phase::Upload));
        assert!(app.alert.is_some());
        assert!(app.job.is_none());
    }

    #[tokio::test]
    async fn fixture_analysis_reaches_the_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scene.jpg");
        std::fs::write(&path, b"not really a jpeg").expect("write");

        let mut app = app();
        app.flow = ViewState::new(View::Dashboard(Phase::Upload));
        app.start_analysis(path).await;
        assert!(app.flow.is_analyzing());

        while app.flow.is_analyzing() {
            let event = app.job_rx.recv().await.expect("job event");
            app.handle_job_event(event);
        }

        assert_eq!(app.view(), View::Dashboard(Phase::Result));
        let view = app.view.as_ref().expect("view");
        assert_eq!(view.language, Language::Ar);
        assert!(!app.incident_scene.layers().is_empty());

        app.toggle_language();
        assert_eq!(app.view.as_ref().map(|view| view.language), Some(Language::En));

        app.reset();
        assert_eq!(app.view(), View::Dashboard(Phase::Upload));
        assert!(app.view.is_none());
        assert!(app.camera_scene.layers().is_empty());
    }

    #[test]
    fn reveals_stand_still_while_paused() {
        let mut app = app();
        app.result_started = Some(0.0);
        app.anim_seconds = 1.0;
        let ago = || Instant::now().checked_sub(Duration::from_millis(200)).expect("instant");

        app.toggle_animation_pause();
        app.last_frame = ago();
        app.update();
        assert_eq!(app.result_elapsed(), Duration::from_secs(1));

        app.toggle_animation_pause();
        app.last_frame = ago();
        app.update();
        assert!(app.result_elapsed() > Duration::from_secs(1));
    }

    #[tokio::test]
    async fn second_upload_is_rejected_while_analyzing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"x").expect("write");

        let mut app = app();
        app.flow = ViewState::new(View::Dashboard(Phase::Upload));
        app.start_analysis(path.clone()).await;
        let first = app.job.as_ref().map(|job| job.id);

        app.start_analysis(path).await;
        assert_eq!(app.job.as_ref().map(|job| job.id), first);
    }
}
