//! The view/flow controller.
//!
//! `Flow` owns all session state and is the only thing that mutates it. User
//! actions are methods; simulated backend latency is a [`FlowTask`] on the
//! scheduler, fired by [`Flow::tick`]. Leaving a screen cancels the tasks it
//! owns, so a late timer never touches a screen that is no longer shown.

use chrono::Local;
use tracing::{debug, info, warn};

use crate::certification::{BiometricModality, CaptureState, CertStep, UploadedDocument};
use crate::chat::ConversationId;
use crate::config::{AppConfig, Timings};
use crate::dashboard::{BottomNav, DashboardState, DashboardView, DateRange, DiseaseFilter};
use crate::error::FlowError;
use crate::personal::PersonalStep;
use crate::scheduler::Scheduler;
use crate::screen::{Screen, ScreenRouter};
use crate::session::{Role, Session, User};
use crate::signature::SignaturePad;
use crate::validation::ValidationRun;
use crate::wizard::{StepWizard, WizardStep};

/// Deferred work standing in for backend latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTask {
    SplashDone,
    LoginComplete,
    LoginBiometricVerified,
    LoginBiometricReset,
    RoleConfirmed,
    PersonalDataHandoff,
    UploadAdvance(CertStep),
    BiometricCaptured(BiometricModality),
    BiometricAdvance,
    ValidationStage(usize),
    ValidationSuccess,
    ChatReply(ConversationId),
}

/// Biometric option on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginBiometric {
    #[default]
    Idle,
    Scanning,
    Verified,
}

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    /// Credentials accepted, waiting for the mocked backend.
    pub loading: bool,
    pub biometric: LoginBiometric,
    pub qr_scanner_open: bool,
}

/// Counts shown on the submission screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub fields: usize,
    pub documents: usize,
    pub services: usize,
}

pub struct Flow {
    session: Session,
    router: ScreenRouter,
    personal: StepWizard<PersonalStep>,
    certification: StepWizard<CertStep>,
    validation: ValidationRun,
    signature: SignaturePad,
    dashboard: DashboardState,
    login: LoginState,
    scheduler: Scheduler<FlowTask>,
    timings: Timings,
    now_ms: u64,
}

impl Flow {
    /// Fresh session on the splash screen, with the splash timer running.
    pub fn new(config: &AppConfig) -> Self {
        let mut flow = Self {
            session: Session::default(),
            router: ScreenRouter::new(Screen::Splash),
            personal: StepWizard::new(),
            certification: StepWizard::new(),
            validation: ValidationRun::default(),
            signature: SignaturePad::default(),
            dashboard: DashboardState::new(config.chart_seed),
            login: LoginState::default(),
            scheduler: Scheduler::new(),
            timings: config.timings,
            now_ms: 0,
        };
        flow.schedule(flow.timings.splash_ms, FlowTask::SplashDone);
        flow
    }

    // ─── Read access ─────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_screen(&self) -> Screen {
        self.router.current()
    }

    pub fn router(&self) -> &ScreenRouter {
        &self.router
    }

    pub fn personal_step(&self) -> PersonalStep {
        self.personal.active()
    }

    pub fn cert_step(&self) -> CertStep {
        self.certification.active()
    }

    pub fn validation(&self) -> &ValidationRun {
        &self.validation
    }

    pub fn signature(&self) -> &SignaturePad {
        &self.signature
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn login(&self) -> &LoginState {
        &self.login
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn pending_tasks_for(&self, screen: Screen) -> usize {
        self.scheduler.pending_for(screen)
    }

    pub fn submission_summary(&self) -> SubmissionSummary {
        SubmissionSummary {
            fields: self.session.personal_data.filled_count(),
            documents: self.session.certification.document_count(),
            services: self.session.selected_services.len(),
        }
    }

    // ─── Clock ───────────────────────────────────────────────────────

    /// Advance the clock to `now_ms` and fire every task that came due.
    ///
    /// Each task runs with the clock set to its own due time, so chained
    /// delays do not drift with the caller's tick rate. Returns the number
    /// of tasks fired.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let target = now_ms.max(self.now_ms);
        let mut fired = 0;
        while let Some((due, task)) = self.scheduler.pop_due(target) {
            self.now_ms = due.max(self.now_ms);
            self.fire(task);
            fired += 1;
        }
        self.now_ms = target;
        fired
    }

    fn schedule(&mut self, delay_ms: u64, task: FlowTask) {
        let owner = self.router.current();
        debug!(?task, delay_ms, %owner, "schedule");
        self.scheduler.schedule(self.now_ms, delay_ms, owner, task);
    }

    fn fire(&mut self, task: FlowTask) {
        debug!(?task, now_ms = self.now_ms, "fire");
        match task {
            FlowTask::SplashDone => self.show(Screen::Login),
            FlowTask::LoginComplete => {
                self.login.loading = false;
                let user = User::mock();
                info!(user = %user.name, "login complete");
                self.session.current_user = Some(user);
                self.show(Screen::Dashboard);
            }
            FlowTask::LoginBiometricVerified => {
                self.login.biometric = LoginBiometric::Verified;
                self.schedule(
                    self.timings.login_biometric_reset_ms,
                    FlowTask::LoginBiometricReset,
                );
            }
            FlowTask::LoginBiometricReset => self.login.biometric = LoginBiometric::Idle,
            FlowTask::RoleConfirmed => {
                self.show(Screen::PersonalData);
                self.personal.reset();
            }
            FlowTask::PersonalDataHandoff => self.show(Screen::Certification),
            FlowTask::UploadAdvance(step) => self.auto_advance(step),
            FlowTask::BiometricCaptured(modality) => {
                self.session
                    .certification
                    .captures
                    .insert(modality, CaptureState::Captured);
                self.schedule(self.timings.biometric_advance_ms, FlowTask::BiometricAdvance);
            }
            FlowTask::BiometricAdvance => self.auto_advance(CertStep::Biometric),
            FlowTask::ValidationStage(idx) => {
                if self.validation.enter_stage(idx) {
                    self.schedule(self.timings.validation_success_ms, FlowTask::ValidationSuccess);
                } else {
                    self.schedule(
                        self.timings.validation_stage_ms,
                        FlowTask::ValidationStage(idx + 1),
                    );
                }
            }
            FlowTask::ValidationSuccess => {
                info!("validation complete");
                self.validation.complete();
            }
            FlowTask::ChatReply(conversation) => {
                self.session.chat.push_reply(conversation, Local::now());
            }
        }
    }

    // ─── Routing ─────────────────────────────────────────────────────

    /// Make `screen` the only active screen and run its entry side effects.
    pub fn show(&mut self, screen: Screen) {
        let left = self.router.show(screen);
        if left != screen {
            let cancelled = self.scheduler.cancel_owned_by(left);
            if cancelled > 0 {
                debug!(%left, cancelled, "cancelled tasks of exited screen");
            }
            self.on_exit(left);
        }
        debug!(from = %left, to = %screen, "show screen");
        if screen == Screen::Dashboard {
            self.dashboard.init_map();
            self.dashboard.init_chart();
        }
    }

    /// Undo in-progress indicators whose completing task was just cancelled.
    fn on_exit(&mut self, left: Screen) {
        match left {
            Screen::Login => {
                self.login.loading = false;
                self.login.biometric = LoginBiometric::Idle;
                self.login.qr_scanner_open = false;
            }
            Screen::Certification => {
                for state in self.session.certification.captures.values_mut() {
                    if *state == CaptureState::Processing {
                        *state = CaptureState::Idle;
                    }
                }
            }
            _ => {}
        }
    }

    /// Show a screen by identifier. Unknown identifiers are ignored.
    pub fn show_named(&mut self, id: &str) {
        match id.parse::<Screen>() {
            Ok(screen) => self.show(screen),
            Err(_) => debug!(id, "ignoring unknown screen"),
        }
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), FlowError> {
        let actual = self.router.current();
        if actual == expected {
            Ok(())
        } else {
            Err(FlowError::NotOnScreen { expected, actual })
        }
    }

    /// Leave the splash screen before its timer runs out.
    pub fn skip_splash(&mut self) {
        if self.router.is_active(Screen::Splash) {
            self.show(Screen::Login);
        }
    }

    // ─── Login ───────────────────────────────────────────────────────

    pub fn submit_login(&mut self, username: &str, pin: &str) -> Result<(), FlowError> {
        self.expect_screen(Screen::Login)?;
        if username.is_empty() || pin.chars().count() != 6 {
            warn!("login rejected: invalid credentials");
            return Err(FlowError::InvalidCredentials);
        }
        if self.login.loading {
            return Ok(());
        }
        self.login.loading = true;
        self.schedule(self.timings.login_ms, FlowTask::LoginComplete);
        Ok(())
    }

    /// Simulated biometric login. Ignored while a scan is already shown.
    pub fn login_biometric(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Login)?;
        if self.login.biometric != LoginBiometric::Idle {
            return Ok(());
        }
        self.login.biometric = LoginBiometric::Scanning;
        self.schedule(
            self.timings.login_biometric_scan_ms,
            FlowTask::LoginBiometricVerified,
        );
        Ok(())
    }

    pub fn open_qr_scanner(&mut self) {
        self.login.qr_scanner_open = true;
    }

    pub fn cancel_qr_scanner(&mut self) {
        self.login.qr_scanner_open = false;
    }

    pub fn go_to_signup(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Login)?;
        self.show(Screen::Signup);
        Ok(())
    }

    pub fn back_to_login(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Signup)?;
        self.show(Screen::Login);
        Ok(())
    }

    // ─── Signup / personal data ──────────────────────────────────────

    /// Pick a role; the personal-data form opens after a short delay.
    pub fn select_role(&mut self, role: Role) -> Result<(), FlowError> {
        self.expect_screen(Screen::Signup)?;
        self.session.selected_role = Some(role);
        self.schedule(self.timings.role_select_ms, FlowTask::RoleConfirmed);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FlowError> {
        self.expect_screen(Screen::PersonalData)?;
        self.session.personal_data.set(name, value);
        Ok(())
    }

    /// Next-step button. Reaching the final step hands over to certification.
    pub fn personal_next(&mut self, from: PersonalStep, to: u8) -> Result<PersonalStep, FlowError> {
        self.expect_screen(Screen::PersonalData)?;
        let step = self.personal.advance(from, to)?;
        if self.personal.is_last() {
            self.schedule(
                self.timings.personal_data_handoff_ms,
                FlowTask::PersonalDataHandoff,
            );
        }
        Ok(step)
    }

    pub fn personal_prev(&mut self, from: PersonalStep, to: u8) -> Result<PersonalStep, FlowError> {
        self.expect_screen(Screen::PersonalData)?;
        self.personal.retreat(from, to)
    }

    // ─── Certification ───────────────────────────────────────────────

    pub fn back_to_personal(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Certification)?;
        self.show(Screen::PersonalData);
        Ok(())
    }

    pub fn cert_next(&mut self, from: CertStep, to: u8) -> Result<CertStep, FlowError> {
        self.expect_screen(Screen::Certification)?;
        self.certification.advance(from, to)
    }

    pub fn cert_prev(&mut self, from: CertStep, to: u8) -> Result<CertStep, FlowError> {
        self.expect_screen(Screen::Certification)?;
        self.certification.retreat(from, to)
    }

    /// A file was picked on an upload step. The wizard moves on after a delay.
    pub fn select_file(
        &mut self,
        step: CertStep,
        name: impl Into<String>,
        size_bytes: u64,
    ) -> Result<(), FlowError> {
        self.expect_screen(Screen::Certification)?;
        if !step.is_upload() {
            return Err(FlowError::UnknownStep(step.key()));
        }
        if !self.certification.is_active(step) {
            return Err(FlowError::StepNotActive(step.key()));
        }
        let doc = UploadedDocument {
            name: name.into(),
            size_bytes,
        };
        debug!(step = ?step, file = %doc.name, size = %doc.size_label(), "file selected");
        self.session.certification.documents.insert(step, doc);
        self.schedule(self.timings.upload_advance_ms, FlowTask::UploadAdvance(step));
        Ok(())
    }

    /// Start a biometric capture. Ignored while that capture is processing.
    pub fn capture_biometric(&mut self, modality: BiometricModality) -> Result<(), FlowError> {
        self.expect_screen(Screen::Certification)?;
        if !self.certification.is_active(CertStep::Biometric) {
            return Err(FlowError::StepNotActive(CertStep::Biometric.key()));
        }
        if self.session.certification.capture_state(modality) == CaptureState::Processing {
            return Ok(());
        }
        self.session
            .certification
            .captures
            .insert(modality, CaptureState::Processing);
        self.schedule(
            self.timings.biometric_processing_ms,
            FlowTask::BiometricCaptured(modality),
        );
        Ok(())
    }

    fn auto_advance(&mut self, from: CertStep) {
        if !self.certification.is_active(from) {
            return;
        }
        if let Some(next) = StepWizard::<CertStep>::next_after(from) {
            // Active-step check above makes this infallible.
            let _ = self.certification.advance(from, next.key());
        }
    }

    pub fn continue_to_services(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Certification)?;
        self.show(Screen::Services);
        Ok(())
    }

    // ─── Services ────────────────────────────────────────────────────

    /// Flip a service. Returns true if it is now selected.
    pub fn toggle_service(&mut self, service: &str) -> Result<bool, FlowError> {
        self.expect_screen(Screen::Services)?;
        Ok(self.session.toggle_service(service))
    }

    pub fn back_to_certification(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Services)?;
        self.show(Screen::Certification);
        Ok(())
    }

    pub fn continue_to_submission(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Services)?;
        if self.session.selected_services.is_empty() {
            warn!("no services selected");
            return Err(FlowError::NoServicesSelected);
        }
        self.show(Screen::Submission);
        Ok(())
    }

    // ─── Submission ──────────────────────────────────────────────────

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.session.terms_accepted = accepted;
    }

    /// Submit button enabled state.
    pub fn can_submit(&self) -> bool {
        self.session.terms_accepted
    }

    pub fn signature_mut(&mut self) -> &mut SignaturePad {
        &mut self.signature
    }

    pub fn back_to_services(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Submission)?;
        self.show(Screen::Services);
        Ok(())
    }

    /// Send the application and start the validation sequence.
    pub fn submit_application(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Submission)?;
        if !self.session.terms_accepted {
            warn!("terms not accepted");
            return Err(FlowError::TermsNotAccepted);
        }
        let summary = self.submission_summary();
        info!(
            fields = summary.fields,
            documents = summary.documents,
            services = summary.services,
            signed = self.signature.is_signed(),
            "application submitted"
        );
        self.show(Screen::Validation);
        self.start_validation();
        Ok(())
    }

    fn start_validation(&mut self) {
        self.validation.restart();
        self.schedule(self.timings.validation_start_ms, FlowTask::ValidationStage(0));
    }

    // ─── Validation ──────────────────────────────────────────────────

    /// Back to the submission screen; the running sequence is dropped.
    pub fn retry_validation(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Validation)?;
        self.show(Screen::Submission);
        Ok(())
    }

    pub fn go_to_login(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Validation)?;
        self.show(Screen::Login);
        Ok(())
    }

    // ─── Dashboard ───────────────────────────────────────────────────

    pub fn select_view(&mut self, view: DashboardView) -> Result<(), FlowError> {
        self.expect_screen(Screen::Dashboard)?;
        self.dashboard.select_view(view);
        Ok(())
    }

    pub fn select_bottom_nav(&mut self, nav: BottomNav) -> Result<(), FlowError> {
        self.expect_screen(Screen::Dashboard)?;
        self.dashboard.select_bottom(nav);
        Ok(())
    }

    pub fn toggle_side_menu(&mut self) {
        self.dashboard.toggle_side_menu();
    }

    /// A click that hit none of the open overlays.
    pub fn click_outside(&mut self) {
        self.dashboard.click_outside_menu();
        self.dashboard.search_open = false;
        self.session.notifications.close();
    }

    pub fn zoom_in(&mut self) {
        if let Some(map) = self.dashboard.map.as_mut() {
            map.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(map) = self.dashboard.map.as_mut() {
            map.zoom_out();
        }
    }

    pub fn set_analytics_panel(&mut self, open: bool) {
        if let Some(map) = self.dashboard.map.as_mut() {
            map.analytics_open = open;
        }
    }

    pub fn set_chart_range(&mut self, range: DateRange) {
        if let Some(chart) = self.dashboard.chart.as_mut() {
            chart.set_range(range);
        }
    }

    pub fn set_chart_filter(&mut self, filter: DiseaseFilter) {
        if let Some(chart) = self.dashboard.chart.as_mut() {
            chart.set_filter(filter);
        }
    }

    pub fn open_notifications(&mut self) {
        self.session.notifications.open();
    }

    pub fn close_notifications(&mut self) {
        self.session.notifications.close();
    }

    pub fn open_search(&mut self) {
        self.dashboard.search_open = true;
    }

    pub fn close_search(&mut self) {
        self.dashboard.search_open = false;
    }

    /// Confirmed logout: drop the user and return to the login screen.
    pub fn logout(&mut self) {
        info!("logout");
        self.session.current_user = None;
        self.login = LoginState::default();
        self.session.notifications.close();
        self.dashboard.search_open = false;
        self.dashboard.side_menu_open = false;
        self.show(Screen::Login);
    }

    // ─── Chat ────────────────────────────────────────────────────────

    pub fn open_chat(&mut self, conversation: ConversationId) -> Result<(), FlowError> {
        self.expect_screen(Screen::Dashboard)?;
        self.show(Screen::Chat);
        self.session.chat.open(conversation);
        Ok(())
    }

    pub fn back_to_engagement(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Chat)?;
        self.show(Screen::Dashboard);
        Ok(())
    }

    /// Append a message to the open conversation and queue the canned reply.
    /// Returns false when nothing was sent (blank text or no conversation).
    pub fn send_message(&mut self, text: &str) -> Result<bool, FlowError> {
        self.expect_screen(Screen::Chat)?;
        let Some(conversation) = self.session.chat.active() else {
            return Ok(false);
        };
        if self
            .session
            .chat
            .push_local(conversation, text, Local::now())
            .is_none()
        {
            return Ok(false);
        }
        self.schedule(self.timings.chat_reply_ms, FlowTask::ChatReply(conversation));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Sender;
    use crate::validation::ValidationOutcome;

    fn flow() -> Flow {
        Flow::new(&AppConfig::default())
    }

    fn at(flow: &Flow, screen: Screen) -> bool {
        flow.router().active_screens() == vec![screen]
    }

    #[test]
    fn splash_moves_to_login_after_three_seconds() {
        let mut f = flow();
        assert!(at(&f, Screen::Splash));
        f.tick(2999);
        assert!(at(&f, Screen::Splash));
        f.tick(3000);
        assert!(at(&f, Screen::Login));
    }

    #[test]
    fn skipping_splash_cancels_its_timer() {
        let mut f = flow();
        f.skip_splash();
        f.go_to_signup().unwrap();
        f.tick(10_000);
        assert!(at(&f, Screen::Signup));
    }

    #[test]
    fn unknown_screen_is_ignored() {
        let mut f = flow();
        f.show_named("map");
        assert!(at(&f, Screen::Splash));
        f.show_named("services");
        assert!(at(&f, Screen::Services));
    }

    #[test]
    fn valid_login_reaches_dashboard_after_delay() {
        let mut f = flow();
        f.skip_splash();
        f.submit_login("jdoe", "123456").unwrap();
        assert!(f.login().loading);
        f.tick(1499);
        assert!(at(&f, Screen::Login));
        f.tick(1500);
        assert!(at(&f, Screen::Dashboard));
        assert!(!f.login().loading);
        assert_eq!(
            f.session().current_user.as_ref().map(|u| u.name.as_str()),
            Some("John Doe")
        );
        assert!(f.dashboard().map.is_some());
        assert!(f.dashboard().chart.is_some());
    }

    #[test]
    fn bad_credentials_stay_on_login() {
        let mut f = flow();
        f.skip_splash();
        assert_eq!(f.submit_login("", "123456"), Err(FlowError::InvalidCredentials));
        assert_eq!(f.submit_login("jdoe", "12345"), Err(FlowError::InvalidCredentials));
        assert_eq!(f.submit_login("jdoe", "1234567"), Err(FlowError::InvalidCredentials));
        f.tick(60_000);
        assert!(at(&f, Screen::Login));
        assert!(!f.login().loading);
    }

    #[test]
    fn stale_login_never_completes_after_leaving() {
        let mut f = flow();
        f.skip_splash();
        f.submit_login("jdoe", "123456").unwrap();
        f.go_to_signup().unwrap();
        f.tick(5000);
        assert!(at(&f, Screen::Signup));
        assert!(!f.session().is_authenticated());

        f.back_to_login().unwrap();
        assert!(!f.login().loading);
        f.submit_login("jdoe", "123456").unwrap();
        f.tick(6500);
        assert!(at(&f, Screen::Dashboard));
    }

    #[test]
    fn leaving_during_capture_resets_processing() {
        let mut f = flow();
        f.show(Screen::Certification);
        for step in [
            CertStep::IdentityDocument,
            CertStep::ProofOfAddress,
            CertStep::MedicalRecord,
        ] {
            let from = f.cert_step();
            f.cert_next(from, from.key() + 1).unwrap();
            assert_ne!(f.cert_step(), step);
        }
        f.capture_biometric(BiometricModality::Face).unwrap();
        f.continue_to_services().unwrap();
        f.back_to_certification().unwrap();
        assert_eq!(
            f.session().certification.capture_state(BiometricModality::Face),
            CaptureState::Idle
        );
    }

    #[test]
    fn login_biometric_scans_then_resets() {
        let mut f = flow();
        f.skip_splash();
        f.login_biometric().unwrap();
        assert_eq!(f.login().biometric, LoginBiometric::Scanning);
        f.login_biometric().unwrap();
        f.tick(2000);
        assert_eq!(f.login().biometric, LoginBiometric::Verified);
        f.tick(3999);
        assert_eq!(f.login().biometric, LoginBiometric::Verified);
        f.tick(4000);
        assert_eq!(f.login().biometric, LoginBiometric::Idle);
    }

    #[test]
    fn qr_scanner_toggles() {
        let mut f = flow();
        f.open_qr_scanner();
        assert!(f.login().qr_scanner_open);
        f.cancel_qr_scanner();
        assert!(!f.login().qr_scanner_open);
    }

    #[test]
    fn role_selection_opens_personal_form_on_first_step() {
        let mut f = flow();
        f.show(Screen::Signup);
        f.select_role(Role::Researcher).unwrap();
        assert_eq!(f.session().selected_role, Some(Role::Researcher));
        f.tick(999);
        assert!(at(&f, Screen::Signup));
        f.tick(1000);
        assert!(at(&f, Screen::PersonalData));
        assert_eq!(f.personal_step(), PersonalStep::Identity);
    }

    #[test]
    fn reaching_review_hands_over_to_certification() {
        let mut f = flow();
        f.show(Screen::PersonalData);
        f.set_field("full_name", "Amina Otieno").unwrap();
        f.personal_next(PersonalStep::Identity, 2).unwrap();
        f.personal_prev(PersonalStep::Contact, 1).unwrap();
        f.personal_next(PersonalStep::Identity, 2).unwrap();
        assert_eq!(f.pending_tasks_for(Screen::PersonalData), 0);
        f.personal_next(PersonalStep::Contact, 3).unwrap();
        assert_eq!(f.personal_step(), PersonalStep::Review);
        f.tick(499);
        assert!(at(&f, Screen::PersonalData));
        f.tick(500);
        assert!(at(&f, Screen::Certification));
    }

    #[test]
    fn uploads_and_biometric_walk_the_certification_wizard() {
        let mut f = flow();
        f.show(Screen::Certification);

        f.select_file(CertStep::IdentityDocument, "id.pdf", 2048).unwrap();
        f.tick(999);
        assert_eq!(f.cert_step(), CertStep::IdentityDocument);
        f.tick(1000);
        assert_eq!(f.cert_step(), CertStep::ProofOfAddress);

        f.select_file(CertStep::ProofOfAddress, "bill.png", 1024).unwrap();
        f.tick(2000);
        f.select_file(CertStep::MedicalRecord, "record.pdf", 4096).unwrap();
        f.tick(3000);
        assert_eq!(f.cert_step(), CertStep::Biometric);
        assert_eq!(f.submission_summary().documents, 3);

        f.capture_biometric(BiometricModality::Fingerprint).unwrap();
        f.tick(4999);
        assert_eq!(
            f.session().certification.capture_state(BiometricModality::Fingerprint),
            CaptureState::Processing
        );
        f.tick(5000);
        assert_eq!(
            f.session().certification.capture_state(BiometricModality::Fingerprint),
            CaptureState::Captured
        );
        assert_eq!(f.cert_step(), CertStep::Biometric);
        f.tick(6000);
        assert_eq!(f.cert_step(), CertStep::Done);
    }

    #[test]
    fn upload_on_inactive_step_is_rejected() {
        let mut f = flow();
        f.show(Screen::Certification);
        assert_eq!(
            f.select_file(CertStep::MedicalRecord, "x.pdf", 1),
            Err(FlowError::StepNotActive(3))
        );
        assert_eq!(
            f.select_file(CertStep::Biometric, "x.pdf", 1),
            Err(FlowError::UnknownStep(4))
        );
    }

    #[test]
    fn leaving_certification_cancels_pending_advance() {
        let mut f = flow();
        f.show(Screen::Certification);
        f.select_file(CertStep::IdentityDocument, "id.pdf", 10).unwrap();
        f.back_to_personal().unwrap();
        f.tick(5000);
        assert_eq!(f.cert_step(), CertStep::IdentityDocument);
    }

    #[test]
    fn services_require_a_selection() {
        let mut f = flow();
        f.show(Screen::Services);
        assert_eq!(f.continue_to_submission(), Err(FlowError::NoServicesSelected));
        assert!(f.toggle_service("pharmacy").unwrap());
        f.continue_to_submission().unwrap();
        assert!(at(&f, Screen::Submission));
    }

    #[test]
    fn submission_requires_terms() {
        let mut f = flow();
        f.show(Screen::Submission);
        assert!(!f.can_submit());
        assert_eq!(f.submit_application(), Err(FlowError::TermsNotAccepted));
        f.set_terms_accepted(true);
        f.submit_application().unwrap();
        assert!(at(&f, Screen::Validation));
    }

    #[test]
    fn validation_runs_all_stages_then_succeeds() {
        let mut f = flow();
        f.show(Screen::Submission);
        f.set_terms_accepted(true);
        f.submit_application().unwrap();

        f.tick(999);
        assert_eq!(f.validation().stage_index(), None);
        f.tick(1000);
        assert_eq!(f.validation().stage_index(), Some(0));
        f.tick(3000);
        assert_eq!(f.validation().stage_index(), Some(1));
        f.tick(7000);
        assert_eq!(f.validation().stage_index(), Some(3));
        assert_eq!(f.validation().outcome(), ValidationOutcome::Pending);
        f.tick(8000);
        assert_eq!(f.validation().outcome(), ValidationOutcome::Success);
        assert_eq!(f.validation().visited(), &[0, 1, 2, 3]);
        assert_eq!(f.pending_tasks(), 0);
    }

    #[test]
    fn coarse_tick_fires_chained_stages_without_drift() {
        let mut f = flow();
        f.show(Screen::Submission);
        f.set_terms_accepted(true);
        f.submit_application().unwrap();
        f.tick(8000);
        assert_eq!(f.validation().visited(), &[0, 1, 2, 3]);
        assert_eq!(f.validation().outcome(), ValidationOutcome::Success);
    }

    #[test]
    fn retry_drops_running_validation() {
        let mut f = flow();
        f.show(Screen::Submission);
        f.set_terms_accepted(true);
        f.submit_application().unwrap();
        f.tick(1000);
        f.retry_validation().unwrap();
        assert!(at(&f, Screen::Submission));
        assert_eq!(f.pending_tasks(), 0);

        f.submit_application().unwrap();
        f.tick(2000);
        assert_eq!(f.validation().visited(), &[0]);
        assert_eq!(f.validation().runs_started(), 2);
    }

    #[test]
    fn chat_reply_arrives_after_delay() {
        let mut f = flow();
        f.show(Screen::Dashboard);
        f.open_chat(ConversationId::DrSmith).unwrap();
        assert_eq!(f.session().chat.header(), "Dr. Smith");
        assert!(f.send_message("Hello doctor").unwrap());
        assert!(!f.send_message("   ").unwrap());

        let log = f.session().chat.transcript(ConversationId::DrSmith);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sender, Sender::Local);

        f.tick(999);
        assert_eq!(f.session().chat.transcript(ConversationId::DrSmith).len(), 1);
        f.tick(1000);
        let log = f.session().chat.transcript(ConversationId::DrSmith);
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].sender, Sender::Remote);
    }

    #[test]
    fn notifications_read_on_open() {
        let mut f = flow();
        assert_eq!(f.session().notifications.unread_count(), 3);
        f.open_notifications();
        assert_eq!(f.session().notifications.unread_count(), 0);
        f.click_outside();
        assert!(!f.session().notifications.is_open());
    }

    #[test]
    fn logout_clears_user() {
        let mut f = flow();
        f.skip_splash();
        f.submit_login("jdoe", "123456").unwrap();
        f.tick(1500);
        f.toggle_side_menu();
        f.logout();
        assert!(at(&f, Screen::Login));
        assert!(!f.session().is_authenticated());
        assert!(!f.dashboard().side_menu_open);
    }

    #[test]
    fn dashboard_controls_are_noops_before_dashboard() {
        let mut f = flow();
        f.zoom_in();
        f.set_chart_range(DateRange::SevenDays);
        assert!(f.dashboard().map.is_none());
        assert!(f.dashboard().chart.is_none());
        assert!(f.select_view(DashboardView::Map).is_err());
    }

    #[test]
    fn actions_from_the_wrong_screen_are_rejected() {
        let mut f = flow();
        assert_eq!(
            f.toggle_service("pharmacy"),
            Err(FlowError::NotOnScreen {
                expected: Screen::Services,
                actual: Screen::Splash,
            })
        );
        assert!(f.session().selected_services.is_empty());

        f.skip_splash();
        assert_eq!(
            f.open_chat(ConversationId::DrSmith),
            Err(FlowError::NotOnScreen {
                expected: Screen::Dashboard,
                actual: Screen::Login,
            })
        );
        assert_eq!(f.current_screen(), Screen::Login);
        assert_eq!(f.session().chat.active(), None);
    }
}
