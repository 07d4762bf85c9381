use std::sync::Mutex;

use async_trait::async_trait;
use shared::{
    domain::{FormField, RegistrationDraft, OTP_LENGTH},
    protocol::{RegisterRequest, RegisterResponse},
};

use crate::{
    error::RegistrationError,
    transport::RegistrationApi,
    view::{FormView, Notice, OtpView, SubmitControl},
};

pub const SUBMIT_LABEL: &str = "Create Account";

pub fn sample_draft() -> RegistrationDraft {
    RegistrationDraft {
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        username: "ada".into(),
        referrer: "grace".into(),
        country: "UK".into(),
        password: "engine42".into(),
        phone: "+441234567".into(),
        coupon_code: "WELCOME".into(),
        package_type: "premium".into(),
        terms_accepted: true,
    }
}

pub struct StaticForm {
    pub draft: RegistrationDraft,
}

impl StaticForm {
    pub fn new(draft: RegistrationDraft) -> Self {
        Self { draft }
    }

    pub fn sample() -> Self {
        Self::new(sample_draft())
    }
}

impl FormView for StaticForm {
    fn text_value(&self, field: FormField) -> String {
        self.draft.text(field).unwrap_or_default().to_string()
    }

    fn is_checked(&self, field: FormField) -> bool {
        field == FormField::Terms && self.draft.terms_accepted
    }
}

/// Records the last rendered state plus every notice and navigation.
pub struct RecordingView {
    pub modal_visible: bool,
    pub cells: [Option<char>; OTP_LENGTH],
    pub focused: Option<usize>,
    pub focus_moves: usize,
    pub control: SubmitControl,
    pub control_history: Vec<SubmitControl>,
    pub back_enabled: bool,
    pub notices: Vec<Notice>,
    pub navigations: Vec<String>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            modal_visible: false,
            cells: [None; OTP_LENGTH],
            focused: None,
            focus_moves: 0,
            control: SubmitControl::enabled(SUBMIT_LABEL),
            control_history: Vec::new(),
            back_enabled: true,
            notices: Vec::new(),
            navigations: Vec::new(),
        }
    }
}

impl OtpView for RecordingView {
    fn set_modal_visible(&mut self, visible: bool) {
        self.modal_visible = visible;
    }

    fn set_cell(&mut self, index: usize, value: Option<char>) {
        self.cells[index] = value;
    }

    fn focus_cell(&mut self, index: usize) {
        self.focused = Some(index);
        self.focus_moves += 1;
    }

    fn submit_control(&self) -> SubmitControl {
        self.control.clone()
    }

    fn set_submit_control(&mut self, control: SubmitControl) {
        self.control_history.push(control.clone());
        self.control = control;
    }

    fn set_back_enabled(&mut self, enabled: bool) {
        self.back_enabled = enabled;
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn navigate(&mut self, destination: &str) {
        self.navigations.push(destination.to_string());
    }
}

/// Answers every call with the same scripted result and keeps the requests.
pub struct ScriptedApi {
    reply: Result<RegisterResponse, RegistrationError>,
    calls: Mutex<Vec<RegisterRequest>>,
}

impl ScriptedApi {
    pub fn replying(reply: Result<RegisterResponse, RegistrationError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::replying(Ok(RegisterResponse::default()))
    }

    pub fn calls(&self) -> Vec<RegisterRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RegistrationApi for ScriptedApi {
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, RegistrationError> {
        self.calls.lock().expect("calls lock").push(request.clone());
        self.reply.clone()
    }
}

/// Never answers, standing in for a server that hangs past the caller's patience.
pub struct StalledApi;

#[async_trait]
impl RegistrationApi for StalledApi {
    async fn register(
        &self,
        _request: &RegisterRequest,
    ) -> Result<RegisterResponse, RegistrationError> {
        std::future::pending().await
    }
}
