use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use client_core::{RegistrationError, WorkflowSettings};
use shared::protocol::{RegisterRequest, RegisterResponse};

use super::*;

#[derive(Default)]
struct CountingApi {
    calls: AtomicUsize,
}

#[async_trait]
impl RegistrationApi for CountingApi {
    async fn register(
        &self,
        _request: &RegisterRequest,
    ) -> Result<RegisterResponse, RegistrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RegisterResponse::default())
    }
}

fn page(api: Arc<CountingApi>) -> TerminalPage<Vec<u8>> {
    let draft = RegistrationDraft {
        password: "engine42".into(),
        terms_accepted: true,
        ..RegistrationDraft::default()
    };
    RegistrationPage::new(
        ArgsForm::new(draft),
        TerminalView::new(Vec::new()),
        api,
        WorkflowSettings::default(),
    )
}

#[tokio::test]
async fn quit_stops_without_touching_the_page() {
    let api = Arc::new(CountingApi::default());
    let mut page = page(api.clone());
    page.dispatch(PageEvent::SubmitForm).await;
    handle(&mut page, parse_line("12")).await;

    assert_eq!(handle(&mut page, parse_line(":quit")).await, Flow::Quit);
    assert_eq!(page.state(), WorkflowState::Editing);
    assert_eq!(page.workflow().code().filled(), 2);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn completing_the_code_registers() {
    let api = Arc::new(CountingApi::default());
    let mut page = page(api.clone());
    page.dispatch(PageEvent::SubmitForm).await;

    assert_eq!(handle(&mut page, parse_line("123")).await, Flow::Continue);
    assert_eq!(handle(&mut page, parse_line("456")).await, Flow::Registered);
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert_eq!(page.workflow().view().navigated(), Some("login.html"));
}
