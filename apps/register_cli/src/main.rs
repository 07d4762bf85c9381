use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    decor::PasswordVisibility, Dispatched, HttpRegistrationApi, PageEvent, RegistrationApi,
    RegistrationPage, SubmissionOutcome, WorkflowState,
};
use shared::domain::RegistrationDraft;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings};
use terminal::{keystroke_event, parse_line, ArgsForm, Command, TerminalView};

type TerminalPage<W> = RegistrationPage<ArgsForm, TerminalView<W>>;

#[derive(Parser, Debug)]
#[command(about = "Register an account, confirming with a one-time passcode")]
struct Args {
    #[arg(long, default_value = "register.toml")]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    username: String,
    #[arg(long, default_value = "")]
    referrer: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    coupon_code: String,
    #[arg(long, default_value = "")]
    package_type: String,
    #[arg(long)]
    accept_terms: bool,
    /// Send the entered passcode with the registration request.
    #[arg(long)]
    send_otp_code: bool,
    #[arg(long)]
    show_password: bool,
}

impl Args {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(server_url) = &self.server_url {
            settings.server_url = server_url.clone();
        }
        if self.send_otp_code {
            settings.workflow.send_otp_code = true;
        }
    }

    fn draft(&self) -> RegistrationDraft {
        RegistrationDraft {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            referrer: self.referrer.clone(),
            country: self.country.clone(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            coupon_code: self.coupon_code.clone(),
            package_type: self.package_type.clone(),
            terms_accepted: self.accept_terms,
        }
    }
}

fn build_api(settings: &Settings) -> Result<Arc<dyn RegistrationApi>> {
    let api = match settings.request_timeout_secs {
        Some(secs) => HttpRegistrationApi::with_timeout(
            &settings.server_url,
            Duration::from_secs(secs),
        )?,
        None => HttpRegistrationApi::new(&settings.server_url)
            .with_context(|| format!("invalid server url '{}'", settings.server_url))?,
    };
    info!(endpoint = %api.endpoint(), "registration endpoint configured");
    Ok(Arc::new(api))
}

fn print_summary(draft: &RegistrationDraft, visibility: PasswordVisibility) {
    println!("Registering '{}' <{}>", draft.username, draft.email);
    println!("  name:     {}", draft.full_name);
    println!("  country:  {}", draft.country);
    println!("  phone:    {}", draft.phone);
    println!("  package:  {}", draft.package_type);
    println!("  password: {}", visibility.render(&draft.password));
    println!("  terms:    {}", if draft.terms_accepted { "accepted" } else { "not accepted" });
}

/// What the input loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Registered,
    Quit,
}

async fn confirm<W: io::Write>(page: &mut TerminalPage<W>) -> Flow {
    match page.dispatch(PageEvent::ConfirmCode).await {
        Dispatched::Submission(SubmissionOutcome::Registered { .. }) => Flow::Registered,
        _ => Flow::Continue,
    }
}

async fn handle<W: io::Write>(page: &mut TerminalPage<W>, command: Command) -> Flow {
    match command {
        Command::Quit => Flow::Quit,
        Command::Retry => {
            page.dispatch(PageEvent::SubmitForm).await;
            Flow::Continue
        }
        Command::Back => {
            page.dispatch(PageEvent::Back).await;
            Flow::Continue
        }
        Command::Resend => {
            page.dispatch(PageEvent::Resend).await;
            Flow::Continue
        }
        Command::Submit => confirm(page).await,
        Command::Keys(keys) => {
            for key in keys {
                let focused = page.workflow().focused_cell().unwrap_or(0);
                page.dispatch(keystroke_event(key, focused)).await;
            }
            if page.state() == WorkflowState::Editing && page.workflow().code().is_complete() {
                confirm(page).await
            } else {
                Flow::Continue
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    args.apply_overrides(&mut settings);

    let api = build_api(&settings)?;
    let draft = args.draft();
    let mut visibility = PasswordVisibility::default();
    if args.show_password {
        visibility.toggle();
    }
    print_summary(&draft, visibility);

    let mut page = RegistrationPage::new(
        ArgsForm::new(draft),
        TerminalView::new(io::stdout()),
        api,
        settings.workflow,
    );
    page.dispatch(PageEvent::SubmitForm).await;
    println!("{}", page.workflow().view().row());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match handle(&mut page, parse_line(&line)).await {
            Flow::Quit => break,
            Flow::Registered => {
                if let Some(destination) = page.workflow().view().navigated() {
                    info!(destination, "registration complete");
                }
                return Ok(());
            }
            Flow::Continue => {}
        }
        match page.state() {
            WorkflowState::Editing => println!("{}", page.workflow().view().row()),
            _ => println!("Type ':retry' to enter a code again or ':quit' to exit."),
        }
    }

    bail!("registration was not completed")
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
