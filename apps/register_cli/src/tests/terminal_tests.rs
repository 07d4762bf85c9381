use super::*;

#[test]
fn commands_and_keystrokes_parse() {
    assert_eq!(parse_line(" :quit "), Command::Quit);
    assert_eq!(parse_line(":resend"), Command::Resend);
    assert_eq!(parse_line(":back"), Command::Back);
    assert_eq!(parse_line(""), Command::Submit);
    assert_eq!(
        parse_line("4 2<"),
        Command::Keys(vec![
            Keystroke::Char('4'),
            Keystroke::Char('2'),
            Keystroke::Backspace,
        ])
    );
}

#[test]
fn keystrokes_target_the_focused_cell() {
    assert_eq!(
        keystroke_event(Keystroke::Char('9'), 3),
        PageEvent::CellInput {
            index: 3,
            value: "9".into(),
        }
    );
    assert_eq!(
        keystroke_event(Keystroke::Backspace, 0),
        PageEvent::Backspace { index: 0 }
    );
}

#[test]
fn args_form_reads_draft_values() {
    let form = ArgsForm::new(RegistrationDraft {
        email: "ada@example.com".into(),
        terms_accepted: true,
        ..RegistrationDraft::default()
    });
    assert_eq!(form.text_value(FormField::Email), "ada@example.com");
    assert_eq!(form.text_value(FormField::Phone), "");
    assert!(form.is_checked(FormField::Terms));
}

#[test]
fn view_renders_row_notices_and_navigation() {
    let mut view = TerminalView::new(Vec::new());
    view.set_cell(0, Some('4'));
    view.focus_cell(1);
    assert_eq!(view.row(), "[4]>[_][_][_][_][_]");

    view.set_submit_control(SubmitControl::busy("Processing..."));
    view.notify(&Notice::RegistrationFailed(None));
    view.navigate("login.html");
    assert_eq!(view.navigated(), Some("login.html"));

    let output = String::from_utf8(view.into_inner()).expect("utf8");
    assert_eq!(
        output,
        "Processing...\n! Registration failed\nContinue at login.html\n"
    );
}
