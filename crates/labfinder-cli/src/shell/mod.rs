//! Interactive shell: a rustyline REPL over [`LabFinderApp`].
//!
//! Each command acts on the app, then the current page is rendered along
//! with any toasts it raised. A results page that is still loading is
//! loaded right away; Ctrl-C during the wait cancels it.

mod helper;

use std::future::Future;

use anyhow::Result;
use colored::Colorize;
use labfinder_application::pages::{DialogTab, ProfileFormMode};
use labfinder_application::{LabFinderApp, View};
use labfinder_core::LabFinderError;
use labfinder_core::navigation::Route;
use labfinder_core::search::{DistanceFilter, SortOption};
use labfinder_core::user::{ProfileForm, SignInForm, SignUpForm, parse_age};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio_util::sync::CancellationToken;

use crate::render;
use helper::{COMMANDS, CliHelper};

type Shell = Editor<CliHelper, DefaultHistory>;

pub async fn run(mut app: LabFinderApp) -> Result<()> {
    let mut rl: Shell = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    let banner = format!("=== {} ===", app.config().brand_name);
    println!("{}", banner.bright_magenta().bold());
    println!(
        "{}",
        "Type 'help' for commands or 'quit' to exit.".bright_black()
    );
    show(&mut app).await;

    loop {
        let readline = rl.readline(&format!("{} > ", app.current_route().path()));

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let (command, argument) = match trimmed.split_once(' ') {
                    Some((command, argument)) => (command, argument.trim()),
                    None => (trimmed, ""),
                };

                let outcome = dispatch(&mut app, &mut rl, command, argument).await;
                if let Err(e) = &outcome {
                    report(e);
                }
                if redraws(&outcome) {
                    show(&mut app).await;
                }
                render::toasts(&app.drain_toasts());
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Runs one command. Returns whether the page should be redrawn.
async fn dispatch(
    app: &mut LabFinderApp,
    rl: &mut Shell,
    command: &str,
    argument: &str,
) -> Result<bool> {
    match command {
        "help" => {
            for (name, description) in COMMANDS {
                println!("  {:<10} {}", name.bright_cyan(), description.bright_black());
            }
            return Ok(false);
        }
        "home" => app.navigate(Route::Home),
        "about" => app.navigate(Route::About),
        "bookings" => app.navigate(Route::Bookings),
        "profile" => app.navigate(Route::Profile),
        "edit" => app.navigate(Route::ProfileEdit),
        "go" => app.navigate(argument.parse::<Route>()?),
        "back" => {
            if !app.back() {
                println!("{}", "Already at the first page.".bright_black());
                return Ok(false);
            }
        }
        "test" => app.search_form_mut().test = argument.to_string(),
        "location" => app.search_form_mut().location = argument.to_string(),
        "detect" => {
            let token = app.view_token();
            interruptible(token, app.detect_location()).await?;
        }
        "find" => app.submit_search()?,
        "signin" => {
            if app.dialog().is_none() {
                app.open_sign_in(app.current_route().clone());
            }
            app.switch_dialog_tab(DialogTab::SignIn);
            let form = SignInForm {
                email: ask(rl, "email", "")?,
                password: ask(rl, "password", "")?,
            };
            let token = app.view_token();
            interruptible(token, app.sign_in(form)).await?;
        }
        "signup" => {
            if app.dialog().is_none() {
                app.open_sign_in(app.current_route().clone());
            }
            app.switch_dialog_tab(DialogTab::SignUp);
            let form = SignUpForm {
                profile: ask_profile(rl, &ProfileForm::default())?,
                password: ask(rl, "password", "")?,
            };
            let token = app.view_token();
            interruptible(token, app.sign_up(form)).await?;
        }
        "close" => app.close_sign_in(),
        "save" => {
            let View::Profile(view) = app.render() else {
                println!("{}", "Open `profile` or `edit` first.".yellow());
                return Ok(false);
            };
            let form = ask_profile(rl, &view.form)?;
            let token = app.view_token();
            match view.mode {
                ProfileFormMode::Create => interruptible(token, app.create_profile(form)).await?,
                ProfileFormMode::Edit => interruptible(token, app.update_profile(form)).await?,
            }
        }
        "sort" => app.sort_results(argument.parse::<SortOption>()?),
        "within" => app.filter_results(argument.parse::<DistanceFilter>()?),
        "book" => {
            app.book(argument)?;
            return Ok(false);
        }
        "logout" => app.logout()?,
        other => {
            println!("{}", format!("Unknown command: {}", other).bright_black());
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether the page is drawn again after a command.
///
/// Rejected form input is part of the page (field messages sit under the
/// form or dialog), so a validation failure redraws like a success does.
fn redraws(outcome: &Result<bool>) -> bool {
    match outcome {
        Ok(redraw) => *redraw,
        Err(e) => e
            .downcast_ref::<LabFinderError>()
            .is_some_and(LabFinderError::is_validation),
    }
}

/// Renders the current page, loading results first if they are pending.
async fn show(app: &mut LabFinderApp) {
    let view = app.render();
    render::view(&view, app.current_route());
    // Home draws the dialog itself
    if !matches!(view, View::Home(_)) {
        if let Some(dialog) = app.dialog() {
            render::sign_in_dialog(dialog);
        }
    }

    if matches!(&view, View::Results(results) if results.is_loading()) {
        let token = app.view_token();
        match interruptible(token, app.load_results()).await {
            Ok(()) => {
                if let View::Results(results) = app.render() {
                    render::results(&results);
                }
            }
            Err(e) => report(&anyhow::Error::from(e)),
        }
    }
    render::toasts(&app.drain_toasts());
}

/// Awaits `work`, cancelling `token` if Ctrl-C arrives first.
async fn interruptible<T>(token: CancellationToken, work: impl Future<Output = T>) -> T {
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    let output = work.await;
    watcher.abort();
    output
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<LabFinderError>() {
        // Field messages are drawn with the page, see `redraws`
        Some(e) if e.is_validation() => {}
        Some(e) if e.is_cancelled() => println!("{}", "Cancelled.".yellow()),
        _ => eprintln!("{}", format!("Error: {:#}", error).red()),
    }
}

fn ask(rl: &mut Shell, label: &str, initial: &str) -> Result<String> {
    let line = rl.readline_with_initial(&format!("  {}: ", label), (initial, ""))?;
    Ok(line.trim().to_string())
}

fn ask_profile(rl: &mut Shell, current: &ProfileForm) -> Result<ProfileForm> {
    let age = current.age.map(|a| a.to_string()).unwrap_or_default();
    Ok(ProfileForm {
        name: ask(rl, "name", &current.name)?,
        age: parse_age(&ask(rl, "age", &age)?),
        email: ask(rl, "email", &current.email)?,
        phone: ask(rl, "phone", &current.phone)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use labfinder_core::user::ValidationErrors;

    fn rejected() -> anyhow::Error {
        let mut errors = ValidationErrors::default();
        errors.push("password", "Password must be at least 6 characters");
        LabFinderError::from(errors).into()
    }

    #[test]
    fn test_rejected_form_redraws_page() {
        assert!(redraws(&Err(rejected())));
    }

    #[test]
    fn test_redraw_follows_command_result() {
        assert!(redraws(&Ok(true)));
        assert!(!redraws(&Ok(false)));
    }

    #[test]
    fn test_other_errors_do_not_redraw() {
        assert!(!redraws(&Err(LabFinderError::cancelled("results").into())));
        assert!(!redraws(&Err(LabFinderError::not_found("lab", "lab-9").into())));
        assert!(!redraws(&Err(anyhow::anyhow!("readline closed"))));
    }
}
