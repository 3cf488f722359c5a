//! Terminal rendering of page views and toasts.

use colored::Colorize;
use labfinder_application::View;
use labfinder_application::pages::{
    AboutView, BookingsView, DialogTab, HomeView, ProfileFormView, ResultsView, SignInDialog,
    bookings,
};
use labfinder_core::navigation::Route;
use labfinder_core::notification::Toast;
use labfinder_core::search::{DistanceFilter, Lab, SortOption};
use labfinder_core::user::ValidationErrors;
use strum::IntoEnumIterator;

pub fn view(view: &View, route: &Route) {
    println!();
    println!("{}", route.path().bright_black());
    match view {
        View::Blank => {}
        View::Home(home_view) => home(home_view),
        View::About(about_view) => about(about_view),
        View::Profile(form_view) => profile_form(form_view),
        View::Results(results_view) => results(results_view),
        View::Bookings(bookings_view) => bookings_page(bookings_view),
    }
}

pub fn toasts(toasts: &[Toast]) {
    for toast in toasts {
        if toast.is_error() {
            println!("{} {}", format!("✗ {}", toast.title).red().bold(), toast.description.red());
        } else {
            println!("{} {}", format!("✓ {}", toast.title).green().bold(), toast.description);
        }
    }
}

fn home(view: &HomeView) {
    println!("{}", view.brand.bright_magenta().bold());
    match &view.greeting {
        Some(name) => println!("Welcome back, {}!", name.bold()),
        None => println!("{}", "Find accredited labs near you and compare prices.".bright_black()),
    }
    println!();
    println!("{}", "Search".bold());
    println!("  {:<10} {}", "test".bright_black(), field(&view.form.test));
    println!("  {:<10} {}", "location".bright_black(), field(&view.form.location));
    println!();

    let stats = view
        .trust_stats
        .iter()
        .map(|stat| format!("{} {}", stat.value.bold(), stat.label))
        .collect::<Vec<_>>()
        .join("  ·  ");
    println!("{}", stats);

    if let Some(dialog) = &view.dialog {
        println!();
        sign_in_dialog(dialog);
    }
}

fn field(value: &str) -> String {
    if value.is_empty() {
        "—".bright_black().to_string()
    } else {
        value.to_string()
    }
}

pub fn sign_in_dialog(dialog: &SignInDialog) {
    let title = match dialog.tab {
        DialogTab::SignIn => "Sign in to continue",
        DialogTab::SignUp => "Create an account to continue",
    };
    println!("{}", title.bright_yellow().bold());
    println!(
        "{}",
        "Type `signin` or `signup`, or `close` to dismiss.".bright_black()
    );
    validation_errors(&dialog.errors);
}

fn about(view: &AboutView) {
    println!("{}", view.title.bright_magenta().bold());
    for section in [&view.mission, &view.what_we_do] {
        println!();
        println!("{}", section.heading.bold());
        println!("{}", section.body);
    }
    println!();
    println!("{}", "Our Values".bold());
    for value in view.values {
        println!("  {} {}", format!("{}:", value.heading).cyan(), value.body);
    }
    println!();
    for testimonial in view.testimonials {
        println!("  “{}”", testimonial.quote.italic());
        println!(
            "    {}",
            format!("— {}, {}", testimonial.author, testimonial.role).bright_black()
        );
    }
}

fn profile_form(view: &ProfileFormView) {
    println!("{}", view.mode.title().bright_magenta().bold());
    println!("{}", view.mode.description().bright_black());
    let age = view.form.age.map(|a| a.to_string()).unwrap_or_default();
    println!("  {:<8} {}", "name".bright_black(), field(&view.form.name));
    println!("  {:<8} {}", "age".bright_black(), field(&age));
    println!("  {:<8} {}", "email".bright_black(), field(&view.form.email));
    println!("  {:<8} {}", "phone".bright_black(), field(&view.form.phone));
    validation_errors(&view.errors);
    println!("{}", "Type `save` to fill in and submit the form.".bright_black());
}

fn validation_errors(errors: &ValidationErrors) {
    for error in errors.iter() {
        println!("  {} {}", format!("{}:", error.field).red(), error.message.red());
    }
}

pub fn results(view: &ResultsView) {
    println!("{}", "Laboratories near you".bright_magenta().bold());
    println!("Showing results near {}", view.location.bold());

    let Some(labs) = &view.labs else {
        println!("{}", "Loading labs...".bright_black());
        return;
    };

    let filters = DistanceFilter::CHOICES
        .iter()
        .map(|choice| highlight(&choice.label(), *choice == view.filter))
        .collect::<Vec<_>>()
        .join(" | ");
    let sorts = SortOption::iter()
        .map(|option| highlight(option.label(), option == view.sort))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{} {}", "Filter:".bright_black(), filters);
    println!("{} {}", "Sort:".bright_black(), sorts);
    println!();

    if let Some(message) = view.empty_message() {
        println!("{}", message.yellow());
        return;
    }
    for lab in labs {
        lab_card(lab, &view.test);
    }
}

fn highlight(label: &str, selected: bool) -> String {
    if selected {
        label.cyan().bold().to_string()
    } else {
        label.bright_black().to_string()
    }
}

fn lab_card(lab: &Lab, test: &str) {
    let mut badges = Vec::new();
    if lab.is_verified() {
        badges.push("Verified".green().to_string());
    }
    if lab.is_top_rated() {
        badges.push("Top Rated".yellow().to_string());
    }
    if lab.is_best_value() {
        badges.push("Best Value".green().to_string());
    }

    println!(
        "{} {} {}",
        format!("[{}]", lab.id).bright_black(),
        lab.name.bold(),
        badges.join(" ")
    );
    println!("  {}", lab.address);
    println!(
        "  ★ {:.1} ({})  ·  {} km away  ·  {} for {}",
        lab.rating,
        lab.review_count,
        lab.distance,
        format!("${}", lab.test_price).green().bold(),
        test
    );
    println!("  {}  ·  {}", lab.opening_hours, lab.phone);
    if !lab.accreditations.is_empty() {
        println!("  {}", lab.accreditations.join(", ").bright_black());
    }
    println!();
}

fn bookings_page(view: &BookingsView) {
    println!("{}", "My Bookings".bright_magenta().bold());
    println!(
        "{}",
        format!("{} · {} · {}", view.profile.name, view.profile.email, view.profile.phone)
            .bright_black()
    );
    println!();
    println!("{}", bookings::EMPTY_TITLE.bold());
    println!("{}", bookings::EMPTY_MESSAGE);
}
