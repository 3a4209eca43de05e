use chrono::NaiveDate;
use clap::Parser;
use shubh_muhurat::api::{GeocodeClient, HttpBackend, MuhuratClient};
use shubh_muhurat::config::Config;
use shubh_muhurat::i18n::{Language, Localizer};
use shubh_muhurat::render::{render_result, render_suggestions};
use shubh_muhurat::repl::Repl;
use shubh_muhurat::session::Session;
use shubh_muhurat::timefmt::{today_in, ClockStyle};
use std::path::PathBuf;

/// Shubh Muhurat — daily panchang windows for any city, in English or Gujarati
///
/// Looks the city up, picks a suggestion, and prints sunrise/sunset,
/// moonrise/moonset, tithi, nakshatra, karana and yoga for the date.
///
/// Examples:
///   muhurat Ahmedabad --date 2024-05-01
///   muhurat surat --pick 2 --lang gu
///   muhurat ahm --list
///   muhurat Rajkot --24h --tz UTC --json
///   muhurat --interactive
#[derive(Parser)]
#[command(name = "muhurat", version, about, long_about = None)]
struct Cli {
    /// City name or prefix (at least 2 characters).
    #[arg(index = 1)]
    city: Option<String>,

    /// Date (YYYY-MM-DD). Defaults to today in the display timezone.
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Which suggestion to use (1-based).
    #[arg(long, short = 'p', default_value_t = 1)]
    pick: usize,

    /// Only list the city suggestions.
    #[arg(long)]
    list: bool,

    /// Label language: en or gu.
    #[arg(long, short = 'l', value_parser = parse_language)]
    lang: Option<Language>,

    /// IANA timezone for displayed times (default Asia/Kolkata).
    #[arg(long)]
    tz: Option<String>,

    /// Show times on a 24-hour clock.
    #[arg(long = "24h")]
    twenty_four_hour: bool,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Muhurat service base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file (JSON). Defaults to <config dir>/shubh-muhurat/config.json.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interactive prompt instead of a one-shot lookup.
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Debug logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("Unknown language '{}'. Use 'en' or 'gu'.", s))
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // ── Configuration ───────────────────────────────────────────

    let mut config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    apply_overrides(&mut config, &cli);

    let style = config.time_style().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let backend = HttpBackend::new(&config.base_url, config.timeout());
    let geocoder = GeocodeClient::new(backend.clone());
    let client = MuhuratClient::new(backend);
    let mut session = Session::new(config.language);

    // ── Interactive mode ────────────────────────────────────────

    if cli.interactive {
        let mut repl = Repl::new(session, &geocoder, &client, style);
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        if let Err(e) = repl.run(stdin.lock(), &mut stdout) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // ── One-shot lookup ─────────────────────────────────────────

    let Some(city) = cli.city.as_deref() else {
        eprintln!("Error: No city specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  muhurat Ahmedabad --date 2024-05-01");
        eprintln!("  muhurat surat --pick 2 --lang gu");
        eprintln!("  muhurat --interactive");
        std::process::exit(1);
    };

    let loc = Localizer::builtin(session.language());

    let suggestions = session.refresh_suggestions(&geocoder, city);
    eprint!("{}", render_suggestions(suggestions, &loc));
    if cli.list {
        return;
    }

    if let Err(e) = cli
        .pick
        .checked_sub(1)
        .ok_or(shubh_muhurat::session::SessionError::NoSuchSuggestion(0))
        .and_then(|i| session.select_suggestion(i).map(|_| ()))
    {
        eprintln!("Error: {}", loc.t(e.message_key()));
        std::process::exit(1);
    }

    let date = match &cli.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap_or_else(|e| {
            eprintln!("Error: Invalid date '{}': {}", d, e);
            std::process::exit(1);
        }),
        None => today_in(style.tz),
    };
    session.set_date(date);

    eprintln!("  {}", loc.t("loading"));
    match session.submit(&client) {
        Ok(result) if cli.json => match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Ok(result) => print!("{}", render_result(result, &loc, &style)),
        Err(e) => {
            eprintln!("Error: {}", loc.t(e.message_key()));
            std::process::exit(1);
        }
    }
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref url) = cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    if let Some(ref tz) = cli.tz {
        config.timezone = tz.clone();
    }
    if cli.twenty_four_hour {
        config.clock = ClockStyle::TwentyFourHour;
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
}
