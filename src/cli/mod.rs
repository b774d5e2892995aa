use crate::{
    core::{PlannerConfig, PlannerSession},
    render::{render_itinerary_result, render_plan_view},
    types::request::{ACTIVITY_TYPES, THEMES},
    Budget, DatePlan, ItineraryRequest, PlanRequest, Planner, PlanningStyle, PrepTime, Validator,
};
use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};

fn command() -> Command {
    Command::new("date-night")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a date night plan (and optionally a detailed itinerary) with Gemini")
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .help("Mood of the date")
                .default_value(THEMES[0]),
        )
        .arg(
            Arg::new("activity")
                .long("activity")
                .value_name("TYPE")
                .help("General type of activity")
                .default_value(ACTIVITY_TYPES[0]),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("1-5")
                .help("Budget level, 1 (tight) to 5 (splurge)")
                .value_parser(value_parser!(u8).range(1..=5))
                .default_value("2")
                .conflicts_with("budget-amount"),
        )
        .arg(
            Arg::new("budget-amount")
                .long("budget-amount")
                .value_name("AMOUNT")
                .help("Budget as an amount instead of a level")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("currency")
                .long("currency")
                .value_name("CODE")
                .help("Currency for --budget-amount")
                .default_value("USD"),
        )
        .arg(
            Arg::new("prep")
                .short('p')
                .long("prep")
                .value_name("1-5")
                .help("Prep time level, 1 (quick) to 5 (elaborate)")
                .value_parser(value_parser!(u8).range(1..=5))
                .default_value("2")
                .conflicts_with("prep-duration"),
        )
        .arg(
            Arg::new("prep-duration")
                .long("prep-duration")
                .value_name("TEXT")
                .help("Prep time as free text, e.g. \"about an hour\""),
        )
        .arg(
            Arg::new("max-hours")
                .long("max-hours")
                .value_name("HOURS")
                .help("Maximum length of the date in hours")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("STYLE")
                .help("Planning style")
                .value_parser(["spontaneous", "balanced", "scheduled"]),
        )
        .arg(
            Arg::new("constraints")
                .short('c')
                .long("constraints")
                .value_name("TEXT")
                .help("Must-haves or must-nots, e.g. \"Italian food, no cats\""),
        )
        .arg(
            Arg::new("location")
                .short('l')
                .long("location")
                .value_name("PLACE")
                .help("City or neighbourhood for venue suggestions"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Gemini model to use (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Google AI API key (or set GOOGLE_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject responses missing required plan fields")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json-mode")
                .long("json-mode")
                .help("Ask the API for application/json output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("itinerary")
                .short('i')
                .long("itinerary")
                .help("Follow up with a detailed itinerary for the generated plan")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print raw JSON results instead of Markdown")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-options")
                .long("list-options")
                .help("List the suggested themes and activity types, then exit")
                .action(ArgAction::SetTrue),
        )
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env().context("invalid environment configuration")?;

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }
    if matches.get_flag("strict") {
        config = config.with_validator(Validator::Strict);
    }

    Ok(config.with_json_mode(matches.get_flag("json-mode")))
}

fn build_request(matches: &ArgMatches, config: &PlannerConfig) -> PlanRequest {
    let budget = match matches.get_one::<f64>("budget-amount") {
        Some(amount) => Budget::Amount {
            amount: *amount,
            currency: matches
                .get_one::<String>("currency")
                .cloned()
                .unwrap_or_default(),
        },
        None => Budget::Level(matches.get_one::<u8>("budget").copied().unwrap_or(2)),
    };

    let prep_time = match matches.get_one::<String>("prep-duration") {
        Some(text) => PrepTime::Duration(text.clone()),
        None => PrepTime::Level(matches.get_one::<u8>("prep").copied().unwrap_or(2)),
    };

    let theme = matches
        .get_one::<String>("theme")
        .cloned()
        .unwrap_or_default();
    let activity = matches
        .get_one::<String>("activity")
        .cloned()
        .unwrap_or_default();
    let model = matches
        .get_one::<String>("model")
        .cloned()
        .unwrap_or_else(|| config.default_model.clone());

    let mut request = PlanRequest::new(theme, activity, budget, prep_time).with_model(model);

    if let Some(hours) = matches.get_one::<f64>("max-hours") {
        request = request.with_max_duration_hours(*hours);
    }
    if let Some(style) = matches.get_one::<String>("style") {
        let style = match style.as_str() {
            "spontaneous" => PlanningStyle::Spontaneous,
            "scheduled" => PlanningStyle::Scheduled,
            _ => PlanningStyle::Balanced,
        };
        request = request.with_planning_style(style);
    }
    if let Some(constraints) = matches.get_one::<String>("constraints") {
        request = request.with_constraints(constraints.clone());
    }
    if let Some(location) = matches.get_one::<String>("location") {
        request = request.with_location(location.clone());
    }

    request
}

/// Decide whether the follow-up itinerary call can run.
///
/// A failed plan is always an error. A plan that cannot seed an itinerary is
/// an error only when one was asked for.
fn itinerary_seed(session: &PlannerSession, wants_itinerary: bool) -> anyhow::Result<Option<DatePlan>> {
    if let Some(record) = session.plan_result().and_then(|result| result.error()) {
        error!("Plan generation failed: {}", record.message);
        bail!("plan generation failed ({:?})", record.kind);
    }
    if !wants_itinerary {
        return Ok(None);
    }

    match session.itinerary_seed() {
        Some(plan) => Ok(Some(plan)),
        None => {
            error!("The generated plan is not a JSON object and cannot seed an itinerary");
            bail!("the generated plan could not seed an itinerary")
        }
    }
}

/// CLI entry point for the date-night tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    if matches.get_flag("list-options") {
        println!("Themes:\n  {}", THEMES.join("\n  "));
        println!("Activity types:\n  {}", ACTIVITY_TYPES.join("\n  "));
        return Ok(());
    }

    let config = build_config(&matches)?;
    let request = build_request(&matches, &config);
    let as_json = matches.get_flag("json");

    info!("Using model: {}", request.model());
    info!("Base URL: {}", config.base_url);

    let planner = Planner::new(&config);
    let session = PlannerSession::new().with_plan(planner.generate_plan(&request).await);

    if as_json {
        if let Some(result) = session.plan_result() {
            println!("{}", serde_json::to_string_pretty(&result.to_value())?);
        }
    } else {
        println!("{}", render_plan_view(session.plan_view()));
    }

    let wants_itinerary = matches.get_flag("itinerary");
    if let Some(plan) = itinerary_seed(&session, wants_itinerary)? {
        let mut itinerary_request = ItineraryRequest::new(plan).with_model(request.model());
        if let Some(location) = request.location() {
            itinerary_request = itinerary_request.with_location(location);
        }

        let session = session.with_itinerary(planner.generate_itinerary(&itinerary_request).await);
        if let Some(itinerary) = session.itinerary() {
            println!();
            if as_json {
                println!("{}", serde_json::to_string_pretty(&itinerary.to_value())?);
            } else {
                println!("{}", render_itinerary_result(itinerary));
            }
            if let Some(record) = itinerary.error() {
                error!("Itinerary generation failed: {}", record.message);
                bail!("itinerary generation failed ({:?})", record.kind);
            }
        }
    }

    info!("Date night planning completed successfully");
    Ok(())
}
