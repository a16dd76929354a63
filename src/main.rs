use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use hos_trip_log::api::fleet_dto::{NewDriverDto, NewVehicleDto};
use hos_trip_log::api::trip_dto::TripRequestDto;
use hos_trip_log::domain::duty_log::daily_summary::DailyLogSummary;
use hos_trip_log::domain::duty_log::export::export_trip_csv;
use hos_trip_log::domain::routing::graphhopper::{DEFAULT_GRAPHHOPPER_URL, GraphHopperRouteProvider};
use hos_trip_log::domain::routing::great_circle::GreatCircleRouteProvider;
use hos_trip_log::domain::routing::route_provider::RouteProvider;
use hos_trip_log::domain::time_source::SystemTimeSource;
use hos_trip_log::domain::utils::id::{DriverId, TripId};
use hos_trip_log::loader::parser::parse_json_file;
use hos_trip_log::{logger, open_trip_service};

const API_KEY_VAR: &str = "GRAPH_HOPPER_API_KEY";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RouterKind {
    /// Straight-line estimate, works offline
    GreatCircle,
    /// GraphHopper routing API, needs GRAPH_HOPPER_API_KEY
    Graphhopper,
}

#[derive(Debug, Parser)]
#[command(name = "hos-trip-log", version)]
#[command(about = "Plans truck trips and generates Hours-of-Service duty logs")]
struct Args {
    /// Fleet store (JSON snapshot), created on first write
    #[arg(long, global = true, default_value = "fleet.json")]
    store: PathBuf,

    /// Rule constants file overriding the default HOS thresholds
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip from a JSON request and store it with its duty log
    Plan {
        #[arg(long)]
        request: PathBuf,

        #[arg(long, value_enum, default_value_t = RouterKind::GreatCircle)]
        router: RouterKind,

        #[arg(long, default_value = DEFAULT_GRAPHHOPPER_URL)]
        graphhopper_url: String,
    },
    /// Hours a driver may still work in the rolling window
    Hours {
        #[arg(long)]
        driver: String,

        /// Reference date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a stored trip with its daily totals
    Trip {
        #[arg(long)]
        trip: String,
    },
    /// Write the duty log of a stored trip as CSV
    Export {
        #[arg(long)]
        trip: String,

        #[arg(long)]
        out: PathBuf,
    },
    /// List registered drivers
    Drivers,
    /// List registered vehicles
    Vehicles,
    AddDriver {
        #[arg(long)]
        name: String,

        #[arg(long)]
        license: String,
    },
    AddVehicle {
        #[arg(long)]
        car_number: String,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Debug, Serialize)]
struct TripReport<T: Serialize> {
    trip: T,
    days: Vec<DailyLogSummary>,
}

fn main() -> ExitCode {
    logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_router(kind: RouterKind, graphhopper_url: &str) -> Result<Box<dyn RouteProvider>> {
    match kind {
        RouterKind::GreatCircle => Ok(Box::new(GreatCircleRouteProvider::default())),
        RouterKind::Graphhopper => {
            let api_key = std::env::var(API_KEY_VAR).with_context(|| format!("{} is not set", API_KEY_VAR))?;
            Ok(Box::new(GraphHopperRouteProvider::new(graphhopper_url, api_key)?))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let router: Box<dyn RouteProvider> = match &args.command {
        Command::Plan { router, graphhopper_url, .. } => build_router(*router, graphhopper_url)?,
        _ => Box::new(GreatCircleRouteProvider::default()),
    };

    let mut service = open_trip_service(&args.store, args.rules.as_deref(), router, Arc::new(SystemTimeSource))
        .with_context(|| format!("failed to open fleet store '{}'", args.store.display()))?;

    match args.command {
        Command::Plan { request, .. } => {
            let request: TripRequestDto = parse_json_file(&request).with_context(|| format!("failed to read trip request '{}'", request.display()))?;
            let trip = service.create_trip(request)?;
            service.repository().save(&args.store)?;
            print_json(&trip)?;
        }
        Command::Hours { driver, date } => {
            print_json(&service.driver_hours(&DriverId::new(driver), date.as_deref())?)?;
        }
        Command::Trip { trip } => {
            let trip = service.trip(&TripId::new(trip))?;
            let days = DailyLogSummary::from_entries(&trip.logs);
            print_json(&TripReport { trip, days })?;
        }
        Command::Export { trip, out } => {
            export_trip_csv(&service.trip(&TripId::new(trip))?, &out)?;
        }
        Command::Drivers => print_json(&service.drivers())?,
        Command::Vehicles => print_json(&service.vehicles())?,
        Command::AddDriver { name, license } => {
            let driver = service.register_driver(NewDriverDto { name, license_number: license })?;
            service.repository().save(&args.store)?;
            print_json(&driver)?;
        }
        Command::AddVehicle { car_number, brand, model, year } => {
            let vehicle = service.register_vehicle(NewVehicleDto { car_number, brand, model, year })?;
            service.repository().save(&args.store)?;
            print_json(&vehicle)?;
        }
    }

    Ok(())
}
