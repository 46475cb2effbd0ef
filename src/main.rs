use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing_subscriber::EnvFilter;

use ridecast::{
    Coordinates, FetchState, ForecastClient, ForecastController, GeoIpProvider, RidecastConfig,
    format, location_resolver::resolve_startup_location,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RidecastConfig::load()?;
    init_tracing(&config);

    let client = ForecastClient::new(&config)?;
    let mut controller = ForecastController::new(config.default_criteria());

    // Manual coordinate override: `ridecast <lat> <lon>`; otherwise resolve
    // the location once at startup, falling back to the configured default.
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_coordinates(&args)? {
        Some(coordinates) => controller.set_coordinates(coordinates),
        None => {
            let provider = GeoIpProvider::new()?;
            let resolved =
                resolve_startup_location(&provider, config.default_coordinates()).await;
            controller.set_coordinates(resolved.coordinates);
            if let Some(advisory) = resolved.advisory {
                controller.set_advisory(advisory);
            }
        }
    }

    controller.refresh(&client).await;
    render(&controller);

    Ok(())
}

fn init_tracing(config: &RidecastConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn parse_coordinates(args: &[String]) -> Result<Option<Coordinates>> {
    match args {
        [] => Ok(None),
        [lat, lon] => {
            let latitude: f64 = lat
                .parse()
                .with_context(|| format!("Invalid latitude: {lat}"))?;
            let longitude: f64 = lon
                .parse()
                .with_context(|| format!("Invalid longitude: {lon}"))?;

            let coordinates = Coordinates::new(latitude, longitude);
            if !coordinates.is_valid() {
                bail!(
                    "Coordinates out of range: {}",
                    coordinates.format_coordinates()
                );
            }
            Ok(Some(coordinates))
        }
        _ => bail!("Usage: ridecast [<latitude> <longitude>]"),
    }
}

fn render(controller: &ForecastController) {
    if let Some(advisory) = controller.advisory() {
        println!("Note: {advisory}");
    }
    if let Some(coordinates) = controller.coordinates() {
        println!("Location: {}", coordinates.format_coordinates());
    }
    if let Some(note) = format::criteria_note(&controller.criteria()) {
        println!("Note: {note}");
    }

    match controller.state() {
        FetchState::Ready(forecast) => {
            println!("{}", format::retrieved_label(forecast.retrieved_at));

            let now = Local::now().naive_local();
            let today = now.date();

            println!("\nRiding windows:");
            let windows = controller.windows();
            if windows.is_empty() {
                println!("  none in the forecast horizon");
            }
            for window in &windows {
                println!("  {}", format::format_window(window));
            }

            let grid = controller.grid(now);
            if !grid.is_empty() {
                println!("\nWeek at a glance (# suitable, . unsuitable, - past):\n");
                print!("{:<16}", "");
                for &hour in &grid.hours {
                    print!("{} ", format::hour_header(hour));
                }
                println!();

                for (day_index, &day) in grid.days.iter().enumerate() {
                    print!("{:<16}", format::day_label(day, today));
                    for hour_index in 0..grid.hours.len() {
                        print!("{}  ", format::cell_symbol(grid.cell(day_index, hour_index)));
                    }
                    println!();
                }
            }
        }
        FetchState::Failed(message) => eprintln!("\n{message}"),
        FetchState::Loading => eprintln!("\nStill loading, this should not happen"),
        FetchState::Idle => eprintln!("\nNo coordinates available"),
    }
}
