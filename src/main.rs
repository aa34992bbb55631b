use std::error::Error;
use std::io::Read;

use fwlog::{RouterConfig, TransformationEvent, route_event};
use tracing_subscriber::EnvFilter;

/// Reads one invocation event as JSON on stdin and writes the response
/// document to stdout. Stands in for the delivery service when exercising
/// the router locally:
///
/// ```text
/// fwlog-router < event.json
/// ```
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = RouterConfig::default();
    cfg.validate()?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let event: TransformationEvent = serde_json::from_str(&input)?;

    let response = route_event(event, &cfg)?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
