use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use booking_gateway::config::{load_config, GatewayConfig};
use booking_gateway::http::response::location_for;
use booking_gateway::routing::{normalize_path, Exclusions};
use booking_gateway::{Gateway, Role};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Offline tooling for the booking access gateway", long_about = None)]
struct Cli {
    /// Configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Validate,
    /// Show the decision the gateway would make for a request
    Check {
        /// Request path, e.g. /owner/listings
        path: String,
        /// Auth token cookie value
        #[arg(long)]
        token: Option<String>,
        /// Role cookie value (PLAYER, OWNER, ADMIN)
        #[arg(long)]
        role: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    match cli.command {
        Commands::Validate => {
            println!("configuration OK");
        }
        Commands::Check { path, token, role } => {
            let report = check_report(&config, &path, token.as_deref(), role.as_deref());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// The decision the server would make for `path`, as JSON.
///
/// Runs the same steps as the access middleware: normalize, check
/// exclusions, then evaluate. Unknown roles are dropped.
fn check_report(
    config: &GatewayConfig,
    path: &str,
    token: Option<&str>,
    role: Option<&str>,
) -> Value {
    let path = normalize_path(path);
    if Exclusions::from_config(&config.exclusions).is_excluded(&path) {
        return json!({ "path": path, "excluded": true });
    }

    let role = role.and_then(|r| r.parse::<Role>().ok());
    let gateway = Gateway::from_config(&config.access);
    let (tier, decision) = gateway.evaluate_with_tier(&path, token, role);
    let location = location_for(&decision, &config.access.login_path);
    json!({
        "path": path,
        "excluded": false,
        "tier": tier,
        "role": role,
        "outcome": decision,
        "location": location,
    })
}
