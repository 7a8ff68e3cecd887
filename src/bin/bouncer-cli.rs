use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bouncer-cli")]
#[command(about = "Operator CLI for the CrowdSec forward-auth bouncer", long_about = None)]
struct Cli {
    /// Base URL of the running bouncer.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness check
    Ping,
    /// Check that the bouncer can reach the Local API
    Healthz,
    /// Ask the bouncer whether an IP would be let through
    Check {
        #[arg(long)]
        ip: IpAddr,
    },
    /// Dump Prometheus metrics
    Metrics,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Ping => {
            print_response(client.get(format!("{}/api/v1/ping", base)).send().await?).await
        }
        Commands::Healthz => {
            print_response(client.get(format!("{}/api/v1/healthz", base)).send().await?).await
        }
        Commands::Check { ip } => {
            let res = client
                .get(format!("{}/api/v1/forwardAuth", base))
                .header("X-Real-Ip", ip.to_string())
                .send()
                .await?;
            if res.status().is_success() {
                println!("ALLOW {}", ip);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("DENY {} ({})", ip, res.status());
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Metrics => {
            print_response(client.get(format!("{}/api/v1/metrics", base)).send().await?).await
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: bouncer returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", text);
    Ok(ExitCode::SUCCESS)
}
