//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "INTAKE_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "INTAKE_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    println!();
    println!(
        "  {} {}",
        "Intake".cyan().bold(),
        "Server".bold()
    );
    println!();
    println!(
        "  {}       http://{}:{}/patient-form",
        "Form".green(),
        args.host,
        args.port
    );
    println!(
        "  {}  http://{}:{}/staff",
        "Dashboard".green(),
        args.host,
        args.port
    );
    println!(
        "  {}  ws://{}:{}/ws",
        "WebSocket".green(),
        args.host,
        args.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    intake_web::run_server(&args.host, args.port).await?;

    Ok(())
}
