use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use corn_leaf_doctor::app::{render, App};
use corn_leaf_doctor::models::Config;
use corn_leaf_doctor::report::DiagnosisReport;
use corn_leaf_doctor::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "corn-leaf-doctor")]
#[command(about = "Diagnose corn leaf diseases from a photo")]
struct CliArgs {
    /// Photo of a corn leaf.
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Media type to send instead of the detected one (e.g. image/jpeg).
    #[arg(long)]
    mime: Option<String>,

    /// Directory to write a JSON report into.
    #[arg(long, value_name = "DIR")]
    report: Option<PathBuf>,

    /// Print the diagnosis as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Give up on the remote call after this many seconds.
    #[arg(long, value_parser = parse_timeout_arg)]
    timeout_secs: Option<Duration>,
}

fn parse_timeout_arg(input: &str) -> std::result::Result<Duration, String> {
    match input.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(format!(
            "Invalid timeout '{}'. Expected a positive number of seconds",
            input
        )),
    }
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Configuration(_) => 2,
        Error::DiagnosisUnavailable(_) => 3,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corn_leaf_doctor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut app = match App::from_config(&Config::from_env()) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(exit_code(&e));
        }
    };
    if let Some(timeout) = args.timeout_secs {
        app = app.with_timeout(timeout);
    }

    info!("Analyzing {}", args.image.display());

    let diagnosis = match app.diagnose_file(&args.image, args.mime.as_deref()).await {
        Ok(diagnosis) => diagnosis,
        Err(e) => {
            error!("Diagnosis failed: {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagnosis)?);
    } else {
        print!("{}", render(&diagnosis));
    }

    if let Some(dir) = args.report {
        let path = DiagnosisReport::new(&diagnosis, Utc::now())
            .write_to_dir(&dir)
            .await?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_arg_valid() {
        assert_eq!(parse_timeout_arg("30").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_timeout_arg_invalid() {
        assert!(parse_timeout_arg("0").is_err());
        assert!(parse_timeout_arg("soon").unwrap_err().contains("seconds"));
    }

    #[test]
    fn test_exit_codes_follow_error_tier() {
        assert_eq!(exit_code(&Error::Configuration("x".to_string())), 2);
        assert_eq!(exit_code(&Error::DiagnosisUnavailable("x".to_string())), 3);
        assert_eq!(exit_code(&Error::Transport("x".to_string())), 1);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "corn-leaf-doctor",
            "leaf.jpg",
            "--json",
            "--report",
            "out",
            "--timeout-secs",
            "10",
        ]);
        assert_eq!(args.image, PathBuf::from("leaf.jpg"));
        assert!(args.json);
        assert_eq!(args.report, Some(PathBuf::from("out")));
        assert_eq!(args.timeout_secs, Some(Duration::from_secs(10)));
    }
}
