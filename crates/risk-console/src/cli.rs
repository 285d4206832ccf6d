use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "risk-console",
    version,
    about = "Run the borrower risk job and browse the returned records"
)]
pub(crate) struct Args {
    #[arg(long, default_value = "config/risk-console.toml")]
    pub(crate) config: PathBuf,
    /// Overrides `api_url` from the config file.
    #[arg(long)]
    pub(crate) api_url: Option<String>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Run the risk job once and print the returned records as JSON lines.
    Run,
    /// Send the init-risk request once.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let args = Args::try_parse_from(["risk-console"]).unwrap();
        assert_eq!(args.command, None);
        assert_eq!(args.config, PathBuf::from("config/risk-console.toml"));
        assert!(!args.log_to_stderr);
    }

    #[test]
    fn parses_one_shot_run_with_override() {
        let args = Args::try_parse_from([
            "risk-console",
            "--api-url",
            "http://127.0.0.1:5000",
            "--log-to-stderr",
            "run",
        ])
        .unwrap();
        assert_eq!(args.command, Some(Command::Run));
        assert_eq!(args.api_url.as_deref(), Some("http://127.0.0.1:5000"));
        assert!(args.log_to_stderr);
    }
}
