use std::process;

use clap::{Arg, Command};
use colored::*;

use elab_batch_import::commands::handle_import;
use elab_batch_import::constants::DEFAULT_USERLIST_FILE;
use elab_batch_import::logging::{get_log_file_path, init_logging, log_error, log_panic_info};

fn build_cli() -> Command {
    Command::new("elab-batch-import")
        .about("Add existing eLabFTW users to teams and team groups from an XLSX user list")
        .version("1.0.0")
        .after_help(
            "Connection settings are read from ELAB_API_HOST_URL and ELAB_API_KEY \
             (a .env file in the working directory is loaded first). \
             Set ELAB_VERIFY_SSL=false or pass --insecure for self-signed certificates.",
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("XLSX user list to import")
                .default_value(DEFAULT_USERLIST_FILE)
        )
        .arg(
            Arg::new("sheet")
                .long("sheet")
                .value_name("NAME")
                .help("Worksheet to read (default: first sheet)")
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_name("MAP")
                .help("Override column titles, e.g. email=Mail,group=Arbeitsgruppe")
        )
        .arg(
            Arg::new("insecure")
                .long("insecure")
                .help("Do not verify the server's TLS certificate")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("skip-existing")
                .long("skip-existing")
                .help("Skip memberships the server already reports")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Echo log messages to stderr")
                .action(clap::ArgAction::SetTrue)
        )
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = init_logging(matches.get_flag("debug")) {
        eprintln!("{} could not set up log file: {}", "Warning:".yellow(), e);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));

    let result = handle_import(&matches).await;

    if let Some(path) = get_log_file_path() {
        println!("\n{}", format!("Log written to {}", path.display()).dimmed());
    }

    match result {
        Ok(summary) if summary.has_failures() => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            log_error(&e.to_string());
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_fatal() {
                eprintln!("{}", "No memberships were changed.".dimmed());
            }
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_userlist() {
        let matches = build_cli().try_get_matches_from(["elab-batch-import"]).unwrap();
        assert_eq!(
            matches.get_one::<String>("file").map(String::as_str),
            Some(DEFAULT_USERLIST_FILE)
        );
        assert!(!matches.get_flag("insecure"));
        assert!(!matches.get_flag("skip-existing"));
    }

    #[test]
    fn test_cli_accepts_options() {
        let matches = build_cli()
            .try_get_matches_from([
                "elab-batch-import",
                "members.xlsx",
                "--sheet",
                "2024",
                "--insecure",
                "--skip-existing",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("file").map(String::as_str), Some("members.xlsx"));
        assert_eq!(matches.get_one::<String>("sheet").map(String::as_str), Some("2024"));
        assert!(matches.get_flag("insecure"));
        assert!(matches.get_flag("skip-existing"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }
}
