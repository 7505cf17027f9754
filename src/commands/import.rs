use std::path::{Path, PathBuf};

use clap::ArgMatches;

use crate::client::ElabClient;
use crate::config::Config;
use crate::constants::DEFAULT_USERLIST_FILE;
use crate::directory::Directory;
use crate::error::ImportResult;
use crate::formatting::{print_banner, print_row_outcome, print_summary};
use crate::importer::{ImportOptions, ImportSummary, Importer};
use crate::logging::log_info;
use crate::spreadsheet::{read_assignments, ColumnMap, ReadOptions};

/// Everything the import needs besides the connection settings.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub file: PathBuf,
    pub read_options: ReadOptions,
    pub import_options: ImportOptions,
}

impl ImportRequest {
    pub fn from_matches(matches: &ArgMatches) -> ImportResult<Self> {
        let file = matches
            .get_one::<String>("file")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERLIST_FILE));

        let columns = match matches.get_one::<String>("columns") {
            Some(overrides) => ColumnMap::with_overrides(overrides)?,
            None => ColumnMap::default(),
        };

        Ok(Self {
            file,
            read_options: ReadOptions {
                sheet: matches.get_one::<String>("sheet").cloned(),
                columns,
            },
            import_options: ImportOptions {
                skip_existing: matches.get_flag("skip-existing"),
            },
        })
    }
}

pub async fn handle_import(matches: &ArgMatches) -> ImportResult<ImportSummary> {
    let request = ImportRequest::from_matches(matches)?;

    let mut config = Config::from_env()?;
    if matches.get_flag("insecure") {
        config = config.with_verify_ssl(false);
    }

    run_import(&config, &request).await
}

/// Read the user list, load the server directory and apply every row.
pub async fn run_import(config: &Config, request: &ImportRequest) -> ImportResult<ImportSummary> {
    log_info(&format!(
        "Importing {} into {} (key {})",
        request.file.display(),
        config.api_host_url,
        config.masked_api_key()
    ));

    let rows = read_assignments(&request.file, &request.read_options)?;

    let client = ElabClient::new(config)?;

    print_banner("Reading data", &format!("from {}", config.api_host_url));
    let directory = Directory::load(&client).await?;
    println!(
        "  {} users, {} teams, {} team groups",
        directory.user_count(),
        directory.team_count(),
        directory.group_count()
    );

    print_banner("Processing", &describe_file(&request.file, rows.len()));
    let importer = Importer::new(&client, &directory, request.import_options);
    let summary = importer.run(&rows, print_row_outcome).await;

    print_summary(&summary);
    Ok(summary)
}

fn describe_file(file: &Path, rows: usize) -> String {
    format!("{} rows from {}", rows, file.display())
}
