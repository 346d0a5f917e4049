/// talentgrid CLI
///
/// Runs one table configuration against a captured JSON payload and prints
/// the derived page as JSON. Handy for checking a screen's field
/// declarations against what the API actually returns.
///
/// Usage:
///   talentgrid config.json records.json --query tab --sort interviewedAt --direction desc --page-size 25

use clap::{Parser, ValueEnum};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use talentgrid::{SortDirection, ViewResult};

#[derive(Debug, Parser)]
#[command(name = "talentgrid", about = "Filter, sort and paginate a JSON record payload")]
struct Cli {
    /// Table configuration (fields, searchable fields, page sizes)
    config: PathBuf,

    /// JSON array of records
    records: PathBuf,

    /// Free-text search query
    #[arg(long)]
    query: Option<String>,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort direction, used with --sort [default: asc]
    #[arg(long, value_enum, requires = "sort")]
    direction: Option<DirectionArg>,

    /// Zero-based page index
    #[arg(long)]
    page: Option<usize>,

    /// Page size; must be one of the configured options
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    #[value(alias = "ascending")]
    Asc,
    #[value(alias = "descending")]
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Asc => SortDirection::Ascending,
            DirectionArg::Desc => SortDirection::Descending,
        }
    }
}

fn run(cli: &Cli) -> Result<ViewResult, Box<dyn Error>> {
    let config_json = std::fs::read_to_string(&cli.config)?;
    let records_json = std::fs::read_to_string(&cli.records)?;
    let mut table = talentgrid::load_table(&config_json, &records_json)?;
    info!("loaded {} records from {}", table.records().len(), cli.records.display());

    if let Some(query) = &cli.query {
        table.set_query(query.as_str());
    }
    if let Some(field) = &cli.sort {
        let direction = cli.direction.unwrap_or(DirectionArg::Asc);
        table.set_sort(field, direction.into())?;
    }

    // Page size first: changing it resets the page index
    if let Some(size) = cli.page_size {
        table.set_page_size(size)?;
    }
    if let Some(page) = cli.page {
        table.set_page(page);
    }

    let result = table.view();
    if let Some((first, last)) = result.item_range() {
        info!("showing {}-{} of {}", first, last, result.total_count);
    }
    Ok(result.clone())
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let output = run(&cli).and_then(|result| Ok(serde_json::to_string_pretty(&result)?));

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "fields": [
            {"name": "name", "type": "text"},
            {"name": "score", "type": "number"}
        ],
        "searchableFields": ["name"],
        "pageSizeOptions": [2, 10]
    }"#;

    const RECORDS: &str = r#"[
        {"name": "Bob", "score": 70},
        {"name": "Amy", "score": 90},
        {"name": "Cal", "score": 70}
    ]"#;

    fn write_inputs(tag: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("talentgrid-cli-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("config.json");
        let records = dir.join("records.json");
        std::fs::write(&config, CONFIG).unwrap();
        std::fs::write(&records, RECORDS).unwrap();
        (config, records)
    }

    fn names(result: &ViewResult) -> Vec<String> {
        result.windowed.iter().map(|r| r.text("name").into_owned()).collect()
    }

    #[test]
    fn test_direction_values() {
        let cli = Cli::try_parse_from(["talentgrid", "c.json", "r.json", "--sort", "score", "--direction", "desc"]).unwrap();
        assert_eq!(cli.direction, Some(DirectionArg::Desc));

        let cli = Cli::try_parse_from(["talentgrid", "c.json", "r.json", "--sort", "score", "--direction", "descending"])
            .unwrap();
        assert_eq!(cli.direction, Some(DirectionArg::Desc));

        let cli = Cli::try_parse_from(["talentgrid", "c.json", "r.json"]).unwrap();
        assert_eq!(cli.direction, None);
        assert_eq!(cli.sort, None);
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        assert!(Cli::try_parse_from(["talentgrid", "c.json", "r.json", "--sort", "score", "--direction", "down"]).is_err());
        // A direction without a field to sort by is a usage error too
        assert!(Cli::try_parse_from(["talentgrid", "c.json", "r.json", "--direction", "desc"]).is_err());
    }

    #[test]
    fn test_run_sorts_descending() {
        let (config, records) = write_inputs("desc");
        let path = |p: &PathBuf| p.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "talentgrid".to_string(),
            path(&config),
            path(&records),
            "--sort".to_string(),
            "score".to_string(),
            "--direction".to_string(),
            "desc".to_string(),
            "--page-size".to_string(),
            "10".to_string(),
        ])
        .unwrap();

        let result = run(&cli).unwrap();
        assert_eq!(names(&result), vec!["Amy", "Bob", "Cal"]);
    }

    #[test]
    fn test_run_reports_bad_arguments() {
        let (config, records) = write_inputs("bad");
        let mut cli = Cli::try_parse_from(["talentgrid", "c.json", "r.json"]).unwrap();
        cli.config = config;
        cli.records = records;

        cli.sort = Some("salary".to_string());
        assert!(run(&cli).is_err());

        cli.sort = None;
        cli.page_size = Some(3);
        assert!(run(&cli).is_err());

        cli.page_size = Some(2);
        cli.page = Some(7);
        let result = run(&cli).unwrap();
        assert_eq!(result.current_page, 1);
        assert_eq!(names(&result), vec!["Cal"]);
    }
}
