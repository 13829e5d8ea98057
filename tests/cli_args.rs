//! CLI argument parsing tests.

use clap::Parser;
use ncei::cli::{Cli, Command, EntityKind};
use ncei::Endpoint;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["ncei", "get", "station", "COOP:010957"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert!(matches!(entity, EntityKind::Station));
            assert_eq!(id, "COOP:010957");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from([
        "ncei",
        "list",
        "stations",
        "--dataset",
        "GHCND",
        "--location",
        "FIPS:11",
        "--start",
        "2015-12-01",
        "--end",
        "2015-12-02",
    ]);

    match cli.command {
        Command::List {
            entity,
            datasets,
            locations,
            start,
            end,
            ..
        } => {
            assert!(matches!(entity, EntityKind::Station));
            assert_eq!(datasets, vec!["GHCND"]);
            assert_eq!(locations, vec!["FIPS:11"]);
            assert_eq!(start, Some("2015-12-01".to_string()));
            assert_eq!(end, Some("2015-12-02".to_string()));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_data_subcommand() {
    let cli = Cli::parse_from([
        "ncei",
        "data",
        "--dataset",
        "GHCND",
        "--start",
        "2015-12-01",
        "--end",
        "2015-12-02",
        "--datatype",
        "TMIN",
        "--datatype",
        "TMAX",
        "--station",
        "GHCND:USC00186350",
        "--max",
        "10",
    ]);

    match cli.command {
        Command::Data {
            dataset,
            start,
            end,
            datatypes,
            stations,
            max,
            ..
        } => {
            assert_eq!(dataset, "GHCND");
            assert_eq!(start, "2015-12-01");
            assert_eq!(end, "2015-12-02");
            assert_eq!(datatypes, vec!["TMIN", "TMAX"]);
            assert_eq!(stations, vec!["GHCND:USC00186350"]);
            assert_eq!(max, Some(10));
        }
        _ => panic!("Expected Data command"),
    }
}

#[test]
fn test_data_requires_dataset_and_range() {
    let result = Cli::try_parse_from(["ncei", "data", "--dataset", "GHCND"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_search_subcommand() {
    let cli = Cli::parse_from(["ncei", "search", "temper", "--endpoint", "locations"]);

    match cli.command {
        Command::Search { term, endpoint } => {
            assert_eq!(term, "temper");
            assert_eq!(endpoint, Some(Endpoint::Locations));
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_parses_refresh_lookups() {
    let cli = Cli::parse_from(["ncei", "refresh-lookups", "datasets", "--dir", "/tmp/lookups"]);

    match cli.command {
        Command::RefreshLookups { endpoints, dir } => {
            assert_eq!(endpoints, vec![Endpoint::Datasets]);
            assert_eq!(dir, std::path::PathBuf::from("/tmp/lookups"));
        }
        _ => panic!("Expected RefreshLookups command"),
    }
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["ncei", "--json", "list", "stations"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["ncei", "list", "stations", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_entity_kind_aliases() {
    let cli = Cli::parse_from(["ncei", "get", "datasets", "GHCND"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            entity: EntityKind::Dataset,
            ..
        }
    ));

    let cli = Cli::parse_from(["ncei", "get", "datacategory", "TEMP"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            entity: EntityKind::DataCategory,
            ..
        }
    ));

    let cli = Cli::parse_from(["ncei", "list", "locationcategories"]);
    assert!(matches!(
        cli.command,
        Command::List {
            entity: EntityKind::LocationCategory,
            ..
        }
    ));
}

#[test]
fn test_validation_and_cache_flags() {
    let cli = Cli::parse_from([
        "ncei",
        "--validate",
        "--cache-dir",
        "/tmp/ncei-cache",
        "list",
        "datasets",
    ]);
    assert!(cli.validate);
    assert_eq!(
        cli.cache_dir,
        Some(std::path::PathBuf::from("/tmp/ncei-cache"))
    );
}
