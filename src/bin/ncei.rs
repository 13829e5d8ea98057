//! NCEI Climate Data Online CLI binary.

use std::process::ExitCode;

use clap::Parser;
use ncei::cli::{Cli, Command, EntityKind};
use ncei::output::PrettyPrint;
use ncei::{
    DataQuery, NceiClient, NceiError, NceiResponse, ResponseCache, Retrieved, SearchQuery,
    METADATA_ENDPOINTS,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set the NCEI_TOKEN environment variable or pass --token");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> ncei::Result<NceiClient> {
    let mut client = match &cli.token {
        Some(token) => NceiClient::new(token)?,
        None => NceiClient::from_env()?,
    };
    if let Some(dir) = &cli.cache_dir {
        client = client.with_cache(ResponseCache::open(dir)?);
    }
    Ok(client.with_validation(cli.validate))
}

async fn run(client: &NceiClient, cli: Cli) -> ncei::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            datasets,
            datatypes,
            locations,
            stations,
            start,
            end,
            limit,
            max,
        } => {
            let mut query = SearchQuery {
                datasetid: datasets,
                datatypeid: datatypes,
                locationid: locations,
                stationid: stations,
                startdate: start,
                enddate: end,
                limit,
                ..SearchQuery::default()
            };
            query.max = max;
            handle_list(client, entity, &query, cli.json).await
        }
        Command::Data {
            dataset,
            start,
            end,
            datatypes,
            locations,
            stations,
            units,
            max,
            csv,
        } => {
            let mut query = DataQuery::new(dataset, start, end);
            query.datatypeid = datatypes;
            query.locationid = locations;
            query.stationid = stations;
            query.units = units;
            query.max = max;
            handle_data(client, &query, csv, cli.json).await
        }
        Command::Search { term, endpoint } => handle_search(client, &term, endpoint, cli.json),
        Command::RefreshLookups { endpoints, dir } => {
            let endpoints = if endpoints.is_empty() {
                METADATA_ENDPOINTS.to_vec()
            } else {
                endpoints
            };
            client.refresh_lookups(&endpoints, &dir).await
        }
    }
}

async fn handle_get(
    client: &NceiClient,
    entity: EntityKind,
    id: &str,
    json: bool,
) -> ncei::Result<()> {
    match entity {
        EntityKind::Dataset => output_single(client.get_dataset(id).await?, entity, id, json),
        EntityKind::DataCategory => {
            output_single(client.get_data_category(id).await?, entity, id, json)
        }
        EntityKind::DataType => output_single(client.get_data_type(id).await?, entity, id, json),
        EntityKind::LocationCategory => {
            output_single(client.get_location_category(id).await?, entity, id, json)
        }
        EntityKind::Location => output_single(client.get_location(id).await?, entity, id, json),
        EntityKind::Station => output_single(client.get_station(id).await?, entity, id, json),
    }
}

fn output_single<T: Serialize + PrettyPrint>(
    response: NceiResponse<T>,
    entity: EntityKind,
    id: &str,
    json: bool,
) -> ncei::Result<()> {
    let record = response.first().ok_or_else(|| NceiError::NotFound {
        endpoint: entity.endpoint().path(),
        id: id.to_string(),
    })?;
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", record.pretty_print());
    }
    Ok(())
}

async fn handle_list(
    client: &NceiClient,
    entity: EntityKind,
    query: &SearchQuery,
    json: bool,
) -> ncei::Result<()> {
    match entity {
        EntityKind::Dataset => {
            let response = client.get_datasets(query).await?;
            output_rows(&response, json, PeriodRow::from_dataset)
        }
        EntityKind::DataCategory => {
            let response = client.get_data_categories(query).await?;
            output_rows(&response, json, |c| IdNameRow {
                id: c.id.clone(),
                name: c.name.clone(),
            })
        }
        EntityKind::DataType => {
            let response = client.get_data_types(query).await?;
            output_rows(&response, json, PeriodRow::from_datatype)
        }
        EntityKind::LocationCategory => {
            let response = client.get_location_categories(query).await?;
            output_rows(&response, json, |c| IdNameRow {
                id: c.id.clone(),
                name: c.name.clone(),
            })
        }
        EntityKind::Location => {
            let response = client.get_locations(query).await?;
            output_rows(&response, json, PeriodRow::from_location)
        }
        EntityKind::Station => {
            let response = client.get_stations(query).await?;
            output_rows(&response, json, StationRow::from)
        }
    }
}

async fn handle_data(
    client: &NceiClient,
    query: &DataQuery,
    csv: Option<std::path::PathBuf>,
    json: bool,
) -> ncei::Result<()> {
    let response = client.get_data(query).await?;
    if let Some(path) = csv {
        response.to_csv(&path)?;
        eprintln!("Wrote {} records to {}", response.len(), path.display());
        return Ok(());
    }
    output_rows(&response, json, |r| DataRow {
        date: r.date.to_string(),
        datatype: r.datatype.clone(),
        station: r.station.clone(),
        value: r.value.to_string(),
        attributes: r.attributes.clone().unwrap_or_default(),
    })
}

fn handle_search(
    client: &NceiClient,
    term: &str,
    endpoint: Option<ncei::Endpoint>,
    json: bool,
) -> ncei::Result<()> {
    let found = client.find_ids(term, endpoint);
    if json {
        let rows: Vec<serde_json::Value> = found
            .iter()
            .map(|f| {
                serde_json::json!({
                    "endpoint": f.endpoint.path(),
                    "id": f.id,
                    "name": f.name,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if found.is_empty() {
        eprintln!("No IDs match '{term}'");
    } else {
        let rows: Vec<SearchRow> = found
            .into_iter()
            .map(|f| SearchRow {
                endpoint: f.endpoint.path().to_string(),
                id: f.id,
                name: f.name,
            })
            .collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_rows<T, R, F>(response: &NceiResponse<T>, json: bool, to_row: F) -> ncei::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        let records: Vec<&Retrieved<T>> = response.iter().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if response.is_empty() {
        eprintln!("No records matched the query");
        return Ok(());
    }
    let rows: Vec<R> = response.values().map(|v| to_row(v)).collect();
    println!("{}", Table::new(rows));
    if let Some(total) = response.total() {
        if total > response.len() as u64 {
            eprintln!("Showing {} of {} records", response.len(), total);
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct IdNameRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "From")]
    mindate: String,
    #[tabled(rename = "To")]
    maxdate: String,
}

impl PeriodRow {
    fn from_dataset(d: &ncei::Dataset) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            mindate: opt_date(d.mindate),
            maxdate: opt_date(d.maxdate),
        }
    }

    fn from_datatype(d: &ncei::DataType) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone().unwrap_or_default(),
            mindate: opt_date(d.mindate),
            maxdate: opt_date(d.maxdate),
        }
    }

    fn from_location(l: &ncei::Location) -> Self {
        Self {
            id: l.id.clone(),
            name: l.name.clone(),
            mindate: opt_date(l.mindate),
            maxdate: opt_date(l.maxdate),
        }
    }
}

#[derive(Tabled)]
struct StationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
    #[tabled(rename = "Elevation")]
    elevation: String,
}

impl StationRow {
    fn from(s: &ncei::Station) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            latitude: s.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: s.longitude.map(|v| v.to_string()).unwrap_or_default(),
            elevation: s
                .elevation
                .map(|v| {
                    let unit = s.elevation_unit.as_deref().unwrap_or("");
                    format!("{v} {unit}").trim_end().to_string()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DataRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    datatype: String,
    #[tabled(rename = "Station")]
    station: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Attributes")]
    attributes: String,
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn opt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
