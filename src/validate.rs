//! Request-parameter validation against endpoint metadata.
//!
//! Checks run in three stages, each collecting every offending parameter
//! before failing: required parameters present, parameter names known to
//! the endpoint, then per-value checks driven by the [`ParamSpec`] tables
//! and the lookup tables.

use chrono::{NaiveDate, NaiveDateTime};

use crate::endpoint::{Endpoint, ParamKind, ParamSpec};
use crate::error::{NceiError, Result};
use crate::lookup::LookupTables;

/// Requests may page up to 1000 records at a time.
pub const MAX_LIMIT: u32 = 1000;

/// Validate `params` for a request to `endpoint`.
///
/// # Errors
///
/// Returns [`NceiError::MissingParams`] if required parameters are absent,
/// [`NceiError::UnknownParams`] if names the endpoint does not accept are
/// present, or [`NceiError::InvalidParams`] describing every value that
/// failed its check.
pub fn validate_params(
    endpoint: Endpoint,
    params: &[(String, String)],
    lookups: &LookupTables,
) -> Result<()> {
    let missing: Vec<String> = endpoint
        .required_params()
        .iter()
        .filter(|name| !params.iter().any(|(n, _)| n == *name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(NceiError::MissingParams(missing));
    }

    let mut unknown: Vec<String> = params
        .iter()
        .filter(|(name, _)| endpoint.param(name).is_none())
        .map(|(name, _)| name.clone())
        .collect();
    if !unknown.is_empty() {
        unknown.dedup();
        return Err(NceiError::UnknownParams(unknown));
    }

    let mut errors = Vec::new();
    for spec in endpoint.params() {
        let values: Vec<&str> = params
            .iter()
            .filter(|(name, _)| name == spec.name)
            .map(|(_, value)| value.as_str())
            .collect();
        if values.is_empty() {
            continue;
        }
        check_values(endpoint, spec, &values, lookups, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(NceiError::InvalidParams(errors))
    }
}

fn check_values(
    endpoint: Endpoint,
    spec: &ParamSpec,
    values: &[&str],
    lookups: &LookupTables,
    errors: &mut Vec<String>,
) {
    match spec.kind {
        ParamKind::Id { lookup, max_values } => {
            if let Some(max) = max_values {
                if values.len() > max {
                    errors.push(format!(
                        "{} accepts at most {} value(s), got {}",
                        spec.name,
                        max,
                        values.len()
                    ));
                }
            }
            for &value in values {
                check_id(spec.name, value, lookup, lookups, errors);
            }
        }
        ParamKind::Date => {
            for &value in values {
                if !is_valid_date(value) {
                    errors.push(format!(
                        "{}={value} is not a YYYY-MM-DD date or ISO datetime",
                        spec.name
                    ));
                }
            }
        }
        ParamKind::Int => {
            for value in values {
                match value.parse::<u32>() {
                    Ok(n) if spec.name == "limit" && n > MAX_LIMIT => {
                        errors.push(format!("limit={n} exceeds the maximum of {MAX_LIMIT}"));
                    }
                    Ok(_) => {}
                    Err(_) => {
                        errors.push(format!("{}={value} is not a non-negative integer", spec.name))
                    }
                }
            }
        }
        ParamKind::Choice(allowed) => {
            for value in values {
                if !allowed.contains(value) {
                    errors.push(format!(
                        "{}={value} is not one of {}",
                        spec.name,
                        allowed.join(", ")
                    ));
                }
            }
        }
        ParamKind::SortField => {
            let allowed = endpoint.sort_fields();
            for value in values {
                if !allowed.contains(value) {
                    errors.push(format!(
                        "sortfield={value} is not one of {}",
                        allowed.join(", ")
                    ));
                }
            }
        }
        ParamKind::Extent => {
            for value in values {
                let coords: Vec<&str> = value.split(',').collect();
                let ok = coords.len() == 4 && coords.iter().all(|c| c.trim().parse::<f64>().is_ok());
                if !ok {
                    errors.push(format!(
                        "extent={value} is not four comma-separated decimal degrees"
                    ));
                }
            }
        }
    }
}

fn check_id(
    name: &str,
    value: &str,
    lookup: Option<Endpoint>,
    lookups: &LookupTables,
    errors: &mut Vec<String>,
) {
    if value.is_empty() {
        errors.push(format!("{name} must not be empty"));
        return;
    }
    let Some(lookup) = lookup else { return };

    if lookups.is_complete(lookup) {
        // Complete listing: the ID must appear in it.
        if !lookups.contains(lookup, value) {
            errors.push(format!("{name}={value} is not a known {} ID", lookup));
        }
    } else {
        // Partial snapshot: only the PREFIX:value shape can be checked.
        let well_formed = value
            .split_once(':')
            .is_some_and(|(prefix, rest)| !prefix.is_empty() && !rest.is_empty());
        if !well_formed {
            errors.push(format!("{name}={value} is not of the form PREFIX:value"));
        }
    }
}

fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_required_params() {
        let lookups = LookupTables::embedded();
        let err = validate_params(Endpoint::Data, &[], &lookups).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Required parameters missing"));
        assert!(msg.contains("datasetid"));
        assert!(msg.contains("startdate"));
        assert!(msg.contains("enddate"));
    }

    #[test]
    fn test_unknown_param_name() {
        let lookups = LookupTables::embedded();
        let err = validate_params(
            Endpoint::Data,
            &params(&[
                ("datasetid", "GHCND"),
                ("startdate", "2015-12-01"),
                ("enddate", "2015-12-02"),
                ("bad_param_name", "BAD_PARAM_NAME"),
            ]),
            &lookups,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid parameters found"));
        assert!(msg.contains("bad_param_name"));
    }

    #[test]
    fn test_valid_data_request_passes() {
        let lookups = LookupTables::embedded();
        validate_params(
            Endpoint::Data,
            &params(&[
                ("datasetid", "GHCND"),
                ("stationid", "GHCND:USC00186350"),
                ("datatypeid", "TMIN"),
                ("datatypeid", "TMAX"),
                ("startdate", "2015-12-01"),
                ("enddate", "2015-12-02"),
                ("sortfield", "station"),
                ("sortorder", "asc"),
                ("limit", "10"),
            ]),
            &lookups,
        )
        .unwrap();
    }

    #[test]
    fn test_invalid_values_are_all_reported() {
        let lookups = LookupTables::embedded();
        let err = validate_params(
            Endpoint::Data,
            &params(&[
                ("datasetid", "TOO_MANY_DATASETIDS_1"),
                ("datasetid", "TOO_MANY_DATASETIDS_2"),
                ("stationid", "BAD_STATION_NAME"),
                ("startdate", "BAD_START_DATE"),
                ("enddate", "BAD_END_DATE"),
                ("limit", "BAD_LIMIT"),
                ("sortfield", "BAD_FIELD_NAME"),
                ("sortorder", "BAD_SORT_ORDER"),
                ("units", "BAD_UNIT_NAME"),
            ]),
            &lookups,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Parameter errors"));
        assert!(msg.contains("at most 1"));
        assert!(msg.contains("BAD_STATION_NAME"));
        assert!(msg.contains("BAD_START_DATE"));
        assert!(msg.contains("BAD_LIMIT"));
        assert!(msg.contains("BAD_FIELD_NAME"));
        assert!(msg.contains("BAD_SORT_ORDER"));
        assert!(msg.contains("BAD_UNIT_NAME"));
    }

    #[test]
    fn test_unknown_dataset_id() {
        let lookups = LookupTables::embedded();
        let err = validate_params(
            Endpoint::Data,
            &params(&[
                ("datasetid", "NOT_A_DATASET"),
                ("startdate", "2015-12-01"),
                ("enddate", "2015-12-02"),
            ]),
            &lookups,
        )
        .unwrap_err();
        assert!(err.to_string().contains("NOT_A_DATASET"));
    }

    #[test]
    fn test_limit_over_maximum() {
        let lookups = LookupTables::embedded();
        let err = validate_params(
            Endpoint::Stations,
            &params(&[("limit", "1001")]),
            &lookups,
        )
        .unwrap_err();
        assert!(err.to_string().contains("1001"));
    }

    #[test]
    fn test_iso_datetime_accepted() {
        let lookups = LookupTables::embedded();
        validate_params(
            Endpoint::Stations,
            &params(&[("startdate", "2015-12-01T00:00:00")]),
            &lookups,
        )
        .unwrap();
    }

    #[test]
    fn test_extent_checked() {
        let lookups = LookupTables::embedded();
        validate_params(
            Endpoint::Stations,
            &params(&[("extent", "38.913,-77.114,38.939,-76.970")]),
            &lookups,
        )
        .unwrap();

        let err = validate_params(
            Endpoint::Stations,
            &params(&[("extent", "38.913,-77.114")]),
            &lookups,
        )
        .unwrap_err();
        assert!(err.to_string().contains("extent"));
    }
}
