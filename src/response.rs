//! Response collections assembled from paginated fetches.
//!
//! Every record is wrapped in [`Retrieved`], which carries the URL it came
//! from, the fetch timestamp, and whether it was served from the response
//! cache. Records keep API return order across pages.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

/// A record plus the provenance of the response it arrived in.
#[derive(Debug, Clone, Serialize)]
pub struct Retrieved<T> {
    /// The record itself.
    #[serde(flatten)]
    pub record: T,
    /// The request URL the record came from.
    pub url: String,
    /// When the response was fetched from the network. For cache hits this
    /// is the original fetch time, not the replay time.
    pub retrieved: DateTime<Utc>,
    /// Whether the response was served from the on-disk cache.
    #[serde(skip)]
    pub from_cache: bool,
}

impl<T> std::ops::Deref for Retrieved<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

/// An ordered collection of records from one or more pages.
#[derive(Debug, Clone)]
pub struct NceiResponse<T> {
    records: Vec<Retrieved<T>>,
    total: Option<u64>,
}

impl<T> NceiResponse<T> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            total: None,
        }
    }

    pub(crate) fn push_page(
        &mut self,
        items: Vec<T>,
        url: &str,
        retrieved: DateTime<Utc>,
        from_cache: bool,
        total: Option<u64>,
    ) {
        if total.is_some() {
            self.total = total;
        }
        self.records.extend(items.into_iter().map(|record| Retrieved {
            record,
            url: url.to_string(),
            retrieved,
            from_cache,
        }));
    }

    pub(crate) fn truncate(&mut self, max: usize) {
        self.records.truncate(max);
    }

    /// The records with their provenance, in API return order.
    pub fn records(&self) -> &[Retrieved<T>] {
        &self.records
    }

    /// Iterate over the bare records.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|r| &r.record)
    }

    /// Consume the response, yielding the bare records.
    pub fn into_values(self) -> Vec<T> {
        self.records.into_iter().map(|r| r.record).collect()
    }

    /// The first record, if any.
    pub fn first(&self) -> Option<&T> {
        self.records.first().map(|r| &r.record)
    }

    /// Total records the service reported for the query, which may exceed
    /// `len()` when a `max` cap cut the fetch short.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Retrieved<T>> {
        self.records.iter()
    }
}

impl<T: Serialize> NceiResponse<T> {
    /// Write the records to `path` as CSV.
    ///
    /// Columns are the record's serialized fields (in first-seen order)
    /// followed by `url` and `retrieved`. Fields absent from a record
    /// serialize as empty cells.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        use serde::ser::Error as _;

        let mut writer = csv::Writer::from_writer(File::create(path.as_ref())?);

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<serde_json::Map<String, serde_json::Value>> = Vec::new();
        for record in &self.records {
            let value = serde_json::to_value(&record.record)?;
            let serde_json::Value::Object(mut map) = value else {
                return Err(serde_json::Error::custom(
                    "record did not serialize to a JSON object",
                )
                .into());
            };
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            map.insert("url".to_string(), record.url.clone().into());
            map.insert(
                "retrieved".to_string(),
                record.retrieved.to_rfc3339().into(),
            );
            rows.push(map);
        }
        columns.push("url".to_string());
        columns.push("retrieved".to_string());

        writer.write_record(&columns)?;
        for row in &rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|col| row.get(col).map(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&cells)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<T> IntoIterator for NceiResponse<T> {
    type Item = Retrieved<T>;
    type IntoIter = std::vec::IntoIter<Retrieved<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NceiResponse<T> {
    type Item = &'a Retrieved<T>;
    type IntoIter = std::slice::Iter<'a, Retrieved<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
