//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{DataCategory, DataRecord, DataType, Dataset, Location, LocationCategory, Station};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Dataset {
    fn pretty_print(&self) -> String {
        let header = format!("Dataset: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name)];

        if let (Some(min), Some(max)) = (self.mindate, self.maxdate) {
            lines.push(format!("Period:         {min} to {max}"));
        }
        if let Some(coverage) = self.datacoverage {
            lines.push(format!("Coverage:       {coverage}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Station {
    fn pretty_print(&self) -> String {
        let header = format!("Station: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name)];

        if let Some((lat, lon)) = self.coordinates() {
            lines.push(format!("Coordinates:    {lat}, {lon}"));
        }
        if let Some(elevation) = self.elevation {
            let unit = self.elevation_unit.as_deref().unwrap_or("");
            lines.push(format!("Elevation:      {elevation} {unit}"));
        }
        if let (Some(min), Some(max)) = (self.mindate, self.maxdate) {
            lines.push(format!("Period:         {min} to {max}"));
        }
        if let Some(coverage) = self.datacoverage {
            lines.push(format!("Coverage:       {coverage}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Location {
    fn pretty_print(&self) -> String {
        let header = format!("Location: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name)];

        if let (Some(min), Some(max)) = (self.mindate, self.maxdate) {
            lines.push(format!("Period:         {min} to {max}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for DataCategory {
    fn pretty_print(&self) -> String {
        format!("{:<16}{}", self.id, self.name)
    }
}

impl PrettyPrint for LocationCategory {
    fn pretty_print(&self) -> String {
        format!("{:<16}{}", self.id, self.name)
    }
}

impl PrettyPrint for DataType {
    fn pretty_print(&self) -> String {
        format!("{:<16}{}", self.id, self.name.as_deref().unwrap_or("-"))
    }
}

impl PrettyPrint for DataRecord {
    fn pretty_print(&self) -> String {
        let mut line = format!(
            "{}  {:<8} {:>10}  {}",
            self.date, self.datatype, self.value, self.station
        );
        if let Some(ref attributes) = self.attributes {
            line.push_str(&format!("  [{attributes}]"));
        }
        line
    }
}
