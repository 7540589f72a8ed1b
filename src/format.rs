// Result formatting: pretty JSON for machines, compact text blocks for people

use crate::types::{Attraction, Classification, Event, SearchResults, Venue};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("Invalid output format: {}", other)),
        }
    }
}

/// Renders a search result. Never fails.
pub fn format_results(results: &SearchResults, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(results),
        OutputFormat::Text => to_text(results),
    }
}

fn to_json(results: &SearchResults) -> String {
    let rendered = match results {
        SearchResults::Events(events) => serde_json::to_string_pretty(events),
        SearchResults::Venues(venues) => serde_json::to_string_pretty(venues),
        SearchResults::Attractions(attractions) => serde_json::to_string_pretty(attractions),
    };
    rendered.unwrap_or_else(|_| "[]".to_string())
}

fn to_text(results: &SearchResults) -> String {
    let resource = results.search_type().resource();
    if results.is_empty() {
        return format!("No {} found.", resource);
    }

    let blocks: Vec<String> = match results {
        SearchResults::Events(events) => events.iter().map(event_block).collect(),
        SearchResults::Venues(venues) => venues.iter().map(venue_block).collect(),
        SearchResults::Attractions(attractions) => attractions.iter().map(attraction_block).collect(),
    };

    format!("Found {} {}:\n\n{}", results.len(), resource, blocks.join("\n\n"))
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn event_block(event: &Event) -> String {
    let start = &event.dates.start;
    let mut out = String::new();
    let _ = writeln!(out, "{}", event.name);
    let _ = writeln!(out, "ID: {}", event.id);
    let _ = writeln!(
        out,
        "Date: {} {}",
        or_na(start.local_date.as_deref()),
        or_na(start.local_time.as_deref())
    );
    if let Some(instant) = start.date_time.as_deref() {
        let _ = writeln!(out, "Starts (UTC): {}", instant);
    }
    match event.price_ranges.as_deref() {
        Some(ranges) if !ranges.is_empty() => {
            for range in ranges {
                let _ = writeln!(
                    out,
                    "Price ({}): {:.2}-{:.2} {}",
                    range.kind, range.min, range.max, range.currency
                );
            }
        }
        _ => {
            let _ = writeln!(out, "Price: {}", NOT_AVAILABLE);
        }
    }
    let _ = write!(out, "URL: {}", or_na(event.url.as_deref()));
    out
}

fn venue_block(venue: &Venue) -> String {
    let location = [
        venue.city.as_ref().map(|c| c.name.as_str()),
        venue.state.as_ref().map(|s| s.state_code.as_str()),
        venue.country.as_ref().map(|c| c.country_code.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let mut out = String::new();
    let _ = writeln!(out, "{}", venue.name);
    let _ = writeln!(out, "ID: {}", venue.id);
    let _ = writeln!(out, "Location: {}", if location.is_empty() { NOT_AVAILABLE } else { location.as_str() });
    let _ = writeln!(
        out,
        "Address: {}",
        or_na(venue.address.as_ref().map(|a| a.line1.as_str()))
    );
    match &venue.location {
        Some(geo) if !geo.latitude.is_empty() && !geo.longitude.is_empty() => {
            let _ = writeln!(out, "Coordinates: {}, {}", geo.latitude, geo.longitude);
        }
        _ => {
            let _ = writeln!(out, "Coordinates: {}", NOT_AVAILABLE);
        }
    }
    if !venue.markets.is_empty() {
        let ids: Vec<&str> = venue.markets.iter().map(|m| m.id.as_str()).collect();
        let _ = writeln!(out, "Markets: {}", ids.join(", "));
    }
    let _ = write!(out, "URL: {}", or_na(venue.url.as_deref()));
    out
}

// Primary classification wins; otherwise the first one listed
fn main_classification(attraction: &Attraction) -> Option<&Classification> {
    let all = attraction.classifications.as_deref()?;
    all.iter().find(|c| c.primary).or_else(|| all.first())
}

fn attraction_block(attraction: &Attraction) -> String {
    let classification = main_classification(attraction)
        .map(|c| {
            [
                Some(c.segment.name.as_str()),
                c.genre.as_ref().map(|g| g.name.as_str()),
                c.sub_genre.as_ref().map(|g| g.name.as_str()),
            ]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" / ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{}", attraction.name);
    let _ = writeln!(out, "ID: {}", attraction.id);
    let _ = writeln!(out, "Type: {}", or_na(attraction.kind.as_deref()));
    let _ = writeln!(out, "Classification: {}", classification);
    let _ = write!(out, "URL: {}", or_na(attraction.url.as_deref()));
    out
}
