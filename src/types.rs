// Data model for the Discovery API: search requests, upstream entities and envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Kind of entity a search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Event,
    Venue,
    Attraction,
}

impl SearchType {
    pub const ALL: [SearchType; 3] = [SearchType::Event, SearchType::Venue, SearchType::Attraction];

    /// Upstream resource path segment, also the key under `_embedded`.
    pub fn resource(self) -> &'static str {
        match self {
            SearchType::Event => "events",
            SearchType::Venue => "venues",
            SearchType::Attraction => "attractions",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Event => "event",
            SearchType::Venue => "venue",
            SearchType::Attraction => "attraction",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(SearchType::Event),
            "venue" => Ok(SearchType::Venue),
            "attraction" => Ok(SearchType::Attraction),
            other => Err(format!("Invalid search type: {}", other)),
        }
    }
}

// Optional search criteria shared by every search type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub country_code: Option<String>,
    pub venue_id: Option<String>,
    pub attraction_id: Option<String>,
    pub classification_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub search_type: SearchType,
    pub query: SearchQuery,
}

impl SearchRequest {
    pub fn new(search_type: SearchType) -> Self {
        Self {
            search_type,
            query: SearchQuery::default(),
        }
    }
}

// Entities as returned by the Discovery API. Optional fields are skipped on
// serialization so that a serialize/parse cycle reproduces the same value.

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dates: EventDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<Vec<PriceRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventDates {
    #[serde(default)]
    pub start: EventStart,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceRange {
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default)]
    pub markets: Vec<Market>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct State {
    pub name: String,
    pub state_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Address {
    pub line1: String,
}

// Coordinates come back from upstream as strings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoLocation {
    pub longitude: String,
    pub latitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Market {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub segment: NamedRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_genre: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

// Paginated response wrapper. `_embedded` is absent when nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
    #[serde(default)]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[serde(default)]
    pub venues: Option<Vec<Venue>>,
    #[serde(default)]
    pub attractions: Option<Vec<Attraction>>,
}

impl Envelope {
    pub fn into_events(self) -> Vec<Event> {
        self.embedded.and_then(|e| e.events).unwrap_or_default()
    }

    pub fn into_venues(self) -> Vec<Venue> {
        self.embedded.and_then(|e| e.venues).unwrap_or_default()
    }

    pub fn into_attractions(self) -> Vec<Attraction> {
        self.embedded.and_then(|e| e.attractions).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

// Upstream fault body: {"fault":{"faultstring":..,"detail":{"errorcode":..}}}
#[derive(Debug, Default, Deserialize)]
pub struct FaultBody {
    #[serde(default)]
    pub fault: Option<ApiFault>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiFault {
    #[serde(default)]
    pub faultstring: Option<String>,
    #[serde(default)]
    pub detail: Option<FaultDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaultDetail {
    #[serde(default)]
    pub errorcode: Option<String>,
}

/// Normalized result of one search, tagged by entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Events(Vec<Event>),
    Venues(Vec<Venue>),
    Attractions(Vec<Attraction>),
}

impl SearchResults {
    pub fn search_type(&self) -> SearchType {
        match self {
            SearchResults::Events(_) => SearchType::Event,
            SearchResults::Venues(_) => SearchType::Venue,
            SearchResults::Attractions(_) => SearchType::Attraction,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Events(items) => items.len(),
            SearchResults::Venues(items) => items.len(),
            SearchResults::Attractions(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
