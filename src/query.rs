// Query builder: maps search criteria onto Discovery API query parameters

use crate::date_range::{end_of_day, start_of_day};
use crate::types::SearchQuery;
use chrono::{DateTime, TimeZone};

pub const API_KEY_PARAM: &str = "apikey";
pub const MAX_PAGE_SIZE: u32 = 200;
pub const DATE_ASCENDING: &str = "date,asc";

/// Ordered list of query parameters. Only explicitly pushed keys are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    // Absent means "do not send"; Some("") is still sent
    pub fn push_opt(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    fn push_constants(&mut self) {
        self.push("size", MAX_PAGE_SIZE.to_string());
        self.push("sort", DATE_ASCENDING);
    }
}

pub fn build_search_params(api_key: &str, query: &SearchQuery) -> QueryParams {
    let mut params = QueryParams::new();
    params.push(API_KEY_PARAM, api_key);
    params.push_opt("keyword", query.keyword.as_deref());
    if let Some(start) = &query.start_date_time {
        params.push("startDateTime", start_of_day(start));
    }
    if let Some(end) = &query.end_date_time {
        params.push("endDateTime", end_of_day(end));
    }
    params.push_opt("city", query.city.as_deref());
    params.push_opt("stateCode", query.state_code.as_deref());
    params.push_opt("countryCode", query.country_code.as_deref());
    params.push_opt("venueId", query.venue_id.as_deref());
    params.push_opt("attractionId", query.attraction_id.as_deref());
    params.push_opt("classificationName", query.classification_name.as_deref());
    params.push_constants();
    params
}

/// Parameters for listing every event at one venue within a date range.
pub fn build_venue_events_params<Tz: TimeZone>(
    api_key: &str,
    venue_id: &str,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> QueryParams {
    let mut params = QueryParams::new();
    params.push(API_KEY_PARAM, api_key);
    params.push("venueId", venue_id);
    params.push("startDateTime", start_of_day(start));
    params.push("endDateTime", end_of_day(end));
    params.push_constants();
    params
}
