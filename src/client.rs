// Discovery API client: one GET per operation, envelope unwrapped into flat entity lists

use crate::config::ClientConfig;
use crate::error::{classify, fallback_message, Result, TicketmasterError, TransportError};
use crate::query::{build_search_params, build_venue_events_params, QueryParams};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{Attraction, Envelope, Event, SearchQuery, SearchRequest, SearchResults, SearchType, Venue};
use chrono::{DateTime, TimeZone};
use tracing::{debug, warn};

/// Madison Square Garden
pub const MSG_VENUE_ID: &str = "KovZpZA7AAEA";

pub struct TicketmasterClient<T = ReqwestTransport> {
    api_key: String,
    base_url: String,
    transport: T,
}

impl TicketmasterClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> TicketmasterClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TicketmasterError::ConfigError("API key is required".to_string()));
        }
        Ok(Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        match request.search_type {
            SearchType::Event => self.search_events(&request.query).await.map(SearchResults::Events),
            SearchType::Venue => self.search_venues(&request.query).await.map(SearchResults::Venues),
            SearchType::Attraction => self
                .search_attractions(&request.query)
                .await
                .map(SearchResults::Attractions),
        }
    }

    pub async fn search_events(&self, query: &SearchQuery) -> Result<Vec<Event>> {
        let params = build_search_params(&self.api_key, query);
        Ok(self.fetch(SearchType::Event, &params).await?.into_events())
    }

    pub async fn search_venues(&self, query: &SearchQuery) -> Result<Vec<Venue>> {
        let params = build_search_params(&self.api_key, query);
        Ok(self.fetch(SearchType::Venue, &params).await?.into_venues())
    }

    pub async fn search_attractions(&self, query: &SearchQuery) -> Result<Vec<Attraction>> {
        let params = build_search_params(&self.api_key, query);
        Ok(self.fetch(SearchType::Attraction, &params).await?.into_attractions())
    }

    /// Every event at Madison Square Garden between the two dates, whole days inclusive.
    pub async fn get_events_at_venue<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Vec<Event>> {
        let params = build_venue_events_params(&self.api_key, MSG_VENUE_ID, start, end);
        Ok(self.fetch(SearchType::Event, &params).await?.into_events())
    }

    async fn fetch(&self, search_type: SearchType, params: &QueryParams) -> Result<Envelope> {
        let resource = search_type.resource();
        let url = format!("{}/{}", self.base_url, resource);
        debug!(resource, params = params.len(), "Sending discovery request");

        let outcome = self.transport.get(&url, params).await;
        let response = classify(outcome, &fallback_message(resource)).map_err(|err| {
            warn!(resource, error = %err, "Discovery request failed");
            err
        })?;

        let envelope: Envelope = serde_json::from_slice(&response.body)
            .map_err(|source| TransportError::Decode { resource, source })?;

        match &envelope.page {
            Some(page) => debug!(
                resource,
                total_elements = page.total_elements,
                total_pages = page.total_pages,
                page = page.number,
                "Discovery response received"
            ),
            None => debug!(resource, "Discovery response received without page info"),
        }

        Ok(envelope)
    }
}
