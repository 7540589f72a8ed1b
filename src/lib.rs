// Ticketmaster Discovery API exposed as MCP tools

pub mod client;
pub mod config;
pub mod date_range;
pub mod error;
pub mod format;
pub mod logging;
pub mod query;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export key types for convenience
pub use client::{TicketmasterClient, MSG_VENUE_ID};
pub use config::{ClientConfig, ServerConfig};
pub use date_range::{format_date_range, parse_date_input, DateRange};
pub use error::{ApiError, InvocationError, TicketmasterError, TransportError};
pub use format::{format_results, OutputFormat};
pub use logging::init_tracing;
pub use query::{build_search_params, build_venue_events_params, QueryParams};
pub use server::McpServer;
pub use tools::{tool_definitions, ToolHandler, SEARCH_TOOL};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    Attraction, Event, SearchQuery, SearchRequest, SearchResults, SearchType, Venue,
};
