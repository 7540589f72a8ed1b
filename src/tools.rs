// Tool surface: the `search_ticketmaster` contract, argument decoding and dispatch

use crate::client::TicketmasterClient;
use crate::date_range::parse_date_input;
use crate::error::{InvocationError, Result, TicketmasterError};
use crate::format::{format_results, OutputFormat};
use crate::transport::HttpTransport;
use crate::types::{SearchQuery, SearchRequest, SearchType};
use rmcp::model::{object, CallToolResult, Content, Tool};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

pub const SEARCH_TOOL: &str = "search_ticketmaster";

// Raw tool arguments as sent by the caller. `type` stays a string so an
// unsupported value can be reported as invalid params.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArguments {
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub format: Option<String>,
    pub keyword: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub country_code: Option<String>,
    pub venue_id: Option<String>,
    pub attraction_id: Option<String>,
    pub classification_name: Option<String>,
}

impl SearchArguments {
    pub fn into_request(self) -> std::result::Result<(SearchRequest, OutputFormat), InvocationError> {
        let search_type = match self.search_type.as_deref() {
            Some(raw) => raw.parse::<SearchType>().map_err(InvocationError::InvalidParams)?,
            None => {
                return Err(InvocationError::InvalidParams(
                    "Missing required argument: type".to_string(),
                ))
            }
        };
        let format = match self.format.as_deref() {
            Some(raw) => raw.parse::<OutputFormat>().map_err(InvocationError::InvalidParams)?,
            None => OutputFormat::default(),
        };
        // Blank dates count as absent
        let parse_date = |raw: Option<String>| {
            raw.filter(|value| !value.trim().is_empty())
                .map(|value| parse_date_input(&value))
                .transpose()
                .map_err(|err| InvocationError::InvalidParams(err.to_string()))
        };

        let query = SearchQuery {
            keyword: self.keyword,
            start_date_time: parse_date(self.start_date)?,
            end_date_time: parse_date(self.end_date)?,
            city: self.city,
            state_code: self.state_code,
            country_code: self.country_code,
            venue_id: self.venue_id,
            attraction_id: self.attraction_id,
            classification_name: self.classification_name,
        };
        Ok((SearchRequest { search_type, query }, format))
    }
}

pub fn tool_definitions() -> Vec<Tool> {
    vec![Tool::new(
        SEARCH_TOOL,
        "Search for events, venues, or attractions on Ticketmaster",
        object(json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["event", "venue", "attraction"],
                    "description": "Type of search to perform"
                },
                "keyword": {"type": "string", "description": "Search keyword or term"},
                "startDate": {"type": "string", "description": "Start date in YYYY-MM-DD format"},
                "endDate": {"type": "string", "description": "End date in YYYY-MM-DD format"},
                "city": {"type": "string", "description": "City name"},
                "stateCode": {"type": "string", "description": "State code (e.g., NY, CA)"},
                "countryCode": {"type": "string", "description": "Country code (e.g., US, CA)"},
                "venueId": {"type": "string", "description": "Specific venue ID to search"},
                "attractionId": {"type": "string", "description": "Specific attraction ID to search"},
                "classificationName": {
                    "type": "string",
                    "description": "Event classification/category (e.g., \"Sports\", \"Music\")"
                },
                "format": {
                    "type": "string",
                    "enum": ["json", "text"],
                    "description": "Output format (defaults to json)",
                    "default": "json"
                }
            },
            "required": ["type"]
        })),
    )]
}

pub struct ToolHandler<T: HttpTransport> {
    client: TicketmasterClient<T>,
}

impl<T: HttpTransport> ToolHandler<T> {
    pub fn new(client: TicketmasterClient<T>) -> Self {
        Self { client }
    }

    /// Runs a tool invocation. Upstream faults come back as `Ok` with
    /// `is_error` set; everything else that goes wrong is an `Err`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult> {
        if name != SEARCH_TOOL {
            return Err(InvocationError::MethodNotFound(name.to_string()).into());
        }

        let arguments = match arguments {
            Value::Null => json!({}),
            Value::Object(_) => arguments,
            _ => {
                return Err(InvocationError::InvalidParams(
                    "Invalid arguments: expected an object".to_string(),
                )
                .into())
            }
        };
        let args: SearchArguments = serde_json::from_value(arguments)
            .map_err(|err| InvocationError::InvalidParams(format!("Invalid arguments: {}", err)))?;
        let (request, format) = args.into_request()?;

        info!(search_type = %request.search_type, ?format, "Running search");
        match self.client.search(&request).await {
            Ok(results) => {
                info!(search_type = %request.search_type, count = results.len(), "Search completed");
                Ok(CallToolResult::success(vec![Content::text(format_results(&results, format))]))
            }
            Err(TicketmasterError::UpstreamFault(fault)) => {
                warn!(search_type = %request.search_type, error = %fault, "Upstream rejected search");
                Ok(CallToolResult::error(vec![Content::text(format!("Error: {}", fault))]))
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::TransportError;
    use crate::transport::mock_transport::MockTransport;
    use test_case::test_case;

    fn text(result: &CallToolResult) -> &str {
        result.content[0].as_text().map(|content| content.text.as_str()).unwrap()
    }

    fn handler(transport: MockTransport) -> ToolHandler<MockTransport> {
        let client = TicketmasterClient::with_transport(ClientConfig::with_api_key("k"), transport).unwrap();
        ToolHandler::new(client)
    }

    #[test]
    fn test_tool_definition_schema() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, SEARCH_TOOL);
        let schema = &tools[0].input_schema;
        assert_eq!(schema["required"], json!(["type"]));
        assert_eq!(schema["properties"]["type"]["enum"], json!(["event", "venue", "attraction"]));
        assert_eq!(schema["properties"]["format"]["default"], "json");

        let serialized = serde_json::to_value(&tools[0]).unwrap();
        assert!(serialized.get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_event_search_json_scenario() {
        let transport = MockTransport::new();
        transport
            .respond_json(
                200,
                r#"{"_embedded":{"events":[{"id":"e1","name":"Knicks vs. Heat","dates":{"start":{"localDate":"2024-01-10"}},"images":[]}]}}"#,
            )
            .await;
        let handler = handler(transport.clone());

        let result = handler
            .call_tool(
                SEARCH_TOOL,
                json!({
                    "type": "event",
                    "venueId": "KovZpZA7AAEA",
                    "startDate": "2024-01-01",
                    "endDate": "2024-01-31",
                    "format": "json"
                }),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        let events: Vec<crate::types::Event> = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(events[0].id, "e1");

        let sent = &transport.requests().await[0];
        assert_eq!(sent.params.get("startDateTime"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(sent.params.get("endDateTime"), Some("2024-01-31T23:59:59Z"));
        assert_eq!(sent.params.get("venueId"), Some("KovZpZA7AAEA"));
        assert_eq!(sent.params.get("size"), Some("200"));
        assert_eq!(sent.params.get("sort"), Some("date,asc"));
    }

    #[tokio::test]
    async fn test_empty_results_render_as_empty_json_list() {
        let transport = MockTransport::new();
        transport.respond_json(200, "{}").await;
        let handler = handler(transport);

        let result = handler.call_tool(SEARCH_TOOL, json!({"type": "event"})).await.unwrap();
        assert_eq!(text(&result), "[]");
    }

    #[tokio::test]
    async fn test_text_format() {
        let transport = MockTransport::new();
        transport
            .respond_json(200, r#"{"_embedded":{"attractions":[{"id":"a1","name":"Phish","type":"attraction"}]}}"#)
            .await;
        let handler = handler(transport);

        let result = handler
            .call_tool(SEARCH_TOOL, json!({"type": "attraction", "keyword": "phish", "format": "text"}))
            .await
            .unwrap();
        assert!(text(&result).contains("Phish"));
        assert!(text(&result).contains("Classification: N/A"));
    }

    #[tokio::test]
    async fn test_partial_nested_objects_still_decode() {
        let transport = MockTransport::new();
        transport
            .respond_json(
                200,
                r#"{"_embedded":{"venues":[
                    {"id":"v1","name":"Sparse Hall","city":{},"state":{"name":"Ohio"},"country":{"name":"United States Of America"},"address":{}},
                    {"id":"v2","name":"Madison Square Garden","city":{"name":"New York"},
                     "state":{"name":"New York","stateCode":"NY"},"country":{"name":"United States Of America","countryCode":"US"},
                     "address":{"line1":"7th Ave & 32nd Street"}}
                ]}}"#,
            )
            .await;
        transport
            .respond_json(
                200,
                r#"{"_embedded":{"attractions":[{"id":"a1","name":"Mystery Act","classifications":[{"primary":true,"genre":{"id":"g","name":"Rock"}}]}]}}"#,
            )
            .await;
        let handler = handler(transport);

        let result = handler
            .call_tool(SEARCH_TOOL, json!({"type": "venue", "format": "text"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        let venues = text(&result);
        assert!(venues.starts_with("Found 2 venues:"));
        assert!(venues.contains("Sparse Hall"));
        assert!(venues.contains("Address: N/A"));
        assert!(venues.contains("Location: N/A"));
        assert!(venues.contains("Location: New York, NY, US"));
        assert!(venues.contains("Address: 7th Ave & 32nd Street"));

        let result = handler
            .call_tool(SEARCH_TOOL, json!({"type": "attraction", "format": "text"}))
            .await
            .unwrap();
        assert!(text(&result).contains("Classification: Rock"));
    }

    #[tokio::test]
    async fn test_upstream_fault_is_soft_error() {
        let transport = MockTransport::new();
        transport
            .respond_json(
                404,
                r#"{"fault":{"faultstring":"Invalid venue","detail":{"errorcode":"TM-404"}}}"#,
            )
            .await;
        let handler = handler(transport);

        let result = handler
            .call_tool(SEARCH_TOOL, json!({"type": "event", "venueId": "nope"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("Invalid venue"));
        assert!(text(&result).contains("TM-404"));
        assert!(text(&result).contains("404"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_method_not_found() {
        let transport = MockTransport::new();
        let handler = handler(transport.clone());

        let err = handler.call_tool("buy_tickets", json!({"type": "event"})).await.unwrap_err();
        assert!(matches!(
            err,
            TicketmasterError::InvalidInvocation(InvocationError::MethodNotFound(ref name)) if name == "buy_tickets"
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[test_case(json!({"type": "festival"}), "festival"; "unsupported type")]
    #[test_case(json!({}), "type"; "missing type")]
    #[test_case(json!(null), "type"; "null arguments")]
    #[test_case(json!({"type": "event", "format": "xml"}), "xml"; "unsupported format")]
    #[test_case(json!({"type": "event", "startDate": "next friday"}), "next friday"; "bad date")]
    #[test_case(json!({"type": "event", "keyword": 7}), "Invalid arguments"; "wrong field type")]
    #[test_case(json!(["event"]), "Invalid arguments"; "not an object")]
    #[tokio::test]
    async fn test_invalid_params(arguments: Value, expected_fragment: &str) {
        let transport = MockTransport::new();
        let handler = handler(transport.clone());

        match handler.call_tool(SEARCH_TOOL, arguments).await {
            Err(TicketmasterError::InvalidInvocation(InvocationError::InvalidParams(msg))) => {
                assert!(msg.contains(expected_fragment), "{} should mention {}", msg, expected_fragment)
            }
            other => panic!("Expected invalid params, got {:?}", other),
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[test_case(json!({"type": "event", "startDate": "", "endDate": "   "}); "blank start and end")]
    #[test_case(json!({"type": "event", "startDate": " \t"}); "whitespace start")]
    #[test_case(json!({"type": "event", "endDate": ""}); "empty end")]
    #[tokio::test]
    async fn test_blank_dates_are_not_sent(arguments: Value) {
        let transport = MockTransport::new();
        transport.respond_json(200, "{}").await;
        let handler = handler(transport.clone());

        let result = handler.call_tool(SEARCH_TOOL, arguments).await.unwrap();
        assert_eq!(result.is_error, Some(false));

        let sent = &transport.requests().await[0];
        assert!(!sent.params.contains("startDateTime"));
        assert!(!sent.params.contains("endDateTime"));
    }

    #[tokio::test]
    async fn test_result_wire_shape() {
        let transport = MockTransport::new();
        transport.respond_json(200, "{}").await;
        let handler = handler(transport);

        let result = handler.call_tool(SEARCH_TOOL, json!({"type": "venue"})).await.unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"content": [{"type": "text", "text": "[]"}], "isError": false})
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_hard_error() {
        let transport = MockTransport::new();
        transport.fail_network("dns lookup failed").await;
        let handler = handler(transport);

        let err = handler.call_tool(SEARCH_TOOL, json!({"type": "venue"})).await.unwrap_err();
        assert!(matches!(err, TicketmasterError::TransportError(TransportError::Other(_))));
    }
}
