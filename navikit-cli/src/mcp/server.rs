//! The MCP stdio server.
//!
//! Speaks JSON-RPC 2.0 over stdin/stdout, one message per line. Diagnostics
//! go to stderr via `tracing`, keeping stdout protocol-clean. Tool-level
//! failures (bad input, provider errors) come back as `isError` results;
//! JSON-RPC errors are reserved for protocol violations.

use base64::prelude::*;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use navikit_maps::{BillingClient, MapsClient, MapsError};

use super::inputs::{
    DirectionsInput, GeocodeInput, ReverseGeocodeInput, StaticMapInput, UsageInput,
};
use super::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo, Tool,
    ToolCallParams, ToolCallResult, ToolsCapability, ToolsListResult, error_codes,
};
use crate::config::Config;
use crate::output::format::{current_month, to_yyyymm};
use crate::output::report;

const SERVER_NAME: &str = "navikit";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server exposing the Maps operations as tools.
pub struct McpServer {
    maps: MapsClient,
    billing: Option<BillingClient>,
}

impl McpServer {
    /// Builds the server and its endpoint clients from the configuration.
    ///
    /// The usage tool is registered only when the billing credential is
    /// configured.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, MapsError> {
        let policy = config.retry_policy();
        let maps = MapsClient::new(
            config.naver.client_id.clone(),
            config.naver.client_secret.clone(),
            policy,
        )?;
        let billing = match &config.ncloud {
            Some(keys) => Some(BillingClient::new(
                keys.access_key.clone(),
                keys.secret_key.clone(),
                policy,
            )?),
            None => None,
        };
        Ok(Self { maps, billing })
    }

    /// Runs the stdio loop until stdin closes.
    ///
    /// # Errors
    ///
    /// Propagates stdio failures; individual request failures are answered
    /// in-protocol and never end the loop.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(
            billing = self.billing.is_some(),
            "MCP server listening on stdio"
        );

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response)?;
                stdout.write_all(json.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handles one JSON-RPC message. Notifications get no response.
    async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Failed to parse request: {e}"),
                ));
            }
        };

        // Notifications (no id) are acknowledged silently.
        let Some(id) = request.id else {
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "tools/list" => Ok(self.tools_list_result()),
            "tools/call" => self.handle_tool_call(request.params).await,
            other => Err((
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(Some(id), value),
            Err((code, message)) => JsonRpcResponse::error(Some(id), code, message),
        })
    }

    fn initialize_result(&self) -> Value {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };
        serde_json::to_value(result).unwrap_or(Value::Null)
    }

    fn tools_list_result(&self) -> Value {
        let mut tools = vec![
            Tool {
                name: "navermap_geocode".to_string(),
                description: "Convert an address to coordinates (longitude, latitude). Road and \
                              lot-number addresses both work."
                    .to_string(),
                input_schema: GeocodeInput::schema(),
            },
            Tool {
                name: "navermap_reverse_geocode".to_string(),
                description: "Convert a coordinate (longitude, latitude) to addresses: legal \
                              district, administrative district, lot address, road address."
                    .to_string(),
                input_schema: ReverseGeocodeInput::schema(),
            },
            Tool {
                name: "navermap_get_directions".to_string(),
                description: "Search a driving route between two points, with distance, \
                              duration, toll fare, taxi fare, and fuel cost."
                    .to_string(),
                input_schema: DirectionsInput::schema(),
            },
            Tool {
                name: "navermap_get_static_map".to_string(),
                description: "Render a static map image centered on a coordinate, with \
                              optional markers and paths."
                    .to_string(),
                input_schema: StaticMapInput::schema(),
            },
        ];
        if self.billing.is_some() {
            tools.push(Tool {
                name: "navermap_get_usage".to_string(),
                description: "Report monthly Naver Maps API usage, cost, and usage rate \
                              against the free-tier limits, with warnings."
                    .to_string(),
                input_schema: UsageInput::schema(),
            });
        }

        serde_json::to_value(ToolsListResult { tools }).unwrap_or(Value::Null)
    }

    async fn handle_tool_call(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                (
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tool call params: {e}"),
                )
            })?
            .ok_or((error_codes::INVALID_PARAMS, "Missing params".to_string()))?;

        info!(tool = %params.name, "tool call");
        let result = self.call_tool(&params.name, params.arguments).await?;
        serde_json::to_value(result)
            .map_err(|e| (error_codes::INTERNAL_ERROR, format!("Serialization error: {e}")))
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolCallResult, (i32, String)> {
        match name {
            "navermap_geocode" => Ok(self.geocode_tool(args).await),
            "navermap_reverse_geocode" => Ok(self.reverse_geocode_tool(args).await),
            "navermap_get_directions" => Ok(self.directions_tool(args).await),
            "navermap_get_static_map" => Ok(self.static_map_tool(args).await),
            "navermap_get_usage" => Ok(self.usage_tool(args).await),
            other => Err((
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {other}"),
            )),
        }
    }

    async fn geocode_tool(&self, args: Value) -> ToolCallResult {
        let input: GeocodeInput = match parse_args(args) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let request = match input.into_request() {
            Ok(request) => request,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };
        match self.maps.geocode(&request).await {
            Ok(result) => ToolCallResult::text(report::render_geocode(&result, &request.query)),
            Err(e) => ToolCallResult::error(failure_text(&e)),
        }
    }

    async fn reverse_geocode_tool(&self, args: Value) -> ToolCallResult {
        let input: ReverseGeocodeInput = match parse_args(args) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let request = match input.into_request() {
            Ok(request) => request,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };
        match self.maps.reverse_geocode(&request).await {
            Ok(result) => {
                ToolCallResult::text(report::render_reverse_geocode(&result, &request.coords))
            }
            Err(e) => ToolCallResult::error(failure_text(&e)),
        }
    }

    async fn directions_tool(&self, args: Value) -> ToolCallResult {
        let input: DirectionsInput = match parse_args(args) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let request = match input.into_request() {
            Ok(request) => request,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };
        match self.maps.directions(&request).await {
            Ok(routes) => ToolCallResult::text(report::render_directions(
                &routes,
                request.option,
                &request.start,
                &request.goal,
            )),
            Err(e) => ToolCallResult::error(failure_text(&e)),
        }
    }

    async fn static_map_tool(&self, args: Value) -> ToolCallResult {
        let input: StaticMapInput = match parse_args(args) {
            Ok(input) => input,
            Err(result) => return result,
        };
        let request = match input.into_request() {
            Ok(request) => request,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };
        match self.maps.static_map(&request).await {
            Ok(image) => ToolCallResult::image(
                BASE64_STANDARD.encode(&image),
                "image/png".to_string(),
                report::render_static_map_summary(&request),
            ),
            Err(e) => ToolCallResult::error(failure_text(&e)),
        }
    }

    async fn usage_tool(&self, args: Value) -> ToolCallResult {
        let Some(billing) = &self.billing else {
            return ToolCallResult::error(
                "Usage lookup requires the NCLOUD_ACCESS_KEY and NCLOUD_SECRET_KEY \
                 environment variables."
                    .to_string(),
            );
        };

        let input: UsageInput = match parse_args(args) {
            Ok(input) => input,
            Err(result) => return result,
        };
        if let Err(e) = input.validate() {
            return ToolCallResult::error(e.to_string());
        }

        let month = input.month.unwrap_or_else(current_month);
        match billing.monthly_usage_report(&to_yyyymm(&month)).await {
            Ok(usage) => ToolCallResult::text(report::render_usage(&usage, &month)),
            Err(e) => ToolCallResult::error(failure_text(&e)),
        }
    }
}

/// Deserializes tool arguments, turning malformed input into an `isError`
/// result rather than a protocol error.
fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolCallResult> {
    // Tools with no required fields accept omitted arguments.
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| ToolCallResult::error(format!("Invalid arguments: {e}")))
}

/// User-facing text for an endpoint failure.
fn failure_text(err: &MapsError) -> String {
    err.to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn test_config(with_billing: bool) -> Config {
        Config::from_lookup(|name| match name {
            "NAVER_CLIENT_ID" => Some("id".to_string()),
            "NAVER_CLIENT_SECRET" => Some("secret".to_string()),
            "NCLOUD_ACCESS_KEY" if with_billing => Some("ak".to_string()),
            "NCLOUD_SECRET_KEY" if with_billing => Some("sk".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_tool_capability() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "navikit");
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn usage_tool_is_listed_only_with_billing_keys() {
        let without = McpServer::new(&test_config(false)).unwrap();
        let response = without
            .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 4);

        let with = McpServer::new(&test_config(true)).unwrap();
        let response = with
            .handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools: Vec<String> = response.result.unwrap()["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(tools.len(), 5);
        assert!(tools.contains(&"navermap_get_usage".to_string()));
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn unknown_method_is_a_protocol_error() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"navermap_teleport"}}"#,
            )
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn usage_without_billing_keys_is_a_tool_error() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let result = server
            .call_tool("navermap_get_usage", json!({}))
            .await
            .unwrap();
        assert!(result.is_error);
        match &result.content[0] {
            crate::mcp::protocol::ToolContent::Text { text } => {
                assert!(text.contains("NCLOUD_ACCESS_KEY"));
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_tool_arguments_are_a_tool_error() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let result = server
            .call_tool("navermap_geocode", json!({"query": "Seoul", "bogus": 1}))
            .await
            .unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn invalid_coordinate_is_a_tool_error() {
        let server = McpServer::new(&test_config(false)).unwrap();
        let result = server
            .call_tool("navermap_get_static_map", json!({"center": "not-a-coord"}))
            .await
            .unwrap();
        assert!(result.is_error);
    }
}
