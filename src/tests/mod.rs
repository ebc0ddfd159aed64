//! End-to-end tests driving the checks against an in-process fake MCP server.


use crate::{Config, McpHttpClient, Report, Runner, Status};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

type PingReply = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Scripted behavior of the fake server
#[derive(Clone)]
pub struct Behavior {
    pub health_status: StatusCode,
    /// Builds the ping response from the request id
    pub ping: PingReply,
    pub tools_list: Value,
    pub tools_call: Value,
    /// Answer every `/mcp` request with this non-JSON body instead
    pub garbage: Option<&'static str>,
    /// Added before answering `/health` and `tools/list`
    pub delay: Duration,
}

impl Behavior {
    /// A well-behaved server with two documented tools whose first tool
    /// rejects empty arguments
    pub fn healthy() -> Self {
        Self {
            health_status: StatusCode::OK,
            ping: Arc::new(|id: &Value| json!({ "jsonrpc": "2.0", "id": id, "result": {} })),
            tools_list: tools_response(json!([
                {
                    "name": "get_weather",
                    "description": "Look up the current weather for a city",
                    "inputSchema": {
                        "type": "object",
                        "properties": { "city": { "type": "string" } },
                        "required": ["city"],
                    },
                },
                {
                    "name": "list_cities",
                    "description": "List the cities with weather data",
                    "inputSchema": { "type": "object" },
                },
            ])),
            tools_call: json!({
                "jsonrpc": "2.0",
                "id": 2,
                "error": { "code": -32602, "message": "Missing required parameter: city" },
            }),
            garbage: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_health_status(mut self, status: StatusCode) -> Self {
        self.health_status = status;
        self
    }

    pub fn with_ping(mut self, reply: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.ping = Arc::new(reply);
        self
    }

    pub fn with_tools(mut self, tools: Value) -> Self {
        self.tools_list = tools_response(tools);
        self
    }

    pub fn with_tools_list(mut self, response: Value) -> Self {
        self.tools_list = response;
        self
    }

    pub fn with_tools_call(mut self, response: Value) -> Self {
        self.tools_call = response;
        self
    }

    pub fn with_garbage(mut self, body: &'static str) -> Self {
        self.garbage = Some(body);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub fn tools_response(tools: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": { "tools": tools } })
}

struct ServerState {
    behavior: Behavior,
    requests: Mutex<Vec<Value>>,
}

/// Fake MCP server bound to an ephemeral local port
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(ServerState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });
        let router = Router::new()
            .route("/health", get(health))
            .route("/mcp", post(mcp))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configuration with generous latency budgets so timing never warns
    pub fn config(&self) -> Config {
        Config::new(&self.endpoint())
            .unwrap()
            .with_health_budget(Duration::from_secs(5))
            .with_tools_list_budget(Duration::from_secs(5))
    }

    pub fn client(&self) -> McpHttpClient {
        McpHttpClient::new(&self.config()).unwrap()
    }

    /// JSON-RPC bodies received on `/mcp`, in order
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request["method"].as_str().unwrap_or_default().to_owned())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn health(State(state): State<Arc<ServerState>>) -> StatusCode {
    tokio::time::sleep(state.behavior.delay).await;
    state.behavior.health_status
}

async fn mcp(State(state): State<Arc<ServerState>>, Json(request): Json<Value>) -> Response {
    state.requests.lock().unwrap().push(request.clone());

    let behavior = &state.behavior;
    if let Some(body) = behavior.garbage {
        return body.into_response();
    }

    let reply = match request["method"].as_str() {
        Some("ping") => (behavior.ping)(&request["id"]),
        Some("tools/list") => {
            tokio::time::sleep(behavior.delay).await;
            behavior.tools_list.clone()
        }
        Some("tools/call") => behavior.tools_call.clone(),
        _ => json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": { "code": -32601, "message": "Method not found" },
        }),
    };
    Json(reply).into_response()
}

/// An endpoint nothing listens on
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Run every check against `config` and collect the findings
pub async fn run_all(config: &Config) -> Report {
    let mut report = Report::silent();
    Runner::new(config).unwrap().run(&mut report).await;
    report
}

/// Findings as plain lines, with the server address and timings masked
pub fn transcript(report: &Report, endpoint: &str) -> String {
    report
        .findings()
        .iter()
        .map(|finding| {
            let timed = ["Health response time", "Tools list response time"]
                .iter()
                .find(|prefix| finding.message.starts_with(*prefix));
            if let Some(what) = timed {
                format!("{}: {what}: [elapsed]", finding.status.label())
            } else {
                finding.to_string().replace(endpoint, "[endpoint]")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn count(report: &Report, status: Status) -> usize {
    report.messages(status).len()
}
