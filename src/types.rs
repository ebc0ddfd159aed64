use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

/// Message substituted when an error payload carries no usable message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// JSON-RPC request id. Ping uses a string id, everything else a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl RequestId {
    /// Whether a response id echoes this one exactly, including its JSON type
    pub fn matches(&self, id: Option<&Value>) -> bool {
        match (self, id) {
            (RequestId::Number(n), Some(Value::Number(other))) => other.as_u64() == Some(*n),
            (RequestId::String(s), Some(Value::String(other))) => s == other,
            _ => false,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => f.write_str(s),
        }
    }
}

/// Outgoing JSON-RPC 2.0 request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: RequestId,
}

impl Request {
    pub fn new(method: &'static str, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: None,
            id,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn ping(id: impl Into<String>) -> Self {
        Self::new("ping", RequestId::String(id.into()))
    }

    pub fn tools_list() -> Self {
        Self::new("tools/list", RequestId::Number(1))
    }

    /// `tools/call` with an empty argument object
    pub fn tools_call(name: &str) -> Self {
        Self::new("tools/call", RequestId::Number(2)).with_params(json!({
            "name": name,
            "arguments": {},
        }))
    }
}

/// Whether a field counts as set: `null`, `false`, `0` and `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Error object of a JSON-RPC response
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub message: Option<String>,
}

impl RpcError {
    fn from_value(value: &Value) -> Self {
        Self {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_owned),
        }
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(UNKNOWN_ERROR)
    }
}

/// What a response carries besides its envelope fields
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `result` was present. Holds a non-truthy value (such as `null`) only
    /// when no truthy error came with it.
    Result(Value),
    Error(RpcError),
    /// Neither `result` nor `error`
    Empty,
}

/// Decoded JSON-RPC response envelope.
///
/// Decoding never fails: anything that is not a well-formed response (even a
/// bare JSON string) yields missing fields and `Payload::Empty`, and the raw
/// document is kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub jsonrpc: Option<String>,
    pub id: Option<Value>,
    pub payload: Payload,
    raw: Value,
}

impl Response {
    pub fn from_value(raw: Value) -> Self {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);

        let result = fields.get("result");
        let error = fields.get("error").filter(|error| is_truthy(error));

        let payload = match (result, error) {
            (Some(result), _) if is_truthy(result) => Payload::Result(result.clone()),
            (_, Some(error)) => Payload::Error(RpcError::from_value(error)),
            (Some(result), None) => Payload::Result(result.clone()),
            (None, None) => Payload::Empty,
        };

        Self {
            jsonrpc: fields
                .get("jsonrpc")
                .and_then(Value::as_str)
                .map(str::to_owned),
            id: fields.get("id").cloned(),
            payload,
            raw,
        }
    }

    pub fn is_jsonrpc_2(&self) -> bool {
        self.jsonrpc.as_deref() == Some(JSONRPC_VERSION)
    }

    /// A truthy `result`
    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Result(result) if is_truthy(result) => Some(result),
            _ => None,
        }
    }

    /// `result.tools`, when it is an array
    pub fn tools(&self) -> Option<Vec<ToolDescriptor>> {
        let tools = self.result()?.get("tools")?.as_array()?;
        Some(tools.iter().map(ToolDescriptor::from_value).collect())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Tool as advertised by `tools/list`.
///
/// Decoded leniently so that one malformed entry cannot fail the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Empty when the server sent no string name
    pub name: String,
    /// Only non-empty strings count as a description
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .filter(|description| !description.is_empty())
                .map(str::to_owned),
            input_schema: value
                .get("inputSchema")
                .filter(|schema| !schema.is_null())
                .cloned(),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    pub fn has_input_schema(&self) -> bool {
        self.input_schema.is_some()
    }
}
