use crate::{McpHttpClient, Payload, Report, Request, RequestId, Response};
use serde_json::Value;

/// Ping ids are drawn from this range and sent as strings
pub const ID_RANGE: std::ops::Range<u32> = 1000..2000;

pub async fn run(client: &McpHttpClient, report: &mut Report) {
    let id = fastrand::u32(ID_RANGE).to_string();
    run_with_id(client, id, report).await;
}

/// Ping with a fixed id
pub async fn run_with_id(client: &McpHttpClient, id: String, report: &mut Report) {
    report.info(format!("Testing MCP ping (POST): {}", client.ping_url()));

    let request = Request::ping(id);
    match client.ping(&request).await {
        Ok(response) if is_valid_pong(&request.id, &response) => {
            report.pass("MCP ping returns valid JSON-RPC response")
        }
        Ok(response) => report.fail(format!("MCP ping failed - response: {response}")),
        Err(err) => report.fail(format!("MCP ping error: {err}")),
    }
}

/// `jsonrpc` is "2.0", the id is echoed with the same type, and `result` is
/// present as either null or an object.
///
/// Arrays are rejected: MCP defines the ping result as an (empty) object, and
/// an array there is a shape error even though JSON-RPC itself would allow
/// it.
fn is_valid_pong(id: &RequestId, response: &Response) -> bool {
    response.is_jsonrpc_2()
        && id.matches(response.id.as_ref())
        && matches!(
            response.payload,
            Payload::Result(Value::Null) | Payload::Result(Value::Object(_))
        )
}
