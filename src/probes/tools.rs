use crate::{McpHttpClient, Payload, Report, Request, ToolDescriptor, is_truthy};

/// Error messages at or below this many characters are flagged as unhelpful.
///
/// Characters are Unicode scalar values, not UTF-16 code units, so a message
/// of six emoji counts as 6 and is flagged.
pub const DESCRIPTIVE_ERROR_MIN_CHARS: usize = 10;

/// `tools/list` must return `result.tools` as an array.
///
/// The returned list feeds the schema and sample-call probes; it is empty on
/// any failure so those still run.
pub async fn list(client: &McpHttpClient, report: &mut Report) -> Vec<ToolDescriptor> {
    report.info("Testing tools/list endpoint");

    let response = match client.call(&Request::tools_list()).await {
        Ok(response) => response,
        Err(err) => {
            report.fail(format!("Tools list error: {err}"));
            return Vec::new();
        }
    };

    let Some(tools) = response.tools() else {
        report.fail(format!("Tools list failed - response: {response}"));
        return Vec::new();
    };

    report.pass(format!("Tools list returns {} tools", tools.len()));
    if tools.is_empty() {
        report.warn("No tools exposed - verify OpenAPI spec is loaded");
    }
    tools
}

/// Missing descriptions and missing input schemas each produce at most one
/// aggregated warning.
pub fn validate_schemas(tools: &[ToolDescriptor], report: &mut Report) {
    report.info("Validating tool schemas");

    let missing_descriptions = tools.iter().filter(|tool| !tool.has_description()).count();
    if missing_descriptions == 0 {
        report.pass("All tools have descriptions");
    } else {
        report.warn(format!("{missing_descriptions} tools missing descriptions"));
    }

    let missing_schemas = tools.iter().filter(|tool| !tool.has_input_schema()).count();
    if missing_schemas == 0 {
        report.pass("All tools have input schemas");
    } else {
        report.warn(format!("{missing_schemas} tools missing input schemas"));
    }
}

/// Call the first advertised tool with empty arguments.
///
/// An error response is acceptable since most tools require arguments; only
/// its message quality is judged.
pub async fn sample_call(client: &McpHttpClient, tools: &[ToolDescriptor], report: &mut Report) {
    report.info("Testing sample tool call");

    let Some(tool) = tools.first() else {
        report.warn("No tools available to test");
        return;
    };
    report.info(format!("Calling tool: {}", tool.name));

    let response = match client.call(&Request::tools_call(&tool.name)).await {
        Ok(response) => response,
        Err(err) => {
            report.fail(format!("Tool call error: {err}"));
            return;
        }
    };

    match &response.payload {
        Payload::Result(result) if is_truthy(result) => report.pass("Tool call succeeded"),
        Payload::Error(error) => {
            let message = error.message_or_default();
            report.info(format!(
                "Tool call returned error (expected for tools requiring params): {message}"
            ));

            if message.chars().count() > DESCRIPTIVE_ERROR_MIN_CHARS {
                report.pass("Error message is descriptive");
            } else {
                report.warn(format!("Error message may not be helpful: {message}"));
            }
        }
        Payload::Result(_) | Payload::Empty => {
            report.fail(format!("Unexpected response: {response}"))
        }
    }
}
