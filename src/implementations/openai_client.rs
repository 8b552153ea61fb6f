use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde_json::{ json, Value };
use thiserror::Error;

use crate::errors::{ MathError, MathResult };
use crate::implementations::config::{ ConfigError, ModelConfig, PipelineConfig };
use crate::traits::model_client::{ ModelClient, ModelInput, ModelRequest };
use crate::traits::tool::Tool;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")] NetworkError(String),

    #[error("Request timed out after {0}s")] Timeout(u64),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("Model refused to answer: {0}")] Refusal(String),

    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),
}

impl ClientError {
    /// Map onto the pipeline taxonomy; `schema` names the expected output
    pub fn into_math_error(self, schema: &str) -> MathError {
        match self {
            ClientError::NetworkError(_) |
            ClientError::Timeout(_) |
            ClientError::HttpError { .. } => MathError::ModelInvocation(self.to_string()),
            ClientError::ParseError(msg) => MathError::schema_violation(schema, msg),
            ClientError::Refusal(msg) =>
                MathError::schema_violation(schema, format!("model refused: {}", msg)),
            ClientError::ConfigError(err) => MathError::from(err),
        }
    }
}

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON-encoded arguments string
    pub arguments: String,
}

/// What the model did in one completion
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ChatTurn {
    /// Final structured answer, still JSON-encoded
    Answer(String),
    /// Tool calls to run before asking again; keeps the assistant message for the transcript
    ToolCalls {
        assistant_message: Value,
        calls: Vec<ToolCall>,
    },
}

/// Extract the answer or the requested tool calls from a chat completion body
pub(crate) fn parse_chat_response(body: &Value) -> Result<ChatTurn, ClientError> {
    let message = body["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .map(|choice| &choice["message"])
        .filter(|message| message.is_object())
        .ok_or_else(|| ClientError::ParseError("response has no choices".to_string()))?;

    if let Some(refusal) = message["refusal"].as_str() {
        return Err(ClientError::Refusal(refusal.to_string()));
    }

    if let Some(raw_calls) = message["tool_calls"].as_array() {
        if !raw_calls.is_empty() {
            let calls = raw_calls
                .iter()
                .map(|call| {
                    let id = call["id"].as_str();
                    let name = call["function"]["name"].as_str();
                    match (id, name) {
                        (Some(id), Some(name)) =>
                            Ok(ToolCall {
                                id: id.to_string(),
                                name: name.to_string(),
                                arguments: call["function"]["arguments"]
                                    .as_str()
                                    .unwrap_or("{}")
                                    .to_string(),
                            }),
                        _ => Err(ClientError::ParseError("malformed tool call".to_string())),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(ChatTurn::ToolCalls {
                assistant_message: message.clone(),
                calls,
            });
        }
    }

    message["content"]
        .as_str()
        .map(|content| ChatTurn::Answer(content.to_string()))
        .ok_or_else(|| ClientError::ParseError("response message has no content".to_string()))
}

/// Run one tool call locally; failures are reported back to the model as JSON
pub(crate) fn run_tool_call(tools: &[Arc<dyn Tool>], call: &ToolCall) -> Value {
    let Some(tool) = tools.iter().find(|t| t.name() == call.name) else {
        warn!("Model called unknown tool: {}", call.name);
        return json!({ "error": format!("unknown tool '{}'", call.name) });
    };

    let arguments: Value = match serde_json::from_str(&call.arguments) {
        Ok(v) => v,
        Err(e) => {
            warn!("Malformed arguments for tool {}: {}", call.name, e);
            return json!({ "error": format!("arguments are not valid JSON: {}", e) });
        }
    };

    debug!("Running tool {} with arguments {}", call.name, arguments);
    match tool.call(&arguments) {
        Ok(result) => result,
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Initial system + user messages for a request
pub(crate) fn initial_messages(request: &ModelRequest) -> Vec<Value> {
    let user_content = match &request.input {
        ModelInput::Text(text) => json!(text),
        ModelInput::Image(image) =>
            json!([
            {
                "type": "image_url",
                "image_url": { "url": image.to_model_url() }
            }
        ]),
    };

    vec![
        json!({ "role": "system", "content": request.instructions }),
        json!({ "role": "user", "content": user_content })
    ]
}

/// Structured model calls over the OpenAI chat completions API
///
/// The answer is constrained with `response_format: json_schema` in strict
/// mode. When the request carries tools, the function-calling loop runs
/// inside a single `invoke`, bounded by `max_tool_rounds`.
pub struct OpenAiModelClient {
    config: ModelConfig,
    api_key: String,
    http_client: reqwest::Client,
}

impl OpenAiModelClient {
    pub fn new(config: &PipelineConfig) -> MathResult<Self> {
        let api_key = config.api_key()?;
        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(config.model.timeout_secs))
            .build()
            .map_err(|e| MathError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.model.clone(),
            api_key,
            http_client,
        })
    }

    fn request_body(&self, request: &ModelRequest, messages: &[Value]) -> Value {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let mut body =
            json!({
            "model": model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.output_schema.name,
                    "schema": request.output_schema.schema,
                    "strict": true
                }
            }
        });

        if !request.tools.is_empty() {
            body["tools"] = Value::Array(
                request.tools
                    .iter()
                    .map(|tool|
                        json!({
                        "type": "function",
                        "function": {
                            "name": tool.name(),
                            "description": tool.description(),
                            "parameters": tool.parameters()
                        }
                    })
                    )
                    .collect()
            );
        }

        body
    }

    async fn post(&self, body: &Value) -> Result<Value, ClientError> {
        debug!("Sending request to {}", self.config.api_endpoint);

        let response = self.http_client
            .post(&self.config.api_endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send().await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Request timed out");
                    return ClientError::Timeout(self.config.timeout_secs);
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                ClientError::NetworkError(format!("Network error when calling model API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(ClientError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            ClientError::NetworkError(e.to_string())
        })?;
        debug!("Response length: {} characters", response_text.len());

        serde_json::from_str(&response_text).map_err(|e| {
            warn!("JSON parsing error: {}", e);
            ClientError::ParseError(format!("Invalid JSON response: {}", e))
        })
    }

    async fn run(&self, request: &ModelRequest) -> Result<Value, ClientError> {
        let mut messages = initial_messages(request);
        let max_rounds = self.config.max_tool_rounds;

        for round in 0..=max_rounds {
            let body = self.request_body(request, &messages);
            let response_json = self.post(&body).await?;

            match parse_chat_response(&response_json)? {
                ChatTurn::Answer(content) => {
                    debug!("Structured answer of {} characters", content.len());
                    return serde_json::from_str(&content).map_err(|e|
                        ClientError::ParseError(format!("answer is not valid JSON: {}", e))
                    );
                }
                ChatTurn::ToolCalls { assistant_message, calls } => {
                    if round == max_rounds {
                        break;
                    }
                    info!("Model requested {} tool call(s) in round {}", calls.len(), round + 1);
                    messages.push(assistant_message);
                    for call in &calls {
                        let result = run_tool_call(&request.tools, call);
                        messages.push(
                            json!({
                            "role": "tool",
                            "tool_call_id": call.id,
                            "content": result.to_string()
                        })
                        );
                    }
                }
            }
        }

        Err(
            ClientError::ParseError(
                format!("no structured answer after {} tool round(s)", max_rounds)
            )
        )
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn invoke(&self, request: &ModelRequest) -> MathResult<Value> {
        info!("Invoking model for {}", request.output_schema.name);
        self.run(request).await.map_err(|e| {
            warn!("Model call for {} failed: {}", request.output_schema.name, e);
            e.into_math_error(&request.output_schema.name)
        })
    }
}
