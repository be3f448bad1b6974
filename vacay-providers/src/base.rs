//! Chat message types and the provider trait

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use thiserror::Error;

/// Failures talking to the model endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for vacay_core::Error {
    fn from(e: ProviderError) -> Self {
        vacay_core::Error::Provider(e.to_string())
    }
}

/// A tool call requested by the model
///
/// On the wire the arguments are a JSON-encoded string nested under
/// `function`; here they are kept decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub id: String,
    pub call_type: String,
    pub name: String,
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCallRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            name: name.into(),
            arguments,
        }
    }

    /// Decode a raw `arguments` string, keeping unparseable input under `raw`
    pub fn parse_arguments(raw: &str) -> HashMap<String, serde_json::Value> {
        if raw.trim().is_empty() {
            return HashMap::new();
        }
        serde_json::from_str(raw).unwrap_or_else(|_| {
            let mut map = HashMap::new();
            map.insert("raw".to_string(), serde_json::Value::String(raw.to_string()));
            map
        })
    }

    /// Arguments as a JSON object, the shape tools receive
    pub fn arguments_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.arguments.clone().into_iter().collect())
    }
}

impl Serialize for ToolCallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        #[derive(Serialize)]
        struct Function<'a> {
            name: &'a str,
            arguments: String,
        }

        let arguments =
            serde_json::to_string(&self.arguments).unwrap_or_else(|_| "{}".to_string());

        let mut state = serializer.serialize_struct("ToolCallRequest", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.call_type)?;
        state.serialize_field(
            "function",
            &Function {
                name: &self.name,
                arguments,
            },
        )?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ToolCallRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Function {
            name: String,
            #[serde(default)]
            arguments: serde_json::Value,
        }

        #[derive(Deserialize)]
        struct Helper {
            id: String,
            #[serde(rename = "type", default = "default_call_type")]
            call_type: String,
            function: Function,
        }

        fn default_call_type() -> String {
            "function".to_string()
        }

        let helper = Helper::deserialize(deserializer)?;
        let arguments = match helper.function.arguments {
            serde_json::Value::String(raw) => ToolCallRequest::parse_arguments(&raw),
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };

        Ok(Self {
            id: helper.id,
            call_type: helper.call_type,
            name: helper.function.name,
            arguments,
        })
    }
}

/// A parsed chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,
    #[serde(default = "default_finish_reason")]
    pub finish_reason: String,
    #[serde(default)]
    pub usage: HashMap<String, i64>,
}

fn default_finish_reason() -> String {
    "stop".to_string()
}

impl LLMResponse {
    /// A plain text answer
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            finish_reason: default_finish_reason(),
            usage: HashMap::new(),
        }
    }

    /// A response that only requests tool calls
    pub fn with_tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content: None,
            tool_calls,
            finish_reason: "tool_calls".to_string(),
            usage: HashMap::new(),
        }
    }

    /// True when the model asked for at least one tool
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// One turn of a chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
}

impl Message {
    fn with_role(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role("user", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role("system", content)
    }

    /// Plain assistant text
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role("assistant", content)
    }

    /// Plain assistant text carrying tool calls
    pub fn assistant_with_tools(
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            tool_calls: Some(tool_calls),
            ..Self::with_role("assistant", content.unwrap_or_default())
        }
    }

    /// Result of the tool call `tool_call_id`
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::with_role("tool", content)
        }
    }

    pub fn is_role(&self, role: &str) -> bool {
        self.role == role
    }
}

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// One chat completion round trip
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<serde_json::Value>>,
        model: Option<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> ProviderResult<LLMResponse>;

    /// Model used when `chat` gets no override
    fn get_default_model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_call_wire_format() {
        let mut args = HashMap::new();
        args.insert("number_of_guests".to_string(), json!(2));
        let call = ToolCallRequest::new("call_1", "get_availability", args);

        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "get_availability");
        let encoded = value["function"]["arguments"].as_str().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(encoded).unwrap(),
            json!({"number_of_guests": 2})
        );
    }

    #[test]
    fn test_tool_call_accepts_string_or_object_arguments() {
        let from_string: ToolCallRequest = serde_json::from_value(json!({
            "id": "a",
            "type": "function",
            "function": {"name": "verify_zip_code", "arguments": "{\"user_input_zipcode\":\"32801\"}"}
        }))
        .unwrap();
        assert_eq!(from_string.arguments["user_input_zipcode"], "32801");

        let from_object: ToolCallRequest = serde_json::from_value(json!({
            "id": "b",
            "function": {"name": "get_package_summary", "arguments": {}}
        }))
        .unwrap();
        assert_eq!(from_object.call_type, "function");
        assert!(from_object.arguments.is_empty());
    }

    #[test]
    fn test_unparseable_arguments_kept_raw() {
        let args = ToolCallRequest::parse_arguments("not json");
        assert_eq!(args["raw"], "not json");
        assert!(ToolCallRequest::parse_arguments("").is_empty());
    }

    #[test]
    fn test_message_constructors() {
        let tool = Message::tool("ok", "call_1");
        assert!(tool.is_role("tool"));
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));

        let assistant = Message::assistant_with_tools(None, vec![]);
        assert_eq!(assistant.content, "");
        assert!(assistant.tool_calls.is_some());

        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(json.get("tool_call_id").is_none());
    }
}
