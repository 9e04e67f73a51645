//! `tools/list` and `tools/call`.
//!
//! Tool failures never become protocol errors: they come back as a normal
//! result carrying `isError: true` and a single `Error: ...` text item.

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::{params_object, HandlerError, UseCases};
use crate::domain::{CityName, DomainError, FilePath, Operation};
use crate::ports::inbound::{FileOperationError, NoteError, WeatherQueryError};

/// Tools offered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Calculate,
    CreateNote,
    ListNotes,
    GetWeather,
    ReadFile,
    WriteFile,
    ListDirectory,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Calculate,
        Tool::CreateNote,
        Tool::ListNotes,
        Tool::GetWeather,
        Tool::ReadFile,
        Tool::WriteFile,
        Tool::ListDirectory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Calculate => "calculate",
            Tool::CreateNote => "create_note",
            Tool::ListNotes => "list_notes",
            Tool::GetWeather => "get_weather",
            Tool::ReadFile => "read_file",
            Tool::WriteFile => "write_file",
            Tool::ListDirectory => "list_directory",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Tool::Calculate => {
                "Perform basic arithmetic calculations (add, subtract, multiply, divide)"
            }
            Tool::CreateNote => "Create a new note with a title and content",
            Tool::ListNotes => "List all notes with their IDs and titles",
            Tool::GetWeather => "Get real weather information for a city",
            Tool::ReadFile => "Read the contents of a text file",
            Tool::WriteFile => "Write content to a text file (creates or overwrites)",
            Tool::ListDirectory => "List files and directories in a folder",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Tool::Calculate => json!({
                "type": "object",
                "properties": {
                    "operation": {
                        "type": "string",
                        "enum": Operation::ALL.iter().map(|op| op.name()).collect::<Vec<_>>(),
                        "description": "The arithmetic operation to perform"
                    },
                    "a": { "type": "number", "description": "First number" },
                    "b": { "type": "number", "description": "Second number" }
                },
                "required": ["operation", "a", "b"]
            }),
            Tool::CreateNote => json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "The title of the note" },
                    "content": { "type": "string", "description": "The content of the note" }
                },
                "required": ["title", "content"]
            }),
            Tool::ListNotes => json!({
                "type": "object",
                "properties": {}
            }),
            Tool::GetWeather => json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string", "description": "The city name" }
                },
                "required": ["city"]
            }),
            Tool::ReadFile => json!({
                "type": "object",
                "properties": {
                    "file_path": { "type": "string", "description": "The path to the file to read" }
                },
                "required": ["file_path"]
            }),
            Tool::WriteFile => json!({
                "type": "object",
                "properties": {
                    "file_path": { "type": "string", "description": "The path to the file to write" },
                    "content": { "type": "string", "description": "The content to write to the file" }
                },
                "required": ["file_path", "content"]
            }),
            Tool::ListDirectory => json!({
                "type": "object",
                "properties": {
                    "directory_path": {
                        "type": "string",
                        "description": "The directory path to list (defaults to current directory)"
                    }
                }
            }),
        }
    }

    fn definition(self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": self.input_schema()
        })
    }
}

/// Why a tool call failed. Rendered into the tool result, never into a
/// JSON-RPC error.
#[derive(Error, Debug)]
enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Argument '{name}' must be a {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error(transparent)]
    Weather(#[from] WeatherQueryError),

    #[error(transparent)]
    File(#[from] FileOperationError),
}

/// Typed access to the `arguments` object of a call.
#[derive(Default)]
struct Arguments<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(name))
            .filter(|value| !value.is_null())
    }

    fn optional_string(&self, name: &'static str) -> Result<Option<&'a str>, ToolError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ToolError::WrongType {
                name,
                expected: "string",
            }),
        }
    }

    fn string(&self, name: &'static str) -> Result<&'a str, ToolError> {
        self.optional_string(name)?
            .ok_or(ToolError::MissingArgument(name))
    }

    fn number(&self, name: &'static str) -> Result<f64, ToolError> {
        let value = self.get(name).ok_or(ToolError::MissingArgument(name))?;
        value.as_f64().ok_or(ToolError::WrongType {
            name,
            expected: "number",
        })
    }
}

/// `tools/list` result.
pub(super) fn list() -> Value {
    let tools: Vec<Value> = Tool::ALL.into_iter().map(Tool::definition).collect();
    json!({ "tools": tools })
}

/// `tools/call` result.
pub(super) async fn call(use_cases: &UseCases, params: &Value) -> Result<Value, HandlerError> {
    let params = params_object(params)?;
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::InvalidParams("Missing tool name".to_string()))?;

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Arguments::default(),
        Some(Value::Object(map)) => Arguments { map: Some(map) },
        Some(_) => {
            return Err(HandlerError::InvalidParams(
                "Tool arguments must be an object".to_string(),
            ))
        }
    };

    debug!(tool = name, "Calling tool");

    let outcome = match Tool::from_name(name) {
        Some(tool) => execute(tool, &arguments, use_cases).await,
        None => Err(ToolError::UnknownTool(name.to_string())),
    };

    match outcome {
        Ok(text) => Ok(tool_result(text, false)),
        Err(e) => {
            warn!(tool = name, error = %e, "Tool call failed");
            Ok(tool_result(format!("Error: {}", e), true))
        }
    }
}

fn tool_result(text: String, is_error: bool) -> Value {
    let mut result = json!({
        "content": [
            {
                "type": "text",
                "text": text
            }
        ]
    });
    if is_error {
        result["isError"] = Value::Bool(true);
    }
    result
}

async fn execute(
    tool: Tool,
    args: &Arguments<'_>,
    use_cases: &UseCases,
) -> Result<String, ToolError> {
    match tool {
        Tool::Calculate => {
            let operation: Operation = args.string("operation")?.parse()?;
            let a = args.number("a")?;
            let b = args.number("b")?;
            Ok(use_cases.calculation.calculate(operation, a, b)?.format())
        }

        Tool::CreateNote => {
            let note = use_cases
                .notes
                .create_note(args.string("title")?, args.string("content")?)?;
            Ok(format!(
                "Note created successfully!\nID: {}\nTitle: {}",
                note.id(),
                note.title()
            ))
        }

        Tool::ListNotes => {
            let notes = use_cases.notes.list_notes()?;
            if notes.is_empty() {
                return Ok("No notes found. Create one using the create_note tool!".to_string());
            }

            let mut text = format!("Available notes ({}):", notes.len());
            for note in &notes {
                text.push_str(&format!("\nID {}: {}", note.id(), note.title()));
            }
            Ok(text)
        }

        Tool::GetWeather => {
            let city = CityName::new(args.string("city")?)?;
            let weather = use_cases.weather.weather_for_city(city).await?;
            Ok(weather.format())
        }

        Tool::ReadFile => {
            let path = FilePath::new(args.string("file_path")?)?;
            let content = use_cases.files.read_file(&path)?;
            Ok(format!("File contents of {}:\n\n{}", path, content))
        }

        Tool::WriteFile => {
            let path = FilePath::new(args.string("file_path")?)?;
            use_cases.files.write_file(&path, args.string("content")?)?;
            Ok(format!("File written successfully: {}", path))
        }

        Tool::ListDirectory => {
            let raw = args.optional_string("directory_path")?.unwrap_or(".");
            let path = FilePath::new(raw)?;
            let entries = use_cases.files.list_directory(&path)?;

            let mut text = format!("Contents of {}:\n\n", path);
            for entry in &entries {
                text.push_str(&entry.format_list_entry());
                text.push('\n');
            }
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("Calculate"), None);
    }

    #[test]
    fn test_list_declares_required_arguments() {
        let listed = list();
        let tools = listed["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);

        let write = tools.iter().find(|t| t["name"] == "write_file").unwrap();
        assert_eq!(write["inputSchema"]["required"], json!(["file_path", "content"]));

        let calc = tools.iter().find(|t| t["name"] == "calculate").unwrap();
        assert_eq!(
            calc["inputSchema"]["properties"]["operation"]["enum"],
            json!(["add", "subtract", "multiply", "divide"])
        );

        let list_dir = tools.iter().find(|t| t["name"] == "list_directory").unwrap();
        assert!(list_dir["inputSchema"].get("required").is_none());
    }

    #[test]
    fn test_arguments_report_missing_and_wrong_type() {
        let map = json!({"a": "one", "b": null})
            .as_object()
            .cloned()
            .unwrap();
        let args = Arguments { map: Some(&map) };

        assert_eq!(
            args.number("a").unwrap_err().to_string(),
            "Argument 'a' must be a number"
        );
        assert_eq!(
            args.number("b").unwrap_err().to_string(),
            "Missing required argument: b"
        );
        assert_eq!(args.optional_string("c").unwrap(), None);
    }

    #[test]
    fn test_error_result_sets_flag() {
        let ok = tool_result("fine".to_string(), false);
        assert!(ok.get("isError").is_none());

        let failed = tool_result("Error: nope".to_string(), true);
        assert_eq!(failed["isError"], json!(true));
        assert_eq!(failed["content"][0]["text"], "Error: nope");
    }
}
