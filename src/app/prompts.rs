//! Prompt generation use case.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::Note;
use crate::ports::inbound::{
    GeneratedPrompt, PromptArgument, PromptError, PromptGenerationUseCase, PromptMessage,
    PromptTemplate,
};
use crate::ports::outbound::NoteRepository;

/// The fixed set of prompt templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    HelpfulAssistant,
    CodeReviewer,
    SummarizeNotes,
}

impl PromptKind {
    const ALL: [PromptKind; 3] = [
        PromptKind::HelpfulAssistant,
        PromptKind::CodeReviewer,
        PromptKind::SummarizeNotes,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn name(&self) -> &'static str {
        match self {
            PromptKind::HelpfulAssistant => "helpful_assistant",
            PromptKind::CodeReviewer => "code_reviewer",
            PromptKind::SummarizeNotes => "summarize_notes",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            PromptKind::HelpfulAssistant => "A helpful and friendly assistant persona",
            PromptKind::CodeReviewer => "Review code and provide constructive feedback",
            PromptKind::SummarizeNotes => "Summarize all notes in the system",
        }
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        match self {
            PromptKind::HelpfulAssistant => vec![PromptArgument {
                name: "task",
                description: "The task to help with",
                required: false,
            }],
            PromptKind::CodeReviewer => vec![
                PromptArgument {
                    name: "language",
                    description: "Programming language",
                    required: false,
                },
                PromptArgument {
                    name: "code",
                    description: "Code to review",
                    required: true,
                },
            ],
            PromptKind::SummarizeNotes => vec![],
        }
    }

    fn template(&self) -> PromptTemplate {
        PromptTemplate {
            name: self.name(),
            description: self.description(),
            arguments: self.arguments(),
        }
    }
}

pub struct PromptService {
    repository: Arc<dyn NoteRepository>,
}

impl PromptService {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        Self { repository }
    }

    fn summarize_notes(&self) -> Result<String, PromptError> {
        let mut notes = self.repository.find_all()?;
        if notes.is_empty() {
            return Ok("There are no notes to summarize. Please create some notes first using the create_note tool.".to_string());
        }
        notes.sort_by_key(Note::id);

        let mut text = String::from("Please provide a concise summary of the following notes:\n\n");
        for note in &notes {
            text.push_str(&format!("**{}** (ID: {})\n", note.title(), note.id()));
            text.push_str(note.content());
            text.push_str("\n\n---\n\n");
        }
        Ok(text)
    }
}

fn required<'a>(
    arguments: &'a HashMap<String, String>,
    prompt: PromptKind,
    argument: &'static str,
) -> Result<&'a str, PromptError> {
    arguments
        .get(argument)
        .map(String::as_str)
        .ok_or(PromptError::MissingArgument {
            prompt: prompt.name(),
            argument,
        })
}

fn optional<'a>(arguments: &'a HashMap<String, String>, argument: &str, default: &'a str) -> &'a str {
    arguments.get(argument).map(String::as_str).unwrap_or(default)
}

impl PromptGenerationUseCase for PromptService {
    fn list_prompts(&self) -> Vec<PromptTemplate> {
        PromptKind::ALL.iter().map(PromptKind::template).collect()
    }

    fn generate_prompt(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<GeneratedPrompt, PromptError> {
        let kind =
            PromptKind::from_name(name).ok_or_else(|| PromptError::UnknownPrompt(name.to_string()))?;

        let text = match kind {
            PromptKind::HelpfulAssistant => {
                let task = optional(arguments, "task", "general assistance");
                format!(
                    "You are a helpful, friendly, and knowledgeable assistant. \
                     Please help me with the following task:\n\n{}\n\n\
                     Provide clear, accurate, and actionable guidance.",
                    task
                )
            }
            PromptKind::CodeReviewer => {
                let code = required(arguments, kind, "code")?;
                let language = optional(arguments, "language", "unknown");
                format!(
                    "Please review the following {language} code and provide constructive feedback:\n\n\
                     ```{language}\n{code}\n```\n\n\
                     Consider:\n\
                     - Code quality and readability\n\
                     - Potential bugs or issues\n\
                     - Performance concerns\n\
                     - Best practices\n\
                     - Suggestions for improvement"
                )
            }
            PromptKind::SummarizeNotes => self.summarize_notes()?,
        };

        Ok(GeneratedPrompt {
            description: kind.description(),
            messages: vec![PromptMessage { role: "user", text }],
        })
    }
}
