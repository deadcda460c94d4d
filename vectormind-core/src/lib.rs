pub mod assistant;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod mock;
pub mod models;
pub mod prompts;
pub mod workflows;

pub use assistant::{create_assistant, Assistant, LiveAssistant, MockAssistant};
pub use completion::{CompletionClient, CompletionError, CompletionRequest};
pub use config::VectorMindConfig;
pub use error::VectorMindError;
pub use models::{NewWorkflow, WorkflowRecord};
