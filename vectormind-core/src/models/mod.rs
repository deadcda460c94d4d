mod workflow;

pub use workflow::{NewWorkflow, WorkflowRecord};
