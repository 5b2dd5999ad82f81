// Researcher profile: completeness scoring and bio generation.
// The only LLM call in the service lives in bio.rs, through llm_client.

pub mod bio;
pub mod completeness;
pub mod handlers;
pub mod prompts;
