// Résumé review: upload → text extraction → AI review → stored feedback.
// All LLM calls go through llm_client; the diff markup comes from markup::transform.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod reviewer;
pub mod store;
