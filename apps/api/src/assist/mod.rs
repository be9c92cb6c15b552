// Assistant surface: mode dispatch, prompt templates, input shaping, handlers.
// All Gemini calls go through llm_client — no direct HTTP to the API here.

pub mod handlers;
pub mod modes;
pub mod prompts;
pub mod tabular;
