// Strategy generation: reviews in, validated sales angles out.
// Flow: schema → prompt → llm_client completion → validator → caller commits to store.

pub mod errors;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod store;
pub mod validator;
