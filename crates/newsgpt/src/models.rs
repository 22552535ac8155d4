//! These models represent the objects passed around by the agent
//!
//! The transcript is kept in the same shape the OpenAI chat completions API uses for
//! function calling (role, content, name, function_call), so the token estimate is
//! computed over exactly the fields that go over the wire. Tool declarations are typed
//! and only turned into a JSON schema when a provider needs them.
pub mod message;
pub mod role;
pub mod tool;
