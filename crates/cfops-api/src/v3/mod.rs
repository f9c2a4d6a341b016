// Cloud Controller v3 list endpoints.
//
// v3 reports pagination as `{ pagination: { total_pages, ... }, resources }`.
// Responses are converted into the same `Page` the v2 endpoints produce so
// one flattener serves both API generations.

mod resources;
pub mod types;

pub use types::V3Query;
