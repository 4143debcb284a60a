// Wizard: step machine, session state, enhancement bookkeeping and the HTTP surface.
// All gateway calls go through `flow`. Handlers never call the gateway directly.

pub mod enhance;
pub mod flow;
pub mod handlers;
pub mod sample;
pub mod session;
pub mod step;
pub mod store;
