pub(crate) mod errors;
mod search;

// The handler fn is turned into a unit struct of the same name by salvo's
// `#[endpoint]` macro, so a named re-export would clash with the module name
// in the type namespace. The glob import lets the explicit `mod` shadow the
// type while the handler value stays reachable.
pub(crate) use search::*;
