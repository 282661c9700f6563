mod create;
mod index;
mod stats;
mod update;

// Each handler fn is turned into a unit struct of the same name by salvo's
// `#[endpoint]` macro, so a named re-export would clash with the module name
// in the type namespace. Glob imports let the explicit `mod` shadow the type
// while the handler value stays reachable.
pub(crate) use create::*;
pub(crate) use index::*;
pub(crate) use stats::*;
pub(crate) use update::*;
