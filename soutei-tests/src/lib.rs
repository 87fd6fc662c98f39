//! Integration and scenario tests for the evaluation core, built solely
//! against the public embedding API in the root `soutei` crate — the
//! same boundary a host program would use. Modeled on `chalk-tests`:
//! test-only helpers live in `util`, scenarios live in their own
//! modules.

mod util;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod native_bridge;
#[cfg(test)]
mod reachability;
