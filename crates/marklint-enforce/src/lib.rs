//! Enforcement engine for marklint conventions.
//!
//! Evaluates hand-written C# against the invariants the marker-driven code
//! generator relies on and produces violations:
//! - UFT0001: field with `[GetComponentProperty]` used outside its declaration
//! - UFT0002: type with marked members is not `partial`
//! - UFT0003: indexer carries `[UnityHandler]` or `[GetComponent]`
//! - UFT0004: `[UnityHandler]` property has no getter
//! - UFT0005: `[GetComponent]` property has no setter
//!
//! UFT0001 and UFT0002 have mechanical fixes (see [`fix_generator`]).

pub mod types;
pub mod rules;
pub mod naming;
pub mod violations;
pub mod engine;
pub mod fix_generator;
