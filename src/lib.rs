//! fieldcheck - A strict, deterministic per-field validation engine
//!
//! Checks one raw value against a declared type and its options, and returns
//! a normalized output fragment together with every validation error found.
//! Merging fragments across the fields of an object is left to the caller.

pub mod field;
