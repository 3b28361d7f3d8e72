//! Permute IR - Tree Representation for Candidate Search
//!
//! This crate contains the data structures the candidate core operates on:
//! - `DeclId` indices into a translation unit's top-level declaration list
//! - `Decl`, `FuncDef`, `Block`, `Stmt` nodes
//! - `TranslationUnit`, the arena of top-level declarations
//! - `CandidateTree`, the copy-on-write view a candidate mutates
//!
//! # Design Philosophy
//!
//! - **Share the unit, own the function**: one canonical `TranslationUnit`
//!   is shared by reference across all candidates built from the same
//!   source; each candidate owns a deep copy of exactly one declaration
//!   slot, the target function.
//! - **Flat addressing**: declarations are addressed by `DeclId(u32)` index,
//!   never by parent pointer. Replacing the target function means replacing
//!   an entry in the declaration list.
//! - **Isolation by construction**: mutable access exists only for slots a
//!   candidate has taken ownership of, so cross-candidate contamination
//!   does not compile.

mod decl;
mod decl_id;
mod overlay;
mod unit;

pub use decl::{Block, Decl, FuncDef, Stmt};
pub use decl_id::DeclId;
pub use overlay::CandidateTree;
pub use unit::{SharedUnit, TranslationUnit};
