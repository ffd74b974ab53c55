//! C# front end for marklint.
//!
//! - [`csharp`]: tree-sitter parsing lowered into the lossless syntax model
//! - [`semantic`]: project-wide symbol index implementing `SemanticModel`
//! - [`walker`]: source discovery honouring ignore files and config globs

pub mod csharp;
pub mod semantic;
pub mod walker;
