pub mod document;

pub use document::{DocumentFields, DocumentKind, RawRow};
