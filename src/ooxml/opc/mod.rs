/// Open Packaging Conventions (OPC) writer.
///
/// Models the pieces of an OPC package that a generated presentation needs:
///
/// - Part names and their relative references
/// - Parts with their outgoing relationships
/// - `[Content_Types].xml` generation
/// - ZIP-based physical packaging with reproducible output

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
