/// In-memory model of an OPC package being assembled for writing.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;

/// An OPC package: package-level relationships plus an ordered list of parts.
///
/// Parts are written in the order they were added.
#[derive(Debug, Default)]
pub struct OpcPackage {
    rels: Relationships,
    parts: Vec<Part>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part to the package.
    ///
    /// Returns an error if a part with the same partname already exists.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        if self.contains(part.partname()) {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Whether a part with this partname has been added.
    pub fn contains(&self, partname: &PackURI) -> bool {
        self.parts.iter().any(|p| p.partname() == partname)
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Create a package-level relationship to a part.
    ///
    /// # Returns
    /// The relationship ID
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels.get_or_add(reltype, &partname.relative_ref("/"))
    }
}
