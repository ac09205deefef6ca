//! Ontology URI formatting and compact identifier conversion
//!
//! Two directions are supported:
//! - `(identifier, database)` or `DB:ID` CURIE → canonical URI, via a fixed
//!   per-database template table
//! - URI → cross-reference identifier (`Orphanet:199318`), via a prefix table
//!   keyed on the URI's second-to-last path segment

use crate::DomainError;
use std::fmt;

/// Databases with a known URI template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OntologyDatabase {
    /// Orphanet rare disease registry (ORDO)
    Orphanet,
    /// Online Mendelian Inheritance in Man
    Omim,
    /// Experimental Factor Ontology
    Efo,
    /// Medical Subject Headings thesaurus
    Mesh,
    /// MedGen medical genetics vocabulary
    Medgen,
    /// Human Phenotype Ontology, long name (identifiers carry a redundant prefix)
    HumanPhenotypeOntology,
    /// Human Phenotype Ontology, short code
    Hp,
}

impl OntologyDatabase {
    /// Parse a database name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownDatabase` for names outside the table.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match name.trim().to_lowercase().as_str() {
            "orphanet" => Ok(OntologyDatabase::Orphanet),
            "omim" => Ok(OntologyDatabase::Omim),
            "efo" => Ok(OntologyDatabase::Efo),
            "mesh" => Ok(OntologyDatabase::Mesh),
            "medgen" => Ok(OntologyDatabase::Medgen),
            "human phenotype ontology" => Ok(OntologyDatabase::HumanPhenotypeOntology),
            "hp" => Ok(OntologyDatabase::Hp),
            _ => Err(DomainError::UnknownDatabase(name.to_string())),
        }
    }

    /// URI template prefix; the identifier is appended verbatim
    pub fn uri_prefix(&self) -> &'static str {
        match self {
            OntologyDatabase::Orphanet => "http://www.orpha.net/ORDO/Orphanet_",
            OntologyDatabase::Omim => "http://identifiers.org/omim/",
            OntologyDatabase::Efo => "http://www.ebi.ac.uk/efo/EFO_",
            OntologyDatabase::Mesh => "http://identifiers.org/mesh/",
            OntologyDatabase::Medgen => "http://identifiers.org/medgen/",
            OntologyDatabase::HumanPhenotypeOntology | OntologyDatabase::Hp => {
                "http://purl.obolibrary.org/obo/HP_"
            }
        }
    }

    fn normalize_id<'a>(&self, id: &'a str) -> &'a str {
        match self {
            OntologyDatabase::HumanPhenotypeOntology => id
                .strip_prefix("HP:")
                .or_else(|| id.strip_prefix("HP_"))
                .or_else(|| id.strip_prefix("HP"))
                .unwrap_or(id),
            _ => id,
        }
    }
}

/// Format a canonical URI for an identifier in a named database
///
/// # Examples
///
/// ```
/// use ontomap_domain::uri::format_uri;
///
/// let uri = format_uri("199318", "Orphanet").unwrap();
/// assert_eq!(uri, "http://www.orpha.net/ORDO/Orphanet_199318");
/// ```
pub fn format_uri(id: &str, database: &str) -> Result<String, DomainError> {
    Ok(OntologyUri::new(id, database)?.uri)
}

/// An ontology term identifier together with its canonical URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntologyUri {
    /// Database the identifier belongs to
    pub database: OntologyDatabase,

    /// Identifier as supplied by the source
    pub id: String,

    uri: String,
}

impl OntologyUri {
    /// Build the URI for `id` in `database`
    pub fn new(id: &str, database: &str) -> Result<Self, DomainError> {
        let database = OntologyDatabase::parse(database)?;
        let uri = format!("{}{}", database.uri_prefix(), database.normalize_id(id));
        Ok(Self {
            database,
            id: id.to_string(),
            uri,
        })
    }

    /// Build the URI for a `DB:ID` compact identifier
    ///
    /// Only the first `:` separates database from identifier.
    pub fn from_curie(curie: &str) -> Result<Self, DomainError> {
        let (database, id) = curie
            .split_once(':')
            .ok_or_else(|| DomainError::MalformedCurie(curie.to_string()))?;
        Self::new(id, database)
    }

    /// The canonical URI string
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for OntologyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl From<OntologyUri> for String {
    fn from(uri: OntologyUri) -> Self {
        uri.uri
    }
}

/// URI path segment → cross-reference service prefix
const CROSS_REFERENCE_PREFIXES: &[(&str, &str)] = &[
    ("ordo", "Orphanet"),
    ("omim", "OMIM"),
    ("efo", "EFO"),
    ("mesh", "MeSH"),
    ("obo", "HP"),
];

/// Convert a term URI to the cross-reference service's `DB:ID` format
///
/// Returns `None` when the URI's source is not in the prefix table or the
/// identifier has no digits. Under `obo` only `HP_` terms are accepted.
///
/// # Examples
///
/// ```
/// use ontomap_domain::uri::cross_reference_id;
///
/// assert_eq!(
///     cross_reference_id("http://www.orpha.net/ORDO/Orphanet_199318").as_deref(),
///     Some("Orphanet:199318")
/// );
/// assert_eq!(cross_reference_id("http://example.org/terms/X_1"), None);
/// ```
pub fn cross_reference_id(uri: &str) -> Option<String> {
    let mut segments = uri.trim_end_matches('/').rsplit('/');
    let raw_id = segments.next()?;
    let source = segments.next()?.to_lowercase();

    let (_, prefix) = CROSS_REFERENCE_PREFIXES
        .iter()
        .find(|(segment, _)| *segment == source)?;

    if source == "obo" && !raw_id.starts_with("HP_") {
        return None;
    }

    let digits: String = raw_id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    Some(format!("{}:{}", prefix, digits))
}
