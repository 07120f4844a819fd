//! Government-form field catalog
//!
//! The fixed list of fields a bidder is expected to fill on the standard
//! state procurement forms. The catalog is static data, not derived from
//! analysis output, but it is modeled as a loadable table so a deployment
//! can extend it without touching pipeline logic.

use rfplens_domain::FieldType;
use serde::{Deserialize, Serialize};

/// One catalog entry: a printed field the UI should collect a response for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogField {
    /// Stable identifier, unique within the catalog
    pub key: String,
    /// The field label as printed on the form
    pub name: String,
    /// Guidance shown to the person filling the field
    pub description: String,
    /// Expected response kind, by wire name ("text", "date", "yesno", ...)
    #[serde(rename = "type")]
    pub field_type: String,
}

impl CatalogField {
    fn new(key: &str, name: &str, description: &str, field_type: FieldType) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            field_type: field_type.as_str().to_string(),
        }
    }

    /// The parsed response kind. Unknown names fall back to text.
    pub fn field_type(&self) -> FieldType {
        self.field_type.parse().unwrap_or(FieldType::Text)
    }
}

/// The loadable field catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalog {
    /// Catalog entries, in display order
    pub fields: Vec<CatalogField>,
}

impl FieldCatalog {
    /// The built-in catalog for the standard New York State procurement
    /// forms (offerer identification, certifications under State Finance
    /// Law 139-j/139-k, and the non-responsibility disclosure).
    pub fn builtin() -> Self {
        let fields = vec![
            CatalogField::new(
                "offerer_name",
                "(Name of Offerer/bidder's firm)",
                "Enter the official name of your company/firm",
                FieldType::Text,
            ),
            CatalogField::new(
                "authorized_rep",
                "(PRINT Name of Authorized Representative)",
                "Print name of person authorized to sign",
                FieldType::Text,
            ),
            CatalogField::new("date", "Date:", "Date of submission", FieldType::Date),
            CatalogField::new(
                "signature",
                "Signature:",
                "Authorized representative signature",
                FieldType::Signature,
            ),
            CatalogField::new(
                "title",
                "Title:",
                "Title/position of authorized representative",
                FieldType::Text,
            ),
            CatalogField::new(
                "contractor_address",
                "Contractor Address:",
                "Complete business address",
                FieldType::Text,
            ),
            CatalogField::new(
                "individual_entity_name",
                "Name of Individual or Entity Seeking to Enter into the Procurement Contract:",
                "Enter the name of individual or entity",
                FieldType::Text,
            ),
            CatalogField::new(
                "person_submitting_form",
                "Name and Title of Person Submitting this Form:",
                "Enter name and title of person submitting",
                FieldType::Text,
            ),
            CatalogField::new(
                "contract_procurement_number",
                "Contract Procurement Number:",
                "Enter the contract procurement number",
                FieldType::Number,
            ),
            CatalogField::new(
                "question_finding_non_responsibility",
                "Has any Governmental Entity made a finding of non-responsibility regarding the \
                 individual or entity seeking to enter into the Procurement Contract in the \
                 previous four years? (Please circle):",
                "Select Yes or No",
                FieldType::YesNo,
            ),
            CatalogField::new(
                "question_basis_state_finance_law",
                "Was the basis for the finding of non-responsibility due to a violation of State \
                 Finance Law \u{a7}139-j (Please circle):",
                "Select Yes or No",
                FieldType::YesNo,
            ),
            CatalogField::new(
                "question_false_incomplete_info",
                "Was the basis for the finding of non-responsibility due to the intentional \
                 provision of false or incomplete information to a Governmental Entity? (Please \
                 circle):",
                "Select Yes or No",
                FieldType::YesNo,
            ),
            CatalogField::new(
                "question_terminated_withheld",
                "Has any Governmental Entity or other governmental agency terminated or withheld \
                 a Procurement Contract with the above-named individual or entity due to the \
                 intentional provision of false or incomplete information? (Please circle):",
                "Select Yes or No",
                FieldType::YesNo,
            ),
            CatalogField::new(
                "details_governmental_entity_1",
                "Governmental Entity: (for finding of non-responsibility)",
                "Enter governmental entity name",
                FieldType::Text,
            ),
            CatalogField::new(
                "details_date_finding",
                "Date of Finding of Non-responsibility:",
                "Enter date of finding",
                FieldType::Date,
            ),
            CatalogField::new(
                "details_basis_finding",
                "Basis of Finding of Non-Responsibility:",
                "Explain the basis",
                FieldType::Text,
            ),
            CatalogField::new(
                "details_governmental_entity_2",
                "Governmental Entity: (for termination/withholding)",
                "Enter governmental entity name",
                FieldType::Text,
            ),
            CatalogField::new(
                "details_date_termination",
                "Date of Termination or Withholding of Contract:",
                "Enter date of termination or withholding",
                FieldType::Date,
            ),
            CatalogField::new(
                "details_basis_termination",
                "Basis of Termination or Withholding:",
                "Explain the basis for termination or withholding",
                FieldType::Text,
            ),
        ];
        Self { fields }
    }

    /// Load a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse catalog TOML: {}", e))
    }

    /// Serialize the catalog to TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize catalog: {}", e))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
