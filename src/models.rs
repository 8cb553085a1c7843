use crate::metrics::RunMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one school in the source system
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

/// Labelled rows read from the contact page
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    Website,
    Phone,
    Fax,
    Principal,
    Manager,
    Address,
}

impl ContactField {
    pub const ALL: [ContactField; 7] = [
        ContactField::Email,
        ContactField::Website,
        ContactField::Phone,
        ContactField::Fax,
        ContactField::Principal,
        ContactField::Manager,
        ContactField::Address,
    ];

    /// Exact label text of the row on the contact page
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Email => "Email - Official School Email",
            ContactField::Website => "Website",
            ContactField::Phone => "Phone",
            ContactField::Fax => "Fax",
            ContactField::Principal => "Principal",
            ContactField::Manager => "Manager Corporate Services",
            ContactField::Address => "Physical Address:",
        }
    }
}

/// Contact rows of one school; absent rows are empty strings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: String,
    pub website: String,
    pub phone: String,
    pub fax: String,
    pub principal: String,
    pub manager: String,
    pub address: String,
}

impl ContactDetails {
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Email => &mut self.email,
            ContactField::Website => &mut self.website,
            ContactField::Phone => &mut self.phone,
            ContactField::Fax => &mut self.fax,
            ContactField::Principal => &mut self.principal,
            ContactField::Manager => &mut self.manager,
            ContactField::Address => &mut self.address,
        };
        *slot = value;
    }
}

/// One fully extracted school
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SchoolRecord {
    pub name: String,
    pub id: EntityId,
    pub overview: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

/// Row of the tabular export, columns in output order
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ExportRow<'a> {
    #[serde(rename = "School Name")]
    pub name: &'a str,
    #[serde(rename = "School Id")]
    pub id: &'a str,
    #[serde(rename = "School Overview")]
    pub overview: &'a str,
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Website")]
    pub website: &'a str,
    #[serde(rename = "Phone")]
    pub phone: &'a str,
    #[serde(rename = "Fax")]
    pub fax: &'a str,
    #[serde(rename = "Principal")]
    pub principal: &'a str,
    #[serde(rename = "Manager")]
    pub manager: &'a str,
    #[serde(rename = "Address")]
    pub address: &'a str,
}

impl<'a> From<&'a SchoolRecord> for ExportRow<'a> {
    fn from(record: &'a SchoolRecord) -> Self {
        Self {
            name: &record.name,
            id: record.id.as_str(),
            overview: &record.overview,
            email: &record.contact.email,
            website: &record.contact.website,
            phone: &record.contact.phone,
            fax: &record.contact.fax,
            principal: &record.contact.principal,
            manager: &record.contact.manager,
            address: &record.contact.address,
        }
    }
}

pub const EXPORT_COLUMNS: [&str; 10] = [
    "School Name",
    "School Id",
    "School Overview",
    "Email",
    "Website",
    "Phone",
    "Fax",
    "Principal",
    "Manager",
    "Address",
];

/// Outcome of one run: a slot per discovered id, in discovery order.
/// `None` marks a school whose extraction failed after all retries.
#[derive(Debug, Serialize, Clone)]
pub struct BatchResult {
    pub records: Vec<Option<SchoolRecord>>,
    #[serde(skip)]
    pub metrics: RunMetrics,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Successfully extracted records, in discovery order
    pub fn successes(&self) -> impl Iterator<Item = &SchoolRecord> {
        self.records.iter().flatten()
    }

    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_none()).count()
    }
}
