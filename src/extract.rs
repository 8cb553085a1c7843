//! Per-school extraction across the overview and contact sub-pages.
//!
//! Extraction runs in two phases against the shared page: the overview page
//! yields the school name and overview text, then the contact page yields the
//! labelled contact rows. Either phase failing fails the whole extraction;
//! there are no partial records.

use crate::error::ScrapeError;
use crate::lookup::{collapse_whitespace, inner_text, CellTable, LabelLookup};
use crate::models::{ContactDetails, ContactField, EntityId, SchoolRecord};
use crate::page::Page;
use crate::retry::execute_with_retry;
use crate::waiter::{parse_selector, wait_until, Readiness, WaitPolicy};
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

pub const SCHOOL_NAME_HEADING: &str = ".schoolNameHeading";
pub const DATA_CELL: &str = ".tableDataText";

/// Where a school's sub-pages live and how long to wait for them
#[derive(Debug, Clone)]
pub struct DetailPages {
    pub overview_url_template: String,
    pub contact_url_template: String,
    pub retries: u32,
    pub wait: WaitPolicy,
}

impl DetailPages {
    pub fn overview_url(&self, id: &EntityId) -> String {
        fill_template(&self.overview_url_template, id)
    }

    pub fn contact_url(&self, id: &EntityId) -> String {
        fill_template(&self.contact_url_template, id)
    }
}

/// Substitute `{id}` in a URL template
pub fn fill_template(template: &str, id: &EntityId) -> String {
    template.replace("{id}", id.as_str())
}

/// The overview page is ready once the heading is rendered alongside its single data cell
pub fn overview_ready() -> Readiness {
    Readiness::All(vec![
        Readiness::present(SCHOOL_NAME_HEADING),
        Readiness::count_equals(DATA_CELL, 1),
    ])
}

/// The contact page is ready once more than one labelled cell has rendered
pub fn contact_ready() -> Readiness {
    Readiness::count_above(DATA_CELL, 1)
}

fn trailing_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(\d+\)$").expect("valid trailing code pattern"))
}

/// Strip the trailing `(1234)` school code from a heading
pub fn clean_school_name(heading: &str) -> String {
    trailing_code_pattern()
        .replace(heading.trim(), "")
        .trim()
        .to_string()
}

/// School name and overview text from a ready overview page
pub fn parse_overview(html: &str) -> Result<(String, String), ScrapeError> {
    let document = Html::parse_document(html);

    let heading_sel = parse_selector(SCHOOL_NAME_HEADING)?;
    let heading = document
        .select(&heading_sel)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement(SCHOOL_NAME_HEADING.to_string()))?;

    let cell_sel = parse_selector(DATA_CELL)?;
    let overview = document
        .select(&cell_sel)
        .next()
        .map(inner_text)
        .ok_or_else(|| ScrapeError::MissingElement(DATA_CELL.to_string()))?;

    let name = clean_school_name(&collapse_whitespace(&inner_text(heading)));
    Ok((name, overview))
}

/// Contact rows from a ready contact page; missing rows stay empty
pub fn parse_contact(html: &str) -> Result<ContactDetails, ScrapeError> {
    let document = Html::parse_document(html);
    let table = CellTable::new(&document, DATA_CELL)?;

    Ok(read_contact(&table))
}

/// Fill every contact field through a label lookup
pub fn read_contact<L: LabelLookup + ?Sized>(lookup: &L) -> ContactDetails {
    let mut contact = ContactDetails::default();
    for field in ContactField::ALL {
        if let Some(value) = lookup.value_for_label(field.label()) {
            contact.set(field, value);
        }
    }
    contact
}

async fn navigate<P>(page: &P, url: &str, retries: u32) -> Result<(), ScrapeError>
where
    P: Page + ?Sized,
{
    execute_with_retry(|| page.goto(url), retries)
        .await
        .ok_or_else(|| ScrapeError::NavigationExhausted {
            url: url.to_string(),
        })
}

/// Extract one school, overview phase then contact phase
pub async fn extract_details<P>(
    page: &P,
    id: &EntityId,
    pages: &DetailPages,
) -> Result<SchoolRecord, ScrapeError>
where
    P: Page + ?Sized,
{
    let overview_url = pages.overview_url(id);
    navigate(page, &overview_url, pages.retries).await?;
    let html = wait_until(page, &overview_ready(), &pages.wait).await?;
    let (name, overview) = parse_overview(&html)?;
    log::info!("{}", name);

    let contact_url = pages.contact_url(id);
    navigate(page, &contact_url, pages.retries).await?;
    let html = wait_until(page, &contact_ready(), &pages.wait).await?;
    let contact = parse_contact(&html)?;

    Ok(SchoolRecord {
        name,
        id: id.clone(),
        overview,
        contact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_clean_school_name() {
        assert_eq!(clean_school_name("Example School (123)"), "Example School");
        assert_eq!(clean_school_name("  Example School (123)  "), "Example School");
        assert_eq!(clean_school_name("Example School"), "Example School");
        assert_eq!(clean_school_name("School (North) Campus"), "School (North) Campus");
        assert_eq!(clean_school_name("School (abc)"), "School (abc)");
    }

    #[test]
    fn test_fill_template() {
        let url = fill_template(
            "https://example.org/overview.do?schoolID={id}&pageID=SO01",
            &EntityId::from("4012"),
        );
        assert_eq!(url, "https://example.org/overview.do?schoolID=4012&pageID=SO01");
    }

    #[test]
    fn test_parse_overview() {
        let html = r#"
            <h2 class="schoolNameHeading">Example School (123)</h2>
            <table><tr><td class="tableDataText">Established 1990</td></tr></table>
        "#;

        let (name, overview) = parse_overview(html).unwrap();
        assert_eq!(name, "Example School");
        assert_eq!(overview, "Established 1990");
    }

    #[test]
    fn test_parse_overview_keeps_paragraphs() {
        let html = r#"
            <h2 class="schoolNameHeading">Example School<br>(123)</h2>
            <table><tr><td class="tableDataText">
              <p>Established 1990.</p><p>Independent Public School.</p>
            </td></tr></table>
        "#;

        let (name, overview) = parse_overview(html).unwrap();
        assert_eq!(name, "Example School");
        assert_eq!(overview, "Established 1990.\nIndependent Public School.");
    }

    #[test]
    fn test_parse_overview_missing_heading() {
        let html = r#"<table><tr><td class="tableDataText">x</td></tr></table>"#;
        assert!(matches!(
            parse_overview(html),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_overview_readiness() {
        let loading = r#"<h2 class="schoolNameHeading">A (1)</h2>"#;
        let ready = r#"<h2 class="schoolNameHeading">A (1)</h2><table><tr><td class="tableDataText">x</td></tr></table>"#;

        assert!(!overview_ready().is_satisfied_by(loading).unwrap());
        assert!(overview_ready().is_satisfied_by(ready).unwrap());
    }

    #[test]
    fn test_parse_contact() {
        let html = r#"
            <table>
              <tr><td class="tableDataText">Phone</td><td class="tableDataText">9888 1234</td></tr>
              <tr><td class="tableDataText">Email - Official School Email</td><td class="tableDataText">school@example.edu.au</td></tr>
            </table>
        "#;

        let contact = parse_contact(html).unwrap();
        assert_eq!(contact.phone, "9888 1234");
        assert_eq!(contact.email, "school@example.edu.au");
        assert_eq!(contact.fax, "");
        assert_eq!(contact.address, "");
    }

    struct Labels(HashMap<&'static str, &'static str>);

    impl LabelLookup for Labels {
        fn value_for_label(&self, label: &str) -> Option<String> {
            self.0.get(label).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_read_contact_uses_field_labels() {
        let labels = Labels(HashMap::from([
            ("Manager Corporate Services", "Mr Brown"),
            ("Physical Address:", "1 School Rd"),
        ]));

        let contact = read_contact(&labels);
        assert_eq!(contact.manager, "Mr Brown");
        assert_eq!(contact.address, "1 School Rd");
        assert_eq!(contact.principal, "");
    }
}
