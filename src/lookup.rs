//! Label-to-value lookup over tabular HTML.
//!
//! Detail pages lay out their fields as rows of data cells: a label cell
//! followed by the value cell in the same row. [`LabelLookup`] is the
//! capability the extractor needs; [`CellTable`] implements it over a parsed
//! document.

use crate::error::ScrapeError;
use crate::waiter::parse_selector;
use scraper::{ElementRef, Html, Selector};

/// Find the value associated with a known label on a structured page
pub trait LabelLookup {
    /// `None` when no cell carries the label
    fn value_for_label(&self, label: &str) -> Option<String>;
}

/// Elements that start and end a line when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "blockquote", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ol", "p",
    "section", "table", "tr", "ul",
];

/// Rendered text of an element.
///
/// `<br>` and block boundaries become line breaks. Within a line whitespace
/// runs collapse to one space; lines are trimmed and blank lines dropped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_rendered(element, &mut raw);

    raw.split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_rendered(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if name == "br" {
        out.push('\n');
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            push_rendered(child, out);
        } else if let Some(text) = child.value().as_text() {
            // source line breaks are layout, not content
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        }
    }
    if block {
        out.push('\n');
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_last_element_child(element: &ElementRef<'_>) -> bool {
    element.next_siblings().all(|sibling| !sibling.value().is_element())
}

/// Data cells of a document, addressed by label
pub struct CellTable<'a> {
    document: &'a Html,
    cell: Selector,
}

impl<'a> CellTable<'a> {
    pub fn new(document: &'a Html, cell_selector: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            document,
            cell: parse_selector(cell_selector)?,
        })
    }

    /// All cells in document order
    pub fn cells(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.document.select(&self.cell)
    }
}

impl LabelLookup for CellTable<'_> {
    fn value_for_label(&self, label: &str) -> Option<String> {
        let label_cell = self
            .cells()
            .find(|cell| collapse_whitespace(&inner_text(*cell)) == label)?;
        let row = label_cell.parent().and_then(ElementRef::wrap)?;

        row.select(&self.cell)
            .find(is_last_element_child)
            .map(inner_text)
    }
}
