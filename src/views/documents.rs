//! Document library: search over title, description and category, category
//! filter, sorting and optional grouping by category.

use std::cmp::Ordering;
use std::str::FromStr;

use super::query::{
    BucketSpec, Group, SearchTerm, SortDirection, compare_missing_last, compare_optional_text,
    compare_text, fold_case, partition, same_text,
};
use crate::models::Document;

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentSortField {
    #[default]
    Uploaded,
    Updated,
    Title,
    Category,
}

impl FromStr for DocumentSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uploaded" | "uploaded_at" => Ok(Self::Uploaded),
            "updated" | "updated_at" => Ok(Self::Updated),
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            _ => Err(format!("Invalid document sort field: {}", s)),
        }
    }
}

impl DocumentSortField {
    pub fn query_name(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded_at",
            Self::Updated => "updated_at",
            Self::Title => "title",
            Self::Category => "category",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub search: SearchTerm,
    pub category: Option<String>,
    pub sort: DocumentSortField,
    pub direction: SortDirection,
    pub group_by_category: bool,
}

pub fn matches_search(doc: &Document, search: &SearchTerm) -> bool {
    search.matches([
        Some(doc.title.as_str()),
        doc.description.as_deref(),
        doc.category.as_deref(),
    ])
}

fn category_of(doc: &Document) -> Option<&str> {
    doc.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
}

fn compare(a: &Document, b: &Document, field: DocumentSortField) -> Ordering {
    match field {
        DocumentSortField::Uploaded => compare_missing_last(a.uploaded_at, b.uploaded_at),
        DocumentSortField::Updated => compare_missing_last(
            a.updated_at.or(a.uploaded_at),
            b.updated_at.or(b.uploaded_at),
        ),
        DocumentSortField::Title => compare_text(&a.title, &b.title),
        DocumentSortField::Category => compare_optional_text(category_of(a), category_of(b)),
    }
}

pub fn filter_and_sort(docs: &[Document], filter: &DocumentFilter) -> Vec<Document> {
    let wanted = filter
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !same_text(c, "all"));
    let mut visible: Vec<Document> = docs
        .iter()
        .filter(|d| matches_search(d, &filter.search))
        .filter(|d| match wanted {
            Some(wanted) => category_of(d).is_some_and(|c| same_text(c, wanted)),
            None => true,
        })
        .cloned()
        .collect();
    visible.sort_by(|a, b| filter.direction.apply(compare(a, b, filter.sort)));
    visible
}

pub fn derive_document_list(docs: &[Document], filter: &DocumentFilter) -> Vec<Group<Document>> {
    let visible = filter_and_sort(docs, filter);
    if !filter.group_by_category {
        return vec![Group::all(visible)];
    }
    let mut order: Vec<BucketSpec> = categories(&visible)
        .into_iter()
        .map(|c| (fold_case(&c), c))
        .collect();
    order.push((fold_case(UNCATEGORIZED), UNCATEGORIZED.to_string()));
    partition(visible, &order, |d| {
        category_of(d)
            .map(fold_case)
            .unwrap_or_else(|| fold_case(UNCATEGORIZED))
    })
}

/// Distinct categories for the filter picker: sorted, blanks excluded,
/// case variants folded onto the first spelling seen.
pub fn categories(docs: &[Document]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in docs.iter().filter_map(category_of) {
        if !seen.iter().any(|s| same_text(s, category)) {
            seen.push(category.to_string());
        }
    }
    seen.sort_by(|a, b| compare_text(a, b));
    seen
}
