//! Ancestor-preserving tree filter
//!
//! For a non-blank query `q`:
//! 1. a record type matches when its name contains `q`
//! 2. a subcategory matches when its name contains `q` or any record matches
//! 3. a category matches when its name contains `q` or any subcategory matches
//!
//! Only matching categories and subcategories are kept. A kept subcategory
//! shows just its matching records when it has some, otherwise all of them
//! (it matched by name). Sibling order is never changed.

use super::highlight::contains_ignore_case;
use crate::taxonomy::{Category, RecordType, Subcategory, Taxonomy};

/// A kept subcategory and the records shown under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryMatch<'a> {
    pub subcategory: &'a Subcategory,
    /// Whether the subcategory's own name contains the query
    pub name_matched: bool,
    pub record_types: Vec<&'a RecordType>,
}

/// A kept category and the subcategories shown under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch<'a> {
    pub category: &'a Category,
    /// Whether the category's own name contains the query
    pub name_matched: bool,
    pub subcategories: Vec<SubcategoryMatch<'a>>,
}

/// Filter `taxonomy` down to the nodes relevant for `query`
///
/// A blank query keeps the whole tree.
#[must_use]
pub fn filter_taxonomy<'a>(taxonomy: &'a Taxonomy, query: &str) -> Vec<CategoryMatch<'a>> {
    if super::is_blank(query) {
        return taxonomy.categories().iter().map(unfiltered_category).collect();
    }

    taxonomy
        .categories()
        .iter()
        .filter_map(|category| filter_category(category, query))
        .collect()
}

fn unfiltered_category(category: &Category) -> CategoryMatch<'_> {
    CategoryMatch {
        category,
        name_matched: false,
        subcategories: category
            .subcategories
            .iter()
            .map(|subcategory| SubcategoryMatch {
                subcategory,
                name_matched: false,
                record_types: subcategory.record_types.iter().collect(),
            })
            .collect(),
    }
}

fn filter_category<'a>(category: &'a Category, query: &str) -> Option<CategoryMatch<'a>> {
    let name_matched = contains_ignore_case(&category.name, query);
    let subcategories: Vec<_> = category
        .subcategories
        .iter()
        .filter_map(|sub| filter_subcategory(sub, query))
        .collect();

    (name_matched || !subcategories.is_empty()).then_some(CategoryMatch {
        category,
        name_matched,
        subcategories,
    })
}

fn filter_subcategory<'a>(subcategory: &'a Subcategory, query: &str) -> Option<SubcategoryMatch<'a>> {
    let name_matched = contains_ignore_case(&subcategory.name, query);
    let matching: Vec<_> = subcategory
        .record_types
        .iter()
        .filter(|record| contains_ignore_case(&record.name, query))
        .collect();

    if matching.is_empty() && !name_matched {
        return None;
    }

    let record_types = if matching.is_empty() {
        subcategory.record_types.iter().collect()
    } else {
        matching
    };

    Some(SubcategoryMatch {
        subcategory,
        name_matched,
        record_types,
    })
}
