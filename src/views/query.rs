//! Building blocks shared by the list view-models: search terms, sort
//! direction, comparators and bucket partitioning.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

/// A normalized free-text search. Blank input matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(Option<String>);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(trimmed.to_lowercase()))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// True when any of `fields` contains the term, ignoring case.
    pub fn matches<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let Some(needle) = &self.0 else {
            return true;
        };
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// Key used wherever two labels that differ only in case are the same
/// bucket or picker entry.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

pub fn same_text(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// Case-folded comparison with a byte-order tiebreak so the order is total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    fold_case(a).cmp(&fold_case(b)).then_with(|| a.cmp(b))
}

pub fn compare_optional_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_text(a.unwrap_or(""), b.unwrap_or(""))
}

/// Ascending comparison where a missing value sorts after every present one.
pub fn compare_missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One named bucket of a grouped list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    pub key: String,
    pub label: String,
    pub items: Vec<T>,
}

impl<T> Group<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }

    pub fn all(items: Vec<T>) -> Self {
        Self {
            key: ALL_KEY.to_string(),
            label: ALL_LABEL.to_string(),
            items,
        }
    }
}

pub const ALL_KEY: &str = "all";
pub const ALL_LABEL: &str = "All";

/// A bucket slot in a fixed ordering: `(key, label)`.
pub type BucketSpec = (String, String);

/// Partition `items` into buckets laid out in `order`.
///
/// Items keep their relative order inside a bucket. A key missing from
/// `order` opens a trailing bucket labelled with the key, so every item lands
/// in exactly one bucket. Empty buckets are dropped; if nothing survives the
/// result is a single empty "All" bucket.
pub fn partition<T, F>(items: Vec<T>, order: &[BucketSpec], key_of: F) -> Vec<Group<T>>
where
    F: Fn(&T) -> String,
{
    let mut groups: Vec<Group<T>> = order
        .iter()
        .map(|(key, label)| Group::new(key.clone(), label.clone()))
        .collect();

    for item in items {
        let key = key_of(&item);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.items.push(item),
            None => {
                let mut group = Group::new(key.clone(), key);
                group.items.push(item);
                groups.push(group);
            }
        }
    }

    groups.retain(|g| !g.items.is_empty());
    if groups.is_empty() {
        groups.push(Group::all(Vec::new()));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_search_is_no_filter() {
        let term = SearchTerm::new("   \t ");
        assert!(term.is_empty());
        assert!(term.matches([None, Some("anything")]));
        assert!(term.matches(std::iter::empty::<Option<&str>>()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let term = SearchTerm::new("  PayRoll ");
        assert_eq!(term.as_str(), Some("payroll"));
        assert!(term.matches([Some("Monthly payroll run")]));
        assert!(!term.matches([Some("Hiring"), None]));
    }

    #[test]
    fn sort_direction_flips_ordering() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn same_text_folds_beyond_ascii() {
        assert!(same_text("Ärzte", "ärzte"));
        assert!(same_text("ÉTÉ", "été"));
        assert!(!same_text("a", "b"));
    }

    #[test]
    fn compare_text_ignores_case_first() {
        assert_eq!(compare_text("alpha", "Beta"), Ordering::Less);
        assert_eq!(compare_text("Beta", "alpha"), Ordering::Greater);
        assert_ne!(compare_text("a", "A"), Ordering::Equal);
    }

    #[test]
    fn missing_values_sort_last() {
        assert_eq!(compare_missing_last(Some(1), None), Ordering::Less);
        assert_eq!(compare_missing_last(None, Some(1)), Ordering::Greater);
        assert_eq!(compare_missing_last::<i32>(None, None), Ordering::Equal);
    }

    #[test]
    fn partition_drops_empty_buckets_and_keeps_order() {
        let order: Vec<BucketSpec> = vec![
            ("a".into(), "A".into()),
            ("b".into(), "B".into()),
            ("c".into(), "C".into()),
        ];
        let groups = partition(vec![("c", 1), ("a", 2), ("c", 3)], &order, |(k, _)| {
            k.to_string()
        });
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(groups[1].items, vec![("c", 1), ("c", 3)]);
    }

    #[test]
    fn partition_of_nothing_is_single_all_bucket() {
        let groups = partition(Vec::<u8>::new(), &[], |_| "x".to_string());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, ALL_KEY);
        assert!(groups[0].items.is_empty());
    }

    #[test]
    fn partition_keeps_items_with_unlisted_keys() {
        let groups = partition(vec![1, 2, 3], &[("odd".into(), "Odd".into())], |n| {
            if n % 2 == 1 { "odd".into() } else { "even".into() }
        });
        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(total, 3);
        assert_eq!(groups[1].key, "even");
    }
}
