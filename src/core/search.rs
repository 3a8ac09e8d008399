//! Filter, sort and paginate stages of the search pipeline
//!
//! The stages are pure: each takes the output of the previous one and never
//! touches the repository collection.

use crate::core::error::ConfigError;
use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::sync::Arc;

/// Domain-specific filtering capability
///
/// Implement this for each entity kind to decide which items match a filter
/// value. The pipeline never calls [`Filterable::matches`] when no filter is
/// given.
pub trait Filterable<E>: Send + Sync {
    /// Whether `item` matches the normalized filter text
    fn matches(&self, item: &E, filter: &str) -> bool;
}

impl<E, F> Filterable<E> for F
where
    F: Fn(&E, &str) -> bool + Send + Sync,
{
    fn matches(&self, item: &E, filter: &str) -> bool {
        self(item, filter)
    }
}

/// Case-insensitive substring test, the usual text filter
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Reads a field of an entity for sorting
pub type FieldAccessor<E> = Arc<dyn Fn(&E) -> FieldValue + Send + Sync>;

/// Registry of sortable field names and their accessors
///
/// Built in two steps: declare the sortable names, then register one accessor
/// per name. A name declared twice counts once. [`SortFieldsBuilder::build`]
/// rejects declared names without an accessor and accessors for undeclared
/// names.
///
/// # Example
/// ```rust,ignore
/// let sort_fields = SortFields::declare(["name", "created_at"])
///     .accessor("name", |u: &User| u.props().name.clone().into())
///     .accessor("created_at", |u: &User| u.props().created_at.into())
///     .build()?;
/// ```
pub struct SortFields<E> {
    accessors: IndexMap<String, FieldAccessor<E>>,
}

impl<E> SortFields<E> {
    /// Start a registry with the given sortable field names
    pub fn declare<I, S>(fields: I) -> SortFieldsBuilder<E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SortFieldsBuilder {
            declared: fields.into_iter().map(Into::into).collect(),
            accessors: IndexMap::new(),
        }
    }

    /// A registry with no sortable fields; every sort request is a no-op
    pub fn none() -> Self {
        Self {
            accessors: IndexMap::new(),
        }
    }

    /// Declare a field together with its accessor
    ///
    /// For registries built in code; [`SortFields::declare`] is the checked
    /// path for names that come from configuration.
    pub fn with_field<F>(mut self, field: impl Into<String>, read: F) -> Self
    where
        F: Fn(&E) -> FieldValue + Send + Sync + 'static,
    {
        self.accessors.insert(field.into(), Arc::new(read));
        self
    }

    /// Declared field names, in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.accessors.keys().map(String::as_str).collect()
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.accessors.contains_key(field)
    }

    pub fn accessor(&self, field: &str) -> Option<&FieldAccessor<E>> {
        self.accessors.get(field)
    }
}

impl<E> Clone for SortFields<E> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
        }
    }
}

impl<E> fmt::Debug for SortFields<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortFields")
            .field("fields", &self.names())
            .finish()
    }
}

/// Builder returned by [`SortFields::declare`]
pub struct SortFieldsBuilder<E> {
    declared: IndexSet<String>,
    accessors: IndexMap<String, FieldAccessor<E>>,
}

impl<E> SortFieldsBuilder<E> {
    /// Register the accessor for one field
    pub fn accessor<F>(mut self, field: impl Into<String>, read: F) -> Self
    where
        F: Fn(&E) -> FieldValue + Send + Sync + 'static,
    {
        self.accessors.insert(field.into(), Arc::new(read));
        self
    }

    /// Check the accessors against the declared names
    pub fn build(mut self) -> Result<SortFields<E>, ConfigError> {
        if let Some(field) = self
            .accessors
            .keys()
            .find(|field| !self.declared.contains(field.as_str()))
        {
            return Err(ConfigError::UndeclaredField {
                field: field.clone(),
            });
        }

        let mut accessors = IndexMap::with_capacity(self.declared.len());
        for field in self.declared {
            let read = self
                .accessors
                .swap_remove(&field)
                .ok_or_else(|| ConfigError::MissingAccessor {
                    field: field.clone(),
                })?;
            accessors.insert(field, read);
        }

        Ok(SortFields { accessors })
    }
}

/// Keep the items matching `filter`
///
/// Without a filter the input is returned as-is and `filterable` is never
/// consulted.
pub fn apply_filter<E, F>(items: Vec<Arc<E>>, filter: Option<&str>, filterable: &F) -> Vec<Arc<E>>
where
    F: Filterable<E> + ?Sized,
{
    let Some(filter) = filter else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| filterable.matches(item, filter))
        .collect()
}

/// Stable sort by a declared field
///
/// Unknown or missing `sort` leaves the order untouched. Equal keys keep
/// their input order in both directions.
pub fn apply_sort<E>(
    mut items: Vec<Arc<E>>,
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
    fields: &SortFields<E>,
) -> Vec<Arc<E>> {
    let Some(read) = sort.and_then(|field| fields.accessor(field)) else {
        return items;
    };

    let direction = sort_dir.unwrap_or(SortDirection::Desc);
    // Read each key once; sort_by is stable
    let mut keyed: Vec<(FieldValue, Arc<E>)> =
        items.drain(..).map(|item| (read(item.as_ref()), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => a.natural_cmp(b),
        SortDirection::Desc => b.natural_cmp(a),
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Half-open page slice `[(page - 1) * per_page, page * per_page)`
///
/// Out-of-range pages produce an empty page.
pub fn apply_paginate<T: Clone>(items: &[T], page: u64, per_page: u64) -> Vec<T> {
    let per_page = usize::try_from(per_page.max(1)).unwrap_or(usize::MAX);
    let start = usize::try_from(page.max(1) - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
        .unwrap_or(usize::MAX);

    if start >= items.len() {
        return Vec::new();
    }

    let end = start.saturating_add(per_page).min(items.len());
    items[start..end].to_vec()
}
