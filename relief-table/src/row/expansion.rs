//! Master-detail expansion.
//!
//! Which rows are expanded lives in an [`ExpansionState`] keyed by row key,
//! owned by the caller and shared with the expand column. The
//! [`ExpansionModifier`] reads it while rendering and injects a nested table
//! below each expanded row. Nested tables can carry their own modifier, so
//! detail rows can expand again to any depth.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock};

use log::warn;

use crate::column::Column;

use super::{KeySelector, RenderedRow, RowModifier, RowOptions, RowRenderer};

/// Expanded row keys.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: Arc<RwLock<HashSet<String>>>,
    exclusive: bool,
}

impl ExpansionState {
    /// Any number of rows may be expanded at once.
    pub fn new() -> Self {
        Self::default()
    }

    /// At most one row is expanded; expanding a row collapses the others.
    pub fn single() -> Self {
        Self {
            exclusive: true,
            ..Self::default()
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded
            .read()
            .map(|set| set.contains(key))
            .unwrap_or(false)
    }

    /// Flip a row. Returns whether it is expanded afterwards.
    pub fn toggle(&self, key: &str) -> bool {
        if self.is_expanded(key) {
            self.collapse(key);
            false
        } else {
            self.expand(key);
            true
        }
    }

    pub fn expand(&self, key: &str) {
        if let Ok(mut set) = self.expanded.write() {
            if self.exclusive {
                set.clear();
            }
            set.insert(key.to_string());
        }
    }

    pub fn collapse(&self, key: &str) {
        if let Ok(mut set) = self.expanded.write() {
            set.remove(key);
        }
    }

    pub fn collapse_all(&self) {
        if let Ok(mut set) = self.expanded.write() {
            set.clear();
        }
    }

    /// Expanded keys in sorted order.
    pub fn expanded_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .expanded
            .read()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

/// Injects the related records of an expanded row as detail rows.
///
/// `D` is the parent record type and `C` the child record type. Child rows
/// are rendered with `columns`, which should line up one-to-one with the
/// parent's columns.
pub struct ExpansionModifier<D, C, KC> {
    state: ExpansionState,
    children: Arc<dyn Fn(&D) -> Vec<C> + Send + Sync>,
    columns: Vec<Column<C, KC>>,
    key_selector: KeySelector<C, KC>,
    nested: Option<Arc<dyn RowModifier<C, KC>>>,
}

impl<D, C, KC> fmt::Debug for ExpansionModifier<D, C, KC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionModifier")
            .field("state", &self.state)
            .field("columns", &self.columns)
            .field("nested", &self.nested.is_some())
            .finish()
    }
}

impl<D, C, KC> ExpansionModifier<D, C, KC> {
    pub fn new(
        state: ExpansionState,
        children: impl Fn(&D) -> Vec<C> + Send + Sync + 'static,
        columns: Vec<Column<C, KC>>,
        key_selector: impl Fn(&C, usize) -> KC + Send + Sync + 'static,
    ) -> Self {
        Self {
            state,
            children: Arc::new(children),
            columns,
            key_selector: Arc::new(key_selector),
            nested: None,
        }
    }

    /// Modifier applied to the detail rows themselves.
    pub fn nested(mut self, modifier: impl RowModifier<C, KC> + 'static) -> Self {
        self.nested = Some(Arc::new(modifier));
        self
    }
}

impl<D, K, C, KC> RowModifier<D, K> for ExpansionModifier<D, C, KC>
where
    KC: ToString,
{
    fn modify(&self, options: RowOptions<'_, D, K>) -> Vec<RenderedRow> {
        let RowOptions {
            row,
            datum,
            columns,
            ..
        } = options;

        if !self.state.is_expanded(&row.key) {
            return vec![row];
        }

        if self.columns.len() != columns.len() {
            warn!(
                "detail columns of row {} do not line up: {} vs {}",
                row.key,
                self.columns.len(),
                columns.len()
            );
        }

        let children = (self.children)(datum);
        let renderer = RowRenderer::new(&self.columns, &*self.key_selector)
            .nested(row.key.clone(), row.depth + 1)
            .modifier(self.nested.as_deref());

        let mut rows = Vec::with_capacity(children.len() + 1);
        rows.push(row);
        rows.extend(renderer.render_rows(&children));
        rows
    }
}
