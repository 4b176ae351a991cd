//! Sort state shared by the header cells of one table.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::column::Column;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Dsc,
}

impl SortDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Asc => Self::Dsc,
            Self::Dsc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Dsc => "dsc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "dsc" | "desc" => Ok(Self::Dsc),
            other => Err(format!("invalid sort direction: {other}")),
        }
    }
}

/// The single active sort of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sorting {
    /// Id of the sorted column.
    pub name: String,
    pub direction: SortDirection,
}

impl Sorting {
    pub fn new(name: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }
}

/// Next sort state after a click on `column`.
///
/// A column cycles `None → default → opposite → None`. Clicking a column other
/// than the sorted one starts it at `default`, which drops the previous sort.
pub fn next_sorting(
    current: Option<&Sorting>,
    column: &str,
    default: SortDirection,
) -> Option<Sorting> {
    match current {
        Some(sorting) if sorting.name == column => {
            if sorting.direction == default {
                Some(Sorting::new(column, default.opposite()))
            } else {
                None
            }
        }
        _ => Some(Sorting::new(column, default)),
    }
}

/// Table-scoped sort state.
///
/// Created by one [`Table`](crate::Table) and handed to its header cells.
/// Clones share the same slot, so a caller holding a clone sees header clicks
/// and can re-issue its query when [`SortContext::take_changed`] reports one.
#[derive(Debug, Default)]
pub struct SortContext {
    sorting: Arc<RwLock<Option<Sorting>>>,
    changed: Arc<AtomicBool>,
}

impl Clone for SortContext {
    fn clone(&self) -> Self {
        Self {
            sorting: Arc::clone(&self.sorting),
            changed: Arc::clone(&self.changed),
        }
    }
}

impl SortContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an initial sort.
    pub fn with_sorting(sorting: Sorting) -> Self {
        Self {
            sorting: Arc::new(RwLock::new(Some(sorting))),
            changed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current sort, if any.
    pub fn sorting(&self) -> Option<Sorting> {
        self.sorting
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Replace the sort.
    pub fn set_sorting(&self, sorting: Option<Sorting>) {
        if let Ok(mut guard) = self.sorting.write() {
            if *guard != sorting {
                debug!("sort changed: {:?} -> {:?}", *guard, sorting);
                self.changed.store(true, AtomicOrdering::SeqCst);
            }
            *guard = sorting;
        }
    }

    /// Advance the cycle for `column` and return the new sort.
    pub fn cycle(&self, column: &str, default: SortDirection) -> Option<Sorting> {
        let next = next_sorting(self.sorting().as_ref(), column, default);
        self.set_sorting(next.clone());
        next
    }

    /// Direction of `column` if it is the sorted one.
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.sorting()
            .filter(|s| s.name == column)
            .map(|s| s.direction)
    }

    /// Whether the sort changed since the last call. Clears the flag.
    pub fn take_changed(&self) -> bool {
        self.changed.swap(false, AtomicOrdering::SeqCst)
    }
}

/// Sort records client-side with the active column's comparator.
///
/// The sort is stable. A sort naming an unknown or non-sortable column
/// leaves `data` untouched.
pub fn sort_rows<D, K>(data: &mut [D], columns: &[Column<D, K>], sorting: Option<&Sorting>) {
    let Some(sorting) = sorting else { return };
    let Some(compare) = columns
        .iter()
        .rev()
        .find(|c| c.id == sorting.name)
        .filter(|c| c.is_sortable())
        .and_then(|c| c.value_comparator.as_ref())
    else {
        return;
    };

    match sorting.direction {
        SortDirection::Asc => data.sort_by(|a, b| compare(a, b)),
        SortDirection::Dsc => data.sort_by(|a, b| compare(b, a)),
    }
}
