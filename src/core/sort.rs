use crate::domain::model::{Customer, SortField, SortLinks, SortState};
use std::cmp::Ordering;

/// The ordering chosen for one request plus the next-click state of each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPlan {
    pub state: SortState,
    pub links: SortLinks,
}

impl SortPlan {
    pub fn compare(&self, a: &Customer, b: &Customer) -> Ordering {
        let field = self.state.field();
        let ordering = field.key(a).cmp(field.key(b));
        if self.state.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Resolves the requested state (or `default` when none was requested).
///
/// The active column links to its toggled state; every other column links to
/// its ascending state.
pub fn resolve_sort(requested: Option<SortState>, default: SortState) -> SortPlan {
    let state = requested.unwrap_or(default);
    SortPlan {
        state,
        links: links_for(state),
    }
}

pub fn links_for(state: SortState) -> SortLinks {
    let next = |field: SortField| {
        if state.field() == field {
            state.toggled()
        } else {
            SortState::ascending(field)
        }
    };
    SortLinks {
        first_name: next(SortField::FirstName),
        last_name: next(SortField::LastName),
        address: next(SortField::Address),
        discount: next(SortField::Discount),
    }
}
