use crate::core::sort::resolve_sort;
use crate::domain::model::{Customer, CustomerListView, CustomerQuery, SearchScope, SortState};

fn matches(customer: &Customer, needle: &str, scope: SearchScope) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    match scope {
        SearchScope::LastName => contains(&customer.last_name),
        SearchScope::FirstName => contains(&customer.first_name),
        SearchScope::AnyName => contains(&customer.last_name) || contains(&customer.first_name),
    }
}

/// Filters then orders `all` into a fresh vector. `all` is left untouched.
pub fn list_customers(
    all: &[Customer],
    search: Option<&str>,
    sort: Option<SortState>,
    scope: SearchScope,
    default_sort: SortState,
) -> Vec<Customer> {
    let plan = resolve_sort(sort, default_sort);

    let mut selected: Vec<Customer> = match search.filter(|s| !s.is_empty()) {
        Some(term) => {
            let needle = term.to_lowercase();
            all.iter()
                .filter(|c| matches(c, &needle, scope))
                .cloned()
                .collect()
        }
        None => all.to_vec(),
    };

    // stable: equal keys keep their stored order
    selected.sort_by(|a, b| plan.compare(a, b));
    selected
}

pub fn compose(all: &[Customer], query: &CustomerQuery, default_sort: SortState) -> CustomerListView {
    let plan = resolve_sort(query.sort, default_sort);
    let customers = list_customers(
        all,
        query.search.as_deref(),
        Some(plan.state),
        query.scope,
        default_sort,
    );

    tracing::debug!(
        "Composed listing: {} of {} customers (filter: {:?}, sort: {})",
        customers.len(),
        all.len(),
        query.search,
        plan.state
    );

    CustomerListView {
        customers,
        current_filter: query.search.clone(),
        current_sort: plan.state,
        links: plan.links,
    }
}
