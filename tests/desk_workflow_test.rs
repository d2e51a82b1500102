use async_trait::async_trait;
use customer_desk::{
    Customer, CustomerDesk, CustomerId, CustomerRepository, DeskError, FieldErrors,
    ListingOptions, Outcome, Rejection, Result, SearchScope, SortState,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_test::assert_ok;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    GetAll,
    GetById(CustomerId),
    Add(Customer),
    Update(Customer),
    Remove(CustomerId),
}

#[derive(Clone, Copy)]
enum Failure {
    Storage,
    Conflict,
}

impl Failure {
    fn into_error(self, id: CustomerId) -> DeskError {
        match self {
            Failure::Storage => DeskError::storage("backend unavailable"),
            Failure::Conflict => DeskError::Conflict {
                id,
                expected: 1,
                found: 2,
            },
        }
    }
}

/// Scripted repository that records every call it receives.
#[derive(Clone, Default)]
struct MockRepository {
    customers: Vec<Customer>,
    fail_lookup: Option<Failure>,
    fail_add: Option<Failure>,
    fail_update: Option<Failure>,
    fail_remove: Option<Failure>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockRepository {
    fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            ..Self::default()
        }
    }

    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl CustomerRepository for MockRepository {
    async fn get_all(&self) -> Result<Vec<Customer>> {
        self.record(Call::GetAll).await;
        match self.fail_lookup {
            Some(f) => Err(f.into_error(0)),
            None => Ok(self.customers.clone()),
        }
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        self.record(Call::GetById(id)).await;
        match self.fail_lookup {
            Some(f) => Err(f.into_error(id)),
            None => Ok(self.customers.iter().find(|c| c.id == id).cloned()),
        }
    }

    async fn add(&self, customer: Customer) -> Result<CustomerId> {
        self.record(Call::Add(customer)).await;
        match self.fail_add {
            Some(f) => Err(f.into_error(0)),
            None => Ok(self.customers.len() as CustomerId + 1),
        }
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        let id = customer.id;
        self.record(Call::Update(customer)).await;
        match self.fail_update {
            Some(f) => Err(f.into_error(id)),
            None => Ok(()),
        }
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        self.record(Call::Remove(id)).await;
        match self.fail_remove {
            Some(f) => Err(f.into_error(id)),
            None => Ok(()),
        }
    }
}

fn test_customers() -> Vec<Customer> {
    vec![
        Customer::new("Ramil", "Naum", "Los-Ang", "5").with_id(1).with_version(1),
        Customer::new("Bob", "Dillan", "Berlin", "7").with_id(2).with_version(1),
        Customer::new("Kile", "Rise", "London", "0").with_id(3).with_version(1),
        Customer::new("John", "Konor", "Vashington", "3").with_id(4).with_version(1),
    ]
}

fn invalid(field: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add(field, "Required");
    errors
}

fn names(outcome: Outcome) -> Vec<String> {
    outcome
        .into_listing()
        .expect("listing")
        .customers
        .iter()
        .map(Customer::full_name)
        .collect()
}

#[tokio::test]
async fn show_when_lookup_fails_is_invalid() {
    let repo = MockRepository {
        fail_lookup: Some(Failure::Storage),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);

    assert!(matches!(desk.show(0).await, Outcome::Invalid(_)));
}

#[tokio::test]
async fn show_existing_customer_is_found() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));

    match desk.show(1).await {
        Outcome::Found(customer) => {
            assert_eq!(customer.id, 1);
            assert_eq!(customer.first_name, "Ramil");
            assert_eq!(customer.last_name, "Naum");
            assert_eq!(customer.address, "Los-Ang");
            assert_eq!(customer.discount, "5");
        }
        other => panic!("expected Found, got {}", other.name()),
    }
}

#[tokio::test]
async fn show_absent_customer_is_not_found() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));
    assert_eq!(desk.show(42).await, Outcome::NotFound);
}

#[tokio::test]
async fn index_without_search_returns_all_four() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));

    let view = desk.index(None, None).await.into_listing().unwrap();
    assert_eq!(view.len(), 4);

    let view = desk
        .index(Some(""), Some(SortState::AddressDesc))
        .await
        .into_listing()
        .unwrap();
    assert_eq!(view.len(), 4);
    assert_eq!(view.current_sort, SortState::AddressDesc);
}

#[tokio::test]
async fn index_search_matches_either_name_by_default() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));

    let outcome = desk.index(Some("il"), Some(SortState::LastNameAsc)).await;
    assert_eq!(names(outcome), vec!["Bob Dillan", "Ramil Naum", "Kile Rise"]);
}

#[tokio::test]
async fn index_search_scoped_to_first_name() {
    let options = ListingOptions {
        search_scope: SearchScope::FirstName,
        ..ListingOptions::default()
    };
    let desk = CustomerDesk::with_options(MockRepository::with_customers(test_customers()), options);

    let outcome = desk.index(Some("il"), Some(SortState::LastNameAsc)).await;
    assert_eq!(names(outcome), vec!["Ramil Naum", "Kile Rise"]);
}

#[tokio::test]
async fn index_search_scoped_to_last_name() {
    let options = ListingOptions {
        search_scope: SearchScope::LastName,
        ..ListingOptions::default()
    };
    let desk = CustomerDesk::with_options(MockRepository::with_customers(test_customers()), options);

    let view = desk.index(Some("IL"), None).await.into_listing().unwrap();
    assert!(view
        .customers
        .iter()
        .all(|c| c.last_name.to_lowercase().contains("il")));
    assert_eq!(view.len(), 1);
}

#[tokio::test]
async fn index_reports_filter_and_next_sort_links() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));

    let view = desk
        .index(Some("il"), Some(SortState::LastNameAsc))
        .await
        .into_listing()
        .unwrap();

    assert_eq!(view.current_filter.as_deref(), Some("il"));
    assert_eq!(view.links.last_name, SortState::LastNameDesc);
    assert_eq!(view.links.address, SortState::AddressAsc);
}

#[tokio::test]
async fn index_when_enumeration_fails_is_invalid() {
    let repo = MockRepository {
        fail_lookup: Some(Failure::Storage),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);
    assert!(matches!(desk.index(None, None).await, Outcome::Invalid(_)));
}

#[tokio::test]
async fn new_form_is_blank() {
    let desk = CustomerDesk::new(MockRepository::default());
    let form = desk.new_form();
    assert!(form.is_draft());
    assert!(form.last_name.is_empty());
}

#[tokio::test]
async fn create_valid_draft_adds_customer() {
    let repo = MockRepository::default();
    let desk = CustomerDesk::new(repo.clone());
    let draft = Customer::new("Jack", "Sparrow", "", "").with_id(1);

    let outcome = desk.create(draft.clone(), &FieldErrors::new()).await;

    assert!(matches!(outcome, Outcome::Created(_)));
    assert_eq!(repo.calls().await, vec![Call::Add(draft)]);
}

#[tokio::test]
async fn create_invalid_draft_is_rejected_unchanged() {
    let repo = MockRepository::with_customers(test_customers());
    let desk = CustomerDesk::new(repo.clone());
    let draft = Customer::default();

    let outcome = desk.create(draft.clone(), &invalid("id")).await;

    match outcome {
        Outcome::Rejected(Rejection::Draft { draft: returned, errors }) => {
            assert_eq!(returned, draft);
            assert_eq!(errors.field("id"), ["Required".to_string()]);
        }
        other => panic!("expected Rejected, got {}", other.name()),
    }
    assert!(repo.calls().await.is_empty());
}

#[tokio::test]
async fn create_storage_failure_is_invalid() {
    let repo = MockRepository {
        fail_add: Some(Failure::Storage),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);
    let outcome = desk
        .create(Customer::new("Jack", "Sparrow", "", ""), &FieldErrors::new())
        .await;
    assert!(matches!(outcome, Outcome::Invalid(_)));
}

#[tokio::test]
async fn edit_form_for_absent_customer_is_not_found() {
    let desk = CustomerDesk::new(MockRepository::default());
    assert_eq!(desk.edit_form(1).await, Outcome::NotFound);
}

#[tokio::test]
async fn edit_form_returns_stored_customer() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));
    let outcome = desk.edit_form(1).await;
    let customer = outcome.customer().unwrap();
    assert_eq!(customer.first_name, "Ramil");
    assert_eq!(customer.discount, "5");
}

#[tokio::test]
async fn edit_with_mismatched_id_is_not_found_without_update() {
    let repo = MockRepository::default();
    let desk = CustomerDesk::new(repo.clone());

    let outcome = desk.edit(1, Customer::default(), &FieldErrors::new()).await;

    assert_eq!(outcome, Outcome::NotFound);
    assert!(repo.calls().await.is_empty());
}

#[tokio::test]
async fn edit_concurrency_collision_is_conflict() {
    let repo = MockRepository {
        fail_update: Some(Failure::Conflict),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);

    let outcome = desk
        .edit(1, Customer::default().with_id(1), &FieldErrors::new())
        .await;
    assert_eq!(outcome, Outcome::Conflict { id: 1 });
}

#[tokio::test]
async fn edit_other_storage_failure_is_invalid() {
    let repo = MockRepository {
        fail_update: Some(Failure::Storage),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);

    let outcome = desk
        .edit(1, Customer::default().with_id(1), &FieldErrors::new())
        .await;
    assert!(matches!(outcome, Outcome::Invalid(_)));
}

#[tokio::test]
async fn edit_valid_draft_updates_customer() {
    let repo = MockRepository::default();
    let desk = CustomerDesk::new(repo.clone());
    let draft = Customer::default().with_id(1);

    let outcome = desk.edit(1, draft.clone(), &FieldErrors::new()).await;

    assert_eq!(outcome, Outcome::Updated(1));
    assert!(outcome.is_success());
    assert_eq!(repo.calls().await, vec![Call::Update(draft)]);
}

#[tokio::test]
async fn edit_invalid_draft_is_rejected_unchanged() {
    let repo = MockRepository::default();
    let desk = CustomerDesk::new(repo.clone());
    let draft = Customer::default().with_id(1);

    let outcome = desk.edit(1, draft.clone(), &invalid("firstName")).await;

    assert_eq!(outcome.customer(), Some(&draft));
    assert!(matches!(outcome, Outcome::Rejected(Rejection::Draft { .. })));
    assert!(repo.calls().await.is_empty());
}

#[tokio::test]
async fn delete_confirm_for_absent_customer_is_not_found() {
    let desk = CustomerDesk::new(MockRepository::default());
    assert_eq!(desk.delete_confirm(1).await, Outcome::NotFound);
}

#[tokio::test]
async fn delete_confirm_returns_customer() {
    let desk = CustomerDesk::new(MockRepository::with_customers(test_customers()));
    match desk.delete_confirm(1).await {
        Outcome::Found(customer) => {
            assert_eq!(customer.id, 1);
            assert_eq!(customer.address, "Los-Ang");
        }
        other => panic!("expected Found, got {}", other.name()),
    }
}

#[tokio::test]
async fn delete_removes_customer() {
    let repo = MockRepository::default();
    let desk = CustomerDesk::new(repo.clone());

    assert_eq!(desk.delete(1).await, Outcome::Deleted(1));
    assert_eq!(repo.calls().await, vec![Call::Remove(1)]);
}

#[tokio::test]
async fn delete_failure_is_soft_rejection() {
    let repo = MockRepository {
        fail_remove: Some(Failure::Storage),
        ..MockRepository::default()
    };
    let desk = CustomerDesk::new(repo);

    match desk.delete(1).await {
        Outcome::Rejected(Rejection::Delete { id, reason }) => {
            assert_eq!(id, 1);
            assert!(reason.contains("backend unavailable"));
        }
        other => panic!("expected Rejected, got {}", other.name()),
    }
}

#[tokio::test]
async fn shared_repository_through_arc() {
    let repo = Arc::new(MockRepository::with_customers(test_customers()));
    let desk = CustomerDesk::new(Arc::clone(&repo));

    assert_ok!(repo.get_all().await);
    assert!(desk.show(2).await.is_success());
    assert_eq!(repo.calls().await, vec![Call::GetAll, Call::GetById(2)]);
}
