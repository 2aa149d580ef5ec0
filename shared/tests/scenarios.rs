//! End-to-end flows of the command layer against an in-memory backend.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::commands;
use shared::state::messages;
use shared::{
    reduce, Action, ActiveView, ApiError, AppState, Category, CategoryForm, CategoryRequest,
    CategoryStat, Expense, ExpenseApi, ExpenseForm, ExpenseRequest, NotificationLevel, Statistics,
};

#[derive(Default)]
struct Store {
    categories: Vec<CategoryRequest>,
    expenses: Vec<Expense>,
    next_id: i64,
}

/// Backend fake that keeps data in memory and records every call
#[derive(Default)]
struct FakeBackend {
    store: RefCell<Store>,
    calls: RefCell<Vec<String>>,
    expense_requests: RefCell<Vec<ExpenseRequest>>,
    fail_statistics: Cell<bool>,
    fail_mutations: Cell<bool>,
}

impl FakeBackend {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn seed_category(&self, name: &str) -> i64 {
        let mut store = self.store.borrow_mut();
        store.next_id += 1;
        let id = store.next_id;
        store.categories.push(CategoryRequest {
            id: Some(id),
            name: name.to_string(),
            ..Default::default()
        });
        id
    }

    fn seed_expense(&self, category_id: i64, name: &str, amount: f64, date: &str) -> i64 {
        let mut store = self.store.borrow_mut();
        store.next_id += 1;
        let id = store.next_id;
        store.expenses.push(Expense {
            id,
            category_id,
            name: name.to_string(),
            amount,
            date: date.to_string(),
            description: String::new(),
        });
        id
    }

    fn mutation_guard(&self) -> Result<(), ApiError> {
        if self.fail_mutations.get() {
            Err(ApiError::Status {
                status: 500,
                message: "database unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn monthly(expenses: &[&Expense]) -> BTreeMap<String, f64> {
        let mut months = BTreeMap::new();
        for expense in expenses {
            *months.entry(expense.date[..7].to_string()).or_insert(0.0) += expense.amount;
        }
        months
    }
}

#[async_trait(?Send)]
impl ExpenseApi for FakeBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record("GET /categories".to_string());
        let store = self.store.borrow();
        Ok(store
            .categories
            .iter()
            .map(|c| {
                let id = c.id.unwrap_or_default();
                let expenses: Vec<&Expense> =
                    store.expenses.iter().filter(|e| e.category_id == id).collect();
                Category {
                    id,
                    name: c.name.clone(),
                    description: c.description.clone(),
                    total_amount: expenses.iter().map(|e| e.amount).sum(),
                    monthly_stats: Self::monthly(&expenses),
                    expenses: expenses.into_iter().cloned().collect(),
                }
            })
            .collect())
    }

    async fn get_statistics(&self) -> Result<Statistics, ApiError> {
        self.record("GET /statistics".to_string());
        if self.fail_statistics.get() {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        let store = self.store.borrow();
        let all: Vec<&Expense> = store.expenses.iter().collect();
        let monthly_totals = Self::monthly(&all);
        Ok(Statistics {
            total_amount: all.iter().map(|e| e.amount).sum(),
            current_month_amount: monthly_totals.values().next_back().copied().unwrap_or(0.0),
            category_stats: store
                .categories
                .iter()
                .map(|c| {
                    let id = c.id.unwrap_or_default();
                    let expenses: Vec<&Expense> =
                        store.expenses.iter().filter(|e| e.category_id == id).collect();
                    CategoryStat {
                        id,
                        name: c.name.clone(),
                        total_amount: expenses.iter().map(|e| e.amount).sum(),
                        monthly_stats: Self::monthly(&expenses),
                    }
                })
                .collect(),
            monthly_totals,
        })
    }

    async fn list_expenses(&self, category_id: i64) -> Result<Vec<Expense>, ApiError> {
        self.record(format!("GET /expenses?categoryId={}", category_id));
        Ok(self
            .store
            .borrow()
            .expenses
            .iter()
            .filter(|e| e.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_category(&self, request: &CategoryRequest) -> Result<(), ApiError> {
        self.record("POST /categories".to_string());
        self.mutation_guard()?;
        let mut store = self.store.borrow_mut();
        store.next_id += 1;
        let mut stored = request.clone();
        stored.id = Some(store.next_id);
        store.categories.push(stored);
        Ok(())
    }

    async fn update_category(&self, id: i64, request: &CategoryRequest) -> Result<(), ApiError> {
        self.record(format!("PUT /categories/{}", id));
        self.mutation_guard()?;
        let mut store = self.store.borrow_mut();
        match store.categories.iter_mut().find(|c| c.id == Some(id)) {
            Some(category) => {
                category.name = request.name.clone();
                category.description = request.description.clone();
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                message: "Category not found".to_string(),
            }),
        }
    }

    async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE /categories/{}", id));
        self.mutation_guard()?;
        let mut store = self.store.borrow_mut();
        store.categories.retain(|c| c.id != Some(id));
        store.expenses.retain(|e| e.category_id != id);
        Ok(())
    }

    async fn create_expense(&self, request: &ExpenseRequest) -> Result<(), ApiError> {
        self.record("POST /expenses".to_string());
        self.mutation_guard()?;
        self.expense_requests.borrow_mut().push(request.clone());
        let mut store = self.store.borrow_mut();
        store.next_id += 1;
        let id = store.next_id;
        store.expenses.push(Expense {
            id,
            category_id: request.category_id,
            name: request.name.clone(),
            amount: request.amount,
            date: request.date.clone(),
            description: request.description.clone(),
        });
        Ok(())
    }

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> Result<(), ApiError> {
        self.record(format!("PUT /expenses/{}", id));
        self.mutation_guard()?;
        self.expense_requests.borrow_mut().push(request.clone());
        let mut store = self.store.borrow_mut();
        if let Some(expense) = store.expenses.iter_mut().find(|e| e.id == id) {
            expense.category_id = request.category_id;
            expense.name = request.name.clone();
            expense.amount = request.amount;
            expense.date = request.date.clone();
            expense.description = request.description.clone();
        }
        Ok(())
    }

    async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE /expenses/{}", id));
        self.mutation_guard()?;
        self.store.borrow_mut().expenses.retain(|e| e.id != id);
        Ok(())
    }
}

fn today() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[tokio::test]
async fn test_initial_load_fills_state() {
    let backend = FakeBackend::default();
    let groceries = backend.seed_category("Groceries");
    backend.seed_expense(groceries, "Bread", 2.0, "2024-01-05T00:00:00Z");

    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;

    let state = state.into_inner();
    assert!(!state.loading);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].expense_count(), 1);
    assert_eq!(state.statistics.total_amount, 2.0);
    assert_eq!(state.active_view(), ActiveView::AllCategories);
    assert_eq!(backend.calls(), vec!["GET /categories", "GET /statistics"]);
}

#[tokio::test]
async fn test_create_category_then_refresh() {
    let backend = FakeBackend::default();
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    assert!(state.borrow().categories.is_empty());

    dispatch(Action::OpenCategoryForm(None));
    let mut form = CategoryForm::from_initial(None);
    form.name = "Groceries".to_string();
    form.description = "Food and household".to_string();
    let request = form.to_request().unwrap();
    assert_eq!(request.id, None);

    commands::submit_category(&backend, request, None, &dispatch).await;

    let state = state.into_inner();
    assert!(!state.category_form_open);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].name, "Groceries");
    assert_eq!(state.categories[0].description, "Food and household");
    assert_eq!(state.categories[0].total_amount, 0.0);
    assert_eq!(state.categories[0].expense_count(), 0);
    assert_eq!(state.notifications.last().map(|n| n.title.as_str()), Some(messages::CATEGORY_CREATED));
}

#[tokio::test]
async fn test_update_selected_category_refreshes_its_copy() {
    let backend = FakeBackend::default();
    let food = backend.seed_category("Food");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let category = state.borrow().categories[0].clone();
    commands::select_category(&backend, category.clone(), &dispatch).await;
    backend.clear_calls();

    dispatch(Action::OpenCategoryForm(Some(category.clone())));
    let mut form = CategoryForm::from_initial(Some(&category));
    form.name = "Groceries".to_string();
    form.description = "Weekly shop".to_string();
    let request = form.to_request().unwrap();
    assert_eq!(request.id, Some(food));

    let selected = state.borrow().selected_category_id();
    commands::submit_category(&backend, request, selected, &dispatch).await;

    assert_eq!(
        backend.calls(),
        vec![
            format!("PUT /categories/{}", food),
            "GET /categories".to_string(),
            "GET /statistics".to_string(),
            format!("GET /expenses?categoryId={}", food),
        ]
    );

    let state = state.into_inner();
    assert!(!state.category_form_open);
    assert_eq!(state.editing_category, None);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].name, "Groceries");
    let selected = state.selected_category.as_ref().map(|c| (c.name.as_str(), c.description.as_str()));
    assert_eq!(selected, Some(("Groceries", "Weekly shop")));
    assert_eq!(
        state.notifications.last().map(|n| n.title.as_str()),
        Some(messages::CATEGORY_UPDATED)
    );
}

#[tokio::test]
async fn test_add_expense_to_selected_category() {
    let backend = FakeBackend::default();
    let groceries = backend.seed_category("Groceries");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let category = state.borrow().categories[0].clone();
    commands::select_category(&backend, category, &dispatch).await;
    assert_eq!(state.borrow().selected_category_id(), Some(groceries));

    let mut form = ExpenseForm::from_initial(None, today());
    form.name = "Milk".to_string();
    form.set_amount("3.5");
    form.date = "2024-01-10".to_string();
    let draft = form.to_draft().unwrap();

    let selected = state.borrow().selected_category_id();
    commands::submit_expense(&backend, draft, selected, &dispatch).await;

    let sent = backend.expense_requests.borrow()[0].clone();
    assert_eq!(sent.category_id, groceries);
    assert_eq!(sent.name, "Milk");
    assert_eq!(sent.amount, 3.5);
    assert_eq!(sent.date, "2024-01-10T00:00:00.000Z");
    assert_eq!(sent.id, None);

    let state = state.into_inner();
    assert_eq!(state.expenses.len(), 1);
    assert_eq!(state.expenses[0].name, "Milk");
    assert_eq!(state.categories[0].total_amount, 3.5);
}

#[tokio::test]
async fn test_expense_without_selection_makes_no_request() {
    let backend = FakeBackend::default();
    backend.seed_category("Groceries");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    let mut form = ExpenseForm::from_initial(None, today());
    form.name = "Milk".to_string();
    form.set_amount("3.5");
    let draft = form.to_draft().unwrap();

    commands::submit_expense(&backend, draft, None, &dispatch).await;

    assert!(backend.calls().is_empty());
    let state = state.into_inner();
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].level, NotificationLevel::Error);
    assert_eq!(state.notifications[0].title, messages::SELECT_CATEGORY_FIRST);
}

#[tokio::test]
async fn test_edit_expense_keeps_its_category() {
    let backend = FakeBackend::default();
    let groceries = backend.seed_category("Groceries");
    let milk = backend.seed_expense(groceries, "Milk", 3.5, "2024-01-10T00:00:00Z");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let category = state.borrow().categories[0].clone();
    commands::select_category(&backend, category, &dispatch).await;

    let existing = state.borrow().expenses[0].clone();
    dispatch(Action::OpenExpenseForm(Some(existing.clone())));
    let mut form = ExpenseForm::from_initial(Some(&existing), today());
    assert_eq!(form.date, "2024-01-10");
    form.set_amount("4");

    let selected = state.borrow().selected_category_id();
    commands::submit_expense(&backend, form.to_draft().unwrap(), selected, &dispatch).await;

    assert!(backend.calls().contains(&format!("PUT /expenses/{}", milk)));
    let sent = backend.expense_requests.borrow()[0].clone();
    assert_eq!(sent.id, Some(milk));
    assert_eq!(sent.category_id, groceries);

    let state = state.into_inner();
    assert!(!state.expense_form_open);
    assert_eq!(state.editing_expense, None);
    assert_eq!(state.expenses[0].amount, 4.0);
}

#[tokio::test]
async fn test_delete_selected_category_returns_to_overview() {
    let backend = FakeBackend::default();
    let groceries = backend.seed_category("Groceries");
    backend.seed_category("Transport");
    backend.seed_expense(groceries, "Bread", 2.0, "2024-01-05T00:00:00Z");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let category = state.borrow().categories[0].clone();
    commands::select_category(&backend, category, &dispatch).await;
    assert_eq!(state.borrow().expenses.len(), 1);
    backend.clear_calls();

    let selected = state.borrow().selected_category_id();
    commands::delete_category(&backend, groceries, selected, &dispatch).await;

    // No expense request for the deleted category after the delete
    assert_eq!(
        backend.calls(),
        vec![
            format!("DELETE /categories/{}", groceries),
            "GET /categories".to_string(),
            "GET /statistics".to_string(),
        ]
    );

    let state = state.into_inner();
    assert_eq!(state.active_view(), ActiveView::AllCategories);
    assert!(state.expenses.is_empty());
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].name, "Transport");
}

#[tokio::test]
async fn test_switching_categories_shows_only_latest() {
    let backend = FakeBackend::default();
    let a = backend.seed_category("A");
    let b = backend.seed_category("B");
    backend.seed_expense(a, "Bread", 2.0, "2024-01-05T00:00:00Z");
    backend.seed_expense(b, "Bus", 1.5, "2024-01-06T00:00:00Z");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let categories = state.borrow().categories.clone();

    commands::select_category(&backend, categories[0].clone(), &dispatch).await;
    commands::select_category(&backend, categories[1].clone(), &dispatch).await;

    let state = state.into_inner();
    assert_eq!(state.selected_category_id(), Some(b));
    assert_eq!(state.expenses.len(), 1);
    assert!(state.expenses.iter().all(|e| e.category_id == b));
}

#[tokio::test]
async fn test_statistics_failure_does_not_block_categories() {
    let backend = FakeBackend::default();
    backend.seed_category("Groceries");
    backend.fail_statistics.set(true);
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;

    let state = state.into_inner();
    assert!(!state.loading);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.statistics, Statistics::default());
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].level, NotificationLevel::Warning);
}

#[tokio::test]
async fn test_failed_save_keeps_form_open() {
    let backend = FakeBackend::default();
    backend.fail_mutations.set(true);
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    dispatch(Action::OpenCategoryForm(None));
    let request = CategoryRequest {
        name: "Groceries".to_string(),
        ..Default::default()
    };
    commands::submit_category(&backend, request, None, &dispatch).await;

    // No refresh after a failed mutation
    assert_eq!(backend.calls(), vec!["POST /categories"]);
    let state = state.into_inner();
    assert!(state.category_form_open);
    let last = state.notifications.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.title, messages::CATEGORY_SAVE_FAILED);
    assert_eq!(
        last.description.as_deref(),
        Some("server error 500: database unavailable")
    );
}

#[tokio::test]
async fn test_delete_expense_refreshes_selected_category() {
    let backend = FakeBackend::default();
    let groceries = backend.seed_category("Groceries");
    let bread = backend.seed_expense(groceries, "Bread", 2.0, "2024-01-05T00:00:00Z");
    backend.seed_expense(groceries, "Milk", 3.5, "2024-01-10T00:00:00Z");
    let state = RefCell::new(AppState::default());
    let dispatch = |action: Action| reduce(&mut state.borrow_mut(), action);

    commands::refresh(&backend, None, &dispatch).await;
    let category = state.borrow().categories[0].clone();
    commands::select_category(&backend, category, &dispatch).await;

    let selected = state.borrow().selected_category_id();
    commands::delete_expense(&backend, bread, selected, &dispatch).await;

    let state = state.into_inner();
    assert_eq!(state.expenses.len(), 1);
    assert_eq!(state.expenses[0].name, "Milk");
    assert_eq!(state.statistics.total_amount, 3.5);
    assert_eq!(state.notifications.last().map(|n| n.title.as_str()), Some(messages::EXPENSE_DELETED));
}
