//! Side-effecting operations of the root component.
//!
//! Each command talks to an [`ExpenseApi`] and reports what happened as
//! [`Action`]s through `dispatch`. Failures are logged and turned into
//! notifications here; nothing is returned to the caller. Every successful
//! mutation re-runs the full fetch cycle.

use log::{error, info, warn};

use crate::api::ExpenseApi;
use crate::forms::ExpenseDraft;
use crate::state::{messages, Action};
use crate::{Category, CategoryRequest};

/// Fetch categories, statistics and, when a category is selected, its
/// expenses. Each request fails on its own.
pub async fn refresh<A>(api: &A, selected_category: Option<i64>, dispatch: &dyn Fn(Action))
where
    A: ExpenseApi + ?Sized,
{
    dispatch(Action::FetchStarted);

    match api.list_categories().await {
        Ok(categories) => dispatch(Action::CategoriesLoaded(categories)),
        Err(e) => {
            error!("Failed to fetch categories: {}", e);
            dispatch(Action::CategoriesFailed);
        }
    }

    match api.get_statistics().await {
        Ok(statistics) => dispatch(Action::StatisticsLoaded(statistics)),
        Err(e) => {
            warn!("Failed to fetch statistics: {}", e);
            dispatch(Action::StatisticsFailed);
        }
    }

    if let Some(category_id) = selected_category {
        load_expenses(api, category_id, dispatch).await;
    }

    dispatch(Action::FetchFinished);
}

async fn load_expenses<A>(api: &A, category_id: i64, dispatch: &dyn Fn(Action))
where
    A: ExpenseApi + ?Sized,
{
    match api.list_expenses(category_id).await {
        Ok(expenses) => dispatch(Action::ExpensesLoaded {
            category_id,
            expenses,
        }),
        Err(e) => {
            error!("Failed to fetch expenses for category {}: {}", category_id, e);
            dispatch(Action::ExpensesFailed { category_id });
        }
    }
}

/// Select a category, switch to its detail view and load its expenses.
pub async fn select_category<A>(api: &A, category: Category, dispatch: &dyn Fn(Action))
where
    A: ExpenseApi + ?Sized,
{
    let category_id = category.id;
    dispatch(Action::SelectCategory(category));
    load_expenses(api, category_id, dispatch).await;
}

/// Create or update (when `request.id` is set) a category.
/// The form stays open when saving fails.
pub async fn submit_category<A>(
    api: &A,
    request: CategoryRequest,
    selected_category: Option<i64>,
    dispatch: &dyn Fn(Action),
) where
    A: ExpenseApi + ?Sized,
{
    let (result, done) = match request.id {
        Some(id) => (api.update_category(id, &request).await, messages::CATEGORY_UPDATED),
        None => (api.create_category(&request).await, messages::CATEGORY_CREATED),
    };

    match result {
        Ok(()) => {
            info!("{}: {}", done, request.name);
            dispatch(Action::success(done));
            dispatch(Action::CloseCategoryForm);
            refresh(api, selected_category, dispatch).await;
        }
        Err(e) => {
            error!("Failed to save category {:?}: {}", request.name, e);
            dispatch(Action::error(messages::CATEGORY_SAVE_FAILED, Some(e.to_string())));
        }
    }
}

/// Delete a category. Callers confirm with the user first.
pub async fn delete_category<A>(
    api: &A,
    category_id: i64,
    selected_category: Option<i64>,
    dispatch: &dyn Fn(Action),
) where
    A: ExpenseApi + ?Sized,
{
    match api.delete_category(category_id).await {
        Ok(()) => {
            info!("Deleted category {}", category_id);
            dispatch(Action::success(messages::CATEGORY_DELETED));
            dispatch(Action::CategoryDeleted(category_id));
            let still_selected = selected_category.filter(|id| *id != category_id);
            refresh(api, still_selected, dispatch).await;
        }
        Err(e) => {
            error!("Failed to delete category {}: {}", category_id, e);
            dispatch(Action::error(messages::CATEGORY_DELETE_FAILED, Some(e.to_string())));
        }
    }
}

/// Create or update an expense.
///
/// New expenses go to the selected category; without one the submission is
/// refused before any request is made. Updates keep the expense's own
/// category.
pub async fn submit_expense<A>(
    api: &A,
    draft: ExpenseDraft,
    selected_category: Option<i64>,
    dispatch: &dyn Fn(Action),
) where
    A: ExpenseApi + ?Sized,
{
    let category_id = match draft.id {
        Some(_) => draft.category_id.or(selected_category),
        None => selected_category,
    };
    let Some(category_id) = category_id else {
        warn!("Expense {:?} submitted without a selected category", draft.name);
        dispatch(Action::error(messages::SELECT_CATEGORY_FIRST, None));
        return;
    };

    let request = draft.into_request(category_id);
    let (result, done) = match request.id {
        Some(id) => (api.update_expense(id, &request).await, messages::EXPENSE_UPDATED),
        None => (api.create_expense(&request).await, messages::EXPENSE_CREATED),
    };

    match result {
        Ok(()) => {
            info!("{}: {} ({})", done, request.name, request.amount);
            dispatch(Action::success(done));
            dispatch(Action::CloseExpenseForm);
            refresh(api, selected_category, dispatch).await;
        }
        Err(e) => {
            error!("Failed to save expense {:?}: {}", request.name, e);
            dispatch(Action::error(messages::EXPENSE_SAVE_FAILED, Some(e.to_string())));
        }
    }
}

/// Delete an expense. Callers confirm with the user first.
pub async fn delete_expense<A>(
    api: &A,
    expense_id: i64,
    selected_category: Option<i64>,
    dispatch: &dyn Fn(Action),
) where
    A: ExpenseApi + ?Sized,
{
    match api.delete_expense(expense_id).await {
        Ok(()) => {
            info!("Deleted expense {}", expense_id);
            dispatch(Action::success(messages::EXPENSE_DELETED));
            refresh(api, selected_category, dispatch).await;
        }
        Err(e) => {
            error!("Failed to delete expense {}: {}", expense_id, e);
            dispatch(Action::error(messages::EXPENSE_DELETE_FAILED, Some(e.to_string())));
        }
    }
}
