//! # Application State
//!
//! All client state lives in one `AppState` owned by the root component.
//! Every change goes through [`reduce`], one `Action` at a time:
//!
//! - fetch results (started / loaded / failed per resource / finished)
//! - navigation (select a category, show all, toggle statistics)
//! - modal lifecycle (open with or without an editing target, close)
//! - notifications (push, dismiss)
//!
//! Server data is never patched locally: lists are replaced wholesale by the
//! next fetch cycle.

use crate::{Category, Expense, Statistics};

/// User-visible notification texts
pub mod messages {
    pub const CATEGORIES_FAILED: &str = "Failed to load categories";
    pub const STATISTICS_FAILED: &str = "Could not load statistics";
    pub const STATISTICS_FAILED_DETAIL: &str = "You can keep using the app without them";
    pub const EXPENSES_FAILED: &str = "Failed to load expenses";
    pub const CATEGORY_CREATED: &str = "Category created";
    pub const CATEGORY_UPDATED: &str = "Category updated";
    pub const CATEGORY_DELETED: &str = "Category deleted";
    pub const CATEGORY_SAVE_FAILED: &str = "Failed to save category";
    pub const CATEGORY_DELETE_FAILED: &str = "Failed to delete category";
    pub const EXPENSE_CREATED: &str = "Expense added";
    pub const EXPENSE_UPDATED: &str = "Expense updated";
    pub const EXPENSE_DELETED: &str = "Expense deleted";
    pub const EXPENSE_SAVE_FAILED: &str = "Failed to save expense";
    pub const EXPENSE_DELETE_FAILED: &str = "Failed to delete expense";
    pub const SELECT_CATEGORY_FIRST: &str = "Select a category first";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// Transient, dismissible message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

/// The one page section currently shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView<'a> {
    AllCategories,
    CategoryDetail(&'a Category),
    Statistics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub selected_category: Option<Category>,
    /// Expenses of the selected category, empty otherwise
    pub expenses: Vec<Expense>,
    /// Set from selecting a category until its expenses answer
    pub expenses_loading: bool,
    pub statistics: Statistics,
    pub loading: bool,
    pub show_statistics: bool,
    pub editing_category: Option<Category>,
    pub editing_expense: Option<Expense>,
    pub category_form_open: bool,
    pub expense_form_open: bool,
    pub notifications: Vec<Notification>,
    next_notification_id: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            selected_category: None,
            expenses: Vec::new(),
            expenses_loading: false,
            statistics: Statistics::default(),
            // The first fetch cycle starts on mount
            loading: true,
            show_statistics: false,
            editing_category: None,
            editing_expense: None,
            category_form_open: false,
            expense_form_open: false,
            notifications: Vec::new(),
            next_notification_id: 1,
        }
    }
}

impl AppState {
    /// Statistics wins over the selection; the selection survives while
    /// statistics are shown.
    pub fn active_view(&self) -> ActiveView<'_> {
        if self.show_statistics {
            ActiveView::Statistics
        } else if let Some(category) = &self.selected_category {
            ActiveView::CategoryDetail(category)
        } else {
            ActiveView::AllCategories
        }
    }

    pub fn selected_category_id(&self) -> Option<i64> {
        self.selected_category.as_ref().map(|category| category.id)
    }

    pub fn is_selected(&self, category_id: i64) -> bool {
        self.selected_category_id() == Some(category_id)
    }

    fn push_notification(
        &mut self,
        level: NotificationLevel,
        title: &str,
        description: Option<String>,
    ) {
        let id = self.next_notification_id;
        self.next_notification_id = self.next_notification_id.wrapping_add(1);
        self.notifications.push(Notification {
            id,
            level,
            title: title.to_string(),
            description,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchFinished,
    CategoriesLoaded(Vec<Category>),
    CategoriesFailed,
    StatisticsLoaded(Statistics),
    StatisticsFailed,
    ExpensesLoaded {
        category_id: i64,
        expenses: Vec<Expense>,
    },
    ExpensesFailed {
        category_id: i64,
    },
    SelectCategory(Category),
    ShowAllCategories,
    ToggleStatistics,
    /// `Some` edits the category, `None` creates one
    OpenCategoryForm(Option<Category>),
    CloseCategoryForm,
    /// `Some` edits the expense, `None` creates one
    OpenExpenseForm(Option<Expense>),
    CloseExpenseForm,
    CategoryDeleted(i64),
    Notify {
        level: NotificationLevel,
        title: String,
        description: Option<String>,
    },
    DismissNotification(u32),
}

impl Action {
    pub fn success(title: &str) -> Self {
        Action::Notify {
            level: NotificationLevel::Success,
            title: title.to_string(),
            description: None,
        }
    }

    pub fn error(title: &str, description: Option<String>) -> Self {
        Action::Notify {
            level: NotificationLevel::Error,
            title: title.to_string(),
            description,
        }
    }
}

/// Apply one action to the state.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::FetchStarted => state.loading = true,
        Action::FetchFinished => state.loading = false,

        Action::CategoriesLoaded(categories) => {
            // Keep the selected copy in step with the fresh list
            if let Some(selected_id) = state.selected_category_id() {
                match categories.iter().find(|c| c.id == selected_id) {
                    Some(fresh) => state.selected_category = Some(fresh.clone()),
                    None => {
                        state.selected_category = None;
                        state.expenses.clear();
                        state.expenses_loading = false;
                    }
                }
            }
            state.categories = categories;
        }
        Action::CategoriesFailed => {
            state.categories.clear();
            state.push_notification(NotificationLevel::Error, messages::CATEGORIES_FAILED, None);
        }

        Action::StatisticsLoaded(statistics) => state.statistics = statistics,
        Action::StatisticsFailed => {
            state.statistics = Statistics::default();
            state.push_notification(
                NotificationLevel::Warning,
                messages::STATISTICS_FAILED,
                Some(messages::STATISTICS_FAILED_DETAIL.to_string()),
            );
        }

        Action::ExpensesLoaded {
            category_id,
            expenses,
        } => {
            // A late answer for a category that is no longer selected is dropped
            if state.is_selected(category_id) {
                state.expenses = expenses;
                state.expenses_loading = false;
            }
        }
        Action::ExpensesFailed { category_id } => {
            if state.is_selected(category_id) {
                state.expenses.clear();
                state.expenses_loading = false;
                state.push_notification(NotificationLevel::Error, messages::EXPENSES_FAILED, None);
            }
        }

        Action::SelectCategory(category) => {
            state.selected_category = Some(category);
            state.expenses.clear();
            state.expenses_loading = true;
            state.show_statistics = false;
        }
        Action::ShowAllCategories => {
            state.selected_category = None;
            state.expenses.clear();
            state.expenses_loading = false;
            state.show_statistics = false;
        }
        Action::ToggleStatistics => state.show_statistics = !state.show_statistics,

        Action::OpenCategoryForm(editing) => {
            state.editing_category = editing;
            state.category_form_open = true;
        }
        Action::CloseCategoryForm => {
            state.editing_category = None;
            state.category_form_open = false;
        }
        Action::OpenExpenseForm(editing) => {
            state.editing_expense = editing;
            state.expense_form_open = true;
        }
        Action::CloseExpenseForm => {
            state.editing_expense = None;
            state.expense_form_open = false;
        }

        Action::CategoryDeleted(category_id) => {
            if state.is_selected(category_id) {
                state.selected_category = None;
                state.expenses.clear();
                state.expenses_loading = false;
            }
        }

        Action::Notify {
            level,
            title,
            description,
        } => state.push_notification(level, &title, description),
        Action::DismissNotification(id) => state.notifications.retain(|n| n.id != id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn expense(id: i64, category_id: i64, name: &str) -> Expense {
        Expense {
            id,
            category_id,
            name: name.to_string(),
            amount: 1.0,
            date: "2024-01-10T00:00:00Z".to_string(),
            description: String::new(),
        }
    }

    fn apply(state: &mut AppState, actions: Vec<Action>) {
        for action in actions {
            reduce(state, action);
        }
    }

    #[test]
    fn test_exactly_one_view_is_active() {
        let mut state = AppState::default();
        assert_eq!(state.active_view(), ActiveView::AllCategories);

        let groceries = category(1, "Groceries");
        reduce(&mut state, Action::SelectCategory(groceries.clone()));
        assert_eq!(state.active_view(), ActiveView::CategoryDetail(&groceries));

        reduce(&mut state, Action::ToggleStatistics);
        assert_eq!(state.active_view(), ActiveView::Statistics);
        assert_eq!(state.selected_category_id(), Some(1));

        reduce(&mut state, Action::ToggleStatistics);
        assert_eq!(state.active_view(), ActiveView::CategoryDetail(&groceries));

        reduce(&mut state, Action::ShowAllCategories);
        assert_eq!(state.active_view(), ActiveView::AllCategories);
    }

    #[test]
    fn test_selecting_leaves_statistics_view() {
        let mut state = AppState::default();
        reduce(&mut state, Action::ToggleStatistics);
        reduce(&mut state, Action::SelectCategory(category(2, "Transport")));
        assert!(!state.show_statistics);
        assert_eq!(state.selected_category_id(), Some(2));
    }

    #[test]
    fn test_stale_expenses_are_dropped() {
        let mut state = AppState::default();
        apply(
            &mut state,
            vec![
                Action::SelectCategory(category(1, "A")),
                Action::SelectCategory(category(2, "B")),
                Action::ExpensesLoaded {
                    category_id: 2,
                    expenses: vec![expense(20, 2, "Bus")],
                },
                // A's request answers late
                Action::ExpensesLoaded {
                    category_id: 1,
                    expenses: vec![expense(10, 1, "Bread")],
                },
                Action::ExpensesFailed { category_id: 1 },
            ],
        );

        assert_eq!(state.expenses, vec![expense(20, 2, "Bus")]);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_select_clears_previous_expenses() {
        let mut state = AppState::default();
        apply(
            &mut state,
            vec![
                Action::SelectCategory(category(1, "A")),
                Action::ExpensesLoaded {
                    category_id: 1,
                    expenses: vec![expense(10, 1, "Bread")],
                },
                Action::SelectCategory(category(2, "B")),
            ],
        );
        assert!(state.expenses.is_empty());
    }

    #[test]
    fn test_expenses_loading_until_selected_answers() {
        let mut state = AppState::default();
        reduce(&mut state, Action::SelectCategory(category(1, "A")));
        assert!(state.expenses_loading);

        // Another category's answer does not end the wait
        reduce(
            &mut state,
            Action::ExpensesLoaded {
                category_id: 2,
                expenses: vec![expense(20, 2, "Bus")],
            },
        );
        assert!(state.expenses_loading);

        reduce(
            &mut state,
            Action::ExpensesLoaded {
                category_id: 1,
                expenses: Vec::new(),
            },
        );
        assert!(!state.expenses_loading);
        assert!(state.expenses.is_empty());

        reduce(&mut state, Action::SelectCategory(category(2, "B")));
        reduce(&mut state, Action::ShowAllCategories);
        assert!(!state.expenses_loading);
    }

    #[test]
    fn test_selected_expenses_failure_clears_list_with_error() {
        let mut state = AppState::default();
        apply(
            &mut state,
            vec![
                Action::SelectCategory(category(1, "A")),
                Action::ExpensesLoaded {
                    category_id: 1,
                    expenses: vec![expense(10, 1, "Bread")],
                },
                Action::FetchStarted,
                Action::ExpensesFailed { category_id: 1 },
                Action::FetchFinished,
            ],
        );

        assert!(state.expenses.is_empty());
        assert!(!state.expenses_loading);
        assert!(!state.loading);
        assert_eq!(state.selected_category_id(), Some(1));
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].level, NotificationLevel::Error);
        assert_eq!(state.notifications[0].title, messages::EXPENSES_FAILED);
    }

    #[test]
    fn test_statistics_failure_resets_to_default() {
        let mut state = AppState::default();
        state.statistics.total_amount = 99.0;

        apply(
            &mut state,
            vec![Action::FetchStarted, Action::StatisticsFailed, Action::FetchFinished],
        );

        assert_eq!(state.statistics, Statistics::default());
        assert!(!state.loading);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].level, NotificationLevel::Warning);
    }

    #[test]
    fn test_categories_failure_clears_list_with_error() {
        let mut state = AppState::default();
        state.categories = vec![category(1, "A")];

        reduce(&mut state, Action::CategoriesFailed);

        assert!(state.categories.is_empty());
        assert_eq!(state.notifications[0].level, NotificationLevel::Error);
        assert_eq!(state.notifications[0].title, messages::CATEGORIES_FAILED);
    }

    #[test]
    fn test_categories_loaded_refreshes_selected_copy() {
        let mut state = AppState::default();
        reduce(&mut state, Action::SelectCategory(category(1, "Food")));
        reduce(&mut state, Action::CategoriesLoaded(vec![category(1, "Groceries")]));
        assert_eq!(state.selected_category.as_ref().map(|c| c.name.as_str()), Some("Groceries"));

        reduce(&mut state, Action::CategoriesLoaded(vec![category(2, "Transport")]));
        assert_eq!(state.selected_category, None);
        assert_eq!(state.active_view(), ActiveView::AllCategories);
    }

    #[test]
    fn test_editing_target_cleared_on_close() {
        let mut state = AppState::default();
        let milk = expense(7, 1, "Milk");

        reduce(&mut state, Action::OpenExpenseForm(Some(milk.clone())));
        assert!(state.expense_form_open);
        assert_eq!(state.editing_expense, Some(milk));

        reduce(&mut state, Action::CloseExpenseForm);
        assert!(!state.expense_form_open);
        assert_eq!(state.editing_expense, None);

        reduce(&mut state, Action::OpenExpenseForm(None));
        assert_eq!(state.editing_expense, None);

        reduce(&mut state, Action::OpenCategoryForm(Some(category(1, "A"))));
        reduce(&mut state, Action::CloseCategoryForm);
        assert_eq!(state.editing_category, None);
        assert!(!state.category_form_open);
    }

    #[test]
    fn test_deleting_selected_category_clears_selection() {
        let mut state = AppState::default();
        apply(
            &mut state,
            vec![
                Action::SelectCategory(category(1, "A")),
                Action::ExpensesLoaded {
                    category_id: 1,
                    expenses: vec![expense(10, 1, "Bread")],
                },
                Action::CategoryDeleted(2),
            ],
        );
        assert_eq!(state.selected_category_id(), Some(1));

        reduce(&mut state, Action::CategoryDeleted(1));
        assert_eq!(state.selected_category, None);
        assert!(state.expenses.is_empty());
    }

    #[test]
    fn test_notifications_get_unique_ids_and_dismiss() {
        let mut state = AppState::default();
        reduce(&mut state, Action::success(messages::CATEGORY_CREATED));
        reduce(&mut state, Action::error(messages::SELECT_CATEGORY_FIRST, None));

        let ids: Vec<u32> = state.notifications.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        reduce(&mut state, Action::DismissNotification(ids[0]));
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].title, messages::SELECT_CATEGORY_FIRST);
    }
}
