use std::collections::HashSet;
use std::ops::Deref;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::commands;
use shared::{Action, AppState, Category, CategoryRequest, Expense, ExpenseDraft};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::HttpApiClient;

/// How long a notification stays on screen
const NOTIFICATION_TIMEOUT_MS: u32 = 3_000;

/// `AppState` behind Yew's reducer hook
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppStore(AppState);

impl Deref for AppStore {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.0
    }
}

impl Reducible for AppStore {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut state = self.0.clone();
        shared::reduce(&mut state, action);
        Rc::new(AppStore(state))
    }
}

pub struct UseExpenseTrackerResult {
    pub state: UseReducerHandle<AppStore>,
    pub actions: ExpenseTrackerActions,
}

#[derive(Clone)]
pub struct ExpenseTrackerActions {
    pub select_category: Callback<Category>,
    pub show_all_categories: Callback<()>,
    pub toggle_statistics: Callback<()>,
    pub open_category_form: Callback<Option<Category>>,
    pub close_category_form: Callback<()>,
    pub open_expense_form: Callback<Option<Expense>>,
    pub close_expense_form: Callback<()>,
    pub submit_category: Callback<CategoryRequest>,
    pub delete_category: Callback<i64>,
    pub submit_expense: Callback<ExpenseDraft>,
    pub delete_expense: Callback<i64>,
    pub dismiss_notification: Callback<u32>,
}

fn dispatch_fn(dispatcher: UseReducerDispatcher<AppStore>) -> impl Fn(Action) {
    move |action| dispatcher.dispatch(action)
}

fn dispatch_callback<T, F>(store: &UseReducerHandle<AppStore>, to_action: F) -> Callback<T>
where
    T: 'static,
    F: Fn(T) -> Action + 'static,
{
    let dispatcher = store.dispatcher();
    Callback::from(move |value: T| dispatcher.dispatch(to_action(value)))
}

/// Owns the application state and every side-effecting operation.
///
/// Runs the initial fetch cycle on mount and dismisses each notification
/// after a few seconds.
#[hook]
pub fn use_expense_tracker(api_client: &HttpApiClient) -> UseExpenseTrackerResult {
    let store = use_reducer(AppStore::default);
    let scheduled_dismissals = use_mut_ref(HashSet::<u32>::new);
    let selected = store.selected_category_id();

    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            log::debug!("Initial fetch from {}", api_client.base_url());
            spawn_local(async move {
                let dispatch = dispatch_fn(dispatcher);
                commands::refresh(&api_client, None, &dispatch).await;
            });
            || ()
        });
    }

    {
        let ids: Vec<u32> = store.notifications.iter().map(|n| n.id).collect();
        let dispatcher = store.dispatcher();
        let scheduled_dismissals = scheduled_dismissals.clone();
        use_effect_with(ids, move |ids| {
            let mut scheduled = scheduled_dismissals.borrow_mut();
            scheduled.retain(|id| ids.contains(id));
            for id in ids.iter().copied() {
                if scheduled.insert(id) {
                    let dispatcher = dispatcher.clone();
                    spawn_local(async move {
                        TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
                        dispatcher.dispatch(Action::DismissNotification(id));
                    });
                }
            }
            || ()
        });
    }

    let select_category = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |category: Category| {
            let api_client = api_client.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            spawn_local(async move {
                commands::select_category(&api_client, category, &dispatch).await;
            });
        })
    };

    let submit_category = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |request: CategoryRequest| {
            let api_client = api_client.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            spawn_local(async move {
                commands::submit_category(&api_client, request, selected, &dispatch).await;
            });
        })
    };

    let delete_category = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |category_id: i64| {
            let api_client = api_client.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            spawn_local(async move {
                commands::delete_category(&api_client, category_id, selected, &dispatch).await;
            });
        })
    };

    let submit_expense = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |draft: ExpenseDraft| {
            let api_client = api_client.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            spawn_local(async move {
                commands::submit_expense(&api_client, draft, selected, &dispatch).await;
            });
        })
    };

    let delete_expense = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |expense_id: i64| {
            let api_client = api_client.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            spawn_local(async move {
                commands::delete_expense(&api_client, expense_id, selected, &dispatch).await;
            });
        })
    };

    let actions = ExpenseTrackerActions {
        select_category,
        show_all_categories: dispatch_callback(&store, |_: ()| Action::ShowAllCategories),
        toggle_statistics: dispatch_callback(&store, |_: ()| Action::ToggleStatistics),
        open_category_form: dispatch_callback(&store, Action::OpenCategoryForm),
        close_category_form: dispatch_callback(&store, |_: ()| Action::CloseCategoryForm),
        open_expense_form: dispatch_callback(&store, Action::OpenExpenseForm),
        close_expense_form: dispatch_callback(&store, |_: ()| Action::CloseExpenseForm),
        submit_category,
        delete_category,
        submit_expense,
        delete_expense,
        dismiss_notification: dispatch_callback(&store, Action::DismissNotification),
    };

    UseExpenseTrackerResult {
        state: store,
        actions,
    }
}
