pub mod category_detail;
pub mod category_list;
pub mod category_pills;
pub mod expense_list;
pub mod forms;
pub mod header;
pub mod notifications;
pub mod overview;
pub mod statistics;

pub use category_detail::CategoryDetail;
pub use category_list::CategoryList;
pub use category_pills::CategoryPills;
pub use forms::{CategoryFormModal, ExpenseFormModal};
pub use header::Header;
pub use notifications::NotificationStack;
pub use overview::OverviewPanel;
pub use statistics::StatisticsPanel;
