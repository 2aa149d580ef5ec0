pub mod use_expense_tracker;

pub use use_expense_tracker::use_expense_tracker;
