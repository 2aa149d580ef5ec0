pub mod category_form;
pub mod expense_form;

pub use category_form::CategoryFormModal;
pub use expense_form::ExpenseFormModal;
