/// Admin routes: dashboard, product creation, uploads, order inspection
pub mod admin;

/// Cart routes: add, quick-add, view, remove-by-index
pub mod cart;

/// Catalog routes: product listing and detail
pub mod catalog;

/// Checkout routes: review and submission
pub mod checkout;
