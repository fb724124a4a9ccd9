/// Session cart context object and aggregation into line items and totals
pub mod cart;

/// Order materialization, reference generation, and recomputed totals
pub mod order;

/// Catalog lookups, product creation, and atomic stock decrements
pub mod product;
