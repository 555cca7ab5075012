//! # Commands
//!
//! One async function per form of the front desk. Each takes the ledger
//! state plus the raw field text, and returns a serializable response or
//! an [`ApiError`](crate::error::ApiError). The shell decides how to show it.
//!
//! - [`product`] - Catalog maintenance and inventory
//! - [`customer`] - Customer registration and listing
//! - [`sale`] - Recording sales, the day book and the end-of-day purge

pub mod customer;
pub mod product;
pub mod sale;
