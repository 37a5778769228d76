//! Customer Handlers

pub(crate) mod cart;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod orders;
