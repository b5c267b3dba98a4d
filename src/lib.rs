//! SplitParty client: domain model, local persistence and the auth API
//! client behind the group-expense-splitting app.

pub mod client;
pub mod common;
