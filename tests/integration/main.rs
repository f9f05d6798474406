//! HTTP-level tests driving the full router in-process.

mod account_test;
mod auth_test;
mod gate_test;
mod helpers;
