#![allow(clippy::bool_assert_comparison, reason = "less legible")]

mod map;
mod queue;
mod tools;
