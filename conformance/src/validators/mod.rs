//! Validators, grouped by the artifact they inspect.

pub mod output;
