// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The service boundary around the lifecycle engine.
//!
//! [`OkrService`] reads objectives from an [`ObjectiveStore`], runs the
//! pure engine operations, commits the results with a conditional write
//! and tells a [`Notifier`] what happened.

mod error;
mod events;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use error::{ApiError, StoreError, translate_core_error, translate_domain_error};
pub use events::{Notifier, ObjectiveEvent, TracingNotifier};
pub use service::OkrService;
pub use store::{InMemoryStore, ObjectiveStore};
