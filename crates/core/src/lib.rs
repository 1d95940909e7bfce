// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The objective lifecycle engine.
//!
//! Everything here is synchronous and side-effect free. Operations take
//! the current objective, the acting user and a caller-supplied `now`,
//! and return the new objective together with whatever the caller must
//! persist alongside it. Conditional writes are the caller's job; see
//! [`WritePrecondition`].

mod apply;
mod command;
mod error;
mod lifecycle;
mod permissions;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, authorize_delete, create_objective};
pub use command::{Command, NewObjective, ObjectiveChanges};
pub use error::{CoreError, ErrorKind};
pub use lifecycle::{
    ApprovalTransition, TRANSITIONS, TransitionRule, available_transitions, lookup_transition,
    request_transition,
};
pub use permissions::{PermissionSet, RequiredCapability, resolve_permissions};
pub use state::{CommandResult, TransitionResult, WritePrecondition};
