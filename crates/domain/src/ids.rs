// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Generates a fresh record identifier.
///
/// Identifiers are `{prefix}_{unix_nanos}_{random}`, which sorts by
/// creation time for records made at different instants.
#[must_use]
pub fn generate_id(prefix: &str, at: OffsetDateTime) -> String {
    format!(
        "{prefix}_{}_{:016x}",
        at.unix_timestamp_nanos(),
        rand::random::<u64>()
    )
}
