// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Deterministic bearing for a device identity, in radians within `[0, 2π)`.
///
/// Sums the identity's UTF-16 code units, reduces modulo 360, and converts the
/// resulting whole degree to radians. Distinct identities may share a bearing.
/// The empty string maps to `0`.
#[must_use]
pub fn angle_for(identity: &str) -> f64 {
    let degrees = identity
        .encode_utf16()
        .fold(0_u32, |acc, unit| (acc + u32::from(unit)) % 360);
    f64::from(degrees).to_radians()
}
