// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers that need either `std` or `libm`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("hyades_cluster requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn round(v: f64) -> f64 {
    v.round()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn round(v: f64) -> f64 {
    libm::round(v)
}
