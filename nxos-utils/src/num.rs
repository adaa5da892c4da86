//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

/// Defines a conversion from one type to another, where the result is capped
/// at the maximum bound of the target type if the input value exceeds this
/// bound.
pub trait SaturatingFrom<T>: Sized {
    /// Converts a value of type `T` to the implementing type with saturation.
    fn saturating_from(value: T) -> Self;
}

/// Defines a conversion into another type using the `SaturatingFrom` trait.
pub trait SaturatingInto<T>: Sized {
    /// Converts the implementing type into a value of type `T` with saturation.
    fn saturating_into(self) -> T;
}

// ===== impl SaturatingFrom =====

impl SaturatingFrom<u64> for u32 {
    fn saturating_from(value: u64) -> Self {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

// ===== impl SaturatingInto =====

impl<T, U> SaturatingInto<U> for T
where
    U: SaturatingFrom<T>,
{
    fn saturating_into(self) -> U {
        U::saturating_from(self)
    }
}

// ===== global functions =====

/// Computes the sequence number assigned to a list entry configured without
/// an explicit one: `first` for an empty list, otherwise the highest existing
/// sequence number plus `step`, saturating at `u32::MAX`.
pub fn next_sequence(last: Option<u32>, first: u32, step: u32) -> u32 {
    match last {
        None => first,
        Some(last) => (u64::from(last) + u64::from(step)).saturating_into(),
    }
}
