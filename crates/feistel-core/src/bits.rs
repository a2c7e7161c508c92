//! Width-parametric bit slicing and rotation helpers.
//!
//! Values are carried in `u128` next to an explicit width in bits. Inputs are
//! masked to that width, and shifts of 128 or more produce zero rather than
//! overflowing, so every helper is total for `width > 0`.

/// Widest value the helpers operate on.
pub const MAX_WIDTH: u32 = 128;

#[inline]
fn shl(x: u128, n: u32) -> u128 {
    x.checked_shl(n).unwrap_or(0)
}

#[inline]
fn shr(x: u128, n: u32) -> u128 {
    x.checked_shr(n).unwrap_or(0)
}

/// Returns a value with the low `n` bits set.
#[inline]
pub const fn mask(n: u32) -> u128 {
    if n >= MAX_WIDTH {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

/// Returns the top `n` bits of the `width`-bit value `x`.
#[inline]
pub fn head(x: u128, n: u32, width: u32) -> u128 {
    shr(tail(x, width), width.saturating_sub(n))
}

/// Returns the bottom `n` bits of `x`.
#[inline]
pub fn tail(x: u128, n: u32) -> u128 {
    x & mask(n)
}

/// Circular right rotation of `x` by `n` bits within `width` bits.
pub fn rotate_right(x: u128, n: u32, width: u32) -> u128 {
    if width == 0 {
        return 0;
    }
    let x = tail(x, width);
    let shift = n % width;
    shl(tail(x, shift), width - shift) | shr(x, shift)
}

/// Circular left rotation of `x` by `n` bits within `width` bits.
///
/// Inverse of [`rotate_right`] for the same `(n, width)`.
pub fn rotate_left(x: u128, n: u32, width: u32) -> u128 {
    if width == 0 {
        return 0;
    }
    let x = tail(x, width);
    let shift = n % width;
    shl(tail(x, width - shift), shift) | head(x, shift, width)
}

/// Smallest multiple of `div` that is at least `n`.
#[inline]
pub const fn ceil_to_multiple(n: u32, div: u32) -> u32 {
    if div == 0 || n % div == 0 {
        n
    } else {
        n + div - n % div
    }
}

/// Number of significant bits in `x` (zero for `x == 0`).
#[inline]
pub const fn bit_length(x: u128) -> u32 {
    MAX_WIDTH - x.leading_zeros()
}
