//! Exact rational numbers and mixed numbers over fixed-width integers.
//!
//! ```rust
//! use mixed_fractions::{Fraction, MixedNumber};
//!
//! let sum = Fraction::new(1, 3)? + Fraction::new(1, 4)?;
//! assert_eq!(sum.to_string(), "7/12");
//!
//! let mixed: MixedNumber = "2 1/2".parse()?;
//! assert_eq!((mixed + MixedNumber::new(1, 1, 4)?).to_string(), "3 3/4");
//! # Ok::<(), mixed_fractions::FractionError>(())
//! ```

macro_rules! impl_from {
    ($type:ident: $($int:ident),*) => {
        $(impl From<$int> for $type {
            fn from(i: $int) -> Self {
                Self::from_integer_unchecked(i as i64)
            }
        })*

        impl<'a, T: Copy + Into<$type>> From<&'a T> for $type {
            fn from(other: &'a T) -> Self {
                (*other).into()
            }
        }
    }
}

macro_rules! impl_op {
    ($type:ident; $($trait:ident $fn:ident = $call:ident),* --- $($trait_assign:ident $fn_assign:ident = ($op_assign:tt)),*) => {
        $(impl<T: Into<$type>> $trait<T> for $type {
            type Output = Self;
            fn $fn(self, other: T) -> Self {
                self.$call(other.into()).unwrap_or_else(|err| panic!("{}", err))
            }
        })*
        $(impl<T: Into<$type>> $trait_assign<T> for $type {
            fn $fn_assign(&mut self, other: T) {
                *self = *self $op_assign other;
            }
        })*
    }
}

mod error;
mod fraction;
mod mixed;

pub use self::error::*;
pub use self::fraction::*;
pub use self::mixed::*;
