use std::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{Add, AddAssign},
    str::FromStr,
};

use num_traits::{Bounded, CheckedAdd, Zero};

/// The cost of an A* node.
///
/// Costs are non-negative, hence accumulated costs never decrease along a path.
pub trait AStarCost:
    From<u8>
    + Add<Output = Self>
    + AddAssign
    + CheckedAdd
    + FromStr
    + Zero
    + Bounded
    + Display
    + Debug
    + Ord
    + Eq
    + Hash
    + Copy
{
    type CostType;

    fn as_u64(&self) -> u64;

    fn as_primitive(&self) -> Self::CostType;
}

macro_rules! unsigned_cost {
    ($name:ident, $primitive:ident) => {
        #[doc = concat!("The cost of an A* node.\n\nThis cost type uses [`", stringify!($primitive), "`] as the internal representation of cost.")]
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name($primitive);

        impl $crate::cost::AStarCost for $name {
            type CostType = $primitive;

            fn as_u64(&self) -> u64 {
                self.0 as u64
            }

            fn as_primitive(&self) -> Self::CostType {
                self.0
            }
        }

        impl From<$primitive> for $name {
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self(value.into())
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            /// **Panics** on overflow.
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0.checked_add(rhs.0).unwrap())
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl num_traits::CheckedAdd for $name {
            fn checked_add(&self, rhs: &Self) -> Option<Self> {
                self.0.checked_add(rhs.0).map($name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$primitive as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $primitive::from_str(s).map(Self)
            }
        }

        impl num_traits::Zero for $name {
            fn zero() -> Self {
                Self(0)
            }

            fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }

        impl num_traits::Bounded for $name {
            fn min_value() -> Self {
                Self($primitive::MIN)
            }

            fn max_value() -> Self {
                Self($primitive::MAX)
            }
        }
    };
}

unsigned_cost!(U32Cost, u32);
unsigned_cost!(U64Cost, u64);
