use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

///
/// Float32 / Float64
///
/// Total-order float wrappers.
///
/// - every NaN is canonicalized to one quiet NaN that equals only itself
/// - NaN sorts above `+∞`
/// - `-0.0` sorts below `0.0` and is strictly unequal to it
///
/// Eq/Hash/Ord all operate on the canonical bit pattern.
///

macro_rules! total_order_float {
    ($name:ident, $prim:ty, $bits:ty) => {
        #[derive(Clone, Copy, Debug)]
        #[repr(transparent)]
        pub struct $name($prim);

        impl $name {
            #[must_use]
            pub const fn new(value: $prim) -> Self {
                if value.is_nan() {
                    Self(<$prim>::NAN)
                } else {
                    Self(value)
                }
            }

            #[must_use]
            pub const fn get(self) -> $prim {
                self.0
            }

            #[must_use]
            pub const fn to_bits(self) -> $bits {
                self.0.to_bits()
            }

            #[must_use]
            pub const fn is_nan(self) -> bool {
                self.0.is_nan()
            }

            /// Next representable value upward; `None` past NaN.
            #[must_use]
            pub fn next_up(self) -> Option<Self> {
                let v = self.0;
                if v.is_nan() {
                    return None;
                }
                if v == <$prim>::INFINITY {
                    return Some(Self(<$prim>::NAN));
                }
                if v.to_bits() == (-0.0 as $prim).to_bits() {
                    return Some(Self(0.0));
                }
                if v == 0.0 {
                    return Some(Self(<$prim>::from_bits(1)));
                }
                let bits = v.to_bits();
                let next = if v > 0.0 { bits + 1 } else { bits - 1 };

                Some(Self(<$prim>::from_bits(next)))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state);
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for $prim {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

total_order_float!(Float32, f32, u32);
total_order_float!(Float64, f64, u64);
