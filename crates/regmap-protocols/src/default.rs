//! Default-resolution capabilities for registry value types.
//!
//! When a registry lookup misses, the value type itself decides what comes
//! back: an on-demand loaded value, a static default, or its deep zero.
//! [`Zero`] builds the deep zero; [`DefaultPolicy`] is the ordered chain a
//! type implements to take part in resolution.

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Total, infallible construction of a type's safe zero value.
///
/// For plain data this is the ordinary zero (`0`, `false`, empty string,
/// empty collection). For the indirection kinds (`Box`, `Arc`, `Rc`,
/// `Option`) the impls recurse: every layer allocates a fresh cell around
/// the inner zero, so a chained indirection is populated all the way down
/// to the base value. In particular an `Option` chain is `Some` at every
/// level - `zero()` never hands back an empty reference.
pub trait Zero: Sized {
    /// Build the zero value.
    fn zero() -> Self;
}

/// Implements [`Zero`] for types whose `Default` value already is the safe
/// zero. This is how base value types enter default resolution:
///
/// ```
/// #[derive(Debug, Default, PartialEq)]
/// struct Sensor {
///     reading: i64,
///     label: String,
/// }
///
/// regmap_protocols::zero_from_default!(Sensor);
///
/// use regmap_protocols::Zero;
/// let chained: Box<Box<Sensor>> = Zero::zero();
/// assert_eq!(**chained, Sensor::default());
/// ```
#[macro_export]
macro_rules! zero_from_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Zero for $ty {
                fn zero() -> Self {
                    <$ty as ::core::default::Default>::default()
                }
            }
        )+
    };
}

zero_from_default!(
    bool, char, (), String,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: Zero> Zero for Box<T> {
    fn zero() -> Self {
        Box::new(T::zero())
    }
}

impl<T: Zero> Zero for std::sync::Arc<T> {
    fn zero() -> Self {
        std::sync::Arc::new(T::zero())
    }
}

impl<T: Zero> Zero for std::rc::Rc<T> {
    fn zero() -> Self {
        std::rc::Rc::new(T::zero())
    }
}

// Deliberately Some, not None: a zeroed optional chain is non-empty at
// every level.
impl<T: Zero> Zero for Option<T> {
    fn zero() -> Self {
        Some(T::zero())
    }
}

impl<T> Zero for Vec<T> {
    fn zero() -> Self {
        Vec::new()
    }
}

impl<K, V> Zero for std::collections::HashMap<K, V> {
    fn zero() -> Self {
        std::collections::HashMap::new()
    }
}

/// How a value type takes part in default resolution for absent keys.
///
/// The rungs form an ordered chain, each overridable:
///
/// 1. [`load_default`](DefaultPolicy::load_default) - on-demand, fallible,
///    key- and cancellation-aware. The provided implementation falls
///    through to rung 2.
/// 2. [`static_default`](DefaultPolicy::static_default) - static and
///    infallible. The provided implementation falls through to rung 3.
/// 3. [`Zero::zero`] - the deep-zero fallback.
///
/// Resolution always enters at rung 1, so a type that overrides
/// `load_default` shadows its static default, and one that overrides
/// `static_default` shadows the zero. A type with no interesting default
/// opts in with an empty impl:
///
/// ```
/// use regmap_protocols::DefaultPolicy;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Limits {
///     rps: u32,
/// }
///
/// regmap_protocols::zero_from_default!(Limits);
/// impl DefaultPolicy<String> for Limits {}
///
/// assert_eq!(
///     <Limits as DefaultPolicy<String>>::static_default(),
///     Limits { rps: 0 },
/// );
/// ```
#[async_trait]
pub trait DefaultPolicy<K: Sync>: Zero + Send {
    /// Load the stand-in value for an absent `key`.
    ///
    /// Errors are surfaced to the caller verbatim. The token carries the
    /// caller's cancellation request; loaders are free to observe or
    /// ignore it.
    async fn load_default(token: &CancellationToken, key: &K) -> Result<Self> {
        let _ = (token, key);
        Ok(Self::static_default())
    }

    /// Static, infallible default.
    fn static_default() -> Self {
        Self::zero()
    }
}
