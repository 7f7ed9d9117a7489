//! Zero values.

use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

/// Zero reports whether a value is its type's zero/default value.
///
/// A field annotated with
/// `#[serde(skip_serializing_if = "object_equality::encode::is_zero")]`
/// is left out of the encoded document whenever it holds its zero value.
pub trait Zero {
    fn is_zero(&self) -> bool;
}

/// Returns true if `value` is a zero value. Meant for `skip_serializing_if`.
pub fn is_zero<T: Zero + ?Sized>(value: &T) -> bool {
    value.is_zero()
}

macro_rules! impl_zero_for_ints {
    ($($t:ty),*) => {
        $(
            impl Zero for $t {
                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_zero_for_ints!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Zero for f32 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Zero for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Zero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Zero for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Zero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<K, V> Zero for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Zero for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Zero + ?Sized> Zero for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl Zero for Value {
    /// `null`, `false`, `0`, `0.0`, `""`, `[]` and `{}` are zero.
    fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
        }
    }
}
