//! Type predicates for loosely typed arguments.
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    rc::Rc,
    sync::Arc,
};

/// A value which can describe what kind of value it is.
///
/// Strings report [`Kind::is_string`] and callables report [`Kind::is_function`];
/// everything else reports neither.
pub trait Kind {
    /// Whether the value is a string
    fn is_string(&self) -> bool {
        false
    }

    /// Whether the value can be called
    fn is_function(&self) -> bool {
        false
    }
}

/// Returns whether the value is a string
pub fn is_string<T: Kind + ?Sized>(value: &T) -> bool {
    value.is_string()
}

/// Returns whether the value can be called
pub fn is_function<T: Kind + ?Sized>(value: &T) -> bool {
    value.is_function()
}

impl Kind for str {
    fn is_string(&self) -> bool {
        true
    }
}

impl Kind for String {
    fn is_string(&self) -> bool {
        true
    }
}

impl Kind for Cow<'_, str> {
    fn is_string(&self) -> bool {
        true
    }
}

macro_rules! delegate {
    ($($pointer:ident),*) => {
        $(impl<T: Kind + ?Sized> Kind for $pointer<T> {
            fn is_string(&self) -> bool {
                (**self).is_string()
            }

            fn is_function(&self) -> bool {
                (**self).is_function()
            }
        })*
    };
}
delegate!(Box, Rc, Arc);

impl<T: Kind + ?Sized> Kind for &T {
    fn is_string(&self) -> bool {
        (**self).is_string()
    }

    fn is_function(&self) -> bool {
        (**self).is_function()
    }
}

impl<T: Kind> Kind for Option<T> {
    fn is_string(&self) -> bool {
        self.as_ref().is_some_and(Kind::is_string)
    }

    fn is_function(&self) -> bool {
        self.as_ref().is_some_and(Kind::is_function)
    }
}

macro_rules! plain {
    ($($ty:ty),*) => {
        $(impl Kind for $ty {})*
    };
}
plain!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ());

impl<T> Kind for [T] {}
impl<T, const N: usize> Kind for [T; N] {}
impl<T> Kind for Vec<T> {}
impl<K, V> Kind for BTreeMap<K, V> {}
impl<K, V, S> Kind for HashMap<K, V, S> {}

macro_rules! callable {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Kind for fn($($arg),*) -> R {
            fn is_function(&self) -> bool {
                true
            }
        }

        impl<R, $($arg),*> Kind for dyn Fn($($arg),*) -> R {
            fn is_function(&self) -> bool {
                true
            }
        }

        impl<R, $($arg),*> Kind for dyn FnMut($($arg),*) -> R {
            fn is_function(&self) -> bool {
                true
            }
        }
    };
}
callable!();
callable!(A);
callable!(A, B);
callable!(A, B, C);
