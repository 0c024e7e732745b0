//! Type-erased call-site arguments
//!
//! Every value handed to a log call is viewed through [`Loggable`], which
//! produces a borrowed [`Argument`]. The renderer only ever sees these
//! variants, so formatting is decided per variant rather than per type.
//!
//! Fieldless enums opt in with [`loggable_enum!`](crate::loggable_enum) and
//! render as their underlying integer. Types with their own rendering opt
//! in with [`loggable_display!`](crate::loggable_display) or
//! [`loggable_debug!`](crate::loggable_debug) instead.

use std::borrow::Cow;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// A borrowed view of one call-site argument.
#[derive(Clone, Copy)]
pub enum Argument<'a> {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(&'a str),
    Display(&'a dyn fmt::Display),
    Debug(&'a dyn fmt::Debug),
}

impl<'a> Argument<'a> {
    /// Render `value` through its `Display` impl, whatever its `Loggable` impl says
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        Argument::Display(value)
    }

    /// Render `value` through its `Debug` impl
    pub fn debug<T: fmt::Debug>(value: &'a T) -> Self {
        Argument::Debug(value)
    }

    /// Render an enumeration by its underlying integer
    pub fn enumeration<R: EnumRepr>(repr: R) -> Self {
        repr.into_argument()
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Signed(_) => "signed integer",
            Argument::Unsigned(_) => "unsigned integer",
            Argument::Float(_) => "float",
            Argument::Bool(_) => "bool",
            Argument::Char(_) => "char",
            Argument::Str(_) => "string",
            Argument::Display(_) => "display",
            Argument::Debug(_) => "debug",
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Signed(v) => f.debug_tuple("Signed").field(v).finish(),
            Argument::Unsigned(v) => f.debug_tuple("Unsigned").field(v).finish(),
            Argument::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Argument::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Argument::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Argument::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Argument::Display(v) => f
                .debug_tuple("Display")
                .field(&format_args!("{}", v))
                .finish(),
            Argument::Debug(v) => f.debug_tuple("Debug").field(v).finish(),
        }
    }
}

/// A value that can be passed to a log call.
pub trait Loggable {
    fn to_argument(&self) -> Argument<'_>;
}

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        (**self).to_argument()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        (**self).to_argument()
    }
}

impl Loggable for Argument<'_> {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        *self
    }
}

macro_rules! loggable_int {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Loggable for $ty {
                #[inline]
                fn to_argument(&self) -> Argument<'_> {
                    Argument::$variant(*self as $wide)
                }
            }
        )*
    };
}

loggable_int!(Signed as i64: i8, i16, i32, i64, isize);
loggable_int!(Unsigned as u64: u8, u16, u32, u64, usize);

impl Loggable for f32 {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Float(f64::from(*self))
    }
}

impl Loggable for f64 {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Float(*self)
    }
}

impl Loggable for bool {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Bool(*self)
    }
}

impl Loggable for char {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Char(*self)
    }
}

impl Loggable for str {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Str(self)
    }
}

impl Loggable for String {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Str(self.as_str())
    }
}

impl Loggable for Cow<'_, str> {
    #[inline]
    fn to_argument(&self) -> Argument<'_> {
        Argument::Str(self.as_ref())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Underlying integer of an enumeration: at most 32 bits wide.
pub trait EnumRepr: sealed::Sealed + Copy {
    fn into_argument(self) -> Argument<'static>;
}

macro_rules! enum_repr {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl EnumRepr for $ty {
                #[inline]
                fn into_argument(self) -> Argument<'static> {
                    Argument::$variant(<$wide>::from(self))
                }
            }
        )*
    };
}

enum_repr!(Signed as i64: i8, i16, i32);
enum_repr!(Unsigned as u64: u8, u16, u32);

/// Tags fieldless `Copy` enums as enumeration-like: they render as their
/// underlying integer, which must be 32 bits or narrower.
///
/// The declared representation must be the enum's own `#[repr]` (or, for
/// an enum without one, an integer wide enough for every discriminant).
/// An enum wider than its declared representation is rejected at compile
/// time.
///
/// ```
/// use rust_log_facade::{format_message, loggable_enum};
///
/// #[derive(Clone, Copy)]
/// #[repr(u8)]
/// enum PowerState {
///     Off = 0,
///     Sleep = 3,
/// }
///
/// loggable_enum!(PowerState as u8);
///
/// assert_eq!(format_message!("state={}", PowerState::Sleep).unwrap(), "state=3");
/// # let _ = PowerState::Off;
/// ```
///
/// Enums wider than 32 bits cannot be registered, whatever they claim:
///
/// ```compile_fail
/// use rust_log_facade::loggable_enum;
///
/// #[derive(Clone, Copy)]
/// #[repr(u64)]
/// enum Wide {
///     Big = 0x1_0000_0001,
/// }
///
/// loggable_enum!(Wide as u32);
/// ```
///
/// Nor can an enum be narrowed to a smaller representation:
///
/// ```compile_fail
/// use rust_log_facade::loggable_enum;
///
/// #[derive(Clone, Copy)]
/// #[repr(u32)]
/// enum Mid {
///     High = 0x1_0000,
/// }
///
/// loggable_enum!(Mid as u8);
/// ```
#[macro_export]
macro_rules! loggable_enum {
    ($($ty:ty as $repr:ty),+ $(,)?) => {
        $(
            const _: () = ::std::assert!(
                ::std::mem::size_of::<$ty>() <= ::std::mem::size_of::<$repr>(),
                "enum is wider than its declared representation"
            );

            impl $crate::Loggable for $ty {
                #[inline]
                fn to_argument(&self) -> $crate::Argument<'_> {
                    $crate::Argument::enumeration::<$repr>(*self as $repr)
                }
            }
        )+
    };
}

/// Registers `Display` as the renderer for a type.
#[macro_export]
macro_rules! loggable_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Loggable for $ty {
                #[inline]
                fn to_argument(&self) -> $crate::Argument<'_> {
                    $crate::Argument::Display(self)
                }
            }
        )+
    };
}

/// Registers `Debug` as the renderer for a type.
#[macro_export]
macro_rules! loggable_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Loggable for $ty {
                #[inline]
                fn to_argument(&self) -> $crate::Argument<'_> {
                    $crate::Argument::Debug(self)
                }
            }
        )+
    };
}

loggable_display!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);
loggable_debug!(std::time::Duration);

/// One entry of an [`ArgumentList`]: a value and its optional name.
#[derive(Debug, Clone, Copy)]
pub struct NamedArgument<'a> {
    pub name: Option<&'a str>,
    pub value: Argument<'a>,
}

impl<'a> NamedArgument<'a> {
    #[inline]
    pub fn positional<T: Loggable + ?Sized>(value: &'a T) -> Self {
        Self {
            name: None,
            value: value.to_argument(),
        }
    }

    #[inline]
    pub fn named<T: Loggable + ?Sized>(name: &'a str, value: &'a T) -> Self {
        Self {
            name: Some(name),
            value: value.to_argument(),
        }
    }
}

/// The ordered arguments of one log call, borrowed for that call only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentList<'a> {
    entries: &'a [NamedArgument<'a>],
}

impl<'a> ArgumentList<'a> {
    #[inline]
    pub const fn new(entries: &'a [NamedArgument<'a>]) -> Self {
        Self { entries }
    }

    #[inline]
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument<'a>> {
        self.entries.get(index).map(|entry| &entry.value)
    }

    /// Index of the first argument called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name == Some(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedArgument<'a>> {
        self.entries.iter()
    }
}
