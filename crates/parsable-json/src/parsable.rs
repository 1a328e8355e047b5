//! The parse/format capability the adapter delegates to.

use std::fmt::Display;
use std::str::FromStr;

/// Locale or format context a parse operation may consult.
///
/// The adapter never supplies one: it always passes `None`, so a value that
/// formats differently under different contexts is not guaranteed to
/// round-trip across them.
pub trait FormatProvider: Send + Sync {
    fn name(&self) -> &str;
}

/// A type that can construct itself from text and render itself back.
///
/// Every `FromStr + Display` type whose parse error is a proper
/// `std::error::Error` gets this for free, which covers the integer, float,
/// `bool`, `char` and `std::net` address types. Custom types opt in by
/// implementing those two std traits.
pub trait Parsable: Sized {
    type Err: std::error::Error + Send + Sync + 'static;

    fn parse(text: &str, provider: Option<&dyn FormatProvider>) -> Result<Self, Self::Err>;

    fn format(&self) -> String;
}

impl<T> Parsable for T
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    type Err = T::Err;

    fn parse(text: &str, _provider: Option<&dyn FormatProvider>) -> Result<Self, Self::Err> {
        text.parse()
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

/// Short display name of `T`, with module paths stripped from every segment.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub fn type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            flush(&mut out, &mut path);
            out.push(c);
        }
    }
    flush(&mut out, &mut path);
    out
}

fn flush(out: &mut String, path: &mut String) {
    out.push_str(path.rsplit("::").next().unwrap_or_default());
    path.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    struct Invariant;

    impl FormatProvider for Invariant {
        fn name(&self) -> &str {
            "invariant"
        }
    }

    #[test]
    fn blanket_impl_parses_std_types() {
        assert_eq!(<i32 as Parsable>::parse("42", None).unwrap(), 42);
        assert_eq!(
            <Ipv4Addr as Parsable>::parse("10.0.0.1", None).unwrap(),
            Ipv4Addr::new(10, 0, 0, 1)
        );
    }

    #[test]
    fn blanket_impl_ignores_provider() {
        let provider = Invariant;
        assert_eq!(provider.name(), "invariant");
        assert_eq!(<u8 as Parsable>::parse("7", Some(&provider)).unwrap(), 7);
    }

    #[test]
    fn blanket_impl_formats_with_display() {
        assert_eq!(Parsable::format(&-17i64), "-17");
        assert_eq!(Parsable::format(&true), "true");
    }

    #[test]
    fn blanket_impl_surfaces_parse_error() {
        assert!(<i32 as Parsable>::parse("4x2", None).is_err());
    }

    #[test]
    fn shorten_strips_module_paths() {
        assert_eq!(shorten("my_crate::ids::Guid"), "Guid");
        assert_eq!(
            shorten("core::option::Option<alloc::string::String>"),
            "Option<String>"
        );
        assert_eq!(
            shorten("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
    }

    #[test]
    fn shorten_keeps_primitives_and_arrays() {
        assert_eq!(shorten("i32"), "i32");
        assert_eq!(shorten("[u8; 4]"), "[u8; 4]");
        assert_eq!(shorten("&str"), "&str");
    }

    #[test]
    fn type_name_of_primitive() {
        assert_eq!(type_name::<i32>(), "i32");
    }
}
