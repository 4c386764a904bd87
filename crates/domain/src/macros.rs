//! Macro for implementing Display and FromStr for closed string enums
//!
//! Facades and environments travel over the wire and through configuration
//! files as lowercase strings. This macro provides both directions of that
//! mapping from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use payouts_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Sms,
//! }
//!
//! impl_wire_name_conversions!(Channel {
//!     Email => "email",
//!     Sms => "sms",
//! });
//!
//! assert_eq!(Channel::Sms.to_string(), "sms");
//! assert_eq!("EMAIL".parse::<Channel>(), Ok(Channel::Email));
//! ```

/// Implements Display and FromStr traits for wire-named enums
///
/// This macro generates:
/// - Display trait: writes the variant's wire name
/// - FromStr trait: parses case-insensitive, whitespace-trimmed wire names
///
/// Parsing failures return a `String` naming the enum and the rejected input.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::core::result::Result::Ok(Self::$variant),)+
                    _ => ::core::result::Result::Err(::std::format!(
                        "Invalid {}: {}",
                        ::core::stringify!($enum_name),
                        s
                    )),
                }
            }
        }
    };
}
