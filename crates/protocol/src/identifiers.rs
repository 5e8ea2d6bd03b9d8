//! Newtype identifiers.
//!
//! Every caller-supplied value that ends up in a request path or an
//! authentication body is represented as a distinct newtype wrapping a
//! `String`. This prevents accidentally passing, for example, an
//! [`EndpointName`] where a [`ServiceId`] is expected, even though both are
//! strings on the wire.
//!
//! Constructors reject the empty string so a path template is never rendered
//! with an empty segment. Deserialisation is transparent and does not re-check;
//! values coming back from the server are trusted structurally.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for credential newtypes.
// Same surface as `string_id!` minus Display; Debug never prints the value.
// ---------------------------------------------------------------------------
macro_rules! credential {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new credential, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the raw credential. Avoid passing the result to loggers.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "(***)"))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: path segments
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a service published on the marketplace.
    ///
    /// Rendered into `/api/v1/open/services/{service_id}/...` paths verbatim.
    ServiceId
}

string_id! {
    /// Names one endpoint of a service, as listed in its protocol document
    /// (e.g. `"get_menu"`, `"create_order"`).
    EndpointName
}

// ---------------------------------------------------------------------------
// Identifiers: authentication
// ---------------------------------------------------------------------------

string_id! {
    /// The authorization scheme an auth code was issued under (e.g. `"wechat"`,
    /// `"oauth"`).
    AuthType
}

credential! {
    /// A one-time authorization code exchanged for a [`ConsumerToken`].
    AuthCode
}

credential! {
    /// Bearer-style session token that authorises endpoint execution on behalf
    /// of an end user.
    ///
    /// Issued by the token exchange; the library never stores or refreshes it.
    ConsumerToken
}
