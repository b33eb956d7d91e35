/// Declares a newtype identifier backed by an owned D-Bus object path.
///
/// The generated type validates its input against the object path grammar on
/// construction, so holders never see a malformed identifier.
///
/// # Example
/// ```ignore
/// object_path_id! {
///     /// Identifier of a track.
///     TrackId
/// }
/// ```
#[macro_export]
macro_rules! object_path_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(::zbus::zvariant::OwnedObjectPath);

        impl $name {
            /// Parses `path`, rejecting anything outside the object path grammar.
            ///
            /// # Errors
            ///
            /// Returns `BridgeError::InvalidObjectPath` if `path` is malformed.
            pub fn new(path: impl Into<String>) -> $crate::Result<Self> {
                let path = path.into();
                match ::zbus::zvariant::ObjectPath::try_from(path.as_str()) {
                    Ok(parsed) => Ok(Self(parsed.into())),
                    Err(_) => Err($crate::BridgeError::InvalidObjectPath(path)),
                }
            }

            /// The path as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Borrow-free copy of the path for wire conversion.
            pub fn to_object_path(&self) -> ::zbus::zvariant::ObjectPath<'static> {
                self.0.clone().into_inner()
            }

            /// Owned path for wire conversion.
            pub fn to_owned_path(&self) -> ::zbus::zvariant::OwnedObjectPath {
                self.0.clone()
            }
        }

        impl From<::zbus::zvariant::ObjectPath<'_>> for $name {
            fn from(path: ::zbus::zvariant::ObjectPath<'_>) -> Self {
                Self(path.into())
            }
        }

        impl From<::zbus::zvariant::OwnedObjectPath> for $name {
            fn from(path: ::zbus::zvariant::OwnedObjectPath) -> Self {
                Self(path)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::BridgeError;

            fn from_str(s: &str) -> $crate::Result<Self> {
                Self::new(s)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0.as_str())
            }
        }
    };
}
