//! Declares answer-token enums
//!
//! Every categorical answer (environment, season, activity, ...) is a
//! closed set of snake_case tokens. The macro generates the enum with serde
//! names matching the tokens, `as_str`, `Display`, `FromStr` (lenient about
//! case, spaces, and hyphens) and an `ALL` slice in declaration order.

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $token)] $variant),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = $crate::error::normalize_token(s);
                match token.as_str() {
                    $($token => Ok($name::$variant),)+
                    _ => Err($crate::error::ParseError::new($kind, s)),
                }
            }
        }
    };
}
