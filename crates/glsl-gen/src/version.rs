//! Resolves the version token of a stage into the GLSL dialect it targets.
//!
//! Accepted tokens are:
//! * `"WebGL"`, which omits the `#version` directive and behaves like GLSL ES 1.00,
//! * `"100"`, which is GLSL ES 1.00,
//! * `"<3 digits>es"` or `"<3 digits> es"`, such as `"300 es"` or `"310es"`, for GLSL ES,
//! * a bare number such as `"150"` or `"330"` for desktop GLSL.

use core::{
    fmt::{self, Display},
    num::ParseIntError,
    str::FromStr,
};

/// The token selecting WebGL output.
pub const WEBGL: &str = "WebGL";

/// Numeric version WebGL resolves to. WebGL sources have no `#version` directive,
/// so this only takes part in the legacy checks, where it behaves like GLSL ES 1.00.
const WEBGL_VERSION: u16 = 100;

/// First version using `in`/`out` qualifiers on desktop GL.
const DESKTOP_IN_OUT_VERSION: u16 = 150;

/// First version using `in`/`out` qualifiers on GLES.
const ES_IN_OUT_VERSION: u16 = 300;

/// First GLES version with multisampled textures.
const ES_MULTISAMPLE_VERSION: u16 = 320;

/// GLSL dialect resolved from a version token.
///
/// This is computed fresh for every render and passed down to the formatters,
/// it is never stored on a stage description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Dialect {
    /// Numeric GLSL version, e.g. `330` or `300`.
    pub version: u16,
    /// Whether the dialect is an OpenGL ES profile (WebGL included).
    pub is_es: bool,
    /// Whether the dialect is WebGL.
    pub is_webgl: bool,
}

impl Dialect {
    /// Desktop GLSL of the given version.
    #[inline]
    #[must_use]
    pub const fn desktop(version: u16) -> Self {
        Self {
            version,
            is_es: false,
            is_webgl: false,
        }
    }

    /// GLSL ES of the given version.
    #[inline]
    #[must_use]
    pub const fn es(version: u16) -> Self {
        Self {
            version,
            is_es: true,
            is_webgl: false,
        }
    }

    /// WebGL, which is treated as GLSL ES 1.00 without a `#version` directive.
    #[inline]
    #[must_use]
    pub const fn webgl() -> Self {
        Self {
            version: WEBGL_VERSION,
            is_es: true,
            is_webgl: true,
        }
    }

    /// Resolves a version token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or its numeric part is not a valid `u16`.
    #[inline]
    pub fn parse(token: &str) -> Result<Self, ParseVersionError> {
        if token.is_empty() {
            return Err(ParseVersionError::Empty);
        }
        if token == WEBGL {
            return Ok(Self::webgl());
        }

        let dialect = match es_prefix(token) {
            Some(prefix) => Self::es(parse_number(prefix, token)?),
            None => Self::desktop(parse_number(token, token)?),
        };
        log::trace!("resolved version `{token}` into {dialect}");
        Ok(dialect)
    }

    /// Whether declarations use the pre-`in`/`out` keywords `attribute` and `varying`.
    #[inline]
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        self.version < DESKTOP_IN_OUT_VERSION || (self.is_es && self.version < ES_IN_OUT_VERSION)
    }

    /// Whether `sampler2DMS` is unavailable and has to be declared as `sampler2D`.
    #[inline]
    #[must_use]
    pub const fn lacks_multisample_samplers(self) -> bool {
        self.is_es && self.version < ES_MULTISAMPLE_VERSION
    }

    /// Whether the fragment colour has to be a user declared output
    /// instead of the built-in `gl_FragColor`.
    #[inline]
    #[must_use]
    pub const fn has_user_frag_color(self) -> bool {
        self.is_es && self.version >= ES_IN_OUT_VERSION
    }

    /// Whether the source starts with a `#version` directive.
    #[inline]
    #[must_use]
    pub const fn has_version_directive(self) -> bool {
        !self.is_webgl
    }
}

impl FromStr for Dialect {
    type Err = ParseVersionError;

    #[inline]
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::parse(token)
    }
}

impl Display for Dialect {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_webgl, self.is_es) {
            (true, _) => write!(f, "WebGL"),
            (false, true) => write!(f, "GLSL ES {}", self.version),
            (false, false) => write!(f, "GLSL {}", self.version),
        }
    }
}

/// Returns the numeric prefix of ES tokens: `"100"`, `"300es"` and `"300 es"`.
fn es_prefix(token: &str) -> Option<&str> {
    if token == "100" {
        return Some(token);
    }
    let prefix = token
        .strip_suffix("es")
        .map(|rest| rest.strip_suffix(' ').unwrap_or(rest))?;
    (prefix.len() == 3 && prefix.bytes().all(|byte| byte.is_ascii_digit())).then_some(prefix)
}

/// Parses the numeric part of `token`, which may only consist of ASCII digits.
fn parse_number(number: &str, token: &str) -> Result<u16, ParseVersionError> {
    if !number.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseVersionError::NotDigits {
            token: token.to_owned(),
        });
    }
    number
        .parse()
        .map_err(|source| ParseVersionError::InvalidNumber {
            token: token.to_owned(),
            source,
        })
}

/// An error indicating that a version token could not be resolved into a [`Dialect`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseVersionError {
    /// The version token was empty.
    #[error("version token is empty")]
    Empty,
    /// The version token is none of `WebGL`, `<3 digits>es` or a plain number.
    #[error("invalid version `{token}`: expected only ASCII digits")]
    NotDigits {
        /// The offending version token.
        token: String,
    },
    /// The numeric part of the version token does not fit a `u16`.
    #[error("invalid version `{token}`: {source}")]
    InvalidNumber {
        /// The offending version token.
        token: String,
        /// Source of the error.
        source: ParseIntError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test]
    fn webgl_is_es_without_directive() {
        let dialect = Dialect::parse("WebGL").unwrap();
        assert!(dialect.is_es);
        assert!(dialect.is_webgl);
        assert!(!dialect.has_version_directive());
        assert!(dialect.is_legacy());
    }

    #[test_log::test]
    fn es_100() {
        assert_eq!(Dialect::parse("100").unwrap(), Dialect::es(100));
    }

    #[test_log::test]
    fn es_suffix_yields_prefix() {
        for version in 0_u16..=999 {
            for token in [format!("{version:03}es"), format!("{version:03} es")] {
                let dialect: Dialect = token.parse().unwrap();
                assert!(dialect.is_es, "{token}");
                assert!(!dialect.is_webgl, "{token}");
                assert_eq!(dialect.version, version, "{token}");
            }
        }
    }

    #[test_log::test]
    fn desktop_versions() {
        assert_eq!(Dialect::parse("330").unwrap(), Dialect::desktop(330));
        assert_eq!(Dialect::parse("150").unwrap(), Dialect::desktop(150));
        assert_eq!(Dialect::parse("120").unwrap(), Dialect::desktop(120));
    }

    #[test_log::test]
    fn legacy_thresholds() {
        assert!(Dialect::desktop(140).is_legacy());
        assert!(!Dialect::desktop(150).is_legacy());
        assert!(Dialect::es(100).is_legacy());
        assert!(!Dialect::es(300).is_legacy());
    }

    #[test_log::test]
    fn malformed_numbers_are_reported() {
        let err = Dialect::parse("33O").unwrap_err();
        assert!(
            matches!(&err, ParseVersionError::NotDigits { token } if token == "33O"),
            "{err:?}"
        );
        for token in ["+330", "-330", " 330", "330 ", "+30es", "3_0es"] {
            assert!(
                matches!(Dialect::parse(token), Err(ParseVersionError::NotDigits { .. })),
                "{token}"
            );
        }
        assert!(matches!(
            Dialect::parse("99999"),
            Err(ParseVersionError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Dialect::parse("3000es"),
            Err(ParseVersionError::NotDigits { .. })
        ));
        assert_eq!(Dialect::parse(""), Err(ParseVersionError::Empty));
    }

    #[test_log::test]
    fn display() {
        assert_eq!(Dialect::webgl().to_string(), "WebGL");
        assert_eq!(Dialect::es(300).to_string(), "GLSL ES 300");
        assert_eq!(Dialect::desktop(330).to_string(), "GLSL 330");
    }
}
