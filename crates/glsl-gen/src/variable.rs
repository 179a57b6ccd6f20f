//! Typed variables and their declarations.

use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::version::Dialect;

/// Type that is only available from GLSL ES 3.20 on.
const MULTISAMPLE_SAMPLER: &str = "sampler2DMS";

/// Type [`MULTISAMPLE_SAMPLER`] is declared as in dialects which lack it.
const FALLBACK_SAMPLER: &str = "sampler2D";

/// A typed, named shader variable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Variable {
    /// GLSL type name, e.g. `vec3`, `mat4` or `sampler2D`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Precision qualifier (`lowp`, `mediump`, `highp`), only emitted for ES dialects.
    pub precision: Option<String>,
    /// Name of the variable.
    pub name: String,
}

/// The kind of declaration a variable appears in, deciding its qualifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Role {
    /// A `uniform`.
    Uniform,
    /// A vertex stage input: `attribute` or `in`.
    Attribute,
    /// A fragment stage input: `varying` or `in`.
    Input,
    /// A stage output: `varying` or `out`.
    Output,
}

impl Role {
    /// Keyword declarations of this role start with in the given dialect.
    #[inline]
    #[must_use]
    pub const fn keyword(self, dialect: Dialect) -> &'static str {
        match (self, dialect.is_legacy()) {
            (Self::Uniform, _) => "uniform",
            (Self::Attribute, true) => "attribute",
            (Self::Input | Self::Output, true) => "varying",
            (Self::Attribute | Self::Input, false) => "in",
            (Self::Output, false) => "out",
        }
    }
}

impl Variable {
    /// Creates a variable without a precision qualifier.
    #[inline]
    #[must_use]
    pub fn new<T, N>(ty: T, name: N) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        Self {
            ty: ty.into(),
            precision: None,
            name: name.into(),
        }
    }

    /// Sets the precision qualifier used in ES dialects.
    #[inline]
    #[must_use]
    pub fn with_precision<P>(mut self, precision: P) -> Self
    where
        P: Into<String>,
    {
        self.precision = Some(precision.into());
        self
    }

    /// Plain declaration without a qualifier keyword, e.g. `highp vec3 pos;`.
    #[inline]
    #[must_use]
    pub const fn declaration(&self, dialect: Dialect) -> Declaration<'_> {
        Declaration {
            variable: self,
            role: None,
            dialect,
        }
    }

    /// Declaration qualified by the keyword of `role`, e.g. `in vec3 pos;`.
    #[inline]
    #[must_use]
    pub const fn qualified(&self, role: Role, dialect: Dialect) -> Declaration<'_> {
        Declaration {
            variable: self,
            role: Some(role),
            dialect,
        }
    }

    /// Type name as it has to be written in the given dialect.
    fn ty_in(&self, dialect: Dialect) -> &str {
        if self.ty == MULTISAMPLE_SAMPLER && dialect.lacks_multisample_samplers() {
            FALLBACK_SAMPLER
        } else {
            &self.ty
        }
    }
}

/// Declaration of a [`Variable`] in some dialect, rendered through [`Display`].
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Declaration<'variable> {
    /// The declared variable.
    variable: &'variable Variable,
    /// Role deciding the keyword, if any.
    role: Option<Role>,
    /// Dialect to render for.
    dialect: Dialect,
}

impl Display for Declaration<'_> {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(role) = self.role {
            write!(f, "{} ", role.keyword(self.dialect))?;
        }
        let precision = self
            .variable
            .precision
            .as_deref()
            .filter(|precision| self.dialect.is_es && !precision.is_empty());
        if let Some(precision) = precision {
            write!(f, "{precision} ")?;
        }
        write!(
            f,
            "{} {};",
            self.variable.ty_in(self.dialect),
            self.variable.name
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test]
    fn precision_only_in_es() {
        let var = Variable::new("vec4", "color").with_precision("mediump");
        assert_eq!(
            var.declaration(Dialect::desktop(330)).to_string(),
            "vec4 color;"
        );
        assert_eq!(
            var.declaration(Dialect::es(300)).to_string(),
            "mediump vec4 color;"
        );
        assert_eq!(
            var.declaration(Dialect::webgl()).to_string(),
            "mediump vec4 color;"
        );
    }

    #[test_log::test]
    fn missing_precision_in_es_has_no_leading_space() {
        let var = Variable::new("float", "t");
        assert_eq!(var.declaration(Dialect::es(300)).to_string(), "float t;");
    }

    #[test_log::test]
    fn attribute_keyword_by_version() {
        let var = Variable::new("vec3", "pos");
        assert_eq!(
            var.qualified(Role::Attribute, Dialect::desktop(150)).to_string(),
            "in vec3 pos;"
        );
        assert_eq!(
            var.qualified(Role::Attribute, Dialect::desktop(330)).to_string(),
            "in vec3 pos;"
        );
        assert_eq!(
            var.qualified(Role::Attribute, Dialect::desktop(140)).to_string(),
            "attribute vec3 pos;"
        );
        assert_eq!(
            var.qualified(Role::Attribute, Dialect::es(100)).to_string(),
            "attribute vec3 pos;"
        );
    }

    #[test_log::test]
    fn role_keywords() {
        let legacy = Dialect::desktop(120);
        let modern = Dialect::es(300);
        assert_eq!(Role::Uniform.keyword(legacy), "uniform");
        assert_eq!(Role::Uniform.keyword(modern), "uniform");
        assert_eq!(Role::Input.keyword(legacy), "varying");
        assert_eq!(Role::Input.keyword(modern), "in");
        assert_eq!(Role::Output.keyword(legacy), "varying");
        assert_eq!(Role::Output.keyword(modern), "out");
    }

    #[test_log::test]
    fn multisample_sampler_downgrade() {
        let var = Variable::new("sampler2DMS", "tex").with_precision("highp");
        assert_eq!(
            var.qualified(Role::Uniform, Dialect::es(310)).to_string(),
            "uniform highp sampler2D tex;"
        );
        assert_eq!(
            var.qualified(Role::Uniform, Dialect::es(320)).to_string(),
            "uniform highp sampler2DMS tex;"
        );
        assert_eq!(
            var.qualified(Role::Uniform, Dialect::desktop(150)).to_string(),
            "uniform sampler2DMS tex;"
        );
        assert_eq!(var.ty, "sampler2DMS");
    }

    #[test_log::test]
    fn empty_fields_are_not_rejected() {
        assert_eq!(
            Variable::default().declaration(Dialect::desktop(330)).to_string(),
            " ;"
        );
    }
}
