//! Macros, structs and functions.

use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{variable::Variable, version::Dialect};

/// A preprocessor `#define`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Macro {
    /// Name of the macro.
    pub name: String,
    /// Replacement text.
    pub value: String,
}

impl Macro {
    /// Creates a macro.
    #[inline]
    #[must_use]
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for Macro {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#define {} {}", self.name, self.value)
    }
}

/// A struct definition.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Struct {
    /// Name of the struct.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Variable>,
}

impl Struct {
    /// Creates a struct without fields.
    #[inline]
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[inline]
    #[must_use]
    pub fn add_field(mut self, field: Variable) -> Self {
        self.fields.push(field);
        self
    }

    /// Renders the definition, ending in `};` without a trailing newline.
    ///
    /// The first field follows the opening brace on the same line.
    #[inline]
    #[must_use]
    pub fn render(&self, dialect: Dialect) -> String {
        let mut out = format!("struct {}\n{{", self.name);
        for field in &self.fields {
            out.push_str(&field.declaration(dialect).to_string());
            out.push('\n');
        }
        out.push_str("};");
        out
    }
}

/// A free-standing function.
///
/// The body is inserted as is, it is never parsed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Function {
    /// Full signature, e.g. `float luma(vec3 color)`.
    pub prototype: String,
    /// Statements of the function.
    pub body: String,
}

impl Function {
    /// Creates a function.
    #[inline]
    #[must_use]
    pub fn new<P, B>(prototype: P, body: B) -> Self
    where
        P: Into<String>,
        B: Into<String>,
    {
        Self {
            prototype: prototype.into(),
            body: body.into(),
        }
    }

    /// Forward declaration, e.g. `float luma(vec3 color);`.
    #[inline]
    #[must_use]
    pub fn prototype_declaration(&self) -> String {
        format!("{};", self.prototype)
    }
}

/// Renders the full definition, ending in `}\n`.
impl Display for Function {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{{\n{}\n}}\n", self.prototype, self.body)
    }
}
