//! Modules: blocks of code with their own uniforms, structs and functions,
//! each of which is called once from the synthesized `main()`.
//!
//! A module with an empty body is treated as absent: its prototype, call and
//! definition all render to the empty string. Its uniforms, structs and functions
//! are still declared.

use serde::{Deserialize, Serialize};

use crate::item::{Function, Struct};
use crate::variable::Variable;

/// A named or positionally identified block of shader code.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Module {
    /// Uniforms used by this module.
    pub uniforms: Vec<Variable>,
    /// Structs used by this module.
    pub structs: Vec<Struct>,
    /// Helper functions used by this module.
    pub functions: Vec<Function>,
    /// Name of the module function. See [`Module::effective_name`] when it is absent.
    pub name: Option<String>,
    /// Statements of the module function.
    pub body: String,
}

impl Module {
    /// Creates an unnamed module with the given body.
    #[inline]
    #[must_use]
    pub fn new<B>(body: B) -> Self
    where
        B: Into<String>,
    {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Names the module function.
    #[inline]
    #[must_use]
    pub fn with_name<N>(mut self, name: N) -> Self
    where
        N: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Appends a uniform.
    #[inline]
    #[must_use]
    pub fn add_uniform(mut self, uniform: Variable) -> Self {
        self.uniforms.push(uniform);
        self
    }

    /// Appends a struct.
    #[inline]
    #[must_use]
    pub fn add_struct(mut self, item: Struct) -> Self {
        self.structs.push(item);
        self
    }

    /// Appends a function.
    #[inline]
    #[must_use]
    pub fn add_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    /// Whether the module renders to nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Name of the module function: its own name, or `module<index>` when it has none.
    ///
    /// `index` is the zero-based position of the module in its stage,
    /// so reordering the modules of a stage renames the unnamed ones.
    #[inline]
    #[must_use]
    pub fn effective_name(&self, index: usize) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("module{index}"), ToOwned::to_owned)
    }

    /// Forward declaration, e.g. `void module0();`.
    #[inline]
    #[must_use]
    pub fn prototype(&self, index: usize) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("void {}();", self.effective_name(index))
    }

    /// Call statement used inside `main()`, e.g. `module0();`.
    #[inline]
    #[must_use]
    pub fn call(&self, index: usize) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{}();", self.effective_name(index))
    }

    /// Full definition, ending in `}` without a trailing newline.
    #[inline]
    #[must_use]
    pub fn definition(&self, index: usize) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("void {}()\n{{\n{}\n}}", self.effective_name(index), self.body)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test]
    fn unnamed_module_uses_index() {
        let module = Module::new("gl_Position = vec4(0.0);");
        assert_eq!(module.effective_name(3), "module3");
        assert_eq!(module.prototype(3), "void module3();");
        assert_eq!(module.call(3), "module3();");
        assert_eq!(
            module.definition(3),
            "void module3()\n{\ngl_Position = vec4(0.0);\n}"
        );
    }

    #[test_log::test]
    fn named_module() {
        let module = Module::new("x = 1.0;").with_name("shade");
        assert_eq!(module.prototype(0), "void shade();");
        assert_eq!(module.call(7), "shade();");
        assert_eq!(module.definition(0), "void shade()\n{\nx = 1.0;\n}");
    }

    #[test_log::test]
    fn empty_name_falls_back_to_index() {
        let module = Module::new("x = 1.0;").with_name("");
        assert_eq!(module.effective_name(2), "module2");
    }

    #[test_log::test]
    fn empty_body_renders_nothing() {
        let module = Module::new("").with_name("unused");
        assert!(module.is_empty());
        assert_eq!(module.prototype(0), "");
        assert_eq!(module.call(0), "");
        assert_eq!(module.definition(0), "");
    }
}
