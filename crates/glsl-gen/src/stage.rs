//! Stage descriptions and the assembler turning them into a single compilation unit.
//!
//! Every stage is laid out in the same fixed order:
//! 1. `#version` directive (omitted for WebGL),
//! 2. macros,
//! 3. default precisions (ES dialects only),
//! 4. stage inputs (attributes or inputs),
//! 5. outputs,
//! 6. structs, uniforms, globals and function prototypes of all modules,
//! 7. module prototypes,
//! 8. a synthesized `main()` calling every module in order,
//! 9. module and function definitions.

use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{
    item::{Function, Macro},
    module::Module,
    variable::{Role, Variable},
    version::{Dialect, ParseVersionError},
};

/// Default precisions declared by every ES stage.
const PRECISION_PROLOG: &str = "\nprecision highp float;\nprecision highp sampler2D;\n\n";

/// Built-in fragment colour, unavailable from GLSL ES 3.00 on.
const BUILTIN_FRAG_COLOR: &str = "gl_FragColor";

/// Output declared in place of [`BUILTIN_FRAG_COLOR`].
const FRAG_COLOR: &str = "glFragColor";

/// The shading stage a description is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShaderKind {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl ShaderKind {
    /// Role of the stage specific inputs.
    #[inline]
    #[must_use]
    pub const fn input_role(self) -> Role {
        match self {
            Self::Vertex => Role::Attribute,
            Self::Fragment => Role::Input,
        }
    }
}

impl Display for ShaderKind {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Declarations shared by all stages.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Generator {
    /// Version token, see [`Dialect::parse`] for the accepted forms.
    pub version: String,
    /// Preprocessor macros.
    pub macros: Vec<Macro>,
    /// Stage outputs.
    pub outputs: Vec<Variable>,
    /// Global variables, declared without a qualifier.
    pub globals: Vec<Variable>,
    /// Modules, called from `main()` in this order.
    pub modules: Vec<Module>,
}

impl Generator {
    /// Creates an empty description for the given version token.
    #[inline]
    #[must_use]
    pub fn new<V>(version: V) -> Self
    where
        V: Into<String>,
    {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }
}

/// Description of a vertex stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct VertexGenerator {
    /// Declarations shared by all stages.
    #[serde(flatten)]
    pub generator: Generator,
    /// Vertex attributes.
    pub attributes: Vec<Variable>,
}

/// Description of a fragment stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[non_exhaustive]
pub struct FragmentGenerator {
    /// Declarations shared by all stages.
    #[serde(flatten)]
    pub generator: Generator,
    /// Inputs interpolated from the vertex stage.
    pub inputs: Vec<Variable>,
}

/// Implements constructors and builders of a stage description
/// holding a [`Generator`] in `generator` and its stage inputs in `$inputs`.
macro_rules! stage_builders {
    ($ty:ident, $kind:literal, $inputs:ident, $add_input:ident, $input_doc:literal) => {
        impl $ty {
            #[doc = concat!("Creates an empty ", $kind, " stage for the given version token.")]
            #[inline]
            #[must_use]
            pub fn new<V>(version: V) -> Self
            where
                V: Into<String>,
            {
                Self {
                    generator: Generator::new(version),
                    $inputs: Vec::new(),
                }
            }

            #[doc = $input_doc]
            #[inline]
            #[must_use]
            pub fn $add_input(mut self, input: Variable) -> Self {
                self.$inputs.push(input);
                self
            }

            /// Appends a macro.
            #[inline]
            #[must_use]
            pub fn add_macro(mut self, item: Macro) -> Self {
                self.generator.macros.push(item);
                self
            }

            /// Appends an output.
            #[inline]
            #[must_use]
            pub fn add_output(mut self, output: Variable) -> Self {
                self.generator.outputs.push(output);
                self
            }

            /// Appends a global variable.
            #[inline]
            #[must_use]
            pub fn add_global(mut self, global: Variable) -> Self {
                self.generator.globals.push(global);
                self
            }

            /// Appends a module.
            #[inline]
            #[must_use]
            pub fn add_module(mut self, module: Module) -> Self {
                self.generator.modules.push(module);
                self
            }

            /// Parses a description from JSON.
            ///
            /// # Errors
            ///
            /// Returns an error if the JSON is malformed or doesn't describe this stage.
            #[inline]
            pub fn from_json(json: &str) -> serde_json::Result<Self> {
                serde_json::from_str(json)
            }
        }
    };
}

stage_builders!(
    VertexGenerator,
    "vertex",
    attributes,
    add_attribute,
    "Appends a vertex attribute."
);
stage_builders!(
    FragmentGenerator,
    "fragment",
    inputs,
    add_input,
    "Appends a fragment input."
);

/// A shading stage which can be rendered into GLSL source.
pub trait Stage {
    /// Which stage this is.
    fn kind(&self) -> ShaderKind;

    /// Declarations shared by all stages.
    fn generator(&self) -> &Generator;

    /// Stage specific inputs: attributes for vertex, inputs for fragment stages.
    fn inputs(&self) -> &[Variable];

    /// Renders the whole stage.
    ///
    /// The dialect is resolved from the version token on every call,
    /// so rendering the same description twice yields the same source.
    ///
    /// # Errors
    ///
    /// Returns an error if the version token cannot be resolved.
    #[inline]
    fn render(&self) -> Result<String, ParseVersionError> {
        let generator = self.generator();
        let kind = self.kind();
        let dialect = Dialect::parse(&generator.version)?;
        log::debug!(
            "rendering {kind} stage `{}` for {dialect}",
            generator.version
        );
        Ok(Assembler::new(generator, kind, dialect).assemble(self.inputs()))
    }
}

#[expect(
    clippy::missing_trait_methods,
    reason = "`render` is shared by all stages"
)]
impl Stage for VertexGenerator {
    #[inline]
    fn kind(&self) -> ShaderKind {
        ShaderKind::Vertex
    }

    #[inline]
    fn generator(&self) -> &Generator {
        &self.generator
    }

    #[inline]
    fn inputs(&self) -> &[Variable] {
        &self.attributes
    }
}

#[expect(
    clippy::missing_trait_methods,
    reason = "`render` is shared by all stages"
)]
impl Stage for FragmentGenerator {
    #[inline]
    fn kind(&self) -> ShaderKind {
        ShaderKind::Fragment
    }

    #[inline]
    fn generator(&self) -> &Generator {
        &self.generator
    }

    #[inline]
    fn inputs(&self) -> &[Variable] {
        &self.inputs
    }
}

/// Concatenates the sections of one stage in a single pass.
struct Assembler<'generator> {
    /// The rendered description.
    generator: &'generator Generator,
    /// The rendered stage.
    kind: ShaderKind,
    /// Dialect resolved for this render only.
    dialect: Dialect,
    /// Output declared for the fragment colour, if the dialect needs one.
    frag_color: Option<Variable>,
    /// Source assembled so far.
    out: String,
}

impl<'generator> Assembler<'generator> {
    /// Creates an assembler for one render.
    fn new(generator: &'generator Generator, kind: ShaderKind, dialect: Dialect) -> Self {
        let frag_color = (kind == ShaderKind::Fragment && dialect.has_user_frag_color())
            .then(|| Variable::new("vec4", FRAG_COLOR).with_precision("highp"));
        Self {
            generator,
            kind,
            dialect,
            frag_color,
            out: String::new(),
        }
    }

    /// Assembles all sections and returns the source.
    fn assemble(mut self, inputs: &[Variable]) -> String {
        let generator = self.generator;
        let dialect = self.dialect;

        if dialect.has_version_directive() {
            self.out.push_str("#version ");
            self.out.push_str(&generator.version);
            self.out.push_str("\n\n");
        }

        self.block(generator.macros.iter().map(ToString::to_string));

        if dialect.is_es {
            self.out.push_str(PRECISION_PROLOG);
        }

        self.inputs(inputs);

        let outputs = generator
            .outputs
            .iter()
            .chain(&self.frag_color)
            .map(|output| output.qualified(Role::Output, dialect).to_string())
            .collect::<Vec<_>>();
        self.block(outputs);

        self.block(
            generator
                .modules
                .iter()
                .flat_map(|module| &module.structs)
                .map(|item| item.render(dialect)),
        );
        self.block(
            generator
                .modules
                .iter()
                .flat_map(|module| &module.uniforms)
                .map(|uniform| uniform.qualified(Role::Uniform, dialect).to_string()),
        );
        self.block(
            generator
                .globals
                .iter()
                .map(|global| global.declaration(dialect).to_string()),
        );
        let has_functions = self.block(
            generator
                .modules
                .iter()
                .flat_map(|module| &module.functions)
                .map(Function::prototype_declaration),
        );
        log::trace!("{} stage: declarations done", self.kind);

        self.modules();
        self.functions(has_functions);

        self.finish()
    }

    /// Declares the stage specific inputs.
    ///
    /// Vertex stages always follow the attributes with a blank line,
    /// fragment stages only if there are inputs.
    fn inputs(&mut self, inputs: &[Variable]) {
        let role = self.kind.input_role();
        let dialect = self.dialect;
        let lines = inputs
            .iter()
            .map(|input| input.qualified(role, dialect).to_string());
        let written = self.block(lines);
        if self.kind == ShaderKind::Vertex && !written {
            self.out.push('\n');
        }
    }

    /// Module prototypes, `main()` and module definitions.
    ///
    /// Empty modules still take up their line in each list.
    fn modules(&mut self) {
        let generator = self.generator;
        let modules = &generator.modules;

        for (index, module) in modules.iter().enumerate() {
            self.line(&module.prototype(index));
        }
        self.out.push('\n');

        self.out.push_str("void main()\n{\n");
        for (index, module) in modules.iter().enumerate() {
            self.line(&module.call(index));
        }
        self.out.push_str("}\n\n");

        for (index, module) in modules.iter().enumerate() {
            self.out.push_str(&module.definition(index));
            self.out.push_str("\n\n");
        }
        self.out.push('\n');
    }

    /// Function definitions of all modules.
    fn functions(&mut self, has_functions: bool) {
        let generator = self.generator;
        for function in generator.modules.iter().flat_map(|module| &module.functions) {
            self.out.push_str(&function.to_string());
            self.out.push_str("\n\n");
        }
        if has_functions {
            self.out.push('\n');
        }
    }

    /// Applies whole document rewrites and returns the source.
    fn finish(self) -> String {
        if self.frag_color.is_some() {
            log::trace!("replacing `{BUILTIN_FRAG_COLOR}` with `{FRAG_COLOR}`");
            return self.out.replace(BUILTIN_FRAG_COLOR, FRAG_COLOR);
        }
        self.out
    }

    /// Writes one line.
    fn line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    /// Writes each item on its own line, followed by a blank line if there was any.
    /// Returns whether anything was written.
    fn block<I>(&mut self, lines: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut written = false;
        for line in lines {
            self.line(line.as_ref());
            written = true;
        }
        if written {
            self.out.push('\n');
        }
        written
    }
}
