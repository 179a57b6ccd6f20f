//! GLSL shader source generator.
//!
//! This library assembles vertex and fragment shader source for several GLSL dialects
//! (desktop core/compatibility profiles, OpenGL ES and WebGL) from a dialect-agnostic
//! description of the stage: declared variables, macros, structs, functions and modules.
//!
//! # How it works
//!
//! The version string of a stage is resolved into a [`Dialect`] on every render.
//! That dialect decides which qualifier keyword each declaration gets
//! (`attribute`/`in`, `varying`/`out`), whether precision qualifiers are emitted
//! and whether some sampler types need to be downgraded.
//! The declarations are then concatenated in a fixed order, followed by a synthesized
//! `main()` which calls every [`Module`] in turn.
//!
//! ```
//! use glsl_gen::{Stage as _, Variable, VertexGenerator};
//!
//! let vertex = VertexGenerator::new("330").add_attribute(Variable::new("vec3", "pos"));
//! let source = vertex.render().unwrap();
//! assert!(source.starts_with("#version 330\n\nin vec3 pos;\n\n"));
//! ```

#![expect(clippy::pub_use, reason = "part of public API")]

pub use self::{
    item::{Function, Macro, Struct},
    module::Module,
    stage::{FragmentGenerator, Generator, ShaderKind, Stage, VertexGenerator},
    variable::{Role, Variable},
    version::{Dialect, ParseVersionError},
};

pub mod item;
pub mod module;
pub mod stage;
pub mod variable;
pub mod version;
