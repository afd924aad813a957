//! Program assembly.
//!
//! Orchestrates header synthesis and the two per-stage bodies. A
//! `GlslGenerator` is immutable after construction and freely shareable;
//! all scratch state (output buffer, identifier bindings, per-program
//! function implementations) lives in a `Session` constructed fresh for
//! each stage, so nothing leaks across stages, calls or threads.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use psc_ir::{
    simplify, type_of, CompiledShader, Context, Expression, FunctionExportedSignature,
    FunctionSignature, ShaderSignature, Statement, TypeExported, Types, Uniform,
};

use crate::builtins::{direct_call, native_implementations, BuiltinFn, BuiltinTable};
use crate::env::Environment;
use crate::error::{GenError, GenResult};
use crate::types::{base_type, precision_allowed, precision_keyword};

/// Target dialect, selected at generator construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dialect {
    /// Desktop GLSL 3.30 core.
    Gl330,
    /// OpenGL ES GLSL 3.00, with explicit precision qualifiers.
    Gles300,
}

impl Dialect {
    fn version_line(self) -> &'static str {
        match self {
            Dialect::Gl330 => "#version 330",
            Dialect::Gles300 => "#version 300 es",
        }
    }
}

/// One half of the pipeline program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// The generated pipeline program: two complete source strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlslProgram {
    pub vertex: String,
    pub fragment: String,
}

/// GLSL source generator for one dialect.
pub struct GlslGenerator {
    dialect: Dialect,
    builtins: BuiltinTable,
}

impl GlslGenerator {
    /// Construct a generator, building and validating the native builtin
    /// table for the dialect. Fails if any standard-library signature
    /// lacks an implementation.
    pub fn new(dialect: Dialect) -> GenResult<Self> {
        Ok(GlslGenerator {
            dialect,
            builtins: native_implementations(dialect)?,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Generate the vertex and fragment sources for one shader with the
    /// given property values. A failure in either stage aborts the call;
    /// no partial output is returned.
    pub fn generate(
        &self,
        shader: &CompiledShader,
        properties: &BTreeMap<String, Expression>,
    ) -> GenResult<GlslProgram> {
        let context = Context::new(shader);
        let vertex = Session::new(self, shader, &context).generate_vertex(properties)?;
        let fragment = Session::new(self, shader, &context).generate_fragment(properties)?;
        Ok(GlslProgram { vertex, fragment })
    }
}

/// Scratch state of one stage compilation.
pub(crate) struct Session<'a> {
    pub(crate) dialect: Dialect,
    pub(crate) builtins: &'a BuiltinTable,
    pub(crate) context: &'a Context,
    pub(crate) env: Environment,
    /// Specialized implementations registered for locally defined
    /// functions during this session.
    pub(crate) implementations: BTreeMap<FunctionExportedSignature, BuiltinFn>,
    shader: &'a CompiledShader,
    output: String,
}

impl<'a> Session<'a> {
    fn new(generator: &'a GlslGenerator, shader: &'a CompiledShader, context: &'a Context) -> Self {
        let mut session = Session {
            dialect: generator.dialect,
            builtins: &generator.builtins,
            context,
            env: Environment::new(),
            implementations: BTreeMap::new(),
            shader,
            output: String::with_capacity(2048),
        };
        session.bind_built_ins();
        session
    }

    /// Bind the implicit built-ins when the shader's scope declares
    /// them: clip-space output and fragment-coordinate input.
    fn bind_built_ins(&mut self) {
        if let Some(identifier) = self.shader.scope.get("out_Position") {
            self.env.bind(
                identifier,
                Expression::raw(TypeExported::new(Types::Vector4), "gl_Position"),
            );
        }
        if let Some(identifier) = self.shader.scope.get("varying_Fragment") {
            self.env.bind(
                identifier,
                Expression::raw(TypeExported::new(Types::Vector4), "gl_FragCoord"),
            );
        }
    }

    fn generate_vertex(mut self, properties: &BTreeMap<String, Expression>) -> GenResult<String> {
        let shader = self.shader;
        let vertex = shader
            .vertex
            .as_ref()
            .ok_or(GenError::MissingStage(Stage::Vertex))?;
        let fragment = shader
            .fragment
            .as_ref()
            .ok_or(GenError::MissingStage(Stage::Fragment))?;
        self.bind_properties(properties)?;
        self.signature_identifiers(&vertex.signature);
        // Both stages' identifiers stay visible: the vertex body writes
        // the varyings the fragment signature declares.
        self.signature_identifiers(&fragment.signature);
        self.header_inputs(shader.uniforms(), &vertex.signature)?;
        self.print_blank();
        self.header_outputs(&fragment.signature)?;
        self.print_blank();
        self.header_declarations()?;
        self.print_blank();
        self.functions()?;
        self.print_blank();
        self.stage_main(&vertex.body)?;
        Ok(self.output)
    }

    fn generate_fragment(mut self, properties: &BTreeMap<String, Expression>) -> GenResult<String> {
        let shader = self.shader;
        let fragment = shader
            .fragment
            .as_ref()
            .ok_or(GenError::MissingStage(Stage::Fragment))?;
        let outputs = shader.outputs.as_ref().ok_or(GenError::MissingOutputs)?;
        self.bind_properties(properties)?;
        self.signature_identifiers(outputs);
        // The vertex stage's identifiers stay visible here as well.
        if let Some(vertex) = shader.vertex.as_ref() {
            self.signature_identifiers(&vertex.signature);
        }
        self.header_inputs(shader.uniforms(), &fragment.signature)?;
        self.print_blank();
        self.header_outputs(outputs)?;
        self.print_blank();
        self.header_declarations()?;
        self.print_blank();
        self.functions()?;
        self.print_blank();
        self.stage_main(&fragment.body)?;
        Ok(self.output)
    }

    /// Install substitution bindings for every declared property,
    /// checking the supplied value's computed type against the
    /// declaration exactly.
    fn bind_properties(&mut self, properties: &BTreeMap<String, Expression>) -> GenResult<()> {
        let shader = self.shader;
        for property in &shader.properties {
            let name = &property.identifier.name;
            let value = properties
                .get(name)
                .ok_or_else(|| GenError::missing_property(name.clone()))?;
            let declared = property.identifier.ty.exported();
            let supplied = type_of(value, self.context)?;
            if declared != supplied {
                return Err(GenError::PropertyTypeMismatch {
                    name: name.clone(),
                    declared,
                    value: supplied,
                });
            }
            self.env.bind(&property.identifier, value.clone());
        }
        Ok(())
    }

    /// Does an availability guard fold to the literal `true`?
    fn available(&self, guard: &Expression) -> bool {
        matches!(
            simplify(guard, self.context, self.env.bindings()),
            Expression::Boolean(true)
        )
    }

    /// Install pass-through bindings for every available parameter of a
    /// signature.
    fn signature_identifiers(&mut self, signature: &ShaderSignature) {
        for parameter in &signature.parameters {
            if !self.available(&parameter.available) {
                continue;
            }
            self.env.bind_passthrough(&parameter.identifier);
        }
    }

    /// Version preamble, uniforms and stage inputs.
    fn header_inputs(
        &mut self,
        uniforms: &'a [Option<Uniform>],
        input: &'a ShaderSignature,
    ) -> GenResult<()> {
        self.println(0, self.dialect.version_line());
        self.print_blank();
        for uniform in uniforms.iter().flatten() {
            if !self.available(&uniform.available) {
                continue;
            }
            self.env.bind_passthrough(&uniform.identifier);
            let declaration = self.type_decl(&uniform.identifier.ty, &uniform.identifier.name)?;
            self.println(0, &format!("uniform {};", declaration));
        }
        self.print_blank();
        for parameter in &input.parameters {
            if !self.available(&parameter.available) {
                continue;
            }
            self.env.bind_passthrough(&parameter.identifier);
            let declaration =
                self.type_decl(&parameter.identifier.ty, &parameter.identifier.name)?;
            if parameter.location < 0 {
                self.println(0, &format!("in {};", declaration));
            } else {
                self.println(
                    0,
                    &format!(
                        "layout(location = {}) in {};",
                        parameter.location, declaration
                    ),
                );
            }
        }
        Ok(())
    }

    /// Counterpart interface as `out` declarations: the fragment
    /// signature's varyings in the vertex stage, the output interface in
    /// the fragment stage.
    fn header_outputs(&mut self, output: &'a ShaderSignature) -> GenResult<()> {
        for parameter in &output.parameters {
            if !self.available(&parameter.available) {
                continue;
            }
            let declaration =
                self.type_decl(&parameter.identifier.ty, &parameter.identifier.name)?;
            if parameter.location < 0 {
                self.println(0, &format!("out {};", declaration));
            } else {
                self.println(
                    0,
                    &format!(
                        "layout(location = {}) out {};",
                        parameter.location, declaration
                    ),
                );
            }
        }
        Ok(())
    }

    fn header_declarations(&mut self) -> GenResult<()> {
        let shader = self.shader;
        for statement in &shader.declarations {
            self.statement(statement, 0)?;
        }
        Ok(())
    }

    /// Emit every user-defined function and register its specialized
    /// call implementation for this session.
    fn functions(&mut self) -> GenResult<()> {
        let shader = self.shader;
        for function in &shader.functions {
            let exported = function.signature.exported();
            let name = function.signature.name.clone();
            crate::debug!("registering function implementation: {}", exported);
            self.implementations.insert(
                exported,
                Box::new(move |arguments| direct_call(&name, arguments)),
            );
            let signature = self.function_signature(&function.signature)?;
            self.println(0, &signature);
            self.statement(&function.body, 0)?;
        }
        Ok(())
    }

    /// Render a function's declaration line, binding its parameters.
    fn function_signature(&mut self, signature: &FunctionSignature) -> GenResult<String> {
        let mut out = String::with_capacity(64);
        if self.dialect == Dialect::Gles300 && precision_allowed(signature.returned.kind) {
            out.push_str(precision_keyword(signature.returned.precision));
            out.push(' ');
        }
        out.push_str(base_type(signature.returned.kind));
        if signature.returned.array.is_some() {
            out.push_str("[]");
        }
        out.push(' ');
        out.push_str(&signature.name);
        out.push('(');
        for (i, parameter) in signature.parameters.iter().enumerate() {
            self.env.bind_passthrough(parameter);
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.type_decl(&parameter.ty, &parameter.name)?);
        }
        out.push(')');
        Ok(out)
    }

    /// The stage body as the implicit entry point.
    fn stage_main(&mut self, body: &Statement) -> GenResult<()> {
        self.println(0, "void main(void)");
        self.statement(body, 0)
    }

    pub(crate) fn println(&mut self, level: usize, line: &str) {
        for _ in 0..level {
            self.output.push_str("    ");
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn print_blank(&mut self) {
        self.output.push('\n');
    }
}
