//! TypeScript declaration file for the JavaScript module.

use std::fmt::Write;

use surfdoc_bindings::{ClassEntity, Dialect, EnumEntity};
use surfdoc_reference::{DocBlock, Method, Parameter};

use super::{one_line, text_lines};
use crate::traits::{Artifact, EmitContext, Emitter, Target};
use crate::typemap::translate;

/// Static instance of the TypeScript emitter for registry.
pub static TYPESCRIPT_EMITTER: TypeScriptEmitter = TypeScriptEmitter;

pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
        let path = format!("javascript/{}.d.ts", ctx.options.module);
        vec![Artifact::new(path, generate_typescript(ctx))]
    }
}

/// Render the `declare module` block for every enum and JavaScript class.
pub fn generate_typescript(ctx: &EmitContext) -> String {
    let mut writer = TypeScriptWriter {
        ctx,
        output: String::new(),
    };
    writer.write_module();
    writer.output
}

struct TypeScriptWriter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
    output: String,
}

impl TypeScriptWriter<'_, '_> {
    fn write_module(&mut self) {
        let options = self.ctx.options;
        let _ = writeln!(self.output, "declare module '{}' {{", options.module);
        self.output.push('\n');
        let _ = writeln!(
            self.output,
            "\texport default function {}() : Promise<{}>;",
            options.module, options.module_class
        );

        for e in self.ctx.bindings.enums() {
            self.write_enum(e);
        }

        self.output.push('\n');
        let _ = writeln!(self.output, "\tclass {} {{", options.module_class);
        for e in self.ctx.bindings.enums() {
            let _ = writeln!(self.output, "\t\t{0}: typeof {0}", e.name);
        }
        for class in self.ctx.bindings.javascript_classes() {
            let _ = writeln!(self.output, "\t\t{0}: typeof {0};", class.name);
        }
        self.output.push_str("\t}\n");

        for class in self.ctx.bindings.javascript_classes() {
            self.write_class(class);
        }
        self.output.push_str("}\n");
    }

    fn write_enum(&mut self, e: &EnumEntity) {
        self.output.push('\n');
        let _ = writeln!(self.output, "\tenum {} {{", e.name);
        let last = e.values.len().saturating_sub(1);
        for (i, value) in e.values.iter().enumerate() {
            let comma = if i < last { "," } else { "" };
            let _ = writeln!(self.output, "\t\t{}{}", value, comma);
        }
        self.output.push_str("\t}\n");
    }

    fn write_class(&mut self, class: &ClassEntity) {
        let resolver = self.ctx.resolver;
        self.output.push('\n');
        let _ = write!(self.output, "\tclass {}", class.name);
        if let Some(base) = class.base.as_deref().filter(|b| !b.is_empty()) {
            let _ = write!(self.output, " extends {}", base);
        }
        self.output.push_str(" {\n");

        for name in &class.properties {
            let prop = resolver.property(&class.name, name);
            self.output.push_str("\t\t/**\n");
            if let Some(summary) = prop.and_then(|p| p.doc.as_ref()).and_then(DocBlock::summary) {
                for line in text_lines(summary) {
                    let _ = writeln!(self.output, "\t\t * {}", line);
                }
            }
            self.output.push_str("\t\t */\n");
            let ty = prop.map_or_else(|| "any".to_string(), |p| translate(&p.ty).declared);
            let _ = writeln!(self.output, "\t\t{}: {};", name, ty);
        }

        if let Some(ctor) = resolver.first_constructor(class) {
            let params: Vec<String> = ctor
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, translate(&p.ty).declared))
                .collect();
            let _ = writeln!(self.output, "\n\t\tconstructor({});", params.join(", "));
        }

        for bound in &class.methods {
            let method = resolver.method(Dialect::JavaScript, &class.name, bound);
            match method.and_then(|m| m.doc.as_ref().map(|d| (m, d))) {
                Some((m, doc)) => self.write_method_doc(m, doc),
                None => self.output.push_str("\t\t/** ... */\n"),
            }
            let prefix = if bound.is_static { "static " } else { "" };
            let (params, returns) = match method {
                Some(m) => (signature(m.inputs()), return_type(m)),
                None => {
                    tracing::debug!(class = %class.name, method = %bound.name, "unresolved javascript method");
                    (String::new(), "void".to_string())
                }
            };
            let _ = writeln!(self.output, "\t\t{}{}({}): {};", prefix, bound.name, params, returns);
        }
        self.output.push_str("\t}\n");
    }

    fn write_method_doc(&mut self, method: &Method, doc: &DocBlock) {
        self.output.push_str("\t\t/**\n");
        if let Some(summary) = doc.summary() {
            let _ = writeln!(self.output, "\t\t * @description {}", one_line(summary));
        }
        for param in method.inputs() {
            let ty = translate(&param.ty).declared;
            match doc.param(&param.name) {
                Some(text) => {
                    let _ = writeln!(self.output, "\t\t * @param {{{}}} {} {}", ty, param.name, one_line(text));
                }
                None => {
                    let _ = writeln!(self.output, "\t\t * @param {{{}}} {}", ty, param.name);
                }
            }
        }
        if let Some(returns) = doc.returns() {
            let _ = writeln!(
                self.output,
                "\t\t * @returns {{{}}} {}",
                return_type(method),
                one_line(returns)
            );
        }
        self.output.push_str("\t\t */\n");
    }
}

fn signature<'p>(params: impl Iterator<Item = &'p Parameter>) -> String {
    params
        .map(|p| format!("{}:{}", p.name, translate(&p.ty).declared))
        .collect::<Vec<_>>()
        .join(",")
}

/// Methods with `out` parameters return an object bundling every result.
fn return_type(method: &Method) -> String {
    if method.has_out() {
        "object".to_string()
    } else {
        translate(&method.return_type).declared
    }
}
