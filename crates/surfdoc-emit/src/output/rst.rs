//! reStructuredText reference pages for Sphinx.
//!
//! One page per Python class, an `index.rst` toctree over all of them, and a
//! `conf.py` rendered from the embedded template.

use std::fmt::Write;

use surfdoc_bindings::{BoundMethod, ClassEntity, Dialect};
use surfdoc_reference::{DocBlock, Parameter};

use super::text_lines;
use crate::order::by_inheritance;
use crate::traits::{Artifact, EmitContext, EmitOptions, Emitter, Target};
use crate::typemap::python_doc_type;

const CONF_TEMPLATE: &str = include_str!("../../templates/conf.py");

/// Spaces per directive nesting level.
const INDENT: usize = 3;

/// Static instance of the RST emitter for registry.
pub static RST_EMITTER: RstEmitter = RstEmitter;

pub struct RstEmitter;

impl Emitter for RstEmitter {
    fn name(&self) -> &'static str {
        "rst"
    }

    fn target(&self) -> Target {
        Target::Python
    }

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
        let mut artifacts = vec![Artifact::new("python/rst/conf.py", generate_sphinx_conf(ctx.options))];
        for class in by_inheritance(ctx.bindings.python_classes()) {
            let path = format!("python/rst/{}.rst", class.name);
            artifacts.push(Artifact::new(path, generate_rst(ctx, class)));
        }
        artifacts.push(Artifact::new("python/rst/index.rst", generate_rst_index(ctx)));
        artifacts
    }
}

/// Sphinx configuration with the module name and version filled in.
pub fn generate_sphinx_conf(options: &EmitOptions) -> String {
    CONF_TEMPLATE
        .replace("{MODULE}", &options.module)
        .replace("{VERSION}", &options.version)
}

/// Root toctree listing every Python class.
pub fn generate_rst_index(ctx: &EmitContext) -> String {
    let module = &ctx.options.module;
    let title = format!("Welcome to {}'s documentation!", module);
    let mut out = String::new();
    let _ = writeln!(out, ".. {} documentation master file, created by", module);
    out.push_str("   sphinx-quickstart.\n");
    out.push_str("   You can adapt this file completely to your liking, but it should at least\n");
    out.push_str("   contain the root `toctree` directive.\n\n");
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
    out.push_str("\n.. toctree::\n   :maxdepth: 2\n   :caption: Contents:\n\n");

    let mut names: Vec<&str> = ctx
        .bindings
        .python_classes()
        .map(|c| c.name.as_str())
        .collect();
    names.sort_by_cached_key(|n| n.to_lowercase());
    for name in names {
        let _ = writeln!(out, "   {}", name);
    }

    out.push_str("\n\nIndices and tables\n==================\n\n");
    out.push_str("* :ref:`genindex`\n* :ref:`modindex`\n* :ref:`search`\n");
    out
}

/// Reference page for one Python class.
pub fn generate_rst(ctx: &EmitContext, class: &ClassEntity) -> String {
    let mut writer = RstWriter {
        ctx,
        output: String::new(),
    };
    writer.write_page(class);
    writer.output
}

struct RstWriter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
    output: String,
}

impl RstWriter<'_, '_> {
    fn pad(level: usize) -> String {
        " ".repeat(level * INDENT)
    }

    fn write_page(&mut self, class: &ClassEntity) {
        let _ = writeln!(self.output, "{}", class.name);
        let _ = writeln!(self.output, "{}", "=".repeat(class.name.len()));
        self.output.push('\n');
        let _ = writeln!(self.output, ".. py:module:: {}", self.ctx.options.module);
        self.output.push('\n');
        let _ = writeln!(self.output, ".. py:class:: {}", class.name);

        self.write_constructors(class);
        self.write_attributes(class);
        for method in &class.methods {
            self.write_method(class, method);
        }
    }

    fn write_constructors(&mut self, class: &ClassEntity) {
        let resolver = self.ctx.resolver;
        for (_, ctor) in resolver.constructors(class) {
            let inputs: Vec<&Parameter> = ctor
                .map(|c| c.params.iter().filter(|p| !p.is_out()).collect())
                .unwrap_or_default();
            let names: Vec<&str> = inputs.iter().map(|p| p.name.as_str()).collect();
            let _ = writeln!(self.output, "\n   .. py:method:: {}({})\n", class.name, names.join(", "));

            let doc = ctor.and_then(|c| c.doc.as_ref());
            match doc.and_then(DocBlock::summary) {
                Some(summary) => self.write_lines(2, summary),
                None => {
                    let _ = writeln!(self.output, "{}{} constructor", Self::pad(2), class.name);
                }
            }
            self.output.push('\n');
            if let Some(doc) = doc {
                self.write_params(&inputs, doc);
            }
        }
    }

    fn write_attributes(&mut self, class: &ClassEntity) {
        let resolver = self.ctx.resolver;
        for name in &class.properties {
            let _ = writeln!(self.output, "\n   .. py:attribute:: {}\n", name);
            let Some(prop) = resolver.property(&class.name, name) else {
                continue;
            };
            let Some(summary) = prop.doc.as_ref().and_then(DocBlock::summary) else {
                continue;
            };
            let ty = python_doc_type(&prop.ty);
            for (i, line) in python_lines(summary).iter().enumerate() {
                if i == 0 {
                    let _ = writeln!(self.output, "{}{}: {}", Self::pad(2), ty, line);
                } else {
                    let _ = writeln!(self.output, "{}{}", Self::pad(2), line);
                }
            }
        }
    }

    fn write_method(&mut self, class: &ClassEntity, bound: &BoundMethod) {
        let directive = if bound.is_static { "py:staticmethod" } else { "py:method" };
        let _ = writeln!(
            self.output,
            "\n   .. {}:: {}({})\n",
            directive,
            bound.name,
            bound.args.join(", ")
        );

        let Some(method) = self.ctx.resolver.method(Dialect::Python, &class.name, bound) else {
            tracing::debug!(class = %class.name, method = %bound.name, "unresolved python method");
            let _ = writeln!(self.output, "{}[todo] add documentation", Self::pad(2));
            return;
        };

        let doc = method.doc.as_ref();
        if let Some(summary) = doc.and_then(DocBlock::summary) {
            self.write_lines(2, summary);
        }
        if let Some(doc) = doc {
            let documented: Vec<&Parameter> = method.inputs().filter(|p| doc.param(&p.name).is_some()).collect();
            if !documented.is_empty() && documented.len() == bound.args.len() {
                self.output.push('\n');
                self.write_params(&documented, doc);
            }
        }

        self.output.push('\n');
        if let Some(returns) = doc.and_then(DocBlock::returns) {
            let lines = python_lines(returns);
            if let Some((first, rest)) = lines.split_first() {
                let _ = write!(self.output, "{}:return: {}", Self::pad(2), first);
                self.write_continuation(rest);
            }
        }
        let _ = writeln!(self.output, "{}:rtype: {}", Self::pad(2), python_doc_type(&method.return_type));
    }

    fn write_params(&mut self, params: &[&Parameter], doc: &DocBlock) {
        for param in params {
            let Some(text) = doc.param(&param.name) else {
                continue;
            };
            let lines = python_lines(text);
            let Some((first, rest)) = lines.split_first() else {
                continue;
            };
            let ty = python_doc_type(&param.ty);
            let spaced = ty.contains(' ');
            if spaced {
                let _ = write!(self.output, "{}:param {}: {}", Self::pad(2), param.name, first);
            } else {
                let _ = write!(self.output, "{}:param {} {}: {}", Self::pad(2), ty, param.name, first);
            }
            self.write_continuation(rest);
            if spaced {
                let _ = writeln!(self.output, "{}:type {}: {}", Self::pad(2), param.name, ty);
            }
        }
    }

    /// Finish a field line, continuing it over `rest` with trailing backslashes.
    fn write_continuation(&mut self, rest: &[String]) {
        if rest.is_empty() {
            self.output.push('\n');
            return;
        }
        self.output.push_str(" \\\n");
        let last = rest.len() - 1;
        for (i, line) in rest.iter().enumerate() {
            let tail = if i < last { " \\" } else { "" };
            let _ = writeln!(self.output, "{}{}{}", Self::pad(3), line, tail);
        }
    }

    fn write_lines(&mut self, level: usize, text: &str) {
        let pad = Self::pad(level);
        for line in python_lines(text) {
            let _ = writeln!(self.output, "{}{}", pad, line);
        }
    }
}

/// Documentation lines with C# literals spelled the Python way.
fn python_lines(text: &str) -> Vec<String> {
    let text = text
        .replace("null ", "None ")
        .replace("true ", "True ")
        .replace("false ", "False ");
    text_lines(&text).map(str::to_string).collect()
}
