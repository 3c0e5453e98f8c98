//! Python skeleton module with Google-style docstrings.

use std::fmt::Write;

use surfdoc_bindings::{BoundMethod, ClassEntity, Dialect};
use surfdoc_reference::{DocBlock, Parameter};

use super::{python_name, text_lines};
use crate::order::by_inheritance;
use crate::traits::{Artifact, EmitContext, Emitter, Target};
use crate::typemap::python_doc_type;

const INDENT: &str = "    ";
const PLACEHOLDER: &str = "\"\"\" ... \"\"\"";

/// Static instance of the Python skeleton emitter for registry.
pub static PYTHON_EMITTER: PythonEmitter = PythonEmitter;

pub struct PythonEmitter;

impl Emitter for PythonEmitter {
    fn name(&self) -> &'static str {
        "python"
    }

    fn target(&self) -> Target {
        Target::Python
    }

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
        let path = format!("python/stubs/{}.py", ctx.options.module);
        vec![Artifact::new(path, generate_python(ctx))]
    }
}

/// Render one class per Python binding, base classes first.
pub fn generate_python(ctx: &EmitContext) -> String {
    let mut writer = PythonWriter {
        ctx,
        output: String::new(),
    };
    for class in by_inheritance(ctx.bindings.python_classes()) {
        writer.write_class(class);
    }
    writer.output
}

struct PythonWriter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
    output: String,
}

fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

impl PythonWriter<'_, '_> {
    fn write_class(&mut self, class: &ClassEntity) {
        let resolver = self.ctx.resolver;
        match class.base.as_deref().filter(|b| !b.is_empty()) {
            Some(base) => {
                let _ = writeln!(self.output, "class {}({}):", class.name, base);
            }
            None => {
                let _ = writeln!(self.output, "class {}:", class.name);
            }
        }
        match resolver.class(&class.name).and_then(|r| r.doc.as_ref()) {
            Some(doc) => self.write_docstring(1, doc, &[], None),
            None => {
                let _ = writeln!(self.output, "{}{}", pad(1), PLACEHOLDER);
            }
        }

        if let Some(ctor) = resolver.first_constructor(class) {
            let names = ctor.params.iter().filter(|p| !p.is_out()).map(|p| python_name(&p.name));
            let _ = writeln!(self.output, "{}def __init__({}):", pad(1), arg_list(false, names));
            if let Some(doc) = &ctor.doc {
                self.write_docstring(2, doc, &ctor.params, None);
            }
            let _ = writeln!(self.output, "{}pass", pad(2));
        }

        for bound in &class.methods {
            self.write_method(class, bound);
        }

        for name in &class.properties {
            let _ = writeln!(self.output, "{}@property", pad(1));
            let _ = writeln!(self.output, "{}def {}(self):", pad(1), name);
            match resolver.property(&class.name, name).and_then(|p| p.doc.as_ref()) {
                Some(doc) => self.write_docstring(2, doc, &[], None),
                None => {
                    let _ = writeln!(self.output, "{}{}", pad(2), PLACEHOLDER);
                }
            }
            let _ = writeln!(self.output, "{}return None", pad(2));
            self.output.push('\n');
        }
        self.output.push('\n');
    }

    fn write_method(&mut self, class: &ClassEntity, bound: &BoundMethod) {
        if bound.is_static {
            let _ = writeln!(self.output, "{}@staticmethod", pad(1));
        }
        match self.ctx.resolver.method(Dialect::Python, &class.name, bound) {
            Some(method) => {
                let names = method.inputs().map(|p| python_name(&p.name));
                let _ = writeln!(
                    self.output,
                    "{}def {}({}):",
                    pad(1),
                    bound.name,
                    arg_list(bound.is_static, names)
                );
                if let Some(doc) = &method.doc {
                    self.write_docstring(2, doc, &method.params, Some(method.return_type.as_str()));
                }
            }
            None => {
                let names = bound.args.iter().map(String::as_str).map(python_name);
                let _ = writeln!(
                    self.output,
                    "{}def {}({}):",
                    pad(1),
                    bound.name,
                    arg_list(bound.is_static, names)
                );
                let _ = writeln!(self.output, "{}{}", pad(2), PLACEHOLDER);
            }
        }
        let _ = writeln!(self.output, "{}pass", pad(2));
        self.output.push('\n');
    }

    /// Docstring with summary, `Args:`, `Returns:`, then `out` parameters.
    fn write_docstring(&mut self, level: usize, doc: &DocBlock, params: &[Parameter], return_type: Option<&str>) {
        let _ = writeln!(self.output, "{}\"\"\"", pad(level));
        if let Some(summary) = doc.summary() {
            for line in text_lines(summary) {
                let _ = writeln!(self.output, "{}{}", pad(level), line);
            }
        }

        let mut inputs = documented(params, doc, false).peekable();
        if inputs.peek().is_some() {
            let _ = writeln!(self.output, "\n{}Args:", pad(level));
            for (param, text) in inputs {
                self.write_described(level + 1, param, text);
            }
        }

        if let Some((ty, returns)) = return_type.zip(doc.returns()) {
            let _ = writeln!(self.output, "\n{}Returns:", pad(level));
            for (i, line) in text_lines(returns).enumerate() {
                if i == 0 {
                    let _ = writeln!(self.output, "{}{}: {}", pad(level + 1), python_doc_type(ty), line);
                } else {
                    let _ = writeln!(self.output, "{}{}", pad(level + 1), line);
                }
            }
        }

        for (param, text) in documented(params, doc, true) {
            self.write_described(level + 1, param, text);
        }
        let _ = writeln!(self.output, "{}\"\"\"", pad(level));
    }

    fn write_described(&mut self, level: usize, param: &Parameter, text: &str) {
        for (i, line) in text_lines(text).enumerate() {
            if i == 0 {
                let _ = writeln!(
                    self.output,
                    "{}{} ({}): {}",
                    pad(level),
                    python_name(&param.name),
                    python_doc_type(&param.ty),
                    line
                );
            } else {
                let _ = writeln!(self.output, "{}{}", pad(level + 1), line);
            }
        }
    }
}

/// Parameters with a `<param>` entry, either the inputs or the `out` ones.
fn documented<'d>(
    params: &'d [Parameter],
    doc: &'d DocBlock,
    out: bool,
) -> impl Iterator<Item = (&'d Parameter, &'d str)> + 'd {
    params
        .iter()
        .filter(move |p| p.is_out() == out)
        .filter_map(move |p| doc.param(&p.name).map(|text| (p, text)))
}

fn arg_list<'n>(is_static: bool, names: impl Iterator<Item = &'n str>) -> String {
    let receiver: Option<&'n str> = (!is_static).then_some("self");
    receiver.into_iter().chain(names).collect::<Vec<_>>().join(", ")
}
