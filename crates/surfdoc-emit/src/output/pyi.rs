//! Python type-hint stubs (`__init__.pyi`).

use std::fmt::Write;

use surfdoc_bindings::{ClassEntity, Dialect};
use surfdoc_reference::Parameter;

use super::python_name;
use crate::order::by_inheritance;
use crate::traits::{Artifact, EmitContext, Emitter, Target};
use crate::typemap::python_hint_type;

/// Static instance of the type-hint emitter for registry.
pub static PYI_EMITTER: PyiEmitter = PyiEmitter;

pub struct PyiEmitter;

impl Emitter for PyiEmitter {
    fn name(&self) -> &'static str {
        "pyi"
    }

    fn target(&self) -> Target {
        Target::Python
    }

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
        let path = format!("python/stubs/{}/__init__.pyi", ctx.options.module);
        vec![Artifact::new(path, generate_pyi(ctx))]
    }
}

pub fn generate_pyi(ctx: &EmitContext) -> String {
    let mut output = String::from("from typing import Tuple, Set, Iterable, List\n");
    for class in by_inheritance(ctx.bindings.python_classes()) {
        output.push('\n');
        let body = class_body(ctx, class);
        if body.is_empty() {
            let _ = writeln!(output, "class {}: ...", class.name);
        } else {
            let _ = writeln!(output, "class {}:", class.name);
            output.push_str(&body);
        }
    }
    output.push('\n');
    output
}

/// Resolved members of `class`; empty when nothing resolves.
fn class_body(ctx: &EmitContext, class: &ClassEntity) -> String {
    let resolver = ctx.resolver;
    let mut body = String::new();

    if let Some(ctor) = resolver.first_constructor(class) {
        let _ = writeln!(body, "    def __init__({}): ...", typed_args(false, &ctor.params));
    }

    for name in &class.properties {
        if let Some(prop) = resolver.property(&class.name, name) {
            body.push_str("    @property\n");
            let _ = writeln!(body, "    def {}(self) -> {}: ...", name, python_hint_type(&prop.ty));
        }
    }

    for bound in &class.methods {
        let Some(method) = resolver.method(Dialect::Python, &class.name, bound) else {
            continue;
        };
        if bound.is_static {
            body.push_str("    @staticmethod\n");
        }
        let _ = writeln!(
            body,
            "    def {}({}) -> {}: ...",
            bound.name,
            typed_args(bound.is_static, &method.params),
            python_hint_type(&method.return_type)
        );
    }
    body
}

fn typed_args(is_static: bool, params: &[Parameter]) -> String {
    let receiver = (!is_static).then(|| "self".to_string());
    let typed = params
        .iter()
        .filter(|p| !p.is_out())
        .map(|p| format!("{}: {}", python_name(&p.name), python_hint_type(&p.ty)));
    receiver.into_iter().chain(typed).collect::<Vec<_>>().join(", ")
}
