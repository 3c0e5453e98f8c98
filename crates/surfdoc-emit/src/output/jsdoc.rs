//! JSDoc script-class stub.
//!
//! Mocks the WASM module as plain JavaScript classes so `jsdoc` can render
//! API help. jsdoc accepts a single constructor per class, so only the
//! first resolved constructor is written.

use std::fmt::Write;

use surfdoc_bindings::{ClassEntity, Dialect};
use surfdoc_reference::{DocBlock, Parameter};

use super::{one_line, text_lines};
use crate::traits::{Artifact, EmitContext, Emitter, Target};
use crate::typemap::translate;

/// Static instance of the JSDoc emitter for registry.
pub static JSDOC_EMITTER: JsDocEmitter = JsDocEmitter;

pub struct JsDocEmitter;

impl Emitter for JsDocEmitter {
    fn name(&self) -> &'static str {
        "jsdoc"
    }

    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
        let path = format!("javascript/{}.js", ctx.options.module);
        vec![Artifact::new(path, generate_jsdoc(ctx))]
    }
}

/// Render the stub for every JavaScript class.
pub fn generate_jsdoc(ctx: &EmitContext) -> String {
    let mut writer = JsDocWriter {
        ctx,
        output: String::new(),
    };
    for class in ctx.bindings.javascript_classes() {
        writer.write_class(class);
    }
    writer.output
}

struct JsDocWriter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
    output: String,
}

impl JsDocWriter<'_, '_> {
    fn write_class(&mut self, class: &ClassEntity) {
        let resolver = self.ctx.resolver;
        self.output.push_str("/**\n");
        match resolver.class(&class.name).and_then(|r| r.summary()) {
            Some(summary) => {
                for line in text_lines(summary) {
                    let _ = writeln!(self.output, " * {}", line);
                }
            }
            None => {
                let _ = writeln!(self.output, " * {}", class.name);
            }
        }
        if let Some(base) = class.base.as_deref().filter(|b| !b.is_empty()) {
            let _ = writeln!(self.output, " * @extends {}", base);
        }
        if class.constructors.is_empty() {
            self.output.push_str(" * @hideconstructor\n");
        }
        self.output.push_str(" */\n");
        let _ = writeln!(self.output, "class {} {{", class.name);

        if let Some(ctor) = resolver.first_constructor(class) {
            self.output.push_str("  /**\n");
            self.write_description(ctor.doc.as_ref());
            self.write_params(&ctor.params, ctor.doc.as_ref());
            self.output.push_str("   */\n");
            let _ = writeln!(self.output, "  constructor({}){{}}", param_list(&ctor.params));
        }

        for method in &class.methods {
            let resolved = resolver.method(Dialect::JavaScript, &class.name, method);
            let params = match resolved {
                Some(m) if m.doc.is_some() => {
                    self.output.push_str("  /**\n");
                    self.write_description(m.doc.as_ref());
                    self.write_params(&m.params, m.doc.as_ref());
                    if let Some(returns) = m.doc.as_ref().and_then(DocBlock::returns) {
                        let _ = writeln!(
                            self.output,
                            "   * @returns {{{}}} {}",
                            translate(&m.return_type).documented,
                            one_line(returns)
                        );
                    }
                    self.output.push_str("   */\n");
                    param_list(&m.params)
                }
                Some(m) => {
                    self.output.push_str("  /** ... */\n");
                    param_list(&m.params)
                }
                None => {
                    tracing::debug!(class = %class.name, method = %method.name, "unresolved javascript method");
                    self.output.push_str("  /** ... */\n");
                    String::new()
                }
            };
            let prefix = if method.is_static { "static " } else { "" };
            let _ = writeln!(self.output, "  {}{}({}) {{  }}", prefix, method.name, params);
        }

        for name in &class.properties {
            self.output.push_str("  /**\n");
            if let Some(prop) = resolver.property(&class.name, name) {
                self.write_description(prop.doc.as_ref());
                let _ = writeln!(self.output, "   * @type {{{}}}", translate(&prop.ty).documented);
            }
            self.output.push_str("   */\n");
            let _ = writeln!(self.output, "  get {}() {{ return null;}}", name);
        }
        self.output.push_str("}\n");
    }

    fn write_description(&mut self, doc: Option<&DocBlock>) {
        if let Some(summary) = doc.and_then(DocBlock::summary) {
            let _ = writeln!(self.output, "   * @description {}", one_line(summary));
        }
    }

    fn write_params(&mut self, params: &[Parameter], doc: Option<&DocBlock>) {
        for param in params.iter().filter(|p| !p.is_out()) {
            let text = doc.and_then(|d| d.param(&param.name)).map(one_line);
            let ty = translate(&param.ty).documented;
            match text {
                Some(text) => {
                    let _ = writeln!(self.output, "   * @param {{{}}} {} {}", ty, param.name, text);
                }
                None => {
                    let _ = writeln!(self.output, "   * @param {{{}}} {}", ty, param.name);
                }
            }
        }
    }
}

/// Comma-separated names of the caller-supplied parameters.
fn param_list(params: &[Parameter]) -> String {
    params
        .iter()
        .filter(|p| !p.is_out())
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EmitOptions;
    use surfdoc_bindings::{BindingSet, BoundMethod, Entity};
    use surfdoc_reference::{Constructor, Method, ParamModifier, Property, ReferenceModel};

    fn param(name: &str, ty: &str, modifier: ParamModifier) -> Parameter {
        Parameter {
            name: name.into(),
            ty: ty.into(),
            modifier,
        }
    }

    fn fixture() -> (ReferenceModel, BindingSet) {
        let mut model = ReferenceModel::new();
        let circle = model.entry("Rhino.Geometry.Circle");
        circle.doc = Some(DocBlock::parse("<summary>Represents a circle.</summary>"));
        for n in 1..=3 {
            circle.constructors.push(Constructor {
                params: (0..n).map(|i| param(&format!("a{i}"), "double", ParamModifier::None)).collect(),
                doc: Some(DocBlock::parse(&format!(
                    "<summary>Ctor {n}.</summary><param name=\"a0\">First.</param>"
                ))),
            });
        }
        circle.methods.push(Method {
            name: "ClosestParameter".into(),
            return_type: "bool".into(),
            params: vec![
                param("testPoint", "Point3d", ParamModifier::None),
                param("t", "double", ParamModifier::Out),
            ],
            is_static: false,
            doc: Some(DocBlock::parse(
                "<summary>Closest parameter.</summary><returns>true on success.</returns>",
            )),
        });
        circle.properties.push(Property {
            name: "Center".into(),
            ty: "Point3d".into(),
            is_static: false,
            doc: Some(DocBlock::parse("<summary>Center point.</summary>")),
        });

        let mut bindings = BindingSet::new();
        let mut js = ClassEntity::new("Circle");
        js.base = None;
        js.constructors = vec![
            vec!["double".into()],
            vec!["double".into(), "double".into()],
            vec!["double".into(), "double".into(), "double".into()],
        ];
        js.properties = vec!["center".into(), "diameter".into()];
        js.methods = vec![
            BoundMethod {
                name: "closestParameter".into(),
                is_static: false,
                native_symbol: String::new(),
                args: Vec::new(),
            },
            BoundMethod {
                name: "unknown".into(),
                is_static: true,
                native_symbol: String::new(),
                args: Vec::new(),
            },
        ];
        bindings.insert(Dialect::JavaScript, Entity::Class(js));
        let mut hidden_ctor = ClassEntity::new("BoundingBox");
        hidden_ctor.base = Some("GeometryBase".into());
        bindings.insert(Dialect::JavaScript, Entity::Class(hidden_ctor));
        (model, bindings)
    }

    #[test]
    fn test_single_constructor_block() {
        let (model, bindings) = fixture();
        let options = EmitOptions::default();
        let ctx = EmitContext::new(&model, &bindings, &options);
        let js = generate_jsdoc(&ctx);
        assert_eq!(js.matches("constructor(").count(), 1);
        assert!(js.contains("  constructor(a0){}\n"));
        assert!(js.contains("   * @description Ctor 1.\n"));
        assert!(js.contains("   * @param {number} a0 First.\n"));
    }

    #[test]
    fn test_class_header() {
        let (model, bindings) = fixture();
        let options = EmitOptions::default();
        let ctx = EmitContext::new(&model, &bindings, &options);
        let js = generate_jsdoc(&ctx);
        assert!(js.starts_with("/**\n * BoundingBox\n * @extends GeometryBase\n * @hideconstructor\n */\nclass BoundingBox {\n}\n"));
        assert!(js.contains("/**\n * Represents a circle.\n */\nclass Circle {\n"));
    }

    #[test]
    fn test_methods_and_properties() {
        let (model, bindings) = fixture();
        let options = EmitOptions::default();
        let ctx = EmitContext::new(&model, &bindings, &options);
        let js = generate_jsdoc(&ctx);
        assert!(js.contains("   * @param {Array.<x,y,z>} testPoint\n"));
        assert!(!js.contains("} t "));
        assert!(js.contains("   * @returns {boolean} true on success.\n"));
        assert!(js.contains("  closestParameter(testPoint) {  }\n"));
        assert!(js.contains("  /** ... */\n  static unknown() {  }\n"));
        assert!(js.contains("   * @description Center point.\n   * @type {Array.<x,y,z>}\n   */\n  get center() { return null;}\n"));
        assert!(js.contains("  /**\n   */\n  get diameter() { return null;}\n"));
    }

    #[test]
    fn test_artifact_path() {
        let (model, bindings) = fixture();
        let options = EmitOptions::default();
        let ctx = EmitContext::new(&model, &bindings, &options);
        let artifacts = JSDOC_EMITTER.emit(&ctx);
        assert_eq!(artifacts[0].path, std::path::Path::new("javascript/rhino3dm.js"));
    }
}
