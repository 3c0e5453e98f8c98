//! Tree-sitter based C# reference extractor.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

use crate::doc::DocBlock;
use crate::error::ReferenceError;
use crate::model::{Constructor, Method, ParamModifier, Parameter, Property, ReferenceModel};
use crate::preproc;

/// Which files are part of the reference corpus, and how to read them.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub extensions: Vec<String>,
    /// Files whose name starts with this prefix (any case) are generated and skipped.
    pub generated_prefix: String,
    pub skip_dirs: Vec<String>,
    /// Symbols treated as defined when evaluating `#if` regions.
    pub defined_symbols: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["cs".into()],
            generated_prefix: "auto".into(),
            skip_dirs: vec!["obj".into(), "bin".into()],
            defined_symbols: Vec::new(),
        }
    }
}

/// Parse every reference source under `root` into one model.
pub fn extract_dir(root: &Path, options: &ExtractOptions) -> Result<ReferenceModel, ReferenceError> {
    let mut model = ReferenceModel::new();
    for path in source_files(root, options)? {
        let source = std::fs::read_to_string(&path).map_err(|source| ReferenceError::Io {
            path: path.clone(),
            source,
        })?;
        extract_source(&mut model, &path, &source, &options.defined_symbols)?;
        tracing::info!(path = %path.display(), "parsed reference source");
    }
    Ok(model)
}

fn source_files(root: &Path, options: &ExtractOptions) -> Result<Vec<PathBuf>, ReferenceError> {
    let prefix = options.generated_prefix.to_lowercase();
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !options
                    .skip_dirs
                    .iter()
                    .any(|d| entry.file_name().to_string_lossy() == d.as_str())
        });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| options.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if !matches_ext {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !prefix.is_empty() && name.starts_with(&prefix) {
            tracing::debug!(path = %path.display(), "skipping generated source");
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

/// Parse one C# source file and add its public surface to `model`.
///
/// `path` is only used for diagnostics.
pub fn extract_source(
    model: &mut ReferenceModel,
    path: &Path,
    source: &str,
    defined_symbols: &[String],
) -> Result<(), ReferenceError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_c_sharp::language().into())
        .map_err(|err| ReferenceError::Grammar(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReferenceError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).unwrap_or(root).start_position();
        return Err(ReferenceError::Syntax {
            path: path.to_path_buf(),
            line: at.row + 1,
            column: at.column + 1,
        });
    }

    let ctx = ExtractContext {
        source,
        defined: defined_symbols,
    };
    ctx.walk(root, &Scope::default(), model);
    Ok(())
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// Enclosing namespace and innermost class of a declaration.
#[derive(Debug, Clone, Default)]
struct Scope {
    namespace: String,
    class: Option<String>,
}

fn join(outer: &str, name: &str) -> String {
    if outer.is_empty() {
        name.to_string()
    } else {
        format!("{outer}.{name}")
    }
}

impl Scope {
    fn enter_namespace(&self, name: &str) -> Scope {
        Scope {
            namespace: join(&self.namespace, name),
            class: None,
        }
    }

    fn enter_class(&self, name: &str) -> Scope {
        let outer = self.class.as_deref().unwrap_or(&self.namespace);
        Scope {
            namespace: self.namespace.clone(),
            class: Some(join(outer, name)),
        }
    }
}

struct ExtractContext<'a> {
    source: &'a str,
    defined: &'a [String],
}

impl<'a> ExtractContext<'a> {
    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field_text(&self, node: Node, field: &str) -> &'a str {
        node.child_by_field_name(field)
            .map(|n| self.node_text(n))
            .unwrap_or("")
    }

    fn walk(&self, node: Node, scope: &Scope, model: &mut ReferenceModel) {
        match node.kind() {
            "namespace_declaration" => {
                let inner = scope.enter_namespace(self.field_text(node, "name"));
                match node.child_by_field_name("body") {
                    Some(body) => self.walk_children(body, &inner, model),
                    None => self.walk_children(node, &inner, model),
                }
            }
            // The enclosing loop in walk_children has already switched scope.
            "file_scoped_namespace_declaration" => self.walk_children(node, scope, model),
            "class_declaration" | "struct_declaration" | "record_declaration" => {
                self.walk_type(node, scope, model)
            }
            "interface_declaration" | "enum_declaration" | "delegate_declaration" => {}
            "constructor_declaration" | "method_declaration" | "property_declaration" => {
                self.member(node, scope, model)
            }
            "preproc_if" | "preproc_elif" => self.walk_conditional(node, scope, model),
            _ => self.walk_children(node, scope, model),
        }
    }

    fn walk_children(&self, node: Node, scope: &Scope, model: &mut ReferenceModel) {
        let mut current = scope.clone();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "file_scoped_namespace_declaration" {
                current = current.enter_namespace(self.field_text(child, "name"));
            }
            self.walk(child, &current, model);
        }
    }

    fn walk_type(&self, node: Node, scope: &Scope, model: &mut ReferenceModel) {
        let name = self.field_text(node, "name");
        if name.is_empty() {
            return;
        }
        let inner = scope.enter_class(name);
        let Some(qualified) = inner.class.as_deref() else {
            return;
        };
        model.entry(qualified).set_doc_if_empty(self.leading_doc(node));
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body, &inner, model);
        } else {
            self.walk_children(node, &inner, model);
        }
    }

    /// Walk the active branch of an `#if` / `#elif` region.
    ///
    /// A condition that can't be evaluated keeps both branches.
    fn walk_conditional(&self, node: Node, scope: &Scope, model: &mut ReferenceModel) {
        let condition = node.child_by_field_name("condition");
        let alternative = node.child_by_field_name("alternative");
        let active = condition.and_then(|c| preproc::evaluate(self.node_text(c), self.defined));
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if condition.is_some_and(|c| c.id() == child.id()) {
                continue;
            }
            let in_alternative = alternative.is_some_and(|a| a.id() == child.id());
            let walk = if in_alternative {
                active != Some(true)
            } else {
                active != Some(false)
            };
            if walk {
                self.walk(child, scope, model);
            }
        }
    }

    fn member(&self, node: Node, scope: &Scope, model: &mut ReferenceModel) {
        let Some(class) = scope.class.as_deref() else {
            return;
        };
        let modifiers = self.modifiers(node);
        if !modifiers.contains(&"public") {
            return;
        }
        let is_static = modifiers.contains(&"static");
        let doc = self.leading_doc(node);
        match node.kind() {
            "constructor_declaration" => {
                let params = self.parameters(node);
                model.entry(class).constructors.push(Constructor { params, doc });
            }
            "method_declaration" => {
                let name = self.field_text(node, "name");
                let params = self.parameters(node);
                let refs = params.iter().filter(|p| p.modifier == ParamModifier::Ref).count();
                let outs = params.iter().filter(|p| p.is_out()).count();
                if refs > 0 || outs >= 2 {
                    tracing::debug!(class, method = name, refs, outs, "skipping method");
                    return;
                }
                let return_type = node
                    .child_by_field_name("returns")
                    .or_else(|| node.child_by_field_name("type"))
                    .map(|n| self.node_text(n))
                    .unwrap_or("void");
                model.entry(class).methods.push(Method {
                    name: name.to_string(),
                    return_type: return_type.to_string(),
                    params,
                    is_static,
                    doc,
                });
            }
            _ => {
                model.entry(class).properties.push(Property {
                    name: self.field_text(node, "name").to_string(),
                    ty: self.field_text(node, "type").to_string(),
                    is_static,
                    doc,
                });
            }
        }
    }

    fn modifiers(&self, node: Node) -> Vec<&'a str> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| c.kind() == "modifier")
            .map(|c| self.node_text(c).trim())
            .collect()
    }

    /// Parameters in declaration order.
    ///
    /// A `params` array has no `parameter` node of its own: its `type` and
    /// `name` are fields of the list itself.
    fn parameters(&self, node: Node) -> Vec<Parameter> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut params = Vec::new();
        let mut pending_type: Option<Node> = None;
        let mut cursor = list.walk();
        if !cursor.goto_first_child() {
            return params;
        }
        loop {
            let child = cursor.node();
            match (child.kind(), cursor.field_name()) {
                ("parameter", _) => params.push(self.parameter(child)),
                ("parameter_array", _) => params.push(Parameter {
                    modifier: ParamModifier::Params,
                    ..self.parameter(child)
                }),
                (_, Some("type")) => pending_type = Some(child),
                (_, Some("name")) => params.push(Parameter {
                    name: self.node_text(child).to_string(),
                    ty: pending_type
                        .take()
                        .map(|t| self.node_text(t))
                        .unwrap_or("")
                        .to_string(),
                    modifier: ParamModifier::Params,
                }),
                _ => {}
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        params
    }

    fn parameter(&self, node: Node) -> Parameter {
        let name = node.child_by_field_name("name");
        let mut ty = node.child_by_field_name("type");
        let mut modifier = ParamModifier::None;

        // Older grammars fold `ref` into the type.
        if let Some(t) = ty.filter(|t| t.kind() == "ref_type") {
            modifier = ParamModifier::Ref;
            ty = t.child_by_field_name("type").or(ty);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let is_field = [name, ty].iter().flatten().any(|n| n.id() == child.id());
            if is_field {
                continue;
            }
            if let Some(m) = ParamModifier::from_keyword(self.node_text(child).trim()) {
                modifier = m;
            }
        }

        Parameter {
            name: name.map(|n| self.node_text(n)).unwrap_or("").to_string(),
            ty: ty.map(|n| self.node_text(n)).unwrap_or("").to_string(),
            modifier,
        }
    }

    /// The first contiguous run of `///` lines directly preceding `node`.
    fn leading_doc(&self, node: Node) -> Option<DocBlock> {
        let mut comments = Vec::new();
        let mut prev = node.prev_sibling();
        while let Some(p) = prev {
            if p.kind() != "comment" {
                break;
            }
            comments.push(self.node_text(p).trim());
            prev = p.prev_sibling();
        }
        comments.reverse();

        let lines: Vec<&str> = comments
            .iter()
            .skip_while(|c| !c.starts_with("///"))
            .take_while(|c| c.starts_with("///"))
            .map(|c| &c[3..])
            .collect();
        if lines.is_empty() {
            return None;
        }
        Some(DocBlock::parse(&lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> ReferenceModel {
        extract_with(source, &[])
    }

    fn extract_with(source: &str, defined: &[&str]) -> ReferenceModel {
        let defined: Vec<String> = defined.iter().map(|s| s.to_string()).collect();
        let mut model = ReferenceModel::new();
        extract_source(&mut model, Path::new("test.cs"), source, &defined).unwrap();
        model
    }

    const CIRCLE: &str = r#"
namespace Rhino.Geometry
{
  /// <summary>
  /// Represents a circle in 3D.
  /// </summary>
  public struct Circle
  {
    /// <summary>Initializes a circle with center and radius.</summary>
    /// <param name="center">Center point.</param>
    /// <param name="radius">Radius.</param>
    public Circle(Point3d center, double radius) { }

    public Circle(double radius) { }

    internal Circle(int unused) { }

    /// <summary>Gets or sets the radius.</summary>
    public double Radius { get; set; }

    /// <summary>Finds the parameter on the circle closest to a point.</summary>
    /// <returns>true on success.</returns>
    public bool ClosestParameter(Point3d testPoint, out double t) { t = 0; return true; }

    public bool TwoOuts(out double a, out double b) { a = 0; b = 0; return true; }

    public void ByRef(ref Point3d point) { }

    private void Hidden() { }

    public static Circle Unit() { return new Circle(1.0); }
  }
}
"#;

    #[test]
    fn test_public_members_only() {
        let model = extract(CIRCLE);
        let circle = model.class("Circle").unwrap();
        assert_eq!(circle.qualified_name, "Rhino.Geometry.Circle");
        assert_eq!(circle.constructors.len(), 2);
        assert_eq!(circle.properties.len(), 1);
        assert_eq!(circle.properties[0].name, "Radius");
        assert_eq!(circle.properties[0].ty, "double");
        let names: Vec<&str> = circle.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ClosestParameter", "Unit"]);
    }

    #[test]
    fn test_ref_and_multiple_out_methods_skipped() {
        let model = extract(CIRCLE);
        let circle = model.class("Circle").unwrap();
        assert!(circle.methods_named("TwoOuts").next().is_none());
        assert!(circle.methods_named("ByRef").next().is_none());
        let closest = circle.methods_named("closestparameter").next().unwrap();
        assert_eq!(closest.params.len(), 2);
        assert!(closest.params[1].is_out());
        assert_eq!(closest.params[1].ty, "double");
        assert_eq!(closest.return_type, "bool");
    }

    #[test]
    fn test_params_array_kept_in_order() {
        let model = extract(
            r#"
namespace Rhino.Geometry
{
  public class Polyline
  {
    public Polyline(params Point3d[] points) { }

    public static Polyline F(int a, params double[] w) { return null; }

    public static Polyline Create(System.Collections.Generic.IEnumerable<Point3d> pts, params double[] w) { return null; }
  }
}
"#,
        );
        let polyline = model.class("Polyline").unwrap();

        let ctor = &polyline.constructors[0];
        assert_eq!(ctor.params.len(), 1);
        assert_eq!(ctor.params[0].name, "points");
        assert_eq!(ctor.params[0].ty, "Point3d[]");
        assert_eq!(ctor.params[0].modifier, ParamModifier::Params);

        let f = polyline.methods_named("F").next().unwrap();
        let names: Vec<&str> = f.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "w"]);
        assert_eq!(f.params[0].ty, "int");
        assert_eq!(f.params[0].modifier, ParamModifier::None);
        assert_eq!(f.params[1].ty, "double[]");
        assert_eq!(f.params[1].modifier, ParamModifier::Params);
        assert_eq!(f.input_count(), 2);

        let create = polyline.methods_named("Create").next().unwrap();
        assert_eq!(create.params.len(), 2);
        assert_eq!(create.params[1].name, "w");
    }

    #[test]
    fn test_docs_attached() {
        let model = extract(CIRCLE);
        let circle = model.class("Circle").unwrap();
        assert_eq!(circle.summary(), Some("Represents a circle in 3D."));
        let ctor = &circle.constructors[0];
        assert_eq!(ctor.params[0].name, "center");
        assert_eq!(ctor.params[0].ty, "Point3d");
        let doc = ctor.doc.as_ref().unwrap();
        assert_eq!(doc.param("radius"), Some("Radius."));
        assert!(circle.constructors[1].doc.is_none());
        let unit = circle.methods_named("Unit").next().unwrap();
        assert!(unit.is_static);
        assert!(unit.doc.is_none());
    }

    #[test]
    fn test_nested_class_owns_its_members() {
        let model = extract(
            r#"
namespace Rhino.Geometry
{
  public class Mesh
  {
    public class MeshFaceList
    {
      public int Count { get; }
    }
    public int VertexCount { get; }
  }
}
"#,
        );
        let mesh = model.class("Mesh").unwrap();
        assert_eq!(mesh.properties.len(), 1);
        assert_eq!(mesh.properties[0].name, "VertexCount");
        let faces = model.class("MeshFaceList").unwrap();
        assert_eq!(faces.qualified_name, "Rhino.Geometry.Mesh.MeshFaceList");
        assert_eq!(faces.properties[0].name, "Count");
    }

    #[test]
    fn test_partial_classes_merge() {
        let mut model = ReferenceModel::new();
        let a = "namespace N { /// <summary>First.</summary>\npublic partial class Brep { public int A { get; } } }";
        let b = "namespace N { /// <summary>Second.</summary>\npublic partial class Brep { public int B { get; } } }";
        extract_source(&mut model, Path::new("a.cs"), a, &[]).unwrap();
        extract_source(&mut model, Path::new("b.cs"), b, &[]).unwrap();
        let brep = model.class("brep").unwrap();
        assert_eq!(brep.properties.len(), 2);
        assert_eq!(brep.summary(), Some("First."));
    }

    #[test]
    fn test_conditional_regions() {
        let source = r#"
namespace N
{
  public class Arc
  {
#if RHINO_SDK
    public int SdkOnly { get; }
#else
    public int Portable { get; }
#endif
  }
}
"#;
        let plain = extract(source);
        let names: Vec<&str> = plain.class("Arc").unwrap().properties.iter().map(|p| p.name.as_str()).collect();
        assert!(!names.contains(&"SdkOnly"));

        let sdk = extract_with(source, &["RHINO_SDK"]);
        let names: Vec<&str> = sdk.class("Arc").unwrap().properties.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"SdkOnly"));
        assert!(!names.contains(&"Portable"));
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let mut model = ReferenceModel::new();
        let err = extract_source(
            &mut model,
            Path::new("broken.cs"),
            "namespace N { public class { }",
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::Syntax { .. }));
        assert!(err.to_string().starts_with("broken.cs:"));
    }

    #[test]
    fn test_extract_dir_skips_generated_and_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("obj")).unwrap();
        std::fs::write(root.join("rhino3dm.cs"), "namespace N { public class Arc { public int A { get; } } }").unwrap();
        std::fs::write(root.join("AutoNative.cs"), "namespace N { public class Generated { } }").unwrap();
        std::fs::write(root.join("obj").join("x.cs"), "namespace N { public class Built { } }").unwrap();
        std::fs::write(root.join("notes.txt"), "not c#").unwrap();

        let model = extract_dir(root, &ExtractOptions::default()).unwrap();
        assert!(model.class("Arc").is_some());
        assert!(model.class("Generated").is_none());
        assert!(model.class("Built").is_none());
        assert_eq!(model.len(), 1);
    }
}
