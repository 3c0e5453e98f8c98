//! Line-oriented scanner over registration sources.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BindingError;
use crate::line::{self, Dialect, Expected, Line, classify};
use crate::model::{BindingSet, BoundMethod, ClassEntity, Entity, EnumEntity};

/// Which files hold registration code.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["cpp".into()],
            skip_dirs: vec!["obj".into()],
        }
    }
}

/// Prefix of names that are registered for internal use only.
const HIDDEN_PREFIX: &str = "__";

/// The declaration member lines are currently attributed to.
#[derive(Debug)]
enum Cursor {
    Idle,
    Active { dialect: Dialect, entity: Entity },
}

/// Scanner state. The cursor carries over from one file to the next.
#[derive(Debug)]
pub struct Scanner {
    set: BindingSet,
    cursor: Cursor,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            set: BindingSet::new(),
            cursor: Cursor::Idle,
        }
    }

    /// Scan one file's contents. `path` is used for diagnostics.
    pub fn scan_source(&mut self, path: &Path, source: &str) -> Result<(), BindingError> {
        for (index, raw) in source.lines().enumerate() {
            let text = raw.trim();
            let missing = |Expected(expected): Expected| BindingError::MissingDelimiter {
                path: path.to_path_buf(),
                line: index + 1,
                expected,
            };
            match classify(text) {
                Line::ClassOpen(dialect) => {
                    let name = line::first_quoted(text).map_err(missing)?;
                    let base = line::base_class(dialect, text).map_err(missing)?;
                    let mut class = ClassEntity::new(name);
                    class.base = base.map(str::to_string);
                    self.open(path, index + 1, dialect, Entity::Class(class))?;
                }
                Line::EnumOpen => {
                    let name = line::first_quoted(text).map_err(missing)?;
                    let entity = Entity::Enum(EnumEntity {
                        name: name.to_string(),
                        values: Vec::new(),
                    });
                    self.open(path, index + 1, Dialect::JavaScript, entity)?;
                }
                Line::Terminator => self.close(),
                Line::Operator | Line::Other => {}
                member => {
                    if let Cursor::Active { entity, .. } = &mut self.cursor {
                        apply_member(entity, member, text).map_err(missing)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn open(
        &mut self,
        path: &Path,
        line: usize,
        dialect: Dialect,
        entity: Entity,
    ) -> Result<(), BindingError> {
        self.close();
        if entity.name().starts_with(HIDDEN_PREFIX) {
            tracing::debug!(name = entity.name(), "skipping hidden declaration");
            return Ok(());
        }
        if self.set.contains(dialect, &entity) {
            return Err(BindingError::Duplicate {
                path: path.to_path_buf(),
                line,
                registry: BindingSet::registry_name(dialect, &entity),
                name: entity.name().to_string(),
            });
        }
        self.cursor = Cursor::Active { dialect, entity };
        Ok(())
    }

    fn close(&mut self) {
        if let Cursor::Active { dialect, entity } = std::mem::replace(&mut self.cursor, Cursor::Idle) {
            self.set.insert(dialect, entity);
        }
    }

    /// Register the declaration still open, if any, and return the registries.
    pub fn finish(mut self) -> BindingSet {
        self.close();
        self.set
    }
}

fn apply_member(entity: &mut Entity, line: Line, text: &str) -> Result<(), Expected> {
    match entity {
        Entity::Class(class) => match line {
            Line::Constructor => class.constructors.push(line::constructor_types(text)?),
            Line::Property => class.properties.push(line::first_quoted(text)?.to_string()),
            Line::Method { is_static } => class.methods.push(BoundMethod {
                name: line::first_quoted(text)?.to_string(),
                is_static,
                native_symbol: line::native_symbol(text)?.to_string(),
                args: line::arg_names(text)?.into_iter().map(str::to_string).collect(),
            }),
            _ => {}
        },
        Entity::Enum(e) => {
            if line == Line::Value {
                e.values.push(line::first_quoted(text)?.to_string());
            }
        }
    }
    Ok(())
}

/// Scan every registration source under `root`, in sorted path order.
pub fn scan_dir(root: &Path, options: &ScanOptions) -> Result<BindingSet, BindingError> {
    let mut scanner = Scanner::new();
    for path in source_files(root, options)? {
        let source = std::fs::read_to_string(&path).map_err(|source| BindingError::Io {
            path: path.clone(),
            source,
        })?;
        scanner.scan_source(&path, &source)?;
        tracing::info!(path = %path.display(), "scanned binding source");
    }
    Ok(scanner.finish())
}

fn source_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, BindingError> {
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
    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let is_source = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| options.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if is_source {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Result<BindingSet, BindingError> {
        let mut scanner = Scanner::new();
        scanner.scan_source(Path::new("bnd_test.cpp"), source)?;
        Ok(scanner.finish())
    }

    const ARC: &str = r#"
  class_<BND_Arc, base<BND_GeometryBase>>("Arc")
    .constructor<ON_3dPoint, double, double>()
    .property("radius", &BND_Arc::Radius, &BND_Arc::SetRadius)
    .function("pointAt", &BND_Arc::PointAt)
    .class_function("createFromPoints", &BND_Arc::CreateFromPoints)
    ;

  py::class_<BND_Arc, BND_GeometryBase>(m, "Arc")
    .def(py::init<ON_3dPoint, double, double>(), py::arg("center"), py::arg("radius"), py::arg("angle"))
    .def_property("Radius", &BND_Arc::Radius, &BND_Arc::SetRadius)
    .def("PointAt", &BND_Arc::PointAt, py::arg("t"))
    .def(py::self == py::self)
    .def_static("CreateFromPoints", &BND_Arc::CreateFromPoints, py::arg("a"), py::arg("b"))
    ;
"#;

    #[test]
    fn test_scan_both_dialects() {
        let set = scan(ARC).unwrap();
        let js = set.javascript_class("arc").unwrap();
        assert_eq!(js.base.as_deref(), Some("GeometryBase"));
        assert_eq!(js.constructors, vec![vec!["Point3d", "double", "double"]]);
        assert_eq!(js.properties, vec!["radius"]);
        assert_eq!(js.methods.len(), 2);
        assert_eq!(js.methods[0].native_symbol, "&BND_Arc::PointAt");
        assert!(js.methods[1].is_static);
        assert!(js.methods[0].args.is_empty());

        let py = set.python_class("Arc").unwrap();
        assert_eq!(py.base.as_deref(), Some("GeometryBase"));
        assert_eq!(py.properties, vec!["Radius"]);
        let names: Vec<&str> = py.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["PointAt", "CreateFromPoints"]);
        assert_eq!(py.methods[0].args, vec!["t"]);
        assert_eq!(py.methods[1].args, vec!["a", "b"]);
    }

    #[test]
    fn test_hidden_declaration_members_not_registered() {
        let set = scan(
            r#"
class_<BND_Arc>("Arc")
  .function("length", &BND_Arc::Length)
  ;
class_<BND_Internal>("__Internal")
  .function("Foo", &BND_Internal::Foo)
  ;
"#,
        )
        .unwrap();
        assert!(set.javascript_class("__Internal").is_none());
        assert!(set.python_class("__Internal").is_none());
        let arc = set.javascript_class("Arc").unwrap();
        assert!(arc.methods.iter().all(|m| m.name != "Foo"));
        assert_eq!(set.javascript_classes().count(), 1);
        for class in set.javascript_classes().chain(set.python_classes()) {
            assert!(class.methods.iter().all(|m| m.name != "Foo"));
        }
    }

    #[test]
    fn test_enum_values_and_member_lines_ignored() {
        let set = scan(
            r#"
enum_<ON::object_type>("ObjectType")
  .value("None", ON::object_type::unknown_object_type)
  .value("Point", ON::object_type::point_object)
  .function("ignored", &Ignored)
  .value("Curve", ON::object_type::curve_object)
  ;
"#,
        )
        .unwrap();
        let e = set.enumeration("objecttype").unwrap();
        assert_eq!(e.values, vec!["None", "Point", "Curve"]);
        assert!(set.javascript_class("ObjectType").is_none());
    }

    #[test]
    fn test_cursor_persists_across_files() {
        let mut scanner = Scanner::new();
        scanner
            .scan_source(Path::new("a.cpp"), "class_<BND_Brep>(\"Brep\")\n")
            .unwrap();
        scanner
            .scan_source(Path::new("b.cpp"), "  .function(\"faces\", &BND_Brep::Faces)\n  ;\n")
            .unwrap();
        let set = scanner.finish();
        assert_eq!(set.javascript_class("Brep").unwrap().methods.len(), 1);
    }

    #[test]
    fn test_lines_outside_declarations_ignored() {
        let set = scan(".function(\"orphan\", &Orphan)\n.property(noquote)\n").unwrap();
        assert_eq!(set.javascript_classes().count(), 0);
    }

    #[test]
    fn test_missing_quote_is_fatal() {
        let err = scan("class_<BND_Arc>(\"Arc\")\n  .function(pointAt, &BND_Arc::PointAt)\n").unwrap_err();
        match err {
            BindingError::MissingDelimiter { line, expected, .. } => {
                assert_eq!(line, 2);
                assert_eq!(expected, "'\"'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_angle_is_fatal() {
        let err = scan("class_<BND_Arc>(\"Arc\")\n  .constructor<double, double()\n").unwrap_err();
        assert!(err.to_string().contains("bnd_test.cpp:2"));
    }

    #[test]
    fn test_duplicate_in_one_registry_is_fatal() {
        let err = scan("class_<BND_Arc>(\"Arc\")\n;\nclass_<BND_Arc2>(\"ARC\")\n;\n").unwrap_err();
        assert!(matches!(err, BindingError::Duplicate { line: 3, registry: "javascript", .. }));
    }

    #[test]
    fn test_scan_dir_sorted_and_skips_obj() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("obj")).unwrap();
        std::fs::write(root.join("b.cpp"), "class_<BND_Sphere>(\"Sphere\")\n;\n").unwrap();
        std::fs::write(root.join("a.cpp"), "class_<BND_Brep>(\"brep\")\n;\n").unwrap();
        std::fs::write(root.join("c.cpp"), "class_<BND_Arc>(\"Arc\")\n;\n").unwrap();
        std::fs::write(root.join("obj").join("d.cpp"), "class_<BND_Box>(\"Box\")\n;\n").unwrap();
        std::fs::write(root.join("e.h"), "class_<BND_Plane>(\"Plane\")\n;\n").unwrap();

        let set = scan_dir(root, &ScanOptions::default()).unwrap();
        let names: Vec<&str> = set.javascript_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Arc", "brep", "Sphere"]);
    }
}
