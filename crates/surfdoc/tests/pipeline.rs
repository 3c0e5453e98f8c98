use std::fs;
use std::path::{Path, PathBuf};

use surfdoc::config::TargetName;
use surfdoc::{Sources, SurfdocConfig, generate, run};
use tempfile::TempDir;

const CIRCLE_CS: &str = r#"
using System;

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

    /// <summary>Gets or sets the radius.</summary>
    public double Radius { get; set; }

    /// <summary>Finds the parameter on the circle closest to a point.</summary>
    /// <param name="testPoint">Point to project.</param>
    /// <param name="t">Parameter of the closest point.</param>
    /// <returns>true on success.</returns>
    public bool ClosestParameter(Point3d testPoint, out double t) { t = 0; return true; }

    /// <summary>The unit circle.</summary>
    public static Circle Unit() { return new Circle(Point3d.Origin, 1.0); }
  }
}
"#;

const CIRCLE_CPP: &str = r#"#include "bindings.h"

#if defined(ON_WASM_COMPILE)
void initCircleBindings(void*)
{
  class_<BND_Circle>("Circle")
    .constructor<ON_3dPoint, double>()
    .constructor<double>()
    .property("radius", &BND_Circle::Radius, &BND_Circle::SetRadius)
    .function("closestParameter", &BND_Circle::ClosestParameter)
    .class_function("unit", &BND_Circle::Unit)
    ;

  enum_<ON::object_type>("ObjectType")
    .value("Point", ON::point_object)
    .value("Curve", ON::curve_object)
    ;
}
#else
void initCircleBindings(pybind11::module& m)
{
  py::class_<BND_Circle>(m, "Circle")
    .def(py::init<ON_3dPoint, double>(), py::arg("center"), py::arg("radius"))
    .def_property("Radius", &BND_Circle::Radius, &BND_Circle::SetRadius)
    .def("ClosestParameter", &BND_Circle::ClosestParameter, py::arg("testPoint"))
    .def_static("Unit", &BND_Circle::Unit)
    ;
}
#endif
"#;

struct Fixture {
    _dir: TempDir,
    sources: Sources,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let reference = root.join("reference");
        let bindings = root.join("bindings");
        fs::create_dir_all(reference.join("obj")).unwrap();
        fs::create_dir_all(&bindings).unwrap();

        fs::write(reference.join("opennurbs_circle.cs"), CIRCLE_CS).unwrap();
        // Generated and build-output sources would not parse; both are skipped.
        fs::write(reference.join("AutoNativeMethods.cs"), "this is { not C#").unwrap();
        fs::write(reference.join("obj").join("Temp.cs"), "class {").unwrap();
        fs::write(bindings.join("bnd_circle.cpp"), CIRCLE_CPP).unwrap();

        Self {
            _dir: dir,
            sources: Sources {
                reference_root: reference,
                bindings_root: bindings,
            },
            root,
        }
    }

    fn output(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn relative(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_writes_every_artifact() {
    let fixture = Fixture::new();
    let out = fixture.output("out");
    let written = run(&SurfdocConfig::default(), &fixture.sources, &out).unwrap();
    assert_eq!(
        relative(&written, &out),
        vec![
            "javascript/rhino3dm.js",
            "javascript/rhino3dm.d.ts",
            "python/rst/conf.py",
            "python/rst/Circle.rst",
            "python/rst/index.rst",
            "python/stubs/rhino3dm.py",
            "python/stubs/rhino3dm/__init__.pyi",
        ]
    );
    for path in &written {
        assert!(path.is_file(), "{} missing", path.display());
    }
}

#[test]
fn test_runs_are_byte_identical() {
    let fixture = Fixture::new();
    let first = run(&SurfdocConfig::default(), &fixture.sources, &fixture.output("a")).unwrap();
    let second = run(&SurfdocConfig::default(), &fixture.sources, &fixture.output("b")).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap(), "{} differs", a.display());
    }
}

#[test]
fn test_declaration_file_contents() {
    let fixture = Fixture::new();
    let out = fixture.output("out");
    run(&SurfdocConfig::default(), &fixture.sources, &out).unwrap();
    let dts = fs::read_to_string(out.join("javascript/rhino3dm.d.ts")).unwrap();
    assert!(dts.contains("\tenum ObjectType {\n\t\tPoint,\n\t\tCurve\n\t}\n"));
    assert!(dts.contains("\t\tObjectType: typeof ObjectType\n\t\tCircle: typeof Circle;\n"));
    assert_eq!(dts.matches("constructor(").count(), 1);
    assert!(dts.contains("\t\tconstructor(center: number[], radius: number);\n"));
    assert!(dts.contains("\t\tradius: number;\n"));
    assert!(dts.contains("\t\tclosestParameter(testPoint:number[]): object;\n"));
    assert!(dts.contains("\t\tstatic unit(): Circle;\n"));
}

#[test]
fn test_python_outputs_resolve_members() {
    let fixture = Fixture::new();
    let out = fixture.output("out");
    run(&SurfdocConfig::default(), &fixture.sources, &out).unwrap();

    let page = fs::read_to_string(out.join("python/rst/Circle.rst")).unwrap();
    assert!(page.contains("   .. py:method:: Circle(center, radius)\n"));
    assert!(page.contains("      :param rhino3dm.Point3d center: Center point.\n"));
    assert!(page.contains("   .. py:attribute:: Radius\n\n      float: Gets or sets the radius.\n"));
    assert!(page.contains("      :return: True on success.\n      :rtype: bool\n"));

    let pyi = fs::read_to_string(out.join("python/stubs/rhino3dm/__init__.pyi")).unwrap();
    assert!(pyi.contains("    def __init__(self, center: Point3d, radius: float): ...\n"));
    assert!(pyi.contains("    def ClosestParameter(self, testPoint: Point3d) -> bool: ...\n"));

    let conf = fs::read_to_string(out.join("python/rst/conf.py")).unwrap();
    assert!(conf.contains("version = '8.0.0'"));
}

#[test]
fn test_emitter_selection() {
    let fixture = Fixture::new();
    let mut config = SurfdocConfig::default();
    config.output.emitters = vec!["pyi".to_string(), "jsdoc".to_string()];
    let artifacts = generate(&config, &fixture.sources).unwrap();
    let paths: Vec<String> = artifacts
        .iter()
        .map(|a| a.path.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(paths, vec!["python/stubs/rhino3dm/__init__.pyi", "javascript/rhino3dm.js"]);
}

#[test]
fn test_target_selects_runtime_emitters() {
    let fixture = Fixture::new();
    let mut config = SurfdocConfig::default();
    config.output.target = Some(TargetName::Javascript);
    let paths: Vec<String> = generate(&config, &fixture.sources)
        .unwrap()
        .iter()
        .map(|a| a.path.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(paths, vec!["javascript/rhino3dm.js", "javascript/rhino3dm.d.ts"]);

    config.output.target = Some(TargetName::Python);
    config.output.emitters = vec!["jsdoc".to_string(), "pyi".to_string()];
    let paths: Vec<String> = generate(&config, &fixture.sources)
        .unwrap()
        .iter()
        .map(|a| a.path.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(paths, vec!["python/stubs/rhino3dm/__init__.pyi"]);
}

#[test]
fn test_unknown_emitter_writes_nothing() {
    let fixture = Fixture::new();
    let out = fixture.output("out");
    let mut config = SurfdocConfig::default();
    config.output.emitters = vec!["markdown".to_string()];
    let err = run(&config, &fixture.sources, &out).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown emitter 'markdown'"));
    assert!(!out.exists());
}

#[test]
fn test_binding_error_is_fatal_with_location() {
    let fixture = Fixture::new();
    fs::write(
        fixture.sources.bindings_root.join("bnd_bad.cpp"),
        "class_<BND_Bad>(\"Bad\")\n  .function(reverse, &BND_Bad::Reverse)\n  ;\n",
    )
    .unwrap();
    let out = fixture.output("out");
    let err = run(&SurfdocConfig::default(), &fixture.sources, &out).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.starts_with("failed to extract bindings: "), "{message}");
    assert!(message.contains("bnd_bad.cpp:2: expected '\"'"), "{message}");
    assert!(!out.exists());
}

#[test]
fn test_reference_syntax_error_is_fatal() {
    let fixture = Fixture::new();
    fs::write(
        fixture.sources.reference_root.join("opennurbs_broken.cs"),
        "namespace Rhino { public class Broken { public void M( } }",
    )
    .unwrap();
    let err = generate(&SurfdocConfig::default(), &fixture.sources).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.starts_with("failed to extract reference model: "), "{message}");
    assert!(message.contains("opennurbs_broken.cs:1:"), "{message}");
}
