//! Reference type names translated into each target vocabulary.
//!
//! Every vocabulary runs the same rules, in order: exact table, escape
//! hatch, array suffix, generic sequence, namespace strip, pass-through.
//! Element types of arrays and sequences are translated recursively.

/// How a vocabulary removes namespace qualifiers.
#[derive(Clone, Copy)]
enum Strip {
    /// Remove the first matching prefix.
    Prefixes(&'static [&'static str]),
    /// Keep only the segment after the last `.`.
    LastSegment,
}

/// Which generic wrappers are read as sequences.
#[derive(Clone, Copy)]
enum Sequences {
    /// `IEnumerable<T>` and its qualified spelling.
    Enumerable,
    /// Any `Name<…>`.
    AnyGeneric,
}

struct Vocabulary {
    exact: &'static [(&'static str, &'static str)],
    escape: &'static [&'static str],
    escape_to: &'static str,
    array: fn(String) -> String,
    sequences: Sequences,
    sequence: fn(String) -> String,
    strip: Strip,
}

const GEOMETRY_QUALIFIERS: &[&str] = &[
    "Rhino.Geometry.",
    "Rhino.DocObjects.",
    "Rhino.",
    "Geometry.",
    "DocObjects.",
];

impl Vocabulary {
    fn map(&self, ty: &str) -> String {
        let ty = ty.trim();
        if let Some((_, mapped)) = self.exact.iter().find(|(from, _)| *from == ty) {
            return (*mapped).to_string();
        }
        if self.escape.contains(&ty) {
            return self.escape_to.to_string();
        }
        if let Some(element) = ty.strip_suffix("[]") {
            return (self.array)(self.map(element));
        }
        if let Some(element) = self.sequence_element(ty) {
            return (self.sequence)(self.map(element));
        }
        if let Some(stripped) = self.strip(ty) {
            return self.map(stripped);
        }
        ty.to_string()
    }

    fn sequence_element<'t>(&self, ty: &'t str) -> Option<&'t str> {
        match self.sequences {
            Sequences::Enumerable => ty
                .strip_prefix("System.Collections.Generic.")
                .unwrap_or(ty)
                .strip_prefix("IEnumerable<")?
                .strip_suffix('>'),
            Sequences::AnyGeneric => {
                let open = ty.find('<')?;
                ty[open + 1..].strip_suffix('>')
            }
        }
    }

    fn strip<'t>(&self, ty: &'t str) -> Option<&'t str> {
        match self.strip {
            Strip::Prefixes(prefixes) => prefixes.iter().find_map(|p| ty.strip_prefix(p)),
            Strip::LastSegment => ty.rsplit_once('.').map(|(_, last)| last),
        }
    }
}

const SCRIPT_DOC: Vocabulary = Vocabulary {
    exact: &[
        ("Point3d", "Array.<x,y,z>"),
        ("Vector3d", "Array.<x,y,z>"),
        ("Point3f", "Array.<x,y,z>"),
        ("Vector3f", "Array.<x,y,z>"),
        ("Point2d", "Array.<x,y>"),
        ("Vector2d", "Array.<x,y>"),
        ("Point2f", "Array.<x,y>"),
        ("double", "number"),
        ("float", "number"),
        ("int", "number"),
        ("uint", "number"),
        ("short", "number"),
        ("ushort", "number"),
        ("long", "number"),
        ("ulong", "number"),
        ("byte", "number"),
        ("bool", "boolean"),
        ("Guid", "string"),
        ("System.Guid", "string"),
    ],
    escape: &["object", "dynamic", "MeshFace", "MeshingParameterTextureRange"],
    escape_to: "*",
    array: |element| format!("{element}[]"),
    sequences: Sequences::Enumerable,
    sequence: |element| format!("{element}[]"),
    strip: Strip::Prefixes(GEOMETRY_QUALIFIERS),
};

const DECLARED: Vocabulary = Vocabulary {
    exact: &[
        ("Point3d", "number[]"),
        ("Vector3d", "number[]"),
        ("Point3f", "number[]"),
        ("Vector3f", "number[]"),
        ("Point2d", "number[]"),
        ("Vector2d", "number[]"),
        ("Interval", "number[]"),
        ("Color", "number[]"),
        ("System.Drawing.Color", "number[]"),
        ("System.Drawing.Rectangle", "number[]"),
        ("Color[]", "number[][]"),
        ("Vector3d[]", "any[]"),
        ("MeshingParameterTextureRange", "number"),
        ("System.Collections.Generic.IEnumerable<Point3d>", "Point3dList"),
        ("bool", "boolean"),
        ("double", "number"),
        ("float", "number"),
        ("int", "number"),
        ("uint", "number"),
        ("short", "number"),
        ("ushort", "number"),
        ("long", "number"),
        ("ulong", "number"),
        ("byte", "number"),
        ("Guid", "string"),
        ("System.Guid", "string"),
        ("string", "string"),
        ("object", "any"),
    ],
    escape: &["MeshFace", "dynamic"],
    escape_to: "any",
    array: |element| format!("{element}[]"),
    sequences: Sequences::Enumerable,
    sequence: |element| format!("{element}[]"),
    strip: Strip::Prefixes(GEOMETRY_QUALIFIERS),
};

/// Classes documented under the `rhino3dm` Python module.
const PYTHON_MODULE_CLASSES: &[(&str, &str)] = &[
    ("BezierCurve", "rhino3dm.BezierCurve"),
    ("BoundingBox", "rhino3dm.BoundingBox"),
    ("Box", "rhino3dm.Box"),
    ("Brep", "rhino3dm.Brep"),
    ("BrepEdge", "rhino3dm.BrepEdge"),
    ("BrepFace", "rhino3dm.BrepFace"),
    ("Curve", "rhino3dm.Curve"),
    ("GeometryBase", "rhino3dm.GeometryBase"),
    ("Interval", "rhino3dm.Interval"),
    ("Mesh", "rhino3dm.Mesh"),
    ("MeshingParameters", "rhino3dm.MeshingParameters"),
    ("NurbsCurve", "rhino3dm.NurbsCurve"),
    ("Plane", "rhino3dm.Plane"),
    ("Point2d", "rhino3dm.Point2d"),
    ("Point3d", "rhino3dm.Point3d"),
    ("Polyline", "rhino3dm.Polyline"),
    ("Sphere", "rhino3dm.Sphere"),
    ("Surface", "rhino3dm.Surface"),
    ("Vector3d", "rhino3dm.Vector3d"),
    ("double", "float"),
    ("string", "str"),
    ("String", "str"),
];

const PYTHON_DOC: Vocabulary = Vocabulary {
    exact: PYTHON_MODULE_CLASSES,
    escape: &[],
    escape_to: "",
    array: |element| format!("{element}[]"),
    sequences: Sequences::Enumerable,
    sequence: |element| format!("list[{element}]"),
    strip: Strip::Prefixes(GEOMETRY_QUALIFIERS),
};

const PYTHON_HINT: Vocabulary = Vocabulary {
    exact: &[
        ("double", "float"),
        ("float", "float"),
        ("string", "str"),
        ("void", "None"),
        ("Color", "Tuple[int, int, int, int]"),
        ("System.Drawing.Color", "Tuple[int, int, int, int]"),
    ],
    escape: &[],
    escape_to: "",
    array: |element| format!("List[{element}]"),
    sequences: Sequences::AnyGeneric,
    sequence: |element| format!("Iterable[{element}]"),
    strip: Strip::LastSegment,
};

/// JSDoc prose type for a reference type.
pub fn script_doc_type(ty: &str) -> String {
    SCRIPT_DOC.map(ty)
}

/// TypeScript declared type for a reference type.
pub fn declared_type(ty: &str) -> String {
    DECLARED.map(ty)
}

/// reStructuredText prose type for a reference type.
pub fn python_doc_type(ty: &str) -> String {
    PYTHON_DOC.map(ty)
}

/// Python type-hint annotation for a reference type.
pub fn python_hint_type(ty: &str) -> String {
    PYTHON_HINT.map(ty)
}

/// Script-target spellings of one reference type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    pub declared: String,
    pub documented: String,
}

pub fn translate(ty: &str) -> TypeMapping {
    TypeMapping {
        declared: declared_type(ty),
        documented: script_doc_type(ty),
    }
}
