//! Line classification and field extraction for registration code.
//!
//! [`classify`] only looks at markers. The extraction helpers pull the
//! quoted names, type lists and native symbols out of a line once the
//! scanner knows it needs them; each reports the delimiter it was missing.

/// Binding dialect of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// embind: `class_<…>("Name")`
    JavaScript,
    /// pybind11: `py::class_<…>(m, "Name")`
    Python,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::JavaScript => "javascript",
            Dialect::Python => "python",
        }
    }
}

/// What a trimmed registration line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    ClassOpen(Dialect),
    EnumOpen,
    /// `.constructor<…>` or `py::init<…>`
    Constructor,
    Property,
    /// Operator registration via `py::self`.
    Operator,
    Method { is_static: bool },
    /// `.value("…")` of an enum.
    Value,
    /// A line starting with `;` closes the current declaration.
    Terminator,
    Other,
}

pub(crate) const QUOTE: &str = "'\"'";
pub(crate) const ANGLE: &str = "'>'";
pub(crate) const SYMBOL_END: &str = "',' or ')'";

const EMBIND_CLASS: &str = "class_";
const PYBIND_CLASS: &str = "py::class_";
const EMBIND_ENUM: &str = "enum_";
const EMBIND_CTOR: &str = ".constructor";
const PYBIND_INIT: &str = "py::init<";
const EMBIND_BASE: &str = "base<BND_";
const NATIVE_PREFIX: &str = "BND_";
const PY_ARG: &str = "py::arg";

/// Classify one registration line. The first matching rule wins.
pub fn classify(line: &str) -> Line {
    let line = line.trim();
    if line.starts_with(EMBIND_CLASS) {
        return Line::ClassOpen(Dialect::JavaScript);
    }
    if line.starts_with(PYBIND_CLASS) {
        return Line::ClassOpen(Dialect::Python);
    }
    if line.starts_with(EMBIND_ENUM) {
        return Line::EnumOpen;
    }
    if line.starts_with(EMBIND_CTOR) || line.contains(PYBIND_INIT) {
        return Line::Constructor;
    }
    if line.starts_with(".property") || line.starts_with(".def_property") {
        return Line::Property;
    }
    if line.contains("py::self") {
        return Line::Operator;
    }
    if line.starts_with(".function") || line.starts_with(".def(") {
        return Line::Method { is_static: false };
    }
    if line.starts_with(".class_function") || line.starts_with(".def_static") {
        return Line::Method { is_static: true };
    }
    if line.starts_with(".value") {
        return Line::Value;
    }
    if line.starts_with(';') {
        return Line::Terminator;
    }
    Line::Other
}

/// Delimiter missing from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected(pub &'static str);

/// Contents of the first double-quoted literal.
pub fn first_quoted(line: &str) -> Result<&str, Expected> {
    quoted_from(line, 0)
}

fn quoted_from(line: &str, from: usize) -> Result<&str, Expected> {
    let start = line[from..].find('"').ok_or(Expected(QUOTE))? + from + 1;
    let len = line[start..].find('"').ok_or(Expected(QUOTE))?;
    Ok(&line[start..start + len])
}

/// Base class named in a class declaration, without its native prefix.
pub fn base_class(dialect: Dialect, line: &str) -> Result<Option<&str>, Expected> {
    match dialect {
        Dialect::JavaScript => {
            let Some(at) = line.find(EMBIND_BASE) else {
                return Ok(None);
            };
            let start = at + EMBIND_BASE.len();
            let len = line[start..].find('>').ok_or(Expected(ANGLE))?;
            Ok(Some(&line[start..start + len]))
        }
        Dialect::Python => {
            let Some(comma) = line.find(',') else {
                return Ok(None);
            };
            let Some(at) = line[comma..].find(NATIVE_PREFIX) else {
                return Ok(None);
            };
            let start = comma + at + NATIVE_PREFIX.len();
            Ok(line[start..].find('>').map(|len| &line[start..start + len]))
        }
    }
}

/// Normalized parameter types of a constructor line.
///
/// `py::init<>()` yields an empty list.
pub fn constructor_types(line: &str) -> Result<Vec<String>, Expected> {
    let start = match line.find(PYBIND_INIT) {
        Some(at) if !line.starts_with(EMBIND_CTOR) => at + PYBIND_INIT.len(),
        _ => line.find('<').ok_or(Expected("'<'"))? + 1,
    };
    let len = line[start..].find('>').ok_or(Expected(ANGLE))?;
    let types = line[start..start + len].trim();
    if types.is_empty() {
        return Ok(Vec::new());
    }
    Ok(types.split(',').map(|t| normalize_type(t.trim())).collect())
}

fn normalize_type(token: &str) -> String {
    match token {
        "ON_3dPoint" => "Point3d".to_string(),
        "ON_3dVector" => "Vector3d".to_string(),
        other => other.to_string(),
    }
}

/// Native function a method is bound to: from the first `&` up to the
/// next `,`, else the next `)`. Empty when the line has no `&`.
pub fn native_symbol(line: &str) -> Result<&str, Expected> {
    let Some(start) = line.find('&') else {
        return Ok("");
    };
    let rest = &line[start..];
    let end = rest
        .find(',')
        .or_else(|| rest.find(')'))
        .ok_or(Expected(SYMBOL_END))?;
    Ok(rest[..end].trim())
}

/// Argument names declared with `py::arg("…")`, in order.
pub fn arg_names(line: &str) -> Result<Vec<&str>, Expected> {
    let mut names = Vec::new();
    let mut from = 0;
    while let Some(at) = line[from..].find(PY_ARG) {
        let marker = from + at;
        names.push(quoted_from(line, marker)?);
        from = marker + PY_ARG.len();
    }
    Ok(names)
}
