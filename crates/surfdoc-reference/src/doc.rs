//! XML documentation comments.

/// Tag of one documentation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag {
    Summary,
    Param(String),
    Returns,
    Remarks,
    Value,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub tag: DocTag,
    /// Inner text, trimmed. Interior line breaks are kept.
    pub text: String,
}

/// A parsed `///` documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Comment text with the `///` markers removed, one line per comment line.
    pub raw: String,
    pub entries: Vec<DocEntry>,
}

impl DocBlock {
    /// Parse the text of a documentation comment.
    ///
    /// Malformed XML degrades to a single summary entry holding the raw text.
    pub fn parse(raw: &str) -> Self {
        let entries = match parse_entries(raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "malformed documentation comment, keeping it as plain text");
                let text = raw.trim();
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![DocEntry {
                        tag: DocTag::Summary,
                        text: text.to_string(),
                    }]
                }
            }
        };
        Self {
            raw: raw.to_string(),
            entries,
        }
    }

    fn first(&self, wanted: impl Fn(&DocTag) -> bool) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| wanted(&e.tag))
            .map(|e| e.text.as_str())
    }

    pub fn summary(&self) -> Option<&str> {
        self.first(|t| *t == DocTag::Summary)
    }

    pub fn returns(&self) -> Option<&str> {
        self.first(|t| *t == DocTag::Returns)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.first(|t| matches!(t, DocTag::Param(p) if p == name))
    }
}

fn parse_entries(raw: &str) -> Result<Vec<DocEntry>, roxmltree::Error> {
    let wrapped = format!("<doc>{raw}</doc>");
    let document = roxmltree::Document::parse(&wrapped)?;
    let mut entries = Vec::new();
    for node in document.root_element().children().filter(|n| n.is_element()) {
        let tag = match node.tag_name().name() {
            "summary" => DocTag::Summary,
            "returns" => DocTag::Returns,
            "remarks" => DocTag::Remarks,
            "value" => DocTag::Value,
            "param" => DocTag::Param(node.attribute("name").unwrap_or_default().to_string()),
            other => DocTag::Other(other.to_string()),
        };
        let mut text = String::new();
        inner_text(node, &mut text);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        entries.push(DocEntry {
            tag,
            text: text.to_string(),
        });
    }
    Ok(entries)
}

fn inner_text(node: roxmltree::Node, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or_default());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "see" | "seealso" if !child.has_children() => {
                if let Some(cref) = child.attribute("cref") {
                    out.push_str(cref_name(cref));
                } else if let Some(word) = child.attribute("langword") {
                    out.push_str(word);
                }
            }
            "paramref" | "typeparamref" => {
                out.push_str(child.attribute("name").unwrap_or_default());
            }
            _ => inner_text(child, out),
        }
    }
}

/// Short name of a `cref` target: `M:Rhino.Geometry.Curve.Reverse()` → `Reverse`.
fn cref_name(cref: &str) -> &str {
    let target = match cref.split_once(':') {
        Some((prefix, rest)) if prefix.len() == 1 => rest,
        _ => cref,
    };
    let target = target.split('(').next().unwrap_or(target);
    target.rsplit('.').next().unwrap_or(target)
}
