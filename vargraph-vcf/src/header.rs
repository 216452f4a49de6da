///
/// One `##KEY=VALUE` meta line. `value` is kept verbatim.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MetaLine {
    pub key: String,
    pub value: String,
}

///
/// The `ID=..,Key="quoted, value"` pairs of a structured meta line such as
/// `##SAMPLE=<ID=S1,Tissue=Blood>`, in file order.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredMeta {
    pub fields: Vec<(String, String)>,
}

impl StructuredMeta {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl MetaLine {
    ///
    /// Parse the value as a structured `<...>` list. Commas inside double quotes
    /// do not split fields; surrounding quotes are removed from values.
    ///
    pub fn structured(&self) -> Option<StructuredMeta> {
        let inner = self.value.strip_prefix('<')?.strip_suffix('>')?;

        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in inner.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    push_field(&mut fields, &current);
                    current.clear();
                }
                _ => current.push(c),
            }
        }
        push_field(&mut fields, &current);

        Some(StructuredMeta { fields })
    }
}

fn push_field(fields: &mut Vec<(String, String)>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    match raw.split_once('=') {
        Some((k, v)) => fields.push((k.trim().to_string(), v.to_string())),
        None => fields.push((raw.trim().to_string(), String::new())),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VcfHeader {
    pub meta: Vec<MetaLine>,
    pub samples: Vec<String>,
}

impl VcfHeader {
    /// Meta lines with the given key, in file order.
    pub fn meta_lines<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a MetaLine> + 'a {
        self.meta.iter().filter(move |m| m.key == key)
    }

    /// Structured `##KEY=<...>` lines with the given key.
    pub fn structured_lines(&self, key: &str) -> Vec<StructuredMeta> {
        self.meta_lines(key).filter_map(|m| m.structured()).collect()
    }

    /// The `Description` of the `##INFO` line declaring `id`.
    pub fn info_description(&self, id: &str) -> Option<String> {
        self.structured_lines("INFO")
            .into_iter()
            .find(|s| s.get("ID") == Some(id))
            .and_then(|s| s.get("Description").map(|d| d.to_string()))
    }

    pub(crate) fn parse_meta_line(line: &str) -> Option<MetaLine> {
        let body = line.strip_prefix("##")?;
        let (key, value) = body.split_once('=')?;
        Some(MetaLine {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
