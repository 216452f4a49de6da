use fxhash::FxHashMap as HashMap;

use crate::genotype::Genotype;

/// Value meaning "absent" in VCF columns and INFO fields.
pub const MISSING_VALUE: &str = ".";

#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Flag,
    Single(String),
    /// Comma-separated values, e.g. one annotation per transcript.
    List(Vec<String>),
}

///
/// The INFO column of a record.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Info {
    values: HashMap<String, InfoValue>,
}

impl Info {
    pub fn parse(column: &str) -> Self {
        let mut values = HashMap::default();
        if column == MISSING_VALUE || column.is_empty() {
            return Info { values };
        }
        for entry in column.split(';') {
            match entry.split_once('=') {
                Some((key, value)) if value.contains(',') => {
                    let items = value.split(',').map(|v| v.to_string()).collect();
                    values.insert(key.to_string(), InfoValue::List(items));
                }
                Some((key, value)) => {
                    values.insert(key.to_string(), InfoValue::Single(value.to_string()));
                }
                None => {
                    values.insert(entry.to_string(), InfoValue::Flag);
                }
            }
        }
        Info { values }
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.values.get(key)
    }

    ///
    /// A single-valued attribute. The missing sentinel, flags and lists read as absent.
    ///
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(InfoValue::Single(v)) if v != MISSING_VALUE => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: &str, value: InfoValue) {
        self.values.insert(key.to_string(), value);
    }
}

///
/// One VCF data line.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VcfRecord {
    pub contig: String,
    /// 1-based position
    pub position: u64,
    pub id: Option<String>,
    pub reference: String,
    /// Empty when the ALT column is `.`
    pub alternates: Vec<String>,
    /// Empty when the FILTER column is `.`
    pub filters: Vec<String>,
    pub info: Info,
    pub genotypes: Vec<Genotype>,
}

impl VcfRecord {
    /// True when the record failed at least one filter.
    pub fn is_filtered(&self) -> bool {
        self.filters.iter().any(|f| f != "PASS")
    }

    /// True when the record has at least one alternate allele.
    pub fn is_variant(&self) -> bool {
        !self.alternates.is_empty()
    }

    /// Allele by GT index: 0 is the reference, 1.. the alternates.
    pub fn allele(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(self.reference.as_str()),
            i => self.alternates.get(i - 1).map(|a| a.as_str()),
        }
    }

    /// `contig pos REF[ALT,...]`, used in log and error messages.
    pub fn locus(&self) -> String {
        format!(
            "{} {} {}[{}]",
            self.contig,
            self.position,
            self.reference,
            self.alternates.join(", ")
        )
    }
}
