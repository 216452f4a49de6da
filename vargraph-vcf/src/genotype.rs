///
/// One sample's call at a record: the `GT` allele indices and the `GQ` score.
/// `None` in `alleles` is a no-call (`.`) allele.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Genotype {
    pub sample: String,
    pub alleles: Vec<Option<usize>>,
    pub phased: bool,
    pub quality: Option<i32>,
}

impl Genotype {
    ///
    /// Parse a `GT` value such as `0/1`, `1|2`, `./.` or `1`.
    /// Returns `None` when an allele is neither `.` nor an index.
    ///
    pub fn parse_gt(gt: &str) -> Option<(Vec<Option<usize>>, bool)> {
        let phased = gt.contains('|');
        let alleles = gt
            .split(['/', '|'])
            .map(|a| match a {
                "." => Some(None),
                _ => a.parse::<usize>().ok().map(Some),
            })
            .collect::<Option<Vec<_>>>()?;
        Some((alleles, phased))
    }

    pub fn ploidy(&self) -> usize {
        self.alleles.len()
    }

    /// Every allele is uncalled (including a missing GT).
    pub fn is_no_call(&self) -> bool {
        self.alleles.iter().all(|a| a.is_none())
    }

    /// Every allele is called and is the reference.
    pub fn is_hom_ref(&self) -> bool {
        !self.alleles.is_empty() && self.alleles.iter().all(|a| *a == Some(0))
    }

    /// Some alleles are called and some are not, e.g. `0/.`.
    pub fn is_mixed(&self) -> bool {
        self.alleles.iter().any(|a| a.is_none()) && self.alleles.iter().any(|a| a.is_some())
    }

    /// The genotype as written in the file, e.g. `1/2`.
    pub fn gt_string(&self) -> String {
        let sep = if self.phased { "|" } else { "/" };
        self.alleles
            .iter()
            .map(|a| a.map_or(".".to_string(), |i| i.to_string()))
            .collect::<Vec<_>>()
            .join(sep)
    }
}
