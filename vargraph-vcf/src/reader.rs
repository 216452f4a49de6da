use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, VcfError};
use crate::genotype::Genotype;
use crate::header::VcfHeader;
use crate::record::{Info, MISSING_VALUE, VcfRecord};

const FIXED_COLUMNS: usize = 8;

///
/// Single-pass reader over a VCF stream. The header is parsed on construction;
/// records are produced lazily by the iterator.
///
pub struct VcfReader {
    reader: Box<dyn BufRead>,
    header: VcfHeader,
    line_num: usize,
    line_buf: String,
}

impl VcfReader {
    ///
    /// Open a VCF file, reading it as gzip when the extension is `.gz` or `.bgz`.
    ///
    pub fn from_path(path: &Path) -> Result<Self> {
        let is_gzipped = matches!(
            path.extension().and_then(OsStr::to_str),
            Some("gz") | Some("bgz")
        );
        let file = File::open(path)?;
        let file: Box<dyn Read> = match is_gzipped {
            true => Box::new(MultiGzDecoder::new(file)),
            false => Box::new(file),
        };
        Self::new(Box::new(BufReader::with_capacity(256 * 1024, file)))
    }

    pub fn new(reader: Box<dyn BufRead>) -> Result<Self> {
        let mut vcf = VcfReader {
            reader,
            header: VcfHeader::default(),
            line_num: 0,
            line_buf: String::new(),
        };
        vcf.read_header()?;
        Ok(vcf)
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line_buf.clear();
        let bytes = self.reader.read_line(&mut self.line_buf)?;
        if bytes == 0 {
            return Ok(false);
        }
        self.line_num += 1;
        let trimmed_len = self.line_buf.trim_end_matches(['\n', '\r']).len();
        self.line_buf.truncate(trimmed_len);
        Ok(true)
    }

    fn read_header(&mut self) -> Result<()> {
        while self.read_line()? {
            let line = self.line_buf.as_str();
            if let Some(meta) = VcfHeader::parse_meta_line(line) {
                self.header.meta.push(meta);
            } else if line.starts_with("#CHROM") {
                self.header.samples = line
                    .split('\t')
                    .skip(FIXED_COLUMNS + 1)
                    .map(|s| s.to_string())
                    .collect();
                return Ok(());
            } else if line.starts_with("##") || line.is_empty() {
                continue;
            } else {
                return Err(VcfError::MissingHeader);
            }
        }
        Err(VcfError::MissingHeader)
    }

    fn parse_record(&self) -> Result<VcfRecord> {
        let line = self.line_buf.as_str();
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < FIXED_COLUMNS {
            return Err(VcfError::TruncatedRecord {
                line: self.line_num,
                expected: FIXED_COLUMNS,
                found: fields.len(),
            });
        }

        let position = fields[1]
            .parse::<u64>()
            .map_err(|_| VcfError::InvalidPosition {
                line: self.line_num,
                value: fields[1].to_string(),
            })?;

        let id = match fields[2] {
            MISSING_VALUE | "" => None,
            id => Some(id.to_string()),
        };

        let alternates = match fields[4] {
            MISSING_VALUE => Vec::new(),
            alts => alts.split(',').map(|a| a.to_string()).collect(),
        };

        let filters = match fields[6] {
            MISSING_VALUE | "" => Vec::new(),
            f => f.split(';').map(|s| s.to_string()).collect(),
        };

        let genotypes = if fields.len() > FIXED_COLUMNS {
            self.parse_genotypes(fields[FIXED_COLUMNS], &fields[FIXED_COLUMNS + 1..])?
        } else {
            Vec::new()
        };

        Ok(VcfRecord {
            contig: fields[0].to_string(),
            position,
            id,
            reference: fields[3].to_string(),
            alternates,
            filters,
            info: Info::parse(fields[7]),
            genotypes,
        })
    }

    fn parse_genotypes(&self, format: &str, columns: &[&str]) -> Result<Vec<Genotype>> {
        if columns.len() != self.header.samples.len() {
            return Err(VcfError::SampleCountMismatch {
                line: self.line_num,
                expected: self.header.samples.len(),
                found: columns.len(),
            });
        }

        let keys: Vec<&str> = format.split(':').collect();
        let gt_idx = keys.iter().position(|k| *k == "GT");
        let gq_idx = keys.iter().position(|k| *k == "GQ");

        let mut genotypes = Vec::with_capacity(columns.len());
        for (sample, column) in self.header.samples.iter().zip(columns) {
            let values: Vec<&str> = column.split(':').collect();
            let invalid = || VcfError::InvalidGenotype {
                line: self.line_num,
                sample: sample.clone(),
                value: column.to_string(),
            };

            let (alleles, phased) = match gt_idx.and_then(|i| values.get(i)) {
                Some(gt) => Genotype::parse_gt(gt).ok_or_else(invalid)?,
                None => (Vec::new(), false),
            };

            let quality = match gq_idx.and_then(|i| values.get(i)) {
                None | Some(&MISSING_VALUE) => None,
                Some(gq) => Some(gq.parse::<f64>().map_err(|_| invalid())?.round() as i32),
            };

            genotypes.push(Genotype {
                sample: sample.clone(),
                alleles,
                phased,
                quality,
            });
        }

        Ok(genotypes)
    }
}

impl Iterator for VcfReader {
    type Item = Result<VcfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_line() {
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
                Ok(true) => {
                    if self.line_buf.is_empty() || self.line_buf.starts_with('#') {
                        continue;
                    }
                    return Some(self.parse_record());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    fn reader(text: &str) -> Result<VcfReader> {
        VcfReader::new(Box::new(Cursor::new(text.as_bytes().to_vec())))
    }

    #[rstest]
    fn test_reads_header_and_records() {
        let vcf = "##fileformat=VCFv4.1\n\
                   ##SAMPLE=<ID=S1,Tissue=Blood>\n\
                   #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
                   1\t100\trs1\tG\tA,C\t50\tPASS\tGERP=1.5\tGT:GQ\t1/2:99\t./.:.\n";
        let mut reader = reader(vcf).unwrap();
        assert_eq!(reader.header().samples, vec!["S1", "S2"]);
        assert_eq!(reader.header().meta.len(), 2);

        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.contig, "1");
        assert_eq!(record.position, 100);
        assert_eq!(record.id.as_deref(), Some("rs1"));
        assert_eq!(record.alternates, vec!["A", "C"]);
        assert_eq!(record.allele(2), Some("C"));
        assert_eq!(record.info.scalar("GERP"), Some("1.5"));

        assert_eq!(record.genotypes.len(), 2);
        assert_eq!(record.genotypes[0].alleles, vec![Some(1), Some(2)]);
        assert_eq!(record.genotypes[0].quality, Some(99));
        assert!(record.genotypes[1].is_no_call());
        assert_eq!(record.genotypes[1].quality, None);

        assert!(reader.next().is_none());
    }

    #[rstest]
    fn test_missing_alt_and_empty_alleles() {
        let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                   1\t100\t.\tG\t.\t.\t.\t.\n\
                   1\t101\t.\tT\t\t.\t.\t.\n";
        let records: Vec<VcfRecord> = reader(vcf).unwrap().map(|r| r.unwrap()).collect();

        assert!(!records[0].is_variant());
        assert_eq!(records[0].id, None);
        assert_eq!(records[1].alternates, vec![""]);
    }

    #[rstest]
    fn test_missing_header_is_an_error() {
        let result = reader("1\t100\t.\tG\tA\t.\t.\t.\n");
        assert!(matches!(result, Err(VcfError::MissingHeader)));
    }

    #[rstest]
    fn test_bad_position() {
        let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\tabc\t.\tG\tA\t.\t.\t.\n";
        let result = reader(vcf).unwrap().next().unwrap();
        assert!(matches!(result, Err(VcfError::InvalidPosition { line: 2, .. })));
    }

    #[rstest]
    fn test_sample_count_mismatch() {
        let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
                   1\t100\t.\tG\tA\t.\t.\t.\tGT\t0/1\t1/1\n";
        let result = reader(vcf).unwrap().next().unwrap();
        assert!(matches!(
            result,
            Err(VcfError::SampleCountMismatch { expected: 1, found: 2, .. })
        ));
    }
}
