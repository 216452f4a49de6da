use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use vargraph_core::GenomeVariant;

use crate::error::Result;

const FILE_FORMAT: &str = "##fileformat=VCFv4.1";
const COLUMN_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

///
/// Write `variants` as a minimal VCF: one line per variant with `.` for
/// ID, QUAL, FILTER and INFO. Alleles are written as-is, so a canonical
/// insertion or deletion has an empty REF or ALT column.
///
pub fn write_variants<'a, W, I>(writer: &mut W, variants: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a GenomeVariant>,
{
    writeln!(writer, "{}", FILE_FORMAT)?;
    writeln!(writer, "{}", COLUMN_HEADER)?;
    for variant in variants {
        writeln!(
            writer,
            "{}\t{}\t.\t{}\t{}\t.\t.\t.",
            variant.contig, variant.position, variant.reference, variant.alternate
        )?;
    }
    Ok(())
}

pub fn write_variants_to_path<'a, I>(path: &Path, variants: I) -> Result<()>
where
    I: IntoIterator<Item = &'a GenomeVariant>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_variants(&mut writer, variants)?;
    writer.flush()?;
    Ok(())
}
