//! Minimal representation of variant calls.
//!
//! String-level reduction only: shared flanking bases are removed from the
//! reference and alternate alleles, no reference genome is consulted.

use crate::models::GenomeVariant;

/// Bytes and bases shared by two allele walks, counted until they first differ.
fn shared_len<A, B>(a: A, b: B) -> (usize, usize)
where
    A: Iterator<Item = char>,
    B: Iterator<Item = char>,
{
    a.zip(b)
        .take_while(|(x, y)| x == y)
        .fold((0, 0), |(bytes, bases), (c, _)| (bytes + c.len_utf8(), bases + 1))
}

/// Common suffix of two alleles as `(bytes, bases)`.
fn common_suffix_len(a: &str, b: &str) -> (usize, usize) {
    shared_len(a.chars().rev(), b.chars().rev())
}

/// Common prefix of two alleles as `(bytes, bases)`.
fn common_prefix_len(a: &str, b: &str) -> (usize, usize) {
    shared_len(a.chars(), b.chars())
}

/// Reduce a raw call to its minimal representation.
///
/// 1. Trim the common suffix of `reference` and `alternate`
/// 2. Trim the common prefix of what remains, advancing `position` by the
///    number of bases removed
///
/// Trimming stops once either allele is empty, which is the canonical form
/// of a pure insertion or deletion. Callers must not pass identical alleles.
/// Alleles are compared per character, so any UTF-8 input is trimmed on
/// character boundaries.
///
/// # Arguments
/// * `contig` - Contig name, carried through unchanged
/// * `position` - 1-based position of the first reference base
/// * `reference` - Reference allele
/// * `alternate` - Alternate allele
pub fn canonicalize(contig: &str, position: u64, reference: &str, alternate: &str) -> GenomeVariant {
    let (right_trimmed, _) = common_suffix_len(reference, alternate);
    let reference = &reference[..reference.len() - right_trimmed];
    let alternate = &alternate[..alternate.len() - right_trimmed];

    let (left_trimmed, left_bases) = common_prefix_len(reference, alternate);

    GenomeVariant {
        contig: contig.to_string(),
        position: position + left_bases as u64,
        reference: reference[left_trimmed..].to_string(),
        alternate: alternate[left_trimmed..].to_string(),
    }
}
