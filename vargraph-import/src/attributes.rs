//! Per-variant numeric attributes copied from the INFO column.

use vargraph_store::{Properties, PropertyValue};
use vargraph_vcf::Info;

use crate::error::{ImportError, Result};

/// 1000 Genomes phase 3 super-populations with a precomputed frequency.
pub const ONEKG_POPULATIONS: &[&str] = &["EAS", "EUR", "AFR", "AMR", "SAS"];

/// ExAC populations with allele counts and numbers.
pub const EXAC_POPULATIONS: &[&str] = &["AFR", "AMR", "EAS", "FIN", "NFE", "OTH", "SAS"];

pub const CONSERVATION_SCORES: &[&str] = &["GERP", "phastCons", "phyloP"];

fn parse_float(info: &Info, key: &str) -> Result<Option<f64>> {
    info.scalar(key)
        .map(|v| {
            v.parse::<f64>().map_err(|_| ImportError::MalformedAttribute {
                key: key.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

fn parse_int(info: &Info, key: &str) -> Result<Option<i64>> {
    info.scalar(key)
        .map(|v| {
            v.parse::<i64>().map_err(|_| ImportError::MalformedAttribute {
                key: key.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

///
/// Population allele frequencies. 1000 Genomes frequencies are copied; ExAC
/// frequencies are derived as `AC / AN`, only where `AN` exceeds
/// `min_allele_number`.
///
pub fn population_frequencies(info: &Info, min_allele_number: i64) -> Result<Properties> {
    let mut properties = Properties::new();

    for population in ONEKG_POPULATIONS {
        if let Some(af) = parse_float(info, &format!("onekGPhase3.{}_AF", population))? {
            properties.insert(
                format!("onekGPhase3_{}_AF", population),
                PropertyValue::Float(af),
            );
        }
    }

    for population in EXAC_POPULATIONS {
        let allele_number = parse_int(info, &format!("ExAC.AN_{}", population))?;
        let Some(allele_number) = allele_number.filter(|an| *an > min_allele_number) else {
            continue;
        };
        if let Some(allele_count) = parse_float(info, &format!("ExAC.AC_{}", population))? {
            properties.insert(
                format!("ExAC_{}_AF", population),
                PropertyValue::Float(allele_count / allele_number as f64),
            );
        }
    }

    Ok(properties)
}

/// GERP, phastCons and phyloP scores where present.
pub fn conservation_scores(info: &Info) -> Result<Properties> {
    let mut properties = Properties::new();
    for key in CONSERVATION_SCORES {
        if let Some(score) = parse_float(info, key)? {
            properties.insert(key.to_string(), PropertyValue::Float(score));
        }
    }
    Ok(properties)
}
