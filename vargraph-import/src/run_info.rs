//! Sample and run metadata carried in `##SAMPLE=<...>` header lines.

use vargraph_store::{Properties, PropertyValue};
use vargraph_vcf::{StructuredMeta, VcfHeader};

use crate::consts::SAMPLE_META_KEY;
use crate::error::{ImportError, Result};

///
/// One sequencing/analysis run of one sample.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub sample_id: String,
    pub tissue: Option<String>,
    pub worklist_id: String,
    pub seq_id: String,
    pub assay: Option<String>,
    pub pipeline_name: Option<String>,
    pub pipeline_version: Option<i64>,
    pub remote_bam_path: Option<String>,
    pub remote_vcf_path: Option<String>,
}

impl RunInfo {
    pub fn from_meta(meta: &StructuredMeta) -> Result<Self> {
        let required = |key: &str| {
            meta.get(key)
                .map(|v| v.to_string())
                .ok_or_else(|| ImportError::MalformedRunInfo(format!("missing {}", key)))
        };
        let optional = |key: &str| meta.get(key).map(|v| v.to_string());

        let pipeline_version = match meta.get("PipelineVersion") {
            Some(v) => Some(v.parse::<i64>().map_err(|_| {
                ImportError::MalformedRunInfo(format!("PipelineVersion '{}' is not an integer", v))
            })?),
            None => None,
        };

        Ok(RunInfo {
            sample_id: required("ID")?,
            tissue: optional("Tissue"),
            worklist_id: required("WorklistId")?,
            seq_id: required("SeqId")?,
            assay: optional("Assay"),
            pipeline_name: optional("PipelineName"),
            pipeline_version,
            remote_bam_path: optional("RemoteBamFilePath"),
            remote_vcf_path: optional("RemoteVcfFilePath"),
        })
    }

    /// `WorklistId_SampleId_SeqId`, the identity of the run in the store.
    pub fn analysis_id(&self) -> String {
        format!("{}_{}_{}", self.worklist_id, self.sample_id, self.seq_id)
    }

    /// Properties of the RunInfo node.
    pub fn properties(&self) -> Properties {
        let mut properties = Properties::new();
        properties.insert("AnalysisId".to_string(), self.analysis_id().into());
        properties.insert("WorklistId".to_string(), self.worklist_id.clone().into());
        properties.insert("SeqId".to_string(), self.seq_id.clone().into());

        let optional = [
            ("Assay", &self.assay),
            ("PipelineName", &self.pipeline_name),
            ("RemoteBamFilePath", &self.remote_bam_path),
            ("RemoteVcfFilePath", &self.remote_vcf_path),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                properties.insert(key.to_string(), PropertyValue::from(v.as_str()));
            }
        }
        if let Some(version) = self.pipeline_version {
            properties.insert("PipelineVersion".to_string(), version.into());
        }

        properties
    }
}

/// All run infos declared in the header, in file order.
pub fn run_infos(header: &VcfHeader) -> Result<Vec<RunInfo>> {
    header
        .structured_lines(SAMPLE_META_KEY)
        .iter()
        .map(RunInfo::from_meta)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use vargraph_vcf::MetaLine;

    fn header(values: &[&str]) -> VcfHeader {
        VcfHeader {
            meta: values
                .iter()
                .map(|v| MetaLine {
                    key: "SAMPLE".to_string(),
                    value: v.to_string(),
                })
                .collect(),
            samples: vec![],
        }
    }

    #[rstest]
    fn test_run_info_from_header() {
        let header = header(&[
            "<ID=S1,Tissue=Blood,WorklistId=W7,SeqId=R42,Assay=Panel,PipelineName=Germline,PipelineVersion=3>",
        ]);
        let runs = run_infos(&header).unwrap();
        assert_eq!(runs.len(), 1);

        let run = &runs[0];
        assert_eq!(run.analysis_id(), "W7_S1_R42");
        assert_eq!(run.tissue.as_deref(), Some("Blood"));

        let properties = run.properties();
        assert_eq!(properties.get("PipelineVersion"), Some(&PropertyValue::Int(3)));
        assert_eq!(properties.get("Assay"), Some(&PropertyValue::from("Panel")));
        assert_eq!(properties.get("RemoteBamFilePath"), None);
    }

    #[rstest]
    #[case("<ID=S1,SeqId=R42>")]
    #[case("<ID=S1,WorklistId=W7,SeqId=R42,PipelineVersion=v3>")]
    fn test_malformed_run_info(#[case] value: &str) {
        let result = run_infos(&header(&[value]));
        assert!(matches!(result, Err(ImportError::MalformedRunInfo(_))));
    }
}
