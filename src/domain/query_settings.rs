//! Settings of a small variant query, as accepted by the query-case API.
//!
//! Documents are checked while they are read: unknown keys, missing required keys and
//! wrongly typed values are all rejected before anything is sent to the server.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::utils::error::{Result, VarfishError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectsV1 {
    #[serde(rename = "3_prime_UTR_exon_variant")]
    ThreePrimeUtrExonVariant,
    #[serde(rename = "3_prime_UTR_intron_variant")]
    ThreePrimeUtrIntronVariant,
    #[serde(rename = "5_prime_UTR_exon_variant")]
    FivePrimeUtrExonVariant,
    #[serde(rename = "5_prime_UTR_intron_variant")]
    FivePrimeUtrIntronVariant,
    #[serde(rename = "coding_transcript_intron_variant")]
    CodingTranscriptIntronVariant,
    #[serde(rename = "complex_substitution")]
    ComplexSubstitution,
    #[serde(rename = "direct_tandem_duplication")]
    DirectTandemDuplication,
    #[serde(rename = "disruptive_inframe_deletion")]
    DisruptiveInframeDeletion,
    #[serde(rename = "disruptive_inframe_insertion")]
    DisruptiveInframeInsertion,
    #[serde(rename = "downstream_gene_variant")]
    DownstreamGeneVariant,
    #[serde(rename = "exon_loss_variant")]
    ExonLossVariant,
    #[serde(rename = "feature_truncation")]
    FeatureTruncation,
    #[serde(rename = "frameshift_elongation")]
    FrameshiftElongation,
    #[serde(rename = "frameshift_truncation")]
    FrameshiftTruncation,
    #[serde(rename = "frameshift_variant")]
    FrameshiftVariant,
    #[serde(rename = "inframe_deletion")]
    InframeDeletion,
    #[serde(rename = "inframe_insertion")]
    InframeInsertion,
    #[serde(rename = "intergenic_variant")]
    IntergenicVariant,
    #[serde(rename = "internal_feature_elongation")]
    InternalFeatureElongation,
    #[serde(rename = "missense_variant")]
    MissenseVariant,
    #[serde(rename = "mnv")]
    Mnv,
    #[serde(rename = "non_coding_transcript_exon_variant")]
    NonCodingTranscriptExonVariant,
    #[serde(rename = "non_coding_transcript_intron_variant")]
    NonCodingTranscriptIntronVariant,
    #[serde(rename = "splice_acceptor_variant")]
    SpliceAcceptorVariant,
    #[serde(rename = "splice_donor_variant")]
    SpliceDonorVariant,
    #[serde(rename = "splice_region_variant")]
    SpliceRegionVariant,
    #[serde(rename = "start_lost")]
    StartLost,
    #[serde(rename = "stop_gained")]
    StopGained,
    #[serde(rename = "stop_lost")]
    StopLost,
    #[serde(rename = "stop_retained_variant")]
    StopRetainedVariant,
    #[serde(rename = "structural_variant")]
    StructuralVariant,
    #[serde(rename = "synonymous_variant")]
    SynonymousVariant,
    #[serde(rename = "transcript_ablation")]
    TranscriptAblation,
    #[serde(rename = "upstream_gene_variant")]
    UpstreamGeneVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecessiveModeV1 {
    Recessive,
    CompoundRecessive,
}

/// What to do with a variant whose genotype fails the quality thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailChoiceV1 {
    #[default]
    Ignore,
    DropVariant,
    NoCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenotypeChoiceV1 {
    Any,
    Ref,
    Het,
    Hom,
    NonHom,
    Reference,
    Variant,
    NonVariant,
    NonReference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualitySettingsV1 {
    pub dp_het: Option<i64>,
    pub dp_hom: Option<i64>,
    pub number: Option<f64>,
    pub gq: Option<i64>,
    pub ab: Option<f64>,
    pub ad: Option<i64>,
    pub ad_max: Option<i64>,
    #[serde(default)]
    pub fail: FailChoiceV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeV1 {
    pub start: i64,
    pub end: i64,
}

type GenomicRegionTuple = (String, Option<i64>, Option<i64>);

/// A chromosome, optionally restricted to a range. On the wire: `[chrom, start, end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GenomicRegionTuple", into = "GenomicRegionTuple")]
pub struct GenomicRegionV1 {
    pub chromosome: String,
    pub range: Option<RangeV1>,
}

impl From<GenomicRegionV1> for GenomicRegionTuple {
    fn from(region: GenomicRegionV1) -> Self {
        match region.range {
            Some(range) => (region.chromosome, Some(range.start), Some(range.end)),
            None => (region.chromosome, None, None),
        }
    }
}

impl TryFrom<GenomicRegionTuple> for GenomicRegionV1 {
    type Error = String;

    fn try_from((chromosome, start, end): GenomicRegionTuple) -> std::result::Result<Self, String> {
        let range = match (start, end) {
            (Some(start), Some(end)) if start <= end => Some(RangeV1 { start, end }),
            (Some(start), Some(end)) => {
                return Err(format!(
                    "genomic region {}: start {} is after end {}",
                    chromosome, start, end
                ))
            }
            (None, None) => None,
            _ => {
                return Err(format!(
                    "genomic region {}: start and end must both be given or both be null",
                    chromosome
                ))
            }
        };
        Ok(Self { chromosome, range })
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseQuerySettingsV1 {
    pub database: String,

    pub effects: Vec<EffectsV1>,

    pub exac_enabled: bool,
    pub gnomad_exomes_enabled: bool,
    pub gnomad_genomes_enabled: bool,
    pub thousand_genomes_enabled: bool,
    pub inhouse_enabled: bool,
    pub mtdb_enabled: bool,
    pub helixmtdb_enabled: bool,
    pub mitomap_enabled: bool,

    /// Per-sample quality thresholds.
    pub quality: BTreeMap<String, QualitySettingsV1>,
    /// Per-sample genotype requirement.
    pub genotype: BTreeMap<String, GenotypeChoiceV1>,

    #[serde(default = "default_true")]
    pub transcripts_coding: bool,
    #[serde(default)]
    pub transcripts_noncoding: bool,

    #[serde(default = "default_true")]
    pub var_type_snv: bool,
    #[serde(default = "default_true")]
    pub var_type_indel: bool,
    #[serde(default = "default_true")]
    pub var_type_mnv: bool,

    pub max_exon_dist: Option<i64>,

    #[serde(default = "default_true")]
    pub flag_simple_empty: bool,
    #[serde(default = "default_true")]
    pub flag_bookmarked: bool,
    #[serde(default = "default_true")]
    pub flag_candidate: bool,
    #[serde(default = "default_true")]
    pub flag_doesnt_segregate: bool,
    #[serde(default = "default_true")]
    pub flag_final_causative: bool,
    #[serde(default = "default_true")]
    pub flag_for_validation: bool,
    #[serde(default = "default_true")]
    pub flag_no_disease_association: bool,
    #[serde(default = "default_true")]
    pub flag_segregates: bool,

    #[serde(default = "default_true")]
    pub flag_molecular_empty: bool,
    #[serde(default = "default_true")]
    pub flag_molecular_negative: bool,
    #[serde(default = "default_true")]
    pub flag_molecular_positive: bool,
    #[serde(default = "default_true")]
    pub flag_molecular_uncertain: bool,

    #[serde(default = "default_true")]
    pub flag_phenotype_empty: bool,
    #[serde(default = "default_true")]
    pub flag_phenotype_negative: bool,
    #[serde(default = "default_true")]
    pub flag_phenotype_positive: bool,
    #[serde(default = "default_true")]
    pub flag_phenotype_uncertain: bool,

    #[serde(default = "default_true")]
    pub flag_summary_empty: bool,
    #[serde(default = "default_true")]
    pub flag_summary_negative: bool,
    #[serde(default = "default_true")]
    pub flag_summary_positive: bool,
    #[serde(default = "default_true")]
    pub flag_summary_uncertain: bool,

    #[serde(default = "default_true")]
    pub flag_validation_empty: bool,
    #[serde(default = "default_true")]
    pub flag_validation_negative: bool,
    #[serde(default = "default_true")]
    pub flag_validation_positive: bool,
    #[serde(default = "default_true")]
    pub flag_validation_uncertain: bool,

    #[serde(default = "default_true")]
    pub flag_visual_empty: bool,
    #[serde(default = "default_true")]
    pub flag_visual_negative: bool,
    #[serde(default = "default_true")]
    pub flag_visual_positive: bool,
    #[serde(default = "default_true")]
    pub flag_visual_uncertain: bool,

    pub gene_allowlist: Option<Vec<String>>,
    pub gene_blocklist: Option<Vec<String>>,
    pub genomic_region: Option<Vec<GenomicRegionV1>>,

    #[serde(default)]
    pub remove_if_in_dbsnp: bool,

    #[serde(default)]
    pub require_in_hgmd_public: bool,
    #[serde(default)]
    pub require_in_clinvar: bool,
    #[serde(default = "default_true")]
    pub clinvar_include_benign: bool,
    #[serde(default = "default_true")]
    pub clinvar_include_pathogenic: bool,
    #[serde(default = "default_true")]
    pub clinvar_include_likely_benign: bool,
    #[serde(default = "default_true")]
    pub clinvar_include_likely_pathogenic: bool,
    #[serde(default = "default_true")]
    pub clinvar_include_uncertain_significance: bool,

    #[serde(default)]
    pub patho_enabled: bool,
    pub patho_score: Option<String>,

    #[serde(default)]
    pub prio_enabled: bool,
    pub prio_algorithm: Option<String>,
    pub prio_hpo_terms: Option<Vec<String>>,

    pub recessive_mode: Option<RecessiveModeV1>,
    pub recessive_index: Option<String>,
    pub denovo_index: Option<String>,

    pub exac_frequency: Option<f64>,
    pub exac_heterozygous: Option<i64>,
    pub exac_homozygous: Option<i64>,
    pub exac_hemizygous: Option<i64>,

    pub gnomad_exomes_frequency: Option<f64>,
    pub gnomad_exomes_heterozygous: Option<i64>,
    pub gnomad_exomes_homozygous: Option<i64>,
    pub gnomad_exomes_hemizygous: Option<i64>,

    pub gnomad_genomes_frequency: Option<f64>,
    pub gnomad_genomes_heterozygous: Option<i64>,
    pub gnomad_genomes_homozygous: Option<i64>,
    pub gnomad_genomes_hemizygous: Option<i64>,

    pub thousand_genomes_frequency: Option<f64>,
    pub thousand_genomes_heterozygous: Option<i64>,
    pub thousand_genomes_homozygous: Option<i64>,
    pub thousand_genomes_hemizygous: Option<i64>,

    pub inhouse_carriers: Option<i64>,
    pub inhouse_heterozygous: Option<i64>,
    pub inhouse_homozygous: Option<i64>,
    pub inhouse_hemizygous: Option<i64>,

    pub mtdb_count: Option<i64>,
    pub mtdb_frequency: Option<f64>,

    pub helixmtdb_frequency: Option<f64>,
    pub helixmtdb_het_count: Option<i64>,
    pub helixmtdb_hom_count: Option<i64>,

    pub mitomap_count: Option<i64>,
    // Misspelled on the server side as well.
    pub mitmomap_frequency: Option<f64>,
}

impl CaseQuerySettingsV1 {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| VarfishError::ValidationError {
            message: format!("invalid query settings: {}", e),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| VarfishError::ValidationError {
                message: format!("{}: {}", path.display(), e),
            })?;
        Self::from_json_str(&content).map_err(|e| match e {
            VarfishError::ValidationError { message } => VarfishError::ValidationError {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }
}

/// Request body for creating a small variant query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseQueryV1 {
    pub name: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub query_settings: Option<CaseQuerySettingsV1>,
}
