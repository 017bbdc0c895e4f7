use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::domain::datetime;

/// A model that can be rendered as rows of a listing.
pub trait TabularRecord: Serialize {
    /// Field names in declaration order.
    const FIELDS: &'static [&'static str];
}

/// A pedigree member as returned by the VarFish API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedigreeMember {
    pub name: String,
    pub father: String,
    pub mother: String,
    pub sex: i32,
    pub affected: i32,
    /// Whether the member has genotype values in the call set.
    pub has_gt_entries: bool,
}

/// A case as returned by the VarFish API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub sodar_uuid: Uuid,
    #[serde(with = "datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "datetime")]
    pub date_modified: DateTime<Utc>,
    pub name: String,
    /// Name of the index individual.
    pub index: String,
    pub pedigree: Vec<PedigreeMember>,
    #[serde(default)]
    pub num_small_vars: Option<i64>,
    #[serde(default)]
    pub num_svs: Option<i64>,
}

impl TabularRecord for Case {
    const FIELDS: &'static [&'static str] = &[
        "sodar_uuid",
        "date_created",
        "date_modified",
        "name",
        "index",
        "pedigree",
        "num_small_vars",
        "num_svs",
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseImportState {
    /// Allows modification.
    #[default]
    Draft,
    Submitted,
    Imported,
    /// Previously in database but not any more.
    Evicted,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSetImportState {
    #[default]
    Draft,
    Uploaded,
    Imported,
    Evicted,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenomeBuild {
    #[serde(rename = "GRCh37")]
    Grch37,
    #[serde(rename = "GRCh38")]
    Grch38,
}

/// Case import information as returned by the importer API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseImportInfo {
    pub release: GenomeBuild,
    pub name: String,
    pub index: String,
    pub pedigree: Vec<PedigreeMember>,
    #[serde(default)]
    pub sodar_uuid: Option<Uuid>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, with = "datetime::option")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::option")]
    pub date_modified: Option<DateTime<Utc>>,
    /// UUID of the remote project.
    #[serde(default)]
    pub project: Option<Uuid>,
    /// UUID of the remote case.
    #[serde(default)]
    pub case: Option<Uuid>,
    #[serde(default)]
    pub state: CaseImportState,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TabularRecord for CaseImportInfo {
    const FIELDS: &'static [&'static str] = &[
        "release",
        "name",
        "index",
        "pedigree",
        "sodar_uuid",
        "owner",
        "date_created",
        "date_modified",
        "project",
        "case",
        "state",
        "notes",
        "tags",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseVariantType {
    Small,
    Structural,
}

/// Information on importing a set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSetImportInfo {
    pub genomebuild: GenomeBuild,
    pub variant_type: CaseVariantType,
    #[serde(default)]
    pub sodar_uuid: Option<Uuid>,
    #[serde(default, with = "datetime::option")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::option")]
    pub date_modified: Option<DateTime<Utc>>,
    /// UUID of the linked `CaseImportInfo`.
    #[serde(default)]
    pub case_import_info: Option<Uuid>,
    #[serde(default)]
    pub state: VariantSetImportState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BamQc {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genotype {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effects {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseInfo {}

/// File attached to a case import, without its payload. `Kind` tags what the file holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ImportFile<Kind> {
    pub name: String,
    pub md5: String,
    #[serde(default)]
    pub sodar_uuid: Option<Uuid>,
    #[serde(default, with = "datetime::option")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::option")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub case_import_info: Option<Uuid>,
    #[serde(skip)]
    kind: PhantomData<Kind>,
}

impl<Kind> ImportFile<Kind> {
    pub fn new(name: impl Into<String>, md5: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            md5: md5.into(),
            sodar_uuid: None,
            date_created: None,
            date_modified: None,
            case_import_info: None,
            kind: PhantomData,
        }
    }
}

pub type BamQcFile = ImportFile<BamQc>;
pub type GenotypeFile = ImportFile<Genotype>;
pub type EffectsFile = ImportFile<Effects>;
pub type DatabaseInfoFile = ImportFile<DatabaseInfo>;

/// A project (or category) as returned by the project API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub sodar_uuid: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(default)]
    pub parent: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub public_guest_access: bool,
}

impl TabularRecord for Project {
    const FIELDS: &'static [&'static str] = &[
        "sodar_uuid",
        "title",
        "type",
        "parent",
        "description",
        "readme",
        "public_guest_access",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarAnnoSetV1 {
    pub sodar_uuid: Uuid,
    #[serde(with = "datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "datetime")]
    pub date_modified: DateTime<Utc>,
    pub project: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release: GenomeBuild,
    /// Names of the payload fields carried by the entries.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl TabularRecord for VarAnnoSetV1 {
    const FIELDS: &'static [&'static str] = &[
        "sodar_uuid",
        "date_created",
        "date_modified",
        "project",
        "title",
        "description",
        "release",
        "fields",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarAnnoSetEntryV1 {
    pub sodar_uuid: Uuid,
    #[serde(with = "datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "datetime")]
    pub date_modified: DateTime<Utc>,
    pub varannoset: Uuid,
    pub release: GenomeBuild,
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
    pub reference: String,
    pub alternative: String,
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl TabularRecord for VarAnnoSetEntryV1 {
    const FIELDS: &'static [&'static str] = &[
        "sodar_uuid",
        "date_created",
        "date_modified",
        "varannoset",
        "release",
        "chromosome",
        "start",
        "end",
        "reference",
        "alternative",
        "payload",
    ];
}

/// A stored small variant query of a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallVariantQueryV1 {
    pub sodar_uuid: Uuid,
    #[serde(with = "datetime")]
    pub date_created: DateTime<Utc>,
    pub case: Uuid,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub query_settings: serde_json::Map<String, serde_json::Value>,
}

impl TabularRecord for SmallVariantQueryV1 {
    const FIELDS: &'static [&'static str] = &[
        "sodar_uuid",
        "date_created",
        "case",
        "user",
        "name",
        "public",
        "query_settings",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(value: &serde_json::Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_case_from_api_json() {
        let case: Case = serde_json::from_value(json!({
            "sodar_uuid": "5f6a3c8e-4b0a-4b1e-9d9c-2d8e4f0b1a11",
            "date_created": "2022-01-10T08:00:00.123456Z",
            "date_modified": "2022-01-11T08:00:00Z",
            "name": "FAM_index",
            "index": "index",
            "pedigree": [{
                "name": "index",
                "father": "0",
                "mother": "0",
                "sex": 1,
                "affected": 2,
                "has_gt_entries": true
            }],
            "num_small_vars": 1234,
            "num_svs": null
        }))
        .unwrap();

        assert_eq!(case.name, "FAM_index");
        assert_eq!(case.pedigree.len(), 1);
        assert_eq!(case.num_small_vars, Some(1234));
        assert_eq!(case.num_svs, None);
        assert_eq!(case.date_created.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_case_import_info_defaults() {
        let info: CaseImportInfo = serde_json::from_value(json!({
            "release": "GRCh38",
            "name": "case",
            "index": "index",
            "pedigree": []
        }))
        .unwrap();

        assert_eq!(info.release, GenomeBuild::Grch38);
        assert_eq!(info.state, CaseImportState::Draft);
        assert!(info.tags.is_empty());
        assert!(info.sodar_uuid.is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(GenomeBuild::Grch37).unwrap(),
            json!("GRCh37")
        );
        assert_eq!(
            serde_json::to_value(CaseVariantType::Structural).unwrap(),
            json!("STRUCTURAL")
        );
        assert_eq!(
            serde_json::to_value(VariantSetImportState::Uploaded).unwrap(),
            json!("uploaded")
        );
    }

    #[test]
    fn test_import_file_kinds_share_shape() {
        let file: GenotypeFile = serde_json::from_value(json!({
            "name": "genotypes.tsv.gz",
            "md5": "d41d8cd98f00b204e9800998ecf8427e"
        }))
        .unwrap();
        assert_eq!(file, GenotypeFile::new("genotypes.tsv.gz", "d41d8cd98f00b204e9800998ecf8427e"));

        let value = serde_json::to_value(BamQcFile::new("qc.json", "abc")).unwrap();
        assert_eq!(value["name"], "qc.json");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let entry: VarAnnoSetEntryV1 = serde_json::from_value(json!({
            "sodar_uuid": "0d3c5d38-1111-4c0e-8a0c-5b7b4f3c2a01",
            "date_created": "2023-02-01T00:00:00Z",
            "date_modified": "2023-02-01T00:00:00Z",
            "varannoset": "0d3c5d38-2222-4c0e-8a0c-5b7b4f3c2a01",
            "release": "GRCh37",
            "chromosome": "1",
            "start": 100,
            "end": 100,
            "reference": "A",
            "alternative": "G",
            "payload": {"score": "0.9"}
        }))
        .unwrap();
        assert_eq!(
            field_names(&serde_json::to_value(&entry).unwrap()),
            VarAnnoSetEntryV1::FIELDS
        );

        let project: Project = serde_json::from_value(json!({
            "sodar_uuid": "0d3c5d38-3333-4c0e-8a0c-5b7b4f3c2a01",
            "title": "Rare disease cohort",
            "type": "PROJECT"
        }))
        .unwrap();
        assert_eq!(
            field_names(&serde_json::to_value(&project).unwrap()),
            Project::FIELDS
        );
    }
}
