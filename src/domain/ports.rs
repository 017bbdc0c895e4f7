use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::model::{
    Case, CaseImportInfo, Project, SmallVariantQueryV1, VarAnnoSetEntryV1, VarAnnoSetV1,
};
use crate::domain::query_settings::CaseQueryV1;
use crate::utils::error::Result;

/// The subset of the VarFish REST API used by the command line client.
#[async_trait]
pub trait VarfishApi: Send + Sync {
    async fn project_list(&self) -> Result<Vec<Project>>;

    async fn case_list(&self, project: Uuid) -> Result<Vec<Case>>;
    async fn case_retrieve(&self, case: Uuid) -> Result<Case>;
    async fn case_import_info_list(&self, project: Uuid) -> Result<Vec<CaseImportInfo>>;

    async fn small_var_query_list(&self, case: Uuid) -> Result<Vec<SmallVariantQueryV1>>;
    async fn small_var_query_create(
        &self,
        case: Uuid,
        query: &CaseQueryV1,
    ) -> Result<SmallVariantQueryV1>;
    async fn small_var_query_status(&self, query: Uuid) -> Result<serde_json::Value>;
    async fn small_var_query_fetch_results(&self, query: Uuid) -> Result<serde_json::Value>;
    /// Query settings generated by the server from preset names, e.g. `quick_preset=defaults`.
    async fn small_var_query_settings_shortcut(
        &self,
        case: Uuid,
        presets: &[(String, String)],
    ) -> Result<serde_json::Value>;

    async fn varannoset_list(&self, project: Uuid) -> Result<Vec<VarAnnoSetV1>>;
    async fn varannoset_retrieve(&self, varannoset: Uuid) -> Result<VarAnnoSetV1>;
    async fn varannosetentry_list(&self, varannoset: Uuid) -> Result<Vec<VarAnnoSetEntryV1>>;
}
