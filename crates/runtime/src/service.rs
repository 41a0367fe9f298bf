use crate::error::ServiceError;
use connectors::{requests::FetchOneRequest, source::ProfileSource};
use model::{catalog::FieldCatalog, core::identifiers::AthleteId};
use planner::query::{builder::projection::SelectiveQueryBuilder, dialect::DialectKind};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Reads athlete profiles with a caller-chosen set of fields, and completes
/// or edits user profiles (see [`crate::registration`]).
///
/// The catalog and source are shared; a single service can serve any number
/// of concurrent requests.
#[derive(Clone)]
pub struct ProfileService {
    pub(crate) catalog: Arc<FieldCatalog>,
    pub(crate) source: Arc<dyn ProfileSource>,
    dialect: DialectKind,
}

impl ProfileService {
    pub fn new(
        catalog: Arc<FieldCatalog>,
        source: Arc<dyn ProfileSource>,
        dialect: DialectKind,
    ) -> Self {
        Self {
            catalog,
            source,
            dialect,
        }
    }

    /// Validates `fields` and renders the select expression for them.
    pub fn projection(&self, fields: Option<&[String]>) -> Result<String, ServiceError> {
        let projection = SelectiveQueryBuilder::new(&self.catalog).build(fields)?;
        Ok(projection.to_select(self.dialect.dialect()))
    }

    /// Fetches the root row keyed by `id`, returning only the requested fields.
    ///
    /// The record is returned exactly as the source produced it.
    pub async fn retrieve_profile_details(
        &self,
        id: &AthleteId,
        fields: Option<&[String]>,
    ) -> Result<Value, ServiceError> {
        let select = self.projection(fields).inspect_err(|err| {
            debug!("Rejected profile request for '{}': {}", id, err);
        })?;

        let request = FetchOneRequest::new(
            self.catalog.root_table(),
            self.catalog.primary_key(),
            id.as_str(),
        )
        .select(select);

        match self.source.fetch_one(&request).await {
            Ok(Some(record)) => {
                info!("Retrieved profile '{}' from {}", id, self.source.name());
                Ok(record)
            }
            Ok(None) => {
                debug!("No profile for '{}'", id);
                Err(ServiceError::NotFound(id.clone()))
            }
            Err(err) => {
                error!("Failed to retrieve profile '{}': {}", id, err);
                Err(ServiceError::connector("Failed to retrieve profile details")(err))
            }
        }
    }
}
