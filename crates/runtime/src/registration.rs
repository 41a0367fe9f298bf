//! Profile completion and edits.
//!
//! A user who signed up completes their profile once: the `users` row gets
//! their personal details, and an `athletes` and/or `coaches` row is created
//! keyed by the user's id. An athlete's division and weight class are checked
//! against the chosen federation before anything is written, so a rejected
//! request leaves no partial profile behind.

use crate::{error::ServiceError, service::ProfileService};
use connectors::requests::{FetchOneRequest, InsertRequest, UpdateRequest};
use model::core::{
    identifiers::UserId,
    profile::{AthleteDetails, CreateProfile, Gender, UpdateProfile},
};
use tracing::{debug, info};

const USERS_TABLE: &str = "users";
const COACHES_TABLE: &str = "coaches";
const DIVISIONS_TABLE: &str = "divisions";
const WEIGHT_CLASSES_TABLE: &str = "weight_classes";

impl ProfileService {
    /// Completes the profile of `user`.
    ///
    /// Athlete details are validated first. Then the coach row, the athlete
    /// row and the `users` update are written in that order.
    pub async fn create_user_profile(
        &self,
        user: &UserId,
        profile: &CreateProfile,
    ) -> Result<(), ServiceError> {
        if profile.is_athlete {
            self.validate_athlete(&profile.athlete, profile.gender).await?;
        }

        if profile.is_coach {
            self.insert(
                COACHES_TABLE,
                profile.coach.row(user.as_str()),
                "Failed to create coaches profile",
            )
            .await?;
        }
        if profile.is_athlete {
            self.insert_athlete(user, &profile.athlete).await?;
        }

        let request = UpdateRequest::new(USERS_TABLE, "id", user.as_str(), profile.user_row());
        self.source
            .update(&request)
            .await
            .map_err(ServiceError::connector("Failed to create user profile"))?;

        info!(
            "Completed profile for '{}' (athlete: {}, coach: {})",
            user, profile.is_athlete, profile.is_coach
        );
        Ok(())
    }

    /// Validates `athlete` against its federation and creates the athlete row.
    pub async fn create_athlete_profile(
        &self,
        user: &UserId,
        gender: Gender,
        athlete: &AthleteDetails,
    ) -> Result<(), ServiceError> {
        self.validate_athlete(athlete, gender).await?;
        self.insert_athlete(user, athlete).await?;
        info!("Created athlete profile for '{}'", user);
        Ok(())
    }

    /// Applies the set fields of `update` to the `users` row of `user`.
    pub async fn update_profile(
        &self,
        user: &UserId,
        update: &UpdateProfile,
    ) -> Result<(), ServiceError> {
        if update.is_empty() {
            return Err(ServiceError::EmptyUpdate);
        }

        let request = UpdateRequest::new(USERS_TABLE, "id", user.as_str(), update.changes());
        self.source
            .update(&request)
            .await
            .map_err(ServiceError::connector("Failed to update user profile"))?;

        info!("Updated profile for '{}'", user);
        Ok(())
    }

    async fn validate_athlete(
        &self,
        athlete: &AthleteDetails,
        gender: Gender,
    ) -> Result<(), ServiceError> {
        let federation = athlete.federation_id.as_deref();

        if let Some(division) = &athlete.division_id {
            let federation = federation.ok_or(ServiceError::FederationRequired("division"))?;
            let request = FetchOneRequest::new(DIVISIONS_TABLE, "id", division.as_str())
                .and_eq("federation_id", federation)
                .select("id");
            self.expect_row(&request, "Failed to validate division", "Division")
                .await?;
        }

        if let Some(weight_class) = &athlete.weight_class_id {
            let federation = federation.ok_or(ServiceError::FederationRequired("weight class"))?;
            let request = FetchOneRequest::new(WEIGHT_CLASSES_TABLE, "id", weight_class.as_str())
                .and_eq("federation_id", federation)
                .and_eq("gender", gender.as_str())
                .select("id");
            self.expect_row(&request, "Failed to validate weight class", "Weight class")
                .await?;
        }

        Ok(())
    }

    async fn expect_row(
        &self,
        request: &FetchOneRequest,
        action: &'static str,
        what: &'static str,
    ) -> Result<(), ServiceError> {
        match self
            .source
            .fetch_one(request)
            .await
            .map_err(ServiceError::connector(action))?
        {
            Some(_) => Ok(()),
            None => {
                debug!("{} rejected: no match in '{}'", what, request.table);
                Err(ServiceError::NotInFederation(what))
            }
        }
    }

    async fn insert_athlete(&self, user: &UserId, athlete: &AthleteDetails) -> Result<(), ServiceError> {
        self.insert(
            self.catalog.root_table(),
            athlete.row(user.as_str()),
            "Failed to create athletes profile",
        )
        .await
    }

    async fn insert(
        &self,
        table: &str,
        row: serde_json::Value,
        action: &'static str,
    ) -> Result<(), ServiceError> {
        self.source
            .insert(&InsertRequest::new(table, row))
            .await
            .map_err(ServiceError::connector(action))
    }
}
