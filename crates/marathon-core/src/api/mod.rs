//! Backend API seam.
//!
//! [`MarathonBackend`] is the trait boundary the trackers talk
//! through; [`HttpBackend`] is the reqwest implementation against the
//! real server. Tests substitute an in-memory fake.

pub mod types;

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

pub use types::{
    ConfirmImageRequest, ContestImage, DayState, Exercise, ExerciseStatus, Finalist, MarathonDay,
    MarathonSnapshot, Position, RecordSide, SetRecordRequest, StatusChangeRequest,
    StatusChangeResponse, UserRecord, VoteRequest, AFTER_POSITIONS, BEFORE_POSITIONS,
};

// Endpoint paths, relative to `<base_url>/api`.
const GET_START_MARATHON: &str = "/usermarathon/startmarathon";
const CHANGE_EXERCISE_STATUS: &str = "/usermarathon/setuserexercisestatus";
const CONFIRM_CONTEST_IMAGE: &str = "/contest/confirmcontestmaskimages";
const GET_CONTEST_IMAGES: &str = "/contest/getusercontestimages";
const VOTE_FINALIST: &str = "/contest/vote";
const GET_CONTEST_FINALISTS: &str = "/User/GetAllCourseUers";
const SET_USER_RECORD: &str = "/contest/setuserrecordbeforephotoupload";
const GET_USER_RECORD: &str = "/contest/getuserrecordbeforephotoupload";

/// Everything the engine asks of the server. Implementations are
/// authoritative for progress scores, slot state and vote tallies;
/// the engine never second-guesses a response.
pub trait MarathonBackend {
    /// Fetch the aggregate marathon state (per-day progress included).
    fn get_marathon(
        &self,
        marathon_id: &str,
    ) -> impl std::future::Future<Output = Result<MarathonSnapshot>> + Send;

    /// Change one exercise's status; returns the new day aggregate.
    fn change_status(
        &self,
        day_id: &str,
        exercise_id: &str,
        status: ExerciseStatus,
    ) -> impl std::future::Future<Output = Result<StatusChangeResponse>> + Send;

    /// Confirm an uploaded contest image mask.
    fn confirm_contest_image(
        &self,
        req: &ConfirmImageRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch the user's confirmed contest images.
    fn get_contest_images(
        &self,
        marathon_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ContestImage>>> + Send;

    /// Cast or retract a vote. Fire-and-forget; no payload consumed.
    fn vote_finalist(
        &self,
        req: &VoteRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch the current finalist list with server-owned tallies.
    fn get_contest_finalists(
        &self,
        marathon_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Finalist>>> + Send;

    /// Store participant metadata for one side of the photo pair.
    fn set_user_record(
        &self,
        req: &SetRecordRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch stored participant metadata, if any.
    fn get_user_record(
        &self,
        contest_id: &str,
        side: RecordSide,
    ) -> impl std::future::Future<Output = Result<Option<UserRecord>>> + Send;
}

/// HTTP client for the marathon server.
///
/// Sends bearer auth and the `UserLanguage` header on every request,
/// and mirrors the mobile client by attaching the device timezone
/// offset to every GET.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
    timezone_offset_minutes: i32,
    user_language: String,
}

impl HttpBackend {
    /// Build a backend from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let base_url = config.api_base_url()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
            timezone_offset_minutes: config.timezone_offset_minutes,
            user_language: config.user_language.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Url::parse(&joined).map_err(|e| {
            EngineError::validation("endpoint", format!("bad endpoint url {joined}: {e}"))
        })
    }

    fn decorate(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header("UserLanguage", &self.user_language);
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        let tz = self.timezone_offset_minutes.to_string();
        let mut params: Vec<(&str, &str)> = vec![("timeZoneOffset", tz.as_str())];
        params.extend(query.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .decorate(self.client.get(url).query(&params))
            .send()
            .await?;
        Self::checked_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .decorate(self.client.post(url).json(body))
            .send()
            .await?;
        Self::checked_json(response).await
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path)?;
        let response = self
            .decorate(self.client.post(url).json(body))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(EngineError::Conflict(message));
        }
        Err(EngineError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn checked_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}

impl MarathonBackend for HttpBackend {
    async fn get_marathon(&self, marathon_id: &str) -> Result<MarathonSnapshot> {
        self.get_json(
            GET_START_MARATHON,
            &[("marathonId", marathon_id.to_string())],
        )
        .await
    }

    async fn change_status(
        &self,
        day_id: &str,
        exercise_id: &str,
        status: ExerciseStatus,
    ) -> Result<StatusChangeResponse> {
        let body = StatusChangeRequest {
            day_id: day_id.to_string(),
            marathon_exercise_id: exercise_id.to_string(),
            status,
        };
        self.post_json(CHANGE_EXERCISE_STATUS, &body).await
    }

    async fn confirm_contest_image(&self, req: &ConfirmImageRequest) -> Result<()> {
        self.post_unit(CONFIRM_CONTEST_IMAGE, req).await
    }

    async fn get_contest_images(&self, marathon_id: &str) -> Result<Vec<ContestImage>> {
        self.get_json(
            GET_CONTEST_IMAGES,
            &[("marathonId", marathon_id.to_string())],
        )
        .await
    }

    async fn vote_finalist(&self, req: &VoteRequest) -> Result<()> {
        self.post_unit(VOTE_FINALIST, req).await
    }

    async fn get_contest_finalists(&self, marathon_id: &str) -> Result<Vec<Finalist>> {
        self.get_json(
            GET_CONTEST_FINALISTS,
            &[("marathonId", marathon_id.to_string())],
        )
        .await
    }

    async fn set_user_record(&self, req: &SetRecordRequest) -> Result<()> {
        self.post_unit(SET_USER_RECORD, req).await
    }

    async fn get_user_record(
        &self,
        contest_id: &str,
        side: RecordSide,
    ) -> Result<Option<UserRecord>> {
        let side_param = match side {
            RecordSide::Before => "before",
            RecordSide::After => "after",
        };
        self.get_json(
            GET_USER_RECORD,
            &[
                ("contestId", contest_id.to_string()),
                ("side", side_param.to_string()),
            ],
        )
        .await
    }
}
