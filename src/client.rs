// REST gateway to the task server. One attempt per call, no retries and no
// timeout; non-2xx responses surface the body text the server phrased.
use crate::config::Config;
use crate::model::{DashboardContext, InviteCode, NewTask, Task, Team, TeamMember};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. The message is the response body text, or a generic
    /// "HTTP <status> for <url>" when the body was empty.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        let res = self.http.get(&url).send().await?;
        Self::decode(res, &url).await
    }

    async fn post<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        let res = self.http.post(&url).send().await?;
        Self::decode(res, &url).await
    }

    /// Shared response handling: error bodies become `ApiError::Status`, an
    /// empty success body decodes to the type's default instead of failing.
    async fn decode<T>(res: reqwest::Response, url: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            let message = if body.trim().is_empty() {
                format!("HTTP {} for {}", status.as_u16(), url)
            } else {
                body
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        if body.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Reference lists needed before the first render, fetched in parallel.
    pub async fn fetch_context(&self) -> Result<DashboardContext, ApiError> {
        let (teams, scopes, priorities, statuses) = tokio::try_join!(
            self.get::<Vec<Team>>("/teams/all"),
            self.get::<Vec<String>>("/task/scopes"),
            self.get::<Vec<String>>("/task/priorities"),
            self.get::<Vec<String>>("/task/statuses"),
        )?;
        Ok(DashboardContext {
            teams,
            scopes,
            priorities,
            statuses,
        })
    }

    pub async fn fetch_tasks(&self, params: &[(String, String)]) -> Result<Vec<Task>, ApiError> {
        let url = format!("{}/task", self.base_url);
        let res = self.http.get(&url).query(params).send().await?;
        Self::decode(res, &url).await
    }

    /// `POST /task/new`, optionally targeted at a team. The created task
    /// comes back in the response.
    pub async fn create_task(
        &self,
        task: &NewTask,
        team_id: Option<&str>,
    ) -> Result<Task, ApiError> {
        let url = format!("{}/task/new", self.base_url);
        let mut req = self.http.post(&url).json(task);
        if let Some(team) = team_id {
            req = req.query(&[("team", team)]);
        }
        let res = req.send().await?;
        Self::decode(res, &url).await
    }

    pub async fn fetch_task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.get(&format!("/task/{}", task_id)).await
    }

    pub async fn fetch_team_members(&self, team_id: &str) -> Result<Vec<TeamMember>, ApiError> {
        self.get(&format!("/teams/{}/members", team_id)).await
    }

    pub async fn generate_invite_code(&self, team_id: &str) -> Result<String, ApiError> {
        let invite: InviteCode = self
            .post(&format!("/teams/{}/generate-invite-code", team_id))
            .await?;
        Ok(invite.code)
    }

    pub async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post(&format!("/teams/{}/delete-member?userId={}", team_id, user_id))
            .await?;
        Ok(())
    }
}
