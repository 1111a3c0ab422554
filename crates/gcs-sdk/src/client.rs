//! REST client for the backend mission store.

use anyhow::{Context, Result};
use gcs_core::models::{Mission, MissionList, MissionSaved};
use gcs_core::{validate_mission, RouteModel};
use reqwest::{Response, Url};

/// Client for saving and loading named missions.
pub struct MissionClient {
    base_url: String,
    client: reqwest::Client,
}

impl MissionClient {
    /// Create a new mission client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a mission. Invalid missions are rejected before any request is made.
    pub async fn save_mission(&self, mission: &Mission) -> Result<MissionSaved> {
        validate_mission(mission)?;
        let url = self.endpoint(&["api", "missions"])?;

        let response = self.client.post(url).json(mission).send().await?;
        let saved: MissionSaved = check_status(response, "save mission")
            .await?
            .json()
            .await
            .context("Invalid save-mission response")?;

        tracing::info!(
            mission = %saved.mission_name,
            waypoints = saved.waypoint_count,
            "Mission saved"
        );
        Ok(saved)
    }

    /// List the names of stored missions.
    pub async fn list_missions(&self) -> Result<MissionList> {
        let url = self.endpoint(&["api", "missions"])?;
        let response = self.client.get(url).send().await?;
        let list = check_status(response, "list missions")
            .await?
            .json()
            .await
            .context("Invalid mission list response")?;
        Ok(list)
    }

    /// Fetch one mission by name.
    pub async fn get_mission(&self, name: &str) -> Result<Mission> {
        let url = self.endpoint(&["api", "missions", name])?;
        let response = self.client.get(url).send().await?;
        let mission = check_status(response, "load mission")
            .await?
            .json()
            .await
            .context("Invalid mission response")?;
        Ok(mission)
    }

    /// Fetch a mission and replace the route with its points.
    ///
    /// Returns the number of waypoints loaded (0 if editing is disabled).
    pub async fn load_into(&self, route: &mut RouteModel, name: &str) -> Result<usize> {
        let mission = self.get_mission(name).await?;
        let loaded = route.load_points(&mission.points);
        tracing::info!(mission = %name, waypoints = loaded, "Mission loaded into route");
        Ok(loaded)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, action, "Backend rejected request");
    anyhow::bail!("Failed to {}: {} {}", action, status, body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let client = MissionClient::new("http://localhost:8000");
        let url = client.endpoint(&["api", "missions"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/missions");
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_names() {
        let client = MissionClient::new("http://gcs.local/drone/");
        let url = client.endpoint(&["api", "missions", "north field/v2"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://gcs.local/drone/api/missions/north%20field%2Fv2"
        );
    }

    #[tokio::test]
    async fn save_rejects_short_mission_locally() {
        let client = MissionClient::new("http://127.0.0.1:9");
        let mission = Mission { name: "short".into(), points: vec![] };
        let err = client.save_mission(&mission).await.unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }
}
