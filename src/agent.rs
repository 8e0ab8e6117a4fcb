use serde_json::Value;

use crate::error::PennsieveError;

/// Handle to the Pennsieve agent, the separately installed process that
/// owns credentials, profiles and the authenticated session.
///
/// This crate never implements the agent transport itself; it only calls
/// into an implementation of this trait. Implementations report a closed
/// session as [`PennsieveError::AgentUnavailable`] and an unknown profile
/// as [`PennsieveError::ProfileNotFound`]; remote failures surface as
/// [`PennsieveError::DiscoverHttp`] or [`PennsieveError::DiscoverStatus`].
pub trait Agent: Send + Sync {
    fn connect(&mut self, profile_name: Option<&str>) -> Result<(), PennsieveError>;

    fn agent_version(&self) -> Result<String, PennsieveError>;

    fn whoami(&self) -> Result<String, PennsieveError>;

    fn switch_profile(&mut self, profile_name: &str) -> Result<String, PennsieveError>;

    fn close(&mut self) -> Result<(), PennsieveError>;

    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<Value, PennsieveError>;

    fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, PennsieveError>;

    fn put(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, PennsieveError>;

    fn delete(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<Value, PennsieveError>;
}
