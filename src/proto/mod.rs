use crate::error::*;
use serde_json::Value;
use serde_with::skip_serializing_none;

/// `/clients` resource
pub mod clients;

/// `/projects` resource
pub mod projects;

/// `/tags` resource
pub mod tags;

/// `/time_entries` resource
pub mod timers;

/// `/me` resource
pub mod users;

/// `/workspaces` resource
pub mod workspaces;

pub use clients::Clients;
pub use projects::Projects;
pub use tags::Tags;
pub use timers::{start_of_day, TimeEntry, Timers};
pub use users::Users;
pub use workspaces::Workspaces;

/// body shared by clients, projects and tags
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub wid: Option<u64>,
}

/// wraps `payload` as `{ key: payload }`, the envelope toggl expects on writes
pub(crate) fn envelope(key: &str, payload: impl serde::Serialize) -> Result<Value> {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), serde_json::to_value(payload)?);
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_skips_missing_workspace() -> anyhow::Result<()> {
        let with_wid = NamedResource {
            name: "Acme".to_string(),
            wid: Some(777),
        };
        assert_eq!(
            envelope("client", &with_wid)?,
            json!({"client": {"name": "Acme", "wid": 777}})
        );

        let without_wid = NamedResource {
            name: "Acme".to_string(),
            wid: None,
        };
        assert_eq!(
            envelope("tag", &without_wid)?,
            json!({"tag": {"name": "Acme"}})
        );
        Ok(())
    }
}
