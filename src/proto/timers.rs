use super::envelope;
use crate::{client::Client, error::*};
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use http::Method;
use serde_json::Value;
use serde_with::skip_serializing_none;
use smart_default::SmartDefault;
use std::fmt::Display;
use tracing::*;
use url::Url;

const COLLECTION: &str = "time_entries";

/// body of a time entry write, sent inside `{"time_entry": ...}`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, SmartDefault)]
pub struct TimeEntry {
    pub description: Option<String>,
    /// project id
    pub pid: Option<u64>,
    pub tags: Option<Vec<String>>,
    /// seconds; negative while the entry is running
    pub duration: Option<i64>,
    pub billable: Option<bool>,
    pub start: Option<DateTime<FixedOffset>>,
    pub wid: Option<u64>,
    pub created_with: Option<String>,
}

impl TimeEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn with_project(mut self, pid: u64) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    pub fn with_billable(mut self, billable: bool) -> Self {
        self.billable = Some(billable);
        self
    }

    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_start(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_workspace(mut self, wid: u64) -> Self {
        self.wid = Some(wid);
        self
    }
}

/// Midnight of the calendar day of `now`, in the offset of `now`:
/// `YYYY-MM-DDT00:00:00+HH:MM`.
pub fn start_of_day<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%Y-%m-%dT00:00:00%:z").to_string()
}

pub struct Timers<'a> {
    client: &'a Client,
}

impl<'a> Timers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn url(&self) -> Result<Url> {
        self.client.build_url(COLLECTION, None, None)
    }

    /// stamps the configured workspace and client name on `entry`
    pub fn payload(&self, mut entry: TimeEntry) -> Result<Value> {
        let config = self.client.config();
        entry.wid = entry.wid.or(config.default_workspace());
        entry.created_with = Some(config.client_name().to_string());
        envelope("time_entry", entry)
    }

    pub async fn all(&self) -> Result<Value> {
        self.client.call_impl(None, self.url()?, None).await
    }

    /// the running time entry, `{"data": null}` when none runs
    pub async fn current(&self) -> Result<Value> {
        let url = self.client.build_url(COLLECTION, None, Some("current"))?;
        self.client.call_impl(None, url, None).await
    }

    pub async fn for_today(&self) -> Result<Value> {
        self.for_today_at(&Local::now()).await
    }

    /// entries started since local midnight of the day containing `now`
    pub async fn for_today_at<Tz>(&self, now: &DateTime<Tz>) -> Result<Value>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let url = self.today_url_at(now)?;
        self.client.call_impl(None, url, None).await
    }

    pub fn today_url_at<Tz>(&self, now: &DateTime<Tz>) -> Result<Url>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let start_date = start_of_day(now);
        debug!(%start_date, "time entries for today");
        let mut url = self.url()?;
        url.query_pairs_mut().append_pair("start_date", &start_date);
        Ok(url)
    }

    pub async fn create(
        &self,
        description: impl Into<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Value> {
        let entry = TimeEntry {
            description: Some(description.into()),
            tags,
            ..Default::default()
        };
        let body = self.payload(entry)?;
        self.client
            .call_impl(Some(Method::POST), self.url()?, Some(body))
            .await
    }

    pub async fn start(
        &self,
        description: impl Into<String>,
        pid: Option<u64>,
        tags: Option<Vec<String>>,
        billable: Option<bool>,
        duration: Option<i64>,
        start: Option<DateTime<FixedOffset>>,
    ) -> Result<Value> {
        let entry = TimeEntry {
            description: Some(description.into()),
            pid,
            tags,
            duration,
            billable,
            start,
            ..Default::default()
        };
        self.start_entry(entry).await
    }

    pub async fn start_entry(&self, entry: TimeEntry) -> Result<Value> {
        let body = self.payload(entry)?;
        let url = self.client.build_url(COLLECTION, None, Some("start"))?;
        self.client
            .call_impl(Some(Method::POST), url, Some(body))
            .await
    }

    pub async fn stop(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), Some("stop"))?;
        self.client.call_impl(Some(Method::PUT), url, None).await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client.call_impl(None, url, None).await
    }

    pub async fn update(
        &self,
        id: impl Display,
        description: impl Into<String>,
        tags: Option<Vec<String>>,
        duration: Option<i64>,
        start: Option<DateTime<FixedOffset>>,
    ) -> Result<Value> {
        let entry = TimeEntry {
            description: Some(description.into()),
            tags,
            duration,
            start,
            ..Default::default()
        };
        let body = self.payload(entry)?;
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client
            .call_impl(Some(Method::PUT), url, Some(body))
            .await
    }

    pub async fn del(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client.call_impl(Some(Method::DELETE), url, None).await
    }

    /// Date range queries are not supported yet; always fails without
    /// touching the network.
    pub fn between<Tz: TimeZone>(
        &self,
        _start: &DateTime<Tz>,
        _end: &DateTime<Tz>,
    ) -> Result<Value> {
        Err(Error::NotImplemented("timers.between"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;

    fn at(offset_secs: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, 30, 0)
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(
            start_of_day(&at(3 * 3600, 2017, 9, 4, 23)),
            "2017-09-04T00:00:00+03:00"
        );
        assert_eq!(
            start_of_day(&at(-(5 * 3600 + 30 * 60), 2021, 1, 9, 0)),
            "2021-01-09T00:00:00-05:30"
        );
        let utc = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(start_of_day(&utc), "2024-02-29T00:00:00+00:00");
    }

    #[test]
    fn test_start_of_day_uses_local_date() {
        // 01:30 on the 5th at +03:00 is still the 4th in UTC
        let now = at(3 * 3600, 2017, 9, 5, 1);
        assert_eq!(start_of_day(&now), "2017-09-05T00:00:00+03:00");
    }

    #[test]
    fn test_today_url() -> anyhow::Result<()> {
        let client = Client::new("token", None)?;
        let url = client.timers().today_url_at(&at(3 * 3600, 2017, 9, 4, 10))?;
        assert_eq!(url.path(), "/api/v8/time_entries");
        assert_eq!(
            url.query(),
            Some("start_date=2017-09-04T00%3A00%3A00%2B03%3A00")
        );
        Ok(())
    }

    #[test]
    fn test_between_not_implemented() -> anyhow::Result<()> {
        let client = Client::new("token", Some(Options::default().with_default_workspace(1)))?;
        let start = at(0, 2020, 1, 1, 0);
        let end = at(0, 2020, 1, 2, 0);
        assert!(matches!(
            client.timers().between(&start, &end),
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            client.timers().between(&end, &start),
            Err(Error::NotImplemented(_))
        ));
        Ok(())
    }

    #[test]
    fn test_payload_stamps_workspace_and_client_name() -> anyhow::Result<()> {
        let client = Client::new(
            "token",
            Some(
                Options::default()
                    .with_default_workspace(777)
                    .with_client_name("tests"),
            ),
        )?;
        let entry = TimeEntry::new("Meeting")
            .with_project(12)
            .add_tag("billed")
            .with_billable(true)
            .with_start(at(3 * 3600, 2017, 9, 4, 9));
        assert_eq!(
            client.timers().payload(entry)?,
            json!({
                "time_entry": {
                    "description": "Meeting",
                    "pid": 12,
                    "tags": ["billed"],
                    "billable": true,
                    "start": "2017-09-04T09:30:00+03:00",
                    "wid": 777,
                    "created_with": "tests"
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_payload_keeps_explicit_workspace() -> anyhow::Result<()> {
        let client = Client::new("token", Some(Options::default().with_default_workspace(777)))?;
        let body = client
            .timers()
            .payload(TimeEntry::new("x").with_workspace(5))?;
        assert_eq!(body["time_entry"]["wid"], json!(5));
        assert_eq!(body["time_entry"]["created_with"], json!(DEFAULT_CLIENT_NAME));
        assert!(body["time_entry"].get("tags").is_none());
        Ok(())
    }
}
