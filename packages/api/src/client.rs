//! # Mission API client
//!
//! [`MissionsClient`] wraps a [`Transport`] with everything a call to the
//! remote API needs:
//!
//! 1. register the call in [`PendingRequests`] to get a unique callback name;
//! 2. append the operation's query parameters and `callback=<name>` to the base
//!    URL (the URL library picks `?` or `&`);
//! 3. fetch under a deadline;
//! 4. unwrap the body, which is either bare JSON or `<name>(<json>)`, and check
//!    that the name is the one this call registered;
//! 5. decode the payload.
//!
//! The pending entry is removed when the call finishes, whatever the outcome.
//!
//! ## Operations
//!
//! | Method | Query |
//! |--------|-------|
//! | [`login`](MissionsClient::login) | `type=loginpresta&email=<E>&password=<P>` |
//! | [`missions`](MissionsClient::missions) | `type=getmissions&email=<E>` |
//! | [`update_mission`](MissionsClient::update_mission) | `type=updatemission&mission_id=<id>&statut=<S>&email=<E>` |

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use store::{Mission, MissionStatus};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::pending::PendingRequests;
use crate::timer;
use crate::transport::Transport;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Answer to `type=loginpresta`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "prenom", default)]
    pub given_name: Option<String>,
    #[serde(rename = "nom", default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer to `type=getmissions`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MissionsReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub missions: Option<Vec<Mission>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer to `type=updatemission`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct MissionsClient<T> {
    base_url: String,
    transport: T,
    timeout: Duration,
    pending: PendingRequests,
}

impl<T: Transport> MissionsClient<T> {
    /// The base URL is parsed on every call; an invalid one fails each call
    /// with [`ApiError::InvalidUrl`].
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            timeout: DEFAULT_TIMEOUT,
            pending: PendingRequests::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builder method to set the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        self.call(
            "cbLogin",
            &[("type", "loginpresta"), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn missions(&self, email: &str) -> Result<MissionsReply, ApiError> {
        self.call("cbMissions", &[("type", "getmissions"), ("email", email)])
            .await
    }

    pub async fn update_mission(
        &self,
        mission_id: i64,
        status: &MissionStatus,
        email: &str,
    ) -> Result<UpdateReply, ApiError> {
        let mission_id = mission_id.to_string();
        self.call(
            "cbUpdateMission",
            &[
                ("type", "updatemission"),
                ("mission_id", &mission_id),
                ("statut", status.as_wire()),
                ("email", email),
            ],
        )
        .await
    }

    async fn call<R: DeserializeOwned>(
        &self,
        prefix: &str,
        params: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let base = Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let ticket = self.pending.register(prefix);
        let url = request_url(&base, params, ticket.callback());
        let operation = params.first().map(|(_, v)| *v).unwrap_or_default();
        debug!("API {operation} sent as #{} ({})", ticket.id(), ticket.callback());

        let body = match timer::timeout(self.timeout, self.transport.fetch(url)).await {
            Ok(body) => body?,
            Err(timer::Elapsed) => {
                warn!("API {operation} got no answer within {:?}", self.timeout);
                return Err(ApiError::Timeout(self.timeout));
            }
        };

        let payload = unwrap_callback(&body, ticket.callback())?;
        let reply = serde_json::from_str(payload)?;
        debug!("API {operation} answered");
        Ok(reply)
    }
}

/// `base` with `params` and `callback=<callback>` appended to its query.
pub fn request_url(base: &Url, params: &[(&str, &str)], callback: &str) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
        query.append_pair("callback", callback);
    }
    url
}

/// Extract the JSON payload from `body`.
///
/// Accepts bare JSON, or `<callback>(<json>)` with an optional trailing `;`.
/// An invocation of any other callback is rejected.
pub fn unwrap_callback<'a>(body: &'a str, callback: &str) -> Result<&'a str, ApiError> {
    let body = body.trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();

    if body.starts_with('{') || body.starts_with('[') {
        return Ok(body);
    }

    let Some(open) = body.find('(') else {
        return Err(ApiError::Malformed(truncate(body)));
    };
    let name = body[..open].trim();
    if name != callback {
        return Err(ApiError::Correlation {
            expected: callback.to_string(),
            found: name.to_string(),
        });
    }

    body[open + 1..]
        .strip_suffix(')')
        .map(str::trim)
        .ok_or_else(|| ApiError::Malformed(truncate(body)))
}

fn truncate(body: &str) -> String {
    body.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Transport answering from a script and recording every URL.
    #[derive(Default)]
    struct Scripted {
        answers: RefCell<VecDeque<Result<String, ApiError>>>,
        urls: RefCell<Vec<Url>>,
        echo: bool,
    }

    impl Scripted {
        fn echoing(payloads: &[&str]) -> Self {
            Self {
                answers: RefCell::new(payloads.iter().map(|p| Ok(p.to_string())).collect()),
                urls: RefCell::default(),
                echo: true,
            }
        }

        fn failing(error: ApiError) -> Self {
            Self {
                answers: RefCell::new(VecDeque::from([Err(error)])),
                ..Self::default()
            }
        }

        fn last_url(&self) -> Url {
            self.urls.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for Scripted {
        async fn fetch(&self, url: Url) -> Result<String, ApiError> {
            let callback = url
                .query_pairs()
                .find(|(k, _)| k == "callback")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            self.urls.borrow_mut().push(url);
            let answer = self
                .answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok("{}".to_string()))?;
            if self.echo {
                Ok(format!("{callback}({answer})"))
            } else {
                Ok(answer)
            }
        }
    }

    /// Transport that never answers.
    struct Silent;

    impl Transport for Silent {
        async fn fetch(&self, _url: Url) -> Result<String, ApiError> {
            futures::future::pending().await
        }
    }

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::echoing(&[r#"{"success":true,"prenom":"Jean","nom":"Dupont"}"#]),
        );

        let reply = client.login("a@b.com", "pw").await.unwrap();

        assert!(reply.success);
        assert_eq!(reply.given_name.as_deref(), Some("Jean"));
        assert_eq!(reply.family_name.as_deref(), Some("Dupont"));
        assert!(client.pending().is_empty());

        let url = client.transport().last_url();
        assert_eq!(
            query(&url),
            vec![
                ("type".to_string(), "loginpresta".to_string()),
                ("email".to_string(), "a@b.com".to_string()),
                ("password".to_string(), "pw".to_string()),
                ("callback".to_string(), "cbLogin1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_mission_query() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::echoing(&[r#"{"success":true}"#]),
        );

        let reply = client
            .update_mission(7, &MissionStatus::InProgress, "a@b.com")
            .await
            .unwrap();
        assert!(reply.success);

        let url = client.transport().last_url();
        let pairs = query(&url);
        assert!(pairs.contains(&("type".to_string(), "updatemission".to_string())));
        assert!(pairs.contains(&("mission_id".to_string(), "7".to_string())));
        assert!(pairs.contains(&("statut".to_string(), "en_cours".to_string())));
        assert!(pairs.contains(&("email".to_string(), "a@b.com".to_string())));
    }

    #[tokio::test]
    async fn test_missions_reply_decodes_missions() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::echoing(&[
                r#"{"success":true,"missions":[{"id":7,"titre":"X","statut":"planifiée"}]}"#,
            ]),
        );

        let reply = client.missions("a@b.com").await.unwrap();
        let missions = reply.missions.unwrap();
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].id, 7);
        assert_eq!(missions[0].title, "X");
        assert_eq!(missions[0].status, Some(MissionStatus::Planned));
    }

    #[tokio::test]
    async fn test_one_odd_mission_does_not_sink_the_reply() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::echoing(&[
                r#"{"success":true,"missions":[{"id":7,"titre":null,"telephone":612345678},{"id":8,"titre":"OK"}]}"#,
            ]),
        );

        let missions = client.missions("a@b.com").await.unwrap().missions.unwrap();

        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].title, "");
        assert_eq!(missions[0].phone.as_deref(), Some("612345678"));
        assert_eq!(missions[1].title, "OK");
    }

    #[test]
    fn test_request_url_separator() {
        let bare = Url::parse("https://api.example.test/exec").unwrap();
        let url = request_url(&bare, &[("type", "getmissions")], "cbMissions1");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/exec?type=getmissions&callback=cbMissions1"
        );

        let with_query = Url::parse("https://api.example.test/exec?key=abc").unwrap();
        let url = request_url(&with_query, &[("type", "getmissions")], "cbMissions2");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/exec?key=abc&type=getmissions&callback=cbMissions2"
        );
    }

    #[test]
    fn test_request_url_encodes_values() {
        let base = Url::parse("https://api.example.test/").unwrap();
        let url = request_url(&base, &[("email", "a+b@c.com"), ("password", "p&w d")], "cb1");
        let pairs = query(&url);
        assert_eq!(pairs[0].1, "a+b@c.com");
        assert_eq!(pairs[1].1, "p&w d");
    }

    #[test]
    fn test_unwrap_callback_forms() {
        assert_eq!(unwrap_callback(r#"{"success":true}"#, "cb1").unwrap(), r#"{"success":true}"#);
        assert_eq!(
            unwrap_callback(" cb1({\"success\":true}); \n", "cb1").unwrap(),
            r#"{"success":true}"#
        );
        assert_eq!(unwrap_callback("cb1({})", "cb1").unwrap(), "{}");
    }

    #[test]
    fn test_unwrap_callback_rejects_foreign_name() {
        let err = unwrap_callback("cbLogin3({})", "cbLogin4").unwrap_err();
        match err {
            ApiError::Correlation { expected, found } => {
                assert_eq!(expected, "cbLogin4");
                assert_eq!(found, "cbLogin3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unwrap_callback_rejects_garbage() {
        assert!(matches!(
            unwrap_callback("<html>502</html>", "cb1"),
            Err(ApiError::Malformed(_))
        ));
        assert!(matches!(
            unwrap_callback("cb1({}", "cb1"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_status_error_clears_pending() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::failing(ApiError::Status(502)),
        );

        let err = client.missions("a@b.com").await.unwrap_err();

        assert!(matches!(err, ApiError::Status(502)));
        assert!(client.pending().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_clears_pending() {
        let client = MissionsClient::new("https://api.example.test", Silent)
            .with_timeout(Duration::from_millis(10));

        let err = client.login("a@b.com", "pw").await.unwrap_err();

        assert!(matches!(err, ApiError::Timeout(_)));
        assert!(client.pending().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_payload() {
        let client = MissionsClient::new(
            "https://api.example.test",
            Scripted::echoing(&[r#"{"success":"yes"}"#]),
        );

        let err = client.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_each_call() {
        let client = MissionsClient::new("not a url", Silent);

        let err = client.missions("a@b.com").await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(client.pending().is_empty());
    }
}
