use super::*;

pub(super) const APIKEY_HEADER: &str = "apikey";

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(super) fn bearer(&self, token: Option<&str>) -> String {
        let token = token
            .or(self.token.as_deref())
            .unwrap_or(&self.config.anon_key);
        format!("Bearer {}", token)
    }

    /// Request carrying the anon key and a bearer (explicit token, else the
    /// client's own, else the anon key).
    pub(super) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(APIKEY_HEADER, &self.config.anon_key)
            .header(reqwest::header::AUTHORIZATION, self.bearer(token))
    }

    pub(super) fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
        label: &str,
    ) -> AdminResult<reqwest::blocking::Response> {
        let resp = req
            .send()
            .map_err(|e| AdminError::store(format!("{}: {}", label, e)))?;
        self.ensure_ok(resp, label)
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> AdminResult<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let msg = error_message(resp);
        tracing::debug!(%status, label, "store request failed: {}", msg);
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminError::Auth(format!(
                "{}: unauthorized ({}; run `siteadmin login`)",
                label, msg
            )));
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(AdminError::Auth(format!("{}: forbidden ({})", label, msg)));
        }
        Err(AdminError::store(format!("{}: {} ({})", label, status, msg)))
    }
}

pub(super) fn error_message(resp: reqwest::blocking::Response) -> String {
    let text = resp.text().unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.into_message().unwrap_or(text),
        Err(_) if text.is_empty() => "no response body".to_string(),
        Err(_) => text,
    }
}

pub(super) fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::blocking::Response,
    label: &str,
) -> AdminResult<T> {
    resp.json()
        .map_err(|e| AdminError::store(format!("parse {}: {}", label, e)))
}
