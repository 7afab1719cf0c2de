//! Blocking JSON-RPC client.

use super::types::RpcRequest;
use crate::error::{Error, Result};
use crate::rules::{FieldInfo, FieldsSource};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

/// Client for the admin endpoints of one server instance.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::blocking::Client,
    base_url: String,
    db: String,
    login: String,
    password: String,
    uid: Option<i64>,
}

impl RpcClient {
    /// Build a client for `base_url:port` and the given database.
    pub fn new(
        base_url: &str,
        port: u16,
        db: &str,
        login: &str,
        password: &str,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Rpc {
                url: base_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: format!("{}:{port}", base_url.trim_end_matches('/')),
            db: db.to_string(),
            login: login.to_string(),
            password: password.to_string(),
            uid: None,
        })
    }

    /// Authenticate as admin, returning (and caching) the user id.
    pub fn authenticate(&mut self) -> Result<i64> {
        if let Some(uid) = self.uid {
            return Ok(uid);
        }

        let params = json!({
            "db": self.db,
            "login": self.login,
            "password": self.password,
        });
        let result = self.post("/web/session/authenticate", &RpcRequest::call(params, 1))?;

        let uid = result
            .as_ref()
            .and_then(|r| r.get("uid"))
            .and_then(Value::as_i64)
            .filter(|uid| *uid > 0)
            .ok_or_else(|| Error::AuthFailed {
                db: self.db.clone(),
            })?;
        self.uid = Some(uid);
        Ok(uid)
    }

    /// Field metadata for every field of `model`.
    pub fn fields_get(&mut self, model: &str) -> Result<HashMap<String, FieldInfo>> {
        let uid = self.authenticate()?;
        let params = json!({
            "service": "object",
            "method": "execute_kw",
            "args": [
                self.db,
                uid,
                self.password,
                model,
                "fields_get",
                [],
                {"attributes": ["model", "name", "store", "readonly", "depends"]},
            ],
        });
        let result = self
            .post("/jsonrpc", &RpcRequest::call(params, 1))?
            .ok_or_else(|| Error::RpcShape {
                message: format!("fields_get for '{model}' returned no result"),
            })?;

        let Value::Object(fields) = result else {
            return Err(Error::RpcShape {
                message: format!("fields_get for '{model}' did not return an object"),
            });
        };

        Ok(fields
            .into_iter()
            .map(|(name, meta)| (name, field_info_from(&meta)))
            .collect())
    }

    /// Whether the named module is installed on the database.
    pub fn module_installed(&mut self, name: &str) -> Result<bool> {
        let uid = self.authenticate()?;
        let params = json!({
            "service": "object",
            "method": "execute_kw",
            "args": [
                self.db,
                uid,
                self.password,
                "ir.module.module",
                "search_read",
                [[["name", "=", name]]],
                {"fields": ["state"], "limit": 1},
            ],
        });
        let result = self.post("/jsonrpc", &RpcRequest::call(params, 2))?;

        Ok(result
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("state"))
            .and_then(Value::as_str)
            .is_some_and(|state| state == "installed"))
    }

    /// POST a call envelope, returning the `result` member.
    fn post<P: serde::Serialize>(
        &self,
        path: &str,
        request: &RpcRequest<P>,
    ) -> Result<Option<Value>> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| Error::Rpc {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RpcStatus {
                url,
                status: status.as_u16(),
            });
        }

        let mut body: Value = response.json().map_err(|e| Error::Rpc {
            url: url.clone(),
            source: e,
        })?;

        if let Some(error) = body.get("error") {
            return Err(Error::RpcShape {
                message: format!("server error from '{url}': {error}"),
            });
        }
        Ok(match body.get_mut("result") {
            Some(result) if !result.is_null() => Some(result.take()),
            _ => None,
        })
    }
}

impl FieldsSource for RpcClient {
    fn fields_info(&mut self, model: &str) -> Result<HashMap<String, FieldInfo>> {
        self.fields_get(model)
    }
}

fn field_info_from(meta: &Value) -> FieldInfo {
    FieldInfo {
        store: meta.get("store").and_then(Value::as_bool).unwrap_or(false),
        readonly: meta
            .get("readonly")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        depends: meta
            .get("depends")
            .and_then(Value::as_array)
            .map(|deps| {
                deps.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
