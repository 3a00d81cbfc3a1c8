// File: crates/btcchart/src/upload.rs
// Summary: Multipart image upload to the media host; returns the hosted URL.

use anyhow::{anyhow, Context, Result};
use log::info;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone)]
pub struct Uploader {
    client: reqwest::Client,
    endpoint: String,
}

impl Uploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// POST the PNG and decode the hosted URL. The host answers 200 with a
    /// JSON-encoded string; anything else becomes an error carrying the body.
    pub async fn upload(&self, png: Vec<u8>) -> Result<String> {
        let part = Part::bytes(png)
            .file_name("fileToUpload")
            .mime_str("image/png")?;
        let form = Form::new().part("fileToUpload", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .context("upload request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("upload rejected ({status}): {body}"));
        }
        let url: String = resp.json().await.context("decoding upload response")?;
        info!("uploaded chart: {url}");
        Ok(url)
    }
}
