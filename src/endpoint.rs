//! Endpoint descriptions for RapidAPI-hosted providers.
//!
//! Every upstream endpoint is one [`Endpoint`]: a provider host, an optional
//! folder, the endpoint name and the names of its required and optional
//! parameters. [`ParamStyle`] decides where the values end up in the request.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A RapidAPI-hosted API, identified by its host.
#[derive(Debug, PartialEq, Eq)]
pub struct Provider {
    host: &'static str,
    label: &'static str,
}

impl Provider {
    pub const fn new(host: &'static str, label: &'static str) -> Self {
        Self { host, label }
    }

    pub fn host(&self) -> &'static str {
        self.host
    }

    /// Human-readable name, e.g. "Tennis Live Data".
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Marketplace the API is bought through, e.g. "rapidapi". Keys credentials.
    pub fn api_provider(&self) -> &'static str {
        self.host.split('.').nth(2).unwrap_or_default()
    }

    /// API name with RapidAPI's numeric host suffix dropped ("livescore6" -> "livescore").
    pub fn apiname(&self) -> &'static str {
        self.host
            .split('.')
            .next()
            .unwrap_or_default()
            .trim_end_matches(|c: char| c.is_ascii_digit())
    }
}

/// Where parameter values are placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `{folder}/{name}/{value}/../{optvalue}/..`
    Path,
    /// `{folder}/{name}?param=value&..`
    Query,
    /// `{folder}/{main}/{name}/{param}/{value}/..`, optional values in the
    /// path or the query string.
    MainParam { optparams_in_url: bool },
}

/// A request ready to be sent: absolute URL plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    provider: &'static Provider,
    name: &'static str,
    folder: Option<&'static str>,
    params: &'static [&'static str],
    optparams: &'static [&'static str],
    style: ParamStyle,
}

impl Endpoint {
    pub fn new(provider: &'static Provider, name: &'static str, style: ParamStyle) -> Self {
        Self {
            provider,
            name,
            folder: None,
            params: &[],
            optparams: &[],
            style,
        }
    }

    pub fn path(provider: &'static Provider, name: &'static str) -> Self {
        Self::new(provider, name, ParamStyle::Path)
    }

    pub fn query(provider: &'static Provider, name: &'static str) -> Self {
        Self::new(provider, name, ParamStyle::Query)
    }

    pub fn main_param(provider: &'static Provider, name: &'static str, optparams_in_url: bool) -> Self {
        Self::new(provider, name, ParamStyle::MainParam { optparams_in_url })
    }

    pub fn in_folder(mut self, folder: &'static str) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn with_params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    pub fn with_optparams(mut self, optparams: &'static [&'static str]) -> Self {
        self.optparams = optparams;
        self
    }

    pub fn provider(&self) -> &'static Provider {
        self.provider
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn folder(&self) -> Option<&'static str> {
        self.folder
    }

    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    pub fn optparams(&self) -> &'static [&'static str] {
        self.optparams
    }

    pub fn style(&self) -> ParamStyle {
        self.style
    }

    /// This endpoint's URL on the provider's own host.
    pub fn url(&self) -> String {
        self.url_with_base(&self.provider.base_url())
    }

    /// URL template rooted at `base`. A main parameter shows as `{name}`.
    pub fn url_with_base(&self, base: &str) -> String {
        let mut url = self.folder_url(base);
        if let ParamStyle::MainParam { .. } = self.style {
            if let Some(main) = self.params.first() {
                url.push_str(&format!("/{{{main}}}"));
            }
        }
        url.push('/');
        url.push_str(self.name);
        url
    }

    fn folder_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self.folder {
            Some(folder) => format!("{base}/{folder}"),
            None => base.to_string(),
        }
    }

    fn validate_paramvalues(&self, values: &[&str]) -> Result<()> {
        if values.len() != self.params.len() {
            return Err(Error::InvalidParamCount {
                expected: self.params.len(),
                got: values.len(),
            });
        }
        Ok(())
    }

    fn validate_optparamvalues(&self, opts: &[(&str, &str)]) -> Result<()> {
        let unknown: Vec<String> = opts
            .iter()
            .filter(|(key, _)| !self.optparams.iter().any(|p| p == key))
            .map(|(key, _)| key.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(Error::InvalidOptionalParams(unknown));
        }
        Ok(())
    }

    pub fn validate(&self, values: &[&str], opts: &[(&str, &str)]) -> Result<()> {
        self.validate_paramvalues(values)?;
        self.validate_optparamvalues(opts)
    }

    /// Pair each required param with its value.
    pub fn paramsmap(&self, values: &[&str]) -> Result<Vec<(String, String)>> {
        self.validate_paramvalues(values)?;
        Ok(self
            .params
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    /// Validate optional values, keeping the caller's order.
    pub fn optparamsmap(&self, opts: &[(&str, &str)]) -> Result<Vec<(String, String)>> {
        self.validate_optparamvalues(opts)?;
        Ok(opts
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    /// Build the URL and query string for a call rooted at `base`.
    pub fn request(&self, base: &str, values: &[&str], opts: &[(&str, &str)]) -> Result<PreparedRequest> {
        self.validate(values, opts)?;

        let mut url = self.folder_url(base);
        let mut query = Vec::new();

        match self.style {
            ParamStyle::Path => {
                push_segment(&mut url, self.name);
                for value in values {
                    push_segment(&mut url, &urlencoding::encode(value));
                }
                for (_, value) in opts {
                    push_segment(&mut url, &urlencoding::encode(value));
                }
            }
            ParamStyle::Query => {
                push_segment(&mut url, self.name);
                query = self.paramsmap(values)?;
                query.extend(self.optparamsmap(opts)?);
            }
            ParamStyle::MainParam { optparams_in_url } => {
                let rest = match values.split_first() {
                    Some((main, rest)) => {
                        push_segment(&mut url, &urlencoding::encode(main));
                        rest
                    }
                    None => values,
                };
                push_segment(&mut url, self.name);
                for (param, value) in self.params.iter().skip(1).zip(rest) {
                    push_segment(&mut url, param);
                    push_segment(&mut url, &urlencoding::encode(value));
                }
                if optparams_in_url {
                    for (_, value) in opts {
                        push_segment(&mut url, &urlencoding::encode(value));
                    }
                } else {
                    query = self.optparamsmap(opts)?;
                }
            }
        }

        Ok(PreparedRequest { url, query })
    }

    /// Default on-disk location of a cached response for these values.
    pub fn sample_path(&self, data_dir: &Path, values: &[&str], opts: &[(&str, &str)]) -> Result<PathBuf> {
        self.validate(values, opts)?;

        let mut filename = String::new();
        if let Some(folder) = self.folder {
            filename.push_str(&folder.replace('/', "_"));
            filename.push('_');
        }
        filename.push_str(&self.name.replace('-', "_"));
        if !values.is_empty() {
            filename.push('_');
            filename.push_str(&values.join("_"));
        }
        if !opts.is_empty() {
            let optvalues: Vec<&str> = opts.iter().map(|(_, v)| *v).collect();
            filename.push('_');
            filename.push_str(&optvalues.join("_"));
        }
        filename.push_str(".json");

        Ok(data_dir
            .join(self.provider.api_provider())
            .join(self.provider.apiname())
            .join("samples")
            .join(filename))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} endpoint(folder={}, endpoint={}, params={:?}, optparams={:?})",
            self.provider.label,
            self.folder.unwrap_or("-"),
            self.name,
            self.params,
            self.optparams
        )
    }
}

fn push_segment(url: &mut String, segment: &str) {
    url.push('/');
    url.push_str(segment);
}

/// First endpoint called `name`, restricted to `folder` when one is given.
pub fn get_endpoint<'a>(endpoints: &'a [Endpoint], name: &str, folder: Option<&str>) -> Option<&'a Endpoint> {
    endpoints
        .iter()
        .find(|e| e.name == name && folder.map_or(true, |f| e.folder == Some(f)))
}
