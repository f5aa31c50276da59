use crate::api::http::{build_client, send_for_text};
use crate::config::SocrataConfig;
use crate::domain::Tree;
use crate::error::{PipelineError, Result};
use serde::Deserialize;

const SOURCE: &str = "socrata trees";

/// One row of the tree inventory. Socrata serializes every column as a
/// string, and the dataset stores latitude in `x` and longitude in `y`.
#[derive(Debug, Deserialize)]
struct TreeRecord {
    #[serde(default)]
    trees_id: Option<String>,
    #[serde(default)]
    cd: Option<String>,
    #[serde(default)]
    common: Option<String>,
    #[serde(default)]
    botanical: Option<String>,
    #[serde(default)]
    dbh: Option<String>,
    #[serde(default)]
    x: Option<String>,
    #[serde(default)]
    y: Option<String>,
}

pub fn resource_url(config: &SocrataConfig) -> String {
    format!("https://{}/resource/{}.json", config.domain, config.dataset)
}

/// GET for one area, capped at `limit` rows
pub fn tree_request(
    client: &reqwest::blocking::Client,
    config: &SocrataConfig,
    area: &str,
    limit: u32,
) -> reqwest::blocking::RequestBuilder {
    let mut request = client.get(resource_url(config)).query(&[
        (config.area_field.as_str(), area.to_string()),
        ("$limit", limit.to_string()),
    ]);
    if let Some(token) = &config.app_token {
        request = request.header("X-App-Token", token);
    }
    request
}

/// Fetch trees for a named area.
///
/// At most `limit` rows come back; the portal is not paginated, so a full
/// page means the result may be truncated.
pub fn fetch_trees(config: &SocrataConfig, area: &str, limit: u32) -> Result<Vec<Tree>> {
    let client = build_client(SOURCE, config.timeout_secs)?;
    tracing::debug!(url = %resource_url(config), area, limit, "fetching trees");

    let request = tree_request(&client, config, area, limit);
    let body = send_for_text(SOURCE, request)?;
    let trees = parse_trees(&body)?;

    if trees.len() as u64 >= u64::from(limit) {
        tracing::warn!(
            limit,
            "tree query returned a full page; results are truncated at the limit"
        );
    }
    tracing::debug!(count = trees.len(), area, "parsed trees");
    Ok(trees)
}

/// Decode a list of tree records
pub fn parse_trees(body: &str) -> Result<Vec<Tree>> {
    let records: Vec<TreeRecord> = serde_json::from_str(body)
        .map_err(|e| PipelineError::fetch(SOURCE, format!("malformed payload: {e}")))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_tree(index))
        .collect()
}

fn parse_number(label: &str, field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| PipelineError::invalid(label, field, value))
}

impl TreeRecord {
    fn into_tree(self, index: usize) -> Result<Tree> {
        let id = self
            .trees_id
            .ok_or_else(|| PipelineError::missing(format!("tree #{index}"), "trees_id"))?;
        let label = format!("tree {id}");

        let common_name = self
            .common
            .ok_or_else(|| PipelineError::missing(label.clone(), "common"))?;
        let x = self
            .x
            .ok_or_else(|| PipelineError::missing(label.clone(), "x"))?;
        let y = self
            .y
            .ok_or_else(|| PipelineError::missing(label.clone(), "y"))?;

        let latitude = parse_number(&label, "x", &x)?;
        let longitude = parse_number(&label, "y", &y)?;
        let diameter = match self.dbh.as_deref() {
            Some(d) if !d.trim().is_empty() => Some(parse_number(&label, "dbh", d)?),
            _ => None,
        };

        Ok(Tree {
            id,
            council_district: self.cd,
            common_name,
            botanical_name: self.botanical,
            diameter,
            latitude,
            longitude,
        })
    }
}
