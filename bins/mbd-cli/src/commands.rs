//! Command implementations
//!
//! Each command issues exactly one API call and prints either the text
//! rendering or the raw envelope as JSON.

use anyhow::{bail, Context, Result};
use mbd_client::types::{LabelMap, MbdResponse};
use mbd_client::{
    format_casts, format_labels, format_users, Cast, ClientConfig, EnvSettings, EventType,
    LabelCategory, MbdClient, Options, Settings, SettingsSource, UserProfile,
};
use serde_json::Value;

/// Resolve settings from the environment; `--verbose` forces debug on
pub fn settings(verbose: bool) -> Result<Settings> {
    settings_from(&EnvSettings, verbose)
}

fn settings_from<S: SettingsSource>(source: &S, verbose: bool) -> Result<Settings> {
    let mut settings = Settings::resolve(source).context("Invalid MBD settings")?;
    if verbose {
        settings.debug = true;
    }
    Ok(settings)
}

/// Build a client from resolved settings
pub fn client(settings: &Settings) -> Result<MbdClient> {
    MbdClient::with_config(ClientConfig::from_settings(settings)).context("Failed to build client")
}

/// Parse repeated `key=value` arguments into request options
///
/// Values are parsed as JSON when possible (`top_k=10`, `filters={...}`)
/// and kept as strings otherwise.
pub fn parse_options(pairs: &[String]) -> Result<Options> {
    let mut options = Options::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("option '{pair}' must look like key=value");
        };
        if key.is_empty() {
            bail!("option '{pair}' has an empty key");
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        options.insert(key.to_string(), value);
    }
    Ok(options)
}

fn print_casts(response: &MbdResponse<Vec<Cast>>, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", format_casts(response));
    }
    Ok(())
}

fn print_users(response: &MbdResponse<Vec<UserProfile>>, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", format_users(response));
    }
    Ok(())
}

fn print_labels(response: &MbdResponse<LabelMap>, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", format_labels(response));
    }
    Ok(())
}

pub async fn for_you(client: &MbdClient, user_id: &str, opts: &[String], format: &str) -> Result<()> {
    let response = client.casts().for_you_feed(user_id, parse_options(opts)?).await?;
    print_casts(&response, format)
}

pub async fn trending(client: &MbdClient, opts: &[String], format: &str) -> Result<()> {
    let response = client.casts().trending_feed(parse_options(opts)?).await?;
    print_casts(&response, format)
}

pub async fn popular(client: &MbdClient, opts: &[String], format: &str) -> Result<()> {
    let response = client.casts().popular_feed(parse_options(opts)?).await?;
    print_casts(&response, format)
}

pub async fn search(client: &MbdClient, query: &str, opts: &[String], format: &str) -> Result<()> {
    let response = client.casts().semantic_search(query, parse_options(opts)?).await?;
    print_casts(&response, format)
}

pub async fn labels_items(
    client: &MbdClient,
    items: &[String],
    category: LabelCategory,
    format: &str,
) -> Result<()> {
    let response = client.labels().for_items(items, category).await?;
    print_labels(&response, format)
}

pub async fn labels_text(
    client: &MbdClient,
    texts: &[String],
    category: LabelCategory,
    format: &str,
) -> Result<()> {
    let response = client.labels().for_text(texts, category).await?;
    print_labels(&response, format)
}

pub async fn top_items(client: &MbdClient, label: &str, opts: &[String], format: &str) -> Result<()> {
    let response = client.labels().top_items(label, parse_options(opts)?).await?;
    print_casts(&response, format)
}

pub async fn similar_users(
    client: &MbdClient,
    user_id: &str,
    opts: &[String],
    format: &str,
) -> Result<()> {
    let response = client.users().similar(user_id, parse_options(opts)?).await?;
    print_users(&response, format)
}

pub async fn search_users(
    client: &MbdClient,
    query: &str,
    opts: &[String],
    format: &str,
) -> Result<()> {
    let response = client.users().search(query, parse_options(opts)?).await?;
    print_users(&response, format)
}

pub async fn channel_users(
    client: &MbdClient,
    channel: &str,
    event: EventType,
    opts: &[String],
    format: &str,
) -> Result<()> {
    let response = client
        .users()
        .for_channel(channel, event, parse_options(opts)?)
        .await?;
    print_users(&response, format)
}

pub async fn item_users(
    client: &MbdClient,
    item_id: &str,
    event: EventType,
    opts: &[String],
    format: &str,
) -> Result<()> {
    let response = client
        .users()
        .for_item(item_id, event, parse_options(opts)?)
        .await?;
    print_users(&response, format)
}

pub async fn topic_users(
    client: &MbdClient,
    topic: &str,
    event: EventType,
    opts: &[String],
    format: &str,
) -> Result<()> {
    let response = client
        .users()
        .for_topic(topic, event, parse_options(opts)?)
        .await?;
    print_users(&response, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbd_client::config::MBD_DEBUG;
    use std::collections::HashMap;

    #[test]
    fn test_parse_options_json_and_strings() {
        let options = parse_options(&[
            "top_k=10".to_string(),
            "scoring=1day".to_string(),
            "filters={\"channels\":[\"rust\"]}".to_string(),
            "note=a=b".to_string(),
        ])
        .unwrap();

        assert_eq!(options["top_k"], 10);
        assert_eq!(options["scoring"], "1day");
        assert_eq!(options["filters"]["channels"][0], "rust");
        assert_eq!(options["note"], "a=b");
    }

    #[test]
    fn test_debug_from_settings_or_verbose() {
        let quiet: HashMap<String, String> = HashMap::new();
        let debug: HashMap<String, String> =
            [(MBD_DEBUG.to_string(), "true".to_string())].into_iter().collect();

        assert!(!settings_from(&quiet, false).unwrap().debug);
        assert!(settings_from(&quiet, true).unwrap().debug);
        assert!(settings_from(&debug, false).unwrap().debug);
        assert!(client(&settings_from(&debug, false).unwrap()).unwrap().is_debug());
    }

    #[test]
    fn test_parse_options_rejects_malformed() {
        assert!(parse_options(&["no-equals".to_string()]).is_err());
        assert!(parse_options(&["=value".to_string()]).is_err());
        assert!(parse_options(&[]).unwrap().is_empty());
    }
}
