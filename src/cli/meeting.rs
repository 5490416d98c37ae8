//! Shell commands for working with meetings directly.

use anyhow::Result;
use serde_json::Value;

use crate::telemost::{TelemostClient, snapshot, validate_meeting_data};

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn create(
    waiting_room_level: &str,
    stream_title: Option<&str>,
    stream_description: &str,
    stream_access_level: &str,
    cohost_emails: &[String],
    save: bool,
) -> Result<()> {
    let client = TelemostClient::new(None)?;
    let cohosts = if cohost_emails.is_empty() {
        None
    } else {
        Some(cohost_emails)
    };

    let meeting = client
        .create_advanced_meeting(
            waiting_room_level,
            stream_title,
            stream_description,
            stream_access_level,
            cohosts,
        )
        .await?;

    if save {
        validate_meeting_data(&meeting)?;
        let path = snapshot::save_meeting_data(&meeting, None)?;
        println!("Saved meeting snapshot to {}", path.display());
    }

    print_json(&meeting)
}

pub async fn get(id: &str) -> Result<()> {
    let client = TelemostClient::new(None)?;
    let meeting = client.get_meeting(id).await?;
    print_json(&meeting)
}

pub async fn list(limit: u32, offset: u32) -> Result<()> {
    let client = TelemostClient::new(None)?;
    let meetings = client.list_meetings(limit, offset).await?;
    print_json(&meetings)
}

pub async fn delete(id: &str) -> Result<()> {
    let client = TelemostClient::new(None)?;
    let result = client.delete_meeting(id).await?;
    print_json(&result)
}
