// ABOUTME: Parsing of provider://path references and joining of object paths
// ABOUTME: Keeps listing results and roots in one slash-separated form

use crate::engine::error::{Result, SweepError};

/// Split `"<provider>://<path>"` into its two halves
pub fn split_reference(reference: &str) -> Result<(&str, &str)> {
    let (provider, path) =
        reference
            .split_once("://")
            .ok_or_else(|| SweepError::InvalidReference {
                reference: reference.to_string(),
                reason: "expected <provider>://<path>".to_string(),
            })?;

    if provider.is_empty() {
        return Err(SweepError::InvalidReference {
            reference: reference.to_string(),
            reason: "provider is empty".to_string(),
        });
    }

    Ok((provider, path))
}

/// Join a root and a relative object path with exactly one separator
pub fn join_path(root: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        return root.to_string();
    }
    if root.is_empty() {
        return relative.to_string();
    }

    format!("{}/{}", root.trim_end_matches('/'), relative)
}
