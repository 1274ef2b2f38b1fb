use std::{collections::HashMap, env};

pub const ICINGA_VAR_PREFIX: &str = "ICINGA_";

/// Snapshots the notification context from the process environment.
pub fn from_process() -> HashMap<String, String> {
    collect(env::vars())
}

/// Keeps the variables the monitoring system set for this notification:
/// name starts with `ICINGA_`, value is non-empty. Names are kept verbatim,
/// prefix included.
pub fn collect<I>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter(|(name, value)| name.starts_with(ICINGA_VAR_PREFIX) && !value.is_empty())
        .collect()
}
