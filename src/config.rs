use crate::game::{GameOptions, PowerSchedule};
use anyhow::{anyhow, Context};
use std::time::Duration;

/// Process-wide settings, read from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// How long players have to vote before missing votes count as no.
    pub vote_timeout: Option<Duration>,
    /// Fixed seed for reproducible games.
    pub seed: Option<u64>,
    /// Rules applied to every game.
    pub options: GameOptions,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let vote_timeout = match lookup("HITLER_VOTE_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs.trim().parse().context("HITLER_VOTE_TIMEOUT_SECS must be a number")?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };
        let seed = lookup("HITLER_SEED")
            .map(|s| s.trim().parse::<u64>())
            .transpose()
            .context("HITLER_SEED must be a number")?;
        let powers = lookup("HITLER_POWERS")
            .map(|s| s.parse::<PowerSchedule>())
            .transpose()
            .map_err(|e| anyhow!(e))
            .context("invalid HITLER_POWERS")?
            .unwrap_or_default();
        let hitler_knows_fascists = lookup("HITLER_KNOWS_FASCISTS")
            .map(|s| parse_bool(&s))
            .transpose()
            .context("invalid HITLER_KNOWS_FASCISTS")?
            .unwrap_or(false);

        Ok(Self {
            vote_timeout,
            seed,
            options: GameOptions {
                powers,
                hitler_knows_fascists,
            },
        })
    }
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("expected a boolean, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = config(&[
            ("HITLER_VOTE_TIMEOUT_SECS", "90"),
            ("HITLER_SEED", "7"),
            ("HITLER_POWERS", "headcount"),
            ("HITLER_KNOWS_FASCISTS", "yes"),
        ])
        .unwrap();
        assert_eq!(config.vote_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.options.powers, PowerSchedule::Headcount);
        assert!(config.options.hitler_knows_fascists);
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        assert_eq!(config(&[("HITLER_VOTE_TIMEOUT_SECS", "0")]).unwrap().vote_timeout, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(config(&[("HITLER_SEED", "abc")]).is_err());
        assert!(config(&[("HITLER_POWERS", "random")]).is_err());
        assert!(config(&[("HITLER_KNOWS_FASCISTS", "maybe")]).is_err());
    }
}
