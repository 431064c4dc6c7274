use std::{env, net::SocketAddr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub session_idle: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("SESSION_IDLE_MINUTES").ok())
    }

    fn from_vars(port: Option<String>, idle_minutes: Option<String>) -> Self {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let idle_minutes = match idle_minutes.map(|value| value.parse::<u64>()) {
            Some(Ok(minutes)) if minutes >= 1 => minutes,
            Some(_) => {
                warn!("invalid SESSION_IDLE_MINUTES, using {DEFAULT_SESSION_IDLE_MINUTES}");
                DEFAULT_SESSION_IDLE_MINUTES
            }
            None => DEFAULT_SESSION_IDLE_MINUTES,
        };

        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            session_idle: Duration::from_secs(idle_minutes * 60),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}
