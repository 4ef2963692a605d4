use serde::Deserialize;

/// Which [`PlatformTransport`](crate::ports::outbound::PlatformTransport) talks to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Hand-rolled HTTP/1.1 over a plain TCP socket; tolerates malformed replies
    #[default]
    Raw,
    /// reqwest client; needed for https
    Standard,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(TransportKind::Raw),
            "standard" => Ok(TransportKind::Standard),
            _ => Err(format!(
                "Invalid transport: {}. Please specify 'raw' or 'standard'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Raw => write!(f, "raw"),
            TransportKind::Standard => write!(f, "standard"),
        }
    }
}
