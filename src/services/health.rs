/// Service health status
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceHealth {
    /// Service is operating normally
    Healthy,

    /// Service is running but something upstream is failing
    Degraded(String),

    /// Service has failed or is not running
    Unhealthy(String),

    /// Service is switched off in the config
    Disabled,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceHealth::Healthy | ServiceHealth::Disabled)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ServiceHealth::Degraded(_))
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, ServiceHealth::Unhealthy(_))
    }
}

impl std::fmt::Display for ServiceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceHealth::Healthy => write!(f, "healthy"),
            ServiceHealth::Degraded(reason) => write!(f, "degraded ({})", reason),
            ServiceHealth::Unhealthy(reason) => write!(f, "unhealthy ({})", reason),
            ServiceHealth::Disabled => write!(f, "disabled"),
        }
    }
}
