use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "boardgame_recommender=info";

/// Correlates the log lines emitted while serving one recommendation call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Span that every event of the call is nested under
    pub fn span(self, kind: &'static str) -> tracing::Span {
        tracing::info_span!("recommendation", kind, request_id = %self.0)
    }
}

/// Installs the global fmt subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
