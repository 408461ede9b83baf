use serde::Serialize;

/// Liveness payload returned by the health route.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}
