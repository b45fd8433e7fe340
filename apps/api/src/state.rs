use crate::config::Config;
use crate::cv::store::CvStore;
use crate::render::geometry::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// There is deliberately no cache and no connection pool here — the only
/// persistent state in the system is the YAML document the store wraps.
#[derive(Clone)]
pub struct AppState {
    pub store: CvStore,
    pub config: Config,
    /// Page geometry for the renderer — paper size, margins, photo sizing.
    pub geometry: PageGeometry,
}
