//! Window aggregation for the view counter
//!
//! Rolling counts over four fixed lookback windows plus two unbounded
//! totals. The six queries are independent, so they run concurrently; all
//! of them complete before the caller records the new view, which keeps
//! every returned count exclusive of the request's own hit. Under
//! concurrent writers the windows may be computed against slightly
//! different row sets, an accepted approximation for an analytics
//! counter, there is no shared snapshot between the queries.

use chrono::Utc;
use serde::Serialize;

use crate::db::Database;

pub const WINDOW_1H: i64 = 3600;
pub const WINDOW_1D: i64 = 86400;
pub const WINDOW_1W: i64 = 604800;
pub const WINDOW_1M: i64 = 2592000;

/// Response body of GET /site/view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub site_view_all: i64,
    pub site_base_view_all: i64,
    pub site_1h_view: i64,
    pub site_1d_view: i64,
    pub site_1w_view: i64,
    pub site_1m_view: i64,
}

/// Current wall-clock time in whole seconds since epoch, the unit of the
/// `views.Time` column.
pub fn now_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Count views of `(site_base, path)` per window, plus the unbounded
/// per-path and per-site totals. Any query failure propagates; a missing
/// row set is never reported as zero.
pub async fn aggregate(
    db: &Database,
    site_base: &str,
    path: &str,
    now: i64,
) -> Result<ViewCounts, sqlx::Error> {
    let (all_path, all_site, h1, d1, w1, m1) = tokio::join!(
        db.count_views(site_base, path),
        db.count_site_views(site_base),
        db.count_views_since(site_base, path, now - WINDOW_1H),
        db.count_views_since(site_base, path, now - WINDOW_1D),
        db.count_views_since(site_base, path, now - WINDOW_1W),
        db.count_views_since(site_base, path, now - WINDOW_1M),
    );

    Ok(ViewCounts {
        site_view_all: all_path?,
        site_base_view_all: all_site?,
        site_1h_view: h1?,
        site_1d_view: d1?,
        site_1w_view: w1?,
        site_1m_view: m1?,
    })
}
