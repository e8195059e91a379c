use axum::response::Html;

const DASHBOARD_PAGE: &str = include_str!("../../assets/dashboard.html");

/// Static French dashboard; counters are loaded client-side from `/api/stats`
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
