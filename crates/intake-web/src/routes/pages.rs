//! Page route handlers.
//!
//! Serves the embedded form and dashboard clients. The server treats both as
//! external collaborators: they validate and render, it stores and fans out.

use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../../../../assets/web/index.html");
const FORM_HTML: &str = include_str!("../../../../assets/web/patient-form.html");
const STAFF_HTML: &str = include_str!("../../../../assets/web/staff.html");

/// GET / - Landing page linking the two screens.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// GET /patient-form - Serve the patient registration form.
pub async fn patient_form() -> impl IntoResponse {
    Html(FORM_HTML)
}

/// GET /staff - Serve the real-time staff dashboard.
pub async fn staff_view() -> impl IntoResponse {
    Html(STAFF_HTML)
}
