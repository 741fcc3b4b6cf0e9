//! Bid confirmation page.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::Toast;
use crate::models::toast::take_pending_toast;

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/success.html")]
pub struct OrderSuccessTemplate {
    /// Toast parked by the submission that redirected here.
    pub toast: Option<Toast>,
}

/// Display the confirmation page.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session))]
pub async fn success(session: Session) -> Result<OrderSuccessTemplate> {
    let toast = take_pending_toast(&session).await?;
    Ok(OrderSuccessTemplate { toast })
}
