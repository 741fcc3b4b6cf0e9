//! Landing page and bid submission handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use runner_bids_core::{BidDraft, BidField, City, FieldErrors, PaymentType, validate};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::models::Toast;
use crate::models::toast::set_pending_toast;
use crate::routes::{ORDER_SUCCESS_PATH, RUNNER_SIGNUP_PATH};
use crate::state::AppState;

/// Toast shown on the confirmation page after a successful submission.
pub const BID_CREATED_MESSAGE: &str = "Bid has been created successfully";

/// Feature bullets under the headline.
const FEATURES: [&str; 3] = [
    "Bid Submission",
    "Instant Notification to Runners",
    "AI-Driven Negotiations",
];

// =============================================================================
// View Models
// =============================================================================

/// An `<option>` of a dropdown.
#[derive(Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Everything the bid form needs to render.
pub struct BidFormView {
    pub draft: BidDraft,
    pub errors: FieldErrors,
    pub cities: Vec<SelectOption>,
    pub payment_types: Vec<SelectOption>,
}

impl BidFormView {
    fn new(draft: BidDraft, errors: FieldErrors, cities: &[City]) -> Self {
        let cities = cities
            .iter()
            .map(|city| SelectOption {
                value: city.name.clone(),
                label: city.name.clone(),
                selected: city.name == draft.city,
            })
            .collect();

        let payment_types = PaymentType::ALL
            .into_iter()
            .map(|payment| SelectOption {
                value: payment.label().to_string(),
                label: payment.label().to_string(),
                selected: payment.label() == draft.payment_type,
            })
            .collect();

        Self {
            draft,
            errors,
            cities,
            payment_types,
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub features: &'static [&'static str],
    pub runner_signup_path: &'static str,
    pub form: BidFormView,
    pub toast: Option<Toast>,
}

impl HomeTemplate {
    fn new(form: BidFormView, toast: Option<Toast>) -> Self {
        Self {
            features: &FEATURES,
            runner_signup_path: RUNNER_SIGNUP_PATH,
            form,
            toast,
        }
    }
}

// =============================================================================
// Form Input
// =============================================================================

/// Submitted bid form. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BidForm {
    pub name: String,
    pub email: String,
    pub city: String,
    pub delivery_address: String,
    pub price_willing_to_pay: String,
    pub special_instructions: String,
    pub payment_type: String,
}

impl BidForm {
    /// Build a draft the same way typing into the form would, so the price
    /// input guard applies to posted values too.
    ///
    /// Values are trimmed first; the draft forwarded to the backend is the
    /// one that was validated.
    #[must_use]
    pub fn into_draft(self) -> BidDraft {
        let mut draft = BidDraft::default();
        let values = [
            (BidField::Name, self.name),
            (BidField::Email, self.email),
            (BidField::City, self.city),
            (BidField::DeliveryAddress, self.delivery_address),
            (BidField::Price, self.price_willing_to_pay),
            (BidField::SpecialInstructions, self.special_instructions),
            (BidField::PaymentType, self.payment_type),
        ];

        for (field, value) in values {
            if !draft.set(field, value.trim()) {
                tracing::debug!(field = %field, "Input rejected by field guard");
            }
        }

        draft
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Load the city list, degrading to an empty list when the backend fails.
async fn load_cities(state: &AppState) -> Vec<City> {
    state.bid_api().list_cities().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch city list");
        Vec::new()
    })
}

/// Re-render the page after a failed submission.
///
/// The submit button is rendered enabled again; the draft is preserved.
async fn render_failure(
    state: &AppState,
    draft: BidDraft,
    errors: FieldErrors,
    toast: Toast,
) -> Response {
    let cities = load_cities(state).await;
    let form = BidFormView::new(draft, errors, &cities);

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        HomeTemplate::new(form, Some(toast)),
    )
        .into_response()
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let cities = load_cities(&state).await;
    let form = BidFormView::new(BidDraft::default(), FieldErrors::default(), &cities);

    HomeTemplate::new(form, None)
}

/// Validate and submit a bid.
///
/// POST /bids
///
/// The first invalid field is reported inline and as a toast without
/// contacting the backend. A valid draft is forwarded; `201 Created`
/// redirects to the confirmation page, anything else re-renders the form
/// with the backend's message.
#[instrument(skip(state, session, form))]
pub async fn submit_bid(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BidForm>,
) -> Response {
    let draft = form.into_draft();

    if let Err(err) = validate(&draft) {
        tracing::info!(field = %err.field, "Bid failed validation");
        return render_failure(
            &state,
            draft,
            FieldErrors::for_failure(&err),
            Toast::error(err.to_string()),
        )
        .await;
    }

    match state.bid_api().create_bid(&draft).await {
        Ok(()) => {
            tracing::info!(city = %draft.city, "Bid created");
            add_breadcrumb("bid", "Bid created", Some(&[("city", draft.city.as_str())]));

            if let Err(e) = set_pending_toast(&session, &Toast::success(BID_CREATED_MESSAGE)).await
            {
                tracing::error!("Failed to save toast to session: {e}");
            }

            Redirect::to(ORDER_SUCCESS_PATH).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Bid submission failed");
            let toast = Toast::error(e.user_message());
            render_failure(&state, draft, FieldErrors::default(), toast).await
        }
    }
}
