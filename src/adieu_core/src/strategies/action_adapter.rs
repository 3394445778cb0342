use crate::{LogoutOutcome, WebContext};

/// Turns an abstract logout outcome into a transport-level response.
///
/// Web frameworks implement this for their own response type. The logout flow
/// hands over exactly one outcome per invocation and never inspects the result;
/// it is returned to the caller untouched.
///
/// # Example
///
/// ```ignore
/// impl HttpActionAdapter for AxumActionAdapter {
///     type Response = axum::response::Response;
///
///     fn adapt(&self, outcome: LogoutOutcome, _context: &dyn WebContext) -> Self::Response {
///         match outcome {
///             LogoutOutcome::Redirect(action) => Redirect::to(action.location()).into_response(),
///             LogoutOutcome::NoContent => StatusCode::NO_CONTENT.into_response(),
///             LogoutOutcome::Rejected { reason } => (StatusCode::BAD_REQUEST, reason).into_response(),
///         }
///     }
/// }
/// ```
pub trait HttpActionAdapter: Send + Sync {
    /// The response type produced by this adapter
    type Response;

    fn adapt(&self, outcome: LogoutOutcome, context: &dyn WebContext) -> Self::Response;
}
